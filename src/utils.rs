//! Some utility functions

use crate::Appointment;
use crate::session::Session;

/// A debug utility that pretty-prints a session and its appointments
pub fn print_session(session: &Session) {
    let state = match session.is_authenticated() {
        true => "logged in",
        false => "anonymous",
    };
    println!("SESSION {} ({}, {})", session.display_name(), state, session.id());
    for (index, appointment) in session.appointments().iter().enumerate() {
        print_appointment(index, appointment);
    }
    println!("    {}", session.summary());
}

pub fn print_appointment(index: usize, appointment: &Appointment) {
    let completion = if appointment.completed() { "✓" } else { " " };
    println!("    {}{} {}\t{} at {}\t{}", completion, index, appointment.doctor(), appointment.date(), appointment.time(), appointment.reason_or_default());
}

/// Wait for the user to press enter
pub fn pause() {
    let mut line = String::new();
    println!("Press ENTER to continue...");
    std::io::stdin().read_line(&mut line).ok();
}
