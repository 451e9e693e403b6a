//! Walks through a typical visit of the portal.
//! Set the RUST_LOG environment variable to display more info about what happens.

use std::time::Duration;

use telecare_session::Portal;
use telecare_session::config;
use telecare_session::call::CallOutcome;
use telecare_session::view::Section;
use telecare_session::utils::{pause, print_session};

const DOCTORS: [&str; 3] = [
    "Dr. Sarah Johnson - Cardiology",
    "Dr. Michael Chen - Dermatology",
    "Dr. Emily Davis - Pediatrics",
];

#[tokio::main]
async fn main() {
    env_logger::init();

    let mut portal = Portal::new();
    print_session(&portal.session());

    println!("Trying to open the dashboard anonymously: {:?}", portal.show_section(Section::Dashboard));
    portal.login("jane.doe@example.com");
    println!("Now showing {:?}", portal.view().section());

    portal.book_with_doctor(&DOCTORS, "Michael Chen");
    let selected = portal.selected_doctor().map(|i| DOCTORS[i]).unwrap_or(DOCTORS[0]);
    if let Err(err) = portal.book(selected, "2024-01-01", "10:00", Some("Skin rash")) {
        log::error!("Unable to book: {}", err);
    }
    if let Err(err) = portal.book(DOCTORS[2], "2024-01-02", "15:30", None) {
        log::error!("Unable to book: {}", err);
    }
    print_session(&portal.session());
    pause();

    println!("Joining the first call (it lasts a few seconds in this demo)...");
    *config::CALL_DURATION.lock().unwrap() = Duration::from_secs(3);
    let pending = match portal.join_call(0) {
        Ok(pending) => pending,
        Err(err) => {
            log::error!("Unable to join the call: {}", err);
            return;
        }
    };
    match pending.wait().await {
        CallOutcome::Completed => println!("Call finished."),
        other => println!("Call did not complete anything: {}", other),
    }
    print_session(&portal.session());

    portal.logout();
    print_session(&portal.session());
}
