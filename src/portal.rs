//! This module ties the session and the view state together, the way the portal pages use them
//!
//! Every user action is applied to the session first, then the view follows it:
//! logging in closes the dialogs and opens the dashboard, booking closes the booking dialog and shows the appointments, etc.

use std::sync::MutexGuard;

use serde::Serialize;

use crate::appointment::Appointment;
use crate::call::{self, PendingCompletion};
use crate::error::SessionError;
use crate::session::{Session, SharedSession, Summary};
use crate::view::{self, Modals, Navigation, Section, ViewState};

/// The button shown next to an appointment
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum CardAction {
    /// The call of the appointment at this index can be joined
    JoinCall(usize),
    /// The appointment is over
    Completed,
}

/// Plain data needed to display one appointment
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AppointmentCard {
    pub doctor: String,
    /// The reason, or a placeholder if none was given
    pub reason: String,
    pub date: String,
    pub time: String,
    pub action: CardAction,
}

impl AppointmentCard {
    fn new(index: usize, appointment: &Appointment) -> Self {
        let action = match appointment.completed() {
            true => CardAction::Completed,
            false => CardAction::JoinCall(index),
        };
        Self {
            doctor: appointment.doctor().to_string(),
            reason: appointment.reason_or_default(),
            date: appointment.date().to_string(),
            time: appointment.time().to_string(),
            action,
        }
    }
}


/// The state of the whole portal: a session, and what is currently displayed
pub struct Portal {
    session: SharedSession,
    view: ViewState,
    /// Index of the doctor preselected in the booking form
    selected_doctor: Option<usize>,
}

impl Default for Portal {
    fn default() -> Self {
        Self::new()
    }
}

impl Portal {
    /// Create a portal with an anonymous session, showing the home page
    pub fn new() -> Self {
        Self {
            session: Session::new_shared(),
            view: ViewState::new(),
            selected_doctor: None,
        }
    }

    /// The shared session handle, e.g. to schedule tasks on it
    pub fn shared_session(&self) -> &SharedSession { &self.session }
    pub fn view(&self) -> &ViewState               { &self.view }
    pub fn view_mut(&mut self) -> &mut ViewState   { &mut self.view }
    pub fn selected_doctor(&self) -> Option<usize> { self.selected_doctor }

    /// Lock the session. A poisoned lock is recovered, since session updates cannot leave it half-modified
    pub fn session(&self) -> MutexGuard<'_, Session> {
        match self.session.lock() {
            Ok(guard) => guard,
            Err(poisoned) => {
                log::warn!("Recovering a poisoned session lock");
                poisoned.into_inner()
            },
        }
    }

    fn is_authenticated(&self) -> bool {
        self.session().is_authenticated()
    }

    pub fn login(&mut self, identifier: &str) {
        self.session().login(identifier);
        self.after_login();
    }

    pub fn register(&mut self, name: &str) {
        self.session().register(name);
        self.after_login();
    }

    fn after_login(&mut self) {
        self.view.close_all_modals();
        self.selected_doctor = None;
        self.view.show_section(Section::Dashboard, true);
    }

    pub fn logout(&mut self) {
        self.session().logout();
        self.selected_doctor = None;
        self.view.close_user_dropdown();
        self.view.show_section(Section::Home, false);
    }

    pub fn show_section(&mut self, section: Section) -> Navigation {
        let authenticated = self.is_authenticated();
        self.view.show_section(section, authenticated)
    }

    pub fn open_modal(&mut self, modal: Modals) -> Navigation {
        let authenticated = self.is_authenticated();
        self.view.open_modal(modal, authenticated)
    }

    /// Submit the booking form.
    ///
    /// Anonymous users get a [`SessionError::NotAuthenticated`], and the login dialog is opened for them.
    pub fn book(&mut self, doctor: &str, date: &str, time: &str, reason: Option<&str>) -> Result<Appointment, SessionError> {
        let booked = self.session().book(doctor, date, time, reason).map(|app| app.clone());
        match booked {
            Err(err) => {
                self.view.open_modal(Modals::LOGIN, false);
                Err(err)
            },
            Ok(appointment) => {
                self.view.close_modal(Modals::BOOKING);
                self.selected_doctor = None;
                self.view.show_section(Section::Appointments, true);
                Ok(appointment)
            },
        }
    }

    /// Open the booking form with the first doctor whose label contains `name` preselected
    pub fn book_with_doctor<S: AsRef<str>>(&mut self, doctor_options: &[S], name: &str) -> Navigation {
        if self.is_authenticated() == false {
            return self.view.open_modal(Modals::BOOKING, false);
        }
        if let Some(index) = view::select_doctor(doctor_options, name) {
            self.selected_doctor = Some(index);
        }
        self.view.open_modal(Modals::BOOKING, true)
    }

    /// Join the video call of the appointment at `index`. See [`call::join_call`]
    ///
    /// # Panics
    /// Panics if called outside of a tokio runtime
    pub fn join_call(&mut self, index: usize) -> Result<PendingCompletion, SessionError> {
        if self.open_modal(Modals::VIDEO_CALL) == Navigation::LoginRequired {
            return Err(SessionError::NotAuthenticated);
        }
        Ok(call::join_call(&self.session, index))
    }

    pub fn summary(&self) -> Summary {
        self.session().summary()
    }

    /// What should be displayed for each appointment, in booking order
    pub fn appointment_cards(&self) -> Vec<AppointmentCard> {
        self.session().appointments().iter()
            .enumerate()
            .map(|(index, app)| AppointmentCard::new(index, app))
            .collect()
    }
}
