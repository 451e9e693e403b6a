//! The session of the (single) user of the portal, and the appointments they booked

use std::fmt::{Display, Formatter};
use std::sync::{Arc, Mutex};

use serde::Serialize;
use uuid::Uuid;

use crate::appointment::Appointment;
use crate::config;
use crate::error::SessionError;

/// A session, shared with the tasks that may update it later (see [`crate::call`])
pub type SharedSession = Arc<Mutex<Session>>;

/// Identifies one authenticated (or anonymous) stretch of a session.
///
/// A new one is picked at every login, registration and logout, so that anything scheduled against an older stretch can tell it is stale.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct SessionId {
    content: Uuid,
}
impl SessionId {
    fn random() -> Self {
        Self { content: Uuid::new_v4() }
    }
}
impl Display for SessionId {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
        write!(f, "{}", self.content.to_hyphenated())
    }
}

/// The two states of a session
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum SessionState {
    Anonymous,
    Authenticated,
}


/// Read-side counts over the appointments of a session
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub total: usize,
    pub upcoming: usize,
    pub completed: usize,
    /// The doctor of the appointment that was booked last
    pub most_recent_doctor: Option<String>,
}

/// Formats the "recent activity" line of the dashboard
impl Display for Summary {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
        match &self.most_recent_doctor {
            Some(doctor) => write!(f, "Last activity: Booked appointment with {}.", doctor),
            None => write!(f, "No recent activity."),
        }
    }
}


/// The session of the portal user.
///
/// Appointments are owned by the session: they are discarded as soon as it logs out, or when a new login starts a fresh session.
#[derive(Debug, Serialize)]
pub struct Session {
    id: SessionId,
    authenticated: bool,
    display_name: String,
    /// In booking order. Nothing is ever removed from it, except by clearing it all
    appointments: Vec<Appointment>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// Create an anonymous session
    pub fn new() -> Self {
        Self {
            id: SessionId::random(),
            authenticated: false,
            display_name: config::read_string(&config::ANONYMOUS_NAME),
            appointments: Vec::new(),
        }
    }

    /// Create an anonymous session, ready to be shared with delayed tasks
    pub fn new_shared() -> SharedSession {
        Arc::new(Mutex::new(Self::new()))
    }

    pub fn id(&self) -> SessionId                { self.id }
    pub fn is_authenticated(&self) -> bool       { self.authenticated }
    pub fn display_name(&self) -> &str           { &self.display_name }
    pub fn appointments(&self) -> &[Appointment] { &self.appointments }
    pub fn appointment(&self, index: usize) -> Option<&Appointment> { self.appointments.get(index) }

    pub fn state(&self) -> SessionState {
        match self.authenticated {
            true => SessionState::Authenticated,
            false => SessionState::Anonymous,
        }
    }

    /// Log in with an e-mail address (or any identifier).
    ///
    /// Credentials are not checked, this always succeeds. The display name is the part before the `@`, with its first character in upper case.
    pub fn login(&mut self, identifier: &str) -> &Self {
        let name = display_name_from_identifier(identifier);
        self.start_authenticated(name);
        self
    }

    /// Register a new user. A blank name is replaced by the configured fallback name.
    pub fn register(&mut self, name: &str) -> &Self {
        let name = if name.trim().is_empty() {
            config::read_string(&config::FALLBACK_NAME)
        } else {
            name.to_string()
        };
        self.start_authenticated(name);
        self
    }

    /// Go back to an anonymous session, discarding every appointment
    pub fn logout(&mut self) -> &Self {
        log::info!("{} logged out, discarding {} appointment(s)", self.display_name, self.appointments.len());
        self.id = SessionId::random();
        self.authenticated = false;
        self.display_name = config::read_string(&config::ANONYMOUS_NAME);
        self.appointments.clear();
        self
    }

    fn start_authenticated(&mut self, display_name: String) {
        if self.authenticated {
            log::debug!("{} was already logged in, starting a fresh session", self.display_name);
        }
        self.id = SessionId::random();
        self.authenticated = true;
        self.display_name = display_name;
        self.appointments.clear();
        log::info!("Logged in as {:?} (session {})", self.display_name, self.id);
    }

    /// Book an appointment. It is appended to the list, with an `Upcoming` status.
    ///
    /// Nothing is validated, except that somebody must be logged in.
    pub fn book(&mut self, doctor: &str, date: &str, time: &str, reason: Option<&str>) -> Result<&Appointment, SessionError> {
        if self.authenticated == false {
            log::debug!("Refusing to book an appointment with {} for an anonymous session", doctor);
            return Err(SessionError::NotAuthenticated);
        }

        let appointment = Appointment::new(doctor.to_string(), date.to_string(), time.to_string(), reason.map(String::from));
        log::debug!("Booked appointment #{} with {} on {} at {}", self.appointments.len(), doctor, date, time);
        self.appointments.push(appointment);
        Ok(&self.appointments[self.appointments.len() - 1])
    }

    /// Mark the appointment at `index` as completed.
    ///
    /// Completing an already completed appointment changes nothing.
    /// An index that matches no appointment is silently ignored, see [`Self::try_complete`] to get an error instead.
    pub fn complete(&mut self, index: usize) {
        if let Err(err) = self.try_complete(index) {
            log::debug!("Ignoring completion: {}", err);
        }
    }

    /// Same as [`Self::complete`], but reports an out-of-range index
    pub fn try_complete(&mut self, index: usize) -> Result<(), SessionError> {
        let len = self.appointments.len();
        match self.appointments.get_mut(index) {
            None => Err(SessionError::IndexOutOfRange { index, len }),
            Some(appointment) => {
                if appointment.mark_completed() {
                    log::debug!("Appointment #{} with {} is now completed", index, appointment.doctor());
                }
                Ok(())
            },
        }
    }

    /// Counts the appointments of this session
    pub fn summary(&self) -> Summary {
        let completed = self.appointments.iter()
            .filter(|app| app.completed())
            .count();

        Summary {
            total: self.appointments.len(),
            upcoming: self.appointments.len() - completed,
            completed,
            most_recent_doctor: self.appointments.last().map(|app| app.doctor().to_string()),
        }
    }
}


/// `"jane.doe@example.com"` gives `"Jane.doe"`: only the very first character is capitalized
fn display_name_from_identifier(identifier: &str) -> String {
    let local_part = identifier.split('@').next().unwrap_or("");
    let mut chars = local_part.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().chain(chars).collect(),
    }
}
