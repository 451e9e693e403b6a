//! Booked consultations

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};

/// The lifecycle of an appointment.
///
/// An appointment starts `Upcoming` and can only ever move to `Completed`, which is terminal.
/// The completion time is kept inside the variant, so that a completion date cannot exist on an upcoming appointment.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum AppointmentStatus {
    Upcoming,
    Completed(DateTime<Utc>),
}
impl AppointmentStatus {
    pub fn is_completed(&self) -> bool {
        match self {
            AppointmentStatus::Completed(_) => true,
            _ => false,
        }
    }
}


/// A random, unique identifier for an appointment
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AppointmentId {
    content: Uuid,
}
impl AppointmentId {
    pub fn random() -> Self {
        Self { content: Uuid::new_v4() }
    }
}
impl Display for AppointmentId {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
        write!(f, "{}", self.content.to_hyphenated())
    }
}


/// A booked consultation
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Appointment {
    id: AppointmentId,

    /// Doctor, date and time are free text: they are stored exactly as they were typed
    doctor: String,
    date: String,
    time: String,
    /// `None` when the patient left the field blank
    reason: Option<String>,

    status: AppointmentStatus,
    /// The time this appointment was booked
    booked_at: DateTime<Utc>,
}

impl Appointment {
    /// Create a brand new, upcoming appointment.
    ///
    /// A reason that is empty or only whitespace is treated as missing.
    pub fn new(doctor: String, date: String, time: String, reason: Option<String>) -> Self {
        let reason = reason.filter(|r| r.trim().is_empty() == false);
        Self {
            id: AppointmentId::random(),
            doctor,
            date,
            time,
            reason,
            status: AppointmentStatus::Upcoming,
            booked_at: Utc::now(),
        }
    }

    pub fn id(&self) -> &AppointmentId        { &self.id      }
    pub fn doctor(&self) -> &str              { &self.doctor  }
    pub fn date(&self) -> &str                { &self.date    }
    pub fn time(&self) -> &str                { &self.time    }
    pub fn reason(&self) -> Option<&str>      { self.reason.as_deref() }
    pub fn status(&self) -> &AppointmentStatus { &self.status  }
    pub fn booked_at(&self) -> &DateTime<Utc> { &self.booked_at }
    pub fn completed(&self) -> bool           { self.status.is_completed() }

    /// The reason, or the configured placeholder text when none was given
    pub fn reason_or_default(&self) -> String {
        match &self.reason {
            Some(reason) => reason.clone(),
            None => crate::config::read_string(&crate::config::DEFAULT_REASON),
        }
    }

    /// Mark this appointment as completed.
    ///
    /// Returns `false` (and keeps the original completion time) if it was completed already.
    pub fn mark_completed(&mut self) -> bool {
        match self.status {
            AppointmentStatus::Completed(_) => false,
            AppointmentStatus::Upcoming => {
                self.status = AppointmentStatus::Completed(Utc::now());
                true
            },
        }
    }
}
