//! This crate holds the state behind a telemedicine demo portal.
//!
//! The core is a [`Session`], that tracks whether somebody is logged in, and the [`Appointment`]s they booked. \
//! Nothing is persisted and no credentials are checked: logging out discards everything.
//!
//! Joining a (simulated) video call schedules the completion of its appointment, see the [`call`] module. \
//! The [`view`] module tracks which page and dialogs are displayed, and a [`Portal`] drives both the session and the view,
//! so that a presentation layer only has to render the plain data it exposes.

mod error;
pub use error::SessionError;
pub mod appointment;
pub use appointment::Appointment;
pub use appointment::AppointmentStatus;
pub mod session;
pub use session::Session;
pub use session::Summary;

pub mod call;
pub mod view;
pub mod portal;
pub use portal::Portal;

pub mod config;
pub mod utils;
