//! Errors reported by session operations

use thiserror::Error;

/// Failures of the session operations.
///
/// None of them is fatal: the session is left unchanged and stays usable.
#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum SessionError {
    /// Booking was attempted while nobody is logged in
    #[error("not authenticated: please log in or register to book an appointment")]
    NotAuthenticated,

    /// There is no appointment at this position
    #[error("no appointment at index {index} (the session has {len})")]
    IndexOutOfRange { index: usize, len: usize },
}
