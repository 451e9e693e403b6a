//! Simulated video calls
//!
//! There is no actual call: joining one merely schedules the completion of its appointment once the call duration has elapsed.
//! The scheduled task does not keep the session alive. It only holds a weak reference to it, and the [`SessionId`] it was scheduled against,
//! so that a logout (or a new login) in the meantime turns it into a no-op.

use std::fmt::{Display, Error, Formatter};
use std::sync::{Mutex, Weak};
use std::time::Duration;

use tokio::task::JoinHandle;

use crate::config;
use crate::session::{Session, SessionId, SharedSession};

/// What became of a scheduled completion
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CallOutcome {
    /// The appointment is now completed (or already was)
    Completed,
    /// The session has been dropped before the call ended
    SessionGone,
    /// The user logged out (or logged in again) before the call ended
    SessionChanged,
    /// There is no appointment at this index
    NoSuchAppointment,
    /// The completion has been cancelled before it fired
    Cancelled,
}

impl Display for CallOutcome {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        match self {
            CallOutcome::Completed => write!(f, "appointment completed"),
            CallOutcome::SessionGone => write!(f, "session no longer exists"),
            CallOutcome::SessionChanged => write!(f, "session has changed"),
            CallOutcome::NoSuchAppointment => write!(f, "no such appointment"),
            CallOutcome::Cancelled => write!(f, "cancelled"),
        }
    }
}


/// A completion that has been scheduled by [`join_call`]
#[derive(Debug)]
pub struct PendingCompletion {
    index: usize,
    session_id: SessionId,
    handle: JoinHandle<CallOutcome>,
}

impl PendingCompletion {
    /// The index of the appointment this call is about
    pub fn index(&self) -> usize { self.index }
    /// The session this completion was scheduled against
    pub fn session_id(&self) -> SessionId { self.session_id }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Prevent the completion from happening. This has no effect if it has fired already.
    pub fn cancel(&self) {
        log::debug!("Cancelling the completion of appointment #{}", self.index);
        self.handle.abort();
    }

    /// Wait until the completion has fired (or has been cancelled)
    pub async fn wait(self) -> CallOutcome {
        match self.handle.await {
            Ok(outcome) => outcome,
            Err(err) if err.is_cancelled() => CallOutcome::Cancelled,
            Err(err) => {
                log::error!("The completion of appointment #{} has panicked: {}", self.index, err);
                CallOutcome::SessionGone
            },
        }
    }
}


/// Join the video call of the appointment at `index`.
///
/// The appointment will be marked as completed after the configured [`CALL_DURATION`](crate::config::CALL_DURATION).
///
/// # Panics
/// Panics if called outside of a tokio runtime
pub fn join_call(session: &SharedSession, index: usize) -> PendingCompletion {
    join_call_for(session, index, config::call_duration())
}

/// Same as [`join_call`], with a custom call duration
///
/// # Panics
/// Panics if called outside of a tokio runtime
pub fn join_call_for(session: &SharedSession, index: usize, duration: Duration) -> PendingCompletion {
    let session_id = match session.lock() {
        Ok(s) => s.id(),
        Err(poisoned) => poisoned.into_inner().id(),
    };
    let weak = std::sync::Arc::downgrade(session);

    log::debug!("Joining the call of appointment #{}, it will end in {:?}", index, duration);
    let handle = tokio::spawn(async move {
        tokio::time::sleep(duration).await;
        let outcome = complete_if_current(&weak, session_id, index);
        log::debug!("Call of appointment #{} has ended: {}", index, outcome);
        outcome
    });

    PendingCompletion { index, session_id, handle }
}

/// Complete the appointment, provided the session still exists and is still the one `session_id` refers to
fn complete_if_current(session: &Weak<Mutex<Session>>, session_id: SessionId, index: usize) -> CallOutcome {
    let session = match session.upgrade() {
        None => return CallOutcome::SessionGone,
        Some(s) => s,
    };
    let mut session = match session.lock() {
        Ok(s) => s,
        Err(_) => {
            log::warn!("The session lock is poisoned, ignoring the completion of appointment #{}", index);
            return CallOutcome::SessionGone;
        }
    };

    if session.id() != session_id {
        return CallOutcome::SessionChanged;
    }
    match session.try_complete(index) {
        Ok(()) => CallOutcome::Completed,
        Err(_) => CallOutcome::NoSuchAppointment,
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn completes_only_current_sessions() {
        let shared = Session::new_shared();
        let weak = Arc::downgrade(&shared);
        let first_id = {
            let mut session = shared.lock().unwrap();
            session.register("Ann");
            session.book("Dr. Smith", "2024-01-01", "10:00", None).unwrap();
            session.id()
        };

        assert_eq!(complete_if_current(&weak, first_id, 3), CallOutcome::NoSuchAppointment);
        assert_eq!(complete_if_current(&weak, first_id, 0), CallOutcome::Completed);
        assert_eq!(complete_if_current(&weak, first_id, 0), CallOutcome::Completed);

        shared.lock().unwrap().logout();
        assert_eq!(complete_if_current(&weak, first_id, 0), CallOutcome::SessionChanged);

        drop(shared);
        assert_eq!(complete_if_current(&weak, first_id, 0), CallOutcome::SessionGone);
    }
}
