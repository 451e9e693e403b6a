//! Support for library configuration options

use std::sync::{Arc, Mutex};
use std::time::Duration;
use once_cell::sync::Lazy;

/// The display name of a session nobody is logged into.
/// Feel free to override it when initing this library.
pub static ANONYMOUS_NAME: Lazy<Arc<Mutex<String>>> = Lazy::new(|| Arc::new(Mutex::new("Guest".to_string())));

/// The display name given to users who register with a blank name.
/// Feel free to override it when initing this library.
pub static FALLBACK_NAME: Lazy<Arc<Mutex<String>>> = Lazy::new(|| Arc::new(Mutex::new("User".to_string())));

/// The text shown in place of an appointment reason that was left blank.
pub static DEFAULT_REASON: Lazy<Arc<Mutex<String>>> = Lazy::new(|| Arc::new(Mutex::new("General Consultation".to_string())));

/// How long a simulated video call lasts before its appointment is marked as completed.
pub static CALL_DURATION: Lazy<Arc<Mutex<Duration>>> = Lazy::new(|| Arc::new(Mutex::new(Duration::from_secs(10))));


/// Returns the current value of a string setting.
///
/// A poisoned lock still holds a usable value, so it is read anyway.
pub(crate) fn read_string(setting: &Lazy<Arc<Mutex<String>>>) -> String {
    match setting.lock() {
        Ok(value) => value.clone(),
        Err(poisoned) => poisoned.into_inner().clone(),
    }
}

pub(crate) fn call_duration() -> Duration {
    match CALL_DURATION.lock() {
        Ok(value) => *value,
        Err(poisoned) => *poisoned.into_inner(),
    }
}
