//! Simulated video calls, with a paused tokio clock

use std::time::Duration;

use telecare_session::call::{self, CallOutcome};
use telecare_session::view::Modals;
use telecare_session::{Portal, Session, SessionError};

fn booked_portal() -> Portal {
    let mut portal = Portal::new();
    portal.login("jane.doe@example.com");
    portal.book("Dr. Smith", "2024-01-01", "10:00", None).unwrap();
    portal
}

#[tokio::test(start_paused = true)]
async fn call_completes_after_its_duration() {
    let _ = env_logger::builder().is_test(true).try_init();

    let mut portal = booked_portal();
    let pending = portal.join_call(0).unwrap();
    assert!(portal.view().is_open(Modals::VIDEO_CALL));
    assert_eq!(pending.index(), 0);
    assert_eq!(pending.session_id(), portal.session().id());

    tokio::time::sleep(Duration::from_secs(9)).await;
    assert_eq!(portal.summary().completed, 0);

    assert_eq!(pending.wait().await, CallOutcome::Completed);
    assert_eq!(portal.summary().completed, 1);
    assert_eq!(portal.summary().upcoming, 0);
}

#[tokio::test(start_paused = true)]
async fn anonymous_users_cannot_join() {
    let mut portal = Portal::new();
    assert_eq!(portal.join_call(0).unwrap_err(), SessionError::NotAuthenticated);
    assert!(portal.view().is_open(Modals::LOGIN));
    assert_eq!(portal.view().is_open(Modals::VIDEO_CALL), false);
}

#[tokio::test(start_paused = true)]
async fn logout_before_the_end_of_the_call() {
    let _ = env_logger::builder().is_test(true).try_init();

    let mut portal = booked_portal();
    let pending = portal.join_call(0).unwrap();
    portal.logout();

    assert_eq!(pending.wait().await, CallOutcome::SessionChanged);
    assert_eq!(portal.summary().total, 0);
}

#[tokio::test(start_paused = true)]
async fn a_new_session_is_not_completed_by_an_old_call() {
    let _ = env_logger::builder().is_test(true).try_init();

    let mut portal = booked_portal();
    let pending = portal.join_call(0).unwrap();
    portal.logout();
    portal.login("jane.doe@example.com");
    portal.book("Dr. Jones", "2024-01-05", "09:00", None).unwrap();

    assert_eq!(pending.wait().await, CallOutcome::SessionChanged);
    assert_eq!(portal.session().appointment(0).map(|app| app.completed()), Some(false));
}

#[tokio::test(start_paused = true)]
async fn cancelled_calls_complete_nothing() {
    let portal = booked_portal();
    let pending = call::join_call_for(portal.shared_session(), 0, Duration::from_secs(30));
    pending.cancel();

    assert_eq!(pending.wait().await, CallOutcome::Cancelled);
    tokio::time::sleep(Duration::from_secs(60)).await;
    assert_eq!(portal.summary().completed, 0);
}

#[tokio::test(start_paused = true)]
async fn dropped_sessions() {
    let shared = Session::new_shared();
    shared.lock().unwrap().register("Ann");
    shared.lock().unwrap().book("Dr. Smith", "2024-01-01", "10:00", None).unwrap();

    let pending = call::join_call_for(&shared, 0, Duration::from_secs(1));
    drop(shared);
    assert_eq!(pending.wait().await, CallOutcome::SessionGone);
}

#[tokio::test(start_paused = true)]
async fn calls_for_missing_appointments() {
    let mut portal = booked_portal();
    let pending = portal.join_call(3).unwrap();
    assert_eq!(pending.wait().await, CallOutcome::NoSuchAppointment);
    assert_eq!(portal.summary().completed, 0);
}
