// Copyright 2023 Remi Bernotavicius

use crate::database::models::UserId;
use crate::error::{Error, Result};

/// The user operations are performed on behalf of.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Session {
    pub user_id: UserId,
    pub username: String,
}

/// Holds the session between login and logout.
#[derive(Default, Debug)]
pub struct SessionState {
    current: Option<Session>,
}

impl SessionState {
    pub fn log_in(&mut self, session: Session) {
        log::info!("logged in as {}", session.username);
        self.current = Some(session);
    }

    pub fn log_out(&mut self) -> Option<Session> {
        self.current.take()
    }

    /// The current session, or [`Error::NotLoggedIn`] if there isn't one.
    pub fn require(&self) -> Result<&Session> {
        self.current.as_ref().ok_or(Error::NotLoggedIn)
    }
}

#[test]
fn require_after_logout() {
    let mut state = SessionState::default();
    assert!(matches!(state.require(), Err(Error::NotLoggedIn)));

    state.log_in(Session {
        user_id: UserId(3),
        username: "demo_user".into(),
    });
    assert_eq!(state.require().unwrap().user_id, UserId(3));

    assert_eq!(state.log_out().unwrap().username, "demo_user");
    assert!(state.log_out().is_none());
    assert!(matches!(state.require(), Err(Error::NotLoggedIn)));
}
