use log::{info, warn};
use rocket::request::{FromRequest, Outcome, Request};
use rocket::http::Status;

use crate::site::Site;
use crate::store::{CookieStore, KeyValueStore, PASSWORD_KEY, SESSION_KEY};

/// Shared secret used when none is stored locally.
/// This gate keeps casual visitors out of the editor, nothing more.
pub const FALLBACK_PASSWORD: &str = "sweetc79";

const AUTHENTICATED: &str = "true";

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateError {
    #[error("Please enter a password.")]
    Empty,
    #[error("Incorrect password. Please try again.")]
    Wrong,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateOutcome {
    Authenticated,
    Rejected(GateError),
}

/// Password check in front of the settings editor.
pub struct AccessGate<'a> {
    local: &'a dyn KeyValueStore,
    session: &'a dyn KeyValueStore,
}

impl<'a> AccessGate<'a> {
    pub fn new(local: &'a dyn KeyValueStore, session: &'a dyn KeyValueStore) -> Self {
        AccessGate { local, session }
    }

    /// The stored secret, or the fallback when none (or an empty one) is stored.
    fn secret(&self) -> String {
        self.local
            .get(PASSWORD_KEY)
            .filter(|p| !p.is_empty())
            .unwrap_or_else(|| FALLBACK_PASSWORD.to_string())
    }

    pub fn is_open(&self) -> bool {
        self.session.get(SESSION_KEY).as_deref() == Some(AUTHENTICATED)
    }

    /// No attempt counting and no lockout.
    pub fn attempt(&self, password: &str) -> GateOutcome {
        let entered = password.trim();
        if entered.is_empty() {
            return GateOutcome::Rejected(GateError::Empty);
        }

        if entered != self.secret() {
            warn!("Settings login rejected");
            return GateOutcome::Rejected(GateError::Wrong);
        }

        if let Err(e) = self.session.set(SESSION_KEY, AUTHENTICATED) {
            warn!("Could not record settings session: {}", e);
        }
        info!("Settings login accepted");
        GateOutcome::Authenticated
    }

    pub fn close(&self) -> Result<(), String> {
        self.session.remove(SESSION_KEY)
    }

    /// Store a new shared secret. Blank values are refused.
    pub fn change_secret(&self, new_password: &str) -> Result<(), String> {
        let new_password = new_password.trim();
        if new_password.is_empty() {
            return Err("Password cannot be empty".to_string());
        }
        self.local.set(PASSWORD_KEY, new_password)?;
        info!("Settings password changed");
        Ok(())
    }
}

/// Guard for editor routes: forwards unless the session flag is set.
pub struct SettingsUser;

#[rocket::async_trait]
impl<'r> FromRequest<'r> for SettingsUser {
    type Error = ();

    async fn from_request(request: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        let Some(site) = request.rocket().state::<Site>() else {
            return Outcome::Forward(Status::InternalServerError);
        };
        let session = CookieStore::session(request.cookies());
        if AccessGate::new(site.local.as_ref(), &session).is_open() {
            Outcome::Success(SettingsUser)
        } else {
            Outcome::Forward(Status::Unauthorized)
        }
    }
}
