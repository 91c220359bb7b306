//! Mock session gate.
//!
//! Any non-empty username/password pair is accepted. The profile and a login
//! flag are mirrored to persistence so the session survives restarts.

use tracing::{info, warn};

use crate::error::{Result, TicketError};
use crate::model::UserProfile;
use crate::persist::{KeyValueStore, Persistence, keys};

/// Holds the current user, if any.
#[derive(Debug, Clone, Default)]
pub struct SessionGate {
    current: Option<UserProfile>,
}

impl SessionGate {
    /// Rebuild the session from persisted state.
    ///
    /// The profile is only honoured when the login flag is `true`. Corrupt
    /// entries read as logged out.
    #[must_use]
    pub fn restore<S: KeyValueStore>(persistence: &Persistence<S>) -> Self {
        let logged_in = match persistence.load::<bool>(keys::LOGIN_FLAG) {
            Ok(flag) => flag.unwrap_or(false),
            Err(e) => {
                warn!(error = %e, "ignoring unreadable login flag");
                false
            }
        };
        if !logged_in {
            return Self::default();
        }

        let current = match persistence.load::<UserProfile>(keys::USER) {
            Ok(profile) => profile,
            Err(e) => {
                warn!(error = %e, "ignoring unreadable user profile");
                None
            }
        };
        Self { current }
    }

    /// Sign in with any non-empty credentials.
    ///
    /// # Errors
    ///
    /// Returns `InvalidCredentials` if either field is blank, or a storage
    /// error if the session cannot be persisted.
    pub fn login<S: KeyValueStore>(
        &mut self,
        persistence: &mut Persistence<S>,
        username: &str,
        password: &str,
    ) -> Result<UserProfile> {
        let username = username.trim();
        if username.is_empty() || password.trim().is_empty() {
            return Err(TicketError::InvalidCredentials);
        }

        let profile = UserProfile::for_username(username);
        persistence.save(keys::LOGIN_FLAG, &true)?;
        persistence.save(keys::USER, &profile)?;
        self.current = Some(profile.clone());

        info!(username, "logged in");
        Ok(profile)
    }

    /// Sign out, clearing the persisted flag and profile.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the entries cannot be removed.
    pub fn logout<S: KeyValueStore>(&mut self, persistence: &mut Persistence<S>) -> Result<()> {
        persistence.clear(&[keys::LOGIN_FLAG, keys::USER])?;
        if let Some(profile) = self.current.take() {
            info!(username = %profile.username, "logged out");
        }
        Ok(())
    }

    #[must_use]
    pub const fn current(&self) -> Option<&UserProfile> {
        self.current.as_ref()
    }

    /// The current user, or `NotLoggedIn`.
    ///
    /// # Errors
    ///
    /// Returns `NotLoggedIn` when no session is active.
    pub fn require(&self) -> Result<&UserProfile> {
        self.current.as_ref().ok_or(TicketError::NotLoggedIn)
    }

    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.current.is_some()
    }
}
