//! # Session Repository
//!
//! The login session: a single optional `currentUser` record plus the demo
//! credential check.
//!
//! There is no real authentication here and none is intended: the system is
//! single-tenant and local, and the role on the signed-in user only gates
//! which sections the UI shows. The credential table is fixed demo data.

use tracing::info;

use crate::error::{StoreError, StoreResult};
use crate::storage::{keys, JsonStore};
use quill_core::types::{User, UserRole};

/// Demo credentials: (username, password, role).
const DEMO_CREDENTIALS: &[(&str, &str, UserRole)] = &[
    ("admin", "admin123", UserRole::Admin),
    ("staff", "staff123", UserRole::Staff),
];

/// Repository for the signed-in user record.
#[derive(Debug, Clone)]
pub struct SessionRepository {
    kv: JsonStore,
}

impl SessionRepository {
    /// Creates a new SessionRepository.
    pub fn new(kv: JsonStore) -> Self {
        SessionRepository { kv }
    }

    /// Checks credentials and persists the signed-in user.
    ///
    /// Usernames match case-insensitively; passwords exactly.
    pub fn login(&self, username: &str, password: &str) -> StoreResult<User> {
        let username = username.trim();
        if username.is_empty() || password.is_empty() {
            return Err(StoreError::InvalidCredentials);
        }

        let matched = DEMO_CREDENTIALS
            .iter()
            .find(|(name, pass, _)| name.eq_ignore_ascii_case(username) && *pass == password);

        match matched {
            Some((name, _, role)) => {
                let user = User {
                    username: name.to_string(),
                    role: *role,
                };
                self.kv.save(keys::CURRENT_USER, &Some(user.clone()))?;
                info!(username = %user.username, role = ?user.role, "User signed in");
                Ok(user)
            }
            None => Err(StoreError::InvalidCredentials),
        }
    }

    /// The signed-in user, if any.
    pub fn current(&self) -> Option<User> {
        self.kv.load(keys::CURRENT_USER)
    }

    /// Clears the signed-in user.
    pub fn logout(&self) -> StoreResult<()> {
        self.kv.save(keys::CURRENT_USER, &Option::<User>::None)?;
        info!("User signed out");
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
