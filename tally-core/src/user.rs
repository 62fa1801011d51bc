//! Session user and the provider seam the core reads it through.

use crate::UserId;
use serde::{Deserialize, Serialize};
use std::sync::RwLock;

/// The account holder driving the current session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub user_id: UserId,
    pub display_name: String,
    pub is_premium: bool,
}

impl User {
    pub fn new(user_id: impl Into<UserId>, display_name: impl Into<String>, is_premium: bool) -> Self {
        Self {
            user_id: user_id.into(),
            display_name: display_name.into(),
            is_premium,
        }
    }
}

/// Read-only access to the session user.
///
/// The core only ever calls [`UserProvider::current_user`]; the process
/// that owns the session decides who that is.
pub trait UserProvider: Send + Sync {
    fn current_user(&self) -> User;
}

/// A provider that always yields the same user.
#[derive(Debug, Clone)]
pub struct FixedUser(pub User);

impl UserProvider for FixedUser {
    fn current_user(&self) -> User {
        self.0.clone()
    }
}

/// Provider whose user the hosting process may replace (sign-in, upgrade).
#[derive(Debug)]
pub struct SessionUser {
    user: RwLock<User>,
}

impl SessionUser {
    pub fn new(user: User) -> Self {
        Self {
            user: RwLock::new(user),
        }
    }

    /// Replace the session user. Returns the previous one.
    pub fn replace(&self, user: User) -> User {
        let mut guard = match self.user.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        std::mem::replace(&mut *guard, user)
    }
}

impl UserProvider for SessionUser {
    fn current_user(&self) -> User {
        match self.user.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}
