//! Login credential lookup.
//!
//! Credentials live in a small fixed table and passwords are compared as
//! plain text. This is a gate for the interactive front end, not a security
//! boundary.

use std::collections::HashMap;

use serde::Serialize;

/// A user allowed to log in.
#[derive(Debug, Clone, Serialize)]
pub struct User {
    username: String,
    #[serde(skip)]
    password: String,
    profile_image: String,
}

impl User {
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        profile_image: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            profile_image: profile_image.into(),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn profile_image(&self) -> &str {
        &self.profile_image
    }

    pub fn set_profile_image(&mut self, reference: impl Into<String>) {
        self.profile_image = reference.into();
    }

    fn password_matches(&self, password: &str) -> bool {
        self.password == password
    }
}

/// The table of known users, keyed by username.
#[derive(Debug, Clone)]
pub struct CredentialTable {
    users: HashMap<String, User>,
}

impl CredentialTable {
    /// An empty table.
    pub fn empty() -> Self {
        Self {
            users: HashMap::new(),
        }
    }

    /// Add or replace a user.
    pub fn with_user(mut self, user: User) -> Self {
        self.users.insert(user.username.clone(), user);
        self
    }

    /// Look up a user by name and password.
    ///
    /// Returns `None` when the username is unknown or the password differs.
    pub fn authenticate(&self, username: &str, password: &str) -> Option<&User> {
        self.users
            .get(username)
            .filter(|user| user.password_matches(password))
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

impl Default for CredentialTable {
    /// The built-in table: `admin` / `admin123`.
    fn default() -> Self {
        Self::empty().with_user(User::new("admin", "admin123", "images/admin.png"))
    }
}
