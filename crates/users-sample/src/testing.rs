//! Test data helpers.

use crate::model::UserProps;
use chrono::{DateTime, Utc};
use std::sync::atomic::{AtomicUsize, Ordering};

static SEQUENCE: AtomicUsize = AtomicUsize::new(1);

/// Starts a builder with valid defaults. Each call yields a different email.
pub fn user_data_builder() -> UserDataBuilder {
    let n = SEQUENCE.fetch_add(1, Ordering::Relaxed);
    UserDataBuilder {
        name: format!("User {n}"),
        email: format!("user{n}@example.com"),
        password: "TestPassword123".to_string(),
        created_at: Utc::now(),
    }
}

/// Valid [`UserProps`] with overridable fields.
#[derive(Debug, Clone)]
pub struct UserDataBuilder {
    name: String,
    email: String,
    password: String,
    created_at: DateTime<Utc>,
}

impl UserDataBuilder {
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = password.into();
        self
    }

    pub fn created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    pub fn build(self) -> UserProps {
        UserProps::new(self.name, self.email, self.password).with_created_at(self.created_at)
    }
}
