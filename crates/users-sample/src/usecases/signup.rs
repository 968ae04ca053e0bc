//! # Signup
//!
//! Registers a new user: checks the input, makes sure the email is free,
//! builds a validated [`UserEntity`] and stores it. The store step re-checks
//! the email inside the repository actor, so of two concurrent signups for
//! one email only one is stored.

use crate::clients::UserClient;
use crate::error::UserError;
use crate::model::{UserEntity, UserProps};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

#[derive(Debug, Clone, Deserialize)]
pub struct SignupInput {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// The registered user, without the password.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupOutput {
    pub id: String,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl From<&UserEntity> for SignupOutput {
    fn from(user: &UserEntity) -> Self {
        Self {
            id: user.id().to_string(),
            name: user.name().to_string(),
            email: user.email().to_string(),
            created_at: user.created_at(),
        }
    }
}

#[derive(Clone)]
pub struct SignupUseCase {
    users: UserClient,
}

impl SignupUseCase {
    pub fn new(users: UserClient) -> Self {
        Self { users }
    }

    #[instrument(name = "signup", skip_all, fields(email = %input.email))]
    pub async fn execute(&self, input: SignupInput) -> Result<SignupOutput, UserError> {
        debug!("Signup called");
        let SignupInput {
            name,
            email,
            password,
        } = input;
        if name.is_empty() || email.is_empty() || password.is_empty() {
            return Err(UserError::BadRequest("Input data not provided".to_string()));
        }

        self.users.email_exists(&email).await?;

        let user = UserEntity::new(UserProps::new(name, email, password), None)?;
        self.users.insert_with_unique_email(user.clone()).await?;

        info!(id = %user.id(), "User signed up");
        Ok(SignupOutput::from(&user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use repository_framework::mock::MockRepository;
    use repository_framework::DomainError;

    fn input(name: &str, email: &str, password: &str) -> SignupInput {
        SignupInput {
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn test_signup_inserts_user() {
        let mock = MockRepository::<UserEntity>::new();
        mock.expect_find_first().return_ok(None);
        mock.expect_insert_unless().return_ok(());
        let usecase = SignupUseCase::new(UserClient::new(mock.client()));

        let output = usecase
            .execute(input("Ada", "ada@example.com", "secret"))
            .await
            .unwrap();

        assert_eq!(output.name, "Ada");
        assert_eq!(output.email, "ada@example.com");
        assert_eq!(output.id.len(), 36);
        mock.verify();
    }

    #[tokio::test]
    async fn test_signup_rejects_missing_input() {
        let mock = MockRepository::<UserEntity>::new();
        let usecase = SignupUseCase::new(UserClient::new(mock.client()));

        for bad in [
            input("", "ada@example.com", "secret"),
            input("Ada", "", "secret"),
            input("Ada", "ada@example.com", ""),
        ] {
            let err = usecase.execute(bad).await.unwrap_err();
            assert_eq!(err, UserError::BadRequest("Input data not provided".to_string()));
        }
        mock.verify();
    }

    #[tokio::test]
    async fn test_signup_conflict_on_taken_email() {
        let mock = MockRepository::<UserEntity>::new();
        let existing = UserEntity::new(
            UserProps::new("Ada", "ada@example.com", "secret"),
            None,
        )
        .unwrap();
        mock.expect_find_first().return_ok(Some(existing));
        let usecase = SignupUseCase::new(UserClient::new(mock.client()));

        let err = usecase
            .execute(input("Other", "ada@example.com", "secret"))
            .await
            .unwrap_err();

        assert!(matches!(err, UserError::Domain(DomainError::Conflict(_))));
        mock.verify();
    }

    #[tokio::test]
    async fn test_signup_conflict_when_email_taken_after_check() {
        let mock = MockRepository::<UserEntity>::new();
        mock.expect_find_first().return_ok(None);
        mock.expect_insert_unless()
            .return_err(DomainError::Conflict("Email address already used".to_string()));
        let usecase = SignupUseCase::new(UserClient::new(mock.client()));

        let err = usecase
            .execute(input("Other", "ada@example.com", "secret"))
            .await
            .unwrap_err();

        assert_eq!(
            err,
            UserError::Domain(DomainError::Conflict("Email address already used".to_string()))
        );
        mock.verify();
    }

    #[tokio::test]
    async fn test_signup_invalid_email_is_not_stored() {
        let mock = MockRepository::<UserEntity>::new();
        mock.expect_find_first().return_ok(None);
        let usecase = SignupUseCase::new(UserClient::new(mock.client()));

        let err = usecase
            .execute(input("Ada", "not-an-email", "secret"))
            .await
            .unwrap_err();

        match err {
            UserError::Domain(DomainError::EntityValidation(fields)) => {
                assert!(fields.contains_key("email"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        mock.verify();
    }

    #[test]
    fn test_output_serializes_camel_case_without_password() {
        let user = UserEntity::new(UserProps::new("Ada", "ada@example.com", "secret"), None)
            .unwrap();

        let json = serde_json::to_value(SignupOutput::from(&user)).unwrap();

        assert!(json.get("createdAt").is_some());
        assert!(json.get("password").is_none());
    }
}
