//! # User Client
//!
//! The user repository. It wraps a `RepositoryClient<UserEntity>`, gets CRUD
//! and search through [`RepositoryHandle`], and adds the email lookups the
//! use cases need.

use crate::model::UserEntity;
use repository_framework::{DomainError, RepositoryClient, RepositoryHandle};
use tracing::{debug, instrument};

const EMAIL_TAKEN: &str = "Email address already used";

/// Client for the user repository actor.
#[derive(Clone)]
pub struct UserClient {
    inner: RepositoryClient<UserEntity>,
}

impl UserClient {
    pub fn new(inner: RepositoryClient<UserEntity>) -> Self {
        Self { inner }
    }
}

impl RepositoryHandle<UserEntity> for UserClient {
    fn inner(&self) -> &RepositoryClient<UserEntity> {
        &self.inner
    }
}

impl UserClient {
    /// The user registered with exactly `email`.
    #[instrument(skip(self))]
    pub async fn find_by_email(&self, email: &str) -> Result<UserEntity, DomainError> {
        if email.is_empty() {
            return Err(DomainError::NotFound("Invalid email provided".to_string()));
        }
        debug!("Sending request");
        let wanted = email.to_string();
        self.inner
            .find_first(move |user: &UserEntity| user.email() == wanted)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("User not found with email {email}")))
    }

    /// Fails with [`DomainError::Conflict`] when `email` is already taken.
    /// An empty email is never taken.
    #[instrument(skip(self))]
    pub async fn email_exists(&self, email: &str) -> Result<(), DomainError> {
        if email.is_empty() {
            return Ok(());
        }
        debug!("Sending request");
        let wanted = email.to_string();
        let taken = self
            .inner
            .find_first(move |user: &UserEntity| user.email() == wanted)
            .await?;
        match taken {
            Some(_) => Err(DomainError::Conflict(EMAIL_TAKEN.to_string())),
            None => Ok(()),
        }
    }

    /// Stores `user` unless its email is already taken.
    ///
    /// The email check and the insert are a single repository request, so
    /// concurrent registrations of one email store at most one user.
    #[instrument(skip_all, fields(id = %user.id(), email = %user.email()))]
    pub async fn insert_with_unique_email(&self, user: UserEntity) -> Result<(), DomainError> {
        debug!("Sending request");
        let wanted = user.email().to_string();
        self.inner
            .insert_unless(
                user,
                move |stored: &UserEntity| stored.email() == wanted,
                DomainError::Conflict(EMAIL_TAKEN.to_string()),
            )
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::user_data_builder;
    use repository_framework::mock::MockRepository;

    fn user(email: &str) -> UserEntity {
        UserEntity::new(user_data_builder().email(email).build(), None).unwrap()
    }

    #[tokio::test]
    async fn test_find_by_email_found() {
        let mock = MockRepository::<UserEntity>::new();
        let ada = user("ada@example.com");
        mock.expect_find_first().return_ok(Some(ada.clone()));
        let client = UserClient::new(mock.client());

        let found = client.find_by_email("ada@example.com").await.unwrap();

        assert_eq!(found, ada);
        mock.verify();
    }

    #[tokio::test]
    async fn test_find_by_email_missing() {
        let mock = MockRepository::<UserEntity>::new();
        mock.expect_find_first().return_ok(None);
        let client = UserClient::new(mock.client());

        let err = client.find_by_email("nobody@example.com").await.unwrap_err();

        assert_eq!(
            err,
            DomainError::NotFound("User not found with email nobody@example.com".to_string())
        );
        mock.verify();
    }

    #[tokio::test]
    async fn test_find_by_empty_email_skips_repository() {
        let mock = MockRepository::<UserEntity>::new();
        let client = UserClient::new(mock.client());

        let err = client.find_by_email("").await.unwrap_err();

        assert!(matches!(err, DomainError::NotFound(_)));
        mock.verify();
    }

    #[tokio::test]
    async fn test_email_exists_conflict() {
        let mock = MockRepository::<UserEntity>::new();
        mock.expect_find_first().return_ok(Some(user("ada@example.com")));
        let client = UserClient::new(mock.client());

        let err = client.email_exists("ada@example.com").await.unwrap_err();

        assert_eq!(err, DomainError::Conflict("Email address already used".to_string()));
        mock.verify();
    }

    #[tokio::test]
    async fn test_insert_with_unique_email_passes_conflict_through() {
        let mock = MockRepository::<UserEntity>::new();
        mock.expect_insert_unless().return_ok(());
        mock.expect_insert_unless()
            .return_err(DomainError::Conflict("Email address already used".to_string()));
        let client = UserClient::new(mock.client());

        client
            .insert_with_unique_email(user("ada@example.com"))
            .await
            .unwrap();
        let err = client
            .insert_with_unique_email(user("ada@example.com"))
            .await
            .unwrap_err();

        assert_eq!(err, DomainError::Conflict("Email address already used".to_string()));
        mock.verify();
    }

    #[tokio::test]
    async fn test_email_free() {
        let mock = MockRepository::<UserEntity>::new();
        mock.expect_find_first().return_ok(None);
        let client = UserClient::new(mock.client());

        assert!(client.email_exists("free@example.com").await.is_ok());
        assert!(client.email_exists("").await.is_ok());
        mock.verify();
    }
}
