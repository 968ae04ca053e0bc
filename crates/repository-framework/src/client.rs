//! # Repository Client
//!
//! The handle callers use to talk to a [`RepositoryActor`](crate::RepositoryActor).

use crate::error::DomainError;
use crate::message::{RepositoryRequest, Response};
use crate::repository::RepositoryHandle;
use crate::search::{SearchParams, SearchResult};
use crate::searchable::SearchableEntity;
use tokio::sync::{mpsc, oneshot};

/// A type-safe client for a repository actor.
///
/// Holds only the channel sender, so cloning is cheap and clones can be
/// shared across tasks. Every method resolves to the actor's answer, or to
/// [`DomainError::RepositoryClosed`] / [`DomainError::RepositoryDropped`]
/// when the actor is gone.
pub struct RepositoryClient<E: SearchableEntity> {
    sender: mpsc::Sender<RepositoryRequest<E>>,
}

impl<E: SearchableEntity> Clone for RepositoryClient<E> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

impl<E: SearchableEntity> RepositoryClient<E> {
    pub fn new(sender: mpsc::Sender<RepositoryRequest<E>>) -> Self {
        Self { sender }
    }

    pub async fn insert(&self, entity: E) -> Result<(), DomainError> {
        self.request(|respond_to| RepositoryRequest::Insert { entity, respond_to })
            .await
    }

    /// Inserts `entity` unless a stored entity matches `conflict`.
    ///
    /// The check and the insert run as one step inside the actor, so two
    /// concurrent calls can never both pass the check.
    pub async fn insert_unless<F>(
        &self,
        entity: E,
        conflict: F,
        on_conflict: DomainError,
    ) -> Result<(), DomainError>
    where
        F: Fn(&E) -> bool + Send + 'static,
    {
        let conflict = Box::new(conflict);
        self.request(|respond_to| RepositoryRequest::InsertUnless {
            entity,
            conflict,
            on_conflict,
            respond_to,
        })
        .await
    }

    pub async fn find_by_id(&self, id: &str) -> Result<E, DomainError> {
        let id = id.to_string();
        self.request(|respond_to| RepositoryRequest::FindById { id, respond_to })
            .await
    }

    pub async fn find_all(&self) -> Result<Vec<E>, DomainError> {
        self.request(|respond_to| RepositoryRequest::FindAll { respond_to })
            .await
    }

    /// First entity (in insertion order) matching `predicate`.
    pub async fn find_first<F>(&self, predicate: F) -> Result<Option<E>, DomainError>
    where
        F: Fn(&E) -> bool + Send + 'static,
    {
        let predicate = Box::new(predicate);
        self.request(|respond_to| RepositoryRequest::FindFirst {
            predicate,
            respond_to,
        })
        .await
    }

    pub async fn update(&self, entity: E) -> Result<(), DomainError> {
        self.request(|respond_to| RepositoryRequest::Update { entity, respond_to })
            .await
    }

    pub async fn delete(&self, id: &str) -> Result<(), DomainError> {
        let id = id.to_string();
        self.request(|respond_to| RepositoryRequest::Delete { id, respond_to })
            .await
    }

    pub async fn search(&self, params: SearchParams) -> Result<SearchResult<E>, DomainError> {
        self.request(|respond_to| RepositoryRequest::Search { params, respond_to })
            .await
    }

    async fn request<T, F>(&self, build: F) -> Result<T, DomainError>
    where
        F: FnOnce(Response<T>) -> RepositoryRequest<E>,
    {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .await
            .map_err(|_| DomainError::RepositoryClosed)?;
        response.await.map_err(|_| DomainError::RepositoryDropped)?
    }
}

impl<E: SearchableEntity> RepositoryHandle<E> for RepositoryClient<E> {
    fn inner(&self) -> &RepositoryClient<E> {
        self
    }
}
