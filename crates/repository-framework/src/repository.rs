//! # Repository Contracts
//!
//! The interfaces callers (use cases, services, controllers) depend on.
//! They are async so that a real storage backend can be swapped in later;
//! the in-memory implementation completes without suspending on I/O.
//!
//! Concrete repositories usually wrap a [`RepositoryClient`] and only need to
//! implement [`RepositoryHandle`]; the CRUD and search methods are provided.

use crate::client::RepositoryClient;
use crate::entity::ResourceEntity;
use crate::error::DomainError;
use crate::search::{SearchParams, SearchResult};
use crate::searchable::SearchableEntity;
use async_trait::async_trait;

/// CRUD contract over one entity type.
#[async_trait]
pub trait Repository<E: ResourceEntity>: Send + Sync {
    async fn insert(&self, entity: E) -> Result<(), DomainError>;
    async fn find_by_id(&self, id: &str) -> Result<E, DomainError>;
    async fn find_all(&self) -> Result<Vec<E>, DomainError>;
    async fn update(&self, entity: E) -> Result<(), DomainError>;
    async fn delete(&self, id: &str) -> Result<(), DomainError>;
}

/// [`Repository`] plus the filter → sort → paginate search.
#[async_trait]
pub trait SearchableRepository<E: SearchableEntity>: Repository<E> {
    async fn search(&self, params: SearchParams) -> Result<SearchResult<E>, DomainError>;
}

/// Domain-specific repositories that delegate to a [`RepositoryClient`].
///
/// Implementing `inner` is enough to get [`Repository`] and
/// [`SearchableRepository`] for free.
///
/// ```rust,ignore
/// #[derive(Clone)]
/// struct NoteRepository { inner: RepositoryClient<Note> }
///
/// impl RepositoryHandle<Note> for NoteRepository {
///     fn inner(&self) -> &RepositoryClient<Note> { &self.inner }
/// }
///
/// // insert / find_by_id / search ... are now available on NoteRepository.
/// ```
pub trait RepositoryHandle<E: SearchableEntity>: Send + Sync {
    fn inner(&self) -> &RepositoryClient<E>;
}

#[async_trait]
impl<E, H> Repository<E> for H
where
    E: SearchableEntity,
    H: RepositoryHandle<E>,
{
    #[tracing::instrument(skip_all, fields(id = %entity.id()))]
    async fn insert(&self, entity: E) -> Result<(), DomainError> {
        tracing::debug!("Sending request");
        self.inner().insert(entity).await
    }

    #[tracing::instrument(skip(self))]
    async fn find_by_id(&self, id: &str) -> Result<E, DomainError> {
        tracing::debug!("Sending request");
        self.inner().find_by_id(id).await
    }

    async fn find_all(&self) -> Result<Vec<E>, DomainError> {
        self.inner().find_all().await
    }

    #[tracing::instrument(skip_all, fields(id = %entity.id()))]
    async fn update(&self, entity: E) -> Result<(), DomainError> {
        tracing::debug!("Sending request");
        self.inner().update(entity).await
    }

    #[tracing::instrument(skip(self))]
    async fn delete(&self, id: &str) -> Result<(), DomainError> {
        tracing::debug!("Sending request");
        self.inner().delete(id).await
    }
}

#[async_trait]
impl<E, H> SearchableRepository<E> for H
where
    E: SearchableEntity,
    H: RepositoryHandle<E>,
{
    #[tracing::instrument(skip(self))]
    async fn search(&self, params: SearchParams) -> Result<SearchResult<E>, DomainError> {
        tracing::debug!("Sending request");
        self.inner().search(params).await
    }
}
