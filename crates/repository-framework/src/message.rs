//! # Repository Messages
//!
//! The requests a [`RepositoryClient`](crate::RepositoryClient) sends to a
//! [`RepositoryActor`](crate::RepositoryActor).

use crate::error::DomainError;
use crate::search::{SearchParams, SearchResult};
use crate::searchable::SearchableEntity;
use std::fmt;
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by the actor.
pub type Response<T> = oneshot::Sender<Result<T, DomainError>>;

/// Predicate shipped to the actor for domain lookups (e.g. by email).
pub type Predicate<E> = Box<dyn Fn(&E) -> bool + Send>;

/// Internal message type sent to the actor to request operations.
///
/// The variants map onto the repository contract (insert, find by id, find
/// all, update, delete) plus `Search` for the filter → sort → paginate
/// pipeline, `FindFirst` for predicate lookups used by concrete
/// repositories and `InsertUnless` for uniqueness checks that must not race
/// with other inserts.
pub enum RepositoryRequest<E: SearchableEntity> {
    Insert {
        entity: E,
        respond_to: Response<()>,
    },
    /// Inserts `entity` unless a stored entity matches `conflict`, in which
    /// case `on_conflict` is returned and nothing is stored.
    InsertUnless {
        entity: E,
        conflict: Predicate<E>,
        on_conflict: DomainError,
        respond_to: Response<()>,
    },
    FindById {
        id: String,
        respond_to: Response<E>,
    },
    FindAll {
        respond_to: Response<Vec<E>>,
    },
    FindFirst {
        predicate: Predicate<E>,
        respond_to: Response<Option<E>>,
    },
    Update {
        entity: E,
        respond_to: Response<()>,
    },
    Delete {
        id: String,
        respond_to: Response<()>,
    },
    Search {
        params: SearchParams,
        respond_to: Response<SearchResult<E>>,
    },
}

impl<E: SearchableEntity> fmt::Debug for RepositoryRequest<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Insert { entity, .. } => {
                f.debug_struct("Insert").field("id", &entity.id()).finish()
            }
            Self::InsertUnless { entity, .. } => f
                .debug_struct("InsertUnless")
                .field("id", &entity.id())
                .finish(),
            Self::FindById { id, .. } => f.debug_struct("FindById").field("id", id).finish(),
            Self::FindAll { .. } => f.write_str("FindAll"),
            Self::FindFirst { .. } => f.write_str("FindFirst"),
            Self::Update { entity, .. } => {
                f.debug_struct("Update").field("id", &entity.id()).finish()
            }
            Self::Delete { id, .. } => f.debug_struct("Delete").field("id", id).finish(),
            Self::Search { params, .. } => {
                f.debug_struct("Search").field("params", params).finish()
            }
        }
    }
}
