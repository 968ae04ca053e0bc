//! # Repository Actor
//!
//! The `RepositoryActor` is the "server" half of a repository. It owns the
//! [`InMemoryRepository`] and processes incoming [`RepositoryRequest`]s one
//! at a time, so no two operations ever interleave on the collection.

use crate::client::RepositoryClient;
use crate::in_memory::InMemoryRepository;
use crate::message::RepositoryRequest;
use crate::searchable::SearchableEntity;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// The actor that owns one entity collection.
///
/// # Concurrency Model
/// Each actor runs in its own Tokio task and handles its messages
/// sequentially. The read-modify-write steps of `update`, `delete` and
/// `insert_unless` therefore never race, without a `Mutex` around the store.
///
/// # Usage Pattern
///
/// 1. **Create**: `RepositoryActor::new()` returns the actor and its client.
/// 2. **Run**: spawn `actor.run()` on the runtime.
/// 3. **Use**: clone and share the client; drop every clone to stop the actor.
///
/// ```rust
/// use async_trait::async_trait;
/// use repository_framework::{
///     RepositoryActor, ResourceEntity, SearchableEntity, SortableFields,
/// };
/// use serde::Serialize;
/// use serde_json::{json, Value};
///
/// #[derive(Debug, Clone, Serialize)]
/// struct Tag { id: String, label: String }
///
/// impl ResourceEntity for Tag {
///     fn id(&self) -> &str { &self.id }
///     fn to_json(&self) -> Value { json!({ "id": self.id, "label": self.label }) }
/// }
///
/// #[async_trait]
/// impl SearchableEntity for Tag {
///     fn sortable_fields() -> SortableFields<Self> { SortableFields::new() }
///     async fn apply_filter(items: Vec<Self>, _: Option<&str>) -> Vec<Self> { items }
/// }
///
/// #[tokio::main]
/// async fn main() {
///     let (actor, client) = RepositoryActor::<Tag>::new(10);
///     tokio::spawn(actor.run());
///
///     let tag = Tag { id: "t1".into(), label: "rust".into() };
///     client.insert(tag).await.unwrap();
///     assert_eq!(client.find_by_id("t1").await.unwrap().label, "rust");
/// }
/// ```
pub struct RepositoryActor<E: SearchableEntity> {
    receiver: mpsc::Receiver<RepositoryRequest<E>>,
    store: InMemoryRepository<E>,
}

impl<E: SearchableEntity> RepositoryActor<E> {
    /// Creates an actor with an empty store and its associated client.
    ///
    /// `buffer_size` is the capacity of the request channel; when it is full
    /// callers wait for room.
    pub fn new(buffer_size: usize) -> (Self, RepositoryClient<E>) {
        Self::with_store(buffer_size, InMemoryRepository::new())
    }

    /// Creates an actor around an existing store (e.g. pre-seeded fixtures).
    pub fn with_store(
        buffer_size: usize,
        store: InMemoryRepository<E>,
    ) -> (Self, RepositoryClient<E>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self { receiver, store };
        (actor, RepositoryClient::new(sender))
    }

    /// Runs the event loop until every client has been dropped.
    pub async fn run(mut self) {
        // Short type name (e.g. "UserEntity") for log fields.
        let entity_type = std::any::type_name::<E>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(entity_type, "Repository started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                RepositoryRequest::Insert { entity, respond_to } => {
                    let id = entity.id().to_string();
                    self.store.insert(entity);
                    info!(entity_type, %id, size = self.store.len(), "Inserted");
                    let _ = respond_to.send(Ok(()));
                }
                RepositoryRequest::InsertUnless {
                    entity,
                    conflict,
                    on_conflict,
                    respond_to,
                } => {
                    let id = entity.id().to_string();
                    let result = self
                        .store
                        .insert_unless(entity, |item| conflict(item), on_conflict);
                    match &result {
                        Ok(()) => info!(entity_type, %id, size = self.store.len(), "Inserted"),
                        Err(e) => warn!(entity_type, %id, error = %e, "Insert rejected"),
                    }
                    let _ = respond_to.send(result);
                }
                RepositoryRequest::FindById { id, respond_to } => {
                    let result = self.store.find_by_id(&id);
                    debug!(entity_type, %id, found = result.is_ok(), "FindById");
                    let _ = respond_to.send(result);
                }
                RepositoryRequest::FindAll { respond_to } => {
                    debug!(entity_type, size = self.store.len(), "FindAll");
                    let _ = respond_to.send(Ok(self.store.find_all()));
                }
                RepositoryRequest::FindFirst {
                    predicate,
                    respond_to,
                } => {
                    let item = self.store.find_first(|item| predicate(item));
                    debug!(entity_type, found = item.is_some(), "FindFirst");
                    let _ = respond_to.send(Ok(item));
                }
                RepositoryRequest::Update { entity, respond_to } => {
                    let id = entity.id().to_string();
                    let result = self.store.update(entity);
                    match &result {
                        Ok(()) => info!(entity_type, %id, "Updated"),
                        Err(e) => warn!(entity_type, %id, error = %e, "Update failed"),
                    }
                    let _ = respond_to.send(result);
                }
                RepositoryRequest::Delete { id, respond_to } => {
                    let result = self.store.delete(&id);
                    match &result {
                        Ok(()) => info!(entity_type, %id, size = self.store.len(), "Deleted"),
                        Err(e) => warn!(entity_type, %id, error = %e, "Delete failed"),
                    }
                    let _ = respond_to.send(result);
                }
                RepositoryRequest::Search { params, respond_to } => {
                    debug!(entity_type, ?params, "Search");
                    let result = self.store.search(&params).await;
                    debug!(
                        entity_type,
                        total = result.total(),
                        returned = result.items().len(),
                        "Search done"
                    );
                    let _ = respond_to.send(Ok(result));
                }
            }
        }

        info!(entity_type, size = self.store.len(), "Shutdown");
    }
}
