//! # Repository Framework
//!
//! Building blocks for domain entities that live in an in-memory,
//! searchable repository: an identity-carrying [`Entity`], CRUD through the
//! [`Repository`] contract, and a uniform *filter → sort → paginate* search
//! driven by [`SearchParams`] and answered with a [`SearchResult`].
//!
//! ## Architecture Overview
//!
//! 1. **Entity Layer** ([`Entity`], [`SearchableEntity`]) - your payload, its
//!    validation rules, which fields are sortable and how the free-text
//!    filter matches.
//! 2. **Runtime Layer** ([`RepositoryActor`]) - owns the collection and
//!    applies requests one at a time.
//! 3. **Interface Layer** ([`RepositoryClient`], [`Repository`],
//!    [`SearchableRepository`]) - what use cases call.
//!
//! The collection itself is the plain [`InMemoryRepository`], usable on its
//! own in synchronous code and tests.
//!
//! ## Search Semantics
//!
//! - Filtering is entity-defined and runs first; `total` counts the
//!   filtered items before pagination.
//! - Sorting only applies to fields the entity declares sortable; an unknown
//!   field leaves the filtered order untouched. The sort is stable.
//! - Pagination slices `[(page - 1) * per_page, page * per_page)`; pages past
//!   the end are empty, not an error.
//! - Raw pagination input is normalized by [`SearchParams`]: invalid values
//!   fall back to page 1 and 15 items per page.
//!
//! ## Example
//!
//! ```rust
//! use async_trait::async_trait;
//! use repository_framework::{
//!     RepositoryActor, ResourceEntity, SearchParams, SearchProps, SearchableEntity, SortKey,
//!     SortableFields,
//! };
//! use serde::Serialize;
//! use serde_json::{json, Value};
//!
//! #[derive(Debug, Clone, Serialize)]
//! struct Fruit { id: String, name: String }
//!
//! impl ResourceEntity for Fruit {
//!     fn id(&self) -> &str { &self.id }
//!     fn to_json(&self) -> Value { json!({ "id": self.id, "name": self.name }) }
//! }
//!
//! #[async_trait]
//! impl SearchableEntity for Fruit {
//!     fn sortable_fields() -> SortableFields<Self> {
//!         SortableFields::new().field("name", |f: &Fruit| SortKey::text(&f.name))
//!     }
//!
//!     async fn apply_filter(items: Vec<Self>, filter: Option<&str>) -> Vec<Self> {
//!         match filter {
//!             Some(f) => items.into_iter().filter(|i| i.name.contains(f)).collect(),
//!             None => items,
//!         }
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let (actor, client) = RepositoryActor::<Fruit>::new(10);
//!     tokio::spawn(actor.run());
//!
//!     for name in ["zebra", "apple", "banana", "cherry"] {
//!         let fruit = Fruit { id: name.into(), name: name.into() };
//!         client.insert(fruit).await.unwrap();
//!     }
//!
//!     let params = SearchParams::new(SearchProps::new().sort("name").sort_dir("asc").per_page(2));
//!     let result = client.search(params).await.unwrap();
//!     let names: Vec<_> = result.items().iter().map(|f| f.name.as_str()).collect();
//!     assert_eq!(names, ["apple", "banana"]);
//!     assert_eq!(result.total(), 4);
//!     assert_eq!(result.last_page(), 2);
//! }
//! ```
//!
//! ## Testing
//!
//! [`mock::MockRepository`] answers client requests from scripted
//! expectations, for testing use cases without a real collection.

pub mod actor;
pub mod client;
pub mod entity;
pub mod error;
pub mod in_memory;
pub mod message;
pub mod mock;
pub mod repository;
pub mod search;
pub mod searchable;
pub mod tracing;
pub mod validator;

// Re-export core types for convenience
pub use actor::RepositoryActor;
pub use client::RepositoryClient;
pub use entity::{Entity, ResourceEntity};
pub use error::DomainError;
pub use in_memory::InMemoryRepository;
pub use message::{Predicate, RepositoryRequest, Response};
pub use repository::{Repository, RepositoryHandle, SearchableRepository};
pub use search::{
    SearchParams, SearchProps, SearchResult, SearchResultProps, SortDirection, DEFAULT_PAGE,
    DEFAULT_PER_PAGE,
};
pub use searchable::{
    apply_paginate, run_search, sort_by_field, SearchableEntity, SortKey, SortableFields,
};
pub use self::validator::{ensure_valid, ClassValidatorFields, FieldsErrors, ValidatorFields};
