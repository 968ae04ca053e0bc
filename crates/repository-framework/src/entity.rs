//! # Entities
//!
//! Every domain object stored by a repository carries a stable identifier and
//! exposes a uniform JSON projection. Two pieces live here:
//!
//! - [`Entity`]: the generic identity wrapper around a property bag `P`.
//! - [`ResourceEntity`]: the contract a type must satisfy to be stored in an
//!   [`InMemoryRepository`](crate::InMemoryRepository) or served by a
//!   [`RepositoryActor`](crate::RepositoryActor).
//!
//! Domain types usually embed an `Entity<Props>` and implement
//! [`ResourceEntity`] by delegating to it:
//!
//! ```rust
//! use repository_framework::Entity;
//! use serde::Serialize;
//!
//! #[derive(Debug, Clone, Serialize)]
//! struct NoteProps { title: String }
//!
//! let note = Entity::new(NoteProps { title: "hello".into() });
//! assert_eq!(note.to_json()["title"], "hello");
//! assert_eq!(note.to_json()["id"], note.id());
//! ```

use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt::Debug;
use tracing::warn;
use uuid::Uuid;

/// Trait that any type must implement to be kept in a repository.
///
/// The repository only ever needs two things from its items: the identifier,
/// compared as a string, and the JSON projection used by
/// [`SearchResult::to_json`](crate::SearchResult::to_json).
pub trait ResourceEntity: Clone + Debug + Serialize + Send + Sync + 'static {
    /// The opaque, immutable identifier.
    fn id(&self) -> &str;

    /// `{ id, ...props }` projection.
    fn to_json(&self) -> Value;
}

/// Identity wrapper for a property bag.
///
/// The identifier is assigned once at construction, either supplied by the
/// caller or generated as a UUID v4, and never changes afterwards.
#[derive(Debug, Clone, Serialize)]
pub struct Entity<P> {
    id: String,
    props: P,
}

impl<P> Entity<P> {
    /// Creates an entity with a freshly generated identifier.
    pub fn new(props: P) -> Self {
        Self::with_id(props, None)
    }

    /// Creates an entity, generating an identifier only when `id` is `None`.
    pub fn with_id(props: P, id: Option<String>) -> Self {
        Self {
            id: id.unwrap_or_else(|| Uuid::new_v4().to_string()),
            props,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn props(&self) -> &P {
        &self.props
    }

    /// Mutable access for domain update operations.
    ///
    /// Domain types that embed an `Entity` keep it private and expose their
    /// own validated update methods on top of this.
    pub fn props_mut(&mut self) -> &mut P {
        &mut self.props
    }

    pub fn into_props(self) -> P {
        self.props
    }
}

impl<P: Serialize + Debug> Entity<P> {
    /// Returns `{ id, ...props }`.
    ///
    /// Props that serialize to an object are flattened next to `id`. Any
    /// other shape is kept under a `props` key. Props JSON cannot represent
    /// (e.g. maps with non-string keys) are kept there as their `Debug` text.
    pub fn to_json(&self) -> Value {
        let mut fields = Map::new();
        fields.insert("id".to_string(), Value::String(self.id.clone()));
        match serde_json::to_value(&self.props) {
            Ok(Value::Object(props)) => fields.extend(props),
            Ok(Value::Null) => {}
            Ok(other) => {
                fields.insert("props".to_string(), other);
            }
            Err(e) => {
                warn!(id = %self.id, error = %e, "Props failed to serialize");
                fields.insert("props".to_string(), Value::String(format!("{:?}", self.props)));
            }
        }
        Value::Object(fields)
    }
}

/// Identity equality: two entities are the same iff their ids match.
impl<P> PartialEq for Entity<P> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<P> Eq for Entity<P> {}

impl<P> ResourceEntity for Entity<P>
where
    P: Clone + Debug + Serialize + Send + Sync + 'static,
{
    fn id(&self) -> &str {
        &self.id
    }

    fn to_json(&self) -> Value {
        Entity::to_json(self)
    }
}
