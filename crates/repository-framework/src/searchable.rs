//! # Filter → Sort → Paginate
//!
//! The search pipeline always runs its three stages in the same order:
//!
//! 1. **Filter**: entity specific, see [`SearchableEntity::apply_filter`].
//! 2. **Sort**: by a field from the entity's allow-list, see
//!    [`SortableFields`]. Unknown fields leave the order untouched.
//! 3. **Paginate**: a half-open slice of the sorted items.
//!
//! `total` in the resulting [`SearchResult`] is the size of the filtered
//! sequence, before pagination.
//!
//! ## Implementing a searchable entity
//!
//! ```rust
//! use async_trait::async_trait;
//! use repository_framework::{ResourceEntity, SearchableEntity, SortKey, SortableFields};
//! use serde::Serialize;
//! use serde_json::{json, Value};
//!
//! #[derive(Debug, Clone, Serialize)]
//! struct Stub { id: String, name: String }
//!
//! impl ResourceEntity for Stub {
//!     fn id(&self) -> &str { &self.id }
//!     fn to_json(&self) -> Value { json!({ "id": self.id, "name": self.name }) }
//! }
//!
//! #[async_trait]
//! impl SearchableEntity for Stub {
//!     fn sortable_fields() -> SortableFields<Self> {
//!         SortableFields::new().field("name", |e: &Stub| SortKey::text(&e.name))
//!     }
//!
//!     async fn apply_filter(items: Vec<Self>, filter: Option<&str>) -> Vec<Self> {
//!         let Some(filter) = filter else { return items };
//!         let needle = filter.to_lowercase();
//!         items
//!             .into_iter()
//!             .filter(|item| item.name.to_lowercase().contains(&needle))
//!             .collect()
//!     }
//! }
//! ```

use crate::entity::ResourceEntity;
use crate::search::{SearchParams, SearchResult, SearchResultProps, SortDirection};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::cmp::Ordering;
use std::fmt;

/// A comparable value extracted from an entity field.
///
/// Keys of the same field always share a variant, so comparison reduces to
/// the natural ordering of the wrapped value.
#[derive(Debug, Clone, PartialEq, PartialOrd)]
pub enum SortKey {
    Text(String),
    Integer(i64),
    Float(f64),
    Timestamp(DateTime<Utc>),
}

impl SortKey {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// Generic less-than / greater-than comparison. Incomparable values
    /// (e.g. NaN) compare equal.
    pub fn compare(&self, other: &Self) -> Ordering {
        self.partial_cmp(other).unwrap_or(Ordering::Equal)
    }
}

/// Typed allow-list of sortable fields, mapping a field name to the function
/// that extracts its [`SortKey`].
pub struct SortableFields<E> {
    fields: Vec<(&'static str, fn(&E) -> SortKey)>,
}

impl<E> Default for SortableFields<E> {
    fn default() -> Self {
        Self { fields: Vec::new() }
    }
}

impl<E> fmt::Debug for SortableFields<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.fields.iter().map(|(name, _)| name))
            .finish()
    }
}

impl<E> SortableFields<E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(mut self, name: &'static str, key: fn(&E) -> SortKey) -> Self {
        self.fields.push((name, key));
        self
    }

    pub fn contains(&self, name: &str) -> bool {
        self.accessor(name).is_some()
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().map(|(name, _)| *name)
    }

    fn accessor(&self, name: &str) -> Option<fn(&E) -> SortKey> {
        self.fields
            .iter()
            .find(|(field, _)| *field == name)
            .map(|(_, key)| *key)
    }
}

/// Capability an entity type provides to be searchable.
///
/// `apply_filter` is the one stage every entity type must supply. The sort
/// stage has a default driven by [`sortable_fields`](Self::sortable_fields)
/// and may be overridden, e.g. to impose a default order when no sort field
/// was requested.
#[async_trait]
pub trait SearchableEntity: ResourceEntity {
    /// Fields this entity may be ordered by.
    fn sortable_fields() -> SortableFields<Self>;

    /// Returns the items matching `filter`. `None` must return every item.
    async fn apply_filter(items: Vec<Self>, filter: Option<&str>) -> Vec<Self>;

    fn apply_sort(
        items: Vec<Self>,
        sort: Option<&str>,
        sort_dir: Option<SortDirection>,
    ) -> Vec<Self> {
        sort_by_field(items, &Self::sortable_fields(), sort, sort_dir)
    }
}

/// Stable sort of `items` by an allow-listed field.
///
/// Returns `items` unchanged when `sort` is `None` or not in `fields`.
/// `Desc` reverses the comparison; ties keep their input order in both
/// directions.
pub fn sort_by_field<E>(
    mut items: Vec<E>,
    fields: &SortableFields<E>,
    sort: Option<&str>,
    sort_dir: Option<SortDirection>,
) -> Vec<E> {
    let Some(key) = sort.and_then(|name| fields.accessor(name)) else {
        return items;
    };
    let descending = sort_dir == Some(SortDirection::Desc);
    items.sort_by(|a, b| {
        let ordering = key(a).compare(&key(b));
        if descending {
            ordering.reverse()
        } else {
            ordering
        }
    });
    items
}

/// Half-open slice `[(page - 1) * per_page, page * per_page)` of `items`.
/// Pages past the end yield an empty vector.
pub fn apply_paginate<E>(items: Vec<E>, page: usize, per_page: usize) -> Vec<E> {
    let start = page.saturating_sub(1).saturating_mul(per_page);
    items.into_iter().skip(start).take(per_page).collect()
}

/// Runs filter → sort → paginate over `items` and assembles the result.
pub async fn run_search<E: SearchableEntity>(
    items: Vec<E>,
    params: &SearchParams,
) -> SearchResult<E> {
    let filtered = E::apply_filter(items, params.filter()).await;
    let sorted = E::apply_sort(filtered, params.sort(), params.sort_dir());
    let total = sorted.len();
    let page = apply_paginate(sorted, params.page(), params.per_page());

    SearchResult::new(SearchResultProps {
        items: page,
        total,
        current_page: params.page(),
        per_page: params.per_page(),
        sort: params.sort().map(str::to_string),
        sort_dir: params.sort_dir(),
        filter: params.filter().map(str::to_string),
    })
}
