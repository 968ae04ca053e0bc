//! # In-Memory Store
//!
//! [`InMemoryRepository`] is the synchronous collection behind every
//! repository actor. It keeps entities in insertion order and looks them up
//! with a linear scan over their string identifiers.
//!
//! It is not shared: exactly one owner (normally a
//! [`RepositoryActor`](crate::RepositoryActor)) holds it, which is what
//! makes the read-modify-write steps of `update` and `delete` exclusive.

use crate::entity::ResourceEntity;
use crate::error::DomainError;
use crate::search::{SearchParams, SearchResult};
use crate::searchable::{run_search, SearchableEntity};

/// Insertion-ordered collection of entities keyed by identifier.
#[derive(Debug, Clone)]
pub struct InMemoryRepository<E> {
    items: Vec<E>,
}

impl<E> Default for InMemoryRepository<E> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<E: ResourceEntity> InMemoryRepository<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `entity`. Identifiers are not checked for uniqueness here.
    pub fn insert(&mut self, entity: E) {
        self.items.push(entity);
    }

    /// Appends `entity` unless a stored entity matches `conflict`.
    /// Fails with `on_conflict` and leaves the collection untouched otherwise.
    pub fn insert_unless<F>(
        &mut self,
        entity: E,
        conflict: F,
        on_conflict: DomainError,
    ) -> Result<(), DomainError>
    where
        F: Fn(&E) -> bool,
    {
        if self.items.iter().any(|item| conflict(item)) {
            return Err(on_conflict);
        }
        self.items.push(entity);
        Ok(())
    }

    pub fn find_by_id(&self, id: &str) -> Result<E, DomainError> {
        self.position(id).map(|index| self.items[index].clone())
    }

    pub fn find_all(&self) -> Vec<E> {
        self.items.clone()
    }

    /// First entity matching `predicate`, in insertion order.
    pub fn find_first<F>(&self, predicate: F) -> Option<E>
    where
        F: Fn(&E) -> bool,
    {
        self.items.iter().find(|item| predicate(item)).cloned()
    }

    /// Replaces the stored entity with the same id, keeping its position.
    /// Fails with `NotFound` before touching the collection.
    pub fn update(&mut self, entity: E) -> Result<(), DomainError> {
        let index = self.position(entity.id())?;
        self.items[index] = entity;
        Ok(())
    }

    /// Removes the entity with `id`. Fails with `NotFound` when absent.
    pub fn delete(&mut self, id: &str) -> Result<(), DomainError> {
        let index = self.position(id)?;
        self.items.remove(index);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[E] {
        &self.items
    }

    fn position(&self, id: &str) -> Result<usize, DomainError> {
        self.items
            .iter()
            .position(|item| item.id() == id)
            .ok_or_else(DomainError::entity_not_found)
    }
}

impl<E: SearchableEntity> InMemoryRepository<E> {
    /// Filter → sort → paginate over a snapshot of the collection.
    pub async fn search(&self, params: &SearchParams) -> SearchResult<E> {
        run_search(self.items.clone(), params).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::Entity;
    use crate::search::SearchProps;
    use crate::searchable::{SortKey, SortableFields};
    use async_trait::async_trait;
    use serde::Serialize;

    #[derive(Debug, Clone, Serialize)]
    struct StubProps {
        name: String,
        price: i64,
    }

    type Stub = Entity<StubProps>;

    #[async_trait]
    impl SearchableEntity for Stub {
        fn sortable_fields() -> SortableFields<Self> {
            SortableFields::new()
                .field("name", |e: &Stub| SortKey::text(&e.props().name))
                .field("price", |e: &Stub| SortKey::Integer(e.props().price))
        }

        async fn apply_filter(items: Vec<Self>, filter: Option<&str>) -> Vec<Self> {
            let Some(filter) = filter else {
                return items;
            };
            let needle = filter.to_lowercase();
            items
                .into_iter()
                .filter(|item| item.props().name.to_lowercase().contains(&needle))
                .collect()
        }
    }

    fn stub(name: &str, price: i64) -> Stub {
        Entity::new(StubProps {
            name: name.to_string(),
            price,
        })
    }

    #[test]
    fn insert_then_find_by_id() {
        let mut repo = InMemoryRepository::new();
        let entity = stub("test name", 50);
        repo.insert(entity.clone());

        let found = repo.find_by_id(entity.id()).unwrap();
        assert_eq!(found.props().name, "test name");
        assert_eq!(repo.find_all(), vec![entity]);
    }

    #[test]
    fn insert_unless_rejects_conflicting_entity() {
        let mut repo = InMemoryRepository::new();
        repo.insert(stub("taken", 1));
        let same_name = |item: &Stub| item.props().name == "taken";

        let err = repo
            .insert_unless(stub("taken", 2), same_name, DomainError::Conflict("dup".into()))
            .unwrap_err();
        assert_eq!(err, DomainError::Conflict("dup".into()));
        assert_eq!(repo.len(), 1);
        assert_eq!(repo.items()[0].props().price, 1);

        repo.insert_unless(stub("free", 3), same_name, DomainError::Conflict("dup".into()))
            .unwrap();
        assert_eq!(repo.len(), 2);
    }

    #[test]
    fn find_by_id_on_empty_repository_is_not_found() {
        let repo = InMemoryRepository::<Stub>::new();
        assert_eq!(
            repo.find_by_id("fakeId"),
            Err(DomainError::NotFound("Entity not found".into()))
        );
    }

    #[test]
    fn update_replaces_in_place() {
        let mut repo = InMemoryRepository::new();
        let first = stub("first", 1);
        let second = stub("second", 2);
        repo.insert(first.clone());
        repo.insert(second.clone());

        let mut changed = first.clone();
        changed.props_mut().name = "updated".into();
        repo.update(changed).unwrap();

        let names: Vec<&str> = repo.items().iter().map(|i| i.props().name.as_str()).collect();
        assert_eq!(names, vec!["updated", "second"]);
    }

    #[test]
    fn update_of_unknown_entity_fails_without_mutation() {
        let mut repo = InMemoryRepository::new();
        repo.insert(stub("kept", 1));

        let err = repo.update(stub("ghost", 2)).unwrap_err();
        assert!(matches!(err, DomainError::NotFound(_)));
        assert_eq!(repo.len(), 1);
        assert_eq!(repo.items()[0].props().name, "kept");
    }

    #[test]
    fn delete_removes_the_entity() {
        let mut repo = InMemoryRepository::new();
        let entity = stub("test", 10);
        repo.insert(entity.clone());

        repo.delete(entity.id()).unwrap();
        assert!(repo.find_all().is_empty());
        assert!(matches!(repo.delete(entity.id()), Err(DomainError::NotFound(_))));
    }

    #[tokio::test]
    async fn default_search_returns_first_fifteen() {
        let mut repo = InMemoryRepository::new();
        for i in 0..16 {
            repo.insert(stub(&format!("item {i}"), i));
        }

        let result = repo.search(&SearchParams::default()).await;
        assert_eq!(result.items().len(), 15);
        assert_eq!(result.total(), 16);
        assert_eq!(result.current_page(), 1);
        assert_eq!(result.per_page(), 15);
        assert_eq!(result.last_page(), 2);
    }

    #[tokio::test]
    async fn search_is_idempotent() {
        let mut repo = InMemoryRepository::new();
        for (name, price) in [("b", 2), ("a", 1), ("c", 3)] {
            repo.insert(stub(name, price));
        }
        let params = SearchParams::new(SearchProps::new().sort("price").sort_dir("desc"));

        let first = repo.search(&params).await;
        let second = repo.search(&params).await;
        assert_eq!(first, second);
    }
}
