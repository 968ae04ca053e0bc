//! # Mock Repository & Testing Guide
//!
//! [`MockRepository<E>`] hands out a real [`RepositoryClient<E>`], but the
//! requests are answered from a queue of expectations instead of an actual
//! store. Use it to test code *around* a repository (use cases, services)
//! without depending on what the collection happens to contain.
//!
//! | Feature | MockRepository | RepositoryActor |
//! |---------|----------------|-----------------|
//! | **State** | None, answers are scripted | Real in-memory collection |
//! | **Error injection** | Easy (`return_err`) | Needs the right data |
//! | **Use case** | Logic around the repository | The repository itself, full flows |
//!
//! ```rust
//! use async_trait::async_trait;
//! use repository_framework::mock::MockRepository;
//! use repository_framework::{DomainError, ResourceEntity, SearchableEntity, SortableFields};
//! use serde::Serialize;
//! use serde_json::{json, Value};
//!
//! #[derive(Debug, Clone, Serialize)]
//! struct Tag { id: String }
//!
//! impl ResourceEntity for Tag {
//!     fn id(&self) -> &str { &self.id }
//!     fn to_json(&self) -> Value { json!({ "id": self.id }) }
//! }
//!
//! #[async_trait]
//! impl SearchableEntity for Tag {
//!     fn sortable_fields() -> SortableFields<Self> { SortableFields::new() }
//!     async fn apply_filter(items: Vec<Self>, _: Option<&str>) -> Vec<Self> { items }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let mock = MockRepository::<Tag>::new();
//!     mock.expect_find_by_id("missing")
//!         .return_err(DomainError::entity_not_found());
//!
//!     let client = mock.client();
//!     let result = client.find_by_id("missing").await;
//!     assert!(matches!(result, Err(DomainError::NotFound(_))));
//!     mock.verify();
//! }
//! ```
//!
//! Expectations are consumed in order. A request that does not match the
//! next expectation is recorded, its caller sees
//! [`DomainError::RepositoryDropped`], and [`MockRepository::verify`] fails.

use crate::client::RepositoryClient;
use crate::error::DomainError;
use crate::message::RepositoryRequest;
use crate::search::SearchResult;
use crate::searchable::SearchableEntity;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::mpsc;

/// An expected request and the response to give it.
enum Expectation<E> {
    Insert {
        response: Result<(), DomainError>,
    },
    InsertUnless {
        response: Result<(), DomainError>,
    },
    FindById {
        id: String,
        response: Result<E, DomainError>,
    },
    FindAll {
        response: Result<Vec<E>, DomainError>,
    },
    FindFirst {
        response: Result<Option<E>, DomainError>,
    },
    Update {
        response: Result<(), DomainError>,
    },
    Delete {
        id: String,
        response: Result<(), DomainError>,
    },
    Search {
        response: Result<SearchResult<E>, DomainError>,
    },
}

struct MockState<E> {
    expectations: VecDeque<Expectation<E>>,
    mismatches: Vec<String>,
}

type Shared<E> = Arc<Mutex<MockState<E>>>;

fn lock<E>(state: &Shared<E>) -> MutexGuard<'_, MockState<E>> {
    state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// A mock repository with expectation tracking.
pub struct MockRepository<E: SearchableEntity> {
    client: RepositoryClient<E>,
    state: Shared<E>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<E: SearchableEntity> Default for MockRepository<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: SearchableEntity> MockRepository<E> {
    /// Creates a mock with no expectations. Must be called inside a Tokio
    /// runtime.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<RepositoryRequest<E>>(100);
        let state: Shared<E> = Arc::new(Mutex::new(MockState {
            expectations: VecDeque::new(),
            mismatches: Vec::new(),
        }));
        let task_state = state.clone();

        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let mut guard = lock(&task_state);
                let expectation = guard.expectations.pop_front();
                if let Some(mismatch) = answer(request, expectation) {
                    guard.mismatches.push(mismatch);
                }
            }
        });

        Self {
            client: RepositoryClient::new(sender),
            state,
            _handle: handle,
        }
    }

    /// Returns a client wired to this mock.
    pub fn client(&self) -> RepositoryClient<E> {
        self.client.clone()
    }

    pub fn expect_insert(&self) -> ExpectationBuilder<E, ()> {
        self.builder(|response| Expectation::Insert { response })
    }

    pub fn expect_insert_unless(&self) -> ExpectationBuilder<E, ()> {
        self.builder(|response| Expectation::InsertUnless { response })
    }

    pub fn expect_find_by_id(&self, id: impl Into<String>) -> ExpectationBuilder<E, E> {
        let id = id.into();
        self.builder(move |response| Expectation::FindById { id, response })
    }

    pub fn expect_find_all(&self) -> ExpectationBuilder<E, Vec<E>> {
        self.builder(|response| Expectation::FindAll { response })
    }

    pub fn expect_find_first(&self) -> ExpectationBuilder<E, Option<E>> {
        self.builder(|response| Expectation::FindFirst { response })
    }

    pub fn expect_update(&self) -> ExpectationBuilder<E, ()> {
        self.builder(|response| Expectation::Update { response })
    }

    pub fn expect_delete(&self, id: impl Into<String>) -> ExpectationBuilder<E, ()> {
        let id = id.into();
        self.builder(move |response| Expectation::Delete { id, response })
    }

    pub fn expect_search(&self) -> ExpectationBuilder<E, SearchResult<E>> {
        self.builder(|response| Expectation::Search { response })
    }

    /// Panics when an expectation was left unused or a request did not
    /// match the expectation it met.
    pub fn verify(&self) {
        let state = lock(&self.state);
        if !state.mismatches.is_empty() {
            panic!("Unexpected repository requests: {:?}", state.mismatches);
        }
        if !state.expectations.is_empty() {
            panic!(
                "Not all expectations were met. {} remaining",
                state.expectations.len()
            );
        }
    }

    fn builder<T>(
        &self,
        wrap: impl FnOnce(Result<T, DomainError>) -> Expectation<E> + 'static,
    ) -> ExpectationBuilder<E, T> {
        ExpectationBuilder {
            state: self.state.clone(),
            wrap: Box::new(wrap),
        }
    }
}

/// Sets the response for one expected request.
pub struct ExpectationBuilder<E, T> {
    state: Shared<E>,
    wrap: Box<dyn FnOnce(Result<T, DomainError>) -> Expectation<E>>,
}

impl<E, T> ExpectationBuilder<E, T> {
    pub fn return_ok(self, value: T) {
        self.push(Ok(value));
    }

    pub fn return_err(self, error: DomainError) {
        self.push(Err(error));
    }

    fn push(self, response: Result<T, DomainError>) {
        let expectation = (self.wrap)(response);
        lock(&self.state).expectations.push_back(expectation);
    }
}

/// Answers `request` from `expectation`, or describes the mismatch.
fn answer<E: SearchableEntity>(
    request: RepositoryRequest<E>,
    expectation: Option<Expectation<E>>,
) -> Option<String> {
    match (request, expectation) {
        (RepositoryRequest::Insert { respond_to, .. }, Some(Expectation::Insert { response })) => {
            let _ = respond_to.send(response);
        }
        (
            RepositoryRequest::InsertUnless { respond_to, .. },
            Some(Expectation::InsertUnless { response }),
        ) => {
            let _ = respond_to.send(response);
        }
        (
            RepositoryRequest::FindById { id, respond_to },
            Some(Expectation::FindById {
                id: expected,
                response,
            }),
        ) => {
            if id != expected {
                return Some(format!("FindById({id}), expected FindById({expected})"));
            }
            let _ = respond_to.send(response);
        }
        (RepositoryRequest::FindAll { respond_to }, Some(Expectation::FindAll { response })) => {
            let _ = respond_to.send(response);
        }
        (
            RepositoryRequest::FindFirst { respond_to, .. },
            Some(Expectation::FindFirst { response }),
        ) => {
            let _ = respond_to.send(response);
        }
        (RepositoryRequest::Update { respond_to, .. }, Some(Expectation::Update { response })) => {
            let _ = respond_to.send(response);
        }
        (
            RepositoryRequest::Delete { id, respond_to },
            Some(Expectation::Delete {
                id: expected,
                response,
            }),
        ) => {
            if id != expected {
                return Some(format!("Delete({id}), expected Delete({expected})"));
            }
            let _ = respond_to.send(response);
        }
        (RepositoryRequest::Search { respond_to, .. }, Some(Expectation::Search { response })) => {
            let _ = respond_to.send(response);
        }
        (request, _) => return Some(format!("{request:?}")),
    }
    None
}

/// Creates a client and the raw receiver behind it, for tests that want to
/// inspect requests themselves.
pub fn create_mock_client<E: SearchableEntity>(
    buffer_size: usize,
) -> (RepositoryClient<E>, mpsc::Receiver<RepositoryRequest<E>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (RepositoryClient::new(sender), receiver)
}
