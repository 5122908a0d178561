//! # Mock Client & Testing Guide
//!
//! [`MockResourceClient`] implements [`ResourceServiceClient`] entirely
//! in-memory from a queue of expectations. It lets you script what the
//! service answers and then inspect exactly which calls were made, without
//! spawning the [`ResourceServiceActor`](crate::ResourceServiceActor).
//!
//! ## When to use the mock vs the in-memory service
//!
//! | Feature | MockResourceClient | ResourceServiceActor |
//! |---------|--------------------|----------------------|
//! | **State** | None (scripted answers) | Real store with versions and finalizers |
//! | **Error injection** | Any code, any call | Only what the store produces |
//! | **Call inspection** | Every call recorded with its context | Not available |
//! | **Use case** | Unit testing logic *around* the client | End-to-end convergence |
//!
//! ```rust
//! use resource_service::mock::{MockCall, MockResourceClient};
//! use resource_service::tenancy::NAMESPACE_TYPE;
//! use resource_service::{RequestContext, ResourceError, ResourceId, ResourceServiceClient, Tenancy};
//!
//! #[tokio::main]
//! async fn main() {
//!     let id = ResourceId::new("team-a", NAMESPACE_TYPE, Tenancy::partition("default"));
//!
//!     let mock = MockResourceClient::new();
//!     mock.expect_read(id.clone())
//!         .return_err(ResourceError::not_found("no such namespace"));
//!
//!     let result = mock.read(&RequestContext::default(), &id).await;
//!     assert!(result.unwrap_err().is_not_found());
//!
//!     mock.verify();
//!     assert!(matches!(&mock.calls()[0], MockCall::Read { .. }));
//! }
//! ```
//!
//! Unexpected calls, or calls that arrive out of order, panic.

use crate::client_trait::{RequestContext, ResourceServiceClient};
use crate::error::ResourceError;
use crate::types::{Resource, ResourceId};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

enum Expectation {
    Read {
        id: ResourceId,
        response: Result<Resource, ResourceError>,
    },
    Write {
        response: Result<(), ResourceError>,
    },
    Delete {
        id: ResourceId,
        response: Result<(), ResourceError>,
    },
}

/// A call received by the mock, in arrival order.
#[derive(Debug, Clone, PartialEq)]
pub enum MockCall {
    Read {
        ctx: RequestContext,
        id: ResourceId,
    },
    Write {
        ctx: RequestContext,
        resource: Resource,
    },
    Delete {
        ctx: RequestContext,
        id: ResourceId,
        version: Option<String>,
    },
}

type Shared<T> = Arc<Mutex<T>>;

/// A scripted resource service client.
#[derive(Clone, Default)]
pub struct MockResourceClient {
    expectations: Shared<VecDeque<Expectation>>,
    calls: Shared<Vec<MockCall>>,
}

impl MockResourceClient {
    /// Creates a mock with no expectations.
    pub fn new() -> Self {
        Self::default()
    }

    /// Expects a `read` of `id`.
    pub fn expect_read(&self, id: ResourceId) -> ReadExpectationBuilder {
        ReadExpectationBuilder {
            id,
            expectations: self.expectations.clone(),
        }
    }

    /// Expects a `write`.
    pub fn expect_write(&self) -> WriteExpectationBuilder {
        WriteExpectationBuilder {
            expectations: self.expectations.clone(),
        }
    }

    /// Expects a `delete` of `id`.
    pub fn expect_delete(&self, id: ResourceId) -> DeleteExpectationBuilder {
        DeleteExpectationBuilder {
            id,
            expectations: self.expectations.clone(),
        }
    }

    /// Every call received so far.
    pub fn calls(&self) -> Vec<MockCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Panics unless every expectation was consumed.
    pub fn verify(&self) {
        let exps = self.expectations.lock().unwrap();
        if !exps.is_empty() {
            panic!("Not all expectations were met. {} remaining", exps.len());
        }
    }

    fn record(&self, call: MockCall) -> Option<Expectation> {
        self.calls.lock().unwrap().push(call);
        self.expectations.lock().unwrap().pop_front()
    }
}

#[async_trait]
impl ResourceServiceClient for MockResourceClient {
    async fn read(&self, ctx: &RequestContext, id: &ResourceId) -> Result<Resource, ResourceError> {
        let call = MockCall::Read {
            ctx: ctx.clone(),
            id: id.clone(),
        };
        match self.record(call) {
            Some(Expectation::Read {
                id: expected,
                response,
            }) => {
                assert_eq!(&expected, id, "read of unexpected resource");
                response
            }
            _ => panic!("Unexpected read of {id}"),
        }
    }

    async fn write(
        &self,
        ctx: &RequestContext,
        resource: Resource,
    ) -> Result<Resource, ResourceError> {
        let call = MockCall::Write {
            ctx: ctx.clone(),
            resource: resource.clone(),
        };
        match self.record(call) {
            Some(Expectation::Write { response }) => response.map(|()| {
                let mut stored = resource;
                stored.version = "1".to_string();
                stored
            }),
            _ => panic!("Unexpected write of {}", resource.id),
        }
    }

    async fn delete(
        &self,
        ctx: &RequestContext,
        id: &ResourceId,
        version: Option<&str>,
    ) -> Result<(), ResourceError> {
        let call = MockCall::Delete {
            ctx: ctx.clone(),
            id: id.clone(),
            version: version.map(str::to_string),
        };
        match self.record(call) {
            Some(Expectation::Delete {
                id: expected,
                response,
            }) => {
                assert_eq!(&expected, id, "delete of unexpected resource");
                response
            }
            _ => panic!("Unexpected delete of {id}"),
        }
    }
}

/// Builder for `read` expectations.
pub struct ReadExpectationBuilder {
    id: ResourceId,
    expectations: Shared<VecDeque<Expectation>>,
}

impl ReadExpectationBuilder {
    pub fn return_ok(self, resource: Resource) {
        self.push(Ok(resource));
    }

    pub fn return_err(self, error: ResourceError) {
        self.push(Err(error));
    }

    fn push(self, response: Result<Resource, ResourceError>) {
        let mut exps = self.expectations.lock().unwrap();
        exps.push_back(Expectation::Read {
            id: self.id,
            response,
        });
    }
}

/// Builder for `write` expectations. A successful write echoes the resource
/// back with version `"1"`.
pub struct WriteExpectationBuilder {
    expectations: Shared<VecDeque<Expectation>>,
}

impl WriteExpectationBuilder {
    pub fn return_ok(self) {
        let mut exps = self.expectations.lock().unwrap();
        exps.push_back(Expectation::Write { response: Ok(()) });
    }

    pub fn return_err(self, error: ResourceError) {
        let mut exps = self.expectations.lock().unwrap();
        exps.push_back(Expectation::Write {
            response: Err(error),
        });
    }
}

/// Builder for `delete` expectations.
pub struct DeleteExpectationBuilder {
    id: ResourceId,
    expectations: Shared<VecDeque<Expectation>>,
}

impl DeleteExpectationBuilder {
    pub fn return_ok(self) {
        self.push(Ok(()));
    }

    pub fn return_err(self, error: ResourceError) {
        self.push(Err(error));
    }

    fn push(self, response: Result<(), ResourceError>) {
        let mut exps = self.expectations.lock().unwrap();
        exps.push_back(Expectation::Delete {
            id: self.id,
            response,
        });
    }
}
