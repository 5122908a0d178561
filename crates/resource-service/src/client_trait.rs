//! # ResourceServiceClient Trait
//!
//! The narrow interface every consumer of the resource service is written
//! against. It exposes exactly three operations (read, write, delete) and is
//! implemented by the actor-backed [`ResourceClient`](crate::ResourceClient),
//! by [`MockResourceClient`](crate::mock::MockResourceClient), and by whatever
//! transport a deployment plugs in.
//!
//! ```rust
//! use resource_service::tenancy::NAMESPACE_TYPE;
//! use resource_service::{RequestContext, ResourceId, ResourceServiceActor, ResourceServiceClient, Tenancy};
//!
//! #[tokio::main]
//! async fn main() {
//!     let (actor, client) = ResourceServiceActor::new(10);
//!     tokio::spawn(actor.run());
//!
//!     let id = ResourceId::new("team-a", NAMESPACE_TYPE, Tenancy::partition("default"));
//!     let err = client.read(&RequestContext::default(), &id).await.unwrap_err();
//!     assert!(err.is_not_found());
//! }
//! ```

use crate::error::ResourceError;
use crate::types::{Resource, ResourceId};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::time::Instant;

/// Invocation context handed to every remote call.
///
/// Callers own deadlines and request headers; consumers of the client pass
/// the context through untouched. Cancellation is expressed by dropping the
/// returned future.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestContext {
    pub deadline: Option<Instant>,
    pub headers: HashMap<String, String>,
}

impl RequestContext {
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }
}

/// Client for a remote resource service.
#[async_trait]
pub trait ResourceServiceClient: Send + Sync {
    /// Fetch a resource. Absence is reported as [`Code::NotFound`](crate::Code::NotFound).
    async fn read(&self, ctx: &RequestContext, id: &ResourceId) -> Result<Resource, ResourceError>;

    /// Write a resource and return it as stored. An empty `version` requests an
    /// unconditional write. A write that clears the finalizers of a resource
    /// marked for deletion completes the deletion and returns the last stored
    /// record.
    async fn write(
        &self,
        ctx: &RequestContext,
        resource: Resource,
    ) -> Result<Resource, ResourceError>;

    /// Delete a resource. `None` requests an unconditional delete.
    async fn delete(
        &self,
        ctx: &RequestContext,
        id: &ResourceId,
        version: Option<&str>,
    ) -> Result<(), ResourceError>;
}

#[async_trait]
impl<T: ResourceServiceClient + ?Sized> ResourceServiceClient for Arc<T> {
    async fn read(&self, ctx: &RequestContext, id: &ResourceId) -> Result<Resource, ResourceError> {
        (**self).read(ctx, id).await
    }

    async fn write(
        &self,
        ctx: &RequestContext,
        resource: Resource,
    ) -> Result<Resource, ResourceError> {
        (**self).write(ctx, resource).await
    }

    async fn delete(
        &self,
        ctx: &RequestContext,
        id: &ResourceId,
        version: Option<&str>,
    ) -> Result<(), ResourceError> {
        (**self).delete(ctx, id, version).await
    }
}

#[async_trait]
impl<T: ResourceServiceClient + ?Sized> ResourceServiceClient for &T {
    async fn read(&self, ctx: &RequestContext, id: &ResourceId) -> Result<Resource, ResourceError> {
        (**self).read(ctx, id).await
    }

    async fn write(
        &self,
        ctx: &RequestContext,
        resource: Resource,
    ) -> Result<Resource, ResourceError> {
        (**self).write(ctx, resource).await
    }

    async fn delete(
        &self,
        ctx: &RequestContext,
        id: &ResourceId,
        version: Option<&str>,
    ) -> Result<(), ResourceError> {
        (**self).delete(ctx, id, version).await
    }
}
