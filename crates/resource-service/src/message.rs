//! # Service Messages
//!
//! Messages sent from a [`ResourceClient`](crate::ResourceClient) to the
//! [`ResourceServiceActor`](crate::ResourceServiceActor). Each request carries a
//! one-shot channel for its reply.

use crate::error::ResourceError;
use crate::types::{Resource, ResourceId};
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by the service actor.
pub type Response<T> = oneshot::Sender<Result<T, ResourceError>>;

/// A request to the in-memory resource service.
#[derive(Debug)]
pub enum ServiceRequest {
    Read {
        id: ResourceId,
        respond_to: Response<Resource>,
    },
    Write {
        resource: Resource,
        respond_to: Response<Resource>,
    },
    Delete {
        id: ResourceId,
        version: Option<String>,
        respond_to: Response<()>,
    },
}
