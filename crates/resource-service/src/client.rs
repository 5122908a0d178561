//! # Channel Client
//!
//! [`ResourceClient`] is the handle side of the in-memory service. It forwards
//! each call to the [`ResourceServiceActor`](crate::ResourceServiceActor) over
//! a Tokio mpsc channel and awaits the reply on a oneshot channel. It holds only
//! a sender, so cloning is cheap and clones can be shared across tasks.

use crate::client_trait::{RequestContext, ResourceServiceClient};
use crate::error::{Code, ResourceError};
use crate::message::ServiceRequest;
use crate::types::{Resource, ResourceId};
use async_trait::async_trait;
use std::future::Future;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, instrument};

#[derive(Debug, Clone)]
pub struct ResourceClient {
    sender: mpsc::Sender<ServiceRequest>,
}

impl ResourceClient {
    pub fn new(sender: mpsc::Sender<ServiceRequest>) -> Self {
        Self { sender }
    }

    async fn call<T: Send>(
        &self,
        ctx: &RequestContext,
        request: ServiceRequest,
        response: oneshot::Receiver<Result<T, ResourceError>>,
    ) -> Result<T, ResourceError> {
        let exchange = async {
            self.sender
                .send(request)
                .await
                .map_err(|_| ResourceError::unavailable("resource service closed"))?;
            response
                .await
                .map_err(|_| ResourceError::unavailable("resource service dropped response"))?
        };
        with_deadline(ctx, exchange).await
    }
}

async fn with_deadline<T, F>(ctx: &RequestContext, fut: F) -> Result<T, ResourceError>
where
    F: Future<Output = Result<T, ResourceError>>,
{
    match ctx.deadline {
        Some(deadline) => tokio::time::timeout_at(deadline, fut)
            .await
            .map_err(|_| ResourceError::new(Code::DeadlineExceeded, "deadline exceeded"))?,
        None => fut.await,
    }
}

#[async_trait]
impl ResourceServiceClient for ResourceClient {
    #[instrument(skip(self, ctx, id), fields(id = %id))]
    async fn read(&self, ctx: &RequestContext, id: &ResourceId) -> Result<Resource, ResourceError> {
        debug!("Sending request");
        let (respond_to, response) = oneshot::channel();
        let request = ServiceRequest::Read {
            id: id.clone(),
            respond_to,
        };
        self.call(ctx, request, response).await
    }

    #[instrument(skip(self, ctx, resource), fields(id = %resource.id))]
    async fn write(
        &self,
        ctx: &RequestContext,
        resource: Resource,
    ) -> Result<Resource, ResourceError> {
        debug!("Sending request");
        let (respond_to, response) = oneshot::channel();
        let request = ServiceRequest::Write {
            resource,
            respond_to,
        };
        self.call(ctx, request, response).await
    }

    #[instrument(skip(self, ctx, id), fields(id = %id))]
    async fn delete(
        &self,
        ctx: &RequestContext,
        id: &ResourceId,
        version: Option<&str>,
    ) -> Result<(), ResourceError> {
        debug!("Sending request");
        let (respond_to, response) = oneshot::channel();
        let request = ServiceRequest::Delete {
            id: id.clone(),
            version: version.map(str::to_string),
            respond_to,
        };
        self.call(ctx, request, response).await
    }
}
