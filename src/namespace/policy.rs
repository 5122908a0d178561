//! # Cross-Namespace Policy Hook
//!
//! Namespaces created from Kubernetes may need an ACL policy that lets
//! services in other namespaces discover them. The policy shape depends on a
//! tenancy model the resource service does not expose yet, so reconciliation
//! only offers a hook: [`CrossNamespacePolicy::on_namespace_created`] runs
//! every time a reconciler finds the namespace live, whether it just created
//! it or found it already there. A failed hook is therefore retried by the
//! next reconciliation.

use super::NamespaceError;
use async_trait::async_trait;
use resource_service::{RequestContext, ResourceServiceClient};
use std::sync::Arc;

#[async_trait]
pub trait CrossNamespacePolicy: Send + Sync {
    /// Called whenever `namespace` is live in `partition` after
    /// `ensure_exists`. Implementations must be idempotent.
    async fn on_namespace_created(
        &self,
        ctx: &RequestContext,
        client: &dyn ResourceServiceClient,
        partition: &str,
        namespace: &str,
    ) -> Result<(), NamespaceError>;
}

/// Policy that does nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCrossNamespacePolicy;

#[async_trait]
impl CrossNamespacePolicy for NoCrossNamespacePolicy {
    async fn on_namespace_created(
        &self,
        _ctx: &RequestContext,
        _client: &dyn ResourceServiceClient,
        _partition: &str,
        _namespace: &str,
    ) -> Result<(), NamespaceError> {
        Ok(())
    }
}

#[async_trait]
impl<T: CrossNamespacePolicy + ?Sized> CrossNamespacePolicy for Arc<T> {
    async fn on_namespace_created(
        &self,
        ctx: &RequestContext,
        client: &dyn ResourceServiceClient,
        partition: &str,
        namespace: &str,
    ) -> Result<(), NamespaceError> {
        (**self)
            .on_namespace_created(ctx, client, partition, namespace)
            .await
    }
}
