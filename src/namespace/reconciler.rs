//! Reconciler bundling a resource service client with a cross-namespace policy.

use crate::common::is_reserved_namespace;
use super::{
    ensure_deleted, ensure_exists, CrossNamespacePolicy, NamespaceError, NoCrossNamespacePolicy,
};
use resource_service::{RequestContext, ResourceServiceClient};

/// Reconciles namespaces against one resource service.
///
/// Cheap to clone when the client and policy are.
///
/// ```rust
/// use namespace_sync::namespace::NamespaceReconciler;
/// use resource_service::{RequestContext, ResourceServiceActor};
///
/// #[tokio::main]
/// async fn main() {
///     let (actor, client) = ResourceServiceActor::new(10);
///     tokio::spawn(actor.run());
///
///     let reconciler = NamespaceReconciler::new(client);
///     let ctx = RequestContext::default();
///     assert!(reconciler.ensure_exists(&ctx, "default", "team-a").await.unwrap());
///     assert!(!reconciler.ensure_exists(&ctx, "default", "team-a").await.unwrap());
/// }
/// ```
#[derive(Debug, Clone)]
pub struct NamespaceReconciler<C, P = NoCrossNamespacePolicy> {
    client: C,
    policy: P,
}

impl<C: ResourceServiceClient> NamespaceReconciler<C> {
    pub fn new(client: C) -> Self {
        Self {
            client,
            policy: NoCrossNamespacePolicy,
        }
    }
}

impl<C, P> NamespaceReconciler<C, P>
where
    C: ResourceServiceClient,
    P: CrossNamespacePolicy,
{
    pub fn with_policy(client: C, policy: P) -> Self {
        Self { client, policy }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// See [`ensure_exists`]. Runs the policy hook whenever the namespace
    /// is live afterwards, so a failed hook is retried on the next call.
    /// Reserved names skip the hook.
    pub async fn ensure_exists(
        &self,
        ctx: &RequestContext,
        partition: &str,
        namespace: &str,
    ) -> Result<bool, NamespaceError> {
        let created = ensure_exists(ctx, &self.client, partition, namespace).await?;
        if !is_reserved_namespace(namespace) {
            self.policy
                .on_namespace_created(ctx, &self.client, partition, namespace)
                .await?;
        }
        Ok(created)
    }

    /// See [`ensure_deleted`].
    pub async fn ensure_deleted(
        &self,
        ctx: &RequestContext,
        partition: &str,
        namespace: &str,
    ) -> Result<(), NamespaceError> {
        ensure_deleted(ctx, &self.client, partition, namespace).await
    }
}
