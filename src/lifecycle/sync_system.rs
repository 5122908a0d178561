use super::SystemConfig;
use crate::namespace::{NamespaceError, NamespaceReconciler};
use resource_service::{RequestContext, ResourceClient, ResourceServiceActor};
use tracing::{error, info};

/// Runtime orchestrator for namespace sync against an in-process resource service.
///
/// `SyncSystem` is responsible for:
/// - **Lifecycle Management**: starting and stopping the resource service actor
/// - **Dependency Wiring**: handing out reconcilers bound to the service client
///
/// # Example
///
/// ```ignore
/// let system = SyncSystem::new();
/// let ctx = RequestContext::default();
/// system.ensure_namespace(&ctx, "team-a").await?;
/// system.shutdown().await?;
/// ```
pub struct SyncSystem {
    pub client: ResourceClient,
    config: SystemConfig,
    handle: tokio::task::JoinHandle<()>,
}

impl SyncSystem {
    /// Starts a system with [`SystemConfig::default`].
    pub fn new() -> Self {
        Self::with_config(SystemConfig::default())
    }

    /// Spawns the resource service actor and keeps its client.
    pub fn with_config(config: SystemConfig) -> Self {
        let (actor, client) = ResourceServiceActor::new(config.buffer_size);
        let handle = tokio::spawn(actor.run());
        info!(partition = %config.partition, "Sync system started");

        Self {
            client,
            config,
            handle,
        }
    }

    pub fn config(&self) -> &SystemConfig {
        &self.config
    }

    /// A reconciler sharing the system's client. Drop it before [`shutdown`](Self::shutdown).
    pub fn reconciler(&self) -> NamespaceReconciler<ResourceClient> {
        NamespaceReconciler::new(self.client.clone())
    }

    /// Ensures `namespace` exists in the configured partition.
    pub async fn ensure_namespace(
        &self,
        ctx: &RequestContext,
        namespace: &str,
    ) -> Result<bool, NamespaceError> {
        self.reconciler()
            .ensure_exists(ctx, &self.config.partition, namespace)
            .await
    }

    /// Ensures `namespace` is deleted from the configured partition.
    pub async fn remove_namespace(
        &self,
        ctx: &RequestContext,
        namespace: &str,
    ) -> Result<(), NamespaceError> {
        self.reconciler()
            .ensure_deleted(ctx, &self.config.partition, namespace)
            .await
    }

    /// Drops the client and waits for the service actor to drain.
    ///
    /// The actor only stops once every client clone is gone, so reconcilers
    /// handed out by [`reconciler`](Self::reconciler) must be dropped first.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down system...");
        drop(self.client);

        if let Err(e) = self.handle.await {
            error!("Resource service task failed: {:?}", e);
            return Err(format!("Resource service task failed: {:?}", e));
        }

        info!("System shutdown complete.");
        Ok(())
    }
}

impl Default for SyncSystem {
    fn default() -> Self {
        Self::new()
    }
}
