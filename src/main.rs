//! Demo: reconciles a handful of namespaces against the in-process resource service.

use namespace_sync::common::WILDCARD_NAMESPACE;
use namespace_sync::lifecycle::{setup_tracing, SyncSystem};
use namespace_sync::namespace::namespace_id;
use resource_service::{RequestContext, ResourceServiceClient, FINALIZERS_KEY};
use tracing::{error, info, Instrument};

#[tokio::main]
async fn main() -> Result<(), String> {
    setup_tracing();

    info!("Starting namespace sync demo");
    let system = SyncSystem::new();
    let ctx = RequestContext::default().with_header("x-request-source", "namespace-sync-demo");

    let span = tracing::info_span!("create");
    async {
        for namespace in ["team-a", "team-b", "team-a", WILDCARD_NAMESPACE] {
            match system.ensure_namespace(&ctx, namespace).await {
                Ok(created) => info!(namespace, created, "Namespace ensured"),
                Err(e) => error!(namespace, error = %e, "Namespace sync failed"),
            }
        }
    }
    .instrument(span)
    .await;

    // Give team-b a finalizer so its deletion stays pending.
    let partition = system.config().partition.clone();
    let id = namespace_id(&partition, "team-b");
    let mut team_b = system.client.read(&ctx, &id).await.map_err(|e| e.to_string())?;
    team_b
        .metadata
        .insert(FINALIZERS_KEY.to_string(), "consul.io/demo".to_string());
    system
        .client
        .write(&ctx, team_b)
        .await
        .map_err(|e| e.to_string())?;

    let span = tracing::info_span!("delete");
    async {
        for namespace in ["team-a", "team-a", "team-b", "team-b"] {
            match system.remove_namespace(&ctx, namespace).await {
                Ok(()) => info!(namespace, "Namespace removed or pending removal"),
                Err(e) => error!(namespace, error = %e, "Namespace removal failed"),
            }
        }

        // team-b is still being finalized, so recreating it must wait.
        if let Err(e) = system.ensure_namespace(&ctx, "team-b").await {
            info!(error = %e, "Recreate refused as expected");
        }
    }
    .instrument(span)
    .await;

    system.shutdown().await?;

    info!("Demo completed successfully");
    Ok(())
}
