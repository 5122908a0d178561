//! # Namespace Reconciliation
//!
//! Converges a namespace in the resource service toward "exists" or
//! "deleted". A namespace is in one of three remote states:
//!
//! | Remote state | `ensure_exists` | `ensure_deleted` |
//! |--------------|-----------------|------------------|
//! | absent | writes it, returns `true` | nothing to do |
//! | live | nothing to do, returns `false` | unconditional delete |
//! | marked for deletion | [`NamespaceError::DeletionInProgress`] | nothing to do |
//!
//! Both operations issue at most one read followed by at most one write or
//! delete, never retry, and pass the caller's [`RequestContext`] through to
//! every call untouched. The reserved names in [`crate::common`] are never
//! touched.
//!
//! Two concurrent `ensure_exists` calls on the same identity can both observe
//! absence and both write. The writes are unconditional, so the resource
//! service settles the race and both callers report a creation.

pub mod error;
pub mod policy;
pub mod reconciler;

pub use error::*;
pub use policy::*;
pub use reconciler::*;

use crate::common::is_reserved_namespace;
use resource_service::tenancy::{Namespace, NAMESPACE_TYPE};
use resource_service::{Any, RequestContext, Resource, ResourceId, ResourceServiceClient, Tenancy};
use tracing::{debug, instrument};

pub use resource_service::DELETION_TIMESTAMP_KEY;

/// Metadata key recording where a resource came from.
pub const EXTERNAL_SOURCE_KEY: &str = "external-source";

/// Value of [`EXTERNAL_SOURCE_KEY`] on namespaces created by this integration.
pub const EXTERNAL_SOURCE_KUBERNETES: &str = "kubernetes";

/// Description written into namespaces created by this integration.
pub const AUTO_GENERATED_DESCRIPTION: &str = "Auto-generated by consul-k8s";

/// Identity of namespace `namespace` in partition `partition`.
pub fn namespace_id(partition: &str, namespace: &str) -> ResourceId {
    ResourceId::new(namespace, NAMESPACE_TYPE, Tenancy::partition(partition))
}

/// Ensures namespace `namespace` in `partition` is deleted or being deleted.
#[instrument(skip(ctx, client))]
pub async fn ensure_deleted<C>(
    ctx: &RequestContext,
    client: &C,
    partition: &str,
    namespace: &str,
) -> Result<(), NamespaceError>
where
    C: ResourceServiceClient + ?Sized,
{
    if is_reserved_namespace(namespace) {
        return Ok(());
    }

    let resource = match client.read(ctx, &namespace_id(partition, namespace)).await {
        Ok(resource) => resource,
        Err(e) if e.is_not_found() => {
            debug!("Namespace already absent");
            return Ok(());
        }
        Err(e) => return Err(NamespaceError::Read(e)),
    };

    if is_marked_for_deletion(&resource) {
        debug!("Namespace deletion already in progress");
        return Ok(());
    }

    client
        .delete(ctx, &resource.id, None)
        .await
        .map_err(NamespaceError::Delete)?;
    debug!("Namespace deleted");
    Ok(())
}

/// Ensures namespace `namespace` in `partition` exists and is not marked for
/// deletion, creating it if needed.
///
/// Returns `true` when this call created the namespace.
#[instrument(skip(ctx, client))]
pub async fn ensure_exists<C>(
    ctx: &RequestContext,
    client: &C,
    partition: &str,
    namespace: &str,
) -> Result<bool, NamespaceError>
where
    C: ResourceServiceClient + ?Sized,
{
    if is_reserved_namespace(namespace) {
        return Ok(false);
    }

    let id = namespace_id(partition, namespace);
    match client.read(ctx, &id).await {
        Ok(resource) if is_marked_for_deletion(&resource) => {
            return Err(NamespaceError::DeletionInProgress(namespace.to_string()));
        }
        Ok(_) => {
            debug!("Namespace already exists");
            return Ok(false);
        }
        Err(e) if !e.is_not_found() => return Err(NamespaceError::ExistsRead(e)),
        Err(_) => {}
    }

    let data = Any::new(&Namespace {
        description: AUTO_GENERATED_DESCRIPTION.to_string(),
    })?;
    let resource = Resource::new(id)
        .with_metadata(EXTERNAL_SOURCE_KEY, EXTERNAL_SOURCE_KUBERNETES)
        .with_data(data);

    client
        .write(ctx, resource)
        .await
        .map_err(NamespaceError::Create)?;
    debug!("Namespace created");
    Ok(true)
}

/// Whether `resource` has been marked for deletion. Only the presence of the
/// key matters, not its value.
pub fn is_marked_for_deletion(resource: &Resource) -> bool {
    resource.metadata.contains_key(DELETION_TIMESTAMP_KEY)
}
