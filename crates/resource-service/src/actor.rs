//! # In-Memory Resource Service
//!
//! [`ResourceServiceActor`] is the server half of an in-process resource
//! service. It owns the store and processes [`ServiceRequest`]s one at a time,
//! so the store needs no locking. Conflicts between racing callers are settled
//! by the order in which their requests reach the actor.
//!
//! ## Operations
//!
//! * **Read**: clone of the stored record, or `NotFound`.
//! * **Write**:
//!     1. A non-empty version must match the stored version (`Aborted` otherwise).
//!     2. A record marked for deletion only accepts a write that clears its
//!        finalizers; that write completes the deletion.
//!     3. Otherwise the record is stored under a fresh version.
//! * **Delete**:
//!     1. Deleting an absent record succeeds.
//!     2. A non-empty version must match the stored version.
//!     3. Records with finalizers are stamped with a deletion timestamp and kept.
//!     4. Everything else is removed.

use crate::client::ResourceClient;
use crate::error::ResourceError;
use crate::message::ServiceRequest;
use crate::types::{Resource, ResourceId, DELETION_TIMESTAMP_KEY};
use std::collections::HashMap;
use std::time::{SystemTime, UNIX_EPOCH};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

pub struct ResourceServiceActor {
    receiver: mpsc::Receiver<ServiceRequest>,
    store: HashMap<ResourceId, Resource>,
    next_version: u64,
}

impl ResourceServiceActor {
    /// Creates the actor and a client connected to it.
    ///
    /// `buffer_size` is the capacity of the request channel. When it is full,
    /// client calls wait for space.
    pub fn new(buffer_size: usize) -> (Self, ResourceClient) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            store: HashMap::new(),
            next_version: 1,
        };
        (actor, ResourceClient::new(sender))
    }

    /// Processes requests until every client has been dropped.
    pub async fn run(mut self) {
        info!("Resource service started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ServiceRequest::Read { id, respond_to } => {
                    let result = self.read(&id);
                    debug!(%id, found = result.is_ok(), "Read");
                    let _ = respond_to.send(result);
                }
                ServiceRequest::Write {
                    resource,
                    respond_to,
                } => {
                    let _ = respond_to.send(self.write(resource));
                }
                ServiceRequest::Delete {
                    id,
                    version,
                    respond_to,
                } => {
                    let _ = respond_to.send(self.delete(&id, version.as_deref()));
                }
            }
        }

        info!(size = self.store.len(), "Resource service shutdown");
    }

    fn read(&self, id: &ResourceId) -> Result<Resource, ResourceError> {
        self.store
            .get(id)
            .cloned()
            .ok_or_else(|| ResourceError::not_found(format!("resource {id} not found")))
    }

    fn write(&mut self, mut resource: Resource) -> Result<Resource, ResourceError> {
        let id = resource.id.clone();

        if let Some(existing) = self.store.get(&id) {
            if !resource.version.is_empty() && resource.version != existing.version {
                warn!(
                    %id,
                    expected = %resource.version,
                    actual = %existing.version,
                    "Write rejected"
                );
                return Err(ResourceError::aborted(format!(
                    "version mismatch for {id}: expected {}, stored {}",
                    resource.version, existing.version
                )));
            }

            if existing.metadata.contains_key(DELETION_TIMESTAMP_KEY) {
                if resource.has_finalizers() {
                    warn!(%id, "Write rejected, deletion in progress");
                    return Err(ResourceError::failed_precondition(format!(
                        "resource {id} is marked for deletion"
                    )));
                }
                let removed = self.store.remove(&id).unwrap_or(resource);
                info!(%id, size = self.store.len(), "Finalizers cleared, deleted");
                return Ok(removed);
            }
        } else if !resource.version.is_empty() {
            warn!(%id, "Write rejected, resource does not exist");
            return Err(ResourceError::aborted(format!(
                "version {} given for missing resource {id}",
                resource.version
            )));
        }

        resource.version = self.bump_version();
        self.store.insert(id.clone(), resource.clone());
        info!(%id, version = %resource.version, size = self.store.len(), "Written");
        Ok(resource)
    }

    fn delete(&mut self, id: &ResourceId, version: Option<&str>) -> Result<(), ResourceError> {
        let Some(existing) = self.store.get_mut(id) else {
            debug!(%id, "Delete of absent resource");
            return Ok(());
        };

        if let Some(version) = version.filter(|v| !v.is_empty()) {
            if version != existing.version {
                warn!(%id, expected = %version, actual = %existing.version, "Delete rejected");
                return Err(ResourceError::aborted(format!(
                    "version mismatch for {id}: expected {version}, stored {}",
                    existing.version
                )));
            }
        }

        if existing.has_finalizers() {
            if !existing.metadata.contains_key(DELETION_TIMESTAMP_KEY) {
                existing
                    .metadata
                    .insert(DELETION_TIMESTAMP_KEY.to_string(), deletion_timestamp());
                info!(%id, "Marked for deletion");
            }
            return Ok(());
        }

        self.store.remove(id);
        info!(%id, size = self.store.len(), "Deleted");
        Ok(())
    }

    fn bump_version(&mut self) -> String {
        let version = self.next_version;
        self.next_version += 1;
        version.to_string()
    }
}

fn deletion_timestamp() -> String {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
        .to_string()
}
