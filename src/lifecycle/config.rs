//! Configuration for [`SyncSystem`](super::SyncSystem).

use serde::{Deserialize, Serialize};

/// Settings for wiring a namespace sync system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SystemConfig {
    /// Capacity of the resource service request channel. When it is full,
    /// callers wait for space.
    pub buffer_size: usize,
    /// Partition namespaces are reconciled into when the caller does not name one.
    pub partition: String,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            buffer_size: 32,
            partition: "default".to_string(),
        }
    }
}
