//! # System Lifecycle
//!
//! Starting, wiring and shutting down the pieces a sync run needs.
//!
//! - [`SyncSystem`] spawns the in-process resource service and hands out
//!   [`NamespaceReconciler`](crate::namespace::NamespaceReconciler)s bound to it.
//! - [`SystemConfig`] holds the channel capacity and the default partition.
//! - [`setup_tracing`] installs the log subscriber.
//!
//! ## Graceful Shutdown
//!
//! 1. **Drop all clients** - the system's own and every reconciler's
//! 2. **Actor detects closure** - `receiver.recv()` returns `None`
//! 3. **Await completion** - [`SyncSystem::shutdown`] joins the actor task

pub mod config;
pub mod sync_system;
pub mod tracing;

pub use config::*;
pub use sync_system::*;
pub use self::tracing::*;
