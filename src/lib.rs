//! # Namespace Sync
//!
//! > **Keeps service-mesh namespaces in step with Kubernetes namespaces.**
//!
//! This crate is one step of a Kubernetes-to-service-mesh sync controller:
//! given a partition and a namespace name, it converges the namespace resource
//! in a remote resource service toward "exists" or "deleted", and is safe to
//! call any number of times.
//!
//! ## 🏗️ Design
//!
//! ### Three remote states, not two
//! A namespace can be absent, live, or *marked for deletion* (its metadata
//! carries `deletionTimestamp` while finalizers run). Creation is refused while
//! a deletion is in flight, and deleting something already being deleted is a
//! no-op. See [`namespace`] for the full table.
//!
//! ### No hidden policy
//! The reconciler does not retry, lock, cache or log failures. Every error is
//! returned to the caller with the remote cause attached
//! ([`NamespaceError::code`](namespace::NamespaceError::code)). Deadlines and
//! headers travel in the caller's
//! [`RequestContext`](resource_service::RequestContext).
//!
//! ### Written against a trait
//! All remote calls go through
//! [`ResourceServiceClient`](resource_service::ResourceServiceClient), so the
//! same code runs against a real transport, the in-process
//! [`ResourceServiceActor`](resource_service::ResourceServiceActor), or
//! [`MockResourceClient`](resource_service::mock::MockResourceClient) in tests.
//!
//! ## 🗺️ Module Tour
//!
//! - [`common`] - reserved namespace names (`*` and `default`)
//! - [`namespace`] - [`ensure_exists`](namespace::ensure_exists),
//!   [`ensure_deleted`](namespace::ensure_deleted),
//!   [`is_marked_for_deletion`](namespace::is_marked_for_deletion) and the
//!   [`NamespaceReconciler`](namespace::NamespaceReconciler) with its
//!   cross-namespace policy hook
//! - [`lifecycle`] - [`SyncSystem`](lifecycle::SyncSystem), configuration and tracing setup
//!
//! ## 🚀 Quick Start
//!
//! ```bash
//! RUST_LOG=debug cargo run
//! cargo test
//! ```

pub mod common;
pub mod lifecycle;
pub mod namespace;
