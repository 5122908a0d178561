//! # Resource Service
//!
//! Building blocks for talking to a generic, versioned, metadata-bearing
//! resource service. Records are addressed by a [`ResourceId`] (name, type and
//! tenancy) and carry a typed payload packed in an [`Any`] envelope.
//!
//! ## Architecture Overview
//!
//! 1. **Model** ([`types`], [`tenancy`]) - identities, records and payload types
//! 2. **Interface** ([`ResourceServiceClient`]) - the three remote calls consumers depend on
//! 3. **In-memory service** ([`ResourceServiceActor`], [`ResourceClient`]) - an actor-backed
//!    implementation with real version and finalizer semantics
//! 4. **Testing** ([`mock`]) - a scripted client that records every call
//!
//! Consumers are written against the trait and never against a concrete client,
//! so production transports, the in-memory service and the mock are
//! interchangeable.
//!
//! ## Errors
//!
//! Every failure is a [`ResourceError`] carrying a [`Code`]. Absence is
//! [`Code::NotFound`]; callers that treat absence as a normal outcome check
//! [`ResourceError::is_not_found`].
//!
//! ## Concurrency Model
//!
//! The in-memory service processes requests sequentially in its own Tokio task.
//! Racing writers are ordered by arrival; an unconditional write simply
//! replaces what is stored, a versioned write fails with [`Code::Aborted`]
//! when it lost the race.

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod error;
pub mod message;
pub mod mock;
pub mod tenancy;
pub mod types;

pub use actor::ResourceServiceActor;
pub use client::ResourceClient;
pub use client_trait::{RequestContext, ResourceServiceClient};
pub use error::{Code, PayloadError, ResourceError};
pub use message::{Response, ServiceRequest};
pub use types::{
    Any, Resource, ResourceId, ResourceType, Tenancy, TypedPayload, DELETION_TIMESTAMP_KEY,
    FINALIZERS_KEY,
};
