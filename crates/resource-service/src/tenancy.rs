//! Tenancy resource types.

use crate::types::{ResourceType, TypedPayload};
use serde::{Deserialize, Serialize};

/// Type of namespace resources.
pub const NAMESPACE_TYPE: ResourceType = ResourceType {
    group: "tenancy",
    group_version: "v2beta1",
    kind: "Namespace",
};

/// Payload of a namespace resource.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Namespace {
    pub description: String,
}

impl TypedPayload for Namespace {
    const TYPE_URL: &'static str = "hashicorp.consul.tenancy.v2beta1.Namespace";
}
