//! # Resource Model
//!
//! The generic record abstraction served by the resource service. Every record
//! is addressed by a [`ResourceId`], carries an opaque version token, a string
//! metadata map, and a typed payload packed into an [`Any`] envelope.

use crate::error::PayloadError;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Metadata key stamped by the service once a resource is marked for deletion.
/// Only resources carrying finalizers stay around long enough to observe it.
pub const DELETION_TIMESTAMP_KEY: &str = "deletionTimestamp";

/// Metadata key listing finalizers (space separated) that must be cleared
/// before a marked resource is removed.
pub const FINALIZERS_KEY: &str = "finalizers";

/// Fully qualified type of a resource, e.g. `tenancy.v2beta1.Namespace`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ResourceType {
    pub group: &'static str,
    pub group_version: &'static str,
    pub kind: &'static str,
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.group, self.group_version, self.kind)
    }
}

/// Addressing scope of a resource.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Tenancy {
    pub partition: String,
}

impl Tenancy {
    pub fn partition(partition: impl Into<String>) -> Self {
        Self {
            partition: partition.into(),
        }
    }
}

/// Identity of a resource: name, type and tenancy.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourceId {
    pub name: String,
    pub resource_type: ResourceType,
    pub tenancy: Tenancy,
}

impl ResourceId {
    pub fn new(name: impl Into<String>, resource_type: ResourceType, tenancy: Tenancy) -> Self {
        Self {
            name: name.into(),
            resource_type,
            tenancy,
        }
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}/{}",
            self.resource_type, self.tenancy.partition, self.name
        )
    }
}

/// A record as stored by the resource service.
///
/// `version` is empty for records that have not been written yet. Writing a
/// record with an empty version asks the service for an unconditional write.
#[derive(Debug, Clone, PartialEq)]
pub struct Resource {
    pub id: ResourceId,
    pub version: String,
    pub metadata: HashMap<String, String>,
    pub data: Option<Any>,
}

impl Resource {
    pub fn new(id: ResourceId) -> Self {
        Self {
            id,
            version: String::new(),
            metadata: HashMap::new(),
            data: None,
        }
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    pub fn with_data(mut self, data: Any) -> Self {
        self.data = Some(data);
        self
    }

    /// Whether the metadata lists at least one finalizer.
    pub fn has_finalizers(&self) -> bool {
        self.metadata
            .get(FINALIZERS_KEY)
            .is_some_and(|f| !f.trim().is_empty())
    }
}

/// A payload type that can be packed into an [`Any`].
pub trait TypedPayload: Serialize + DeserializeOwned {
    const TYPE_URL: &'static str;
}

/// Opaque typed payload envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Any {
    pub type_url: String,
    pub value: Vec<u8>,
}

impl Any {
    /// Packs `payload` into an envelope tagged with its type URL.
    pub fn new<T: TypedPayload>(payload: &T) -> Result<Self, PayloadError> {
        let value = serde_json::to_vec(payload).map_err(|source| PayloadError::Encode {
            type_url: T::TYPE_URL,
            source,
        })?;
        Ok(Self {
            type_url: T::TYPE_URL.to_string(),
            value,
        })
    }

    /// Unpacks the envelope, checking the type URL first.
    pub fn to<T: TypedPayload>(&self) -> Result<T, PayloadError> {
        if self.type_url != T::TYPE_URL {
            return Err(PayloadError::TypeMismatch {
                expected: T::TYPE_URL,
                actual: self.type_url.clone(),
            });
        }
        serde_json::from_slice(&self.value).map_err(|source| PayloadError::Decode {
            type_url: T::TYPE_URL,
            source,
        })
    }
}
