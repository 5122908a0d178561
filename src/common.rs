//! Names shared across the sync controllers.

/// Sentinel meaning "every namespace". Never reconciled on its own.
pub const WILDCARD_NAMESPACE: &str = "*";

/// The namespace every partition starts with. Managed by the service itself.
pub const DEFAULT_NAMESPACE_NAME: &str = "default";

/// Whether `namespace` is one of the sentinels that must not be reconciled.
pub fn is_reserved_namespace(namespace: &str) -> bool {
    namespace == WILDCARD_NAMESPACE || namespace == DEFAULT_NAMESPACE_NAME
}
