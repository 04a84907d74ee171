//! Error types for the host runtime surface

/// Error type for host method table operations
#[derive(Debug, thiserror::Error)]
pub enum HostError {
    /// No type with this name is registered with the host
    #[error("Host type not found: {0}")]
    TypeNotFound(String),

    /// Type exists but has no method matching the name and binding flags
    #[error("Method not found: {type_name}::{method}")]
    MethodNotFound { type_name: String, method: String },

    /// Caller's view of the method signature differs from the slot's
    #[error("Signature mismatch on {method}: slot is `{expected}`, caller used `{found}`")]
    SignatureMismatch {
        method: String,
        expected: &'static str,
        found: &'static str,
    },

    /// Slot already carries a detour
    #[error("Method {0} is already detoured")]
    AlreadyDetoured(String),

    /// Host runtime already installed
    #[error("Host already initialized")]
    AlreadyInitialized,
}

/// Error type for reflective access to foreign objects
#[derive(Debug, thiserror::Error)]
pub enum ReflectError {
    #[error("Field not found: {type_name}.{field}")]
    FieldNotFound { type_name: String, field: String },

    #[error("Method not found: {type_name}.{method}")]
    MethodNotFound { type_name: String, method: String },

    #[error("Type mismatch for {member}: expected {expected}, found {found}")]
    TypeMismatch {
        member: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("Wrong argument count for {method}: expected {expected}, got {got}")]
    ArgumentCount {
        method: String,
        expected: usize,
        got: usize,
    },

    /// The foreign method itself reported a failure
    #[error("Invocation of {method} failed: {reason}")]
    Invocation { method: String, reason: String },
}
