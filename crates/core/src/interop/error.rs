//! Foreign interop errors

use rhud_engine::ReflectError;

/// The foreign extension is loaded but doesn't look the way we expect
#[derive(Debug, thiserror::Error)]
pub enum InteropError {
    #[error("Type {type_name} not found in module {module}")]
    TypeNotFound { module: String, type_name: String },

    #[error("Field not found: {type_name}.{field}")]
    FieldNotFound { type_name: String, field: String },

    #[error("Method not found: {type_name}.{method}")]
    MethodNotFound { type_name: String, method: String },

    #[error("Unexpected value for {member}: expected {expected}, found {found}")]
    UnexpectedValue {
        member: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error(transparent)]
    Reflect(#[from] ReflectError),

    /// Foreign code panicked while we were calling into it
    #[error("Panic while accessing {member}: {message}")]
    Panicked { member: String, message: String },

    #[error("Invalid reference width: {0}")]
    InvalidReference(f32),

    #[error("Invalid reported width: {0}")]
    InvalidSize(f32),
}
