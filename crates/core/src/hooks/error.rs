//! Hook registration errors

use rhud_engine::HostError;

/// A name given at registration could not be resolved
#[derive(Debug, thiserror::Error)]
pub enum ResolutionError {
    #[error("Host type not found: {0}")]
    TypeNotFound(String),

    /// No instance method with this name, public or not
    #[error("Instance method not found: {type_name}::{method}")]
    MethodNotFound { type_name: String, method: String },

    #[error("Replacement not found: {0}")]
    ReplacementNotFound(String),
}

/// Error type for hook operations
#[derive(Debug, thiserror::Error)]
pub enum HookError {
    #[error(transparent)]
    Resolution(#[from] ResolutionError),

    /// Replacement does not take the original's receiver, arguments and return
    #[error("Signature mismatch hooking {target} with {replacement}: target is `{expected}`, replacement handles `{found}`")]
    SignatureMismatch {
        target: String,
        replacement: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("{type_name}::{method} is already hooked")]
    AlreadyHooked { type_name: String, method: String },

    #[error("Failed to install detour: {0}")]
    DetourInstall(#[from] HostError),

    #[error("Hook not found")]
    NotFound,
}
