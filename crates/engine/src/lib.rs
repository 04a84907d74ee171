//! ReloadedHUD Engine - Host Runtime Surface
//!
//! This crate models what the interception layer can see of the closed host:
//! - Per-type method tables whose slots can be detoured
//! - Name-based member lookup with binding flags
//! - Loaded extension modules and live component instances
//! - Reflective access to objects owned by foreign extensions
//!
//! # Architecture
//!
//! The host bridge builds a [`HostRuntime`] and installs it via
//! [`init_host`]. Host code dispatches its own instance methods through
//! [`HostRuntime::invoke`], which always goes through the method slot, so a
//! detour installed in the slot observes every call.
//!
//! # Thread Safety
//!
//! The host dispatches on a single main thread. Slots and snapshots are
//! still lock-protected so the runtime can be shared as `Arc<HostRuntime>`.

pub mod error;
pub mod flags;
pub mod globals;
pub mod host_type;
pub mod method;
pub mod module;
pub mod reflect;
pub mod runtime;

pub use error::{HostError, ReflectError};
pub use flags::MemberFlags;
pub use globals::{init_host, is_host_initialized, is_main_thread, try_host, HostGlobals};
pub use host_type::{HostType, HostTypeBuilder};
pub use method::{ErasedMethod, MethodFn, MethodSlot, Signature};
pub use module::LoadedModule;
pub use reflect::{DynamicObject, FieldInfo, MethodInfo, ObjectRef, Reflect, TypeInfo, Value};
pub use runtime::HostRuntime;
