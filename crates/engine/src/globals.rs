//! Global host runtime storage
//!
//! The host bridge installs the runtime once during plugin load.
//! Access is thread-safe via OnceLock.

use std::sync::{Arc, OnceLock};
use std::thread::ThreadId;

use crate::error::HostError;
use crate::runtime::HostRuntime;

/// Global host state
pub struct HostGlobals {
    /// The host's runtime surface
    pub runtime: Arc<HostRuntime>,

    /// Thread the host dispatches its methods on
    pub main_thread_id: ThreadId,
}

/// Global host storage
static HOST: OnceLock<HostGlobals> = OnceLock::new();

/// Install the host runtime
///
/// Called once by the host bridge, on the host's main thread, before
/// `Init`. Returns an error if already initialized.
pub fn init_host(runtime: Arc<HostRuntime>) -> Result<(), HostError> {
    HOST.set(HostGlobals {
        runtime,
        main_thread_id: std::thread::current().id(),
    })
    .map_err(|_| HostError::AlreadyInitialized)?;

    tracing::info!("Host runtime installed");
    Ok(())
}

/// Get the host runtime, if installed
pub fn try_host() -> Option<&'static Arc<HostRuntime>> {
    HOST.get().map(|g| &g.runtime)
}

/// Check if the host runtime is installed
pub fn is_host_initialized() -> bool {
    HOST.get().is_some()
}

/// Check if current thread is the host's main thread
pub fn is_main_thread() -> bool {
    HOST.get()
        .map(|g| std::thread::current().id() == g.main_thread_id)
        .unwrap_or(false)
}
