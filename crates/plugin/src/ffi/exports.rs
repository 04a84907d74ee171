//! C-compatible exports called by the host bridge

use std::ffi::c_char;

use tracing::instrument;

use rhud_core::{CoreConfig, PatchOutcome};
use rhud_engine::try_host;

use crate::logging::init_logging;
use crate::state::PluginError;

// Plugin metadata - static strings with null terminators for C compatibility
static AUTHOR: &[u8] = b"ReloadedHUD contributors\0";
static NAME: &[u8] = b"ReloadedHUD\0";
static DESCRIPTION: &[u8] = b"HUD fades and edit mode for pause, cutscenes and death\0";
static URL: &[u8] = b"https://github.com/reloadedhud/reloadedhud-rs\0";
static LICENSE: &[u8] = b"MIT\0";
static VERSION: &[u8] = b"0.1.0\0";
static LOG_TAG: &[u8] = b"RHUD\0";

/// `Init` phase: install every hook
///
/// Must run before the host can call any hooked method. Returns false and
/// writes a message into `error` when a hook can't be installed.
///
/// # Safety
/// - `error` must be a valid pointer to a buffer of at least `maxlen` bytes, or null
#[no_mangle]
#[instrument(skip_all)]
pub unsafe extern "C" fn rust_plugin_init(error: *mut c_char, maxlen: usize) -> bool {
    let (config, config_error) = match CoreConfig::load() {
        Ok(config) => (config, None),
        Err(e) => (CoreConfig::default(), Some(e)),
    };

    init_logging(config.debug);
    tracing::info!("ReloadedHUD loading...");

    if let Some(e) = config_error {
        tracing::warn!("Failed to load config, using defaults: {}", e);
    }

    let Some(host) = try_host() else {
        tracing::error!("Host runtime not installed before Init");
        write_error(error, maxlen, &PluginError::HostMissing.to_string());
        return false;
    };

    match crate::init(host, config) {
        Ok(()) => {
            tracing::info!("ReloadedHUD loaded successfully!");
            true
        }
        Err(e) => {
            tracing::error!("Init failed: {}", e);
            write_error(error, maxlen, &format!("Init error: {}", e));
            false
        }
    }
}

/// `PostInit` phase: reposition foreign panels
///
/// Only fails when called without a successful `Init`; anything going wrong
/// with a foreign extension is logged and ignored.
#[no_mangle]
#[instrument(skip_all)]
pub extern "C" fn rust_plugin_post_init() -> bool {
    let Some(host) = try_host() else {
        tracing::error!("Host runtime not installed before PostInit");
        return false;
    };

    match crate::post_init(host) {
        Ok(PatchOutcome::Patched(position)) => {
            tracing::debug!("PostInit patched layout: {:?}", position);
            true
        }
        Ok(outcome) => {
            tracing::debug!("PostInit finished: {:?}", outcome);
            true
        }
        Err(e) => {
            tracing::error!("PostInit failed: {}", e);
            false
        }
    }
}

// Metadata exports - these return static strings for the mod loader to display

#[no_mangle]
pub extern "C" fn rust_get_author() -> *const c_char {
    AUTHOR.as_ptr() as *const c_char
}

#[no_mangle]
pub extern "C" fn rust_get_name() -> *const c_char {
    NAME.as_ptr() as *const c_char
}

#[no_mangle]
pub extern "C" fn rust_get_description() -> *const c_char {
    DESCRIPTION.as_ptr() as *const c_char
}

#[no_mangle]
pub extern "C" fn rust_get_url() -> *const c_char {
    URL.as_ptr() as *const c_char
}

#[no_mangle]
pub extern "C" fn rust_get_license() -> *const c_char {
    LICENSE.as_ptr() as *const c_char
}

#[no_mangle]
pub extern "C" fn rust_get_version() -> *const c_char {
    VERSION.as_ptr() as *const c_char
}

#[no_mangle]
pub extern "C" fn rust_get_log_tag() -> *const c_char {
    LOG_TAG.as_ptr() as *const c_char
}

/// Helper to write an error message to a C buffer
///
/// # Safety
/// - `error` must be a valid pointer or null
/// - `maxlen` must accurately reflect the buffer size
unsafe fn write_error(error: *mut c_char, maxlen: usize, msg: &str) {
    if !error.is_null() && maxlen > 0 {
        let bytes = msg.as_bytes();
        let len = bytes.len().min(maxlen - 1);
        std::ptr::copy_nonoverlapping(bytes.as_ptr(), error as *mut u8, len);
        *error.add(len) = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::CStr;

    #[test]
    fn test_write_error_truncates() {
        let mut buf = [0x7f as c_char; 8];
        unsafe { write_error(buf.as_mut_ptr(), buf.len(), "host runtime missing") };

        let msg = unsafe { CStr::from_ptr(buf.as_ptr()) };
        assert_eq!(msg.to_str().unwrap(), "host ru");
    }

    #[test]
    fn test_write_error_null_buffer() {
        unsafe { write_error(std::ptr::null_mut(), 64, "ignored") };
    }

    #[test]
    fn test_metadata_strings_are_terminated() {
        for ptr in [
            rust_get_author(),
            rust_get_name(),
            rust_get_description(),
            rust_get_url(),
            rust_get_license(),
            rust_get_version(),
            rust_get_log_tag(),
        ] {
            let s = unsafe { CStr::from_ptr(ptr) };
            assert!(!s.to_bytes().is_empty());
        }
        let name = unsafe { CStr::from_ptr(rust_get_name()) };
        assert_eq!(name.to_str().unwrap(), "ReloadedHUD");
    }
}
