//! Relay Apple Platform
//!
//! C ABI for an iOS/macOS launcher embedding the engine in a Metal view.
//! The launcher initializes with its surface handle, ticks from its draw
//! callback, forwards touches one at a time, and presents a text field when
//! the bridge asks for the keyboard.
//!
//! The renderer exports link against the engine and are only built for
//! Apple targets; the keyboard exports build everywhere.

use std::ffi::{c_char, CStr};
use std::sync::OnceLock;

use relay_core::BridgeConfig;

pub mod keyboard;
#[cfg(any(target_os = "ios", target_os = "macos"))]
pub mod renderer;

pub use keyboard::{AppleKeyboardSurface, HideKeyboardFn, ShowKeyboardFn};

static CONFIG: OnceLock<BridgeConfig> = OnceLock::new();

/// Bridge configuration, defaulted if the launcher never configured it
pub fn config() -> &'static BridgeConfig {
    CONFIG.get_or_init(BridgeConfig::default)
}

/// Apply a TOML bridge configuration before initializing
///
/// Returns `false` if it does not parse or a configuration is already in
/// effect.
///
/// # Safety
///
/// `toml` must be null or a NUL-terminated string.
#[no_mangle]
pub unsafe extern "C" fn relay_apple_configure(toml: *const c_char) -> bool {
    if toml.is_null() {
        return false;
    }
    let source = CStr::from_ptr(toml).to_string_lossy();
    match BridgeConfig::from_toml_str(&source) {
        Ok(parsed) => {
            relay_core::init_logging(&parsed.logging);
            if CONFIG.set(parsed).is_err() {
                tracing::warn!("bridge already configured; new configuration ignored");
                return false;
            }
            true
        }
        Err(e) => {
            relay_core::init_logging(&config().logging);
            tracing::error!("{}", e);
            false
        }
    }
}
