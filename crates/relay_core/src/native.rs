//! Bindings to the native engine's C ABI
//!
//! [`HandleCallbacks`] invokes keyboard callbacks through the engine function
//! pointers carried in a session's handles. [`NativeEngine`] (feature
//! `native-engine`) binds [`Engine`] and [`TouchSink`] to the `relay_engine_*`
//! symbols of the engine library:
//!
//! ```c
//! bool relay_engine_initialize(void* surface, void* assets, const char* graphics_backend);
//! void relay_engine_tick(int width, int height);
//! bool relay_engine_should_close(void);
//! void relay_engine_shutdown(void);
//! void relay_engine_touch_down(unsigned long long id, float x, float y);
//! void relay_engine_touch_move(unsigned long long id, float x, float y);
//! void relay_engine_touch_up(unsigned long long id);
//! ```

use std::ffi::{c_char, c_void, CString};

use relay_platform::{EngineCallbacks, NativeHandle};

#[cfg(feature = "native-engine")]
use relay_platform::{BridgeError, Engine, EngineInit, Result, TouchSink};

/// `void (*)(void* textField, const char* text)`
pub type TextChangedFn = unsafe extern "C" fn(text_field: *mut c_void, text: *const c_char);

/// `void (*)(void* textField, bool done)`
pub type FinishEditFn = unsafe extern "C" fn(text_field: *mut c_void, done: bool);

/// Calls engine callbacks by reinterpreting their handles as function pointers
///
/// Only ever fed handles the registry validated for the open session; the
/// engine keeps those alive until it receives `finish_edit`.
#[derive(Debug, Default, Clone, Copy)]
pub struct HandleCallbacks;

impl EngineCallbacks for HandleCallbacks {
    fn text_changed(&mut self, text_field: NativeHandle, callback: NativeHandle, text: &str) {
        if callback.is_none() {
            tracing::debug!("session has no text-changed callback");
            return;
        }
        let Ok(text) = CString::new(text) else {
            tracing::warn!("edited text contains NUL; notification dropped");
            return;
        };
        // SAFETY: `callback` is the engine's `TextChangedFn`, registered with
        // the open session and live until the session finishes.
        unsafe {
            let callback = std::mem::transmute::<*mut c_void, TextChangedFn>(callback.as_ptr());
            callback(text_field.as_ptr(), text.as_ptr());
        }
    }

    fn finish_edit(&mut self, text_field: NativeHandle, callback: NativeHandle, done: bool) {
        if callback.is_none() {
            tracing::debug!("session has no finish callback");
            return;
        }
        // SAFETY: as above, for the session's `FinishEditFn`.
        unsafe {
            let callback = std::mem::transmute::<*mut c_void, FinishEditFn>(callback.as_ptr());
            callback(text_field.as_ptr(), done);
        }
    }
}

#[cfg(feature = "native-engine")]
extern "C" {
    fn relay_engine_initialize(
        surface: *mut c_void,
        assets: *mut c_void,
        graphics_backend: *const c_char,
    ) -> bool;
    fn relay_engine_tick(width: std::ffi::c_int, height: std::ffi::c_int);
    fn relay_engine_should_close() -> bool;
    fn relay_engine_shutdown();
    fn relay_engine_touch_down(id: u64, x: f32, y: f32);
    fn relay_engine_touch_move(id: u64, x: f32, y: f32);
    fn relay_engine_touch_up(id: u64);
}

/// The linked native engine
#[cfg(feature = "native-engine")]
#[derive(Debug, Default, Clone, Copy)]
pub struct NativeEngine;

#[cfg(feature = "native-engine")]
impl Engine for NativeEngine {
    fn initialize(&mut self, init: EngineInit<'_>) -> Result<()> {
        let backend = CString::new(init.graphics_backend)
            .map_err(|_| BridgeError::EngineInit("backend name contains NUL".to_string()))?;
        let surface = init.surface.unwrap_or(NativeHandle::NONE);

        // SAFETY: plain C call; the pointers are owned by the platform and
        // outlive initialization.
        let ok = unsafe {
            relay_engine_initialize(surface.as_ptr(), init.assets.as_ptr(), backend.as_ptr())
        };
        if ok {
            Ok(())
        } else {
            Err(BridgeError::EngineInit(format!(
                "relay_engine_initialize({}) returned false",
                init.graphics_backend
            )))
        }
    }

    fn tick(&mut self, width: i32, height: i32) {
        unsafe { relay_engine_tick(width, height) }
    }

    fn should_close(&self) -> bool {
        unsafe { relay_engine_should_close() }
    }

    fn shutdown(&mut self) {
        unsafe { relay_engine_shutdown() }
    }
}

#[cfg(feature = "native-engine")]
impl TouchSink for NativeEngine {
    fn touch_begin(&mut self, id: i64, x: f32, y: f32) {
        unsafe { relay_engine_touch_down(id as u64, x, y) }
    }

    fn touch_move(&mut self, id: i64, x: f32, y: f32) {
        unsafe { relay_engine_touch_move(id as u64, x, y) }
    }

    fn touch_end(&mut self, id: i64) {
        unsafe { relay_engine_touch_up(id as u64) }
    }
}
