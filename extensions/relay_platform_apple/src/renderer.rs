//! Frame driver exports for the Metal launcher
//!
//! The launcher hands over its `CAMetalLayer` (or `MTKView`) when the view
//! loads and ticks from its draw callback:
//!
//! ```swift
//! relay_apple_initialize(Unmanaged.passUnretained(metalLayer).toOpaque(), assetsPtr)
//!
//! func draw(in view: MTKView) {
//!     let size = view.drawableSize
//!     if !relay_apple_tick(Int32(size.width), Int32(size.height)) { fatalError() }
//!     relay_apple_run_pending()
//! }
//! ```

use std::ffi::c_void;
use std::sync::{Mutex, MutexGuard};

use relay_core::native::NativeEngine;
use relay_core::{FrameDriver, MotionBatch};
use relay_platform::{NativeHandle, Pointer, TouchAction, TouchPhase};
use tracing::{debug, error, info, warn};

use crate::config;

static RENDERER: Mutex<Option<FrameDriver<NativeEngine>>> = Mutex::new(None);

fn lock() -> MutexGuard<'static, Option<FrameDriver<NativeEngine>>> {
    RENDERER.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Initialize the engine against `surface`
///
/// Returns `false` if no surface was given or the engine refused.
#[no_mangle]
pub extern "C" fn relay_apple_initialize(surface: *mut c_void, assets: *mut c_void) -> bool {
    let config = config();
    relay_core::init_logging(&config.logging);

    let mut renderer = lock();
    let driver = renderer.get_or_insert_with(|| {
        FrameDriver::with_config(NativeEngine, NativeHandle::from_ptr(assets), config)
    });

    let surface = NativeHandle::from_ptr(surface);
    match driver.on_surface_created(surface.is_some().then_some(surface)) {
        Ok(()) => true,
        Err(e) => {
            error!("Surface initialization failed: {}", e);
            false
        }
    }
}

#[no_mangle]
pub extern "C" fn relay_apple_surface_changed(width: i32, height: i32) {
    match lock().as_mut() {
        Some(driver) => driver.on_surface_changed(width, height),
        None => debug!("surface changed before initialization: {}x{}", width, height),
    }
}

/// Render one frame at `width` x `height`
///
/// Returns `false` on a contract violation (tick before initialize).
#[no_mangle]
pub extern "C" fn relay_apple_tick(width: i32, height: i32) -> bool {
    let mut renderer = lock();
    let Some(driver) = renderer.as_mut() else {
        error!("tick before initialize");
        return false;
    };

    if driver.size() != (width, height) {
        driver.on_surface_changed(width, height);
    }
    match driver.on_draw_frame() {
        Ok(()) => true,
        Err(e) => {
            error!("{}", e);
            false
        }
    }
}

#[no_mangle]
pub extern "C" fn relay_apple_surface_destroyed() {
    if let Some(driver) = lock().as_mut() {
        driver.on_surface_destroyed();
    }
}

/// Forward one `UITouch`
///
/// `phase` is 0 began, 1 moved, 2 ended, 3 cancelled. Stationary touches
/// are not forwarded.
#[no_mangle]
pub extern "C" fn relay_apple_touch(phase: i32, id: i64, x: f32, y: f32) {
    let Some(phase) = TouchPhase::from_raw(phase) else {
        warn!("unknown touch phase: {}", phase);
        return;
    };
    let pointers = [Pointer::new(id, x, y)];
    let batch = MotionBatch::new(TouchAction::from_phase(phase), 0, &pointers);

    match lock().as_mut() {
        Some(driver) => {
            relay_core::touch::dispatch(&batch, driver.engine_mut());
        }
        None => debug!("touch before initialization dropped"),
    }
}

#[no_mangle]
pub extern "C" fn relay_apple_should_close() -> bool {
    lock().as_ref().map_or(false, |driver| driver.should_close())
}

#[no_mangle]
pub extern "C" fn relay_apple_shutdown() {
    if let Some(mut driver) = lock().take() {
        driver.shutdown();
        info!("renderer shut down");
    }
}
