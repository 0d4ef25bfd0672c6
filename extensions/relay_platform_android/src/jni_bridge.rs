//! JNI entry points for the GLSurfaceView renderer and the keyboard overlay
//!
//! # Usage from Java
//!
//! ```java
//! package com.relay.engine;
//!
//! public final class EngineFramework {
//!     static { System.loadLibrary("relay_platform_android"); }
//!
//!     static native boolean nativeConfigure(String toml);
//!     static native void nativeSurfaceCreated(AssetManager assets);
//!     static native void nativeSurfaceChanged(int width, int height);
//!     static native void nativeDrawFrame();
//!     static native void nativeSurfaceDestroyed();
//!     static native void nativeTouchEvent(int actionMasked, int actionIndex,
//!                                         int[] ids, float[] xs, float[] ys);
//!     static native boolean nativeShouldClose();
//!     static native void nativeShutdown();
//! }
//! ```
//!
//! The `GLSurfaceView.Renderer` callbacks call the surface methods on the GL
//! thread. `onTouchEvent` must forward through `queueEvent` so touches reach
//! the engine on that same thread.
//!
//! `NativeKeyboardView` calls `nativeAttach(this)` once it is in the view
//! tree and forwards its listeners to the `nativeOn*` methods on the UI
//! thread. The engine requests the overlay from any thread through
//! [`relay_android_show_keyboard`] and [`relay_android_hide_keyboard`].

use std::ffi::{c_char, c_void, CStr};
use std::sync::{Mutex, MutexGuard, OnceLock, TryLockError};

use jni::objects::{JClass, JFloatArray, JIntArray, JObject, JString};
use jni::sys::{jboolean, jint, JNI_FALSE, JNI_TRUE};
use jni::JNIEnv;
use relay_core::native::{HandleCallbacks, NativeEngine};
use relay_core::{BridgeConfig, FrameDriver, KeyboardBridge, KeyboardPoster, MotionBatch};
use relay_platform::{EditorAction, NativeHandle, SessionHandles, TouchAction};
use tracing::{debug, error, info, warn};

use crate::input::pointers_from_arrays;
use crate::keyboard_view::JniKeyboardSurface;
use crate::logging::init_android_logging;

type AndroidKeyboard = KeyboardBridge<JniKeyboardSurface, HandleCallbacks>;

static CONFIG: OnceLock<BridgeConfig> = OnceLock::new();
static RENDERER: Mutex<Option<FrameDriver<NativeEngine>>> = Mutex::new(None);
static KEYBOARD: Mutex<Option<AndroidKeyboard>> = Mutex::new(None);
static KEYBOARD_POSTER: Mutex<Option<KeyboardPoster>> = Mutex::new(None);

#[link(name = "android")]
extern "C" {
    fn AAssetManager_fromJava(env: *mut jni::sys::JNIEnv, asset_manager: jni::sys::jobject)
        -> *mut c_void;
}

fn config() -> &'static BridgeConfig {
    CONFIG.get_or_init(BridgeConfig::default)
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn throw_state_error(env: &mut JNIEnv, message: &str) {
    if let Err(e) = env.throw_new("java/lang/IllegalStateException", message) {
        error!("Failed to throw: {}", e);
    }
}

// ============================================================================
// Renderer
// ============================================================================

/// Apply a TOML bridge configuration
///
/// Must run before the first surface is created; later calls are ignored.
///
/// # JNI Signature
/// `(Ljava/lang/String;)Z`
#[no_mangle]
pub extern "system" fn Java_com_relay_engine_EngineFramework_nativeConfigure(
    mut env: JNIEnv,
    _class: JClass,
    toml: JString,
) -> jboolean {
    let source: String = match env.get_string(&toml) {
        Ok(s) => s.into(),
        Err(e) => {
            warn!("Failed to read configuration string: {}", e);
            return JNI_FALSE;
        }
    };

    let parsed = match BridgeConfig::from_toml_str(&source) {
        Ok(parsed) => parsed,
        Err(e) => {
            // logging is not up yet; logcat still gets the exception
            let message = e.to_string();
            throw_state_error(&mut env, &message);
            return JNI_FALSE;
        }
    };

    init_android_logging(&parsed.logging);
    if CONFIG.set(parsed).is_err() {
        warn!("bridge already configured; new configuration ignored");
        return JNI_FALSE;
    }
    JNI_TRUE
}

/// `GLSurfaceView.Renderer.onSurfaceCreated`
///
/// # JNI Signature
/// `(Landroid/content/res/AssetManager;)V`
#[no_mangle]
pub extern "system" fn Java_com_relay_engine_EngineFramework_nativeSurfaceCreated(
    mut env: JNIEnv,
    _class: JClass,
    asset_manager: JObject,
) {
    let config = config();
    init_android_logging(&config.logging);

    // SAFETY: `asset_manager` is a live android.content.res.AssetManager
    // local reference for the duration of this call.
    let assets = unsafe { AAssetManager_fromJava(env.get_raw(), asset_manager.as_raw()) };
    let assets = NativeHandle::from_ptr(assets);
    if assets.is_none() {
        warn!("AAssetManager_fromJava returned null");
    }

    let mut renderer = lock(&RENDERER);
    let driver = renderer
        .get_or_insert_with(|| FrameDriver::with_config(NativeEngine, assets, config));

    // the GL context is implicit on this thread
    if let Err(e) = driver.on_surface_created(None) {
        error!("Surface initialization failed: {}", e);
        let message = e.to_string();
        drop(renderer);
        throw_state_error(&mut env, &message);
    }
}

/// `GLSurfaceView.Renderer.onSurfaceChanged`
///
/// # JNI Signature
/// `(II)V`
#[no_mangle]
pub extern "system" fn Java_com_relay_engine_EngineFramework_nativeSurfaceChanged(
    _env: JNIEnv,
    _class: JClass,
    width: jint,
    height: jint,
) {
    match lock(&RENDERER).as_mut() {
        Some(driver) => driver.on_surface_changed(width, height),
        None => debug!("surface changed before creation: {}x{}", width, height),
    }
}

/// `GLSurfaceView.Renderer.onDrawFrame`
///
/// A frame before initialization throws `IllegalStateException`.
///
/// # JNI Signature
/// `()V`
#[no_mangle]
pub extern "system" fn Java_com_relay_engine_EngineFramework_nativeDrawFrame(
    mut env: JNIEnv,
    _class: JClass,
) {
    let result = match lock(&RENDERER).as_mut() {
        Some(driver) => driver.on_draw_frame(),
        None => Err(relay_platform::BridgeError::Precondition(
            "draw frame before the surface was created".to_string(),
        )),
    };

    if let Err(e) = result {
        error!("{}", e);
        throw_state_error(&mut env, &e.to_string());
    }
}

/// `SurfaceHolder.Callback.surfaceDestroyed`
///
/// # JNI Signature
/// `()V`
#[no_mangle]
pub extern "system" fn Java_com_relay_engine_EngineFramework_nativeSurfaceDestroyed(
    _env: JNIEnv,
    _class: JClass,
) {
    if let Some(driver) = lock(&RENDERER).as_mut() {
        driver.on_surface_destroyed();
    }
}

/// Forward one `MotionEvent`, flattened to parallel pointer arrays
///
/// # JNI Signature
/// `(II[I[F[F)V`
#[no_mangle]
pub extern "system" fn Java_com_relay_engine_EngineFramework_nativeTouchEvent(
    env: JNIEnv,
    _class: JClass,
    action_masked: jint,
    action_index: jint,
    ids: JIntArray,
    xs: JFloatArray,
    ys: JFloatArray,
) {
    let Some(action) = TouchAction::from_android(action_masked) else {
        return;
    };
    let Ok(action_index) = usize::try_from(action_index) else {
        warn!("negative action index: {}", action_index);
        return;
    };

    let read = || -> jni::errors::Result<_> {
        let len = env.get_array_length(&ids)? as usize;
        let mut id_buf = vec![0; len];
        env.get_int_array_region(&ids, 0, &mut id_buf)?;

        let len = env.get_array_length(&xs)?.min(env.get_array_length(&ys)?) as usize;
        let mut x_buf = vec![0.0; len];
        let mut y_buf = vec![0.0; len];
        env.get_float_array_region(&xs, 0, &mut x_buf)?;
        env.get_float_array_region(&ys, 0, &mut y_buf)?;
        Ok((id_buf, x_buf, y_buf))
    };
    let (id_buf, x_buf, y_buf) = match read() {
        Ok(arrays) => arrays,
        Err(e) => {
            warn!("Failed to read touch arrays: {}", e);
            return;
        }
    };

    let pointers = pointers_from_arrays(&id_buf, &x_buf, &y_buf);
    let batch = MotionBatch::new(action, action_index, &pointers);

    match lock(&RENDERER).as_mut() {
        Some(driver) => {
            relay_core::touch::dispatch(&batch, driver.engine_mut());
        }
        None => debug!("touch before surface creation dropped"),
    }
}

/// # JNI Signature
/// `()Z`
#[no_mangle]
pub extern "system" fn Java_com_relay_engine_EngineFramework_nativeShouldClose(
    _env: JNIEnv,
    _class: JClass,
) -> jboolean {
    let close = lock(&RENDERER)
        .as_ref()
        .map_or(false, |driver| driver.should_close());
    if close {
        JNI_TRUE
    } else {
        JNI_FALSE
    }
}

/// Tear the engine down; the driver is dropped afterwards
///
/// # JNI Signature
/// `()V`
#[no_mangle]
pub extern "system" fn Java_com_relay_engine_EngineFramework_nativeShutdown(
    _env: JNIEnv,
    _class: JClass,
) {
    if let Some(mut driver) = lock(&RENDERER).take() {
        driver.shutdown();
        info!("renderer shut down");
    }
}

// ============================================================================
// Keyboard overlay
// ============================================================================

/// Bind the bridge to a `NativeKeyboardView`
///
/// A second attach (activity recreation) replaces the previous view and
/// abandons any open session without notifying the engine.
///
/// # JNI Signature
/// `()V` (instance method)
#[no_mangle]
pub extern "system" fn Java_com_relay_engine_NativeKeyboardView_nativeAttach(
    mut env: JNIEnv,
    this: JObject,
) {
    init_android_logging(&config().logging);

    let attached = JniKeyboardSurface::new(&mut env, &this).and_then(|surface| {
        let waker = JniKeyboardSurface::waker(&mut env)?;
        let mut bridge = KeyboardBridge::new(surface, HandleCallbacks);
        bridge.set_waker(waker);
        Ok(bridge)
    });

    match attached {
        Ok(bridge) => {
            *lock(&KEYBOARD_POSTER) = Some(bridge.poster());
            if lock(&KEYBOARD).replace(bridge).is_some() {
                info!("keyboard view replaced");
            }
        }
        Err(e) => error!("Failed to attach keyboard view: {}", e),
    }
}

/// Drain engine show/hide requests; scheduled by `postRunPending`
///
/// # JNI Signature
/// `()V`
#[no_mangle]
pub extern "system" fn Java_com_relay_engine_NativeKeyboardView_nativeRunPending(
    _env: JNIEnv,
    _this: JObject,
) {
    if let Some(bridge) = lock(&KEYBOARD).as_mut() {
        for rejected in bridge.run_pending() {
            debug!("keyboard request rejected: {}", rejected);
        }
    }
}

/// Runs `f` on the bridge unless it is busy
///
/// The bridge is held while it updates the view, and the view's listeners
/// fire synchronously from those updates. Such echoes are dropped here; the
/// bridge has already applied the corresponding effect itself.
fn with_idle_keyboard<R>(f: impl FnOnce(&mut AndroidKeyboard) -> R) -> Option<R> {
    let mut guard = match KEYBOARD.try_lock() {
        Ok(guard) => guard,
        Err(TryLockError::Poisoned(poisoned)) => poisoned.into_inner(),
        Err(TryLockError::WouldBlock) => return None,
    };
    guard.as_mut().map(f)
}

/// `TextWatcher.afterTextChanged`
///
/// # JNI Signature
/// `(Ljava/lang/String;)V`
#[no_mangle]
pub extern "system" fn Java_com_relay_engine_NativeKeyboardView_nativeOnTextChanged(
    mut env: JNIEnv,
    _this: JObject,
    text: JString,
) {
    let text: String = match env.get_string(&text) {
        Ok(s) => s.into(),
        Err(e) => {
            warn!("Failed to read edited text: {}", e);
            return;
        }
    };
    with_idle_keyboard(|bridge| bridge.on_text_changed(&text));
}

/// `OnEditorActionListener.onEditorAction`
///
/// # JNI Signature
/// `(I)Z`
#[no_mangle]
pub extern "system" fn Java_com_relay_engine_NativeKeyboardView_nativeOnEditorAction(
    _env: JNIEnv,
    _this: JObject,
    action_id: jint,
) -> jboolean {
    let action = EditorAction::from_android(action_id);
    match with_idle_keyboard(|bridge| bridge.on_editor_action(action)) {
        Some(true) => JNI_TRUE,
        _ => JNI_FALSE,
    }
}

/// `OnFocusChangeListener.onFocusChange`
///
/// # JNI Signature
/// `(Z)V`
#[no_mangle]
pub extern "system" fn Java_com_relay_engine_NativeKeyboardView_nativeOnFocusChanged(
    _env: JNIEnv,
    _this: JObject,
    has_focus: jboolean,
) {
    with_idle_keyboard(|bridge| bridge.on_focus_changed(has_focus != JNI_FALSE));
}

/// `onKeyPreIme` with `KEYCODE_BACK`
///
/// Returns whether the key was consumed; without an attached bridge it is
/// left to the activity.
///
/// # JNI Signature
/// `()Z`
#[no_mangle]
pub extern "system" fn Java_com_relay_engine_NativeKeyboardView_nativeOnBackPressed(
    _env: JNIEnv,
    _this: JObject,
) -> jboolean {
    match with_idle_keyboard(|bridge| bridge.on_back_pressed()) {
        Some(true) => JNI_TRUE,
        _ => JNI_FALSE,
    }
}

// ============================================================================
// Engine-facing C ABI
// ============================================================================

/// Ask for the keyboard overlay; returns immediately
///
/// # Safety
///
/// `text` must be null or a NUL-terminated UTF-8 string. The three handles
/// must stay valid until the engine's finish callback runs.
#[no_mangle]
pub unsafe extern "C" fn relay_android_show_keyboard(
    text: *const c_char,
    text_field: *mut c_void,
    on_text_changed: *mut c_void,
    on_finish: *mut c_void,
) {
    let text = if text.is_null() {
        String::new()
    } else {
        CStr::from_ptr(text).to_string_lossy().into_owned()
    };
    let handles = SessionHandles::new(
        NativeHandle::from_ptr(text_field),
        NativeHandle::from_ptr(on_text_changed),
        NativeHandle::from_ptr(on_finish),
    );

    match lock(&KEYBOARD_POSTER).as_ref() {
        Some(poster) => poster.show_keyboard(text, handles),
        None => warn!("show keyboard before the overlay was attached"),
    }
}

/// Ask for the open session to finish with `done`; returns immediately
#[no_mangle]
pub extern "C" fn relay_android_hide_keyboard(done: bool) {
    match lock(&KEYBOARD_POSTER).as_ref() {
        Some(poster) => poster.hide_keyboard(done),
        None => warn!("hide keyboard before the overlay was attached"),
    }
}
