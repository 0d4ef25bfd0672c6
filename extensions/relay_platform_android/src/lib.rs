//! Relay Android Platform
//!
//! JNI glue between a Java `GLSurfaceView`/`EditText` front end and the
//! native engine. The renderer entry points drive a
//! [`FrameDriver`](relay_core::FrameDriver) on the GL thread; the keyboard
//! entry points drive a [`KeyboardBridge`](relay_core::KeyboardBridge) on the
//! UI thread.
//!
//! Only [`input`] and [`logging`] build off-device, so the batch assembly
//! and level mapping can be tested on the host.

pub mod input;
pub mod logging;

#[cfg(target_os = "android")]
pub mod jni_bridge;
#[cfg(target_os = "android")]
pub mod keyboard_view;

pub use input::{pointers_from_arrays, PointerBatch};
