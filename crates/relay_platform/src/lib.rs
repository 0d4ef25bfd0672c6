//! Relay Platform Vocabulary
//!
//! Platform-agnostic types shared by the bridge core and the platform
//! extensions that sit between a UI surface and a native engine.
//!
//! # Architecture
//!
//! The boundary is described by a handful of traits:
//!
//! - [`Engine`] - render-thread entry points (initialize, tick)
//! - [`TouchSink`] - canonical per-pointer touch stream
//! - [`EngineCallbacks`] - keyboard session callbacks behind opaque handles
//! - [`KeyboardSurface`] - the text-entry overlay on the UI side
//!
//! # Platform Implementations
//!
//! - `relay_platform_android` - JNI glue for `GLSurfaceView` + `EditText`
//! - `relay_platform_apple` - C ABI glue for the Apple launcher

mod engine;
mod error;
mod event;
mod handle;
mod input;
mod platform;
mod surface;

pub use engine::{Engine, EngineCallbacks, EngineInit, TouchSink};
pub use error::{BridgeError, Result};
pub use event::{EditorAction, OverlayEvent, SurfaceEvent};
pub use handle::{NativeHandle, SessionHandles};
pub use input::{Pointer, TouchAction, TouchEvent, TouchPhase};
pub use platform::{default_graphics_backend, InitVariant};
pub use surface::KeyboardSurface;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::engine::{Engine, EngineCallbacks, EngineInit, TouchSink};
    pub use crate::error::{BridgeError, Result};
    pub use crate::event::{EditorAction, OverlayEvent, SurfaceEvent};
    pub use crate::handle::{NativeHandle, SessionHandles};
    pub use crate::input::{Pointer, TouchAction, TouchEvent, TouchPhase};
    pub use crate::platform::InitVariant;
    pub use crate::surface::KeyboardSurface;
}
