//! Engine-side collaborator traits
//!
//! The native engine is single-threaded and not reentrant. Its entry points
//! are split by the thread that is allowed to call them:
//!
//! - [`Engine`] - render thread (initialize, tick)
//! - [`TouchSink`] - canonical touch stream
//! - [`EngineCallbacks`] - keyboard session callbacks, UI thread

use crate::error::Result;
use crate::handle::NativeHandle;

/// Arguments for the engine's one-time initialization
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EngineInit<'a> {
    /// Direct drawable-surface handle; `None` when the engine renders into
    /// the implicitly current context
    pub surface: Option<NativeHandle>,
    /// Asset source (e.g. an `AAssetManager*`)
    pub assets: NativeHandle,
    /// Graphics backend name, e.g. `"OpenGL"`
    pub graphics_backend: &'a str,
}

/// Render-loop entry points of the native engine
pub trait Engine {
    /// Initialize the engine for a freshly created surface
    fn initialize(&mut self, init: EngineInit<'_>) -> Result<()>;

    /// Run one frame at the given surface size
    fn tick(&mut self, width: i32, height: i32);

    /// Whether the engine asked to close its window
    fn should_close(&self) -> bool {
        false
    }

    /// Release engine resources
    fn shutdown(&mut self) {}
}

/// Touch entry points of the native engine
pub trait TouchSink {
    fn touch_begin(&mut self, id: i64, x: f32, y: f32);
    fn touch_move(&mut self, id: i64, x: f32, y: f32);
    fn touch_end(&mut self, id: i64);
}

/// Invokes engine callbacks bound to opaque callback handles
pub trait EngineCallbacks {
    /// Call `callback(text_field, text)`
    fn text_changed(&mut self, text_field: NativeHandle, callback: NativeHandle, text: &str);

    /// Call `callback(text_field, done)`
    fn finish_edit(&mut self, text_field: NativeHandle, callback: NativeHandle, done: bool);
}

impl<T: TouchSink + ?Sized> TouchSink for &mut T {
    fn touch_begin(&mut self, id: i64, x: f32, y: f32) {
        (**self).touch_begin(id, x, y)
    }

    fn touch_move(&mut self, id: i64, x: f32, y: f32) {
        (**self).touch_move(id, x, y)
    }

    fn touch_end(&mut self, id: i64) {
        (**self).touch_end(id)
    }
}

impl<T: Engine + ?Sized> Engine for Box<T> {
    fn initialize(&mut self, init: EngineInit<'_>) -> Result<()> {
        (**self).initialize(init)
    }

    fn tick(&mut self, width: i32, height: i32) {
        (**self).tick(width, height)
    }

    fn should_close(&self) -> bool {
        (**self).should_close()
    }

    fn shutdown(&mut self) {
        (**self).shutdown()
    }
}

impl<T: EngineCallbacks + ?Sized> EngineCallbacks for Box<T> {
    fn text_changed(&mut self, text_field: NativeHandle, callback: NativeHandle, text: &str) {
        (**self).text_changed(text_field, callback, text)
    }

    fn finish_edit(&mut self, text_field: NativeHandle, callback: NativeHandle, done: bool) {
        (**self).finish_edit(text_field, callback, done)
    }
}
