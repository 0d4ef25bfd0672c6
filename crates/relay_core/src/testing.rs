//! Recording fakes for the engine and UI collaborators

use relay_platform::{
    BridgeError, Engine, EngineCallbacks, EngineInit, KeyboardSurface, NativeHandle, Result,
    TouchSink,
};

#[derive(Clone, Debug, PartialEq)]
pub enum EngineCall {
    Initialize {
        surface: Option<u64>,
        assets: u64,
        backend: String,
    },
    Tick(i32, i32),
    TouchBegin(i64, f32, f32),
    TouchMove(i64, f32, f32),
    TouchEnd(i64),
    Shutdown,
}

#[derive(Debug, Default)]
pub struct RecordingEngine {
    pub calls: Vec<EngineCall>,
    pub init_error: Option<String>,
    pub close_requested: bool,
}

impl RecordingEngine {
    pub fn ticks(&self) -> Vec<(i32, i32)> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                EngineCall::Tick(w, h) => Some((*w, *h)),
                _ => None,
            })
            .collect()
    }

    pub fn init_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, EngineCall::Initialize { .. }))
            .count()
    }
}

impl Engine for RecordingEngine {
    fn initialize(&mut self, init: EngineInit<'_>) -> Result<()> {
        if let Some(err) = &self.init_error {
            return Err(BridgeError::EngineInit(err.clone()));
        }
        self.calls.push(EngineCall::Initialize {
            surface: init.surface.map(NativeHandle::raw),
            assets: init.assets.raw(),
            backend: init.graphics_backend.to_string(),
        });
        Ok(())
    }

    fn tick(&mut self, width: i32, height: i32) {
        self.calls.push(EngineCall::Tick(width, height));
    }

    fn should_close(&self) -> bool {
        self.close_requested
    }

    fn shutdown(&mut self) {
        self.calls.push(EngineCall::Shutdown);
    }
}

impl TouchSink for RecordingEngine {
    fn touch_begin(&mut self, id: i64, x: f32, y: f32) {
        self.calls.push(EngineCall::TouchBegin(id, x, y));
    }

    fn touch_move(&mut self, id: i64, x: f32, y: f32) {
        self.calls.push(EngineCall::TouchMove(id, x, y));
    }

    fn touch_end(&mut self, id: i64) {
        self.calls.push(EngineCall::TouchEnd(id));
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CallbackCall {
    /// field, callback, text
    TextChanged(u64, u64, String),
    /// field, callback, done
    FinishEdit(u64, u64, bool),
}

#[derive(Debug, Default)]
pub struct RecordingCallbacks {
    pub calls: Vec<CallbackCall>,
}

impl EngineCallbacks for RecordingCallbacks {
    fn text_changed(&mut self, text_field: NativeHandle, callback: NativeHandle, text: &str) {
        self.calls.push(CallbackCall::TextChanged(
            text_field.raw(),
            callback.raw(),
            text.to_string(),
        ));
    }

    fn finish_edit(&mut self, text_field: NativeHandle, callback: NativeHandle, done: bool) {
        self.calls
            .push(CallbackCall::FinishEdit(text_field.raw(), callback.raw(), done));
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SurfaceCall {
    Display(String),
    RequestFocus,
    ClearFocus,
    ShowSoftInput,
    HideSoftInput,
}

#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub calls: Vec<SurfaceCall>,
    pub text: String,
    pub focused: bool,
}

impl KeyboardSurface for RecordingSurface {
    fn display(&mut self, text: &str) {
        self.text = text.to_string();
        self.calls.push(SurfaceCall::Display(text.to_string()));
    }

    fn request_focus(&mut self) {
        self.focused = true;
        self.calls.push(SurfaceCall::RequestFocus);
    }

    fn clear_focus(&mut self) {
        self.focused = false;
        self.calls.push(SurfaceCall::ClearFocus);
    }

    fn show_soft_input(&mut self) {
        self.calls.push(SurfaceCall::ShowSoftInput);
    }

    fn hide_soft_input(&mut self) {
        self.calls.push(SurfaceCall::HideSoftInput);
    }
}
