//! Surface lifecycle and keyboard overlay events

use crate::handle::NativeHandle;

/// Drawing-surface lifecycle events, delivered on the render thread
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SurfaceEvent {
    /// A drawing surface (and its rendering context) was created
    Created {
        /// Drawable surface handle, when the platform hands one out
        surface: Option<NativeHandle>,
    },
    /// The surface was resized
    Changed {
        /// New width in physical pixels
        width: i32,
        /// New height in physical pixels
        height: i32,
    },
    /// Display refresh - time to tick
    DrawFrame,
    /// The surface and its context were lost
    Destroyed,
}

/// Input-method editor action
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EditorAction {
    /// Submit / done
    Done,
    /// Any other IME action (next, search, go, ...)
    Other(i32),
}

impl EditorAction {
    /// Decode an Android `EditorInfo.IME_ACTION_*` id
    pub fn from_android(action_id: i32) -> Self {
        const IME_ACTION_DONE: i32 = 6;
        match action_id {
            IME_ACTION_DONE => EditorAction::Done,
            other => EditorAction::Other(other),
        }
    }
}

/// Events raised by the keyboard overlay, delivered on the UI thread
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OverlayEvent {
    /// The displayed text changed
    TextChanged(String),
    /// The input-method editor fired an action
    EditorAction(EditorAction),
    /// The editing affordance gained or lost input focus
    FocusChanged(bool),
    /// Back navigation while the affordance has focus
    BackPressed,
}
