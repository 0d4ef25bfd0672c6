//! Touch input types

/// Action kind of a multi-touch gesture batch
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TouchAction {
    /// First pointer went down
    Down,
    /// One or more pointers moved
    Move,
    /// Last pointer went up
    Up,
    /// The gesture was cancelled by the system
    Cancel,
    /// An additional pointer went down
    PointerDown,
    /// A non-last pointer went up
    PointerUp,
}

impl TouchAction {
    /// Decode an Android `MotionEvent.getActionMasked()` value
    ///
    /// Codes outside the six gesture actions (`ACTION_OUTSIDE`, hover and
    /// scroll codes) return `None`.
    pub fn from_android(action_masked: i32) -> Option<Self> {
        const ACTION_DOWN: i32 = 0;
        const ACTION_UP: i32 = 1;
        const ACTION_MOVE: i32 = 2;
        const ACTION_CANCEL: i32 = 3;
        const ACTION_POINTER_DOWN: i32 = 5;
        const ACTION_POINTER_UP: i32 = 6;

        match action_masked {
            ACTION_DOWN => Some(TouchAction::Down),
            ACTION_UP => Some(TouchAction::Up),
            ACTION_MOVE => Some(TouchAction::Move),
            ACTION_CANCEL => Some(TouchAction::Cancel),
            ACTION_POINTER_DOWN => Some(TouchAction::PointerDown),
            ACTION_POINTER_UP => Some(TouchAction::PointerUp),
            _ => None,
        }
    }

    /// Map a per-touch phase (UIKit style) onto a batch action
    ///
    /// Each UIKit touch arrives on its own, so a began touch is a
    /// `PointerDown` of a one-pointer batch and an ended one a `PointerUp`.
    pub fn from_phase(phase: TouchPhase) -> Self {
        match phase {
            TouchPhase::Began => TouchAction::PointerDown,
            TouchPhase::Moved => TouchAction::Move,
            TouchPhase::Ended => TouchAction::PointerUp,
            TouchPhase::Cancelled => TouchAction::Cancel,
        }
    }

    /// Whether the triggering pointer starts a contact
    pub fn is_begin(self) -> bool {
        matches!(self, TouchAction::Down | TouchAction::PointerDown)
    }

    /// Whether the triggering pointer finishes a contact
    pub fn is_end(self) -> bool {
        matches!(
            self,
            TouchAction::Up | TouchAction::Cancel | TouchAction::PointerUp
        )
    }
}

/// Touch phase as reported by per-touch platforms
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TouchPhase {
    Began,
    Moved,
    Ended,
    Cancelled,
}

impl TouchPhase {
    /// Decode the raw phase value passed over the C boundary
    pub fn from_raw(raw: i32) -> Option<Self> {
        match raw {
            0 => Some(TouchPhase::Began),
            1 => Some(TouchPhase::Moved),
            2 => Some(TouchPhase::Ended),
            3 => Some(TouchPhase::Cancelled),
            _ => None,
        }
    }
}

/// One tracked touch contact
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pointer {
    /// Platform-assigned id, stable while the contact is down
    pub id: i64,
    /// X position in surface pixels
    pub x: f32,
    /// Y position in surface pixels
    pub y: f32,
}

impl Pointer {
    pub fn new(id: i64, x: f32, y: f32) -> Self {
        Self { id, x, y }
    }
}

/// Canonical per-pointer touch event delivered to the engine
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TouchEvent {
    /// A contact started
    Began { id: i64, x: f32, y: f32 },
    /// A contact is at a new absolute position
    Moved { id: i64, x: f32, y: f32 },
    /// A contact finished (lifted or cancelled)
    Ended { id: i64 },
}

impl TouchEvent {
    /// Get the pointer id
    pub fn id(&self) -> i64 {
        match self {
            TouchEvent::Began { id, .. } => *id,
            TouchEvent::Moved { id, .. } => *id,
            TouchEvent::Ended { id } => *id,
        }
    }

    /// Get the position (returns None for Ended)
    pub fn position(&self) -> Option<(f32, f32)> {
        match self {
            TouchEvent::Began { x, y, .. } => Some((*x, *y)),
            TouchEvent::Moved { x, y, .. } => Some((*x, *y)),
            TouchEvent::Ended { .. } => None,
        }
    }
}
