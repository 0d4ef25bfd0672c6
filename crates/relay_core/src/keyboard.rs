//! Keyboard session bridge
//!
//! Governs one text-editing session between the UI overlay and the engine:
//!
//! ```text
//!            show_keyboard(text, handles)
//!   Closed ───────────────────────────────▶ Open ──┐ on_text_changed
//!     ▲                                       │  ◀─┘   → text_changed(onChanged)
//!     └──────────── hide_keyboard(done) ──────┘
//!                   → finish_edit(onFinish, done)
//! ```
//!
//! The engine asks for show/hide from its own thread through a
//! [`KeyboardPoster`]; the commands run when the UI thread calls
//! [`KeyboardBridge::run_pending`]. Overlay callbacks (`on_*`) are called on
//! the UI thread directly.

use relay_platform::{
    BridgeError, EditorAction, EngineCallbacks, KeyboardSurface, OverlayEvent, Result,
    SessionHandles,
};

use crate::registry::{HandleRegistry, SessionToken};
use crate::ui_queue::{UiPoster, UiTaskQueue};

/// A show/hide request posted to the UI thread
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum KeyboardCommand {
    /// Open a session pre-populated with `text`
    Show {
        text: String,
        handles: SessionHandles,
    },
    /// Close the open session
    Hide { done: bool },
}

/// Engine-side handle for posting keyboard commands
pub type KeyboardPoster = UiPoster<KeyboardCommand>;

impl UiPoster<KeyboardCommand> {
    /// Request a session; returns immediately
    pub fn show_keyboard(&self, text: impl Into<String>, handles: SessionHandles) {
        self.post(KeyboardCommand::Show {
            text: text.into(),
            handles,
        });
    }

    /// Request the open session be closed; returns immediately
    pub fn hide_keyboard(&self, done: bool) {
        self.post(KeyboardCommand::Hide { done });
    }
}

/// The single live edit session
#[derive(Debug)]
struct EditSession {
    token: SessionToken,
    text: String,
    /// The overlay has yet to echo the text it was pre-populated with
    awaiting_echo: bool,
}

/// Text-entry session state machine
pub struct KeyboardBridge<S, C> {
    surface: S,
    callbacks: C,
    registry: HandleRegistry,
    session: Option<EditSession>,
    queue: UiTaskQueue<KeyboardCommand>,
}

impl<S: KeyboardSurface, C: EngineCallbacks> KeyboardBridge<S, C> {
    /// Create a closed bridge driving `surface` and reporting through `callbacks`
    pub fn new(surface: S, callbacks: C) -> Self {
        Self {
            surface,
            callbacks,
            registry: HandleRegistry::new(),
            session: None,
            queue: UiTaskQueue::new(),
        }
    }

    /// Set how posters wake the UI loop
    ///
    /// Call before handing out posters.
    pub fn set_waker(&mut self, waker: impl Fn() + Send + Sync + 'static) {
        self.queue.set_waker(waker);
    }

    /// Poster for engine-thread show/hide requests
    pub fn poster(&self) -> KeyboardPoster {
        self.queue.poster()
    }

    /// Run every posted command, in order
    ///
    /// Returns the commands that were rejected (a `Show` while a session is
    /// open). Rejections leave the open session in place.
    pub fn run_pending(&mut self) -> Vec<BridgeError> {
        let mut rejected = Vec::new();
        for command in self.queue.take_pending() {
            match command {
                KeyboardCommand::Show { text, handles } => {
                    if let Err(err) = self.show_keyboard(&text, handles) {
                        tracing::warn!(%err, ?handles, "show keyboard rejected");
                        rejected.push(err);
                    }
                }
                KeyboardCommand::Hide { done } => {
                    self.hide_keyboard(done);
                }
            }
        }
        rejected
    }

    /// Open a session and bring up the overlay
    pub fn show_keyboard(&mut self, text: &str, handles: SessionHandles) -> Result<SessionToken> {
        let token = self.registry.open(handles)?;
        self.session = Some(EditSession {
            token,
            text: text.to_owned(),
            awaiting_echo: true,
        });

        self.surface.display(text);
        self.surface.request_focus();
        self.surface.show_soft_input();

        tracing::info!(token = token.to_raw(), len = text.len(), "keyboard session opened");
        Ok(token)
    }

    /// Finish the open session with `done`, then drop the overlay's focus
    ///
    /// Returns whether a session was closed. With no open session this is a
    /// no-op and no callback is invoked.
    pub fn hide_keyboard(&mut self, done: bool) -> bool {
        let Some(session) = self.session.take() else {
            tracing::debug!(done, "hide keyboard with no open session");
            return false;
        };

        match self.registry.lookup(session.token) {
            Ok(handles) => {
                self.callbacks
                    .finish_edit(handles.text_field, handles.on_finish, done);
            }
            Err(err) => tracing::debug!(%err, "finish notification dropped"),
        }
        self.registry.close(session.token);

        self.surface.clear_focus();
        self.surface.hide_soft_input();

        tracing::info!(token = session.token.to_raw(), done, "keyboard session closed");
        true
    }

    /// The overlay's text changed
    ///
    /// Returns whether the change was relayed to the engine.
    pub fn on_text_changed(&mut self, text: &str) -> bool {
        let Some(session) = self.session.as_mut() else {
            tracing::debug!("text change with no open session");
            return false;
        };

        let handles = match self.registry.lookup(session.token) {
            Ok(handles) => handles,
            Err(err) => {
                tracing::debug!(%err, "text notification dropped");
                return false;
            }
        };

        if handles.text_field.is_none() {
            return false;
        }

        // Pre-populating the overlay echoes once; every later change is an edit
        let echo = std::mem::replace(&mut session.awaiting_echo, false);
        if echo && session.text == text {
            return false;
        }

        session.text.clear();
        session.text.push_str(text);
        self.callbacks
            .text_changed(handles.text_field, handles.on_text_changed, text);
        true
    }

    /// The input-method editor fired an action
    ///
    /// Returns whether the action was consumed.
    pub fn on_editor_action(&mut self, action: EditorAction) -> bool {
        match action {
            EditorAction::Done => {
                self.hide_keyboard(true);
                true
            }
            EditorAction::Other(_) => false,
        }
    }

    /// Back navigation while the overlay has focus
    ///
    /// Always consumed so the activity does not navigate away mid-edit.
    pub fn on_back_pressed(&mut self) -> bool {
        self.hide_keyboard(false);
        true
    }

    /// The overlay's focus changed
    ///
    /// Only toggles the software keyboard; the session stays as it is.
    pub fn on_focus_changed(&mut self, has_focus: bool) {
        if has_focus {
            self.surface.show_soft_input();
        } else {
            self.surface.hide_soft_input();
        }
    }

    /// Route one overlay event to its handler, returning whether it was consumed
    pub fn handle_overlay_event(&mut self, event: OverlayEvent) -> bool {
        match event {
            OverlayEvent::TextChanged(text) => self.on_text_changed(&text),
            OverlayEvent::EditorAction(action) => self.on_editor_action(action),
            OverlayEvent::FocusChanged(has_focus) => {
                self.on_focus_changed(has_focus);
                false
            }
            OverlayEvent::BackPressed => self.on_back_pressed(),
        }
    }

    /// Whether a session is open
    pub fn is_open(&self) -> bool {
        self.session.is_some()
    }

    /// Token of the open session
    pub fn current_token(&self) -> Option<SessionToken> {
        self.session.as_ref().map(|s| s.token)
    }

    /// Text of the open session as last seen
    pub fn current_text(&self) -> Option<&str> {
        self.session.as_ref().map(|s| s.text.as_str())
    }

    /// The session registry
    pub fn registry(&self) -> &HandleRegistry {
        &self.registry
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn callbacks(&self) -> &C {
        &self.callbacks
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{CallbackCall, RecordingCallbacks, RecordingSurface, SurfaceCall};
    use relay_platform::NativeHandle;

    fn bridge() -> KeyboardBridge<RecordingSurface, RecordingCallbacks> {
        KeyboardBridge::new(RecordingSurface::default(), RecordingCallbacks::default())
    }

    fn handles() -> SessionHandles {
        SessionHandles::new(42u64, 7u64, 8u64)
    }

    #[test]
    fn test_show_drives_surface() {
        let mut bridge = bridge();
        bridge.show_keyboard("hello", handles()).unwrap();
        assert!(bridge.is_open());
        assert_eq!(bridge.current_text(), Some("hello"));
        assert_eq!(
            bridge.surface().calls,
            vec![
                SurfaceCall::Display("hello".into()),
                SurfaceCall::RequestFocus,
                SurfaceCall::ShowSoftInput,
            ]
        );
    }

    #[test]
    fn test_show_while_open_keeps_first_session() {
        let mut bridge = bridge();
        let first = bridge.show_keyboard("a", handles()).unwrap();
        let other = SessionHandles::new(1u64, 2u64, 3u64);
        assert_eq!(
            bridge.show_keyboard("b", other),
            Err(BridgeError::AlreadyOpen)
        );
        assert_eq!(bridge.current_token(), Some(first));
        assert_eq!(bridge.current_text(), Some("a"));

        assert!(bridge.on_text_changed("ab"));
        assert_eq!(
            bridge.callbacks().calls,
            vec![CallbackCall::TextChanged(42, 7, "ab".into())]
        );
    }

    #[test]
    fn test_text_change_without_session_dropped() {
        let mut bridge = bridge();
        assert!(!bridge.on_text_changed("x"));
        assert!(bridge.callbacks().calls.is_empty());
    }

    #[test]
    fn test_sentinel_field_suppresses_notifications() {
        let mut bridge = bridge();
        let handles = SessionHandles {
            text_field: NativeHandle::NONE,
            ..handles()
        };
        bridge.show_keyboard("", handles).unwrap();
        assert!(!bridge.on_text_changed("typed"));
        assert!(bridge.callbacks().calls.is_empty());
    }

    #[test]
    fn test_programmatic_echo_not_relayed() {
        let mut bridge = bridge();
        bridge.show_keyboard("hello", handles()).unwrap();
        assert!(!bridge.on_text_changed("hello"));
        assert!(bridge.callbacks().calls.is_empty());
    }

    #[test]
    fn test_edit_back_to_same_text_is_relayed() {
        let mut bridge = bridge();
        bridge.show_keyboard("ab", handles()).unwrap();
        assert!(!bridge.on_text_changed("ab"));
        // Selecting "b" and typing "b" again leaves the text unchanged
        assert!(bridge.on_text_changed("ab"));
        assert_eq!(
            bridge.callbacks().calls,
            vec![CallbackCall::TextChanged(42, 7, "ab".into())]
        );
    }

    #[test]
    fn test_first_edit_without_echo_is_relayed() {
        let mut bridge = bridge();
        bridge.show_keyboard("ab", handles()).unwrap();
        assert!(bridge.on_text_changed("abc"));
        assert!(bridge.on_text_changed("ab"));
        assert_eq!(bridge.callbacks().calls.len(), 2);
    }

    #[test]
    fn test_hide_finishes_once() {
        let mut bridge = bridge();
        let token = bridge.show_keyboard("x", handles()).unwrap();
        assert!(bridge.hide_keyboard(false));
        assert!(!bridge.hide_keyboard(true));
        assert!(!bridge.registry().is_open(token));
        assert_eq!(
            bridge.callbacks().calls,
            vec![CallbackCall::FinishEdit(42, 8, false)]
        );
        assert!(bridge
            .surface()
            .calls
            .ends_with(&[SurfaceCall::ClearFocus, SurfaceCall::HideSoftInput]));
    }

    #[test]
    fn test_text_after_close_dropped() {
        let mut bridge = bridge();
        bridge.show_keyboard("x", handles()).unwrap();
        bridge.hide_keyboard(true);
        assert!(!bridge.on_text_changed("late"));
        assert_eq!(bridge.callbacks().calls.len(), 1);
    }

    #[test]
    fn test_ui_triggers() {
        let mut bridge = bridge();
        bridge.show_keyboard("x", handles()).unwrap();
        assert!(!bridge.on_editor_action(EditorAction::Other(5)));
        assert!(bridge.is_open());
        assert!(bridge.on_back_pressed());
        assert!(!bridge.is_open());

        bridge.show_keyboard("y", handles()).unwrap();
        assert!(bridge.handle_overlay_event(OverlayEvent::EditorAction(EditorAction::Done)));
        assert_eq!(
            bridge.callbacks().calls,
            vec![
                CallbackCall::FinishEdit(42, 8, false),
                CallbackCall::FinishEdit(42, 8, true),
            ]
        );
    }

    #[test]
    fn test_focus_loss_only_hides_soft_input() {
        let mut bridge = bridge();
        bridge.show_keyboard("x", handles()).unwrap();
        bridge.on_focus_changed(false);
        assert!(bridge.is_open());
        assert_eq!(bridge.surface().calls.last(), Some(&SurfaceCall::HideSoftInput));
        bridge.on_focus_changed(true);
        assert_eq!(bridge.surface().calls.last(), Some(&SurfaceCall::ShowSoftInput));
        assert!(bridge.callbacks().calls.is_empty());
    }

    #[test]
    fn test_posted_commands_run_on_drain() {
        let mut bridge = bridge();
        let poster = bridge.poster();
        poster.show_keyboard("a", handles());
        poster.show_keyboard("b", SessionHandles::new(1u64, 2u64, 3u64));
        assert!(!bridge.is_open());

        let rejected = bridge.run_pending();
        assert_eq!(rejected, vec![BridgeError::AlreadyOpen]);
        assert_eq!(bridge.current_text(), Some("a"));

        poster.hide_keyboard(true);
        assert!(bridge.run_pending().is_empty());
        assert!(!bridge.is_open());
    }
}
