//! Keyboard overlay over the launcher's C callbacks
//!
//! The launcher owns the `UITextField`. It registers callbacks that the
//! bridge uses to show and dismiss it, and reports edits back:
//!
//! ```text
//! Engine: relay_apple_show_keyboard(text, field, onChanged, onFinish)
//!              │ (posted)
//!              ▼
//! Launcher run loop: relay_apple_run_pending()
//!              │
//!              ▼
//! show callback(text)  ──►  textField.text = text; becomeFirstResponder()
//!
//! Launcher: editingChanged  ──►  relay_apple_keyboard_text_changed(text)
//!           return / dismiss ──►  relay_apple_keyboard_finish_edit(done)
//! ```
//!
//! # Swift Side
//!
//! ```swift
//! @_cdecl("relay_show_text_field")
//! func relayShowTextField(text: UnsafePointer<CChar>) {
//!     KeyboardOverlay.shared.present(String(cString: text))
//! }
//!
//! relay_apple_set_show_keyboard_callback(relayShowTextField)
//! ```

use std::ffi::{c_char, c_void, CStr, CString};
use std::sync::{Mutex, MutexGuard, OnceLock, TryLockError};

use relay_core::native::HandleCallbacks;
use relay_core::{KeyboardBridge, KeyboardPoster};
use relay_platform::{KeyboardSurface, NativeHandle, SessionHandles};
use tracing::{debug, warn};

/// `void (*)(const char* text)`; present the field pre-filled with `text`
pub type ShowKeyboardFn = extern "C" fn(text: *const c_char);

/// `void (*)(void)`; resign the field's first responder
pub type HideKeyboardFn = extern "C" fn();

/// Text field presented through launcher callbacks
///
/// Presenting the field also focuses it and raises the keyboard, and
/// dismissing it lowers the keyboard, so the focus and soft-input calls
/// have nothing further to do.
#[derive(Debug, Default)]
pub struct AppleKeyboardSurface {
    show: Option<ShowKeyboardFn>,
    hide: Option<HideKeyboardFn>,
}

impl AppleKeyboardSurface {
    pub fn set_show_callback(&mut self, callback: Option<ShowKeyboardFn>) {
        self.show = callback;
    }

    pub fn set_hide_callback(&mut self, callback: Option<HideKeyboardFn>) {
        self.hide = callback;
    }
}

impl KeyboardSurface for AppleKeyboardSurface {
    fn display(&mut self, text: &str) {
        let Some(show) = self.show else {
            warn!("no show-keyboard callback registered");
            return;
        };
        let text = CString::new(text).unwrap_or_else(|e| {
            let mut bytes = e.into_vec();
            bytes.retain(|&b| b != 0);
            CString::new(bytes).unwrap_or_default()
        });
        show(text.as_ptr());
    }

    fn request_focus(&mut self) {}

    fn clear_focus(&mut self) {
        match self.hide {
            Some(hide) => hide(),
            None => debug!("no hide-keyboard callback registered"),
        }
    }

    fn show_soft_input(&mut self) {}

    fn hide_soft_input(&mut self) {}
}

type AppleKeyboard = KeyboardBridge<AppleKeyboardSurface, HandleCallbacks>;

/// The bridge plus a poster taken from it at construction
///
/// Engine callbacks post while the main thread holds the bridge, so posting
/// must never touch the bridge lock.
struct AppleBridge {
    bridge: Mutex<AppleKeyboard>,
    poster: KeyboardPoster,
}

static KEYBOARD: OnceLock<AppleBridge> = OnceLock::new();

fn keyboard() -> &'static AppleBridge {
    KEYBOARD.get_or_init(|| {
        let bridge = KeyboardBridge::new(AppleKeyboardSurface::default(), HandleCallbacks);
        AppleBridge {
            poster: bridge.poster(),
            bridge: Mutex::new(bridge),
        }
    })
}

fn lock_keyboard() -> MutexGuard<'static, AppleKeyboard> {
    keyboard()
        .bridge
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn poster() -> &'static KeyboardPoster {
    &keyboard().poster
}

/// Runs `f` unless the bridge is busy calling into the launcher
fn with_idle_keyboard<R>(f: impl FnOnce(&mut AppleKeyboard) -> R) -> Option<R> {
    let mut guard = match keyboard().bridge.try_lock() {
        Ok(guard) => guard,
        Err(TryLockError::Poisoned(poisoned)) => poisoned.into_inner(),
        Err(TryLockError::WouldBlock) => {
            debug!("keyboard busy; launcher notification dropped");
            return None;
        }
    };
    Some(f(&mut guard))
}

// ============================================================================
// FFI Exports
// ============================================================================

/// Register how the bridge presents the text field; null unregisters
#[no_mangle]
pub extern "C" fn relay_apple_set_show_keyboard_callback(callback: Option<ShowKeyboardFn>) {
    lock_keyboard().surface_mut().set_show_callback(callback);
}

/// Register how the bridge dismisses the text field; null unregisters
#[no_mangle]
pub extern "C" fn relay_apple_set_hide_keyboard_callback(callback: Option<HideKeyboardFn>) {
    lock_keyboard().surface_mut().set_hide_callback(callback);
}

/// Engine request to open an edit session; returns immediately
///
/// # Safety
///
/// `text` must be null or a NUL-terminated UTF-8 string. The three handles
/// must stay valid until the engine's finish callback runs.
#[no_mangle]
pub unsafe extern "C" fn relay_apple_show_keyboard(
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
    poster().show_keyboard(
        text,
        SessionHandles::new(
            NativeHandle::from_ptr(text_field),
            NativeHandle::from_ptr(on_text_changed),
            NativeHandle::from_ptr(on_finish),
        ),
    );
}

/// Engine request to finish the open session; returns immediately
#[no_mangle]
pub extern "C" fn relay_apple_hide_keyboard(done: bool) {
    poster().hide_keyboard(done);
}

/// Drain posted show/hide requests on the main thread
///
/// Returns how many requests were rejected.
#[no_mangle]
pub extern "C" fn relay_apple_run_pending() -> u32 {
    let rejected = lock_keyboard().run_pending();
    for err in &rejected {
        debug!("keyboard request rejected: {}", err);
    }
    rejected.len() as u32
}

/// The text field's contents changed
///
/// # Safety
///
/// `text` must be null or a NUL-terminated UTF-8 string.
#[no_mangle]
pub unsafe extern "C" fn relay_apple_keyboard_text_changed(text: *const c_char) -> bool {
    if text.is_null() {
        return false;
    }
    let text = CStr::from_ptr(text).to_string_lossy();
    with_idle_keyboard(|bridge| bridge.on_text_changed(&text)).unwrap_or(false)
}

/// The user submitted (`done`) or dismissed the text field
#[no_mangle]
pub extern "C" fn relay_apple_keyboard_finish_edit(done: bool) -> bool {
    with_idle_keyboard(|bridge| bridge.hide_keyboard(done)).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use relay_core::native::{FinishEditFn, TextChangedFn};

    static SHOWN: Mutex<Vec<String>> = Mutex::new(Vec::new());
    static HIDDEN: Mutex<u32> = Mutex::new(0);
    static EDITS: Mutex<Vec<(u64, String)>> = Mutex::new(Vec::new());
    static FINISHED: Mutex<Vec<(u64, bool)>> = Mutex::new(Vec::new());

    extern "C" fn record_show(text: *const c_char) {
        let text = unsafe { CStr::from_ptr(text) }.to_string_lossy().into_owned();
        SHOWN.lock().unwrap().push(text);
    }

    extern "C" fn record_hide() {
        *HIDDEN.lock().unwrap() += 1;
    }

    unsafe extern "C" fn record_edit(field: *mut c_void, text: *const c_char) {
        let text = CStr::from_ptr(text).to_string_lossy().into_owned();
        EDITS.lock().unwrap().push((field as u64, text));
    }

    unsafe extern "C" fn record_finish(field: *mut c_void, done: bool) {
        FINISHED.lock().unwrap().push((field as u64, done));
    }

    #[test]
    fn test_surface_strips_nul() {
        static STRIPPED: Mutex<Vec<String>> = Mutex::new(Vec::new());
        extern "C" fn record(text: *const c_char) {
            let text = unsafe { CStr::from_ptr(text) }.to_string_lossy().into_owned();
            STRIPPED.lock().unwrap().push(text);
        }

        let mut surface = AppleKeyboardSurface::default();
        surface.display("ignored without callback");
        surface.set_show_callback(Some(record));
        surface.display("a\0b");
        assert_eq!(*STRIPPED.lock().unwrap(), vec!["ab".to_string()]);
    }

    // Exercises the process-wide bridge, so the whole flow is one test
    #[test]
    fn test_session_through_exports() {
        relay_apple_set_show_keyboard_callback(Some(record_show));
        relay_apple_set_hide_keyboard_callback(Some(record_hide));

        let text = CString::new("hello").unwrap();
        let field = 42usize as *mut c_void;
        unsafe {
            relay_apple_show_keyboard(
                text.as_ptr(),
                field,
                record_edit as TextChangedFn as *mut c_void,
                record_finish as FinishEditFn as *mut c_void,
            );
            relay_apple_show_keyboard(
                text.as_ptr(),
                field,
                record_edit as TextChangedFn as *mut c_void,
                record_finish as FinishEditFn as *mut c_void,
            );
        }
        // nothing runs until the main thread drains
        assert!(SHOWN.lock().unwrap().is_empty());
        assert_eq!(relay_apple_run_pending(), 1);
        assert_eq!(*SHOWN.lock().unwrap(), vec!["hello".to_string()]);

        let echo = CString::new("hello").unwrap();
        let edited = CString::new("hello!").unwrap();
        unsafe {
            assert!(!relay_apple_keyboard_text_changed(echo.as_ptr()));
            assert!(relay_apple_keyboard_text_changed(edited.as_ptr()));
            assert!(!relay_apple_keyboard_text_changed(std::ptr::null()));
        }
        assert_eq!(*EDITS.lock().unwrap(), vec![(42, "hello!".to_string())]);

        assert!(relay_apple_keyboard_finish_edit(true));
        assert!(!relay_apple_keyboard_finish_edit(true));
        assert_eq!(*FINISHED.lock().unwrap(), vec![(42, true)]);
        assert_eq!(*HIDDEN.lock().unwrap(), 1);

        // posting while the bridge is held must not wait on it
        {
            let _held = lock_keyboard();
            relay_apple_hide_keyboard(false);
        }
        // a posted hide with nothing open is a no-op
        assert_eq!(relay_apple_run_pending(), 0);
        assert_eq!(FINISHED.lock().unwrap().len(), 1);
    }
}
