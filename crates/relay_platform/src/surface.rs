//! UI-surface collaborator trait

/// The text-entry overlay the keyboard bridge drives
///
/// Implemented by platform-specific views (an Android `EditText`, a UIKit
/// text field). All methods are called on the UI thread.
pub trait KeyboardSurface {
    /// Pre-populate the affordance with `text` and enable it
    fn display(&mut self, text: &str);

    /// Give the affordance input focus
    fn request_focus(&mut self);

    /// Take input focus away from the affordance
    fn clear_focus(&mut self);

    /// Bring up the software keyboard
    fn show_soft_input(&mut self);

    /// Dismiss the software keyboard
    fn hide_soft_input(&mut self);
}

impl<T: KeyboardSurface + ?Sized> KeyboardSurface for Box<T> {
    fn display(&mut self, text: &str) {
        (**self).display(text)
    }

    fn request_focus(&mut self) {
        (**self).request_focus()
    }

    fn clear_focus(&mut self) {
        (**self).clear_focus()
    }

    fn show_soft_input(&mut self) {
        (**self).show_soft_input()
    }

    fn hide_soft_input(&mut self) {
        (**self).hide_soft_input()
    }
}
