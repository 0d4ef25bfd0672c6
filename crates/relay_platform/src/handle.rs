//! Opaque native handles
//!
//! A [`NativeHandle`] is a pointer-sized value that only the native engine can
//! interpret (a text-field pointer, a callback function pointer, an asset
//! manager, a drawable surface). The bridge stores, compares and passes these
//! back; it never dereferences them outside the platform extensions.

use std::ffi::c_void;
use std::fmt;

/// Opaque engine-owned handle, carried across the boundary as an integer
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct NativeHandle(u64);

impl NativeHandle {
    /// The "no handle" sentinel
    pub const NONE: NativeHandle = NativeHandle(0);

    /// Wrap a raw handle value
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Wrap a native pointer
    pub fn from_ptr(ptr: *const c_void) -> Self {
        Self(ptr as usize as u64)
    }

    /// Raw value, for passing back across the boundary
    pub const fn raw(self) -> u64 {
        self.0
    }

    /// Raw value as a native pointer
    pub fn as_ptr(self) -> *mut c_void {
        self.0 as usize as *mut c_void
    }

    /// Whether this is the sentinel
    pub const fn is_none(self) -> bool {
        self.0 == 0
    }

    /// Whether this refers to something
    pub const fn is_some(self) -> bool {
        self.0 != 0
    }
}

impl From<i64> for NativeHandle {
    fn from(raw: i64) -> Self {
        Self(raw as u64)
    }
}

impl From<u64> for NativeHandle {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

impl fmt::Debug for NativeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_none() {
            write!(f, "NativeHandle(none)")
        } else {
            write!(f, "NativeHandle({:#x})", self.0)
        }
    }
}

/// The handle triple an edit session is opened with
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct SessionHandles {
    /// The engine's text field
    pub text_field: NativeHandle,
    /// Callback invoked with the edited text
    pub on_text_changed: NativeHandle,
    /// Callback invoked once with the completion flag
    pub on_finish: NativeHandle,
}

impl SessionHandles {
    pub fn new(
        text_field: impl Into<NativeHandle>,
        on_text_changed: impl Into<NativeHandle>,
        on_finish: impl Into<NativeHandle>,
    ) -> Self {
        Self {
            text_field: text_field.into(),
            on_text_changed: on_text_changed.into(),
            on_finish: on_finish.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentinel() {
        assert!(NativeHandle::NONE.is_none());
        assert!(NativeHandle::default().is_none());
        assert!(NativeHandle::from_raw(42).is_some());
        assert!(NativeHandle::from_ptr(std::ptr::null()).is_none());
    }

    #[test]
    fn test_jlong_round_trip_keeps_bits() {
        let handle = NativeHandle::from(-8i64);
        assert_eq!(handle.raw() as i64, -8);
    }
}
