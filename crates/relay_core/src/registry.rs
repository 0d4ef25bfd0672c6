//! Handle registry for keyboard edit sessions
//!
//! Sessions are keyed by a generation-checked [`SessionToken`]. Closing a
//! session removes its slot, so any token minted for it stops validating even
//! after the slot is reused by a later session. The raw handles are only
//! reachable through [`HandleRegistry::lookup`].

use relay_platform::{BridgeError, Result, SessionHandles};
use slotmap::{new_key_type, SlotMap};

new_key_type! {
    /// Opaque token for one open edit session
    pub struct SessionToken;
}

impl SessionToken {
    /// Convert to raw u64 for storage
    pub fn to_raw(&self) -> u64 {
        use slotmap::Key;
        self.data().as_ffi()
    }

    /// Reconstruct from raw u64
    pub fn from_raw(raw: u64) -> Self {
        slotmap::KeyData::from_ffi(raw).into()
    }
}

/// Tracks which engine handle triple is currently live
#[derive(Debug, Default)]
pub struct HandleRegistry {
    sessions: SlotMap<SessionToken, SessionHandles>,
    current: Option<SessionToken>,
}

impl HandleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handle triple as the open session
    ///
    /// Fails with [`BridgeError::AlreadyOpen`] while another session is open;
    /// the open session is left untouched.
    pub fn open(&mut self, handles: SessionHandles) -> Result<SessionToken> {
        if self.current.is_some() {
            return Err(BridgeError::AlreadyOpen);
        }
        let token = self.sessions.insert(handles);
        self.current = Some(token);
        tracing::debug!(token = token.to_raw(), ?handles, "session registered");
        Ok(token)
    }

    /// Release a session's handles
    ///
    /// Idempotent: an unknown or already-closed token is a no-op and
    /// returns `None`.
    pub fn close(&mut self, token: SessionToken) -> Option<SessionHandles> {
        let handles = self.sessions.remove(token)?;
        if self.current == Some(token) {
            self.current = None;
        }
        tracing::debug!(token = token.to_raw(), "session released");
        Some(handles)
    }

    /// Whether `token` refers to a live session
    pub fn is_open(&self, token: SessionToken) -> bool {
        self.sessions.contains_key(token)
    }

    /// Resolve `token` to its handles
    pub fn lookup(&self, token: SessionToken) -> Result<SessionHandles> {
        self.sessions
            .get(token)
            .copied()
            .ok_or_else(|| BridgeError::StaleHandle(format!("token {:#x}", token.to_raw())))
    }

    /// The live session, if any
    pub fn current(&self) -> Option<SessionToken> {
        self.current
    }
}
