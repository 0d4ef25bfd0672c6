//! Relay Core
//!
//! The stateful pieces of the bridge between an event-driven UI surface and
//! a single-threaded native engine:
//!
//! - [`registry`] - generation-checked table of a session's engine handles
//! - [`touch`] - stateless multi-pointer batch → per-pointer event translation
//! - [`keyboard`] - one-at-a-time text-entry session state machine
//! - [`frame`] - engine initialize/tick sequencing against the surface lifecycle
//!
//! ```text
//! platform touch batch ──▶ touch::dispatch ──────────▶ TouchSink
//! overlay events ────────▶ KeyboardBridge ─(registry)▶ EngineCallbacks
//! surface lifecycle ─────▶ FrameDriver ──────────────▶ Engine
//! ```
//!
//! # Example
//!
//! ```ignore
//! use relay_core::prelude::*;
//!
//! let mut driver = FrameDriver::new(engine, assets);
//! driver.on_surface_created(None)?;
//! driver.on_surface_changed(1080, 1920);
//! driver.on_draw_frame()?;
//! ```

pub mod config;
pub mod frame;
pub mod keyboard;
pub mod logging;
pub mod native;
pub mod registry;
pub mod touch;
pub mod ui_queue;

#[cfg(test)]
mod testing;

pub use config::{BridgeConfig, LogConfig};
pub use frame::{FrameDriver, SurfaceLifecycleState};
pub use keyboard::{KeyboardBridge, KeyboardCommand, KeyboardPoster};
pub use logging::init_logging;
pub use registry::{HandleRegistry, SessionToken};
pub use touch::MotionBatch;
pub use ui_queue::{UiPoster, UiTaskQueue};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::config::{BridgeConfig, LogConfig};
    pub use crate::frame::{FrameDriver, SurfaceLifecycleState};
    pub use crate::keyboard::{KeyboardBridge, KeyboardCommand, KeyboardPoster};
    pub use crate::registry::{HandleRegistry, SessionToken};
    pub use crate::touch::MotionBatch;
    pub use relay_platform::prelude::*;
}
