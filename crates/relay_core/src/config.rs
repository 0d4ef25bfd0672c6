//! Bridge configuration
//!
//! Every field has a default, so an empty document is a valid config:
//!
//! ```toml
//! graphics_backend = "OpenGL"
//! init_variant = "implicit-context"   # omit to detect from the platform
//!
//! [logging]
//! level = "debug"
//! tag = "RenderEngine"
//! ```

use relay_platform::{default_graphics_backend, BridgeError, InitVariant, Result};
use serde::Deserialize;

/// Bridge configuration
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    /// Backend name handed to the engine's `initialize`
    pub graphics_backend: String,
    /// Pin the initialization variant instead of detecting it
    pub init_variant: Option<InitVariant>,
    /// Logging setup
    pub logging: LogConfig,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            graphics_backend: default_graphics_backend().to_string(),
            init_variant: None,
            logging: LogConfig::default(),
        }
    }
}

impl BridgeConfig {
    /// Parse a TOML document
    pub fn from_toml_str(source: &str) -> Result<Self> {
        toml::from_str(source).map_err(|e| BridgeError::Config(e.to_string()))
    }

    /// The configured variant, or the detected one
    pub fn init_variant(&self) -> InitVariant {
        self.init_variant.unwrap_or_else(InitVariant::detect)
    }

    /// Set the graphics backend name
    pub fn graphics_backend(mut self, backend: impl Into<String>) -> Self {
        self.graphics_backend = backend.into();
        self
    }

    /// Pin the initialization variant
    pub fn with_init_variant(mut self, variant: InitVariant) -> Self {
        self.init_variant = Some(variant);
        self
    }

    /// Set the logging configuration
    pub fn logging(mut self, logging: LogConfig) -> Self {
        self.logging = logging;
        self
    }
}

/// Logging configuration
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Filter directive used when `RUST_LOG` is unset
    pub level: String,
    /// Tag for platform loggers that have one (Android logcat)
    pub tag: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            tag: "RenderEngine".to_string(),
        }
    }
}

impl LogConfig {
    pub fn new(level: impl Into<String>) -> Self {
        Self {
            level: level.into(),
            ..Default::default()
        }
    }

    /// Set the platform log tag
    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }
}
