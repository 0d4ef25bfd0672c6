//! Frame driver
//!
//! Sequences engine initialization against the drawing surface's lifecycle
//! and drives one engine tick per display refresh. All methods run on the
//! render thread.

use relay_platform::{
    BridgeError, Engine, EngineInit, InitVariant, NativeHandle, Result, SurfaceEvent,
};

use crate::config::BridgeConfig;

/// Whether the engine has been initialized for the current surface
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SurfaceLifecycleState {
    #[default]
    Uninitialized,
    Initialized,
}

/// Drives an [`Engine`] from render-thread surface callbacks
pub struct FrameDriver<E> {
    engine: E,
    assets: NativeHandle,
    variant: InitVariant,
    graphics_backend: String,
    state: SurfaceLifecycleState,
    width: i32,
    height: i32,
    fault: Option<BridgeError>,
    ever_initialized: bool,
    shut_down: bool,
}

impl<E: Engine> FrameDriver<E> {
    /// Create a driver with the platform-detected variant and default backend
    pub fn new(engine: E, assets: NativeHandle) -> Self {
        Self::with_config(engine, assets, &BridgeConfig::default())
    }

    /// Create a driver from configuration
    pub fn with_config(engine: E, assets: NativeHandle, config: &BridgeConfig) -> Self {
        Self {
            engine,
            assets,
            variant: config.init_variant(),
            graphics_backend: config.graphics_backend.clone(),
            state: SurfaceLifecycleState::Uninitialized,
            width: 0,
            height: 0,
            fault: None,
            ever_initialized: false,
            shut_down: false,
        }
    }

    /// A surface (and context) was created; initialize the engine for it
    ///
    /// Recurs whenever the platform recreates its surface. On failure the
    /// driver stays `Uninitialized`.
    pub fn on_surface_created(&mut self, surface: Option<NativeHandle>) -> Result<()> {
        self.check_fault()?;

        // A new surface means the previous context is gone
        self.state = SurfaceLifecycleState::Uninitialized;

        let surface = if self.variant.requires_surface() {
            match surface.filter(|s| s.is_some()) {
                Some(handle) => Some(handle),
                None => {
                    return Err(BridgeError::Precondition(
                        "surface-handle initialization without a surface".to_string(),
                    ))
                }
            }
        } else {
            if surface.is_some() {
                tracing::debug!("implicit-context variant ignores surface handle");
            }
            None
        };

        let init = EngineInit {
            surface,
            assets: self.assets,
            graphics_backend: &self.graphics_backend,
        };
        if let Err(err) = self.engine.initialize(init) {
            tracing::error!(%err, "engine initialization failed");
            return Err(self.record_fault(err));
        }

        self.state = SurfaceLifecycleState::Initialized;
        self.ever_initialized = true;
        tracing::info!(
            variant = ?self.variant,
            backend = %self.graphics_backend,
            "engine initialized"
        );
        Ok(())
    }

    /// Cache the new surface size for the next tick
    pub fn on_surface_changed(&mut self, width: i32, height: i32) {
        tracing::debug!(width, height, "surface changed");
        self.width = width;
        self.height = height;
    }

    /// Latch `err` if it is fatal; hands it back either way
    fn record_fault(&mut self, err: BridgeError) -> BridgeError {
        if err.is_fatal() {
            tracing::warn!(%err, "frame driver faulted");
            self.fault = Some(err.clone());
        }
        err
    }

    /// Tick the engine once with the cached size
    ///
    /// Before initialization this is a platform contract violation: it fails
    /// with [`BridgeError::Precondition`], makes no engine call, and faults
    /// the driver so every later call fails the same way.
    pub fn on_draw_frame(&mut self) -> Result<()> {
        self.check_fault()?;

        if self.state != SurfaceLifecycleState::Initialized {
            let err = BridgeError::Precondition("draw frame before initialize".to_string());
            return Err(self.record_fault(err));
        }

        self.engine.tick(self.width, self.height);
        Ok(())
    }

    /// The surface and its context were lost
    ///
    /// The next `on_surface_created` re-initializes the engine.
    pub fn on_surface_destroyed(&mut self) {
        if self.state == SurfaceLifecycleState::Initialized {
            tracing::info!("surface destroyed; engine awaits re-initialization");
        }
        self.state = SurfaceLifecycleState::Uninitialized;
    }

    /// Route one lifecycle event
    pub fn handle_event(&mut self, event: SurfaceEvent) -> Result<()> {
        match event {
            SurfaceEvent::Created { surface } => self.on_surface_created(surface),
            SurfaceEvent::Changed { width, height } => {
                self.on_surface_changed(width, height);
                Ok(())
            }
            SurfaceEvent::DrawFrame => self.on_draw_frame(),
            SurfaceEvent::Destroyed => {
                self.on_surface_destroyed();
                Ok(())
            }
        }
    }

    /// Whether the engine asked to close
    pub fn should_close(&self) -> bool {
        self.ever_initialized && !self.shut_down && self.engine.should_close()
    }

    /// Shut the engine down
    ///
    /// Only the first call after a successful initialization reaches the engine.
    pub fn shutdown(&mut self) {
        if self.shut_down || !self.ever_initialized {
            return;
        }
        self.engine.shutdown();
        self.shut_down = true;
        self.state = SurfaceLifecycleState::Uninitialized;
        tracing::info!("engine shut down");
    }

    pub fn state(&self) -> SurfaceLifecycleState {
        self.state
    }

    /// Cached surface size
    pub fn size(&self) -> (i32, i32) {
        (self.width, self.height)
    }

    pub fn variant(&self) -> InitVariant {
        self.variant
    }

    /// Whether a contract violation faulted this driver
    pub fn is_faulted(&self) -> bool {
        self.fault.is_some()
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    fn check_fault(&self) -> Result<()> {
        match &self.fault {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }
}
