//! Platform capability detection

use serde::Deserialize;

/// How the engine is handed its rendering target on surface creation
///
/// The two variants are alternative platform configurations; a build uses
/// exactly one of them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InitVariant {
    /// The platform makes a rendering context current before calling in
    /// (Android `GLSurfaceView`)
    ImplicitContext,
    /// The platform passes a drawable-surface / device handle explicitly
    /// (Apple Metal view)
    SurfaceHandle,
}

impl InitVariant {
    /// Select the variant for the target platform
    pub fn detect() -> Self {
        if cfg!(any(target_os = "ios", target_os = "macos")) {
            InitVariant::SurfaceHandle
        } else {
            InitVariant::ImplicitContext
        }
    }

    /// Whether `initialize` must receive a surface handle
    pub fn requires_surface(self) -> bool {
        self == InitVariant::SurfaceHandle
    }
}

/// Default graphics backend name for the target platform
pub fn default_graphics_backend() -> &'static str {
    if cfg!(any(target_os = "ios", target_os = "macos")) {
        "Metal"
    } else {
        "OpenGL"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Wrapper {
        variant: InitVariant,
    }

    #[test]
    fn test_variant_names() {
        let w: Wrapper = toml::from_str(r#"variant = "surface-handle""#).unwrap();
        assert_eq!(w.variant, InitVariant::SurfaceHandle);
        let w: Wrapper = toml::from_str(r#"variant = "implicit-context""#).unwrap();
        assert_eq!(w.variant, InitVariant::ImplicitContext);
    }

    #[test]
    fn test_detect_matches_backend() {
        let variant = InitVariant::detect();
        match default_graphics_backend() {
            "Metal" => assert!(variant.requires_surface()),
            _ => assert!(!variant.requires_surface()),
        }
    }
}
