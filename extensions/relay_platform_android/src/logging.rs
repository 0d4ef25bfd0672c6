//! Android logging setup

use relay_core::LogConfig;

/// Reduce a filter directive to the coarse level logcat understands
///
/// Directives like `relay_core=trace,info` use their most verbose level.
pub fn log_level_filter(config: &LogConfig) -> log::LevelFilter {
    config
        .level
        .split(',')
        .filter_map(|directive| {
            let level = directive.rsplit('=').next()?.trim();
            level.parse::<log::LevelFilter>().ok()
        })
        .max()
        .unwrap_or(log::LevelFilter::Info)
}

/// Route `tracing` (via `log`) to logcat under the configured tag
#[cfg(target_os = "android")]
pub fn init_android_logging(config: &LogConfig) {
    android_logger::init_once(
        android_logger::Config::default()
            .with_max_level(log_level_filter(config))
            .with_tag(config.tag.as_str()),
    );
}
