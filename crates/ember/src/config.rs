//! Loading and validating [`SiteConfig`].

use crate::error::ConfigError;
use ember_scene::SiteConfig;

/// Parses a JSON config; absent fields keep their defaults.
pub fn from_json(source: &str) -> Result<SiteConfig, ConfigError> {
    let config: SiteConfig = serde_json::from_str(source)?;
    validate(&config)?;
    Ok(config)
}

pub fn validate(config: &SiteConfig) -> Result<(), ConfigError> {
    let invalid = |reason: &str| Err(ConfigError::Invalid(reason.to_string()));

    if config.animation.counter_steps == 0 {
        return invalid("animation.counter_steps must be at least 1");
    }
    if !(0.0..=1.0).contains(&config.animation.entrance_threshold)
        || !(0.0..=1.0).contains(&config.animation.counter_threshold)
    {
        return invalid("viewport thresholds must lie in [0, 1]");
    }
    if config.live.status_labels.is_empty() {
        return invalid("live.status_labels must not be empty");
    }
    if config.live.squad_size == 0 {
        return invalid("live.squad_size must be at least 1");
    }
    if !(0.0..=1.0).contains(&config.live.streak_increment_probability) {
        return invalid("live.streak_increment_probability must lie in [0, 1]");
    }
    if config.loading.progress_interval_ms == 0 {
        return invalid("loading.progress_interval_ms must be at least 1");
    }
    if !(config.loading.max_progress_step > 0.0) {
        return invalid("loading.max_progress_step must be positive");
    }
    let intervals = [
        config.live.status_interval_ms,
        config.live.squad_interval_ms,
        config.live.streak_interval_ms,
    ];
    if intervals.contains(&0) {
        return invalid("live update intervals must be at least 1 ms");
    }
    if config.uid.is_empty() {
        return invalid("uid must not be empty");
    }
    Ok(())
}
