use serde::{Deserialize, Serialize};

use crate::SectionId;

/// Every timing constant, threshold and label the runtime uses.
///
/// Missing fields fall back to the defaults, so a config file only needs the
/// values it overrides.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Section whose animations play when the shell is revealed.
    pub initial_section: SectionId,
    /// Identifier published by the copy-UID interaction.
    pub uid: String,
    pub loading: LoadingConfig,
    pub animation: AnimationConfig,
    pub live: LiveConfig,
    pub notification: NotificationConfig,
    pub interaction: InteractionConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            initial_section: SectionId::home(),
            uid: "1234567890".to_string(),
            loading: LoadingConfig::default(),
            animation: AnimationConfig::default(),
            live: LiveConfig::default(),
            notification: NotificationConfig::default(),
            interaction: InteractionConfig::default(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoadingConfig {
    /// Wall-clock delay before the loading surface starts fading out.
    pub reveal_delay_ms: u32,
    pub fade_out_ms: u32,
    pub progress_interval_ms: u32,
    /// Upper bound (exclusive) of a single random progress increment, in percent.
    pub max_progress_step: f64,
}

impl Default for LoadingConfig {
    fn default() -> Self {
        Self {
            reveal_delay_ms: 2000,
            fade_out_ms: 500,
            progress_interval_ms: 100,
            max_progress_step: 20.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    /// Delay between stripping entrance classes and replaying them.
    pub restart_delay_ms: u32,
    pub orientation_retrigger_delay_ms: u32,
    pub entrance_threshold: f64,
    pub entrance_root_margin: String,
    pub counter_threshold: f64,
    /// Frames a counter takes to reach its target.
    pub counter_steps: u32,
    pub stat_bar_delay_ms: u32,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            restart_delay_ms: 100,
            orientation_retrigger_delay_ms: 300,
            entrance_threshold: 0.1,
            entrance_root_margin: "0px 0px -50px 0px".to_string(),
            counter_threshold: 0.5,
            counter_steps: 50,
            stat_bar_delay_ms: 500,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LiveConfig {
    pub status_interval_ms: u32,
    pub squad_interval_ms: u32,
    pub streak_interval_ms: u32,
    pub streak_increment_probability: f64,
    pub squad_size: u32,
    pub status_labels: Vec<String>,
}

impl Default for LiveConfig {
    fn default() -> Self {
        Self {
            status_interval_ms: 10_000,
            squad_interval_ms: 15_000,
            streak_interval_ms: 30_000,
            streak_increment_probability: 0.3,
            squad_size: 4,
            status_labels: ["Playing Now", "In Lobby", "Streaming", "In Match"]
                .map(String::from)
                .to_vec(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationConfig {
    pub visible_ms: u32,
    pub exit_ms: u32,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            visible_ms: 3000,
            exit_ms: 300,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractionConfig {
    /// How long `clicked`/`pulse` feedback classes stay on.
    pub feedback_ms: u32,
    pub back_to_top_offset: f64,
    pub double_tap_window_ms: f64,
    pub form_submit_delay_ms: u32,
    pub gallery_overlay_ms: u32,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            feedback_ms: 300,
            back_to_top_offset: 300.0,
            double_tap_window_ms: 300.0,
            form_submit_delay_ms: 1500,
            gallery_overlay_ms: 3000,
        }
    }
}
