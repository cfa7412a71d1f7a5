//! Scroll-follow animation tuning.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

const fn default_tau_ms() -> f64 {
    170.0
}

const fn default_max_ms() -> f64 {
    700.0
}

const fn default_stable_frames() -> u32 {
    8
}

const fn default_epsilon_px() -> f64 {
    1.5
}

const fn default_max_dt_ms() -> f64 {
    32.0
}

const fn default_max_delta_px() -> f64 {
    90.0
}

const fn default_expand_delay_ms() -> u64 {
    60
}

const fn default_frame_ms() -> u64 {
    16
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ScrollConfig {
    /// Time constant of the exponential approach.
    #[serde(default = "default_tau_ms")]
    pub tau_ms: f64,

    /// Hard deadline after which the follow snaps to the target.
    #[serde(default = "default_max_ms")]
    pub max_ms: f64,

    /// Consecutive in-tolerance frames that count as converged.
    #[serde(default = "default_stable_frames")]
    pub stable_frames: u32,

    #[serde(default = "default_epsilon_px")]
    pub epsilon_px: f64,

    /// Upper bound on the frame delta fed into the filter.
    #[serde(default = "default_max_dt_ms")]
    pub max_dt_ms: f64,

    /// Upper bound on the distance travelled in one frame.
    #[serde(default = "default_max_delta_px")]
    pub max_delta_px: f64,

    /// Delay between starting the follow and expanding the rule.
    #[serde(default = "default_expand_delay_ms")]
    pub expand_delay_ms: u64,

    /// Animation frame period used by the terminal driver.
    #[serde(default = "default_frame_ms")]
    pub frame_ms: u64,

    /// Skip the animation and jump straight to the target.
    #[serde(default)]
    pub reduced_motion: bool,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            tau_ms: default_tau_ms(),
            max_ms: default_max_ms(),
            stable_frames: default_stable_frames(),
            epsilon_px: default_epsilon_px(),
            max_dt_ms: default_max_dt_ms(),
            max_delta_px: default_max_delta_px(),
            expand_delay_ms: default_expand_delay_ms(),
            frame_ms: default_frame_ms(),
            reduced_motion: false,
        }
    }
}

impl ScrollConfig {
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("scroll.tau_ms", self.tau_ms),
            ("scroll.max_ms", self.max_ms),
            ("scroll.epsilon_px", self.epsilon_px),
            ("scroll.max_dt_ms", self.max_dt_ms),
            ("scroll.max_delta_px", self.max_delta_px),
        ];
        for (field, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::InvalidValue {
                    field: field.into(),
                    reason: format!("must be a positive number, got {value}"),
                });
            }
        }
        if self.frame_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "scroll.frame_ms".into(),
                reason: "must be greater than zero".into(),
            });
        }
        Ok(())
    }
}
