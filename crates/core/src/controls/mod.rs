use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::player::PlaybackStatus;
use crate::VisualiserError;

/// Delay that corresponds to `1x`.
pub const BASE_SPEED_MS: u64 = 1000;

/// Discrete playback speeds offered by the transport controls.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpeedPreset {
    #[serde(rename = "0.5x")]
    Half,
    #[default]
    #[serde(rename = "1x")]
    Normal,
    #[serde(rename = "1.5x")]
    OneAndHalf,
    #[serde(rename = "2x")]
    Double,
    #[serde(rename = "3x")]
    Triple,
}

impl SpeedPreset {
    pub const ALL: [SpeedPreset; 5] = [
        SpeedPreset::Half,
        SpeedPreset::Normal,
        SpeedPreset::OneAndHalf,
        SpeedPreset::Double,
        SpeedPreset::Triple,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SpeedPreset::Half => "0.5x",
            SpeedPreset::Normal => "1x",
            SpeedPreset::OneAndHalf => "1.5x",
            SpeedPreset::Double => "2x",
            SpeedPreset::Triple => "3x",
        }
    }

    /// Milliseconds between automatic advances.
    pub fn millis(self) -> u64 {
        match self {
            SpeedPreset::Half => BASE_SPEED_MS * 2,
            SpeedPreset::Normal => BASE_SPEED_MS,
            SpeedPreset::OneAndHalf => BASE_SPEED_MS * 2 / 3,
            SpeedPreset::Double => BASE_SPEED_MS / 2,
            SpeedPreset::Triple => BASE_SPEED_MS / 3,
        }
    }

    pub fn delay(self) -> Duration {
        Duration::from_millis(self.millis())
    }

    /// Preset whose delay is closest to `millis`.
    pub fn nearest(millis: u64) -> Self {
        Self::ALL
            .into_iter()
            .min_by_key(|preset| preset.millis().abs_diff(millis))
            .unwrap_or_default()
    }
}

impl fmt::Display for SpeedPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for SpeedPreset {
    type Err = VisualiserError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        let wanted = wanted.strip_suffix('x').unwrap_or(wanted);
        Self::ALL
            .into_iter()
            .find(|preset| preset.label().trim_end_matches('x') == wanted)
            .ok_or_else(|| {
                VisualiserError::msg(format!(
                    "unknown speed `{s}`, expected one of 0.5x, 1x, 1.5x, 2x, 3x"
                ))
            })
    }
}

/// What a progress bar and transport buttons should show.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransportView {
    /// Fraction of frames shown, in `0.0..=1.0`.
    pub progress: f32,
    pub can_step_forward: bool,
    pub can_step_backward: bool,
    pub can_play: bool,
    pub can_pause: bool,
    pub speed: SpeedPreset,
}

impl TransportView {
    pub fn from_status(status: &PlaybackStatus) -> Self {
        let total = status.total_frames;
        let shown = usize::try_from(status.current_frame + 1).unwrap_or(0);
        let progress = if total == 0 {
            0.0
        } else {
            shown as f32 / total as f32
        };
        let last = total as isize - 1;

        Self {
            progress,
            can_step_forward: total > 0 && status.current_frame < last,
            can_step_backward: status.current_frame >= 0,
            can_play: total > 0 && !status.is_playing,
            can_pause: status.is_playing,
            speed: SpeedPreset::nearest(status.speed_ms),
        }
    }
}
