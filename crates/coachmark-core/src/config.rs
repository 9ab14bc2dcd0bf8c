#![forbid(unsafe_code)]

//! Walkthrough display and behavior options.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::color::PackedRgba;
use crate::shape::HighlightShape;

/// Placeholder replaced by the 1-based step number.
pub const CURRENT_PLACEHOLDER: &str = "{current}";
/// Placeholder replaced by the step count.
pub const TOTAL_PLACEHOLDER: &str = "{total}";

/// Walkthrough configuration.
///
/// Pure value object: the only invariant is that numeric fields are
/// non-negative, which [`validate`](Self::validate) checks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WalkthroughConfig {
    /// Mask color, including its opacity.
    pub overlay_color: PackedRgba,
    /// Padding added around each target to form its highlight rectangle.
    pub highlight_padding: f32,
    /// Corner radius for [`HighlightShape::RoundedRect`] cut-outs.
    pub highlight_corner_radius: f32,
    /// Card width.
    pub card_max_width: f32,
    pub card_background_color: PackedRgba,
    pub card_text_color: PackedRgba,
    pub card_elevation: f32,
    /// Fade duration in milliseconds.
    pub animation_duration_ms: u64,
    /// Shape used by hosts that do not pick one per target.
    pub shape: HighlightShape,
    pub next_button_text: String,
    pub previous_button_text: String,
    pub finish_button_text: String,
    /// Counter template with `{current}` and `{total}` placeholders.
    pub step_counter_format: String,
}

impl Default for WalkthroughConfig {
    fn default() -> Self {
        Self {
            overlay_color: PackedRgba::BLACK.with_opacity(0.7),
            highlight_padding: 0.0,
            highlight_corner_radius: 12.0,
            card_max_width: 280.0,
            card_background_color: PackedRgba::WHITE,
            card_text_color: PackedRgba::BLACK,
            card_elevation: 8.0,
            animation_duration_ms: 300,
            shape: HighlightShape::RoundedRect,
            next_button_text: "Next".into(),
            previous_button_text: "Back".into(),
            finish_button_text: "Done".into(),
            step_counter_format: "({current}/{total})".into(),
        }
    }
}

impl WalkthroughConfig {
    /// Set overlay color.
    #[must_use]
    pub fn overlay_color(mut self, color: PackedRgba) -> Self {
        self.overlay_color = color;
        self
    }

    /// Set highlight padding.
    #[must_use]
    pub fn highlight_padding(mut self, padding: f32) -> Self {
        self.highlight_padding = padding;
        self
    }

    /// Set highlight corner radius.
    #[must_use]
    pub fn highlight_corner_radius(mut self, radius: f32) -> Self {
        self.highlight_corner_radius = radius;
        self
    }

    /// Set card width.
    #[must_use]
    pub fn card_max_width(mut self, width: f32) -> Self {
        self.card_max_width = width;
        self
    }

    #[must_use]
    pub fn card_colors(mut self, background: PackedRgba, text: PackedRgba) -> Self {
        self.card_background_color = background;
        self.card_text_color = text;
        self
    }

    #[must_use]
    pub fn card_elevation(mut self, elevation: f32) -> Self {
        self.card_elevation = elevation;
        self
    }

    /// Set fade duration.
    #[must_use]
    pub fn animation_duration(mut self, duration: Duration) -> Self {
        self.animation_duration_ms = duration.as_millis().min(u64::MAX as u128) as u64;
        self
    }

    #[must_use]
    pub fn shape(mut self, shape: HighlightShape) -> Self {
        self.shape = shape;
        self
    }

    /// Set the three navigation labels.
    #[must_use]
    pub fn button_texts(
        mut self,
        next: impl Into<String>,
        previous: impl Into<String>,
        finish: impl Into<String>,
    ) -> Self {
        self.next_button_text = next.into();
        self.previous_button_text = previous.into();
        self.finish_button_text = finish.into();
        self
    }

    /// Set the counter template.
    #[must_use]
    pub fn step_counter_format(mut self, format: impl Into<String>) -> Self {
        self.step_counter_format = format.into();
        self
    }

    /// Fade duration.
    pub fn animation_duration_value(&self) -> Duration {
        Duration::from_millis(self.animation_duration_ms)
    }

    /// Render the step counter, e.g. `"(2/5)"`.
    ///
    /// Every occurrence of each placeholder is substituted.
    pub fn format_counter(&self, current: usize, total: usize) -> String {
        self.step_counter_format
            .replace(CURRENT_PLACEHOLDER, &current.to_string())
            .replace(TOTAL_PLACEHOLDER, &total.to_string())
    }

    /// Reject negative (or NaN) numeric fields.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let fields = [
            ("highlightPadding", self.highlight_padding),
            ("highlightCornerRadius", self.highlight_corner_radius),
            ("cardMaxWidth", self.card_max_width),
            ("cardElevation", self.card_elevation),
        ];
        for (field, value) in fields {
            if value.is_nan() || value < 0.0 {
                return Err(ConfigError::NegativeField { field, value });
            }
        }
        Ok(())
    }

    /// Parse and validate a JSON config; absent fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse, and validate a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    /// [`load`](Self::load), falling back to defaults with a warning.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        Self::load(path).unwrap_or_else(|err| {
            warn!(path = %path.display(), error = %err, "walkthrough config unavailable, using defaults");
            Self::default()
        })
    }
}

/// Why a configuration was rejected.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("config field {field} must be non-negative, got {value}")]
    NegativeField { field: &'static str, value: f32 },
}
