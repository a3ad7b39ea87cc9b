#![forbid(unsafe_code)]

//! Layout and animation configuration.
//!
//! [`LayoutConfig::default`] reproduces the constants the bookshelf has
//! always shipped with. Overrides come from JSON ([`LayoutConfig::from_json_str`])
//! or from environment variables ([`LayoutConfig::from_env_with_diagnostics`]);
//! both report problems per field instead of failing on the first one.
//!
//! Shelf capacity is plain configuration. It is never derived from pixel
//! widths, so a given partition lays out identically on every viewport.

use std::env;
use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use shelf_core::animation::Easing;

pub const ENV_ITEMS_PER_SHELF: &str = "SHELF_ITEMS_PER_SHELF";
pub const ENV_SHELF_COUNT: &str = "SHELF_COUNT";
pub const ENV_MAX_GROUPS: &str = "SHELF_MAX_GROUPS";
pub const ENV_SETTLE_MS: &str = "SHELF_SETTLE_MS";
pub const ENV_MAX_COLUMN_HEIGHT: &str = "SHELF_MAX_COLUMN_HEIGHT";

// ---------------------------------------------------------------------------
// Timings
// ---------------------------------------------------------------------------

/// Duration, per-member stagger and curve of one family of tweens.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TweenTiming {
    pub duration_ms: u64,
    pub stagger_ms: u64,
    pub easing: Easing,
}

impl TweenTiming {
    pub const fn new(duration_ms: u64, stagger_ms: u64, easing: Easing) -> Self {
        Self {
            duration_ms,
            stagger_ms,
            easing,
        }
    }

    pub const fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }

    pub const fn stagger(&self) -> Duration {
        Duration::from_millis(self.stagger_ms)
    }
}

impl Default for TweenTiming {
    fn default() -> Self {
        Self::new(500, 0, Easing::Linear)
    }
}

/// Timing table for every tween the engine starts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    /// Containers sliding apart for a binary split.
    pub shelf_split: TweenTiming,
    /// Containers returning to rest.
    pub shelf_reset: TweenTiming,
    /// Containers moving to their group column slots.
    pub shelf_arrange: TweenTiming,
    /// Items settling after a split or grouping.
    pub items_to_position: TweenTiming,
    /// Items settling after a reset.
    pub items_reset: TweenTiming,
    /// Shelf width changes.
    pub shelf_resize: TweenTiming,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            shelf_split: TweenTiming::new(800, 50, Easing::BackOut { overshoot: 1.0 }),
            shelf_reset: TweenTiming::new(500, 50, Easing::BackOut { overshoot: 0.7 }),
            shelf_arrange: TweenTiming::new(800, 50, Easing::Power3InOut),
            items_to_position: TweenTiming::new(100, 20, Easing::BackIn { overshoot: 1.7 }),
            items_reset: TweenTiming::new(800, 150, Easing::Power3InOut),
            shelf_resize: TweenTiming::new(
                500,
                0,
                Easing::ElasticIn {
                    amplitude: 5.0,
                    period: 0.3,
                },
            ),
        }
    }
}

// ---------------------------------------------------------------------------
// Spatial constants
// ---------------------------------------------------------------------------

/// Per-item width and fixed padding used when sizing a shelf to content.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Spacing {
    pub unit_width: f32,
    pub padding: f32,
}

impl Spacing {
    /// `max(min_width, count * unit_width + padding)`.
    #[must_use]
    pub fn shelf_width(&self, count: usize, min_width: f32) -> f32 {
        (count as f32 * self.unit_width + self.padding).max(min_width)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpatialConfig {
    /// Horizontal container offset for even-indexed shelves when split.
    pub separation_left: f32,
    /// Horizontal container offset for odd-indexed shelves when split.
    pub separation_right: f32,
    pub compact: Spacing,
    pub normal: Spacing,
    pub min_shelf_width: f32,
    /// Rest position of shelf 0; shelf `i` rests `i` rows below.
    pub rest_left: f32,
    pub rest_top: f32,
    /// Horizontal distance between item slots on a shelf.
    pub slot_width: f32,
    /// Offset of the first slot inside its container.
    pub slot_inset_x: f32,
    pub slot_inset_y: f32,
    pub item_width: f32,
    pub item_height: f32,
}

impl Default for SpatialConfig {
    fn default() -> Self {
        Self {
            separation_left: -505.0,
            separation_right: 380.0,
            compact: Spacing {
                unit_width: 65.0,
                padding: 40.0,
            },
            normal: Spacing {
                unit_width: 75.0,
                padding: 60.0,
            },
            min_shelf_width: 180.0,
            rest_left: 340.0,
            rest_top: 70.0,
            slot_width: 75.0,
            slot_inset_x: 30.0,
            slot_inset_y: 12.0,
            item_width: 60.0,
            item_height: 96.0,
        }
    }
}

/// Column packing for grouped layouts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub column_width: f32,
    /// Height of one shelf row; also the rest spacing between shelves.
    pub shelf_height: f32,
    pub start_x: f32,
    pub start_y: f32,
    /// A column is closed once the next group would exceed this height.
    pub max_column_height: f32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            column_width: 600.0,
            shelf_height: 130.0,
            start_x: 10.0,
            start_y: 70.0,
            max_column_height: 880.0,
        }
    }
}

// ---------------------------------------------------------------------------
// Root config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Number of physical shelves, fixed for the session.
    pub shelf_count: usize,
    /// Capacity of every shelf.
    pub items_per_shelf: usize,
    /// Groups beyond this are folded into [`LayoutConfig::others_key`].
    pub max_groups: usize,
    pub others_key: String,
    /// Debounce between the end of the animations and the gate release.
    pub settle_delay_ms: u64,
    /// Catalog attribute summed into each group's aggregate metric.
    pub metric_path: String,
    pub animation: AnimationConfig,
    pub spatial: SpatialConfig,
    pub grid: GridConfig,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            shelf_count: 10,
            items_per_shelf: 6,
            max_groups: 5,
            others_key: "Others".to_string(),
            settle_delay_ms: 100,
            metric_path: "film_info.box_office".to_string(),
            animation: AnimationConfig::default(),
            spatial: SpatialConfig::default(),
            grid: GridConfig::default(),
        }
    }
}

/// Configuration parse result with every problem found.
#[derive(Debug, Clone)]
pub struct LayoutConfigParse {
    pub config: LayoutConfig,
    pub errors: Vec<ConfigError>,
}

/// One rejected configuration value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    pub field: &'static str,
    pub value: String,
    pub message: String,
}

impl ConfigError {
    fn new(field: &'static str, value: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field,
            value: value.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={} ({})", self.field, self.value, self.message)
    }
}

impl std::error::Error for ConfigError {}

impl LayoutConfig {
    /// Defaults overridden by environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_env_with_diagnostics().config
    }

    /// Defaults overridden by environment variables, with diagnostics.
    #[must_use]
    pub fn from_env_with_diagnostics() -> LayoutConfigParse {
        from_env_with(|key| env::var(key).ok())
    }

    /// Parse a (possibly partial) JSON document; missing fields keep their
    /// defaults. The result is validated.
    pub fn from_json_str(json: &str) -> Result<Self, Vec<ConfigError>> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| vec![ConfigError::new("json", json.len().to_string(), e.to_string())])?;
        config.validate()?;
        Ok(config)
    }

    /// Check constraints and return every violation.
    pub fn validate(&self) -> Result<(), Vec<ConfigError>> {
        let mut errors = Vec::new();
        validate_positive("shelf_count", self.shelf_count, &mut errors);
        validate_positive("items_per_shelf", self.items_per_shelf, &mut errors);
        if self.max_groups < 2 {
            errors.push(ConfigError::new(
                "max_groups",
                self.max_groups.to_string(),
                "must be >= 2 to leave room for the others group",
            ));
        }
        if self.others_key.is_empty() {
            errors.push(ConfigError::new("others_key", "", "must not be empty"));
        }
        if self.grid.shelf_height <= 0.0 {
            errors.push(ConfigError::new(
                "grid.shelf_height",
                self.grid.shelf_height.to_string(),
                "must be > 0",
            ));
        }
        if self.grid.column_width <= 0.0 {
            errors.push(ConfigError::new(
                "grid.column_width",
                self.grid.column_width.to_string(),
                "must be > 0",
            ));
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    pub const fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }

    /// Spacing used when sizing shelves.
    pub fn spacing(&self, compact: bool) -> Spacing {
        if compact {
            self.spatial.compact
        } else {
            self.spatial.normal
        }
    }
}

fn from_env_with<F>(mut get: F) -> LayoutConfigParse
where
    F: FnMut(&str) -> Option<String>,
{
    let mut config = LayoutConfig::default();
    let mut errors = Vec::new();

    if let Some(value) = get(ENV_ITEMS_PER_SHELF) {
        match value.trim().parse::<usize>() {
            Ok(parsed) if parsed > 0 => config.items_per_shelf = parsed,
            _ => errors.push(ConfigError::new(
                "items_per_shelf",
                value,
                "expected integer >= 1",
            )),
        }
    }

    if let Some(value) = get(ENV_SHELF_COUNT) {
        match value.trim().parse::<usize>() {
            Ok(parsed) if parsed > 0 => config.shelf_count = parsed,
            _ => errors.push(ConfigError::new(
                "shelf_count",
                value,
                "expected integer >= 1",
            )),
        }
    }

    if let Some(value) = get(ENV_MAX_GROUPS) {
        match value.trim().parse::<usize>() {
            Ok(parsed) if parsed >= 2 => config.max_groups = parsed,
            _ => errors.push(ConfigError::new(
                "max_groups",
                value,
                "expected integer >= 2",
            )),
        }
    }

    if let Some(value) = get(ENV_SETTLE_MS) {
        match value.trim().parse::<u64>() {
            Ok(parsed) => config.settle_delay_ms = parsed,
            Err(_) => errors.push(ConfigError::new(
                "settle_delay_ms",
                value,
                "expected milliseconds",
            )),
        }
    }

    if let Some(value) = get(ENV_MAX_COLUMN_HEIGHT) {
        match value.trim().parse::<f32>() {
            Ok(parsed) if parsed.is_finite() && parsed > 0.0 => {
                config.grid.max_column_height = parsed;
            }
            _ => errors.push(ConfigError::new(
                "max_column_height",
                value,
                "expected positive number",
            )),
        }
    }

    LayoutConfigParse { config, errors }
}

fn validate_positive(field: &'static str, value: usize, errors: &mut Vec<ConfigError>) {
    if value == 0 {
        errors.push(ConfigError::new(field, value.to_string(), "must be >= 1"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn parse_env(pairs: &[(&str, &str)]) -> LayoutConfigParse {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        from_env_with(|key| map.get(key).cloned())
    }

    #[test]
    fn defaults_are_valid() {
        let config = LayoutConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.items_per_shelf, 6);
        assert_eq!(config.max_groups, 5);
        assert_eq!(config.settle_delay(), Duration::from_millis(100));
    }

    #[test]
    fn env_overrides_apply() {
        let parsed = parse_env(&[
            (ENV_ITEMS_PER_SHELF, "9"),
            (ENV_MAX_GROUPS, "6"),
            (ENV_SETTLE_MS, "250"),
            (ENV_MAX_COLUMN_HEIGHT, "640.5"),
        ]);
        assert!(parsed.errors.is_empty(), "{:?}", parsed.errors);
        assert_eq!(parsed.config.items_per_shelf, 9);
        assert_eq!(parsed.config.max_groups, 6);
        assert_eq!(parsed.config.settle_delay_ms, 250);
        assert_eq!(parsed.config.grid.max_column_height, 640.5);
    }

    #[test]
    fn env_errors_are_collected_per_field() {
        let parsed = parse_env(&[
            (ENV_ITEMS_PER_SHELF, "0"),
            (ENV_MAX_GROUPS, "one"),
            (ENV_SHELF_COUNT, "-3"),
        ]);
        let fields: Vec<_> = parsed.errors.iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["items_per_shelf", "shelf_count", "max_groups"]);
        assert_eq!(parsed.config.items_per_shelf, 6, "bad values keep defaults");
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config = LayoutConfig::from_json_str(
            r#"{ "items_per_shelf": 9, "animation": { "items_reset": { "duration_ms": 400 } } }"#,
        );
        let config = match config {
            Ok(config) => config,
            Err(errors) => panic!("unexpected errors: {errors:?}"),
        };
        assert_eq!(config.items_per_shelf, 9);
        assert_eq!(config.animation.items_reset.duration_ms, 400);
        assert_eq!(config.animation.items_reset.easing, Easing::Linear);
        assert_eq!(config.animation.shelf_split, AnimationConfig::default().shelf_split);
        assert_eq!(config.grid, GridConfig::default());
    }

    #[test]
    fn json_easing_by_name() {
        let config = LayoutConfig::from_json_str(
            r#"{ "animation": { "shelf_split": { "duration_ms": 300, "stagger_ms": 10,
                 "easing": { "kind": "back_out", "overshoot": 1.4 } } } }"#,
        );
        let split = config.map(|c| c.animation.shelf_split).ok();
        assert_eq!(
            split,
            Some(TweenTiming::new(300, 10, Easing::BackOut { overshoot: 1.4 }))
        );
    }

    #[test]
    fn validation_reports_every_violation() {
        let config = LayoutConfig {
            shelf_count: 0,
            items_per_shelf: 0,
            max_groups: 1,
            ..LayoutConfig::default()
        };
        let errors = config.validate().err().unwrap_or_default();
        assert_eq!(errors.len(), 3);
        assert!(errors[2].to_string().starts_with("max_groups=1"));
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(LayoutConfig::from_json_str("{ not json").is_err());
    }

    #[test]
    fn shelf_width_respects_minimum() {
        let config = LayoutConfig::default();
        assert_eq!(config.spacing(false).shelf_width(0, 180.0), 180.0);
        assert_eq!(config.spacing(false).shelf_width(6, 180.0), 510.0);
        assert_eq!(config.spacing(true).shelf_width(6, 180.0), 430.0);
    }
}
