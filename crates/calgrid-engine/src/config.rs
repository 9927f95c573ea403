//! Grid constants and the serde-backed configuration built from them.
//!
//! Every knob has a named constant. The config structs default to those
//! constants and deserialize with `#[serde(default)]`, so a partial JSON
//! document overrides only the fields it names.

use serde::{Deserialize, Serialize};

use crate::error::{LayoutError, Result};

pub const MINUTES_PER_DAY: u32 = 1440;

/// Lower bound on pixels per minute.
pub const MIN_DENSITY: f64 = 0.5;
/// Upper bound on pixels per minute.
pub const MAX_DENSITY: f64 = 4.0;
/// Pixels per minute at zoom step 0.
pub const BASE_DENSITY: f64 = 1.0;

/// Horizontal inset applied on each side of a lane column, in pixels.
pub const GAP_X: f64 = 2.0;
/// Vertical seam between consecutive events in a lane, in pixels.
pub const GAP_Y: i32 = 2;
pub const MINIMUM_EVENT_HEIGHT: i32 = 32;

pub const MIN_ZOOM: f64 = -4.0;
pub const MAX_ZOOM: f64 = 6.0;
/// Step applied by a single zoom-in/zoom-out control press.
pub const ZOOM_INCREMENT: f64 = 1.0;
/// Density multiplier per zoom step.
pub const ZOOM_FACTOR: f64 = 1.2;
/// Floor for a rendered hour row, in pixels.
pub const MIN_HOUR_HEIGHT: f64 = 40.0;

/// What the day/week front door does with an event whose `end <= start`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MalformedPolicy {
    /// Omit the event from the output.
    #[default]
    Drop,
    /// Lay the event out as zero-duration; the height floor applies.
    ClampToMinimum,
    /// Fail the whole layout with [`LayoutError::MalformedEvent`].
    Reject,
}

/// Gap and height knobs consumed by the geometry pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub gap_x: f64,
    pub gap_y: i32,
    pub minimum_event_height: i32,
    pub malformed: MalformedPolicy,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            gap_x: GAP_X,
            gap_y: GAP_Y,
            minimum_event_height: MINIMUM_EVENT_HEIGHT,
            malformed: MalformedPolicy::default(),
        }
    }
}

impl LayoutConfig {
    pub fn validate(&self) -> Result<()> {
        if !self.gap_x.is_finite() || self.gap_x < 0.0 {
            return Err(LayoutError::InvalidConfig(format!(
                "gap_x must be a finite non-negative number, got {}",
                self.gap_x
            )));
        }
        if self.gap_y < 0 {
            return Err(LayoutError::InvalidConfig(format!(
                "gap_y must be non-negative, got {}",
                self.gap_y
            )));
        }
        if self.minimum_event_height <= 0 {
            return Err(LayoutError::InvalidConfig(format!(
                "minimum_event_height must be positive, got {}",
                self.minimum_event_height
            )));
        }
        Ok(())
    }
}

/// Pixel density bounds and the zoom-0 base.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DensityConfig {
    pub base: f64,
    pub min: f64,
    pub max: f64,
}

impl Default for DensityConfig {
    fn default() -> Self {
        Self {
            base: BASE_DENSITY,
            min: MIN_DENSITY,
            max: MAX_DENSITY,
        }
    }
}

impl DensityConfig {
    pub fn validate(&self) -> Result<()> {
        check_range("density", self.min, self.max)?;
        if self.min <= 0.0 {
            return Err(LayoutError::InvalidConfig(format!(
                "density.min must be positive, got {}",
                self.min
            )));
        }
        if !self.base.is_finite() || self.base <= 0.0 {
            return Err(LayoutError::InvalidConfig(format!(
                "density.base must be a finite positive number, got {}",
                self.base
            )));
        }
        Ok(())
    }

    /// Clamp a raw density into `[min, max]`, mapping NaN to `min`.
    pub fn clamp(&self, density: f64) -> f64 {
        if density.is_nan() {
            return self.min;
        }
        density.clamp(self.min, self.max)
    }
}

/// Zoom step bounds and the discrete control increment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoomConfig {
    pub min: f64,
    pub max: f64,
    pub increment: f64,
}

impl Default for ZoomConfig {
    fn default() -> Self {
        Self {
            min: MIN_ZOOM,
            max: MAX_ZOOM,
            increment: ZOOM_INCREMENT,
        }
    }
}

impl ZoomConfig {
    pub fn validate(&self) -> Result<()> {
        check_range("zoom", self.min, self.max)?;
        if !self.increment.is_finite() || self.increment <= 0.0 {
            return Err(LayoutError::InvalidConfig(format!(
                "zoom.increment must be a finite positive number, got {}",
                self.increment
            )));
        }
        Ok(())
    }
}

/// Everything a grid view needs, as loaded from a config file.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub layout: LayoutConfig,
    pub density: DensityConfig,
    pub zoom: ZoomConfig,
}

impl GridConfig {
    /// Parse a (possibly partial) JSON config and validate it.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: GridConfig = serde_json::from_str(json)
            .map_err(|e| LayoutError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.layout.validate()?;
        self.density.validate()?;
        self.zoom.validate()
    }
}

fn check_range(name: &str, min: f64, max: f64) -> Result<()> {
    if !min.is_finite() || !max.is_finite() {
        return Err(LayoutError::InvalidConfig(format!(
            "{name} bounds must be finite, got [{min}, {max}]"
        )));
    }
    if min > max {
        return Err(LayoutError::InvalidConfig(format!(
            "{name}.min ({min}) is greater than {name}.max ({max})"
        )));
    }
    Ok(())
}
