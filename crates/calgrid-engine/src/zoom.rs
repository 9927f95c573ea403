//! Zoom step ownership, density derivation and pinch gestures.
//!
//! Density grows exponentially with the zoom step:
//! `density = clamp(base × 1.2^zoom, min, max)`. A pinch converts the ratio
//! between consecutive finger distances back into an additive step with the
//! inverse mapping `ln(factor) / ln(1.2)`.
//!
//! The controller keeps two copies of the zoom step. The live value is
//! written immediately by every mutator and is what gestures read, so several
//! touch-move events arriving before a repaint each build on the previous
//! one. The rendered value only changes on [`ZoomController::commit`] and is
//! what layout density is derived from.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::config::{DensityConfig, ZoomConfig, MIN_HOUR_HEIGHT, ZOOM_FACTOR};
use crate::mapper::TimeMapper;

/// One active touch contact, in screen pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TouchPoint {
    pub x: f64,
    pub y: f64,
}

impl TouchPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: &TouchPoint) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Pixels per minute for a zoom step.
pub fn density_for_zoom(zoom: f64, density: &DensityConfig) -> f64 {
    density.clamp(density.base * ZOOM_FACTOR.powf(zoom))
}

/// Rendered height of one hour row, never below [`MIN_HOUR_HEIGHT`].
pub fn hour_height(density: f64) -> f64 {
    (60.0 * density).max(MIN_HOUR_HEIGHT)
}

/// Additive zoom step equivalent to scaling the density by `factor`.
pub fn zoom_delta(factor: f64) -> f64 {
    factor.ln() / ZOOM_FACTOR.ln()
}

fn pinch_distance(touches: &[TouchPoint]) -> Option<f64> {
    match touches {
        [a, b, ..] => {
            let d = a.distance(b);
            (d.is_finite() && d > 0.0).then_some(d)
        }
        _ => None,
    }
}

#[derive(Debug, Clone)]
pub struct ZoomController {
    zoom: ZoomConfig,
    density: DensityConfig,
    live: f64,
    rendered: f64,
    /// Finger distance at the previous pinch tick.
    pinch_distance: Option<f64>,
}

impl Default for ZoomController {
    fn default() -> Self {
        Self::new(ZoomConfig::default(), DensityConfig::default())
    }
}

impl ZoomController {
    /// A controller at zoom step 0 (or the nearest bound).
    pub fn new(zoom: ZoomConfig, density: DensityConfig) -> Self {
        Self::with_zoom(zoom, density, 0.0)
    }

    pub fn with_zoom(zoom: ZoomConfig, density: DensityConfig, initial: f64) -> Self {
        let start = if initial.is_nan() { 0.0 } else { initial };
        let start = start.clamp(zoom.min, zoom.max);
        Self {
            zoom,
            density,
            live: start,
            rendered: start,
            pinch_distance: None,
        }
    }

    /// The authoritative zoom step, including uncommitted gesture ticks.
    pub fn zoom(&self) -> f64 {
        self.live
    }

    /// The zoom step the last committed frame was rendered with.
    pub fn rendered_zoom(&self) -> f64 {
        self.rendered
    }

    pub fn bounds(&self) -> (f64, f64) {
        (self.zoom.min, self.zoom.max)
    }

    /// Set an explicit zoom step, clamped to bounds. NaN is ignored.
    ///
    /// Returns the live zoom after the update.
    pub fn set_zoom(&mut self, zoom: f64) -> f64 {
        if !zoom.is_nan() {
            self.live = zoom.clamp(self.zoom.min, self.zoom.max);
        }
        self.live
    }

    pub fn can_zoom_in(&self) -> bool {
        self.live < self.zoom.max
    }

    pub fn can_zoom_out(&self) -> bool {
        self.live > self.zoom.min
    }

    /// Step the zoom up by one increment. No-op (returns `false`) at the bound.
    pub fn zoom_in(&mut self) -> bool {
        if !self.can_zoom_in() {
            return false;
        }
        self.set_zoom(self.live + self.zoom.increment);
        true
    }

    /// Step the zoom down by one increment. No-op (returns `false`) at the bound.
    pub fn zoom_out(&mut self) -> bool {
        if !self.can_zoom_out() {
            return false;
        }
        self.set_zoom(self.live - self.zoom.increment);
        true
    }

    /// Publish the live zoom to the render-visible copy.
    ///
    /// Returns the new rendered zoom when it changed.
    pub fn commit(&mut self) -> Option<f64> {
        if self.rendered == self.live {
            return None;
        }
        self.rendered = self.live;
        Some(self.rendered)
    }

    /// Density for the rendered zoom step; this is what layout uses.
    pub fn density(&self) -> f64 {
        density_for_zoom(self.rendered, &self.density)
    }

    /// Density for the live zoom step.
    pub fn live_density(&self) -> f64 {
        density_for_zoom(self.live, &self.density)
    }

    pub fn hour_height(&self) -> f64 {
        hour_height(self.density())
    }

    pub fn mapper(&self) -> TimeMapper {
        TimeMapper::new(self.density())
    }

    /// Begin a pinch. Needs at least two contacts a non-zero distance apart.
    pub fn pinch_start(&mut self, touches: &[TouchPoint]) -> bool {
        self.pinch_distance = pinch_distance(touches);
        self.pinch_distance.is_some()
    }

    /// Apply one pinch tick relative to the previous tick.
    ///
    /// Returns the new live zoom, or `None` when no pinch is in progress or
    /// fewer than two usable contacts are present.
    pub fn pinch_move(&mut self, touches: &[TouchPoint]) -> Option<f64> {
        let previous = self.pinch_distance?;
        let current = pinch_distance(touches)?;
        let factor = current / previous;
        let delta = zoom_delta(factor);
        let zoom = self.set_zoom(self.live + delta);
        self.pinch_distance = Some(current);
        trace!(factor, delta, zoom, "pinch tick");
        Some(zoom)
    }

    pub fn pinch_end(&mut self) {
        self.pinch_distance = None;
    }

    pub fn is_pinching(&self) -> bool {
        self.pinch_distance.is_some()
    }
}
