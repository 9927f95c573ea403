//! WASM bindings for calgrid-engine.
//!
//! Exposes day/week layout, the current-time offset and a stateful zoom
//! controller to JavaScript via `wasm-bindgen`. Event lists and results cross
//! the boundary as JSON strings.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p calgrid-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target web --out-dir packages/calgrid-js/wasm/ \
//!   target/wasm32-unknown-unknown/release/calgrid_wasm.wasm
//! ```

use calgrid_engine::config::GridConfig;
use calgrid_engine::zoom::density_for_zoom;
use calgrid_engine::{
    layout_day, layout_week, Appointment, PositionedEvent, TouchPoint, ZoomController,
};
use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;
use wasm_bindgen::prelude::*;

// ---------------------------------------------------------------------------
// Serde-friendly DTOs for crossing the WASM boundary as JSON
// ---------------------------------------------------------------------------

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PositionedEventDto<'a> {
    #[serde(flatten)]
    appointment: &'a Appointment,
    top: i32,
    height: i32,
    left_percent: f64,
    width_percent: f64,
    inset_px: f64,
    lane: usize,
    cluster_lane_count: usize,
}

impl<'a> From<&PositionedEvent<'a, Appointment>> for PositionedEventDto<'a> {
    fn from(p: &PositionedEvent<'a, Appointment>) -> Self {
        Self {
            appointment: p.event,
            top: p.top,
            height: p.height,
            left_percent: p.left_percent,
            width_percent: p.width_percent,
            inset_px: p.inset_px,
            lane: p.lane,
            cluster_lane_count: p.cluster_lane_count,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DayColumnDto<'a> {
    date: NaiveDate,
    day_height: i32,
    events: Vec<PositionedEventDto<'a>>,
}

// ---------------------------------------------------------------------------
// Helpers (plain `Result<_, String>` so they run in native tests)
// ---------------------------------------------------------------------------

fn parse_config(config_json: Option<&str>) -> Result<GridConfig, String> {
    match config_json {
        Some(json) if !json.trim().is_empty() => {
            GridConfig::from_json(json).map_err(|e| e.to_string())
        }
        _ => Ok(GridConfig::default()),
    }
}

fn parse_events(json: &str) -> Result<Vec<Appointment>, String> {
    serde_json::from_str(json).map_err(|e| format!("Invalid events JSON: {}", e))
}

fn parse_date(s: &str) -> Result<NaiveDate, String> {
    s.parse()
        .map_err(|e| format!("Invalid date '{}': {}", s, e))
}

fn parse_datetime(s: &str) -> Result<NaiveDateTime, String> {
    s.parse()
        .map_err(|e| format!("Invalid datetime '{}': {}", s, e))
}

fn to_json<T: Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string(value).map_err(|e| format!("Serialization error: {}", e))
}

fn layout_day_json(
    events_json: &str,
    date: &str,
    zoom: f64,
    config_json: Option<&str>,
) -> Result<String, String> {
    let config = parse_config(config_json)?;
    let events = parse_events(events_json)?;
    let date = parse_date(date)?;
    let mapper = ZoomController::with_zoom(config.zoom, config.density, zoom).mapper();

    let positioned =
        layout_day(&events, date, mapper.density(), &config.layout).map_err(|e| e.to_string())?;

    to_json(&DayColumnDto {
        date,
        day_height: mapper.day_height(),
        events: positioned.iter().map(PositionedEventDto::from).collect(),
    })
}

fn layout_week_json(
    events_json: &str,
    first_day: &str,
    zoom: f64,
    config_json: Option<&str>,
) -> Result<String, String> {
    let config = parse_config(config_json)?;
    let events = parse_events(events_json)?;
    let first_day = parse_date(first_day)?;
    let mapper = ZoomController::with_zoom(config.zoom, config.density, zoom).mapper();

    let columns = layout_week(&events, first_day, mapper.density(), &config.layout)
        .map_err(|e| e.to_string())?;

    let dtos: Vec<DayColumnDto> = columns
        .iter()
        .map(|column| DayColumnDto {
            date: column.date,
            day_height: mapper.day_height(),
            events: column.events.iter().map(PositionedEventDto::from).collect(),
        })
        .collect();
    to_json(&dtos)
}

fn current_time_offset_for(now: &str, zoom: f64, config_json: Option<&str>) -> Result<i32, String> {
    let config = parse_config(config_json)?;
    let now = parse_datetime(now)?;
    let mapper = ZoomController::with_zoom(config.zoom, config.density, zoom).mapper();
    Ok(mapper.offset(now))
}

// ---------------------------------------------------------------------------
// WASM exports
// ---------------------------------------------------------------------------

/// Lay out the events that fall on `date` (`YYYY-MM-DD`).
///
/// `events_json` is a JSON array of `{id, start, end, ...}` objects with local
/// `YYYY-MM-DDTHH:MM:SS` times; extra fields are passed through. Returns a JSON
/// object `{date, dayHeight, events: [...]}`.
#[wasm_bindgen(js_name = "layoutDay")]
pub fn layout_day_js(
    events_json: &str,
    date: &str,
    zoom: f64,
    config_json: Option<String>,
) -> Result<String, JsValue> {
    layout_day_json(events_json, date, zoom, config_json.as_deref())
        .map_err(|e| JsValue::from_str(&e))
}

/// Lay out seven day columns starting at `first_day`. Returns a JSON array of
/// the objects produced by `layoutDay`.
#[wasm_bindgen(js_name = "layoutWeek")]
pub fn layout_week_js(
    events_json: &str,
    first_day: &str,
    zoom: f64,
    config_json: Option<String>,
) -> Result<String, JsValue> {
    layout_week_json(events_json, first_day, zoom, config_json.as_deref())
        .map_err(|e| JsValue::from_str(&e))
}

/// Pixels per minute for a zoom step under the default density bounds.
#[wasm_bindgen(js_name = "densityForZoom")]
pub fn density_for_zoom_js(zoom: f64) -> f64 {
    density_for_zoom(zoom, &GridConfig::default().density)
}

/// Vertical offset of the current-time line for a local datetime string.
///
/// Pass the same `config_json` as `layoutDay` so the line uses the events'
/// density.
#[wasm_bindgen(js_name = "currentTimeOffset")]
pub fn current_time_offset(
    now: &str,
    zoom: f64,
    config_json: Option<String>,
) -> Result<i32, JsValue> {
    current_time_offset_for(now, zoom, config_json.as_deref()).map_err(|e| JsValue::from_str(&e))
}

/// Stateful zoom controller for touch handlers.
///
/// Call `pinchMove` from every `touchmove`; it updates the live zoom at once,
/// so moves that arrive before the next frame build on each other. Call
/// `commit` when rendering a frame and re-run layout if it returns a value.
#[wasm_bindgen]
pub struct GridZoom {
    inner: ZoomController,
}

#[wasm_bindgen]
impl GridZoom {
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: Option<String>, initial_zoom: Option<f64>) -> Result<GridZoom, JsValue> {
        let config = parse_config(config_json.as_deref()).map_err(|e| JsValue::from_str(&e))?;
        Ok(GridZoom {
            inner: ZoomController::with_zoom(
                config.zoom,
                config.density,
                initial_zoom.unwrap_or(0.0),
            ),
        })
    }

    pub fn zoom(&self) -> f64 {
        self.inner.zoom()
    }

    #[wasm_bindgen(js_name = "renderedZoom")]
    pub fn rendered_zoom(&self) -> f64 {
        self.inner.rendered_zoom()
    }

    #[wasm_bindgen(js_name = "setZoom")]
    pub fn set_zoom(&mut self, zoom: f64) -> f64 {
        self.inner.set_zoom(zoom)
    }

    #[wasm_bindgen(js_name = "zoomIn")]
    pub fn zoom_in(&mut self) -> bool {
        self.inner.zoom_in()
    }

    #[wasm_bindgen(js_name = "zoomOut")]
    pub fn zoom_out(&mut self) -> bool {
        self.inner.zoom_out()
    }

    #[wasm_bindgen(js_name = "canZoomIn")]
    pub fn can_zoom_in(&self) -> bool {
        self.inner.can_zoom_in()
    }

    #[wasm_bindgen(js_name = "canZoomOut")]
    pub fn can_zoom_out(&self) -> bool {
        self.inner.can_zoom_out()
    }

    pub fn commit(&mut self) -> Option<f64> {
        self.inner.commit()
    }

    pub fn density(&self) -> f64 {
        self.inner.density()
    }

    #[wasm_bindgen(js_name = "hourHeight")]
    pub fn hour_height(&self) -> f64 {
        self.inner.hour_height()
    }

    #[wasm_bindgen(js_name = "pinchStart")]
    pub fn pinch_start(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) -> bool {
        self.inner
            .pinch_start(&[TouchPoint::new(x1, y1), TouchPoint::new(x2, y2)])
    }

    #[wasm_bindgen(js_name = "pinchMove")]
    pub fn pinch_move(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) -> Option<f64> {
        self.inner
            .pinch_move(&[TouchPoint::new(x1, y1), TouchPoint::new(x2, y2)])
    }

    #[wasm_bindgen(js_name = "pinchEnd")]
    pub fn pinch_end(&mut self) {
        self.inner.pinch_end()
    }
}
