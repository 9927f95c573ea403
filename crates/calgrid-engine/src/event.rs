//! Event records consumed by the layout engine.
//!
//! The engine only reads an identifier and the two instants of each event.
//! Everything else an event carries (title, category, colour, ...) is passed
//! through untouched.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A time-interval record that can be laid out on the grid.
///
/// Instants are local wall-clock times; timezone resolution happens upstream.
pub trait TimedEvent {
    fn id(&self) -> &str;
    fn start(&self) -> NaiveDateTime;
    fn end(&self) -> NaiveDateTime;

    /// `true` when the event does not satisfy `start < end`.
    fn is_malformed(&self) -> bool {
        self.end() <= self.start()
    }
}

/// A concrete appointment as delivered by an event source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    /// Display fields (title, category, ...) carried through to the renderer.
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Appointment {
    pub fn new(id: impl Into<String>, start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self {
            id: id.into(),
            start,
            end,
            fields: Map::new(),
        }
    }

    /// Attach a pass-through display field.
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }
}

impl TimedEvent for Appointment {
    fn id(&self) -> &str {
        &self.id
    }

    fn start(&self) -> NaiveDateTime {
        self.start
    }

    fn end(&self) -> NaiveDateTime {
        self.end
    }
}
