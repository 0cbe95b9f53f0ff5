use crate::math::{Pose, Vec2};

use super::{error::EventError, event_record::EventRecord, field::FieldKind};

/// String field that declares what kind of input an event carries
pub const EVENT_TYPE_FIELD: &str = "EventType";

pub const ANALOG_VALUE_FIELD: &str = "AnalogValue";
pub const POSITION_FIELD: &str = "Position";
pub const NORMALIZED_POSITION_FIELD: &str = "NormalizedPosition";
pub const TRANSFORM_FIELD: &str = "Transform";

/// The input categories that have a typed listener shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventCategory {
    AnalogUpdate,
    ButtonDown,
    ButtonUp,
    CursorMove,
    TrackerMove,
}

impl EventCategory {
    /// Maps an `EventType` value onto a category. Touch events count as
    /// presses and releases.
    pub fn from_event_type(event_type: &str) -> Option<Self> {
        match event_type {
            "AnalogUpdate" => Some(EventCategory::AnalogUpdate),
            "ButtonDown" | "ButtonTouch" => Some(EventCategory::ButtonDown),
            "ButtonUp" | "ButtonUntouch" => Some(EventCategory::ButtonUp),
            "CursorMove" => Some(EventCategory::CursorMove),
            "TrackerMove" => Some(EventCategory::TrackerMove),
            _ => None,
        }
    }

    pub fn event_type(&self) -> &'static str {
        match self {
            EventCategory::AnalogUpdate => "AnalogUpdate",
            EventCategory::ButtonDown => "ButtonDown",
            EventCategory::ButtonUp => "ButtonUp",
            EventCategory::CursorMove => "CursorMove",
            EventCategory::TrackerMove => "TrackerMove",
        }
    }
}

impl EventRecord {
    /// The declared category, if the event carries a recognised `EventType`
    pub fn category(&self) -> Option<EventCategory> {
        self.get_field::<String>(EVENT_TYPE_FIELD)
            .ok()
            .and_then(|event_type| EventCategory::from_event_type(event_type))
    }

    // Producers

    fn categorized<S: Into<String>>(name: S, category: EventCategory) -> Self {
        let mut record = EventRecord::new(name);
        record.put_field(EVENT_TYPE_FIELD, category.event_type().to_string());
        record
    }

    pub fn button_down<S: Into<String>>(name: S) -> Self {
        Self::categorized(name, EventCategory::ButtonDown)
    }

    pub fn button_up<S: Into<String>>(name: S) -> Self {
        Self::categorized(name, EventCategory::ButtonUp)
    }

    pub fn analog_update<S: Into<String>>(name: S, value: f32) -> Self {
        let mut record = Self::categorized(name, EventCategory::AnalogUpdate);
        record.put_field(ANALOG_VALUE_FIELD, value);
        record
    }

    pub fn cursor_move<S: Into<String>>(name: S, position: Vec2, normalized: Vec2) -> Self {
        let mut record = Self::categorized(name, EventCategory::CursorMove);
        record.put_field(POSITION_FIELD, vec![position.x, position.y, 0.0]);
        record.put_field(NORMALIZED_POSITION_FIELD, vec![normalized.x, normalized.y, 0.0]);
        record
    }

    pub fn tracker_move<S: Into<String>>(name: S, pose: &Pose) -> Self {
        let mut record = Self::categorized(name, EventCategory::TrackerMove);
        record.put_field(TRANSFORM_FIELD, pose.to_column_major().to_vec());
        record
    }

    // Payload extraction for typed listeners

    pub fn analog_value(&self) -> Result<f32, EventError> {
        self.get_field::<f32>(ANALOG_VALUE_FIELD).copied()
    }

    /// Raw and normalized cursor position
    pub fn cursor_positions(&self) -> Result<(Vec2, Vec2), EventError> {
        let position = self.vec2_field(POSITION_FIELD)?;
        let normalized = self.vec2_field(NORMALIZED_POSITION_FIELD)?;
        Ok((position, normalized))
    }

    pub fn tracker_pose(&self) -> Result<Pose, EventError> {
        let values = self.get_field::<Vec<f32>>(TRANSFORM_FIELD)?;
        let matrix: [f32; 16] = values
            .as_slice()
            .try_into()
            .map_err(|_| self.short_array(TRANSFORM_FIELD))?;
        Ok(Pose::from_column_major(&matrix))
    }

    fn vec2_field(&self, name: &str) -> Result<Vec2, EventError> {
        let values = self.get_field::<Vec<f32>>(name)?;
        if values.len() < 2 {
            return Err(self.short_array(name));
        }
        Ok(Vec2::new(values[0], values[1]))
    }

    // an array with the wrong length is as unusable as a missing one
    fn short_array(&self, name: &str) -> EventError {
        EventError::FieldNotFound {
            event: self.name().to_string(),
            kind: FieldKind::FloatArray,
            name: name.to_string(),
        }
    }
}
