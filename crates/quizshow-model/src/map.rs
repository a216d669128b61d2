//! Map questions and their pins.

use serde::{Deserialize, Serialize};

/// Pin diameter used when a map question does not set one.
pub const DEFAULT_PIN_SIZE: u32 = 40;

/// Smallest pin diameter offered by the editor.
pub const MIN_PIN_SIZE: u32 = 20;

/// Largest pin diameter offered by the editor.
pub const MAX_PIN_SIZE: u32 = 100;

fn default_pin_size() -> u32 {
    DEFAULT_PIN_SIZE
}

/// A clickable point on the map carrying one question/answer pair.
///
/// Coordinates are percentages (0-100) of the rendered image bounds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapPin {
    pub id: String,
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub question: String,
    #[serde(default)]
    pub answer: String,
}

impl MapPin {
    /// An empty pin at the given position, clamped onto the image.
    pub fn at(id: impl Into<String>, x: f64, y: f64) -> Self {
        Self {
            id: id.into(),
            x: clamp_percent(x),
            y: clamp_percent(y),
            question: String::new(),
            answer: String::new(),
        }
    }

    pub fn apply(&mut self, update: &PinUpdate) {
        if let Some(x) = update.x {
            self.x = clamp_percent(x);
        }
        if let Some(y) = update.y {
            self.y = clamp_percent(y);
        }
        if let Some(question) = &update.question {
            self.question.clone_from(question);
        }
        if let Some(answer) = &update.answer {
            self.answer.clone_from(answer);
        }
    }
}

/// Partial edit of a single pin.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PinUpdate {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub question: Option<String>,
    pub answer: Option<String>,
}

/// Payload of a `MAP` question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapPayload {
    #[serde(default)]
    pub map_image_url: String,
    #[serde(default = "default_pin_size")]
    pub pin_size: u32,
    #[serde(default)]
    pub pins: Vec<MapPin>,
}

impl Default for MapPayload {
    fn default() -> Self {
        Self {
            map_image_url: String::new(),
            pin_size: DEFAULT_PIN_SIZE,
            pins: Vec::new(),
        }
    }
}

impl MapPayload {
    /// Pin size to render with. Edits clamp on write, but sizes loaded from
    /// older documents are kept verbatim, so they are clamped here too and
    /// zero means "unset".
    pub fn effective_pin_size(&self) -> u32 {
        if self.pin_size == 0 {
            DEFAULT_PIN_SIZE
        } else {
            self.pin_size.clamp(MIN_PIN_SIZE, MAX_PIN_SIZE)
        }
    }

    pub fn pin(&self, id: &str) -> Option<&MapPin> {
        self.pins.iter().find(|pin| pin.id == id)
    }

    pub fn pin_mut(&mut self, id: &str) -> Option<&mut MapPin> {
        self.pins.iter_mut().find(|pin| pin.id == id)
    }
}

fn clamp_percent(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pins_are_clamped_onto_the_image() {
        let pin = MapPin::at("p", -5.0, 140.0);
        assert_eq!(pin.x, 0.0);
        assert_eq!(pin.y, 100.0);

        let pin = MapPin::at("p", f64::NAN, 50.5);
        assert_eq!(pin.x, 0.0);
        assert_eq!(pin.y, 50.5);
    }

    #[test]
    fn effective_pin_size_defaults_and_clamps() {
        let mut payload = MapPayload::default();
        assert_eq!(payload.effective_pin_size(), DEFAULT_PIN_SIZE);
        payload.pin_size = 0;
        assert_eq!(payload.effective_pin_size(), DEFAULT_PIN_SIZE);
        payload.pin_size = 5;
        assert_eq!(payload.effective_pin_size(), MIN_PIN_SIZE);
        payload.pin_size = 400;
        assert_eq!(payload.effective_pin_size(), MAX_PIN_SIZE);
        payload.pin_size = 64;
        assert_eq!(payload.effective_pin_size(), 64);
    }

    #[test]
    fn pin_update_is_partial() {
        let mut pin = MapPin::at("p", 10.0, 20.0);
        pin.apply(&PinUpdate {
            answer: Some("Paris".to_string()),
            ..PinUpdate::default()
        });
        assert_eq!(pin.x, 10.0);
        assert_eq!(pin.answer, "Paris");
        assert!(pin.question.is_empty());
    }
}
