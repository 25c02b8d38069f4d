//! Wheel segments and visual configuration.
use serde::{Deserialize, Serialize};

pub const DEFAULT_SEGMENT_BACKGROUND_COLOR: &str = "#446688";
pub const DEFAULT_TEXT_COLOR: &str = "#ffffff";
pub const DEFAULT_STROKE_COLOR: &str = "#ffffff";
pub const DEFAULT_SPINNER_BACKGROUND_COLOR: &str = "#eeeeee";
pub const DEFAULT_FONT_SIZE: f64 = 16.0;

/// A downward pointing arrow.
pub const DEFAULT_POINTER_IMAGE: &str = "data:image/svg+xml;utf8,\
<svg xmlns='http://www.w3.org/2000/svg' viewBox='0 0 20 20'>\
<path d='M 2 2 L 18 2 L 10 18 Z' fill='%23222222' stroke='%23ffffff' stroke-width='1'/></svg>";

/// One wedge of the wheel.
///
/// `value` is what the stop callback receives when this segment is selected.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Segment<T = serde_json::Value> {
    pub text: String,
    pub value: T,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
}

impl<T> Segment<T> {
    pub fn new(text: impl Into<String>, value: T) -> Self {
        Segment {
            text: text.into(),
            value,
            background_color: None,
            text_color: None,
            stroke_color: None,
            font_size: None,
        }
    }

    pub fn with_background_color(mut self, color: impl Into<String>) -> Self {
        self.background_color = Some(color.into());
        self
    }

    pub fn with_text_color(mut self, color: impl Into<String>) -> Self {
        self.text_color = Some(color.into());
        self
    }

    pub fn with_stroke_color(mut self, color: impl Into<String>) -> Self {
        self.stroke_color = Some(color.into());
        self
    }

    pub fn with_font_size(mut self, size: f64) -> Self {
        self.font_size = Some(size);
        self
    }
}

/// Everything about the wheel's appearance and timing except its segments.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WheelConfig {
    pub pointer_image: String,
    pub pointer_size: f64,
    /// Where the pointer sits, in degrees clockwise from "up".
    pub pointer_angle: f64,
    /// How far outside the rim the pointer sits.
    pub pointer_offset: f64,
    pub logo_image: Option<String>,
    pub logo_size: f64,
    /// Whether the logo rotates with the segments.
    pub logo_spins: bool,
    pub stroke_color: String,
    pub stroke_width: f64,
    /// Spin duration in seconds.
    pub duration: f64,
    pub revolutions_per_second: f64,
    pub shadow: bool,
    pub spinner_background_color: String,
    pub segment_background_color: String,
    pub text_color: String,
    pub font_size: f64,
}

impl Default for WheelConfig {
    fn default() -> Self {
        WheelConfig {
            pointer_image: DEFAULT_POINTER_IMAGE.to_owned(),
            pointer_size: 20.0,
            pointer_angle: 45.0,
            pointer_offset: 2.0,
            logo_image: None,
            logo_size: 50.0,
            logo_spins: false,
            stroke_color: DEFAULT_STROKE_COLOR.to_owned(),
            stroke_width: 1.0,
            duration: 5.0,
            revolutions_per_second: 3.0,
            shadow: false,
            spinner_background_color: DEFAULT_SPINNER_BACKGROUND_COLOR.to_owned(),
            segment_background_color: DEFAULT_SEGMENT_BACKGROUND_COLOR.to_owned(),
            text_color: DEFAULT_TEXT_COLOR.to_owned(),
            font_size: DEFAULT_FONT_SIZE,
        }
    }
}

impl WheelConfig {
    /// The radius of the hub left free for the logo.
    pub fn hub_radius(&self) -> f64 {
        if self.logo_image.is_some() {
            self.logo_size / 2.0
        } else {
            0.0
        }
    }
}

/// Whether a `shadow` attribute value turns the shadow on.
pub fn shadow_enabled(value: &str) -> bool {
    !matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "false" | "0" | "off" | "no"
    )
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn segments_from_json() {
        let segments: Vec<Segment> = serde_json::from_str(
            r##"[
                {"text": "A", "value": 1, "backgroundColor": "#ff0000"},
                {"text": "B", "value": {"prize": "car"}, "fontSize": 12}
            ]"##,
        )
        .unwrap();
        assert_eq!(2, segments.len());
        assert_eq!(Some("#ff0000".to_owned()), segments[0].background_color);
        assert_eq!(serde_json::json!({"prize": "car"}), segments[1].value);
        assert_eq!(Some(12.0), segments[1].font_size);
        assert!(segments[1].text_color.is_none());
    }

    #[test]
    fn partial_config_keeps_defaults() {
        let config: WheelConfig =
            serde_json::from_str(r#"{"pointerAngle": 90, "logoImage": "logo.png"}"#).unwrap();
        assert_eq!(90.0, config.pointer_angle);
        assert_eq!(20.0, config.pointer_size);
        assert_eq!(5.0, config.duration);
        assert_eq!(25.0, config.hub_radius());
        assert_eq!(0.0, WheelConfig::default().hub_radius());
    }

    #[test]
    fn shadow_values() {
        assert!(shadow_enabled("true"));
        assert!(shadow_enabled(""));
        assert!(!shadow_enabled("False"));
        assert!(!shadow_enabled(" off "));
    }
}
