//! # Slider Options
//!
//! Caller configuration, merged over defaults. Options arrive as camelCase
//! JSON so the same document works from JavaScript, from a file passed to the
//! preview CLI, or from Rust.
//!
//! ## Example
//!
//! ```rust
//! use juxta_core::options::{Mode, SliderOptions};
//!
//! let options = SliderOptions::from_json(r#"{ "mode": "vertical", "startingPosition": "30%" }"#).unwrap();
//! assert_eq!(options.mode, Mode::Vertical);
//! assert_eq!(options.starting_position, "30%");
//! assert!(options.animate); // untouched fields keep their defaults
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::{JxError, JxResult};

/// Default divider placement
pub const DEFAULT_STARTING_POSITION: &str = "50%";

/// Orientation of the divider's motion axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Divider moves left/right; layers are sized by width
    #[default]
    Horizontal,
    /// Divider moves top/bottom; layers are sized by height
    Vertical,
}

impl Mode {
    /// Style property that carries the handle offset
    pub fn offset_property(self) -> &'static str {
        match self {
            Mode::Horizontal => "left",
            Mode::Vertical => "top",
        }
    }

    /// Style property that carries each layer's extent
    pub fn extent_property(self) -> &'static str {
        match self {
            Mode::Horizontal => "width",
            Mode::Vertical => "height",
        }
    }

    /// Modifier class added to the track, if any
    pub fn track_class(self) -> Option<&'static str> {
        match self {
            Mode::Horizontal => None,
            Mode::Vertical => Some("vertical"),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Horizontal => write!(f, "horizontal"),
            Mode::Vertical => write!(f, "vertical"),
        }
    }
}

/// Slider configuration.
///
/// `show_credits` is recomputed from the images at construction, so the value
/// supplied here only survives serialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SliderOptions {
    /// Enable the CSS transition class on discrete position jumps
    pub animate: bool,

    /// Render per-side labels when images declare them
    pub show_labels: bool,

    /// Render the credit line
    pub show_credits: bool,

    /// Re-apply container sizing when the window resizes
    pub make_responsive: bool,

    /// Initial divider placement, e.g. "50%"
    pub starting_position: String,

    /// Motion axis
    pub mode: Mode,

    /// Give up waiting for the images after this many milliseconds.
    /// Unset means wait forever.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub load_timeout_ms: Option<u32>,
}

impl Default for SliderOptions {
    fn default() -> Self {
        SliderOptions {
            animate: true,
            show_labels: true,
            show_credits: true,
            make_responsive: true,
            starting_position: DEFAULT_STARTING_POSITION.to_string(),
            mode: Mode::Horizontal,
            load_timeout_ms: None,
        }
    }
}

impl SliderOptions {
    /// Parse options from JSON, filling unspecified fields with defaults.
    /// Unknown fields are ignored.
    pub fn from_json(json: &str) -> JxResult<Self> {
        serde_json::from_str(json).map_err(|e| JxError::invalid_options(e.to_string()))
    }

    /// Merge a JSON object over the defaults one field at a time.
    ///
    /// A field whose value has the wrong type keeps its default and is named
    /// in the returned list instead of invalidating the whole object. Only
    /// input that is not a JSON object is an error.
    pub fn from_json_lenient(json: &str) -> JxResult<(Self, Vec<String>)> {
        let input: Value = serde_json::from_str(json).map_err(|e| JxError::invalid_options(e.to_string()))?;
        let Value::Object(fields) = input else {
            return Err(JxError::invalid_options("expected an object"));
        };

        let mut merged = serde_json::to_value(Self::default()).map_err(|e| JxError::invalid_options(e.to_string()))?;
        let mut rejected = Vec::new();
        for (name, value) in fields {
            let mut candidate = merged.clone();
            if let Some(object) = candidate.as_object_mut() {
                object.insert(name.clone(), value);
            }
            if Self::deserialize(&candidate).is_ok() {
                merged = candidate;
            } else {
                rejected.push(name);
            }
        }

        let options = Self::deserialize(&merged).map_err(|e| JxError::invalid_options(e.to_string()))?;
        Ok((options, rejected))
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> JxResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| JxError::invalid_options(e.to_string()))
    }

    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_starting_position(mut self, position: impl Into<String>) -> Self {
        self.starting_position = position.into();
        self
    }

    pub fn with_animate(mut self, animate: bool) -> Self {
        self.animate = animate;
        self
    }

    pub fn with_show_labels(mut self, show_labels: bool) -> Self {
        self.show_labels = show_labels;
        self
    }

    pub fn with_make_responsive(mut self, make_responsive: bool) -> Self {
        self.make_responsive = make_responsive;
        self
    }

    pub fn with_load_timeout_ms(mut self, timeout_ms: u32) -> Self {
        self.load_timeout_ms = Some(timeout_ms);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = SliderOptions::default();
        assert!(options.animate);
        assert!(options.show_labels);
        assert!(options.show_credits);
        assert!(options.make_responsive);
        assert_eq!(options.starting_position, "50%");
        assert_eq!(options.mode, Mode::Horizontal);
        assert_eq!(options.load_timeout_ms, None);
    }

    #[test]
    fn test_partial_json_merges_over_defaults() {
        let options = SliderOptions::from_json(r#"{"animate": false, "loadTimeoutMs": 3000}"#).unwrap();
        assert!(!options.animate);
        assert_eq!(options.load_timeout_ms, Some(3000));
        assert!(options.show_labels);
        assert_eq!(options.starting_position, "50%");
    }

    #[test]
    fn test_unknown_fields_ignored() {
        let options = SliderOptions::from_json(r#"{"callback": null, "mode": "vertical"}"#).unwrap();
        assert_eq!(options.mode, Mode::Vertical);
    }

    #[test]
    fn test_invalid_mode_rejected() {
        let err = SliderOptions::from_json(r#"{"mode": "diagonal"}"#).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_OPTIONS");
    }

    #[test]
    fn test_lenient_merge_drops_only_bad_fields() {
        let json = r#"{"makeResponsive": null, "startingPosition": 30, "mode": "vertical", "animate": false}"#;
        let (options, rejected) = SliderOptions::from_json_lenient(json).unwrap();
        assert_eq!(options.mode, Mode::Vertical);
        assert!(!options.animate);
        assert!(options.make_responsive);
        assert_eq!(options.starting_position, "50%");
        assert_eq!(rejected, vec!["makeResponsive".to_string(), "startingPosition".to_string()]);
    }

    #[test]
    fn test_lenient_merge_requires_an_object() {
        assert!(SliderOptions::from_json_lenient("[1, 2]").is_err());
        assert!(SliderOptions::from_json_lenient("not json").is_err());

        let (options, rejected) = SliderOptions::from_json_lenient("{}").unwrap();
        assert_eq!(options, SliderOptions::default());
        assert!(rejected.is_empty());
    }

    #[test]
    fn test_serialization_uses_camel_case() {
        let options = SliderOptions::default().with_mode(Mode::Vertical);
        let json = options.to_json().unwrap();
        assert!(json.contains("\"startingPosition\""));
        assert!(json.contains("\"vertical\""));
        assert!(!json.contains("loadTimeoutMs"));

        let roundtrip = SliderOptions::from_json(&json).unwrap();
        assert_eq!(options, roundtrip);
    }

    #[test]
    fn test_mode_properties() {
        assert_eq!(Mode::Horizontal.offset_property(), "left");
        assert_eq!(Mode::Vertical.extent_property(), "height");
        assert_eq!(Mode::Horizontal.track_class(), None);
        assert_eq!(Mode::Vertical.track_class(), Some("vertical"));
    }
}
