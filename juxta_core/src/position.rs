//! # Slider Position
//!
//! Resolution of caller input (numbers, percentage strings, pointer samples)
//! into an accepted divider position.
//!
//! A position is rounded to two decimals before it is judged, and is only
//! accepted when strictly between 0 and 100. The edges are rejected so that
//! neither layer can collapse to nothing.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::geometry::{pointer_percent, PageBox, PointerSample};
use crate::options::Mode;

/// Anything the slider can be moved to
#[derive(Debug, Clone, PartialEq)]
pub enum SliderInput {
    /// A percentage as a number
    Percent(f64),
    /// A percentage string such as "30%"
    Text(String),
    /// A pointer event sample, converted through the track geometry
    Pointer(PointerSample),
}

impl From<f64> for SliderInput {
    fn from(value: f64) -> Self {
        SliderInput::Percent(value)
    }
}

impl From<&str> for SliderInput {
    fn from(value: &str) -> Self {
        SliderInput::Text(value.to_string())
    }
}

impl From<String> for SliderInput {
    fn from(value: String) -> Self {
        SliderInput::Text(value)
    }
}

impl From<PointerSample> for SliderInput {
    fn from(sample: PointerSample) -> Self {
        SliderInput::Pointer(sample)
    }
}

impl SliderInput {
    /// Raw percentage before rounding, or `None` when the input carries no number
    pub fn raw_percent(&self, track: PageBox, mode: Mode) -> Option<f64> {
        match self {
            SliderInput::Percent(value) => Some(*value),
            SliderInput::Text(text) => parse_percent_text(text),
            SliderInput::Pointer(sample) => pointer_percent(track, *sample, mode),
        }
    }
}

/// Parse the leading integer of a percentage string.
///
/// Mirrors integer-prefix parsing: leading whitespace and an optional sign are
/// allowed, anything after the digits is ignored, and fractional parts are
/// dropped (`"33.7%"` is 33).
pub fn parse_percent_text(text: &str) -> Option<f64> {
    let trimmed = text.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digits: &str = {
        let end = rest.find(|c: char| !c.is_ascii_digit()).unwrap_or(rest.len());
        &rest[..end]
    };
    if digits.is_empty() {
        return None;
    }

    let value: f64 = digits.parse().ok()?;
    Some(if negative { -value } else { value })
}

/// An accepted divider position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SliderPosition {
    /// Percentage occupied by layer A, two-decimal precision
    pub value: f64,
}

impl SliderPosition {
    /// Round `raw` to two decimals and accept it only when 0 < value < 100.
    ///
    /// Ties round up (12.125 becomes 12.13), matching how browsers format
    /// fixed-point numbers.
    pub fn accept(raw: f64) -> Option<Self> {
        if !raw.is_finite() {
            return None;
        }
        let value = (raw * 100.0).round() / 100.0;
        if value > 0.0 && value < 100.0 {
            Some(SliderPosition { value })
        } else {
            None
        }
    }

    /// Style value for layer A and the handle offset, e.g. "30.00%"
    pub fn css(&self) -> String {
        format!("{:.2}%", self.value)
    }

    /// Style value for layer B, the complement of layer A
    pub fn complement_css(&self) -> String {
        format!("{:.2}%", 100.0 - self.value)
    }
}

impl fmt::Display for SliderPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}%", self.value)
    }
}
