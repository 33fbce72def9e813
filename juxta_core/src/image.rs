//! # Images
//!
//! Caller-supplied image descriptors and the runtime wrappers that track
//! whether each image has finished loading.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Input descriptor for one side of the slider.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageSpec {
    /// Image URL
    pub src: String,

    /// Alternative text
    #[serde(default)]
    pub alt: String,

    /// Optional caption shown on this side's layer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    /// Optional photo credit shown in the credit line
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credit: Option<String>,
}

impl ImageSpec {
    pub fn new(src: impl Into<String>) -> Self {
        ImageSpec {
            src: src.into(),
            ..Default::default()
        }
    }

    pub fn with_alt(mut self, alt: impl Into<String>) -> Self {
        self.alt = alt.into();
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_credit(mut self, credit: impl Into<String>) -> Self {
        self.credit = Some(credit.into());
        self
    }
}

/// Which side of the divider an image sits on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// Image A, the left (or top) layer
    Before,
    /// Image B, the right (or bottom) layer
    After,
}

impl Side {
    /// Word used for this side in the credit line
    pub fn credit_heading(self) -> &'static str {
        match self {
            Side::Before => "Before",
            Side::After => "After",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Before => write!(f, "before"),
            Side::After => write!(f, "after"),
        }
    }
}

/// Load progress of one image. `Loaded` and `Failed` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LoadState {
    #[default]
    Pending,
    Loaded,
    Failed,
}

/// One image resource owned by a slider.
#[derive(Debug, Clone)]
pub struct ImageWrapper<I> {
    image: I,
    src: String,
    state: LoadState,
    label: Option<String>,
    credit: Option<String>,
}

impl<I> ImageWrapper<I> {
    /// Wrap an image handle whose load has already been started.
    /// Empty label and credit strings are treated as absent.
    pub fn new(image: I, spec: &ImageSpec) -> Self {
        ImageWrapper {
            image,
            src: spec.src.clone(),
            state: LoadState::Pending,
            label: non_empty(spec.label.as_deref()),
            credit: non_empty(spec.credit.as_deref()),
        }
    }

    pub fn image(&self) -> &I {
        &self.image
    }

    pub fn src(&self) -> &str {
        &self.src
    }

    pub fn state(&self) -> LoadState {
        self.state
    }

    pub fn is_loaded(&self) -> bool {
        self.state == LoadState::Loaded
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn credit(&self) -> Option<&str> {
        self.credit.as_deref()
    }

    /// Record load completion. Returns false if the state was already terminal.
    pub fn mark_loaded(&mut self) -> bool {
        self.transition(LoadState::Loaded)
    }

    /// Record a load error. Returns false if the state was already terminal.
    pub fn mark_failed(&mut self) -> bool {
        self.transition(LoadState::Failed)
    }

    fn transition(&mut self, next: LoadState) -> bool {
        if self.state != LoadState::Pending {
            return false;
        }
        self.state = next;
        true
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value.filter(|v| !v.is_empty()).map(str::to_string)
}
