//! # juxta_core - Before/After Image Comparison Engine
//!
//! `juxta_core` is the target-independent heart of Juxta: two stacked images
//! with a draggable divider between them. It owns the load gate, the layout
//! math, the pointer-to-percentage conversion and the markup, and writes to the
//! page only through the [`dom::Surface`] trait.
//!
//! ## Design Philosophy
//!
//! - **Backend-agnostic**: the browser binding and the in-memory test surface
//!   drive the same controller
//! - **JSON-First configuration**: options and image specs are serde types
//! - **Never throws into the host page**: failures degrade to a warning or an
//!   inert slider
//!
//! ## Quick Start
//!
//! ```rust
//! use juxta_core::geometry::{compute_layout_dimensions, NaturalSize};
//! use juxta_core::position::SliderPosition;
//!
//! let dims = compute_layout_dimensions(NaturalSize::new(1600.0, 800.0), 800.0, 0.0);
//! assert_eq!(dims.height, 400.0);
//!
//! let position = SliderPosition::accept(30.0).unwrap();
//! assert_eq!(position.css(), "30.00%");
//! assert_eq!(position.complement_css(), "70.00%");
//! ```
//!
//! ## Modules
//!
//! - [`slider`] - The slider controller and its lifecycle
//! - [`image`] - Image specs and load-tracking wrappers
//! - [`options`] - Slider configuration
//! - [`position`] - Input resolution and accepted positions
//! - [`geometry`] - Sizes, aspect ratios and pointer math
//! - [`markup`] - Element tree assembly and class names
//! - [`dom`] - The `Surface` abstraction and its in-memory implementation
//! - [`errors`] - Structured error types

pub mod dom;
pub mod errors;
pub mod geometry;
pub mod image;
pub mod markup;
pub mod options;
pub mod position;
pub mod slider;

// Re-export commonly used types at crate root for convenience
pub use errors::{JxError, JxResult};
pub use image::{ImageSpec, Side};
pub use options::{Mode, SliderOptions};
pub use slider::{GateStatus, Phase, SliderController};
