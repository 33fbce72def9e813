//! # Document Surface
//!
//! The slider writes to the page only through [`Surface`]. The browser binding
//! implements it over `web-sys`; [`memory::MemorySurface`] implements it over
//! an in-process node arena for tests and headless previews.

pub mod memory;

use std::fmt::Debug;

use crate::errors::JxResult;
use crate::geometry::{NaturalSize, PageBox};

/// Minimal document API the slider needs.
pub trait Surface {
    /// Handle to an element
    type Node: Clone + Debug;
    /// Handle to an image element
    type Image: Clone + Debug;

    /// Create a detached element
    fn create_element(&self, tag: &str) -> JxResult<Self::Node>;

    /// Create an image element and start loading `src`
    fn create_image(&self, src: &str, alt: &str) -> JxResult<Self::Image>;

    fn append_child(&self, parent: &Self::Node, child: &Self::Node) -> JxResult<()>;

    fn append_image(&self, parent: &Self::Node, image: &Self::Image) -> JxResult<()>;

    /// Append a text node
    fn append_text(&self, parent: &Self::Node, text: &str) -> JxResult<()>;

    fn remove_child(&self, parent: &Self::Node, child: &Self::Node) -> JxResult<()>;

    /// Replace the whole class list with a space-separated list
    fn set_class_name(&self, node: &Self::Node, classes: &str);

    fn add_class(&self, node: &Self::Node, class: &str) -> JxResult<()>;

    fn remove_class(&self, node: &Self::Node, class: &str) -> JxResult<()>;

    fn set_attribute(&self, node: &Self::Node, name: &str, value: &str) -> JxResult<()>;

    /// Replace all children with a single text node
    fn set_text(&self, node: &Self::Node, text: &str);

    fn set_style(&self, node: &Self::Node, property: &str, value: &str) -> JxResult<()>;

    /// Current rendered (computed) width and height in pixels
    fn rendered_size(&self, node: &Self::Node) -> (f64, f64);

    /// Bounding box in page coordinates
    fn page_box(&self, node: &Self::Node) -> PageBox;

    /// Intrinsic size of a loaded image
    fn natural_size(&self, image: &Self::Image) -> NaturalSize;
}
