//! # Slider Markup
//!
//! Assembly of the element tree the stylesheet expects:
//!
//! ```text
//! container.juxtapose
//! ├── div.jx-slider[.vertical]
//! │   ├── div.jx-handle
//! │   │   ├── div.jx-arrow.jx-left
//! │   │   ├── div.jx-control
//! │   │   │   └── div.jx-controller (role=slider)
//! │   │   └── div.jx-arrow.jx-right
//! │   ├── div.jx-image.jx-left   (image A, optional div.jx-label)
//! │   ├── div.jx-image.jx-right  (image B, optional div.jx-label)
//! │   └── a.jx-knightlab
//! │       ├── div.knightlab-logo
//! │       └── span.juxtapose-name
//! └── div.jx-credit (optional)
//! ```

use crate::dom::Surface;
use crate::errors::JxResult;
use crate::options::Mode;

/// Marker class on the container
pub const ROOT_CLASS: &str = "juxtapose";
pub const TRACK_CLASS: &str = "jx-slider";
pub const HANDLE_CLASS: &str = "jx-handle";
pub const LEFT_ARROW_CLASS: &str = "jx-arrow jx-left";
pub const RIGHT_ARROW_CLASS: &str = "jx-arrow jx-right";
pub const CONTROL_CLASS: &str = "jx-control";
pub const CONTROLLER_CLASS: &str = "jx-controller";
pub const LEFT_LAYER_CLASS: &str = "jx-image jx-left";
pub const RIGHT_LAYER_CLASS: &str = "jx-image jx-right";
pub const LABEL_CLASS: &str = "jx-label";
pub const CREDIT_CLASS: &str = "jx-credit";
pub const ATTRIBUTION_CLASS: &str = "jx-knightlab";
pub const LOGO_CLASS: &str = "knightlab-logo";
pub const PROJECT_NAME_CLASS: &str = "juxtapose-name";
/// Enables the stylesheet's CSS transition
pub const TRANSITION_CLASS: &str = "transition";

pub const ATTRIBUTION_URL: &str = "https://www.idcos.com";
pub const PROJECT_NAME: &str = "JuxtaposeJS";
pub const CREDIT_HEADING: &str = "Photo Credits:";

/// Handles to the elements the controller keeps writing to after assembly.
#[derive(Debug, Clone)]
pub struct SliderDom<N> {
    pub track: N,
    pub handle: N,
    pub left_layer: N,
    pub right_layer: N,
    pub left_arrow: N,
    pub right_arrow: N,
    pub control: N,
    pub controller: N,
    pub attribution: N,
}

impl<N> SliderDom<N> {
    /// Elements that carry the transition class while animating
    pub fn animated(&self) -> [&N; 3] {
        [&self.handle, &self.left_layer, &self.right_layer]
    }
}

fn element<S: Surface>(surface: &S, tag: &str, classes: &str) -> JxResult<S::Node> {
    let node = surface.create_element(tag)?;
    surface.set_class_name(&node, classes);
    Ok(node)
}

/// Build the track subtree inside `container` around the two images.
pub fn assemble<S: Surface>(
    surface: &S,
    container: &S::Node,
    before: &S::Image,
    after: &S::Image,
    mode: Mode,
) -> JxResult<SliderDom<S::Node>> {
    let track = element(surface, "div", TRACK_CLASS)?;
    surface.append_child(container, &track)?;
    if let Some(class) = mode.track_class() {
        surface.add_class(&track, class)?;
    }

    let handle = element(surface, "div", HANDLE_CLASS)?;

    let right_layer = element(surface, "div", RIGHT_LAYER_CLASS)?;
    surface.append_image(&right_layer, after)?;

    let left_layer = element(surface, "div", LEFT_LAYER_CLASS)?;
    surface.append_image(&left_layer, before)?;

    let attribution = element(surface, "a", ATTRIBUTION_CLASS)?;
    surface.set_attribute(&attribution, "href", ATTRIBUTION_URL)?;
    surface.set_attribute(&attribution, "target", "_blank")?;
    surface.set_attribute(&attribution, "rel", "noopener")?;
    let logo = element(surface, "div", LOGO_CLASS)?;
    surface.append_child(&attribution, &logo)?;
    let project_name = element(surface, "span", PROJECT_NAME_CLASS)?;
    surface.set_text(&project_name, PROJECT_NAME);
    surface.append_child(&attribution, &project_name)?;

    surface.append_child(&track, &handle)?;
    surface.append_child(&track, &left_layer)?;
    surface.append_child(&track, &right_layer)?;
    surface.append_child(&track, &attribution)?;

    let left_arrow = element(surface, "div", LEFT_ARROW_CLASS)?;
    let right_arrow = element(surface, "div", RIGHT_ARROW_CLASS)?;
    let control = element(surface, "div", CONTROL_CLASS)?;
    let controller = element(surface, "div", CONTROLLER_CLASS)?;

    // aria-valuenow stays at 50; it is not kept in sync with the divider
    surface.set_attribute(&controller, "tabindex", "0")?;
    surface.set_attribute(&controller, "role", "slider")?;
    surface.set_attribute(&controller, "aria-valuenow", "50")?;
    surface.set_attribute(&controller, "aria-valuemin", "0")?;
    surface.set_attribute(&controller, "aria-valuemax", "100")?;

    surface.append_child(&handle, &left_arrow)?;
    surface.append_child(&handle, &control)?;
    surface.append_child(&handle, &right_arrow)?;
    surface.append_child(&control, &controller)?;

    Ok(SliderDom {
        track,
        handle,
        left_layer,
        right_layer,
        left_arrow,
        right_arrow,
        control,
        controller,
        attribution,
    })
}

/// Append a focusable caption to an image layer.
pub fn display_label<S: Surface>(surface: &S, layer: &S::Node, text: &str) -> JxResult<S::Node> {
    let label = element(surface, "div", LABEL_CLASS)?;
    surface.set_attribute(&label, "tabindex", "0")?;
    surface.set_text(&label, text);
    surface.append_child(layer, &label)?;
    Ok(label)
}

/// Append the credit line to the container.
///
/// Credit text goes in as text nodes, so markup in a credit is shown verbatim.
pub fn display_credits<S: Surface>(
    surface: &S,
    container: &S::Node,
    credits: &[(&str, &str)],
) -> JxResult<S::Node> {
    let line = element(surface, "div", CREDIT_CLASS)?;
    append_emphasis(surface, &line, CREDIT_HEADING)?;

    for (heading, credit) in credits {
        surface.append_text(&line, " ")?;
        append_emphasis(surface, &line, heading)?;
        surface.append_text(&line, &format!(" {}", credit))?;
    }

    surface.append_child(container, &line)?;
    Ok(line)
}

fn append_emphasis<S: Surface>(surface: &S, parent: &S::Node, text: &str) -> JxResult<()> {
    let em = surface.create_element("em")?;
    surface.set_text(&em, text);
    surface.append_child(parent, &em)
}
