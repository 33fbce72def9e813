//! # Slider Controller
//!
//! Owns the two image wrappers, the assembled markup and the divider position.
//!
//! ## Lifecycle
//!
//! ```text
//! Constructed ──(both images loaded)──> DomBuilt ──> Initialized ──> Destroyed
//!      │
//!      └──(image error / load timeout)──> Failed
//! ```
//!
//! The controller does not register listeners itself. A host binding forwards
//! window resizes and track pointer events to [`SliderController::on_resize`]
//! and the `on_pointer_*` handlers.
//!
//! ## Example
//!
//! ```rust
//! use juxta_core::dom::memory::MemorySurface;
//! use juxta_core::dom::Surface;
//! use juxta_core::image::{ImageSpec, Side};
//! use juxta_core::options::SliderOptions;
//! use juxta_core::slider::{GateStatus, SliderController};
//!
//! let surface = MemorySurface::new();
//! let container = surface.create_element("div").unwrap();
//! surface.set_rendered_size(container, 800.0, 600.0);
//!
//! let images = [ImageSpec::new("before.jpg"), ImageSpec::new("after.jpg")];
//! let options = SliderOptions::default().with_starting_position("30%");
//! let mut slider = SliderController::new(surface, container, &images, options).unwrap();
//!
//! for side in [Side::Before, Side::After] {
//!     let image = *slider.image(side).image();
//!     slider.surface().set_natural_size(image, 1000.0, 500.0);
//! }
//!
//! assert_eq!(slider.mark_loaded(Side::Before), GateStatus::Waiting);
//! assert_eq!(slider.mark_loaded(Side::After), GateStatus::Initialized);
//! assert_eq!(slider.position().as_deref(), Some("30.00%"));
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::dom::Surface;
use crate::errors::{JxError, JxResult};
use crate::geometry::{compute_layout_dimensions, ratios_match, Dimensions, PageBox, PointerSample};
use crate::image::{ImageSpec, ImageWrapper, LoadState, Side};
use crate::markup::{self, SliderDom, ROOT_CLASS, TRANSITION_CLASS};
use crate::options::{Mode, SliderOptions};
use crate::position::{SliderInput, SliderPosition};

/// Where a controller is in its lifecycle. Phases never revert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Waiting for both images
    Constructed,
    /// Markup assembled, initialization pending
    DomBuilt,
    /// Live: responds to resize and pointer input
    Initialized,
    /// An image failed or the load timed out; the slider will never build
    Failed,
    /// Torn down by the host
    Destroyed,
}

/// Outcome of a pass through the "both images loaded" gate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateStatus {
    /// At least one image is still pending
    Waiting,
    /// This call built and initialized the slider
    Initialized,
    /// An earlier call already built the slider
    AlreadyInitialized,
    /// The slider cannot be built
    Failed,
}

/// Invoked once, right after initialization
pub type ReadyCallback<S> = Box<dyn FnOnce(&SliderController<S>)>;

pub struct SliderController<S: Surface> {
    id: Uuid,
    surface: S,
    container: S::Node,
    before: ImageWrapper<S::Image>,
    after: ImageWrapper<S::Image>,
    options: SliderOptions,
    phase: Phase,
    dom: Option<SliderDom<S::Node>>,
    credit_line: Option<S::Node>,
    position: Option<SliderPosition>,
    dragging: bool,
    ready_callback: Option<ReadyCallback<S>>,
}

impl<S: Surface> SliderController<S> {
    /// Create a slider in `container` and start loading both images.
    ///
    /// Exactly two images are required. The credit line is shown exactly when
    /// at least one image declares a credit, whatever `options` says.
    pub fn new(surface: S, container: S::Node, images: &[ImageSpec], options: SliderOptions) -> JxResult<Self> {
        let id = Uuid::new_v4();

        let [before_spec, after_spec] = images else {
            warn!(slider = %id, found = images.len(), "The images parameter takes two image objects");
            return Err(JxError::wrong_image_count(images.len()));
        };

        let before_image = surface.create_image(&before_spec.src, &before_spec.alt)?;
        let after_image = surface.create_image(&after_spec.src, &after_spec.alt)?;
        let before = ImageWrapper::new(before_image, before_spec);
        let after = ImageWrapper::new(after_image, after_spec);

        let mut options = options;
        options.show_credits = before.credit().is_some() || after.credit().is_some();

        debug!(slider = %id, mode = %options.mode, before = before.src(), after = after.src(), "slider constructed");

        Ok(SliderController {
            id,
            surface,
            container,
            before,
            after,
            options,
            phase: Phase::Constructed,
            dom: None,
            credit_line: None,
            position: None,
            dragging: false,
            ready_callback: None,
        })
    }

    /// Run `callback` once the slider has initialized
    pub fn with_ready_callback(mut self, callback: impl FnOnce(&SliderController<S>) + 'static) -> Self {
        self.ready_callback = Some(Box::new(callback));
        self
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn options(&self) -> &SliderOptions {
        &self.options
    }

    pub fn mode(&self) -> Mode {
        self.options.mode
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn container(&self) -> &S::Node {
        &self.container
    }

    /// Assembled markup, once built
    pub fn dom(&self) -> Option<&SliderDom<S::Node>> {
        self.dom.as_ref()
    }

    /// Credit line element, if one was rendered
    pub fn credit_line(&self) -> Option<&S::Node> {
        self.credit_line.as_ref()
    }

    pub fn image(&self, side: Side) -> &ImageWrapper<S::Image> {
        match side {
            Side::Before => &self.before,
            Side::After => &self.after,
        }
    }

    fn image_mut(&mut self, side: Side) -> &mut ImageWrapper<S::Image> {
        match side {
            Side::Before => &mut self.before,
            Side::After => &mut self.after,
        }
    }

    /// Current divider position as a style string, e.g. "30.00%"
    pub fn position(&self) -> Option<String> {
        self.position.as_ref().map(SliderPosition::css)
    }

    pub fn position_value(&self) -> Option<f64> {
        self.position.as_ref().map(|p| p.value)
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn is_ready(&self) -> bool {
        self.phase == Phase::Initialized
    }

    // ------------------------------------------------------------------
    // Load gate
    // ------------------------------------------------------------------

    /// Record that one image finished loading, then run the gate.
    pub fn mark_loaded(&mut self, side: Side) -> GateStatus {
        if self.image_mut(side).mark_loaded() {
            debug!(slider = %self.id, %side, "image loaded");
        }
        self.on_images_loaded()
    }

    /// Record that one image failed to load.
    ///
    /// Returns the error when this moved the slider to `Failed`.
    pub fn mark_failed(&mut self, side: Side) -> Option<JxError> {
        if !self.image_mut(side).mark_failed() {
            return None;
        }
        let src = self.image(side).src().to_string();
        warn!(slider = %self.id, %side, src = %src, "image failed to load");

        if self.phase != Phase::Constructed {
            return None;
        }
        self.phase = Phase::Failed;
        Some(JxError::image_load_failed(side.to_string(), src))
    }

    /// Give up waiting for the images.
    ///
    /// Returns the error when this moved the slider to `Failed`; a slider that
    /// already built ignores the timeout.
    pub fn fail_load_timeout(&mut self, waited_ms: u32) -> Option<JxError> {
        if self.phase != Phase::Constructed {
            return None;
        }
        warn!(slider = %self.id, waited_ms, "images did not load in time");
        self.phase = Phase::Failed;
        Some(JxError::load_timeout(waited_ms))
    }

    /// The load-completion hook.
    ///
    /// Builds and initializes the slider the first time both images read as
    /// loaded, in whichever order they arrived. Later calls are no-ops.
    pub fn on_images_loaded(&mut self) -> GateStatus {
        match self.phase {
            Phase::Constructed => {}
            Phase::DomBuilt | Phase::Initialized => return GateStatus::AlreadyInitialized,
            Phase::Failed | Phase::Destroyed => return GateStatus::Failed,
        }

        if self.before.state() == LoadState::Failed || self.after.state() == LoadState::Failed {
            return GateStatus::Failed;
        }
        if !(self.before.is_loaded() && self.after.is_loaded()) {
            return GateStatus::Waiting;
        }

        if let Err(e) = self.build_dom_tree().and_then(|_| self.initialize()) {
            warn!(slider = %self.id, error = %e, "slider setup failed");
            self.phase = Phase::Failed;
            if let Err(e) = self.unmount() {
                debug!(slider = %self.id, error = %e, "could not remove partial markup");
            }
            return GateStatus::Failed;
        }
        GateStatus::Initialized
    }

    // ------------------------------------------------------------------
    // Layout
    // ------------------------------------------------------------------

    /// Fill in the missing side of a box using image A's natural ratio.
    pub fn compute_layout_dimensions(&self, width: f64, height: f64) -> Dimensions {
        let reference = self.surface.natural_size(self.before.image());
        compute_layout_dimensions(reference, width, height)
    }

    /// Lock the container's size to image A's aspect ratio.
    pub fn apply_container_sizing(&self) -> JxResult<Dimensions> {
        let (width, height) = self.surface.rendered_size(&self.container);
        let dims = self.compute_layout_dimensions(width, height);
        self.surface.set_style(&self.container, "height", &format!("{}px", dims.height))?;
        self.surface.set_style(&self.container, "width", &format!("{}px", dims.width))?;
        Ok(dims)
    }

    /// Whether both images share an aspect ratio. A mismatch is allowed but
    /// distorts one side.
    pub fn validate_aspect_ratio_match(&self) -> bool {
        ratios_match(
            self.surface.natural_size(self.before.image()),
            self.surface.natural_size(self.after.image()),
        )
    }

    // ------------------------------------------------------------------
    // Construction
    // ------------------------------------------------------------------

    fn build_dom_tree(&mut self) -> JxResult<()> {
        self.surface.add_class(&self.container, ROOT_CLASS)?;
        self.apply_container_sizing()?;

        let dom = markup::assemble(
            &self.surface,
            &self.container,
            self.before.image(),
            self.after.image(),
            self.options.mode,
        )?;
        self.dom = Some(dom);
        self.phase = Phase::DomBuilt;
        Ok(())
    }

    fn initialize(&mut self) -> JxResult<()> {
        if !self.validate_aspect_ratio_match() {
            warn!(
                slider = %self.id,
                "Check that the two images have the same aspect ratio for the slider to work correctly."
            );
        }

        let starting = self.options.starting_position.clone();
        if self.update_slider_position(starting.as_str(), false)?.is_none() {
            debug!(slider = %self.id, starting = %starting, "starting position rejected");
        }

        if self.options.show_labels {
            self.render_labels()?;
        }
        if self.options.show_credits {
            self.render_credits()?;
        }

        self.phase = Phase::Initialized;
        info!(slider = %self.id, position = ?self.position(), "slider initialized");

        if let Some(callback) = self.ready_callback.take() {
            callback(self);
        }
        Ok(())
    }

    fn render_labels(&self) -> JxResult<()> {
        let Some(dom) = &self.dom else {
            return Err(JxError::not_initialized("render_labels"));
        };
        if let Some(label) = self.before.label() {
            markup::display_label(&self.surface, &dom.left_layer, label)?;
        }
        if let Some(label) = self.after.label() {
            markup::display_label(&self.surface, &dom.right_layer, label)?;
        }
        Ok(())
    }

    fn render_credits(&mut self) -> JxResult<()> {
        let credits: Vec<(&str, &str)> = [Side::Before, Side::After]
            .into_iter()
            .filter_map(|side| self.image(side).credit().map(|c| (side.credit_heading(), c)))
            .collect();
        let line = markup::display_credits(&self.surface, &self.container, &credits)?;
        self.credit_line = Some(line);
        Ok(())
    }

    // ------------------------------------------------------------------
    // Position
    // ------------------------------------------------------------------

    /// Move the divider.
    ///
    /// Returns the accepted position, or `None` when the input resolved to a
    /// value outside (0, 100) and was dropped. The transition class is applied
    /// only when both `options.animate` and `animate` are set.
    pub fn update_slider_position(
        &mut self,
        input: impl Into<SliderInput>,
        animate: bool,
    ) -> JxResult<Option<SliderPosition>> {
        let input = input.into();
        let Some(dom) = &self.dom else {
            return Err(JxError::not_initialized("update_slider_position"));
        };
        let mode = self.options.mode;

        let track = match input {
            SliderInput::Pointer(_) => self.surface.page_box(&dom.track),
            _ => PageBox::default(),
        };
        let Some(position) = input.raw_percent(track, mode).and_then(SliderPosition::accept) else {
            return Ok(None);
        };

        for node in dom.animated() {
            self.surface.remove_class(node, TRANSITION_CLASS)?;
        }
        if self.options.animate && animate {
            for node in dom.animated() {
                self.surface.add_class(node, TRANSITION_CLASS)?;
            }
        }

        let css = position.css();
        self.surface.set_style(&dom.handle, mode.offset_property(), &css)?;
        self.surface.set_style(&dom.left_layer, mode.extent_property(), &css)?;
        self.surface
            .set_style(&dom.right_layer, mode.extent_property(), &position.complement_css())?;

        self.position = Some(position.clone());
        Ok(Some(position))
    }

    /// Programmatic jump, animated when the options allow it
    pub fn set_position(&mut self, input: impl Into<SliderInput>) -> JxResult<Option<SliderPosition>> {
        if self.phase != Phase::Initialized {
            return Err(JxError::not_initialized("set_position"));
        }
        self.update_slider_position(input, true)
    }

    // ------------------------------------------------------------------
    // Event handlers
    // ------------------------------------------------------------------

    /// Whether the host should forward window resizes to [`Self::on_resize`]
    pub fn tracks_window_resize(&self) -> bool {
        self.is_ready() && self.options.make_responsive
    }

    /// Window resize: keep the container locked to image A's ratio
    pub fn on_resize(&self) {
        if !self.tracks_window_resize() {
            return;
        }
        if let Err(e) = self.apply_container_sizing() {
            warn!(slider = %self.id, error = %e, "resize failed");
        }
    }

    /// Press on the track: jump (animated) and start a drag session
    pub fn on_pointer_down(&mut self, sample: PointerSample) {
        if self.phase != Phase::Initialized {
            return;
        }
        self.pointer_update(sample, true);
        self.dragging = true;
    }

    /// Pointer moved over the track: follow it while a session is active
    pub fn on_pointer_move(&mut self, sample: PointerSample) {
        if self.phase != Phase::Initialized || !self.dragging {
            return;
        }
        self.pointer_update(sample, false);
    }

    /// Release ends the session.
    ///
    /// No final animated update is issued, so the transition class is not
    /// engaged when a drag ends.
    pub fn on_pointer_up(&mut self) {
        self.dragging = false;
    }

    fn pointer_update(&mut self, sample: PointerSample, animate: bool) {
        if let Err(e) = self.update_slider_position(sample, animate) {
            warn!(slider = %self.id, error = %e, "pointer update failed");
        }
    }

    // ------------------------------------------------------------------
    // Teardown
    // ------------------------------------------------------------------

    /// Remove everything the slider added to the container. The controller is
    /// inert afterwards. Container size styles are left in place.
    pub fn teardown(&mut self) -> JxResult<()> {
        if self.phase == Phase::Destroyed {
            return Ok(());
        }
        self.phase = Phase::Destroyed;
        self.unmount()?;
        debug!(slider = %self.id, "slider torn down");
        Ok(())
    }

    fn unmount(&mut self) -> JxResult<()> {
        self.dragging = false;
        self.position = None;

        if let Some(dom) = self.dom.take() {
            self.surface.remove_child(&self.container, &dom.track)?;
        }
        if let Some(line) = self.credit_line.take() {
            self.surface.remove_child(&self.container, &line)?;
        }
        self.surface.remove_class(&self.container, ROOT_CLASS)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;
    use crate::dom::memory::{MemorySurface, NodeId};
    use crate::geometry::PointerSample;

    fn specs() -> Vec<ImageSpec> {
        vec![
            ImageSpec::new("before.jpg").with_alt("Before"),
            ImageSpec::new("after.jpg").with_alt("After"),
        ]
    }

    fn slider_with(images: &[ImageSpec], options: SliderOptions) -> SliderController<MemorySurface> {
        let surface = MemorySurface::new();
        let container = surface.create_element("div").unwrap();
        surface.set_rendered_size(container, 800.0, 600.0);
        SliderController::new(surface, container, images, options).unwrap()
    }

    fn set_sizes(slider: &SliderController<MemorySurface>, before: (f64, f64), after: (f64, f64)) {
        let surface = slider.surface();
        surface.set_natural_size(*slider.image(Side::Before).image(), before.0, before.1);
        surface.set_natural_size(*slider.image(Side::After).image(), after.0, after.1);
    }

    fn ready(options: SliderOptions) -> SliderController<MemorySurface> {
        let mut slider = slider_with(&specs(), options);
        set_sizes(&slider, (1000.0, 500.0), (1000.0, 500.0));
        slider.mark_loaded(Side::Before);
        assert_eq!(slider.mark_loaded(Side::After), GateStatus::Initialized);
        slider
    }

    fn dom(slider: &SliderController<MemorySurface>) -> SliderDom<NodeId> {
        slider.dom().unwrap().clone()
    }

    fn style(slider: &SliderController<MemorySurface>, node: NodeId, property: &str) -> Option<String> {
        slider.surface().style(node, property)
    }

    #[test]
    fn test_wrong_image_count() {
        let surface = MemorySurface::new();
        let container = surface.create_element("div").unwrap();
        let result = SliderController::new(surface, container, &specs()[..1], SliderOptions::default());
        assert_eq!(result.err(), Some(JxError::wrong_image_count(1)));
    }

    #[test]
    fn test_gate_waits_for_both_images() {
        let mut slider = slider_with(&specs(), SliderOptions::default());
        set_sizes(&slider, (1000.0, 500.0), (1000.0, 500.0));

        assert_eq!(slider.on_images_loaded(), GateStatus::Waiting);
        assert_eq!(slider.mark_loaded(Side::After), GateStatus::Waiting);
        assert_eq!(slider.phase(), Phase::Constructed);
        assert!(slider.dom().is_none());

        assert_eq!(slider.mark_loaded(Side::Before), GateStatus::Initialized);
        assert_eq!(slider.phase(), Phase::Initialized);
    }

    #[test]
    fn test_gate_builds_once() {
        let mut slider = ready(SliderOptions::default());
        let container = *slider.container();
        let children = slider.surface().child_elements(container).len();

        assert_eq!(slider.on_images_loaded(), GateStatus::AlreadyInitialized);
        assert_eq!(slider.mark_loaded(Side::Before), GateStatus::AlreadyInitialized);
        assert_eq!(slider.surface().child_elements(container).len(), children);
        assert_eq!(slider.surface().find_all_by_class(container, "jx-slider").len(), 1);
    }

    #[test]
    fn test_starting_position_horizontal() {
        let slider = ready(SliderOptions::default().with_starting_position("30%"));
        let parts = dom(&slider);
        assert_eq!(style(&slider, parts.handle, "left").as_deref(), Some("30.00%"));
        assert_eq!(style(&slider, parts.left_layer, "width").as_deref(), Some("30.00%"));
        assert_eq!(style(&slider, parts.right_layer, "width").as_deref(), Some("70.00%"));
        assert_eq!(slider.position().as_deref(), Some("30.00%"));
        // No transition on initial placement
        assert!(!slider.surface().has_class(parts.handle, "transition"));
    }

    #[test]
    fn test_starting_position_vertical() {
        let slider = ready(SliderOptions::default().with_mode(Mode::Vertical).with_starting_position("25%"));
        let parts = dom(&slider);
        assert!(slider.surface().has_class(parts.track, "vertical"));
        assert_eq!(style(&slider, parts.handle, "top").as_deref(), Some("25.00%"));
        assert_eq!(style(&slider, parts.left_layer, "height").as_deref(), Some("25.00%"));
        assert_eq!(style(&slider, parts.right_layer, "height").as_deref(), Some("75.00%"));
        assert_eq!(style(&slider, parts.handle, "left"), None);
    }

    #[test]
    fn test_update_extents_are_complementary() {
        let mut slider = ready(SliderOptions::default());
        let parts = dom(&slider);
        slider.update_slider_position(62.5, false).unwrap();
        assert_eq!(style(&slider, parts.left_layer, "width").as_deref(), Some("62.50%"));
        assert_eq!(style(&slider, parts.right_layer, "width").as_deref(), Some("37.50%"));
    }

    #[test]
    fn test_update_rejects_edges() {
        let mut slider = ready(SliderOptions::default().with_starting_position("40%"));
        let parts = dom(&slider);

        assert_eq!(slider.update_slider_position(0.0, true).unwrap(), None);
        assert_eq!(slider.update_slider_position(100.0, true).unwrap(), None);
        assert_eq!(slider.update_slider_position("abc", true).unwrap(), None);

        assert_eq!(slider.position().as_deref(), Some("40.00%"));
        assert_eq!(style(&slider, parts.handle, "left").as_deref(), Some("40.00%"));
        assert!(!slider.surface().has_class(parts.handle, "transition"));
    }

    #[test]
    fn test_update_is_idempotent() {
        let mut slider = ready(SliderOptions::default());
        let parts = dom(&slider);
        slider.update_slider_position(45.0, true).unwrap();
        let once = slider.surface().snapshot(parts.track);
        slider.update_slider_position(45.0, true).unwrap();
        let twice = slider.surface().snapshot(parts.track);
        assert_eq!(
            serde_json::to_value(once).unwrap(),
            serde_json::to_value(twice).unwrap()
        );
    }

    #[test]
    fn test_transition_requires_both_flags() {
        let mut slider = ready(SliderOptions::default());
        let parts = dom(&slider);

        slider.update_slider_position(20.0, true).unwrap();
        for node in [parts.handle, parts.left_layer, parts.right_layer] {
            assert!(slider.surface().has_class(node, "transition"));
        }

        slider.update_slider_position(30.0, false).unwrap();
        for node in [parts.handle, parts.left_layer, parts.right_layer] {
            assert!(!slider.surface().has_class(node, "transition"));
        }

        let mut still = ready(SliderOptions::default().with_animate(false));
        let parts = dom(&still);
        still.update_slider_position(20.0, true).unwrap();
        assert!(!still.surface().has_class(parts.handle, "transition"));
    }

    #[test]
    fn test_update_before_build_is_an_error() {
        let mut slider = slider_with(&specs(), SliderOptions::default());
        let err = slider.update_slider_position(50.0, false).unwrap_err();
        assert_eq!(err.error_code(), "NOT_INITIALIZED");
        assert!(slider.set_position(50.0).is_err());
    }

    #[test]
    fn test_layout_dimensions() {
        let slider = ready(SliderOptions::default());
        let dims = slider.compute_layout_dimensions(800.0, 0.0);
        assert_eq!((dims.height, dims.ratio), (400.0, 2.0));
        assert_eq!(slider.compute_layout_dimensions(0.0, 400.0).width, 800.0);
    }

    #[test]
    fn test_container_sizing_locks_ratio() {
        let slider = ready(SliderOptions::default());
        let container = *slider.container();
        assert_eq!(style(&slider, container, "width").as_deref(), Some("800px"));
        assert_eq!(style(&slider, container, "height").as_deref(), Some("400px"));
        assert!(slider.surface().has_class(container, "juxtapose"));

        slider.surface().set_rendered_size(container, 500.0, 400.0);
        slider.on_resize();
        assert_eq!(style(&slider, container, "height").as_deref(), Some("250px"));
    }

    #[test]
    fn test_resize_tracking_follows_make_responsive() {
        let waiting = slider_with(&specs(), SliderOptions::default());
        assert!(!waiting.tracks_window_resize());

        let slider = ready(SliderOptions::default());
        assert!(slider.tracks_window_resize());

        let fixed = ready(SliderOptions::default().with_make_responsive(false));
        assert!(!fixed.tracks_window_resize());
        let container = *fixed.container();
        fixed.surface().set_rendered_size(container, 500.0, 400.0);
        fixed.on_resize();
        assert_eq!(style(&fixed, container, "height").as_deref(), Some("400px"));
    }

    #[test]
    fn test_cached_image_reported_twice() {
        // A cached image can be seen both as already complete and via its load event
        let mut slider = slider_with(&specs(), SliderOptions::default());
        set_sizes(&slider, (1000.0, 500.0), (1000.0, 500.0));
        let container = *slider.container();

        assert_eq!(slider.mark_loaded(Side::Before), GateStatus::Waiting);
        assert_eq!(slider.mark_loaded(Side::Before), GateStatus::Waiting);
        assert!(slider.surface().children(container).is_empty());

        assert_eq!(slider.mark_loaded(Side::After), GateStatus::Initialized);
        assert_eq!(slider.mark_loaded(Side::After), GateStatus::AlreadyInitialized);
        assert_eq!(slider.mark_loaded(Side::Before), GateStatus::AlreadyInitialized);
        assert_eq!(slider.surface().find_all_by_class(container, "jx-slider").len(), 1);
    }

    #[test]
    fn test_aspect_ratio_validation() {
        let slider = slider_with(&specs(), SliderOptions::default());
        set_sizes(&slider, (1000.0, 500.0), (1000.0, 400.0));
        assert!(!slider.validate_aspect_ratio_match());
        set_sizes(&slider, (1000.0, 500.0), (1000.0, 500.0));
        assert!(slider.validate_aspect_ratio_match());
    }

    #[test]
    fn test_mismatched_ratios_still_render() {
        let mut slider = slider_with(&specs(), SliderOptions::default());
        set_sizes(&slider, (1000.0, 500.0), (1000.0, 400.0));
        slider.mark_loaded(Side::Before);
        assert_eq!(slider.mark_loaded(Side::After), GateStatus::Initialized);
    }

    #[test]
    fn test_credit_forces_show_credits() {
        let images = vec![
            ImageSpec::new("before.jpg").with_credit("USGS"),
            ImageSpec::new("after.jpg"),
        ];
        let mut options = SliderOptions::default();
        options.show_credits = false;
        let mut slider = slider_with(&images, options);
        assert!(slider.options().show_credits);

        set_sizes(&slider, (1000.0, 500.0), (1000.0, 500.0));
        slider.mark_loaded(Side::Before);
        slider.mark_loaded(Side::After);

        let line = *slider.credit_line().unwrap();
        let text = slider.surface().text_content(line);
        assert_eq!(text, "Photo Credits: Before USGS");
        assert!(slider.surface().has_class(line, "jx-credit"));
    }

    #[test]
    fn test_no_credits_hides_credit_line() {
        let slider = ready(SliderOptions::default());
        assert!(!slider.options().show_credits);
        assert!(slider.credit_line().is_none());
        let container = *slider.container();
        assert!(slider.surface().find_by_class(container, "jx-credit").is_none());
    }

    #[test]
    fn test_labels() {
        let images = vec![
            ImageSpec::new("before.jpg").with_label("1990"),
            ImageSpec::new("after.jpg").with_label("2020"),
        ];
        let mut slider = slider_with(&images, SliderOptions::default());
        set_sizes(&slider, (1000.0, 500.0), (1000.0, 500.0));
        slider.mark_loaded(Side::Before);
        slider.mark_loaded(Side::After);
        let parts = dom(&slider);
        assert_eq!(slider.surface().text_content(parts.left_layer), "1990");
        assert_eq!(slider.surface().text_content(parts.right_layer), "2020");

        let mut hidden = slider_with(&images, SliderOptions::default().with_show_labels(false));
        set_sizes(&hidden, (1000.0, 500.0), (1000.0, 500.0));
        hidden.mark_loaded(Side::Before);
        hidden.mark_loaded(Side::After);
        let container = *hidden.container();
        assert!(hidden.surface().find_by_class(container, "jx-label").is_none());
    }

    #[test]
    fn test_drag_session() {
        let mut slider = ready(SliderOptions::default());
        let parts = dom(&slider);
        slider
            .surface()
            .set_page_box(parts.track, PageBox::new(100.0, 0.0, 800.0, 400.0));

        // Moves before a press are ignored
        slider.on_pointer_move(PointerSample::new(500.0, 10.0));
        assert_eq!(slider.position().as_deref(), Some("50.00%"));

        slider.on_pointer_down(PointerSample::new(300.0, 10.0));
        assert!(slider.is_dragging());
        assert_eq!(slider.position().as_deref(), Some("25.00%"));
        assert!(slider.surface().has_class(parts.handle, "transition"));

        slider.on_pointer_move(PointerSample::new(700.0, 10.0));
        assert_eq!(slider.position().as_deref(), Some("75.00%"));
        assert!(!slider.surface().has_class(parts.handle, "transition"));

        // Release does not snap or re-apply the transition
        slider.on_pointer_up();
        assert!(!slider.is_dragging());
        assert!(!slider.surface().has_class(parts.handle, "transition"));
        slider.on_pointer_move(PointerSample::new(200.0, 10.0));
        assert_eq!(slider.position().as_deref(), Some("75.00%"));
    }

    #[test]
    fn test_vertical_pointer_uses_y() {
        let mut slider = ready(SliderOptions::default().with_mode(Mode::Vertical));
        let parts = dom(&slider);
        slider
            .surface()
            .set_page_box(parts.track, PageBox::new(0.0, 50.0, 800.0, 400.0));
        slider.on_pointer_down(PointerSample::new(790.0, 150.0));
        assert_eq!(slider.position().as_deref(), Some("25.00%"));
        assert_eq!(style(&slider, parts.handle, "top").as_deref(), Some("25.00%"));
    }

    #[test]
    fn test_pointer_outside_track_is_dropped() {
        let mut slider = ready(SliderOptions::default());
        let parts = dom(&slider);
        slider
            .surface()
            .set_page_box(parts.track, PageBox::new(100.0, 0.0, 800.0, 400.0));
        slider.on_pointer_down(PointerSample::new(50.0, 10.0));
        assert_eq!(slider.position().as_deref(), Some("50.00%"));
    }

    #[test]
    fn test_ready_callback_runs_once() {
        let calls = Rc::new(Cell::new(0));
        let seen = calls.clone();
        let mut slider = slider_with(&specs(), SliderOptions::default()).with_ready_callback(move |s| {
            assert!(s.is_ready());
            seen.set(seen.get() + 1);
        });
        set_sizes(&slider, (1000.0, 500.0), (1000.0, 500.0));
        slider.mark_loaded(Side::Before);
        slider.mark_loaded(Side::After);
        slider.on_images_loaded();
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_image_failure() {
        let mut slider = slider_with(&specs(), SliderOptions::default());
        slider.mark_loaded(Side::Before);
        let err = slider.mark_failed(Side::After).unwrap();
        assert_eq!(err.error_code(), "IMAGE_LOAD_FAILED");
        assert_eq!(slider.phase(), Phase::Failed);
        assert_eq!(slider.on_images_loaded(), GateStatus::Failed);
        assert!(slider.mark_failed(Side::After).is_none());
    }

    #[test]
    fn test_load_timeout() {
        let mut slider = slider_with(&specs(), SliderOptions::default().with_load_timeout_ms(5000));
        slider.mark_loaded(Side::Before);
        assert_eq!(slider.fail_load_timeout(5000), Some(JxError::load_timeout(5000)));
        assert_eq!(slider.mark_loaded(Side::After), GateStatus::Failed);
        assert!(slider.dom().is_none());

        let mut built = ready(SliderOptions::default());
        assert_eq!(built.fail_load_timeout(5000), None);
        assert_eq!(built.phase(), Phase::Initialized);
    }

    #[test]
    fn test_teardown() {
        let images = vec![ImageSpec::new("a.jpg").with_credit("X"), ImageSpec::new("b.jpg")];
        let mut slider = slider_with(&images, SliderOptions::default());
        set_sizes(&slider, (1000.0, 500.0), (1000.0, 500.0));
        slider.mark_loaded(Side::Before);
        slider.mark_loaded(Side::After);

        slider.teardown().unwrap();
        let container = *slider.container();
        assert!(slider.surface().children(container).is_empty());
        assert!(!slider.surface().has_class(container, "juxtapose"));
        assert_eq!(slider.phase(), Phase::Destroyed);
        assert!(slider.set_position(40.0).is_err());
        slider.teardown().unwrap();
    }

    #[test]
    fn test_failed_setup_leaves_no_markup() {
        let images = vec![ImageSpec::new("a.jpg").with_credit("USGS"), ImageSpec::new("b.jpg")];
        let mut slider = slider_with(&images, SliderOptions::default());
        set_sizes(&slider, (1000.0, 500.0), (1000.0, 500.0));
        // The credit line is written after the track is already mounted
        slider.surface().refuse("append_text");

        slider.mark_loaded(Side::Before);
        assert_eq!(slider.mark_loaded(Side::After), GateStatus::Failed);

        let container = *slider.container();
        assert_eq!(slider.phase(), Phase::Failed);
        assert!(slider.dom().is_none());
        assert!(slider.position().is_none());
        assert!(slider.surface().children(container).is_empty());
        assert!(!slider.surface().has_class(container, "juxtapose"));
        assert_eq!(slider.on_images_loaded(), GateStatus::Failed);
    }
}
