//! The selection session: one image, one selection, one view.
//!
//! A [`SelectionSession`] owns the selection rectangle, the orientation, and
//! the zoom state for a single cropping session. Every mutation leaves the
//! selection valid for the current constraints and oriented image.
//!
//! ```
//! use cropframe::{CropSettings, Orientation, Point, Rect, SelectionSession, Size};
//!
//! let mut session = SelectionSession::show(
//!     Size::new(1200.0, 800.0),
//!     &CropSettings::default(),
//!     Size::new(600.0, 400.0),
//! )?;
//! assert_eq!(session.selection(), Rect::new(120.0, 80.0, 960.0, 640.0));
//!
//! session.rotate_clockwise(1);
//! assert_eq!(session.orientation(), Orientation::Rotate270);
//! assert_eq!(session.oriented_size(), Size::new(800.0, 1200.0));
//! assert_eq!(session.selection(), Rect::new(80.0, 120.0, 640.0, 960.0));
//!
//! session.move_selection(Point::new(-50.0, 0.0));
//! assert_eq!(session.selection().position, Point::new(0.0, 0.0));
//! # Ok::<(), cropframe::SessionError>(())
//! ```

use crate::constraint::{Constraints, Edge, PivotSet, move_within, solve};
use crate::geometry::{Point, Rect, Size};
use crate::orientation::{Orientation, oriented_size, reproject_rect};
use crate::plan::{CropOutcome, CropRequest, Rasterizer, natural_output_size, output_size};
use crate::settings::{CropSettings, initial_selection};
use crate::snap::snap;
use crate::transition::{ZoomSample, ZoomTransition};
use crate::viewport::{
    ZoomState, ZoomTarget, compute_target_zoom, min_scale, restrict_to_viewport, scroll_image,
};

/// Session creation error.
#[derive(Copy, Clone, Debug, PartialEq, thiserror::Error)]
pub enum SessionError {
    /// Image has a zero, negative, or non-finite dimension.
    #[error("image size {width}x{height} is empty or not finite")]
    EmptyImage { width: f64, height: f64 },
    /// Viewport has a zero, negative, or non-finite dimension.
    #[error("viewport size {width}x{height} is empty or not finite")]
    EmptyViewport { width: f64, height: f64 },
}

/// Optional override of the output size: receives the natural `(width,
/// height)` and returns the size to render. Zero results become 1.
pub type ResizePolicy<'a> = &'a dyn Fn(u32, u32) -> (u32, u32);

/// Selection, orientation, and view state for one image.
#[derive(Clone, Debug)]
pub struct SelectionSession {
    settings: CropSettings,
    original_size: Size,
    oriented_size: Size,
    orientation: Orientation,
    /// Bounds resolved against the natural image.
    base_constraints: Constraints,
    /// `base_constraints` limited to the oriented image.
    constraints: Constraints,
    selection: Rect,
    zoom: ZoomState,
    transition: Option<ZoomTransition>,
    auto_zoom: bool,
    pixel_perfect: bool,
    gesture_active: bool,
}

impl SelectionSession {
    /// Start a session for an image of natural size `original`.
    ///
    /// The selection starts as the padded, centered rectangle of the oriented
    /// image, and the view fits the whole image without framing the selection.
    pub fn show(
        original: Size,
        settings: &CropSettings,
        viewport: Size,
    ) -> Result<Self, SessionError> {
        if !original.is_positive() {
            return Err(SessionError::EmptyImage {
                width: original.width,
                height: original.height,
            });
        }
        if !viewport.is_positive() {
            return Err(SessionError::EmptyViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }

        let orientation = settings.initial_orientation;
        let oriented = oriented_size(orientation, original);
        let base_constraints = settings.constraints(original);
        let constraints = base_constraints.for_image(oriented);

        let padded = initial_selection(&settings.padding, oriented);
        let size = solve(
            Rect::from_parts(Point::ORIGIN, padded.size),
            PivotSet::EMPTY,
            &constraints,
            oriented,
        )
        .size;
        let selection = Rect::new(
            (oriented.width - size.width) * 0.5,
            (oriented.height - size.height) * 0.5,
            size.width,
            size.height,
        );

        let mut session = Self {
            settings: settings.clone(),
            original_size: original,
            oriented_size: oriented,
            orientation,
            base_constraints,
            constraints,
            selection,
            zoom: ZoomState::fitted(viewport, oriented),
            transition: None,
            auto_zoom: settings.auto_zoom_enabled,
            pixel_perfect: settings.pixel_perfect,
            gesture_active: false,
        };
        if session.pixel_perfect {
            session.make_pixel_perfect();
        }
        session.reset_view(false);

        log::debug!(
            "session started: image {}x{}, {:?}, selection {:?}, {:?}",
            original.width,
            original.height,
            orientation,
            session.selection,
            session.constraints
        );
        Ok(session)
    }

    // ── Accessors ───────────────────────────────────────────────────────

    /// Settings the session was started with.
    pub fn settings(&self) -> &CropSettings {
        &self.settings
    }

    /// Orientation currently displayed.
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Natural image size.
    pub fn original_size(&self) -> Size {
        self.original_size
    }

    /// Image size under the current orientation.
    pub fn oriented_size(&self) -> Size {
        self.oriented_size
    }

    /// Selection in oriented image space.
    pub fn selection(&self) -> Rect {
        self.selection
    }

    /// Selection in natural image space.
    pub fn source_selection(&self) -> Rect {
        self.orientation
            .transform_rect_to_source(self.selection, self.original_size)
    }

    /// Selection in viewport coordinates at the current zoom.
    pub fn selection_on_screen(&self) -> Rect {
        self.zoom.to_viewport(self.selection)
    }

    /// Bounds in effect for the current orientation.
    pub fn constraints(&self) -> &Constraints {
        &self.constraints
    }

    /// Current scale, pan, and viewport.
    pub fn zoom(&self) -> &ZoomState {
        &self.zoom
    }

    /// The zoom transition in flight, if any.
    pub fn transition(&self) -> Option<&ZoomTransition> {
        self.transition.as_ref()
    }

    /// Whether a zoom transition is in flight.
    pub fn is_transitioning(&self) -> bool {
        self.transition.is_some()
    }

    /// Whether edits end with a zoom-fit.
    pub fn auto_zoom_enabled(&self) -> bool {
        self.auto_zoom
    }

    /// Whether the selection is kept on the integer pixel grid.
    pub fn pixel_perfect(&self) -> bool {
        self.pixel_perfect
    }

    /// Whether a gesture is between `begin_gesture` and `end_gesture`.
    pub fn gesture_active(&self) -> bool {
        self.gesture_active
    }

    // ── Orientation ─────────────────────────────────────────────────────

    /// Switch to `orientation`, carrying the selection along.
    ///
    /// The selection is reprojected, re-solved against the bounds of the new
    /// oriented image, and snapped in pixel-perfect mode. The view is then
    /// reset and, with auto-zoom on, framed instantly.
    pub fn set_orientation(&mut self, orientation: Orientation) {
        let reprojected = reproject_rect(
            self.orientation,
            orientation,
            self.selection,
            self.original_size,
        );
        self.orientation = orientation;
        self.oriented_size = oriented_size(orientation, self.original_size);
        self.constraints = self.base_constraints.for_image(self.oriented_size);
        self.selection = solve(
            reprojected,
            PivotSet::EMPTY,
            &self.constraints,
            self.oriented_size,
        );
        if self.pixel_perfect {
            self.make_pixel_perfect();
        }

        log::debug!(
            "orientation {:?}: oriented {}x{}, selection {:?}",
            orientation,
            self.oriented_size.width,
            self.oriented_size.height,
            self.selection
        );
        self.reset_view(true);
    }

    /// Turn the displayed image clockwise by `steps` quarter turns.
    pub fn rotate_clockwise(&mut self, steps: i32) {
        self.set_orientation(self.orientation.rotate_clockwise(steps));
    }

    /// One clockwise quarter turn.
    pub fn rotate_90_clockwise(&mut self) {
        self.rotate_clockwise(1);
    }

    /// Half turn.
    pub fn rotate_180(&mut self) {
        self.rotate_clockwise(2);
    }

    /// Three clockwise quarter turns, i.e. one counter-clockwise.
    pub fn rotate_270_clockwise(&mut self) {
        self.rotate_clockwise(3);
    }

    /// Mirror the displayed image left-right.
    pub fn flip_horizontal(&mut self) {
        self.set_orientation(self.orientation.flip_horizontal());
    }

    /// Mirror the displayed image top-bottom.
    pub fn flip_vertical(&mut self) {
        self.set_orientation(self.orientation.flip_vertical());
    }

    // ── Selection edits ─────────────────────────────────────────────────

    /// Resize or move the selection. The request is solved against the
    /// current constraints, anchored at `pivot`, and snapped in pixel-perfect
    /// mode. Returns the resulting selection.
    ///
    /// A zoom transition in flight stops at its last sampled state.
    pub fn update_selection(&mut self, position: Point, size: Size, pivot: PivotSet) -> Rect {
        self.cancel_transition();
        let requested = Rect::from_parts(position, size);
        self.selection = solve(requested, pivot, &self.constraints, self.oriented_size);
        if self.pixel_perfect {
            self.make_pixel_perfect();
        }
        self.selection
    }

    /// Drag the whole selection to `position` without resizing it. Like
    /// [`update_selection`](Self::update_selection), this stops any zoom
    /// transition.
    pub fn move_selection(&mut self, position: Point) -> Rect {
        self.cancel_transition();
        self.selection = move_within(position, self.selection.size, self.oriented_size);
        if self.pixel_perfect {
            self.make_pixel_perfect();
        }
        self.selection
    }

    /// Snap the selection to whole pixels.
    pub fn make_pixel_perfect(&mut self) {
        self.selection = snap(self.selection, &self.constraints, self.oriented_size);
    }

    /// Turning pixel-perfect mode on snaps the current selection.
    pub fn set_pixel_perfect(&mut self, enabled: bool) {
        self.pixel_perfect = enabled;
        if enabled {
            self.make_pixel_perfect();
        }
    }

    /// Turning auto-zoom on starts an animated zoom-fit.
    pub fn set_auto_zoom(&mut self, enabled: bool) {
        self.auto_zoom = enabled;
        if enabled {
            self.start_auto_zoom(false);
        }
    }

    // ── Gestures ────────────────────────────────────────────────────────

    /// An input gesture starts. Any zoom transition stops where it is.
    pub fn begin_gesture(&mut self) {
        self.cancel_transition();
        self.gesture_active = true;
    }

    /// The input gesture ends: snap in pixel-perfect mode, then frame the
    /// selection with an animated zoom-fit when auto-zoom is on.
    pub fn end_gesture(&mut self) {
        if !self.gesture_active {
            return;
        }
        self.gesture_active = false;
        if self.pixel_perfect {
            self.make_pixel_perfect();
        }
        if self.auto_zoom {
            self.start_auto_zoom(false);
        }
    }

    /// Pan toward `edge` for a tick of `dt` seconds while a gesture drags
    /// past the viewport. Returns the new pan.
    pub fn scroll(&mut self, edge: Edge, dt: f64) -> Point {
        let distance = self.settings.scroll_speed * dt.max(0.0);
        self.zoom.pan = scroll_image(
            self.zoom.pan,
            edge,
            distance,
            self.zoom.current_scale,
            self.oriented_size,
            self.zoom.viewport_size,
        );
        self.zoom.pan
    }

    // ── View ────────────────────────────────────────────────────────────

    /// Resize the viewport and reset the view, framing the selection.
    pub fn set_viewport_size(&mut self, viewport: Size) -> Result<(), SessionError> {
        if !viewport.is_positive() {
            return Err(SessionError::EmptyViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }
        self.zoom.viewport_size = viewport;
        self.reset_view(true);
        Ok(())
    }

    /// Fit the whole image in the viewport. With `frame_selection` and
    /// auto-zoom on, then zoom instantly onto the selection.
    pub fn reset_view(&mut self, frame_selection: bool) {
        self.cancel_transition();

        let viewport = self.zoom.viewport_size;
        let scale = min_scale(viewport, self.oriented_size);
        self.zoom.min_scale = scale;
        self.zoom.current_scale = scale;
        self.zoom.target_scale = scale;
        self.zoom.pan = restrict_to_viewport(self.zoom.pan, scale, self.oriented_size, viewport);

        if frame_selection && self.auto_zoom {
            self.start_auto_zoom(true);
        }
    }

    /// Compute a zoom-fit for the selection and start moving toward it.
    ///
    /// With `instant` (or a negligible scale change) the target is applied
    /// immediately; otherwise a transition starts and [`advance`](Self::advance)
    /// drives it. Returns the target, or `None` when the view already frames
    /// the selection.
    pub fn start_auto_zoom(&mut self, instant: bool) -> Option<ZoomTarget> {
        self.cancel_transition();

        let target = compute_target_zoom(
            self.selection,
            self.zoom.current_scale,
            self.zoom.pan,
            self.zoom.viewport_size,
            self.oriented_size,
            &self.settings.zoom,
        )?;

        if instant || target.instant {
            self.apply_sample(ZoomSample {
                scale: target.scale,
                pan: target.pan,
                done: true,
            });
        } else {
            self.zoom.target_scale = target.scale;
            self.transition = Some(ZoomTransition::new(
                self.zoom.current_scale,
                self.zoom.pan,
                target,
                self.settings.zoom_duration,
                self.settings.zoom_easing,
            ));
        }
        Some(target)
    }

    /// Advance the zoom transition by `dt` seconds. Returns the sampled
    /// state, or `None` when no transition is running.
    pub fn advance(&mut self, dt: f64) -> Option<ZoomSample> {
        let sample = self.transition.as_mut()?.advance(dt);
        self.apply_sample(sample);
        if sample.done {
            self.transition = None;
        }
        Some(sample)
    }

    /// Stop the zoom transition, keeping the last sampled scale and pan.
    pub fn cancel_transition(&mut self) {
        if self.transition.take().is_some() {
            log::trace!(
                "zoom transition cancelled at scale {}",
                self.zoom.current_scale
            );
        }
        self.zoom.target_scale = self.zoom.current_scale;
    }

    fn apply_sample(&mut self, sample: ZoomSample) {
        self.zoom.current_scale = sample.scale;
        self.zoom.pan = sample.pan;
        if sample.done {
            self.zoom.target_scale = sample.scale;
        }
    }

    // ── Completion ──────────────────────────────────────────────────────

    /// Describe the crop the current selection produces.
    ///
    /// Output size starts from the selection in whole pixels, passes through
    /// `policy`, and is limited to `max_dimension`.
    pub fn crop_request(
        &self,
        max_dimension: u32,
        policy: Option<ResizePolicy<'_>>,
    ) -> CropRequest {
        let natural = natural_output_size(
            self.selection.size,
            self.oriented_size,
            self.constraints.aspect,
        );
        CropRequest {
            orientation: self.orientation,
            original_size: self.original_size,
            oriented_size: self.oriented_size,
            selection: self.selection,
            source_rect: self.source_selection(),
            output: output_size(natural, policy, max_dimension),
        }
    }

    /// Render the selection with `rasterizer`.
    ///
    /// A rasterizer error is logged and reported as [`CropOutcome::Failed`];
    /// the session is left as it was, so the caller may retry or cancel.
    pub fn confirm<R: Rasterizer>(
        &self,
        rasterizer: &mut R,
        policy: Option<ResizePolicy<'_>>,
    ) -> CropOutcome<R::Image> {
        let request = self.crop_request(rasterizer.max_dimension(), policy);
        match rasterizer.render(&request) {
            Ok(image) => {
                log::debug!(
                    "cropped {:?} to {}x{}",
                    request.source_rect,
                    request.output.0,
                    request.output.1
                );
                CropOutcome::Cropped(image)
            }
            Err(e) => {
                log::warn!("crop of {:?} failed: {}", request.source_rect, e);
                CropOutcome::Failed
            }
        }
    }

    /// End the session without cropping.
    pub fn cancel<I>(self) -> CropOutcome<I> {
        log::debug!("session cancelled");
        CropOutcome::Cancelled
    }
}
