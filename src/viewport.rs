//! Viewport fitting: minimum scale, pan restriction, auto-zoom targets, and
//! edge scrolling.
//!
//! The image is drawn at `pan + p * scale` in viewport coordinates, so a
//! selection at `rect` in oriented image space covers
//! `pan + rect.position * scale` to `pan + rect.max_corner() * scale` on screen.

#[cfg(not(feature = "std"))]
use num_traits::Float;

use crate::constraint::Edge;
use crate::geometry::{Point, Rect, Size, clamp};

/// Fill tolerance when deciding whether the selection sticks out of the viewport.
const OUTSIDE_EPSILON: f64 = 1e-4;

/// Scale changes smaller than this are applied without animation.
const INSTANT_EPSILON: f64 = 1e-3;

/// Auto-zoom fill thresholds.
///
/// A selection filling at most `zoom_in` of the viewport is zoomed in until it
/// fills `zoom_in_fill`; one filling at least `zoom_out` is zoomed out to
/// `zoom_out_fill`.
#[derive(Copy, Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ZoomThresholds {
    /// Fill rate at or below which the view zooms in.
    pub zoom_in: f64,
    /// Fill rate at or above which the view zooms out.
    pub zoom_out: f64,
    /// Fill rate a zoom-in aims for.
    pub zoom_in_fill: f64,
    /// Fill rate a zoom-out aims for.
    pub zoom_out_fill: f64,
}

impl Default for ZoomThresholds {
    fn default() -> Self {
        Self {
            zoom_in: 0.5,
            zoom_out: 0.65,
            zoom_in_fill: 0.64,
            zoom_out_fill: 0.51,
        }
    }
}

/// Current view of the oriented image inside the viewport.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ZoomState {
    /// Scale currently displayed.
    pub current_scale: f64,
    /// Scale the view is heading toward. Equal to `current_scale` when idle.
    pub target_scale: f64,
    /// Viewport size in screen units.
    pub viewport_size: Size,
    /// Offset of the image's bottom-left corner inside the viewport.
    pub pan: Point,
    /// Scale at which the whole image fits the viewport.
    pub min_scale: f64,
}

impl ZoomState {
    /// A view that fits `image` inside `viewport`, centered.
    pub fn fitted(viewport: Size, image: Size) -> Self {
        let scale = min_scale(viewport, image);
        Self {
            current_scale: scale,
            target_scale: scale,
            viewport_size: viewport,
            pan: restrict_to_viewport(Point::ORIGIN, scale, image, viewport),
            min_scale: scale,
        }
    }

    /// Where `rect` (oriented image space) lands in the viewport.
    pub fn to_viewport(&self, rect: Rect) -> Rect {
        Rect::from_parts(
            Point::new(
                self.pan.x + rect.position.x * self.current_scale,
                self.pan.y + rect.position.y * self.current_scale,
            ),
            rect.size.scaled(self.current_scale),
        )
    }
}

/// A zoom-fit destination.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ZoomTarget {
    pub scale: f64,
    pub pan: Point,
    /// The change is too small to animate.
    pub instant: bool,
}

/// Scale at which `image` exactly fits `viewport` on its tighter axis.
pub fn min_scale(viewport: Size, image: Size) -> f64 {
    (viewport.width / image.width).min(viewport.height / image.height)
}

/// Keep the scaled image covering the viewport.
///
/// An axis where the scaled image is smaller than the viewport is centered;
/// otherwise the pan is clamped to `[viewport - scaled, 0]` so no empty space
/// shows past the image edge.
pub fn restrict_to_viewport(pan: Point, scale: f64, image: Size, viewport: Size) -> Point {
    let scaled = image.scaled(scale);
    let axis = |pan: f64, scaled: f64, viewport: f64| {
        if scaled < viewport {
            (viewport - scaled) * 0.5
        } else {
            clamp(pan, viewport - scaled, 0.0)
        }
    };
    Point::new(
        axis(pan.x, scaled.width, viewport.width),
        axis(pan.y, scaled.height, viewport.height),
    )
}

/// Decide whether the view should zoom to frame `selection`, and where to.
///
/// Returns `None` when the selection's fill rate sits between the two
/// thresholds and it is fully visible at the current scale and pan.
pub fn compute_target_zoom(
    selection: Rect,
    scale: f64,
    pan: Point,
    viewport: Size,
    image: Size,
    thresholds: &ZoomThresholds,
) -> Option<ZoomTarget> {
    let size = selection.size;
    let scaled = size.scaled(scale);
    let fill_rate = (scaled.width / viewport.width).max(scaled.height / viewport.height);
    let fill_scale =
        |fill: f64| (viewport.width * fill / size.width).min(viewport.height * fill / size.height);

    let target = if fill_rate <= thresholds.zoom_in {
        fill_scale(thresholds.zoom_in_fill)
    } else if fill_rate >= thresholds.zoom_out {
        fill_scale(thresholds.zoom_out_fill)
    } else {
        let lo = Point::new(
            pan.x + selection.position.x * scale,
            pan.y + selection.position.y * scale,
        );
        let hi = lo.offset(scaled);
        let outside = lo.x < -OUTSIDE_EPSILON
            || lo.y < -OUTSIDE_EPSILON
            || hi.x > viewport.width + OUTSIDE_EPSILON
            || hi.y > viewport.height + OUTSIDE_EPSILON;
        if !outside {
            return None;
        }
        scale
    };
    if !target.is_finite() {
        return None;
    }

    let target = target.max(min_scale(viewport, image));
    let center = selection.center();
    let pan = restrict_to_viewport(
        Point::new(
            viewport.width * 0.5 - center.x * target,
            viewport.height * 0.5 - center.y * target,
        ),
        target,
        image,
        viewport,
    );
    let instant = (target - scale).abs() < INSTANT_EPSILON;

    log::trace!(
        "zoom target: fill {fill_rate:.3}, scale {scale} -> {target}, instant={instant}"
    );
    Some(ZoomTarget {
        scale: target,
        pan,
        instant,
    })
}

/// Pan toward `edge` by `distance` screen units without exposing empty space
/// past the image on that side.
///
/// Axes where the scaled image does not overflow the viewport stay put.
pub fn scroll_image(
    pan: Point,
    edge: Edge,
    distance: f64,
    scale: f64,
    image: Size,
    viewport: Size,
) -> Point {
    let scaled = image.scaled(scale);
    let mut pan = pan;
    match edge {
        Edge::Left if scaled.width > viewport.width => {
            pan.x = (pan.x + distance).min(0.0);
        }
        Edge::Right if scaled.width > viewport.width => {
            pan.x = (pan.x - distance).max(viewport.width - scaled.width);
        }
        Edge::Bottom if scaled.height > viewport.height => {
            pan.y = (pan.y + distance).min(0.0);
        }
        Edge::Top if scaled.height > viewport.height => {
            pan.y = (pan.y - distance).max(viewport.height - scaled.height);
        }
        _ => {}
    }
    pan
}
