//! Session configuration.
//!
//! Every field has a default, so a partial document deserializes:
//!
//! ```
//! # #[cfg(feature = "std")] {
//! let json = r#"{ "pixel_perfect": true, "min_aspect": 1.0, "max_aspect": 1.0 }"#;
//! let settings: cropframe::CropSettings = serde_json::from_str(json).unwrap();
//! assert!(settings.pixel_perfect);
//! assert!(settings.auto_zoom_enabled);
//! # }
//! ```

use crate::constraint::Constraints;
use crate::geometry::{Rect, Size, clamp};
use crate::orientation::Orientation;
use crate::transition::Easing;
use crate::viewport::ZoomThresholds;

/// Initial selection inset from each image edge, as fractions of the
/// oriented image size.
#[derive(Copy, Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Padding {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Default for Padding {
    fn default() -> Self {
        Self::uniform(0.1)
    }
}

impl Padding {
    pub const ZERO: Self = Self::uniform(0.0);

    pub const fn uniform(v: f64) -> Self {
        Self {
            left: v,
            top: v,
            right: v,
            bottom: v,
        }
    }

    /// Fraction of the image the padded selection covers on each axis.
    ///
    /// Right and top are clamped to `[0, 1]` and fix the max corner; left and
    /// bottom are clamped so they never pass it.
    pub fn coverage(&self) -> Size {
        let max_x = 1.0 - clamp(self.right, 0.0, 1.0);
        let max_y = 1.0 - clamp(self.top, 0.0, 1.0);
        let min_x = clamp(self.left, 0.0, max_x);
        let min_y = clamp(self.bottom, 0.0, max_y);
        Size::new(max_x - min_x, max_y - min_y)
    }
}

/// The padded selection for an oriented image, centered.
pub fn initial_selection(padding: &Padding, oriented: Size) -> Rect {
    let size = oriented.scale_with(padding.coverage());
    Rect::new(
        (oriented.width - size.width) * 0.5,
        (oriented.height - size.height) * 0.5,
        size.width,
        size.height,
    )
}

/// Everything a [`SelectionSession`](crate::SelectionSession) is started with.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct CropSettings {
    /// Frame the selection automatically after edits.
    pub auto_zoom_enabled: bool,
    /// Keep the selection on integer pixel coordinates.
    pub pixel_perfect: bool,
    /// Orientation shown when the session starts.
    pub initial_orientation: Orientation,
    /// Below 1 on either axis means "10% of the shorter image side".
    pub min_size: Size,
    /// Below 1 on either axis means "twice the longer image side".
    pub max_size: Size,
    /// `width / height` lower bound. Non-positive means unbounded.
    pub min_aspect: f64,
    /// `width / height` upper bound. Non-positive means unbounded.
    pub max_aspect: f64,
    /// Initial selection inset, as fractions of the oriented image.
    pub padding: Padding,
    /// Auto-zoom fill thresholds.
    pub zoom: ZoomThresholds,
    /// Seconds an animated zoom-fit takes.
    pub zoom_duration: f64,
    /// Curve of the animated zoom.
    pub zoom_easing: Easing,
    /// Edge-scroll speed in viewport units per second.
    pub scroll_speed: f64,
    /// Distance from the viewport edge, in viewport units, at which the input
    /// layer starts edge scrolling.
    pub snap_to_edge_threshold: f64,
}

impl Default for CropSettings {
    fn default() -> Self {
        Self {
            auto_zoom_enabled: true,
            pixel_perfect: false,
            initial_orientation: Orientation::Normal,
            min_size: Size::ZERO,
            max_size: Size::ZERO,
            min_aspect: 0.0,
            max_aspect: 0.0,
            padding: Padding::default(),
            zoom: ZoomThresholds::default(),
            zoom_duration: 0.3,
            zoom_easing: Easing::default(),
            scroll_speed: 512.0,
            snap_to_edge_threshold: 5.0,
        }
    }
}

impl CropSettings {
    /// Defaults with the aspect locked to 1:1.
    pub fn square() -> Self {
        Self {
            min_aspect: 1.0,
            max_aspect: 1.0,
            ..Self::default()
        }
    }

    /// Bounds for an image of natural size `original`.
    pub fn constraints(&self, original: Size) -> Constraints {
        Constraints::resolve(
            self.min_size,
            self.max_size,
            self.min_aspect,
            self.max_aspect,
            original,
        )
    }
}
