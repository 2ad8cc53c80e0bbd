//! Crop planning: output dimensions and the request handed to a rasterizer.

use core::fmt;

#[cfg(not(feature = "std"))]
use num_traits::Float;

use crate::constraint::AspectRange;
use crate::geometry::{Rect, Size, clamp, max_size};
use crate::orientation::Orientation;

/// Everything a rasterizer needs to produce the cropped image.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CropRequest {
    /// Orientation applied to the natural image before cropping.
    pub orientation: Orientation,
    /// Natural (pre-orientation) image size.
    pub original_size: Size,
    /// Image size after orientation.
    pub oriented_size: Size,
    /// Selection in oriented space.
    pub selection: Rect,
    /// The same selection in natural image space.
    pub source_rect: Rect,
    /// Output dimensions in pixels, after the resize policy and the
    /// rasterizer's size limit.
    pub output: (u32, u32),
}

/// Renders the oriented image region described by a [`CropRequest`].
pub trait Rasterizer {
    type Image;
    type Error: fmt::Display;

    /// Largest width or height the rasterizer can produce.
    fn max_dimension(&self) -> u32;

    fn render(&mut self, request: &CropRequest) -> Result<Self::Image, Self::Error>;
}

/// How a session ended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CropOutcome<I> {
    /// The rasterizer produced an image.
    Cropped(I),
    /// The rasterizer failed. The error has been logged.
    Failed,
    /// The user dismissed the session.
    Cancelled,
}

impl<I> CropOutcome<I> {
    /// Whether an image was produced.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Cropped(_))
    }

    /// The cropped image, if any.
    pub fn into_image(self) -> Option<I> {
        match self {
            Self::Cropped(image) => Some(image),
            Self::Failed | Self::Cancelled => None,
        }
    }
}

/// Output size before any resize policy: the selection truncated to whole
/// pixels within `[1, oriented]`, with a locked ratio re-applied by growing
/// the smaller relative side.
pub fn natural_output_size(selection: Size, oriented: Size, aspect: AspectRange) -> (u32, u32) {
    let limit = max_size(oriented.floor(), Size::splat(1.0));
    let mut w = clamp(selection.width.trunc(), 1.0, limit.width);
    let mut h = clamp(selection.height.trunc(), 1.0, limit.height);

    if aspect.is_locked() {
        let ratio = aspect.min;
        if w / h < ratio {
            w = clamp((h * ratio).round(), w, limit.width);
        } else if w / h > ratio {
            h = clamp((w / ratio).round(), h, limit.height);
        }
    }
    (w as u32, h as u32)
}

/// Shrink `(width, height)` proportionally so neither exceeds `max`.
///
/// The larger side becomes exactly `max`; the other is truncated.
pub fn clamp_output_size(width: u32, height: u32, max: u32) -> (u32, u32) {
    if width <= max && height <= max {
        return (width, height);
    }
    let (w, h, m) = (f64::from(width), f64::from(height), f64::from(max));
    let preferred_width = (m * w / h) as u32;
    let preferred_height = (m * h / w) as u32;
    let clamped = if preferred_width <= max {
        (preferred_width.max(1), max)
    } else {
        (max, preferred_height.max(1))
    };
    log::warn!(
        "{width}x{height} exceeds the maximum dimension {max}, using {}x{}",
        clamped.0,
        clamped.1
    );
    clamped
}

/// Apply an optional resize policy, then the rasterizer limit.
pub(crate) fn output_size(
    natural: (u32, u32),
    policy: Option<&dyn Fn(u32, u32) -> (u32, u32)>,
    max_dimension: u32,
) -> (u32, u32) {
    let (w, h) = match policy {
        Some(policy) => policy(natural.0, natural.1),
        None => natural,
    };
    clamp_output_size(w.max(1), h.max(1), max_dimension.max(1))
}
