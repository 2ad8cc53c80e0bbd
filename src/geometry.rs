//! Plain 2D value types for selection geometry.
//!
//! Coordinates are real-valued pixels with the origin at the bottom-left
//! corner of the oriented image, y pointing up. Arithmetic helpers are free
//! functions so the solver, snapper, and fitter all share one vocabulary.

#[cfg(not(feature = "std"))]
use num_traits::Float;

/// Width × height in pixels.
#[derive(Copy, Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Size {
    /// Width in pixels.
    pub width: f64,
    /// Height in pixels.
    pub height: f64,
}

impl Size {
    /// Zero size. Used by settings to mean "pick a default".
    pub const ZERO: Self = Self::new(0.0, 0.0);

    /// Create a new size.
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Same value on both axes.
    pub const fn splat(v: f64) -> Self {
        Self::new(v, v)
    }

    /// Width and height exchanged.
    pub const fn swapped(self) -> Self {
        Self::new(self.height, self.width)
    }

    /// Both axes multiplied by `factor`.
    pub fn scaled(self, factor: f64) -> Self {
        Self::new(self.width * factor, self.height * factor)
    }

    /// Component-wise product.
    pub fn scale_with(self, other: Self) -> Self {
        Self::new(self.width * other.width, self.height * other.height)
    }

    /// `width / height`.
    pub fn aspect(self) -> f64 {
        self.width / self.height
    }

    /// Whether both axes are finite and strictly positive.
    pub fn is_positive(self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }

    /// Each axis rounded to the nearest integer.
    pub fn round(self) -> Self {
        Self::new(self.width.round(), self.height.round())
    }

    /// Each axis rounded up.
    pub fn ceil(self) -> Self {
        Self::new(self.width.ceil(), self.height.ceil())
    }

    /// Each axis rounded down.
    pub fn floor(self) -> Self {
        Self::new(self.width.floor(), self.height.floor())
    }

    /// Larger of the two axes.
    pub fn max_axis(self) -> f64 {
        self.width.max(self.height)
    }

    /// Smaller of the two axes.
    pub fn min_axis(self) -> f64 {
        self.width.min(self.height)
    }
}

/// A position in pixels.
#[derive(Copy, Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// The origin.
    pub const ORIGIN: Self = Self::new(0.0, 0.0);

    /// Create a new point.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Each coordinate rounded to the nearest integer.
    pub fn round(self) -> Self {
        Self::new(self.x.round(), self.y.round())
    }

    /// Translate by a size.
    pub fn offset(self, by: Size) -> Self {
        Self::new(self.x + by.width, self.y + by.height)
    }
}

/// Axis-aligned rectangle: bottom-left position plus size.
#[derive(Copy, Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Rect {
    pub position: Point,
    pub size: Size,
}

impl Rect {
    /// Create a rect from raw components.
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            position: Point::new(x, y),
            size: Size::new(width, height),
        }
    }

    /// Create a rect from a position and a size.
    pub const fn from_parts(position: Point, size: Size) -> Self {
        Self { position, size }
    }

    /// Top-right corner.
    pub fn max_corner(&self) -> Point {
        self.position.offset(self.size)
    }

    /// Center point.
    pub fn center(&self) -> Point {
        self.position.offset(self.size.scaled(0.5))
    }

    /// Whether the rect lies inside `(0, 0, bounds)`, allowing `epsilon` slack.
    pub fn is_within(&self, bounds: Size, epsilon: f64) -> bool {
        let max = self.max_corner();
        self.position.x >= -epsilon
            && self.position.y >= -epsilon
            && max.x <= bounds.width + epsilon
            && max.y <= bounds.height + epsilon
    }

    /// Component-wise comparison within `epsilon`.
    pub fn approx_eq(&self, other: &Self, epsilon: f64) -> bool {
        (self.position.x - other.position.x).abs() <= epsilon
            && (self.position.y - other.position.y).abs() <= epsilon
            && (self.size.width - other.size.width).abs() <= epsilon
            && (self.size.height - other.size.height).abs() <= epsilon
    }
}

/// Clamp `v` into `[lo, hi]`. When the range is inverted, `lo` wins
/// (unlike `f64::clamp`, which panics).
pub fn clamp(v: f64, lo: f64, hi: f64) -> f64 {
    v.min(hi).max(lo)
}

/// Clamp each axis of `s` into `[min, max]`.
pub fn clamp_size(s: Size, min: Size, max: Size) -> Size {
    Size::new(
        clamp(s.width, min.width, max.width),
        clamp(s.height, min.height, max.height),
    )
}

/// Clamp each coordinate of `p` into `[min, max]`.
pub fn clamp_point(p: Point, min: Point, max: Point) -> Point {
    Point::new(clamp(p.x, min.x, max.x), clamp(p.y, min.y, max.y))
}

/// Component-wise minimum.
pub fn min_size(a: Size, b: Size) -> Size {
    Size::new(a.width.min(b.width), a.height.min(b.height))
}

/// Component-wise maximum.
pub fn max_size(a: Size, b: Size) -> Size {
    Size::new(a.width.max(b.width), a.height.max(b.height))
}

/// Linear interpolation; `t` is not clamped.
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Linear interpolation between two points.
pub fn lerp_point(a: Point, b: Point, t: f64) -> Point {
    Point::new(lerp(a.x, b.x, t), lerp(a.y, b.y, t))
}
