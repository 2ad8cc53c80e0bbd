//! Selection constraint solving for resize and move edits.
//!
//! Turns an arbitrary requested rectangle into the nearest rectangle that
//! satisfies size bounds, an aspect-ratio range, and containment in the
//! oriented image. Pure geometry; never fails.
//!
//! # Example
//!
//! ```
//! use cropframe::{AspectRange, Constraints, PivotSet, Rect, Size, solve};
//!
//! let constraints = Constraints::new(Size::splat(10.0), Size::splat(1000.0), AspectRange::SQUARE);
//! let r = solve(
//!     Rect::new(100.0, 100.0, 500.0, 300.0),
//!     PivotSet::EMPTY,
//!     &constraints,
//!     Size::new(1000.0, 1000.0),
//! );
//!
//! // Height grew by 200, split evenly above and below.
//! assert_eq!(r, Rect::new(100.0, 0.0, 500.0, 500.0));
//! ```

use crate::geometry::{Point, Rect, Size, clamp, clamp_point, clamp_size, max_size};

/// Smallest aspect ratio accepted when the configured minimum is unusable.
pub const MIN_ASPECT_FLOOR: f64 = 1e-6;
/// Largest aspect ratio accepted when the configured maximum is unusable.
pub const MAX_ASPECT_CEIL: f64 = 1e6;

/// One edge of the selection rectangle.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Edge {
    /// Minimum x.
    Left,
    /// Maximum y. The frame is y-up, so this is the upper edge.
    Top,
    /// Maximum x.
    Right,
    /// Minimum y, at the rect's `position`.
    Bottom,
}

impl Edge {
    /// All four edges.
    pub const ALL: [Self; 4] = [Self::Left, Self::Top, Self::Right, Self::Bottom];
}

/// Edges anchored during a resize. Any subset of the four edges.
///
/// When the solver changes a dimension, the pivot decides where the change
/// lands: a trailing pivot (`Right`, `Top`) keeps that edge in place, a
/// leading pivot (`Left`, `Bottom`) keeps the position, and no pivot on the
/// axis splits the change evenly around the center.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct PivotSet {
    left: bool,
    top: bool,
    right: bool,
    bottom: bool,
}

impl PivotSet {
    /// No anchored edges.
    pub const EMPTY: Self = Self {
        left: false,
        top: false,
        right: false,
        bottom: false,
    };

    fn slot(&mut self, edge: Edge) -> &mut bool {
        match edge {
            Edge::Left => &mut self.left,
            Edge::Top => &mut self.top,
            Edge::Right => &mut self.right,
            Edge::Bottom => &mut self.bottom,
        }
    }

    /// Builder-style insert.
    pub fn with(mut self, edge: Edge) -> Self {
        self.insert(edge);
        self
    }

    /// Anchor `edge`.
    pub fn insert(&mut self, edge: Edge) {
        *self.slot(edge) = true;
    }

    /// Release `edge`.
    pub fn remove(&mut self, edge: Edge) {
        *self.slot(edge) = false;
    }

    /// Whether `edge` is anchored.
    pub fn contains(&self, edge: Edge) -> bool {
        match edge {
            Edge::Left => self.left,
            Edge::Top => self.top,
            Edge::Right => self.right,
            Edge::Bottom => self.bottom,
        }
    }

    /// No edge is anchored; every change splits around the center.
    pub fn is_empty(&self) -> bool {
        *self == Self::EMPTY
    }

    /// Anchored edges in `Left, Top, Right, Bottom` order.
    pub fn iter(&self) -> impl Iterator<Item = Edge> + '_ {
        Edge::ALL.into_iter().filter(|&e| self.contains(e))
    }

    /// Position shift on one axis for a dimension change of `delta`.
    fn shift(&self, delta: f64, leading: Edge, trailing: Edge) -> f64 {
        if self.contains(trailing) {
            delta
        } else if self.contains(leading) {
            0.0
        } else {
            delta * 0.5
        }
    }
}

impl From<Edge> for PivotSet {
    fn from(edge: Edge) -> Self {
        Self::EMPTY.with(edge)
    }
}

impl FromIterator<Edge> for PivotSet {
    fn from_iter<I: IntoIterator<Item = Edge>>(iter: I) -> Self {
        iter.into_iter().fold(Self::EMPTY, Self::with)
    }
}

/// Accepted range of `width / height`. Always `0 < min <= max`.
#[derive(Copy, Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AspectRange {
    pub min: f64,
    pub max: f64,
}

impl Default for AspectRange {
    fn default() -> Self {
        Self::FREE
    }
}

impl AspectRange {
    /// Effectively unconstrained.
    pub const FREE: Self = Self {
        min: MIN_ASPECT_FLOOR,
        max: MAX_ASPECT_CEIL,
    };

    /// Square selections only.
    pub const SQUARE: Self = Self { min: 1.0, max: 1.0 };

    /// Normalize a configured range: non-positive (or NaN) bounds fall back to
    /// [`MIN_ASPECT_FLOOR`] / [`MAX_ASPECT_CEIL`], and an inverted range is swapped.
    pub fn new(min: f64, max: f64) -> Self {
        let min = if min > 0.0 { min } else { MIN_ASPECT_FLOOR };
        let max = if max > 0.0 { max } else { MAX_ASPECT_CEIL };
        if min > max {
            Self { min: max, max: min }
        } else {
            Self { min, max }
        }
    }

    /// A single fixed ratio.
    pub fn locked(ratio: f64) -> Self {
        Self::new(ratio, ratio)
    }

    /// Whether `min == max`.
    pub fn is_locked(&self) -> bool {
        self.min == self.max
    }

    /// Whether `aspect` lies inside the range, bounds included.
    pub fn contains(&self, aspect: f64) -> bool {
        aspect >= self.min && aspect <= self.max
    }
}

/// Size and aspect bounds for the selection.
#[derive(Copy, Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Constraints {
    /// Smallest selection size in pixels.
    pub min_size: Size,
    /// Largest selection size in pixels.
    pub max_size: Size,
    /// Accepted `width / height` range.
    pub aspect: AspectRange,
}

impl Constraints {
    /// Create constraints as given. See [`resolve`](Self::resolve) for the
    /// normalizing constructor used at session start.
    pub const fn new(min_size: Size, max_size: Size, aspect: AspectRange) -> Self {
        Self {
            min_size,
            max_size,
            aspect,
        }
    }

    /// Normalize configured bounds against the original image size.
    ///
    /// A size bound below 1 on either axis means "unset": the minimum
    /// defaults to 10% of the shorter image side and the maximum to twice
    /// the longer side. The minimum is then clamped to `[1, longest side]`
    /// and the maximum to `[min, 2 × longest side]`.
    pub fn resolve(
        min_size: Size,
        max_size: Size,
        min_aspect: f64,
        max_aspect: f64,
        original: Size,
    ) -> Self {
        let longest = original.max_axis();
        let max_default = Size::splat(2.0 * longest);

        let min = if min_size.width < 1.0 || min_size.height < 1.0 {
            Size::splat(0.1 * original.min_axis())
        } else {
            min_size
        };
        let max = if max_size.width < 1.0 || max_size.height < 1.0 {
            max_default
        } else {
            max_size
        };

        let min = clamp_size(min, Size::splat(1.0), Size::splat(longest));
        let max = clamp_size(max, min, max_default);

        Self {
            min_size: min,
            max_size: max,
            aspect: AspectRange::new(min_aspect, max_aspect),
        }
    }

    /// Bounds in effect for an oriented image: the minimum is clamped to
    /// `[1, image]` and the maximum to `[min, image]`.
    pub fn for_image(&self, image: Size) -> Self {
        let min = clamp_size(self.min_size, Size::splat(1.0), image);
        let max = clamp_size(self.max_size, min, image);
        Self {
            min_size: min,
            max_size: max,
            aspect: self.aspect,
        }
    }
}

/// Solve a resize request.
///
/// Returns the rectangle closest to `requested` that satisfies
/// `constraints` and lies within `(0, 0, image)`. Out-of-range requests are
/// shrunk or repositioned, never rejected.
pub fn solve(requested: Rect, pivot: PivotSet, constraints: &Constraints, image: Size) -> Rect {
    let min = clamp_size(constraints.min_size, Size::splat(1.0), image);
    let max = max_size(constraints.max_size, min);
    let aspect = constraints.aspect;

    // Size bounds, then aspect.
    let mut size = clamp_size(requested.size, min, max);
    size = fit_aspect(size, aspect, max);

    // Pivot decides where each dimension change lands.
    let mut position = requested.position;
    let dw = size.width - requested.size.width;
    if dw != 0.0 {
        position.x -= pivot.shift(dw, Edge::Left, Edge::Right);
    }
    let dh = size.height - requested.size.height;
    if dh != 0.0 {
        position.y -= pivot.shift(dh, Edge::Bottom, Edge::Top);
    }

    // Containment. An axis that cannot fit shrinks, and the aspect coupling
    // shrinks its partner.
    position.x = position.x.max(0.0);
    position.y = position.y.max(0.0);

    let max_x = image.width - size.width;
    if position.x > max_x {
        position.x = max_x;
        if max_x < 0.0 {
            size.width += max_x;
            if size.aspect() < aspect.min {
                size.height = size.width / aspect.min;
            }
            position.x = 0.0;
        }
    }
    let max_y = image.height - size.height;
    if position.y > max_y {
        position.y = max_y;
        if max_y < 0.0 {
            size.height += max_y;
            if size.aspect() > aspect.max {
                size.width = size.height * aspect.max;
            }
            position.y = 0.0;
        }
    }

    // Unconditional final clamp.
    let size = clamp_size(size, min, image);
    let position = clamp_point(
        position,
        Point::ORIGIN,
        Point::new(image.width - size.width, image.height - size.height),
    );

    let solved = Rect::from_parts(position, size);
    if solved != requested {
        log::trace!("selection solved: requested {requested:?} -> {solved:?}");
    }
    solved
}

/// Move a selection without resizing it, keeping it inside `(0, 0, image)`.
pub fn move_within(position: Point, size: Size, image: Size) -> Rect {
    let position = Point::new(
        clamp(position.x, 0.0, image.width - size.width),
        clamp(position.y, 0.0, image.height - size.height),
    );
    Rect::from_parts(position, size)
}

/// Move `size` to the nearest boundary of `aspect` by growing the smaller
/// relative dimension. Growth stops at `max`, and the other dimension
/// shrinks to meet the ratio there.
fn fit_aspect(size: Size, aspect: AspectRange, max: Size) -> Size {
    let ratio = size.aspect();
    if ratio < aspect.min {
        let width = size.height * aspect.min;
        if width <= max.width {
            Size::new(width, size.height)
        } else {
            Size::new(max.width, max.width / aspect.min)
        }
    } else if ratio > aspect.max {
        let height = size.width / aspect.max;
        if height <= max.height {
            Size::new(size.width, height)
        } else {
            Size::new(max.height * aspect.max, max.height)
        }
    } else {
        size
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================
