//! Pixel-perfect snapping of a selection to the integer pixel grid.

#[cfg(not(feature = "std"))]
use num_traits::Float;

use crate::constraint::{AspectRange, Constraints};
use crate::geometry::{Point, Rect, Size, clamp_point, clamp_size, max_size, min_size};

/// Snap `rect` to integer coordinates inside `(0, 0, image)`.
///
/// Size is rounded, limited to `floor(max_size)` and the image, corrected to
/// the aspect range on the integer grid, then raised to at least
/// `ceil(min_size)`. The minimum wins when the two integer bounds cross.
/// Position is rounded and clamped so the rect stays inside the image.
/// Snapping an already-snapped rect returns it unchanged.
pub fn snap(rect: Rect, constraints: &Constraints, image: Size) -> Rect {
    let min = clamp_size(constraints.min_size.ceil(), Size::splat(1.0), image);
    let bound = clamp_size(min_size(constraints.max_size.floor(), image), min, image);

    let size = max_size(rect.size.round(), Size::splat(1.0));
    let size = min_size(size, bound);
    let size = fit_integer_aspect(size, constraints.aspect, bound);
    let size = clamp_size(size, min, bound);

    let position = clamp_point(
        rect.position.round(),
        Point::ORIGIN,
        Point::new(image.width - size.width, image.height - size.height),
    );

    Rect::from_parts(position, size)
}

/// Whether an integer size is the rounding of some size inside `aspect`.
///
/// Either the width lies between the rounded widths the height allows, or
/// the height lies between the rounded heights the width allows. Sizes
/// produced by [`fit_integer_aspect`] always pass.
fn integer_aspect_ok(size: Size, aspect: AspectRange) -> bool {
    let Size {
        width: w,
        height: h,
    } = size;
    let width_fits = w >= (h * aspect.min).round() && w <= (h * aspect.max).round();
    let height_fits = h >= (w / aspect.max).round() && h <= (w / aspect.min).round();
    width_fits || height_fits
}

/// Integer counterpart of the solver's aspect fit: grow the short side to
/// the nearest boundary ratio, or, when `bound` blocks growth, grow to the
/// bound and shrink the other side.
fn fit_integer_aspect(size: Size, aspect: AspectRange, bound: Size) -> Size {
    if integer_aspect_ok(size, aspect) {
        return size;
    }
    let Size {
        width: w,
        height: h,
    } = size;

    let fitted = if w / h < aspect.min {
        let width = (h * aspect.min).round();
        if width <= bound.width {
            Size::new(width, h)
        } else {
            let width = bound.width.floor();
            Size::new(width, (width / aspect.min).round())
        }
    } else {
        let height = (w / aspect.max).round();
        if height <= bound.height {
            Size::new(w, height)
        } else {
            let height = bound.height.floor();
            Size::new((height * aspect.max).round(), height)
        }
    };
    max_size(fitted, Size::splat(1.0))
}


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn image_strategy() -> impl Strategy<Value = Size> {
        (1u32..=3000, 1u32..=3000).prop_map(|(w, h)| Size::new(w as f64, h as f64))
    }

    fn rect_strategy() -> impl Strategy<Value = Rect> {
        (
            -100.0f64..=4000.0,
            -100.0f64..=4000.0,
            0.0f64..=4000.0,
            0.0f64..=4000.0,
        )
            .prop_map(|(x, y, w, h)| Rect::new(x, y, w, h))
    }

    fn aspect_strategy() -> impl Strategy<Value = AspectRange> {
        prop_oneof![
            Just(AspectRange::FREE),
            Just(AspectRange::SQUARE),
            (0.2f64..=5.0).prop_map(AspectRange::locked),
            (0.2f64..=5.0, 1.0f64..=3.0).prop_map(|(lo, span)| AspectRange::new(lo, lo * span)),
        ]
    }

    proptest! {
        /// Property: snap(snap(r)) == snap(r).
        #[test]
        fn prop_snap_idempotent(
            image in image_strategy(),
            rect in rect_strategy(),
            aspect in aspect_strategy(),
        ) {
            let c = Constraints::new(Size::splat(1.0), image, aspect);
            let once = snap(rect, &c, image);
            prop_assert_eq!(snap(once, &c, image), once);
        }

        /// Property: Snapped rects are integral, inside the image, and no
        /// larger than a fractional maximum.
        #[test]
        fn prop_snap_integral_and_contained(
            image in image_strategy(),
            rect in rect_strategy(),
            aspect in aspect_strategy(),
            max_frac in (0.0f64..=1.0, 0.0f64..=1.0),
        ) {
            let max = Size::new(
                1.0 + max_frac.0 * (image.width - 1.0),
                1.0 + max_frac.1 * (image.height - 1.0),
            );
            for c in [
                Constraints::new(Size::splat(1.0), image, aspect),
                Constraints::new(Size::splat(1.0), max, aspect),
            ] {
                let r = snap(rect, &c, image);
                prop_assert!(r.is_within(image, 0.0), "{:?} not within {:?}", r, image);
                for v in [r.position.x, r.position.y, r.size.width, r.size.height] {
                    prop_assert_eq!(v, v.round());
                }
                prop_assert!(r.size.width >= 1.0 && r.size.height >= 1.0);
                prop_assert!(
                    r.size.width <= c.max_size.width && r.size.height <= c.max_size.height,
                    "{:?} above {:?}",
                    r,
                    c.max_size
                );
                prop_assert_eq!(snap(r, &c, image), r);
            }
        }

        /// Property: Square snapping yields squares when the minimum fits.
        #[test]
        fn prop_square_snap(
            image in image_strategy(),
            rect in rect_strategy(),
            min_frac in 0.0f64..=1.0,
        ) {
            let min = (1.0 + min_frac * (image.min_axis() - 1.0)).floor();
            let c = Constraints::new(Size::splat(min), image, AspectRange::SQUARE);
            let r = snap(rect, &c, image);
            prop_assert_eq!(r.size.width, r.size.height);
            prop_assert_eq!(snap(r, &c, image), r);
        }
    }
}
