//! Orientation (D4 dihedral group), EXIF mapping, and selection reprojection.

use crate::geometry::{Point, Rect, Size};

/// Orientation of the displayed image as an element of the D4 dihedral group.
///
/// Coordinates are y-up with the origin at the bottom-left corner, so the
/// rotation variants name **counter-clockwise** turns: one clockwise quarter
/// turn of an upright image is [`Rotate270`](Self::Rotate270).
///
/// ```text
///     Forward point maps for a W×H natural image:
///
///     Normal          (x, y)            FlipHorizontal  (W - x, y)
///     Rotate90        (H - y, x)        Transpose       (H - y, W - x)
///     Rotate180       (W - x, H - y)    FlipVertical    (x, H - y)
///     Rotate270       (y, W - x)        Transverse      (y, x)
/// ```
#[derive(
    Copy, Clone, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub enum Orientation {
    /// No transformation.
    #[default]
    Normal,
    /// 90° counter-clockwise.
    Rotate90,
    /// 180°.
    Rotate180,
    /// 270° counter-clockwise (90° clockwise).
    Rotate270,
    /// Mirror left-right.
    FlipHorizontal,
    /// Mirror left-right, then 90° counter-clockwise.
    Transpose,
    /// Mirror top-bottom.
    FlipVertical,
    /// Mirror left-right, then 270° counter-clockwise.
    Transverse,
}

/// How the presentation layer should draw the natural image for an orientation:
/// mirror horizontally first (if `mirror`), then rotate counter-clockwise.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct DisplayTransform {
    /// Counter-clockwise rotation in degrees: 0, 90, 180 or 270.
    pub rotation_degrees: u16,
    /// Mirror along the x axis before rotating.
    pub mirror: bool,
}

impl Orientation {
    /// All 8 elements. The first four are upright, the last four mirrored,
    /// and both halves are ordered by counter-clockwise quarter turns.
    pub const ALL: [Self; 8] = [
        Self::Normal,
        Self::Rotate90,
        Self::Rotate180,
        Self::Rotate270,
        Self::FlipHorizontal,
        Self::Transpose,
        Self::FlipVertical,
        Self::Transverse,
    ];

    /// EXIF tag for each element of [`ALL`](Self::ALL). EXIF 6 (90° clockwise
    /// in a y-down frame) is `Rotate270` here.
    const EXIF: [u8; 8] = [1, 8, 3, 6, 2, 5, 4, 7];

    fn index(self) -> usize {
        self as usize
    }

    /// Create from EXIF orientation tag (1-8). Returns `None` for invalid values.
    pub fn from_exif(value: u8) -> Option<Self> {
        Self::EXIF
            .iter()
            .position(|&tag| tag == value)
            .map(|i| Self::ALL[i])
    }

    /// Convert to EXIF orientation tag (1-8).
    pub fn to_exif(self) -> u8 {
        Self::EXIF[self.index()]
    }

    /// Whether this is the identity transformation.
    pub fn is_identity(self) -> bool {
        self == Self::Normal
    }

    /// Whether this orientation mirrors the image.
    pub fn is_mirrored(self) -> bool {
        self.index() >= 4
    }

    /// Whether this orientation swaps width and height.
    pub fn swaps_axes(self) -> bool {
        self.index() % 2 == 1
    }

    /// Rotation and mirror flag for drawing the natural image.
    pub fn display_transform(self) -> DisplayTransform {
        DisplayTransform {
            rotation_degrees: (self.index() % 4) as u16 * 90,
            mirror: self.is_mirrored(),
        }
    }

    /// Linear part of the forward point map, as `[[a, b], [c, d]]` with
    /// `x' = a·x + b·y` and `y' = c·x + d·y`.
    fn matrix(self) -> [[i8; 2]; 2] {
        match self {
            Self::Normal => [[1, 0], [0, 1]],
            Self::Rotate90 => [[0, -1], [1, 0]],
            Self::Rotate180 => [[-1, 0], [0, -1]],
            Self::Rotate270 => [[0, 1], [-1, 0]],
            Self::FlipHorizontal => [[-1, 0], [0, 1]],
            Self::Transpose => [[0, -1], [-1, 0]],
            Self::FlipVertical => [[1, 0], [0, -1]],
            Self::Transverse => [[0, 1], [1, 0]],
        }
    }

    fn from_matrix(m: [[i8; 2]; 2]) -> Self {
        // Every product of two group matrices is itself in the group, so the
        // fallback is unreachable for matrices built from `matrix()`.
        Self::ALL
            .into_iter()
            .find(|o| o.matrix() == m)
            .unwrap_or(Self::Normal)
    }

    /// Compose two orientations: apply `self` first, then `other`.
    pub fn compose(self, other: Self) -> Self {
        let a = other.matrix();
        let b = self.matrix();
        let mut m = [[0i8; 2]; 2];
        for (r, row) in m.iter_mut().enumerate() {
            for (c, cell) in row.iter_mut().enumerate() {
                *cell = a[r][0] * b[0][c] + a[r][1] * b[1][c];
            }
        }
        Self::from_matrix(m)
    }

    /// The inverse orientation: `self.compose(self.inverse()) == Normal`.
    pub fn inverse(self) -> Self {
        let [[a, b], [c, d]] = self.matrix();
        Self::from_matrix([[a, c], [b, d]])
    }

    /// Orientation after turning the displayed image clockwise by `steps`
    /// quarter turns. Steps are taken mod 4; negative values turn
    /// counter-clockwise.
    pub fn rotate_clockwise(self, steps: i32) -> Self {
        let steps = steps.rem_euclid(4) as usize;
        let i = self.index();
        let half = i - i % 4;
        Self::ALL[half + (i % 4 + 4 - steps) % 4]
    }

    /// Orientation after mirroring the displayed image left-right.
    pub fn flip_horizontal(self) -> Self {
        match self {
            Self::Normal => Self::FlipHorizontal,
            Self::FlipHorizontal => Self::Normal,
            Self::Rotate90 => Self::Transverse,
            Self::Transverse => Self::Rotate90,
            Self::Rotate180 => Self::FlipVertical,
            Self::FlipVertical => Self::Rotate180,
            Self::Rotate270 => Self::Transpose,
            Self::Transpose => Self::Rotate270,
        }
    }

    /// Orientation after mirroring the displayed image top-bottom.
    pub fn flip_vertical(self) -> Self {
        match self {
            Self::Normal => Self::FlipVertical,
            Self::FlipVertical => Self::Normal,
            Self::Rotate90 => Self::Transpose,
            Self::Transpose => Self::Rotate90,
            Self::Rotate180 => Self::FlipHorizontal,
            Self::FlipHorizontal => Self::Rotate180,
            Self::Rotate270 => Self::Transverse,
            Self::Transverse => Self::Rotate270,
        }
    }

    /// Transform source dimensions to display dimensions.
    pub fn transform_dimensions(self, size: Size) -> Size {
        if self.swaps_axes() {
            size.swapped()
        } else {
            size
        }
    }

    /// Transform a rectangle from source (natural) coordinates to display
    /// (oriented) coordinates.
    pub fn transform_rect_from_source(self, rect: Rect, source: Size) -> Rect {
        let Point { x: px, y: py } = rect.position;
        let Size {
            width: sw,
            height: sh,
        } = rect.size;
        let Size {
            width: w,
            height: h,
        } = source;

        match self {
            Self::Normal => rect,
            Self::Rotate90 => Rect::new(h - py - sh, px, sh, sw),
            Self::Rotate180 => Rect::new(w - px - sw, h - py - sh, sw, sh),
            Self::Rotate270 => Rect::new(py, w - px - sw, sh, sw),
            Self::FlipHorizontal => Rect::new(w - px - sw, py, sw, sh),
            Self::Transpose => Rect::new(h - py - sh, w - px - sw, sh, sw),
            Self::FlipVertical => Rect::new(px, h - py - sh, sw, sh),
            Self::Transverse => Rect::new(py, px, sh, sw),
        }
    }

    /// Transform a rectangle from display coordinates back to source coordinates.
    ///
    /// Given a rect in post-orientation (display) space and the source image
    /// dimensions, returns the corresponding rect in pre-orientation (source) space.
    pub fn transform_rect_to_source(self, rect: Rect, source: Size) -> Rect {
        let Point { x: qx, y: qy } = rect.position;
        let Size {
            width: tw,
            height: th,
        } = rect.size;
        let Size {
            width: w,
            height: h,
        } = source;

        match self {
            Self::Normal => rect,
            Self::Rotate90 => Rect::new(qy, h - qx - tw, th, tw),
            Self::Rotate180 => Rect::new(w - qx - tw, h - qy - th, tw, th),
            Self::Rotate270 => Rect::new(w - qy - th, qx, th, tw),
            Self::FlipHorizontal => Rect::new(w - qx - tw, qy, tw, th),
            Self::Transpose => Rect::new(w - qy - th, h - qx - tw, th, tw),
            Self::FlipVertical => Rect::new(qx, h - qy - th, tw, th),
            Self::Transverse => Rect::new(qy, qx, th, tw),
        }
    }
}

/// Image size as displayed under `orientation`.
pub fn oriented_size(orientation: Orientation, original: Size) -> Size {
    orientation.transform_dimensions(original)
}

/// Re-express `rect`, given in `from`'s oriented space, in `to`'s oriented space.
///
/// `original` is the natural (pre-orientation) image size.
pub fn reproject_rect(from: Orientation, to: Orientation, rect: Rect, original: Size) -> Rect {
    let natural = from.transform_rect_to_source(rect, original);
    to.transform_rect_from_source(natural, original)
}
