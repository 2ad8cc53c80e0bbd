//! Crop selection geometry: constrained resize, orientation reprojection,
//! pixel snapping, and auto-zoom.
//!
//! Pure geometry, no pixel operations, `no_std` compatible. The crate owns
//! the selection rectangle of an interactive cropping UI; gesture capture,
//! overlay drawing, and rasterization belong to the caller.
//!
//! # Modules
//!
//! - [`geometry`] — `Size`, `Point`, `Rect` and component-wise helpers
//! - [`orientation`] — D4 orientations, EXIF mapping, selection reprojection
//! - [`constraint`] — Size and aspect bounds, the resize solver
//! - [`snap`] — Integer pixel snapping
//! - [`viewport`] — Minimum scale, pan restriction, auto-zoom targets, edge scrolling
//! - [`transition`] — Caller-driven zoom animation
//! - [`settings`] — Session configuration
//! - [`plan`] — Output sizing and the rasterizer seam
//! - [`session`] — The stateful selection session

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

pub mod constraint;
pub mod geometry;
pub mod orientation;
pub mod plan;
pub mod session;
pub mod settings;
pub mod snap;
pub mod transition;
pub mod viewport;

pub use constraint::{AspectRange, Constraints, Edge, PivotSet, move_within, solve};
pub use geometry::{Point, Rect, Size};
pub use orientation::{DisplayTransform, Orientation, oriented_size, reproject_rect};
pub use plan::{CropOutcome, CropRequest, Rasterizer, clamp_output_size, natural_output_size};
pub use session::{ResizePolicy, SelectionSession, SessionError};
pub use settings::{CropSettings, Padding, initial_selection};
pub use snap::snap;
pub use transition::{Easing, ZoomSample, ZoomTransition};
pub use viewport::{ZoomState, ZoomTarget, ZoomThresholds};
