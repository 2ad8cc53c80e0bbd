//! Time-based zoom transition, advanced by the caller once per tick.

use crate::geometry::{Point, lerp, lerp_point};
use crate::viewport::ZoomTarget;

/// Easing curve applied to normalized transition time.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Easing {
    Linear,
    /// `3t² - 2t³`.
    #[default]
    SmoothStep,
    /// `6t⁵ - 15t⁴ + 10t³`, zero first and second derivative at both ends.
    SmootherStep,
    /// `1 - (1 - t)³`.
    EaseOutCubic,
}

impl Easing {
    /// Eased progress for `t`, clamped to `[0, 1]` first.
    pub fn evaluate(self, t: f64) -> f64 {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        match self {
            Self::Linear => t,
            Self::SmoothStep => t * t * (3.0 - 2.0 * t),
            Self::SmootherStep => t * t * t * (t * (t * 6.0 - 15.0) + 10.0),
            Self::EaseOutCubic => {
                let u = 1.0 - t;
                1.0 - u * u * u
            }
        }
    }
}

/// One sampled frame of a transition.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ZoomSample {
    pub scale: f64,
    pub pan: Point,
    /// The transition has reached its target.
    pub done: bool,
}

/// Interpolates scale and pan from a start view to a [`ZoomTarget`].
///
/// Nothing here reads a clock: the owner calls [`advance`](Self::advance)
/// with the time since the previous tick. Advancing a finished transition
/// keeps returning the target.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ZoomTransition {
    start_scale: f64,
    start_pan: Point,
    target_scale: f64,
    target_pan: Point,
    elapsed: f64,
    duration: f64,
    easing: Easing,
}

impl ZoomTransition {
    /// Start a transition. A target flagged instant, or a non-positive
    /// duration, finishes on the first sample.
    pub fn new(
        start_scale: f64,
        start_pan: Point,
        target: ZoomTarget,
        duration: f64,
        easing: Easing,
    ) -> Self {
        let duration = if target.instant || duration.is_nan() || duration <= 0.0 {
            0.0
        } else {
            duration
        };
        Self {
            start_scale,
            start_pan,
            target_scale: target.scale,
            target_pan: target.pan,
            elapsed: 0.0,
            duration,
            easing,
        }
    }

    /// A transition that is already at `target`.
    pub fn instant(target: ZoomTarget) -> Self {
        Self::new(target.scale, target.pan, target, 0.0, Easing::Linear)
    }

    /// Step forward by `dt` seconds. Negative or NaN steps count as zero.
    pub fn advance(&mut self, dt: f64) -> ZoomSample {
        if dt > 0.0 {
            self.elapsed = (self.elapsed + dt).min(self.duration);
        }
        self.sample()
    }

    /// State at the current elapsed time, without advancing.
    pub fn sample(&self) -> ZoomSample {
        if self.is_done() {
            return ZoomSample {
                scale: self.target_scale,
                pan: self.target_pan,
                done: true,
            };
        }
        let t = self.easing.evaluate(self.elapsed / self.duration);
        ZoomSample {
            scale: lerp(self.start_scale, self.target_scale, t),
            pan: lerp_point(self.start_pan, self.target_pan, t),
            done: false,
        }
    }

    /// Whether the transition has reached its target.
    pub fn is_done(&self) -> bool {
        self.elapsed >= self.duration
    }

    /// Scale at the end of the transition.
    pub fn target_scale(&self) -> f64 {
        self.target_scale
    }

    /// Pan at the end of the transition.
    pub fn target_pan(&self) -> Point {
        self.target_pan
    }

    /// Length in seconds. Zero for an instant transition.
    pub fn duration(&self) -> f64 {
        self.duration
    }
}
