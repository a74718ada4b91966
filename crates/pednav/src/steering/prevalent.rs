//! The navigation-first combiner and its output filters.
//!
//! `SinglePrevalent` never lets other urges push the navigation vector off
//! course by more than a tolerance angle, nor out of the room, and never
//! touches a navigation vector that already leaves the room (door crossings).
//! Other urges may bend the navigation vector but never shorten its progress:
//! an urge that opposes navigation is weighted down to nothing.

use std::f64::consts::PI;

use tracing::trace;

use super::combiner::WeightedCombiner;
use super::contribution::{Contribution, SteeringContext, SteeringStrategy};
use super::weighting::Weighting;
use crate::config::SteeringCfg;
use crate::geom2::{angle_between, resized, Vec2, EPS};

/// `new = α·current + (1 − α)·previous`, seeded with the first value.
#[derive(Clone, Copy, Debug)]
pub struct ExponentialSmoothing {
    alpha: f64,
    previous: Option<Vec2>,
}

impl ExponentialSmoothing {
    /// Panics unless `alpha` lies in (0, 1].
    pub fn new(alpha: f64) -> Self {
        assert!(
            alpha > 0.0 && alpha <= 1.0,
            "smoothing alpha must lie in (0, 1], got {alpha}"
        );
        Self {
            alpha,
            previous: None,
        }
    }

    #[inline]
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn apply(&mut self, current: Vec2) -> Vec2 {
        let out = match self.previous {
            None => current,
            Some(prev) => current * self.alpha + prev * (1.0 - self.alpha),
        };
        self.previous = Some(out);
        out
    }

    pub fn reset(&mut self) {
        self.previous = None;
    }
}

/// Rescale `v` into `[min, max]` length; the zero vector stays zero.
pub fn clamp_length(v: Vec2, min: f64, max: f64) -> Vec2 {
    let n = v.norm();
    if n <= EPS {
        Vec2::zeros()
    } else if n < min {
        resized(v, min)
    } else if n > max {
        resized(v, max)
    } else {
        v
    }
}

/// Navigation-first blend with smoothing and walk-length clamping.
#[derive(Clone, Debug)]
pub struct SinglePrevalent<W> {
    inner: WeightedCombiner<W>,
    tolerance: f64,
    step: f64,
    smoothing: ExponentialSmoothing,
    min_walk: f64,
    max_walk: f64,
}

impl<W: Weighting> SinglePrevalent<W> {
    /// `tolerance` in radians. Panics unless `tolerance` lies in (0, π),
    /// `step` is positive, and `0 ≤ min_walk ≤ max_walk`.
    pub fn new(
        inner: WeightedCombiner<W>,
        tolerance: f64,
        step: f64,
        smoothing: ExponentialSmoothing,
        min_walk: f64,
        max_walk: f64,
    ) -> Self {
        assert!(
            tolerance > 0.0 && tolerance < PI,
            "tolerance angle must lie in (0, π), got {tolerance}"
        );
        assert!(step > 0.0, "weight step must be positive, got {step}");
        assert!(
            min_walk >= 0.0 && min_walk <= max_walk,
            "walk range [{min_walk}, {max_walk}] is invalid"
        );
        Self {
            inner,
            tolerance,
            step,
            smoothing,
            min_walk,
            max_walk,
        }
    }

    /// Same contract as `new`, with the angle given in degrees.
    pub fn from_cfg(weighting: W, cfg: &SteeringCfg) -> Self {
        Self::new(
            WeightedCombiner::new(weighting),
            cfg.tolerance_angle_deg.to_radians(),
            cfg.weight_step,
            ExponentialSmoothing::new(cfg.alpha),
            cfg.min_walk,
            cfg.max_walk,
        )
    }

    #[inline]
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Unfiltered result for one cycle.
    pub fn blend(&self, ctx: &SteeringContext<'_>, contributions: &[Contribution]) -> Vec2 {
        let Some(nav) = contributions.iter().find(|c| c.is_navigation()) else {
            return self.inner.combine(ctx, contributions);
        };
        let nav = nav.vector;
        if ctx.leaves_room(nav) {
            trace!("navigation vector leaves the room, taken as is");
            return nav;
        }
        let others: Vec2 = contributions
            .iter()
            .filter(|c| !c.is_navigation())
            .map(|c| c.vector)
            .sum();
        if others.norm() <= EPS || nav.norm() <= EPS {
            return nav;
        }
        // w = 1 − k·step, strictly positive
        let mut k = 0u32;
        loop {
            let w = 1.0 - f64::from(k) * self.step;
            if w <= EPS {
                break;
            }
            let candidate = nav + others * w;
            if self.is_acceptable(ctx, nav, candidate) {
                trace!(w, "prevalent weight found");
                return candidate;
            }
            k += 1;
        }
        trace!("no admissible weight, pure navigation vector");
        nav
    }

    /// Within tolerance, inside the room, and at least as far along `nav`.
    fn is_acceptable(&self, ctx: &SteeringContext<'_>, nav: Vec2, candidate: Vec2) -> bool {
        let progress = nav.norm_squared();
        candidate.norm() > EPS
            && candidate.dot(&nav) >= progress - EPS * progress
            && angle_between(candidate, nav) <= self.tolerance
            && !ctx.leaves_room(candidate)
    }
}

impl<W: Weighting> SteeringStrategy for SinglePrevalent<W> {
    fn compute_displacement(
        &mut self,
        ctx: &SteeringContext<'_>,
        contributions: &[Contribution],
    ) -> Vec2 {
        let raw = self.blend(ctx, contributions);
        let smoothed = self.smoothing.apply(raw);
        clamp_length(smoothed, self.min_walk, self.max_walk)
    }
}
