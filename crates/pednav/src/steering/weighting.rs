//! Pluggable contributor weights.

use std::collections::HashMap;

use super::contribution::{Contribution, ContributorKind, SteeringContext};
use crate::geom2::EPS;

pub trait Weighting {
    /// Non-negative influence of `c` within its partition.
    fn weight(&self, ctx: &SteeringContext<'_>, c: &Contribution) -> f64;
}

/// Inverse distance to the contributor's target: nearer targets pull harder.
///
/// Contributors without a target weigh 1; one already at its target weighs 0.
#[derive(Clone, Copy, Debug, Default)]
pub struct DistanceWeighting;

impl Weighting for DistanceWeighting {
    fn weight(&self, ctx: &SteeringContext<'_>, c: &Contribution) -> f64 {
        match c.target {
            None => 1.0,
            Some(_) => {
                let d = ctx.distance_to_target(c);
                if d > EPS {
                    1.0 / d
                } else {
                    0.0
                }
            }
        }
    }
}

/// Fixed weight per contributor kind.
#[derive(Clone, Debug)]
pub struct TypeWeighting {
    table: HashMap<ContributorKind, f64>,
    fallback: f64,
}

impl TypeWeighting {
    /// Panics on a negative or non-finite weight.
    pub fn new(table: HashMap<ContributorKind, f64>, fallback: f64) -> Self {
        for (kind, &w) in &table {
            assert!(
                w.is_finite() && w >= 0.0,
                "weight of {kind:?} must be finite and non-negative, got {w}"
            );
        }
        assert!(
            fallback.is_finite() && fallback >= 0.0,
            "fallback weight must be finite and non-negative, got {fallback}"
        );
        Self { table, fallback }
    }

    pub fn get(&self, kind: ContributorKind) -> f64 {
        self.table.get(&kind).copied().unwrap_or(self.fallback)
    }
}

impl Weighting for TypeWeighting {
    #[inline]
    fn weight(&self, _ctx: &SteeringContext<'_>, c: &Contribution) -> f64 {
        self.get(c.kind)
    }
}
