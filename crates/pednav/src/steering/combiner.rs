//! Partitioned weighted averaging and the nearest-per-level filter.

use tracing::trace;

use super::contribution::{Contribution, Level, SteeringContext, SteeringStrategy};
use super::weighting::Weighting;
use crate::geom2::{Vec2, EPS};

/// Weighted mean of the group contributions plus weighted mean of the
/// individual ones.
#[derive(Clone, Debug)]
pub struct WeightedCombiner<W> {
    weighting: W,
}

impl<W: Weighting> WeightedCombiner<W> {
    pub fn new(weighting: W) -> Self {
        Self { weighting }
    }

    #[inline]
    pub fn weighting(&self) -> &W {
        &self.weighting
    }

    /// Stateless blend; `compute_displacement` forwards here.
    pub fn combine(&self, ctx: &SteeringContext<'_>, contributions: &[Contribution]) -> Vec2 {
        let group = self.partition_mean(ctx, contributions, Level::Group);
        let individual = self.partition_mean(ctx, contributions, Level::Individual);
        group + individual
    }

    /// Zero with no members; the first member's vector when the weights sum to zero.
    fn partition_mean(
        &self,
        ctx: &SteeringContext<'_>,
        contributions: &[Contribution],
        level: Level,
    ) -> Vec2 {
        let mut members = contributions.iter().filter(|c| c.level == level).peekable();
        let Some(first) = members.peek().map(|c| c.vector) else {
            return Vec2::zeros();
        };
        let (sum, total) = members.fold((Vec2::zeros(), 0.0), |(sum, total), c| {
            let w = self.weighting.weight(ctx, c);
            (sum + c.vector * w, total + w)
        });
        if total.abs() <= EPS {
            trace!(?level, "zero total weight, using first contributor");
            return first;
        }
        sum / total
    }
}

impl<W: Weighting> SteeringStrategy for WeightedCombiner<W> {
    fn compute_displacement(
        &mut self,
        ctx: &SteeringContext<'_>,
        contributions: &[Contribution],
    ) -> Vec2 {
        self.combine(ctx, contributions)
    }
}

/// Keeps only the contributor with the nearest target in each level, then
/// delegates. Contributors without a target count as infinitely far; ties keep
/// the earliest.
#[derive(Clone, Debug)]
pub struct NearestPerLevel<S> {
    inner: S,
}

impl<S: SteeringStrategy> NearestPerLevel<S> {
    pub fn new(inner: S) -> Self {
        Self { inner }
    }

    #[inline]
    pub fn inner(&self) -> &S {
        &self.inner
    }

    pub fn select(ctx: &SteeringContext<'_>, contributions: &[Contribution]) -> Vec<Contribution> {
        [Level::Group, Level::Individual]
            .into_iter()
            .filter_map(|level| {
                contributions
                    .iter()
                    .filter(|c| c.level == level)
                    .min_by(|a, b| {
                        ctx.distance_to_target(a)
                            .total_cmp(&ctx.distance_to_target(b))
                    })
                    .copied()
            })
            .collect()
    }
}

impl<S: SteeringStrategy> SteeringStrategy for NearestPerLevel<S> {
    fn compute_displacement(
        &mut self,
        ctx: &SteeringContext<'_>,
        contributions: &[Contribution],
    ) -> Vec2 {
        let kept = Self::select(ctx, contributions);
        self.inner.compute_displacement(ctx, &kept)
    }
}
