//! Steering combiners: many proposed displacements in, one displacement out.
//!
//! Purpose
//! - `WeightedCombiner` averages the group-level and individual-level
//!   contributions separately and adds the two means.
//! - `NearestPerLevel` narrows the input to the nearest contributor per level.
//! - `SinglePrevalent` puts the navigation contributor first, then smooths and
//!   clamps the result.
//!
//! Why this design
//! - Weightings are a trait (`DistanceWeighting`, `TypeWeighting`) plugged into
//!   the combiner by value; decorators wrap any `SteeringStrategy`.
//! - The weight search in `SinglePrevalent` runs on an integer counter, so it
//!   stops after at most `⌈1 / step⌉` candidates.
//!
//! Code cross-refs: `navigation::NavigationAction` supplies the navigation contribution.

mod combiner;
mod contribution;
mod prevalent;
mod weighting;

pub use combiner::{NearestPerLevel, WeightedCombiner};
pub use contribution::{Contribution, ContributorKind, Level, SteeringContext, SteeringStrategy};
pub use prevalent::{clamp_length, ExponentialSmoothing, SinglePrevalent};
pub use weighting::{DistanceWeighting, TypeWeighting, Weighting};
