//! Per-agent spatial knowledge: landmarks, cognitive map, volatile memory.
//!
//! Purpose
//! - `sample_landmarks` places one ellipse in a random subset of the rooms that
//!   are large enough for the agent to remember.
//! - `CognitiveMap` joins the landmarks into a minimum spanning tree weighted by
//!   room hops, so any two remembered places are linked by exactly one path.
//! - `VolatileMemory` records room entries during the run.
//!
//! Why this design
//! - Hop counts, not metres: people recall route topology better than distances.
//! - The map is a snapshot of prior knowledge and is never rebuilt; in-run
//!   learning lives only in `VolatileMemory`.
//!
//! Code cross-refs: `mesh::NavigationGraph`, `navigation::Pedestrian`

mod landmarks;
mod map;
mod memory;

pub use landmarks::{sample_landmarks, Landmark};
pub use map::{CognitiveMap, MapEdge};
pub use memory::VolatileMemory;

#[cfg(test)]
mod tests;
