//! Tunable parameters, grouped per subsystem.
//!
//! Policy
//! - Geometric tolerances are fixed constants (`geom2::EPS`), not configuration.
//! - Every group has defaults; JSON inputs only name what they override
//!   (`#[serde(default)]`).
//! - `validate` reports out-of-range values as `ConfigError`. Constructors that
//!   take a single parameter directly (e.g. `SinglePrevalent::new`) assert the
//!   same ranges instead, since a bad value there is a caller bug.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// All navigation parameters.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavCfg {
    pub mesh: MeshCfg,
    pub cognitive: CognitiveCfg,
    pub motion: MotionCfg,
    pub steering: SteeringCfg,
}

impl NavCfg {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.mesh.validate()?;
        self.cognitive.validate()?;
        self.motion.validate()?;
        self.steering.validate()
    }
}

/// Mesh synthesis.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeshCfg {
    /// Distance an edge advances per growth step.
    pub unit: f64,
    /// Side of the initial square planted at every seed position.
    pub seed_side: f64,
}

impl Default for MeshCfg {
    fn default() -> Self {
        Self {
            unit: 1.0,
            seed_side: 1.0,
        }
    }
}

impl MeshCfg {
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("mesh.unit", self.unit)?;
        positive("mesh.seed_side", self.seed_side)
    }
}

/// Cognitive map construction.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CognitiveCfg {
    /// Rooms whose diameter is at most this multiple of the agent diameter get no landmark.
    pub min_room_diameter_factor: f64,
    /// Candidate landmark axes are drawn in `[min_span, max_span] × room diameter`.
    pub landmark_min_span: f64,
    pub landmark_max_span: f64,
    /// Factor applied to a candidate landmark that does not fit its room.
    pub shrink_factor: f64,
}

impl Default for CognitiveCfg {
    fn default() -> Self {
        Self {
            min_room_diameter_factor: 2.0,
            landmark_min_span: 0.1,
            landmark_max_span: 0.5,
            shrink_factor: 0.5,
        }
    }
}

impl CognitiveCfg {
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("cognitive.min_room_diameter_factor", self.min_room_diameter_factor)?;
        positive("cognitive.landmark_min_span", self.landmark_min_span)?;
        ordered(
            "cognitive.landmark_min_span",
            self.landmark_min_span,
            "cognitive.landmark_max_span",
            self.landmark_max_span,
        )?;
        open_unit("cognitive.shrink_factor", self.shrink_factor)
    }
}

/// Low-level motion of the navigation action.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionCfg {
    /// Longest displacement proposed per decision cycle.
    pub step_length: f64,
    /// Distance under which a target point counts as reached.
    pub arrival_tolerance: f64,
    /// Extra depth an agent walks into the next room when crossing a door.
    pub door_margin: f64,
}

impl Default for MotionCfg {
    fn default() -> Self {
        Self {
            step_length: 1.0,
            arrival_tolerance: 0.1,
            door_margin: 0.1,
        }
    }
}

impl MotionCfg {
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("motion.step_length", self.step_length)?;
        positive("motion.arrival_tolerance", self.arrival_tolerance)?;
        positive("motion.door_margin", self.door_margin)
    }
}

/// Prevalent-force steering.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SteeringCfg {
    /// Largest admissible angle between the blended and the navigation vector, in degrees.
    pub tolerance_angle_deg: f64,
    /// Decrement of the shared weight of non-navigation contributors.
    pub weight_step: f64,
    /// Exponential smoothing factor in (0, 1].
    pub alpha: f64,
    pub min_walk: f64,
    pub max_walk: f64,
}

impl Default for SteeringCfg {
    fn default() -> Self {
        Self {
            tolerance_angle_deg: 45.0,
            weight_step: 0.1,
            alpha: 0.5,
            min_walk: 0.0,
            max_walk: 1.5,
        }
    }
}

impl SteeringCfg {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.tolerance_angle_deg > 0.0 && self.tolerance_angle_deg < 180.0) {
            return Err(ConfigError::OutOfRange {
                field: "steering.tolerance_angle_deg",
                value: self.tolerance_angle_deg,
                range: "(0, 180)",
            });
        }
        open_unit("steering.weight_step", self.weight_step)?;
        if !(self.alpha > 0.0 && self.alpha <= 1.0) {
            return Err(ConfigError::OutOfRange {
                field: "steering.alpha",
                value: self.alpha,
                range: "(0, 1]",
            });
        }
        if self.min_walk.is_nan() || self.min_walk < 0.0 {
            return Err(ConfigError::OutOfRange {
                field: "steering.min_walk",
                value: self.min_walk,
                range: "[0, inf)",
            });
        }
        positive("steering.max_walk", self.max_walk)?;
        ordered(
            "steering.min_walk",
            self.min_walk,
            "steering.max_walk",
            self.max_walk,
        )
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    // written so that NaN fails too
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NonPositive { field, value })
    }
}

fn open_unit(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value > 0.0 && value < 1.0 {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            field,
            value,
            range: "(0, 1)",
        })
    }
}

fn ordered(
    low_field: &'static str,
    low: f64,
    high_field: &'static str,
    high: f64,
) -> Result<(), ConfigError> {
    if low <= high {
        Ok(())
    } else {
        Err(ConfigError::Inverted {
            low_field,
            low,
            high_field,
            high,
        })
    }
}
