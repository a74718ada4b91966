//! Run records written next to CLI outputs.
//!
//! Every file the CLI writes gets a `<stem>.provenance.json` sidecar tying it to
//! the scenario it came from, the effective cfg, the navigation graph the run
//! used and, for walks, how the agent fared.

use anyhow::{Context, Result};
use pednav::api::{NavCfg, NavigationGraph};
use serde::Serialize;
use std::ffi::OsString;
use std::fs;
use std::panic::Location;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::scenario::{Scenario, WalkView};

#[derive(Clone, Debug, Serialize)]
pub struct ScenarioStats {
    pub path: String,
    pub seeds: usize,
    pub obstacles: usize,
    pub has_agent: bool,
}

impl ScenarioStats {
    pub fn new(path: &Path, scenario: &Scenario) -> Self {
        Self {
            path: path.to_string_lossy().into_owned(),
            seeds: scenario.seeds.len(),
            obstacles: scenario.obstacles.len(),
            has_agent: scenario.agent.is_some(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GraphStats {
    pub rooms: usize,
    pub passages: usize,
    /// Rooms with at most one way out.
    pub impasses: usize,
    pub walkable_area: f64,
}

impl From<&NavigationGraph> for GraphStats {
    fn from(graph: &NavigationGraph) -> Self {
        Self {
            rooms: graph.room_count(),
            passages: graph.passages().len(),
            impasses: graph.room_ids().filter(|&r| graph.is_impasse(r)).count(),
            walkable_area: graph.rooms().iter().map(|r| r.area()).sum(),
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct WalkStats {
    pub strategy: &'static str,
    pub seed: u64,
    pub step_limit: usize,
    pub steps: usize,
    pub final_state: String,
    pub rooms_entered: usize,
    pub path_length: f64,
}

impl WalkStats {
    pub fn new(view: &WalkView, seed: u64, step_limit: usize) -> Self {
        let path_length = view
            .trajectory
            .windows(2)
            .map(|w| (w[1][0] - w[0][0]).hypot(w[1][1] - w[0][1]))
            .sum();
        Self {
            strategy: view.strategy,
            seed,
            step_limit,
            steps: view.steps,
            final_state: view.final_state.clone(),
            rooms_entered: view.rooms.len(),
            path_length,
        }
    }
}

/// What one CLI invocation computed, and from what.
#[derive(Clone, Debug, Serialize)]
pub struct RunRecord {
    pub command: &'static str,
    pub scenario: ScenarioStats,
    pub cfg: NavCfg,
    pub graph: GraphStats,
    pub walk: Option<WalkStats>,
    pub tags: Vec<String>,
}

#[derive(Serialize)]
struct Callsite {
    file: &'static str,
    line: u32,
}

#[derive(Serialize)]
struct Sidecar<'a> {
    code_rev: String,
    version: &'static str,
    callsite: Callsite,
    output: String,
    run: &'a RunRecord,
}

/// Write `<artifact>.provenance.json` for `record` and return its path.
#[track_caller]
pub fn write_sidecar<P: AsRef<Path>>(artifact: P, record: &RunRecord) -> Result<PathBuf> {
    let artifact = artifact.as_ref();
    let path = provenance_path(artifact);
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating provenance dir {}", parent.display()))?;
        }
    }
    let caller = Location::caller();
    let sidecar = Sidecar {
        code_rev: current_git_rev(),
        version: pednav::VERSION,
        callsite: Callsite {
            file: caller.file(),
            line: caller.line(),
        },
        output: artifact.to_string_lossy().into_owned(),
        run: record,
    };
    fs::write(&path, serde_json::to_vec_pretty(&sidecar)?)
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(path)
}

fn provenance_path(artifact: &Path) -> PathBuf {
    let mut name = artifact
        .file_stem()
        .map(|s| s.to_os_string())
        .unwrap_or_else(|| OsString::from("run"));
    name.push(".provenance.json");
    artifact.with_file_name(name)
}

/// `GIT_COMMIT` when set, else `git rev-parse HEAD`, else `"unknown"`.
pub fn current_git_rev() -> String {
    if let Some(rev) = std::env::var("GIT_COMMIT").ok().filter(|s| !s.is_empty()) {
        return rev;
    }
    Command::new("git")
        .args(["rev-parse", "HEAD"])
        .output()
        .ok()
        .filter(|out| out.status.success())
        .and_then(|out| String::from_utf8(out.stdout).ok())
        .map(|s| s.trim().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}
