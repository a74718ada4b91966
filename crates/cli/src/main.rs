use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use pednav::api::{
    generate_navigation_graph, Contribution, ContributorKind, DistanceWeighting, Level,
    NavCfg, NavigationAction, NavigationGraph, NoCongestion, Pedestrian, SinglePrevalent,
    SteeringContext, SteeringStrategy,
};
use rand::{rngs::StdRng, SeedableRng};
use serde::Serialize;
use serde_json::json;
use std::path::{Path, PathBuf};
use tracing_subscriber::fmt::SubscriberBuilder;
use tracing_subscriber::EnvFilter;

mod provenance;
mod scenario;

use provenance::{write_sidecar, GraphStats, RunRecord, ScenarioStats, WalkStats};
use scenario::{to_point, to_vec2, GraphView, MapView, Scenario, WalkView};

#[derive(Parser)]
#[command(name = "pednav-cli")]
#[command(about = "Build navigation graphs and walk agents through JSON scenarios")]
struct Cmd {
    /// Free-form tag propagated to provenance sidecars
    #[arg(long)]
    tag: Option<String>,

    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Synthesize the navigation graph of a scenario
    Mesh {
        #[arg(long)]
        scenario: PathBuf,
        /// Write JSON here (plus a provenance sidecar) instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Drive the scenario's agent until it arrives, stops, or runs out of steps
    Walk {
        #[arg(long)]
        scenario: PathBuf,
        #[arg(long, default_value_t = 1000)]
        steps: usize,
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Print a small provenance JSON block
    Report,
}

fn main() -> Result<()> {
    SubscriberBuilder::default()
        .with_target(false)
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();
    let cmd = Cmd::parse();
    match cmd.action {
        Action::Mesh { scenario, out } => mesh(&scenario, out.as_deref(), cmd.tag),
        Action::Walk {
            scenario,
            steps,
            out,
        } => walk(&scenario, steps, out.as_deref(), cmd.tag),
        Action::Report => report(cmd.tag),
    }
}

fn load(path: &Path) -> Result<Scenario> {
    let text =
        std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    Scenario::from_json(&text).with_context(|| format!("loading {}", path.display()))
}

fn build_graph(scenario: &Scenario) -> Result<NavigationGraph> {
    let bounds = scenario.bounds()?;
    let obstacles = scenario.obstacles()?;
    let graph = generate_navigation_graph(
        &bounds,
        &obstacles,
        &scenario.seeds(),
        &scenario.cfg.mesh,
    );
    tracing::info!(
        rooms = graph.room_count(),
        passages = graph.passages().len(),
        "graph_built"
    );
    Ok(graph)
}

fn mesh(path: &Path, out: Option<&Path>, tag: Option<String>) -> Result<()> {
    tracing::info!(scenario = %path.display(), "mesh");
    let scenario = load(path)?;
    let graph = build_graph(&scenario)?;
    let record = RunRecord {
        command: "mesh",
        scenario: ScenarioStats::new(path, &scenario),
        cfg: scenario.cfg.clone(),
        graph: GraphStats::from(&graph),
        walk: None,
        tags: tag.into_iter().collect(),
    };
    emit(&GraphView::from(&graph), out, &record)
}

fn walk(path: &Path, steps: usize, out: Option<&Path>, tag: Option<String>) -> Result<()> {
    tracing::info!(scenario = %path.display(), steps, "walk");
    let scenario = load(path)?;
    let agent = scenario
        .agent
        .as_ref()
        .context("scenario has no agent")?;
    anyhow::ensure!(agent.radius > 0.0, "agent radius must be positive");
    anyhow::ensure!(
        (0.0..=1.0).contains(&agent.knowledge_degree),
        "knowledge degree must lie in [0, 1]"
    );
    let graph = build_graph(&scenario)?;
    let strategy = agent.strategy.build()?;
    let strategy_name = strategy.name();
    let pedestrian = Pedestrian::new(
        agent.radius,
        agent.knowledge_degree,
        StdRng::seed_from_u64(agent.seed),
    );
    let mut action = NavigationAction::new(
        pedestrian,
        strategy,
        scenario.cfg.motion.clone(),
        scenario.cfg.cognitive.clone(),
    );
    let mut steering = SinglePrevalent::from_cfg(DistanceWeighting, &scenario.cfg.steering);

    let mut position = to_vec2(agent.start);
    let mut trajectory = vec![to_point(position)];
    let mut rooms: Vec<usize> = Vec::new();
    let mut taken = 0;
    while taken < steps && !action.is_done() {
        let proposal = action.next_displacement(&graph, position, &NoCongestion);
        let ctx = SteeringContext {
            position,
            room: action.current_room().map(|r| graph.room(r)),
        };
        let contributions = [Contribution::new(
            ContributorKind::Navigation,
            Level::Individual,
            proposal,
        )];
        position += steering.compute_displacement(&ctx, &contributions);
        trajectory.push(to_point(position));
        if let Some(room) = action.current_room() {
            if rooms.last() != Some(&room.0) {
                rooms.push(room.0);
            }
        }
        taken += 1;
    }
    tracing::info!(steps = taken, state = ?action.state(), "walk_finished");

    let view = WalkView {
        strategy: strategy_name,
        final_state: format!("{:?}", action.state()),
        steps: taken,
        trajectory,
        rooms,
        cognitive_map: action.pedestrian().cognitive_map().map(MapView::from),
    };
    let record = RunRecord {
        command: "walk",
        scenario: ScenarioStats::new(path, &scenario),
        cfg: scenario.cfg.clone(),
        graph: GraphStats::from(&graph),
        walk: Some(WalkStats::new(&view, agent.seed, steps)),
        tags: tag.into_iter().collect(),
    };
    emit(&view, out, &record)
}

/// Print to stdout, or write to `out` with a provenance sidecar next to it.
fn emit<T: Serialize>(value: &T, out: Option<&Path>, record: &RunRecord) -> Result<()> {
    let Some(out) = out else {
        println!("{}", serde_json::to_string_pretty(value)?);
        return Ok(());
    };
    if let Some(parent) = out.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
    }
    std::fs::write(out, serde_json::to_vec_pretty(value)?)
        .with_context(|| format!("writing {}", out.display()))?;
    let sidecar = write_sidecar(out, record)?;
    tracing::info!(out = %out.display(), sidecar = %sidecar.display(), "written");
    Ok(())
}

fn report(tag: Option<String>) -> Result<()> {
    let obj = json!({
        "code_rev": provenance::current_git_rev(),
        "version": pednav::VERSION,
        "tags": tag.into_iter().collect::<Vec<_>>(),
        "default_cfg": NavCfg::default()
    });
    println!("{}", serde_json::to_string_pretty(&obj)?);
    Ok(())
}
