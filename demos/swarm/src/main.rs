//! `swarm`: 50 K self-propelled agents in a toroidal world.
//!
//! Agents spawn on a ring around the world center, head inward and random-walk
//! from there.  Every `output_interval_ticks` steps a snapshot is written to
//! `output/swarm/` through `SimOutputObserver` (1-in-`sample_rate` agents for
//! the trajectory file, the whole population for the summary file).
//!
//! Run with:
//!   cargo run -p swarm --release                 # built-in defaults
//!   cargo run -p swarm --release -- swarm.json   # JSON overrides
//!   RUST_LOG=debug cargo run -p swarm --release  # per-snapshot progress

// Use mimalloc to keep the per-snapshot Arc<[Agent]> copies cheap.
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use log::{debug, info};
use memory_stats::memory_stats;
use serde::Deserialize;

use sw_agent::{Agent, Snapshot, SpawnOptions, load_agents};
use sw_core::{AgentRng, SimConfig, Tick};
use sw_output::{
    CsvWriter, OutputResult, OutputWriter, SimOutputObserver, StepSummaryRow, TrajectoryRow,
};
use sw_sim::{LatestSnapshot, SimBuilder, SimObserver};
use sw_steer::{RandomTurn, Spin, Steering, StepContext, Straight};

// ── Memory helper ─────────────────────────────────────────────────────────────

fn mem_mb() -> f64 {
    memory_stats()
        .map(|s| s.physical_mem as f64 / (1024.0 * 1024.0))
        .unwrap_or(0.0)
}

// ── Demo configuration ────────────────────────────────────────────────────────

/// Which built-in steering rule drives the run.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum SteeringChoice {
    Straight,
    #[default]
    RandomTurn,
    Spin { rate: f32 },
}

impl Steering for SteeringChoice {
    fn turn(&self, agent: &Agent, ctx: &StepContext<'_>, rng: &mut AgentRng) -> f32 {
        match self {
            SteeringChoice::Straight      => Straight.turn(agent, ctx, rng),
            SteeringChoice::RandomTurn    => RandomTurn.turn(agent, ctx, rng),
            SteeringChoice::Spin { rate } => Spin::new(*rate).turn(agent, ctx, rng),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct DemoConfig {
    sim:         SimConfig,
    spawn:       SpawnOptions,
    steering:    SteeringChoice,
    /// Optional initial population CSV; overrides `spawn` and `sim.population`.
    agents_csv:  Option<PathBuf>,
    /// Write every Nth agent to `trajectories.csv`.
    sample_rate: usize,
    output_dir:  PathBuf,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            sim:         SimConfig::default(),
            spawn:       SpawnOptions::default(),
            steering:    SteeringChoice::default(),
            agents_csv:  None,
            sample_rate: 50,
            output_dir:  PathBuf::from("output/swarm"),
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<DemoConfig> {
    let Some(path) = path else {
        return Ok(DemoConfig::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    let config: DemoConfig = serde_json::from_str(&text)
        .with_context(|| format!("parsing config {}", path.display()))?;
    Ok(config)
}

// ── Sampled output ────────────────────────────────────────────────────────────

/// Passes every `every`-th agent's trajectory row (and every summary) through
/// to `inner`.
struct Sampled<W: OutputWriter> {
    inner: W,
    every: usize,
}

impl<W: OutputWriter> Sampled<W> {
    fn new(inner: W, every: usize) -> Self {
        Self { inner, every: every.max(1) }
    }
}

impl<W: OutputWriter> OutputWriter for Sampled<W> {
    fn write_trajectories(&mut self, rows: &[TrajectoryRow]) -> OutputResult<()> {
        let kept: Vec<TrajectoryRow> = rows
            .iter()
            .filter(|r| r.agent_id as usize % self.every == 0)
            .copied()
            .collect();
        self.inner.write_trajectories(&kept)
    }

    fn write_step_summary(&mut self, row: &StepSummaryRow) -> OutputResult<()> {
        self.inner.write_step_summary(row)
    }

    fn finish(&mut self) -> OutputResult<()> {
        self.inner.finish()
    }
}

// ── Progress observer ─────────────────────────────────────────────────────────

/// Logs progress and republishes each snapshot around the output observer.
struct SwarmObserver<W: OutputWriter> {
    inner:  SimOutputObserver<W>,
    latest: LatestSnapshot,
    start:  Instant,
    steps:  u64,
    agents: u64,
}

impl<W: OutputWriter> SwarmObserver<W> {
    fn new(inner: SimOutputObserver<W>, latest: LatestSnapshot) -> Self {
        Self { inner, latest, start: Instant::now(), steps: 0, agents: 0 }
    }
}

impl<W: OutputWriter> SimObserver for SwarmObserver<W> {
    fn on_step_end(&mut self, tick: Tick, agents: usize) {
        self.steps += 1;
        self.agents += agents as u64;
        self.inner.on_step_end(tick, agents);
    }

    fn on_snapshot(&mut self, snapshot: &Snapshot, elapsed_secs: f64) {
        let wall = self.start.elapsed().as_secs_f64();
        debug!(
            "{}  sim {:.2}s  wall {:.3}s  ({:.1} M agent-steps/s)  mem={:.0} MB",
            snapshot.tick(),
            elapsed_secs,
            wall,
            self.agents as f64 / wall.max(f64::EPSILON) / 1_000_000.0,
            mem_mb(),
        );
        self.inner.on_snapshot(snapshot, elapsed_secs);
        self.latest.on_snapshot(snapshot, elapsed_secs);
    }

    fn on_sim_end(&mut self, final_tick: Tick) {
        self.inner.on_sim_end(final_tick);
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config_path = std::env::args_os().nth(1).map(PathBuf::from);
    let mut demo = load_config(config_path.as_deref())?;
    info!("mem[startup] {:.0} MB", mem_mb());

    // 1. Population: from CSV, or spawned from the configured options.
    let t_build = Instant::now();
    let builder = match &demo.agents_csv {
        Some(path) => {
            let store = load_agents(path)
                .with_context(|| format!("loading agents from {}", path.display()))?;
            demo.sim.population = store.len();
            SimBuilder::new(demo.sim.clone(), store, demo.steering)
        }
        None => SimBuilder::spawn(demo.sim.clone(), demo.spawn.clone(), demo.steering)?,
    };
    let mut sim = builder.build()?;
    info!(
        "built {} agents ({}) in {:.2}s, mem {:.0} MB",
        sim.agents.len(),
        sim.agents.layout(),
        t_build.elapsed().as_secs_f64(),
        mem_mb(),
    );
    info!(
        "{} steps of {:.4}s, steering {:?}, snapshots every {} steps",
        demo.sim.total_ticks, demo.sim.dt, demo.steering, demo.sim.output_interval_ticks,
    );

    // 2. Output.
    let latest = LatestSnapshot::new();
    let writer = Sampled::new(CsvWriter::new(&demo.output_dir)?, demo.sample_rate);
    let mut obs = SwarmObserver::new(SimOutputObserver::new(writer), latest.clone());

    // 3. Run.
    sim.run(&mut obs)?;

    let wall = obs.start.elapsed().as_secs_f64();
    info!(
        "done: {} steps in {:.3}s ({:.1} M agent-steps/s), mem {:.0} MB",
        obs.steps,
        wall,
        obs.agents as f64 / wall.max(f64::EPSILON) / 1_000_000.0,
        mem_mb(),
    );
    if let Some(snap) = latest.get() {
        let summary = StepSummaryRow::from_snapshot(&snap, sim.elapsed_secs());
        info!(
            "last snapshot {}: centroid ({:.1}, {:.1})",
            snap.tick(),
            summary.mean_x,
            summary.mean_y,
        );
    }
    if let Some(e) = obs.inner.take_error() {
        anyhow::bail!("output incomplete in {}: {e}", demo.output_dir.display());
    }
    info!("output written to {}", demo.output_dir.display());
    Ok(())
}
