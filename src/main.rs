//! Ontology Agents - Entry Point
//!
//! Loads an ontology, spawns one agent and a handful of objects, then drives
//! the tick scheduler and logs what the agent decides to do.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use ontology_agents::core::config::SimulationConfig;
use ontology_agents::core::error::Result;
use ontology_agents::core::time::format_duration;
use ontology_agents::core::types::Vec2;
use ontology_agents::entity::Physical;
use ontology_agents::simulation::{advance_tick, SimulationEvent};
use ontology_agents::world::{Registry, World};

#[derive(Parser, Debug)]
#[command(name = "ontology-agents")]
#[command(about = "Run need-driven agents over an ontology of concepts and templates")]
struct Args {
    /// Ontology source (.json or .toml); repeat to merge several
    #[arg(long, required = true)]
    ontology: Vec<PathBuf>,

    /// Simulation config (.toml); defaults apply when omitted
    #[arg(long)]
    config: Option<PathBuf>,

    /// Stop after this many ticks; runs until interrupted when omitted
    #[arg(long)]
    ticks: Option<u64>,

    /// Agent template to spawn
    #[arg(long, default_value = "human")]
    agent: String,

    /// Object template to spawn; repeat for more objects
    #[arg(long = "object")]
    objects: Vec<String>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("ontology_agents=info")),
        )
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => SimulationConfig::load(path)?,
        None => SimulationConfig::default(),
    };

    let (registry, report) = Registry::load(args.ontology.as_slice())?;
    if !report.is_clean() {
        tracing::warn!(skipped = report.len(), "ontology loaded with skipped entries");
    }

    let mut world = World::new(Arc::new(registry), config);
    let agent_id = world.spawn_agent(&args.agent, Vec2::new(3.0, 2.0))?;
    for (i, template) in args.objects.iter().enumerate() {
        world.spawn_object(template, Vec2::new(1.0 + i as f32, 2.0))?;
    }

    tracing::info!(
        agent = %args.agent,
        objects = world.objects.len(),
        seconds_per_tick = world.config.seconds_per_tick,
        "simulation starting"
    );

    loop {
        if args.ticks.is_some_and(|limit| world.current_tick >= limit) {
            break;
        }

        let elapsed = format_duration(world.elapsed);
        for event in advance_tick(&mut world) {
            log_event(&elapsed, &event);
        }
    }

    if let Some(agent) = world.agent(agent_id) {
        let (pressing, level) = agent.needs.most_pressing();
        tracing::info!(
            agent = %agent.name(),
            elapsed = %format_duration(world.elapsed),
            needs = ?agent.needs,
            most_pressing = pressing.name(),
            level,
            memories = agent.memories.len(),
            "simulation finished"
        );
    }

    Ok(())
}

fn log_event(elapsed: &str, event: &SimulationEvent) {
    match event {
        SimulationEvent::AdvertSelected {
            agent,
            object,
            advert,
            score,
            ..
        } => {
            tracing::info!(%elapsed, %agent, %object, %advert, score, "advert selected");
        }
        SimulationEvent::ActionCompleted {
            agent,
            action,
            object,
            ..
        } => {
            tracing::info!(%elapsed, %agent, %action, %object, "action completed");
        }
        SimulationEvent::Idle { .. } => {}
    }
}
