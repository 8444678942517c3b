#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that boots the Mole Rush experience.
//!
//! The binary runs in one of two modes: the default windowed mode opens a
//! macroquad window and plays interactively, while `--headless` drives a full
//! session on a fixed simulated clock and prints the outcome. Both modes
//! derive every random decision from one master seed, so a logged seed is
//! enough to replay a run exactly.

use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};
use tracing_subscriber::filter::EnvFilter;

use mole_rush_core::{Difficulty, Event};
use mole_rush_rendering::{AmbientFeedback, Color, Presentation, RenderingBackend, Scene};
use mole_rush_rendering_macroquad::MacroquadBackend;
use mole_rush_system_session::{Session, SessionConfig};
use mole_rush_world::{query, World};

/// Simulated frame length used by the headless runner.
const HEADLESS_FRAME: Duration = Duration::from_millis(50);

/// Command-line arguments for the Mole Rush binary.
#[derive(Debug, Parser)]
#[command(name = "mole-rush", about = "Whack moles before they duck back underground")]
struct Args {
    /// Session length in whole seconds.
    #[arg(long, default_value_t = 10)]
    duration: u32,

    /// Difficulty level: easy, normal or hard.
    #[arg(long, default_value = "hard")]
    difficulty: Difficulty,

    /// Number of holes laid out on the board.
    #[arg(long, default_value_t = 9)]
    holes: u32,

    /// Master seed for deterministic runs. Random when omitted.
    #[arg(long)]
    seed: Option<u64>,

    /// Run one full session without a window and print the outcome.
    #[arg(long)]
    headless: bool,

    /// Render as fast as possible instead of synchronising with the display.
    #[arg(long)]
    no_vsync: bool,
}

/// Ambient feedback rendered as log lines.
///
/// The windowed adapter ships without macroquad's audio stack, so the ambient
/// loop that would play during a session is reported here instead.
#[derive(Debug, Default)]
struct LogAmbience {
    playing: bool,
}

impl AmbientFeedback for LogAmbience {
    fn start(&mut self) {
        if !self.playing {
            self.playing = true;
            info!("ambient loop started");
        }
    }

    fn stop(&mut self) {
        if self.playing {
            self.playing = false;
            info!("ambient loop stopped");
        }
    }
}

/// Routes lifecycle events to the ambient feedback sink.
fn route_ambience(events: &[Event], ambience: &mut impl AmbientFeedback) {
    for event in events {
        match event {
            Event::SessionStarted { .. } => ambience.start(),
            Event::SessionStopped | Event::TimeExpired => ambience.stop(),
            _ => {}
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::builder()
        .with_default_directive(tracing::Level::INFO.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

/// Entry point for the Mole Rush command-line interface.
fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    let master_seed = args.seed.unwrap_or_else(rand::random);
    let mut seed_stream = ChaCha8Rng::seed_from_u64(master_seed);
    let scheduler_seed: u64 = seed_stream.gen();

    let config = SessionConfig::new(args.duration, args.difficulty, args.holes, scheduler_seed)?;
    info!(
        master_seed,
        duration_secs = config.duration_secs(),
        difficulty = config.difficulty().as_str(),
        holes = config.hole_count(),
        "session configured"
    );

    let world = World::new();
    println!("{}", query::welcome_banner(&world));

    if args.headless {
        run_headless(world, config)
    } else {
        run_windowed(world, config, !args.no_vsync)
    }
}

/// Plays one session to its natural end on a fixed simulated clock.
fn run_headless(mut world: World, config: SessionConfig) -> Result<()> {
    let mut session = Session::new(config);
    let mut ambience = LogAmbience::default();
    let mut events = Vec::new();

    session.start(&mut world, &mut events);
    report(&events, &mut ambience);

    while query::is_running(&world) {
        events.clear();
        session.tick(&mut world, HEADLESS_FRAME, &mut events);
        report(&events, &mut ambience);
    }

    println!("Time's up! Final score: {}", query::score(&world));
    Ok(())
}

fn report(events: &[Event], ambience: &mut LogAmbience) {
    route_ambience(events, ambience);
    for event in events {
        match event {
            Event::MoleShown { cycle, hole } => {
                debug!(cycle = cycle.get(), hole = hole.get(), "mole shown");
            }
            Event::MoleHidden { cycle, hole } => {
                debug!(cycle = cycle.get(), hole = hole.get(), "mole hidden");
            }
            Event::CountdownTicked {
                remaining_secs,
                low_time,
            } => {
                info!(remaining_secs, low_time, "countdown");
            }
            Event::TimeExpired => info!("time expired"),
            _ => {}
        }
    }
}

/// Opens the macroquad window and plays interactively.
fn run_windowed(mut world: World, config: SessionConfig, vsync: bool) -> Result<()> {
    let scene = Scene::new(config.hole_count());
    let presentation = Presentation::new(
        "Mole Rush",
        Color::from_rgb_u8(0x1e, 0x25, 0x1c),
        scene,
    );
    let backend = MacroquadBackend::new().with_vsync(vsync);

    let mut session = Session::new(config);
    let mut ambience = LogAmbience::default();
    let mut events: Vec<Event> = Vec::new();

    backend.run(presentation, move |dt, input, scene| {
        events.clear();

        if input.start_pressed && !query::is_running(&world) {
            session.start(&mut world, &mut events);
        }
        if input.whacked.is_some() && query::is_running(&world) {
            session.record_hit(&mut world, &mut events);
        }
        session.tick(&mut world, dt, &mut events);

        route_ambience(&events, &mut ambience);
        scene.apply_events(&events);
    })
}
