#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Session controller that wires the countdown and appearance scheduler into
//! a start/stop lifecycle.
//!
//! All cooperation happens on one timeline: adapters call [`Session::tick`]
//! once per frame with the elapsed simulated time, and the controller pumps
//! the resulting events through the countdown and scheduling systems until no
//! system has anything left to say. Configuration is validated up front so a
//! bad difficulty or duration can never leave half-armed timers behind.

use std::time::Duration;

use mole_rush_core::{Command, ConfigError, Difficulty, Event, HoleId};
use mole_rush_system_countdown::Countdown;
use mole_rush_system_scheduling::{self as scheduling, Scheduling};
use mole_rush_world::{self as world, query, World};

/// Validated configuration for one game session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SessionConfig {
    duration_secs: u32,
    difficulty: Difficulty,
    hole_count: u32,
    rng_seed: u64,
}

impl SessionConfig {
    /// Validates and captures the session parameters.
    ///
    /// Fails before any command exists, so configuration errors can never
    /// orphan deferred work.
    pub fn new(
        duration_secs: u32,
        difficulty: Difficulty,
        hole_count: u32,
        rng_seed: u64,
    ) -> Result<Self, ConfigError> {
        if duration_secs == 0 {
            return Err(ConfigError::ZeroDuration);
        }
        if hole_count == 0 {
            return Err(ConfigError::NoHoles);
        }
        Ok(Self {
            duration_secs,
            difficulty,
            hole_count,
            rng_seed,
        })
    }

    /// Whole seconds the countdown starts from.
    #[must_use]
    pub const fn duration_secs(&self) -> u32 {
        self.duration_secs
    }

    /// Difficulty that scales the mole visibility windows.
    #[must_use]
    pub const fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Number of holes laid out on the board.
    #[must_use]
    pub const fn hole_count(&self) -> u32 {
        self.hole_count
    }

    /// Seed for the scheduler's deterministic random source.
    #[must_use]
    pub const fn rng_seed(&self) -> u64 {
        self.rng_seed
    }
}

/// Drives one game session over a [`World`] instance.
#[derive(Debug)]
pub struct Session {
    config: SessionConfig,
    countdown: Countdown,
    scheduling: Scheduling,
    holes: Vec<HoleId>,
    commands: Vec<Command>,
}

impl Session {
    /// Creates a session controller from a validated configuration.
    #[must_use]
    pub fn new(config: SessionConfig) -> Self {
        Self {
            config,
            countdown: Countdown::new(),
            scheduling: Scheduling::new(scheduling::Config::new(
                config.difficulty(),
                config.rng_seed(),
            )),
            holes: Vec::new(),
            commands: Vec::new(),
        }
    }

    /// Configuration the session was constructed with.
    #[must_use]
    pub const fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Starts the session: lays out the board, resets countdown and score,
    /// arms the recurring tick and schedules the first show/hide cycle.
    pub fn start(&mut self, world: &mut World, out_events: &mut Vec<Event>) {
        let cursor = out_events.len();
        world::apply(
            world,
            Command::ConfigureHoles {
                count: self.config.hole_count(),
            },
            out_events,
        );
        world::apply(
            world,
            Command::StartSession {
                duration_secs: self.config.duration_secs(),
            },
            out_events,
        );
        self.pump(world, out_events, cursor);
    }

    /// Stops the session early: cancels the countdown, clears the score and
    /// cancels the in-flight cycle so no stray toggle fires afterwards.
    /// Repeated stops are inert.
    pub fn stop(&mut self, world: &mut World, out_events: &mut Vec<Event>) {
        let cursor = out_events.len();
        world::apply(world, Command::StopSession, out_events);
        self.pump(world, out_events, cursor);
    }

    /// Advances the session by one frame of simulated time.
    pub fn tick(&mut self, world: &mut World, dt: Duration, out_events: &mut Vec<Event>) {
        let cursor = out_events.len();
        world::apply(world, Command::Tick { dt }, out_events);
        self.pump(world, out_events, cursor);
    }

    /// Forwards a whack to the score tracker. Every hit counts; the board
    /// does not check that a mole was visible.
    pub fn record_hit(&mut self, world: &mut World, out_events: &mut Vec<Event>) {
        world::apply(world, Command::RecordHit, out_events);
    }

    /// Routes every event at or past `cursor` through the systems, applying
    /// the commands they emit until the frame settles.
    ///
    /// The countdown always runs before the scheduler so the continue-or-stop
    /// decision observes the freshest remaining-time value.
    fn pump(&mut self, world: &mut World, events: &mut Vec<Event>, cursor: usize) {
        let mut countdown_cursor = cursor;
        let mut scheduling_cursor = cursor;

        loop {
            let mut progressed = false;

            if countdown_cursor < events.len() {
                progressed = true;
                let end = events.len();
                self.commands.clear();
                self.countdown.handle(
                    &events[countdown_cursor..end],
                    query::remaining_secs(world),
                    &mut self.commands,
                );
                countdown_cursor = end;
                for command in self.commands.drain(..) {
                    world::apply(world, command, events);
                }
            }

            if scheduling_cursor < events.len() {
                progressed = true;
                let end = events.len();
                self.holes.clear();
                self.holes.extend_from_slice(query::holes(world));
                self.commands.clear();
                self.scheduling.handle(
                    &events[scheduling_cursor..end],
                    &self.holes,
                    query::remaining_secs(world),
                    &mut self.commands,
                );
                scheduling_cursor = end;
                for command in self.commands.drain(..) {
                    world::apply(world, command, events);
                }
            }

            if !progressed {
                break;
            }
        }
    }
}
