#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative session state management for Mole Rush.
//!
//! The world owns every mutable entity of a session: the board of holes, the
//! countdown, the score, and the at-most-one visible mole. All mutation flows
//! through [`apply`], which executes a single [`Command`] and broadcasts the
//! resulting [`Event`] values for systems and adapters to react to.

mod score;

use mole_rush_core::{Command, CycleId, Event, HoleId, LOW_TIME_THRESHOLD, WELCOME_BANNER};

use crate::score::ScoreBoard;

const DEFAULT_HOLE_COUNT: u32 = 9;

/// Mole currently popped out of a hole.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VisibleMole {
    /// Handle of the show/hide cycle that owns the mole.
    pub cycle: CycleId,
    /// Hole the mole occupies.
    pub hole: HoleId,
}

/// Represents the authoritative Mole Rush session state.
///
/// Everything here is created at session start and reset at session stop;
/// nothing persists across sessions. There are no process-wide singletons:
/// callers own the instance and thread it through [`apply`] and [`query`].
#[derive(Debug)]
pub struct World {
    banner: &'static str,
    holes: Vec<HoleId>,
    duration_secs: u32,
    remaining_secs: u32,
    score: ScoreBoard,
    visible: Option<VisibleMole>,
    running: bool,
}

impl World {
    /// Creates a new world with the default nine-hole board and no session running.
    #[must_use]
    pub fn new() -> Self {
        Self {
            banner: WELCOME_BANNER,
            holes: hole_row(DEFAULT_HOLE_COUNT),
            duration_secs: 0,
            remaining_secs: 0,
            score: ScoreBoard::default(),
            visible: None,
            running: false,
        }
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

fn hole_row(count: u32) -> Vec<HoleId> {
    (0..count).map(HoleId::new).collect()
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::ConfigureHoles { count } => {
            world.holes = hole_row(count);
            world.visible = None;
            out_events.push(Event::HolesConfigured { count });
        }
        Command::StartSession { duration_secs } => {
            world.running = true;
            world.duration_secs = duration_secs;
            world.remaining_secs = duration_secs;
            world.visible = None;
            let score = world.score.reset();
            out_events.push(Event::SessionStarted { duration_secs });
            out_events.push(Event::ScoreChanged { score });
        }
        Command::StopSession => {
            // Repeated stops are inert so control surfaces may fire freely.
            if !world.running {
                return;
            }
            world.running = false;
            out_events.push(Event::SessionStopped);
            if let Some(mole) = world.visible.take() {
                out_events.push(Event::MoleHidden {
                    cycle: mole.cycle,
                    hole: mole.hole,
                });
            }
            let score = world.score.reset();
            out_events.push(Event::ScoreChanged { score });
        }
        Command::Tick { dt } => {
            if !world.running {
                return;
            }
            out_events.push(Event::TimeAdvanced { dt });
        }
        Command::ShowMole { cycle, hole } => {
            // At most one mole is visible; a show never evicts a live mole.
            if !world.running || world.visible.is_some() || !world.holes.contains(&hole) {
                return;
            }
            world.visible = Some(VisibleMole { cycle, hole });
            out_events.push(Event::MoleShown { cycle, hole });
        }
        Command::HideMole { cycle } => {
            let owns_mole = world.visible.map_or(false, |mole| mole.cycle == cycle);
            if !owns_mole {
                return;
            }
            if let Some(mole) = world.visible.take() {
                out_events.push(Event::MoleHidden {
                    cycle: mole.cycle,
                    hole: mole.hole,
                });
            }
        }
        Command::AdvanceCountdown => {
            if !world.running || world.remaining_secs == 0 {
                return;
            }
            world.remaining_secs -= 1;
            out_events.push(Event::CountdownTicked {
                remaining_secs: world.remaining_secs,
                low_time: world.remaining_secs <= LOW_TIME_THRESHOLD,
            });
            if world.remaining_secs == 0 {
                out_events.push(Event::TimeExpired);
            }
        }
        Command::RecordHit => {
            let score = world.score.record_hit();
            out_events.push(Event::ScoreChanged { score });
        }
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use super::{VisibleMole, World};
    use mole_rush_core::HoleId;

    /// Retrieves the welcome banner that adapters may display to players.
    #[must_use]
    pub fn welcome_banner(world: &World) -> &'static str {
        world.banner
    }

    /// Holes currently laid out on the board.
    #[must_use]
    pub fn holes(world: &World) -> &[HoleId] {
        &world.holes
    }

    /// Whole seconds left on the countdown.
    #[must_use]
    pub fn remaining_secs(world: &World) -> u32 {
        world.remaining_secs
    }

    /// Duration the running session was configured with.
    #[must_use]
    pub fn session_duration_secs(world: &World) -> u32 {
        world.duration_secs
    }

    /// Current point total.
    #[must_use]
    pub fn score(world: &World) -> u32 {
        world.score.points()
    }

    /// Mole currently visible on the board, if any.
    #[must_use]
    pub fn visible_mole(world: &World) -> Option<VisibleMole> {
        world.visible
    }

    /// Whether a session is currently running.
    #[must_use]
    pub fn is_running(world: &World) -> bool {
        world.running
    }
}
