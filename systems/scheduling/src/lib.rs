#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Appearance scheduler that drives the repeating show/hide cycle of moles.
//!
//! The self-rearming timer chain of the original game is expressed here as an
//! explicit state machine advanced by simulated time, so cancellation and the
//! at-most-one pending cycle invariant stay well-defined. The system consumes
//! world events plus read-only snapshots and answers exclusively with command
//! batches.

pub mod delay;
pub mod selector;

use std::time::Duration;

use mole_rush_core::{Command, CycleId, Difficulty, Event, HoleId};

use crate::{delay::compute_delay, selector::HoleSelector};

const RNG_MULTIPLIER: u64 = 6_364_136_223_846_793_005;
const RNG_INCREMENT: u64 = 1;

/// Deterministic pseudo-random source shared by delay and hole selection.
#[derive(Clone, Debug)]
pub struct SchedulerRng {
    state: u64,
}

impl SchedulerRng {
    /// Creates a new source from the provided seed.
    #[must_use]
    pub const fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    fn advance(&mut self) -> u64 {
        self.state = self
            .state
            .wrapping_mul(RNG_MULTIPLIER)
            .wrapping_add(RNG_INCREMENT);
        self.state
    }

    pub(crate) fn index(&mut self, len: usize) -> usize {
        debug_assert!(len > 0, "index requires a non-empty range");
        (self.advance() % len as u64) as usize
    }

    pub(crate) fn uniform_inclusive(&mut self, min: u64, max: u64) -> u64 {
        debug_assert!(min <= max, "uniform_inclusive requires an ordered range");
        min + self.advance() % (max - min + 1)
    }
}

/// Configuration parameters required to construct the scheduling system.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    difficulty: Difficulty,
    rng_seed: u64,
}

impl Config {
    /// Creates a new configuration using the provided difficulty and seed.
    #[must_use]
    pub const fn new(difficulty: Difficulty, rng_seed: u64) -> Self {
        Self {
            difficulty,
            rng_seed,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    Idle,
    Showing {
        cycle: CycleId,
        remaining: Duration,
    },
    Stopped,
}

/// Pure system that orchestrates the show → wait → hide → reschedule loop.
#[derive(Debug)]
pub struct Scheduling {
    difficulty: Difficulty,
    rng: SchedulerRng,
    selector: HoleSelector,
    phase: Phase,
    next_cycle: u64,
}

impl Scheduling {
    /// Creates a new scheduling system using the supplied configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            difficulty: config.difficulty,
            rng: SchedulerRng::new(config.rng_seed),
            selector: HoleSelector::new(),
            phase: Phase::Idle,
            next_cycle: 0,
        }
    }

    /// Handle of the in-flight cycle, if one is outstanding.
    #[must_use]
    pub fn pending_cycle(&self) -> Option<CycleId> {
        match self.phase {
            Phase::Showing { cycle, .. } => Some(cycle),
            Phase::Idle | Phase::Stopped => None,
        }
    }

    /// Consumes events and read-only snapshots to emit show/hide commands.
    ///
    /// `remaining_secs` is the countdown value after all decrements of the
    /// current frame were applied, so the continue-or-stop decision observes
    /// the freshest value.
    pub fn handle(
        &mut self,
        events: &[Event],
        holes: &[HoleId],
        remaining_secs: u32,
        out: &mut Vec<Command>,
    ) {
        for event in events {
            match event {
                Event::SessionStarted { .. } => {
                    self.selector.forget();
                    self.phase = Phase::Idle;
                    self.begin_cycle(holes, out);
                }
                Event::SessionStopped => {
                    // Invalidate the pending handle so no stray toggle or
                    // reschedule fires after stop.
                    self.phase = Phase::Stopped;
                }
                Event::TimeAdvanced { dt } => {
                    self.advance(*dt, holes, remaining_secs, out);
                }
                _ => {}
            }
        }
    }

    fn advance(
        &mut self,
        dt: Duration,
        holes: &[HoleId],
        remaining_secs: u32,
        out: &mut Vec<Command>,
    ) {
        if let Phase::Showing { cycle, remaining } = self.phase {
            let left = remaining.saturating_sub(dt);
            if !left.is_zero() {
                self.phase = Phase::Showing {
                    cycle,
                    remaining: left,
                };
                return;
            }

            out.push(Command::HideMole { cycle });
            if remaining_secs > 0 {
                self.phase = Phase::Idle;
                self.begin_cycle(holes, out);
            } else {
                // Countdown ran out while the mole was up; the hide above is
                // the last toggle and the session winds down.
                self.phase = Phase::Stopped;
                out.push(Command::StopSession);
            }
        }
    }

    fn begin_cycle(&mut self, holes: &[HoleId], out: &mut Vec<Command>) {
        let hole = match self.selector.choose(holes, &mut self.rng) {
            Some(hole) => hole,
            None => return,
        };
        let delay = compute_delay(self.difficulty, &mut self.rng);
        let cycle = CycleId::new(self.next_cycle);
        self.next_cycle = self.next_cycle.wrapping_add(1);
        self.phase = Phase::Showing {
            cycle,
            remaining: delay,
        };
        out.push(Command::ShowMole { cycle, hole });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(count: u32) -> Vec<HoleId> {
        (0..count).map(HoleId::new).collect()
    }

    #[test]
    fn session_start_schedules_exactly_one_cycle() {
        let mut scheduling = Scheduling::new(Config::new(Difficulty::Normal, 1));
        let mut out = Vec::new();
        scheduling.handle(
            &[Event::SessionStarted { duration_secs: 10 }],
            &board(9),
            10,
            &mut out,
        );

        assert_eq!(out.len(), 1);
        assert!(matches!(out[0], Command::ShowMole { .. }));
        assert!(scheduling.pending_cycle().is_some());
    }

    #[test]
    fn stop_invalidates_the_pending_cycle() {
        let mut scheduling = Scheduling::new(Config::new(Difficulty::Normal, 1));
        let mut out = Vec::new();
        scheduling.handle(
            &[Event::SessionStarted { duration_secs: 10 }],
            &board(9),
            10,
            &mut out,
        );

        out.clear();
        scheduling.handle(&[Event::SessionStopped], &board(9), 10, &mut out);
        assert!(out.is_empty());
        assert!(scheduling.pending_cycle().is_none());

        // Time advancing after stop must not toggle anything.
        scheduling.handle(
            &[Event::TimeAdvanced {
                dt: Duration::from_secs(5),
            }],
            &board(9),
            10,
            &mut out,
        );
        assert!(out.is_empty());
    }

    #[test]
    fn elapsed_delay_hides_and_reschedules_while_time_remains() {
        let mut scheduling = Scheduling::new(Config::new(Difficulty::Normal, 7));
        let mut out = Vec::new();
        scheduling.handle(
            &[Event::SessionStarted { duration_secs: 10 }],
            &board(9),
            10,
            &mut out,
        );
        let first = scheduling.pending_cycle().expect("cycle pending");

        out.clear();
        scheduling.handle(
            &[Event::TimeAdvanced {
                dt: Duration::from_millis(1000),
            }],
            &board(9),
            9,
            &mut out,
        );

        assert_eq!(out.len(), 2);
        assert_eq!(out[0], Command::HideMole { cycle: first });
        assert!(matches!(out[1], Command::ShowMole { .. }));
        let second = scheduling.pending_cycle().expect("fresh cycle pending");
        assert_ne!(first, second);
    }

    #[test]
    fn elapsed_delay_with_expired_countdown_winds_the_session_down() {
        let mut scheduling = Scheduling::new(Config::new(Difficulty::Normal, 7));
        let mut out = Vec::new();
        scheduling.handle(
            &[Event::SessionStarted { duration_secs: 1 }],
            &board(9),
            1,
            &mut out,
        );
        let cycle = scheduling.pending_cycle().expect("cycle pending");

        out.clear();
        scheduling.handle(
            &[Event::TimeAdvanced {
                dt: Duration::from_millis(1000),
            }],
            &board(9),
            0,
            &mut out,
        );

        assert_eq!(
            out,
            vec![Command::HideMole { cycle }, Command::StopSession]
        );
        assert!(scheduling.pending_cycle().is_none());
    }

    #[test]
    fn partial_delay_keeps_the_cycle_pending() {
        let mut scheduling = Scheduling::new(Config::new(Difficulty::Easy, 7));
        let mut out = Vec::new();
        scheduling.handle(
            &[Event::SessionStarted { duration_secs: 10 }],
            &board(9),
            10,
            &mut out,
        );
        let cycle = scheduling.pending_cycle().expect("cycle pending");

        out.clear();
        scheduling.handle(
            &[Event::TimeAdvanced {
                dt: Duration::from_millis(700),
            }],
            &board(9),
            10,
            &mut out,
        );
        assert!(out.is_empty());
        assert_eq!(scheduling.pending_cycle(), Some(cycle));
    }
}
