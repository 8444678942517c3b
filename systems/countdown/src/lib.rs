#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Countdown controller that turns simulated time into one-second decrements.
//!
//! The recurring one-second interval of the original game becomes an
//! accumulator over `TimeAdvanced` events. The system emits one
//! [`Command::AdvanceCountdown`] per elapsed quantum; the world owns the
//! remaining-time value, applies the decrement and reports expiry. Once the
//! countdown reaches zero the controller goes inert on its own, without
//! waiting for an external stop.

use std::time::Duration;

use mole_rush_core::{Command, Event};

/// Interval between successive countdown decrements.
pub const TICK_QUANTUM: Duration = Duration::from_secs(1);

/// Pure system that meters out countdown decrements.
#[derive(Debug, Default)]
pub struct Countdown {
    accumulator: Duration,
    active: bool,
}

impl Countdown {
    /// Creates an inactive countdown with an empty accumulator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the recurring tick is currently armed.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Consumes events to emit decrement commands.
    ///
    /// `remaining_secs` is the countdown value owned by the world; when it is
    /// already zero the system stops accumulating, which is the
    /// self-termination required at expiry.
    pub fn handle(&mut self, events: &[Event], remaining_secs: u32, out: &mut Vec<Command>) {
        for event in events {
            match event {
                Event::SessionStarted { .. } => {
                    self.active = true;
                    self.accumulator = Duration::ZERO;
                }
                Event::SessionStopped => {
                    // Mandatory cancellation: no ticking after stop.
                    self.active = false;
                    self.accumulator = Duration::ZERO;
                }
                Event::TimeExpired => {
                    self.active = false;
                }
                Event::TimeAdvanced { dt } => {
                    if !self.active || remaining_secs == 0 {
                        continue;
                    }
                    self.accumulator = self.accumulator.saturating_add(*dt);
                    while self.accumulator >= TICK_QUANTUM {
                        self.accumulator -= TICK_QUANTUM;
                        out.push(Command::AdvanceCountdown);
                    }
                }
                _ => {}
            }
        }
    }
}
