#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Mole Rush engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters submit [`Command`] values
//! describing desired mutations, the world executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values for systems to
//! react to deterministically. Systems consume event streams, query immutable
//! snapshots, and respond exclusively with new command batches.

use std::{str::FromStr, time::Duration};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to Mole Rush.";

/// Remaining-time threshold at or below which the display shows the low-time marker.
pub const LOW_TIME_THRESHOLD: u32 = 3;

/// Named setting that controls the delay distribution of mole appearances.
///
/// Immutable for the duration of a session. Text supplied by the player is
/// converted through [`FromStr`], which is the only place an out-of-set value
/// can enter the program.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    /// Moles linger for a fixed 1500 milliseconds.
    Easy,
    /// Moles linger for a fixed 1000 milliseconds.
    Normal,
    /// Moles linger for a random interval between 600 and 1200 milliseconds.
    Hard,
}

impl Difficulty {
    /// Canonical lowercase name used by configuration surfaces.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Normal => "normal",
            Self::Hard => "hard",
        }
    }
}

impl FromStr for Difficulty {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "easy" => Ok(Self::Easy),
            "normal" => Ok(Self::Normal),
            "hard" => Ok(Self::Hard),
            other => Err(ConfigError::UnknownDifficulty {
                value: other.to_owned(),
            }),
        }
    }
}

/// Unique identifier assigned to a hole on the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct HoleId(u32);

impl HoleId {
    /// Creates a new hole identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Opaque handle naming one show/hide cycle of the appearance scheduler.
///
/// At most one cycle is outstanding at a time; the handle pairs a mole's
/// deferred hide with the show that scheduled it so a stale hide can never
/// clear a newer mole.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CycleId(u64);

impl CycleId {
    /// Creates a new cycle identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u64 {
        self.0
    }
}

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Rebuilds the board with the provided number of holes.
    ConfigureHoles {
        /// Number of holes laid out on the board.
        count: u32,
    },
    /// Begins a new session with the provided countdown duration.
    StartSession {
        /// Whole seconds the session lasts before the countdown expires.
        duration_secs: u32,
    },
    /// Ends the running session, cancelling all pending work.
    StopSession,
    /// Advances the simulation clock by the provided delta time.
    Tick {
        /// Duration of simulated time that elapsed since the previous tick.
        dt: Duration,
    },
    /// Makes a mole visible in the provided hole for the given cycle.
    ShowMole {
        /// Handle of the cycle that owns the mole.
        cycle: CycleId,
        /// Hole the mole pops out of.
        hole: HoleId,
    },
    /// Hides the mole belonging to the provided cycle.
    HideMole {
        /// Handle of the cycle whose mole should be hidden.
        cycle: CycleId,
    },
    /// Decrements the countdown by one whole second.
    AdvanceCountdown,
    /// Records a whack from the player.
    RecordHit,
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// Confirms that the board was rebuilt.
    HolesConfigured {
        /// Number of holes now present on the board.
        count: u32,
    },
    /// Announces that a session began.
    SessionStarted {
        /// Whole seconds on the countdown at session start.
        duration_secs: u32,
    },
    /// Announces that the session ended before or at countdown expiry.
    SessionStopped,
    /// Indicates that the simulation clock advanced.
    TimeAdvanced {
        /// Duration of simulated time that elapsed in the tick.
        dt: Duration,
    },
    /// Confirms that a mole became visible.
    MoleShown {
        /// Handle of the cycle that owns the mole.
        cycle: CycleId,
        /// Hole the mole occupies.
        hole: HoleId,
    },
    /// Confirms that a mole was hidden.
    MoleHidden {
        /// Handle of the cycle that owned the mole.
        cycle: CycleId,
        /// Hole the mole vacated.
        hole: HoleId,
    },
    /// Reports the countdown value after a one-second decrement.
    CountdownTicked {
        /// Whole seconds left on the countdown.
        remaining_secs: u32,
        /// Whether the display should show the low-time marker.
        low_time: bool,
    },
    /// Announces that the countdown reached exactly zero.
    TimeExpired,
    /// Reports the score after an increment or a reset.
    ScoreChanged {
        /// Current point total.
        score: u32,
    },
}

/// Errors raised while validating session configuration.
///
/// Configuration errors are synchronous and abort session start before any
/// command is applied, so no orphaned deferred work can exist.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The provided difficulty name is outside the recognized set.
    #[error("invalid difficulty level: {value:?} (expected easy, normal or hard)")]
    UnknownDifficulty {
        /// Text that failed to parse.
        value: String,
    },
    /// Session duration must cover at least one countdown second.
    #[error("session duration must be at least one second")]
    ZeroDuration,
    /// The board must contain at least one hole.
    #[error("board must contain at least one hole")]
    NoHoles,
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, CycleId, Difficulty, HoleId};
    use serde::{de::DeserializeOwned, Serialize};

    #[test]
    fn difficulty_parses_canonical_names() {
        assert_eq!("easy".parse(), Ok(Difficulty::Easy));
        assert_eq!("normal".parse(), Ok(Difficulty::Normal));
        assert_eq!("hard".parse(), Ok(Difficulty::Hard));
    }

    #[test]
    fn difficulty_rejects_unrecognized_names() {
        let error = "brutal".parse::<Difficulty>().expect_err("must reject");
        assert_eq!(
            error,
            ConfigError::UnknownDifficulty {
                value: "brutal".to_owned()
            }
        );
    }

    #[test]
    fn difficulty_round_trips_through_its_name() {
        for difficulty in [Difficulty::Easy, Difficulty::Normal, Difficulty::Hard] {
            assert_eq!(difficulty.as_str().parse(), Ok(difficulty));
        }
    }

    fn assert_round_trip<T>(value: &T)
    where
        T: Serialize + DeserializeOwned + PartialEq + std::fmt::Debug,
    {
        let bytes = bincode::serialize(value).expect("serialize");
        let restored: T = bincode::deserialize(&bytes).expect("deserialize");
        assert_eq!(&restored, value);
    }

    #[test]
    fn hole_id_round_trips_through_bincode() {
        assert_round_trip(&HoleId::new(7));
    }

    #[test]
    fn cycle_id_round_trips_through_bincode() {
        assert_round_trip(&CycleId::new(42));
    }

    #[test]
    fn difficulty_round_trips_through_bincode() {
        assert_round_trip(&Difficulty::Hard);
    }
}
