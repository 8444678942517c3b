//! Uniform hole selection that avoids immediate repeats.

use mole_rush_core::HoleId;

use crate::SchedulerRng;

/// Picks the hole for each cycle, remembering the previous pick so two
/// consecutive moles never share a hole on boards with more than one hole.
#[derive(Clone, Debug, Default)]
pub struct HoleSelector {
    previous: Option<HoleId>,
}

impl HoleSelector {
    /// Creates a selector with no previous pick recorded.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Chooses uniformly among `holes`, resampling while the pick equals the
    /// previous one and more than one candidate exists.
    ///
    /// A single-hole board returns that hole without entering the rejection
    /// loop. Returns `None` for an empty board. The loop terminates because
    /// hole identifiers on a board are distinct, so at most one candidate can
    /// ever be rejected per draw.
    pub fn choose(&mut self, holes: &[HoleId], rng: &mut SchedulerRng) -> Option<HoleId> {
        let first = *holes.first()?;
        if holes.len() == 1 {
            self.previous = Some(first);
            return Some(first);
        }

        loop {
            let candidate = holes[rng.index(holes.len())];
            if Some(candidate) != self.previous {
                self.previous = Some(candidate);
                return Some(candidate);
            }
        }
    }

    /// Clears the previous record at session boundaries.
    pub fn forget(&mut self) {
        self.previous = None;
    }
}
