//! Point tracking for a single Mole Rush session.

/// Accumulates the points scored by whacking moles.
///
/// Every recorded hit counts; the board does not verify that a mole was
/// actually visible when the whack arrived. That simplification is inherited
/// from the game design, not an oversight.
#[derive(Debug, Default)]
pub(crate) struct ScoreBoard {
    points: u32,
}

impl ScoreBoard {
    /// Increments the point total by one and returns the new value.
    pub(crate) fn record_hit(&mut self) -> u32 {
        self.points = self.points.saturating_add(1);
        self.points
    }

    /// Clears the point total back to zero and returns it.
    pub(crate) fn reset(&mut self) -> u32 {
        self.points = 0;
        self.points
    }

    /// Current point total.
    pub(crate) const fn points(&self) -> u32 {
        self.points
    }
}
