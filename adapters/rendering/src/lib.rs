#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for Mole Rush adapters.
//!
//! The core never queries or mutates presentation state directly: backends
//! receive a [`Scene`] that is kept current by replaying world events into
//! it, and they report player intent back through [`FrameInput`]. Audio and
//! other ambiance sit behind the fire-and-forget [`AmbientFeedback`] trait.

use anyhow::Result as AnyResult;
use glam::Vec2;
use mole_rush_core::{Event, HoleId};
use std::{error::Error, fmt, time::Duration};

/// RGBA color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Creates a new color from floating point channels.
    #[must_use]
    pub const fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: 1.0,
        }
    }

    /// Returns a new color lightened towards white by the provided amount.
    #[must_use]
    pub fn lighten(self, amount: f32) -> Self {
        let amount = amount.clamp(0.0, 1.0);

        Self {
            red: lighten_channel(self.red, amount),
            green: lighten_channel(self.green, amount),
            blue: lighten_channel(self.blue, amount),
            alpha: self.alpha,
        }
    }
}

fn lighten_channel(channel: f32, amount: f32) -> f32 {
    channel + (1.0 - channel) * amount
}

/// Single hole drawn on the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HolePresentation {
    /// Identifier of the hole.
    pub hole: HoleId,
    /// Whether a mole is currently popped out of this hole.
    pub mole_visible: bool,
}

impl HolePresentation {
    /// Creates an empty hole descriptor.
    #[must_use]
    pub const fn empty(hole: HoleId) -> Self {
        Self {
            hole,
            mole_visible: false,
        }
    }
}

/// Scene description combining the board and the control-board displays.
///
/// The scene is the display sink of the game: the score readout, the timer
/// readout and its low-time marker are all plain fields that backends draw
/// each frame, kept current through [`Scene::apply_events`].
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    /// Holes laid out on the board in identifier order.
    pub holes: Vec<HolePresentation>,
    /// Current point total shown on the scoreboard.
    pub score: u32,
    /// Whole seconds left on the countdown display.
    pub remaining_secs: u32,
    /// Whether the countdown display shows the low-time marker.
    pub low_time: bool,
    /// Whether a session is currently running.
    pub running: bool,
}

impl Scene {
    /// Creates a scene for a board with the provided number of holes.
    #[must_use]
    pub fn new(hole_count: u32) -> Self {
        Self {
            holes: (0..hole_count)
                .map(|index| HolePresentation::empty(HoleId::new(index)))
                .collect(),
            score: 0,
            remaining_secs: 0,
            low_time: false,
            running: false,
        }
    }

    /// Replays one world event into the scene.
    pub fn apply_event(&mut self, event: &Event) {
        match event {
            Event::HolesConfigured { count } => {
                self.holes = (0..*count)
                    .map(|index| HolePresentation::empty(HoleId::new(index)))
                    .collect();
            }
            Event::SessionStarted { duration_secs } => {
                self.running = true;
                self.remaining_secs = *duration_secs;
                self.low_time = *duration_secs <= mole_rush_core::LOW_TIME_THRESHOLD;
            }
            Event::SessionStopped => {
                self.running = false;
            }
            Event::MoleShown { hole, .. } => self.set_mole(*hole, true),
            Event::MoleHidden { hole, .. } => self.set_mole(*hole, false),
            Event::CountdownTicked {
                remaining_secs,
                low_time,
            } => {
                self.remaining_secs = *remaining_secs;
                self.low_time = *low_time;
            }
            Event::ScoreChanged { score } => self.score = *score,
            Event::TimeAdvanced { .. } | Event::TimeExpired => {}
        }
    }

    /// Replays a batch of world events into the scene in order.
    pub fn apply_events(&mut self, events: &[Event]) {
        for event in events {
            self.apply_event(event);
        }
    }

    /// Hole carrying a visible mole, if any.
    #[must_use]
    pub fn visible_mole(&self) -> Option<HoleId> {
        self.holes
            .iter()
            .find(|hole| hole.mole_visible)
            .map(|hole| hole.hole)
    }

    fn set_mole(&mut self, hole: HoleId, visible: bool) {
        if let Some(presentation) = self
            .holes
            .iter_mut()
            .find(|presentation| presentation.hole == hole)
        {
            presentation.mole_visible = visible;
        }
    }
}

/// Geometric arrangement of holes used for drawing and cursor hit testing.
///
/// Holes sit on a near-square grid in identifier order, left to right and top
/// to bottom, expressed in world units with the origin at the top-left of the
/// board.
#[derive(Clone, Debug, PartialEq)]
pub struct HoleLayout {
    centers: Vec<Vec2>,
    radius: f32,
    columns: u32,
    rows: u32,
    spacing: f32,
}

impl HoleLayout {
    /// Arranges `hole_count` holes of the provided radius with the provided
    /// center-to-center spacing.
    ///
    /// Returns an error when the board is empty or the geometry would
    /// degenerate to zero-sized holes.
    pub fn grid(hole_count: u32, radius: f32, spacing: f32) -> Result<Self, LayoutError> {
        if hole_count == 0 {
            return Err(LayoutError::EmptyBoard);
        }
        if radius <= 0.0 || spacing < 2.0 * radius {
            return Err(LayoutError::DegenerateGeometry { radius, spacing });
        }

        let columns = (hole_count as f32).sqrt().ceil() as u32;
        let rows = hole_count.div_ceil(columns);
        let centers = (0..hole_count)
            .map(|index| {
                let column = index % columns;
                let row = index / columns;
                Vec2::new(
                    (column as f32 + 0.5) * spacing,
                    (row as f32 + 0.5) * spacing,
                )
            })
            .collect();

        Ok(Self {
            centers,
            radius,
            columns,
            rows,
            spacing,
        })
    }

    /// Radius of a single hole in world units.
    #[must_use]
    pub const fn radius(&self) -> f32 {
        self.radius
    }

    /// Number of holes arranged by the layout.
    #[must_use]
    pub fn hole_count(&self) -> u32 {
        self.centers.len() as u32
    }

    /// Grid dimensions as (columns, rows).
    #[must_use]
    pub const fn dimensions(&self) -> (u32, u32) {
        (self.columns, self.rows)
    }

    /// Total width of the board in world units.
    #[must_use]
    pub fn width(&self) -> f32 {
        self.columns as f32 * self.spacing
    }

    /// Total height of the board in world units.
    #[must_use]
    pub fn height(&self) -> f32 {
        self.rows as f32 * self.spacing
    }

    /// Center of the provided hole, if it exists on the board.
    #[must_use]
    pub fn center_of(&self, hole: HoleId) -> Option<Vec2> {
        self.centers.get(hole.get() as usize).copied()
    }

    /// Returns the hole under the provided cursor position, if any.
    #[must_use]
    pub fn hit_test(&self, cursor: Vec2) -> Option<HoleId> {
        self.centers
            .iter()
            .enumerate()
            .find(|(_, center)| center.distance(cursor) <= self.radius)
            .map(|(index, _)| HoleId::new(index as u32))
    }
}

/// Input snapshot gathered by adapters before updating the scene.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct FrameInput {
    /// Whether the player triggered the start control this frame.
    pub start_pressed: bool,
    /// Hole the player whacked this frame, if any.
    pub whacked: Option<HoleId>,
}

/// Presentation descriptor consumed by rendering backends.
#[derive(Clone, Debug, PartialEq)]
pub struct Presentation {
    /// Title used by the created window.
    pub window_title: String,
    /// Solid color used to clear each frame.
    pub clear_color: Color,
    /// Scene content that should be displayed.
    pub scene: Scene,
}

impl Presentation {
    /// Constructs a new presentation descriptor.
    #[must_use]
    pub fn new<T>(window_title: T, clear_color: Color, scene: Scene) -> Self
    where
        T: Into<String>,
    {
        Self {
            window_title: window_title.into(),
            clear_color,
            scene,
        }
    }
}

/// Rendering backend capable of presenting Mole Rush scenes.
pub trait RenderingBackend {
    /// Runs the rendering backend until it is requested to exit.
    ///
    /// The provided `update_scene` closure receives the simulated frame
    /// delta and per-frame input captured by the adapter, and may mutate the
    /// scene before it is rendered.
    fn run<F>(self, presentation: Presentation, update_scene: F) -> AnyResult<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) + 'static;
}

/// Ambient audio/visual feedback device. Purely cosmetic; callers treat both
/// operations as fire-and-forget.
pub trait AmbientFeedback {
    /// Begins the ambient feedback at session start.
    fn start(&mut self);
    /// Silences the ambient feedback at expiry or stop.
    fn stop(&mut self);
}

/// Errors that can occur when constructing board layouts.
#[derive(Debug, PartialEq)]
pub enum LayoutError {
    /// The board must contain at least one hole to be drawable.
    EmptyBoard,
    /// Radius and spacing would make holes overlap or vanish.
    DegenerateGeometry {
        /// Provided hole radius.
        radius: f32,
        /// Provided center-to-center spacing.
        spacing: f32,
    },
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyBoard => write!(f, "board layout requires at least one hole"),
            Self::DegenerateGeometry { radius, spacing } => {
                write!(
                    f,
                    "hole radius {radius} does not fit center spacing {spacing}"
                )
            }
        }
    }
}

impl Error for LayoutError {}
