#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Macroquad-backed rendering adapter for Mole Rush.
//!
//! Macroquad's optional audio stack depends on native ALSA development
//! libraries, which are unavailable in the containerised CI environment.
//! To keep `cargo test` usable everywhere we depend on macroquad without its
//! default `audio` feature; ambiance goes through the core's
//! `AmbientFeedback` collaborator instead.

use anyhow::{Context, Result};
use glam::Vec2;
use macroquad::{
    color::Color as MacroquadColor,
    input::{is_key_pressed, is_mouse_button_pressed, mouse_position, KeyCode, MouseButton},
    shapes::{draw_circle, draw_circle_lines},
    text::draw_text,
};
use mole_rush_rendering::{
    Color, FrameInput, HoleLayout, Presentation, RenderingBackend, Scene,
};
use std::time::Duration;

const HOLE_RADIUS: f32 = 42.0;
const HOLE_SPACING: f32 = 120.0;
const BOARD_MARGIN: f32 = 30.0;
const HUD_HEIGHT: f32 = 70.0;
const HUD_FONT_SIZE: f32 = 32.0;

const HOLE_COLOR: Color = Color::from_rgb_u8(0x3b, 0x2a, 0x1d);
const MOLE_COLOR: Color = Color::from_rgb_u8(0x8f, 0x5a, 0x2b);
const SCORE_COLOR: Color = Color::from_rgb_u8(0xe8, 0xe8, 0xe8);
const TIMER_COLOR: Color = Color::from_rgb_u8(0xe8, 0xe8, 0xe8);
const TIMER_LOW_COLOR: Color = Color::from_rgb_u8(0xd6, 0x2f, 0x2f);

/// Snapshot of edge-triggered inputs observed during a single frame.
#[derive(Clone, Copy, Debug, Default)]
struct FrameControls {
    /// `Q` or `Escape` to quit the game loop.
    quit_requested: bool,
    /// `Space` or `Enter` triggers the start control.
    start_pressed: bool,
    /// Left click position, if the button went down this frame.
    click: Option<Vec2>,
}

impl FrameControls {
    fn poll() -> Self {
        let quit_requested = is_key_pressed(KeyCode::Escape) || is_key_pressed(KeyCode::Q);
        let start_pressed = is_key_pressed(KeyCode::Space) || is_key_pressed(KeyCode::Enter);
        let click = if is_mouse_button_pressed(MouseButton::Left) {
            let (x, y) = mouse_position();
            Some(Vec2::new(x, y))
        } else {
            None
        };

        Self {
            quit_requested,
            start_pressed,
            click,
        }
    }
}

/// Rendering backend implemented on top of macroquad.
#[derive(Debug, Default)]
pub struct MacroquadBackend {
    swap_interval: Option<i32>,
}

impl MacroquadBackend {
    /// Returns a backend that requests the platform's default swap interval.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the backend to request a specific swap interval from the platform.
    #[must_use]
    pub fn with_swap_interval(mut self, swap_interval: Option<i32>) -> Self {
        self.swap_interval = swap_interval;
        self
    }

    /// Configures the backend to either synchronise presentation with the
    /// display refresh rate or render as fast as possible.
    #[must_use]
    pub fn with_vsync(self, enabled: bool) -> Self {
        let swap_interval = if enabled { Some(1) } else { Some(0) };
        self.with_swap_interval(swap_interval)
    }
}

impl RenderingBackend for MacroquadBackend {
    fn run<F>(self, presentation: Presentation, mut update_scene: F) -> Result<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) + 'static,
    {
        let Self { swap_interval } = self;
        let Presentation {
            window_title,
            clear_color,
            scene,
        } = presentation;

        let layout = board_layout(scene.holes.len() as u32)
            .context("failed to lay out the mole board")?;

        let mut config = macroquad::window::Conf {
            window_title,
            window_width: (layout.width() + 2.0 * BOARD_MARGIN) as i32,
            window_height: (layout.height() + HUD_HEIGHT + 2.0 * BOARD_MARGIN) as i32,
            ..macroquad::window::Conf::default()
        };
        if let Some(swap_interval) = swap_interval {
            config.platform.swap_interval = Some(swap_interval);
        }

        macroquad::Window::from_config(config, async move {
            let mut scene = scene;
            let mut layout = layout;
            let background = to_macroquad_color(clear_color);

            loop {
                let controls = FrameControls::poll();
                if controls.quit_requested {
                    break;
                }

                macroquad::window::clear_background(background);

                let dt_seconds = macroquad::time::get_frame_time();
                let frame_dt = Duration::from_secs_f32(dt_seconds.max(0.0));
                let frame_input = gather_frame_input(&layout, controls);

                update_scene(frame_dt, frame_input, &mut scene);

                if scene.holes.len() as u32 != layout.hole_count() {
                    if let Ok(rebuilt) = board_layout(scene.holes.len() as u32) {
                        layout = rebuilt;
                    }
                }

                draw_board(&scene, &layout);
                draw_hud(&scene, &layout);

                macroquad::window::next_frame().await;
            }
        });

        Ok(())
    }
}

fn board_layout(hole_count: u32) -> Result<HoleLayout, mole_rush_rendering::LayoutError> {
    HoleLayout::grid(hole_count, HOLE_RADIUS, HOLE_SPACING)
}

fn gather_frame_input(layout: &HoleLayout, controls: FrameControls) -> FrameInput {
    let whacked = controls
        .click
        .and_then(|click| layout.hit_test(click - Vec2::splat(BOARD_MARGIN)));

    FrameInput {
        start_pressed: controls.start_pressed,
        whacked,
    }
}

fn draw_board(scene: &Scene, layout: &HoleLayout) {
    for presentation in &scene.holes {
        let center = match layout.center_of(presentation.hole) {
            Some(center) => center + Vec2::splat(BOARD_MARGIN),
            None => continue,
        };

        draw_circle(
            center.x,
            center.y,
            layout.radius(),
            to_macroquad_color(HOLE_COLOR),
        );
        if presentation.mole_visible {
            draw_circle(
                center.x,
                center.y,
                layout.radius() * 0.75,
                to_macroquad_color(MOLE_COLOR),
            );
            draw_circle_lines(
                center.x,
                center.y,
                layout.radius(),
                3.0,
                to_macroquad_color(HOLE_COLOR.lighten(0.4)),
            );
        }
    }
}

fn draw_hud(scene: &Scene, layout: &HoleLayout) {
    let hud_top = layout.height() + 2.0 * BOARD_MARGIN;

    draw_text(
        &format!("Score: {}", scene.score),
        BOARD_MARGIN,
        hud_top + HUD_FONT_SIZE,
        HUD_FONT_SIZE,
        to_macroquad_color(SCORE_COLOR),
    );

    let timer_color = if scene.low_time {
        TIMER_LOW_COLOR
    } else {
        TIMER_COLOR
    };
    draw_text(
        &format!("Time: {}", scene.remaining_secs),
        layout.width() - 3.0 * HUD_FONT_SIZE,
        hud_top + HUD_FONT_SIZE,
        HUD_FONT_SIZE,
        to_macroquad_color(timer_color),
    );

    if !scene.running {
        draw_text(
            "Press SPACE to start",
            BOARD_MARGIN,
            hud_top + 2.0 * HUD_FONT_SIZE,
            HUD_FONT_SIZE * 0.75,
            to_macroquad_color(SCORE_COLOR),
        );
    }
}

fn to_macroquad_color(color: Color) -> MacroquadColor {
    MacroquadColor::new(color.red, color.green, color.blue, color.alpha)
}
