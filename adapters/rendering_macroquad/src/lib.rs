#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Macroquad-backed preview adapter for Ricochet Circuits.
//!
//! Macroquad's optional audio stack depends on native ALSA development
//! libraries, which are unavailable in the containerised CI environment.
//! To keep `cargo test` usable everywhere we depend on macroquad without its
//! default `audio` feature.
//!
//! The window plays the storyboard on a loop, scaled to fit the window while
//! keeping its aspect ratio. `Space` pauses, `R` restarts, `Escape` or `Q`
//! closes the window.

use anyhow::Result;
use glam::Vec2;
use log::info;
use macroquad::input::{is_key_pressed, KeyCode};
use ricochet_circuits_rendering::{
    check_sequence, render_frame, Bounds, Canvas, Color, FrameSize, PreviewBackend, RenderStyle,
};
use ricochet_circuits_system_animation::Storyboard;
use std::time::Duration;

const MAX_WINDOW_EDGE: u32 = 1200;

/// Tracks which storyboard frame is on screen as wall-clock time passes.
#[doc(hidden)]
#[derive(Clone, Debug)]
pub struct Playhead {
    durations: Vec<Duration>,
    index: usize,
    elapsed: Duration,
}

impl Playhead {
    /// Starts at the first frame.
    #[must_use]
    pub fn new(durations: Vec<Duration>) -> Self {
        Self {
            durations,
            index: 0,
            elapsed: Duration::ZERO,
        }
    }

    /// Index of the frame on screen.
    #[must_use]
    pub const fn current(&self) -> usize {
        self.index
    }

    /// Advances by `delta`, wrapping after the last frame, and returns the
    /// frame now on screen.
    ///
    /// At most one full loop is skipped per call so a long stall cannot spin.
    pub fn advance(&mut self, delta: Duration) -> usize {
        self.elapsed = self.elapsed.saturating_add(delta);
        for _ in 0..self.durations.len() {
            let Some(&shown_for) = self.durations.get(self.index) else {
                break;
            };
            if self.elapsed < shown_for {
                break;
            }
            self.elapsed -= shown_for;
            self.index = (self.index + 1) % self.durations.len();
        }
        self.index
    }

    /// Returns to the first frame.
    pub fn restart(&mut self) {
        self.index = 0;
        self.elapsed = Duration::ZERO;
    }
}

/// Uniform scale and offset that fit a frame inside the window.
#[doc(hidden)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScreenFit {
    /// Screen position of the frame's top-left corner.
    pub origin: Vec2,
    /// Screen pixels per frame pixel.
    pub scale: f32,
}

impl ScreenFit {
    /// Centres `frame` in a `screen` sized window.
    #[must_use]
    pub fn new(frame: FrameSize, screen: Vec2) -> Self {
        let frame = Vec2::new(frame.width.max(1) as f32, frame.height.max(1) as f32);
        let scale = (screen.x / frame.x).min(screen.y / frame.y).max(0.0);
        Self {
            origin: (screen - frame * scale) / 2.0,
            scale,
        }
    }

    fn project(&self, point: Vec2) -> Vec2 {
        self.origin + point * self.scale
    }
}

/// Canvas that draws straight to the macroquad window.
struct ScreenCanvas {
    fit: ScreenFit,
}

impl Canvas for ScreenCanvas {
    fn clear(&mut self, color: Color) {
        macroquad::window::clear_background(to_macroquad_color(color));
    }

    fn draw_line(&mut self, from: Vec2, to: Vec2, color: Color, width: f32) {
        let from = self.fit.project(from);
        let to = self.fit.project(to);
        macroquad::shapes::draw_line(
            from.x,
            from.y,
            to.x,
            to.y,
            width * self.fit.scale,
            to_macroquad_color(color),
        );
    }

    fn draw_ellipse(&mut self, bounds: Bounds, fill: Color, outline: Color, outline_width: f32) {
        let center = self.fit.project(bounds.center());
        let radius = bounds.size().min_element() / 2.0 * self.fit.scale;
        macroquad::shapes::draw_circle(center.x, center.y, radius, to_macroquad_color(fill));
        macroquad::shapes::draw_circle_lines(
            center.x,
            center.y,
            radius,
            outline_width * self.fit.scale,
            to_macroquad_color(outline),
        );
    }

    fn draw_text(&mut self, center: Vec2, text: &str, color: Color, size: f32) {
        let center = self.fit.project(center);
        let font_size = (size * self.fit.scale).round().clamp(1.0, f32::from(u16::MAX)) as u16;
        let dimensions = macroquad::text::measure_text(text, None, font_size, 1.0);
        let _ = macroquad::text::draw_text(
            text,
            center.x - dimensions.width / 2.0,
            center.y - dimensions.height / 2.0 + dimensions.offset_y,
            f32::from(font_size),
            to_macroquad_color(color),
        );
    }
}

/// Snapshot of edge-triggered keyboard shortcuts observed during a single frame.
#[derive(Clone, Copy, Debug, Default)]
struct KeyboardShortcuts {
    /// `Q` or `Escape` closes the preview.
    quit_requested: bool,
    /// `Space` freezes or resumes playback.
    toggle_pause: bool,
    /// `R` jumps back to the first frame.
    restart: bool,
}

impl KeyboardShortcuts {
    fn poll() -> Self {
        Self {
            quit_requested: is_key_pressed(KeyCode::Escape) || is_key_pressed(KeyCode::Q),
            toggle_pause: is_key_pressed(KeyCode::Space),
            restart: is_key_pressed(KeyCode::R),
        }
    }
}

/// Preview backend implemented on top of macroquad.
#[derive(Clone, Debug, Default)]
pub struct MacroquadBackend {
    swap_interval: Option<i32>,
    window_title: Option<String>,
}

impl MacroquadBackend {
    /// Returns a backend that requests the platform's default swap interval.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables or disables vertical sync.
    #[must_use]
    pub fn with_vsync(mut self, enabled: bool) -> Self {
        self.swap_interval = Some(i32::from(enabled));
        self
    }

    /// Overrides the window title.
    #[must_use]
    pub fn with_window_title(mut self, title: impl Into<String>) -> Self {
        self.window_title = Some(title.into());
        self
    }
}

impl PreviewBackend for MacroquadBackend {
    fn play(
        self,
        storyboard: Storyboard,
        style: RenderStyle,
        durations: Vec<Duration>,
    ) -> Result<()> {
        check_sequence(storyboard.frames(), &durations)?;

        let frame_size = FrameSize::of(storyboard.scenery(), &style);
        let longest_edge = frame_size.width.max(frame_size.height).max(1);
        let shrink = (MAX_WINDOW_EDGE as f32 / longest_edge as f32).min(1.0);

        let mut config = macroquad::window::Conf {
            window_title: self
                .window_title
                .unwrap_or_else(|| "Ricochet Circuits".to_owned()),
            window_width: (frame_size.width as f32 * shrink).round() as i32,
            window_height: (frame_size.height as f32 * shrink).round() as i32,
            window_resizable: true,
            ..macroquad::window::Conf::default()
        };
        if let Some(swap_interval) = self.swap_interval {
            config.platform.swap_interval = Some(swap_interval);
        }

        info!("previewing {} frames", storyboard.len());
        macroquad::Window::from_config(config, async move {
            let mut playhead = Playhead::new(durations);
            let mut paused = false;

            loop {
                let keyboard = KeyboardShortcuts::poll();
                if keyboard.quit_requested {
                    break;
                }
                if keyboard.toggle_pause {
                    paused = !paused;
                }
                if keyboard.restart {
                    playhead.restart();
                }

                let delta =
                    Duration::from_secs_f32(macroquad::time::get_frame_time().max(0.0));
                let index = if paused {
                    playhead.current()
                } else {
                    playhead.advance(delta)
                };

                let screen = Vec2::new(
                    macroquad::window::screen_width(),
                    macroquad::window::screen_height(),
                );
                let mut canvas = ScreenCanvas {
                    fit: ScreenFit::new(frame_size, screen),
                };
                if let Some(frame) = storyboard.frames().get(index) {
                    render_frame(&mut canvas, storyboard.scenery(), frame, &style);
                }

                macroquad::window::next_frame().await;
            }
        });

        Ok(())
    }
}

fn to_macroquad_color(color: Color) -> macroquad::color::Color {
    macroquad::color::Color::new(color.red, color.green, color.blue, color.alpha)
}
