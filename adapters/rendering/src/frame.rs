use glam::Vec2;
use log::debug;
use ricochet_circuits_system_animation::{FrameSnapshot, Scenery, Storyboard};

use crate::{Canvas, RenderStyle};

/// Axis-aligned rectangle in canvas pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    /// Top-left corner.
    pub min: Vec2,
    /// Bottom-right corner.
    pub max: Vec2,
}

impl Bounds {
    /// Creates bounds from two opposite corners.
    #[must_use]
    pub const fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Centre point.
    #[must_use]
    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    /// Width and height.
    #[must_use]
    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }
}

/// Pixel dimensions of a rendered frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FrameSize {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl FrameSize {
    /// Size of a frame showing `scenery` with `style`.
    ///
    /// Two extra pixels keep the right and bottom grid lines visible.
    #[must_use]
    pub fn of(scenery: &Scenery, style: &RenderStyle) -> Self {
        Self {
            width: scenery.columns().saturating_mul(style.cell_size).saturating_add(2),
            height: scenery.rows().saturating_mul(style.cell_size).saturating_add(2),
        }
    }
}

/// Draws one snapshot onto `canvas`.
///
/// Grid lines come first, then vertical and horizontal walls, then every
/// robot with its label on top.
pub fn render_frame<C: Canvas + ?Sized>(
    canvas: &mut C,
    scenery: &Scenery,
    frame: &FrameSnapshot,
    style: &RenderStyle,
) {
    let size = FrameSize::of(scenery, style);
    let (width, height) = (size.width as f32, size.height as f32);
    let cell = style.cell_length();

    canvas.clear(style.background);

    for column in 0..=scenery.columns() {
        let x = column as f32 * cell;
        canvas.draw_line(
            Vec2::new(x, 0.0),
            Vec2::new(x, height),
            style.grid,
            style.grid_line_width,
        );
    }
    for row in 0..=scenery.rows() {
        let y = row as f32 * cell;
        canvas.draw_line(
            Vec2::new(0.0, y),
            Vec2::new(width, y),
            style.grid,
            style.grid_line_width,
        );
    }

    let border = style.wall_border;
    let thickness = border * 2.0;
    for wall in scenery.vertical_walls() {
        let x = wall.x() as f32 * cell;
        let y = wall.y() as f32 * cell;
        canvas.draw_line(
            Vec2::new(x, y - border + 1.0),
            Vec2::new(x, y + cell + border),
            style.wall,
            thickness,
        );
    }
    for wall in scenery.horizontal_walls() {
        let x = wall.x() as f32 * cell;
        let y = wall.y() as f32 * cell;
        canvas.draw_line(
            Vec2::new(x - border + 1.0, y),
            Vec2::new(x + cell + border, y),
            style.wall,
            thickness,
        );
    }

    let padding = (cell - style.robot_diameter()) / 2.0;
    for snapshot in frame.iter() {
        let (x, y) = snapshot.pose.render_position();
        let origin = Vec2::new(x, y) * cell;
        let bounds = Bounds::new(
            origin + Vec2::splat(padding),
            origin + Vec2::splat(cell - padding),
        );
        canvas.draw_ellipse(
            bounds,
            style.robot_fill,
            style.robot_outline,
            style.robot_outline_width,
        );

        if let Some(label) = scenery.label(snapshot.robot) {
            canvas.draw_text(
                origin + Vec2::splat(cell * 0.5 + 1.0),
                label,
                style.label,
                style.label_size(),
            );
        }
    }
}

/// Renders every snapshot of `storyboard` onto a fresh canvas.
///
/// `new_canvas` receives the frame size and must return a canvas of that size.
pub fn render_storyboard<C, F>(
    storyboard: &Storyboard,
    style: &RenderStyle,
    mut new_canvas: F,
) -> Vec<C>
where
    C: Canvas,
    F: FnMut(FrameSize) -> C,
{
    let size = FrameSize::of(storyboard.scenery(), style);
    let canvases: Vec<C> = storyboard
        .frames()
        .iter()
        .map(|frame| {
            let mut canvas = new_canvas(size);
            render_frame(&mut canvas, storyboard.scenery(), frame, style);
            canvas
        })
        .collect();
    debug!(
        "rendered {} frames at {}x{}",
        canvases.len(),
        size.width,
        size.height
    );
    canvases
}
