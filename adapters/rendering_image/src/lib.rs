#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Raster rendering adapter backed by the `image` crate.
//!
//! [`RasterCanvas`] rasterises the drawing primitives into an RGBA buffer
//! without anti-aliasing, and [`GifAnimationEncoder`] writes the buffers as a
//! looping GIF. Labels use a built-in bitmap font so output does not depend on
//! fonts installed on the host.

mod glyphs;

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
    time::Duration,
};

use anyhow::{ensure, Context, Result};
use glam::Vec2;
use image::{
    codecs::gif::{GifEncoder, Repeat},
    Delay, Frame, ImageBuffer, Rgba, RgbaImage,
};
use log::info;
use ricochet_circuits_rendering::{
    check_sequence, AnimationEncoder, Bounds, Canvas, Color, FrameSize,
};

/// Quantisation effort passed to the GIF encoder; 1 is slowest and best.
const DEFAULT_GIF_SPEED: i32 = 10;

/// Canvas that draws into an in-memory RGBA image.
#[derive(Clone, Debug)]
pub struct RasterCanvas {
    image: RgbaImage,
}

impl RasterCanvas {
    /// Creates a transparent canvas of the provided size.
    #[must_use]
    pub fn new(size: FrameSize) -> Self {
        Self {
            image: ImageBuffer::new(size.width, size.height),
        }
    }

    /// Borrows the rendered pixels.
    #[must_use]
    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// Consumes the canvas, returning the rendered pixels.
    #[must_use]
    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    /// Visits every pixel whose centre lies inside the clipped `bounds`.
    fn for_each_pixel_in(&mut self, bounds: Bounds, mut shade: impl FnMut(Vec2) -> Option<Color>) {
        let Some((x_range, y_range)) = self.clip(bounds) else {
            return;
        };
        for y in y_range {
            for x in x_range.clone() {
                let center = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
                if let Some(color) = shade(center) {
                    self.image.put_pixel(x, y, Rgba(color.to_rgba_u8()));
                }
            }
        }
    }

    fn clip(&self, bounds: Bounds) -> Option<(std::ops::Range<u32>, std::ops::Range<u32>)> {
        let (width, height) = self.image.dimensions();
        let clamp = |value: f32, limit: u32| value.clamp(0.0, limit as f32) as u32;
        let x = clamp(bounds.min.x.floor(), width)..clamp(bounds.max.x.ceil(), width);
        let y = clamp(bounds.min.y.floor(), height)..clamp(bounds.max.y.ceil(), height);
        (!x.is_empty() && !y.is_empty()).then_some((x, y))
    }
}

impl Canvas for RasterCanvas {
    fn clear(&mut self, color: Color) {
        let pixel = Rgba(color.to_rgba_u8());
        for existing in self.image.pixels_mut() {
            *existing = pixel;
        }
    }

    fn draw_line(&mut self, from: Vec2, to: Vec2, color: Color, width: f32) {
        let half_width = width / 2.0;
        let direction = to - from;
        let length_squared = direction.length_squared();
        let reach = Vec2::splat(half_width);
        let bounds = Bounds::new(from.min(to) - reach, from.max(to) + reach);

        self.for_each_pixel_in(bounds, |point| {
            let along = if length_squared > 0.0 {
                (point - from).dot(direction) / length_squared
            } else {
                0.0
            };
            if !(0.0..=1.0).contains(&along) {
                return None;
            }
            let distance = point.distance(from + direction * along);
            (distance <= half_width).then_some(color)
        });
    }

    fn draw_ellipse(&mut self, bounds: Bounds, fill: Color, outline: Color, outline_width: f32) {
        let center = bounds.center();
        let radii = bounds.size() / 2.0;
        if radii.x <= 0.0 || radii.y <= 0.0 {
            return;
        }
        let inner_radii = (radii - Vec2::splat(outline_width)).max(Vec2::ZERO);

        self.for_each_pixel_in(bounds, |point| {
            let offset = point - center;
            if (offset / radii).length_squared() > 1.0 {
                return None;
            }
            let inside_outline = inner_radii.x > 0.0
                && inner_radii.y > 0.0
                && (offset / inner_radii).length_squared() <= 1.0;
            Some(if inside_outline { fill } else { outline })
        });
    }

    fn draw_text(&mut self, center: Vec2, text: &str, color: Color, size: f32) {
        let scale = (size * 0.7 / glyphs::ROWS as f32).floor().max(1.0);
        let advance = (glyphs::COLUMNS + 1) as f32 * scale;
        let count = text.chars().count() as f32;
        if count == 0.0 {
            return;
        }
        let text_size = Vec2::new(
            count * advance - scale,
            glyphs::ROWS as f32 * scale,
        );
        let origin = (center - text_size / 2.0).round();

        for (index, character) in text.chars().enumerate() {
            let Some(rows) = glyphs::glyph(character) else {
                continue;
            };
            let glyph_origin = origin + Vec2::new(index as f32 * advance, 0.0);
            let bounds = Bounds::new(
                glyph_origin,
                glyph_origin + Vec2::new(glyphs::COLUMNS as f32, glyphs::ROWS as f32) * scale,
            );
            self.for_each_pixel_in(bounds, |point| {
                let cell = ((point - glyph_origin) / scale).floor();
                glyphs::is_set(rows, cell.x as u32, cell.y as u32).then_some(color)
            });
        }
    }
}

/// Writes frames as a GIF that loops forever.
#[derive(Debug)]
pub struct GifAnimationEncoder<W: Write> {
    writer: W,
    speed: i32,
}

impl GifAnimationEncoder<BufWriter<File>> {
    /// Creates (or truncates) the GIF file at `path`.
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::create(path)
            .with_context(|| format!("failed to create animation at {}", path.display()))?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> GifAnimationEncoder<W> {
    /// Wraps an arbitrary writer.
    #[must_use]
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            speed: DEFAULT_GIF_SPEED,
        }
    }

    /// Overrides the quantisation speed (1 to 30).
    #[must_use]
    pub fn with_speed(mut self, speed: i32) -> Self {
        self.speed = speed.clamp(1, 30);
        self
    }
}

impl<W: Write> AnimationEncoder for GifAnimationEncoder<W> {
    type Frame = RgbaImage;

    fn encode(self, frames: Vec<RgbaImage>, durations: &[Duration]) -> Result<()> {
        check_sequence(&frames, durations)?;
        let dimensions = frames[0].dimensions();
        ensure!(
            frames.iter().all(|frame| frame.dimensions() == dimensions),
            "all frames must share the {}x{} size of the first frame",
            dimensions.0,
            dimensions.1
        );

        let frame_count = frames.len();
        let total: Duration = durations.iter().sum();
        let Self { mut writer, speed } = self;
        {
            let mut encoder = GifEncoder::new_with_speed(&mut writer, speed);
            encoder
                .set_repeat(Repeat::Infinite)
                .context("failed to mark animation as looping")?;
            encoder
                .encode_frames(frames.into_iter().zip(durations).map(|(image, duration)| {
                    Frame::from_parts(image, 0, 0, Delay::from_saturating_duration(*duration))
                }))
                .context("failed to encode animation frames")?;
        }
        writer.flush().context("failed to flush animation")?;

        info!(
            "encoded {frame_count} frames ({}x{}, {:.2}s)",
            dimensions.0,
            dimensions.1,
            total.as_secs_f32()
        );
        Ok(())
    }
}
