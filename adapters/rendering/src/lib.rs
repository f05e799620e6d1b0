#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for Ricochet Circuits adapters.
//!
//! Backends implement [`Canvas`] to receive drawing primitives and
//! [`AnimationEncoder`] to turn rendered frames into an animation. The
//! [`render_frame`] function is the only place that knows how a board
//! snapshot maps onto pixels.

mod frame;
mod style;

pub use frame::{render_frame, render_storyboard, Bounds, FrameSize};
pub use style::RenderStyle;

use anyhow::Result as AnyResult;
use glam::Vec2;
use ricochet_circuits_system_animation::Storyboard;
use std::{fmt, str::FromStr, time::Duration};
use thiserror::Error;

/// RGBA color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq, serde::Deserialize)]
#[serde(try_from = "String")]
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

    /// Converts the color to byte RGBA channels.
    #[must_use]
    pub fn to_rgba_u8(self) -> [u8; 4] {
        [self.red, self.green, self.blue, self.alpha].map(channel_to_u8)
    }
}

fn channel_to_u8(channel: f32) -> u8 {
    (channel.clamp(0.0, 1.0) * 255.0).round() as u8
}

impl FromStr for Color {
    type Err = StyleError;

    /// Parses `#RRGGBB` notation.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let invalid = || StyleError::InvalidColor {
            value: value.to_owned(),
        };
        let digits = value.strip_prefix('#').ok_or_else(invalid)?;
        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16).map_err(|_| invalid())
        };
        Ok(Self::from_rgb_u8(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }
}

impl TryFrom<String> for Color {
    type Error = StyleError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [red, green, blue, _] = self.to_rgba_u8();
        write!(f, "#{red:02X}{green:02X}{blue:02X}")
    }
}

/// Drawing capability a backend provides to [`render_frame`].
///
/// Coordinates are pixels with the origin in the top-left corner.
pub trait Canvas {
    /// Fills the whole canvas.
    fn clear(&mut self, color: Color);

    /// Strokes a straight segment with butt ends.
    fn draw_line(&mut self, from: Vec2, to: Vec2, color: Color, width: f32);

    /// Fills the ellipse inscribed in `bounds` and strokes its outline.
    fn draw_ellipse(&mut self, bounds: Bounds, fill: Color, outline: Color, outline_width: f32);

    /// Draws `text` centred on `center` with the provided glyph height.
    fn draw_text(&mut self, center: Vec2, text: &str, color: Color, size: f32);
}

/// Encoder that turns a sequence of rendered frames into an animation.
pub trait AnimationEncoder {
    /// Rendered frame type accepted by the encoder.
    type Frame;

    /// Encodes `frames`, showing each for the duration at the same index.
    ///
    /// Implementations reject empty input and mismatched lengths with
    /// [`EncodeError`].
    fn encode(self, frames: Vec<Self::Frame>, durations: &[Duration]) -> AnyResult<()>;
}

/// Backend that plays a storyboard interactively until the viewer exits.
pub trait PreviewBackend {
    /// Presents every frame of `storyboard` for the duration at the same
    /// index, looping until the window is closed.
    fn play(
        self,
        storyboard: Storyboard,
        style: RenderStyle,
        durations: Vec<Duration>,
    ) -> AnyResult<()>;
}

/// Validates the frame and duration sequences handed to an encoder.
pub fn check_sequence<T>(frames: &[T], durations: &[Duration]) -> Result<(), EncodeError> {
    if frames.is_empty() {
        return Err(EncodeError::NoFrames);
    }
    if frames.len() != durations.len() {
        return Err(EncodeError::DurationMismatch {
            frames: frames.len(),
            durations: durations.len(),
        });
    }
    Ok(())
}

/// Errors raised while loading a render style.
#[derive(Debug, Error)]
pub enum StyleError {
    /// The style file is not valid TOML or contains unknown keys.
    #[error("failed to parse render style: {0}")]
    Parse(#[from] toml::de::Error),
    /// A color was not written as `#RRGGBB`.
    #[error("invalid color `{value}`, expected #RRGGBB")]
    InvalidColor {
        /// Offending text.
        value: String,
    },
    /// Cells must be at least one pixel wide.
    #[error("cell_size must be positive")]
    ZeroCellSize,
    /// Robots must fit inside their cell.
    #[error("robot_scale must lie in (0, 1], received {robot_scale}")]
    RobotScaleOutOfRange {
        /// Offending scale.
        robot_scale: f32,
    },
}

/// Errors raised when an encoder receives an unusable frame sequence.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum EncodeError {
    /// An animation needs at least one frame.
    #[error("cannot encode an animation without frames")]
    NoFrames,
    /// Every frame needs exactly one duration.
    #[error("received {frames} frames but {durations} durations")]
    DurationMismatch {
        /// Number of frames provided.
        frames: usize,
        /// Number of durations provided.
        durations: usize,
    },
}
