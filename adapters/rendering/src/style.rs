use std::{fs, path::Path};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::{Color, StyleError};

/// Pixel metrics and palette used by [`crate::render_frame`].
///
/// Every field is optional in TOML; omitted keys keep their default.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderStyle {
    /// Edge length of one cell in pixels.
    pub cell_size: u32,
    /// Robot diameter as a fraction of the cell size.
    pub robot_scale: f32,
    /// Width of the grid lines.
    pub grid_line_width: f32,
    /// Half the wall thickness; walls also overhang their segment by this much.
    pub wall_border: f32,
    /// Width of the robot outline.
    pub robot_outline_width: f32,
    /// Canvas fill.
    pub background: Color,
    /// Grid line color.
    pub grid: Color,
    /// Wall color.
    pub wall: Color,
    /// Robot body color.
    pub robot_fill: Color,
    /// Robot outline color.
    pub robot_outline: Color,
    /// Robot label color.
    pub label: Color,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            cell_size: 70,
            robot_scale: 0.8,
            grid_line_width: 2.0,
            wall_border: 5.0,
            robot_outline_width: 1.0,
            background: Color::from_rgb_u8(0xF5, 0xF5, 0xDB),
            grid: Color::from_rgb_u8(0x80, 0x80, 0x80),
            wall: Color::from_rgb_u8(0x38, 0x38, 0x2D),
            robot_fill: Color::from_rgb_u8(0xFF, 0xFF, 0xFF),
            robot_outline: Color::from_rgb_u8(0x00, 0x00, 0x00),
            label: Color::from_rgb_u8(0x00, 0x00, 0x00),
        }
    }
}

impl RenderStyle {
    /// Parses a style from TOML text and validates its metrics.
    pub fn from_toml_str(contents: &str) -> Result<Self, StyleError> {
        let style: Self = toml::from_str(contents)?;
        style.validate()?;
        Ok(style)
    }

    /// Loads a style from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read render style at {}", path.display()))?;
        Self::from_toml_str(&contents)
            .with_context(|| format!("invalid render style in {}", path.display()))
    }

    /// Cell edge length as a float.
    #[must_use]
    pub fn cell_length(&self) -> f32 {
        self.cell_size as f32
    }

    /// Robot diameter in pixels.
    #[must_use]
    pub fn robot_diameter(&self) -> f32 {
        self.cell_length() * self.robot_scale
    }

    /// Label glyph height: half a cell, rounded down to an even pixel count.
    #[must_use]
    pub fn label_size(&self) -> f32 {
        ((self.cell_size / 2) & !1) as f32
    }

    fn validate(&self) -> Result<(), StyleError> {
        if self.cell_size == 0 {
            return Err(StyleError::ZeroCellSize);
        }
        if !(self.robot_scale > 0.0 && self.robot_scale <= 1.0) {
            return Err(StyleError::RobotScaleOutOfRange {
                robot_scale: self.robot_scale,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_yields_defaults() {
        let style = RenderStyle::from_toml_str("").expect("empty style parses");
        assert_eq!(style, RenderStyle::default());
    }

    #[test]
    fn overrides_keep_remaining_defaults() {
        let style = RenderStyle::from_toml_str(
            r##"
                cell_size = 32
                wall = "#FF0000"
            "##,
        )
        .expect("style parses");

        assert_eq!(style.cell_size, 32);
        assert_eq!(style.wall, Color::from_rgb_u8(0xFF, 0, 0));
        assert_eq!(style.grid, RenderStyle::default().grid);
        assert_eq!(style.label_size(), 16.0);
    }

    #[test]
    fn default_label_size_is_even_half_cell() {
        assert_eq!(RenderStyle::default().label_size(), 34.0);
        assert!((RenderStyle::default().robot_diameter() - 56.0).abs() < 1e-4);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let error = RenderStyle::from_toml_str("cell_sise = 10").expect_err("typo rejected");
        assert!(matches!(error, StyleError::Parse(_)));
    }

    #[test]
    fn invalid_colors_are_rejected() {
        let error = RenderStyle::from_toml_str(r#"wall = "red""#).expect_err("bad color");
        assert!(matches!(error, StyleError::Parse(_)));
        assert!(error.to_string().contains("#RRGGBB"));
    }

    #[test]
    fn degenerate_metrics_are_rejected() {
        assert!(matches!(
            RenderStyle::from_toml_str("cell_size = 0"),
            Err(StyleError::ZeroCellSize)
        ));
        assert!(matches!(
            RenderStyle::from_toml_str("robot_scale = 1.5"),
            Err(StyleError::RobotScaleOutOfRange { .. })
        ));
    }
}
