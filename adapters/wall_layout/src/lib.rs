#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Decoder for the textual wall diagrams used to author circuit boards.
//!
//! A diagram is a rectangular block of `2 * width + 1` columns and
//! `height + 1` rows. Even columns mark vertical walls (`'|'`) or empty
//! boundaries (`'.'`); odd columns mark horizontal walls (`'_'`) or empty
//! boundaries (`' '`). The header row only carries horizontal walls along the
//! top edge, so vertical markers in it land on row `-1` and stay inert.

use log::debug;
use ricochet_circuits_core::CellCoord;
use thiserror::Error;

const VERTICAL_WALL: char = '|';
const VERTICAL_OPEN: char = '.';
const HORIZONTAL_WALL: char = '_';
const HORIZONTAL_OPEN: char = ' ';

/// Wall coordinates decoded from a diagram, plus the implied board size.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WallLayout {
    columns: u32,
    rows: u32,
    horizontal: Vec<CellCoord>,
    vertical: Vec<CellCoord>,
}

impl WallLayout {
    /// Number of cell columns implied by the diagram width.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of cell rows implied by the diagram height.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Horizontal walls in diagram reading order.
    #[must_use]
    pub fn horizontal_walls(&self) -> &[CellCoord] {
        &self.horizontal
    }

    /// Vertical walls in diagram reading order.
    #[must_use]
    pub fn vertical_walls(&self) -> &[CellCoord] {
        &self.vertical
    }
}

/// Errors raised while decoding a wall diagram.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum LayoutError {
    /// The diagram contained no rows.
    #[error("wall diagram is empty")]
    Empty,
    /// The header row has an even number of columns.
    #[error("wall diagram rows must have odd width, header has {width}")]
    EvenWidth {
        /// Width of the header row.
        width: usize,
    },
    /// A row does not match the header width.
    #[error("wall diagram row {row} has width {found}, expected {expected}")]
    RaggedRow {
        /// Zero-based row index within the diagram.
        row: usize,
        /// Width of the header row.
        expected: usize,
        /// Width of the offending row.
        found: usize,
    },
    /// A marker outside the alphabet allowed for its column parity.
    #[error("unexpected {character:?} at row {row}, column {column} of wall diagram")]
    UnexpectedCharacter {
        /// Zero-based row index within the diagram.
        row: usize,
        /// Zero-based column index within the row.
        column: usize,
        /// Offending character.
        character: char,
    },
}

/// Decodes a wall diagram into horizontal and vertical wall sets.
///
/// Common leading indentation is removed first, and blank lines before the
/// header or after the last row are ignored, so diagrams can be written as
/// indented string literals.
pub fn decode(text: &str) -> Result<WallLayout, LayoutError> {
    let lines = dedent(text);
    let header = lines.first().ok_or(LayoutError::Empty)?;
    let width = header.chars().count();
    if width % 2 == 0 {
        return Err(LayoutError::EvenWidth { width });
    }

    let mut layout = WallLayout {
        columns: u32::try_from((width - 1) / 2).unwrap_or(u32::MAX),
        rows: u32::try_from(lines.len() - 1).unwrap_or(u32::MAX),
        horizontal: Vec::new(),
        vertical: Vec::new(),
    };

    for (row, line) in lines.iter().enumerate() {
        let found = line.chars().count();
        if found != width {
            return Err(LayoutError::RaggedRow {
                row,
                expected: width,
                found,
            });
        }

        let row_index = to_coord(row);
        for (column, character) in line.chars().enumerate() {
            let unexpected = LayoutError::UnexpectedCharacter {
                row,
                column,
                character,
            };
            if column % 2 == 0 {
                match character {
                    VERTICAL_WALL => layout
                        .vertical
                        .push(CellCoord::new(to_coord(column / 2), row_index - 1)),
                    VERTICAL_OPEN => {}
                    _ => return Err(unexpected),
                }
            } else {
                match character {
                    HORIZONTAL_WALL => layout
                        .horizontal
                        .push(CellCoord::new(to_coord((column - 1) / 2), row_index)),
                    HORIZONTAL_OPEN => {}
                    _ => return Err(unexpected),
                }
            }
        }
    }

    debug!(
        "decoded {}x{} wall diagram: {} horizontal, {} vertical walls",
        layout.columns,
        layout.rows,
        layout.horizontal.len(),
        layout.vertical.len()
    );
    Ok(layout)
}

fn to_coord(index: usize) -> i32 {
    i32::try_from(index).unwrap_or(i32::MAX)
}

fn dedent(text: &str) -> Vec<&str> {
    let mut lines: Vec<&str> = text.lines().collect();
    while lines.last().is_some_and(|line| line.trim().is_empty()) {
        let _ = lines.pop();
    }
    let leading_blank = lines
        .iter()
        .take_while(|line| line.trim().is_empty())
        .count();
    let lines = &lines[leading_blank..];

    let indent = lines
        .iter()
        .filter(|line| !line.trim().is_empty())
        .map(|line| line.len() - line.trim_start().len())
        .min()
        .unwrap_or(0);

    lines
        .iter()
        .map(|line| line.get(indent..).unwrap_or(""))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dedent_strips_common_indentation_and_outer_blank_lines() {
        let lines = dedent("\n    . .\n      .\n\n");
        assert_eq!(lines, vec![". .", "  ."]);
    }

    #[test]
    fn header_row_vertical_markers_land_above_the_board() {
        let layout = decode("|_.\n. .").expect("valid diagram");
        assert_eq!(layout.vertical_walls(), &[CellCoord::new(0, -1)]);
        assert_eq!(layout.horizontal_walls(), &[CellCoord::new(0, 0)]);
    }

    #[test]
    fn implied_dimensions_follow_diagram_size() {
        let layout = decode(". . .\n. . .\n. . .").expect("valid diagram");
        assert_eq!(layout.columns(), 2);
        assert_eq!(layout.rows(), 2);
        assert!(layout.horizontal_walls().is_empty());
        assert!(layout.vertical_walls().is_empty());
    }
}
