//! Wall sets and bounds-checking primitives.

use std::collections::BTreeSet;

use ricochet_circuits_core::{CellCoord, Direction, Offset};

/// Unordered set of wall coordinates with deterministic iteration order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct WallSet {
    cells: BTreeSet<CellCoord>,
}

impl WallSet {
    /// Creates an empty wall set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a wall, returning `false` when it was already present.
    pub fn insert(&mut self, cell: CellCoord) -> bool {
        self.cells.insert(cell)
    }

    /// Reports whether the set contains a wall at the provided coordinate.
    #[must_use]
    pub fn contains(&self, cell: CellCoord) -> bool {
        self.cells.contains(&cell)
    }

    /// Iterator over the walls in coordinate order.
    pub fn iter(&self) -> impl Iterator<Item = CellCoord> + '_ {
        self.cells.iter().copied()
    }

    /// Number of distinct walls in the set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Reports whether the set holds no walls.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Unions every wall of `other`, shifted by `offset`, into this set.
    pub fn extend_translated(&mut self, other: &WallSet, offset: Offset) {
        self.cells.extend(other.iter().map(|cell| cell.translated(offset)));
    }
}

impl FromIterator<CellCoord> for WallSet {
    fn from_iter<T: IntoIterator<Item = CellCoord>>(iter: T) -> Self {
        Self {
            cells: iter.into_iter().collect(),
        }
    }
}

/// Dimensions and wall layout of a board or component.
///
/// A horizontal wall at `(x, y)` separates cell `(x, y - 1)` from `(x, y)`.
/// A vertical wall at `(x, y)` separates cell `(x - 1, y)` from `(x, y)`.
/// Walls outside the bounds are legal and simply never consulted.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GridGeometry {
    columns: u32,
    rows: u32,
    horizontal: WallSet,
    vertical: WallSet,
}

impl GridGeometry {
    /// Creates an empty grid with the provided dimensions.
    #[must_use]
    pub fn new(columns: u32, rows: u32) -> Self {
        Self {
            columns,
            rows,
            horizontal: WallSet::new(),
            vertical: WallSet::new(),
        }
    }

    /// Number of columns in the grid.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of rows in the grid.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Reports whether the cell lies within `[0, columns) x [0, rows)`.
    #[must_use]
    pub fn in_bounds(&self, cell: CellCoord) -> bool {
        let column = u32::try_from(cell.x());
        let row = u32::try_from(cell.y());
        matches!((column, row), (Ok(column), Ok(row)) if column < self.columns && row < self.rows)
    }

    /// Reports whether a horizontal wall sits at the provided coordinate.
    #[must_use]
    pub fn has_horizontal_wall(&self, cell: CellCoord) -> bool {
        self.horizontal.contains(cell)
    }

    /// Reports whether a vertical wall sits at the provided coordinate.
    #[must_use]
    pub fn has_vertical_wall(&self, cell: CellCoord) -> bool {
        self.vertical.contains(cell)
    }

    /// Reports whether a wall blocks leaving `from` in `direction`.
    ///
    /// Moving up or left tests the wall keyed by the current cell; moving
    /// down or right tests the wall keyed by the destination cell. Both
    /// encodings name the same physical boundary.
    #[must_use]
    pub fn blocks(&self, from: CellCoord, direction: Direction) -> bool {
        match direction {
            Direction::Up => self.has_horizontal_wall(from),
            Direction::Down => self.has_horizontal_wall(from.step(Direction::Down)),
            Direction::Left => self.has_vertical_wall(from),
            Direction::Right => self.has_vertical_wall(from.step(Direction::Right)),
        }
    }

    /// Horizontal walls of the grid.
    #[must_use]
    pub fn horizontal_walls(&self) -> &WallSet {
        &self.horizontal
    }

    /// Vertical walls of the grid.
    #[must_use]
    pub fn vertical_walls(&self) -> &WallSet {
        &self.vertical
    }

    pub(crate) fn put_horizontal_wall(&mut self, cell: CellCoord) {
        let _ = self.horizontal.insert(cell);
    }

    pub(crate) fn put_vertical_wall(&mut self, cell: CellCoord) {
        let _ = self.vertical.insert(cell);
    }

    pub(crate) fn merge_translated(&mut self, other: &GridGeometry, offset: Offset) {
        self.horizontal.extend_translated(&other.horizontal, offset);
        self.vertical.extend_translated(&other.vertical, offset);
    }
}
