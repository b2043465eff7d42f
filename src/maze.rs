use std::collections::BTreeMap;
use std::fmt;
use std::ops::Index;
use std::path::Path;
use std::str::FromStr;

use thiserror::Error;

use crate::parse_maze;
use crate::parse_maze::LoadError;
use crate::parse_maze::MazeError;
use crate::parse_maze::ParseOptions;

/// A cell of the maze, addressed from the top left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl Cell {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// One of the four sides of a cell, in the order [`Maze::walls`] reports them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Top = 0,
    Right = 1,
    Bottom = 2,
    Left = 3,
}

impl Side {
    pub const ALL: [Side; 4] = [Side::Top, Side::Right, Side::Bottom, Side::Left];

    pub const fn opposite(self) -> Self {
        match self {
            Side::Top => Side::Bottom,
            Side::Right => Side::Left,
            Side::Bottom => Side::Top,
            Side::Left => Side::Right,
        }
    }
}

/// The walls surrounding a single cell, indexable by [`Side`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Walls([bool; 4]);

impl Walls {
    pub const fn top(&self) -> bool {
        self.0[Side::Top as usize]
    }

    pub const fn right(&self) -> bool {
        self.0[Side::Right as usize]
    }

    pub const fn bottom(&self) -> bool {
        self.0[Side::Bottom as usize]
    }

    pub const fn left(&self) -> bool {
        self.0[Side::Left as usize]
    }

    pub const fn to_array(self) -> [bool; 4] {
        self.0
    }
}

impl Index<Side> for Walls {
    type Output = bool;

    fn index(&self, side: Side) -> &bool {
        &self.0[side as usize]
    }
}

impl PartialEq<[bool; 4]> for Walls {
    fn eq(&self, other: &[bool; 4]) -> bool {
        self.0 == *other
    }
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("Cell ({row}, {col}) is outside of the {height}x{width} maze")]
pub struct OutOfBounds {
    pub row: usize,
    pub col: usize,
    pub height: usize,
    pub width: usize,
}

/// A rectangular maze of `height() x width()` cells.
///
/// Walls are stored as two matrices which include the exterior of the maze, so that every cell
/// has all four of its sides described. Two neighbouring cells share the entry for the wall
/// between them.
///
/// A `Maze` is never modified once parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Maze {
    /// `(height + 1) x width`. Entry `[r][c]` is the wall above cell `(r, c)`.
    horiz_walls: Vec<Vec<bool>>,

    /// `height x (width + 1)`. Entry `[r][c]` is the wall left of cell `(r, c)`.
    vert_walls: Vec<Vec<bool>>,

    starting_locations: Vec<Cell>,

    macguffin_locations: BTreeMap<u8, Cell>,

    width: usize,
    height: usize,
}

impl Maze {
    /// Assumes the matrices have already been checked to line up.
    pub(crate) fn new(
        horiz_walls: Vec<Vec<bool>>,
        vert_walls: Vec<Vec<bool>>,
        starting_locations: Vec<Cell>,
        macguffin_locations: BTreeMap<u8, Cell>,
    ) -> Self {
        let width = horiz_walls.first().map_or(0, Vec::len);
        let height = vert_walls.len();

        Self {
            horiz_walls,
            vert_walls,
            starting_locations,
            macguffin_locations,
            width,
            height,
        }
    }

    /// Read and parse the maze file at `path`, accepting macguffin markers.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, LoadError> {
        parse_maze::read_maze_file(path, ParseOptions::default())
    }

    /// Number of columns
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Number of rows
    pub const fn height(&self) -> usize {
        self.height
    }

    pub const fn contains(&self, cell: Cell) -> bool {
        cell.row < self.height && cell.col < self.width
    }

    /// The walls around cell `(row, col)`, as `[top, right, bottom, left]`.
    pub fn walls(&self, row: usize, col: usize) -> Result<Walls, OutOfBounds> {
        if !self.contains(Cell::new(row, col)) {
            return Err(OutOfBounds {
                row,
                col,
                height: self.height,
                width: self.width,
            });
        }

        Ok(Walls([
            self.horiz_walls[row][col],
            self.vert_walls[row][col + 1],
            self.horiz_walls[row + 1][col],
            self.vert_walls[row][col],
        ]))
    }

    pub fn has_wall(&self, cell: Cell, side: Side) -> Result<bool, OutOfBounds> {
        let walls = self.walls(cell.row, cell.col)?;

        Ok(walls[side])
    }

    /// Every cell, row by row.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + use<> {
        let width = self.width;

        (0..self.height).flat_map(move |row| (0..width).map(move |col| Cell::new(row, col)))
    }

    pub fn horiz_walls(&self) -> &[Vec<bool>] {
        &self.horiz_walls
    }

    pub fn vert_walls(&self) -> &[Vec<bool>] {
        &self.vert_walls
    }

    /// Cells marked `*`, in reading order.
    pub fn starting_locations(&self) -> &[Cell] {
        &self.starting_locations
    }

    /// Cells marked with a digit, keyed by that digit.
    pub fn macguffin_locations(&self) -> &BTreeMap<u8, Cell> {
        &self.macguffin_locations
    }

    pub fn macguffin(&self, id: u8) -> Option<Cell> {
        self.macguffin_locations.get(&id).copied()
    }
}

impl FromStr for Maze {
    type Err = MazeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_maze::read_maze(s, ParseOptions::default())
    }
}
