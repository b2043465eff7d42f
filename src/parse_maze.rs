use std::collections::BTreeMap;
use std::fs::read_to_string;
use std::io;
use std::path::Path;

use thiserror::Error;
use tracing::debug;
use tracing::warn;

use crate::line;
use crate::line::Line;
use crate::line::Marker;
use crate::maze::Cell;
use crate::maze::Maze;
use crate::parse_util;
use crate::parse_util::ScanError;

/// Number of start markers a well formed maze carries.
pub const EXPECTED_STARTS: usize = 2;

/// Which bytes may be drawn inside a cell.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Grammar {
    /// Only ` ` and `*`.
    Basic,

    /// ` `, `*`, and a single digit marking a macguffin.
    #[default]
    Extended,
}

impl Grammar {
    pub(crate) fn accepts_cell(self, b: u8) -> bool {
        match self {
            Self::Basic => matches!(b, b' ' | b'*'),
            Self::Extended => matches!(b, b' ' | b'*') || b.is_ascii_digit(),
        }
    }

    pub(crate) const fn cell_description(self) -> &'static str {
        match self {
            Self::Basic => "' ' or '*'",
            Self::Extended => "' ', '*' or a digit",
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    pub grammar: Grammar,

    /// Reject marker anomalies (a start count other than [`EXPECTED_STARTS`], a repeated
    /// macguffin) instead of warning about them.
    pub strict: bool,
}

impl ParseOptions {
    pub const fn basic() -> Self {
        Self {
            grammar: Grammar::Basic,
            strict: false,
        }
    }

    pub const fn extended() -> Self {
        Self {
            grammar: Grammar::Extended,
            strict: false,
        }
    }

    pub const fn strict(self, strict: bool) -> Self {
        Self { strict, ..self }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MazeError {
    #[error("Parse error on line {line}: {cause}")]
    Parse {
        line: usize,
        #[source]
        cause: ScanError,
    },

    #[error("Semantic error in maze file: {0}")]
    Semantic(#[from] SemanticError),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SemanticError {
    #[error("Maze has no horizontal wall lines")]
    Empty,

    #[error("Horizontal wall length failure: row {row} has {got} segments, expected {expected}")]
    HorizontalLength {
        row: usize,
        expected: usize,
        got: usize,
    },

    #[error("Vertical wall length failure: row {row} has {got} segments, expected {expected}")]
    VerticalLength {
        row: usize,
        expected: usize,
        got: usize,
    },

    #[error(
        "Wall row count failure: {horizontal} horizontal rows for {vertical} rows of cells, expected {}",
        .vertical + 1
    )]
    RowCount { horizontal: usize, vertical: usize },

    #[error("Marker at {cell} lies outside the maze")]
    MarkerOutOfBounds { cell: Cell },

    #[error("Expected {expected} starting locations, found {found}")]
    StartCount { expected: usize, found: usize },

    #[error("Macguffin {id} defined at both {first} and {second}")]
    DuplicateMacguffin { id: u8, first: Cell, second: Cell },
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to read maze file: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid maze file: {0}")]
    Maze(#[from] MazeError),
}

/// Parse a maze drawn in the `+-|` notation:
///
/// ```notrust
/// +-+-+-+
/// |   |*|
/// + + + +
/// |*|   |
/// +-+-+-+
/// ```
///
/// Surrounding whitespace, of the whole text and of each line, is ignored. Parsing stops at the
/// first malformed line.
pub fn read_maze(text: &str, options: ParseOptions) -> Result<Maze, MazeError> {
    let mut builder = MazeBuilder::new(options);

    for (index, line) in parse_util::split_lines(text.trim()).enumerate() {
        let line = line::read_line(index, line.trim(), options.grammar)
            .map_err(|cause| MazeError::Parse { line: index, cause })?;

        debug!(index, kind = ?line.kind(), "Read maze line");

        builder.push(index, line)?;
    }

    let maze = builder.finish()?;

    debug!(
        width = maze.width(),
        height = maze.height(),
        starts = maze.starting_locations().len(),
        macguffins = maze.macguffin_locations().len(),
        "Parsed maze"
    );

    Ok(maze)
}

/// Read the whole file at `path` and parse it as a maze.
pub fn read_maze_file<P: AsRef<Path>>(path: P, options: ParseOptions) -> Result<Maze, LoadError> {
    let text = read_to_string(path)?;

    Ok(read_maze(&text, options)?)
}

/// Accumulates classified lines. Nothing is handed out until [`MazeBuilder::finish`] has checked
/// that the walls line up.
struct MazeBuilder {
    options: ParseOptions,
    horiz_walls: Vec<Vec<bool>>,
    vert_walls: Vec<Vec<bool>>,
    starting_locations: Vec<Cell>,
    macguffin_locations: BTreeMap<u8, Cell>,
}

impl MazeBuilder {
    fn new(options: ParseOptions) -> Self {
        Self {
            options,
            horiz_walls: Vec::new(),
            vert_walls: Vec::new(),
            starting_locations: Vec::new(),
            macguffin_locations: BTreeMap::new(),
        }
    }

    fn push(&mut self, index: usize, line: Line) -> Result<(), SemanticError> {
        match line {
            Line::Horizontal { walls } => self.horiz_walls.push(walls),
            Line::Vertical { walls, markers } => {
                // Vertical lines only ever sit at odd indices
                let row = index / 2;
                debug_assert_eq!(row, self.vert_walls.len());

                for (col, marker) in markers {
                    let cell = Cell::new(row, col);

                    match marker {
                        Marker::Start => self.starting_locations.push(cell),
                        Marker::Macguffin(id) => self.add_macguffin(id, cell)?,
                    }
                }

                self.vert_walls.push(walls);
            }
        }

        Ok(())
    }

    fn add_macguffin(&mut self, id: u8, cell: Cell) -> Result<(), SemanticError> {
        let Some(first) = self.macguffin_locations.insert(id, cell) else {
            return Ok(());
        };

        if self.options.strict {
            return Err(SemanticError::DuplicateMacguffin {
                id,
                first,
                second: cell,
            });
        }

        warn!("Macguffin {id} already defined at {first}. Using latest at {cell}");

        Ok(())
    }

    fn finish(self) -> Result<Maze, SemanticError> {
        let Some(first) = self.horiz_walls.first() else {
            return Err(SemanticError::Empty);
        };

        let n = first.len();
        let m = self.vert_walls.len();

        for (row, walls) in self.horiz_walls.iter().enumerate() {
            if walls.len() != n {
                return Err(SemanticError::HorizontalLength {
                    row,
                    expected: n,
                    got: walls.len(),
                });
            }
        }

        for (row, walls) in self.vert_walls.iter().enumerate() {
            if walls.len() != n + 1 {
                return Err(SemanticError::VerticalLength {
                    row,
                    expected: n + 1,
                    got: walls.len(),
                });
            }
        }

        if self.horiz_walls.len() != m + 1 {
            return Err(SemanticError::RowCount {
                horizontal: self.horiz_walls.len(),
                vertical: m,
            });
        }

        let markers = self
            .starting_locations
            .iter()
            .chain(self.macguffin_locations.values());

        for &cell in markers {
            if cell.row >= m || cell.col >= n {
                return Err(SemanticError::MarkerOutOfBounds { cell });
            }
        }

        let found = self.starting_locations.len();
        if found != EXPECTED_STARTS {
            if self.options.strict {
                return Err(SemanticError::StartCount {
                    expected: EXPECTED_STARTS,
                    found,
                });
            }

            warn!("Expected {EXPECTED_STARTS} starting locations, found {found}");
        }

        Ok(Maze::new(
            self.horiz_walls,
            self.vert_walls,
            self.starting_locations,
            self.macguffin_locations,
        ))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    const SCENARIO: &str = "
        +-+-+
        |   |
        +-+-+
        |*| |
        +-+-+
    ";

    #[test]
    fn scenario() {
        let maze = read_maze(SCENARIO, ParseOptions::default()).unwrap();

        assert_eq!(maze.width(), 2);
        assert_eq!(maze.height(), 2);
        assert_eq!(maze.starting_locations(), &[Cell::new(1, 0)]);
        assert_eq!(maze.walls(0, 0).unwrap(), [true, false, true, true]);
    }

    #[test]
    fn scenario_strict_wants_two_starts() {
        let err = read_maze(SCENARIO, ParseOptions::default().strict(true)).unwrap_err();

        assert_eq!(
            err,
            MazeError::Semantic(SemanticError::StartCount {
                expected: 2,
                found: 1
            })
        );
    }

    #[test]
    fn empty() {
        for text in ["", "   ", "\n\n \t\n"] {
            let err = read_maze(text, ParseOptions::default()).unwrap_err();

            assert_eq!(err, MazeError::Semantic(SemanticError::Empty));
        }
    }

    #[test]
    fn parse_error_carries_line() {
        let text = "+-+\n| |\n+-+-\n";

        let err = read_maze(text, ParseOptions::default()).unwrap_err();

        assert_eq!(
            err,
            MazeError::Parse {
                line: 2,
                cause: ScanError::UnexpectedEol { col: 4, exp: "'+'" }
            }
        );
    }

    #[test]
    fn blank_line_inside_maze() {
        let text = "+-+\n\n| |\n+-+";

        let err = read_maze(text, ParseOptions::default()).unwrap_err();

        assert!(matches!(err, MazeError::Parse { line: 1, .. }));
    }

    #[test]
    fn ragged_horizontal() {
        let text = "+-+-+\n|   |\n+-+";

        let err = read_maze(text, ParseOptions::default()).unwrap_err();

        assert_eq!(
            err,
            MazeError::Semantic(SemanticError::HorizontalLength {
                row: 1,
                expected: 2,
                got: 1
            })
        );
    }

    #[test]
    fn ragged_vertical() {
        let text = "+-+-+\n| |\n+-+-+";

        let err = read_maze(text, ParseOptions::default()).unwrap_err();

        assert_eq!(
            err,
            MazeError::Semantic(SemanticError::VerticalLength {
                row: 0,
                expected: 3,
                got: 2
            })
        );
    }

    #[test]
    fn missing_bottom_boundary() {
        let text = "+-+\n| |";

        let err = read_maze(text, ParseOptions::default()).unwrap_err();

        assert_eq!(
            err,
            MazeError::Semantic(SemanticError::RowCount {
                horizontal: 1,
                vertical: 1
            })
        );
    }

    #[test]
    fn single_seam_has_no_cells() {
        let maze = read_maze("+-+-+", ParseOptions::default()).unwrap();

        assert_eq!(maze.width(), 2);
        assert_eq!(maze.height(), 0);
        assert!(maze.walls(0, 0).is_err());
    }

    #[test]
    fn duplicate_macguffin() {
        let text = "+-+-+\n|1 1|\n+-+-+";

        let maze = read_maze(text, ParseOptions::extended()).unwrap();
        assert_eq!(maze.macguffin(1), Some(Cell::new(0, 1)));

        let err = read_maze(text, ParseOptions::extended().strict(true)).unwrap_err();
        assert_eq!(
            err,
            MazeError::Semantic(SemanticError::DuplicateMacguffin {
                id: 1,
                first: Cell::new(0, 0),
                second: Cell::new(0, 1),
            })
        );
    }

    #[test]
    fn basic_rejects_macguffins() {
        let text = "+-+-+\n|*  |\n+-+-+\n|0 *|\n+-+-+";

        assert!(read_maze(text, ParseOptions::extended()).is_ok());

        let err = read_maze(text, ParseOptions::basic()).unwrap_err();
        assert!(matches!(err, MazeError::Parse { line: 3, .. }));
    }

    #[test]
    fn bare_carriage_returns() {
        let maze = read_maze("+-+\r|*|\r+-+\r", ParseOptions::basic()).unwrap();

        assert_eq!(maze.width(), 1);
        assert_eq!(maze.height(), 1);
        assert_eq!(maze.starting_locations(), &[Cell::new(0, 0)]);
        assert_eq!(maze.walls(0, 0).unwrap(), [true, true, true, true]);
    }

    #[test]
    fn marker_outside_matrices() {
        let mut builder = MazeBuilder::new(ParseOptions::default());
        builder.horiz_walls = vec![vec![true], vec![true]];
        builder.vert_walls = vec![vec![true, true]];
        builder.starting_locations = vec![Cell::new(0, 0), Cell::new(0, 3)];

        let err = builder.finish().unwrap_err();

        assert_eq!(
            err,
            SemanticError::MarkerOutOfBounds {
                cell: Cell::new(0, 3)
            }
        );
    }

    #[test]
    fn non_ascii_is_reported_whole() {
        let err = read_maze("+-+\n|é|\n+-+", ParseOptions::default()).unwrap_err();

        assert_eq!(
            err.to_string(),
            "Parse error on line 1: Expected ' ', '*' or a digit at column 1, but got 'é'"
        );
    }

    #[test]
    fn crlf_and_indentation() {
        let text = "  +-+-+\r\n  |* *|\r\n  +-+-+\r\n";

        let maze = read_maze(text, ParseOptions::basic().strict(true)).unwrap();

        assert_eq!(
            maze.starting_locations(),
            &[Cell::new(0, 0), Cell::new(0, 1)]
        );
    }
}
