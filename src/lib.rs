pub mod line;
pub mod maze;
pub mod parse_maze;
pub mod parse_util;

pub use maze::Cell;
pub use maze::Maze;
pub use maze::Side;
pub use maze::Walls;
pub use parse_maze::Grammar;
pub use parse_maze::MazeError;
pub use parse_maze::ParseOptions;
