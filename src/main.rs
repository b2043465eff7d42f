use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use asciimaze::Maze;
use asciimaze::ParseOptions;
use asciimaze::Side;
use asciimaze::parse_maze;

#[derive(Parser, Debug)]
#[command(about = "Check a maze file and summarize it")]
struct Args {
    /// Maze file to read
    path: PathBuf,

    /// Reject digit markers
    #[arg(long)]
    basic: bool,

    /// Require exactly two starting locations and unique macguffins
    #[arg(long)]
    strict: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let options = if args.basic {
        ParseOptions::basic()
    } else {
        ParseOptions::extended()
    }
    .strict(args.strict);

    let maze = parse_maze::read_maze_file(&args.path, options)
        .with_context(|| format!("Failed to load maze {}", args.path.display()))?;

    print!("{}", summarize(&maze)?);

    Ok(())
}

fn summarize(maze: &Maze) -> anyhow::Result<String> {
    let mut s = format!("{}x{} cells\n", maze.height(), maze.width());

    for cell in maze.starting_locations() {
        s.push_str(&format!("start {cell}\n"));
    }

    for (id, cell) in maze.macguffin_locations() {
        s.push_str(&format!("macguffin {id} {cell}\n"));
    }

    // Only count walls between two cells, each from the side of the cell above or left of it
    let mut interior = 0;
    for cell in maze.cells() {
        let walls = maze.walls(cell.row, cell.col)?;

        if cell.col + 1 < maze.width() && walls[Side::Right] {
            interior += 1;
        }

        if cell.row + 1 < maze.height() && walls[Side::Bottom] {
            interior += 1;
        }
    }
    s.push_str(&format!("{interior} interior walls\n"));

    Ok(s)
}
