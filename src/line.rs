use crate::parse_maze::Grammar;
use crate::parse_util;
use crate::parse_util::ScanResult;
use crate::parse_util::Scanner;

/// The two line shapes of a maze file. They strictly alternate, starting and ending with a
/// horizontal seam.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// `+-+ +`: the seam between two rows of cells (or the exterior top/bottom)
    Horizontal,

    /// `|*| |`: one row of cells, along with the seams between its columns
    Vertical,
}

impl LineKind {
    pub const fn of(index: usize) -> Self {
        if index % 2 == 0 {
            Self::Horizontal
        } else {
            Self::Vertical
        }
    }
}

/// Something drawn inside a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    Start,
    Macguffin(u8),
}

/// A single line of a maze file, after classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line {
    /// One flag per column, `true` where a `-` is drawn.
    Horizontal { walls: Vec<bool> },

    /// One flag per column boundary (so one more than there are columns), `true` where a `|` is
    /// drawn. Markers are keyed by the column of the cell they sit in.
    Vertical {
        walls: Vec<bool>,
        markers: Vec<(usize, Marker)>,
    },
}

impl Line {
    pub const fn kind(&self) -> LineKind {
        match self {
            Self::Horizontal { .. } => LineKind::Horizontal,
            Self::Vertical { .. } => LineKind::Vertical,
        }
    }
}

/// Read the line at `index`. The line is expected to already be trimmed.
pub fn read_line(index: usize, line: &str, grammar: Grammar) -> ScanResult<Line> {
    let s = Scanner::new(line.as_bytes());

    match LineKind::of(index) {
        LineKind::Horizontal => read_horizontal(s),
        LineKind::Vertical => read_vertical(s, grammar),
    }
}

const fn is_horizontal_segment(b: u8) -> bool {
    matches!(b, b'-' | b' ')
}

const fn is_vertical_segment(b: u8) -> bool {
    matches!(b, b'|' | b' ')
}

/// `+` followed by one or more `[- ]+` groups.
fn read_horizontal(s: Scanner<'_>) -> ScanResult<Line> {
    let mut s = parse_util::expect(b'+', "'+'", s)?;
    let mut walls = Vec::new();

    loop {
        let (b, rest) = parse_util::expect_fn(is_horizontal_segment, "'-' or ' '", s)?;
        s = parse_util::expect(b'+', "'+'", rest)?;

        walls.push(b == b'-');

        if !parse_util::peek_1(s).is_some_and(is_horizontal_segment) {
            break;
        }
    }

    parse_util::expect_end(s)?;

    Ok(Line::Horizontal { walls })
}

/// `|` followed by one or more groups of a cell byte and a `[| ]` seam.
fn read_vertical(s: Scanner<'_>, grammar: Grammar) -> ScanResult<Line> {
    let mut s = parse_util::expect(b'|', "'|'", s)?;

    let mut walls = vec![true];
    let mut markers = Vec::new();

    let is_cell = |b: u8| grammar.accepts_cell(b);

    loop {
        let col = walls.len() - 1;

        let (c, rest) = parse_util::expect_fn(is_cell, grammar.cell_description(), s)?;
        let (w, rest) = parse_util::expect_fn(is_vertical_segment, "'|' or ' '", rest)?;
        s = rest;

        match c {
            b'*' => markers.push((col, Marker::Start)),
            b'0'..=b'9' => markers.push((col, Marker::Macguffin(c - b'0'))),
            _ => {}
        }

        walls.push(w == b'|');

        if !parse_util::peek_1(s).is_some_and(is_cell) {
            break;
        }
    }

    parse_util::expect_end(s)?;

    Ok(Line::Vertical { walls, markers })
}
