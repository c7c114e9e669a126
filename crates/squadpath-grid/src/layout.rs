//! Tile maps built from text.
//!
//! A [`Layout`] parses ASCII art into a [`TileGrid`]. Lines are rows, the
//! first line being the top row (highest `y`), and all lines must have the
//! same width:
//!
//! | char | tile |
//! |---|---|
//! | `.` | free |
//! | `#` | occupied |
//! | `S` | free, marks the start |
//! | `G` | free, marks the goal |

use std::fmt;

use squadpath_core::{Point, TileStateProvider};

use crate::grid::TileGrid;

/// A parsed map with optional start and goal markers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    pub grid: TileGrid,
    pub start: Option<Point>,
    pub goal: Option<Point>,
}

impl Layout {
    /// Parse a layout.
    ///
    /// Leading/trailing whitespace is trimmed from the whole string but not
    /// from individual lines.
    pub fn parse(s: &str) -> Result<Self, LayoutError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(LayoutError::Empty);
        }
        let rows: Vec<Vec<char>> = s.lines().map(|l| l.chars().collect()).collect();
        let width = rows[0].len();
        if rows.iter().any(|r| r.len() != width) {
            return Err(LayoutError::InconsistentSize(s.to_string()));
        }
        let height = rows.len() as i32;

        let mut layout = Self {
            grid: TileGrid::new(width as i32, height),
            start: None,
            goal: None,
        };
        for (row, line) in rows.iter().enumerate() {
            let y = height - 1 - row as i32;
            for (x, &ch) in line.iter().enumerate() {
                let p = Point::new(x as i32, y);
                match ch {
                    '.' => {}
                    '#' => layout.grid.set_occupied(p),
                    'S' => layout.start = Some(p),
                    'G' => layout.goal = Some(p),
                    _ => {
                        return Err(LayoutError::InvalidRune {
                            ch,
                            pos: p,
                            content: s.to_string(),
                        });
                    }
                }
            }
        }
        Ok(layout)
    }
}

impl TileGrid {
    /// Build a grid from ASCII art, ignoring start/goal markers.
    ///
    /// See [`Layout`] for the format.
    pub fn from_ascii(s: &str) -> Result<Self, LayoutError> {
        Layout::parse(s).map(|l| l.grid)
    }
}

/// Draw `grid` with a route overlay, top row first.
///
/// `S` is the start, `*` the intermediate steps and `G` the last step.
pub fn render_route(grid: &TileGrid, start: Point, path: &[Point]) -> String {
    let bounds = grid.bounds();
    let mut out = String::with_capacity(bounds.len() + bounds.height().max(0) as usize);
    for y in (bounds.min.y..bounds.max.y).rev() {
        for x in bounds.min.x..bounds.max.x {
            let p = Point::new(x, y);
            let ch = if p == start {
                'S'
            } else if path.last() == Some(&p) {
                'G'
            } else if path.contains(&p) {
                '*'
            } else if grid.tile_state(p).is_free() {
                '.'
            } else {
                '#'
            };
            out.push(ch);
        }
        if y > bounds.min.y {
            out.push('\n');
        }
    }
    out
}

/// Errors that can occur when parsing a layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    /// Nothing but whitespace.
    Empty,
    /// Lines have inconsistent widths.
    InconsistentSize(String),
    /// A character outside `.#SG` was found.
    InvalidRune {
        ch: char,
        pos: Point,
        content: String,
    },
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("layout: empty"),
            Self::InconsistentSize(s) => write!(f, "layout: inconsistent size:\n{s}"),
            Self::InvalidRune { ch, pos, content } => {
                write!(
                    f,
                    "layout contains invalid rune \u{201c}{ch}\u{201d} at {pos}:\n{content}"
                )
            }
        }
    }
}

impl std::error::Error for LayoutError {}
