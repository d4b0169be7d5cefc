pub mod distance;

pub use self::distance::DistanceMatrix;

use crate::error::{DpResult, DrillError};
use std::fs;
use std::path::Path;
use std::str::FromStr;

/// A drill position: `x` is the column, `y` the row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Hole {
    pub x: i32,
    pub y: i32,
}

/// Square 0/1 grid read from a board file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    size: usize,
    cells: Vec<bool>, // row-major, size * size
}

impl Board {
    pub fn load<P: AsRef<Path>>(path: P) -> DpResult<Self> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parses the board text format: a size line followed by `size` rows of
    /// `size` space-separated 0/1 values. Blank lines are skipped.
    pub fn parse(text: &str) -> DpResult<Self> {
        let mut lines = text.lines().map(str::trim).filter(|l| !l.is_empty());

        let header = lines
            .next()
            .ok_or_else(|| DrillError::MalformedBoard("file is empty".to_string()))?;
        let size: usize = header.parse().map_err(|_| {
            DrillError::MalformedBoard(format!("grid size '{}' is not an integer", header))
        })?;
        if size == 0 {
            return Err(DrillError::MalformedBoard(
                "grid size must be at least 1".to_string(),
            ));
        }

        let mut cells = Vec::new();
        let mut rows = 0;

        for (row, line) in lines.enumerate() {
            if row >= size {
                return Err(DrillError::MalformedBoard(format!(
                    "declared size {} but found more than {} rows",
                    size, size
                )));
            }

            let mut cols = 0;
            for token in line.split_whitespace() {
                let cell = match token {
                    "0" => false,
                    "1" => true,
                    other => {
                        return Err(DrillError::MalformedBoard(format!(
                            "row {}: cell value '{}' is not 0 or 1",
                            row, other
                        )))
                    }
                };
                cells.push(cell);
                cols += 1;
            }

            if cols != size {
                return Err(DrillError::MalformedBoard(format!(
                    "row {} has {} columns, expected {}",
                    row, cols, size
                )));
            }
            rows += 1;
        }

        if rows != size {
            return Err(DrillError::MalformedBoard(format!(
                "declared size {} but found {} rows",
                size, rows
            )));
        }

        Ok(Self { size, cells })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn is_hole(&self, x: usize, y: usize) -> bool {
        self.cells[y * self.size + x]
    }

    /// All holes in row-major scan order. Hole index = position in the vector.
    pub fn holes(&self) -> Vec<Hole> {
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &on)| on)
            .map(|(idx, _)| Hole {
                x: (idx % self.size) as i32,
                y: (idx / self.size) as i32,
            })
            .collect()
    }
}

impl FromStr for Board {
    type Err = DrillError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Holes of a board that admits a tour (at least two holes).
pub fn extract_holes(board: &Board) -> DpResult<Vec<Hole>> {
    let holes = board.holes();
    if holes.len() < 2 {
        return Err(DrillError::EmptyBoard(holes.len()));
    }
    Ok(holes)
}
