use std::{fmt::Display, str::FromStr};

use anyhow::bail;
use serde::{Deserialize, Serialize};

use crate::direction::Direction;

/// A single square of the maze.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum Cell {
    Start,
    Open,
    Wall,
    Goal,
}

impl Default for Cell {
    fn default() -> Self {
        Self::Wall
    }
}

impl Cell {
    pub fn from_char(c: char) -> Option<Cell> {
        match c {
            'x' => Some(Cell::Start),
            '.' => Some(Cell::Open),
            '#' => Some(Cell::Wall),
            '$' => Some(Cell::Goal),
            _ => None,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Cell::Start => 'x',
            Cell::Open => '.',
            Cell::Wall => '#',
            Cell::Goal => '$',
        }
    }

    /// Whether the walker may stand on this cell.
    pub fn is_passable(self) -> bool {
        self != Cell::Wall
    }
}

impl Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Grid position, 0-indexed from the top-left corner; y grows downwards.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: usize,
    pub y: usize,
}

impl Point {
    /// The neighboring point one step in the given direction, or `None` when
    /// the step would leave the grid past the top or left edge.
    pub fn step(self, direction: Direction) -> Option<Point> {
        let (dx, dy) = direction.offset();
        Some(Point {
            x: self.x.checked_add_signed(dx)?,
            y: self.y.checked_add_signed(dy)?,
        })
    }
}

impl FromStr for Point {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once(',') {
            Some((x, y)) => Ok(Point {
                x: x.trim().parse()?,
                y: y.trim().parse()?,
            }),
            None => Err(anyhow::anyhow!("expected a point like 4,2, got: {}", s)),
        }
    }
}

/// A rectangular maze of cells, stored row by row (`cells[y][x]`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Maze {
    pub width: usize,
    pub height: usize,
    pub cells: Vec<Vec<Cell>>,
}

impl Maze {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![vec![Cell::Open; width]; height],
        }
    }

    pub fn in_bounds(&self, point: Point) -> bool {
        point.x < self.width && point.y < self.height
    }

    /// Position of the first cell of the given kind, scanning row by row.
    pub fn find(&self, cell: Cell) -> Option<Point> {
        for y in 0..self.height {
            for x in 0..self.width {
                if self.cells[y][x] == cell {
                    return Some(Point { x, y });
                }
            }
        }

        None
    }

    /// Scales the maze by the given factor, i.e. to make it twice as large, pass 2.
    /// Every cell is repeated into a factor x factor block in the new grid.
    pub fn scale_up(&mut self, factor: usize) {
        let mut new_cells = vec![vec![Cell::default(); self.width * factor]; self.height * factor];

        for y in 0..self.height {
            for x in 0..self.width {
                for r in 0..factor {
                    for c in 0..factor {
                        new_cells[y * factor + r][x * factor + c] = self.cells[y][x];
                    }
                }
            }
        }

        self.width *= factor;
        self.height *= factor;
        self.cells = new_cells;
    }
}

impl FromStr for Maze {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut cells: Vec<Vec<Cell>> = Vec::new();

        for (y, line) in s.lines().enumerate() {
            let row = line
                .chars()
                .enumerate()
                .map(|(x, c)| {
                    Cell::from_char(c)
                        .ok_or_else(|| anyhow::anyhow!("unknown cell {:?} at ({}, {})", c, x, y))
                })
                .collect::<Result<Vec<Cell>, _>>()?;

            if let Some(first) = cells.first() {
                if row.len() != first.len() {
                    bail!("row {} has {} cells, expected {}", y, row.len(), first.len());
                }
            }

            cells.push(row);
        }

        let height = cells.len();
        let width = cells.first().map_or(0, Vec::len);
        if width == 0 {
            bail!("maze is empty");
        }

        Ok(Maze {
            width,
            height,
            cells,
        })
    }
}

impl Display for Maze {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in &self.cells {
            for cell in row {
                write!(f, "{}", cell)?;
            }
            write!(f, "\n")?;
        }

        Ok(())
    }
}
