pub mod direction;
pub mod grid;
pub mod solve;
pub mod util;
pub mod walker;

pub use direction::{Direction, DirectionSet};
pub use grid::{Cell, Maze, Point};
pub use solve::{SolveResult, SolveState, Solver};
pub use walker::Walker;
