use serde::{Deserialize, Serialize};

use crate::direction::Direction;
use crate::grid::{Maze, Point};
use crate::walker::Walker;

/// The finished walk: the surviving path and everything needed to replay it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolveResult {
    pub path: Vec<Direction>,
    pub footprints: Vec<Point>,
    pub start: Point,
    pub goal: Point,
    /// Walker operations spent, backtracks included.
    pub turns: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolveState {
    Walking,
    Unreachable,
    Solved(SolveResult),
}

impl SolveState {
    fn is_done(&self) -> bool {
        !matches!(self, SolveState::Walking)
    }
}

/// Drives a `Walker` across a maze one turn per `step` call: take the first
/// legal direction, or back out when there is none, until the walker stands
/// on the goal or reports it unreachable.
#[derive(Debug)]
pub struct Solver {
    start: Point,
    goal: Point,
    walker: Walker,
    turns: usize,
    state: SolveState,
}

impl Solver {
    pub fn new(start: Point, goal: Point) -> Self {
        Self {
            start,
            goal,
            walker: Walker::new(start),
            turns: 0,
            state: SolveState::Walking,
        }
    }

    pub fn finish(mut self, maze: &Maze) -> SolveState {
        loop {
            match self.step(maze) {
                SolveState::Walking => {}
                state => return state,
            }
        }
    }

    /// Advance one turn. Goal and reachability are checked before the walker
    /// moves, so starting on the goal solves without spending a turn.
    pub fn step(&mut self, maze: &Maze) -> SolveState {
        if self.state.is_done() {
            return self.state.clone();
        }

        let position = self.walker.position();
        if position == self.goal {
            self.state = SolveState::Solved(SolveResult {
                path: self.walker.path().to_vec(),
                footprints: self.walker.footprints().to_vec(),
                start: self.start,
                goal: self.goal,
                turns: self.turns,
            });
            return self.state.clone();
        }
        if !self.walker.is_goal_reachable() {
            self.state = SolveState::Unreachable;
            return self.state.clone();
        }

        self.turns += 1;
        let legal = self
            .walker
            .legal_directions(maze.width, maze.height, |direction| {
                // Walls block a direction; the grid edge does not, staying
                // in bounds is the walker's own rule.
                match position.step(direction) {
                    Some(next) if maze.in_bounds(next) => maze.cells[next.y][next.x].is_passable(),
                    _ => true,
                }
            });

        match legal.first() {
            Some(&direction) => self.walker.move_to(direction),
            None => self.walker.move_back(),
        }

        self.state.clone()
    }

    pub fn state(&self) -> &SolveState {
        &self.state
    }

    pub fn walker(&self) -> &Walker {
        &self.walker
    }

    pub fn turns(&self) -> usize {
        self.turns
    }

    pub fn start(&self) -> Point {
        self.start
    }

    pub fn goal(&self) -> Point {
        self.goal
    }
}
