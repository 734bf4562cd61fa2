use crate::direction::{Direction, DirectionSet};
use crate::grid::Point;

/// The agent walking the maze one cell per turn, depth-first.
///
/// The walker owns the whole exploration state: its position, the footprints
/// of the current path, the trail of directions that produced it, and one
/// set of failed directions per footprint. A driver decides each turn
/// between `move_to` with one of the `legal_directions` and `move_back`.
#[derive(Debug)]
pub struct Walker {
    position: Point,
    /// Every cell on the current path in visit order, starting cell first.
    footprints: Vec<Point>,
    /// Direction taken for each move still on the current path. Always one
    /// shorter than `footprints`.
    trail: Vec<Direction>,
    /// Failed directions per footprint. One entry longer than `trail` right
    /// after a backtrack, until the next forward move.
    bad: Vec<DirectionSet>,
    goal_reachable: bool,
}

impl Walker {
    pub fn new(start: Point) -> Self {
        Self {
            position: start,
            footprints: vec![start],
            trail: Vec::new(),
            bad: Vec::new(),
            goal_reachable: true,
        }
    }

    pub fn position(&self) -> Point {
        self.position
    }

    /// False once the walker has been forced back out of its starting cell;
    /// never becomes true again.
    pub fn is_goal_reachable(&self) -> bool {
        self.goal_reachable
    }

    /// The directions the walker could take this turn, probed in
    /// `Direction::ALL` order. A direction is legal when the destination
    /// lies inside the `width` x `height` grid, has not been ruled out from
    /// this cell, is not an immediate U-turn, is not a cell the current path
    /// already crosses, and `passable` accepts it.
    pub fn legal_directions(
        &self,
        width: usize,
        height: usize,
        passable: impl Fn(Direction) -> bool,
    ) -> Vec<Direction> {
        let ruled_out = self.bad.last().copied().unwrap_or_default();
        let came_by = self.trail.last().copied();

        let mut directions = Vec::with_capacity(4);
        for direction in Direction::ALL {
            let next = match self.position.step(direction) {
                Some(next) if next.x < width && next.y < height => next,
                _ => continue,
            };
            if ruled_out.contains(direction) {
                continue;
            }
            if came_by == Some(direction.opposite()) {
                continue;
            }
            if self.footprints.contains(&next) {
                continue;
            }
            if !passable(direction) {
                continue;
            }
            directions.push(direction);
        }

        directions
    }

    /// Step one cell in the given direction. The direction must be one that
    /// `legal_directions` currently returns; feeding any other direction is
    /// a driver bug and panics.
    pub fn move_to(&mut self, direction: Direction) {
        let next = match self.position.step(direction) {
            Some(next) => next,
            None => panic!("walker stepped {} off the grid", direction),
        };
        debug_assert!(
            !self.footprints.contains(&next),
            "walker re-entered {:?} while it is still on the path",
            next
        );

        self.position = next;
        self.footprints.push(next);
        self.trail.push(direction);

        // A cell entered right after a backtrack keeps the set already on
        // top; only a genuinely new cell gets a fresh one.
        if self.bad.len() < self.trail.len() {
            self.bad.push(DirectionSet::EMPTY);
        }
    }

    /// Undo the latest move: rule out the direction that led to the newest
    /// footprint, drop that footprint, and step back onto the previous one.
    /// With nothing left to undo, the goal is declared unreachable instead.
    pub fn move_back(&mut self) {
        let undone = match self.trail.pop() {
            Some(direction) => direction,
            None => {
                // Forced back out of the starting cell: every direction from
                // every reachable cell has failed.
                self.goal_reachable = false;
                return;
            }
        };

        // At most one set may sit past the trail; a second extra set belongs
        // to the cell being abandoned now and goes with it.
        if self.bad.len() > self.trail.len() + 1 {
            self.bad.pop();
        }

        match self.bad.last_mut() {
            Some(ruled_out) => ruled_out.insert(undone),
            None => panic!("no failed-direction set left to record {} into", undone),
        }

        self.footprints.pop();
        match self.footprints.last() {
            Some(&back) => self.position = back,
            None => panic!("footprints ran out while backtracking"),
        }
    }

    /// The directions of the current path in the order they were taken.
    /// Once the walker stands on the goal this is the solution.
    pub fn path(&self) -> &[Direction] {
        &self.trail
    }

    /// The cells of the current path in the order they were entered,
    /// starting cell included.
    pub fn footprints(&self) -> &[Point] {
        &self.footprints
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn point(x: usize, y: usize) -> Point {
        Point { x, y }
    }

    /// Legal directions on a fully open 3x3 grid.
    fn open_3x3(walker: &Walker) -> Vec<Direction> {
        walker.legal_directions(3, 3, |_| true)
    }

    #[test]
    fn probes_directions_in_a_fixed_order() {
        let walker = Walker::new(point(1, 1));
        assert_eq!(
            open_3x3(&walker),
            vec![
                Direction::Up,
                Direction::Down,
                Direction::Left,
                Direction::Right
            ]
        );
    }

    #[test]
    fn keeps_inside_the_grid() {
        let walker = Walker::new(point(0, 0));
        assert_eq!(open_3x3(&walker), vec![Direction::Down, Direction::Right]);

        let walker = Walker::new(point(2, 2));
        assert_eq!(open_3x3(&walker), vec![Direction::Up, Direction::Left]);
    }

    #[test]
    fn respects_the_passable_predicate() {
        let walker = Walker::new(point(1, 1));
        let legal = walker.legal_directions(3, 3, |direction| direction != Direction::Down);
        assert_eq!(
            legal,
            vec![Direction::Up, Direction::Left, Direction::Right]
        );
    }

    #[test]
    fn never_offers_an_immediate_u_turn() {
        let mut walker = Walker::new(point(0, 1));
        walker.move_to(Direction::Right);
        assert!(!open_3x3(&walker).contains(&Direction::Left));
    }

    #[test]
    fn never_offers_a_cell_still_on_the_path() {
        let mut walker = Walker::new(point(0, 0));
        walker.move_to(Direction::Right);
        walker.move_to(Direction::Down);
        walker.move_to(Direction::Left);

        // Up would re-enter the start, Right the cell just left.
        assert_eq!(open_3x3(&walker), vec![Direction::Down]);
    }

    #[test]
    fn move_to_tracks_footprints_and_trail() {
        let mut walker = Walker::new(point(0, 0));
        walker.move_to(Direction::Right);
        walker.move_to(Direction::Right);

        assert_eq!(walker.position(), point(2, 0));
        assert_eq!(walker.path(), &[Direction::Right, Direction::Right]);
        assert_eq!(
            walker.footprints(),
            &[point(0, 0), point(1, 0), point(2, 0)]
        );
    }

    #[test]
    fn footprints_stay_one_longer_than_the_trail() {
        let mut walker = Walker::new(point(0, 0));
        assert_eq!(walker.footprints().len(), walker.path().len() + 1);

        for direction in [Direction::Right, Direction::Down] {
            walker.move_to(direction);
            assert_eq!(walker.footprints().len(), walker.path().len() + 1);
        }
        for _ in 0..2 {
            walker.move_back();
            assert_eq!(walker.footprints().len(), walker.path().len() + 1);
        }
    }

    #[test]
    fn move_back_rules_out_the_undone_direction() {
        let mut walker = Walker::new(point(0, 0));
        walker.move_to(Direction::Right);
        walker.move_back();

        assert_eq!(walker.position(), point(0, 0));
        assert!(walker.is_goal_reachable());
        // ruled out now and on every later query
        assert!(!open_3x3(&walker).contains(&Direction::Right));
        assert!(!open_3x3(&walker).contains(&Direction::Right));
        assert!(open_3x3(&walker).contains(&Direction::Down));
    }

    #[test]
    fn move_back_at_the_start_declares_the_goal_unreachable() {
        let mut walker = Walker::new(point(0, 0));
        assert!(walker.is_goal_reachable());

        walker.move_back();
        assert!(!walker.is_goal_reachable());
        assert_eq!(walker.position(), point(0, 0));

        // terminal: backtracking again changes nothing
        walker.move_back();
        assert!(!walker.is_goal_reachable());
        assert_eq!(walker.position(), point(0, 0));
    }

    #[test]
    fn abandoning_a_cell_keeps_the_failure_at_the_branch() {
        // Two cells out, two backtracks: the far cell's record is dropped
        // with it, the start remembers the first direction as bad.
        let mut walker = Walker::new(point(0, 0));
        walker.move_to(Direction::Right);
        walker.move_to(Direction::Right);
        walker.move_back();
        walker.move_back();

        let legal = walker.legal_directions(3, 3, |_| true);
        assert!(!legal.contains(&Direction::Right));
        assert!(legal.contains(&Direction::Down));
    }

    #[test]
    fn exhausts_a_corridor_and_gives_up() {
        // 3x1 corridor with no goal: right to the end, then all the way
        // back out of the start.
        let mut walker = Walker::new(point(0, 0));
        let mut turns = 0;
        while walker.is_goal_reachable() {
            let legal = walker.legal_directions(3, 1, |_| true);
            match legal.first() {
                Some(&direction) => walker.move_to(direction),
                None => walker.move_back(),
            }
            turns += 1;
            assert!(turns < 100, "walker did not terminate");
        }

        assert_eq!(walker.position(), point(0, 0));
        assert!(walker.path().is_empty());
        assert!(turns <= 2 * 3, "took {} turns for 3 open cells", turns);
    }
}
