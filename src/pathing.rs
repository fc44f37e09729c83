//! Depth first route finding from a maze's entrance to its exit.

use log::debug;

use crate::cells::{CompassPrimary, GridCoordinate};
use crate::errors::*;
use crate::grid::Grid;
use crate::sinks::{record_sink_failure, RenderSink};
use crate::utils::{self, FnvHashSet};

/// Directions in the order the solver tries them. Pushing east and south first heads towards the
/// exit, it does not change whether a path is found.
const SOLVE_DIRECTIONS: [CompassPrimary; 4] = [CompassPrimary::East,
                                               CompassPrimary::South,
                                               CompassPrimary::West,
                                               CompassPrimary::North];

#[derive(Debug)]
pub struct Solution {
    path: Vec<GridCoordinate>,
    moves: usize,
    undos: usize,
    sink_failures: Vec<Error>,
}

impl Solution {
    /// Did the search reach the exit?
    #[inline]
    pub fn is_found(&self) -> bool {
        !self.path.is_empty()
    }

    /// The cells from the start to the exit in walking order, empty if there is no route.
    #[inline]
    pub fn path(&self) -> &[GridCoordinate] {
        &self.path
    }

    /// Forward steps taken, including those later backed out of.
    #[inline]
    pub fn moves(&self) -> usize {
        self.moves
    }

    /// Steps backed out of from dead ends.
    #[inline]
    pub fn undos(&self) -> usize {
        self.undos
    }

    #[inline]
    pub fn sink_failures(&self) -> &[Error] {
        &self.sink_failures
    }

    pub fn on_path(&self) -> FnvHashSet<GridCoordinate> {
        let mut on_path = utils::fnv_hashset(self.path.len());
        on_path.extend(self.path.iter().cloned());
        on_path
    }
}

#[derive(Debug, Copy, Clone)]
struct Frame {
    coord: GridCoordinate,
    next_direction: usize,
}

impl Frame {
    fn new(coord: GridCoordinate) -> Frame {
        Frame {
            coord,
            next_direction: 0,
        }
    }
}

/// Depth first search from `start` to the grid's exit, only stepping between cells when
/// neither side of their shared boundary has a wall.
///
/// Each step into a neighbour is announced to the sink as a move. If everything beyond that
/// neighbour turns out to be a dead end the step is announced again as an undo and the next
/// direction is tried. Once the exit is reached nothing else is announced.
///
/// The walk keeps its own stack of frames instead of recursing, the frames still on the stack
/// when the exit is reached are the path.
///
/// Only the `explored` flags are used. They are cleared before the search starts and left set
/// on every cell the search entered afterwards.
///
/// Errors only if `start` is outside the grid. Not finding a route is a normal outcome, see
/// `Solution::is_found`.
pub fn solve<S: RenderSink>(grid: &mut Grid, start: GridCoordinate, mut sink: S) -> Result<Solution> {

    if !grid.is_valid_coordinate(start) {
        return Err(ErrorKind::OutOfBounds(start.row, start.column).into());
    }
    grid.clear_explored();

    let exit = grid.exit();
    let mut solution = Solution {
        path: vec![],
        moves: 0,
        undos: 0,
        sink_failures: vec![],
    };

    grid.cell_mut(start)?.mark_explored();
    let mut stack = vec![Frame::new(start)];
    let mut reached_exit = start == exit;

    while !reached_exit {

        let current = match stack.last_mut() {
            Some(frame) => frame,
            None => break,
        };
        let current_coord = current.coord;

        let mut step = None;
        while current.next_direction < SOLVE_DIRECTIONS.len() {
            let dir = SOLVE_DIRECTIONS[current.next_direction];
            current.next_direction += 1;
            if let Some(next) = open_unexplored_neighbour(grid, current_coord, dir) {
                step = Some(next);
                break;
            }
        }

        if let Some(next) = step {
            record_sink_failure(sink.path_move(grid.cell(current_coord)?, grid.cell(next)?, false),
                                &mut solution.sink_failures);
            solution.moves += 1;

            grid.cell_mut(next)?.mark_explored();
            stack.push(Frame::new(next));
            reached_exit = next == exit;
        } else {
            // Dead end, back out to the cell we came from.
            stack.pop();
            if let Some(parent) = stack.last() {
                record_sink_failure(sink.path_move(grid.cell(parent.coord)?,
                                                   grid.cell(current_coord)?,
                                                   true),
                                    &mut solution.sink_failures);
                solution.undos += 1;
            }
        }
    }

    if reached_exit {
        solution.path = stack.iter().map(|frame| frame.coord).collect();
    }
    debug!("solve from {} found: {}, path length {}, {} moves, {} undos",
           start, reached_exit, solution.path.len(), solution.moves, solution.undos);

    Ok(solution)
}

/// `solve` from the maze entrance.
pub fn solve_from_entrance<S: RenderSink>(grid: &mut Grid, sink: S) -> Result<Solution> {
    let entrance = grid.entrance();
    solve(grid, entrance, sink)
}

fn open_unexplored_neighbour(grid: &Grid,
                             coord: GridCoordinate,
                             dir: CompassPrimary)
                             -> Option<GridCoordinate> {
    let neighbour = grid.neighbour_at_direction(coord, dir)?;
    let (cell, neighbour_cell) = match (grid.cell(coord), grid.cell(neighbour)) {
        (Ok(cell), Ok(neighbour_cell)) => (cell, neighbour_cell),
        _ => return None,
    };

    let walled = cell.has_wall(dir) || neighbour_cell.has_wall(dir.opposite());
    if walled || neighbour_cell.is_explored() {
        None
    } else {
        Some(neighbour)
    }
}
