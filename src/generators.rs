use log::{debug, trace};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::cells::{CompassPrimary, CoordinateSmallVec, GridCoordinate};
use crate::errors::*;
use crate::grid::Grid;
use crate::sinks::{record_sink_failure, RenderSink};
use crate::units::{ColumnsCount, RowsCount};

/// The random source mazes are generated with. ChaCha output is portable, so a seed gives the
/// same maze on every platform.
pub type MazeRng = ChaCha8Rng;

/// Order in which uncarved neighbours become carving candidates: left, right, up, down.
/// The order only matters for reproducing a maze from a seed.
const CARVE_DIRECTIONS: [CompassPrimary; 4] = [CompassPrimary::West,
                                               CompassPrimary::East,
                                               CompassPrimary::North,
                                               CompassPrimary::South];

/// An rng seeded with `seed`, or from system entropy when there is no seed.
pub fn seeded_rng(seed: Option<u64>) -> MazeRng {
    match seed {
        Some(s) => MazeRng::seed_from_u64(s),
        None => MazeRng::from_entropy(),
    }
}

/// What a run of the maze generator did.
#[derive(Debug)]
pub struct Carving {
    passages_carved: usize,
    cells_carved: usize,
    sink_failures: Vec<Error>,
}

impl Carving {
    #[inline]
    pub fn passages_carved(&self) -> usize {
        self.passages_carved
    }

    #[inline]
    pub fn cells_carved(&self) -> usize {
        self.cells_carved
    }

    /// Notifications the render sink rejected. The maze is carved regardless.
    #[inline]
    pub fn sink_failures(&self) -> &[Error] {
        &self.sink_failures
    }
}

/// Apply the recursive backtracker maze generation algorithm to the grid.
///
/// A randomised depth first walk: from the current cell pick any uncarved neighbour at random,
/// carve a passage to it and carry on from there. When a cell has no uncarved neighbours left the
/// walk backs up to the previous cell, which may still have other uncarved neighbours, so
/// passages branch. The walk ends when it has backed all the way out of `start`, by which
/// point every cell reachable from `start` has been carved into one spanning tree - a
/// perfect maze.
///
/// The sink hears about each cell once, as the walk backs out of it with its walls final.
///
/// The walk uses its own stack rather than recursion, on a long serpentine corridor the depth
/// reaches the cell count of the grid. The rng is consumed in the same order the recursive
/// formulation would consume it.
///
/// Only the `carved` flags are read and written. Resetting them afterwards is up to the
/// caller, see `Grid::reset_visited`.
pub fn recursive_backtracker<R, S>(grid: &mut Grid,
                                   rng: &mut R,
                                   start: GridCoordinate,
                                   mut sink: S)
                                   -> Result<Carving>
    where R: Rng + ?Sized,
          S: RenderSink
{
    grid.cell_mut(start)?.mark_carved();

    let mut carving = Carving {
        passages_carved: 0,
        cells_carved: 1,
        sink_failures: vec![],
    };
    let mut stack = vec![start];

    while let Some(&current) = stack.last() {

        let candidates = uncarved_neighbours(grid, current);

        if let Some(&next) = candidates.choose(rng) {
            grid.carve_passage(current, next)?;
            grid.cell_mut(next)?.mark_carved();
            trace!("carved {} -> {}", current, next);

            carving.passages_carved += 1;
            carving.cells_carved += 1;
            stack.push(next);
        } else {
            // Dead end
            let cell = grid.cell(current)?;
            record_sink_failure(sink.cell_walls_changed(cell), &mut carving.sink_failures);
            stack.pop();
        }
    }

    debug!("recursive backtracker from {} carved {} passages over {} cells",
           start, carving.passages_carved, carving.cells_carved);
    Ok(carving)
}

fn uncarved_neighbours(grid: &Grid, coord: GridCoordinate) -> CoordinateSmallVec {
    grid.neighbours_at_directions(coord, &CARVE_DIRECTIONS)
        .into_iter()
        .filter_map(|neighbour_opt| neighbour_opt)
        .filter(|neighbour| grid.cell(*neighbour).map_or(false, |cell| !cell.is_carved()))
        .collect()
}

/// Build a complete maze: a fresh grid with its entrance and exit opened, carved from the
/// entrance and with every visited flag reset ready for solving.
pub fn generate<S: RenderSink>(rows: RowsCount,
                               columns: ColumnsCount,
                               seed: Option<u64>,
                               sink: S)
                               -> Result<(Grid, Carving)> {

    let mut rng = seeded_rng(seed);
    generate_with_rng(rows, columns, &mut rng, sink)
}

/// `generate` drawing from a caller's rng. The rng is left where carving stopped, so further
/// random choices on the maze carry on the same stream instead of replaying it.
pub fn generate_with_rng<R, S>(rows: RowsCount,
                               columns: ColumnsCount,
                               rng: &mut R,
                               sink: S)
                               -> Result<(Grid, Carving)>
    where R: Rng + ?Sized,
          S: RenderSink
{
    let mut grid = Grid::new(rows, columns)?;

    grid.open_entrance_and_exit();
    let entrance = grid.entrance();
    let carving = recursive_backtracker(&mut grid, rng, entrance, sink)?;
    grid.reset_visited();

    Ok((grid, carving))
}

/// Randomly pick up to `count` existing passages and wall them off again.
/// A perfect maze loses its connectivity but never gains a loop.
/// Returns the number of walls rebuilt.
pub fn rebuild_random_walls<R: Rng + ?Sized>(grid: &mut Grid, count: usize, rng: &mut R) -> usize {
    let passages = grid.iter_links().collect::<Vec<_>>();
    let chosen = passages.choose_multiple(rng, count)
                         .cloned()
                         .collect::<Vec<_>>();

    let rebuilt = chosen.into_iter()
                        .filter(|&(a, b)| grid.rebuild_wall(a, b))
                        .count();
    debug!("rebuilt {} of {} requested walls", rebuilt, count);
    rebuilt
}
