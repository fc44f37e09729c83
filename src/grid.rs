use bit_set::BitSet;
use petgraph::graph::{NodeIndex, UnGraph};
use smallvec::SmallVec;
use std::fmt;
use std::slice;

use crate::cells::{Cell, CompassPrimary, CoordinateOptionSmallVec, CoordinateSmallVec,
                   GridCoordinate};
use crate::errors::*;
use crate::units::{ColumnIndex, ColumnsCount, EdgesCount, NodesCount, RowIndex, RowsCount};

/// The cells adjacent to some cell, `None` where the cell is on the grid boundary.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct Neighbours {
    pub north: Option<GridCoordinate>,
    pub south: Option<GridCoordinate>,
    pub east: Option<GridCoordinate>,
    pub west: Option<GridCoordinate>,
}

impl Neighbours {
    #[inline]
    pub fn at(&self, dir: CompassPrimary) -> Option<GridCoordinate> {
        match dir {
            CompassPrimary::North => self.north,
            CompassPrimary::South => self.south,
            CompassPrimary::East => self.east,
            CompassPrimary::West => self.west,
        }
    }
}

/// A rectangular maze grid. The grid is the only owner of its cells, everyone else works
/// with `GridCoordinate`s or borrows.
#[derive(Clone, Eq, PartialEq)]
pub struct Grid {
    rows: RowsCount,
    columns: ColumnsCount,
    cells: Vec<Cell>,
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Grid :: rows: {:?}, columns: {:?}, passages: {}",
               self.rows, self.columns, self.passages_count())
    }
}

impl Grid {
    /// Creates a `rows` x `columns` grid where every cell has all four walls and nothing
    /// is visited.
    pub fn new(rows: RowsCount, columns: ColumnsCount) -> Result<Grid> {

        let (RowsCount(rows_count), ColumnsCount(columns_count)) = (rows, columns);
        if rows_count < 1 || columns_count < 1 {
            return Err(ErrorKind::InvalidDimensions(rows_count, columns_count).into());
        }
        let cells_count = rows_count.checked_mul(columns_count)
            .ok_or(ErrorKind::InvalidDimensions(rows_count, columns_count))?;

        let cells = (0..cells_count)
            .map(|index| Cell::new(GridCoordinate::from_row_major_index(index, columns)))
            .collect();

        Ok(Grid {
            rows,
            columns,
            cells,
        })
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn rows(&self) -> RowsCount {
        self.rows
    }

    #[inline]
    pub fn columns(&self) -> ColumnsCount {
        self.columns
    }

    /// Cell count and the largest number of interior passages the grid could hold.
    pub fn graph_size(&self) -> (NodesCount, EdgesCount) {
        let (RowsCount(rows), ColumnsCount(columns)) = (self.rows, self.columns);
        let edges_count = rows * (columns - 1) + columns * (rows - 1);
        (NodesCount(self.size()), EdgesCount(edges_count))
    }

    /// The top left cell, opened to the west.
    #[inline]
    pub fn entrance(&self) -> GridCoordinate {
        GridCoordinate::new(0, 0)
    }

    /// The bottom right cell, opened to the south.
    #[inline]
    pub fn exit(&self) -> GridCoordinate {
        GridCoordinate::new(self.rows.0 - 1, self.columns.0 - 1)
    }

    /// Is the grid coordinate valid for this grid - within the grid's dimensions
    #[inline]
    pub fn is_valid_coordinate(&self, coord: GridCoordinate) -> bool {
        coord.row < self.rows.0 && coord.column < self.columns.0
    }

    /// Convert a grid coordinate to a one dimensional index in the range 0...grid.size().
    /// Returns None if the grid coordinate is invalid.
    #[inline]
    pub fn coordinate_to_index(&self, coord: GridCoordinate) -> Option<usize> {
        if self.is_valid_coordinate(coord) {
            Some(coord.row * self.columns.0 + coord.column)
        } else {
            None
        }
    }

    pub fn cell(&self, coord: GridCoordinate) -> Result<&Cell> {
        match self.coordinate_to_index(coord) {
            Some(index) => Ok(&self.cells[index]),
            None => Err(ErrorKind::OutOfBounds(coord.row, coord.column).into()),
        }
    }

    pub fn cell_mut(&mut self, coord: GridCoordinate) -> Result<&mut Cell> {
        match self.coordinate_to_index(coord) {
            Some(index) => Ok(&mut self.cells[index]),
            None => Err(ErrorKind::OutOfBounds(coord.row, coord.column).into()),
        }
    }

    #[inline]
    pub fn cell_at(&self, row: RowIndex, column: ColumnIndex) -> Result<&Cell> {
        self.cell(GridCoordinate::from_row_column_indices(row, column))
    }

    /// All cells in row major order.
    #[inline]
    pub fn cells(&self) -> slice::Iter<Cell> {
        self.cells.iter()
    }

    /// Cells that are to the North, South, East or West of a particular cell, but not
    /// necessarily linked by a passage.
    pub fn neighbours(&self, coord: GridCoordinate) -> Neighbours {
        Neighbours {
            north: self.neighbour_at_direction(coord, CompassPrimary::North),
            south: self.neighbour_at_direction(coord, CompassPrimary::South),
            east: self.neighbour_at_direction(coord, CompassPrimary::East),
            west: self.neighbour_at_direction(coord, CompassPrimary::West),
        }
    }

    pub fn neighbours_at_directions(&self,
                                    coord: GridCoordinate,
                                    dirs: &[CompassPrimary])
                                    -> CoordinateOptionSmallVec {
        dirs.iter()
            .map(|direction| self.neighbour_at_direction(coord, *direction))
            .collect()
    }

    pub fn neighbour_at_direction(&self,
                                  coord: GridCoordinate,
                                  direction: CompassPrimary)
                                  -> Option<GridCoordinate> {
        if !self.is_valid_coordinate(coord) {
            return None;
        }
        direction.offset(coord)
                 .filter(|neighbour_coord| self.is_valid_coordinate(*neighbour_coord))
    }

    /// The direction to step in from `a` to reach its neighbour `b`.
    pub fn direction_between(&self, a: GridCoordinate, b: GridCoordinate) -> Option<CompassPrimary> {
        CompassPrimary::ALL.iter()
            .cloned()
            .find(|dir| self.neighbour_at_direction(a, *dir) == Some(b))
    }

    /// Carve a passage between two adjacent cells, clearing the wall on both sides.
    pub fn carve_passage(&mut self, a: GridCoordinate, b: GridCoordinate) -> Result<()> {
        let dir = self.checked_direction_between(a, b)?;
        self.cell_mut(a)?.remove_wall(dir);
        self.cell_mut(b)?.remove_wall(dir.opposite());
        Ok(())
    }

    /// Put back the wall between two cells, if the grid coordinates are valid neighbours and
    /// a passage exists between them.
    /// Returns true if a wall was rebuilt.
    pub fn rebuild_wall(&mut self, a: GridCoordinate, b: GridCoordinate) -> bool {
        if !self.is_linked(a, b) {
            return false;
        }
        if let Some(dir) = self.direction_between(a, b) {
            let a_index = self.coordinate_to_index(a);
            let b_index = self.coordinate_to_index(b);
            if let (Some(a_index), Some(b_index)) = (a_index, b_index) {
                self.cells[a_index].restore_wall(dir);
                self.cells[b_index].restore_wall(dir.opposite());
                return true;
            }
        }
        false
    }

    /// Are two cells in the grid joined by a passage? Both sides of the shared boundary must
    /// be wall free.
    pub fn is_linked(&self, a: GridCoordinate, b: GridCoordinate) -> bool {
        match (self.direction_between(a, b), self.cell(a), self.cell(b)) {
            (Some(dir), Ok(a_cell), Ok(b_cell)) => {
                !a_cell.has_wall(dir) && !b_cell.has_wall(dir.opposite())
            }
            _ => false,
        }
    }

    pub fn is_neighbour_linked(&self, coord: GridCoordinate, direction: CompassPrimary) -> bool {
        self.neighbour_at_direction(coord, direction)
            .map_or(false, |neighbour_coord| self.is_linked(coord, neighbour_coord))
    }

    /// Cells that are linked to a particular cell by a passage.
    pub fn links(&self, coord: GridCoordinate) -> Option<CoordinateSmallVec> {
        if self.is_valid_coordinate(coord) {
            let linked_cells = CompassPrimary::ALL.iter()
                .filter_map(|dir| self.neighbour_at_direction(coord, *dir))
                .filter(|neighbour_coord| self.is_linked(coord, *neighbour_coord))
                .collect();
            Some(linked_cells)
        } else {
            None
        }
    }

    /// Every passage exactly once, as (west or north cell, east or south cell) pairs in row
    /// major order of the first cell.
    pub fn iter_links<'a>(&'a self) -> impl Iterator<Item = (GridCoordinate, GridCoordinate)> + 'a {
        self.iter().flat_map(move |coord| {
            [CompassPrimary::East, CompassPrimary::South]
                .iter()
                .filter_map(|dir| self.neighbour_at_direction(coord, *dir))
                .filter(|neighbour_coord| self.is_linked(coord, *neighbour_coord))
                .map(|neighbour_coord| (coord, neighbour_coord))
                .collect::<SmallVec<[(GridCoordinate, GridCoordinate); 2]>>()
        })
    }

    /// Number of interior broken wall pairs. The entrance and exit openings are on the
    /// boundary and are not counted.
    pub fn passages_count(&self) -> usize {
        self.iter_links().count()
    }

    /// Remove the west wall of the entrance and the south wall of the exit. Neither opening
    /// has a neighbouring cell, so only one side of each boundary changes.
    pub fn open_entrance_and_exit(&mut self) {
        let entrance = self.entrance();
        let exit = self.exit();
        if let Ok(cell) = self.cell_mut(entrance) {
            cell.remove_wall(CompassPrimary::West);
        }
        if let Ok(cell) = self.cell_mut(exit) {
            cell.remove_wall(CompassPrimary::South);
        }
    }

    /// Clear the visited flags of both the generation and the path finding phases.
    pub fn reset_visited(&mut self) {
        for cell in &mut self.cells {
            cell.reset_visited();
        }
    }

    pub(crate) fn clear_explored(&mut self) {
        for cell in &mut self.cells {
            cell.clear_explored();
        }
    }

    /// The row major indices of every cell reachable through passages from `start`.
    pub fn reachable_from(&self, start: GridCoordinate) -> Result<BitSet> {
        let start_index = self.coordinate_to_index(start)
            .ok_or(ErrorKind::OutOfBounds(start.row, start.column))?;

        let mut reached = BitSet::with_capacity(self.size());
        reached.insert(start_index);
        let mut frontier = vec![start];
        while let Some(coord) = frontier.pop() {
            for link in self.links(coord).unwrap_or_default() {
                if let Some(link_index) = self.coordinate_to_index(link) {
                    if reached.insert(link_index) {
                        frontier.push(link);
                    }
                }
            }
        }
        Ok(reached)
    }

    /// The passages of the maze as an undirected graph. Node indices match
    /// `coordinate_to_index` and each node's weight is its coordinate.
    pub fn to_graph(&self) -> UnGraph<GridCoordinate, ()> {
        let (NodesCount(nodes), EdgesCount(edges)) = self.graph_size();
        let mut graph = UnGraph::with_capacity(nodes, edges);
        for coord in self.iter() {
            let _ = graph.add_node(coord);
        }
        for (a, b) in self.iter_links() {
            if let (Some(a_index), Some(b_index)) = (self.coordinate_to_index(a),
                                                     self.coordinate_to_index(b)) {
                let _ = graph.add_edge(NodeIndex::new(a_index), NodeIndex::new(b_index), ());
            }
        }
        graph
    }

    #[inline]
    pub fn iter(&self) -> CellIter {
        CellIter {
            columns: self.columns,
            current_cell_number: 0,
            cells_count: self.size(),
        }
    }

    pub fn iter_row(&self) -> impl Iterator<Item = Vec<GridCoordinate>> {
        let (RowsCount(rows), ColumnsCount(columns)) = (self.rows, self.columns);
        (0..rows).map(move |row| {
            (0..columns)
                .map(|column| {
                    GridCoordinate::from_row_column_indices(RowIndex(row), ColumnIndex(column))
                })
                .collect()
        })
    }

    fn checked_direction_between(&self,
                                 a: GridCoordinate,
                                 b: GridCoordinate)
                                 -> Result<CompassPrimary> {
        if !self.is_valid_coordinate(a) {
            return Err(ErrorKind::OutOfBounds(a.row, a.column).into());
        }
        if !self.is_valid_coordinate(b) {
            return Err(ErrorKind::OutOfBounds(b.row, b.column).into());
        }
        if a == b {
            return Err(ErrorKind::SelfLink.into());
        }
        self.direction_between(a, b).ok_or_else(|| ErrorKind::NotNeighbours.into())
    }
}

/// Row major iterator over the coordinates of a grid.
#[derive(Clone)]
pub struct CellIter {
    columns: ColumnsCount,
    current_cell_number: usize,
    cells_count: usize,
}

impl fmt::Debug for CellIter {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f,
               "CellIter :: current_cell_number: {:?}, cells_count: {:?}",
               self.current_cell_number,
               self.cells_count)
    }
}

impl ExactSizeIterator for CellIter {} // default impl using size_hint()
impl Iterator for CellIter {
    type Item = GridCoordinate;
    fn next(&mut self) -> Option<Self::Item> {
        if self.current_cell_number < self.cells_count {
            let coord = GridCoordinate::from_row_major_index(self.current_cell_number,
                                                             self.columns);
            self.current_cell_number += 1;
            Some(coord)
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let lower_bound = self.cells_count - self.current_cell_number;
        let upper_bound = lower_bound;
        (lower_bound, Some(upper_bound))
    }
}
