use smallvec::SmallVec;
use std::convert::From;
use std::fmt;

use crate::units::{ColumnIndex, ColumnsCount, RowIndex};

/// Identity of a cell: its row (0 is the top) and its column (0 is the west edge).
#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug, Ord, PartialOrd)]
pub struct GridCoordinate {
    pub row: usize,
    pub column: usize,
}

pub type CoordinateSmallVec = SmallVec<[GridCoordinate; 4]>;
pub type CoordinateOptionSmallVec = SmallVec<[Option<GridCoordinate>; 4]>;
pub type DirectionSmallVec = SmallVec<[CompassPrimary; 4]>;

impl GridCoordinate {
    pub fn new(row: usize, column: usize) -> GridCoordinate {
        GridCoordinate { row, column }
    }

    #[inline]
    pub fn from_row_column_indices(row_index: RowIndex, col_index: ColumnIndex) -> GridCoordinate {
        let (RowIndex(row), ColumnIndex(column)) = (row_index, col_index);
        GridCoordinate::new(row, column)
    }

    #[inline]
    pub fn from_row_major_index(index: usize, columns: ColumnsCount) -> GridCoordinate {
        let ColumnsCount(width) = columns;
        GridCoordinate::new(index / width, index % width)
    }
}

impl From<(usize, usize)> for GridCoordinate {
    fn from(row_column_pair: (usize, usize)) -> GridCoordinate {
        GridCoordinate::new(row_column_pair.0, row_column_pair.1)
    }
}

impl fmt::Display for GridCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.column)
    }
}

#[derive(Eq, PartialEq, Copy, Clone, Debug, Hash)]
pub enum CompassPrimary {
    North,
    South,
    East,
    West,
}

impl CompassPrimary {
    pub const ALL: [CompassPrimary; 4] = [CompassPrimary::North,
                                          CompassPrimary::South,
                                          CompassPrimary::East,
                                          CompassPrimary::West];

    pub fn opposite(self) -> CompassPrimary {
        match self {
            CompassPrimary::North => CompassPrimary::South,
            CompassPrimary::South => CompassPrimary::North,
            CompassPrimary::East => CompassPrimary::West,
            CompassPrimary::West => CompassPrimary::East,
        }
    }

    /// The coordinate one cell away in this direction.
    /// Returns None if the coordinate is not representable (e.g. north of row 0), it is up to
    /// the grid to decide if a representable coordinate is actually inside it.
    pub fn offset(self, coord: GridCoordinate) -> Option<GridCoordinate> {
        let GridCoordinate { row, column } = coord;
        match self {
            CompassPrimary::North => row.checked_sub(1).map(|r| GridCoordinate::new(r, column)),
            CompassPrimary::South => row.checked_add(1).map(|r| GridCoordinate::new(r, column)),
            CompassPrimary::East => column.checked_add(1).map(|c| GridCoordinate::new(row, c)),
            CompassPrimary::West => column.checked_sub(1).map(|c| GridCoordinate::new(row, c)),
        }
    }

    #[inline]
    fn wall_bit(self) -> u8 {
        match self {
            CompassPrimary::North => 0b0001,
            CompassPrimary::South => 0b0010,
            CompassPrimary::East => 0b0100,
            CompassPrimary::West => 0b1000,
        }
    }
}

/// The four wall flags of a cell, one bit per `CompassPrimary`.
#[derive(Eq, PartialEq, Copy, Clone, Hash)]
pub struct Walls(u8);

impl Walls {
    pub fn all() -> Walls {
        Walls(0b1111)
    }

    pub fn none() -> Walls {
        Walls(0)
    }

    #[inline]
    pub fn has(self, dir: CompassPrimary) -> bool {
        self.0 & dir.wall_bit() != 0
    }

    #[inline]
    pub fn insert(&mut self, dir: CompassPrimary) {
        self.0 |= dir.wall_bit();
    }

    #[inline]
    pub fn remove(&mut self, dir: CompassPrimary) {
        self.0 &= !dir.wall_bit();
    }

    pub fn count(self) -> usize {
        self.0.count_ones() as usize
    }

    /// The directions that still have a wall, in `CompassPrimary::ALL` order.
    pub fn directions(self) -> DirectionSmallVec {
        CompassPrimary::ALL.iter()
            .cloned()
            .filter(|dir| self.has(*dir))
            .collect()
    }
}

impl Default for Walls {
    fn default() -> Walls {
        Walls::all()
    }
}

impl fmt::Debug for Walls {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Walls {:?}", &*self.directions())
    }
}

/// A single grid unit.
///
/// The visited state is split by phase: `carved` belongs to maze generation and `explored`
/// to path finding, so neither phase can be confused by flags left over from the other.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Cell {
    coord: GridCoordinate,
    walls: Walls,
    carved: bool,
    explored: bool,
}

impl Cell {
    pub(crate) fn new(coord: GridCoordinate) -> Cell {
        Cell {
            coord,
            walls: Walls::all(),
            carved: false,
            explored: false,
        }
    }

    #[inline]
    pub fn coordinate(&self) -> GridCoordinate {
        self.coord
    }

    #[inline]
    pub fn row(&self) -> usize {
        self.coord.row
    }

    #[inline]
    pub fn column(&self) -> usize {
        self.coord.column
    }

    #[inline]
    pub fn walls(&self) -> Walls {
        self.walls
    }

    #[inline]
    pub fn has_wall(&self, dir: CompassPrimary) -> bool {
        self.walls.has(dir)
    }

    /// Reached by the maze generator.
    #[inline]
    pub fn is_carved(&self) -> bool {
        self.carved
    }

    /// Entered by the path finder.
    #[inline]
    pub fn is_explored(&self) -> bool {
        self.explored
    }

    /// Visited in either phase.
    #[inline]
    pub fn is_visited(&self) -> bool {
        self.carved || self.explored
    }

    pub(crate) fn mark_carved(&mut self) {
        self.carved = true;
    }

    pub(crate) fn mark_explored(&mut self) {
        self.explored = true;
    }

    pub(crate) fn clear_explored(&mut self) {
        self.explored = false;
    }

    pub(crate) fn reset_visited(&mut self) {
        self.carved = false;
        self.explored = false;
    }

    pub(crate) fn remove_wall(&mut self, dir: CompassPrimary) {
        self.walls.remove(dir);
    }

    pub(crate) fn restore_wall(&mut self, dir: CompassPrimary) {
        self.walls.insert(dir);
    }
}

#[cfg(test)]
mod tests {

    use super::*;
    use std::usize;

    #[test]
    fn opposite_directions() {
        for dir in CompassPrimary::ALL.iter() {
            assert_ne!(dir.opposite(), *dir);
            assert_eq!(dir.opposite().opposite(), *dir);
        }
        assert_eq!(CompassPrimary::North.opposite(), CompassPrimary::South);
        assert_eq!(CompassPrimary::East.opposite(), CompassPrimary::West);
    }

    #[test]
    fn offsets() {
        let gc = |r, c| GridCoordinate::new(r, c);
        assert_eq!(CompassPrimary::North.offset(gc(0, 0)), None);
        assert_eq!(CompassPrimary::West.offset(gc(0, 0)), None);
        assert_eq!(CompassPrimary::South.offset(gc(0, 0)), Some(gc(1, 0)));
        assert_eq!(CompassPrimary::East.offset(gc(0, 0)), Some(gc(0, 1)));
        assert_eq!(CompassPrimary::North.offset(gc(3, 2)), Some(gc(2, 2)));
        assert_eq!(CompassPrimary::West.offset(gc(3, 2)), Some(gc(3, 1)));
        assert_eq!(CompassPrimary::South.offset(gc(usize::MAX, 0)), None);
        assert_eq!(CompassPrimary::East.offset(gc(0, usize::MAX)), None);
    }

    #[test]
    fn row_major_index() {
        let columns = ColumnsCount(3);
        assert_eq!(GridCoordinate::from_row_major_index(0, columns), GridCoordinate::new(0, 0));
        assert_eq!(GridCoordinate::from_row_major_index(2, columns), GridCoordinate::new(0, 2));
        assert_eq!(GridCoordinate::from_row_major_index(3, columns), GridCoordinate::new(1, 0));
        assert_eq!(GridCoordinate::from_row_major_index(8, columns), GridCoordinate::new(2, 2));
    }

    #[test]
    fn walls_are_independent() {
        let mut walls = Walls::all();
        assert_eq!(walls.count(), 4);

        walls.remove(CompassPrimary::East);
        assert!(!walls.has(CompassPrimary::East));
        assert!(walls.has(CompassPrimary::North));
        assert!(walls.has(CompassPrimary::South));
        assert!(walls.has(CompassPrimary::West));
        assert_eq!(&*walls.directions(),
                   &[CompassPrimary::North, CompassPrimary::South, CompassPrimary::West]);

        walls.remove(CompassPrimary::East);
        assert_eq!(walls.count(), 3);

        walls.insert(CompassPrimary::East);
        assert_eq!(walls, Walls::all());
        assert_eq!(Walls::none().count(), 0);
    }

    #[test]
    fn new_cell_is_fully_walled_and_unvisited() {
        let cell = Cell::new(GridCoordinate::new(2, 5));
        assert_eq!(cell.row(), 2);
        assert_eq!(cell.column(), 5);
        assert_eq!(cell.walls(), Walls::all());
        assert!(!cell.is_carved());
        assert!(!cell.is_explored());
        assert!(!cell.is_visited());
    }

    #[test]
    fn visited_flags_are_per_phase() {
        let mut cell = Cell::new(GridCoordinate::new(0, 0));
        cell.mark_carved();
        assert!(cell.is_visited());
        assert!(!cell.is_explored());

        cell.mark_explored();
        cell.clear_explored();
        assert!(cell.is_carved());
        assert!(!cell.is_explored());

        cell.mark_explored();
        cell.reset_visited();
        assert!(!cell.is_visited());
    }
}
