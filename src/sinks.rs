//! Render sinks receive notifications as a maze is carved and solved.
//!
//! Nothing in the generator or solver depends on what a sink does with a notification, a
//! `NoopSink` produces exactly the same maze and path as any other sink.

use log::{trace, warn};

use crate::cells::{Cell, GridCoordinate, Walls};
use crate::errors::*;

pub trait RenderSink {
    /// The final wall configuration of a cell is known.
    fn cell_walls_changed(&mut self, cell: &Cell) -> Result<()>;

    /// The solver stepped from one cell into an adjacent one, or backed out of that step
    /// when `undo` is set.
    fn path_move(&mut self, from: &Cell, to: &Cell, undo: bool) -> Result<()>;
}

impl<'a, S: RenderSink + ?Sized> RenderSink for &'a mut S {
    #[inline]
    fn cell_walls_changed(&mut self, cell: &Cell) -> Result<()> {
        (**self).cell_walls_changed(cell)
    }

    #[inline]
    fn path_move(&mut self, from: &Cell, to: &Cell, undo: bool) -> Result<()> {
        (**self).path_move(from, to, undo)
    }
}

/// Keep a failed notification for the caller instead of aborting the traversal that sent it.
pub(crate) fn record_sink_failure(result: Result<()>, failures: &mut Vec<Error>) {
    if let Err(e) = result {
        warn!("render sink notification failed: {}", e);
        failures.push(e);
    }
}

#[derive(Debug, Default, Copy, Clone)]
pub struct NoopSink;

impl RenderSink for NoopSink {
    #[inline]
    fn cell_walls_changed(&mut self, _: &Cell) -> Result<()> {
        Ok(())
    }

    #[inline]
    fn path_move(&mut self, _: &Cell, _: &Cell, _: bool) -> Result<()> {
        Ok(())
    }
}

/// Writes every notification to the `trace` log level.
#[derive(Debug, Default, Copy, Clone)]
pub struct LoggingSink;

impl RenderSink for LoggingSink {
    fn cell_walls_changed(&mut self, cell: &Cell) -> Result<()> {
        trace!("cell {} walls {:?}", cell.coordinate(), cell.walls());
        Ok(())
    }

    fn path_move(&mut self, from: &Cell, to: &Cell, undo: bool) -> Result<()> {
        if undo {
            trace!("undo move {} -> {}", from.coordinate(), to.coordinate());
        } else {
            trace!("move {} -> {}", from.coordinate(), to.coordinate());
        }
        Ok(())
    }
}

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum SinkEvent {
    CellWallsChanged {
        cell: GridCoordinate,
        walls: Walls,
    },
    PathMoveAttempted {
        from: GridCoordinate,
        to: GridCoordinate,
        undo: bool,
    },
}

/// Keeps every notification in arrival order.
#[derive(Debug, Default, Clone)]
pub struct RecordingSink {
    events: Vec<SinkEvent>,
}

impl RecordingSink {
    pub fn new() -> RecordingSink {
        RecordingSink::default()
    }

    #[inline]
    pub fn events(&self) -> &[SinkEvent] {
        &self.events
    }

    pub fn into_events(self) -> Vec<SinkEvent> {
        self.events
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    /// Count of forward solver moves.
    pub fn moves(&self) -> usize {
        self.count_path_moves(false)
    }

    /// Count of backtracked solver moves.
    pub fn undos(&self) -> usize {
        self.count_path_moves(true)
    }

    fn count_path_moves(&self, is_undo: bool) -> usize {
        self.events
            .iter()
            .filter(|event| match **event {
                SinkEvent::PathMoveAttempted { undo, .. } => undo == is_undo,
                _ => false,
            })
            .count()
    }
}

impl RenderSink for RecordingSink {
    fn cell_walls_changed(&mut self, cell: &Cell) -> Result<()> {
        self.events.push(SinkEvent::CellWallsChanged {
            cell: cell.coordinate(),
            walls: cell.walls(),
        });
        Ok(())
    }

    fn path_move(&mut self, from: &Cell, to: &Cell, undo: bool) -> Result<()> {
        self.events.push(SinkEvent::PathMoveAttempted {
            from: from.coordinate(),
            to: to.coordinate(),
            undo,
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {

    use super::*;
    use crate::cells::CompassPrimary;

    #[test]
    fn recording_sink_keeps_order() {
        let a = Cell::new(GridCoordinate::new(0, 0));
        let mut b = Cell::new(GridCoordinate::new(0, 1));
        b.remove_wall(CompassPrimary::West);

        let mut sink = RecordingSink::new();
        sink.cell_walls_changed(&b).unwrap();
        sink.path_move(&a, &b, false).unwrap();
        sink.path_move(&a, &b, true).unwrap();

        let mut expected_walls = Walls::all();
        expected_walls.remove(CompassPrimary::West);
        assert_eq!(sink.events(),
                   &[SinkEvent::CellWallsChanged { cell: b.coordinate(), walls: expected_walls },
                     SinkEvent::PathMoveAttempted { from: a.coordinate(), to: b.coordinate(), undo: false },
                     SinkEvent::PathMoveAttempted { from: a.coordinate(), to: b.coordinate(), undo: true }]);
        assert_eq!(sink.moves(), 1);
        assert_eq!(sink.undos(), 1);

        sink.clear();
        assert!(sink.events().is_empty());
    }

    #[test]
    fn sinks_through_mutable_references() {
        fn notify<S: RenderSink>(mut sink: S, cell: &Cell) -> Result<()> {
            sink.cell_walls_changed(cell)
        }
        let cell = Cell::new(GridCoordinate::new(3, 3));
        let mut recording = RecordingSink::new();
        notify(&mut recording, &cell).unwrap();
        notify(&mut recording, &cell).unwrap();
        assert_eq!(recording.into_events().len(), 2);

        assert!(notify(NoopSink, &cell).is_ok());
        assert!(notify(LoggingSink, &cell).is_ok());
    }
}
