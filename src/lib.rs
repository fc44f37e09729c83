//! **backtrack_mazes** carves perfect mazes with a randomised recursive backtracker and finds a
//! route from the entrance to the exit with a depth first search.
//!
//! Drawing is left to whoever implements `sinks::RenderSink`.

#![recursion_limit = "1024"]

pub mod cells;
pub mod errors;
pub mod generators;
pub mod grid;
pub mod pathing;
pub mod sinks;
pub mod units;
mod utils;
