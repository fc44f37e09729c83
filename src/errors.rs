//! The crate error type.
//!
//! `error_chain!` creates the `Error`, `ErrorKind`, `ResultExt` and `Result` types.
//! Other modules `use crate::errors::*;` to get at all of them.

use error_chain::*;

error_chain! {

    errors {
        InvalidDimensions(rows: usize, columns: usize) {
            description("invalid grid dimensions")
            display("invalid grid dimensions {} x {}: rows and columns must both be at least 1",
                    rows, columns)
        }

        OutOfBounds(row: usize, column: usize) {
            description("grid coordinate out of bounds")
            display("grid coordinate (row {}, column {}) is outside the grid", row, column)
        }

        SelfLink {
            description("a cell cannot be linked to itself")
        }

        NotNeighbours {
            description("only adjacent cells can share a passage")
        }

        RenderSink(reason: String) {
            description("render sink notification failed")
            display("render sink notification failed: {}", reason)
        }
    }
}
