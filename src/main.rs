use backtrack_mazes::{
    generators,
    grid::Grid,
    pathing,
    sinks::{LoggingSink, NoopSink, RenderSink},
    units,
};
use docopt::Docopt;
use log::{info, warn};
use serde_derive::Deserialize;
use std::{
    fs::File,
    io,
    io::prelude::*,
};

const USAGE: &str = "Backtrack Mazes

Usage:
    maze_driver -h | --help
    maze_driver [--rows=<r>] [--columns=<c>] [--seed=<s>] [--block-passages=<n>] [--save-edges=<path>] [--show-path] [--trace-events]

Options:
    -h --help              Show this screen.
    --rows=<r>             The number of rows in the maze [default: 10].
    --columns=<c>          The number of columns in the maze [default: 10].
    --seed=<s>             Seed for the maze generator. Without a seed every run makes a different maze.
    --block-passages=<n>   After carving, randomly choose n passages to wall off again.
    --save-edges=<path>    Serialize the maze to a text file: each line is a pair of numbers. Line 1: n(#vertices) m(#edges). Line 2+ edge between vertices. Uses 1-based vertex indices.
    --show-path            Print every cell on the path from the entrance to the exit.
    --trace-events         Log each render notification, visible with RUST_LOG=trace.
";
#[derive(Debug, Deserialize)]
struct MazeArgs {
    flag_rows: usize,
    flag_columns: usize,
    flag_seed: Option<u64>,
    flag_block_passages: Option<usize>,
    flag_save_edges: String,
    flag_show_path: bool,
    flag_trace_events: bool,
}

mod errors {
    use error_chain::*;
    error_chain! {

        links {
            Maze(::backtrack_mazes::errors::Error, ::backtrack_mazes::errors::ErrorKind);
        }

        foreign_links {
            Io(::std::io::Error);
        }
    }
}
use crate::errors::*;

fn main() -> Result<()> {

    env_logger::init();

    let args: MazeArgs = Docopt::new(USAGE)
        .and_then(|d| d.deserialize())
        .unwrap_or_else(|e| e.exit());

    let mut logging_sink = LoggingSink;
    let mut quiet_sink = NoopSink;
    let sink: &mut dyn RenderSink = if args.flag_trace_events {
        &mut logging_sink
    } else {
        &mut quiet_sink
    };

    let mut rng = generators::seeded_rng(args.flag_seed);
    let (mut maze_grid, carving) = generators::generate_with_rng(units::RowsCount(args.flag_rows),
                                                                 units::ColumnsCount(args.flag_columns),
                                                                 &mut rng,
                                                                 &mut *sink)?;
    info!("carved {} passages over {} cells", carving.passages_carved(), carving.cells_carved());

    if let Some(wall_count) = args.flag_block_passages {
        let rebuilt = generators::rebuild_random_walls(&mut maze_grid, wall_count, &mut rng);
        info!("walled off {} passages", rebuilt);
    }

    if !args.flag_save_edges.is_empty() {
        save_maze_graph(&maze_grid, &args.flag_save_edges)?;
    }

    let solution = pathing::solve_from_entrance(&mut maze_grid, &mut *sink)?;
    let sink_failures = carving.sink_failures().len() + solution.sink_failures().len();
    if sink_failures > 0 {
        warn!("{} render notifications failed", sink_failures);
    }

    if solution.is_found() {
        let explored = maze_grid.cells().filter(|cell| cell.is_explored()).count();
        println!("Path found: {} cells long, {} cells explored, {} moves, {} backtracked",
                 solution.path().len(),
                 explored,
                 solution.moves(),
                 solution.undos());

        if args.flag_show_path {
            for coord in solution.path() {
                println!("{}", coord);
            }
        }
    } else {
        let reachable = maze_grid.reachable_from(maze_grid.entrance())?.len();
        println!("No path from {} to {}: {} of {} cells reachable from the entrance",
                 maze_grid.entrance(),
                 maze_grid.exit(),
                 reachable,
                 maze_grid.size());
    }

    Ok(())
}

fn write_text_to_file(data: &str, file_name: &str) -> io::Result<()> {
    let mut f = File::create(file_name)?;
    f.write_all(data.as_bytes())?;
    Ok(())
}

fn save_maze_graph(maze_grid: &Grid, file_path: &str) -> Result<()> {

    let mut graph_data = String::new();
    let vertices_count = maze_grid.size();
    let edges_count = maze_grid.passages_count();
    graph_data.push_str(vertices_count.to_string().as_ref());
    graph_data.push(' ');
    graph_data.push_str(edges_count.to_string().as_ref());
    graph_data.push('\n');

    for (src, dst) in maze_grid.iter_links() {
        let (index_a, index_b) = match (maze_grid.coordinate_to_index(src),
                                        maze_grid.coordinate_to_index(dst)) {
            (Some(a), Some(b)) => (a, b),
            _ => continue,
        };
        let src_as_1_based_index = index_a + 1;
        let dst_as_1_based_index = index_b + 1;

        graph_data.push_str(src_as_1_based_index.to_string().as_ref());
        graph_data.push(' ');
        graph_data.push_str(dst_as_1_based_index.to_string().as_ref());
        graph_data.push('\n');
    }

    write_text_to_file(&graph_data, file_path)
        .chain_err(|| format!("Failed to write maze graph to text file {}", file_path))?;

    Ok(())
}
