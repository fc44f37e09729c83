use backtrack_mazes::{
    cells::GridCoordinate,
    generators,
    grid::Grid,
    sinks::NoopSink,
    units::{ColumnsCount, RowsCount},
};
use criterion::{criterion_group, criterion_main, Criterion};

fn bench_grid_11(c: &mut Criterion) {
    c.bench_function("grid_11", |b| {
        b.iter(|| Grid::new(RowsCount(11), ColumnsCount(11)).unwrap())
    });
}

fn bench_grid_500(c: &mut Criterion) {
    c.bench_function("grid_500", |b| {
        b.iter(|| Grid::new(RowsCount(500), ColumnsCount(500)).unwrap())
    });
}

fn bench_index_to_gridcoordinate(c: &mut Criterion) {
    let g = Grid::new(RowsCount(11), ColumnsCount(11)).unwrap();
    let columns = g.columns();
    c.bench_function("index_to_gridcoordinate", move |b| {
        b.iter(|| GridCoordinate::from_row_major_index(93, columns))
    });
}

fn bench_neighbours_corner_of_grid(c: &mut Criterion) {
    let g = Grid::new(RowsCount(11), ColumnsCount(11)).unwrap();
    let corner = GridCoordinate::new(0, 0);
    c.bench_function("neighbours_corner_of_grid", move |b| b.iter(|| g.neighbours(corner)));
}

fn bench_neighbours_middle_of_grid(c: &mut Criterion) {
    let g = Grid::new(RowsCount(11), ColumnsCount(11)).unwrap();
    let mid = GridCoordinate::new(5, 5);
    c.bench_function("neighbours_middle_of_grid", move |b| b.iter(|| g.neighbours(mid)));
}

fn bench_links_middle_of_maze(c: &mut Criterion) {
    let (g, _) = generators::generate(RowsCount(11), ColumnsCount(11), Some(11), NoopSink).unwrap();
    let mid = GridCoordinate::new(5, 5);
    c.bench_function("links_middle_of_maze", move |b| b.iter(|| g.links(mid)));
}

criterion_group!(
    benches,
    bench_grid_11,
    bench_grid_500,
    bench_index_to_gridcoordinate,
    bench_neighbours_corner_of_grid,
    bench_neighbours_middle_of_grid,
    bench_links_middle_of_maze
);
criterion_main!(benches);
