//! Adaptive local thresholding over disjoint tiles, run on a worker pool.
//!
//! The grid is cut into `(2r + 1)`-sided tiles (see [`TileGrid`]). Each tile
//! is thresholded against its own mean luminosity: pixels at or above the
//! mean become white, the rest black. Tiles are handed to a dedicated pool of
//! `threads` workers as disjoint mutable views into the output grid, so no
//! worker can observe or touch another tile's pixels and the result does not
//! depend on scheduling.

mod tile;

pub use tile::{Tile, TileGrid, tiles};

use std::panic::{self, AssertUnwindSafe};

use rayon::prelude::*;

use crate::error::{BmpError, try_reserve};
use crate::image::Image;
use crate::pixel::{Pixel, PixelBuffer};

const WHITE: u8 = 255;
const BLACK: u8 = 0;

/// Threshold `image` tile by tile using `threads` workers.
///
/// Blocks until every tile is done. Any worker failure fails the whole
/// call and no partial image is returned.
pub fn binarize(image: &Image, radius: u32, threads: usize) -> Result<Image, BmpError> {
    if threads == 0 {
        return Err(BmpError::InvalidParameter(
            "binarization needs at least one worker thread".into(),
        ));
    }
    let src = image.pixels();
    let grid = TileGrid::new(src.width(), src.height(), radius)?;

    let mut out = PixelBuffer::new(src.width(), src.height())?;
    out.pixels_mut().copy_from_slice(src.pixels());

    // Idle workers are never spawned.
    let workers = threads.min(grid.len());
    tracing::debug!(
        width = src.width(),
        height = src.height(),
        radius,
        tiles = grid.len(),
        workers,
        "binarizing"
    );

    let views = split_views(out.pixels_mut(), src.width(), &grid)?;
    run_tiles(workers, views, threshold_tile)?;

    tracing::debug!(tiles = grid.len(), "binarization complete");
    Image::derived(image.header(), out)
}

/// Run `op` over every view on a dedicated pool of `workers` threads.
///
/// A panicking worker is reported as [`BmpError::WorkerPool`].
fn run_tiles<'a, F>(workers: usize, views: Vec<TileView<'a>>, op: F) -> Result<(), BmpError>
where
    F: Fn(TileView<'a>) -> Result<(), BmpError> + Send + Sync,
{
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .thread_name(|i| format!("bmptile-binarize-{i}"))
        .build()
        .map_err(|e| BmpError::WorkerPool(e.to_string()))?;
    let run = || pool.install(|| views.into_par_iter().try_for_each(op));
    match panic::catch_unwind(AssertUnwindSafe(run)) {
        Ok(result) => result,
        Err(payload) => {
            let msg = payload
                .downcast_ref::<&str>()
                .map(|s| (*s).to_owned())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "unknown panic".into());
            tracing::error!(panic = %msg, "binarization worker panicked");
            Err(BmpError::WorkerPool(format!("worker panicked: {msg}")))
        }
    }
}

/// Mutable rows of one tile, borrowed out of the shared output grid.
struct TileView<'a> {
    tile: Tile,
    rows: Vec<&'a mut [Pixel]>,
}

/// Cut `pixels` into one view per tile, in [`TileGrid::iter`] order.
fn split_views<'a>(
    pixels: &'a mut [Pixel],
    width: u32,
    grid: &TileGrid,
) -> Result<Vec<TileView<'a>>, BmpError> {
    let mut views = Vec::new();
    try_reserve(&mut views, grid.len())?;
    for tile in grid.iter() {
        let mut rows = Vec::new();
        try_reserve(&mut rows, tile.height as usize)?;
        views.push(TileView { tile, rows });
    }

    let cols = grid.cols() as usize;
    let side = grid.side() as usize;
    for (y, row) in pixels.chunks_exact_mut(width as usize).enumerate() {
        let band = y / side;
        let mut rest = row;
        for view in &mut views[band * cols..(band + 1) * cols] {
            let (segment, tail) =
                core::mem::take(&mut rest).split_at_mut(view.tile.width as usize);
            view.rows.push(segment);
            rest = tail;
        }
        debug_assert!(rest.is_empty());
    }
    Ok(views)
}

fn threshold_tile(view: TileView<'_>) -> Result<(), BmpError> {
    let mut luma = Vec::new();
    try_reserve(&mut luma, view.tile.area() as usize)?;
    luma.extend(view.rows.iter().flat_map(|row| row.iter()).map(Pixel::luminosity));

    let sum: u64 = luma.iter().map(|&v| u64::from(v)).sum();
    let count = luma.len() as u64;

    // v >= sum / count, without the division
    let pixels = view.rows.into_iter().flatten();
    for (p, &v) in pixels.zip(&luma) {
        let level = if u64::from(v) * count >= sum { WHITE } else { BLACK };
        *p = p.with_value(level);
    }
    Ok(())
}
