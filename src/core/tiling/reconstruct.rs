use ndarray::{Array3, ArrayView3, ArrayView4, s};
use tracing::debug;

use crate::core::tiling::grid::check_tile_shape;
use crate::error::{Error, Result};
use crate::types::{Image, Pixel};

/// Number of tiles a `rows x cols` grid needs, or an error if the grid is empty or overflows.
pub(crate) fn grid_len(rows: usize, cols: usize) -> Result<usize> {
    if rows == 0 || cols == 0 {
        return Err(Error::dimension(format!(
            "tile grid must have at least one row and column, got {}x{}",
            rows, cols
        )));
    }
    rows.checked_mul(cols).ok_or_else(|| {
        Error::shape_mismatch(format!("a {}x{} tile grid overflows usize", rows, cols))
    })
}

fn check_grid(len: usize, rows: usize, cols: usize) -> Result<()> {
    let expected = grid_len(rows, cols)?;
    if len != expected {
        return Err(Error::shape_mismatch(format!(
            "expected {} tiles for a {}x{} grid, got {}",
            expected, rows, cols, len
        )));
    }
    Ok(())
}

/// `(rows * ts, cols * ts)`, checked before the output is allocated.
fn output_dim(rows: usize, cols: usize, ts: usize) -> Result<(usize, usize)> {
    match (rows.checked_mul(ts), cols.checked_mul(ts)) {
        (Some(h), Some(w)) => Ok((h, w)),
        _ => Err(Error::shape_mismatch(format!(
            "a {}x{} grid of {}px tiles overflows usize",
            rows, cols, ts
        ))),
    }
}

/// Copy a `(C, ts, ts)` tile into its slot of the channel-last output.
fn place_tile<T: Pixel>(out: &mut Array3<T>, idx: usize, cols: usize, tile: ArrayView3<'_, T>) {
    let ts = tile.dim().1;
    let (r, c) = (idx / cols, idx % cols);
    let (y, x) = (r * ts, c * ts);
    out.slice_mut(s![y..y + ts, x..x + ts, ..])
        .assign(&tile.permuted_axes([1, 2, 0]));
}

/// Stitch an `(N, C, ts, ts)` batch in row-major order back into a
/// `(rows * ts, cols * ts, C)` image.
pub fn assemble<T: Pixel>(batch: ArrayView4<'_, T>, rows: usize, cols: usize) -> Result<Image<T>> {
    let (len, channels, tile_h, tile_w) = batch.dim();
    check_grid(len, rows, cols)?;
    check_tile_shape(channels, tile_h, tile_w)?;
    let (height, width) = output_dim(rows, cols, tile_h)?;

    debug!(
        "Assembling {} tiles into {}x{}x{}",
        len, height, width, channels
    );
    let mut out = Array3::<T>::default((height, width, channels));
    for (idx, tile) in batch.outer_iter().enumerate() {
        place_tile(&mut out, idx, cols, tile);
    }
    Ok(out)
}

/// Same as [`assemble`] for tiles held separately. Every tile is checked before any is copied.
pub fn assemble_tiles<T: Pixel>(tiles: &[Array3<T>], rows: usize, cols: usize) -> Result<Image<T>> {
    check_grid(tiles.len(), rows, cols)?;
    let expected = tiles[0].dim();
    check_tile_shape(expected.0, expected.1, expected.2)?;
    if let Some((idx, tile)) = tiles.iter().enumerate().find(|(_, t)| t.dim() != expected) {
        return Err(Error::shape_mismatch(format!(
            "tile {} has shape {:?}, expected {:?}",
            idx,
            tile.dim(),
            expected
        )));
    }

    let (channels, ts, _) = expected;
    let (height, width) = output_dim(rows, cols, ts)?;
    let mut out = Array3::<T>::default((height, width, channels));
    for (idx, tile) in tiles.iter().enumerate() {
        place_tile(&mut out, idx, cols, tile.view());
    }
    Ok(out)
}
