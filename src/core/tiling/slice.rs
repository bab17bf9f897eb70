use ndarray::ArrayView3;
use tracing::info;

use crate::core::tiling::crop::{crop_by_edges, ensure_non_empty};
use crate::core::tiling::grid::TileGrid;
use crate::core::tiling::padding::pad_to_tile_multiple;
use crate::error::{Error, Result};
use crate::types::{BoundingBox, CropMode, Pixel};

/// Output of the forward path. `rows` and `cols` must be handed back to reconstruction.
#[derive(Debug, Clone)]
pub struct SlicedImage<T> {
    pub tiles: TileGrid<T>,
    pub rows: usize,
    pub cols: usize,
    pub tile_size: usize,
    pub bbox: BoundingBox,
    /// (height, width) after cropping, before padding
    pub cropped_dim: (usize, usize),
    /// (height, width) after padding
    pub padded_dim: (usize, usize),
}

/// Crop to the foreground, pad to a multiple of `tile_size` and cut into a
/// `(rows, cols, channels, tile_size, tile_size)` grid.
pub fn tile_image<T: Pixel>(
    image: ArrayView3<'_, T>,
    tile_size: usize,
    mode: CropMode,
) -> Result<SlicedImage<T>> {
    if tile_size == 0 {
        return Err(Error::dimension("tile size must be greater than 0"));
    }
    ensure_non_empty(&image)?;

    let (cropped, bbox) = crop_by_edges(image, mode)?;
    let padded = pad_to_tile_multiple(cropped.view(), tile_size)?;
    let (rows, cols, channels) = (padded.rows(), padded.cols(), padded.channels());

    let mut grid = TileGrid::zeros(rows, cols, channels, tile_size);
    for ch in 0..channels {
        let view = padded.windows(ch)?;
        for ((r, c), tile) in view.iter() {
            grid.tile_plane_mut(r, c, ch).assign(&tile);
        }
    }

    info!(
        "Sliced into {} tiles ({} rows x {} cols, tile size {}, {} channels)",
        rows * cols,
        rows,
        cols,
        tile_size,
        channels
    );

    Ok(SlicedImage {
        tiles: grid,
        rows,
        cols,
        tile_size,
        bbox,
        cropped_dim: padded.source_dim(),
        padded_dim: (padded.height(), padded.width()),
    })
}
