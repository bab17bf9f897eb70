//! Owned tile containers: `TileGrid` (rows, cols, C, ts, ts) produced by slicing and the flat,
//! row-major `TileBatch` (N, C, ts, ts) consumed by reconstruction.
use ndarray::{Array3, Array4, Array5, ArrayView3, ArrayView4, ArrayView5, Axis, s};

use crate::error::{Error, Result};
use crate::types::Pixel;

#[derive(Debug, Clone, PartialEq)]
pub struct TileGrid<T> {
    tiles: Array5<T>,
}

impl<T: Pixel> TileGrid<T> {
    pub(crate) fn zeros(rows: usize, cols: usize, channels: usize, tile_size: usize) -> Self {
        Self {
            tiles: Array5::default((rows, cols, channels, tile_size, tile_size)),
        }
    }

    pub(crate) fn tile_plane_mut(
        &mut self,
        r: usize,
        c: usize,
        ch: usize,
    ) -> ndarray::ArrayViewMut2<'_, T> {
        self.tiles.slice_mut(s![r, c, ch, .., ..])
    }

    pub fn rows(&self) -> usize {
        self.tiles.dim().0
    }

    pub fn cols(&self) -> usize {
        self.tiles.dim().1
    }

    pub fn channels(&self) -> usize {
        self.tiles.dim().2
    }

    pub fn tile_size(&self) -> usize {
        self.tiles.dim().3
    }

    pub fn len(&self) -> usize {
        self.rows() * self.cols()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// `(rows, cols, channels, tile_size, tile_size)`
    pub fn view(&self) -> ArrayView5<'_, T> {
        self.tiles.view()
    }

    pub fn tile(&self, r: usize, c: usize) -> Option<ArrayView3<'_, T>> {
        if r >= self.rows() || c >= self.cols() {
            return None;
        }
        Some(self.tiles.slice(s![r, c, .., .., ..]))
    }

    /// Flatten into a row-major batch without copying the pixel data.
    pub fn into_batch(self) -> Result<TileBatch<T>> {
        let (rows, cols, channels, ts, _) = self.tiles.dim();
        let flat = self
            .tiles
            .into_shape((rows * cols, channels, ts, ts))
            .map_err(|e| Error::shape_mismatch(e.to_string()))?;
        Ok(TileBatch { tiles: flat })
    }

    pub fn into_inner(self) -> Array5<T> {
        self.tiles
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TileBatch<T> {
    tiles: Array4<T>,
}

pub(crate) fn check_tile_shape(channels: usize, tile_h: usize, tile_w: usize) -> Result<()> {
    if tile_h != tile_w {
        return Err(Error::shape_mismatch(format!(
            "tiles must be square, got {}x{}",
            tile_h, tile_w
        )));
    }
    if channels == 0 || tile_h == 0 {
        return Err(Error::dimension(format!(
            "tile shape has a zero-length axis: {}x{}x{}",
            channels, tile_h, tile_w
        )));
    }
    Ok(())
}

impl<T: Pixel> TileBatch<T> {
    /// Wrap an `(N, C, ts, ts)` array.
    pub fn from_array(tiles: Array4<T>) -> Result<Self> {
        let (_, channels, tile_h, tile_w) = tiles.dim();
        check_tile_shape(channels, tile_h, tile_w)?;
        Ok(Self { tiles })
    }

    /// Stack individually produced `(C, ts, ts)` tiles, keeping their order.
    pub fn from_tiles(tiles: &[Array3<T>]) -> Result<Self> {
        let first = tiles
            .first()
            .ok_or_else(|| Error::shape_mismatch("tile batch is empty"))?;
        let expected = first.dim();
        check_tile_shape(expected.0, expected.1, expected.2)?;
        if let Some((idx, tile)) = tiles.iter().enumerate().find(|(_, t)| t.dim() != expected) {
            return Err(Error::shape_mismatch(format!(
                "tile {} has shape {:?}, expected {:?}",
                idx,
                tile.dim(),
                expected
            )));
        }

        let views: Vec<ArrayView3<'_, T>> = tiles.iter().map(|t| t.view()).collect();
        let stacked = ndarray::stack(Axis(0), &views)
            .map_err(|e| Error::shape_mismatch(e.to_string()))?;
        Ok(Self { tiles: stacked })
    }

    pub fn len(&self) -> usize {
        self.tiles.dim().0
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn channels(&self) -> usize {
        self.tiles.dim().1
    }

    pub fn tile_size(&self) -> usize {
        self.tiles.dim().2
    }

    pub fn tile(&self, idx: usize) -> Option<ArrayView3<'_, T>> {
        (idx < self.len()).then(|| self.tiles.index_axis(Axis(0), idx))
    }

    /// Tiles in batch order.
    pub fn iter(&self) -> impl Iterator<Item = ArrayView3<'_, T>> {
        self.tiles.outer_iter()
    }

    pub fn view(&self) -> ArrayView4<'_, T> {
        self.tiles.view()
    }

    pub fn into_inner(self) -> Array4<T> {
        self.tiles
    }
}
