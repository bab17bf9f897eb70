use ndarray::{Array3, ArrayView2, ArrayView3, Axis, s};
use tracing::info;

use crate::core::tiling::crop::ensure_non_empty;
use crate::core::tiling::window::{WindowView, windows};
use crate::error::{Error, Result};
use crate::types::{Image, Pixel};

/// Smallest multiple of `tile_size` that is >= `dim`.
#[inline]
pub fn padded_extent(dim: usize, tile_size: usize) -> usize {
    dim.div_ceil(tile_size) * tile_size
}

/// An image zero-padded at the bottom/right so both spatial axes are multiples of `tile_size`.
#[derive(Debug, Clone)]
pub struct PaddedImage<T> {
    data: Image<T>,
    source_height: usize,
    source_width: usize,
    tile_size: usize,
}

impl<T: Pixel> PaddedImage<T> {
    pub fn view(&self) -> ArrayView3<'_, T> {
        self.data.view()
    }

    pub fn into_inner(self) -> Image<T> {
        self.data
    }

    pub fn height(&self) -> usize {
        self.data.dim().0
    }

    pub fn width(&self) -> usize {
        self.data.dim().1
    }

    pub fn channels(&self) -> usize {
        self.data.dim().2
    }

    pub fn tile_size(&self) -> usize {
        self.tile_size
    }

    /// (height, width) before padding.
    pub fn source_dim(&self) -> (usize, usize) {
        (self.source_height, self.source_width)
    }

    pub fn pad_bottom(&self) -> usize {
        self.height() - self.source_height
    }

    pub fn pad_right(&self) -> usize {
        self.width() - self.source_width
    }

    pub fn rows(&self) -> usize {
        self.height() / self.tile_size
    }

    pub fn cols(&self) -> usize {
        self.width() / self.tile_size
    }

    pub fn channel(&self, ch: usize) -> Result<ArrayView2<'_, T>> {
        if ch >= self.channels() {
            return Err(Error::dimension(format!(
                "channel {} out of range for {} channels",
                ch,
                self.channels()
            )));
        }
        Ok(self.data.index_axis(Axis(2), ch))
    }

    /// Zero-copy tile grid over one channel plane.
    pub fn windows(&self, ch: usize) -> Result<WindowView<'_, T>> {
        windows(self.channel(ch)?, self.tile_size, self.tile_size)
    }
}

/// Pad `image` at the high end of both spatial axes up to a multiple of `tile_size`.
pub fn pad_to_tile_multiple<T: Pixel>(
    image: ArrayView3<'_, T>,
    tile_size: usize,
) -> Result<PaddedImage<T>> {
    if tile_size == 0 {
        return Err(Error::dimension("tile size must be greater than 0"));
    }
    ensure_non_empty(&image)?;

    let (rows, cols, channels) = image.dim();
    let target_rows = padded_extent(rows, tile_size);
    let target_cols = padded_extent(cols, tile_size);

    info!(
        "Adding padding: rows={}, cols={}, pad_bottom={}, pad_right={}",
        rows,
        cols,
        target_rows - rows,
        target_cols - cols
    );
    info!("Final dimensions: {}x{}", target_rows, target_cols);

    let mut padded = Array3::<T>::default((target_rows, target_cols, channels));
    // Each channel plane is copied on its own; the border keeps the zero fill.
    for ch in 0..channels {
        padded
            .slice_mut(s![..rows, ..cols, ch])
            .assign(&image.slice(s![.., .., ch]));
    }

    Ok(PaddedImage {
        data: padded,
        source_height: rows,
        source_width: cols,
        tile_size,
    })
}
