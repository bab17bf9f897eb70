//! Zero-copy tile windows over a single channel plane.
//!
//! A [`WindowView`] never copies pixel data: tile `(r, c)` element `(i, j)` is read from
//! `plane[r * tile_h + i, c * tile_w + j]`. The view borrows the plane, so the underlying
//! buffer cannot be dropped or mutated while any view (or tile derived from it) is alive.
use ndarray::{Array4, ArrayView2, s};

use crate::error::{Error, Result};
use crate::types::Pixel;

#[derive(Debug, Clone, Copy)]
pub struct WindowView<'a, T> {
    plane: ArrayView2<'a, T>,
    rows: usize,
    cols: usize,
    tile_h: usize,
    tile_w: usize,
}

/// Build a `(plane_h / tile_h, plane_w / tile_w, tile_h, tile_w)` view over `plane`.
/// Pixels beyond the last whole tile on either axis are not reachable through the view.
pub fn windows<'a, T: Pixel>(
    plane: ArrayView2<'a, T>,
    tile_h: usize,
    tile_w: usize,
) -> Result<WindowView<'a, T>> {
    if tile_h == 0 || tile_w == 0 {
        return Err(Error::dimension(format!(
            "window size must be greater than 0, got {}x{}",
            tile_h, tile_w
        )));
    }
    let (plane_h, plane_w) = plane.dim();
    Ok(WindowView {
        plane,
        rows: plane_h / tile_h,
        cols: plane_w / tile_w,
        tile_h,
        tile_w,
    })
}

impl<'a, T: Pixel> WindowView<'a, T> {
    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn tile_dim(&self) -> (usize, usize) {
        (self.tile_h, self.tile_w)
    }

    /// Logical 4-D shape `(rows, cols, tile_h, tile_w)`.
    pub fn shape(&self) -> (usize, usize, usize, usize) {
        (self.rows, self.cols, self.tile_h, self.tile_w)
    }

    pub fn len(&self) -> usize {
        self.rows * self.cols
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Bounds-checked element access at `(r, c, i, j)`.
    pub fn get(&self, r: usize, c: usize, i: usize, j: usize) -> Option<T> {
        if r >= self.rows || c >= self.cols || i >= self.tile_h || j >= self.tile_w {
            return None;
        }
        self.plane
            .get((r * self.tile_h + i, c * self.tile_w + j))
            .copied()
    }

    /// The tile at grid position `(r, c)` as a borrowed sub-view of the plane.
    pub fn tile(&self, r: usize, c: usize) -> Option<ArrayView2<'a, T>> {
        if r >= self.rows || c >= self.cols {
            return None;
        }
        let y = r * self.tile_h;
        let x = c * self.tile_w;
        Some(
            self.plane
                .slice_move(s![y..y + self.tile_h, x..x + self.tile_w]),
        )
    }

    /// Tiles in row-major order: index = row * cols + col.
    pub fn iter(&self) -> impl Iterator<Item = ((usize, usize), ArrayView2<'a, T>)> + '_ {
        (0..self.len()).filter_map(move |idx| {
            let (r, c) = (idx / self.cols, idx % self.cols);
            self.tile(r, c).map(|tile| ((r, c), tile))
        })
    }

    /// Copy the view out into an owned `(rows, cols, tile_h, tile_w)` array.
    pub fn materialize(&self) -> Array4<T> {
        let mut out = Array4::<T>::default((self.rows, self.cols, self.tile_h, self.tile_w));
        for ((r, c), tile) in self.iter() {
            out.slice_mut(s![r, c, .., ..]).assign(&tile);
        }
        out
    }
}
