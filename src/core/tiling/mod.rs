//! Foreground crop, tile padding, zero-copy windows and the slice/reconstruct pair built on them.
pub mod crop;
pub mod grid;
pub mod padding;
pub mod reconstruct;
pub mod slice;
pub mod window;

pub use crop::{crop_by_edges, foreground_bbox};
pub use grid::{TileBatch, TileGrid};
pub use padding::{PaddedImage, pad_to_tile_multiple, padded_extent};
pub use reconstruct::{assemble, assemble_tiles};
pub use slice::{SlicedImage, tile_image};
pub use window::{WindowView, windows};
