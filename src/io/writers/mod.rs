//! Image encoders (PNG via `image`, JPEG via `jpeg-encoder`) and tile-set output.
pub mod encode;
pub mod jpeg;
pub mod manifest;
pub mod tiles;

pub use encode::write_image;
pub use manifest::{MANIFEST_FILE, TileManifest};
pub use tiles::write_tile_set;
