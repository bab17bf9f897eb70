//! I/O layer: decoding source images, encoding PNG/JPEG outputs, and reading/writing
//! tile sets with their `manifest.json` sidecar.
pub mod reader;
pub use reader::{load_image, read_tile_set};

pub mod writers;
pub use writers::{TileManifest, write_image, write_tile_set};
