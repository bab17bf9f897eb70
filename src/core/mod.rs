//! Core building blocks: foreground crop, tile padding, zero-copy windows,
//! slice/reconstruct, and per-tile processing. These are the primitives
//! consumed by the high-level `api` module.
pub mod params;
pub mod processing;
pub mod tiling;
