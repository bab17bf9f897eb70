//! Per-tile processing: the `TileProcessor` seam and the order-preserving batch pipeline.
pub mod pipeline;
pub mod processor;

pub use pipeline::process_batch;
pub use processor::{Identity, Invert, Threshold, TileProcessor, build_processor};
