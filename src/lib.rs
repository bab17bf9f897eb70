#![doc = r#"
tileslice — crop, pad and cut images into square tiles, then stitch per-tile results back.

The forward path crops an image to its foreground bounding box (pixels whose channel sum is
positive), zero-pads the bottom/right edges up to a multiple of the tile size and cuts the
result into a `(rows, cols, channels, tile_size, tile_size)` grid. The inverse path takes a
row-major batch of per-tile results and reassembles one image. Whatever runs between the two
(model inference, filtering) plugs in through the `TileProcessor` trait.

Stability
---------
The public library API is experimental and may change between minor releases.

Add dependency
--------------
```toml
[dependencies]
tileslice = "0.1"
```

Quick start: slice and reconstruct in memory
--------------------------------------------
```rust
use ndarray::Array3;
use tileslice::{reconstruct_image, slice_image};

fn main() -> tileslice::Result<()> {
    let mut image = Array3::<u8>::zeros((5, 5, 1));
    image.fill(1);

    let sliced = slice_image(image.view(), 2)?;
    let (rows, cols) = (sliced.rows, sliced.cols);

    // ... run each tile of `batch` through a model here, keeping the order ...
    let batch = sliced.tiles.into_batch()?;

    let restored = reconstruct_image(&batch, rows, cols)?;
    assert_eq!(restored.dim(), (4, 4, 1));
    Ok(())
}
```

Running a per-tile processor
----------------------------
```rust
use ndarray::Array3;
use tileslice::{Threshold, TilingParams, TilingService};

fn main() -> tileslice::Result<()> {
    let image = Array3::<u8>::from_elem((64, 64, 3), 120);
    let params = TilingParams { tile_size: 32, ..Default::default() };

    // Build the service once and reuse it for every image.
    let service = TilingService::new(Threshold { level: 300.0 }, params)?;
    let out = service.run(image.view())?;
    println!("{}x{} tiles", out.rows, out.cols);
    Ok(())
}
```

Tile sets on disk
-----------------
```rust,no_run
use std::path::Path;
use tileslice::{TilingParams, reconstruct_dir_to_file, slice_file_to_dir};

fn main() -> tileslice::Result<()> {
    let params = TilingParams::default();
    let manifest = slice_file_to_dir(Path::new("scan.png"), Path::new("tiles"), &params)?;
    println!("{} tiles", manifest.tiles.len());
    reconstruct_dir_to_file(Path::new("tiles"), Path::new("restored.png"), params.jpeg_quality)?;
    Ok(())
}
```

Error handling
--------------
All public functions return `tileslice::Result<T>`; match on `tileslice::Error`:

```rust
use ndarray::Array3;
use tileslice::{Error, slice_image};

let blank = Array3::<u8>::zeros((8, 8, 3));
match slice_image(blank.view(), 4) {
    Err(Error::EmptyForeground { .. }) => eprintln!("no content detected"),
    Err(other) => eprintln!("error: {other}"),
    Ok(_) => unreachable!(),
}
```

Useful modules
--------------
- [`api`] — high-level entry points and `TilingService`.
- [`core`] — crop, padding, zero-copy windows, slice/reconstruct, per-tile processing.
- [`io`] — image decoding/encoding and tile-set manifests.
- [`types`] — `Pixel`, `BoundingBox`, `CropMode`, `OutputFormat`, `ProcessorKind`.
- [`error`] — crate-level `Error` and `Result`.
"#]

// Core modules (public)
pub mod api;
pub mod core;
pub mod error;
pub mod io;
pub mod types;

// Curated public API surface
// Types
pub use crate::core::params::TilingParams;
pub use crate::core::tiling::{PaddedImage, SlicedImage, TileBatch, TileGrid, WindowView};
pub use error::{Error, Result};
pub use types::{BoundingBox, CropMode, Image, OutputFormat, Pixel, ProcessorKind};

// Processing
pub use crate::core::processing::{Identity, Invert, Threshold, TileProcessor, build_processor};

// I/O
pub use io::{TileManifest, load_image, read_tile_set, write_image, write_tile_set};

// High-level API re-exports
pub use api::{
    ServiceOutput, TilingService, process_file_to_path, reconstruct_dir_to_file,
    reconstruct_image, slice_file_to_dir, slice_image,
};
