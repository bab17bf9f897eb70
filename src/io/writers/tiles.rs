use std::path::Path;

use tracing::info;

use crate::core::params::TilingParams;
use crate::core::tiling::slice::SlicedImage;
use crate::error::{Error, Result};
use crate::io::writers::encode::write_image;
use crate::io::writers::manifest::TileManifest;

/// Write every tile of `sliced` as an image file plus `manifest.json` into `dir`.
pub fn write_tile_set(
    dir: &Path,
    sliced: &SlicedImage<u8>,
    params: &TilingParams,
) -> Result<TileManifest> {
    std::fs::create_dir_all(dir)?;
    let manifest = TileManifest::from_sliced(sliced, params);

    for (idx, name) in manifest.tiles.iter().enumerate() {
        let (r, c) = (idx / sliced.cols, idx % sliced.cols);
        let tile = sliced
            .tiles
            .tile(r, c)
            .ok_or_else(|| Error::Processing(format!("tile ({}, {}) out of range", r, c)))?;
        // (C, ts, ts) -> (ts, ts, C) for encoding
        write_image(
            &dir.join(name),
            tile.permuted_axes([1, 2, 0]),
            params.output_format,
            params.jpeg_quality,
        )?;
    }

    info!(
        "Wrote {} tiles ({}x{} grid) to {:?}",
        manifest.tiles.len(),
        manifest.rows,
        manifest.cols,
        dir
    );
    manifest.write(dir)?;
    Ok(manifest)
}
