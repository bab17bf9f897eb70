use std::path::{Component, Path};

use image::DynamicImage;
use ndarray::Array3;
use tracing::{debug, info};

use crate::core::tiling::grid::TileBatch;
use crate::core::tiling::reconstruct::grid_len;
use crate::error::{Error, Result};
use crate::io::writers::manifest::TileManifest;
use crate::types::Image;

/// Decode an image file into a channel-last `u8` array. Gray, gray+alpha, RGB and RGBA keep
/// their channel count (16-bit gray is narrowed to 8 bits); other pixel formats are converted
/// to RGB.
pub fn load_image(path: &Path) -> Result<Image<u8>> {
    let img = image::open(path)?;
    let (width, height) = (img.width() as usize, img.height() as usize);
    let (channels, raw) = match img {
        DynamicImage::ImageLuma8(buf) => (1, buf.into_raw()),
        DynamicImage::ImageLumaA8(buf) => (2, buf.into_raw()),
        DynamicImage::ImageRgb8(buf) => (3, buf.into_raw()),
        DynamicImage::ImageRgba8(buf) => (4, buf.into_raw()),
        gray @ DynamicImage::ImageLuma16(_) => (1, gray.to_luma8().into_raw()),
        gray @ DynamicImage::ImageLumaA16(_) => (2, gray.to_luma_alpha8().into_raw()),
        other => (3, other.to_rgb8().into_raw()),
    };
    debug!(
        "Loaded {:?}: {}x{} with {} channels",
        path, height, width, channels
    );
    Array3::from_shape_vec((height, width, channels), raw)
        .map_err(|e| Error::shape_mismatch(e.to_string()))
}

/// Load a tile set written by `write_tile_set`. Tiles come back as a `(N, C, ts, ts)` batch
/// in manifest order.
pub fn read_tile_set(dir: &Path) -> Result<(TileBatch<u8>, TileManifest)> {
    let manifest = TileManifest::read(dir)?;
    let expected = grid_len(manifest.rows, manifest.cols)?;
    if manifest.tiles.len() != expected {
        return Err(Error::shape_mismatch(format!(
            "manifest lists {} tiles for a {}x{} grid",
            manifest.tiles.len(),
            manifest.rows,
            manifest.cols
        )));
    }

    let ts = manifest.tile_size;
    let mut tiles = Vec::with_capacity(expected);
    for name in &manifest.tiles {
        if !is_plain_file_name(name) {
            return Err(Error::InvalidArgument {
                arg: "tile",
                value: name.clone(),
            });
        }
        let tile = load_image(&dir.join(name))?;
        if tile.dim() != (ts, ts, manifest.channels) {
            return Err(Error::shape_mismatch(format!(
                "{} has shape {:?}, expected {:?}",
                name,
                tile.dim(),
                (ts, ts, manifest.channels)
            )));
        }
        // (ts, ts, C) -> (C, ts, ts)
        tiles.push(tile.permuted_axes([2, 0, 1]));
    }

    info!("Read {} tiles from {:?}", tiles.len(), dir);
    Ok((TileBatch::from_tiles(&tiles)?, manifest))
}

/// Tile entries must name a file directly inside the tile directory.
fn is_plain_file_name(name: &str) -> bool {
    let mut parts = Path::new(name).components();
    matches!(
        (parts.next(), parts.next()),
        (Some(Component::Normal(_)), None)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tile_names_stay_inside_the_directory() {
        assert!(is_plain_file_name("tile_0000_r0_c0.png"));
        assert!(!is_plain_file_name("../outside.png"));
        assert!(!is_plain_file_name("/etc/passwd"));
        assert!(!is_plain_file_name("nested/tile.png"));
        assert!(!is_plain_file_name(".."));
        assert!(!is_plain_file_name(""));
    }
}
