//! `manifest.json` sidecar describing a tile set on disk: grid shape, crop box,
//! padding and the row-major list of tile files.
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::core::params::TilingParams;
use crate::core::tiling::slice::SlicedImage;
use crate::error::Result;
use crate::types::{BoundingBox, CropMode, OutputFormat, Pixel};

pub const MANIFEST_FILE: &str = "manifest.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TileManifest {
    pub tile_size: usize,
    pub rows: usize,
    pub cols: usize,
    pub channels: usize,
    pub bbox: BoundingBox,
    pub crop_mode: CropMode,
    pub cropped_height: usize,
    pub cropped_width: usize,
    pub padded_height: usize,
    pub padded_width: usize,
    pub format: OutputFormat,
    pub created_at: DateTime<Utc>,
    /// File names relative to the manifest, index = row * cols + col
    pub tiles: Vec<String>,
}

pub fn tile_file_name(index: usize, row: usize, col: usize, format: OutputFormat) -> String {
    format!(
        "tile_{:05}_r{:03}_c{:03}.{}",
        index,
        row,
        col,
        format.extension()
    )
}

impl TileManifest {
    pub fn from_sliced<T: Pixel>(sliced: &SlicedImage<T>, params: &TilingParams) -> Self {
        let tiles = (0..sliced.rows * sliced.cols)
            .map(|idx| {
                tile_file_name(
                    idx,
                    idx / sliced.cols,
                    idx % sliced.cols,
                    params.output_format,
                )
            })
            .collect();
        Self {
            tile_size: sliced.tile_size,
            rows: sliced.rows,
            cols: sliced.cols,
            channels: sliced.tiles.view().dim().2,
            bbox: sliced.bbox,
            crop_mode: params.crop_mode,
            cropped_height: sliced.cropped_dim.0,
            cropped_width: sliced.cropped_dim.1,
            padded_height: sliced.padded_dim.0,
            padded_width: sliced.padded_dim.1,
            format: params.output_format,
            created_at: Utc::now(),
            tiles,
        }
    }

    pub fn write(&self, dir: &Path) -> Result<PathBuf> {
        let path = dir.join(MANIFEST_FILE);
        let json_string = serde_json::to_string_pretty(self)?;
        std::fs::write(&path, json_string)?;
        info!("Tile manifest written: {:?}", path);
        Ok(path)
    }

    pub fn read(dir: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(dir.join(MANIFEST_FILE))?;
        Ok(serde_json::from_str(&text)?)
    }
}
