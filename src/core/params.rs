use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::types::{CropMode, OutputFormat};

/// Tiling parameters suitable for config files and CLI defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TilingParams {
    /// Side length of the square tiles in pixels
    pub tile_size: usize,
    pub crop_mode: CropMode,
    /// Encoding for tiles and reconstructed images written to disk
    pub output_format: OutputFormat,
    /// JPEG quality (1-100); ignored for PNG
    pub jpeg_quality: u8,
}

impl Default for TilingParams {
    fn default() -> Self {
        Self {
            tile_size: 256,
            crop_mode: CropMode::Exclusive,
            output_format: OutputFormat::Png,
            jpeg_quality: 90,
        }
    }
}

impl TilingParams {
    pub fn validate(&self) -> Result<()> {
        if self.tile_size == 0 {
            return Err(Error::InvalidArgument {
                arg: "tile_size",
                value: self.tile_size.to_string(),
            });
        }
        if !(1..=100).contains(&self.jpeg_quality) {
            return Err(Error::InvalidArgument {
                arg: "jpeg_quality",
                value: self.jpeg_quality.to_string(),
            });
        }
        Ok(())
    }

    /// Load and validate parameters from a JSON file. Missing keys take their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let params: TilingParams = serde_json::from_str(&text)?;
        params.validate()?;
        Ok(params)
    }
}
