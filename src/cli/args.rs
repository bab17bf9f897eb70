use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use tileslice::{CropMode, OutputFormat, ProcessorKind};

#[derive(Parser)]
#[command(name = "tileslice", version, about = "tileslice CLI")]
pub struct CliArgs {
    /// JSON file with tiling parameters; flags given on the command line take precedence
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable logging (RUST_LOG overrides the default debug level)
    #[arg(long, global = true, default_value_t = false)]
    pub log: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Crop, pad and cut an image into a directory of tiles plus manifest.json
    Slice {
        /// Input image (PNG, JPEG, ...)
        #[arg(short, long)]
        input: PathBuf,

        /// Directory that receives the tiles and manifest
        #[arg(short, long)]
        output_dir: PathBuf,

        #[command(flatten)]
        tiling: TilingArgs,
    },

    /// Stitch a tile directory written by `slice` back into one image
    Reconstruct {
        /// Directory containing manifest.json and the tiles it lists
        #[arg(short, long)]
        input_dir: PathBuf,

        /// Output image; format follows the extension (.png, .jpg)
        #[arg(short, long)]
        output: PathBuf,

        /// JPEG quality when writing a .jpg output
        #[arg(long)]
        jpeg_quality: Option<u8>,
    },

    /// Slice, run a per-tile processor and reconstruct in one go
    Run {
        /// Input image
        #[arg(short, long)]
        input: PathBuf,

        /// Output image; format follows the extension (.png, .jpg)
        #[arg(short, long)]
        output: PathBuf,

        /// Per-tile processor (identity, threshold, invert)
        #[arg(long, value_enum, default_value_t = ProcessorKind::Identity)]
        processor: ProcessorKind,

        /// Channel-sum level for the threshold processor
        #[arg(long)]
        threshold: Option<f64>,

        #[command(flatten)]
        tiling: TilingArgs,
    },
}

#[derive(Args, Default)]
pub struct TilingArgs {
    /// Tile side length in pixels
    #[arg(long)]
    pub tile_size: Option<usize>,

    /// Foreground crop bound (exclusive drops the last foreground row/column)
    #[arg(long, value_enum)]
    pub crop_mode: Option<CropMode>,

    /// Tile encoding (png or jpeg)
    #[arg(short = 'f', long, value_enum)]
    pub format: Option<OutputFormat>,

    /// JPEG quality (1-100)
    #[arg(long)]
    pub jpeg_quality: Option<u8>,
}
