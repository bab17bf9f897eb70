use std::path::Path;

use tracing::info;
use tracing_subscriber::EnvFilter;

use tileslice::{
    ProcessorKind, TilingParams, TilingService, build_processor, process_file_to_path,
    reconstruct_dir_to_file, slice_file_to_dir,
};

use super::args::{CliArgs, Command, TilingArgs};
use super::errors::AppError;

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn base_params(config: Option<&Path>) -> Result<TilingParams, AppError> {
    match config {
        Some(path) => {
            info!("Loading tiling parameters from {:?}", path);
            Ok(TilingParams::from_json_file(path)?)
        }
        None => Ok(TilingParams::default()),
    }
}

fn check_quality(quality: u8) -> Result<u8, AppError> {
    if (1..=100).contains(&quality) {
        Ok(quality)
    } else {
        Err(AppError::InvalidQuality { quality })
    }
}

/// Flags override whatever came from the config file.
fn apply_overrides(mut params: TilingParams, args: &TilingArgs) -> Result<TilingParams, AppError> {
    if let Some(size) = args.tile_size {
        if size == 0 {
            return Err(AppError::ZeroSize { size });
        }
        params.tile_size = size;
    }
    if let Some(mode) = args.crop_mode {
        params.crop_mode = mode;
    }
    if let Some(format) = args.format {
        params.output_format = format;
    }
    if let Some(quality) = args.jpeg_quality {
        params.jpeg_quality = check_quality(quality)?;
    }
    Ok(params)
}

fn require_input(path: &Path) -> Result<(), AppError> {
    if path.exists() {
        Ok(())
    } else {
        Err(AppError::MissingInput {
            path: path.display().to_string(),
        })
    }
}

pub fn run(args: CliArgs) -> Result<(), Box<dyn std::error::Error>> {
    if args.log {
        init_logging();
    }

    let params = base_params(args.config.as_deref())?;

    match args.command {
        Command::Slice {
            input,
            output_dir,
            tiling,
        } => {
            require_input(&input)?;
            let params = apply_overrides(params, &tiling)?;
            info!(
                "Slicing {:?} into {}px tiles -> {:?}",
                input, params.tile_size, output_dir
            );
            let manifest = slice_file_to_dir(&input, &output_dir, &params).map_err(AppError::from)?;
            info!(
                "Successfully sliced: {} tiles ({} rows x {} cols)",
                manifest.tiles.len(),
                manifest.rows,
                manifest.cols
            );
        }
        Command::Reconstruct {
            input_dir,
            output,
            jpeg_quality,
        } => {
            require_input(&input_dir)?;
            let quality = match jpeg_quality {
                Some(q) => check_quality(q)?,
                None => params.jpeg_quality,
            };
            let (height, width, channels) =
                reconstruct_dir_to_file(&input_dir, &output, quality).map_err(AppError::from)?;
            info!(
                "Successfully reconstructed: {:?} -> {:?} ({}x{}x{})",
                input_dir, output, height, width, channels
            );
        }
        Command::Run {
            input,
            output,
            processor,
            threshold,
            tiling,
        } => {
            require_input(&input)?;
            if processor == ProcessorKind::Threshold && threshold.is_none() {
                return Err(AppError::MissingThreshold {
                    processor: processor.to_string(),
                }
                .into());
            }
            let params = apply_overrides(params, &tiling)?;
            let processor = build_processor::<u8>(processor, threshold).map_err(AppError::from)?;
            let service = TilingService::new(processor, params).map_err(AppError::from)?;
            let result = process_file_to_path(&service, &input, &output).map_err(AppError::from)?;
            info!(
                "Successfully processed: {:?} -> {:?} ({} rows x {} cols, crop {})",
                input, output, result.rows, result.cols, result.bbox
            );
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tileslice::{CropMode, OutputFormat};

    #[test]
    fn test_overrides_replace_config_values() {
        let args = TilingArgs {
            tile_size: Some(128),
            crop_mode: Some(CropMode::Inclusive),
            format: Some(OutputFormat::Jpeg),
            jpeg_quality: Some(75),
        };
        let params = apply_overrides(TilingParams::default(), &args).unwrap();
        assert_eq!(params.tile_size, 128);
        assert_eq!(params.crop_mode, CropMode::Inclusive);
        assert_eq!(params.output_format, OutputFormat::Jpeg);
        assert_eq!(params.jpeg_quality, 75);
    }

    #[test]
    fn test_empty_overrides_keep_config() {
        let params = apply_overrides(TilingParams::default(), &TilingArgs::default()).unwrap();
        assert_eq!(params, TilingParams::default());
    }

    #[test]
    fn test_zero_tile_size_rejected() {
        let args = TilingArgs {
            tile_size: Some(0),
            ..Default::default()
        };
        assert!(matches!(
            apply_overrides(TilingParams::default(), &args),
            Err(AppError::ZeroSize { size: 0 })
        ));
    }

    #[test]
    fn test_quality_bounds() {
        assert!(check_quality(0).is_err());
        assert!(check_quality(101).is_err());
        assert_eq!(check_quality(100).unwrap(), 100);
    }
}
