use std::path::Path;

use image::{ColorType, ImageFormat};
use ndarray::ArrayView3;
use tracing::debug;

use crate::error::{Error, Result};
use crate::io::writers::jpeg::{write_gray_jpeg, write_rgb_jpeg};
use crate::types::OutputFormat;

/// Encode a channel-last `u8` image. PNG accepts 1-4 channels, JPEG 1 or 3.
pub fn write_image(
    output: &Path,
    image: ArrayView3<'_, u8>,
    format: OutputFormat,
    jpeg_quality: u8,
) -> Result<()> {
    let (rows, cols, channels) = image.dim();
    // Logical iteration order is row-major HWC regardless of memory layout.
    let data: Vec<u8> = image.iter().copied().collect();

    match format {
        OutputFormat::Png => {
            let color = match channels {
                1 => ColorType::L8,
                2 => ColorType::La8,
                3 => ColorType::Rgb8,
                4 => ColorType::Rgba8,
                _ => {
                    return Err(Error::InvalidArgument {
                        arg: "channels",
                        value: channels.to_string(),
                    });
                }
            };
            image::save_buffer_with_format(
                output,
                &data,
                cols as u32,
                rows as u32,
                color,
                ImageFormat::Png,
            )?;
        }
        OutputFormat::Jpeg => match channels {
            1 => write_gray_jpeg(output, cols, rows, &data, jpeg_quality)?,
            3 => write_rgb_jpeg(output, cols, rows, &data, jpeg_quality)?,
            _ => {
                return Err(Error::InvalidArgument {
                    arg: "channels",
                    value: format!("{} (JPEG supports 1 or 3)", channels),
                });
            }
        },
    }

    debug!(
        "write_image: {}x{}x{} {} saved to {:?}",
        rows, cols, channels, format, output
    );
    Ok(())
}
