//! High-level, ergonomic library API: the `slice_image` / `reconstruct_image` pair, the
//! `TilingService` that runs a per-tile processor between them, and file/directory helpers.
//! Prefer these entrypoints over the low-level `core::tiling` modules when integrating.
use std::path::Path;

use ndarray::ArrayView3;
use tracing::info;

use crate::core::params::TilingParams;
use crate::core::processing::pipeline::process_batch;
use crate::core::processing::processor::TileProcessor;
use crate::core::tiling::grid::TileBatch;
use crate::core::tiling::reconstruct::assemble;
use crate::core::tiling::slice::{SlicedImage, tile_image};
use crate::error::Result;
use crate::io::reader::{load_image, read_tile_set};
use crate::io::writers::{TileManifest, write_image, write_tile_set};
use crate::types::{BoundingBox, CropMode, Image, OutputFormat, Pixel};

/// Crop to the foreground, pad and cut into `tile_size` square tiles.
/// The returned `rows`/`cols` are needed again by [`reconstruct_image`].
pub fn slice_image<T: Pixel>(image: ArrayView3<'_, T>, tile_size: usize) -> Result<SlicedImage<T>> {
    tile_image(image, tile_size, CropMode::Exclusive)
}

/// Stitch a row-major `(N, C, ts, ts)` batch back into a `(rows * ts, cols * ts, C)` image.
pub fn reconstruct_image<T: Pixel>(
    batch: &TileBatch<T>,
    rows: usize,
    cols: usize,
) -> Result<Image<T>> {
    assemble(batch.view(), rows, cols)
}

/// Result of one slice -> process -> reconstruct cycle
#[derive(Debug, Clone)]
pub struct ServiceOutput<T> {
    pub image: Image<T>,
    pub rows: usize,
    pub cols: usize,
    pub tile_size: usize,
    pub bbox: BoundingBox,
}

/// Runs a per-tile processor (e.g. a segmentation model) over tiled images.
/// Build it once and share it; it holds no per-image state.
#[derive(Debug, Clone)]
pub struct TilingService<P> {
    processor: P,
    params: TilingParams,
}

impl<P> TilingService<P> {
    pub fn new(processor: P, params: TilingParams) -> Result<Self> {
        params.validate()?;
        Ok(Self { processor, params })
    }

    pub fn params(&self) -> &TilingParams {
        &self.params
    }

    pub fn processor(&self) -> &P {
        &self.processor
    }

    pub fn run<T>(&self, image: ArrayView3<'_, T>) -> Result<ServiceOutput<T>>
    where
        T: Pixel,
        P: TileProcessor<T>,
    {
        let sliced = tile_image(image, self.params.tile_size, self.params.crop_mode)?;
        let (rows, cols, tile_size, bbox) = (sliced.rows, sliced.cols, sliced.tile_size, sliced.bbox);

        let batch = sliced.tiles.into_batch()?;
        let processed = process_batch(&batch, &self.processor)?;
        let image = assemble(processed.view(), rows, cols)?;

        info!(
            "Service '{}' produced {}x{} image from {} tiles",
            self.processor.name(),
            image.dim().0,
            image.dim().1,
            rows * cols
        );
        Ok(ServiceOutput {
            image,
            rows,
            cols,
            tile_size,
            bbox,
        })
    }
}

/// Slice an image file into a directory of tiles plus `manifest.json`.
pub fn slice_file_to_dir(
    input: &Path,
    output_dir: &Path,
    params: &TilingParams,
) -> Result<TileManifest> {
    params.validate()?;
    let image = load_image(input)?;
    let sliced = tile_image(image.view(), params.tile_size, params.crop_mode)?;
    write_tile_set(output_dir, &sliced, params)
}

/// Rebuild an image from a tile directory and write it to `output`
/// (format chosen from the file extension). Returns the image dimensions.
pub fn reconstruct_dir_to_file(
    input_dir: &Path,
    output: &Path,
    jpeg_quality: u8,
) -> Result<(usize, usize, usize)> {
    let (batch, manifest) = read_tile_set(input_dir)?;
    let image = assemble(batch.view(), manifest.rows, manifest.cols)?;
    write_image(
        output,
        image.view(),
        OutputFormat::from_path(output),
        jpeg_quality,
    )?;
    Ok(image.dim())
}

/// Load `input`, run it through `service` and write the result to `output`.
pub fn process_file_to_path<P>(
    service: &TilingService<P>,
    input: &Path,
    output: &Path,
) -> Result<ServiceOutput<u8>>
where
    P: TileProcessor<u8>,
{
    let image = load_image(input)?;
    let result = service.run(image.view())?;
    write_image(
        output,
        result.image.view(),
        OutputFormat::from_path(output),
        service.params().jpeg_quality,
    )?;
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::processing::processor::Identity;
    use crate::error::Error;
    use ndarray::{Array3, s};

    #[test]
    fn test_service_identity_returns_cropped_padded_image() {
        let mut img = Array3::<u8>::zeros((9, 9, 3));
        img.slice_mut(s![2..8, 1..7, ..]).fill(50);
        let params = TilingParams {
            tile_size: 4,
            ..Default::default()
        };
        let service = TilingService::new(Identity, params).unwrap();
        let out = service.run(img.view()).unwrap();

        // Exclusive crop keeps 5x5, padded to 8x8
        assert_eq!(out.image.dim(), (8, 8, 3));
        assert_eq!((out.rows, out.cols), (2, 2));
        assert!(out.image.slice(s![..5, ..5, ..]).iter().all(|&v| v == 50));
        assert!(out.image.slice(s![5.., .., ..]).iter().all(|&v| v == 0));
        assert!(out.image.slice(s![.., 5.., ..]).iter().all(|&v| v == 0));
    }

    #[test]
    fn test_service_rejects_invalid_params() {
        let params = TilingParams {
            tile_size: 0,
            ..Default::default()
        };
        assert!(matches!(
            TilingService::new(Identity, params),
            Err(Error::InvalidArgument { .. })
        ));
    }
}
