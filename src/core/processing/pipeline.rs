use ndarray::Array3;
use ndarray::parallel::prelude::*;
use tracing::debug;

use crate::core::processing::processor::TileProcessor;
use crate::core::tiling::grid::TileBatch;
use crate::error::{Error, Result};
use crate::types::Pixel;

/// Run `processor` over every tile in parallel. The output batch keeps the input order,
/// so it can be handed to reconstruction with the same rows/cols.
pub fn process_batch<T, P>(batch: &TileBatch<T>, processor: &P) -> Result<TileBatch<T>>
where
    T: Pixel,
    P: TileProcessor<T> + ?Sized,
{
    debug!(
        "Processing {} tiles with '{}'",
        batch.len(),
        processor.name()
    );

    let outputs: Vec<Array3<T>> = (0..batch.len())
        .into_par_iter()
        .map(|idx| {
            let tile = batch
                .tile(idx)
                .ok_or_else(|| Error::Processing(format!("tile {} missing from batch", idx)))?;
            processor.process(tile)
        })
        .collect::<Result<Vec<_>>>()?;

    TileBatch::from_tiles(&outputs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::processing::processor::{Identity, Invert};
    use ndarray::{Array4, ArrayView3};

    struct Shrink;

    impl TileProcessor<u8> for Shrink {
        fn name(&self) -> &str {
            "shrink"
        }

        fn process(&self, tile: ArrayView3<'_, u8>) -> Result<Array3<u8>> {
            let (c, ts, _) = tile.dim();
            // Only the first tile changes shape
            let side = if tile[[0, 0, 0]] == 0 { ts - 1 } else { ts };
            Ok(Array3::zeros((c, side, side)))
        }
    }

    fn numbered_batch(n: usize) -> TileBatch<u8> {
        TileBatch::from_array(Array4::from_shape_fn((n, 1, 3, 3), |(i, _, _, _)| i as u8)).unwrap()
    }

    #[test]
    fn test_order_is_preserved() {
        let batch = numbered_batch(64);
        let out = process_batch(&batch, &Identity).unwrap();
        assert_eq!(out, batch);

        let inverted = process_batch(&batch, &Invert).unwrap();
        for (idx, tile) in inverted.iter().enumerate() {
            assert!(tile.iter().all(|&v| v == 255 - idx as u8));
        }
    }

    #[test]
    fn test_inconsistent_outputs_rejected() {
        let batch = numbered_batch(4);
        assert!(matches!(
            process_batch(&batch, &Shrink),
            Err(Error::ShapeMismatch { .. })
        ));
    }
}
