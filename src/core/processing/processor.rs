use ndarray::{Array3, ArrayView3, Axis};

use crate::error::{Error, Result};
use crate::types::{Pixel, ProcessorKind};

/// Per-tile transformation applied between slicing and reconstruction, e.g. model inference.
/// Input and output tiles are `(C, ts, ts)`; every output of one batch must share a shape.
pub trait TileProcessor<T: Pixel>: Send + Sync {
    fn name(&self) -> &str;

    fn process(&self, tile: ArrayView3<'_, T>) -> Result<Array3<T>>;
}

impl<T: Pixel, P: TileProcessor<T> + ?Sized> TileProcessor<T> for Box<P> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn process(&self, tile: ArrayView3<'_, T>) -> Result<Array3<T>> {
        (**self).process(tile)
    }
}

/// Returns every tile unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct Identity;

impl<T: Pixel> TileProcessor<T> for Identity {
    fn name(&self) -> &str {
        "identity"
    }

    fn process(&self, tile: ArrayView3<'_, T>) -> Result<Array3<T>> {
        Ok(tile.to_owned())
    }
}

/// Binary mask: a pixel whose channel sum exceeds `level` becomes `MAX_VALUE` in every
/// channel, any other pixel becomes zero.
#[derive(Debug, Clone, Copy)]
pub struct Threshold {
    pub level: f64,
}

impl<T: Pixel> TileProcessor<T> for Threshold {
    fn name(&self) -> &str {
        "threshold"
    }

    fn process(&self, tile: ArrayView3<'_, T>) -> Result<Array3<T>> {
        let mask = tile.map_axis(Axis(0), |lane| {
            lane.iter().map(|v| v.intensity()).sum::<f64>() > self.level
        });
        Ok(Array3::from_shape_fn(tile.dim(), |(_, i, j)| {
            if mask[[i, j]] {
                T::MAX_VALUE
            } else {
                T::default()
            }
        }))
    }
}

/// `MAX_VALUE - v` per element.
#[derive(Debug, Clone, Copy, Default)]
pub struct Invert;

impl<T: Pixel> TileProcessor<T> for Invert {
    fn name(&self) -> &str {
        "invert"
    }

    fn process(&self, tile: ArrayView3<'_, T>) -> Result<Array3<T>> {
        Ok(tile.mapv(|v| v.inverted()))
    }
}

/// Build one of the built-in processors. `threshold` is required for `ProcessorKind::Threshold`.
pub fn build_processor<T: Pixel>(
    kind: ProcessorKind,
    threshold: Option<f64>,
) -> Result<Box<dyn TileProcessor<T>>> {
    Ok(match kind {
        ProcessorKind::Identity => Box::new(Identity),
        ProcessorKind::Invert => Box::new(Invert),
        ProcessorKind::Threshold => {
            let level = threshold.ok_or(Error::InvalidArgument {
                arg: "threshold",
                value: "<missing>".to_string(),
            })?;
            if !level.is_finite() {
                return Err(Error::InvalidArgument {
                    arg: "threshold",
                    value: level.to_string(),
                });
            }
            Box::new(Threshold { level })
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_uses_channel_sum() {
        let mut tile = Array3::<u8>::zeros((2, 2, 2));
        tile[[0, 0, 0]] = 60;
        tile[[1, 0, 0]] = 60; // sum 120 at (0, 0)
        tile[[0, 1, 1]] = 100; // sum 100 at (1, 1)
        let out = TileProcessor::<u8>::process(&Threshold { level: 110.0 }, tile.view()).unwrap();
        assert_eq!(out[[0, 0, 0]], 255);
        assert_eq!(out[[1, 0, 0]], 255);
        assert_eq!(out[[0, 1, 1]], 0);
        assert_eq!(out[[1, 1, 1]], 0);
    }

    #[test]
    fn test_invert() {
        let tile = Array3::<u16>::from_elem((1, 2, 2), 5);
        let out = TileProcessor::<u16>::process(&Invert, tile.view()).unwrap();
        assert!(out.iter().all(|&v| v == u16::MAX - 5));
    }

    #[test]
    fn test_boxed_processor_delegates() {
        let p = build_processor::<u8>(ProcessorKind::Identity, None).unwrap();
        assert_eq!(p.name(), "identity");
        let tile = Array3::<u8>::from_elem((3, 4, 4), 9);
        assert_eq!(p.process(tile.view()).unwrap(), tile);
    }

    #[test]
    fn test_threshold_requires_level() {
        assert!(matches!(
            build_processor::<u8>(ProcessorKind::Threshold, None),
            Err(Error::InvalidArgument { arg: "threshold", .. })
        ));
        assert!(build_processor::<u8>(ProcessorKind::Threshold, Some(f64::NAN)).is_err());
    }
}
