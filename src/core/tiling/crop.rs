use ndarray::{ArrayView3, Axis, Zip, s};
use tracing::debug;

use crate::error::{Error, Result};
use crate::types::{BoundingBox, CropMode, Image, Pixel};

pub(crate) fn ensure_non_empty<T>(image: &ArrayView3<'_, T>) -> Result<()> {
    let (height, width, channels) = image.dim();
    if height == 0 || width == 0 || channels == 0 {
        return Err(Error::dimension(format!(
            "image has a zero-length axis: {}x{}x{}",
            height, width, channels
        )));
    }
    Ok(())
}

/// Bounding box of the pixels whose channel sum is strictly positive.
pub fn foreground_bbox<T: Pixel>(image: ArrayView3<'_, T>, mode: CropMode) -> Result<BoundingBox> {
    ensure_non_empty(&image)?;
    let (height, width, _) = image.dim();

    // (y_min, y_max, x_min, x_max), inclusive while scanning
    let mut extent: Option<(usize, usize, usize, usize)> = None;
    Zip::indexed(image.lanes(Axis(2))).for_each(|(y, x), lane| {
        let sum: f64 = lane.iter().map(|v| v.intensity()).sum();
        if sum > 0.0 {
            extent = Some(match extent {
                None => (y, y, x, x),
                Some((y0, y1, x0, x1)) => (y0.min(y), y1.max(y), x0.min(x), x1.max(x)),
            });
        }
    });

    let (y_min, y_last, x_min, x_last) =
        extent.ok_or(Error::EmptyForeground { height, width })?;
    let bump = match mode {
        CropMode::Exclusive => 0,
        CropMode::Inclusive => 1,
    };
    let bbox = BoundingBox {
        y_min,
        y_max: y_last + bump,
        x_min,
        x_max: x_last + bump,
    };

    // A foreground one pixel thick collapses under the exclusive bound.
    if bbox.is_empty() {
        return Err(Error::EmptyForeground { height, width });
    }
    Ok(bbox)
}

/// Remove zero-valued borders. Returns the cropped copy and the box that was applied.
pub fn crop_by_edges<T: Pixel>(
    image: ArrayView3<'_, T>,
    mode: CropMode,
) -> Result<(Image<T>, BoundingBox)> {
    let bbox = foreground_bbox(image, mode)?;
    debug!(
        "Cropping {}x{} image to {} ({}x{})",
        image.dim().0,
        image.dim().1,
        bbox,
        bbox.height(),
        bbox.width()
    );
    let cropped = image
        .slice(s![bbox.y_min..bbox.y_max, bbox.x_min..bbox.x_max, ..])
        .to_owned();
    Ok((cropped, bbox))
}
