//! Shared types and enums used across tileslice.
//! Includes the `Pixel` element trait, `BoundingBox`, `CropMode`, `OutputFormat`
//! and the built-in `ProcessorKind` selector.
use clap::ValueEnum;
use ndarray::Array3;
use serde::{Deserialize, Serialize};

/// Channel-last image: (height, width, channel).
pub type Image<T> = Array3<T>;

/// Numeric pixel element. Values are assumed non-negative; `intensity` widens to `f64`
/// so channel sums never overflow narrow integer types.
pub trait Pixel: Copy + Default + PartialEq + std::fmt::Debug + Send + Sync + 'static {
    const MAX_VALUE: Self;

    fn intensity(self) -> f64;

    /// `MAX_VALUE - self`, saturating at zero.
    fn inverted(self) -> Self;
}

macro_rules! impl_pixel_int {
    ($($t:ty),*) => {
        $(
            impl Pixel for $t {
                const MAX_VALUE: Self = <$t>::MAX;

                #[inline]
                fn intensity(self) -> f64 {
                    self as f64
                }

                #[inline]
                fn inverted(self) -> Self {
                    <$t>::MAX - self
                }
            }
        )*
    };
}

impl_pixel_int!(u8, u16, u32);

// Float images are treated as normalized to [0, 1].
macro_rules! impl_pixel_float {
    ($($t:ty),*) => {
        $(
            impl Pixel for $t {
                const MAX_VALUE: Self = 1.0;

                #[inline]
                fn intensity(self) -> f64 {
                    self as f64
                }

                #[inline]
                fn inverted(self) -> Self {
                    (1.0 - self).max(0.0)
                }
            }
        )*
    };
}

impl_pixel_float!(f32, f64);

/// Foreground bounding box, half-open on the max side.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct BoundingBox {
    pub y_min: usize,
    pub y_max: usize,
    pub x_min: usize,
    pub x_max: usize,
}

impl BoundingBox {
    pub fn height(&self) -> usize {
        self.y_max.saturating_sub(self.y_min)
    }

    pub fn width(&self) -> usize {
        self.x_max.saturating_sub(self.x_min)
    }

    pub fn is_empty(&self) -> bool {
        self.height() == 0 || self.width() == 0
    }
}

impl std::fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "y={}..{}, x={}..{}",
            self.y_min, self.y_max, self.x_min, self.x_max
        )
    }
}

/// Upper bound used when turning the foreground extent into a crop.
#[derive(
    Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum CropMode {
    /// Upper bound is the last foreground coordinate itself, so that row/column is dropped.
    #[default]
    Exclusive,
    /// Upper bound is last foreground coordinate + 1.
    Inclusive,
}

impl std::fmt::Display for CropMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CropMode::Exclusive => write!(f, "exclusive"),
            CropMode::Inclusive => write!(f, "inclusive"),
        }
    }
}

#[derive(
    Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Png,
    Jpeg, // Lossy, preview only
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Png => "png",
            OutputFormat::Jpeg => "jpg",
        }
    }

    /// Guess the format from a file extension; unknown extensions fall back to PNG.
    pub fn from_path(path: &std::path::Path) -> Self {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .as_deref()
        {
            Some("jpg") | Some("jpeg") => OutputFormat::Jpeg,
            _ => OutputFormat::Png,
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Png => write!(f, "PNG"),
            OutputFormat::Jpeg => write!(f, "JPEG"),
        }
    }
}

/// Built-in per-tile processors selectable from the CLI.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProcessorKind {
    Identity,
    Threshold,
    Invert,
}

impl std::fmt::Display for ProcessorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ProcessorKind::Identity => "identity",
            ProcessorKind::Threshold => "threshold",
            ProcessorKind::Invert => "invert",
        };
        write!(f, "{}", s)
    }
}
