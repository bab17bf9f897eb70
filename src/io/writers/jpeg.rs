use jpeg_encoder::{ColorType, Encoder};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use crate::error::{Error, Result};

fn jpeg_dims(cols: usize, rows: usize) -> Result<(u16, u16)> {
    let w = u16::try_from(cols).map_err(|_| Error::InvalidArgument {
        arg: "width",
        value: cols.to_string(),
    })?;
    let h = u16::try_from(rows).map_err(|_| Error::InvalidArgument {
        arg: "height",
        value: rows.to_string(),
    })?;
    Ok((w, h))
}

pub fn write_gray_jpeg(
    output: &Path,
    cols: usize,
    rows: usize,
    data: &[u8],
    quality: u8,
) -> Result<()> {
    let (w, h) = jpeg_dims(cols, rows)?;
    let file = File::create(output)?;
    let mut writer = BufWriter::new(file);
    let encoder = Encoder::new(&mut writer, quality);
    encoder
        .encode(data, w, h, ColorType::Luma)
        .map_err(Error::external)?;
    Ok(())
}

pub fn write_rgb_jpeg(
    output: &Path,
    cols: usize,
    rows: usize,
    rgb_data: &[u8],
    quality: u8,
) -> Result<()> {
    let (w, h) = jpeg_dims(cols, rows)?;
    let file = File::create(output)?;
    let mut writer = BufWriter::new(file);
    let encoder = Encoder::new(&mut writer, quality);
    encoder
        .encode(rgb_data, w, h, ColorType::Rgb)
        .map_err(Error::external)?;
    Ok(())
}
