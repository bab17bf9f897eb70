//! Disk round trip through tile directories and image files.

use ndarray::{Array3, s};
use tileslice::io::writers::MANIFEST_FILE;
use tileslice::{
    Error, Invert, OutputFormat, TileManifest, TilingParams, TilingService, load_image,
    process_file_to_path, read_tile_set, reconstruct_dir_to_file, reconstruct_image,
    slice_file_to_dir, slice_image, write_image, write_tile_set,
};

fn sample_rgb() -> Array3<u8> {
    Array3::from_shape_fn((21, 34, 3), |(y, x, c)| {
        if y < 2 || x < 3 {
            0
        } else {
            (10 + y * 5 + x * 2 + c * 20) as u8
        }
    })
}

#[test]
fn test_png_write_and_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sample.png");
    let img = sample_rgb();
    write_image(&path, img.view(), OutputFormat::Png, 90).unwrap();
    assert_eq!(load_image(&path).unwrap(), img);
}

#[test]
fn test_gray_png_keeps_single_channel() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("gray.png");
    let img = Array3::from_shape_fn((5, 4, 1), |(y, x, _)| (y * 4 + x) as u8);
    write_image(&path, img.view(), OutputFormat::Png, 90).unwrap();
    assert_eq!(load_image(&path).unwrap().dim(), (5, 4, 1));
}

#[test]
fn test_jpeg_rejects_alpha() {
    let dir = tempfile::tempdir().unwrap();
    let img = Array3::<u8>::from_elem((4, 4, 4), 1);
    let err = write_image(&dir.path().join("a.jpg"), img.view(), OutputFormat::Jpeg, 90).unwrap_err();
    assert!(matches!(err, Error::InvalidArgument { arg: "channels", .. }));
}

#[test]
fn test_tile_set_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let img = sample_rgb();
    let params = TilingParams {
        tile_size: 8,
        ..Default::default()
    };

    let sliced = slice_image(img.view(), 8).unwrap();
    let manifest = write_tile_set(dir.path(), &sliced, &params).unwrap();
    assert_eq!(manifest.tiles.len(), sliced.rows * sliced.cols);
    assert!(dir.path().join(MANIFEST_FILE).exists());
    assert!(dir.path().join(&manifest.tiles[0]).exists());

    let (batch, read_back) = read_tile_set(dir.path()).unwrap();
    assert_eq!(read_back, manifest);

    let expected = reconstruct_image(&sliced.tiles.into_batch().unwrap(), manifest.rows, manifest.cols)
        .unwrap();
    let restored = reconstruct_image(&batch, manifest.rows, manifest.cols).unwrap();
    assert_eq!(restored, expected);
}

#[test]
fn test_missing_tile_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let img = sample_rgb();
    let params = TilingParams {
        tile_size: 8,
        ..Default::default()
    };
    let sliced = slice_image(img.view(), 8).unwrap();
    let manifest = write_tile_set(dir.path(), &sliced, &params).unwrap();
    std::fs::remove_file(dir.path().join(&manifest.tiles[1])).unwrap();
    assert!(read_tile_set(dir.path()).is_err());
}

#[test]
fn test_truncated_manifest_is_shape_mismatch() {
    let dir = tempfile::tempdir().unwrap();
    let img = sample_rgb();
    let params = TilingParams {
        tile_size: 8,
        ..Default::default()
    };
    let sliced = slice_image(img.view(), 8).unwrap();
    let mut manifest = write_tile_set(dir.path(), &sliced, &params).unwrap();
    manifest.tiles.pop();
    manifest.write(dir.path()).unwrap();
    assert!(matches!(
        read_tile_set(dir.path()),
        Err(Error::ShapeMismatch { .. })
    ));
    assert_eq!(TileManifest::read(dir.path()).unwrap().tiles.len(), manifest.tiles.len());
}

#[test]
fn test_overflowing_manifest_grid_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let img = sample_rgb();
    let params = TilingParams {
        tile_size: 8,
        ..Default::default()
    };
    let sliced = slice_image(img.view(), 8).unwrap();
    let mut manifest = write_tile_set(dir.path(), &sliced, &params).unwrap();
    manifest.rows = usize::MAX / 2;
    manifest.cols = 3;
    manifest.write(dir.path()).unwrap();
    assert!(matches!(
        read_tile_set(dir.path()),
        Err(Error::ShapeMismatch { .. })
    ));
}

#[test]
fn test_manifest_cannot_reach_outside_tile_dir() {
    let root = tempfile::tempdir().unwrap();
    let tile_dir = root.path().join("tiles");
    let img = sample_rgb();
    let params = TilingParams {
        tile_size: 8,
        ..Default::default()
    };
    let sliced = slice_image(img.view(), 8).unwrap();
    let mut manifest = write_tile_set(&tile_dir, &sliced, &params).unwrap();

    // a valid tile placed next to, not inside, the tile directory
    std::fs::copy(tile_dir.join(&manifest.tiles[0]), root.path().join("outside.png")).unwrap();
    manifest.tiles[0] = "../outside.png".to_string();
    manifest.write(&tile_dir).unwrap();
    assert!(matches!(
        read_tile_set(&tile_dir),
        Err(Error::InvalidArgument { arg: "tile", .. })
    ));

    let absolute = root.path().join("outside.png");
    manifest.tiles[0] = absolute.to_string_lossy().into_owned();
    manifest.write(&tile_dir).unwrap();
    assert!(matches!(
        read_tile_set(&tile_dir),
        Err(Error::InvalidArgument { arg: "tile", .. })
    ));
}

#[test]
fn test_sixteen_bit_gray_stays_single_channel() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("gray16.png");
    let buf = image::ImageBuffer::<image::Luma<u16>, Vec<u16>>::from_fn(5, 3, |x, y| {
        image::Luma([((x + y) * 4096) as u16])
    });
    buf.save(&path).unwrap();
    let img = load_image(&path).unwrap();
    assert_eq!(img.dim(), (3, 5, 1));
    assert_eq!(img[[0, 0, 0]], 0);
    assert_eq!(img[[2, 4, 0]], 96);

    let path = dir.path().join("gray_alpha16.png");
    let buf = image::ImageBuffer::<image::LumaA<u16>, Vec<u16>>::from_pixel(
        4,
        4,
        image::LumaA([u16::MAX, u16::MAX]),
    );
    buf.save(&path).unwrap();
    let img = load_image(&path).unwrap();
    assert_eq!(img.dim(), (4, 4, 2));
    assert_eq!(img[[1, 1, 1]], 255);
}

#[test]
fn test_file_helpers() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.png");
    let tiles_dir = dir.path().join("tiles");
    let output = dir.path().join("out.png");
    write_image(&input, sample_rgb().view(), OutputFormat::Png, 90).unwrap();

    let params = TilingParams {
        tile_size: 16,
        ..Default::default()
    };
    let manifest = slice_file_to_dir(&input, &tiles_dir, &params).unwrap();
    // Exclusive crop of the 19x31 foreground leaves 18x30, padded to 32x32
    assert_eq!((manifest.cropped_height, manifest.cropped_width), (18, 30));
    assert_eq!((manifest.rows, manifest.cols), (2, 2));

    let dims = reconstruct_dir_to_file(&tiles_dir, &output, 90).unwrap();
    assert_eq!(dims, (32, 32, 3));

    let restored = load_image(&output).unwrap();
    let source = sample_rgb();
    assert_eq!(restored.slice(s![..18, ..30, ..]), source.slice(s![2..20, 3..33, ..]));
}

#[test]
fn test_process_file_with_invert() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.png");
    let output = dir.path().join("out.png");
    let img = Array3::<u8>::from_elem((9, 9, 1), 40);
    write_image(&input, img.view(), OutputFormat::Png, 90).unwrap();

    let params = TilingParams {
        tile_size: 4,
        ..Default::default()
    };
    let service = TilingService::new(Invert, params).unwrap();
    let result = process_file_to_path(&service, &input, &output).unwrap();
    assert_eq!((result.rows, result.cols), (2, 2));

    let written = load_image(&output).unwrap();
    assert_eq!(written.dim(), (8, 8, 1));
    assert!(written.iter().all(|&v| v == 215));
}
