//! Image fixtures generated in memory

use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use std::io::Cursor;
use std::path::{Path, PathBuf};

/// A small gradient JPEG, wide enough that a square resize has to crop
pub fn create_test_jpeg(width: u32, height: u32) -> Vec<u8> {
    let mut img = RgbImage::new(width, height);
    for (x, y, pixel) in img.enumerate_pixels_mut() {
        *pixel = Rgb([(x % 256) as u8, (y % 256) as u8, 128]);
    }
    let mut buffer = Vec::new();
    DynamicImage::ImageRgb8(img)
        .write_to(&mut Cursor::new(&mut buffer), ImageFormat::Jpeg)
        .expect("encode jpeg fixture");
    buffer
}

/// Write `picture.jpg` into `dir` and return its path and bytes
pub fn write_picture(dir: &Path) -> (PathBuf, Vec<u8>) {
    let data = create_test_jpeg(640, 480);
    let path = dir.join("picture.jpg");
    std::fs::write(&path, &data).expect("write fixture");
    (path, data)
}
