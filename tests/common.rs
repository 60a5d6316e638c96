use image::{DynamicImage, GenericImageView, ImageBuffer, ImageReader, Rgb};
use std::path::Path;

pub fn write_test_image(path: &Path, width: u32, height: u32) {
    let buf = ImageBuffer::from_pixel(width, height, Rgb::<u8>([120, 60, 180]));
    DynamicImage::ImageRgb8(buf).save(path).unwrap();
}

pub fn read_dimensions(path: &Path) -> (u32, u32) {
    let img = ImageReader::open(path).unwrap().decode().unwrap();
    img.dimensions()
}
