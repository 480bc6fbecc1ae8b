use std::io::Cursor;

use super::*;

fn encode(img: image::RgbaImage, format: image::ImageFormat) -> Vec<u8> {
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), format)
        .unwrap();
    buf
}

#[test]
fn decode_image_png_dimensions_and_premul() {
    let img = image::RgbaImage::from_raw(1, 1, vec![100u8, 50u8, 200u8, 128u8]).unwrap();
    let prepared = decode_image(&encode(img, image::ImageFormat::Png)).unwrap();
    assert_eq!(prepared.width, 1);
    assert_eq!(prepared.height, 1);
    assert_eq!(
        prepared.rgba8_premul.as_slice(),
        &[
            ((100u16 * 128 + 127) / 255) as u8,
            ((50u16 * 128 + 127) / 255) as u8,
            ((200u16 * 128 + 127) / 255) as u8,
            128u8
        ]
    );
}

#[test]
fn decode_image_accepts_jpeg_covers() {
    let rgb = image::RgbImage::from_pixel(8, 6, image::Rgb([200, 30, 30]));
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgb8(rgb)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Jpeg)
        .unwrap();

    let prepared = decode_image(&buf).unwrap();
    assert_eq!((prepared.width, prepared.height), (8, 6));
    assert_eq!(prepared.rgba8_premul.len(), 8 * 6 * 4);
    assert!(prepared.rgba8_premul.chunks_exact(4).all(|px| px[3] == 255));
}

#[test]
fn decode_image_rejects_garbage() {
    let err = decode_image(b"<html>not an image</html>").unwrap_err();
    assert!(matches!(err, ImageFailure::Decode(_)));
}

#[test]
fn premultiply_zeroes_fully_transparent_pixels() {
    let mut px = vec![255u8, 255, 255, 0, 255, 0, 0, 255];
    premultiply_rgba8_in_place(&mut px);
    assert_eq!(px, vec![0, 0, 0, 0, 255, 0, 0, 255]);
}
