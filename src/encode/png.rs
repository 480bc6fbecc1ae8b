use std::io::Cursor;

use crate::foundation::error::{AlbumWallError, AlbumWallResult};
use crate::render::cpu::FrameRGBA;

/// Serialize a frame to PNG bytes (straight-alpha RGBA8).
pub fn encode_png(frame: &FrameRGBA) -> AlbumWallResult<Vec<u8>> {
    let mut data = frame.data.clone();
    if frame.premultiplied {
        unpremultiply_rgba8_in_place(&mut data);
    }
    let img = image::RgbaImage::from_raw(frame.width, frame.height, data).ok_or_else(|| {
        AlbumWallError::render(format!(
            "frame buffer does not match {}x{}",
            frame.width, frame.height
        ))
    })?;

    let mut out = Vec::new();
    img.write_to(&mut Cursor::new(&mut out), image::ImageFormat::Png)
        .map_err(|e| AlbumWallError::render(format!("png encode: {e}")))?;
    Ok(out)
}

pub(crate) fn unpremultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 || a == 255 {
            continue;
        }
        px[0] = ((px[0] as u16 * 255 + a / 2) / a).min(255) as u8;
        px[1] = ((px[1] as u16 * 255 + a / 2) / a).min(255) as u8;
        px[2] = ((px[2] as u16 * 255 + a / 2) / a).min(255) as u8;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/png.rs"]
mod tests;
