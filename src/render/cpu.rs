use std::sync::Arc;

use kurbo::Shape;

use crate::assets::decode::PreparedImage;
use crate::foundation::core::CollageSpec;
use crate::foundation::error::{AlbumWallError, AlbumWallResult};
use crate::render::layout::GridLayout;

#[derive(Clone, Debug)]
pub struct FrameRGBA {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
    pub premultiplied: bool,
}

impl FrameRGBA {
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        self.data
            .get(i..i + 4)
            .map(|px| [px[0], px[1], px[2], px[3]])
    }
}

pub struct CollageCanvas {
    layout: GridLayout,
    width: u16,
    height: u16,
    ctx: vello_cpu::RenderContext,
}

impl CollageCanvas {
    pub fn new(spec: &CollageSpec) -> AlbumWallResult<Self> {
        spec.validate()?;
        let width: u16 = spec
            .canvas_width
            .try_into()
            .map_err(|_| AlbumWallError::render("canvas width exceeds u16"))?;
        let height: u16 = spec
            .canvas_height
            .try_into()
            .map_err(|_| AlbumWallError::render("canvas height exceeds u16"))?;

        let layout = GridLayout::new(spec);
        let mut ctx = vello_cpu::RenderContext::new(width, height);

        let bg = spec.background;
        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(bg.r, bg.g, bg.b, bg.a));
        ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            0.0,
            0.0,
            f64::from(width),
            f64::from(height),
        ));

        let mut clip = vello_cpu::kurbo::BezPath::new();
        for el in layout.clip_shape().path_elements(0.1) {
            clip.push(el);
        }
        ctx.push_clip_layer(&clip);

        Ok(Self {
            layout,
            width,
            height,
            ctx,
        })
    }

    pub fn layout(&self) -> &GridLayout {
        &self.layout
    }

    pub fn draw_cell(&mut self, index: usize, image: &PreparedImage) -> AlbumWallResult<()> {
        let cell = self.layout.cell(index).ok_or_else(|| {
            AlbumWallError::render(format!(
                "cell {index} is outside a grid of {}",
                self.layout.capacity()
            ))
        })?;
        let paint = image_paint(image)?;

        let (w, h) = (f64::from(image.width), f64::from(image.height));
        let size = f64::from(cell.size);
        let tr = vello_cpu::kurbo::Affine::translate((f64::from(cell.x), f64::from(cell.y)))
            * vello_cpu::kurbo::Affine::scale_non_uniform(size / w, size / h);

        self.ctx.set_blend_mode(vello_cpu::peniko::BlendMode::default());
        self.ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx.set_transform(tr);
        self.ctx.set_paint(paint);
        self.ctx.fill_rect(&vello_cpu::kurbo::Rect::new(0.0, 0.0, w, h));
        self.ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        Ok(())
    }

    pub fn finish(mut self) -> AlbumWallResult<FrameRGBA> {
        self.ctx.pop_layer();
        self.ctx.flush();

        let mut pixmap = vello_cpu::Pixmap::new(self.width, self.height);
        self.ctx.render_to_pixmap(&mut pixmap);

        let data = pixmap.data_as_u8_slice().to_vec();
        let expected = (self.width as usize) * (self.height as usize) * 4;
        if data.len() != expected {
            return Err(AlbumWallError::render(format!(
                "surface readback has {} bytes, expected {expected}",
                data.len()
            )));
        }

        Ok(FrameRGBA {
            width: u32::from(self.width),
            height: u32::from(self.height),
            data,
            premultiplied: true,
        })
    }
}

fn image_paint(image: &PreparedImage) -> AlbumWallResult<vello_cpu::Image> {
    let pixmap = pixmap_from_premul_bytes(&image.rgba8_premul, image.width, image.height)?;
    Ok(vello_cpu::Image {
        image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
        sampler: vello_cpu::peniko::ImageSampler::default(),
    })
}

fn pixmap_from_premul_bytes(
    bytes: &[u8],
    width: u32,
    height: u32,
) -> AlbumWallResult<vello_cpu::Pixmap> {
    let w: u16 = width
        .try_into()
        .map_err(|_| AlbumWallError::render("pixmap width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| AlbumWallError::render("pixmap height exceeds u16"))?;
    if bytes.len()
        != (width as usize)
            .saturating_mul(height as usize)
            .saturating_mul(4)
    {
        return Err(AlbumWallError::render("pixmap byte len mismatch"));
    }
    let pixels: Vec<vello_cpu::peniko::color::PremulRgba8> = bytes
        .chunks_exact(4)
        .map(|px| {
            vello_cpu::peniko::color::PremulRgba8::from_u8_array([px[0], px[1], px[2], px[3]])
        })
        .collect();
    // Pixmap stores PremulRgba8; covers may carry alpha.
    Ok(vello_cpu::Pixmap::from_parts_with_opacity(
        pixels, w, h, true,
    ))
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
