use crate::foundation::error::{AlbumWallError, AlbumWallResult};

/// Straight-alpha RGBA8 color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    /// Fully opaque color.
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Parse `#rrggbb` or `#rrggbbaa` (leading `#` optional).
    pub fn from_hex(s: &str) -> AlbumWallResult<Self> {
        let hex = s.trim().trim_start_matches('#');
        if hex.len() != 6 && hex.len() != 8 {
            return Err(AlbumWallError::config(format!("invalid hex color '{s}'")));
        }
        let channel = |i: usize| {
            hex.get(i..i + 2)
                .and_then(|c| u8::from_str_radix(c, 16).ok())
                .ok_or_else(|| AlbumWallError::config(format!("invalid hex color '{s}'")))
        };
        Ok(Self {
            r: channel(0)?,
            g: channel(2)?,
            b: channel(4)?,
            a: if hex.len() == 8 { channel(6)? } else { 255 },
        })
    }

    /// Channels as an `[r, g, b, a]` array.
    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

/// Geometry and colors of the generated wall.
///
/// The defaults reproduce the classic 2560x1664 wallpaper: a 10x5 grid of 200px covers,
/// centered, with 25px rounded corners over a near-black letterbox.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CollageSpec {
    pub canvas_width: u32,
    pub canvas_height: u32,
    pub cell_size: u32,
    pub columns: u32,
    pub rows: u32,
    pub corner_radius: f64,
    pub background: Rgba8,
}

impl Default for CollageSpec {
    fn default() -> Self {
        Self {
            canvas_width: 2560,
            canvas_height: 1664,
            cell_size: 200,
            columns: 10,
            rows: 5,
            corner_radius: 25.0,
            background: Rgba8::opaque(0x0a, 0x0a, 0x0a),
        }
    }
}

impl CollageSpec {
    /// Maximum number of sources a render can place.
    pub fn grid_capacity(&self) -> usize {
        (self.columns as usize).saturating_mul(self.rows as usize)
    }

    /// Width of the grid bounding box in pixels.
    pub fn grid_width(&self) -> u32 {
        self.columns.saturating_mul(self.cell_size)
    }

    /// Height of the grid bounding box in pixels.
    pub fn grid_height(&self) -> u32 {
        self.rows.saturating_mul(self.cell_size)
    }

    /// Check the geometric invariants the renderer relies on.
    pub fn validate(&self) -> AlbumWallResult<()> {
        if self.canvas_width == 0 || self.canvas_height == 0 {
            return Err(AlbumWallError::config("canvas dimensions must be > 0"));
        }
        if self.canvas_width > u32::from(u16::MAX) || self.canvas_height > u32::from(u16::MAX) {
            return Err(AlbumWallError::config(format!(
                "canvas {}x{} exceeds the raster limit of {}",
                self.canvas_width,
                self.canvas_height,
                u16::MAX
            )));
        }
        if self.cell_size == 0 || self.columns == 0 || self.rows == 0 {
            return Err(AlbumWallError::config(
                "cell_size, columns and rows must be > 0",
            ));
        }
        if self.grid_width() > self.canvas_width {
            return Err(AlbumWallError::config(format!(
                "{} columns of {}px do not fit a {}px wide canvas",
                self.columns, self.cell_size, self.canvas_width
            )));
        }
        if self.grid_height() > self.canvas_height {
            return Err(AlbumWallError::config(format!(
                "{} rows of {}px do not fit a {}px tall canvas",
                self.rows, self.cell_size, self.canvas_height
            )));
        }
        let max_radius = f64::from(self.grid_width().min(self.grid_height())) / 2.0;
        if !self.corner_radius.is_finite()
            || self.corner_radius < 0.0
            || self.corner_radius > max_radius
        {
            return Err(AlbumWallError::config(format!(
                "corner_radius must be finite and within [0, {max_radius}]"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
