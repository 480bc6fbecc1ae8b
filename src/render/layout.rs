use crate::foundation::core::CollageSpec;

/// Pixel placement of one grid cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cell {
    pub row: u32,
    pub col: u32,
    pub x: u32,
    pub y: u32,
    pub size: u32,
}

impl Cell {
    /// Cell bounds as a rectangle in canvas space.
    pub fn rect(&self) -> kurbo::Rect {
        kurbo::Rect::new(
            f64::from(self.x),
            f64::from(self.y),
            f64::from(self.x + self.size),
            f64::from(self.y + self.size),
        )
    }

    /// Return `true` when the canvas pixel `(px, py)` lies inside this cell.
    pub fn contains_pixel(&self, px: u32, py: u32) -> bool {
        px >= self.x && px < self.x + self.size && py >= self.y && py < self.y + self.size
    }
}

/// Row-major grid geometry, centered on the canvas.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridLayout {
    spec: CollageSpec,
    x_offset: u32,
    y_offset: u32,
}

impl GridLayout {
    /// Derive the layout of a validated spec.
    pub fn new(spec: &CollageSpec) -> Self {
        Self {
            spec: *spec,
            x_offset: spec.canvas_width.saturating_sub(spec.grid_width()) / 2,
            y_offset: spec.canvas_height.saturating_sub(spec.grid_height()) / 2,
        }
    }

    /// Left edge of the grid bounding box.
    pub fn x_offset(&self) -> u32 {
        self.x_offset
    }

    /// Top edge of the grid bounding box.
    pub fn y_offset(&self) -> u32 {
        self.y_offset
    }

    /// Number of cells in the grid.
    pub fn capacity(&self) -> usize {
        self.spec.grid_capacity()
    }

    /// Placement of source `index`, or `None` past the grid capacity.
    pub fn cell(&self, index: usize) -> Option<Cell> {
        if index >= self.capacity() {
            return None;
        }
        let columns = self.spec.columns as usize;
        let row = (index / columns) as u32;
        let col = (index % columns) as u32;
        Some(Cell {
            row,
            col,
            x: self.x_offset + col * self.spec.cell_size,
            y: self.y_offset + row * self.spec.cell_size,
            size: self.spec.cell_size,
        })
    }

    /// Iterate every cell in placement order.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (0..self.capacity()).filter_map(|i| self.cell(i))
    }

    /// Bounding box of the whole grid.
    pub fn grid_rect(&self) -> kurbo::Rect {
        kurbo::Rect::new(
            f64::from(self.x_offset),
            f64::from(self.y_offset),
            f64::from(self.x_offset + self.spec.grid_width()),
            f64::from(self.y_offset + self.spec.grid_height()),
        )
    }

    /// Clip shape applied before any cell is drawn.
    pub fn clip_shape(&self) -> kurbo::RoundedRect {
        self.grid_rect().to_rounded_rect(self.spec.corner_radius)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/layout.rs"]
mod tests;
