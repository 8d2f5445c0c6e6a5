//! Braille canvas for high-resolution terminal rendering
//! Each terminal cell contains a 2×4 grid of Braille dots
//! This gives us 2× horizontal and 4× vertical resolution
//!
//! The canvas implements [`Surface`] in playfield units: the field is scaled uniformly
//! to fit the dot grid and centered in it.

use super::surface::{Paint, Region, Surface, TextAlign};

// Text at least this tall (in dots) is drawn with the dot font instead of characters
const LARGE_TEXT_DOTS: f32 = 8.0;

// 3×5 dot font for score digits, one row per byte, bit 2 = leftmost column
const DIGITS: [[u8; 5]; 10] = [
    [0b111, 0b101, 0b101, 0b101, 0b111],
    [0b010, 0b110, 0b010, 0b010, 0b111],
    [0b111, 0b001, 0b111, 0b100, 0b111],
    [0b111, 0b001, 0b111, 0b001, 0b111],
    [0b101, 0b101, 0b111, 0b001, 0b001],
    [0b111, 0b100, 0b111, 0b001, 0b111],
    [0b111, 0b100, 0b111, 0b101, 0b111],
    [0b111, 0b001, 0b010, 0b010, 0b010],
    [0b111, 0b101, 0b111, 0b101, 0b111],
    [0b111, 0b101, 0b111, 0b001, 0b111],
];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cell {
    /// Braille dot pattern (0-255)
    pub dots: u8,
    /// Character drawn over the dots
    pub glyph: Option<char>,
    pub bold: bool,
    pub color: [u8; 3],
}

impl Cell {
    const EMPTY: Cell = Cell {
        dots: 0,
        glyph: None,
        bold: false,
        color: [0, 0, 0],
    };

    /// Character shown for this cell
    pub fn symbol(&self) -> char {
        self.glyph
            .unwrap_or_else(|| char::from_u32(0x2800 + self.dots as u32).unwrap_or(' '))
    }
}

pub struct BrailleCanvas {
    width: usize,  // Width in terminal cells
    height: usize, // Height in terminal cells
    cells: Vec<Cell>,
    field_width: f32,
    field_height: f32,
    scale: f32, // Dots per playfield unit
    offset_x: f32,
    offset_y: f32,
}

impl BrailleCanvas {
    pub fn new(width: usize, height: usize, field_width: f32, field_height: f32) -> Self {
        let dot_width = (width * 2) as f32;
        let dot_height = (height * 4) as f32;
        let scale = if field_width > 0.0 && field_height > 0.0 {
            (dot_width / field_width).min(dot_height / field_height)
        } else {
            0.0
        };
        Self {
            width,
            height,
            cells: vec![Cell::EMPTY; width * height],
            field_width,
            field_height,
            scale,
            offset_x: (dot_width - field_width * scale) / 2.0,
            offset_y: (dot_height - field_height * scale) / 2.0,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn cell(&self, cell_x: usize, cell_y: usize) -> Cell {
        if cell_x >= self.width || cell_y >= self.height {
            return Cell::EMPTY;
        }
        self.cells[cell_y * self.width + cell_x]
    }

    fn cell_mut(&mut self, cell_x: usize, cell_y: usize) -> Option<&mut Cell> {
        if cell_x >= self.width || cell_y >= self.height {
            return None;
        }
        Some(&mut self.cells[cell_y * self.width + cell_x])
    }

    /// Set a dot at pixel coordinates
    /// pixel_x: 0 to (width * 2 - 1)
    /// pixel_y: 0 to (height * 4 - 1)
    pub fn set_pixel(&mut self, pixel_x: usize, pixel_y: usize, color: [u8; 3]) {
        let dot_x = pixel_x % 2; // 0 or 1 (left or right column)
        let dot_y = pixel_y % 4; // 0, 1, 2, or 3 (row within cell)

        // Braille dot numbering:
        // 1 4
        // 2 5
        // 3 6
        // 7 8
        let dot_index = match (dot_x, dot_y) {
            (0, 0) => 0,
            (0, 1) => 1,
            (0, 2) => 2,
            (0, 3) => 6,
            (1, 0) => 3,
            (1, 1) => 4,
            (1, 2) => 5,
            (1, 3) => 7,
            _ => unreachable!(),
        };

        if let Some(cell) = self.cell_mut(pixel_x / 2, pixel_y / 4) {
            cell.dots |= 1 << dot_index;
            cell.color = color;
        }
    }

    fn to_dots(&self, x: f32, y: f32) -> (f32, f32) {
        (self.offset_x + x * self.scale, self.offset_y + y * self.scale)
    }

    /// Dot index range covered by `[from, to)`, at least one dot wide, clipped to `limit`
    fn dot_span(from: f32, to: f32, limit: usize) -> std::ops::Range<usize> {
        let start = from.floor().max(0.0) as usize;
        let end = (to.ceil().max(0.0) as usize).max(start + 1);
        start.min(limit)..end.min(limit)
    }

    fn dot_rect(&self, region: Region) -> (std::ops::Range<usize>, std::ops::Range<usize>) {
        let (x0, y0) = self.to_dots(region.x, region.y);
        let (x1, y1) = self.to_dots(region.x + region.width, region.y + region.height);
        (
            Self::dot_span(x0, x1, self.width * 2),
            Self::dot_span(y0, y1, self.height * 4),
        )
    }

    /// Blend every cell touched by the dot rectangle toward `paint`
    fn shade(&mut self, xs: std::ops::Range<usize>, ys: std::ops::Range<usize>, paint: Paint) {
        if xs.is_empty() || ys.is_empty() {
            return;
        }
        for cy in ys.start / 4..=(ys.end - 1) / 4 {
            for cx in xs.start / 2..=(xs.end - 1) / 2 {
                if let Some(cell) = self.cell_mut(cx, cy) {
                    for (c, p) in cell.color.iter_mut().zip(paint.rgb) {
                        *c = (*c as f32 * (1.0 - paint.alpha) + p as f32 * paint.alpha).round() as u8;
                    }
                }
            }
        }
    }

    fn draw_digits(&mut self, text: &str, x: f32, y: f32, align: TextAlign, size_dots: f32, color: [u8; 3]) {
        let k = ((size_dots / 5.0).round() as usize).max(1);
        let glyph_width = 3 * k;
        let count = text.chars().count();
        let total = count * glyph_width + count.saturating_sub(1) * k;

        let (anchor_x, baseline) = self.to_dots(x, y);
        let left = match align {
            TextAlign::Left => anchor_x,
            TextAlign::Center => anchor_x - total as f32 / 2.0,
            TextAlign::Right => anchor_x - total as f32,
        }
        .max(0.0) as usize;
        let top = (baseline - (5 * k) as f32).max(0.0) as usize;

        for (i, digit) in text.chars().filter_map(|c| c.to_digit(10)).enumerate() {
            let glyph_left = left + i * (glyph_width + k);
            for (row, &bits) in DIGITS[digit as usize].iter().enumerate() {
                for col in 0..3 {
                    if bits & (0b100u8 >> col) == 0 {
                        continue;
                    }
                    for dy in 0..k {
                        for dx in 0..k {
                            self.set_pixel(glyph_left + col * k + dx, top + row * k + dy, color);
                        }
                    }
                }
            }
        }
    }

    fn draw_glyphs(&mut self, text: &str, x: f32, y: f32, align: TextAlign, size_dots: f32, color: [u8; 3]) {
        let bold = size_dots >= LARGE_TEXT_DOTS;
        let (anchor_x, baseline) = self.to_dots(x, y);
        let col = (anchor_x / 2.0).max(0.0) as usize;
        // Vertically center the character row on the glyph box
        let row = ((baseline - size_dots / 2.0).max(0.0) / 4.0) as usize;
        let len = text.chars().count();
        let start = match align {
            TextAlign::Left => col,
            TextAlign::Center => col.saturating_sub(len / 2),
            TextAlign::Right => col.saturating_sub(len),
        };

        for (i, ch) in text.chars().enumerate() {
            if let Some(cell) = self.cell_mut(start + i, row) {
                cell.glyph = Some(ch);
                cell.bold = bold;
                cell.color = color;
            }
        }
    }
}

impl Surface for BrailleCanvas {
    fn size(&self) -> (f32, f32) {
        (self.field_width, self.field_height)
    }

    fn clear(&mut self, region: Region) {
        let (xs, ys) = self.dot_rect(region);
        if xs.is_empty() || ys.is_empty() {
            return;
        }
        for cy in ys.start / 4..=(ys.end - 1) / 4 {
            for cx in xs.start / 2..=(xs.end - 1) / 2 {
                if let Some(cell) = self.cell_mut(cx, cy) {
                    *cell = Cell::EMPTY;
                }
            }
        }
    }

    fn fill_rect(&mut self, region: Region, paint: Paint) {
        let (xs, ys) = self.dot_rect(region);
        if paint.alpha < 1.0 {
            self.shade(xs, ys, paint);
            return;
        }
        for py in ys {
            for px in xs.clone() {
                self.set_pixel(px, py, paint.rgb);
            }
        }
    }

    fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32, paint: Paint) {
        let (center_x, center_y) = self.to_dots(cx, cy);
        // Half a dot of slack so small balls still look round
        let r = radius * self.scale + 0.5;
        let xs = Self::dot_span(center_x - r, center_x + r, self.width * 2);
        let ys = Self::dot_span(center_y - r, center_y + r, self.height * 4);

        for py in ys {
            for px in xs.clone() {
                let dx = px as f32 + 0.5 - center_x;
                let dy = py as f32 + 0.5 - center_y;
                if dx * dx + dy * dy <= r * r {
                    self.set_pixel(px, py, paint.rgb);
                }
            }
        }
    }

    fn fill_text(&mut self, text: &str, x: f32, y: f32, align: TextAlign, size: f32, paint: Paint) {
        let size_dots = size * self.scale;
        let all_digits = !text.is_empty() && text.chars().all(|c| c.is_ascii_digit());
        if all_digits && size_dots >= LARGE_TEXT_DOTS {
            self.draw_digits(text, x, y, align, size_dots, paint.rgb);
        } else {
            self.draw_glyphs(text, x, y, align, size_dots, paint.rgb);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: [u8; 3] = [255, 255, 255];

    #[test]
    fn test_braille_canvas() {
        // 2×2 cells = 4×8 dots, field maps one unit to one dot
        let mut canvas = BrailleCanvas::new(2, 2, 4.0, 8.0);

        canvas.set_pixel(0, 0, WHITE);
        assert_eq!(canvas.cell(0, 0).symbol(), '⠁'); // dot 1

        canvas.clear(Region::new(0.0, 0.0, 4.0, 8.0));
        assert_eq!(canvas.cell(0, 0).dots, 0);

        canvas.fill_rect(Region::new(0.0, 0.0, 2.0, 4.0), Paint::solid(WHITE));
        assert_eq!(canvas.cell(0, 0).symbol(), '⣿');
        assert_eq!(canvas.cell(1, 0).dots, 0);
    }

    #[test]
    fn test_field_is_scaled_and_centered() {
        // 10×5 cells = 20×20 dots; a 40×20 field scales by 0.5 and sits in the middle rows
        let mut canvas = BrailleCanvas::new(10, 5, 40.0, 20.0);
        assert_eq!(canvas.size(), (40.0, 20.0));

        canvas.fill_rect(Region::new(0.0, 0.0, 2.0, 2.0), Paint::solid(WHITE));

        // Top-left of the field lands 5 dots down, i.e. row 1 of cells
        assert_eq!(canvas.cell(0, 0).dots, 0);
        assert_ne!(canvas.cell(0, 1).dots, 0);
    }

    #[test]
    fn test_translucent_fill_dims_without_adding_dots() {
        let mut canvas = BrailleCanvas::new(2, 1, 4.0, 4.0);
        canvas.set_pixel(0, 0, WHITE);

        canvas.fill_rect(Region::new(0.0, 0.0, 4.0, 4.0), Paint::translucent([0, 0, 0], 0.6));

        let cell = canvas.cell(0, 0);
        assert_eq!(cell.dots, 1);
        assert_eq!(cell.color, [102, 102, 102]);
        assert_eq!(canvas.cell(1, 0).dots, 0);
    }

    #[test]
    fn test_circle_is_drawn_around_center() {
        let mut canvas = BrailleCanvas::new(10, 5, 20.0, 20.0);
        canvas.fill_circle(10.0, 10.0, 2.0, Paint::solid(WHITE));

        assert_ne!(canvas.cell(5, 2).dots, 0);
        assert_eq!(canvas.cell(0, 0).dots, 0);
        assert_eq!(canvas.cell(9, 4).dots, 0);
    }

    #[test]
    fn test_large_digits_use_dot_font() {
        let mut canvas = BrailleCanvas::new(20, 5, 40.0, 20.0);
        canvas.fill_text("7", 20.0, 15.0, TextAlign::Center, 10.0, Paint::solid(WHITE));

        assert!((0..20).any(|x| (0..5).any(|y| canvas.cell(x, y).dots != 0)));
        assert!((0..20).all(|x| (0..5).all(|y| canvas.cell(x, y).glyph.is_none())));
    }

    #[test]
    fn test_small_text_is_centered_glyphs() {
        let mut canvas = BrailleCanvas::new(20, 5, 40.0, 20.0);
        canvas.fill_text("Paused", 20.0, 10.0, TextAlign::Center, 2.0, Paint::solid(WHITE));

        let row: String = (0..20)
            .filter_map(|x| canvas.cell(x, 2).glyph)
            .collect();
        assert_eq!(row, "Paused");
        assert_eq!(canvas.cell(7, 2).glyph, Some('P'));
    }
}
