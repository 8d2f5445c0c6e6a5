// Drawing surface abstraction used by the presenter

/// Axis-aligned rectangle in playfield units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Region {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Region {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// Fill color with opacity. Alpha below 1 blends over what is already drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Paint {
    pub rgb: [u8; 3],
    pub alpha: f32,
}

impl Paint {
    pub fn solid(rgb: [u8; 3]) -> Self {
        Self { rgb, alpha: 1.0 }
    }

    pub fn translucent(rgb: [u8; 3], alpha: f32) -> Self {
        Self {
            rgb,
            alpha: alpha.clamp(0.0, 1.0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

/// Something the presenter can draw onto, addressed in playfield units
pub trait Surface {
    /// Drawable width and height
    fn size(&self) -> (f32, f32);

    fn clear(&mut self, region: Region);

    fn fill_rect(&mut self, region: Region, paint: Paint);

    fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32, paint: Paint);

    /// Draw `text` with its baseline at `y`; `size` is the glyph height in playfield units
    fn fill_text(&mut self, text: &str, x: f32, y: f32, align: TextAlign, size: f32, paint: Paint);
}
