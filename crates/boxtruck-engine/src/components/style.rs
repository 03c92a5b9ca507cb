/// Flat RGB fill color, components in 0.0..=1.0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FillColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl FillColor {
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Build from a 0xRRGGBB literal.
    pub const fn hex(rgb: u32) -> Self {
        Self {
            r: ((rgb >> 16) & 0xff) as f32 / 255.0,
            g: ((rgb >> 8) & 0xff) as f32 / 255.0,
            b: (rgb & 0xff) as f32 / 255.0,
        }
    }
}

impl Default for FillColor {
    fn default() -> Self {
        Self::new(0.6, 0.6, 0.6)
    }
}

/// How an entity's shape is painted.
/// Entities without a style are simulated but never drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapeStyle {
    pub fill: FillColor,
    /// Opacity (0.0 = invisible, 1.0 = opaque).
    pub alpha: f32,
    /// Single character drawn centered on the shape (nametags).
    pub glyph: Option<char>,
    /// Color of the glyph.
    pub glyph_color: FillColor,
    /// Glyph font size in pixels.
    pub glyph_size: f32,
}

impl ShapeStyle {
    pub fn filled(fill: FillColor) -> Self {
        Self {
            fill,
            ..Default::default()
        }
    }

    pub fn with_glyph(mut self, glyph: char, color: FillColor, size: f32) -> Self {
        self.glyph = Some(glyph);
        self.glyph_color = color;
        self.glyph_size = size;
        self
    }
}

impl Default for ShapeStyle {
    fn default() -> Self {
        Self {
            fill: FillColor::default(),
            alpha: 1.0,
            glyph: None,
            glyph_color: FillColor::new(0.0, 0.0, 0.0),
            glyph_size: 0.0,
        }
    }
}
