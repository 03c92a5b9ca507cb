use bytemuck::{Pod, Zeroable};

/// Outline of a drawn shape, in world units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShapeGeometry {
    Rect { half_width: f32, half_height: f32 },
    Circle { radius: f32 },
}

impl ShapeGeometry {
    /// Wire code for the `kind` field.
    pub fn kind(&self) -> f32 {
        match self {
            ShapeGeometry::Rect { .. } => ShapeInstance::KIND_RECT,
            ShapeGeometry::Circle { .. } => ShapeInstance::KIND_CIRCLE,
        }
    }

    fn half_extents(&self) -> (f32, f32) {
        match *self {
            ShapeGeometry::Rect { half_width, half_height } => (half_width, half_height),
            ShapeGeometry::Circle { radius } => (radius, radius),
        }
    }
}

/// Per-shape render data read by the host page's canvas painter.
/// Must match `web/main.js`: 13 floats = 52 bytes stride.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct ShapeInstance {
    /// X position in world space.
    pub x: f32,
    /// Y position in world space.
    pub y: f32,
    /// Rotation in radians.
    pub rotation: f32,
    /// 0 = rectangle, 1 = circle.
    pub kind: f32,
    /// Half width (radius for circles).
    pub half_width: f32,
    /// Half height (radius for circles).
    pub half_height: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
    /// Opacity (0.0 = invisible, 1.0 = opaque).
    pub alpha: f32,
    /// Unicode scalar of a centered glyph, 0 for none.
    pub glyph: f32,
    /// Glyph color packed as 0xRRGGBB.
    pub glyph_rgb: f32,
    /// Glyph font size in pixels.
    pub glyph_size: f32,
}

impl ShapeInstance {
    pub const FLOATS: usize = 13;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;

    pub const KIND_RECT: f32 = 0.0;
    pub const KIND_CIRCLE: f32 = 1.0;

    /// Place a geometry at a transform; color fields are left zeroed.
    pub fn new(x: f32, y: f32, rotation: f32, geometry: ShapeGeometry) -> Self {
        let (half_width, half_height) = geometry.half_extents();
        Self {
            x,
            y,
            rotation,
            kind: geometry.kind(),
            half_width,
            half_height,
            ..Default::default()
        }
    }
}

/// Shape buffer rebuilt every frame, in draw order.
pub struct ShapeBuffer {
    pub instances: Vec<ShapeInstance>,
    capacity: usize,
}

impl ShapeBuffer {
    pub fn new() -> Self {
        Self::with_capacity(512)
    }

    /// Buffer that holds at most `capacity` shapes; extra pushes are dropped.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            instances: Vec::with_capacity(capacity),
            capacity,
        }
    }

    pub fn clear(&mut self) {
        self.instances.clear();
    }

    /// Append a shape. Returns `false` when the buffer is full.
    pub fn push(&mut self, instance: ShapeInstance) -> bool {
        if self.instances.len() >= self.capacity {
            return false;
        }
        self.instances.push(instance);
        true
    }

    pub fn instance_count(&self) -> u32 {
        self.instances.len() as u32
    }

    /// Raw pointer to instance data for reads from JS memory views.
    pub fn instances_ptr(&self) -> *const f32 {
        self.instances.as_ptr() as *const f32
    }
}

impl Default for ShapeBuffer {
    fn default() -> Self {
        Self::new()
    }
}
