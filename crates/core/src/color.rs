// Packed 32-bit colors and the float vector the shader consumes

/// Four-component float vector with the layout of libobs `struct vec4`.
#[repr(C, align(16))]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec4 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Vec4 {
    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }
}

/// Where each channel sits inside a packed `u32`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChannelOrder {
    /// OBS settings convention (`vec4_from_rgba`): red in the least-significant
    /// byte, alpha in the most-significant. Opaque red is `0xFF0000FF`.
    #[default]
    Obs,
    /// Red in the most-significant byte, alpha in the least-significant.
    Rgba,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PackedColor(pub u32);

impl PackedColor {
    /// Channel bytes as `[r, g, b, a]`.
    pub fn channels(self, order: ChannelOrder) -> [u8; 4] {
        match order {
            ChannelOrder::Obs => self.0.to_le_bytes(),
            ChannelOrder::Rgba => self.0.to_be_bytes(),
        }
    }

    pub fn to_vec4(self, order: ChannelOrder) -> Vec4 {
        let [r, g, b, a] = self.channels(order).map(normalize);
        Vec4::new(r, g, b, a)
    }
}

fn normalize(byte: u8) -> f32 {
    f32::from(byte) / 255.0
}
