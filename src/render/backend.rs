use crate::foundation::math::unpremultiply_in_place;

#[derive(Clone, Debug, PartialEq, Eq)]
/// Rendered card pixels.
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    /// Whether the `data` is premultiplied alpha.
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

    /// Convert to straight alpha in place; no-op when already straight.
    pub fn into_straight(mut self) -> Self {
        if self.premultiplied {
            unpremultiply_in_place(&mut self.data);
            self.premultiplied = false;
        }
        self
    }
}
