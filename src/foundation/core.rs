use crate::foundation::error::{CardError, CardResult};

pub use kurbo::{Affine, Point, Rect, RoundedRect, Size, Vec2};

/// Edge length of the canonical card, in logical units.
pub const CANONICAL_SIZE: u32 = 1200;

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
}

impl Canvas {
    pub const CANONICAL: Self = Self {
        width: CANONICAL_SIZE,
        height: CANONICAL_SIZE,
    };

    pub fn square(edge: u32) -> Self {
        Self {
            width: edge,
            height: edge,
        }
    }

    pub fn size(self) -> Size {
        Size::new(f64::from(self.width), f64::from(self.height))
    }
}

/// Straight (non-premultiplied) RGB color parsed from `#RRGGBB`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Rgb8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb8 {
    pub const BLACK: Self = Self { r: 0, g: 0, b: 0 };
    pub const WHITE: Self = Self {
        r: 255,
        g: 255,
        b: 255,
    };

    pub fn parse_hex(s: &str) -> CardResult<Self> {
        let digits = s
            .trim()
            .strip_prefix('#')
            .ok_or_else(|| CardError::validation(format!("hex color \"{s}\" must start with '#'")))?;
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(CardError::validation(format!(
                "hex color \"{s}\" must be #RRGGBB"
            )));
        }

        fn hex_byte(pair: &str) -> CardResult<u8> {
            u8::from_str_radix(pair, 16)
                .map_err(|_| CardError::validation(format!("invalid hex byte \"{pair}\"")))
        }

        Ok(Self {
            r: hex_byte(&digits[0..2])?,
            g: hex_byte(&digits[2..4])?,
            b: hex_byte(&digits[4..6])?,
        })
    }

    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    pub fn with_alpha(self, a: f64) -> Rgba8Premul {
        let a = (a.clamp(0.0, 1.0) * 255.0).round() as u8;
        Rgba8Premul::from_straight_rgba(self.r, self.g, self.b, a)
    }
}

/// Premultiplied RGBA8 (r,g,b already multiplied by a).
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgba8Premul {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8Premul {
    pub fn transparent() -> Self {
        Self {
            r: 0,
            g: 0,
            b: 0,
            a: 0,
        }
    }

    pub fn from_straight_rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        fn premul(c: u8, a: u8) -> u8 {
            let c = u16::from(c);
            let a = u16::from(a);
            (((c * a) + 127) / 255) as u8
        }

        Self {
            r: premul(r, a),
            g: premul(g, a),
            b: premul(b, a),
            a,
        }
    }

    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
