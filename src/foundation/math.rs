use xxhash_rust::xxh3::Xxh3;

pub(crate) fn mul_div255_u16(x: u16, y: u16) -> u16 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u16
}

pub(crate) fn mul_div255_u8(x: u16, y: u16) -> u8 {
    mul_div255_u16(x, y) as u8
}

/// Source-over for one premultiplied RGBA8 pixel.
pub(crate) fn premul_over_px(dst: [u8; 4], src: [u8; 4]) -> [u8; 4] {
    let sa = u16::from(src[3]);
    if sa == 0 {
        return dst;
    }
    let inv = 255u16 - sa;
    let mut out = [0u8; 4];
    out[3] = src[3].saturating_add(mul_div255_u8(u16::from(dst[3]), inv));
    for c in 0..3 {
        let dc = mul_div255_u8(u16::from(dst[c]), inv);
        out[c] = src[c].saturating_add(dc);
    }
    out
}

/// Scale every channel of a premultiplied pixel by `coverage` (0..=255).
pub(crate) fn scale_px(px: [u8; 4], coverage: u8) -> [u8; 4] {
    if coverage == 255 {
        return px;
    }
    let k = u16::from(coverage);
    [
        mul_div255_u8(u16::from(px[0]), k),
        mul_div255_u8(u16::from(px[1]), k),
        mul_div255_u8(u16::from(px[2]), k),
        mul_div255_u8(u16::from(px[3]), k),
    ]
}

pub(crate) fn unpremultiply_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = u16::from(px[3]);
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        px[0] = ((u16::from(px[0]) * 255 + a / 2) / a).min(255) as u8;
        px[1] = ((u16::from(px[1]) * 255 + a / 2) / a).min(255) as u8;
        px[2] = ((u16::from(px[2]) * 255 + a / 2) / a).min(255) as u8;
    }
}

/// Stable 64-bit fingerprint over a byte stream, used for render cache keys.
pub(crate) struct Fingerprint(Xxh3);

impl Fingerprint {
    pub(crate) fn new() -> Self {
        Self(Xxh3::new())
    }

    pub(crate) fn write_bytes(&mut self, bytes: &[u8]) {
        self.0.update(bytes);
    }

    pub(crate) fn write_f64(&mut self, v: f64) {
        self.write_bytes(&v.to_bits().to_le_bytes());
    }

    pub(crate) fn write_str(&mut self, s: &str) {
        self.write_bytes(&(s.len() as u64).to_le_bytes());
        self.write_bytes(s.as_bytes());
    }

    pub(crate) fn finish(&self) -> u64 {
        self.0.digest()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
