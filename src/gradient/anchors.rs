/// Normalized position (0..=1 on both axes) where one color's falloff is centered.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AnchorPoint {
    pub x: f64,
    pub y: f64,
}

impl AnchorPoint {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Anchor as CSS-style percentages.
    pub fn percent(self) -> (f64, f64) {
        (self.x * 100.0, self.y * 100.0)
    }
}

/// Top-left, top-right, bottom-left, bottom-right.
pub const CORNER_ANCHORS: [AnchorPoint; 4] = [
    AnchorPoint::new(0.0, 0.0),
    AnchorPoint::new(1.0, 0.0),
    AnchorPoint::new(0.0, 1.0),
    AnchorPoint::new(1.0, 1.0),
];

/// Edge midpoints, center, then the four quarter-diagonal points.
pub const INTERIOR_ANCHORS: [AnchorPoint; 9] = [
    AnchorPoint::new(0.5, 0.0),
    AnchorPoint::new(0.0, 0.5),
    AnchorPoint::new(1.0, 0.5),
    AnchorPoint::new(0.5, 1.0),
    AnchorPoint::new(0.5, 0.5),
    AnchorPoint::new(0.25, 0.25),
    AnchorPoint::new(0.75, 0.25),
    AnchorPoint::new(0.25, 0.75),
    AnchorPoint::new(0.75, 0.75),
];

/// Anchor pool for `color_count` colors: 4 corners, plus 9 interior points when more than 4.
pub fn anchors_for(color_count: usize) -> Vec<AnchorPoint> {
    let mut pool = Vec::with_capacity(CORNER_ANCHORS.len() + INTERIOR_ANCHORS.len());
    pool.extend_from_slice(&CORNER_ANCHORS);
    if color_count > CORNER_ANCHORS.len() {
        pool.extend_from_slice(&INTERIOR_ANCHORS);
    }
    pool
}

/// Anchor for the color at `index`. Wraps around the pool.
pub fn anchor_at(pool: &[AnchorPoint], index: usize) -> Option<AnchorPoint> {
    if pool.is_empty() {
        return None;
    }
    Some(pool[index % pool.len()])
}

#[cfg(test)]
#[path = "../../tests/unit/gradient/anchors.rs"]
mod tests;
