//! Static level geometry: sloped platforms and ladders
//!
//! Screen coordinates: y grows downward, so the "highest" surface is the
//! one with the smallest y.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{NO_FLOOR, STEP_UP};

/// Axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Grow the rectangle by `dx` on the left and right and `dy` on top and bottom
    pub fn expand(&self, dx: f32, dy: f32) -> Self {
        Self::new(self.x - dx, self.y - dy, self.w + dx * 2.0, self.h + dy * 2.0)
    }

    /// Strict interval intersection on both axes; shared edges do not count.
    #[inline]
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.x + other.w
            && self.x + self.w > other.x
            && self.y < other.y + other.h
            && self.y + self.h > other.y
    }
}

/// A walkable ramp. `slope` is the change in surface y per pixel of x.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
    pub slope: f32,
}

impl Platform {
    pub fn new(x: f32, y: f32, w: f32, h: f32, slope: f32) -> Self {
        Self { x, y, w, h, slope }
    }

    /// Whether `x` lies within the horizontal span (edges included)
    #[inline]
    pub fn spans(&self, x: f32) -> bool {
        x >= self.x && x <= self.x + self.w
    }

    /// Surface height at `x`. Only meaningful when `spans(x)`.
    #[inline]
    pub fn surface_y(&self, x: f32) -> f32 {
        self.y + self.slope * (x - self.x)
    }

    /// Surface heights at the left and right ends
    pub fn end_heights(&self) -> (f32, f32) {
        (self.y, self.surface_y(self.x + self.w))
    }

    /// +1 when the surface descends to the right (slope >= 0), -1 otherwise
    #[inline]
    pub fn downhill(&self) -> f32 {
        if self.slope >= 0.0 { 1.0 } else { -1.0 }
    }
}

/// A ladder drawn as two rails `x` and `x + LADDER_WIDTH`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ladder {
    pub x: f32,
    pub y: f32,
    pub h: f32,
}

/// Distance between the two rails
pub const LADDER_WIDTH: f32 = 10.0;
/// Horizontal grab tolerance beyond each rail
pub const LADDER_TOLERANCE: f32 = 2.0;

impl Ladder {
    pub fn new(x: f32, y: f32, h: f32) -> Self {
        Self { x, y, h }
    }

    /// Mount/dismount region: the rails plus a small margin, full height
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.x - LADDER_TOLERANCE
            && point.x <= self.x + LADDER_WIDTH + LADDER_TOLERANCE
            && point.y >= self.y
            && point.y <= self.y + self.h
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }
}

/// Topmost surface among all platforms spanning `x`, or `NO_FLOOR`.
pub fn ground_y(platforms: &[Platform], x: f32) -> f32 {
    platforms
        .iter()
        .filter(|p| p.spans(x))
        .map(|p| p.surface_y(x))
        .fold(NO_FLOOR, f32::min)
}

/// Topmost surface at or below `y` (with a `STEP_UP` allowance), or `NO_FLOOR`.
///
/// This is the floor an entity standing or falling at `(x, y)` ground-follows
/// against. Surfaces further above are ignored, so platforms are one-way.
pub fn ground_below(platforms: &[Platform], x: f32, y: f32) -> f32 {
    platforms
        .iter()
        .filter(|p| p.spans(x))
        .map(|p| p.surface_y(x))
        .filter(|&s| s >= y - STEP_UP)
        .fold(NO_FLOOR, f32::min)
}

/// For upward motion from `from_y` to `to_y`, the first surface passed
/// (`to_y <= s < from_y`, nearest the start).
pub fn surface_crossed(platforms: &[Platform], x: f32, from_y: f32, to_y: f32) -> Option<f32> {
    platforms
        .iter()
        .filter(|p| p.spans(x))
        .map(|p| p.surface_y(x))
        .filter(|&s| s >= to_y && s < from_y)
        .reduce(f32::max)
}

/// The platform whose surface at `x` lies within `tolerance` of `y`
pub fn platform_under(platforms: &[Platform], x: f32, y: f32, tolerance: f32) -> Option<&Platform> {
    platforms
        .iter()
        .find(|p| p.spans(x) && (p.surface_y(x) - y).abs() < tolerance)
}

/// Whether `point` is inside any ladder
pub fn on_any_ladder(ladders: &[Ladder], point: Vec2) -> bool {
    ladders.iter().any(|l| l.contains(point))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_surface_is_linear() {
        let p = Platform::new(10.0, 100.0, 200.0, 8.0, 0.05);
        assert_eq!(p.surface_y(10.0), 100.0);
        assert!((p.surface_y(210.0) - 110.0).abs() < 1e-4);
        assert!((p.surface_y(110.0) - 105.0).abs() < 1e-4);
    }

    #[test]
    fn test_ground_y_topmost_wins() {
        let platforms = vec![
            Platform::new(0.0, 200.0, 100.0, 8.0, 0.0),
            Platform::new(50.0, 150.0, 100.0, 8.0, 0.0),
        ];
        assert_eq!(ground_y(&platforms, 25.0), 200.0);
        assert_eq!(ground_y(&platforms, 75.0), 150.0);
        assert_eq!(ground_y(&platforms, 125.0), 150.0);
        assert_eq!(ground_y(&platforms, 300.0), NO_FLOOR);
    }

    #[test]
    fn test_ground_below_skips_surfaces_overhead() {
        let platforms = vec![
            Platform::new(0.0, 200.0, 100.0, 8.0, 0.0),
            Platform::new(0.0, 150.0, 100.0, 8.0, 0.0),
        ];
        assert_eq!(ground_below(&platforms, 50.0, 180.0), 200.0);
        assert_eq!(ground_below(&platforms, 50.0, 100.0), 150.0);
        // Within step-up reach of the upper surface
        assert_eq!(ground_below(&platforms, 50.0, 152.0), 150.0);
        assert_eq!(ground_below(&platforms, 50.0, 210.0), NO_FLOOR);
    }

    #[test]
    fn test_surface_crossed_half_open() {
        let platforms = vec![
            Platform::new(0.0, 200.0, 100.0, 8.0, 0.0),
            Platform::new(0.0, 150.0, 100.0, 8.0, 0.0),
        ];
        // Starting exactly on a surface does not count as crossing it
        assert_eq!(surface_crossed(&platforms, 50.0, 200.0, 199.0), None);
        assert_eq!(surface_crossed(&platforms, 50.0, 151.0, 150.0), Some(150.0));
        assert_eq!(surface_crossed(&platforms, 50.0, 151.0, 152.0), None);
    }

    #[test]
    fn test_ladder_contains_with_margin() {
        let ladder = Ladder::new(100.0, 50.0, 40.0);
        assert!(ladder.contains(Vec2::new(98.0, 50.0)));
        assert!(ladder.contains(Vec2::new(112.0, 90.0)));
        assert!(!ladder.contains(Vec2::new(97.9, 60.0)));
        assert!(!ladder.contains(Vec2::new(112.1, 60.0)));
        assert!(!ladder.contains(Vec2::new(105.0, 49.0)));
        assert!(!ladder.contains(Vec2::new(105.0, 91.0)));
    }

    #[test]
    fn test_rect_overlap_edges() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(!a.overlaps(&Rect::new(10.0, 0.0, 10.0, 10.0)));
        assert!(!a.overlaps(&Rect::new(0.0, 10.0, 10.0, 10.0)));
        assert!(a.overlaps(&Rect::new(5.0, 5.0, 10.0, 10.0)));
    }

    #[test]
    fn test_expand() {
        let r = Rect::new(10.0, 20.0, 20.0, 26.0).expand(6.0, 4.0);
        assert_eq!(r, Rect::new(4.0, 16.0, 32.0, 34.0));
    }

    #[test]
    fn test_platform_under_and_downhill() {
        let platforms = vec![Platform::new(0.0, 100.0, 100.0, 8.0, -0.1)];
        let p = platform_under(&platforms, 50.0, 95.5, 2.0).unwrap();
        assert_eq!(p.downhill(), -1.0);
        assert!(platform_under(&platforms, 50.0, 90.0, 2.0).is_none());
    }
}
