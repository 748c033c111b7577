use serde::{Deserialize, Serialize};

/// An axis-aligned box. In template space `y` grows downwards; in page space
/// (PDF user space) `y` is the bottom edge and grows upwards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn translate(self, dx: f32, dy: f32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..self
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn zero() -> Self {
        Self {
            width: 0.0,
            height: 0.0,
        }
    }

    /// Replaces negative or non-finite components with zero.
    ///
    /// Returns the sanitized size and whether anything had to be clamped.
    pub fn sanitized(self) -> (Self, bool) {
        let fix = |v: f32| if v.is_finite() && v >= 0.0 { v } else { 0.0 };
        let clean = Self::new(fix(self.width), fix(self.height));
        let clamped = clean.width.to_bits() != self.width.to_bits()
            || clean.height.to_bits() != self.height.to_bits();
        (clean, clamped)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn offset(self, dx: f32, dy: f32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitized_clamps_negative_and_nan() {
        let (size, clamped) = Size::new(-3.0, f32::NAN).sanitized();
        assert_eq!(size, Size::zero());
        assert!(clamped);
    }

    #[test]
    fn test_sanitized_keeps_valid_sizes() {
        let (size, clamped) = Size::new(10.0, 0.0).sanitized();
        assert_eq!(size, Size::new(10.0, 0.0));
        assert!(!clamped);
    }

    #[test]
    fn test_sanitized_infinity() {
        let (size, clamped) = Size::new(f32::INFINITY, 4.0).sanitized();
        assert_eq!(size.width, 0.0);
        assert_eq!(size.height, 4.0);
        assert!(clamped);
    }

    #[test]
    fn test_rect_edges() {
        let r = Rect::new(10.0, 20.0, 30.0, 40.0);
        assert_eq!(r.right(), 40.0);
        assert_eq!(r.bottom(), 60.0);
        assert_eq!(r.translate(5.0, -5.0), Rect::new(15.0, 15.0, 30.0, 40.0));
    }
}
