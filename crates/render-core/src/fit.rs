//! Placement of intrinsically sized content (images, generated graphics)
//! into an element box.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FitMode {
    /// Scale uniformly until the content fits inside the box.
    #[default]
    Contain,
    /// Scale uniformly until the content covers the box; overflow is clipped.
    Cover,
    /// Stretch to the box.
    Fill,
    /// Intrinsic size, centered.
    None,
}

impl FitMode {
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "contain" => Some(FitMode::Contain),
            "cover" => Some(FitMode::Cover),
            "fill" => Some(FitMode::Fill),
            "none" => Some(FitMode::None),
            _ => None,
        }
    }
}

/// Draw box relative to the element box's top-left corner.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FitResult {
    pub draw_width: f32,
    pub draw_height: f32,
    pub offset_x: f32,
    pub offset_y: f32,
    /// The draw box extends past the element box.
    pub clip: bool,
}

pub fn fit_box(image_width: f32, image_height: f32, box_width: f32, box_height: f32, fit: FitMode) -> FitResult {
    let valid = |v: f32| v.is_finite() && v > 0.0;
    if !valid(image_width) || !valid(image_height) {
        return FitResult::default();
    }
    let bw = if box_width.is_finite() { box_width.max(0.0) } else { 0.0 };
    let bh = if box_height.is_finite() { box_height.max(0.0) } else { 0.0 };

    let (draw_width, draw_height) = match fit {
        FitMode::Fill => (bw, bh),
        FitMode::None => (image_width, image_height),
        FitMode::Contain => {
            let scale = (bw / image_width).min(bh / image_height);
            ((image_width * scale).min(bw), (image_height * scale).min(bh))
        }
        FitMode::Cover => {
            let scale = (bw / image_width).max(bh / image_height);
            ((image_width * scale).max(bw), (image_height * scale).max(bh))
        }
    };

    let clip = matches!(fit, FitMode::Cover | FitMode::None) && (draw_width > bw || draw_height > bh);
    FitResult {
        draw_width,
        draw_height,
        offset_x: (bw - draw_width) / 2.0,
        offset_y: (bh - draw_height) / 2.0,
        clip,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_contain_letterboxes() {
        let r = fit_box(200.0, 100.0, 100.0, 100.0, FitMode::Contain);
        assert_eq!((r.draw_width, r.draw_height), (100.0, 50.0));
        assert_eq!(r.offset_y, 25.0);
        assert!(!r.clip);
    }

    #[test]
    fn test_cover_crops() {
        let r = fit_box(200.0, 100.0, 100.0, 100.0, FitMode::Cover);
        assert_eq!((r.draw_width, r.draw_height), (200.0, 100.0));
        assert_eq!(r.offset_x, -50.0);
        assert!(r.clip);
    }

    #[test]
    fn test_none_centers_intrinsic() {
        let r = fit_box(50.0, 20.0, 100.0, 100.0, FitMode::None);
        assert_eq!((r.offset_x, r.offset_y), (25.0, 40.0));
        assert!(!r.clip);
    }

    #[test]
    fn test_degenerate_image_is_empty() {
        assert_eq!(fit_box(0.0, 10.0, 100.0, 100.0, FitMode::Fill), FitResult::default());
        assert_eq!(fit_box(f32::NAN, 10.0, 100.0, 100.0, FitMode::Cover), FitResult::default());
    }

    #[test]
    fn test_parse_mode() {
        assert_eq!(FitMode::parse("COVER"), Some(FitMode::Cover));
        assert_eq!(FitMode::parse("stretch"), None);
    }

    proptest! {
        #[test]
        fn contain_never_overflows(iw in 0.1f32..5000.0, ih in 0.1f32..5000.0, bw in 0.0f32..2000.0, bh in 0.0f32..2000.0) {
            let r = fit_box(iw, ih, bw, bh, FitMode::Contain);
            prop_assert!(r.draw_width <= bw);
            prop_assert!(r.draw_height <= bh);
        }

        #[test]
        fn cover_always_covers(iw in 0.1f32..5000.0, ih in 0.1f32..5000.0, bw in 0.0f32..2000.0, bh in 0.0f32..2000.0) {
            let r = fit_box(iw, ih, bw, bh, FitMode::Cover);
            prop_assert!(r.draw_width >= bw);
            prop_assert!(r.draw_height >= bh);
        }
    }
}
