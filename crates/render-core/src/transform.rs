//! Template space (origin top-left of the content area, y down) to page
//! space (PDF user space, origin bottom-left of the page, y up).

use folio_layout::PageGeometry;
use folio_types::{Point, Rect};

pub fn to_page_space(x: f32, y: f32, page_height: f32, margin_top: f32, margin_left: f32) -> Point {
    Point::new(margin_left + x, page_height - margin_top - y)
}

/// Converts a template-space box to a page-space rectangle whose `y` is the
/// bottom edge.
pub fn to_page_rect(rect: Rect, page: &PageGeometry) -> Rect {
    let bottom_left = to_page_space(
        rect.x,
        rect.bottom(),
        page.height,
        page.margins.top,
        page.margins.left,
    );
    Rect::new(bottom_left.x, bottom_left.y, rect.width, rect.height)
}
