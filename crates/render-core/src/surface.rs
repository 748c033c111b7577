use crate::error::RenderError;
use crate::font::Base14Font;
use folio_resource::LoadedImage;
use folio_types::{Color, Point, Rect};

/// One line of text, positioned at its baseline start in page space.
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun<'a> {
    pub text: &'a str,
    pub origin: Point,
    pub font: Base14Font,
    pub size: f32,
    pub color: Color,
}

/// Drawing primitives of one page. All coordinates are page space (PDF user
/// space: origin bottom-left, y up, points).
pub trait PageSurface: Send {
    fn save_state(&mut self);

    fn restore_state(&mut self);

    /// Intersects the clip region with `rect` until the next restore.
    fn clip(&mut self, rect: Rect);

    /// Rotates subsequent drawing clockwise by `degrees` around `center`.
    fn rotate(&mut self, center: Point, degrees: f32);

    fn set_opacity(&mut self, opacity: f32);

    fn fill_rect(&mut self, rect: Rect, color: &Color);

    fn stroke_rect(&mut self, rect: Rect, color: &Color, width: f32);

    fn fill_ellipse(&mut self, rect: Rect, color: &Color);

    fn stroke_ellipse(&mut self, rect: Rect, color: &Color, width: f32);

    fn line(&mut self, from: Point, to: Point, color: &Color, width: f32);

    fn text(&mut self, run: &TextRun<'_>);

    fn image(&mut self, image: &LoadedImage, rect: Rect) -> Result<(), RenderError>;
}

/// A multi-page output document.
pub trait DocumentSurface: Send {
    fn begin_page(&mut self, width: f32, height: f32) -> Result<(), RenderError>;

    /// The page opened by the last `begin_page`.
    fn page(&mut self) -> Result<&mut dyn PageSurface, RenderError>;

    fn end_page(&mut self) -> Result<(), RenderError>;

    fn page_count(&self) -> usize;

    fn finish(self: Box<Self>) -> Result<Vec<u8>, RenderError>;
}
