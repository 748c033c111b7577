//! A surface that records draw calls instead of producing output, for
//! testing element plugins and the render pass.

use crate::error::RenderError;
use crate::font::Base14Font;
use crate::surface::{PageSurface, TextRun};
use folio_resource::LoadedImage;
use folio_types::{Color, Point, Rect};

#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Save,
    Restore,
    Clip(Rect),
    Rotate(Point, f32),
    Opacity(f32),
    FillRect(Rect, Color),
    StrokeRect(Rect, Color, f32),
    FillEllipse(Rect, Color),
    StrokeEllipse(Rect, Color, f32),
    Line(Point, Point, Color, f32),
    Text {
        text: String,
        origin: Point,
        font: Base14Font,
        size: f32,
    },
    Image {
        key: String,
        rect: Rect,
    },
}

#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub ops: Vec<DrawOp>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn texts(&self) -> Vec<&str> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn images(&self) -> Vec<(&str, Rect)> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Image { key, rect } => Some((key.as_str(), *rect)),
                _ => None,
            })
            .collect()
    }

    pub fn count(&self, predicate: impl Fn(&DrawOp) -> bool) -> usize {
        self.ops.iter().filter(|op| predicate(op)).count()
    }
}

impl PageSurface for RecordingSurface {
    fn save_state(&mut self) {
        self.ops.push(DrawOp::Save);
    }

    fn restore_state(&mut self) {
        self.ops.push(DrawOp::Restore);
    }

    fn clip(&mut self, rect: Rect) {
        self.ops.push(DrawOp::Clip(rect));
    }

    fn rotate(&mut self, center: Point, degrees: f32) {
        self.ops.push(DrawOp::Rotate(center, degrees));
    }

    fn set_opacity(&mut self, opacity: f32) {
        self.ops.push(DrawOp::Opacity(opacity));
    }

    fn fill_rect(&mut self, rect: Rect, color: &Color) {
        self.ops.push(DrawOp::FillRect(rect, color.clone()));
    }

    fn stroke_rect(&mut self, rect: Rect, color: &Color, width: f32) {
        self.ops.push(DrawOp::StrokeRect(rect, color.clone(), width));
    }

    fn fill_ellipse(&mut self, rect: Rect, color: &Color) {
        self.ops.push(DrawOp::FillEllipse(rect, color.clone()));
    }

    fn stroke_ellipse(&mut self, rect: Rect, color: &Color, width: f32) {
        self.ops.push(DrawOp::StrokeEllipse(rect, color.clone(), width));
    }

    fn line(&mut self, from: Point, to: Point, color: &Color, width: f32) {
        self.ops.push(DrawOp::Line(from, to, color.clone(), width));
    }

    fn text(&mut self, run: &TextRun<'_>) {
        self.ops.push(DrawOp::Text {
            text: run.text.to_string(),
            origin: run.origin,
            font: run.font,
            size: run.size,
        });
    }

    fn image(&mut self, image: &LoadedImage, rect: Rect) -> Result<(), RenderError> {
        self.ops.push(DrawOp::Image {
            key: image.key.to_string(),
            rect,
        });
        Ok(())
    }
}
