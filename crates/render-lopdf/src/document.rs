use crate::content;
use crate::images;
use folio_render_core::font::encode_text;
use folio_render_core::{Base14Font, DocumentSurface, PageSurface, RenderError, TextRun};
use folio_resource::LoadedImage;
use folio_types::{Color, Point, Rect, SourceKey};
use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Document, Object, ObjectId, Stream, dictionary};
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// An in-memory PDF built page by page.
///
/// Font and image objects are shared between pages: each base-14 font is
/// written once, and each image once per source key.
pub struct LopdfDocument {
    document: Document,
    pages_id: ObjectId,
    page_ids: Vec<ObjectId>,
    fonts: BTreeMap<Base14Font, ObjectId>,
    images: HashMap<SourceKey, ObjectId>,
    /// Opacity in thousandths to its ExtGState.
    opacity_states: BTreeMap<u16, ObjectId>,
    current: Option<PageContent>,
    compress: bool,
}

struct PageContent {
    width: f32,
    height: f32,
    operations: Vec<Operation>,
    fonts: BTreeSet<Base14Font>,
    images: BTreeMap<String, ObjectId>,
    states: BTreeMap<String, ObjectId>,
}

impl Default for LopdfDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl LopdfDocument {
    pub fn new() -> Self {
        let mut document = Document::with_version("1.7");
        let pages_id = document.new_object_id();
        Self {
            document,
            pages_id,
            page_ids: Vec::new(),
            fonts: BTreeMap::new(),
            images: HashMap::new(),
            opacity_states: BTreeMap::new(),
            current: None,
            compress: true,
        }
    }

    /// Leaves content streams uncompressed, for inspecting output.
    pub fn without_compression(mut self) -> Self {
        self.compress = false;
        self
    }

    fn font_resource_name(font: Base14Font) -> String {
        let index = Base14Font::ALL.iter().position(|f| *f == font).unwrap_or(0);
        format!("F{}", index + 1)
    }

    fn font_id(&mut self, font: Base14Font) -> ObjectId {
        if let Some(id) = self.fonts.get(&font) {
            return *id;
        }
        let id = self.document.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => font.postscript_name(),
            "Encoding" => "WinAnsiEncoding",
        });
        self.fonts.insert(font, id);
        id
    }

    fn opacity_state(&mut self, opacity: f32) -> (String, ObjectId) {
        let key = (opacity.clamp(0.0, 1.0) * 1000.0).round() as u16;
        let id = match self.opacity_states.get(&key) {
            Some(id) => *id,
            None => {
                let alpha = key as f32 / 1000.0;
                let id = self.document.add_object(dictionary! {
                    "Type" => "ExtGState",
                    "CA" => alpha,
                    "ca" => alpha,
                });
                self.opacity_states.insert(key, id);
                id
            }
        };
        (format!("GS{}", key), id)
    }

    fn push(&mut self, operations: impl IntoIterator<Item = Operation>) {
        if let Some(page) = &mut self.current {
            page.operations.extend(operations);
        }
    }

    fn page_resources(&mut self, page: &PageContent) -> Dictionary {
        let mut fonts = Dictionary::new();
        for font in &page.fonts {
            let id = self.font_id(*font);
            fonts.set(Self::font_resource_name(*font), id);
        }
        let mut resources = dictionary! { "Font" => fonts };
        if !page.images.is_empty() {
            let mut xobjects = Dictionary::new();
            for (name, id) in &page.images {
                xobjects.set(name.as_str(), *id);
            }
            resources.set("XObject", xobjects);
        }
        if !page.states.is_empty() {
            let mut states = Dictionary::new();
            for (name, id) in &page.states {
                states.set(name.as_str(), *id);
            }
            resources.set("ExtGState", states);
        }
        resources
    }
}

impl DocumentSurface for LopdfDocument {
    fn begin_page(&mut self, width: f32, height: f32) -> Result<(), RenderError> {
        if self.current.is_some() {
            return Err(RenderError::Surface("begin_page called with a page still open".into()));
        }
        self.current = Some(PageContent {
            width,
            height,
            operations: Vec::new(),
            fonts: BTreeSet::new(),
            images: BTreeMap::new(),
            states: BTreeMap::new(),
        });
        Ok(())
    }

    fn page(&mut self) -> Result<&mut dyn PageSurface, RenderError> {
        if self.current.is_none() {
            return Err(RenderError::Surface("no page is open".into()));
        }
        Ok(self)
    }

    fn end_page(&mut self) -> Result<(), RenderError> {
        let mut page = self
            .current
            .take()
            .ok_or_else(|| RenderError::Surface("end_page called without an open page".into()))?;

        let operation_count = page.operations.len();
        let bytes = Content {
            operations: std::mem::take(&mut page.operations),
        }
        .encode()?;
        let mut stream = Stream::new(Dictionary::new(), bytes);
        if self.compress {
            stream.compress()?;
        }
        let content_id = self.document.add_object(stream);
        let resources = self.page_resources(&page);
        let page_id = self.document.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => self.pages_id,
            "MediaBox" => vec![0.into(), 0.into(), page.width.into(), page.height.into()],
            "Contents" => content_id,
            "Resources" => resources,
        });
        self.page_ids.push(page_id);
        log::debug!("Wrote page {} ({} operations)", self.page_ids.len(), operation_count);
        Ok(())
    }

    fn page_count(&self) -> usize {
        self.page_ids.len()
    }

    fn finish(mut self: Box<Self>) -> Result<Vec<u8>, RenderError> {
        if self.current.is_some() {
            return Err(RenderError::Surface("finish called with a page still open".into()));
        }
        let kids: Vec<Object> = self.page_ids.iter().map(|id| Object::from(*id)).collect();
        let count = kids.len() as i64;
        self.document.objects.insert(
            self.pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
            }),
        );
        let catalog_id = self.document.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => self.pages_id,
        });
        self.document.trailer.set("Root", catalog_id);
        let info_id = self.document.add_object(dictionary! {
            "Producer" => Object::string_literal("folio"),
        });
        self.document.trailer.set("Info", info_id);

        let mut out = Vec::new();
        self.document.save_to(&mut out)?;
        log::info!("Finished PDF: {} page(s), {} bytes", count, out.len());
        Ok(out)
    }
}

impl PageSurface for LopdfDocument {
    fn save_state(&mut self) {
        self.push([content::op("q")]);
    }

    fn restore_state(&mut self) {
        self.push([content::op("Q")]);
    }

    fn clip(&mut self, rect: Rect) {
        self.push([content::rect(rect), content::op("W"), content::op("n")]);
    }

    fn rotate(&mut self, center: Point, degrees: f32) {
        self.push([content::rotation(center, degrees)]);
    }

    fn set_opacity(&mut self, opacity: f32) {
        let (name, id) = self.opacity_state(opacity);
        if let Some(page) = &mut self.current {
            page.states.insert(name.clone(), id);
            page.operations
                .push(Operation::new("gs", vec![Object::Name(name.into_bytes())]));
        }
    }

    fn fill_rect(&mut self, rect: Rect, color: &Color) {
        self.push([content::fill_color(color), content::rect(rect), content::op("f")]);
    }

    fn stroke_rect(&mut self, rect: Rect, color: &Color, width: f32) {
        self.push([
            content::stroke_color(color),
            content::line_width(width),
            content::rect(rect),
            content::op("S"),
        ]);
    }

    fn fill_ellipse(&mut self, rect: Rect, color: &Color) {
        self.push([content::fill_color(color)]);
        self.push(content::ellipse(rect));
        self.push([content::op("f")]);
    }

    fn stroke_ellipse(&mut self, rect: Rect, color: &Color, width: f32) {
        self.push([content::stroke_color(color), content::line_width(width)]);
        self.push(content::ellipse(rect));
        self.push([content::op("S")]);
    }

    fn line(&mut self, from: Point, to: Point, color: &Color, width: f32) {
        self.push([
            content::stroke_color(color),
            content::line_width(width),
            Operation::new("m", vec![from.x.into(), from.y.into()]),
            Operation::new("l", vec![to.x.into(), to.y.into()]),
            content::op("S"),
        ]);
    }

    fn text(&mut self, run: &TextRun<'_>) {
        let name = Self::font_resource_name(run.font);
        if let Some(page) = &mut self.current {
            page.fonts.insert(run.font);
        }
        self.push([content::fill_color(&run.color)]);
        self.push(content::text(&name, run.size, run.origin, encode_text(run.text)));
    }

    fn image(&mut self, image: &LoadedImage, rect: Rect) -> Result<(), RenderError> {
        let id = match self.images.get(&image.key) {
            Some(id) => *id,
            None => {
                let id = images::embed(&mut self.document, image)?;
                self.images.insert(image.key.clone(), id);
                id
            }
        };
        let name = format!("Im{}", id.0);
        let page = self
            .current
            .as_mut()
            .ok_or_else(|| RenderError::Surface("no page is open".into()))?;
        page.images.insert(name.clone(), id);
        page.operations.extend(content::image(&name, rect));
        Ok(())
    }
}
