use crate::content::render_runs;
use crate::layout::Margins;
use crate::pagesize::PageSize;
use crate::rect::Rect;
use crate::refs::{ObjectReferences, RefType};
use crate::{Colour, PDFError, Pt};
use pdf_writer::{Filter, Finish, Name, Pdf};

/// A single line of text, already encoded for the document's active font
#[derive(Clone, PartialEq, Debug)]
pub struct TextRun {
    /// The original text, exactly as it appeared in the input
    pub text: String,
    /// Baseline origin in PDF coordinates (origin at the bottom-left)
    pub coords: (Pt, Pt),
    /// The bytes shown by the `Tj` operator
    pub encoded: Vec<u8>,
}

/// The font settings every run on a page is drawn with
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct TextStyle {
    pub size: Pt,
    pub colour: Colour,
}

pub struct Page {
    /// The size of the page
    pub media_box: Rect,
    /// Where content can live, i.e. within the margins
    pub content_box: Rect,
    /// The placed lines, in placement order
    pub runs: Vec<TextRun>,
}

impl Page {
    pub fn new(size: PageSize, margins: Option<Margins>) -> Page {
        let (width, height) = size;
        let margins = margins.unwrap_or_else(Margins::empty);
        Page {
            media_box: Rect {
                x1: Pt(0.0),
                y1: Pt(0.0),
                x2: width,
                y2: height,
            },
            content_box: Rect {
                x1: margins.left,
                y1: margins.bottom,
                x2: width - margins.right,
                y2: height - margins.top,
            },
            runs: Vec::default(),
        }
    }

    pub fn add_run(&mut self, run: TextRun) {
        self.runs.push(run);
    }

    pub(crate) fn write(
        &self,
        refs: &mut ObjectReferences,
        page_index: usize,
        style: TextStyle,
        writer: &mut Pdf,
    ) -> Result<(), PDFError> {
        let id = refs.get_or_gen(RefType::Page(page_index));
        let page_tree_id = refs.get_or_gen(RefType::PageTree);
        let font_id = refs.get(RefType::Font);
        let content_id = refs.gen(RefType::ContentForPage(page_index));

        let mut page = writer.page(id);
        page.media_box(self.media_box.into());
        page.art_box(self.content_box.into());
        page.parent(page_tree_id);
        page.contents(content_id);

        let mut resources = page.resources();
        if let Some(font_id) = font_id {
            resources.fonts().pair(Name(FONT_RESOURCE.as_bytes()), font_id);
        }
        resources.finish();
        page.finish();

        let rendered = render_runs(&self.runs, FONT_RESOURCE, style)?;
        let compressed = miniz_oxide::deflate::compress_to_vec_zlib(
            rendered.as_slice(),
            miniz_oxide::deflate::CompressionLevel::DefaultCompression as u8,
        );
        writer
            .stream(content_id, compressed.as_slice())
            .filter(Filter::FlateDecode);

        Ok(())
    }
}

/// Resource name the document's single font is registered under on every page
pub(crate) const FONT_RESOURCE: &str = "F0";
