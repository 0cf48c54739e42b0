use crate::{
    colours,
    font::{BuiltinFont, Font},
    info::Info,
    layout::{Margins, PageSink},
    page::{Page, TextRun, TextStyle},
    pagesize::PageSize,
    refs::{ObjectReferences, RefType},
    Colour, PDFError, Pt,
};
use id_arena::{Arena, Id};
use pdf_writer::{Finish, Pdf, Ref};
use std::{fs, path::Path};
use tracing::debug;

/// The font text is currently drawn with
#[derive(Debug, Clone, PartialEq)]
pub enum ActiveFont {
    /// The font registered with [Document::register_font]
    Embedded { name: String, size: Pt },
    /// A standard font that needs no embedding
    Builtin { font: BuiltinFont, size: Pt },
}

impl ActiveFont {
    pub fn size(&self) -> Pt {
        match self {
            ActiveFont::Embedded { size, .. } | ActiveFont::Builtin { size, .. } => *size,
        }
    }
}

struct RegisteredFont {
    name: String,
    font: Font,
}

/// A document is an append-only list of equally sized pages plus the one font
/// they are drawn with. It is built up page by page through its [PageSink]
/// implementation, then rendered out with a call to [Document::write]
pub struct Document {
    pub info: Option<Info>,
    pub pages: Arena<Page>,
    pub page_order: Vec<Id<Page>>,
    pub page_size: PageSize,
    pub margins: Margins,
    pub colour: Colour,
    registered: Option<RegisteredFont>,
    active: Option<ActiveFont>,
}

impl Document {
    /// Create an empty document whose pages will all be `page_size`
    pub fn new(page_size: PageSize, margins: Margins) -> Document {
        Document {
            info: None,
            pages: Arena::new(),
            page_order: Vec::new(),
            page_size,
            margins,
            colour: colours::BLACK,
            registered: None,
            active: None,
        }
    }

    /// Sets information about the document. If not provided, no information block will be
    /// written to the PDF
    pub fn set_info(&mut self, info: Info) {
        self.info = Some(info);
    }

    /// Append a new, empty page to the end of the document and make it the
    /// page text is placed on
    pub fn add_page(&mut self) -> Id<Page> {
        let id = self
            .pages
            .alloc(Page::new(self.page_size, Some(self.margins.clone())));
        self.page_order.push(id);
        id
    }

    pub fn page_count(&self) -> usize {
        self.page_order.len()
    }

    /// Iterate over the pages in document order
    pub fn pages(&self) -> impl Iterator<Item = &Page> {
        self.page_order.iter().map(|&id| &self.pages[id])
    }

    fn current_page(&mut self) -> Result<&mut Page, PDFError> {
        let id = *self.page_order.last().ok_or(PDFError::NoOpenPage)?;
        Ok(&mut self.pages[id])
    }

    /// Register `font` under `name`. A document holds at most one embedded
    /// font; registering a second one fails.
    pub fn register_font<S: ToString>(&mut self, name: S, font: Font) -> Result<(), PDFError> {
        if let Some(existing) = &self.registered {
            return Err(PDFError::FontAlreadyRegistered(existing.name.clone()));
        }
        self.registered = Some(RegisteredFont {
            name: name.to_string(),
            font,
        });
        Ok(())
    }

    /// Draw all following text with the registered font `name` at `size`
    pub fn activate_font(&mut self, name: &str, size: Pt) -> Result<(), PDFError> {
        check_size(size)?;
        match &self.registered {
            Some(registered) if registered.name == name => {
                self.active = Some(ActiveFont::Embedded {
                    name: name.to_string(),
                    size,
                });
                Ok(())
            }
            _ => Err(PDFError::UnknownFont(name.to_string())),
        }
    }

    /// Draw all following text with a built-in font at `size`
    pub fn activate_builtin(&mut self, font: BuiltinFont, size: Pt) -> Result<(), PDFError> {
        check_size(size)?;
        self.active = Some(ActiveFont::Builtin { font, size });
        Ok(())
    }

    pub fn active_font(&self) -> Option<&ActiveFont> {
        self.active.as_ref()
    }

    fn encode(&mut self, text: &str) -> Result<Vec<u8>, PDFError> {
        match &self.active {
            None => Err(PDFError::NoActiveFont),
            Some(ActiveFont::Builtin { font, .. }) => Ok(font.encode(text)),
            Some(ActiveFont::Embedded { .. }) => self
                .registered
                .as_mut()
                .map(|registered| registered.font.encode(text))
                .ok_or(PDFError::NoActiveFont),
        }
    }

    /// Render the entire document to PDF bytes in memory
    pub fn to_bytes(self) -> Result<Vec<u8>, PDFError> {
        let Document {
            info,
            pages,
            page_order,
            colour,
            registered,
            active,
            ..
        } = self;

        let mut refs = ObjectReferences::new();
        let catalog_id = refs.gen(RefType::Catalog);
        let page_tree_id = refs.gen(RefType::PageTree);

        let mut writer = Pdf::new();
        if let Some(info) = info {
            info.write(&mut refs, &mut writer);
        }

        let page_refs: Vec<Ref> = (0..page_order.len())
            .map(|i| refs.gen(RefType::Page(i)))
            .collect();
        writer
            .pages(page_tree_id)
            .count(page_refs.len() as i32)
            .kids(page_refs);

        // fonts that were registered but never activated are left out
        match (&active, &registered) {
            (Some(ActiveFont::Embedded { .. }), Some(registered)) => {
                debug!(
                    font = %registered.name,
                    path = ?registered.font.path(),
                    glyphs = registered.font.used_glyph_count(),
                    "embedding font"
                );
                registered.font.write(&mut refs, &mut writer);
            }
            (Some(ActiveFont::Builtin { font, .. }), _) => font.write(&mut refs, &mut writer),
            _ => debug!("no active font, writing pages without font resources"),
        }

        let size = active.as_ref().map(ActiveFont::size).unwrap_or(Pt(12.0));
        let style = TextStyle { size, colour };
        for (page_index, id) in page_order.iter().enumerate() {
            pages[*id].write(&mut refs, page_index, style, &mut writer)?;
        }

        let mut catalog = writer.catalog(catalog_id);
        catalog.pages(page_tree_id);
        catalog.finish();

        Ok(writer.finish())
    }

    /// Render the document and write it to `path`, replacing any existing
    /// file. The whole document is rendered in memory first, so nothing is
    /// written if rendering fails.
    pub fn save<P: AsRef<Path>>(self, path: P) -> Result<(), PDFError> {
        let bytes = self.to_bytes()?;
        fs::write(path, bytes).map_err(Into::into)
    }
}

fn check_size(size: Pt) -> Result<(), PDFError> {
    if size.is_finite() && size > Pt(0.0) {
        Ok(())
    } else {
        Err(PDFError::InvalidFontSize(size.into()))
    }
}

impl PageSink for Document {
    type Error = PDFError;

    fn start_page(&mut self) -> Result<(), PDFError> {
        self.add_page();
        Ok(())
    }

    fn place_text(&mut self, text: &str, x: Pt, y: Pt) -> Result<(), PDFError> {
        if !x.is_finite() || !y.is_finite() {
            return Err(PDFError::InvalidCoordinate(x.into(), y.into()));
        }
        let height = self.page_size.1;
        let encoded = self.encode(text)?;
        self.current_page()?.add_run(TextRun {
            text: text.to_string(),
            coords: (x, height - y),
            encoded,
        });
        Ok(())
    }
}
