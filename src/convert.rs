//! The text-to-PDF pipeline: read the input, pick a font, lay the lines out
//! and write the document.

use crate::{
    font::{BuiltinFont, Font},
    info::Info,
    layout::{layout_lines, LayoutCursor, LayoutError, LayoutParams},
    resolve::FontSearch,
    Colour, ConvertError, Document, PDFError, Pt,
};
use std::{
    fmt, fs, io,
    path::{Path, PathBuf},
};
use tracing::{info, warn};

/// Logical name the embedded font is registered under
pub const EMBEDDED_FONT_NAME: &str = "TextFont";

/// Everything that controls a conversion
#[derive(Debug, Clone)]
pub struct Settings {
    pub input: PathBuf,
    pub output_dir: PathBuf,
    pub output_name: String,
    /// Use this font file instead of searching for one
    pub font: Option<PathBuf>,
    pub font_size: Pt,
    /// Drawn with when no font file can be used
    pub builtin_font: BuiltinFont,
    pub colour: Colour,
    pub layout: LayoutParams,
    /// Document title; the input's file name if unset
    pub title: Option<String>,
    pub subject: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            input: PathBuf::from("cli.txt"),
            output_dir: PathBuf::from("PDF"),
            output_name: "output.pdf".to_string(),
            font: None,
            font_size: Pt(12.0),
            builtin_font: BuiltinFont::Helvetica,
            colour: Colour::default(),
            layout: LayoutParams::default(),
            title: None,
            subject: None,
        }
    }
}

impl Settings {
    pub fn output_path(&self) -> PathBuf {
        self.output_dir.join(&self.output_name)
    }

    fn title(&self) -> Option<String> {
        self.title.clone().or_else(|| {
            self.input
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
        })
    }
}

/// Why the built-in font is being used
#[derive(Debug, Clone, PartialEq)]
pub enum Fallback {
    /// No candidate font file exists
    NotFound,
    /// The font file could not be read, parsed or registered
    LoadFailed { path: PathBuf, reason: String },
    /// The font loaded but could not be activated. Activation only rejects
    /// an invalid font size, which the built-in font rejects as well, so
    /// [select_font] reports this as an error rather than a fallback.
    ActivateFailed { path: PathBuf, reason: String },
}

/// The font the text ended up being drawn with
#[derive(Debug, Clone, PartialEq)]
pub enum FontChoice {
    Embedded { path: PathBuf },
    Builtin { font: BuiltinFont, fallback: Fallback },
}

impl fmt::Display for FontChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FontChoice::Embedded { path } => write!(f, "{}", path.display()),
            FontChoice::Builtin { font, .. } => write!(f, "built-in {}", font.base_font()),
        }
    }
}

/// A fully laid out document that has not been serialized yet
pub struct Generated {
    pub document: Document,
    pub font: FontChoice,
    pub cursor: LayoutCursor,
}

/// Summary of a finished conversion
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub output: PathBuf,
    pub pages: usize,
    pub lines: usize,
    pub font: FontChoice,
}

/// Register and activate the font at `path`, or say why that didn't work
fn embed_font(document: &mut Document, path: &Path, size: Pt) -> Result<(), Fallback> {
    let load_failed = |err: PDFError| Fallback::LoadFailed {
        path: path.to_path_buf(),
        reason: err.to_string(),
    };
    let font = Font::from_file(path).map_err(load_failed)?;
    document
        .register_font(EMBEDDED_FONT_NAME, font)
        .map_err(load_failed)?;
    document
        .activate_font(EMBEDDED_FONT_NAME, size)
        .map_err(|err| Fallback::ActivateFailed {
            path: path.to_path_buf(),
            reason: err.to_string(),
        })
}

/// Pick the font for `document`: the configured font file or the first hit of
/// `search`, falling back to the built-in font when neither can be used
pub fn select_font(
    document: &mut Document,
    settings: &Settings,
    search: &FontSearch,
) -> Result<FontChoice, PDFError> {
    let fallback = match settings.font.clone().or_else(|| search.resolve()) {
        Some(path) => match embed_font(document, &path, settings.font_size) {
            Ok(()) => {
                info!(font = %path.display(), "using font");
                return Ok(FontChoice::Embedded { path });
            }
            Err(fallback) => {
                match &fallback {
                    Fallback::LoadFailed { path, reason } => {
                        warn!(font = %path.display(), "failed to load font: {reason}")
                    }
                    Fallback::ActivateFailed { path, reason } => {
                        warn!(font = %path.display(), "failed to activate font: {reason}")
                    }
                    Fallback::NotFound => {}
                }
                fallback
            }
        },
        None => {
            warn!("no font file found, non-Latin text will not render correctly");
            Fallback::NotFound
        }
    };

    warn!(
        "falling back to built-in {}",
        settings.builtin_font.base_font()
    );
    document.activate_builtin(settings.builtin_font, settings.font_size)?;
    Ok(FontChoice::Builtin {
        font: settings.builtin_font,
        fallback,
    })
}

/// Lay `content` out into a new document, without writing anything
pub fn generate(
    content: &str,
    settings: &Settings,
    search: &FontSearch,
) -> Result<Generated, ConvertError> {
    let params = &settings.layout;
    let mut document = Document::new(params.page_size, params.margins.clone());
    document.colour = settings.colour;
    let mut info = Info::new();
    if let Some(title) = settings.title() {
        info.title(title);
    }
    if let Some(subject) = &settings.subject {
        info.subject(subject);
    }
    document.set_info(info);

    let font = select_font(&mut document, settings, search)
        .map_err(|source| ConvertError::FontSetupFailed { source })?;
    if let FontChoice::Builtin { font, .. } = &font {
        if !font.can_encode(content) {
            warn!(
                "the input has characters {} cannot show, they will print as '?'",
                font.base_font()
            );
        }
    }

    document.add_page();
    let cursor = layout_lines(content, params, &mut document)
        .map_err(|LayoutError { line, source }| ConvertError::TextRenderFailed { line, source })?;

    Ok(Generated {
        document,
        font,
        cursor,
    })
}

/// Read the whole input file as UTF-8
pub fn read_input(path: &Path) -> Result<String, ConvertError> {
    fs::read_to_string(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => ConvertError::InputNotFound {
            path: path.to_path_buf(),
        },
        _ => ConvertError::InputUnreadable {
            path: path.to_path_buf(),
            source,
        },
    })
}

/// Create `dir` and its parents if it doesn't exist yet. Returns whether it
/// had to be created.
pub fn ensure_directory(dir: &Path) -> Result<bool, ConvertError> {
    if dir.is_dir() {
        return Ok(false);
    }

    let mut builder = fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(0o755);
    }
    builder
        .create(dir)
        .map_err(|source| ConvertError::DirectoryCreateFailed {
            path: dir.to_path_buf(),
            source,
        })?;
    info!(dir = %dir.display(), "created output directory");
    Ok(true)
}

/// Run the whole pipeline with the given font search
pub fn convert_with(settings: &Settings, search: &FontSearch) -> Result<Report, ConvertError> {
    info!(input = %settings.input.display(), "reading input");
    let content = read_input(&settings.input)?;
    ensure_directory(&settings.output_dir)?;

    let output = settings.output_path();
    info!(output = %output.display(), "generating PDF");
    let Generated { document, font, .. } = generate(&content, settings, search)?;
    let pages = document.page_count();
    let lines: usize = document.pages().map(|page| page.runs.len()).sum();

    document
        .save(&output)
        .map_err(|source| ConvertError::OutputWriteFailed {
            path: output.clone(),
            source,
        })?;

    Ok(Report {
        output,
        pages,
        lines,
        font,
    })
}

/// Run the whole pipeline, searching the platform's font directories
pub fn convert(settings: &Settings) -> Result<Report, ConvertError> {
    convert_with(settings, &FontSearch::platform())
}
