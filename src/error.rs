use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while building or writing a PDF document
#[derive(Error, Debug)]
pub enum PDFError {
    #[error(transparent)]
    /// An I/O error occurred
    Io(#[from] std::io::Error),

    #[error(transparent)]
    /// [owned_ttf_parser] failed to parse the font
    FaceParsingError(#[from] owned_ttf_parser::FaceParsingError),

    #[error("a font is already registered as `{0}`")]
    /// Documents carry at most one embedded font
    FontAlreadyRegistered(String),

    #[error("no font is registered as `{0}`")]
    /// Tried to activate a font that was never registered
    UnknownFont(String),

    #[error("invalid font size {0}")]
    /// Font sizes must be finite and positive
    InvalidFontSize(f32),

    #[error("no font has been activated")]
    /// Text was placed before any font was activated
    NoActiveFont,

    #[error("no page has been started")]
    /// Text was placed before the first page was started
    NoOpenPage,

    #[error("text coordinate ({0}, {1}) is not finite")]
    /// Text was placed at a NaN or infinite coordinate
    InvalidCoordinate(f32, f32),
}

/// Fatal errors of the text-to-PDF pipeline
#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("input file `{}` does not exist", path.display())]
    InputNotFound { path: PathBuf },

    #[error("failed to read input file `{}`", path.display())]
    InputUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to create output directory `{}`", path.display())]
    DirectoryCreateFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to set up a font for the document")]
    FontSetupFailed {
        #[source]
        source: PDFError,
    },

    #[error("failed to render line {line}")]
    TextRenderFailed {
        line: usize,
        #[source]
        source: PDFError,
    },

    #[error("failed to write PDF file `{}`", path.display())]
    OutputWriteFailed {
        path: PathBuf,
        #[source]
        source: PDFError,
    },
}
