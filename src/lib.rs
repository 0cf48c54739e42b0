mod colour;
pub use colour::*;

mod content;

/// Reading input, choosing a font and writing the finished PDF
pub mod convert;
pub use convert::{convert, Settings};

mod document;
pub use document::*;

mod font;
pub use font::*;

mod info;
pub use info::*;

/// Utility functions and structures to lay text lines out on pages
pub mod layout;

mod page;
pub use page::*;

/// Standard paper sizes
pub mod pagesize;

mod rect;
pub use rect::*;

pub(crate) mod refs;

/// Searching the filesystem for a usable font file
pub mod resolve;

mod units;
pub use units::*;

mod error;
pub use error::*;

/// Re-export PDF-writer functionality
pub use pdf_writer;
