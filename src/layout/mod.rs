//! Line-by-line text layout.
//!
//! Text is laid out top to bottom, one input line per output line, with no
//! wrapping. [`layout_lines`](crate::layout::layout_lines) walks the input with
//! a [`LayoutCursor`](crate::layout::LayoutCursor) and drives a
//! [`PageSink`](crate::layout::PageSink), starting new pages when the next line
//! would run into the bottom margin. The engine knows nothing about fonts or
//! PDF; [`Document`](crate::Document) is the sink that renders, and
//! [`PlacementLog`](crate::layout::PlacementLog) is one that only records.
//!
//! # Example
//!
//! ```
//! use txt2pdf::layout::{LayoutParams, PlacementLog};
//!
//! let params = LayoutParams::default();
//! let log = PlacementLog::record("Hello\n\nWorld", &params);
//!
//! assert_eq!(log.pages, 1);
//! assert_eq!(log.placements.len(), 2);
//! assert_eq!(log.placements[0].y, params.margins.top);
//! ```

mod lines;
mod margins;

pub use lines::*;
pub use margins::*;
