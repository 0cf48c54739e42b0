use crate::pagesize::{self, PageSize};
use crate::units::{Mm, Pt};
use tracing::{debug, trace};

use super::Margins;

/// Geometry that controls how lines are stacked onto pages
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutParams {
    pub page_size: PageSize,
    pub margins: Margins,
    /// Vertical advance after every line of text
    pub line_height: Pt,
    /// Vertical advance for a whitespace-only line
    pub blank_line_gap: Pt,
}

impl Default for LayoutParams {
    /// A4 paper with 20mm margins, 6mm lines and a 5mm gap for blank lines
    fn default() -> Self {
        LayoutParams {
            page_size: pagesize::A4,
            margins: Margins::all(Mm(20.0)),
            line_height: Mm(6.0).into(),
            blank_line_gap: Mm(5.0).into(),
        }
    }
}

impl LayoutParams {
    /// Lowest cursor position a line can still be placed at. A line whose
    /// cursor is below this goes on a new page.
    pub fn last_line_y(&self) -> Pt {
        self.page_size.1 - self.margins.bottom - self.line_height
    }
}

/// Where the next line goes. `y` is measured downwards from the top edge of
/// the page; `page` is the 0-based index of the page being filled.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LayoutCursor {
    pub y: Pt,
    pub page: usize,
}

impl LayoutCursor {
    /// A cursor at the top margin of the first page
    pub fn new(params: &LayoutParams) -> LayoutCursor {
        LayoutCursor {
            y: params.margins.top,
            page: 0,
        }
    }

    fn break_page(&mut self, params: &LayoutParams) {
        self.page += 1;
        self.y = params.margins.top;
    }
}

/// Something lines can be laid out onto
pub trait PageSink {
    type Error;

    /// Finish the current page and start a fresh one
    fn start_page(&mut self) -> Result<(), Self::Error>;

    /// Draw `text` on the current page with its baseline origin at `(x, y)`,
    /// where `y` is measured downwards from the top edge of the page
    fn place_text(&mut self, text: &str, x: Pt, y: Pt) -> Result<(), Self::Error>;
}

/// A line that could not be placed, and why
#[derive(Debug)]
pub struct LayoutError<E> {
    /// 1-based line number in the input
    pub line: usize,
    pub source: E,
}

/// Whether a line should be drawn or just advance the cursor
pub fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

/// Split `content` into lines on `\n`. A single `\r` before each break is
/// dropped; nothing else is trimmed and empty lines are kept.
pub fn split_lines(content: &str) -> impl Iterator<Item = &str> {
    content
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
}

/// Lays `content` out line by line onto `sink`, which must already have its
/// first page started.
///
/// Blank lines advance the cursor by `blank_line_gap` and are never drawn.
/// Before drawing any other line, if the cursor has passed
/// [LayoutParams::last_line_y] a new page is started and the cursor returns to
/// the top margin. Lines are never wrapped or truncated, and keep their
/// whitespace exactly as in the input.
///
/// The first error returned by the sink aborts the layout.
///
/// Returns the cursor after the last line.
pub fn layout_lines<S: PageSink>(
    content: &str,
    params: &LayoutParams,
    sink: &mut S,
) -> Result<LayoutCursor, LayoutError<S::Error>> {
    let mut cursor = LayoutCursor::new(params);
    let last_line_y = params.last_line_y();
    let x = params.margins.left;

    for (index, line) in split_lines(content).enumerate() {
        if is_blank(line) {
            cursor.y += params.blank_line_gap;
            continue;
        }

        let fail = |source| LayoutError {
            line: index + 1,
            source,
        };

        if cursor.y > last_line_y {
            sink.start_page().map_err(fail)?;
            cursor.break_page(params);
            debug!(page = cursor.page + 1, line = index + 1, "started new page");
        }

        trace!(page = cursor.page + 1, y = cursor.y.0, "placing line {}", index + 1);
        sink.place_text(line, x, cursor.y).map_err(fail)?;
        cursor.y += params.line_height;
    }

    Ok(cursor)
}

/// One line as placed by the layout engine
#[derive(Debug, Clone, PartialEq)]
pub struct Placement {
    pub page: usize,
    pub x: Pt,
    pub y: Pt,
    pub text: String,
}

/// A [PageSink] that only records what would have been drawn. Starts out with
/// its first page open.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacementLog {
    pub pages: usize,
    pub placements: Vec<Placement>,
}

impl Default for PlacementLog {
    fn default() -> Self {
        PlacementLog {
            pages: 1,
            placements: Vec::new(),
        }
    }
}

impl PlacementLog {
    /// Lay `content` out without rendering anything
    pub fn record(content: &str, params: &LayoutParams) -> PlacementLog {
        let mut log = PlacementLog::default();
        match layout_lines(content, params, &mut log) {
            Ok(_) => log,
            Err(LayoutError { source, .. }) => match source {},
        }
    }

    /// Placements on the page with the given 0-based index
    pub fn on_page(&self, page: usize) -> impl Iterator<Item = &Placement> {
        self.placements.iter().filter(move |p| p.page == page)
    }
}

impl PageSink for PlacementLog {
    type Error = std::convert::Infallible;

    fn start_page(&mut self) -> Result<(), Self::Error> {
        self.pages += 1;
        Ok(())
    }

    fn place_text(&mut self, text: &str, x: Pt, y: Pt) -> Result<(), Self::Error> {
        self.placements.push(Placement {
            page: self.pages - 1,
            x,
            y,
            text: text.to_string(),
        });
        Ok(())
    }
}
