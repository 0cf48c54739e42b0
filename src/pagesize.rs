//! Page sizes for the paper formats text is usually printed on.
//!
//! All sizes are portrait (width, height) in points.
//!
//! ```
//! use txt2pdf::pagesize::{self, PageSize};
//! use txt2pdf::Pt;
//!
//! let (width, height): PageSize = pagesize::A4;
//! assert!(width < height);
//! assert!(height > Pt(841.0));
//! ```

use crate::units::*;

/// Page dimensions as (width, height) in points.
pub type PageSize = (Pt, Pt);

// north american sizes
pub const LETTER: PageSize = (Pt(8.5 * 72.0), Pt(11.0 * 72.0));
pub const LEGAL: PageSize = (Pt(8.5 * 72.0), Pt(14.0 * 72.0));

// iso a-series (converted from mm to points)
pub const A3: PageSize = (Pt(297.0 * 72.0 / 25.4), Pt(420.0 * 72.0 / 25.4));
pub const A4: PageSize = (Pt(210.0 * 72.0 / 25.4), Pt(297.0 * 72.0 / 25.4));
pub const A5: PageSize = (Pt(148.0 * 72.0 / 25.4), Pt(210.0 * 72.0 / 25.4));

/// Look up a page size by its common name, case-insensitively
pub fn by_name(name: &str) -> Option<PageSize> {
    match name.to_ascii_lowercase().as_str() {
        "a3" => Some(A3),
        "a4" => Some(A4),
        "a5" => Some(A5),
        "letter" => Some(LETTER),
        "legal" => Some(LEGAL),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn a4_matches_millimetre_conversion() {
        assert_eq!(A4.0, Pt::from(Mm(210.0)));
        assert_eq!(A4.1, Pt::from(Mm(297.0)));
    }

    #[test]
    fn names_are_case_insensitive() {
        assert_eq!(by_name("A4"), Some(A4));
        assert_eq!(by_name("letter"), Some(LETTER));
        assert_eq!(by_name("tabloid"), None);
    }
}
