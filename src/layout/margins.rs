use crate::units::Pt;

/// Margins are used when laying out lines on a page. The layout engine only
/// enforces the top and bottom margins; the left margin is where every line
/// starts and nothing stops a long line from running over the right margin.
/// The margins are also applied to [`Page`](crate::Page)s to determine the
/// `ArtBox` of each page in the generated PDF
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Margins {
    pub top: Pt,
    pub right: Pt,
    pub bottom: Pt,
    pub left: Pt,
}

impl Margins {
    /// Create margins where all values are equal
    pub fn all<D: Into<Pt>>(value: D) -> Margins {
        let value: Pt = value.into();
        Margins {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }

    /// Create margins where all values are 0.0
    pub fn empty() -> Margins {
        Margins::all(Pt(0.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::Mm;

    #[test]
    fn all_accepts_any_unit() {
        let margins = Margins::all(Mm(25.4));
        assert!((margins.left.0 - 72.0).abs() < 1e-4);
        assert_eq!(margins.top, margins.bottom);
    }

    #[test]
    fn empty_margins_are_zero() {
        assert_eq!(Margins::empty(), Margins::default());
    }
}
