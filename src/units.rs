//! Length units used throughout the crate.
//!
//! PDF works in points (1/72 of an inch), so all layout maths happens in [Pt].
//! Physical measurements are usually easier to think about in millimetres;
//! [Mm] converts into [Pt] losslessly enough for layout.

use derive_more::{Add, AddAssign, Display, From, Into, Sub};

const POINTS_PER_INCH: f32 = 72.0;
const MM_PER_INCH: f32 = 25.4;

/// Convert a length in millimetres into points
pub fn mm_to_pt(mm: f32) -> f32 {
    mm * POINTS_PER_INCH / MM_PER_INCH
}

/// A length in PDF points
#[derive(
    Debug,
    Default,
    Copy,
    Clone,
    PartialEq,
    PartialOrd,
    Add,
    Sub,
    AddAssign,
    Display,
    From,
    Into,
)]
pub struct Pt(pub f32);

/// A length in millimetres
#[derive(Debug, Default, Copy, Clone, PartialEq, PartialOrd, Add, Sub, Display, From, Into)]
pub struct Mm(pub f32);

impl From<Mm> for Pt {
    fn from(mm: Mm) -> Self {
        Pt(mm_to_pt(mm.0))
    }
}

impl Pt {
    /// Whether this length is a real, finite number
    pub fn is_finite(self) -> bool {
        self.0.is_finite()
    }
}
