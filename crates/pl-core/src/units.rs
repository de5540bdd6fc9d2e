//! Rail distance unit.
//!
//! Station distances in the plant drawings are given in millimetres and the
//! manipulators advance a whole number of millimetres per tick, so the rail
//! coordinate is kept as an integer.  Equality checks ("has the manipulator
//! reached its target?") are therefore exact.

use std::fmt;
use std::ops::{Add, AddAssign, Sub, SubAssign};

/// A signed distance along the rail, in millimetres from the line entry.
///
/// Signed because collision avoidance may shove a manipulator past either
/// end of the station range.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Millimetres(pub i64);

impl Millimetres {
    pub const ZERO: Millimetres = Millimetres(0);

    /// Convert a distance in metres, rounding to the nearest millimetre.
    #[inline]
    pub fn from_metres(m: f64) -> Self {
        Millimetres((m * 1000.0).round() as i64)
    }

    #[inline]
    pub fn as_metres(self) -> f64 {
        self.0 as f64 / 1000.0
    }
}

impl Add for Millimetres {
    type Output = Millimetres;
    #[inline]
    fn add(self, rhs: Millimetres) -> Millimetres {
        Millimetres(self.0 + rhs.0)
    }
}

impl Sub for Millimetres {
    type Output = Millimetres;
    #[inline]
    fn sub(self, rhs: Millimetres) -> Millimetres {
        Millimetres(self.0 - rhs.0)
    }
}

impl AddAssign for Millimetres {
    #[inline]
    fn add_assign(&mut self, rhs: Millimetres) {
        self.0 += rhs.0;
    }
}

impl SubAssign for Millimetres {
    #[inline]
    fn sub_assign(&mut self, rhs: Millimetres) {
        self.0 -= rhs.0;
    }
}

impl fmt::Display for Millimetres {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3} m", self.as_metres())
    }
}
