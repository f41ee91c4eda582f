use std::ops::{Add, Sub};

use serde::{Deserialize, Serialize};

/// Handle for a page element, assigned by the host binding layer.
/// The effect logic never holds DOM references, only these ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub u32);

/// A virtual instant or duration in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Millis(pub u64);

impl Millis {
    pub const ZERO: Millis = Millis(0);

    /// Convert a fractional millisecond timestamp (e.g. `performance.now()`).
    /// Negative and NaN inputs clamp to zero.
    pub fn from_f64(ms: f64) -> Self {
        if ms.is_finite() && ms > 0.0 {
            Millis(ms as u64)
        } else {
            Millis::ZERO
        }
    }

    pub fn as_u64(self) -> u64 {
        self.0
    }
}

impl Add for Millis {
    type Output = Millis;

    fn add(self, rhs: Millis) -> Millis {
        Millis(self.0.saturating_add(rhs.0))
    }
}

impl Sub for Millis {
    type Output = Millis;

    fn sub(self, rhs: Millis) -> Millis {
        Millis(self.0.saturating_sub(rhs.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arithmetic_saturates() {
        assert_eq!(Millis(5) - Millis(10), Millis::ZERO);
        assert_eq!(Millis(u64::MAX) + Millis(1), Millis(u64::MAX));
        assert_eq!(Millis(150) + Millis(75), Millis(225));
    }

    #[test]
    fn from_f64_truncates_and_clamps() {
        assert_eq!(Millis::from_f64(16.9), Millis(16));
        assert_eq!(Millis::from_f64(-3.0), Millis::ZERO);
        assert_eq!(Millis::from_f64(f64::NAN), Millis::ZERO);
    }
}
