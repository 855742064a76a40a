use std::{fmt::Display, iter::Sum, ops::Add};

use serde::{Deserialize, Serialize};

/// Vipps reports amounts in NOK unless told otherwise.
pub const DEFAULT_CURRENCY_CODE: &str = "NOK";

//--------------------------------------     MinorUnits       --------------------------------------------------------
/// A currency amount expressed in the smallest unit of the currency (øre, cents). This is how Vipps represents every
/// amount on the wire.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MinorUnits(i64);

impl MinorUnits {
    pub fn value(&self) -> i64 {
        self.0
    }
}

impl From<i64> for MinorUnits {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

/// Saturates at the bounds of `i64` rather than overflowing.
impl Add for MinorUnits {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl Sum for MinorUnits {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), Add::add)
    }
}

impl Display for MinorUnits {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{sign}{}.{:02}", abs / 100, abs % 100)
    }
}
