//! Integer minor-unit price representation.
//!
//! All prices and balances are carried as whole minor currency units
//! (cents for USD). Totals are computed with checked integer arithmetic,
//! so there is no floating-point rounding anywhere in the money path.

use serde::{Deserialize, Serialize};

/// An amount of money in the smallest currency unit.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Zero amount.
    pub const ZERO: Self = Self(0);

    /// Create an amount from minor units (e.g., cents).
    #[must_use]
    pub const fn from_minor(units: i64) -> Self {
        Self(units)
    }

    /// Get the amount in minor units.
    #[must_use]
    pub const fn minor_units(self) -> i64 {
        self.0
    }

    /// Checked addition.
    #[must_use]
    pub const fn checked_add(self, other: Self) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(units) => Some(Self(units)),
            None => None,
        }
    }

    /// Checked subtraction.
    #[must_use]
    pub const fn checked_sub(self, other: Self) -> Option<Self> {
        match self.0.checked_sub(other.0) {
            Some(units) => Some(Self(units)),
            None => None,
        }
    }

    /// Saturating addition.
    #[must_use]
    pub const fn saturating_add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }

    /// Checked multiplication by a line quantity.
    #[must_use]
    pub const fn checked_mul_qty(self, qty: u32) -> Option<Self> {
        match self.0.checked_mul(qty as i64) {
            Some(units) => Some(Self(units)),
            None => None,
        }
    }
}

impl std::fmt::Display for Money {
    /// Format as a dollar string, e.g. `$4.50` or `-$0.05`.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{sign}${}.{:02}", abs / 100, abs % 100)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_formats_dollars_and_cents() {
        assert_eq!(Money::from_minor(450).to_string(), "$4.50");
        assert_eq!(Money::from_minor(100_005).to_string(), "$1000.05");
        assert_eq!(Money::ZERO.to_string(), "$0.00");
        assert_eq!(Money::from_minor(-5).to_string(), "-$0.05");
    }

    #[test]
    fn test_checked_mul_qty() {
        let cost = Money::from_minor(250);
        assert_eq!(cost.checked_mul_qty(3), Some(Money::from_minor(750)));
        assert_eq!(Money::from_minor(i64::MAX).checked_mul_qty(2), None);
    }

    #[test]
    fn test_checked_add_and_sub() {
        let a = Money::from_minor(100);
        let b = Money::from_minor(250);
        assert_eq!(a.checked_add(b), Some(Money::from_minor(350)));
        assert_eq!(b.checked_sub(a), Some(Money::from_minor(150)));
        assert_eq!(Money::from_minor(i64::MAX).checked_add(a), None);
    }

    #[test]
    fn test_serde_transparent_integer() {
        let json = serde_json::to_string(&Money::from_minor(4999)).expect("serialize");
        assert_eq!(json, "4999");
        let back: Money = serde_json::from_str("4999").expect("deserialize");
        assert_eq!(back, Money::from_minor(4999));
    }
}
