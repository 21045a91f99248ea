use serde::{Deserialize, Serialize};
use std::fmt;

/// Scale between index values stored on a cluster record and amounts
/// derived from `rate * blocks`.
pub const INDEX_PRECISION: i128 = 10_000_000;

/// Number of decimals of the network's native asset.
pub const NATIVE_DECIMALS: u32 = 18;

/// A signed quantity in the smallest indivisible unit of the native asset.
///
/// All arithmetic is checked. Callers decide how an overflow is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Amount(pub i128);

impl Amount {
    pub const ZERO: Amount = Amount(0);

    pub fn checked_add(self, other: Amount) -> Option<Amount> {
        self.0.checked_add(other.0).map(Amount)
    }

    pub fn checked_sub(self, other: Amount) -> Option<Amount> {
        self.0.checked_sub(other.0).map(Amount)
    }

    pub fn checked_mul(self, factor: u64) -> Option<Amount> {
        self.0.checked_mul(i128::from(factor)).map(Amount)
    }

    /// Integer division rounding half away from zero. `None` when `divisor`
    /// is zero or the quotient overflows.
    pub fn checked_div_rounded(self, divisor: Amount) -> Option<i128> {
        let quotient = self.0.checked_div(divisor.0)?;
        let remainder = self.0.checked_rem(divisor.0)?.unsigned_abs();
        if remainder.checked_mul(2)? < divisor.0.unsigned_abs() {
            return Some(quotient);
        }
        if (self.0 < 0) != (divisor.0 < 0) {
            quotient.checked_sub(1)
        } else {
            quotient.checked_add(1)
        }
    }

    /// Sums `values`, returning `None` on overflow.
    pub fn checked_sum<I>(values: I) -> Option<Amount>
    where
        I: IntoIterator<Item = Amount>,
    {
        values
            .into_iter()
            .try_fold(Amount::ZERO, |acc, value| acc.checked_add(value))
    }

    pub fn is_zero(self) -> bool {
        self.0 == 0
    }

    pub fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// Renders the amount in whole native units with `places` decimals,
    /// rounding half away from zero. Uses integer arithmetic only.
    pub fn to_native_string(self, places: u32) -> String {
        let places = places.min(NATIVE_DECIMALS);
        let negative = self.0 < 0;
        let magnitude = self.0.unsigned_abs();

        let drop = 10u128.pow(NATIVE_DECIMALS - places);
        let mut scaled = magnitude / drop;
        if magnitude % drop >= drop / 2 + drop % 2 {
            scaled += 1;
        }

        let unit = 10u128.pow(places);
        let whole = scaled / unit;
        let sign = if negative && scaled != 0 { "-" } else { "" };
        if places == 0 {
            return format!("{sign}{whole}");
        }
        let fraction = scaled % unit;
        format!("{sign}{whole}.{fraction:0width$}", width = places as usize)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i128> for Amount {
    fn from(value: i128) -> Self {
        Amount(value)
    }
}

/// An index value in the packed units a cluster record stores it in.
///
/// Packed indices must be expanded by [`INDEX_PRECISION`] before they can be
/// compared with accrued fee amounts; [`PackedIndex::expand`] is the only
/// place that factor is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PackedIndex(pub i128);

impl PackedIndex {
    pub fn expand(self) -> Option<Amount> {
        self.0.checked_mul(INDEX_PRECISION).map(Amount)
    }
}
