use bytes::{Buf, BufMut};
use commonware_codec::{Error, FixedSize, Read, ReadExt, Write};
use std::fmt;

use super::BASIS_POINTS;

/// Payout multiplier in basis points (10 000 = 1.0x).
///
/// A multiplier is applied to the stake to produce the credited amount; it is
/// not added on top of the stake. A 2.0x win returns the stake plus even money.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Multiplier(u64);

impl Multiplier {
    pub const ZERO: Multiplier = Multiplier(0);
    pub const ONE: Multiplier = Multiplier(BASIS_POINTS);

    pub const fn from_bps(bps: u64) -> Self {
        Self(bps)
    }

    /// Whole-number multiplier (`whole(35)` is 35.0x).
    pub const fn whole(times: u64) -> Self {
        Self(times * BASIS_POINTS)
    }

    /// `num / den`, rounded down to the nearest basis point.
    pub fn from_ratio(num: u128, den: u128) -> Self {
        if den == 0 {
            return Self::ZERO;
        }
        let bps = num.saturating_mul(BASIS_POINTS as u128) / den;
        Self(u64::try_from(bps).unwrap_or(u64::MAX))
    }

    /// Converts a float multiplier, rounding down to the nearest basis point.
    /// Negative and non-finite inputs map to zero.
    pub fn from_f64(value: f64) -> Self {
        if !value.is_finite() || value <= 0.0 {
            return Self::ZERO;
        }
        let bps = (value * BASIS_POINTS as f64).floor();
        if bps >= u64::MAX as f64 {
            Self(u64::MAX)
        } else {
            Self(bps as u64)
        }
    }

    pub fn bps(&self) -> u64 {
        self.0
    }

    pub fn as_f64(&self) -> f64 {
        self.0 as f64 / BASIS_POINTS as f64
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Chips credited for `amount` staked at this multiplier (rounded down).
    pub fn apply(&self, amount: u64) -> u64 {
        let credited = (amount as u128 * self.0 as u128) / BASIS_POINTS as u128;
        u64::try_from(credited).unwrap_or(u64::MAX)
    }

    pub fn saturating_add(self, other: Multiplier) -> Multiplier {
        Multiplier(self.0.saturating_add(other.0))
    }

    /// Product of two multipliers, rounded down.
    pub fn compound(self, other: Multiplier) -> Multiplier {
        let bps = (self.0 as u128 * other.0 as u128) / BASIS_POINTS as u128;
        Multiplier(u64::try_from(bps).unwrap_or(u64::MAX))
    }
}

impl fmt::Display for Multiplier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = self.0 / BASIS_POINTS;
        let hundredths = (self.0 % BASIS_POINTS) / 100;
        write!(f, "{whole}.{hundredths:02}x")
    }
}

impl Write for Multiplier {
    fn write(&self, writer: &mut impl BufMut) {
        self.0.write(writer);
    }
}

impl Read for Multiplier {
    type Cfg = ();

    fn read_cfg(reader: &mut impl Buf, _: &Self::Cfg) -> Result<Self, Error> {
        Ok(Self(u64::read(reader)?))
    }
}

impl FixedSize for Multiplier {
    const SIZE: usize = u64::SIZE;
}
