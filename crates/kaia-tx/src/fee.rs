//! Fee delegation: the fee ratio and the split of a realized fee between sender and fee payer.

use core::fmt;

use alloy_primitives::U256;
use serde::{Deserialize, Serialize};

use crate::TxError;

/// Upper bound (exclusive) of a valid [`FeeRatio`].
pub const MAX_FEE_RATIO: u8 = 100;

/// Percentage of the transaction fee paid by the fee payer.
///
/// A ratio is valid in `[1, 99]`. The zero value only appears in the zero-valued shells built by
/// [`crate::TxData::create`] and is rejected by [`crate::TxData::validate`].
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "u8", into = "u8")]
pub struct FeeRatio(u8);

impl FeeRatio {
    /// Creates a fee ratio, rejecting values outside of `[1, 99]`.
    pub const fn new(ratio: u8) -> Result<Self, TxError> {
        let ratio = Self(ratio);
        if ratio.is_valid() {
            Ok(ratio)
        } else {
            Err(TxError::InvalidFeeRatio(ratio.0))
        }
    }

    /// Returns `true` if the ratio is within `[1, 99]`.
    pub const fn is_valid(self) -> bool {
        1 <= self.0 && self.0 < MAX_FEE_RATIO
    }

    /// Returns the ratio in percent.
    pub const fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for FeeRatio {
    type Error = TxError;

    fn try_from(ratio: u8) -> Result<Self, Self::Error> {
        Self::new(ratio)
    }
}

impl From<FeeRatio> for u8 {
    fn from(ratio: FeeRatio) -> Self {
        ratio.0
    }
}

impl fmt::Display for FeeRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

/// A realized fee split between the fee payer and the sender.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct FeeSplit {
    /// The part charged to the fee payer.
    pub fee_payer: U256,
    /// The part charged to the sender.
    pub sender: U256,
}

impl FeeSplit {
    /// Returns the total fee.
    pub fn total(&self) -> U256 {
        self.fee_payer + self.sender
    }
}

/// Splits `fee` according to `ratio`: the fee payer is charged `floor(fee * ratio / 100)` and the
/// sender is charged the rest.
///
/// The product is expanded as `(fee / 100) * ratio + (fee % 100) * ratio / 100`, which is exact
/// and cannot overflow for ratios below 100.
pub fn split_fee(ratio: FeeRatio, fee: U256) -> FeeSplit {
    let hundred = U256::from(MAX_FEE_RATIO);
    let ratio = U256::from(ratio.0);
    let fee_payer = (fee / hundred) * ratio + (fee % hundred) * ratio / hundred;
    FeeSplit { fee_payer, sender: fee - fee_payer }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fee_ratio_range() {
        assert_eq!(FeeRatio::new(0), Err(TxError::InvalidFeeRatio(0)));
        assert_eq!(FeeRatio::new(100), Err(TxError::InvalidFeeRatio(100)));
        assert_eq!(FeeRatio::new(1).map(FeeRatio::get), Ok(1));
        assert_eq!(FeeRatio::new(99).map(FeeRatio::get), Ok(99));
        assert!(!FeeRatio::default().is_valid());
    }

    #[test]
    fn test_split_fee() {
        let split = split_fee(FeeRatio::new(30).unwrap(), U256::from(100));
        assert_eq!(split, FeeSplit { fee_payer: U256::from(30), sender: U256::from(70) });

        // Rounding favors the fee payer.
        let split = split_fee(FeeRatio::new(33).unwrap(), U256::from(10));
        assert_eq!(split, FeeSplit { fee_payer: U256::from(3), sender: U256::from(7) });

        let split = split_fee(FeeRatio::new(99).unwrap(), U256::ZERO);
        assert_eq!(split.total(), U256::ZERO);
    }

    #[test]
    fn test_split_fee_does_not_overflow() {
        let split = split_fee(FeeRatio::new(99).unwrap(), U256::MAX);
        assert_eq!(split.fee_payer + split.sender, U256::MAX);
        assert!(split.fee_payer > split.sender);
    }
}
