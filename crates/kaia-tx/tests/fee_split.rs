//! Tests for splitting a fee between a fee payer and the sender.

use alloy_primitives::{U256, U512};
use kaia_tx::{
    split_fee,
    test_utils::{sample_tx, FEE_PAYER},
    FeeRatio, TxError, TxType, MAX_FEE_RATIO,
};
use proptest::prelude::*;

#[test]
fn test_split_of_a_realized_fee() {
    let tx = sample_tx(TxType::FEE_DELEGATED_SMART_CONTRACT_EXECUTION_WITH_RATIO).unwrap();
    assert_eq!(tx.fee_payer(), Some(FEE_PAYER));
    let ratio = tx.fee_ratio().unwrap();
    assert_eq!(ratio.get(), 30);

    let fee = tx.gas_price() * U256::from(50_000);
    let split = split_fee(ratio, fee);
    assert_eq!(split.fee_payer, fee * U256::from(30) / U256::from(100));
    assert_eq!(split.sender, fee - split.fee_payer);
}

#[test]
fn test_split_rounds_down_for_the_fee_payer() {
    let split = split_fee(FeeRatio::new(33).unwrap(), U256::from(10));
    assert_eq!(split.fee_payer, U256::from(3));
    assert_eq!(split.sender, U256::from(7));
}

#[test]
fn test_split_does_not_overflow_near_the_maximum() {
    let split = split_fee(FeeRatio::new(99).unwrap(), U256::MAX);
    assert_eq!(split.total(), U256::MAX);
    assert!(split.fee_payer > split.sender);
}

#[test]
fn test_ratio_bounds() {
    assert_eq!(FeeRatio::new(0), Err(TxError::InvalidFeeRatio(0)));
    assert_eq!(FeeRatio::new(MAX_FEE_RATIO), Err(TxError::InvalidFeeRatio(100)));
    assert!(!FeeRatio::default().is_valid());
    assert!(FeeRatio::new(1).is_ok());
    assert!(FeeRatio::new(99).is_ok());
}

proptest! {
    #[test]
    fn proptest_split_is_exact(ratio in 1u8..100, limbs in any::<[u64; 4]>()) {
        let fee = U256::from_limbs(limbs);
        let split = split_fee(FeeRatio::new(ratio).unwrap(), fee);

        prop_assert_eq!(split.fee_payer + split.sender, fee);
        // floor(fee * ratio / 100), computed without overflow in 512 bits.
        let expected = U512::from(fee) * U512::from(ratio) / U512::from(100);
        prop_assert_eq!(U512::from(split.fee_payer), expected);
    }

    #[test]
    fn proptest_out_of_range_ratio_is_invalid(ratio in prop_oneof![Just(0u8), 100u8..=u8::MAX]) {
        prop_assert_eq!(FeeRatio::new(ratio), Err(TxError::InvalidFeeRatio(ratio)));
        prop_assert_eq!(FeeRatio::try_from(ratio), Err(TxError::InvalidFeeRatio(ratio)));
    }
}
