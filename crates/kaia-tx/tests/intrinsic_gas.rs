//! Tests for the intrinsic gas of Ethereum and Kaia typed transactions.

use alloy_eips::{
    eip2930::{AccessList, AccessListItem},
    eip7702::{Authorization, SignedAuthorization},
};
use alloy_primitives::{address, Address, Bytes, B256, U256};
use kaia_tx::{
    intrinsic_gas, intrinsic_gas_payload, test_utils::sample_tx, word_count, AccountKey,
    AccountUpdateTx, FeeMode, FeePayer, FeeRatio, KaiaSpecId, Rules, TxData, TxError, TxType,
    ValueTransferMemoTx, WeightedMultiSigKey, WeightedPublicKey,
};
use proptest::prelude::*;

const TARGET: Address = address!("00000000000000000000000000000000000000aa");

/// 32 zero bytes followed by 32 non-zero bytes.
fn mixed_payload() -> Vec<u8> {
    let mut data = vec![0u8; 32];
    data.extend_from_slice(&[0xffu8; 32]);
    data
}

fn authorization() -> SignedAuthorization {
    let authorization = Authorization { chain_id: U256::from(8217), address: TARGET, nonce: 0 };
    SignedAuthorization::new_unchecked(authorization, 0, U256::from(1), U256::from(2))
}

#[test]
fn test_value_transfer_with_mixed_payload_before_prague() {
    let rules = Rules::from_spec(KaiaSpecId::KAIA);
    assert!(rules.is_istanbul && !rules.is_prague);
    // 21000 + 64 * 100
    assert_eq!(
        intrinsic_gas(&mixed_payload(), &AccessList::default(), &[], false, &rules),
        Ok(27_400)
    );
}

#[test]
fn test_value_transfer_with_mixed_payload_since_prague() {
    let rules = Rules::from_spec(KaiaSpecId::PRAGUE);
    // 21000 + 32 * 4 + 32 * 16
    assert_eq!(
        intrinsic_gas(&mixed_payload(), &AccessList::default(), &[], false, &rules),
        Ok(21_640)
    );
}

#[test]
fn test_legacy_payload_policy_before_istanbul() {
    let rules = Rules::genesis();
    // 21000 + 32 * 4 + 32 * 68
    assert_eq!(
        intrinsic_gas(&mixed_payload(), &AccessList::default(), &[], false, &rules),
        Ok(23_304)
    );
}

#[test]
fn test_contract_creation_base_and_initcode_words() {
    let data = [0x60u8; 40];
    let shanghai = Rules::from_spec(KaiaSpecId::SHANGHAI);
    let kore = Rules::from_spec(KaiaSpecId::KORE);
    assert_eq!(
        intrinsic_gas(&data, &AccessList::default(), &[], true, &shanghai),
        Ok(53_000 + 40 * 100 + 2 * 2)
    );
    assert_eq!(
        intrinsic_gas(&data, &AccessList::default(), &[], true, &kore),
        Ok(53_000 + 40 * 100)
    );
}

#[test]
fn test_access_list_and_authorizations_are_counted_with_duplicates() {
    let item = AccessListItem { address: TARGET, storage_keys: vec![B256::ZERO, B256::ZERO] };
    let access_list = AccessList(vec![item.clone(), item]);
    let authorizations = vec![authorization(), authorization()];
    let rules = Rules::from_spec(KaiaSpecId::PRAGUE);
    assert_eq!(
        intrinsic_gas(&[], &access_list, &authorizations, false, &rules),
        Ok(21_000 + 2 * 2_400 + 4 * 1_900 + 2 * 25_000)
    );
}

#[test]
fn test_payload_overflow_is_reported() {
    let rules = Rules::from_spec(KaiaSpecId::PRAGUE);
    let data = [0xffu8; 16];
    // The headroom is smaller than the cost of the non-zero bytes.
    let gas = u64::MAX - 16 * 16 + 1;
    assert_eq!(intrinsic_gas_payload(gas, &data, false, &rules), Err(TxError::GasOverflow));
    assert_eq!(intrinsic_gas_payload(gas - 1, &data, false, &rules), Ok(u64::MAX));
}

#[test]
fn test_word_count_saturates() {
    assert_eq!(word_count(0), 0);
    assert_eq!(word_count(32), 1);
    assert_eq!(word_count(33), 2);
    assert_eq!(word_count(u64::MAX), u64::MAX / 32 + 1);
}

#[test]
fn test_kaia_fixed_costs() {
    let rules = Rules::from_spec(KaiaSpecId::PRAGUE);
    let expected = [
        (TxType::VALUE_TRANSFER, 21_000),
        (TxType::FEE_DELEGATED_VALUE_TRANSFER, 31_000),
        (TxType::FEE_DELEGATED_VALUE_TRANSFER_WITH_RATIO, 36_000),
        (TxType::CANCEL, 21_000),
        (TxType::FEE_DELEGATED_CANCEL_WITH_RATIO, 36_000),
    ];
    for (tx_type, gas) in expected {
        let tx = sample_tx(tx_type).unwrap();
        assert_eq!(tx.intrinsic_gas(&rules), Ok(gas), "{tx_type}");
    }
}

#[test]
fn test_memo_and_anchoring_pay_for_their_payload() {
    let rules = Rules::from_spec(KaiaSpecId::KAIA);
    let memo = TxData::ValueTransferMemo(ValueTransferMemoTx {
        payload: Bytes::from(mixed_payload()),
        fee_mode: FeeMode::DelegatedWithRatio(FeePayer::new(TARGET), FeeRatio::new(50).unwrap()),
        ..Default::default()
    });
    assert_eq!(memo.intrinsic_gas(&rules), Ok(21_000 + 15_000 + 64 * 100));

    // The sample payload holds two zero and two non-zero bytes.
    let anchoring = sample_tx(TxType::CHAIN_DATA_ANCHORING).unwrap();
    let prague = Rules::from_spec(KaiaSpecId::PRAGUE);
    assert_eq!(anchoring.intrinsic_gas(&prague), Ok(21_000 + 2 * 4 + 2 * 16));
}

#[test]
fn test_account_update_pays_for_keys() {
    let key = AccountKey::RoleBased(vec![
        AccountKey::Public(Default::default()),
        AccountKey::WeightedMultiSig(WeightedMultiSigKey {
            threshold: 2,
            keys: vec![
                WeightedPublicKey { weight: 1, key: Default::default() },
                WeightedPublicKey { weight: 1, key: Default::default() },
            ],
        }),
        AccountKey::Nil,
    ]);
    let update = TxData::AccountUpdate(AccountUpdateTx { key, ..Default::default() });
    assert_eq!(update.intrinsic_gas(&Rules::genesis()), Ok(21_000 + 3 * 20_000));
}

#[test]
fn test_ethereum_typed_transactions_use_the_ethereum_schedule() {
    let rules = Rules::from_spec(KaiaSpecId::PRAGUE);
    for tx_type in [
        TxType::LEGACY,
        TxType::ETHEREUM_ACCESS_LIST,
        TxType::ETHEREUM_DYNAMIC_FEE,
        TxType::ETHEREUM_SET_CODE,
    ] {
        let tx = sample_tx(tx_type).unwrap();
        // A call with the two zero and two non-zero sample bytes.
        assert_eq!(tx.intrinsic_gas(&rules), Ok(21_000 + 2 * 4 + 2 * 16), "{tx_type}");
    }
}

proptest! {
    #[test]
    fn proptest_intrinsic_gas_is_monotonic_in_payload_length(
        data in proptest::collection::vec(any::<u8>(), 0..512),
        extra in proptest::collection::vec(any::<u8>(), 0..64),
        spec in prop::sample::select(vec![
            KaiaSpecId::GENESIS,
            KaiaSpecId::ISTANBUL,
            KaiaSpecId::SHANGHAI,
            KaiaSpecId::PRAGUE,
        ]),
        is_creation in any::<bool>(),
    ) {
        let rules = Rules::from_spec(spec);
        let mut longer = data.clone();
        longer.extend_from_slice(&extra);
        let access_list = AccessList::default();
        let short = intrinsic_gas(&data, &access_list, &[], is_creation, &rules).unwrap();
        let long = intrinsic_gas(&longer, &access_list, &[], is_creation, &rules).unwrap();
        prop_assert!(short <= long);
    }
}
