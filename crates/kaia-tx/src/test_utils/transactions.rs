use alloy_primitives::{address, Address, Bytes, U256};

use crate::{
    field_schema, AccountKey, FieldMap, TxData, TxError, TxFieldKey, TxSignature, TxSignatures,
    TxType, TxValue,
};

/// The chain id of the Kaia mainnet.
pub const MAINNET_CHAIN_ID: u64 = 8217;

/// Sender of the sample transactions.
pub const SENDER: Address = address!("a94f5374fce5edbc8e2a8697c15331677e6ebf0b");

/// Recipient of the sample transactions.
pub const RECIPIENT: Address = address!("7b65b75d204abed71587c9e519a89277766ee1d0");

/// Fee payer of the sample fee-delegated transactions.
pub const FEE_PAYER: Address = address!("5a0043070275d9f6054307ee7348bd660849d90f");

/// Returns the sample value of `key`.
pub fn sample_value(key: TxFieldKey) -> TxValue {
    match key {
        TxFieldKey::Nonce => 1234u64.into(),
        TxFieldKey::To => RECIPIENT.into(),
        TxFieldKey::Amount => U256::from(10).into(),
        TxFieldKey::GasLimit => 1_000_000u64.into(),
        TxFieldKey::GasPrice | TxFieldKey::GasFeeCap => U256::from(25_000_000_000u64).into(),
        TxFieldKey::GasTipCap => U256::from(1_000_000_000u64).into(),
        TxFieldKey::Data | TxFieldKey::AnchoredData => {
            Bytes::from_static(&[0x60, 0x80, 0x00, 0x00]).into()
        }
        TxFieldKey::From => SENDER.into(),
        TxFieldKey::HumanReadable => false.into(),
        TxFieldKey::AccountKey => AccountKey::Legacy.into(),
        TxFieldKey::FeePayer => FEE_PAYER.into(),
        TxFieldKey::FeeRatio => 30u8.into(),
        TxFieldKey::CodeFormat => 0u8.into(),
        TxFieldKey::AccessList => TxValue::AccessList(Default::default()),
        TxFieldKey::ChainId => U256::from(MAINNET_CHAIN_ID).into(),
        TxFieldKey::AuthorizationList => TxValue::AuthorizationList(Vec::new()),
    }
}

/// Returns a complete field map for `tx_type`, filled with [`sample_value`]s.
pub fn sample_fields(tx_type: TxType) -> Result<FieldMap, TxError> {
    Ok(field_schema(tx_type)?.into_iter().map(|(key, _)| (key, sample_value(key))).collect())
}

/// Builds a sample transaction of `tx_type` from [`sample_fields`].
pub fn sample_tx(tx_type: TxType) -> Result<TxData, TxError> {
    let fields = sample_fields(tx_type)?;
    if tx_type.is_account_creation() {
        return TxData::account_creation_with_fields(fields);
    }
    TxData::from_fields(tx_type, fields)
}

/// Returns a fixed signature committing to `chain_id` the way Kaia typed and EIP-155 legacy
/// signatures do, with `v = chain_id * 2 + 35`.
pub fn sample_signature(chain_id: u64) -> TxSignature {
    TxSignature::new(
        U256::from(chain_id * 2 + 35),
        U256::from(0x1234_5678u64),
        U256::from(0x0abc_def0u64),
    )
}

/// Signs `data` with [`sample_signature`], and its fee payer too if the fee is delegated.
pub fn sign_sample(mut data: TxData, chain_id: u64) -> TxData {
    let signatures = TxSignatures::single(sample_signature(chain_id));
    data.set_signatures(signatures.clone());
    match data.set_fee_payer_signatures(signatures) {
        Ok(()) => assert!(data.tx_type().is_fee_delegated()),
        Err(err) => assert_eq!(err, TxError::UnsupportedTxType(data.tx_type())),
    }
    data
}
