//! Construction of transactions from a map of named fields.
//!
//! Every transaction family declares an ordered schema of the fields it requires. Building a
//! transaction checks the map against that schema in order, consumes the recognized fields, and
//! finally rejects whatever the schema did not name.

use alloy_eips::{eip2930::AccessList, eip7702::SignedAuthorization};
use alloy_primitives::{map::HashMap, Address, Bytes, U256};
use derive_more::Display;
use tracing::debug;

use crate::{
    AccountCreationTx, AccountKey, AccountUpdateTx, CancelTx, ChainDataAnchoringTx, CodeFormat,
    EthAccessListTx, EthDynamicFeeTx, EthSetCodeTx, FeeMode, FeePayer, FeeRatio, LegacyTx,
    SmartContractDeployTx, SmartContractExecutionTx, TxData, TxError, TxSignature, TxSignatures,
    TxType, ValueTransferMemoTx, ValueTransferTx,
};

/// Name of a transaction field in a [`FieldMap`].
#[allow(missing_docs)]
#[derive(Clone, Copy, Debug, Display, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TxFieldKey {
    Nonce,
    To,
    Amount,
    GasLimit,
    GasPrice,
    /// The payload: memo, initcode, call input or Ethereum data.
    Data,
    From,
    AnchoredData,
    HumanReadable,
    AccountKey,
    FeePayer,
    FeeRatio,
    CodeFormat,
    AccessList,
    #[display("ChainID")]
    ChainId,
    GasTipCap,
    GasFeeCap,
    AuthorizationList,
}

/// Semantic type of a field value.
#[allow(missing_docs)]
#[derive(Clone, Copy, Debug, Display, PartialEq, Eq, Hash)]
pub enum ValueKind {
    #[display("a 64-bit unsigned integer")]
    U64,
    #[display("an 8-bit unsigned integer")]
    U8,
    #[display("a non-negative integer")]
    BigInt,
    #[display("an address")]
    Address,
    /// An address, or none for a contract creation.
    #[display("an address or none")]
    OptionalAddress,
    #[display("a byte string")]
    Bytes,
    #[display("a boolean")]
    Bool,
    #[display("an account key")]
    AccountKey,
    #[display("an access list")]
    AccessList,
    #[display("an authorization list")]
    AuthorizationList,
}

/// A field value.
#[allow(missing_docs)]
#[derive(Clone, Debug, PartialEq, Eq, derive_more::From)]
pub enum TxValue {
    U64(u64),
    U8(u8),
    BigInt(U256),
    Address(Address),
    OptionalAddress(Option<Address>),
    Bytes(Bytes),
    Bool(bool),
    AccountKey(AccountKey),
    AccessList(AccessList),
    AuthorizationList(Vec<SignedAuthorization>),
}

impl TxValue {
    /// Returns the semantic type of the value.
    pub const fn kind(&self) -> ValueKind {
        match self {
            Self::U64(_) => ValueKind::U64,
            Self::U8(_) => ValueKind::U8,
            Self::BigInt(_) => ValueKind::BigInt,
            Self::Address(_) => ValueKind::Address,
            Self::OptionalAddress(_) => ValueKind::OptionalAddress,
            Self::Bytes(_) => ValueKind::Bytes,
            Self::Bool(_) => ValueKind::Bool,
            Self::AccountKey(_) => ValueKind::AccountKey,
            Self::AccessList(_) => ValueKind::AccessList,
            Self::AuthorizationList(_) => ValueKind::AuthorizationList,
        }
    }
}

impl ValueKind {
    /// Returns `true` if `value` can be used where this kind is expected. A plain address is
    /// accepted where an optional one is expected.
    pub const fn accepts(self, value: &TxValue) -> bool {
        matches!(
            (self, value.kind()),
            (Self::U64, ValueKind::U64) |
                (Self::U8, ValueKind::U8) |
                (Self::BigInt, ValueKind::BigInt) |
                (Self::Address, ValueKind::Address) |
                (Self::OptionalAddress, ValueKind::OptionalAddress | ValueKind::Address) |
                (Self::Bytes, ValueKind::Bytes) |
                (Self::Bool, ValueKind::Bool) |
                (Self::AccountKey, ValueKind::AccountKey) |
                (Self::AccessList, ValueKind::AccessList) |
                (Self::AuthorizationList, ValueKind::AuthorizationList)
        )
    }
}

/// A Rust type a field value converts into.
trait FieldValue: Sized {
    const KIND: ValueKind;

    fn from_value(value: TxValue) -> Option<Self>;
}

macro_rules! impl_field_value {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl FieldValue for $ty {
                const KIND: ValueKind = ValueKind::$variant;

                fn from_value(value: TxValue) -> Option<Self> {
                    match value {
                        TxValue::$variant(value) => Some(value),
                        _ => None,
                    }
                }
            }
        )*
    };
}

impl_field_value! {
    u64 => U64,
    u8 => U8,
    U256 => BigInt,
    Address => Address,
    Bytes => Bytes,
    bool => Bool,
    AccountKey => AccountKey,
    AccessList => AccessList,
    Vec<SignedAuthorization> => AuthorizationList,
}

impl FieldValue for Option<Address> {
    const KIND: ValueKind = ValueKind::OptionalAddress;

    fn from_value(value: TxValue) -> Option<Self> {
        match value {
            TxValue::OptionalAddress(to) => Some(to),
            TxValue::Address(to) => Some(Some(to)),
            _ => None,
        }
    }
}

/// A map of named field values from which a transaction is built.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FieldMap {
    values: HashMap<TxFieldKey, TxValue>,
}

impl FieldMap {
    /// Creates an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `key` to `value`, returning the previous value.
    pub fn insert(&mut self, key: TxFieldKey, value: impl Into<TxValue>) -> Option<TxValue> {
        self.values.insert(key, value.into())
    }

    /// Sets `key` to `value`.
    pub fn with(mut self, key: TxFieldKey, value: impl Into<TxValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Removes `key`, returning its value.
    pub fn remove(&mut self, key: TxFieldKey) -> Option<TxValue> {
        self.values.remove(&key)
    }

    /// Returns the value of `key`.
    pub fn get(&self, key: TxFieldKey) -> Option<&TxValue> {
        self.values.get(&key)
    }

    /// Returns the number of fields.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if the map holds no field.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Checks that every field of `schema` is present with the expected kind, in schema order.
    fn check(&self, schema: &[(TxFieldKey, ValueKind)]) -> Result<(), TxError> {
        for &(key, expected) in schema {
            match self.values.get(&key) {
                None => return Err(TxError::MissingField(key)),
                Some(value) if !expected.accepts(value) => {
                    return Err(TxError::UnexpectedFieldType { key, expected })
                }
                Some(_) => {}
            }
        }
        Ok(())
    }

    /// Consumes the value of `key`.
    fn take<T: FieldValue>(&mut self, key: TxFieldKey) -> Result<T, TxError> {
        let value = self.values.remove(&key).ok_or(TxError::MissingField(key))?;
        T::from_value(value).ok_or(TxError::UnexpectedFieldType { key, expected: T::KIND })
    }

    /// Fails with [`TxError::UndefinedKeyRemains`] if any field was not consumed.
    fn finish(self) -> Result<(), TxError> {
        if self.values.is_empty() {
            return Ok(());
        }
        let mut keys: Vec<_> = self.values.into_keys().collect();
        keys.sort_unstable();
        Err(TxError::UndefinedKeyRemains(keys))
    }
}

impl FromIterator<(TxFieldKey, TxValue)> for FieldMap {
    fn from_iter<I: IntoIterator<Item = (TxFieldKey, TxValue)>>(iter: I) -> Self {
        Self { values: iter.into_iter().collect() }
    }
}

impl<const N: usize> From<[(TxFieldKey, TxValue); N]> for FieldMap {
    fn from(fields: [(TxFieldKey, TxValue); N]) -> Self {
        fields.into_iter().collect()
    }
}

use TxFieldKey as K;
use ValueKind as V;

const VALUE_TRANSFER_SCHEMA: &[(TxFieldKey, ValueKind)] = &[
    (K::Nonce, V::U64),
    (K::To, V::Address),
    (K::Amount, V::BigInt),
    (K::GasLimit, V::U64),
    (K::GasPrice, V::BigInt),
    (K::From, V::Address),
];

const VALUE_TRANSFER_MEMO_SCHEMA: &[(TxFieldKey, ValueKind)] = &[
    (K::Nonce, V::U64),
    (K::To, V::Address),
    (K::Amount, V::BigInt),
    (K::GasLimit, V::U64),
    (K::GasPrice, V::BigInt),
    (K::From, V::Address),
    (K::Data, V::Bytes),
];

const ACCOUNT_CREATION_SCHEMA: &[(TxFieldKey, ValueKind)] = &[
    (K::Nonce, V::U64),
    (K::To, V::Address),
    (K::Amount, V::BigInt),
    (K::GasLimit, V::U64),
    (K::GasPrice, V::BigInt),
    (K::From, V::Address),
    (K::HumanReadable, V::Bool),
    (K::AccountKey, V::AccountKey),
];

const ACCOUNT_UPDATE_SCHEMA: &[(TxFieldKey, ValueKind)] = &[
    (K::Nonce, V::U64),
    (K::GasLimit, V::U64),
    (K::GasPrice, V::BigInt),
    (K::From, V::Address),
    (K::AccountKey, V::AccountKey),
];

const SMART_CONTRACT_DEPLOY_SCHEMA: &[(TxFieldKey, ValueKind)] = &[
    (K::Nonce, V::U64),
    (K::To, V::OptionalAddress),
    (K::Amount, V::BigInt),
    (K::GasLimit, V::U64),
    (K::GasPrice, V::BigInt),
    (K::From, V::Address),
    (K::Data, V::Bytes),
    (K::HumanReadable, V::Bool),
    (K::CodeFormat, V::U8),
];

const SMART_CONTRACT_EXECUTION_SCHEMA: &[(TxFieldKey, ValueKind)] = &[
    (K::Nonce, V::U64),
    (K::To, V::Address),
    (K::Amount, V::BigInt),
    (K::GasLimit, V::U64),
    (K::GasPrice, V::BigInt),
    (K::From, V::Address),
    (K::Data, V::Bytes),
];

const CANCEL_SCHEMA: &[(TxFieldKey, ValueKind)] =
    &[(K::Nonce, V::U64), (K::GasLimit, V::U64), (K::GasPrice, V::BigInt), (K::From, V::Address)];

const CHAIN_DATA_ANCHORING_SCHEMA: &[(TxFieldKey, ValueKind)] = &[
    (K::Nonce, V::U64),
    (K::GasLimit, V::U64),
    (K::GasPrice, V::BigInt),
    (K::From, V::Address),
    (K::AnchoredData, V::Bytes),
];

const LEGACY_SCHEMA: &[(TxFieldKey, ValueKind)] = &[
    (K::Nonce, V::U64),
    (K::To, V::OptionalAddress),
    (K::Amount, V::BigInt),
    (K::GasLimit, V::U64),
    (K::GasPrice, V::BigInt),
    (K::Data, V::Bytes),
];

const ETHEREUM_ACCESS_LIST_SCHEMA: &[(TxFieldKey, ValueKind)] = &[
    (K::ChainId, V::BigInt),
    (K::Nonce, V::U64),
    (K::GasPrice, V::BigInt),
    (K::GasLimit, V::U64),
    (K::To, V::OptionalAddress),
    (K::Amount, V::BigInt),
    (K::Data, V::Bytes),
    (K::AccessList, V::AccessList),
];

const ETHEREUM_DYNAMIC_FEE_SCHEMA: &[(TxFieldKey, ValueKind)] = &[
    (K::ChainId, V::BigInt),
    (K::Nonce, V::U64),
    (K::GasTipCap, V::BigInt),
    (K::GasFeeCap, V::BigInt),
    (K::GasLimit, V::U64),
    (K::To, V::OptionalAddress),
    (K::Amount, V::BigInt),
    (K::Data, V::Bytes),
    (K::AccessList, V::AccessList),
];

const ETHEREUM_SET_CODE_SCHEMA: &[(TxFieldKey, ValueKind)] = &[
    (K::ChainId, V::BigInt),
    (K::Nonce, V::U64),
    (K::GasTipCap, V::BigInt),
    (K::GasFeeCap, V::BigInt),
    (K::GasLimit, V::U64),
    (K::To, V::Address),
    (K::Amount, V::BigInt),
    (K::Data, V::Bytes),
    (K::AccessList, V::AccessList),
    (K::AuthorizationList, V::AuthorizationList),
];

const FEE_DELEGATED_SCHEMA: &[(TxFieldKey, ValueKind)] = &[(K::FeePayer, V::Address)];

const FEE_DELEGATED_WITH_RATIO_SCHEMA: &[(TxFieldKey, ValueKind)] =
    &[(K::FeePayer, V::Address), (K::FeeRatio, V::U8)];

/// Returns the ordered schema of the fields required to build a transaction of `tx_type`.
///
/// Fee-delegated sub-types append the fee payer, and the fee ratio for the ratio variants, to the
/// schema of their family. Fails with [`TxError::UndefinedTxType`] for tags outside of the closed
/// set and for the reserved batch tag.
pub fn field_schema(tx_type: TxType) -> Result<Vec<(TxFieldKey, ValueKind)>, TxError> {
    let undefined = TxError::UndefinedTxType(tx_type.get());
    if !tx_type.is_defined() {
        return Err(undefined);
    }
    let family = match tx_type {
        TxType::LEGACY => LEGACY_SCHEMA,
        TxType::ETHEREUM_ACCESS_LIST => ETHEREUM_ACCESS_LIST_SCHEMA,
        TxType::ETHEREUM_DYNAMIC_FEE => ETHEREUM_DYNAMIC_FEE_SCHEMA,
        TxType::ETHEREUM_SET_CODE => ETHEREUM_SET_CODE_SCHEMA,
        TxType::ACCOUNT_CREATION => ACCOUNT_CREATION_SCHEMA,
        _ => match tx_type.family() {
            TxType::VALUE_TRANSFER => VALUE_TRANSFER_SCHEMA,
            TxType::VALUE_TRANSFER_MEMO => VALUE_TRANSFER_MEMO_SCHEMA,
            TxType::ACCOUNT_UPDATE => ACCOUNT_UPDATE_SCHEMA,
            TxType::SMART_CONTRACT_DEPLOY => SMART_CONTRACT_DEPLOY_SCHEMA,
            TxType::SMART_CONTRACT_EXECUTION => SMART_CONTRACT_EXECUTION_SCHEMA,
            TxType::CANCEL => CANCEL_SCHEMA,
            TxType::CHAIN_DATA_ANCHORING => CHAIN_DATA_ANCHORING_SCHEMA,
            _ => return Err(undefined),
        },
    };
    let fee = if tx_type.is_fee_delegated_with_ratio() {
        FEE_DELEGATED_WITH_RATIO_SCHEMA
    } else if tx_type.is_fee_delegated() {
        FEE_DELEGATED_SCHEMA
    } else {
        &[]
    };
    Ok([family, fee].concat())
}

impl FeeMode {
    /// Consumes the fee payer fields `tx_type` requires.
    fn take_from(tx_type: TxType, fields: &mut FieldMap) -> Result<Self, TxError> {
        if !tx_type.is_fee_delegated() {
            return Ok(Self::SelfPaid);
        }
        let fee_payer = FeePayer::new(fields.take(K::FeePayer)?);
        if tx_type.is_fee_delegated_with_ratio() {
            let ratio = FeeRatio::new(fields.take(K::FeeRatio)?)?;
            return Ok(Self::DelegatedWithRatio(fee_payer, ratio));
        }
        Ok(Self::Delegated(fee_payer))
    }
}

impl TxData {
    /// Builds a transaction of `tx_type` from named fields.
    ///
    /// The fields are checked against [`field_schema`] in order: the first missing field fails
    /// with [`TxError::MissingField`] and the first field of the wrong kind with
    /// [`TxError::UnexpectedFieldType`]. Out of range fee ratios and unsupported code formats are
    /// rejected next, and fields outside of the schema last, with
    /// [`TxError::UndefinedKeyRemains`]. The account creation type is disabled and fails with
    /// [`TxError::UndefinedTxType`].
    ///
    /// The built transaction is unsigned: it carries a single zero signature.
    pub fn from_fields(tx_type: TxType, fields: FieldMap) -> Result<Self, TxError> {
        if tx_type.is_account_creation() {
            return Err(TxError::UndefinedTxType(tx_type.get()));
        }
        Self::build_from_fields(tx_type, fields)
    }

    /// Builds an account creation transaction from named fields, bypassing the disabled type
    /// check of [`TxData::from_fields`].
    #[cfg(any(test, feature = "test-utils"))]
    pub fn account_creation_with_fields(fields: FieldMap) -> Result<Self, TxError> {
        Self::build_from_fields(TxType::ACCOUNT_CREATION, fields)
    }

    fn build_from_fields(tx_type: TxType, fields: FieldMap) -> Result<Self, TxError> {
        let result = Self::try_build_from_fields(tx_type, fields);
        if let Err(err) = &result {
            debug!(target: "kaia_tx::validation", %tx_type, %err, "Rejected transaction fields");
        }
        result
    }

    fn try_build_from_fields(tx_type: TxType, mut fields: FieldMap) -> Result<Self, TxError> {
        let schema = field_schema(tx_type)?;
        fields.check(&schema)?;
        let data = Self::take_fields(tx_type, &mut fields)?;
        fields.finish()?;
        Ok(data)
    }

    fn take_fields(tx_type: TxType, fields: &mut FieldMap) -> Result<Self, TxError> {
        let signatures = TxSignatures::default();
        let data = match tx_type {
            TxType::LEGACY => Self::Legacy(LegacyTx {
                nonce: fields.take(K::Nonce)?,
                to: fields.take(K::To)?,
                amount: fields.take(K::Amount)?,
                gas_limit: fields.take(K::GasLimit)?,
                gas_price: fields.take(K::GasPrice)?,
                payload: fields.take(K::Data)?,
                signature: TxSignature::default(),
            }),
            TxType::ETHEREUM_ACCESS_LIST => Self::EthereumAccessList(EthAccessListTx {
                chain_id: fields.take(K::ChainId)?,
                nonce: fields.take(K::Nonce)?,
                gas_price: fields.take(K::GasPrice)?,
                gas_limit: fields.take(K::GasLimit)?,
                to: fields.take(K::To)?,
                amount: fields.take(K::Amount)?,
                payload: fields.take(K::Data)?,
                access_list: fields.take(K::AccessList)?,
                signature: TxSignature::default(),
            }),
            TxType::ETHEREUM_DYNAMIC_FEE => Self::EthereumDynamicFee(EthDynamicFeeTx {
                chain_id: fields.take(K::ChainId)?,
                nonce: fields.take(K::Nonce)?,
                gas_tip_cap: fields.take(K::GasTipCap)?,
                gas_fee_cap: fields.take(K::GasFeeCap)?,
                gas_limit: fields.take(K::GasLimit)?,
                to: fields.take(K::To)?,
                amount: fields.take(K::Amount)?,
                payload: fields.take(K::Data)?,
                access_list: fields.take(K::AccessList)?,
                signature: TxSignature::default(),
            }),
            TxType::ETHEREUM_SET_CODE => Self::EthereumSetCode(EthSetCodeTx {
                chain_id: fields.take(K::ChainId)?,
                nonce: fields.take(K::Nonce)?,
                gas_tip_cap: fields.take(K::GasTipCap)?,
                gas_fee_cap: fields.take(K::GasFeeCap)?,
                gas_limit: fields.take(K::GasLimit)?,
                to: fields.take(K::To)?,
                amount: fields.take(K::Amount)?,
                payload: fields.take(K::Data)?,
                access_list: fields.take(K::AccessList)?,
                authorization_list: fields.take(K::AuthorizationList)?,
                signature: TxSignature::default(),
            }),
            TxType::ACCOUNT_CREATION => Self::AccountCreation(AccountCreationTx {
                nonce: fields.take(K::Nonce)?,
                to: fields.take(K::To)?,
                amount: fields.take(K::Amount)?,
                gas_limit: fields.take(K::GasLimit)?,
                gas_price: fields.take(K::GasPrice)?,
                from: fields.take(K::From)?,
                human_readable: fields.take(K::HumanReadable)?,
                key: fields.take(K::AccountKey)?,
                signatures,
            }),
            _ => {
                let fee_mode = FeeMode::take_from(tx_type, fields)?;
                match tx_type.family() {
                    TxType::VALUE_TRANSFER => Self::ValueTransfer(ValueTransferTx {
                        nonce: fields.take(K::Nonce)?,
                        to: fields.take(K::To)?,
                        amount: fields.take(K::Amount)?,
                        gas_limit: fields.take(K::GasLimit)?,
                        gas_price: fields.take(K::GasPrice)?,
                        from: fields.take(K::From)?,
                        fee_mode,
                        signatures,
                    }),
                    TxType::VALUE_TRANSFER_MEMO => Self::ValueTransferMemo(ValueTransferMemoTx {
                        nonce: fields.take(K::Nonce)?,
                        to: fields.take(K::To)?,
                        amount: fields.take(K::Amount)?,
                        gas_limit: fields.take(K::GasLimit)?,
                        gas_price: fields.take(K::GasPrice)?,
                        from: fields.take(K::From)?,
                        payload: fields.take(K::Data)?,
                        fee_mode,
                        signatures,
                    }),
                    TxType::ACCOUNT_UPDATE => Self::AccountUpdate(AccountUpdateTx {
                        nonce: fields.take(K::Nonce)?,
                        gas_limit: fields.take(K::GasLimit)?,
                        gas_price: fields.take(K::GasPrice)?,
                        from: fields.take(K::From)?,
                        key: fields.take(K::AccountKey)?,
                        fee_mode,
                        signatures,
                    }),
                    TxType::SMART_CONTRACT_DEPLOY => {
                        Self::SmartContractDeploy(SmartContractDeployTx {
                            nonce: fields.take(K::Nonce)?,
                            to: fields.take(K::To)?,
                            amount: fields.take(K::Amount)?,
                            gas_limit: fields.take(K::GasLimit)?,
                            gas_price: fields.take(K::GasPrice)?,
                            from: fields.take(K::From)?,
                            payload: fields.take(K::Data)?,
                            human_readable: fields.take(K::HumanReadable)?,
                            code_format: CodeFormat::new(fields.take(K::CodeFormat)?)?,
                            fee_mode,
                            signatures,
                        })
                    }
                    TxType::SMART_CONTRACT_EXECUTION => {
                        Self::SmartContractExecution(SmartContractExecutionTx {
                            nonce: fields.take(K::Nonce)?,
                            to: fields.take(K::To)?,
                            amount: fields.take(K::Amount)?,
                            gas_limit: fields.take(K::GasLimit)?,
                            gas_price: fields.take(K::GasPrice)?,
                            from: fields.take(K::From)?,
                            payload: fields.take(K::Data)?,
                            fee_mode,
                            signatures,
                        })
                    }
                    TxType::CANCEL => Self::Cancel(CancelTx {
                        nonce: fields.take(K::Nonce)?,
                        gas_limit: fields.take(K::GasLimit)?,
                        gas_price: fields.take(K::GasPrice)?,
                        from: fields.take(K::From)?,
                        fee_mode,
                        signatures,
                    }),
                    TxType::CHAIN_DATA_ANCHORING => {
                        Self::ChainDataAnchoring(ChainDataAnchoringTx {
                            nonce: fields.take(K::Nonce)?,
                            gas_limit: fields.take(K::GasLimit)?,
                            gas_price: fields.take(K::GasPrice)?,
                            from: fields.take(K::From)?,
                            anchored_data: fields.take(K::AnchoredData)?,
                            fee_mode,
                            signatures,
                        })
                    }
                    _ => return Err(TxError::UndefinedTxType(tx_type.get())),
                }
            }
        };
        Ok(data)
    }
}

#[cfg(test)]
mod tests {
    use alloy_primitives::address;

    use super::*;

    const FROM: Address = address!("a94f5374fce5edbc8e2a8697c15331677e6ebf0b");
    const TO: Address = address!("7b65b75d204abed71587c9e519a89277766ee1d0");

    fn value_transfer_fields() -> FieldMap {
        FieldMap::new()
            .with(K::Nonce, 1u64)
            .with(K::To, TO)
            .with(K::Amount, U256::from(10))
            .with(K::GasLimit, 21_000u64)
            .with(K::GasPrice, U256::from(25_000_000_000u64))
            .with(K::From, FROM)
    }

    #[test]
    fn test_key_names() {
        assert_eq!(K::Amount.to_string(), "Amount");
        assert_eq!(K::ChainId.to_string(), "ChainID");
        assert_eq!(
            TxError::UnexpectedFieldType { key: K::Amount, expected: V::BigInt }.to_string(),
            "Amount must be a non-negative integer"
        );
    }

    #[test]
    fn test_schema_appends_fee_fields() {
        let base = field_schema(TxType::CANCEL).unwrap();
        let ratio = field_schema(TxType::FEE_DELEGATED_CANCEL_WITH_RATIO).unwrap();
        assert_eq!(&ratio[..base.len()], base.as_slice());
        assert_eq!(&ratio[base.len()..], FEE_DELEGATED_WITH_RATIO_SCHEMA);
        assert_eq!(field_schema(TxType::BATCH), Err(TxError::UndefinedTxType(0x40)));
        assert_eq!(field_schema(TxType::ETHEREUM_BLOB), Err(TxError::UndefinedTxType(0x7803)));
    }

    #[test]
    fn test_value_transfer_from_fields() {
        let data = TxData::from_fields(TxType::VALUE_TRANSFER, value_transfer_fields()).unwrap();
        assert_eq!(data.tx_type(), TxType::VALUE_TRANSFER);
        assert_eq!(data.recipient(), Some(TO));
        assert_eq!(data.from(), Some(FROM));
        assert_eq!(data.nonce(), 1);
    }

    #[test]
    fn test_first_missing_field_in_schema_order() {
        let mut fields = value_transfer_fields();
        fields.remove(K::Amount);
        fields.remove(K::From);
        assert_eq!(
            TxData::from_fields(TxType::VALUE_TRANSFER, fields),
            Err(TxError::MissingField(K::Amount))
        );
    }

    #[test]
    fn test_wrong_kind() {
        let fields = value_transfer_fields().with(K::Amount, 10u64);
        assert_eq!(
            TxData::from_fields(TxType::VALUE_TRANSFER, fields),
            Err(TxError::UnexpectedFieldType { key: K::Amount, expected: V::BigInt })
        );
    }

    #[test]
    fn test_undefined_keys_remain() {
        let fields = value_transfer_fields()
            .with(K::Data, Bytes::new())
            .with(K::AnchoredData, Bytes::new());
        assert_eq!(
            TxData::from_fields(TxType::VALUE_TRANSFER, fields),
            Err(TxError::UndefinedKeyRemains(vec![K::Data, K::AnchoredData]))
        );
    }

    #[test]
    fn test_fee_ratio_range() {
        let fields = value_transfer_fields().with(K::FeePayer, TO).with(K::FeeRatio, 100u8);
        assert_eq!(
            TxData::from_fields(TxType::FEE_DELEGATED_VALUE_TRANSFER_WITH_RATIO, fields),
            Err(TxError::InvalidFeeRatio(100))
        );
    }

    #[test]
    fn test_code_format() {
        let fields = FieldMap::new()
            .with(K::Nonce, 0u64)
            .with(K::To, None::<Address>)
            .with(K::Amount, U256::ZERO)
            .with(K::GasLimit, 100_000u64)
            .with(K::GasPrice, U256::from(1))
            .with(K::From, FROM)
            .with(K::Data, Bytes::from_static(&[0x60, 0x00]))
            .with(K::HumanReadable, false)
            .with(K::CodeFormat, 1u8);
        assert_eq!(
            TxData::from_fields(TxType::SMART_CONTRACT_DEPLOY, fields),
            Err(TxError::InvalidCodeFormat(1))
        );
    }

    #[test]
    fn test_optional_recipient_accepts_address() {
        let fields = FieldMap::new()
            .with(K::Nonce, 0u64)
            .with(K::To, TO)
            .with(K::Amount, U256::ZERO)
            .with(K::GasLimit, 21_000u64)
            .with(K::GasPrice, U256::from(1))
            .with(K::Data, Bytes::new());
        let data = TxData::from_fields(TxType::LEGACY, fields).unwrap();
        assert_eq!(data.recipient(), Some(TO));
    }

    #[test]
    fn test_account_creation_disabled() {
        let fields = value_transfer_fields()
            .with(K::HumanReadable, false)
            .with(K::AccountKey, AccountKey::Legacy);
        assert_eq!(
            TxData::from_fields(TxType::ACCOUNT_CREATION, fields.clone()),
            Err(TxError::UndefinedTxType(0x18))
        );
        let data = TxData::account_creation_with_fields(fields).unwrap();
        assert_eq!(data.tx_type(), TxType::ACCOUNT_CREATION);
        assert_eq!(data.account_key(), Some(&AccountKey::Legacy));
    }
}
