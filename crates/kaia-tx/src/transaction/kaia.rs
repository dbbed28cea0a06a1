//! The Kaia typed transaction families.

use alloy_primitives::{keccak256, Address, Bytes, TxKind, B256, U256};
use alloy_rlp::Encodable;
use serde::{Deserialize, Serialize};

use super::encode::RlpList;
use crate::{AccountKey, FeeRatio, TxError, TxSignatures, TxType};

/// The fee payer of a fee-delegated transaction.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct FeePayer {
    /// The account paying (part of) the fee.
    pub address: Address,
    /// The signatures of the fee payer.
    pub signatures: TxSignatures,
}

impl FeePayer {
    /// Creates a fee payer that has not signed yet.
    pub fn new(address: Address) -> Self {
        Self { address, signatures: TxSignatures::default() }
    }
}

/// Who pays the fee of a Kaia typed transaction. Together with the family, it determines the
/// transaction type tag.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum FeeMode {
    /// The sender pays the whole fee.
    #[default]
    SelfPaid,
    /// The fee payer pays the whole fee.
    Delegated(FeePayer),
    /// The fee is split between the fee payer and the sender by the ratio.
    DelegatedWithRatio(FeePayer, FeeRatio),
}

impl FeeMode {
    /// Returns the zero-valued fee mode matching the sub-type of `tx_type`.
    pub fn zero(tx_type: TxType) -> Self {
        if tx_type.is_fee_delegated_with_ratio() {
            Self::DelegatedWithRatio(FeePayer::default(), FeeRatio::default())
        } else if tx_type.is_fee_delegated() {
            Self::Delegated(FeePayer::default())
        } else {
            Self::SelfPaid
        }
    }

    /// Returns the sub-type bits the fee mode contributes to the transaction type tag.
    pub const fn sub_type(&self) -> u16 {
        match self {
            Self::SelfPaid => 0,
            Self::Delegated(_) => 1,
            Self::DelegatedWithRatio(..) => 2,
        }
    }

    /// Returns the fee payer, if the fee is delegated.
    pub const fn fee_payer(&self) -> Option<&FeePayer> {
        match self {
            Self::SelfPaid => None,
            Self::Delegated(fee_payer) | Self::DelegatedWithRatio(fee_payer, _) => Some(fee_payer),
        }
    }

    fn fee_payer_mut(&mut self) -> Option<&mut FeePayer> {
        match self {
            Self::SelfPaid => None,
            Self::Delegated(fee_payer) | Self::DelegatedWithRatio(fee_payer, _) => Some(fee_payer),
        }
    }

    /// Returns the fee ratio, if the fee is shared.
    pub const fn fee_ratio(&self) -> Option<FeeRatio> {
        match self {
            Self::DelegatedWithRatio(_, ratio) => Some(*ratio),
            _ => None,
        }
    }
}

/// Format of the code deployed by a smart contract deploy transaction.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct CodeFormat(u8);

impl CodeFormat {
    /// EVM bytecode, the only supported format.
    pub const EVM: Self = Self(0);

    /// Creates a code format, rejecting unsupported values.
    pub const fn new(format: u8) -> Result<Self, TxError> {
        let format = Self(format);
        if format.is_valid() {
            Ok(format)
        } else {
            Err(TxError::InvalidCodeFormat(format.0))
        }
    }

    /// Returns `true` if the format is supported.
    pub const fn is_valid(self) -> bool {
        self.0 == Self::EVM.0
    }

    /// Returns the raw value of the format.
    pub const fn get(self) -> u8 {
        self.0
    }
}

impl Encodable for CodeFormat {
    fn encode(&self, out: &mut dyn alloy_rlp::BufMut) {
        self.0.encode(out);
    }

    fn length(&self) -> usize {
        self.0.length()
    }
}

/// Shared shape of the Kaia typed transactions.
///
/// A Kaia typed transaction is encoded as the family fields, the fee ratio if the fee is shared,
/// the sender signatures, and finally the fee payer and its signatures if the fee is delegated.
/// The signing payload and the sender hash reuse the same leading fields.
pub(crate) trait KaiaTx {
    /// The base type of the family.
    fn family(&self) -> TxType;

    /// Pushes the family fields in consensus order.
    fn push_fields(&self, list: &mut RlpList);

    /// The fee mode. Families without fee delegation return `None`.
    fn fee_mode(&self) -> Option<&FeeMode>;

    fn fee_mode_mut(&mut self) -> Option<&mut FeeMode>;

    fn sender(&self) -> Address;

    fn signatures(&self) -> &TxSignatures;

    fn signatures_mut(&mut self) -> &mut TxSignatures;

    fn tx_type(&self) -> TxType {
        let sub = self.fee_mode().map_or(0, FeeMode::sub_type);
        TxType::new(self.family().get() | sub)
    }

    fn fee_payer(&self) -> Option<&FeePayer> {
        self.fee_mode().and_then(FeeMode::fee_payer)
    }

    fn fee_payer_mut(&mut self) -> Option<&mut FeePayer> {
        self.fee_mode_mut().and_then(FeeMode::fee_payer_mut)
    }

    /// Pushes the family fields followed by the fee ratio, if any.
    fn push_fields_with_ratio(&self, list: &mut RlpList) {
        self.push_fields(list);
        if let Some(ratio) = self.fee_mode().and_then(FeeMode::fee_ratio) {
            list.push(&ratio.get());
        }
    }

    /// `rlp([type, fields.., (fee ratio)])`
    fn serialize_for_signing(&self) -> Vec<u8> {
        let mut list = RlpList::new();
        list.push(&self.tx_type().get());
        self.push_fields_with_ratio(&mut list);
        list.into_bytes()
    }

    /// `keccak(rlp(type) ++ rlp([fields.., (fee ratio), signatures]))`
    fn sender_tx_hash(&self) -> B256 {
        let mut out = Vec::new();
        self.tx_type().get().encode(&mut out);
        let mut list = RlpList::new();
        self.push_fields_with_ratio(&mut list);
        list.push(self.signatures());
        list.encode(&mut out);
        keccak256(out)
    }

    /// `type ++ rlp([fields.., (fee ratio), signatures, (fee payer, fee payer signatures)])`
    fn encode_typed(&self) -> Vec<u8> {
        let mut list = RlpList::new();
        self.push_fields_with_ratio(&mut list);
        list.push(self.signatures());
        if let Some(fee_payer) = self.fee_payer() {
            list.push(&fee_payer.address).push(&fee_payer.signatures);
        }
        let mut out = Vec::with_capacity(1 + list.length());
        out.push(self.tx_type().type_byte());
        list.encode(&mut out);
        out
    }
}

macro_rules! impl_kaia_tx {
    ($ty:ty, $family:expr, |$tx:ident, $list:ident| $push:block) => {
        impl KaiaTx for $ty {
            fn family(&self) -> TxType {
                $family
            }

            fn push_fields(&self, $list: &mut RlpList) {
                let $tx = self;
                $push
            }

            fn fee_mode(&self) -> Option<&FeeMode> {
                Some(&self.fee_mode)
            }

            fn fee_mode_mut(&mut self) -> Option<&mut FeeMode> {
                Some(&mut self.fee_mode)
            }

            fn sender(&self) -> Address {
                self.from
            }

            fn signatures(&self) -> &TxSignatures {
                &self.signatures
            }

            fn signatures_mut(&mut self) -> &mut TxSignatures {
                &mut self.signatures
            }
        }
    };
}

/// Transfers value to an externally owned account.
#[allow(missing_docs)]
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ValueTransferTx {
    pub nonce: u64,
    pub gas_price: U256,
    pub gas_limit: u64,
    pub to: Address,
    pub amount: U256,
    pub from: Address,
    pub fee_mode: FeeMode,
    pub signatures: TxSignatures,
}

impl_kaia_tx!(ValueTransferTx, TxType::VALUE_TRANSFER, |tx, list| {
    list.push(&tx.nonce)
        .push(&tx.gas_price)
        .push(&tx.gas_limit)
        .push(&tx.to)
        .push(&tx.amount)
        .push(&tx.from);
});

/// Transfers value to an externally owned account with an attached memo.
#[allow(missing_docs)]
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ValueTransferMemoTx {
    pub nonce: u64,
    pub gas_price: U256,
    pub gas_limit: u64,
    pub to: Address,
    pub amount: U256,
    pub from: Address,
    /// The memo.
    pub payload: Bytes,
    pub fee_mode: FeeMode,
    pub signatures: TxSignatures,
}

impl_kaia_tx!(ValueTransferMemoTx, TxType::VALUE_TRANSFER_MEMO, |tx, list| {
    list.push(&tx.nonce)
        .push(&tx.gas_price)
        .push(&tx.gas_limit)
        .push(&tx.to)
        .push(&tx.amount)
        .push(&tx.from)
        .push(&tx.payload);
});

/// Replaces the key of the sender account.
#[allow(missing_docs)]
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AccountUpdateTx {
    pub nonce: u64,
    pub gas_price: U256,
    pub gas_limit: u64,
    pub from: Address,
    /// The new key of the sender account.
    pub key: AccountKey,
    pub fee_mode: FeeMode,
    pub signatures: TxSignatures,
}

impl_kaia_tx!(AccountUpdateTx, TxType::ACCOUNT_UPDATE, |tx, list| {
    list.push(&tx.nonce).push(&tx.gas_price).push(&tx.gas_limit).push(&tx.from).push(&tx.key);
});

/// Deploys a smart contract.
#[allow(missing_docs)]
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SmartContractDeployTx {
    pub nonce: u64,
    pub gas_price: U256,
    pub gas_limit: u64,
    /// The address of the contract. `None` derives it from the sender and nonce.
    pub to: Option<Address>,
    pub amount: U256,
    pub from: Address,
    /// The initcode.
    pub payload: Bytes,
    /// Whether the contract is deployed under a human-readable address.
    pub human_readable: bool,
    pub code_format: CodeFormat,
    pub fee_mode: FeeMode,
    pub signatures: TxSignatures,
}

impl_kaia_tx!(SmartContractDeployTx, TxType::SMART_CONTRACT_DEPLOY, |tx, list| {
    list.push(&tx.nonce)
        .push(&tx.gas_price)
        .push(&tx.gas_limit)
        .push(&tx.to.map_or(TxKind::Create, TxKind::Call))
        .push(&tx.amount)
        .push(&tx.from)
        .push(&tx.payload)
        .push(&tx.human_readable)
        .push(&tx.code_format);
});

/// Calls a smart contract or a delegated account.
#[allow(missing_docs)]
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SmartContractExecutionTx {
    pub nonce: u64,
    pub gas_price: U256,
    pub gas_limit: u64,
    pub to: Address,
    pub amount: U256,
    pub from: Address,
    /// The call input.
    pub payload: Bytes,
    pub fee_mode: FeeMode,
    pub signatures: TxSignatures,
}

impl_kaia_tx!(SmartContractExecutionTx, TxType::SMART_CONTRACT_EXECUTION, |tx, list| {
    list.push(&tx.nonce)
        .push(&tx.gas_price)
        .push(&tx.gas_limit)
        .push(&tx.to)
        .push(&tx.amount)
        .push(&tx.from)
        .push(&tx.payload);
});

/// Consumes a nonce of the sender, replacing a pending transaction with the same nonce.
#[allow(missing_docs)]
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CancelTx {
    pub nonce: u64,
    pub gas_price: U256,
    pub gas_limit: u64,
    pub from: Address,
    pub fee_mode: FeeMode,
    pub signatures: TxSignatures,
}

impl_kaia_tx!(CancelTx, TxType::CANCEL, |tx, list| {
    list.push(&tx.nonce).push(&tx.gas_price).push(&tx.gas_limit).push(&tx.from);
});

/// Anchors data of a service chain.
#[allow(missing_docs)]
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ChainDataAnchoringTx {
    pub nonce: u64,
    pub gas_price: U256,
    pub gas_limit: u64,
    pub from: Address,
    /// The anchored data.
    pub anchored_data: Bytes,
    pub fee_mode: FeeMode,
    pub signatures: TxSignatures,
}

impl_kaia_tx!(ChainDataAnchoringTx, TxType::CHAIN_DATA_ANCHORING, |tx, list| {
    list.push(&tx.nonce)
        .push(&tx.gas_price)
        .push(&tx.gas_limit)
        .push(&tx.from)
        .push(&tx.anchored_data);
});

/// Creates an account with a key. The type is disabled on the network and only built by test
/// utilities.
#[allow(missing_docs)]
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AccountCreationTx {
    pub nonce: u64,
    pub gas_price: U256,
    pub gas_limit: u64,
    pub to: Address,
    pub amount: U256,
    pub from: Address,
    pub human_readable: bool,
    pub key: AccountKey,
    pub signatures: TxSignatures,
}

impl KaiaTx for AccountCreationTx {
    fn family(&self) -> TxType {
        TxType::ACCOUNT_CREATION
    }

    fn push_fields(&self, list: &mut RlpList) {
        list.push(&self.nonce)
            .push(&self.gas_price)
            .push(&self.gas_limit)
            .push(&self.to)
            .push(&self.amount)
            .push(&self.from)
            .push(&self.human_readable)
            .push(&self.key);
    }

    fn fee_mode(&self) -> Option<&FeeMode> {
        None
    }

    fn fee_mode_mut(&mut self) -> Option<&mut FeeMode> {
        None
    }

    fn sender(&self) -> Address {
        self.from
    }

    fn signatures(&self) -> &TxSignatures {
        &self.signatures
    }

    fn signatures_mut(&mut self) -> &mut TxSignatures {
        &mut self.signatures
    }
}

#[cfg(test)]
mod tests {
    use alloy_primitives::address;

    use super::*;
    use crate::TxSignature;

    const FROM: Address = address!("a94f5374fce5edbc8e2a8697c15331677e6ebf0b");
    const TO: Address = address!("7b65b75d204abed71587c9e519a89277766ee1d0");

    fn value_transfer(fee_mode: FeeMode) -> ValueTransferTx {
        ValueTransferTx {
            nonce: 1234,
            gas_price: U256::from(25_000_000_000u64),
            gas_limit: 1_000_000,
            to: TO,
            amount: U256::from(10),
            from: FROM,
            fee_mode,
            signatures: TxSignatures::single(TxSignature::new(
                U256::from(0x0fea),
                U256::from(1),
                U256::from(2),
            )),
        }
    }

    #[test]
    fn test_tag_follows_fee_mode() {
        assert_eq!(value_transfer(FeeMode::SelfPaid).tx_type(), TxType::VALUE_TRANSFER);
        assert_eq!(
            value_transfer(FeeMode::Delegated(FeePayer::new(TO))).tx_type(),
            TxType::FEE_DELEGATED_VALUE_TRANSFER
        );
        assert_eq!(
            value_transfer(FeeMode::zero(TxType::FEE_DELEGATED_VALUE_TRANSFER_WITH_RATIO))
                .tx_type(),
            TxType::FEE_DELEGATED_VALUE_TRANSFER_WITH_RATIO
        );
    }

    #[test]
    fn test_signing_payload_layout() {
        let tx = value_transfer(FeeMode::SelfPaid);
        let mut expected = RlpList::new();
        expected
            .push(&0x08u16)
            .push(&1234u64)
            .push(&U256::from(25_000_000_000u64))
            .push(&1_000_000u64)
            .push(&TO)
            .push(&U256::from(10))
            .push(&FROM);
        assert_eq!(tx.serialize_for_signing(), expected.into_bytes());
    }

    #[test]
    fn test_fee_ratio_closes_signing_payload() {
        let ratio = FeeRatio::new(30).unwrap();
        let tx = value_transfer(FeeMode::DelegatedWithRatio(FeePayer::new(TO), ratio));
        let payload = tx.serialize_for_signing();
        assert_eq!(&payload[..3], &[0xf8, 58, 0x0a]);
        assert_eq!(*payload.last().unwrap(), 30);
    }

    #[test]
    fn test_encoding_starts_with_type_byte() {
        let tx = value_transfer(FeeMode::Delegated(FeePayer::new(TO)));
        let encoded = tx.encode_typed();
        assert_eq!(encoded[0], 0x09);
        // The fee payer address and its signatures close the list.
        let fee_payer_tail = {
            let mut tail = Vec::new();
            TO.encode(&mut tail);
            TxSignatures::default().encode(&mut tail);
            tail
        };
        assert!(encoded.ends_with(&fee_payer_tail));
    }

    #[test]
    fn test_sender_tx_hash_ignores_fee_payer() {
        let mut tx = value_transfer(FeeMode::Delegated(FeePayer::new(TO)));
        let hash = tx.sender_tx_hash();
        let fee_payer = tx.fee_payer_mut().unwrap();
        fee_payer.address = FROM;
        fee_payer.signatures =
            TxSignatures::single(TxSignature::new(U256::from(1), U256::from(2), U256::from(3)));
        assert_eq!(tx.sender_tx_hash(), hash);
    }

    #[test]
    fn test_code_format() {
        assert_eq!(CodeFormat::new(0), Ok(CodeFormat::EVM));
        assert_eq!(CodeFormat::new(1), Err(TxError::InvalidCodeFormat(1)));
        assert!(CodeFormat::default().is_valid());
    }
}
