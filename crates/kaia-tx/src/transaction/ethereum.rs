//! The legacy transaction and the EIP-2718 Ethereum typed transactions.

use alloy_eips::{eip2930::AccessList, eip7702::SignedAuthorization};
use alloy_primitives::{keccak256, Address, Bytes, TxKind, B256, U256};
use alloy_rlp::Encodable;

use super::encode::RlpList;
use crate::{constants::ETHEREUM_TX_TYPE_ENVELOPE, TxSignature, TxType};

fn push_signature(list: &mut RlpList, signature: &TxSignature) {
    list.push(&signature.v).push(&signature.r).push(&signature.s);
}

/// Derives the chain id a legacy signature commits to. Pre-EIP-155 signatures (`v` of 27 or 28)
/// and unsigned transactions commit to none.
pub(crate) fn chain_id_from_v(v: U256) -> Option<U256> {
    let offset = U256::from(35);
    (v >= offset).then(|| (v - offset) / U256::from(2))
}

/// The legacy transaction.
#[allow(missing_docs)]
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LegacyTx {
    pub nonce: u64,
    pub gas_price: U256,
    pub gas_limit: u64,
    /// The recipient. `None` creates a contract.
    pub to: Option<Address>,
    pub amount: U256,
    pub payload: Bytes,
    pub signature: TxSignature,
}

impl LegacyTx {
    fn push_fields(&self, list: &mut RlpList) {
        list.push(&self.nonce)
            .push(&self.gas_price)
            .push(&self.gas_limit)
            .push(&self.to.map_or(TxKind::Create, TxKind::Call))
            .push(&self.amount)
            .push(&self.payload);
    }

    /// `rlp([nonce, price, gas, to, value, data])`
    pub(crate) fn serialize_for_signing(&self) -> Vec<u8> {
        let mut list = RlpList::new();
        self.push_fields(&mut list);
        list.into_bytes()
    }

    /// The EIP-155 signing hash: `keccak(rlp([nonce, price, gas, to, value, data, chain_id, 0,
    /// 0]))`.
    pub(crate) fn signing_hash(&self, chain_id: U256) -> B256 {
        let mut list = RlpList::new();
        self.push_fields(&mut list);
        list.push(&chain_id).push(&0u8).push(&0u8);
        keccak256(list.into_bytes())
    }

    /// `rlp([nonce, price, gas, to, value, data, v, r, s])`
    pub(crate) fn encode(&self) -> Vec<u8> {
        let mut list = RlpList::new();
        self.push_fields(&mut list);
        push_signature(&mut list, &self.signature);
        list.into_bytes()
    }

    pub(crate) fn chain_id(&self) -> Option<U256> {
        chain_id_from_v(self.signature.v)
    }
}

/// Shared shape of the EIP-2718 typed transactions.
pub(crate) trait EthTypedTx {
    fn tx_type(&self) -> TxType;

    /// Pushes the fields preceding the signature in consensus order.
    fn push_fields(&self, list: &mut RlpList);

    fn signature(&self) -> &TxSignature;

    fn signature_mut(&mut self) -> &mut TxSignature;

    /// `type ++ rlp([fields..])`
    fn serialize_for_signing(&self) -> Vec<u8> {
        let mut list = RlpList::new();
        self.push_fields(&mut list);
        let mut out = Vec::with_capacity(1 + list.length());
        out.push(self.tx_type().type_byte());
        list.encode(&mut out);
        out
    }

    fn signing_hash(&self) -> B256 {
        keccak256(self.serialize_for_signing())
    }

    /// `type ++ rlp([fields.., v, r, s])`, the EIP-2718 encoding.
    fn encode_2718(&self) -> Vec<u8> {
        let mut list = RlpList::new();
        self.push_fields(&mut list);
        push_signature(&mut list, self.signature());
        let mut out = Vec::with_capacity(1 + list.length());
        out.push(self.tx_type().type_byte());
        list.encode(&mut out);
        out
    }

    /// The EIP-2718 encoding behind the `0x78` envelope byte.
    fn encode_enveloped(&self) -> Vec<u8> {
        let encoded = self.encode_2718();
        let mut out = Vec::with_capacity(1 + encoded.len());
        out.push(ETHEREUM_TX_TYPE_ENVELOPE);
        out.extend_from_slice(&encoded);
        out
    }

    /// The Ethereum compatible hash: the hash of the EIP-2718 encoding, without the envelope.
    fn hash(&self) -> B256 {
        keccak256(self.encode_2718())
    }
}

macro_rules! impl_eth_typed_tx {
    ($ty:ty, $tx_type:expr, |$tx:ident, $list:ident| $push:block) => {
        impl EthTypedTx for $ty {
            fn tx_type(&self) -> TxType {
                $tx_type
            }

            fn push_fields(&self, $list: &mut RlpList) {
                let $tx = self;
                $push
            }

            fn signature(&self) -> &TxSignature {
                &self.signature
            }

            fn signature_mut(&mut self) -> &mut TxSignature {
                &mut self.signature
            }
        }
    };
}

/// The EIP-2930 access list transaction.
#[allow(missing_docs)]
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EthAccessListTx {
    pub chain_id: U256,
    pub nonce: u64,
    pub gas_price: U256,
    pub gas_limit: u64,
    /// The recipient. `None` creates a contract.
    pub to: Option<Address>,
    pub amount: U256,
    pub payload: Bytes,
    pub access_list: AccessList,
    /// The signature. `v` holds the y parity.
    pub signature: TxSignature,
}

impl_eth_typed_tx!(EthAccessListTx, TxType::ETHEREUM_ACCESS_LIST, |tx, list| {
    list.push(&tx.chain_id)
        .push(&tx.nonce)
        .push(&tx.gas_price)
        .push(&tx.gas_limit)
        .push(&tx.to.map_or(TxKind::Create, TxKind::Call))
        .push(&tx.amount)
        .push(&tx.payload)
        .push(&tx.access_list);
});

/// The EIP-1559 dynamic fee transaction.
#[allow(missing_docs)]
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EthDynamicFeeTx {
    pub chain_id: U256,
    pub nonce: u64,
    pub gas_tip_cap: U256,
    pub gas_fee_cap: U256,
    pub gas_limit: u64,
    /// The recipient. `None` creates a contract.
    pub to: Option<Address>,
    pub amount: U256,
    pub payload: Bytes,
    pub access_list: AccessList,
    /// The signature. `v` holds the y parity.
    pub signature: TxSignature,
}

impl_eth_typed_tx!(EthDynamicFeeTx, TxType::ETHEREUM_DYNAMIC_FEE, |tx, list| {
    list.push(&tx.chain_id)
        .push(&tx.nonce)
        .push(&tx.gas_tip_cap)
        .push(&tx.gas_fee_cap)
        .push(&tx.gas_limit)
        .push(&tx.to.map_or(TxKind::Create, TxKind::Call))
        .push(&tx.amount)
        .push(&tx.payload)
        .push(&tx.access_list);
});

/// The EIP-7702 set code transaction. It cannot create a contract.
#[allow(missing_docs)]
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EthSetCodeTx {
    pub chain_id: U256,
    pub nonce: u64,
    pub gas_tip_cap: U256,
    pub gas_fee_cap: U256,
    pub gas_limit: u64,
    pub to: Address,
    pub amount: U256,
    pub payload: Bytes,
    pub access_list: AccessList,
    pub authorization_list: Vec<SignedAuthorization>,
    /// The signature. `v` holds the y parity.
    pub signature: TxSignature,
}

impl_eth_typed_tx!(EthSetCodeTx, TxType::ETHEREUM_SET_CODE, |tx, list| {
    list.push(&tx.chain_id)
        .push(&tx.nonce)
        .push(&tx.gas_tip_cap)
        .push(&tx.gas_fee_cap)
        .push(&tx.gas_limit)
        .push(&tx.to)
        .push(&tx.amount)
        .push(&tx.payload)
        .push(&tx.access_list)
        .push(&tx.authorization_list);
});
