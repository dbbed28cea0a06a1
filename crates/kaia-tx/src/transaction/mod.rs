//! Transaction variants and the transaction envelope.

use alloy_eips::{eip2930::AccessList, eip7702::SignedAuthorization};
use alloy_primitives::{keccak256, Address, Bytes, B256, U256};
use alloy_rlp::Encodable;
use once_cell::sync::OnceCell;
use tracing::debug;

mod encode;
mod ethereum;
mod kaia;

pub use ethereum::*;
pub use kaia::*;

use encode::signing_domain_hash;
use ethereum::chain_id_from_v;

use crate::{
    intrinsic_gas, intrinsic_gas_payload, tx_type_gas, tx_type_gas_with_account_key,
    validate_delegation, AccountKey, AccountStateReader, FeeRatio, Rules, TxError, TxSignatures,
    TxType,
};

/// The payload of a transaction: one variant per transaction family.
///
/// For the Kaia typed families, the [`FeeMode`] selects the sub-type, so the pair determines the
/// [`TxType`] exactly.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TxData {
    /// The legacy transaction.
    Legacy(LegacyTx),
    /// Value transfer.
    ValueTransfer(ValueTransferTx),
    /// Value transfer with memo.
    ValueTransferMemo(ValueTransferMemoTx),
    /// Account creation. Disabled on the network.
    AccountCreation(AccountCreationTx),
    /// Account update.
    AccountUpdate(AccountUpdateTx),
    /// Smart contract deploy.
    SmartContractDeploy(SmartContractDeployTx),
    /// Smart contract execution.
    SmartContractExecution(SmartContractExecutionTx),
    /// Cancel.
    Cancel(CancelTx),
    /// Chain data anchoring.
    ChainDataAnchoring(ChainDataAnchoringTx),
    /// EIP-2930 access list transaction.
    EthereumAccessList(EthAccessListTx),
    /// EIP-1559 dynamic fee transaction.
    EthereumDynamicFee(EthDynamicFeeTx),
    /// EIP-7702 set code transaction.
    EthereumSetCode(EthSetCodeTx),
}

impl TxData {
    /// Creates the zero-valued variant of `tx_type`.
    ///
    /// Fails with [`TxError::UndefinedTxType`] for tags outside of the closed set, for the
    /// reserved batch tag and for the disabled account creation tag.
    pub fn create(tx_type: TxType) -> Result<Self, TxError> {
        let data = match tx_type {
            TxType::LEGACY => Self::Legacy(LegacyTx::default()),
            TxType::ETHEREUM_ACCESS_LIST => Self::EthereumAccessList(EthAccessListTx::default()),
            TxType::ETHEREUM_DYNAMIC_FEE => Self::EthereumDynamicFee(EthDynamicFeeTx::default()),
            TxType::ETHEREUM_SET_CODE => Self::EthereumSetCode(EthSetCodeTx::default()),
            _ if tx_type.is_ethereum() || tx_type.get() > 0xff => {
                return Err(TxError::UndefinedTxType(tx_type.get()))
            }
            _ => {
                if tx_type.get() - tx_type.family().get() > 2 {
                    return Err(TxError::UndefinedTxType(tx_type.get()));
                }
                let fee_mode = FeeMode::zero(tx_type);
                match tx_type.family() {
                    TxType::VALUE_TRANSFER => {
                        Self::ValueTransfer(ValueTransferTx { fee_mode, ..Default::default() })
                    }
                    TxType::VALUE_TRANSFER_MEMO => Self::ValueTransferMemo(ValueTransferMemoTx {
                        fee_mode,
                        ..Default::default()
                    }),
                    TxType::ACCOUNT_UPDATE => {
                        Self::AccountUpdate(AccountUpdateTx { fee_mode, ..Default::default() })
                    }
                    TxType::SMART_CONTRACT_DEPLOY => {
                        Self::SmartContractDeploy(SmartContractDeployTx {
                            fee_mode,
                            ..Default::default()
                        })
                    }
                    TxType::SMART_CONTRACT_EXECUTION => {
                        Self::SmartContractExecution(SmartContractExecutionTx {
                            fee_mode,
                            ..Default::default()
                        })
                    }
                    TxType::CANCEL => Self::Cancel(CancelTx { fee_mode, ..Default::default() }),
                    TxType::CHAIN_DATA_ANCHORING => {
                        Self::ChainDataAnchoring(ChainDataAnchoringTx {
                            fee_mode,
                            ..Default::default()
                        })
                    }
                    _ => return Err(TxError::UndefinedTxType(tx_type.get())),
                }
            }
        };
        Ok(data)
    }

    /// Returns the Kaia typed view of the variant.
    fn kaia(&self) -> Option<&dyn KaiaTx> {
        let tx: &dyn KaiaTx = match self {
            Self::ValueTransfer(tx) => tx,
            Self::ValueTransferMemo(tx) => tx,
            Self::AccountCreation(tx) => tx,
            Self::AccountUpdate(tx) => tx,
            Self::SmartContractDeploy(tx) => tx,
            Self::SmartContractExecution(tx) => tx,
            Self::Cancel(tx) => tx,
            Self::ChainDataAnchoring(tx) => tx,
            _ => return None,
        };
        Some(tx)
    }

    fn kaia_mut(&mut self) -> Option<&mut dyn KaiaTx> {
        let tx: &mut dyn KaiaTx = match self {
            Self::ValueTransfer(tx) => tx,
            Self::ValueTransferMemo(tx) => tx,
            Self::AccountCreation(tx) => tx,
            Self::AccountUpdate(tx) => tx,
            Self::SmartContractDeploy(tx) => tx,
            Self::SmartContractExecution(tx) => tx,
            Self::Cancel(tx) => tx,
            Self::ChainDataAnchoring(tx) => tx,
            _ => return None,
        };
        Some(tx)
    }

    /// Returns the EIP-2718 typed view of the variant.
    fn eth_typed(&self) -> Option<&dyn EthTypedTx> {
        let tx: &dyn EthTypedTx = match self {
            Self::EthereumAccessList(tx) => tx,
            Self::EthereumDynamicFee(tx) => tx,
            Self::EthereumSetCode(tx) => tx,
            _ => return None,
        };
        Some(tx)
    }

    fn eth_typed_mut(&mut self) -> Option<&mut dyn EthTypedTx> {
        let tx: &mut dyn EthTypedTx = match self {
            Self::EthereumAccessList(tx) => tx,
            Self::EthereumDynamicFee(tx) => tx,
            Self::EthereumSetCode(tx) => tx,
            _ => return None,
        };
        Some(tx)
    }

    /// Returns the transaction type tag.
    pub fn tx_type(&self) -> TxType {
        match self {
            Self::Legacy(_) => TxType::LEGACY,
            Self::EthereumAccessList(_) => TxType::ETHEREUM_ACCESS_LIST,
            Self::EthereumDynamicFee(_) => TxType::ETHEREUM_DYNAMIC_FEE,
            Self::EthereumSetCode(_) => TxType::ETHEREUM_SET_CODE,
            Self::ValueTransfer(tx) => tx.tx_type(),
            Self::ValueTransferMemo(tx) => tx.tx_type(),
            Self::AccountCreation(tx) => tx.tx_type(),
            Self::AccountUpdate(tx) => tx.tx_type(),
            Self::SmartContractDeploy(tx) => tx.tx_type(),
            Self::SmartContractExecution(tx) => tx.tx_type(),
            Self::Cancel(tx) => tx.tx_type(),
            Self::ChainDataAnchoring(tx) => tx.tx_type(),
        }
    }

    /// Returns the sender nonce.
    pub const fn nonce(&self) -> u64 {
        match self {
            Self::Legacy(tx) => tx.nonce,
            Self::ValueTransfer(tx) => tx.nonce,
            Self::ValueTransferMemo(tx) => tx.nonce,
            Self::AccountCreation(tx) => tx.nonce,
            Self::AccountUpdate(tx) => tx.nonce,
            Self::SmartContractDeploy(tx) => tx.nonce,
            Self::SmartContractExecution(tx) => tx.nonce,
            Self::Cancel(tx) => tx.nonce,
            Self::ChainDataAnchoring(tx) => tx.nonce,
            Self::EthereumAccessList(tx) => tx.nonce,
            Self::EthereumDynamicFee(tx) => tx.nonce,
            Self::EthereumSetCode(tx) => tx.nonce,
        }
    }

    /// Returns the gas limit.
    pub const fn gas_limit(&self) -> u64 {
        match self {
            Self::Legacy(tx) => tx.gas_limit,
            Self::ValueTransfer(tx) => tx.gas_limit,
            Self::ValueTransferMemo(tx) => tx.gas_limit,
            Self::AccountCreation(tx) => tx.gas_limit,
            Self::AccountUpdate(tx) => tx.gas_limit,
            Self::SmartContractDeploy(tx) => tx.gas_limit,
            Self::SmartContractExecution(tx) => tx.gas_limit,
            Self::Cancel(tx) => tx.gas_limit,
            Self::ChainDataAnchoring(tx) => tx.gas_limit,
            Self::EthereumAccessList(tx) => tx.gas_limit,
            Self::EthereumDynamicFee(tx) => tx.gas_limit,
            Self::EthereumSetCode(tx) => tx.gas_limit,
        }
    }

    /// Returns the gas price. Dynamic fee transactions report their fee cap.
    pub const fn gas_price(&self) -> U256 {
        match self {
            Self::Legacy(tx) => tx.gas_price,
            Self::ValueTransfer(tx) => tx.gas_price,
            Self::ValueTransferMemo(tx) => tx.gas_price,
            Self::AccountCreation(tx) => tx.gas_price,
            Self::AccountUpdate(tx) => tx.gas_price,
            Self::SmartContractDeploy(tx) => tx.gas_price,
            Self::SmartContractExecution(tx) => tx.gas_price,
            Self::Cancel(tx) => tx.gas_price,
            Self::ChainDataAnchoring(tx) => tx.gas_price,
            Self::EthereumAccessList(tx) => tx.gas_price,
            Self::EthereumDynamicFee(tx) => tx.gas_fee_cap,
            Self::EthereumSetCode(tx) => tx.gas_fee_cap,
        }
    }

    /// Returns the recipient. Account updates, cancels and anchoring transactions have none, and
    /// contract creations have none.
    pub const fn recipient(&self) -> Option<Address> {
        match self {
            Self::Legacy(tx) => tx.to,
            Self::ValueTransfer(tx) => Some(tx.to),
            Self::ValueTransferMemo(tx) => Some(tx.to),
            Self::AccountCreation(tx) => Some(tx.to),
            Self::SmartContractDeploy(tx) => tx.to,
            Self::SmartContractExecution(tx) => Some(tx.to),
            Self::EthereumAccessList(tx) => tx.to,
            Self::EthereumDynamicFee(tx) => tx.to,
            Self::EthereumSetCode(tx) => Some(tx.to),
            Self::AccountUpdate(_) | Self::Cancel(_) | Self::ChainDataAnchoring(_) => None,
        }
    }

    /// Returns the transferred value. Families that cannot transfer value report zero.
    pub const fn amount(&self) -> U256 {
        match self {
            Self::Legacy(tx) => tx.amount,
            Self::ValueTransfer(tx) => tx.amount,
            Self::ValueTransferMemo(tx) => tx.amount,
            Self::AccountCreation(tx) => tx.amount,
            Self::SmartContractDeploy(tx) => tx.amount,
            Self::SmartContractExecution(tx) => tx.amount,
            Self::EthereumAccessList(tx) => tx.amount,
            Self::EthereumDynamicFee(tx) => tx.amount,
            Self::EthereumSetCode(tx) => tx.amount,
            Self::AccountUpdate(_) | Self::Cancel(_) | Self::ChainDataAnchoring(_) => U256::ZERO,
        }
    }

    /// Returns the sender signatures. Ethereum transactions carry exactly one.
    pub fn signatures(&self) -> TxSignatures {
        if let Some(tx) = self.kaia() {
            return tx.signatures().clone();
        }
        match self {
            Self::Legacy(tx) => TxSignatures::single(tx.signature),
            _ => {
                self.eth_typed().map(|tx| TxSignatures::single(*tx.signature())).unwrap_or_default()
            }
        }
    }

    /// Returns the chain id the transaction is signed for. Legacy and Kaia typed transactions
    /// derive it from the `v` value of their (first) signature; Ethereum typed transactions carry
    /// it as a field.
    pub fn chain_id(&self) -> Option<U256> {
        match self {
            Self::Legacy(tx) => tx.chain_id(),
            Self::EthereumAccessList(tx) => Some(tx.chain_id),
            Self::EthereumDynamicFee(tx) => Some(tx.chain_id),
            Self::EthereumSetCode(tx) => Some(tx.chain_id),
            _ => self.kaia()?.signatures().first().and_then(|sig| chain_id_from_v(sig.v)),
        }
    }

    /// Returns the sender carried by Kaia typed transactions. Ethereum transactions recover it
    /// from their signature instead.
    pub fn from(&self) -> Option<Address> {
        self.kaia().map(|tx| tx.sender())
    }

    /// Returns the payload: the data of Ethereum transactions, the memo, the initcode, the call
    /// input or the anchored data.
    pub const fn payload(&self) -> Option<&Bytes> {
        match self {
            Self::Legacy(tx) => Some(&tx.payload),
            Self::ValueTransferMemo(tx) => Some(&tx.payload),
            Self::SmartContractDeploy(tx) => Some(&tx.payload),
            Self::SmartContractExecution(tx) => Some(&tx.payload),
            Self::ChainDataAnchoring(tx) => Some(&tx.anchored_data),
            Self::EthereumAccessList(tx) => Some(&tx.payload),
            Self::EthereumDynamicFee(tx) => Some(&tx.payload),
            Self::EthereumSetCode(tx) => Some(&tx.payload),
            Self::ValueTransfer(_)
            | Self::AccountCreation(_)
            | Self::AccountUpdate(_)
            | Self::Cancel(_) => None,
        }
    }

    /// Returns the fee payer of fee-delegated transactions.
    pub fn fee_payer(&self) -> Option<Address> {
        self.kaia()?.fee_payer().map(|fee_payer| fee_payer.address)
    }

    /// Returns the signatures of the fee payer of fee-delegated transactions.
    pub fn fee_payer_signatures(&self) -> Option<&TxSignatures> {
        self.kaia()?.fee_payer().map(|fee_payer| &fee_payer.signatures)
    }

    /// Returns the fee ratio of fee-delegated transactions with a ratio.
    pub fn fee_ratio(&self) -> Option<FeeRatio> {
        self.kaia()?.fee_mode().and_then(FeeMode::fee_ratio)
    }

    /// Returns the key registered by account update and account creation transactions.
    pub const fn account_key(&self) -> Option<&AccountKey> {
        match self {
            Self::AccountUpdate(tx) => Some(&tx.key),
            Self::AccountCreation(tx) => Some(&tx.key),
            _ => None,
        }
    }

    /// Returns the access list of Ethereum typed transactions.
    pub const fn access_list(&self) -> Option<&AccessList> {
        match self {
            Self::EthereumAccessList(tx) => Some(&tx.access_list),
            Self::EthereumDynamicFee(tx) => Some(&tx.access_list),
            Self::EthereumSetCode(tx) => Some(&tx.access_list),
            _ => None,
        }
    }

    /// Returns the authorization list of set code transactions.
    pub fn authorization_list(&self) -> Option<&[SignedAuthorization]> {
        match self {
            Self::EthereumSetCode(tx) => Some(&tx.authorization_list),
            _ => None,
        }
    }

    /// Returns the priority fee cap of dynamic fee transactions.
    pub const fn gas_tip_cap(&self) -> Option<U256> {
        match self {
            Self::EthereumDynamicFee(tx) => Some(tx.gas_tip_cap),
            Self::EthereumSetCode(tx) => Some(tx.gas_tip_cap),
            _ => None,
        }
    }

    /// Returns the fee cap of dynamic fee transactions.
    pub const fn gas_fee_cap(&self) -> Option<U256> {
        match self {
            Self::EthereumDynamicFee(tx) => Some(tx.gas_fee_cap),
            Self::EthereumSetCode(tx) => Some(tx.gas_fee_cap),
            _ => None,
        }
    }

    /// Returns the byte string the sender signs over.
    ///
    /// - Kaia typed: `rlp([type, fields.., (fee ratio)])`
    /// - Legacy: `rlp([nonce, price, gas, to, value, data])`
    /// - Ethereum typed: `type ++ rlp([fields..])`
    pub fn serialize_for_signing(&self) -> Vec<u8> {
        match self {
            Self::Legacy(tx) => tx.serialize_for_signing(),
            _ => match (self.kaia(), self.eth_typed()) {
                (Some(tx), _) => tx.serialize_for_signing(),
                (_, Some(tx)) => tx.serialize_for_signing(),
                (None, None) => Vec::new(),
            },
        }
    }

    /// Returns the hash the sender signs.
    ///
    /// Kaia typed transactions sign `keccak(rlp([serialize_for_signing, chain_id, 0, 0]))`, legacy
    /// transactions sign their EIP-155 hash and Ethereum typed transactions sign
    /// `keccak(serialize_for_signing)`, committing to the chain id field they carry.
    pub fn signing_hash(&self, chain_id: U256) -> B256 {
        match self {
            Self::Legacy(tx) => tx.signing_hash(chain_id),
            _ => match (self.kaia(), self.eth_typed()) {
                (Some(tx), _) => signing_domain_hash(&tx.serialize_for_signing(), None, chain_id),
                (_, Some(tx)) => tx.signing_hash(),
                (None, None) => B256::ZERO,
            },
        }
    }

    /// Returns the hash the fee payer signs:
    /// `keccak(rlp([serialize_for_signing, fee_payer, chain_id, 0, 0]))`.
    pub fn fee_payer_signing_hash(&self, chain_id: U256) -> Result<B256, TxError> {
        let tx = self.kaia().ok_or(TxError::UnsupportedTxType(self.tx_type()))?;
        let fee_payer = tx.fee_payer().ok_or(TxError::UnsupportedTxType(self.tx_type()))?;
        let fee_payer = &fee_payer.address as &dyn Encodable;
        Ok(signing_domain_hash(&tx.serialize_for_signing(), Some(fee_payer), chain_id))
    }

    /// Returns the hash of the transaction without the fee payer address and signatures.
    ///
    /// It equals the transaction hash for every type without fee delegation.
    pub fn sender_tx_hash(&self) -> B256 {
        match self.kaia() {
            Some(tx) => tx.sender_tx_hash(),
            None => self.tx_hash(),
        }
    }

    /// Returns the canonical encoding of the transaction.
    ///
    /// - Kaia typed: `type ++ rlp([fields.., (fee ratio), signatures, (fee payer, fee payer
    ///   signatures)])`
    /// - Legacy: `rlp([fields.., v, r, s])`
    /// - Ethereum typed: `0x78 ++ type ++ rlp([fields.., v, r, s])`
    pub fn encode(&self) -> Vec<u8> {
        match self {
            Self::Legacy(tx) => tx.encode(),
            _ => match (self.kaia(), self.eth_typed()) {
                (Some(tx), _) => tx.encode_typed(),
                (_, Some(tx)) => tx.encode_enveloped(),
                (None, None) => Vec::new(),
            },
        }
    }

    /// Computes the transaction hash. Ethereum typed transactions hash their EIP-2718 encoding
    /// without the `0x78` envelope, so that the hash matches the one Ethereum tooling computes.
    pub fn tx_hash(&self) -> B256 {
        match self.eth_typed() {
            Some(tx) => tx.hash(),
            None => keccak256(self.encode()),
        }
    }

    /// Replaces the sender signatures. Ethereum transactions keep the first signature only.
    pub fn set_signatures(&mut self, signatures: TxSignatures) {
        if let Some(tx) = self.kaia_mut() {
            *tx.signatures_mut() = signatures;
            return;
        }
        let signature = signatures.first().copied().unwrap_or_default();
        match self {
            Self::Legacy(tx) => tx.signature = signature,
            _ => {
                if let Some(tx) = self.eth_typed_mut() {
                    *tx.signature_mut() = signature;
                }
            }
        }
    }

    /// Replaces the fee payer signatures. Fails with [`TxError::UnsupportedTxType`] if the fee is
    /// not delegated.
    pub fn set_fee_payer_signatures(&mut self, signatures: TxSignatures) -> Result<(), TxError> {
        let tx_type = self.tx_type();
        let fee_payer = self
            .kaia_mut()
            .and_then(|tx| tx.fee_payer_mut())
            .ok_or(TxError::UnsupportedTxType(tx_type))?;
        fee_payer.signatures = signatures;
        Ok(())
    }

    /// Computes the intrinsic gas of the transaction under `rules`.
    ///
    /// Ethereum transactions use [`intrinsic_gas`]. Kaia typed transactions pay the fixed cost of
    /// their type, the account key and human-readable surcharges, and the payload gas of
    /// [`intrinsic_gas_payload`] regardless of `ISTANBUL`.
    pub fn intrinsic_gas(&self, rules: &Rules) -> Result<u64, TxError> {
        let tx_type = self.tx_type();
        match self {
            Self::Legacy(tx) => {
                intrinsic_gas(&tx.payload, &AccessList::default(), &[], tx.to.is_none(), rules)
            }
            Self::EthereumAccessList(tx) => {
                intrinsic_gas(&tx.payload, &tx.access_list, &[], tx.to.is_none(), rules)
            }
            Self::EthereumDynamicFee(tx) => {
                intrinsic_gas(&tx.payload, &tx.access_list, &[], tx.to.is_none(), rules)
            }
            Self::EthereumSetCode(tx) => {
                intrinsic_gas(&tx.payload, &tx.access_list, &tx.authorization_list, false, rules)
            }
            Self::ValueTransfer(_) | Self::Cancel(_) => tx_type_gas(tx_type),
            Self::ValueTransferMemo(tx) => {
                intrinsic_gas_payload(tx_type_gas(tx_type)?, &tx.payload, false, rules)
            }
            Self::AccountCreation(tx) => {
                tx_type_gas_with_account_key(tx_type, Some(&tx.key), tx.human_readable)
            }
            Self::AccountUpdate(tx) => tx_type_gas_with_account_key(tx_type, Some(&tx.key), false),
            Self::SmartContractDeploy(tx) => {
                let gas = tx_type_gas_with_account_key(tx_type, None, tx.human_readable)?;
                intrinsic_gas_payload(gas, &tx.payload, true, rules)
            }
            Self::SmartContractExecution(tx) => {
                intrinsic_gas_payload(tx_type_gas(tx_type)?, &tx.payload, false, rules)
            }
            Self::ChainDataAnchoring(tx) => {
                intrinsic_gas_payload(tx_type_gas(tx_type)?, &tx.anchored_data, false, rules)
            }
        }
    }

    /// Validates the values that do not depend on the state: the fee ratio, the code format and
    /// the disabled account creation type.
    pub fn validate(&self) -> Result<(), TxError> {
        let result = match self {
            Self::AccountCreation(_) => Err(TxError::AccountCreationDisabled),
            Self::SmartContractDeploy(tx) if !tx.code_format.is_valid() => {
                Err(TxError::InvalidCodeFormat(tx.code_format.get()))
            }
            _ => match self.fee_ratio() {
                Some(ratio) if !ratio.is_valid() => Err(TxError::InvalidFeeRatio(ratio.get())),
                _ => Ok(()),
            },
        };
        if let Err(err) = &result {
            let tx_type = self.tx_type();
            debug!(target: "kaia_tx::validation", %tx_type, %err, "Invalid transaction");
        }
        result
    }

    /// Validates the account shapes the transaction type requires under code delegation. See
    /// [`validate_delegation`].
    pub fn validate_delegation(&self, state: &impl AccountStateReader) -> Result<(), TxError> {
        let from = self.from().unwrap_or_default();
        validate_delegation(self.tx_type(), from, self.recipient(), state)
    }
}

/// A transaction: the exclusive owner of its [`TxData`] and of the lazily computed hash.
#[derive(Clone, Debug, derive_more::Deref)]
pub struct Transaction {
    #[deref]
    data: TxData,
    hash: OnceCell<B256>,
}

impl PartialEq for Transaction {
    fn eq(&self, other: &Self) -> bool {
        self.data == other.data
    }
}

impl Eq for Transaction {}

impl From<TxData> for Transaction {
    fn from(data: TxData) -> Self {
        Self::new(data)
    }
}

impl Transaction {
    /// Wraps `data` into a transaction.
    pub fn new(data: TxData) -> Self {
        Self { data, hash: OnceCell::new() }
    }

    /// Returns the transaction payload.
    pub const fn data(&self) -> &TxData {
        &self.data
    }

    /// Consumes the transaction and returns its payload.
    pub fn into_data(self) -> TxData {
        self.data
    }

    /// Returns the transaction hash, computing it on first use.
    pub fn hash(&self) -> B256 {
        *self.hash.get_or_init(|| self.data.tx_hash())
    }

    /// Replaces the sender signatures and forgets the cached hash.
    pub fn set_signatures(&mut self, signatures: TxSignatures) {
        self.data.set_signatures(signatures);
        self.hash = OnceCell::new();
    }

    /// Replaces the fee payer signatures and forgets the cached hash.
    pub fn set_fee_payer_signatures(&mut self, signatures: TxSignatures) -> Result<(), TxError> {
        self.data.set_fee_payer_signatures(signatures)?;
        self.hash = OnceCell::new();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use alloy_primitives::address;

    use super::*;
    use crate::{KaiaSpecId, TxSignature};

    #[test]
    fn test_create_every_defined_type() {
        for tx_type in TxType::ALL {
            let created = TxData::create(tx_type);
            if tx_type == TxType::ACCOUNT_CREATION {
                assert_eq!(created, Err(TxError::UndefinedTxType(tx_type.get())));
            } else {
                assert_eq!(created.map(|data| data.tx_type()), Ok(tx_type));
            }
        }
    }

    #[test]
    fn test_create_undefined_types() {
        for tag in [0x01, 0x0b, 0x19, 0x50, 0x7803, 0x7805, 0x0108] {
            assert_eq!(TxData::create(TxType::new(tag)), Err(TxError::UndefinedTxType(tag)));
        }
    }

    #[test]
    fn test_zero_valued_shell() {
        let data = TxData::create(TxType::FEE_DELEGATED_VALUE_TRANSFER_WITH_RATIO).unwrap();
        assert_eq!(data.nonce(), 0);
        assert_eq!(data.fee_payer(), Some(Address::ZERO));
        assert_eq!(data.fee_ratio(), Some(FeeRatio::default()));
        assert_eq!(data.signatures(), TxSignatures::default());
        assert_eq!(data.validate(), Err(TxError::InvalidFeeRatio(0)));
    }

    #[test]
    fn test_capabilities() {
        let cancel = TxData::create(TxType::CANCEL).unwrap();
        assert_eq!(cancel.recipient(), None);
        assert_eq!(cancel.amount(), U256::ZERO);
        assert_eq!(cancel.payload(), None);
        assert_eq!(cancel.fee_payer(), None);
        assert_eq!(cancel.from(), Some(Address::ZERO));

        let legacy = TxData::create(TxType::LEGACY).unwrap();
        assert_eq!(legacy.from(), None);
        assert_eq!(legacy.payload(), Some(&Bytes::new()));
        assert_eq!(legacy.access_list(), None);

        let set_code = TxData::create(TxType::ETHEREUM_SET_CODE).unwrap();
        assert_eq!(set_code.authorization_list(), Some(&[][..]));
        assert_eq!(set_code.gas_tip_cap(), Some(U256::ZERO));
        assert_eq!(set_code.chain_id(), Some(U256::ZERO));
    }

    #[test]
    fn test_fee_payer_operations_require_delegation() {
        let mut data = TxData::create(TxType::VALUE_TRANSFER).unwrap();
        assert_eq!(
            data.set_fee_payer_signatures(TxSignatures::default()),
            Err(TxError::UnsupportedTxType(TxType::VALUE_TRANSFER))
        );
        assert_eq!(
            data.fee_payer_signing_hash(U256::from(1)),
            Err(TxError::UnsupportedTxType(TxType::VALUE_TRANSFER))
        );
        assert_eq!(data.sender_tx_hash(), data.tx_hash());
    }

    #[test]
    fn test_hash_cache_is_reset_by_new_signatures() {
        let mut tx = Transaction::new(TxData::create(TxType::FEE_DELEGATED_CANCEL).unwrap());
        let unsigned = tx.hash();
        assert_eq!(tx.hash(), unsigned);

        let signature = TxSignature::new(U256::from(0x4055), U256::from(1), U256::from(2));
        tx.set_signatures(TxSignatures::single(signature));
        let signed = tx.hash();
        assert_ne!(signed, unsigned);
        assert_eq!(signed, tx.tx_hash());

        let sender_hash = tx.sender_tx_hash();
        tx.set_fee_payer_signatures(TxSignatures::single(signature)).unwrap();
        assert_ne!(tx.hash(), signed);
        assert_eq!(tx.sender_tx_hash(), sender_hash);
        assert_eq!(tx.chain_id(), Some(U256::from(8217)));
    }

    #[test]
    fn test_ethereum_keeps_single_signature() {
        let mut data = TxData::create(TxType::ETHEREUM_ACCESS_LIST).unwrap();
        let first = TxSignature::new(U256::from(1), U256::from(2), U256::from(3));
        let second = TxSignature::new(U256::from(0), U256::from(4), U256::from(5));
        data.set_signatures([first, second].into_iter().collect());
        assert_eq!(data.signatures(), TxSignatures::single(first));
    }

    #[test]
    fn test_validate() {
        let deploy = TxData::SmartContractDeploy(SmartContractDeployTx {
            code_format: CodeFormat::EVM,
            ..Default::default()
        });
        assert_eq!(deploy.validate(), Ok(()));

        let creation = TxData::AccountCreation(AccountCreationTx::default());
        assert_eq!(creation.validate(), Err(TxError::AccountCreationDisabled));
    }

    #[test]
    fn test_deploy_intrinsic_gas() {
        let deploy = TxData::SmartContractDeploy(SmartContractDeployTx {
            payload: Bytes::from_static(&[0x60, 0x00, 0x60, 0x00]),
            human_readable: true,
            fee_mode: FeeMode::Delegated(FeePayer::new(address!(
                "0000000000000000000000000000000000000fee"
            ))),
            ..Default::default()
        });
        let rules = Rules::from_spec(KaiaSpecId::SHANGHAI);
        assert_eq!(deploy.intrinsic_gas(&rules), Ok(53_000 + 10_000 + 4_000_000 + 400 + 2));
    }
}
