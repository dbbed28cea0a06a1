//! The 16-bit transaction type tag.

use core::fmt;

use derive_more::{From, Into};
use serde::{Deserialize, Serialize};

use crate::constants::{ETHEREUM_TX_TYPE_ENVELOPE, SUB_TX_TYPE_BITS};

const SUB_TX_TYPE_MASK: u16 = (1 << SUB_TX_TYPE_BITS) - 1;
const FEE_DELEGATION_BIT: u16 = 0b01;
const FEE_DELEGATION_WITH_RATIO_BIT: u16 = 0b10;
const ETH_TYPED_PREFIX: u16 = (ETHEREUM_TX_TYPE_ENVELOPE as u16) << 8;

const fn kaia(family: u16, sub: u16) -> TxType {
    TxType((family << SUB_TX_TYPE_BITS) | sub)
}

/// Transaction type tag.
///
/// Kaia types are laid out as `family << 3 | sub`, where the sub-type selects the base variant
/// (`0`), the fee-delegated variant (`1`) or the fee-delegated variant with a fee ratio (`2`).
/// Ethereum typed transactions live under the `0x78` envelope byte in the high octet.
///
/// Every classification is a bitmask test on the raw tag, so it also answers for tags outside of
/// the closed set.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, From, Into, Serialize,
    Deserialize,
)]
#[serde(transparent)]
pub struct TxType(u16);

#[allow(missing_docs)]
impl TxType {
    pub const LEGACY: Self = kaia(0, 0);

    pub const VALUE_TRANSFER: Self = kaia(1, 0);
    pub const FEE_DELEGATED_VALUE_TRANSFER: Self = kaia(1, 1);
    pub const FEE_DELEGATED_VALUE_TRANSFER_WITH_RATIO: Self = kaia(1, 2);

    pub const VALUE_TRANSFER_MEMO: Self = kaia(2, 0);
    pub const FEE_DELEGATED_VALUE_TRANSFER_MEMO: Self = kaia(2, 1);
    pub const FEE_DELEGATED_VALUE_TRANSFER_MEMO_WITH_RATIO: Self = kaia(2, 2);

    pub const ACCOUNT_CREATION: Self = kaia(3, 0);

    pub const ACCOUNT_UPDATE: Self = kaia(4, 0);
    pub const FEE_DELEGATED_ACCOUNT_UPDATE: Self = kaia(4, 1);
    pub const FEE_DELEGATED_ACCOUNT_UPDATE_WITH_RATIO: Self = kaia(4, 2);

    pub const SMART_CONTRACT_DEPLOY: Self = kaia(5, 0);
    pub const FEE_DELEGATED_SMART_CONTRACT_DEPLOY: Self = kaia(5, 1);
    pub const FEE_DELEGATED_SMART_CONTRACT_DEPLOY_WITH_RATIO: Self = kaia(5, 2);

    pub const SMART_CONTRACT_EXECUTION: Self = kaia(6, 0);
    pub const FEE_DELEGATED_SMART_CONTRACT_EXECUTION: Self = kaia(6, 1);
    pub const FEE_DELEGATED_SMART_CONTRACT_EXECUTION_WITH_RATIO: Self = kaia(6, 2);

    pub const CANCEL: Self = kaia(7, 0);
    pub const FEE_DELEGATED_CANCEL: Self = kaia(7, 1);
    pub const FEE_DELEGATED_CANCEL_WITH_RATIO: Self = kaia(7, 2);

    /// Reserved. Outside of [`Self::ALL`] and never constructible.
    pub const BATCH: Self = kaia(8, 0);

    pub const CHAIN_DATA_ANCHORING: Self = kaia(9, 0);
    pub const FEE_DELEGATED_CHAIN_DATA_ANCHORING: Self = kaia(9, 1);
    pub const FEE_DELEGATED_CHAIN_DATA_ANCHORING_WITH_RATIO: Self = kaia(9, 2);

    pub const ETHEREUM_ACCESS_LIST: Self = Self(ETH_TYPED_PREFIX | 0x01);
    pub const ETHEREUM_DYNAMIC_FEE: Self = Self(ETH_TYPED_PREFIX | 0x02);
    /// Blob transactions are not supported.
    pub const ETHEREUM_BLOB: Self = Self(ETH_TYPED_PREFIX | 0x03);
    pub const ETHEREUM_SET_CODE: Self = Self(ETH_TYPED_PREFIX | 0x04);
}

impl TxType {
    /// Every tag of the closed set of transaction types.
    pub const ALL: [Self; 26] = [
        Self::LEGACY,
        Self::VALUE_TRANSFER,
        Self::FEE_DELEGATED_VALUE_TRANSFER,
        Self::FEE_DELEGATED_VALUE_TRANSFER_WITH_RATIO,
        Self::VALUE_TRANSFER_MEMO,
        Self::FEE_DELEGATED_VALUE_TRANSFER_MEMO,
        Self::FEE_DELEGATED_VALUE_TRANSFER_MEMO_WITH_RATIO,
        Self::ACCOUNT_CREATION,
        Self::ACCOUNT_UPDATE,
        Self::FEE_DELEGATED_ACCOUNT_UPDATE,
        Self::FEE_DELEGATED_ACCOUNT_UPDATE_WITH_RATIO,
        Self::SMART_CONTRACT_DEPLOY,
        Self::FEE_DELEGATED_SMART_CONTRACT_DEPLOY,
        Self::FEE_DELEGATED_SMART_CONTRACT_DEPLOY_WITH_RATIO,
        Self::SMART_CONTRACT_EXECUTION,
        Self::FEE_DELEGATED_SMART_CONTRACT_EXECUTION,
        Self::FEE_DELEGATED_SMART_CONTRACT_EXECUTION_WITH_RATIO,
        Self::CANCEL,
        Self::FEE_DELEGATED_CANCEL,
        Self::FEE_DELEGATED_CANCEL_WITH_RATIO,
        Self::CHAIN_DATA_ANCHORING,
        Self::FEE_DELEGATED_CHAIN_DATA_ANCHORING,
        Self::FEE_DELEGATED_CHAIN_DATA_ANCHORING_WITH_RATIO,
        Self::ETHEREUM_ACCESS_LIST,
        Self::ETHEREUM_DYNAMIC_FEE,
        Self::ETHEREUM_SET_CODE,
    ];

    /// Creates a tag from its raw value. Any value is accepted.
    pub const fn new(tag: u16) -> Self {
        Self(tag)
    }

    /// Returns the raw value of the tag.
    pub const fn get(self) -> u16 {
        self.0
    }

    /// Returns the single byte written in front of the encoding of a typed transaction: the tag
    /// itself for Kaia types and the low octet for Ethereum typed transactions.
    pub const fn type_byte(self) -> u8 {
        (self.0 & 0xff) as u8
    }

    /// Returns the tag of the base variant of the family.
    pub const fn family(self) -> Self {
        Self(self.0 & !SUB_TX_TYPE_MASK)
    }

    /// Returns `true` for the legacy transaction.
    pub const fn is_legacy(self) -> bool {
        self.0 == Self::LEGACY.0
    }

    /// Returns `true` for the EIP-2718 Ethereum typed transactions, i.e. tags under the `0x78`
    /// envelope.
    pub const fn is_ethereum_typed(self) -> bool {
        self.0 & 0xff00 == ETH_TYPED_PREFIX
    }

    /// Returns `true` for the legacy and the Ethereum typed transactions.
    pub const fn is_ethereum(self) -> bool {
        self.is_legacy() || self.is_ethereum_typed()
    }

    /// Returns `true` for Kaia types whose fee is (partially) paid by a fee payer: exactly one of
    /// the two delegation bits is set.
    pub const fn is_fee_delegated(self) -> bool {
        let bits = self.0 & (FEE_DELEGATION_BIT | FEE_DELEGATION_WITH_RATIO_BIT);
        (bits == FEE_DELEGATION_BIT || bits == FEE_DELEGATION_WITH_RATIO_BIT) && !self.is_ethereum()
    }

    /// Returns `true` for Kaia types whose fee is shared between the sender and a fee payer.
    pub const fn is_fee_delegated_with_ratio(self) -> bool {
        self.0 & (FEE_DELEGATION_BIT | FEE_DELEGATION_WITH_RATIO_BIT) ==
            FEE_DELEGATION_WITH_RATIO_BIT &&
            !self.is_ethereum()
    }

    /// Returns `true` for the account creation transaction.
    pub const fn is_account_creation(self) -> bool {
        self.0 == Self::ACCOUNT_CREATION.0
    }

    /// Returns `true` for the account update family.
    pub const fn is_account_update(self) -> bool {
        self.family().0 == Self::ACCOUNT_UPDATE.0
    }

    /// Returns `true` for the smart contract deploy family.
    pub const fn is_contract_deploy(self) -> bool {
        self.family().0 == Self::SMART_CONTRACT_DEPLOY.0
    }

    /// Returns `true` for the cancel family.
    pub const fn is_cancel(self) -> bool {
        self.family().0 == Self::CANCEL.0
    }

    /// Returns `true` for the chain data anchoring family.
    pub const fn is_chain_data_anchoring(self) -> bool {
        self.family().0 == Self::CHAIN_DATA_ANCHORING.0
    }

    /// Returns `true` for the value transfer family, memo variants excluded.
    pub const fn is_value_transfer(self) -> bool {
        self.family().0 == Self::VALUE_TRANSFER.0
    }

    /// Returns `true` for the value transfer with memo family.
    pub const fn is_value_transfer_memo(self) -> bool {
        self.family().0 == Self::VALUE_TRANSFER_MEMO.0
    }

    /// Returns `true` for the smart contract execution family.
    pub const fn is_contract_execution(self) -> bool {
        self.family().0 == Self::SMART_CONTRACT_EXECUTION.0
    }

    /// Returns `true` if the tag belongs to the closed set of transaction types. The account
    /// creation tag is defined even though the type is disabled.
    pub fn is_defined(self) -> bool {
        self.name() != "UndefinedTxType"
    }

    /// Returns the canonical name of the tag, or `"UndefinedTxType"` for tags outside of the
    /// closed set.
    pub const fn name(self) -> &'static str {
        match self {
            Self::LEGACY => "TxTypeLegacyTransaction",
            Self::VALUE_TRANSFER => "TxTypeValueTransfer",
            Self::FEE_DELEGATED_VALUE_TRANSFER => "TxTypeFeeDelegatedValueTransfer",
            Self::FEE_DELEGATED_VALUE_TRANSFER_WITH_RATIO => {
                "TxTypeFeeDelegatedValueTransferWithRatio"
            }
            Self::VALUE_TRANSFER_MEMO => "TxTypeValueTransferMemo",
            Self::FEE_DELEGATED_VALUE_TRANSFER_MEMO => "TxTypeFeeDelegatedValueTransferMemo",
            Self::FEE_DELEGATED_VALUE_TRANSFER_MEMO_WITH_RATIO => {
                "TxTypeFeeDelegatedValueTransferMemoWithRatio"
            }
            Self::ACCOUNT_CREATION => "TxTypeAccountCreation",
            Self::ACCOUNT_UPDATE => "TxTypeAccountUpdate",
            Self::FEE_DELEGATED_ACCOUNT_UPDATE => "TxTypeFeeDelegatedAccountUpdate",
            Self::FEE_DELEGATED_ACCOUNT_UPDATE_WITH_RATIO => {
                "TxTypeFeeDelegatedAccountUpdateWithRatio"
            }
            Self::SMART_CONTRACT_DEPLOY => "TxTypeSmartContractDeploy",
            Self::FEE_DELEGATED_SMART_CONTRACT_DEPLOY => "TxTypeFeeDelegatedSmartContractDeploy",
            Self::FEE_DELEGATED_SMART_CONTRACT_DEPLOY_WITH_RATIO => {
                "TxTypeFeeDelegatedSmartContractDeployWithRatio"
            }
            Self::SMART_CONTRACT_EXECUTION => "TxTypeSmartContractExecution",
            Self::FEE_DELEGATED_SMART_CONTRACT_EXECUTION => {
                "TxTypeFeeDelegatedSmartContractExecution"
            }
            Self::FEE_DELEGATED_SMART_CONTRACT_EXECUTION_WITH_RATIO => {
                "TxTypeFeeDelegatedSmartContractExecutionWithRatio"
            }
            Self::CANCEL => "TxTypeCancel",
            Self::FEE_DELEGATED_CANCEL => "TxTypeFeeDelegatedCancel",
            Self::FEE_DELEGATED_CANCEL_WITH_RATIO => "TxTypeFeeDelegatedCancelWithRatio",
            Self::CHAIN_DATA_ANCHORING => "TxTypeChainDataAnchoring",
            Self::FEE_DELEGATED_CHAIN_DATA_ANCHORING => "TxTypeFeeDelegatedChainDataAnchoring",
            Self::FEE_DELEGATED_CHAIN_DATA_ANCHORING_WITH_RATIO => {
                "TxTypeFeeDelegatedChainDataAnchoringWithRatio"
            }
            Self::ETHEREUM_ACCESS_LIST => "TxTypeEthereumAccessList",
            Self::ETHEREUM_DYNAMIC_FEE => "TxTypeEthereumDynamicFee",
            Self::ETHEREUM_SET_CODE => "TxTypeEthereumSetCode",
            _ => "UndefinedTxType",
        }
    }
}

impl fmt::Display for TxType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_values() {
        assert_eq!(TxType::VALUE_TRANSFER.get(), 0x08);
        assert_eq!(TxType::FEE_DELEGATED_VALUE_TRANSFER_WITH_RATIO.get(), 0x0a);
        assert_eq!(TxType::ACCOUNT_UPDATE.get(), 0x20);
        assert_eq!(TxType::SMART_CONTRACT_DEPLOY.get(), 0x28);
        assert_eq!(TxType::CANCEL.get(), 0x38);
        assert_eq!(TxType::BATCH.get(), 0x40);
        assert_eq!(TxType::CHAIN_DATA_ANCHORING.get(), 0x48);
        assert_eq!(TxType::ETHEREUM_SET_CODE.get(), 0x7804);
        assert_eq!(TxType::ETHEREUM_SET_CODE.type_byte(), 0x04);
    }

    #[test]
    fn test_classification() {
        let fd = TxType::FEE_DELEGATED_SMART_CONTRACT_EXECUTION;
        assert!(fd.is_fee_delegated());
        assert!(!fd.is_fee_delegated_with_ratio());
        assert!(fd.is_contract_execution());
        assert_eq!(fd.family(), TxType::SMART_CONTRACT_EXECUTION);

        let ratio = TxType::FEE_DELEGATED_CANCEL_WITH_RATIO;
        assert!(ratio.is_fee_delegated());
        assert!(ratio.is_fee_delegated_with_ratio());
        assert!(ratio.is_cancel());

        for eth in [TxType::ETHEREUM_ACCESS_LIST, TxType::ETHEREUM_DYNAMIC_FEE] {
            assert!(eth.is_ethereum());
            assert!(eth.is_ethereum_typed());
            assert!(!eth.is_fee_delegated());
            assert!(!eth.is_fee_delegated_with_ratio());
        }
        assert!(TxType::LEGACY.is_ethereum());
        assert!(!TxType::LEGACY.is_ethereum_typed());
    }

    #[test]
    fn test_classification_of_undefined_tags() {
        // Bitmask tests answer for any tag.
        assert!(TxType::new(0x7833).is_ethereum_typed());
        assert!(TxType::new(0x23).is_account_update());
        assert!(TxType::new(0x4b).is_chain_data_anchoring());
        // Both delegation bits set is not a delegated sub-type.
        assert!(!TxType::new(0x0b).is_fee_delegated());
        assert!(!TxType::new(0x0b).is_fee_delegated_with_ratio());
    }

    #[test]
    fn test_names() {
        assert_eq!(TxType::VALUE_TRANSFER.to_string(), "TxTypeValueTransfer");
        assert_eq!(TxType::ETHEREUM_SET_CODE.name(), "TxTypeEthereumSetCode");
        assert_eq!(TxType::ETHEREUM_BLOB.name(), "UndefinedTxType");
        assert_eq!(TxType::new(0x0b).name(), "UndefinedTxType");
        assert!(TxType::ACCOUNT_CREATION.is_defined());
        assert!(!TxType::BATCH.is_defined());
        assert_eq!(TxType::BATCH.name(), "UndefinedTxType");
        assert!(!TxType::ALL.contains(&TxType::BATCH));
        assert!(!TxType::new(0x19).is_defined());
        assert!(TxType::ALL.iter().all(|t| t.is_defined()));
    }
}
