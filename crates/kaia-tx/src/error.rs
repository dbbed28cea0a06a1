use crate::{TxFieldKey, TxType, ValueKind};

/// Error type of every fallible operation in the transaction layer.
///
/// All variants are recoverable: a failing transaction is dropped from inclusion, but the
/// processing of other transactions carries on.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TxError {
    /// The tag is not part of the closed set of transaction types.
    #[error("undefined tx type: {0:#06x}")]
    UndefinedTxType(u16),
    /// A field required by the transaction type was not supplied.
    #[error("missing field: {0}")]
    MissingField(TxFieldKey),
    /// A field was supplied with a value of the wrong semantic type.
    #[error("{key} must be {expected}")]
    UnexpectedFieldType {
        /// The offending field.
        key: TxFieldKey,
        /// The semantic type the field requires.
        expected: ValueKind,
    },
    /// Fields that the transaction type does not define were supplied.
    #[error("undefined key remains: {0:?}")]
    UndefinedKeyRemains(Vec<TxFieldKey>),
    /// The fee ratio is outside of `[1, 99]`.
    #[error("fee ratio out of range [1, 99]: {0}")]
    InvalidFeeRatio(u8),
    /// The smart contract code format is not supported.
    #[error("the smart contract code format is invalid: {0}")]
    InvalidCodeFormat(u8),
    /// A gas computation exceeded the range of `u64`.
    #[error("gas uint64 overflow")]
    GasOverflow,
    /// The operation is not supported by the transaction type, e.g. a fee payer operation on a
    /// transaction type without fee delegation.
    #[error("transaction type not supported: {0}")]
    UnsupportedTxType(TxType),
    /// The account creation transaction type is disabled.
    #[error("account creation transaction type is disabled")]
    AccountCreationDisabled,
    /// The recipient must be an externally owned account without code.
    #[error("recipient must be an EOA without code")]
    RecipientMustBeCodeless,
    /// The sender must be an externally owned account without code.
    #[error("sender must be an EOA without code")]
    SenderMustBeCodeless,
    /// The recipient must be a smart contract account or an EOA with code.
    #[error("recipient must be an EOA with code or a smart contract account")]
    RecipientMustHaveCode,
    /// The transaction type has no entry in the static gas table.
    #[error("cannot find tx gas for tx type {0}")]
    UnknownGasSchedule(TxType),
}

impl TxError {
    /// Returns `true` if the error indicates an internal inconsistency rather than an invalid
    /// input.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::UnknownGasSchedule(_))
    }

    /// Returns `true` if the error comes from the code-delegation account-shape checks.
    pub const fn is_delegation_violation(&self) -> bool {
        matches!(
            self,
            Self::RecipientMustBeCodeless | Self::SenderMustBeCodeless | Self::RecipientMustHaveCode
        )
    }
}
