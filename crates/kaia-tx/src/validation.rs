//! The account-shape guard of code delegation.
//!
//! Once an externally owned account may carry delegated code, value transfers must not reach
//! code silently, account updates must not rewrite the key of an account running code, and
//! contract executions must target code.

use alloy_primitives::{Address, B256};
use auto_impl::auto_impl;
use revm::primitives::KECCAK_EMPTY;
use tracing::debug;

use crate::{TxError, TxType};

/// The kind of an account in the state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AccountKind {
    /// An account created before the account model distinguished externally owned accounts.
    Legacy,
    /// An externally owned account. It carries code once delegated.
    ExternallyOwned,
    /// A smart contract account.
    SmartContract,
}

/// Read access to the account state needed by the delegation checks.
#[auto_impl(&, Box, Arc)]
pub trait AccountStateReader {
    /// Returns the kind of the account at `address`, or `None` if no account exists there.
    fn account_kind(&self, address: Address) -> Option<AccountKind>;

    /// Returns the code hash of the account at `address`. Accounts without code report
    /// [`KECCAK_EMPTY`].
    fn code_hash(&self, address: Address) -> B256;

    /// Returns `true` if an account exists at `address`.
    fn account_exists(&self, address: Address) -> bool {
        self.account_kind(address).is_some()
    }
}

/// Returns `true` if the account at `address` exists but is not an externally owned account
/// without code.
fn has_code_or_is_not_eoa(state: &impl AccountStateReader, address: Address) -> Option<bool> {
    let kind = state.account_kind(address)?;
    Some(kind != AccountKind::ExternallyOwned || state.code_hash(address) != KECCAK_EMPTY)
}

/// Validates the account shapes a transaction type requires under code delegation.
///
/// - Value transfers (memo included): an existing recipient must be an externally owned account
///   without code.
/// - Account updates: an existing sender must be an externally owned account without code.
/// - Contract executions: the recipient must exist and be a smart contract account or an
///   externally owned account with code. A missing recipient fails.
/// - Every other type passes.
pub fn validate_delegation(
    tx_type: TxType,
    from: Address,
    to: Option<Address>,
    state: &impl AccountStateReader,
) -> Result<(), TxError> {
    let result = if tx_type.is_value_transfer() || tx_type.is_value_transfer_memo() {
        match to.and_then(|to| has_code_or_is_not_eoa(state, to)) {
            Some(true) => Err(TxError::RecipientMustBeCodeless),
            _ => Ok(()),
        }
    } else if tx_type.is_account_update() {
        match has_code_or_is_not_eoa(state, from) {
            Some(true) => Err(TxError::SenderMustBeCodeless),
            _ => Ok(()),
        }
    } else if tx_type.is_contract_execution() {
        let Some(to) = to else { return Err(TxError::RecipientMustHaveCode) };
        match state.account_kind(to) {
            None => Err(TxError::RecipientMustHaveCode),
            Some(AccountKind::ExternallyOwned) if state.code_hash(to) == KECCAK_EMPTY => {
                Err(TxError::RecipientMustHaveCode)
            }
            Some(_) => Ok(()),
        }
    } else {
        Ok(())
    };

    if let Err(err) = &result {
        debug!(target: "kaia_tx::validation", %tx_type, %from, ?to, %err, "Rejected account shape");
    }
    result
}
