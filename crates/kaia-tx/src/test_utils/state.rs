use alloy_primitives::{keccak256, map::HashMap, Address, Bytes, B256};
use revm::primitives::KECCAK_EMPTY;

use crate::{AccountKind, AccountStateReader};

/// An in-memory account state for testing purposes.
#[derive(Debug, Default, Clone)]
pub struct MemoryAccountState {
    accounts: HashMap<Address, (AccountKind, B256)>,
}

impl MemoryAccountState {
    /// Sets the kind and code hash of an account.
    pub fn set_account(&mut self, address: Address, kind: AccountKind, code_hash: B256) {
        self.accounts.insert(address, (kind, code_hash));
    }

    /// Sets the kind and code hash of an account.
    pub fn account(mut self, address: Address, kind: AccountKind, code_hash: B256) -> Self {
        self.set_account(address, kind, code_hash);
        self
    }

    /// Adds an externally owned account without code.
    pub fn eoa(self, address: Address) -> Self {
        self.account(address, AccountKind::ExternallyOwned, KECCAK_EMPTY)
    }

    /// Adds an externally owned account whose code hash is `code_hash`.
    pub fn delegated_eoa(self, address: Address, code_hash: B256) -> Self {
        self.account(address, AccountKind::ExternallyOwned, code_hash)
    }

    /// Adds an externally owned account carrying `code`.
    pub fn eoa_with_code(self, address: Address, code: Bytes) -> Self {
        let code_hash = keccak256(&code);
        self.delegated_eoa(address, code_hash)
    }

    /// Adds a smart contract account.
    pub fn contract(self, address: Address) -> Self {
        self.account(address, AccountKind::SmartContract, KECCAK_EMPTY)
    }

    /// Adds a legacy account.
    pub fn legacy_account(self, address: Address) -> Self {
        self.account(address, AccountKind::Legacy, KECCAK_EMPTY)
    }

    /// Removes an account.
    pub fn remove_account(&mut self, address: Address) {
        self.accounts.remove(&address);
    }
}

impl AccountStateReader for MemoryAccountState {
    fn account_kind(&self, address: Address) -> Option<AccountKind> {
        self.accounts.get(&address).map(|(kind, _)| *kind)
    }

    fn code_hash(&self, address: Address) -> B256 {
        self.accounts.get(&address).map_or(KECCAK_EMPTY, |(_, code_hash)| *code_hash)
    }
}
