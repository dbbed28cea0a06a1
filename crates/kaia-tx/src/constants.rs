//! Protocol constants of the Kaia transaction layer.
//!
//! Constants are grouped by the protocol version that introduced them.

/// Constants in effect since genesis.
pub mod genesis {
    /// Gas of a legacy transaction and of every plain message call.
    pub const TX_GAS: u64 = 21_000;
    /// Gas of a transaction creating a contract.
    pub const TX_GAS_CONTRACT_CREATION: u64 = 53_000;

    /// Base gas of a value transfer transaction.
    pub const TX_GAS_VALUE_TRANSFER: u64 = 21_000;
    /// Base gas of an account creation transaction.
    pub const TX_GAS_ACCOUNT_CREATION: u64 = 21_000;
    /// Base gas of an account update transaction.
    pub const TX_GAS_ACCOUNT_UPDATE: u64 = 21_000;
    /// Base gas of a smart contract execution transaction.
    pub const TX_GAS_CONTRACT_EXECUTION: u64 = 21_000;
    /// Base gas of a cancel transaction.
    pub const TX_GAS_CANCEL: u64 = 21_000;
    /// Base gas of a chain data anchoring transaction.
    pub const TX_CHAIN_DATA_ANCHORING_GAS: u64 = 21_000;

    /// Surcharge of a fee-delegated transaction.
    pub const TX_GAS_FEE_DELEGATED: u64 = 10_000;
    /// Surcharge of a fee-delegated transaction with a fee ratio.
    pub const TX_GAS_FEE_DELEGATED_WITH_RATIO: u64 = 15_000;
    /// Surcharge of a human-readable address.
    pub const TX_GAS_HUMAN_READABLE: u64 = 4_000_000;

    /// Flat gas per payload byte of Kaia typed transactions, regardless of its value.
    pub const TX_DATA_GAS: u64 = 100;
    /// Gas per zero payload byte.
    pub const TX_DATA_ZERO_GAS: u64 = 4;
    /// Gas per non-zero payload byte before EIP-2028.
    pub const TX_DATA_NON_ZERO_GAS_FRONTIER: u64 = 68;

    /// Account creation gas per public key registered by an account key.
    pub const TX_ACCOUNT_CREATION_GAS_PER_KEY: u64 = 20_000;

    /// Opcode computation cost limit per transaction.
    pub const OPCODE_COMPUTATION_COST_LIMIT: u64 = 100_000_000;
}

/// Constants for the `ISTANBUL` spec.
pub mod istanbul {
    /// Gas per non-zero payload byte adjusted by EIP-2028.
    pub const TX_DATA_NON_ZERO_GAS_EIP2028: u64 = 16;
}

/// Constants for the `ETH_TX_TYPE` spec.
pub mod eth_tx_type {
    /// Constants inherited from `revm`.
    pub use revm::interpreter::gas::{
        ACCESS_LIST_ADDRESS as TX_ACCESS_LIST_ADDRESS_GAS,
        ACCESS_LIST_STORAGE_KEY as TX_ACCESS_LIST_STORAGE_KEY_GAS,
    };
}

/// Constants for the `SHANGHAI` spec.
pub mod shanghai {
    /// Constants inherited from `revm`.
    pub use revm::interpreter::gas::INITCODE_WORD_COST as INIT_CODE_WORD_GAS;
}

/// Constants for the `CANCUN` spec.
pub mod cancun {
    /// Opcode computation cost limit per transaction since `CANCUN`.
    pub const OPCODE_COMPUTATION_COST_LIMIT: u64 = 150_000_000;
}

/// Constants for the `PRAGUE` spec.
pub mod prague {
    /// Gas per entry of an EIP-7702 authorization list. It equals the cost of calling a new
    /// account.
    pub use revm::interpreter::gas::NEWACCOUNT as CALL_NEW_ACCOUNT_GAS;
}

/// Marker byte enveloping Ethereum typed transactions.
pub const ETHEREUM_TX_TYPE_ENVELOPE: u8 = 0x78;

/// Number of low bits of a Kaia transaction type selecting its fee-delegation sub-type.
pub const SUB_TX_TYPE_BITS: u32 = 3;
