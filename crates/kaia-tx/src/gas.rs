//! Intrinsic gas: the fixed and payload-dependent gas charged before execution.

use alloy_eips::{eip2930::AccessList, eip7702::SignedAuthorization};
use tracing::{debug, trace};

use crate::{
    constants::{eth_tx_type, genesis, istanbul, prague, shanghai},
    AccountKey, Rules, TxError, TxType,
};

/// Returns the number of 32-byte words needed to hold `size` bytes, rounded up.
///
/// Sizes that would overflow while rounding saturate to `u64::MAX / 32 + 1`.
pub const fn word_count(size: u64) -> u64 {
    if size > u64::MAX - 31 {
        return u64::MAX / 32 + 1;
    }
    (size + 31) / 32
}

/// Adds `count * price` to `gas`, failing with [`TxError::GasOverflow`] if the result does not fit
/// in a `u64`.
fn charge(gas: u64, count: u64, price: u64) -> Result<u64, TxError> {
    if price != 0 && (u64::MAX - gas) / price < count {
        debug!(target: "kaia_tx::gas", gas, count, price, "Intrinsic gas overflow");
        return Err(TxError::GasOverflow);
    }
    Ok(gas + count * price)
}

/// Splits a payload into its count of non-zero and zero bytes.
fn count_bytes(data: &[u8]) -> (u64, u64) {
    let zero = data.iter().filter(|byte| **byte == 0).count() as u64;
    (data.len() as u64 - zero, zero)
}

/// Adds the payload gas of Kaia typed transactions, and of Ethereum transactions since
/// `ISTANBUL`, to `gas`.
///
/// Every payload byte costs a flat [`TX_DATA_GAS`](genesis::TX_DATA_GAS) until `PRAGUE`, and
/// 16 or 4 gas for non-zero or zero bytes afterwards. A contract creation additionally pays
/// [`INIT_CODE_WORD_GAS`](shanghai::INIT_CODE_WORD_GAS) per initcode word since `SHANGHAI`.
pub fn intrinsic_gas_payload(
    gas: u64,
    data: &[u8],
    is_contract_creation: bool,
    rules: &Rules,
) -> Result<u64, TxError> {
    let mut gas = gas;
    if !data.is_empty() {
        let (non_zero, zero) = count_bytes(data);
        let (non_zero_gas, zero_gas) = if rules.is_prague {
            (istanbul::TX_DATA_NON_ZERO_GAS_EIP2028, genesis::TX_DATA_ZERO_GAS)
        } else {
            (genesis::TX_DATA_GAS, genesis::TX_DATA_GAS)
        };
        gas = charge(gas, non_zero, non_zero_gas)?;
        gas = charge(gas, zero, zero_gas)?;
    }

    if is_contract_creation && rules.is_shanghai {
        gas = charge(gas, word_count(data.len() as u64), shanghai::INIT_CODE_WORD_GAS)?;
    }
    Ok(gas)
}

/// Adds the payload gas of legacy transactions before `ISTANBUL` to `gas`: 68 per non-zero byte
/// and 4 per zero byte.
pub fn intrinsic_gas_payload_legacy(gas: u64, data: &[u8]) -> Result<u64, TxError> {
    let (non_zero, zero) = count_bytes(data);
    let gas = charge(gas, non_zero, genesis::TX_DATA_NON_ZERO_GAS_FRONTIER)?;
    charge(gas, zero, genesis::TX_DATA_ZERO_GAS)
}

/// Computes the intrinsic gas of an Ethereum (legacy or typed) transaction.
///
/// The base cost depends on whether a contract is created. The payload is priced with
/// [`intrinsic_gas_payload`] since `ISTANBUL` and with [`intrinsic_gas_payload_legacy`] before.
/// Access list entries and authorizations are charged per entry, duplicates included.
pub fn intrinsic_gas(
    data: &[u8],
    access_list: &AccessList,
    authorization_list: &[SignedAuthorization],
    is_contract_creation: bool,
    rules: &Rules,
) -> Result<u64, TxError> {
    let base = if is_contract_creation {
        genesis::TX_GAS_CONTRACT_CREATION
    } else {
        genesis::TX_GAS
    };

    let mut gas = if rules.is_istanbul {
        intrinsic_gas_payload(base, data, is_contract_creation, rules)?
    } else {
        intrinsic_gas_payload_legacy(base, data)?
    };

    let storage_keys: usize = access_list.0.iter().map(|item| item.storage_keys.len()).sum();
    gas = charge(gas, access_list.0.len() as u64, eth_tx_type::TX_ACCESS_LIST_ADDRESS_GAS)?;
    gas = charge(gas, storage_keys as u64, eth_tx_type::TX_ACCESS_LIST_STORAGE_KEY_GAS)?;
    gas = charge(gas, authorization_list.len() as u64, prague::CALL_NEW_ACCOUNT_GAS)?;

    trace!(target: "kaia_tx::gas", gas, data_len = data.len(), "Computed intrinsic gas");
    Ok(gas)
}

/// Returns the fixed cost of a transaction type: the base cost of its family plus the fee
/// delegation surcharge of its sub-type.
pub fn tx_type_gas(tx_type: TxType) -> Result<u64, TxError> {
    if tx_type.is_ethereum() {
        return match tx_type {
            TxType::LEGACY
            | TxType::ETHEREUM_ACCESS_LIST
            | TxType::ETHEREUM_DYNAMIC_FEE
            | TxType::ETHEREUM_SET_CODE => Ok(genesis::TX_GAS),
            _ => Err(TxError::UnknownGasSchedule(tx_type)),
        };
    }

    let base = match tx_type.family() {
        TxType::VALUE_TRANSFER | TxType::VALUE_TRANSFER_MEMO => genesis::TX_GAS_VALUE_TRANSFER,
        TxType::ACCOUNT_CREATION if tx_type.is_account_creation() => {
            return Ok(genesis::TX_GAS_ACCOUNT_CREATION)
        }
        TxType::ACCOUNT_UPDATE => genesis::TX_GAS_ACCOUNT_UPDATE,
        TxType::SMART_CONTRACT_DEPLOY => genesis::TX_GAS_CONTRACT_CREATION,
        TxType::SMART_CONTRACT_EXECUTION => genesis::TX_GAS_CONTRACT_EXECUTION,
        TxType::CANCEL => genesis::TX_GAS_CANCEL,
        TxType::CHAIN_DATA_ANCHORING => genesis::TX_CHAIN_DATA_ANCHORING_GAS,
        _ => return Err(TxError::UnknownGasSchedule(tx_type)),
    };
    let surcharge = match tx_type.get() - tx_type.family().get() {
        0 => 0,
        1 => genesis::TX_GAS_FEE_DELEGATED,
        2 => genesis::TX_GAS_FEE_DELEGATED_WITH_RATIO,
        _ => return Err(TxError::UnknownGasSchedule(tx_type)),
    };
    Ok(base + surcharge)
}

/// Returns the fixed cost of a transaction type registering `account_key`, optionally under a
/// human-readable address.
pub fn tx_type_gas_with_account_key(
    tx_type: TxType,
    account_key: Option<&AccountKey>,
    human_readable: bool,
) -> Result<u64, TxError> {
    let mut gas = tx_type_gas(tx_type)?;
    if let Some(key) = account_key {
        gas = gas.checked_add(key.account_creation_gas()?).ok_or(TxError::GasOverflow)?;
    }
    if human_readable {
        gas = gas.checked_add(genesis::TX_GAS_HUMAN_READABLE).ok_or(TxError::GasOverflow)?;
    }
    Ok(gas)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::KaiaSpecId;

    #[test]
    fn test_word_count() {
        assert_eq!(word_count(0), 0);
        assert_eq!(word_count(1), 1);
        assert_eq!(word_count(32), 1);
        assert_eq!(word_count(33), 2);
        assert_eq!(word_count(u64::MAX - 31), (u64::MAX - 31).div_ceil(32));
        assert_eq!(word_count(u64::MAX - 30), u64::MAX / 32 + 1);
        assert_eq!(word_count(u64::MAX), u64::MAX / 32 + 1);
    }

    #[test]
    fn test_payload_flat_before_prague() {
        let rules = Rules::from_spec(KaiaSpecId::KAIA);
        let data = [0u8, 0, 1, 2];
        assert_eq!(intrinsic_gas_payload(0, &data, false, &rules), Ok(400));
    }

    #[test]
    fn test_payload_since_prague() {
        let rules = Rules::from_spec(KaiaSpecId::PRAGUE);
        let data = [0u8, 0, 1, 2];
        assert_eq!(intrinsic_gas_payload(0, &data, false, &rules), Ok(2 * 4 + 2 * 16));
    }

    #[test]
    fn test_payload_initcode_words() {
        let data = [1u8; 33];
        let before = Rules::from_spec(KaiaSpecId::KORE);
        let after = Rules::from_spec(KaiaSpecId::SHANGHAI);
        assert_eq!(intrinsic_gas_payload(0, &data, true, &before), Ok(3300));
        assert_eq!(intrinsic_gas_payload(0, &data, true, &after), Ok(3300 + 2 * 2));
        assert_eq!(intrinsic_gas_payload(0, &data, false, &after), Ok(3300));
        // An empty initcode costs no words.
        assert_eq!(intrinsic_gas_payload(7, &[], true, &after), Ok(7));
    }

    #[test]
    fn test_payload_legacy() {
        assert_eq!(intrinsic_gas_payload_legacy(21_000, &[0, 1]), Ok(21_000 + 4 + 68));
    }

    #[test]
    fn test_payload_overflow() {
        let rules = Rules::from_spec(KaiaSpecId::PRAGUE);
        assert_eq!(
            intrinsic_gas_payload(u64::MAX - 10, &[1], false, &rules),
            Err(TxError::GasOverflow)
        );
        assert_eq!(intrinsic_gas_payload(u64::MAX - 16, &[1], false, &rules), Ok(u64::MAX));
        assert_eq!(intrinsic_gas_payload_legacy(u64::MAX, &[0]), Err(TxError::GasOverflow));
    }

    #[test]
    fn test_tx_type_gas_table() {
        assert_eq!(tx_type_gas(TxType::LEGACY), Ok(21_000));
        assert_eq!(tx_type_gas(TxType::VALUE_TRANSFER), Ok(21_000));
        assert_eq!(tx_type_gas(TxType::FEE_DELEGATED_VALUE_TRANSFER_MEMO), Ok(31_000));
        assert_eq!(tx_type_gas(TxType::FEE_DELEGATED_CANCEL_WITH_RATIO), Ok(36_000));
        assert_eq!(tx_type_gas(TxType::SMART_CONTRACT_DEPLOY), Ok(53_000));
        assert_eq!(tx_type_gas(TxType::FEE_DELEGATED_SMART_CONTRACT_DEPLOY_WITH_RATIO), Ok(68_000));
        assert_eq!(tx_type_gas(TxType::ACCOUNT_CREATION), Ok(21_000));
        assert_eq!(tx_type_gas(TxType::ETHEREUM_SET_CODE), Ok(21_000));
    }

    #[test]
    fn test_tx_type_gas_unknown() {
        for tag in [TxType::BATCH, TxType::ETHEREUM_BLOB, TxType::new(0x19), TxType::new(0x0b)] {
            assert_eq!(tx_type_gas(tag), Err(TxError::UnknownGasSchedule(tag)));
        }
        assert!(tx_type_gas(TxType::new(0x01)).unwrap_err().is_internal());
    }

    #[test]
    fn test_tx_type_gas_with_account_key() {
        let key = AccountKey::Public([2u8; 33].into());
        assert_eq!(
            tx_type_gas_with_account_key(TxType::ACCOUNT_UPDATE, Some(&key), false),
            Ok(41_000)
        );
        assert_eq!(
            tx_type_gas_with_account_key(TxType::ACCOUNT_CREATION, Some(&key), true),
            Ok(21_000 + 20_000 + 4_000_000)
        );
        assert_eq!(tx_type_gas_with_account_key(TxType::CANCEL, None, false), Ok(21_000));
    }
}
