//! Kaia account keys carried by account update and account creation transactions.

use alloy_primitives::{Bytes, FixedBytes};
use alloy_rlp::{BufMut, Encodable, Header, RlpEncodable, EMPTY_STRING_CODE};

use crate::{constants::genesis::TX_ACCOUNT_CREATION_GAS_PER_KEY, TxError};

/// A SEC1 compressed secp256k1 public key.
pub type CompressedPublicKey = FixedBytes<33>;

/// Numeric identifiers of the account key variants, written in front of the key body.
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AccountKeyType {
    /// [`AccountKey::Nil`].
    Nil = 0,
    /// [`AccountKey::Legacy`].
    Legacy = 1,
    /// [`AccountKey::Public`].
    Public = 2,
    /// [`AccountKey::Fail`].
    Fail = 3,
    /// [`AccountKey::WeightedMultiSig`].
    WeightedMultiSig = 4,
    /// [`AccountKey::RoleBased`].
    RoleBased = 5,
}

/// One member key of a weighted multisig key.
#[derive(Clone, Debug, PartialEq, Eq, Hash, RlpEncodable)]
pub struct WeightedPublicKey {
    /// Weight contributed by a signature of this key.
    pub weight: u32,
    /// The public key.
    pub key: CompressedPublicKey,
}

/// A multisig key: a transaction is authorized once the weights of its signers reach the
/// threshold.
#[derive(Clone, Debug, PartialEq, Eq, Hash, RlpEncodable)]
pub struct WeightedMultiSigKey {
    /// Minimum total weight of the signers.
    pub threshold: u32,
    /// The member keys.
    pub keys: Vec<WeightedPublicKey>,
}

/// The key controlling a Kaia account.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum AccountKey {
    /// No key. Used by account updates that leave a role untouched.
    #[default]
    Nil,
    /// The account is controlled by the private key its address is derived from.
    Legacy,
    /// A single public key.
    Public(CompressedPublicKey),
    /// Every signature fails to validate.
    Fail,
    /// A weighted multisig key.
    WeightedMultiSig(WeightedMultiSigKey),
    /// One key per role: transaction, account update and fee payer.
    RoleBased(Vec<AccountKey>),
}

impl AccountKey {
    /// Returns the numeric identifier of the key variant.
    pub const fn key_type(&self) -> AccountKeyType {
        match self {
            Self::Nil => AccountKeyType::Nil,
            Self::Legacy => AccountKeyType::Legacy,
            Self::Public(_) => AccountKeyType::Public,
            Self::Fail => AccountKeyType::Fail,
            Self::WeightedMultiSig(_) => AccountKeyType::WeightedMultiSig,
            Self::RoleBased(_) => AccountKeyType::RoleBased,
        }
    }

    /// Serializes the key into its canonical byte form, i.e. the RLP encoding of the key type
    /// followed by the RLP encoding of the key body. The nil key serializes as `0x80`.
    pub fn serialize(&self) -> Bytes {
        let mut out = Vec::new();
        match self {
            Self::Nil => {
                out.put_u8(EMPTY_STRING_CODE);
                return out.into();
            }
            Self::Legacy | Self::Fail => {
                (self.key_type() as u8).encode(&mut out);
                Header { list: true, payload_length: 0 }.encode(&mut out);
            }
            Self::Public(key) => {
                (self.key_type() as u8).encode(&mut out);
                key.encode(&mut out);
            }
            Self::WeightedMultiSig(key) => {
                (self.key_type() as u8).encode(&mut out);
                key.encode(&mut out);
            }
            Self::RoleBased(keys) => {
                (self.key_type() as u8).encode(&mut out);
                keys.iter().map(Self::serialize).collect::<Vec<_>>().encode(&mut out);
            }
        }
        out.into()
    }

    /// Returns the gas charged for registering the key: a fixed amount per public key, summed
    /// over the roles of a role-based key.
    pub fn account_creation_gas(&self) -> Result<u64, TxError> {
        match self {
            Self::Nil | Self::Legacy | Self::Fail => Ok(0),
            Self::Public(_) => Ok(TX_ACCOUNT_CREATION_GAS_PER_KEY),
            Self::WeightedMultiSig(key) => (key.keys.len() as u64)
                .checked_mul(TX_ACCOUNT_CREATION_GAS_PER_KEY)
                .ok_or(TxError::GasOverflow),
            Self::RoleBased(keys) => keys.iter().try_fold(0u64, |gas, key| {
                gas.checked_add(key.account_creation_gas()?).ok_or(TxError::GasOverflow)
            }),
        }
    }
}

impl Encodable for AccountKey {
    /// Account keys are embedded in transactions as an RLP string of their serialized form.
    fn encode(&self, out: &mut dyn BufMut) {
        self.serialize().encode(out);
    }

    fn length(&self) -> usize {
        self.serialize().length()
    }
}
