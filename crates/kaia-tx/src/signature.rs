use alloy_primitives::U256;
use alloy_rlp::{BufMut, Encodable, RlpEncodable};
use derive_more::{Deref, From, IntoIterator};
use serde::{Deserialize, Serialize};

/// One ECDSA signature in its raw `(v, r, s)` form.
///
/// `v` keeps whatever value the signer produced (for example an EIP-155 adjusted recovery id);
/// recovery is left to the caller.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, RlpEncodable, Serialize, Deserialize,
)]
pub struct TxSignature {
    /// Recovery id.
    pub v: U256,
    /// `r` value.
    pub r: U256,
    /// `s` value.
    pub s: U256,
}

impl TxSignature {
    /// Creates a signature from its raw values.
    pub const fn new(v: U256, r: U256, s: U256) -> Self {
        Self { v, r, s }
    }
}

/// The signatures of one signer. Kaia typed transactions carry a list so that accounts with a
/// multisig key can sign them.
#[derive(
    Clone,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Deref,
    From,
    IntoIterator,
    Serialize,
    Deserialize,
)]
#[serde(transparent)]
pub struct TxSignatures(#[into_iterator(owned, ref)] Vec<TxSignature>);

impl TxSignatures {
    /// Creates a list holding a single signature.
    pub fn single(signature: TxSignature) -> Self {
        Self(vec![signature])
    }
}

impl Default for TxSignatures {
    /// The list carried by transactions that are not signed yet: a single signature with every
    /// value set to zero.
    fn default() -> Self {
        Self::single(TxSignature::default())
    }
}

impl FromIterator<TxSignature> for TxSignatures {
    fn from_iter<I: IntoIterator<Item = TxSignature>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Encodable for TxSignatures {
    fn encode(&self, out: &mut dyn BufMut) {
        self.0.encode(out);
    }

    fn length(&self) -> usize {
        self.0.length()
    }
}
