//! Definitions of the Kaia protocol versions (`SpecId`).

use core::{
    fmt::{self, Display},
    str::FromStr,
};
pub use revm::primitives::hardfork::{SpecId as EthSpecId, UnknownHardfork};
use serde::{Deserialize, Serialize};

/// Kaia spec id, defining the cumulative versions of the Kaia protocol.
///
/// Each Kaia version inherits the EVM behavior of an Ethereum version and customizes the
/// transaction layer on top of it. The corresponding relations are as follows:
/// - [`KaiaSpecId::GENESIS`] -> [`EthSpecId::PETERSBURG`]
/// - [`KaiaSpecId::ISTANBUL`] -> [`EthSpecId::ISTANBUL`]
/// - [`KaiaSpecId::LONDON`], [`KaiaSpecId::ETH_TX_TYPE`], [`KaiaSpecId::MAGMA`] ->
///   [`EthSpecId::LONDON`]
/// - [`KaiaSpecId::KORE`] -> [`EthSpecId::MERGE`]
/// - [`KaiaSpecId::SHANGHAI`] -> [`EthSpecId::SHANGHAI`]
/// - [`KaiaSpecId::CANCUN`], [`KaiaSpecId::KAIA`] -> [`EthSpecId::CANCUN`]
/// - [`KaiaSpecId::PRAGUE`] -> [`EthSpecId::PRAGUE`]
#[repr(u8)]
#[derive(
    Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[allow(non_camel_case_types, clippy::upper_case_acronyms, missing_docs)]
#[non_exhaustive]
pub enum KaiaSpecId {
    /// The protocol version when no Kaia hardfork is enabled.
    GENESIS,
    /// The protocol version for the *Istanbul* compatible hardfork. Ethereum transactions pay the
    /// flat per-byte payload price.
    ISTANBUL,
    /// The protocol version for the *London* compatible hardfork.
    LONDON,
    /// The protocol version enabling the Ethereum typed transactions.
    ETH_TX_TYPE,
    /// The protocol version for the *Magma* hardfork, introducing the dynamic base fee.
    MAGMA,
    /// The protocol version for the *Kore* hardfork.
    KORE,
    /// The protocol version for the *Shanghai* compatible hardfork. Initcode words are
    /// charged.
    SHANGHAI,
    /// The protocol version for the *Cancun* compatible hardfork.
    CANCUN,
    /// The protocol version for the *Kaia* hardfork.
    KAIA,
    /// The protocol version for the *Prague* compatible hardfork, enabling code delegation.
    #[default]
    PRAGUE,
}

/// String identifiers for Kaia protocol versions.
#[allow(missing_docs)]
pub mod name {
    pub const GENESIS: &str = "Genesis";
    pub const ISTANBUL: &str = "Istanbul";
    pub const LONDON: &str = "London";
    pub const ETH_TX_TYPE: &str = "EthTxType";
    pub const MAGMA: &str = "Magma";
    pub const KORE: &str = "Kore";
    pub const SHANGHAI: &str = "Shanghai";
    pub const CANCUN: &str = "Cancun";
    pub const KAIA: &str = "Kaia";
    pub const PRAGUE: &str = "Prague";
}

impl KaiaSpecId {
    /// Converts the [`KaiaSpecId`] into its corresponding [`EthSpecId`].
    pub const fn into_eth_spec(self) -> EthSpecId {
        match self {
            Self::GENESIS => EthSpecId::PETERSBURG,
            Self::ISTANBUL => EthSpecId::ISTANBUL,
            Self::LONDON | Self::ETH_TX_TYPE | Self::MAGMA => EthSpecId::LONDON,
            Self::KORE => EthSpecId::MERGE,
            Self::SHANGHAI => EthSpecId::SHANGHAI,
            Self::CANCUN | Self::KAIA => EthSpecId::CANCUN,
            Self::PRAGUE => EthSpecId::PRAGUE,
        }
    }

    /// Checks if one given [`KaiaSpecId`] is enabled in the current [`KaiaSpecId`].
    ///
    /// Protocol versions are backward compatible, so a lower version is always enabled in a
    /// higher version.
    pub const fn is_enabled(self, other: Self) -> bool {
        other as u8 <= self as u8
    }
}

impl From<KaiaSpecId> for &'static str {
    fn from(spec_id: KaiaSpecId) -> Self {
        match spec_id {
            KaiaSpecId::GENESIS => name::GENESIS,
            KaiaSpecId::ISTANBUL => name::ISTANBUL,
            KaiaSpecId::LONDON => name::LONDON,
            KaiaSpecId::ETH_TX_TYPE => name::ETH_TX_TYPE,
            KaiaSpecId::MAGMA => name::MAGMA,
            KaiaSpecId::KORE => name::KORE,
            KaiaSpecId::SHANGHAI => name::SHANGHAI,
            KaiaSpecId::CANCUN => name::CANCUN,
            KaiaSpecId::KAIA => name::KAIA,
            KaiaSpecId::PRAGUE => name::PRAGUE,
        }
    }
}

impl FromStr for KaiaSpecId {
    type Err = UnknownHardfork;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            name::GENESIS => Ok(Self::GENESIS),
            name::ISTANBUL => Ok(Self::ISTANBUL),
            name::LONDON => Ok(Self::LONDON),
            name::ETH_TX_TYPE => Ok(Self::ETH_TX_TYPE),
            name::MAGMA => Ok(Self::MAGMA),
            name::KORE => Ok(Self::KORE),
            name::SHANGHAI => Ok(Self::SHANGHAI),
            name::CANCUN => Ok(Self::CANCUN),
            name::KAIA => Ok(Self::KAIA),
            name::PRAGUE => Ok(Self::PRAGUE),
            _ => Err(UnknownHardfork),
        }
    }
}

impl From<KaiaSpecId> for EthSpecId {
    fn from(spec_id: KaiaSpecId) -> Self {
        spec_id.into_eth_spec()
    }
}

impl Display for KaiaSpecId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s: &'static str = (*self).into();
        write!(f, "{s}")
    }
}
