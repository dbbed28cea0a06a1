use alloy_hardforks::{hardfork, ForkCondition};
use alloy_primitives::{map::HashMap, BlockNumber};
use auto_impl::auto_impl;
use tracing::trace;

use crate::{constants, KaiaSpecId};

hardfork! {
    /// The name of Kaia hardforks that affect the transaction layer.
    #[derive(serde::Serialize, serde::Deserialize)]
    KaiaHardfork {
        /// Ethereum transactions switch to the flat per-byte payload price of Kaia types.
        Istanbul,
        /// London compatible EVM changes.
        London,
        /// Ethereum typed transactions (access list, dynamic fee).
        EthTxType,
        /// Dynamic base fee.
        Magma,
        /// The Kore hardfork.
        Kore,
        /// Initcode word gas.
        Shanghai,
        /// Cancun compatible EVM changes and the raised computation cost limit.
        Cancun,
        /// The Kaia hardfork.
        Kaia,
        /// Code delegation and the 16/4 non-zero/zero payload byte price.
        Prague,
    }
}

impl KaiaHardfork {
    /// The hardforks in activation order.
    pub const ALL: [Self; 9] = [
        Self::Istanbul,
        Self::London,
        Self::EthTxType,
        Self::Magma,
        Self::Kore,
        Self::Shanghai,
        Self::Cancun,
        Self::Kaia,
        Self::Prague,
    ];

    /// Returns the [`KaiaSpecId`] introduced by this hardfork.
    pub const fn spec_id(self) -> KaiaSpecId {
        match self {
            Self::Istanbul => KaiaSpecId::ISTANBUL,
            Self::London => KaiaSpecId::LONDON,
            Self::EthTxType => KaiaSpecId::ETH_TX_TYPE,
            Self::Magma => KaiaSpecId::MAGMA,
            Self::Kore => KaiaSpecId::KORE,
            Self::Shanghai => KaiaSpecId::SHANGHAI,
            Self::Cancun => KaiaSpecId::CANCUN,
            Self::Kaia => KaiaSpecId::KAIA,
            Self::Prague => KaiaSpecId::PRAGUE,
        }
    }
}

/// Read access to the activation schedule of [`KaiaHardfork`]s.
#[auto_impl(&, Box, Arc)]
pub trait KaiaHardforks {
    /// Retrieves [`ForkCondition`] by a [`KaiaHardfork`]. If `fork` is not present, returns
    /// [`ForkCondition::Never`].
    fn kaia_fork_activation(&self, fork: KaiaHardfork) -> ForkCondition;

    /// Returns `true` if the given [`KaiaHardfork`] is active at the given block number.
    fn is_kaia_fork_active_at_block(&self, fork: KaiaHardfork, block: BlockNumber) -> bool {
        self.kaia_fork_activation(fork).active_at_block(block)
    }

    /// Returns the latest [`KaiaSpecId`] whose hardfork is active at the given block number.
    fn spec_id_at_block(&self, block: BlockNumber) -> KaiaSpecId {
        KaiaHardfork::ALL
            .iter()
            .rev()
            .find(|fork| self.is_kaia_fork_active_at_block(**fork, block))
            .map_or(KaiaSpecId::GENESIS, |fork| fork.spec_id())
    }
}

/// Activation schedule of the Kaia hardforks plus chain-level knobs of the transaction layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KaiaHardforkConfig {
    hardforks: HashMap<KaiaHardfork, ForkCondition>,
    computation_cost_limit_override: Option<u64>,
}

impl Default for KaiaHardforkConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl KaiaHardforkConfig {
    /// Creates a new hardfork configuration with every hardfork active from genesis.
    pub fn new() -> Self {
        Self {
            hardforks: KaiaHardfork::ALL
                .iter()
                .map(|fork| (*fork, ForkCondition::Block(0)))
                .collect(),
            computation_cost_limit_override: None,
        }
    }

    /// Creates a configuration where no hardfork is ever activated.
    pub fn genesis_only() -> Self {
        Self {
            hardforks: KaiaHardfork::ALL
                .iter()
                .map(|fork| (*fork, ForkCondition::Never))
                .collect(),
            computation_cost_limit_override: None,
        }
    }

    /// Inserts a new hardfork into the configuration. If the hardfork is already present, it will
    /// be overwritten.
    pub fn insert(&mut self, hardfork: KaiaHardfork, condition: ForkCondition) {
        self.hardforks.insert(hardfork, condition);
    }

    /// Builder variant of [`Self::insert`].
    pub fn with(mut self, hardfork: KaiaHardfork, condition: ForkCondition) -> Self {
        self.insert(hardfork, condition);
        self
    }

    /// Overrides the opcode computation cost limit of every block, regardless of the active
    /// hardforks.
    pub const fn with_computation_cost_limit_override(mut self, limit: u64) -> Self {
        self.computation_cost_limit_override = Some(limit);
        self
    }

    /// Returns the computation cost limit override, if configured.
    pub const fn computation_cost_limit_override(&self) -> Option<u64> {
        self.computation_cost_limit_override
    }

    /// Resolves the [`Rules`] in effect at the given block number.
    pub fn rules(&self, block: BlockNumber) -> Rules {
        let active = |fork| self.is_kaia_fork_active_at_block(fork, block);
        let is_cancun = active(KaiaHardfork::Cancun);
        let computation_cost_limit = self
            .computation_cost_limit_override
            .unwrap_or_else(|| default_computation_cost_limit(is_cancun));
        let rules = Rules {
            is_istanbul: active(KaiaHardfork::Istanbul),
            is_london: active(KaiaHardfork::London),
            is_eth_tx_type: active(KaiaHardfork::EthTxType),
            is_magma: active(KaiaHardfork::Magma),
            is_kore: active(KaiaHardfork::Kore),
            is_shanghai: active(KaiaHardfork::Shanghai),
            is_cancun,
            is_kaia: active(KaiaHardfork::Kaia),
            is_prague: active(KaiaHardfork::Prague),
            computation_cost_limit,
        };
        trace!(target: "kaia_tx::rules", block, ?rules, "Resolved rules");
        rules
    }
}

impl KaiaHardforks for KaiaHardforkConfig {
    fn kaia_fork_activation(&self, fork: KaiaHardfork) -> ForkCondition {
        self.hardforks.get(&fork).copied().unwrap_or(ForkCondition::Never)
    }
}

/// The protocol rules in effect for one block height. Immutable once resolved.
///
/// Every flag is resolved from its own activation condition, so a schedule that activates a
/// later hardfork before an earlier one is represented faithfully.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rules {
    /// Ethereum transactions use the flat per-byte payload price.
    pub is_istanbul: bool,
    /// London compatible EVM changes.
    pub is_london: bool,
    /// Ethereum typed transactions are accepted.
    pub is_eth_tx_type: bool,
    /// Dynamic base fee.
    pub is_magma: bool,
    /// The Kore hardfork.
    pub is_kore: bool,
    /// Initcode word gas.
    pub is_shanghai: bool,
    /// Cancun compatible EVM changes.
    pub is_cancun: bool,
    /// The Kaia hardfork.
    pub is_kaia: bool,
    /// Code delegation and zero/non-zero payload pricing of Kaia typed transactions.
    pub is_prague: bool,
    /// Opcode computation cost limit per transaction.
    pub computation_cost_limit: u64,
}

impl Default for Rules {
    fn default() -> Self {
        Self::genesis()
    }
}

impl Rules {
    /// Rules with no hardfork active.
    pub const fn genesis() -> Self {
        Self {
            is_istanbul: false,
            is_london: false,
            is_eth_tx_type: false,
            is_magma: false,
            is_kore: false,
            is_shanghai: false,
            is_cancun: false,
            is_kaia: false,
            is_prague: false,
            computation_cost_limit: constants::genesis::OPCODE_COMPUTATION_COST_LIMIT,
        }
    }

    /// Rules with every hardfork up to and including `spec` active.
    pub const fn from_spec(spec: KaiaSpecId) -> Self {
        let is_cancun = spec.is_enabled(KaiaSpecId::CANCUN);
        Self {
            is_istanbul: spec.is_enabled(KaiaSpecId::ISTANBUL),
            is_london: spec.is_enabled(KaiaSpecId::LONDON),
            is_eth_tx_type: spec.is_enabled(KaiaSpecId::ETH_TX_TYPE),
            is_magma: spec.is_enabled(KaiaSpecId::MAGMA),
            is_kore: spec.is_enabled(KaiaSpecId::KORE),
            is_shanghai: spec.is_enabled(KaiaSpecId::SHANGHAI),
            is_cancun,
            is_kaia: spec.is_enabled(KaiaSpecId::KAIA),
            is_prague: spec.is_enabled(KaiaSpecId::PRAGUE),
            computation_cost_limit: default_computation_cost_limit(is_cancun),
        }
    }
}

const fn default_computation_cost_limit(is_cancun: bool) -> u64 {
    if is_cancun {
        constants::cancun::OPCODE_COMPUTATION_COST_LIMIT
    } else {
        constants::genesis::OPCODE_COMPUTATION_COST_LIMIT
    }
}

impl From<KaiaSpecId> for Rules {
    fn from(spec: KaiaSpecId) -> Self {
        Self::from_spec(spec)
    }
}
