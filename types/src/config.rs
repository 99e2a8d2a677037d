use typenum::{U1, U1024, U128, U16, U16777216, U2048, U32, U64, U65536, U8, U8192};

use crate::primitives::{Epoch, Gwei, Slot};

/// Structural and timing parameters of the protocol, bounded as `typenum`
/// unsigned integers so that SSZ list/vector lengths are checked at compile
/// time (`VariableList<_, C::ValidatorRegistryLimit>`,
/// `FixedVector<_, C::EpochsPerHistoricalVector>`, ...). These are the
/// parameters that change the *shape* of a `BeaconState`; the economic
/// constants that tune incentives live in `core::consts::ExpConst` instead,
/// since they are tuned independently of the container layout.
pub trait Config: Default + Clone + PartialEq + Eq + core::fmt::Debug + Send + Sync + 'static {
    type SlotsPerEpoch: typenum::Unsigned + Clone + core::fmt::Debug + Send + Sync;
    type SlotsPerHistoricalRoot: typenum::Unsigned + Clone + core::fmt::Debug + Send + Sync;
    type SlotsPerEth1VotingPeriod: typenum::Unsigned + Clone + core::fmt::Debug + Send + Sync;
    type HistoricalRootsLimit: typenum::Unsigned + Clone + core::fmt::Debug + Send + Sync;
    type EpochsPerHistoricalVector: typenum::Unsigned + Clone + core::fmt::Debug + Send + Sync;
    type EpochsPerSlashingsVector: typenum::Unsigned + Clone + core::fmt::Debug + Send + Sync;
    type ValidatorRegistryLimit: typenum::Unsigned + Clone + core::fmt::Debug + Send + Sync;
    type MaxAttestationsPerEpoch: typenum::Unsigned + Clone + core::fmt::Debug + Send + Sync;
    type ShardCount: typenum::Unsigned + Clone + core::fmt::Debug + Send + Sync;
    type MaxValidatorsPerCommittee: typenum::Unsigned + Clone + core::fmt::Debug + Send + Sync;
    type MaxProposerSlashings: typenum::Unsigned + Clone + core::fmt::Debug + Send + Sync;
    type MaxAttesterSlashings: typenum::Unsigned + Clone + core::fmt::Debug + Send + Sync;
    type MaxAttestations: typenum::Unsigned + Clone + core::fmt::Debug + Send + Sync;
    type MaxDeposits: typenum::Unsigned + Clone + core::fmt::Debug + Send + Sync;
    type MaxVoluntaryExits: typenum::Unsigned + Clone + core::fmt::Debug + Send + Sync;

    fn genesis_epoch() -> Epoch {
        0
    }

    fn genesis_slot() -> Slot {
        0
    }

    fn far_future_epoch() -> Epoch {
        u64::max_value()
    }

    fn max_effective_balance() -> Gwei;
    fn ejection_balance() -> Gwei;
    fn effective_balance_increment() -> Gwei;
    fn min_per_epoch_churn_limit() -> u64;
    fn churn_limit_quotient() -> u64;
    fn activation_exit_delay() -> Epoch;
    fn min_validator_withdrawability_delay() -> Epoch;
    fn epochs_per_eth1_voting_period() -> Epoch;
    fn hysteresis_quotient() -> u64;
    fn hysteresis_downward_multiplier() -> u64;
    fn hysteresis_upward_multiplier() -> u64;
}

#[derive(Default, Clone, PartialEq, Eq, Debug)]
pub struct MainnetConfig;

impl Config for MainnetConfig {
    type SlotsPerEpoch = U32;
    type SlotsPerHistoricalRoot = U8192;
    type SlotsPerEth1VotingPeriod = U2048;
    type HistoricalRootsLimit = U16777216;
    type EpochsPerHistoricalVector = U65536;
    type EpochsPerSlashingsVector = U8192;
    type ValidatorRegistryLimit = U16777216;
    type MaxAttestationsPerEpoch = U2048;
    type ShardCount = U1024;
    type MaxValidatorsPerCommittee = U2048;
    type MaxProposerSlashings = U16;
    type MaxAttesterSlashings = U1;
    type MaxAttestations = U128;
    type MaxDeposits = U16;
    type MaxVoluntaryExits = U16;

    fn max_effective_balance() -> Gwei {
        32_000_000_000
    }
    fn ejection_balance() -> Gwei {
        16_000_000_000
    }
    fn effective_balance_increment() -> Gwei {
        1_000_000_000
    }
    fn min_per_epoch_churn_limit() -> u64 {
        4
    }
    fn churn_limit_quotient() -> u64 {
        65_536
    }
    fn activation_exit_delay() -> Epoch {
        4
    }
    fn min_validator_withdrawability_delay() -> Epoch {
        256
    }
    fn epochs_per_eth1_voting_period() -> Epoch {
        64
    }
    fn hysteresis_quotient() -> u64 {
        4
    }
    fn hysteresis_downward_multiplier() -> u64 {
        1
    }
    fn hysteresis_upward_multiplier() -> u64 {
        5
    }
}

#[derive(Default, Clone, PartialEq, Eq, Debug)]
pub struct MinimalConfig;

impl Config for MinimalConfig {
    type SlotsPerEpoch = U8;
    type SlotsPerHistoricalRoot = U64;
    type SlotsPerEth1VotingPeriod = U16;
    type HistoricalRootsLimit = U16777216;
    type EpochsPerHistoricalVector = U64;
    type EpochsPerSlashingsVector = U64;
    type ValidatorRegistryLimit = U16777216;
    type MaxAttestationsPerEpoch = U1024;
    type ShardCount = U8;
    type MaxValidatorsPerCommittee = U2048;
    type MaxProposerSlashings = U16;
    type MaxAttesterSlashings = U1;
    type MaxAttestations = U128;
    type MaxDeposits = U16;
    type MaxVoluntaryExits = U16;

    fn max_effective_balance() -> Gwei {
        32_000_000_000
    }
    fn ejection_balance() -> Gwei {
        16_000_000_000
    }
    fn effective_balance_increment() -> Gwei {
        1_000_000_000
    }
    fn min_per_epoch_churn_limit() -> u64 {
        4
    }
    fn churn_limit_quotient() -> u64 {
        65_536
    }
    fn activation_exit_delay() -> Epoch {
        4
    }
    fn min_validator_withdrawability_delay() -> Epoch {
        256
    }
    fn epochs_per_eth1_voting_period() -> Epoch {
        4
    }
    fn hysteresis_quotient() -> u64 {
        4
    }
    fn hysteresis_downward_multiplier() -> u64 {
        1
    }
    fn hysteresis_upward_multiplier() -> u64 {
        5
    }
}
