//! Constants that tend to move between spec revisions more often than the
//! structural, typenum-bounded parameters in `types::config::Config` — the
//! economic-incentive and shuffling knobs. Kept in their own trait so that
//! `transition_functions` can bound on exactly the constants it needs
//! (`T: Config + ExpConst`) without pulling in committee-shuffling machinery
//! that the epoch transition itself never calls.
use types::config::{MainnetConfig, MinimalConfig};
use types::primitives::{Epoch, Gwei};

pub trait ExpConst {
    fn base_rewards_per_epoch() -> u64;
    fn base_reward_factor() -> Gwei;
    fn proposer_reward_quotient() -> u64;
    fn min_epochs_to_inactivity_penalty() -> Epoch;
    fn inactivity_penalty_quotient() -> u64;
    fn shuffle_round_count() -> u64;
    fn min_seed_lookahead() -> Epoch;
}

impl ExpConst for MainnetConfig {
    fn base_rewards_per_epoch() -> u64 {
        4
    }
    fn base_reward_factor() -> Gwei {
        64
    }
    fn proposer_reward_quotient() -> u64 {
        8
    }
    fn min_epochs_to_inactivity_penalty() -> Epoch {
        4
    }
    fn inactivity_penalty_quotient() -> u64 {
        1 << 25
    }
    fn shuffle_round_count() -> u64 {
        90
    }
    fn min_seed_lookahead() -> Epoch {
        1
    }
}

impl ExpConst for MinimalConfig {
    fn base_rewards_per_epoch() -> u64 {
        4
    }
    fn base_reward_factor() -> Gwei {
        64
    }
    fn proposer_reward_quotient() -> u64 {
        8
    }
    fn min_epochs_to_inactivity_penalty() -> Epoch {
        4
    }
    fn inactivity_penalty_quotient() -> u64 {
        1 << 25
    }
    fn shuffle_round_count() -> u64 {
        10
    }
    fn min_seed_lookahead() -> Epoch {
        1
    }
}
