use std::{cmp, mem};

use eth2_core::consts::ExpConst;
use helper_functions::{
    beacon_state_accessors::{get_current_epoch, get_randao_mix},
    crypto::hash_tree_root,
};
use ssz_types::VariableList;
use typenum::marker_traits::Unsigned;
use types::{
    beacon_state::BeaconState,
    config::Config,
    primitives::{Epoch, Gwei},
    types::HistoricalBatch,
};

use crate::error::Error;

/// Eth1 voting period reset, effective-balance hysteresis, slashings-vector
/// rotation, randao mix carry-forward, historical root accumulation, and the
/// current/previous attestation buffer swap that close out the epoch.
pub fn process_final_updates<T: Config + ExpConst>(state: &mut BeaconState<T>) -> Result<(), Error> {
    let current_epoch = get_current_epoch(state);
    let next_epoch: Epoch = current_epoch + 1;

    if (state.slot + 1) % T::SlotsPerEth1VotingPeriod::to_u64() == 0 {
        state.eth1_data_votes = VariableList::from(vec![]);
    }

    let increment = T::effective_balance_increment();
    let hysteresis_increment = increment / T::hysteresis_quotient();
    let downward_threshold = hysteresis_increment * T::hysteresis_downward_multiplier();
    let upward_threshold = hysteresis_increment * T::hysteresis_upward_multiplier();
    for (index, validator) in state.validators.iter_mut().enumerate() {
        let balance = state.balances[index];
        if balance + downward_threshold < validator.effective_balance
            || validator.effective_balance + upward_threshold < balance
        {
            validator.effective_balance =
                cmp::min(balance - balance % increment, T::max_effective_balance());
        }
    }

    state.slashings[(next_epoch % T::EpochsPerSlashingsVector::to_u64()) as usize] = 0 as Gwei;

    state.randao_mixes[(next_epoch % T::EpochsPerHistoricalVector::to_u64()) as usize] =
        get_randao_mix(state, current_epoch);

    if next_epoch % (T::SlotsPerHistoricalRoot::to_u64() / T::SlotsPerEpoch::to_u64()) == 0 {
        let historical_batch = HistoricalBatch::<T> {
            block_roots: state.block_roots.clone(),
            state_roots: state.state_roots.clone(),
        };
        state
            .historical_roots
            .push(hash_tree_root(&historical_batch))
            .map_err(|_| Error::IndexOutOfRange)?;
    }

    state.previous_epoch_attestations =
        mem::replace(&mut state.current_epoch_attestations, VariableList::from(vec![]));

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use types::config::MainnetConfig;

    #[test]
    fn rotates_current_attestations_into_previous() {
        let mut bs: BeaconState<MainnetConfig> = BeaconState {
            slot: 31,
            ..BeaconState::default()
        };
        bs.current_epoch_attestations
            .push(Default::default())
            .unwrap();

        process_final_updates(&mut bs).unwrap();
        assert_eq!(bs.previous_epoch_attestations.len(), 1);
        assert_eq!(bs.current_epoch_attestations.len(), 0);
    }

    #[test]
    fn raises_effective_balance_only_past_the_upward_hysteresis_margin() {
        let mut bs: BeaconState<MainnetConfig> = BeaconState {
            slot: 0,
            ..BeaconState::default()
        };
        bs.validators
            .push(types::types::Validator {
                effective_balance: MainnetConfig::max_effective_balance()
                    - 2 * MainnetConfig::effective_balance_increment(),
                ..types::types::Validator::default()
            })
            .unwrap();
        bs.balances.push(MainnetConfig::max_effective_balance()).unwrap();

        process_final_updates(&mut bs).unwrap();
        assert_eq!(
            bs.validators[0].effective_balance,
            MainnetConfig::max_effective_balance()
        );
    }

    #[test]
    fn leaves_effective_balance_unchanged_within_the_upward_hysteresis_margin() {
        let increment = MainnetConfig::effective_balance_increment();
        let effective_balance = MainnetConfig::max_effective_balance() - increment;
        let mut bs: BeaconState<MainnetConfig> = BeaconState {
            slot: 0,
            ..BeaconState::default()
        };
        bs.validators
            .push(types::types::Validator {
                effective_balance,
                ..types::types::Validator::default()
            })
            .unwrap();
        // One increment above effective_balance is within the upward margin
        // (1.25 increments on mainnet), so it must not move yet.
        bs.balances.push(effective_balance + increment).unwrap();

        process_final_updates(&mut bs).unwrap();
        assert_eq!(bs.validators[0].effective_balance, effective_balance);
    }

    #[test]
    fn leaves_effective_balance_unchanged_within_the_downward_hysteresis_margin() {
        let effective_balance = MainnetConfig::max_effective_balance();
        let mut bs: BeaconState<MainnetConfig> = BeaconState {
            slot: 0,
            ..BeaconState::default()
        };
        bs.validators
            .push(types::types::Validator {
                effective_balance,
                ..types::types::Validator::default()
            })
            .unwrap();
        // A tenth of an increment below effective_balance is within the
        // downward margin (a quarter increment on mainnet), so it must not
        // move yet.
        let gap = MainnetConfig::effective_balance_increment() / 10;
        bs.balances.push(effective_balance - gap).unwrap();

        process_final_updates(&mut bs).unwrap();
        assert_eq!(bs.validators[0].effective_balance, effective_balance);
    }

    #[test]
    fn lowers_effective_balance_past_the_downward_hysteresis_margin() {
        let increment = MainnetConfig::effective_balance_increment();
        let effective_balance = MainnetConfig::max_effective_balance();
        let mut bs: BeaconState<MainnetConfig> = BeaconState {
            slot: 0,
            ..BeaconState::default()
        };
        bs.validators
            .push(types::types::Validator {
                effective_balance,
                ..types::types::Validator::default()
            })
            .unwrap();
        let balance = effective_balance - 2 * increment;
        bs.balances.push(balance).unwrap();

        process_final_updates(&mut bs).unwrap();
        assert_eq!(bs.validators[0].effective_balance, balance);
    }
}
