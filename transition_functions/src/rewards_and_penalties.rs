use eth2_core::consts::ExpConst;
use helper_functions::{
    beacon_state_accessors::{
        get_attesting_indices, get_current_epoch, get_previous_epoch, get_total_active_balance,
        get_total_balance,
    },
    beacon_state_mutators::{decrease_balance, increase_balance},
    math::integer_squareroot,
    predicates::is_active_validator,
};
use rayon::prelude::*;
use types::{
    beacon_state::BeaconState,
    config::Config,
    primitives::{Gwei, ValidatorIndex},
};

use crate::attestations::AttestableBlock;
use crate::error::Error;

/// Reward/penalty accounting for the epoch transition.
///
/// Named `StakeholderBlock` since the validators of a beacon state are its
/// economic stakeholders.
pub trait StakeholderBlock<T>
where
    T: Config + ExpConst,
{
    fn get_base_reward(&self, index: ValidatorIndex) -> Result<Gwei, Error>;
    fn get_attestation_deltas(&self) -> Result<(Vec<Gwei>, Vec<Gwei>), Error>;
    fn process_rewards_and_penalties(&mut self) -> Result<(), Error>;
}

impl<T> StakeholderBlock<T> for BeaconState<T>
where
    T: Config + ExpConst,
{
    fn get_base_reward(&self, index: ValidatorIndex) -> Result<Gwei, Error> {
        let total_balance = get_total_active_balance(self)?;
        let effective_balance = self.validators[index as usize].effective_balance;
        Ok(effective_balance * T::base_reward_factor()
            / integer_squareroot(total_balance)
            / T::base_rewards_per_epoch())
    }

    fn get_attestation_deltas(&self) -> Result<(Vec<Gwei>, Vec<Gwei>), Error> {
        let previous_epoch = get_previous_epoch(self);
        let total_balance = get_total_active_balance(self)?;
        let increment = T::effective_balance_increment();
        let total_balance_in_increments = total_balance / increment;

        let finality_delay = previous_epoch.saturating_sub(self.finalized_checkpoint.epoch);
        let in_inactivity_leak = finality_delay > T::min_epochs_to_inactivity_penalty();

        let mut rewards = vec![0; self.validators.len()];
        let mut penalties = vec![0; self.validators.len()];

        let eligible_validator_indices: Vec<ValidatorIndex> = self
            .validators
            .iter()
            .enumerate()
            .filter(|(_, v)| {
                is_active_validator(v, previous_epoch)
                    || (v.slashed && previous_epoch + 1 < v.withdrawable_epoch)
            })
            .map(|(index, _)| index as ValidatorIndex)
            .collect();

        // Micro-incentives for matching FFG source, FFG target, and head.
        let matching_source_attestations = self.get_matching_source_attestations(previous_epoch)?;
        let matching_target_attestations = self.get_matching_target_attestations(previous_epoch)?;
        let matching_head_attestations = self.get_matching_head_attestations(previous_epoch)?;

        let attestation_buckets = vec![
            &matching_source_attestations,
            &matching_target_attestations,
            &matching_head_attestations,
        ];
        for attestations in attestation_buckets {
            let unslashed_attesting_indices = self.get_unslashed_attesting_indices(attestations)?;
            let attesting_balance = get_total_balance(self, &unslashed_attesting_indices)?;
            let attesting_balance_in_increments = attesting_balance / increment;

            // The per-validator base-reward/penalty accumulation dominates the
            // cost of this phase; partitioning it across threads is safe
            // because each validator's delta only depends on read-only state.
            let deltas: Vec<(ValidatorIndex, i128)> = eligible_validator_indices
                .par_iter()
                .map(|&index| -> Result<(ValidatorIndex, i128), Error> {
                    let base_reward = self.get_base_reward(index)?;
                    if unslashed_attesting_indices.contains(&index) {
                        let delta = if in_inactivity_leak {
                            i128::from(base_reward)
                        } else {
                            (u128::from(base_reward) * u128::from(attesting_balance_in_increments)
                                / u128::from(total_balance_in_increments))
                                as i128
                        };
                        Ok((index, delta))
                    } else {
                        Ok((index, -i128::from(base_reward)))
                    }
                })
                .collect::<Result<Vec<_>, Error>>()?;

            for (index, delta) in deltas {
                if delta >= 0 {
                    rewards[index as usize] += delta as Gwei;
                } else {
                    penalties[index as usize] += (-delta) as Gwei;
                }
            }
        }

        // Proposer and inclusion-delay micro-rewards.
        let source_attesters = self.get_unslashed_attesting_indices(&matching_source_attestations)?;
        for index in source_attesters {
            let attestation = matching_source_attestations
                .iter()
                .filter(|attestation| {
                    get_attesting_indices(self, &attestation.data, &attestation.aggregation_bits)
                        .map(|indices| indices.contains(&index))
                        .unwrap_or(false)
                })
                .min_by_key(|attestation| attestation.inclusion_delay)
                .ok_or(Error::NoMatchingSourceAttestation)?;

            let base_reward = self.get_base_reward(index)?;
            let proposer_reward = base_reward / T::proposer_reward_quotient();
            rewards[attestation.proposer_index as usize] += proposer_reward;
            let max_attester_reward = base_reward - proposer_reward;
            rewards[index as usize] += max_attester_reward / attestation.inclusion_delay;
        }

        // Inactivity penalty.
        if in_inactivity_leak {
            let matching_target_attesting_indices =
                self.get_unslashed_attesting_indices(&matching_target_attestations)?;
            for &index in &eligible_validator_indices {
                let base_reward = self.get_base_reward(index)?;
                let proposer_reward = base_reward / T::proposer_reward_quotient();
                penalties[index as usize] +=
                    T::base_rewards_per_epoch() * base_reward - proposer_reward;
                if !matching_target_attesting_indices.contains(&index) {
                    let effective_balance = self.validators[index as usize].effective_balance;
                    let penalty = (u128::from(effective_balance) * u128::from(finality_delay)
                        / u128::from(T::inactivity_penalty_quotient())) as Gwei;
                    penalties[index as usize] += penalty;
                }
            }
        }

        Ok((rewards, penalties))
    }

    fn process_rewards_and_penalties(&mut self) -> Result<(), Error> {
        if get_current_epoch(self) == T::genesis_epoch() {
            return Ok(());
        }

        let (rewards, penalties) = self.get_attestation_deltas()?;
        for index in 0..self.validators.len() {
            increase_balance(self, index as u64, rewards[index]);
            decrease_balance(self, index as u64, penalties[index]);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ssz_types::VariableList;
    use types::{config::MainnetConfig, types::Validator};

    #[test]
    fn get_base_reward_matches_hand_computed_value() {
        let mut bs: BeaconState<MainnetConfig> = BeaconState::default();
        let val = Validator {
            effective_balance: MainnetConfig::effective_balance_increment() * 5,
            slashed: false,
            ..Validator::default()
        };
        bs.validators.push(val).unwrap();
        bs.balances.push(MainnetConfig::effective_balance_increment() * 5).unwrap();

        let total_balance = bs.validators[0].effective_balance;
        let expected = total_balance * MainnetConfig::base_reward_factor()
            / helper_functions::math::integer_squareroot(total_balance.max(
                MainnetConfig::effective_balance_increment(),
            ))
            / MainnetConfig::base_rewards_per_epoch();
        assert_eq!(bs.get_base_reward(0).unwrap(), expected);
    }

    #[test]
    fn process_rewards_and_penalties_is_noop_at_genesis() {
        let mut bs: BeaconState<MainnetConfig> = BeaconState {
            slot: 0,
            validators: VariableList::from(vec![Validator::default()]),
            balances: VariableList::from(vec![0]),
            ..BeaconState::default()
        };
        bs.process_rewards_and_penalties().unwrap();
        assert_eq!(bs.balances[0], 0);
    }
}
