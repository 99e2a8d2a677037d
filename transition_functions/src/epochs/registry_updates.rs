use eth2_core::consts::ExpConst;
use helper_functions::{
    beacon_state_accessors::{get_current_epoch, get_validator_churn_limit},
    beacon_state_mutators::initiate_validator_exit,
    misc::compute_activation_exit_epoch,
    predicates::is_active_validator,
};
use itertools::{Either, Itertools};
use types::{beacon_state::BeaconState, config::Config, consts::FAR_FUTURE_EPOCH, types::Validator};

use crate::error::Error;

/// Activates eligible queued validators (up to the churn limit) and starts
/// the exit of validators that have dropped below the ejection balance.
pub fn process_registry_updates<T: Config + ExpConst>(
    state: &mut BeaconState<T>,
) -> Result<(), Error> {
    let current_epoch = get_current_epoch(state);

    let is_eligible_for_activation_queue = |validator: &Validator| {
        validator.activation_eligibility_epoch == FAR_FUTURE_EPOCH
            && validator.effective_balance == T::max_effective_balance()
    };
    let is_exiting_validator = |validator: &Validator| {
        is_active_validator(validator, current_epoch)
            && validator.effective_balance <= T::ejection_balance()
    };

    let (eligible, exiting): (Vec<usize>, Vec<usize>) = state
        .validators
        .iter()
        .enumerate()
        .filter(|(_, v)| is_eligible_for_activation_queue(v) || is_exiting_validator(v))
        .partition_map(|(i, v)| {
            if is_eligible_for_activation_queue(v) {
                Either::Left(i)
            } else {
                Either::Right(i)
            }
        });

    for index in eligible {
        state.validators[index].activation_eligibility_epoch = current_epoch + 1;
    }
    for index in exiting {
        initiate_validator_exit(state, index as u64)?;
    }

    // Queue validators eligible for activation and not yet dequeued for
    // activation, ordered by the epoch they became eligible, then dequeue
    // up to the per-epoch churn limit.
    let finalized_epoch = state.finalized_checkpoint.epoch;
    let activation_queue: Vec<usize> = state
        .validators
        .iter()
        .enumerate()
        .filter(|(_, v)| {
            v.activation_eligibility_epoch <= finalized_epoch
                && v.activation_epoch == FAR_FUTURE_EPOCH
        })
        .sorted_by_key(|(_, v)| v.activation_eligibility_epoch)
        .map(|(i, _)| i)
        .collect();

    let churn_limit = get_validator_churn_limit(state);
    let delayed_activation_epoch = compute_activation_exit_epoch::<T>(current_epoch);
    for index in activation_queue.into_iter().take(churn_limit as usize) {
        if state.validators[index].activation_epoch == FAR_FUTURE_EPOCH {
            state.validators[index].activation_epoch = delayed_activation_epoch;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ssz_types::VariableList;
    use types::config::MainnetConfig;

    #[test]
    fn ejects_validators_below_ejection_balance() {
        let v = Validator {
            activation_epoch: 0,
            exit_epoch: FAR_FUTURE_EPOCH,
            effective_balance: MainnetConfig::ejection_balance(),
            ..Validator::default()
        };
        let mut bs: BeaconState<MainnetConfig> = BeaconState {
            validators: VariableList::from(vec![v]),
            slot: 0,
            ..BeaconState::default()
        };

        process_registry_updates(&mut bs).unwrap();
        assert_ne!(bs.validators[0].exit_epoch, FAR_FUTURE_EPOCH);
    }

    #[test]
    fn marks_queued_validators_eligible_for_activation() {
        let v = Validator {
            effective_balance: MainnetConfig::max_effective_balance(),
            ..Validator::default()
        };
        let mut bs: BeaconState<MainnetConfig> = BeaconState {
            validators: VariableList::from(vec![v]),
            slot: 0,
            ..BeaconState::default()
        };

        process_registry_updates(&mut bs).unwrap();
        assert_eq!(bs.validators[0].activation_eligibility_epoch, 1);
    }

    #[test]
    fn activates_eligible_validators_up_to_churn_limit() {
        let v = Validator {
            activation_eligibility_epoch: 0,
            activation_epoch: FAR_FUTURE_EPOCH,
            ..Validator::default()
        };
        let mut bs: BeaconState<MainnetConfig> = BeaconState {
            validators: VariableList::from(vec![v]),
            slot: 0,
            ..BeaconState::default()
        };

        process_registry_updates(&mut bs).unwrap();
        assert_ne!(bs.validators[0].activation_epoch, FAR_FUTURE_EPOCH);
    }
}
