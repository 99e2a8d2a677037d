use std::cmp;
use std::convert::TryFrom;

use types::{
    beacon_state::BeaconState,
    config::Config,
    consts::FAR_FUTURE_EPOCH,
    primitives::{Gwei, ValidatorIndex},
};

use crate::{
    beacon_state_accessors::{get_current_epoch, get_validator_churn_limit},
    error::Error,
    misc::compute_activation_exit_epoch,
};

pub fn increase_balance<C: Config>(state: &mut BeaconState<C>, index: ValidatorIndex, delta: Gwei) {
    if let Ok(id) = usize::try_from(index) {
        state.balances[id] += delta;
    }
}

pub fn decrease_balance<C: Config>(state: &mut BeaconState<C>, index: ValidatorIndex, delta: Gwei) {
    if let Ok(id) = usize::try_from(index) {
        state.balances[id] = state.balances[id].saturating_sub(delta);
    }
}

/// Queues the validator at `index` for exit, honoring the per-epoch churn
/// limit. A no-op if the validator has already started exiting.
pub fn initiate_validator_exit<C: Config>(
    state: &mut BeaconState<C>,
    index: ValidatorIndex,
) -> Result<(), Error> {
    let id = usize::try_from(index).map_err(|_| Error::IndexOutOfRange)?;
    if id >= state.validators.len() {
        return Err(Error::IndexOutOfRange);
    }
    if state.validators[id].exit_epoch != FAR_FUTURE_EPOCH {
        return Ok(());
    }

    let delayed_epoch = compute_activation_exit_epoch::<C>(get_current_epoch(state));
    let max_exit_epoch = state
        .validators
        .iter()
        .filter_map(|v| {
            if v.exit_epoch == FAR_FUTURE_EPOCH {
                None
            } else {
                Some(v.exit_epoch)
            }
        })
        .fold(0, cmp::max);
    let mut exit_queue_epoch = cmp::max(max_exit_epoch, delayed_epoch);

    let exit_queue_churn = state
        .validators
        .iter()
        .filter(|v| v.exit_epoch == exit_queue_epoch)
        .count() as u64;
    if exit_queue_churn >= get_validator_churn_limit(state) {
        exit_queue_epoch += 1;
    }

    state.validators[id].exit_epoch = exit_queue_epoch;
    state.validators[id].withdrawable_epoch =
        exit_queue_epoch + C::min_validator_withdrawability_delay();
    Ok(())
}
