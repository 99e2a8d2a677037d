use eth2_core::consts::ExpConst;
use helper_functions::{
    beacon_state_accessors::{get_current_epoch, get_total_active_balance},
    beacon_state_mutators::decrease_balance,
};
use types::{beacon_state::BeaconState, config::Config};
use typenum::marker_traits::Unsigned;

use crate::error::Error;

/// Applies the delayed, proportional slashing penalty: a slashed validator's
/// effective balance is reduced in step with how much of the total active
/// balance is currently slashed, once the slashing has aged halfway through
/// its vector of epochs.
pub fn process_slashings<T: Config + ExpConst>(state: &mut BeaconState<T>) -> Result<(), Error> {
    let epoch = get_current_epoch(state);
    let total_balance = get_total_active_balance(state)?;
    let increment = T::effective_balance_increment();
    let slashings_sum: u64 = state.slashings.iter().sum();

    for index in 0..state.validators.len() {
        let validator = &state.validators[index];
        if validator.slashed
            && epoch + T::EpochsPerSlashingsVector::to_u64() / 2 == validator.withdrawable_epoch
        {
            let penalty_numerator = u128::from(validator.effective_balance / increment)
                * u128::from(slashings_sum.saturating_mul(3).min(total_balance));
            let penalty = (penalty_numerator / u128::from(total_balance)) as u64 * increment;
            decrease_balance(state, index as u64, penalty);
        }
    }

    Ok(())
}
