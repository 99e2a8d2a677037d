use eth2_core::consts::ExpConst;
use types::{beacon_state::BeaconState, config::Config};

use crate::epochs::final_updates::process_final_updates;
use crate::epochs::justification_and_finalization::process_justification_and_finalization;
use crate::epochs::registry_updates::process_registry_updates;
use crate::epochs::slashings::process_slashings;
use crate::error::Error;
use crate::rewards_and_penalties::StakeholderBlock;

/// Runs the five epoch-boundary phases in the order the protocol requires:
/// justification/finalization depends on the previous epoch's attestations
/// before rewards touch any balance, registry updates depend on balances
/// rewards/penalties just settled, slashings read the registry's current
/// shape, and final updates must run last since it rotates the attestation
/// buffers the earlier phases read from.
pub fn process_epoch<T: Config + ExpConst>(state: &mut BeaconState<T>) -> Result<(), Error> {
    if state.balances.len() != state.validators.len() {
        return Err(Error::BalancesValidatorsLengthMismatch {
            balances_len: state.balances.len(),
            validators_len: state.validators.len(),
        });
    }

    log::debug!("processing epoch transition at slot {}", state.slot);

    process_justification_and_finalization(state)?;
    log::debug!("justification and finalization updated");

    state.process_rewards_and_penalties()?;
    log::debug!("rewards and penalties applied");

    process_registry_updates(state)?;
    log::debug!("registry updates applied");

    process_slashings(state)?;
    log::debug!("slashings applied");

    process_final_updates(state)?;
    log::debug!("final updates applied");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use types::config::MainnetConfig;

    #[test]
    fn runs_all_five_phases_without_error_on_a_default_state() {
        let mut bs: BeaconState<MainnetConfig> = BeaconState {
            slot: 32 * 10,
            ..BeaconState::default()
        };
        process_epoch(&mut bs).unwrap();
    }
}
