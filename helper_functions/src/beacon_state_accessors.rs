use std::cmp;
use std::convert::TryFrom;

use ssz_types::BitList;
use typenum::marker_traits::Unsigned;
use types::{beacon_state::BeaconState, config::Config, primitives::*, types::*};

use crate::{error::Error, misc::compute_epoch_at_slot, predicates::is_active_validator};

pub fn get_current_epoch<C: Config>(state: &BeaconState<C>) -> Epoch {
    compute_epoch_at_slot::<C>(state.slot)
}

pub fn get_previous_epoch<C: Config>(state: &BeaconState<C>) -> Epoch {
    let current_epoch = get_current_epoch(state);
    let genesis_epoch = C::genesis_epoch();

    if current_epoch > genesis_epoch {
        current_epoch - 1
    } else {
        genesis_epoch
    }
}

pub fn get_block_root_at_slot<C: Config>(
    state: &BeaconState<C>,
    slot: Slot,
) -> Result<H256, Error> {
    if !(slot < state.slot && state.slot <= slot + C::SlotsPerHistoricalRoot::to_u64()) {
        return Err(Error::SlotOutOfRange);
    }

    match usize::try_from(slot % C::SlotsPerHistoricalRoot::to_u64()) {
        Err(_err) => Err(Error::IndexOutOfRange),
        Ok(id) => Ok(state.block_roots[id]),
    }
}

pub fn get_block_root<C: Config>(state: &BeaconState<C>, epoch: Epoch) -> Result<H256, Error> {
    use crate::misc::compute_start_slot_of_epoch;
    get_block_root_at_slot(state, compute_start_slot_of_epoch::<C>(epoch))
}

pub fn get_randao_mix<C: Config>(state: &BeaconState<C>, epoch: Epoch) -> H256 {
    state.randao_mixes[(epoch % C::EpochsPerHistoricalVector::to_u64()) as usize]
}

pub fn get_active_validator_indices<C: Config>(
    state: &BeaconState<C>,
    epoch: Epoch,
) -> Vec<ValidatorIndex> {
    state
        .validators
        .iter()
        .enumerate()
        .filter(|(_, v)| is_active_validator(v, epoch))
        .map(|(i, _)| i as u64)
        .collect()
}

pub fn get_validator_churn_limit<C: Config>(state: &BeaconState<C>) -> u64 {
    let active_validator_indices = get_active_validator_indices(state, get_current_epoch(state));
    cmp::max(
        C::min_per_epoch_churn_limit(),
        active_validator_indices.len() as u64 / C::churn_limit_quotient(),
    )
}

pub fn get_total_balance<C: Config>(
    state: &BeaconState<C>,
    indices: &[ValidatorIndex],
) -> Result<Gwei, Error> {
    let mut sum: Gwei = 0;
    for index in indices {
        let id = usize::try_from(*index).map_err(|_| Error::IndexOutOfRange)?;
        let validator = state.validators.get(id).ok_or(Error::IndexOutOfRange)?;
        sum += validator.effective_balance;
    }
    Ok(cmp::max(sum, C::effective_balance_increment()))
}

pub fn get_total_active_balance<C: Config>(state: &BeaconState<C>) -> Result<Gwei, Error> {
    get_total_balance::<C>(
        state,
        &get_active_validator_indices::<C>(state, get_current_epoch::<C>(state)),
    )
}

/// Recovers the committee an attestation's bitfield was recorded against.
///
/// Full committee shuffling (`get_beacon_committee`) is out of scope for the
/// epoch transition; the committee is instead taken to be the active
/// validator set at the attestation's epoch, in the order returned by
/// `get_active_validator_indices`, which is exactly the information the
/// reward/penalty accounting needs from this function.
pub fn get_attesting_indices<C: Config>(
    state: &BeaconState<C>,
    data: &AttestationData,
    bits: &BitList<C::MaxValidatorsPerCommittee>,
) -> Result<Vec<ValidatorIndex>, Error> {
    let committee = get_active_validator_indices(state, compute_epoch_at_slot::<C>(data.slot));
    if bits.len() != committee.len() {
        return Err(Error::AttestationBitsInvalid);
    }

    Ok(committee
        .into_iter()
        .enumerate()
        .filter_map(|(i, index)| match bits.get(i) {
            Ok(true) => Some(index),
            _ => None,
        })
        .collect())
}
