use eth2_core::consts::ExpConst;
use helper_functions::beacon_state_accessors::{
    get_block_root, get_current_epoch, get_previous_epoch, get_total_active_balance,
};
use types::{beacon_state::BeaconState, config::Config, types::Checkpoint};

use crate::attestations::AttestableBlock;
use crate::error::Error;

/// Shifts the justification bitvector up by one slot (bit 0 becomes bit 1,
/// bit 1 becomes bit 2, ...) and clears bit 0, making room for a fresh
/// current-epoch justification vote. Mirrors `BitVector::shift_up` from the
/// upstream justification pass; `ssz_types::BitVector` has no such helper,
/// so the shift is done bit by bit here.
fn shift_justification_bits<T: Config>(state: &mut BeaconState<T>) -> Result<(), Error> {
    for i in (1..4).rev() {
        let bit = state
            .justification_bits
            .get(i - 1)
            .map_err(|_| Error::IndexOutOfRange)?;
        state
            .justification_bits
            .set(i, bit)
            .map_err(|_| Error::IndexOutOfRange)?;
    }
    state
        .justification_bits
        .set(0, false)
        .map_err(|_| Error::IndexOutOfRange)?;
    Ok(())
}

/// Updates the justified and finalized checkpoints from the matching-target
/// attesting balances of the previous and current epochs (Casper FFG).
pub fn process_justification_and_finalization<T: Config + ExpConst>(
    state: &mut BeaconState<T>,
) -> Result<(), Error> {
    let current_epoch = get_current_epoch(state);
    if current_epoch <= T::genesis_epoch() + 1 {
        return Ok(());
    }

    let previous_epoch = get_previous_epoch(state);
    let total_active_balance = get_total_active_balance(state)?;

    let previous_target_attestations = state.get_matching_target_attestations(previous_epoch)?;
    let previous_target_attesting_balance =
        state.get_attesting_balance(&previous_target_attestations)?;

    let current_target_attestations = state.get_matching_target_attestations(current_epoch)?;
    let current_target_attesting_balance =
        state.get_attesting_balance(&current_target_attestations)?;

    let old_previous_justified_checkpoint = state.previous_justified_checkpoint;
    let old_current_justified_checkpoint = state.current_justified_checkpoint;

    state.previous_justified_checkpoint = state.current_justified_checkpoint;
    shift_justification_bits(state)?;

    if previous_target_attesting_balance * 3 >= total_active_balance * 2 {
        state.current_justified_checkpoint = Checkpoint {
            epoch: previous_epoch,
            root: get_block_root(state, previous_epoch)?,
        };
        state
            .justification_bits
            .set(1, true)
            .map_err(|_| Error::IndexOutOfRange)?;
    }
    if current_target_attesting_balance * 3 >= total_active_balance * 2 {
        state.current_justified_checkpoint = Checkpoint {
            epoch: current_epoch,
            root: get_block_root(state, current_epoch)?,
        };
        state
            .justification_bits
            .set(0, true)
            .map_err(|_| Error::IndexOutOfRange)?;
    }

    let bit = |i: usize| state.justification_bits.get(i).unwrap_or(false);

    // The 2nd/3rd/4th most recent epochs are all justified, the 2nd using the 4th as source.
    if (1..4).all(bit) && old_previous_justified_checkpoint.epoch + 3 == current_epoch {
        state.finalized_checkpoint = old_previous_justified_checkpoint;
    }
    // The 2nd/3rd most recent epochs are both justified, the 2nd using the 3rd as source.
    else if (1..3).all(bit) && old_previous_justified_checkpoint.epoch + 2 == current_epoch {
        state.finalized_checkpoint = old_previous_justified_checkpoint;
    }

    // The 1st/2nd/3rd most recent epochs are all justified, the 1st using the 3rd as source.
    if (0..3).all(bit) && old_current_justified_checkpoint.epoch + 2 == current_epoch {
        state.finalized_checkpoint = old_current_justified_checkpoint;
    }
    // The 1st/2nd most recent epochs are both justified, the 1st using the 2nd as source.
    else if (0..2).all(bit) && old_current_justified_checkpoint.epoch + 1 == current_epoch {
        state.finalized_checkpoint = old_current_justified_checkpoint;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use types::config::MainnetConfig;

    #[test]
    fn is_noop_before_the_second_epoch() {
        let mut bs: BeaconState<MainnetConfig> = BeaconState {
            slot: 0,
            ..BeaconState::default()
        };
        let before = bs.clone();
        process_justification_and_finalization(&mut bs).unwrap();
        assert_eq!(bs.justification_bits, before.justification_bits);
        assert_eq!(bs.finalized_checkpoint, before.finalized_checkpoint);
    }

    #[test]
    fn shifts_bits_up_and_clears_bit_zero() {
        let mut bs: BeaconState<MainnetConfig> = BeaconState {
            slot: 32 * 3,
            ..BeaconState::default()
        };
        bs.justification_bits.set(0, true).unwrap();
        shift_justification_bits(&mut bs).unwrap();
        assert!(!bs.justification_bits.get(0).unwrap());
        assert!(bs.justification_bits.get(1).unwrap());
    }
}
