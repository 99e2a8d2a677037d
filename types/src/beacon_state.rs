use std::cmp;
use std::convert::TryFrom;

use serde::{Deserialize, Serialize};
use ssz_derive::{Decode, Encode};
use ssz_types::{BitVector, FixedVector, VariableList};
use tree_hash_derive::TreeHash;
use typenum::marker_traits::Unsigned;

use crate::{config::*, consts, error::Error, primitives::*, types::*};

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize, Encode, Decode, TreeHash, Default)]
pub struct BeaconState<C: Config> {
    pub genesis_time: u64,
    pub slot: Slot,
    pub fork: Fork,

    // History
    pub latest_block_header: BeaconBlockHeader,
    pub block_roots: FixedVector<H256, C::SlotsPerHistoricalRoot>,
    pub state_roots: FixedVector<H256, C::SlotsPerHistoricalRoot>,
    pub historical_roots: VariableList<H256, C::HistoricalRootsLimit>,

    // Eth1 Data
    pub eth1_data: Eth1Data,
    pub eth1_data_votes: VariableList<Eth1Data, C::SlotsPerEth1VotingPeriod>,
    pub eth1_deposit_index: u64,

    // Registry
    pub validators: VariableList<Validator, C::ValidatorRegistryLimit>,
    pub balances: VariableList<Gwei, C::ValidatorRegistryLimit>,

    // Randomness
    pub randao_mixes: FixedVector<H256, C::EpochsPerHistoricalVector>,

    // Slashings
    pub slashings: FixedVector<Gwei, C::EpochsPerSlashingsVector>,

    // Attestations
    pub previous_epoch_attestations:
        VariableList<PendingAttestation<C>, C::MaxAttestationsPerEpoch>,
    pub current_epoch_attestations: VariableList<PendingAttestation<C>, C::MaxAttestationsPerEpoch>,

    // Finality
    pub justification_bits: BitVector<consts::JustificationBitsLength>,
    pub previous_justified_checkpoint: Checkpoint,
    pub current_justified_checkpoint: Checkpoint,
    pub finalized_checkpoint: Checkpoint,
}

impl<C: Config> BeaconState<C> {
    pub fn compute_activation_exit_epoch(&self, epoch: Epoch) -> Epoch {
        epoch + 1 + C::activation_exit_delay()
    }

    pub fn compute_start_slot_of_epoch(&self, epoch: Epoch) -> Slot {
        epoch * C::SlotsPerEpoch::to_u64()
    }

    pub fn get_block_root_at_slot(&self, slot: Slot) -> Result<H256, Error> {
        if !(slot < self.slot && self.slot <= slot + C::SlotsPerHistoricalRoot::to_u64()) {
            return Err(Error::SlotOutOfRange);
        }

        match usize::try_from(slot % C::SlotsPerHistoricalRoot::to_u64()) {
            Err(_err) => Err(Error::IndexOutOfRange),
            Ok(id) => Ok(self.block_roots[id]),
        }
    }

    pub fn get_block_root(&self, epoch: Epoch) -> Result<H256, Error> {
        self.get_block_root_at_slot(self.compute_start_slot_of_epoch(epoch))
    }

    pub fn get_active_validator_indices(&self, epoch: Epoch) -> Vec<ValidatorIndex> {
        self.validators
            .iter()
            .enumerate()
            .filter(|(_, v)| v.is_active(epoch))
            .map(|(i, _)| i as u64)
            .collect()
    }

    pub fn get_current_epoch(&self) -> Epoch {
        self.slot / C::SlotsPerEpoch::to_u64()
    }

    pub fn get_previous_epoch(&self) -> Epoch {
        let current_epoch = self.get_current_epoch();
        let genesis_epoch = C::genesis_epoch();

        if current_epoch > genesis_epoch {
            current_epoch - 1
        } else {
            genesis_epoch
        }
    }

    pub fn get_randao_mix(&self, epoch: Epoch) -> H256 {
        self.randao_mixes[(epoch % C::EpochsPerHistoricalVector::to_u64()) as usize]
    }

    pub fn increase_balance(&mut self, index: ValidatorIndex, delta: Gwei) {
        if let Ok(id) = usize::try_from(index) {
            self.balances[id] += delta;
        }
    }

    pub fn decrease_balance(&mut self, index: ValidatorIndex, delta: Gwei) {
        if let Ok(id) = usize::try_from(index) {
            self.balances[id] = self.balances[id].saturating_sub(delta);
        }
    }

    pub fn get_validator_churn_limit(&self) -> u64 {
        let active_validator_indices = self.get_active_validator_indices(self.get_current_epoch());
        cmp::max(
            C::min_per_epoch_churn_limit(),
            active_validator_indices.len() as u64 / C::churn_limit_quotient(),
        )
    }

    pub fn get_total_balance(&self, indices: &[ValidatorIndex]) -> Result<Gwei, Error> {
        let mut sum: Gwei = 0;
        for index in indices {
            let id = usize::try_from(*index).map_err(|_| Error::IndexOutOfRange)?;
            let validator = self.validators.get(id).ok_or(Error::IndexOutOfRange)?;
            sum += validator.effective_balance;
        }
        Ok(cmp::max(sum, C::effective_balance_increment()))
    }

    pub fn get_total_active_balance(&self) -> Result<Gwei, Error> {
        self.get_total_balance(&self.get_active_validator_indices(self.get_current_epoch()))
    }

    /// Initiates the exit of the validator at `index`, assigning it the next
    /// available slot in the per-epoch churn-limited exit queue.
    pub fn initiate_validator_exit(&mut self, index: ValidatorIndex) -> Result<(), Error> {
        let id = usize::try_from(index).map_err(|_| Error::IndexOutOfRange)?;
        if self.validators[id].exit_epoch != consts::FAR_FUTURE_EPOCH {
            return Ok(());
        }

        let delayed_epoch = self.compute_activation_exit_epoch(self.get_current_epoch());
        let mut exit_queue_epoch = self
            .validators
            .iter()
            .map(|v| v.exit_epoch)
            .filter(|&epoch| epoch != consts::FAR_FUTURE_EPOCH)
            .max()
            .map_or(delayed_epoch, |epoch| cmp::max(epoch, delayed_epoch));

        let exit_queue_churn = self
            .validators
            .iter()
            .filter(|v| v.exit_epoch == exit_queue_epoch)
            .count() as u64;
        if exit_queue_churn >= self.get_validator_churn_limit() {
            exit_queue_epoch += 1;
        }

        self.validators[id].exit_epoch = exit_queue_epoch;
        self.validators[id].withdrawable_epoch =
            exit_queue_epoch + C::min_validator_withdrawability_delay();
        Ok(())
    }
}
