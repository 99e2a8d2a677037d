use eth2_core::consts::ExpConst;
use helper_functions::beacon_state_accessors::{
    get_attesting_indices, get_block_root, get_block_root_at_slot, get_current_epoch,
    get_previous_epoch, get_total_balance,
};
use ssz_types::VariableList;
use types::{
    beacon_state::BeaconState,
    config::Config,
    primitives::{Epoch, Gwei, ValidatorIndex},
    types::PendingAttestation,
};

use crate::error::Error;

type AttestationList<T> = VariableList<PendingAttestation<T>, <T as Config>::MaxAttestationsPerEpoch>;

/// The subset of a beacon state's accessor surface the reward/penalty phase
/// needs to classify attestations by which of (source, target, head) they
/// matched.
pub trait AttestableBlock<T>
where
    T: Config + ExpConst,
{
    fn get_matching_source_attestations(&self, epoch: Epoch) -> Result<AttestationList<T>, Error>;
    fn get_matching_target_attestations(&self, epoch: Epoch) -> Result<AttestationList<T>, Error>;
    fn get_matching_head_attestations(&self, epoch: Epoch) -> Result<AttestationList<T>, Error>;
    fn get_unslashed_attesting_indices(
        &self,
        attestations: &AttestationList<T>,
    ) -> Result<Vec<ValidatorIndex>, Error>;
    fn get_attesting_balance(&self, attestations: &AttestationList<T>) -> Result<Gwei, Error>;
}

impl<T> AttestableBlock<T> for BeaconState<T>
where
    T: Config + ExpConst,
{
    fn get_matching_source_attestations(&self, epoch: Epoch) -> Result<AttestationList<T>, Error> {
        let previous_epoch = get_previous_epoch(self);
        let current_epoch = get_current_epoch(self);
        if epoch != previous_epoch && epoch != current_epoch {
            return Err(Error::SlotOutOfRange);
        }

        Ok(if epoch == current_epoch {
            self.current_epoch_attestations.clone()
        } else {
            self.previous_epoch_attestations.clone()
        })
    }

    fn get_matching_target_attestations(&self, epoch: Epoch) -> Result<AttestationList<T>, Error> {
        let target_root = get_block_root(self, epoch)?;
        let mut target_attestations = VariableList::from(vec![]);
        for attestation in self.get_matching_source_attestations(epoch)?.iter() {
            if attestation.data.target.root == target_root {
                target_attestations
                    .push(attestation.clone())
                    .map_err(|_| Error::IndexOutOfRange)?;
            }
        }
        Ok(target_attestations)
    }

    fn get_matching_head_attestations(&self, epoch: Epoch) -> Result<AttestationList<T>, Error> {
        let mut head_attestations = VariableList::from(vec![]);
        for attestation in self.get_matching_source_attestations(epoch)?.iter() {
            let block_root = get_block_root_at_slot(self, attestation.data.slot)?;
            if attestation.data.beacon_block_root == block_root {
                head_attestations
                    .push(attestation.clone())
                    .map_err(|_| Error::IndexOutOfRange)?;
            }
        }
        Ok(head_attestations)
    }

    fn get_unslashed_attesting_indices(
        &self,
        attestations: &AttestationList<T>,
    ) -> Result<Vec<ValidatorIndex>, Error> {
        let mut output = std::collections::BTreeSet::new();
        for attestation in attestations.iter() {
            let indices =
                get_attesting_indices(self, &attestation.data, &attestation.aggregation_bits)?;
            for index in indices {
                if !self.validators[index as usize].slashed {
                    output.insert(index);
                }
            }
        }
        Ok(output.into_iter().collect())
    }

    fn get_attesting_balance(&self, attestations: &AttestationList<T>) -> Result<Gwei, Error> {
        let indices = self.get_unslashed_attesting_indices(attestations)?;
        Ok(get_total_balance(self, &indices)?)
    }
}
