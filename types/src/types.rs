#![allow(clippy::default_trait_access)]

use serde::{Deserialize, Serialize};
use ssz_derive::{Decode, Encode};
use ssz_types::{BitList, FixedVector};
use tree_hash_derive::TreeHash;

use crate::config::Config;
use crate::primitives::*;

/// A validator's vote on (source, target, head) checkpoints, as recorded
/// against a committee bitfield. Block-level `Attestation`/`IndexedAttestation`
/// containers (aggregation, signature verification) belong to per-block
/// processing and are out of scope for the epoch transition.
#[derive(
    Clone, PartialEq, Eq, Debug, Hash, Default, Deserialize, Serialize, Encode, Decode, TreeHash,
)]
pub struct AttestationData {
    pub slot: Slot,
    pub index: CommitteeIndex,
    pub beacon_block_root: H256,
    pub source: Checkpoint,
    pub target: Checkpoint,
}

#[derive(
    Clone,
    Copy,
    PartialEq,
    Eq,
    Debug,
    Default,
    Hash,
    Deserialize,
    Serialize,
    Encode,
    Decode,
    TreeHash,
)]
pub struct Checkpoint {
    pub epoch: Epoch,
    pub root: H256,
}

#[derive(Clone, PartialEq, Eq, Debug, Default, Deserialize, Serialize, Encode, Decode, TreeHash)]
pub struct Eth1Data {
    pub deposit_root: H256,
    pub deposit_count: u64,
    pub block_hash: H256,
}

#[derive(Clone, PartialEq, Eq, Debug, Default, Deserialize, Serialize, Encode, Decode, TreeHash)]
pub struct Fork {
    pub previous_version: Version,
    pub current_version: Version,
    pub epoch: Epoch,
}

#[derive(Clone, PartialEq, Eq, Debug, Default, Deserialize, Serialize, Encode, Decode, TreeHash)]
pub struct BeaconBlockHeader {
    pub slot: Slot,
    pub parent_root: H256,
    pub state_root: H256,
    pub body_root: H256,
}

#[derive(Clone, PartialEq, Debug, Deserialize, Serialize, Encode, Decode, TreeHash)]
pub struct HistoricalBatch<C: Config> {
    pub block_roots: FixedVector<H256, C::SlotsPerHistoricalRoot>,
    pub state_roots: FixedVector<H256, C::SlotsPerHistoricalRoot>,
}

/// A previously-included attestation, recorded in `BeaconState::{previous,
/// current}_epoch_attestations` with the inclusion delay and proposer who
/// included it, per phase-0's "pending attestation" model (superseded by the
/// participation-flags model in later forks, which is out of scope here).
#[derive(Clone, PartialEq, Debug, Deserialize, Serialize, Encode, Decode, TreeHash)]
pub struct PendingAttestation<C: Config> {
    pub aggregation_bits: BitList<C::MaxValidatorsPerCommittee>,
    pub data: AttestationData,
    pub inclusion_delay: Slot,
    pub proposer_index: ValidatorIndex,
}

impl<C: Config> Default for PendingAttestation<C> {
    fn default() -> Self {
        Self {
            aggregation_bits: BitList::with_capacity(1).expect("capacity 1 is always valid"),
            data: Default::default(),
            inclusion_delay: Default::default(),
            proposer_index: Default::default(),
        }
    }
}

#[derive(Clone, PartialEq, Eq, Debug, Deserialize, Serialize, Encode, Decode, TreeHash)]
pub struct Validator {
    pub pubkey: PublicKeyBytes,
    pub withdrawal_credentials: H256,
    pub effective_balance: Gwei,
    pub slashed: bool,
    pub activation_eligibility_epoch: Epoch,
    pub activation_epoch: Epoch,
    pub exit_epoch: Epoch,
    pub withdrawable_epoch: Epoch,
}

impl Default for Validator {
    fn default() -> Self {
        Self {
            pubkey: PublicKeyBytes::empty(),
            withdrawal_credentials: Default::default(),
            effective_balance: Default::default(),
            slashed: Default::default(),
            activation_eligibility_epoch: crate::consts::FAR_FUTURE_EPOCH,
            activation_epoch: crate::consts::FAR_FUTURE_EPOCH,
            exit_epoch: crate::consts::FAR_FUTURE_EPOCH,
            withdrawable_epoch: crate::consts::FAR_FUTURE_EPOCH,
        }
    }
}

impl Validator {
    pub fn is_active(&self, epoch: Epoch) -> bool {
        self.activation_epoch <= epoch && epoch < self.exit_epoch
    }

    pub fn is_eligible_for_activation_queue<C: Config>(&self) -> bool {
        self.activation_eligibility_epoch == crate::consts::FAR_FUTURE_EPOCH
            && self.effective_balance == C::max_effective_balance()
    }

    pub fn is_eligible_for_activation(&self, finalized_epoch: Epoch) -> bool {
        self.activation_eligibility_epoch <= finalized_epoch
            && self.activation_epoch == crate::consts::FAR_FUTURE_EPOCH
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MainnetConfig;

    #[test]
    fn default_validator_epochs_are_far_future() {
        let v = Validator::default();
        assert_eq!(v.activation_eligibility_epoch, crate::consts::FAR_FUTURE_EPOCH);
        assert_eq!(v.exit_epoch, crate::consts::FAR_FUTURE_EPOCH);
        assert_eq!(v.withdrawable_epoch, crate::consts::FAR_FUTURE_EPOCH);
    }

    #[test]
    fn is_active_checks_half_open_range() {
        let v = Validator {
            activation_epoch: 2,
            exit_epoch: 5,
            ..Validator::default()
        };
        assert!(!v.is_active(1));
        assert!(v.is_active(2));
        assert!(v.is_active(4));
        assert!(!v.is_active(5));
    }

    #[test]
    fn is_eligible_for_activation_queue_requires_max_balance() {
        let v = Validator {
            effective_balance: MainnetConfig::max_effective_balance(),
            ..Validator::default()
        };
        assert!(v.is_eligible_for_activation_queue::<MainnetConfig>());
    }

    #[test]
    fn is_eligible_for_activation_checks_finalized_epoch() {
        let v = Validator {
            activation_eligibility_epoch: 3,
            ..Validator::default()
        };
        assert!(!v.is_eligible_for_activation(2));
        assert!(v.is_eligible_for_activation(3));
    }
}
