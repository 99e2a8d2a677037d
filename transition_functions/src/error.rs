use thiserror::Error;

/// Failures the epoch transition can surface. These are all
/// programmer/corruption-class failures: out-of-range slot/epoch
/// lookups and state/validator-count mismatches that should never occur
/// against a state produced by this same pipeline. Expected no-ops (e.g. a
/// transition at the genesis epoch) and arithmetic saturation are handled
/// inline and never reach this type.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    #[error("balances length ({balances_len}) does not match validators length ({validators_len})")]
    BalancesValidatorsLengthMismatch {
        balances_len: usize,
        validators_len: usize,
    },

    #[error("slot is out of the historical range covered by the state")]
    SlotOutOfRange,

    #[error("index is out of range for the referenced collection")]
    IndexOutOfRange,

    #[error("no matching source attestation was found for an unslashed attester")]
    NoMatchingSourceAttestation,
}

impl From<helper_functions::error::Error> for Error {
    fn from(error: helper_functions::error::Error) -> Self {
        match error {
            helper_functions::error::Error::SlotOutOfRange => Error::SlotOutOfRange,
            helper_functions::error::Error::IndexOutOfRange => Error::IndexOutOfRange,
            helper_functions::error::Error::AttestationBitsInvalid => Error::IndexOutOfRange,
        }
    }
}
