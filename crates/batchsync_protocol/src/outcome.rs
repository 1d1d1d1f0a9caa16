//! Per-mutation processing outcomes.

use crate::mutation::MutationInfo;

/// The result of considering a single mutation.
///
/// Exactly one outcome exists per mutation the processor considered.
/// A sequence gap is not an outcome: it rejects the whole request and
/// is surfaced as an error instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationOutcome {
    /// The mutation was dispatched and its domain effect succeeded.
    Applied {
        /// The mutation id.
        id: u64,
    },
    /// The mutation was accepted into the sequence, but its domain
    /// effect was rejected permanently. The cursor still advances past
    /// it so the client does not retry forever.
    AppliedWithError {
        /// The mutation id.
        id: u64,
        /// Why the effect was rejected.
        message: String,
    },
    /// The mutation id was at or below the cursor: already processed.
    Skipped {
        /// The mutation id.
        id: u64,
    },
}

impl MutationOutcome {
    /// Returns the mutation id this outcome refers to.
    pub fn id(&self) -> u64 {
        match self {
            MutationOutcome::Applied { id }
            | MutationOutcome::AppliedWithError { id, .. }
            | MutationOutcome::Skipped { id } => *id,
        }
    }

    /// Returns true if the mutation's domain effect ran successfully.
    pub fn is_applied(&self) -> bool {
        matches!(self, MutationOutcome::Applied { .. })
    }

    /// Converts the outcome into its wire representation.
    ///
    /// Reporting policy: clean applications are omitted; permanent
    /// failures and duplicate skips are reported with a message.
    pub fn into_info(self) -> Option<MutationInfo> {
        match self {
            MutationOutcome::Applied { .. } => None,
            MutationOutcome::AppliedWithError { id, message } => {
                Some(MutationInfo { id, error: message })
            }
            MutationOutcome::Skipped { id } => Some(MutationInfo {
                id,
                error: format!("Mutation ID {id} has already been processed. Skipping."),
            }),
        }
    }
}
