use ballot_types::TypesError;
use thiserror::Error;

/// Rejections raised by the ballot ledger.
///
/// Every variant is detected before any state is touched.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BallotError {
    #[error("Only chairperson can give right to vote.")]
    Unauthorized,

    #[error("Voter already has the right to vote.")]
    AlreadyHasRight,

    #[error("The voter already voted.")]
    AlreadyVotedOrRegistered,

    #[error("Has no right to vote")]
    NoRightToVote,

    #[error("Already voted.")]
    AlreadyVoted,

    #[error("Self-delegation is disallowed.")]
    SelfDelegation,

    #[error("Found loop in delegation.")]
    DelegationLoop,

    #[error("Invalid proposal: index {index} out of range (proposal count {count})")]
    InvalidProposal { index: u32, count: u32 },

    #[error("At least one proposal is required")]
    NoProposals,

    #[error("Too many proposals: {0}")]
    TooManyProposals(usize),

    #[error("Invalid proposal name: {0}")]
    InvalidProposalName(String),

    #[error("Weight overflow")]
    WeightOverflow,

    #[error("Weight conservation violated: granted {granted}, accounted {accounted}")]
    ConservationViolated { granted: u64, accounted: u64 },
}

impl BallotError {
    /// Stable machine-readable name of the rejection kind.
    pub fn kind(&self) -> &'static str {
        match self {
            BallotError::Unauthorized => "Unauthorized",
            BallotError::AlreadyHasRight => "AlreadyHasRight",
            BallotError::AlreadyVotedOrRegistered => "AlreadyVotedOrRegistered",
            BallotError::NoRightToVote => "NoRightToVote",
            BallotError::AlreadyVoted => "AlreadyVoted",
            BallotError::SelfDelegation => "SelfDelegation",
            BallotError::DelegationLoop => "DelegationLoop",
            BallotError::InvalidProposal { .. } => "InvalidProposal",
            BallotError::NoProposals => "NoProposals",
            BallotError::TooManyProposals(_) => "TooManyProposals",
            BallotError::InvalidProposalName(_) => "InvalidProposalName",
            BallotError::WeightOverflow => "WeightOverflow",
            BallotError::ConservationViolated { .. } => "ConservationViolated",
        }
    }
}

impl From<TypesError> for BallotError {
    fn from(e: TypesError) -> Self {
        BallotError::InvalidProposalName(e.to_string())
    }
}
