//! Holds the action types emitted by the fault dispute game solver.

use crate::ClaimData;
use alloy_primitives::{Bytes, B256};
use thorin_primitives::Claim;

/// The [VMStatus] enum describes the exit status a claim commitment carries in its
/// leading byte.
/// - [VMStatus::Valid]: The VM exited with a valid status.
/// - [VMStatus::Invalid]: The VM exited with an invalid status.
/// - [VMStatus::Panic]: The VM exited with a panic status.
/// - [VMStatus::Unfinished]: The VM has not yet exited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VMStatus {
    Valid = 0,
    Invalid = 1,
    Panic = 2,
    Unfinished = 3,
}

/// The [OracleData] struct holds the preimage oracle witness a VM step consumes.
/// Single-level trace accessors that never touch the oracle omit it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OracleData {
    /// Whether the preimage is local to the dispute or globally known.
    pub is_local: bool,
    /// The key the preimage is stored under.
    pub key: B256,
    /// The preimage itself.
    pub data: Bytes,
    /// The offset into the preimage the step reads at.
    pub offset: u32,
}

/// The [StepData] struct holds everything required to perform a VM step against a
/// leaf claim: the claim being countered, the direction of the step, and the witness
/// data the on-chain VM consumes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepData {
    /// The leaf claim the step counters.
    pub leaf_claim: ClaimData,
    /// Whether the step attacks the leaf claim (replays its own trace index) or
    /// defends it (replays the index after it).
    pub is_attack: bool,
    /// The raw prestate the step executes from.
    pub pre_state: Bytes,
    /// The proof of the prestate.
    pub proof: Bytes,
    /// The preimage oracle data the step consumes, if any.
    pub oracle_data: Option<OracleData>,
}

/// The [Action] enum describes a response the solver wants submitted to the dispute
/// game: a bisection move before the maximum depth, or a VM step against a leaf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Post a counter claim against the claim at `parent_index`.
    Move {
        /// The index of the claim being countered within the game's claim sequence.
        parent_index: usize,
        /// Whether the move attacks or defends the parent claim.
        is_attack: bool,
        /// The commitment the counter claim is made with.
        value: Claim,
    },
    /// Perform a VM step against the leaf claim at `parent_index`.
    Step {
        /// The index of the leaf claim being countered.
        parent_index: usize,
        /// Whether the step attacks or defends the leaf claim.
        is_attack: bool,
        /// The raw prestate the step executes from.
        pre_state: Bytes,
        /// The proof of the prestate.
        proof: Bytes,
        /// The preimage oracle data the step consumes, if any.
        oracle_data: Option<OracleData>,
    },
}

impl Action {
    /// Returns the index of the claim this action counters.
    pub fn parent_index(&self) -> usize {
        match self {
            Action::Move { parent_index, .. } | Action::Step { parent_index, .. } => *parent_index,
        }
    }

    /// Returns whether this action attacks its parent claim.
    pub fn is_attack(&self) -> bool {
        match self {
            Action::Move { is_attack, .. } | Action::Step { is_attack, .. } => *is_attack,
        }
    }

    /// Returns whether this action is a bisection move.
    pub fn is_move(&self) -> bool {
        matches!(self, Action::Move { .. })
    }
}
