//! This module holds the traits that define the seams of the fault dispute game solver.

use crate::{AgreedClaimTracker, ClaimData, FaultDisputeState, OracleData, Position, StepData};
use alloy_primitives::{Bytes, U256};
use anyhow::Result;
use async_trait::async_trait;
use thorin_primitives::Claim;

/// The [Gindex] trait defines the interface of a generalized index within a complete
/// binary tree. A "Generalized Index" is calculated as `2^{depth} + index_at_depth`.
pub trait Gindex {
    /// Returns the depth of the [Position] within the tree.
    fn depth(&self) -> u8;

    /// Returns the index at depth of the [Position] within the tree.
    fn index_at_depth(&self) -> u128;

    /// Returns the left child [Position] relative to the current [Position].
    fn left(&self) -> Self;

    /// Returns the right child [Position] relative to the current [Position].
    fn right(&self) -> Self;

    /// Returns the parent [Position] relative to the current [Position].
    fn parent(&self) -> Self;

    /// Returns the rightmost leaf [Position] that commits to the same trace index as
    /// the current [Position].
    fn right_index(&self, max_depth: u8) -> Self;

    /// Returns the trace index that the current [Position] commits to, i.e. the index
    /// at depth of its rightmost leaf descendant.
    fn trace_index(&self, max_depth: u8) -> U256;

    /// Returns the [Position] of an attack against the current [Position]: the claim
    /// that disputes it by committing to the left half of its range.
    fn attack(&self) -> Self;

    /// Returns the [Position] of a defense of the current [Position]: the claim that
    /// counters it by committing to the trace beyond its range.
    ///
    /// # Panics
    /// Panics if the current [Position] is the root. The root claim commits to the
    /// entire trace and cannot be defended.
    fn defend(&self) -> Self;

    /// Returns the [Position] at the same depth with an index at depth one higher.
    fn move_right(&self) -> Self;

    /// Returns whether or not the current [Position] is the root of the tree.
    fn is_root(&self) -> bool;

    /// Returns the relative [Position] for an attack or defense move against the
    /// current [Position].
    fn make_move(&self, is_attack: bool) -> Self;
}

/// The [ChessClock] trait defines the interface of the packed clock word attached to
/// claims on-chain, tracking the time each side has consumed.
pub trait ChessClock {
    /// Returns the number of seconds elapsed on the side of the clock that posted the
    /// associated claim.
    fn duration(&self) -> u64;

    /// Returns the timestamp at which the clock was last updated.
    fn timestamp(&self) -> u64;
}

/// The [TraceProvider] trait describes an oracle for the honest execution trace of a
/// single bisection level. It serves the canonical commitment at any [Position] as
/// well as the raw state and proof witnesses required to replay a step on-chain.
#[async_trait]
pub trait TraceProvider {
    /// Returns the raw absolute prestate of the trace, i.e. the state before the first
    /// step has been executed.
    async fn absolute_prestate(&self, position: Position) -> Result<Bytes>;

    /// Returns the raw state of the trace at the given [Position].
    async fn state_at(&self, position: Position) -> Result<Bytes>;

    /// Returns the state commitment of the trace at the given [Position].
    async fn state_hash(&self, position: Position) -> Result<Claim>;

    /// Returns the proof witness for the state of the trace at the given [Position].
    async fn proof_at(&self, position: Position) -> Result<Bytes>;
}

/// The [TraceAccessor] trait is the solver's view of the honest trace. The observed
/// claim supplies the agreement frame for games with multiple bisection levels;
/// single-level accessors are free to ignore it.
#[async_trait]
pub trait TraceAccessor {
    /// Returns the honest state commitment at the given [Position].
    async fn get(
        &self,
        game: &FaultDisputeState,
        claim: &ClaimData,
        position: Position,
    ) -> Result<Claim>;

    /// Returns the witness data required to perform a VM step from the given
    /// [Position]: the raw prestate, the proof of the prestate, and any preimage
    /// oracle data the step consumes.
    async fn get_step_data(
        &self,
        game: &FaultDisputeState,
        claim: &ClaimData,
        position: Position,
    ) -> Result<(Bytes, Bytes, Option<OracleData>)>;
}

/// The [FaultClaimSolver] trait defines the per-claim strategy of a fault dispute game
/// solver: deciding the single best response (or lack thereof) against one claim in
/// the game's claim DAG.
#[async_trait]
pub trait FaultClaimSolver {
    /// Returns the depth at which the game being solved transitions from bisection
    /// moves to VM steps.
    fn game_depth(&self) -> u8;

    /// Returns the counter claim that should be made against the claim at
    /// `claim_index`, or `None` if the claim should not be countered.
    ///
    /// Errors with [crate::SolverError::GameDepthReached] if the claim is at the
    /// maximum game depth; leaf claims are countered with a step rather than a move.
    async fn next_move(
        &self,
        game: &FaultDisputeState,
        claim_index: usize,
        agreed: &AgreedClaimTracker,
    ) -> Result<Option<ClaimData>>;

    /// Returns the [StepData] for the VM step that counters the leaf claim at
    /// `claim_index`, or `None` if no step should be performed against it.
    ///
    /// Errors with [crate::SolverError::StepNonLeafNode] if the claim is not at the
    /// maximum game depth.
    async fn attempt_step(
        &self,
        game: &FaultDisputeState,
        claim_index: usize,
        agreed: &AgreedClaimTracker,
    ) -> Result<Option<StepData>>;
}
