//! Implementation of the [FaultClaimSolver] trait for the honest challenger strategy.

use crate::{
    AgreedClaimTracker, ClaimData, FaultClaimSolver, FaultDisputeState, Gindex, Position,
    SolverError, StepData, TraceAccessor,
};
use alloy_primitives::U256;
use anyhow::{Context, Result};
use async_trait::async_trait;

/// The [HonestClaimSolver] plays the honest challenger strategy against a single
/// claim: attack claims it disagrees with, defend claims it agrees with, and replay
/// the disputed step once bisection reaches the maximum depth. Moves that would rest
/// on a poisoned prestate are skipped entirely.
pub struct HonestClaimSolver<A>
where
    A: TraceAccessor,
{
    /// The accessor for the honest trace the solver forms its opinions from.
    trace: A,
    /// The depth at which bisection stops and VM steps begin.
    game_depth: u8,
}

impl<A> HonestClaimSolver<A>
where
    A: TraceAccessor + Sync,
{
    pub fn new(game_depth: u8, trace: A) -> Self {
        Self { trace, game_depth }
    }

    /// Returns a reference to the solver's trace accessor.
    pub fn trace(&self) -> &A {
        &self.trace
    }

    /// Returns whether the claim is correct according to the honest trace.
    pub async fn agree_with_claim(
        &self,
        game: &FaultDisputeState,
        claim: &ClaimData,
    ) -> Result<bool> {
        let our_value = self.trace.get(game, claim, claim.position).await?;
        Ok(our_value == claim.value)
    }

    /// Returns whether a counter at `position` against `target` is safe to make.
    ///
    /// A counter implicitly relies on the ancestor with the highest trace index still
    /// left of it as the prestate of a future step. If that ancestor is dishonest, the
    /// adversary can step from it and win; such counters must not be played.
    pub async fn is_safe_counter(
        &self,
        game: &FaultDisputeState,
        target: &ClaimData,
        position: Position,
    ) -> Result<bool> {
        let honest_trace_index = position.trace_index(game.max_depth());
        let Some(prestate_claim) = game.closest_left_ancestor(target, honest_trace_index)? else {
            // No prestate, so the counter cannot be poisoned.
            return Ok(true);
        };
        self.agree_with_claim(game, prestate_claim)
            .await
            .context("failed to check the claim at the closest prestate")
    }
}

#[async_trait]
impl<A> FaultClaimSolver for HonestClaimSolver<A>
where
    A: TraceAccessor + Send + Sync,
{
    fn game_depth(&self) -> u8 {
        self.game_depth
    }

    async fn next_move(
        &self,
        game: &FaultDisputeState,
        claim_index: usize,
        agreed: &AgreedClaimTracker,
    ) -> Result<Option<ClaimData>> {
        let claim = game.claim(claim_index)?;
        if claim.depth() == self.game_depth {
            return Err(SolverError::GameDepthReached.into());
        }

        // Do not counter moves we made ourselves.
        if agreed.is_agreed(claim.contract_index) {
            return Ok(None);
        }

        let agree = self.agree_with_claim(game, claim).await?;
        if agree && claim.is_root_position() {
            // The root claim cannot be defended.
            return Ok(None);
        }
        let position = claim.position.make_move(!agree);

        if !self.is_safe_counter(game, claim, position).await? {
            tracing::debug!(
                target: "honest-claim-solver",
                claim_index,
                "not countering claim on a poisoned path"
            );
            return Ok(None);
        }

        let value = self
            .trace
            .get(game, claim, position)
            .await
            .context("failed to fetch the counter claim value")?;
        Ok(Some(ClaimData::new_move(
            value,
            position,
            claim.contract_index,
        )))
    }

    async fn attempt_step(
        &self,
        game: &FaultDisputeState,
        claim_index: usize,
        agreed: &AgreedClaimTracker,
    ) -> Result<Option<StepData>> {
        let claim = game.claim(claim_index)?;
        if claim.depth() != self.game_depth {
            return Err(SolverError::StepNonLeafNode.into());
        }

        // Do not step on moves we made ourselves.
        if agreed.is_agreed(claim.contract_index) {
            return Ok(None);
        }

        let claim_correct = self.agree_with_claim(game, claim).await?;
        // An attack step replays the disputed index itself; a defense step uses the
        // claim as its starting point and replays the index immediately after.
        let position = if claim_correct {
            claim.position.move_right()
        } else {
            claim.position
        };

        if claim_correct {
            // A defense step proves the transition to the next committed claim on the
            // leaf's path. That only counters the leaf when the poststate commitment
            // sits an odd number of levels up and we agree with it; anywhere else the
            // leaf is disputing an invalid path and the step would not land.
            let poststate_index =
                claim.position.trace_index(game.max_depth()) + U256::from(1);
            let Some(poststate) = game.ancestor_with_trace_index(claim, poststate_index)? else {
                return Err(SolverError::StepIgnoreInvalidPath.into());
            };
            let odd_distance = (claim.depth() - poststate.depth()) % 2 == 1;
            if odd_distance != self.agree_with_claim(game, poststate).await? {
                return Err(SolverError::StepIgnoreInvalidPath.into());
            }
        }

        if !self.is_safe_counter(game, claim, position).await? {
            tracing::debug!(
                target: "honest-claim-solver",
                claim_index,
                "not stepping on a claim with a poisoned prestate"
            );
            return Ok(None);
        }

        let (pre_state, proof, oracle_data) =
            self.trace.get_step_data(game, claim, position).await?;
        Ok(Some(StepData {
            leaf_claim: claim.clone(),
            is_attack: !claim_correct,
            pre_state,
            proof,
            oracle_data,
        }))
    }
}
