//! This module contains the game-level fault dispute solver, which iterates the
//! claims of a [FaultDisputeState] and collects the actions an honest challenger
//! should submit for the round.

use crate::{Action, AgreedClaimTracker, FaultClaimSolver, FaultDisputeState, Gindex};
use alloy_primitives::Address;
use anyhow::Result;
use async_trait::async_trait;
use thorin_primitives::DisputeSolver;

/// A [FaultDisputeSolver] is a [DisputeSolver] played over a fault proof VM backend.
/// It drives a [FaultClaimSolver] over every claim in the game and gathers the
/// resulting actions, tracking which claims are the challenger's own so they are
/// never countered.
pub struct FaultDisputeSolver<S>
where
    S: FaultClaimSolver,
{
    inner: S,
}

impl<S> FaultDisputeSolver<S>
where
    S: FaultClaimSolver + Sync,
{
    pub fn new(claim_solver: S) -> Self {
        Self { inner: claim_solver }
    }

    /// Returns a reference to the inner claim solver.
    pub fn inner(&self) -> &S {
        &self.inner
    }

    /// Computes the honest actions to submit against the given game state: one move
    /// per counterable claim above the maximum depth, and one step per counterable
    /// leaf claim. Emitted actions always satisfy the game's validation rules.
    ///
    /// Accessor failures abort the round; no partial action list is returned.
    pub async fn calculate_next_actions(&self, game: &FaultDisputeState) -> Result<Vec<Action>> {
        let mut agreed = AgreedClaimTracker::default();
        let mut actions = Vec::new();
        // Contract indices our emitted moves will occupy once applied.
        let mut pending_moves = 0;

        for (claim_index, claim) in game.claims().iter().enumerate() {
            if claim.depth() == self.inner.game_depth() {
                // A step already landed on this leaf.
                if claim.countered_by != Address::ZERO {
                    continue;
                }
                let step = match self.inner.attempt_step(game, claim_index, &agreed).await {
                    Ok(Some(step)) => step,
                    Ok(None) => continue,
                    // Leaves disputing an invalid path cannot be stepped on.
                    Err(err)
                        if err.downcast_ref::<crate::SolverError>()
                            == Some(&crate::SolverError::StepIgnoreInvalidPath) =>
                    {
                        continue
                    }
                    Err(err) => return Err(err),
                };
                tracing::debug!(
                    target: "fault-solver",
                    claim_index,
                    is_attack = step.is_attack,
                    "performing step against leaf claim"
                );
                actions.push(Action::Step {
                    parent_index: claim_index,
                    is_attack: step.is_attack,
                    pre_state: step.pre_state,
                    proof: step.proof,
                    oracle_data: step.oracle_data,
                });
            } else {
                let Some(candidate) = self.inner.next_move(game, claim_index, &agreed).await?
                else {
                    continue;
                };
                if let Some(existing) = game.find_duplicate(&candidate) {
                    // The move was already made in a prior round; it is our own claim
                    // and must not be countered when we reach it.
                    agreed.add(existing);
                    continue;
                }
                agreed.add(game.claims().len() + pending_moves);
                pending_moves += 1;

                let is_attack = candidate.position == claim.position.attack();
                tracing::debug!(
                    target: "fault-solver",
                    claim_index,
                    is_attack,
                    position = candidate.position,
                    "countering claim"
                );
                actions.push(Action::Move {
                    parent_index: claim_index,
                    is_attack,
                    value: candidate.value,
                });
            }
        }

        Ok(actions)
    }
}

#[async_trait]
impl<S> DisputeSolver<FaultDisputeState, Action> for FaultDisputeSolver<S>
where
    S: FaultClaimSolver + Send + Sync,
{
    async fn available_moves(&self, game: &FaultDisputeState) -> Result<Vec<Action>> {
        self.calculate_next_actions(game).await
    }
}
