//! The traits module contains the high-level traits implemented by dispute game
//! solvers and their local game state.

use crate::{Claim, GameStatus};
use anyhow::Result;
use async_trait::async_trait;

/// The [DisputeGame] trait describes the local view of a simple primitive dispute.
///
/// - It houses a root [Claim], a 32 byte commitment, which is the claim being disputed.
/// - It has a [GameStatus], which indicates the current status of the dispute.
/// - It has a method to resolve the dispute, which returns the [GameStatus] after
///   resolution. The resolution mechanism can be anything - a fault proof, a validity
///   proof, a multisig, etc. It is up to the implementation of the dispute game to
///   determine the resolution mechanism.
pub trait DisputeGame {
    /// Returns the root claim of the dispute game. The root claim is a 32 byte
    /// commitment to what is being disputed.
    fn root_claim(&self) -> Claim;

    /// Returns the current status of the dispute game.
    fn status(&self) -> GameStatus;

    /// Resolves the dispute game, returning the [GameStatus] after resolution.
    fn resolve(&mut self) -> GameStatus;
}

/// The [DisputeSolver] trait describes the interface of a solver that, given the local
/// view of a [DisputeGame], produces the responses an honest participant should submit
/// next. Implementations may suspend on I/O while consulting their source of truth, so
/// the interface is asynchronous.
#[async_trait]
pub trait DisputeSolver<DG, R>
where
    DG: DisputeGame + Sync,
{
    /// Returns any responses that should be submitted against the given game state,
    /// ordered by the index of the claim they counter.
    async fn available_moves(&self, game: &DG) -> Result<Vec<R>>;
}
