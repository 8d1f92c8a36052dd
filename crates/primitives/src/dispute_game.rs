//! Types related to the [crate::DisputeGame] trait.

use alloy_primitives::B256;
use anyhow::{bail, Error};

/// The [Claim] type is an alias to [B256]. A claim is a 32 byte commitment made by a
/// participant in a dispute game; what the commitment is about is up to the game variant.
pub type Claim = B256;

/// The [GameStatus] enum describes the status of a dispute game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    /// The dispute game is still in progress.
    InProgress = 0,
    /// The challenger of the root claim has won the dispute game.
    ChallengerWins = 1,
    /// The defender of the root claim has won the dispute game.
    DefenderWins = 2,
}

impl TryFrom<u8> for GameStatus {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(GameStatus::InProgress),
            1 => Ok(GameStatus::ChallengerWins),
            2 => Ok(GameStatus::DefenderWins),
            _ => bail!("Invalid game status: {}", value),
        }
    }
}
