#![doc = include_str!("../README.md")]

mod dispute_game;
pub use dispute_game::{Claim, GameStatus};

mod traits;
pub use traits::{DisputeGame, DisputeSolver};

mod rule;
pub use rule::join_errors;
