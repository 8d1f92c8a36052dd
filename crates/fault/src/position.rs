//! The position module holds the [Position] type and its [Gindex] implementation.

use crate::Gindex;
use alloy_primitives::U256;

/// A [Position] is a generalized index within the game's complete binary tree of
/// claims: `1` is the root, and the children of `g` are `2g` and `2g + 1`. A `u128`
/// gindex supports game depths of up to 126; trace indices are widened to [U256] so
/// comparisons against `2^{max_depth}` never truncate.
pub type Position = u128;

/// Computes a generalized index from a depth and index at depth.
///
/// ### Takes
/// - `depth`: The depth of the generalized index.
/// - `index_at_depth`: The index at depth of the generalized index.
///
/// ### Returns
/// - `Position`: The generalized index: `2^{depth} + index_at_depth`.
pub fn compute_gindex(depth: u8, index_at_depth: u128) -> Position {
    (1 << depth) + index_at_depth
}

impl Gindex for Position {
    fn depth(&self) -> u8 {
        127 - self.leading_zeros() as u8
    }

    fn index_at_depth(&self) -> u128 {
        self - (1 << self.depth())
    }

    fn left(&self) -> Self {
        self << 1
    }

    fn right(&self) -> Self {
        (self << 1) | 1
    }

    fn parent(&self) -> Self {
        self >> 1
    }

    fn right_index(&self, max_depth: u8) -> Self {
        let remaining = max_depth - self.depth();
        (self << remaining) | ((1u128 << remaining) - 1)
    }

    fn trace_index(&self, max_depth: u8) -> U256 {
        U256::from(self.right_index(max_depth).index_at_depth())
    }

    fn attack(&self) -> Self {
        self.left()
    }

    fn defend(&self) -> Self {
        assert!(!self.is_root(), "the root claim cannot be defended");
        (self + 1) << 1
    }

    fn move_right(&self) -> Self {
        self + 1
    }

    fn is_root(&self) -> bool {
        *self == 1
    }

    fn make_move(&self, is_attack: bool) -> Self {
        if is_attack {
            self.attack()
        } else {
            self.defend()
        }
    }
}
