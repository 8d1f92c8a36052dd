//! This module resolves a terminal fault dispute game to a winner by walking its
//! claim tree bottom-up.

use crate::ClaimData;
use alloy_primitives::Address;
use thorin_primitives::GameStatus;

/// The [BidirectionalTree] augments the parent-linked claim sequence with child
/// lists, so subgames can be resolved from the leaves toward the root.
#[derive(Debug, Clone)]
pub struct BidirectionalTree {
    /// The game's claims. Resolution updates `countered_by` on claims whose subgame
    /// was lost.
    pub claims: Vec<ClaimData>,
    /// The children of each claim, in insertion order.
    children: Vec<Vec<usize>>,
}

/// Builds a [BidirectionalTree] from a game's claim sequence.
pub fn create_bidirectional_tree(claims: &[ClaimData]) -> BidirectionalTree {
    let mut children = vec![Vec::new(); claims.len()];
    for (index, claim) in claims.iter().enumerate() {
        // Claims always counter an earlier claim; anything else is malformed and
        // excluded from resolution rather than risking a cycle.
        if let Some(parent) = claim.parent_index {
            if parent < index {
                children[parent].push(index);
            }
        }
    }
    BidirectionalTree {
        claims: claims.to_vec(),
        children,
    }
}

/// Resolves the game bottom-up. A claim is countered iff a step landed on it
/// (`countered_by` already set) or at least one of its children survives resolution
/// uncountered; the first surviving child's claimant is recorded as the counter.
/// The challenger wins iff the root claim is countered.
pub fn resolve(tree: &mut BidirectionalTree) -> GameStatus {
    if tree.claims.is_empty() {
        return GameStatus::DefenderWins;
    }
    if resolve_claim(tree, 0) {
        GameStatus::ChallengerWins
    } else {
        GameStatus::DefenderWins
    }
}

fn resolve_claim(tree: &mut BidirectionalTree, index: usize) -> bool {
    let children = tree.children[index].clone();
    let mut countered = tree.claims[index].countered_by != Address::ZERO;
    for child in children {
        if !resolve_claim(tree, child) {
            if tree.claims[index].countered_by == Address::ZERO {
                tree.claims[index].countered_by = tree.claims[child].claimant;
            }
            countered = true;
        }
    }
    countered
}
