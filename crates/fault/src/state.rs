//! This module contains the in-memory representation of a fault dispute game's state.

use crate::{create_bidirectional_tree, resolve, Clock, Gindex, Position};
use alloy_primitives::{Address, U128, U256};
use anyhow::{anyhow, Result};
use std::collections::{HashMap, HashSet};
use thorin_primitives::{Claim, DisputeGame, GameStatus};

/// The [ClaimData] struct holds the data associated with a single claim within a fault
/// dispute game's claim sequence on-chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClaimData {
    /// The commitment made at this claim's position.
    pub value: Claim,
    /// The position of the claim within the game's position tree.
    pub position: Position,
    /// The index of the claim this one counters, or `None` for the root claim.
    pub parent_index: Option<usize>,
    /// The index of this claim within the game's claim sequence.
    pub contract_index: usize,
    /// The address that posted the claim.
    pub claimant: Address,
    /// The address whose step countered this claim, or zero if uncountered.
    pub countered_by: Address,
    /// The bond posted with the claim.
    pub bond: U128,
    /// The chess clock snapshot taken when the claim was posted.
    pub clock: Option<Clock>,
}

impl ClaimData {
    /// Creates the claim record for a fresh counter move. The contract index is
    /// assigned once the claim is accepted into a game.
    pub fn new_move(value: Claim, position: Position, parent_index: usize) -> Self {
        Self {
            value,
            position,
            parent_index: Some(parent_index),
            contract_index: 0,
            claimant: Address::ZERO,
            countered_by: Address::ZERO,
            bond: U128::ZERO,
            clock: None,
        }
    }

    /// Returns whether this claim is the root of the claim DAG, i.e. it counters no
    /// other claim.
    pub fn is_root(&self) -> bool {
        self.parent_index.is_none()
    }

    /// Returns whether this claim sits at the root position of the position tree.
    /// Distinct from [Self::is_root] only in pathological game data.
    pub fn is_root_position(&self) -> bool {
        self.position.is_root()
    }

    /// Returns the depth of the claim's position.
    pub fn depth(&self) -> u8 {
        self.position.depth()
    }

    /// Returns the trace index the claim's position commits to.
    pub fn trace_index(&self, max_depth: u8) -> U256 {
        self.position.trace_index(max_depth)
    }

    /// The key duplicate detection is performed over.
    fn dedup_key(&self) -> (Claim, Position, Option<usize>) {
        (self.value, self.position, self.parent_index)
    }
}

/// The [AgreedClaimTracker] records the contract indices of claims the solver itself
/// made (or would have made), so that it never counters its own moves.
#[derive(Debug, Clone, Default)]
pub struct AgreedClaimTracker(HashSet<usize>);

impl AgreedClaimTracker {
    /// Marks the claim at the given contract index as one of the solver's own.
    pub fn add(&mut self, contract_index: usize) {
        self.0.insert(contract_index);
    }

    /// Returns whether the claim at the given contract index is one of the solver's
    /// own.
    pub fn is_agreed(&self, contract_index: usize) -> bool {
        self.0.contains(&contract_index)
    }
}

/// The [FaultDisputeState] struct holds the in-memory representation of a fault
/// dispute game's claim sequence, alongside the lookup structures the solver and the
/// action validator walk.
#[derive(Debug, Clone)]
pub struct FaultDisputeState {
    /// The game's claims in insertion order. The state is a directed acyclic graph of
    /// claims pointing at their parents, all the way up to the root claim.
    claims: Vec<ClaimData>,
    /// The root claim, committing to the entirety of the backend VM's trace.
    root_claim: Claim,
    /// The status of the dispute game.
    status: GameStatus,
    /// The depth at which bisection stops and VM steps begin.
    max_depth: u8,
    /// Index over `(value, position, parent_index)` for duplicate detection.
    claim_index: HashMap<(Claim, Position, Option<usize>), usize>,
}

impl FaultDisputeState {
    /// Creates a new [FaultDisputeState] from a dense claim sequence, building the
    /// duplicate-detection index as it goes.
    pub fn new(
        claims: Vec<ClaimData>,
        root_claim: Claim,
        status: GameStatus,
        max_depth: u8,
    ) -> Self {
        let claim_index = claims
            .iter()
            .enumerate()
            .map(|(i, claim)| (claim.dedup_key(), i))
            .collect();
        Self {
            claims,
            root_claim,
            status,
            max_depth,
            claim_index,
        }
    }

    /// Returns the game's claims in insertion order.
    pub fn claims(&self) -> &[ClaimData] {
        &self.claims
    }

    /// Returns the claim at the given contract index.
    pub fn claim(&self, index: usize) -> Result<&ClaimData> {
        self.claims
            .get(index)
            .ok_or_else(|| anyhow!("no claim at index {} in game with {} claims", index, self.claims.len()))
    }

    /// Returns the maximum depth of the game's position tree.
    pub fn max_depth(&self) -> u8 {
        self.max_depth
    }

    /// Returns the parent of the given claim.
    pub fn parent_of(&self, claim: &ClaimData) -> Result<&ClaimData> {
        let parent_index = claim
            .parent_index
            .ok_or_else(|| anyhow!("claim {} is the root claim and has no parent", claim.contract_index))?;
        self.claim(parent_index)
    }

    /// Walks up the ancestor chain of the given claim (starting with the claim itself)
    /// and returns the first claim whose trace index equals `trace_index`, or `None`
    /// if no ancestor commits to it.
    pub fn ancestor_with_trace_index<'a>(
        &'a self,
        claim: &'a ClaimData,
        trace_index: U256,
    ) -> Result<Option<&'a ClaimData>> {
        let mut current = claim;
        loop {
            if current.trace_index(self.max_depth) == trace_index {
                return Ok(Some(current));
            }
            if current.is_root() {
                return Ok(None);
            }
            current = self.parent_of(current)?;
        }
    }

    /// Walks up the ancestor chain of the given claim (starting with the claim itself)
    /// and returns the claim with the greatest trace index still strictly below
    /// `bound`, or `None` if every ancestor commits at or beyond it.
    pub fn closest_left_ancestor<'a>(
        &'a self,
        claim: &'a ClaimData,
        bound: U256,
    ) -> Result<Option<&'a ClaimData>> {
        let mut closest: Option<&ClaimData> = None;
        let mut current = claim;
        loop {
            let current_index = current.trace_index(self.max_depth);
            if current_index < bound
                && closest.map_or(true, |c| c.trace_index(self.max_depth) < current_index)
            {
                closest = Some(current);
            }
            if current.is_root() {
                return Ok(closest);
            }
            current = self.parent_of(current)?;
        }
    }

    /// Returns whether the candidate claim duplicates an existing claim, keyed on
    /// `(value, position, parent_index)`.
    pub fn is_duplicate(&self, candidate: &ClaimData) -> bool {
        self.claim_index.contains_key(&candidate.dedup_key())
    }

    /// Returns the contract index of the existing claim the candidate duplicates, if
    /// any.
    pub fn find_duplicate(&self, candidate: &ClaimData) -> Option<usize> {
        self.claim_index.get(&candidate.dedup_key()).copied()
    }
}

impl DisputeGame for FaultDisputeState {
    fn root_claim(&self) -> Claim {
        self.root_claim
    }

    fn status(&self) -> GameStatus {
        self.status
    }

    fn resolve(&mut self) -> GameStatus {
        let mut tree = create_bidirectional_tree(&self.claims);
        self.status = resolve(&mut tree);
        // Resolution records which surviving child countered each claim.
        self.claims = tree.claims;
        self.status
    }
}
