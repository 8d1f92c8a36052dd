//! Shared helpers for constructing games, applying solver actions, and playing
//! adversary strategies in tests.

use crate::providers::AlphabetTraceProvider;
use crate::{Action, ClaimData, FaultDisputeState, Gindex, Position};
use alloy_primitives::{hex, Address, Bytes, U128};
use thorin_primitives::{Claim, GameStatus};

/// The address the honest challenger submits its actions from.
pub(crate) fn challenger() -> Address {
    Address::repeat_byte(0xaa)
}

/// The address adversarial claims are posted from.
pub(crate) fn opponent() -> Address {
    Address::repeat_byte(0xbb)
}

/// A claim value with no preimage in any trace.
pub(crate) fn junk_claim() -> Claim {
    Claim::from_slice(&hex!(
        "c0ffee00c0de0000000000000000000000000000000000000000000000000000"
    ))
}

/// The [GameBuilder] assembles claim sequences for solver tests, alongside the
/// actions the honest challenger is expected to emit against them.
pub(crate) struct GameBuilder {
    pub provider: AlphabetTraceProvider,
    pub max_depth: u8,
    pub claims: Vec<ClaimData>,
    pub expected_actions: Vec<Action>,
}

impl GameBuilder {
    /// Creates a builder seeded with a root claim, correct or incorrect according to
    /// the alphabet trace.
    pub fn new(max_depth: u8, root_correct: bool) -> Self {
        let provider = AlphabetTraceProvider::new(b'a', max_depth);
        let root_value = if root_correct {
            provider.encode_claim(1)
        } else {
            junk_claim()
        };
        let root = ClaimData {
            value: root_value,
            position: 1,
            parent_index: None,
            contract_index: 0,
            claimant: opponent(),
            countered_by: Address::ZERO,
            bond: U128::ZERO,
            clock: None,
        };
        Self {
            provider,
            max_depth,
            claims: vec![root],
            expected_actions: Vec::new(),
        }
    }

    /// Appends a claim at an arbitrary position countering `parent`, returning its
    /// contract index.
    pub fn push_at(&mut self, parent: usize, position: Position, value: Claim) -> usize {
        let contract_index = self.claims.len();
        self.claims.push(ClaimData {
            value,
            position,
            parent_index: Some(parent),
            contract_index,
            claimant: opponent(),
            countered_by: Address::ZERO,
            bond: U128::ZERO,
            clock: None,
        });
        contract_index
    }

    /// Appends an attack against `parent` with the given value.
    pub fn attack(&mut self, parent: usize, value: Claim) -> usize {
        let position = self.claims[parent].position.attack();
        self.push_at(parent, position, value)
    }

    /// Appends an attack against `parent` carrying the correct trace commitment.
    pub fn attack_correct(&mut self, parent: usize) -> usize {
        let position = self.claims[parent].position.attack();
        self.push_at(parent, position, self.provider.encode_claim(position))
    }

    /// Appends a defense of `parent` with the given value.
    pub fn defend(&mut self, parent: usize, value: Claim) -> usize {
        let position = self.claims[parent].position.defend();
        self.push_at(parent, position, value)
    }

    /// Appends a defense of `parent` carrying the correct trace commitment.
    pub fn defend_correct(&mut self, parent: usize) -> usize {
        let position = self.claims[parent].position.defend();
        self.push_at(parent, position, self.provider.encode_claim(position))
    }

    /// Expects the solver to attack the claim at `parent` with the correct value.
    pub fn expect_attack(&mut self, parent: usize) {
        let position = self.claims[parent].position.attack();
        self.expected_actions.push(Action::Move {
            parent_index: parent,
            is_attack: true,
            value: self.provider.encode_claim(position),
        });
    }

    /// Expects the solver to defend the claim at `parent` with the correct value.
    pub fn expect_defend(&mut self, parent: usize) {
        let position = self.claims[parent].position.defend();
        self.expected_actions.push(Action::Move {
            parent_index: parent,
            is_attack: false,
            value: self.provider.encode_claim(position),
        });
    }

    /// Expects the solver to perform an attacking step against the leaf at `parent`.
    pub fn expect_step_attack(&mut self, parent: usize) {
        let position = self.claims[parent].position;
        self.expected_actions.push(Action::Step {
            parent_index: parent,
            is_attack: true,
            pre_state: self.pre_state(position),
            proof: Bytes::new(),
            oracle_data: None,
        });
    }

    /// Expects the solver to perform a defending step against the leaf at `parent`.
    pub fn expect_step_defend(&mut self, parent: usize) {
        let position = self.claims[parent].position.move_right();
        self.expected_actions.push(Action::Step {
            parent_index: parent,
            is_attack: false,
            pre_state: self.pre_state(position),
            proof: Bytes::new(),
            oracle_data: None,
        });
    }

    /// The raw prestate for the step executed at `position`.
    fn pre_state(&self, position: Position) -> Bytes {
        let trace_index = position.trace_index(self.max_depth);
        if trace_index.is_zero() {
            Bytes::from(vec![self.provider.absolute_prestate])
        } else {
            Bytes::from(vec![self
                .provider
                .state_byte(trace_index - alloy_primitives::U256::from(1))])
        }
    }

    /// Builds the game state for the claims assembled so far.
    pub fn game(&self) -> FaultDisputeState {
        FaultDisputeState::new(
            self.claims.clone(),
            self.claims[0].value,
            GameStatus::InProgress,
            self.max_depth,
        )
    }
}

/// Applies the solver's actions to a game the way the dispute contract would: moves
/// append claims posted by `claimant`, steps mark their target countered.
pub(crate) fn apply_actions(
    game: &FaultDisputeState,
    claimant: Address,
    actions: &[Action],
) -> FaultDisputeState {
    let mut claims = game.claims().to_vec();
    for action in actions {
        match action {
            Action::Move {
                parent_index,
                is_attack,
                value,
            } => {
                let position = claims[*parent_index].position.make_move(*is_attack);
                let contract_index = claims.len();
                claims.push(ClaimData {
                    value: *value,
                    position,
                    parent_index: Some(*parent_index),
                    contract_index,
                    claimant,
                    countered_by: Address::ZERO,
                    bond: U128::ZERO,
                    clock: None,
                });
            }
            Action::Step { parent_index, .. } => {
                claims[*parent_index].countered_by = claimant;
            }
        }
    }
    let root_claim = claims[0].value;
    FaultDisputeState::new(claims, root_claim, GameStatus::InProgress, game.max_depth())
}

/// A single move in an adversary strategy.
#[derive(Debug, Clone, Copy)]
pub(crate) enum ActorMove {
    AttackCorrect,
    AttackIncorrect,
    DefendCorrect,
    DefendIncorrect,
}

/// An adversary that responds to claims each round: either to the most recent claim
/// only (linear play) or to every claim in the game. Duplicate responses, moves from
/// the maximum depth, and defenses of the root are skipped.
pub(crate) struct Actor {
    moves: Vec<ActorMove>,
    respond_all: bool,
}

impl Actor {
    /// An adversary that never moves.
    pub fn nothing() -> Self {
        Self {
            moves: Vec::new(),
            respond_all: false,
        }
    }

    /// An adversary that plays the given moves against the most recent claim.
    pub fn last(moves: &[ActorMove]) -> Self {
        Self {
            moves: moves.to_vec(),
            respond_all: false,
        }
    }

    /// An adversary that plays the given moves against every claim in the game.
    pub fn all(moves: &[ActorMove]) -> Self {
        Self {
            moves: moves.to_vec(),
            respond_all: true,
        }
    }

    /// Applies the strategy to the game, returning the new game state and whether
    /// the adversary has run out of moves.
    pub fn apply(
        &self,
        game: &FaultDisputeState,
        provider: &AlphabetTraceProvider,
    ) -> (FaultDisputeState, bool) {
        let mut claims = game.claims().to_vec();
        let starting_len = claims.len();

        let targets: Vec<usize> = if self.respond_all {
            (0..starting_len).collect()
        } else {
            vec![starting_len - 1]
        };

        for target in targets {
            for actor_move in &self.moves {
                // Each move in a combined strategy responds to the latest claim, so
                // successive moves chain below one another in linear play.
                let target = if self.respond_all {
                    target
                } else {
                    claims.len() - 1
                };
                let parent = claims[target].clone();
                if parent.depth() == game.max_depth() {
                    continue;
                }

                let (is_attack, correct) = match actor_move {
                    ActorMove::AttackCorrect => (true, true),
                    ActorMove::AttackIncorrect => (true, false),
                    ActorMove::DefendCorrect => (false, true),
                    ActorMove::DefendIncorrect => (false, false),
                };
                if !is_attack && parent.position.is_root() {
                    continue;
                }

                let position = parent.position.make_move(is_attack);
                let value = if correct {
                    provider.encode_claim(position)
                } else {
                    junk_claim()
                };
                let duplicate = claims.iter().any(|claim| {
                    claim.value == value
                        && claim.position == position
                        && claim.parent_index == Some(target)
                });
                if duplicate {
                    continue;
                }

                let contract_index = claims.len();
                claims.push(ClaimData {
                    value,
                    position,
                    parent_index: Some(target),
                    contract_index,
                    claimant: opponent(),
                    countered_by: Address::ZERO,
                    bond: U128::ZERO,
                    clock: None,
                });
            }
        }

        let quiescent = claims.len() == starting_len;
        let root_claim = claims[0].value;
        (
            FaultDisputeState::new(claims, root_claim, GameStatus::InProgress, game.max_depth()),
            quiescent,
        )
    }
}
