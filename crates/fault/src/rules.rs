//! This module contains the validation rules every candidate [Action] must satisfy
//! against a game state. The rules gate the solver's output in tests and serve as a
//! diagnostic oracle: failures are accumulated so a single check reports every
//! violated rule at once.

use crate::{Action, ClaimData, FaultDisputeState, Gindex, Position, TraceProvider};
use alloy_primitives::U256;
use anyhow::{anyhow, Result};
use thorin_primitives::join_errors;

/// Returns the position the given action's claim (or step) lands on: the attack or
/// defend child of the parent's position for a move, and the parent's own position
/// for a step.
///
/// # Panics
/// Panics if the action defends a claim at the root position; the root cannot be
/// defended, so such an action has no resulting position.
pub fn resulting_position(game: &FaultDisputeState, action: &Action) -> Position {
    try_resulting_position(game, action).expect("a defense of the root has no resulting position")
}

/// The non-panicking form of [resulting_position] used by the rules: `None` for a
/// defense of the root, which [do_not_defend_root_claim] reports.
fn try_resulting_position(game: &FaultDisputeState, action: &Action) -> Option<Position> {
    let parent_position = game.claims()[action.parent_index()].position;
    match action {
        Action::Step { .. } => Some(parent_position),
        Action::Move { is_attack, .. } => {
            if !is_attack && parent_position.is_root() {
                return None;
            }
            Some(parent_position.make_move(*is_attack))
        }
    }
}

/// Validates a candidate [Action] against the game, evaluating every rule and joining
/// the failures. Parent existence is checked up front since the remaining rules index
/// the parent claim.
pub async fn check_rules<P>(
    game: &FaultDisputeState,
    action: &Action,
    correct_trace: &P,
) -> Result<()>
where
    P: TraceProvider + Sync,
{
    parent_must_exist(game, action)?;
    join_errors([
        only_step_at_max_depth(game, action),
        only_move_before_max_depth(game, action),
        do_not_duplicate_existing_moves(game, action),
        do_not_defend_root_claim(game, action),
        avoid_poisoned_prestate(game, action, correct_trace).await,
        detect_poisoned_step_prestate(game, action, correct_trace).await,
        detect_failed_step(game, action, correct_trace).await,
    ])
}

fn parent_must_exist(game: &FaultDisputeState, action: &Action) -> Result<()> {
    if action.parent_index() >= game.claims().len() {
        return Err(anyhow!(
            "parent claim {} does not exist in game with {} claims",
            action.parent_index(),
            game.claims().len()
        ));
    }
    Ok(())
}

fn only_step_at_max_depth(game: &FaultDisputeState, action: &Action) -> Result<()> {
    if !action.is_move() {
        return Ok(());
    }
    let parent_depth = game.claims()[action.parent_index()].depth();
    if parent_depth >= game.max_depth() {
        return Err(anyhow!(
            "parent at max depth ({}) but attempting to perform a move action instead of a step",
            parent_depth
        ));
    }
    Ok(())
}

fn only_move_before_max_depth(game: &FaultDisputeState, action: &Action) -> Result<()> {
    if action.is_move() {
        return Ok(());
    }
    let parent_depth = game.claims()[action.parent_index()].depth();
    if parent_depth < game.max_depth() {
        return Err(anyhow!(
            "parent ({}) not at max depth ({}) but attempting to perform a step action instead of a move",
            parent_depth,
            game.max_depth()
        ));
    }
    Ok(())
}

fn do_not_duplicate_existing_moves(game: &FaultDisputeState, action: &Action) -> Result<()> {
    let Action::Move { value, .. } = action else {
        return Ok(());
    };
    let Some(position) = try_resulting_position(game, action) else {
        return Ok(());
    };
    let candidate = ClaimData::new_move(*value, position, action.parent_index());
    if game.is_duplicate(&candidate) {
        return Err(anyhow!(
            "creating duplicate claim at gindex {} with value {}",
            candidate.position,
            candidate.value
        ));
    }
    Ok(())
}

fn do_not_defend_root_claim(game: &FaultDisputeState, action: &Action) -> Result<()> {
    if game.claims()[action.parent_index()].is_root_position() && !action.is_attack() {
        return Err(anyhow!(
            "defending the root claim at idx {}",
            action.parent_index()
        ));
    }
    Ok(())
}

/// A move implicitly relies on the closest claim left of it as the prestate of a
/// future step. If that claim is dishonest, the mover can be stepped on and lose.
async fn avoid_poisoned_prestate<P>(
    game: &FaultDisputeState,
    action: &Action,
    correct_trace: &P,
) -> Result<()>
where
    P: TraceProvider + Sync,
{
    if !action.is_move() {
        return Ok(());
    }
    let Some(move_position) = try_resulting_position(game, action) else {
        return Ok(());
    };
    if move_position.depth() > game.max_depth() {
        // only_step_at_max_depth reports this case; there is no trace index to check.
        return Ok(());
    }
    let honest_trace_index = move_position.trace_index(game.max_depth());

    let parent = &game.claims()[action.parent_index()];
    let Some(prestate_claim) = game.closest_left_ancestor(parent, honest_trace_index)? else {
        // No claim left of the honest claim, so the prestate cannot have been poisoned.
        return Ok(());
    };

    let correct_value = correct_trace.state_hash(prestate_claim.position).await?;
    if correct_value != prestate_claim.value {
        return Err(anyhow!(
            "prestate poisoned: claim {} has an invalid prestate and is left of the honest claim countering {} at trace index {}",
            prestate_claim.contract_index,
            action.parent_index(),
            honest_trace_index
        ));
    }
    Ok(())
}

/// Actions that land a claim at the maximum depth must have an honest prestate on
/// their ancestor path, since the adversary will step from it.
async fn detect_poisoned_step_prestate<P>(
    game: &FaultDisputeState,
    action: &Action,
    correct_trace: &P,
) -> Result<()>
where
    P: TraceProvider + Sync,
{
    let Some(position) = try_resulting_position(game, action) else {
        return Ok(());
    };
    if position.depth() != game.max_depth() {
        return Ok(());
    }
    let mut prestate_index = position.trace_index(game.max_depth());
    // A leaf claim posted with a move will be attacked from the index before it, as
    // will the leaf replayed by an attacking step.
    if action.is_attack() || action.is_move() {
        match prestate_index.checked_sub(U256::from(1)) {
            Some(index) => prestate_index = index,
            // The absolute prestate is canonical and cannot be poisoned.
            None => return Ok(()),
        }
    }

    let parent = &game.claims()[action.parent_index()];
    let Some(prestate_claim) = game.ancestor_with_trace_index(parent, prestate_index)? else {
        return Err(anyhow!(
            "did not find required prestate at trace index {} to counter claim {}",
            prestate_index,
            action.parent_index()
        ));
    };

    let correct_value = correct_trace.state_hash(prestate_claim.position).await?;
    if correct_value != prestate_claim.value {
        if action.is_move() {
            return Err(anyhow!(
                "posting leaf claim with poisoned prestate from claim {} when countering {}",
                prestate_claim.contract_index,
                action.parent_index()
            ));
        }
        return Err(anyhow!(
            "stepping from poisoned prestate at claim {} when countering {}",
            prestate_claim.contract_index,
            action.parent_index()
        ));
    }
    Ok(())
}

/// A step only counters its parent if the validity of the executed step disagrees
/// with the parity of the claim path between the parent and the poststate claim.
async fn detect_failed_step<P>(
    game: &FaultDisputeState,
    action: &Action,
    correct_trace: &P,
) -> Result<()>
where
    P: TraceProvider + Sync,
{
    if action.is_move() {
        return Ok(());
    }
    let position = game.claims()[action.parent_index()].position;
    if position.depth() != game.max_depth() {
        // only_move_before_max_depth reports this case.
        return Ok(());
    }
    let mut poststate_index = position.trace_index(game.max_depth());
    if !action.is_attack() {
        // A defending step executes the index after the leaf.
        poststate_index += U256::from(1);
    }

    let parent = &game.claims()[action.parent_index()];
    let Some(poststate_claim) = game.ancestor_with_trace_index(parent, poststate_index)? else {
        return Err(anyhow!(
            "did not find required poststate at trace index {} to counter claim {}",
            poststate_index,
            action.parent_index()
        ));
    };

    let correct_value = correct_trace.state_hash(poststate_claim.position).await?;
    let valid_step = correct_value == poststate_claim.value;
    let parent_post_agree = (parent.depth() - poststate_claim.depth()) % 2 == 0;
    if parent_post_agree == valid_step {
        return Err(anyhow!(
            "step against claim {} does not counter it: validity {} agrees with the claim path",
            action.parent_index(),
            valid_step
        ));
    }
    Ok(())
}
