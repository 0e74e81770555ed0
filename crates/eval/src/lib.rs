//! Rollout eval crate - scores a single move by the change it makes to the board.

use rollout_core::{Action, Metrics, Simulator};
use serde::{Deserialize, Serialize};

/// Score of any transition that ends the game, whatever else changed.
pub const LOSS_VALUE: f32 = -10000.0;

/// Linear weights over the state deltas of one move.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ValueWeights {
    pub lines: f32,
    pub holes: f32,
    pub top_blocked: f32,
    pub agg_blocked: f32,
    pub height_gain: f32,
}

impl Default for ValueWeights {
    fn default() -> Self {
        Self {
            lines: 50.0,
            holes: 0.0,
            top_blocked: -10.0,
            agg_blocked: 0.0,
            height_gain: -25.0,
        }
    }
}

/// What one move changed. `height_gain` is positive when the stack got shorter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StateDelta {
    pub lines_cleared: i32,
    pub height_gain: i32,
    pub new_holes: i32,
    pub top_blocked: i32,
    pub agg_top_blocked: i32,
    pub lost: bool,
}

impl StateDelta {
    pub fn between(before: &Metrics, after: &Metrics) -> Self {
        Self {
            lines_cleared: after.lines as i32 - before.lines as i32,
            height_gain: before.height as i32 - after.height as i32,
            new_holes: after.holes as i32 - before.holes as i32,
            top_blocked: after.top_blocked as i32 - before.top_blocked as i32,
            agg_top_blocked: after.agg_blocked as i32 - before.agg_blocked as i32,
            lost: after.lost,
        }
    }
}

pub fn value_of_action(delta: &StateDelta, weights: &ValueWeights) -> f32 {
    if delta.lost {
        return LOSS_VALUE;
    }
    delta.lines_cleared as f32 * weights.lines
        + delta.new_holes as f32 * weights.holes
        + delta.top_blocked as f32 * weights.top_blocked
        + delta.agg_top_blocked as f32 * weights.agg_blocked
        + delta.height_gain as f32 * weights.height_gain
}

/// [`value_of_action`] with the default weights, taking the deltas positionally.
pub fn value_of_action_raw(
    lines_cleared: i32,
    height_gain: i32,
    new_holes: i32,
    top_blocked: i32,
    agg_top_blocked: i32,
    lost: bool,
) -> f32 {
    let delta = StateDelta {
        lines_cleared,
        height_gain,
        new_holes,
        top_blocked,
        agg_top_blocked,
        lost,
    };
    value_of_action(&delta, &ValueWeights::default())
}

/// Play `action` on `sim` (mutating it) and score the transition.
pub fn value_of_action_on_board<S: Simulator>(
    action: Action,
    sim: &mut S,
    weights: &ValueWeights,
) -> f32 {
    let before = sim.metrics();
    sim.play_action(action);
    let after = sim.metrics();
    value_of_action(&StateDelta::between(&before, &after), weights)
}

/// Score the transition between two existing states without touching either.
pub fn value_between_boards<S: Simulator>(before: &S, after: &S, weights: &ValueWeights) -> f32 {
    value_of_action(
        &StateDelta::between(&before.metrics(), &after.metrics()),
        weights,
    )
}
