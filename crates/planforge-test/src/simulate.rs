//! Forward execution of plans against a [`WorldState`].
//!
//! Actions are applied by writing each effect's value under the effect
//! variable's name. Preconditions are checked against the evolving world.

use planforge_core::{ActionId, Domain, GoalId};
use thiserror::Error;

use crate::world::WorldState;

/// A precondition that did not hold when its action was about to run.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("step {step} ({action}) needs {goal} which does not hold")]
pub struct SimulationError {
    pub step: usize,
    pub action: String,
    pub goal: String,
}

/// Returns true if `goal` holds in `world`.
pub fn goal_holds<B>(domain: &Domain<WorldState, B>, goal: GoalId, world: &WorldState) -> bool {
    let info = domain.get_goal(goal);
    let name = domain.get_variable(info.variable()).name();
    match world.get(name) {
        Some(value) => value == info.value(),
        None => domain.is_goal_true_for(goal, world),
    }
}

/// Runs `actions` in order starting from `world`, returning the final world.
pub fn simulate<B>(
    domain: &Domain<WorldState, B>,
    actions: &[ActionId],
    world: &WorldState,
) -> Result<WorldState, SimulationError> {
    let mut world = world.clone();
    for (step, &id) in actions.iter().enumerate() {
        let action = domain.get_action(id);
        for &precondition in action.preconditions() {
            if !goal_holds(domain, precondition, &world) {
                return Err(SimulationError {
                    step,
                    action: action.name().to_string(),
                    goal: domain.get_goal(precondition).label().to_string(),
                });
            }
        }
        for effect in action.effects() {
            let info = domain.get_goal(effect);
            let name = domain.get_variable(info.variable()).name();
            world.set(name, info.value().clone());
        }
    }
    Ok(world)
}
