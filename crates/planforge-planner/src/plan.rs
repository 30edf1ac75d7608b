//! The finished artifact of a successful planning call.

use std::collections::BTreeMap;
use std::fmt;

use planforge_core::{Action, ActionId, Domain, GoalId, Value, VariableId};
use thiserror::Error;

/// A forward-ordered sequence of actions achieving a goal.
///
/// Plans hold handles; look the actions up in the domain that produced the
/// plan to reach their names and behaviors.
#[derive(Debug, Clone, PartialEq)]
pub struct Plan {
    goal: GoalId,
    actions: Vec<ActionId>,
    cost: f64,
}

impl Plan {
    pub fn new(goal: GoalId, actions: Vec<ActionId>, cost: f64) -> Self {
        Self {
            goal,
            actions,
            cost,
        }
    }

    /// The goal this plan achieves.
    #[inline]
    pub fn goal(&self) -> GoalId {
        self.goal
    }

    /// Actions in execution order.
    #[inline]
    pub fn actions(&self) -> &[ActionId] {
        &self.actions
    }

    /// Summed cost of the actions.
    #[inline]
    pub fn cost(&self) -> f64 {
        self.cost
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Resolves the actions against `domain`, in execution order.
    pub fn steps<'d, C, B>(
        &'d self,
        domain: &'d Domain<C, B>,
    ) -> impl Iterator<Item = &'d Action<B>> + 'd {
        self.actions.iter().map(move |id| domain.get_action(*id))
    }

    /// Renders the plan as `[A, B, C]` using action names from `domain`.
    pub fn display<'a, C, B>(&'a self, domain: &'a Domain<C, B>) -> PlanDisplay<'a, C, B> {
        PlanDisplay { plan: self, domain }
    }

    /// Simulates the plan forward. See [`verify_plan`].
    pub fn verify<C: PartialEq + Clone, B>(
        &self,
        domain: &Domain<C, B>,
        context: &C,
    ) -> Result<(), VerificationError> {
        verify_plan(domain, self, context)
    }
}

impl<'a> IntoIterator for &'a Plan {
    type Item = &'a ActionId;
    type IntoIter = std::slice::Iter<'a, ActionId>;

    fn into_iter(self) -> Self::IntoIter {
        self.actions.iter()
    }
}

/// [`Display`](fmt::Display) adapter returned by [`Plan::display`].
pub struct PlanDisplay<'a, C, B> {
    plan: &'a Plan,
    domain: &'a Domain<C, B>,
}

impl<C, B> fmt::Display for PlanDisplay<'_, C, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, action) in self.plan.steps(self.domain).enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            f.write_str(action.name())?;
        }
        f.write_str("]")
    }
}

/// Why a plan does not hold up when simulated forward.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VerificationError {
    #[error("step {step} ({action}) needs {goal}, which does not hold at that point")]
    PreconditionUnmet {
        step: usize,
        action: String,
        goal: String,
    },

    #[error("{goal} does not hold after the last step")]
    GoalNotReached { goal: String },
}

/// Checks a plan against the domain model alone.
///
/// Each variable starts at its current value for `context` and takes the
/// value of any effect on it as actions run. Every precondition must hold
/// when its action runs, and the plan's goal must hold at the end. This is
/// the open-loop guarantee: the world is assumed to change only through the
/// plan's own actions.
///
/// # Errors
///
/// Returns the first unmet precondition, or [`VerificationError::GoalNotReached`].
pub fn verify_plan<C: PartialEq + Clone, B>(
    domain: &Domain<C, B>,
    plan: &Plan,
    context: &C,
) -> Result<(), VerificationError> {
    let mut known: BTreeMap<VariableId, Value> = BTreeMap::new();

    for (step, action) in plan.steps(domain).enumerate() {
        for &precondition in action.preconditions() {
            if !holds(domain, &known, precondition, context) {
                return Err(VerificationError::PreconditionUnmet {
                    step,
                    action: action.name().to_string(),
                    goal: domain.get_goal(precondition).label().to_string(),
                });
            }
        }
        for effect in action.effects() {
            let effect = domain.get_goal(effect);
            known.insert(effect.variable(), effect.value().clone());
        }
    }

    if !holds(domain, &known, plan.goal(), context) {
        return Err(VerificationError::GoalNotReached {
            goal: domain.get_goal(plan.goal()).label().to_string(),
        });
    }
    Ok(())
}

fn holds<C: PartialEq + Clone, B>(
    domain: &Domain<C, B>,
    known: &BTreeMap<VariableId, Value>,
    goal: GoalId,
    context: &C,
) -> bool {
    let goal_info = domain.get_goal(goal);
    match known.get(&goal_info.variable()) {
        Some(value) => value == goal_info.value(),
        None => domain.is_goal_true_for(goal, context),
    }
}
