//! Domain model: variables, goals, actions and the achiever graph.
//!
//! A [`Domain`] owns every object the planner reasons about, plus the
//! identity source that numbers them and the intern table that keeps goals
//! unique. Domains are configured once and then shared read-only with the
//! planner; only the per-variable value caches change afterwards.
//!
//! # Type Parameters
//! * `C` - The execution context variables are evaluated against
//! * `B` - The opaque behavior handle stored on each action

mod action;
mod goal;
mod handle;
mod variable;

use std::collections::HashMap;
use std::fmt;

use crate::error::{DomainError, Result};
use crate::uid::UidSource;
use crate::value::Value;

pub use action::{Action, ActionBuilder};
pub use goal::Goal;
pub use handle::{ActionId, GoalId, VariableId};
pub use variable::{Variable, VariableInfo};

/// Registry of all variables, goals and actions for one planning domain.
///
/// Handles returned by a domain are only valid for that domain.
///
/// # Example
///
/// ```
/// use planforge_core::Domain;
///
/// let mut domain: Domain<u32> = Domain::new();
/// let hungry = domain.add_variable("hungry", |agent: &u32| *agent == 7);
///
/// let fed = domain.goal(hungry, false);
/// assert_eq!(domain.goal(hungry, false), fed);
///
/// assert!(domain.is_goal_true_for(fed, &3));
/// assert!(!domain.is_goal_true_for(fed, &7));
/// ```
pub struct Domain<C, B = ()> {
    uids: UidSource,
    variables: Vec<VariableInfo<C>>,
    goals: Vec<Goal<C>>,
    goal_table: HashMap<(VariableId, Value), GoalId>,
    actions: Vec<Action<B>>,
}

impl<C, B> Domain<C, B> {
    pub fn new() -> Self {
        Self {
            uids: UidSource::new(),
            variables: Vec::new(),
            goals: Vec::new(),
            goal_table: HashMap::new(),
            actions: Vec::new(),
        }
    }

    /// Registers a variable computed by `provider`.
    pub fn add_variable<T, F>(&mut self, name: impl Into<String>, provider: F) -> Variable<T>
    where
        T: Into<Value>,
        F: Fn(&C) -> T + 'static,
    {
        let id = VariableId::new(self.uids.next_uid(), self.variables.len());
        let provider = Box::new(move |context: &C| provider(context).into());
        self.variables
            .push(VariableInfo::new(id, name.into(), provider));
        Variable::new(id)
    }

    #[inline]
    pub fn get_variable(&self, id: VariableId) -> &VariableInfo<C> {
        &self.variables[id.slot()]
    }

    /// Looks a variable up by name.
    pub fn variable_by_name(&self, name: &str) -> Result<VariableId> {
        self.variables
            .iter()
            .find(|v| v.name() == name)
            .map(VariableInfo::id)
            .ok_or_else(|| DomainError::UnknownVariable(name.to_string()))
    }

    pub fn variables(&self) -> impl Iterator<Item = &VariableInfo<C>> {
        self.variables.iter()
    }

    /// Clears every variable's cached value.
    ///
    /// Call once before each planning episode so values are recomputed for
    /// the current state of the world.
    pub fn invalidate_cached_values(&self) {
        for variable in &self.variables {
            variable.invalidate();
        }
    }

    /// Returns the goal that `variable` holds `value`, creating it on first use.
    pub fn goal<T: Into<Value>>(&mut self, variable: Variable<T>, value: T) -> GoalId {
        self.intern_goal(variable.id(), value.into())
    }

    /// Untyped form of [`goal`](Self::goal).
    pub fn intern_goal(&mut self, variable: VariableId, value: Value) -> GoalId {
        if let Some(&goal) = self.goal_table.get(&(variable, value.clone())) {
            return goal;
        }

        let id = GoalId::new(self.uids.next_uid(), self.goals.len());
        let name = self.variables[variable.slot()].name();
        self.goals.push(Goal::new(id, variable, value.clone(), name));
        self.goal_table.insert((variable, value), id);
        id
    }

    /// Returns the goal for `(variable, value)` only if it already exists.
    pub fn find_goal<T: Into<Value>>(&self, variable: Variable<T>, value: T) -> Option<GoalId> {
        self.goal_table.get(&(variable.id(), value.into())).copied()
    }

    #[inline]
    pub fn get_goal(&self, id: GoalId) -> &Goal<C> {
        &self.goals[id.slot()]
    }

    pub fn goals(&self) -> impl Iterator<Item = &Goal<C>> {
        self.goals.iter()
    }

    /// Sets the heuristic cost charged while the goal is still open.
    pub fn set_goal_cost(&mut self, goal: GoalId, cost: f64) {
        self.goals[goal.slot()].set_cost(cost);
    }

    /// Restricts when an executive considers `goal`. The planner ignores this.
    pub fn valid_when<F>(&mut self, goal: GoalId, predicate: F)
    where
        F: Fn(&C) -> bool + 'static,
    {
        self.goals[goal.slot()].validity = Some(Box::new(predicate));
    }

    pub fn is_goal_valid_for(&self, goal: GoalId, context: &C) -> bool {
        self.goals[goal.slot()].is_valid_for(context)
    }

    /// Actions registered as achieving `goal`.
    #[inline]
    pub fn achievers(&self, goal: GoalId) -> &[ActionId] {
        self.goals[goal.slot()].achievers()
    }

    /// Registers an action and returns a builder to configure it.
    pub fn add_action(&mut self, name: impl Into<String>, behavior: B) -> ActionBuilder<'_, C, B> {
        let id = ActionId::new(self.uids.next_uid(), self.actions.len());
        self.actions.push(Action::new(id, name.into(), behavior));
        ActionBuilder::new(self, id)
    }

    /// Reopens the builder for an existing action.
    pub fn action_mut(&mut self, id: ActionId) -> ActionBuilder<'_, C, B> {
        ActionBuilder::new(self, id)
    }

    #[inline]
    pub fn get_action(&self, id: ActionId) -> &Action<B> {
        &self.actions[id.slot()]
    }

    pub fn actions(&self) -> impl Iterator<Item = &Action<B>> {
        self.actions.iter()
    }

    /// Checks the configuration for mistakes the planner does not guard against.
    ///
    /// # Errors
    ///
    /// Returns the first invalid action or goal cost, or action without effects.
    pub fn validate(&self) -> Result<()> {
        for action in &self.actions {
            if !is_valid_cost(action.cost()) {
                return Err(DomainError::InvalidCost {
                    action: action.name().to_string(),
                    cost: action.cost(),
                });
            }
            if action.effect_count() == 0 {
                return Err(DomainError::NoEffects {
                    action: action.name().to_string(),
                });
            }
        }

        for goal in &self.goals {
            if !is_valid_cost(goal.cost()) {
                return Err(DomainError::InvalidGoalCost {
                    goal: goal.label().to_string(),
                    cost: goal.cost(),
                });
            }
        }

        Ok(())
    }
}

impl<C: PartialEq + Clone, B> Domain<C, B> {
    /// Returns the current (cached) value of `variable` for `context`.
    pub fn value_for(&self, variable: VariableId, context: &C) -> Value {
        self.variables[variable.slot()].value_for(context)
    }

    /// Returns true if the goal's variable currently holds the goal's value.
    pub fn is_goal_true_for(&self, goal: GoalId, context: &C) -> bool {
        let goal = &self.goals[goal.slot()];
        self.value_for(goal.variable(), context) == *goal.value()
    }
}

impl<C, B> Default for Domain<C, B> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C, B> fmt::Debug for Domain<C, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Domain")
            .field("variables", &self.variables.len())
            .field("goals", &self.goals.len())
            .field("actions", &self.actions.len())
            .finish()
    }
}

fn is_valid_cost(cost: f64) -> bool {
    cost.is_finite() && cost >= 0.0
}

#[cfg(test)]
mod tests;
