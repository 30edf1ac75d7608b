//! Interned goals.

use std::fmt;

use super::handle::{ActionId, GoalId, VariableId};
use crate::value::Value;

pub(crate) type Validity<C> = Box<dyn Fn(&C) -> bool>;

/// An assertion that a variable holds a specific value.
///
/// Obtained through [`Domain::goal`](super::Domain::goal); at most one goal
/// exists per `(variable, value)` pair.
pub struct Goal<C> {
    id: GoalId,
    variable: VariableId,
    value: Value,
    label: String,
    cost: f64,
    pub(crate) achievers: Vec<ActionId>,
    pub(crate) validity: Option<Validity<C>>,
}

impl<C> Goal<C> {
    pub(crate) fn new(id: GoalId, variable: VariableId, value: Value, variable_name: &str) -> Self {
        let label = format!("{variable_name} == {value}");
        Self {
            id,
            variable,
            value,
            label,
            cost: 1.0,
            achievers: Vec::new(),
            validity: None,
        }
    }

    #[inline]
    pub fn id(&self) -> GoalId {
        self.id
    }

    #[inline]
    pub fn variable(&self) -> VariableId {
        self.variable
    }

    #[inline]
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Heuristic cost of leaving this goal open. Defaults to 1.
    #[inline]
    pub fn cost(&self) -> f64 {
        self.cost
    }

    pub(crate) fn set_cost(&mut self, cost: f64) {
        self.cost = cost;
    }

    /// Actions registered as achieving this goal, in registration order.
    #[inline]
    pub fn achievers(&self) -> &[ActionId] {
        &self.achievers
    }

    /// Returns `"<variable> == <value>"`.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Whether an executive should consider this goal for `context`.
    ///
    /// The planner never consults this.
    pub fn is_valid_for(&self, context: &C) -> bool {
        self.validity.as_ref().map_or(true, |valid| valid(context))
    }
}

impl<C> fmt::Display for Goal<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}

impl<C> fmt::Debug for Goal<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Goal")
            .field("id", &self.id)
            .field("label", &self.label)
            .field("cost", &self.cost)
            .field("achievers", &self.achievers)
            .finish()
    }
}
