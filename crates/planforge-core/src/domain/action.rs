//! Planning operators.

use std::collections::BTreeSet;
use std::fmt;

use smallvec::SmallVec;

use super::handle::{ActionId, GoalId};
use super::Domain;

/// A named operator with a cost, ordered preconditions and a set of effects.
///
/// The behavior `B` is an opaque handle for whatever executes the action.
/// The planner stores it and hands it back inside plans but never invokes it.
pub struct Action<B> {
    id: ActionId,
    name: String,
    cost: f64,
    preconditions: SmallVec<[GoalId; 4]>,
    effects: BTreeSet<GoalId>,
    behavior: B,
}

impl<B> Action<B> {
    pub(crate) fn new(id: ActionId, name: String, behavior: B) -> Self {
        Self {
            id,
            name,
            cost: 1.0,
            preconditions: SmallVec::new(),
            effects: BTreeSet::new(),
            behavior,
        }
    }

    #[inline]
    pub fn id(&self) -> ActionId {
        self.id
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Cost of performing the action. Defaults to 1.
    #[inline]
    pub fn cost(&self) -> f64 {
        self.cost
    }

    /// Goals that must hold before the action runs, in declaration order.
    #[inline]
    pub fn preconditions(&self) -> &[GoalId] {
        &self.preconditions
    }

    /// Goals that become true when the action succeeds.
    pub fn effects(&self) -> impl Iterator<Item = GoalId> + '_ {
        self.effects.iter().copied()
    }

    #[inline]
    pub fn has_effect(&self, goal: GoalId) -> bool {
        self.effects.contains(&goal)
    }

    pub(crate) fn effect_count(&self) -> usize {
        self.effects.len()
    }

    #[inline]
    pub fn behavior(&self) -> &B {
        &self.behavior
    }
}

impl<B> fmt::Display for Action<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl<B> fmt::Debug for Action<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Action")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("cost", &self.cost)
            .field("preconditions", &self.preconditions)
            .field("effects", &self.effects)
            .finish()
    }
}

/// Fluent configuration of an action already registered in a domain.
///
/// Every call applies to the domain immediately; dropping the builder keeps
/// what was configured.
///
/// # Example
///
/// ```
/// use planforge_core::Domain;
///
/// let mut domain: Domain<()> = Domain::new();
/// let has_axe = domain.add_variable("has_axe", |_: &()| true);
/// let has_wood = domain.add_variable("has_wood", |_: &()| false);
/// let axe = domain.goal(has_axe, true);
/// let wood = domain.goal(has_wood, true);
///
/// let chop = domain
///     .add_action("ChopWood", ())
///     .needs([axe])
///     .achieves([wood])
///     .cost(2.0)
///     .id();
///
/// assert_eq!(domain.achievers(wood), &[chop]);
/// ```
pub struct ActionBuilder<'d, C, B> {
    domain: &'d mut Domain<C, B>,
    id: ActionId,
}

impl<'d, C, B> ActionBuilder<'d, C, B> {
    pub(crate) fn new(domain: &'d mut Domain<C, B>, id: ActionId) -> Self {
        Self { domain, id }
    }

    /// Sets the action cost.
    pub fn cost(self, cost: f64) -> Self {
        self.domain.actions[self.id.slot()].cost = cost;
        self
    }

    /// Sets the preconditions, replacing any set by an earlier call.
    ///
    /// Order matters: preconditions are pushed onto the open subgoals in
    /// this order, so the last one listed is pursued first.
    pub fn needs(self, goals: impl IntoIterator<Item = GoalId>) -> Self {
        self.domain.actions[self.id.slot()].preconditions = goals.into_iter().collect();
        self
    }

    /// Adds effects and registers the action as an achiever of each.
    ///
    /// Adding an effect the action already has is a no-op, so achiever
    /// lists never hold duplicates.
    pub fn achieves(self, goals: impl IntoIterator<Item = GoalId>) -> Self {
        for goal in goals {
            if self.domain.actions[self.id.slot()].effects.insert(goal) {
                self.domain.goals[goal.slot()].achievers.push(self.id);
            }
        }
        self
    }

    #[inline]
    pub fn id(&self) -> ActionId {
        self.id
    }
}

impl<C, B> From<ActionBuilder<'_, C, B>> for ActionId {
    fn from(builder: ActionBuilder<'_, C, B>) -> Self {
        builder.id
    }
}
