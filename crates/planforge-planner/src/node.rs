//! Partial plans: the nodes of the backward search tree.
//!
//! The root holds only the target goal as an open subgoal. Each child adds
//! one action in front of its parent's actions (the planner works backward,
//! so the newest action runs first). Leaves are either complete plans or
//! nodes that cannot be elaborated further.

use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

use planforge_core::{ActionId, GoalId, PList, VariableId};

/// Goals that already hold in the world and that actions later in the plan
/// rely on. At most one goal is protected per variable.
///
/// The map is shared between a node and its children and copied only when
/// a child protects something new.
#[derive(Clone, Default, PartialEq)]
pub struct ProtectedGoals {
    map: Rc<BTreeMap<VariableId, GoalId>>,
}

impl ProtectedGoals {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the goal protected for `variable`, if any.
    pub fn get(&self, variable: VariableId) -> Option<GoalId> {
        self.map.get(&variable).copied()
    }

    /// Returns a map that additionally protects `goal` on `variable`.
    pub fn with(&self, variable: VariableId, goal: GoalId) -> Self {
        if self.get(variable) == Some(goal) {
            return self.clone();
        }
        let mut map = Rc::clone(&self.map);
        Rc::make_mut(&mut map).insert(variable, goal);
        Self { map }
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (VariableId, GoalId)> + '_ {
        self.map.iter().map(|(v, g)| (*v, *g))
    }

    /// Returns true if both maps are the same allocation.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.map, &other.map)
    }
}

impl fmt::Debug for ProtectedGoals {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.map.iter()).finish()
    }
}

/// An immutable snapshot of search progress.
#[derive(Debug, Clone)]
pub struct PartialPlan {
    /// Chosen actions, first-to-execute first (most recently added first).
    actions: PList<ActionId>,

    /// Open subgoals; the first one is worked on next.
    remaining: PList<GoalId>,

    /// Goals the chosen actions depend on that already hold.
    protected: ProtectedGoals,

    /// Summed cost of `actions`, without the heuristic.
    cost: f64,
}

impl PartialPlan {
    /// Creates the root node for `goal`.
    pub fn root(goal: GoalId) -> Self {
        Self {
            actions: PList::empty(),
            remaining: PList::singleton(goal),
            protected: ProtectedGoals::new(),
            cost: 0.0,
        }
    }

    /// Creates a child node.
    pub fn child(
        actions: PList<ActionId>,
        remaining: PList<GoalId>,
        protected: ProtectedGoals,
        cost: f64,
    ) -> Self {
        Self {
            actions,
            remaining,
            protected,
            cost,
        }
    }

    #[inline]
    pub fn actions(&self) -> &PList<ActionId> {
        &self.actions
    }

    #[inline]
    pub fn remaining(&self) -> &PList<GoalId> {
        &self.remaining
    }

    #[inline]
    pub fn protected(&self) -> &ProtectedGoals {
        &self.protected
    }

    #[inline]
    pub fn cost(&self) -> f64 {
        self.cost
    }

    /// Returns true when no subgoals remain open.
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.remaining.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use planforge_core::Domain;

    fn goals() -> (VariableId, GoalId, GoalId) {
        let mut domain: Domain<()> = Domain::new();
        let v = domain.add_variable("v", |_: &()| 0i64);
        let a = domain.goal(v, 1);
        let b = domain.goal(v, 2);
        (v.id(), a, b)
    }

    #[test]
    fn test_root_node() {
        let (_, goal, _) = goals();
        let root = PartialPlan::root(goal);

        assert!(root.actions().is_empty());
        assert_eq!(root.remaining().to_vec(), vec![goal]);
        assert!(root.protected().is_empty());
        assert_eq!(root.cost(), 0.0);
        assert!(!root.is_complete());
    }

    #[test]
    fn test_protecting_leaves_parent_untouched() {
        let (v, a, _) = goals();
        let parent = ProtectedGoals::new();
        let child = parent.with(v, a);

        assert!(parent.get(v).is_none());
        assert_eq!(child.get(v), Some(a));
        assert_eq!(child.len(), 1);
    }

    #[test]
    fn test_protecting_same_goal_shares_map() {
        let (v, a, _) = goals();
        let once = ProtectedGoals::new().with(v, a);
        let twice = once.with(v, a);

        assert!(twice.ptr_eq(&once));
    }

    #[test]
    fn test_complete_node() {
        let node = PartialPlan::child(PList::empty(), PList::empty(), ProtectedGoals::new(), 2.0);
        assert!(node.is_complete());
        assert_eq!(node.cost(), 2.0);
    }
}
