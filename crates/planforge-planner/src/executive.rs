//! Goal selection on top of the planner.
//!
//! An [`Executive`] holds a prioritized list of top-level goals. Each call to
//! [`Executive::next_plan`] refreshes variable values and plans for the first
//! goal that is valid, not yet satisfied and reachable.

use planforge_core::{Domain, GoalId};
use tracing::{debug, info, warn};

use crate::plan::Plan;
use crate::planner::Planner;

/// Picks and plans for the highest-priority pursuable goal.
pub struct Executive<'d, C, B = ()> {
    domain: &'d Domain<C, B>,
    planner: Planner,
    goals: Vec<GoalId>,
}

impl<'d, C, B> Executive<'d, C, B>
where
    C: PartialEq + Clone,
{
    /// Creates an executive over `goals`, highest priority first.
    pub fn new(domain: &'d Domain<C, B>, goals: impl IntoIterator<Item = GoalId>) -> Self {
        Self {
            domain,
            planner: Planner::default(),
            goals: goals.into_iter().collect(),
        }
    }

    pub fn with_planner(mut self, planner: Planner) -> Self {
        self.planner = planner;
        self
    }

    pub fn planner(&self) -> &Planner {
        &self.planner
    }

    pub fn goals(&self) -> &[GoalId] {
        &self.goals
    }

    /// Returns the first goal that can be planned for, with its plan.
    ///
    /// Goals that are invalid for `context` or already true are skipped.
    /// Variable caches are invalidated first, so values reflect the world
    /// as it is now.
    pub fn next_plan(&self, context: &C) -> Option<(GoalId, Plan)> {
        self.domain.invalidate_cached_values();

        for &goal in &self.goals {
            let label = self.domain.get_goal(goal).label();
            if !self.domain.is_goal_valid_for(goal, context) {
                debug!(event = "goal_skipped", goal = label, reason = "invalid");
                continue;
            }
            if self.domain.is_goal_true_for(goal, context) {
                debug!(event = "goal_skipped", goal = label, reason = "satisfied");
                continue;
            }

            match self.planner.plan(self.domain, goal, context) {
                Ok(plan) => {
                    info!(
                        event = "plan_selected",
                        goal = label,
                        steps = plan.len(),
                        cost = plan.cost(),
                    );
                    return Some((goal, plan));
                }
                Err(e) if e.is_no_plan() => {
                    debug!(event = "goal_skipped", goal = label, reason = %e);
                }
                Err(e) => {
                    warn!(event = "goal_skipped", goal = label, reason = %e);
                }
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use planforge_test::scenarios;
    use planforge_test::{bool_variable, WorldState};

    #[test]
    fn test_first_reachable_goal_wins() {
        let s = scenarios::wood();
        let mut domain = s.domain;
        let fed = bool_variable(&mut domain, "fed");
        let fed_goal = domain.goal(fed, true);
        let eat = domain.add_action("Eat", ()).achieves([fed_goal]).id();

        // No axe: wood is unreachable, so the executive falls through to eating.
        let executive = Executive::new(&domain, [s.wood, fed_goal]);
        let (goal, plan) = executive.next_plan(&WorldState::new()).unwrap();

        assert_eq!(goal, fed_goal);
        assert_eq!(plan.actions(), &[eat]);
    }

    #[test]
    fn test_satisfied_goals_are_skipped() {
        let s = scenarios::chain();
        let executive = Executive::new(&s.domain, [s.s1, s.s3]);
        let world = WorldState::new().with("s1", true);

        let (goal, plan) = executive.next_plan(&world).unwrap();

        assert_eq!(goal, s.s3);
        assert_eq!(plan.actions(), &[s.b, s.c]);
    }

    #[test]
    fn test_invalid_goals_are_skipped() {
        let mut s = scenarios::chain();
        s.domain.valid_when(s.s2, |world: &WorldState| world.bool("s3"));
        let executive = Executive::new(&s.domain, [s.s2, s.s1]);

        let (goal, _) = executive.next_plan(&WorldState::new()).unwrap();

        assert_eq!(goal, s.s1);
    }

    #[test]
    fn test_nothing_to_do() {
        let s = scenarios::wood();
        let executive = Executive::new(&s.domain, [s.wood]);

        assert!(executive.next_plan(&WorldState::new()).is_none());
        assert!(executive
            .next_plan(&WorldState::new().with("has_wood", true))
            .is_none());
    }

    #[test]
    fn test_values_are_refreshed_between_calls() {
        let s = scenarios::wood();
        let executive = Executive::new(&s.domain, [s.wood]).with_planner(Planner::new(10));
        let world = WorldState::new();

        assert!(executive.next_plan(&world).is_none());
        let world = world.with("has_axe", true);
        let (_, plan) = executive.next_plan(&world).unwrap();
        assert_eq!(plan.actions(), &[s.chop_wood]);
        assert_eq!(executive.planner().iteration_limit(), 10);
    }
}
