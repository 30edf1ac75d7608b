//! Backward best-first planner.
//!
//! Planning regresses from the goal toward the present: each expansion picks
//! the cheapest partial plan, takes its next open subgoal and tries every
//! action that achieves it. Preconditions that already hold become protected
//! goals; the rest become new open subgoals.
//!
//! Logging levels:
//! - **INFO**: Planning start/end with outcome and counters
//! - **DEBUG**: Each expansion and each pruned partial plan
//! - **TRACE**: Every generated child with its score

use std::time::Instant;

use planforge_config::{PlannerConfig, DEFAULT_ITERATION_LIMIT};
use planforge_core::{ActionId, Domain, GoalId, PList};
use tracing::{debug, info, trace};

use crate::error::{PlanningError, Result};
use crate::frontier::Frontier;
use crate::node::PartialPlan;
use crate::plan::{verify_plan, Plan};
use crate::statistics::PlanningStatistics;

/// Searches for the cheapest action sequence achieving a goal.
///
/// The search is bounded by an iteration limit: the number of partial plans
/// taken off the frontier in one call. The heuristic (summed cost of open
/// subgoals) is not guaranteed to be a lower bound, so the returned plan is
/// cheap but not provably optimal.
///
/// # Example
///
/// ```
/// use planforge_core::Domain;
/// use planforge_planner::Planner;
///
/// let mut domain: Domain<()> = Domain::new();
/// let has_axe = domain.add_variable("has_axe", |_: &()| true);
/// let has_wood = domain.add_variable("has_wood", |_: &()| false);
/// let axe = domain.goal(has_axe, true);
/// let wood = domain.goal(has_wood, true);
/// domain.add_action("ChopWood", ()).needs([axe]).achieves([wood]);
///
/// domain.invalidate_cached_values();
/// let plan = Planner::default().plan(&domain, wood, &()).unwrap();
/// assert_eq!(plan.display(&domain).to_string(), "[ChopWood]");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Planner {
    iteration_limit: u64,
    verify_plans: bool,
}

impl Planner {
    /// Creates a planner with the given expansion budget.
    ///
    /// The budget is at least one expansion: a limit of zero is raised to
    /// one, matching [`PlannerConfig::validate`], which rejects zero.
    pub fn new(iteration_limit: u64) -> Self {
        Self {
            iteration_limit: iteration_limit.max(1),
            verify_plans: false,
        }
    }

    /// Creates a planner from loaded configuration.
    pub fn from_config(config: &PlannerConfig) -> Self {
        Self {
            iteration_limit: config.iteration_limit().max(1),
            verify_plans: config.search.verify_plans,
        }
    }

    /// Replaces the expansion budget. Zero is raised to one, as in [`new`](Self::new).
    pub fn with_iteration_limit(mut self, limit: u64) -> Self {
        self.iteration_limit = limit.max(1);
        self
    }

    pub fn with_plan_verification(mut self, enabled: bool) -> Self {
        self.verify_plans = enabled;
        self
    }

    #[inline]
    pub fn iteration_limit(&self) -> u64 {
        self.iteration_limit
    }

    #[inline]
    pub fn verifies_plans(&self) -> bool {
        self.verify_plans
    }

    /// Plans for `goal` as seen from `context`.
    ///
    /// Variable values are read through the domain's caches; invalidate them
    /// before the call if the world may have changed since they were filled.
    ///
    /// # Errors
    ///
    /// Returns [`PlanningError::Unreachable`] or
    /// [`PlanningError::BudgetExhausted`] when no plan is found, and
    /// [`PlanningError::Unsound`] when verification is enabled and rejects
    /// the plan found.
    pub fn plan<C, B>(&self, domain: &Domain<C, B>, goal: GoalId, context: &C) -> Result<Plan>
    where
        C: PartialEq + Clone,
    {
        self.plan_with_statistics(domain, goal, context).0
    }

    /// Like [`plan`](Self::plan), also returning the search counters.
    pub fn plan_with_statistics<C, B>(
        &self,
        domain: &Domain<C, B>,
        goal: GoalId,
        context: &C,
    ) -> (Result<Plan>, PlanningStatistics)
    where
        C: PartialEq + Clone,
    {
        let start = Instant::now();
        let goal_label = domain.get_goal(goal).label();
        let mut stats = PlanningStatistics::new();

        info!(
            event = "plan_start",
            goal = goal_label,
            iteration_limit = self.iteration_limit,
        );

        let mut result = self.search(domain, goal, context, &mut stats);
        if self.verify_plans {
            if let Ok(plan) = &result {
                if let Err(e) = verify_plan(domain, plan, context) {
                    result = Err(PlanningError::Unsound(e));
                }
            }
        }
        stats.duration = start.elapsed();

        match &result {
            Ok(plan) => info!(
                event = "plan_end",
                goal = goal_label,
                outcome = "found",
                plan = %plan.display(domain),
                cost = plan.cost(),
                expansions = stats.expansions,
                generated = stats.children_generated,
                pruned = stats.pruned,
                duration_ms = stats.duration.as_millis() as u64,
            ),
            Err(e) => info!(
                event = "plan_end",
                goal = goal_label,
                outcome = outcome_name(e),
                reason = %e,
                expansions = stats.expansions,
                generated = stats.children_generated,
                pruned = stats.pruned,
                duration_ms = stats.duration.as_millis() as u64,
            ),
        }

        (result, stats)
    }

    fn search<C, B>(
        &self,
        domain: &Domain<C, B>,
        goal: GoalId,
        context: &C,
        stats: &mut PlanningStatistics,
    ) -> Result<Plan>
    where
        C: PartialEq + Clone,
    {
        let mut frontier = Frontier::new();
        frontier.insert(PartialPlan::root(goal), 0.0);
        stats.observe_frontier(frontier.len());

        for _ in 0..self.iteration_limit {
            if frontier.is_empty() {
                return Err(PlanningError::Unreachable {
                    expansions: stats.expansions,
                });
            }

            let (score, node) = frontier.extract_min()?;
            stats.expansions += 1;

            let Some((&subgoal, rest)) = node.remaining().split_first() else {
                return Ok(Plan::new(goal, node.actions().to_vec(), node.cost()));
            };

            debug!(
                event = "expand",
                expansion = stats.expansions,
                subgoal = domain.get_goal(subgoal).label(),
                score,
                cost = node.cost(),
                frontier = frontier.len(),
            );

            let variable = domain.get_goal(subgoal).variable();
            if let Some(protected) = node.protected().get(variable) {
                if protected != subgoal {
                    stats.pruned += 1;
                    debug!(
                        event = "prune",
                        subgoal = domain.get_goal(subgoal).label(),
                        protected = domain.get_goal(protected).label(),
                    );
                    continue;
                }
            }

            for &achiever in domain.achievers(subgoal) {
                let (child, heuristic) = expand(domain, &node, achiever, &rest, context);
                let child_score = child.cost() + heuristic;
                trace!(
                    event = "child",
                    action = domain.get_action(achiever).name(),
                    score = child_score,
                    open = child.remaining().len(),
                );
                frontier.insert(child, child_score);
                stats.children_generated += 1;
            }
            stats.observe_frontier(frontier.len());
        }

        if frontier.is_empty() {
            return Err(PlanningError::Unreachable {
                expansions: stats.expansions,
            });
        }
        Err(PlanningError::BudgetExhausted {
            limit: self.iteration_limit,
        })
    }
}

impl Default for Planner {
    fn default() -> Self {
        Self::new(DEFAULT_ITERATION_LIMIT)
    }
}

/// Builds the child of `node` that adds `achiever` in front of its actions.
///
/// Returns the child and the heuristic cost of its open subgoals.
fn expand<C, B>(
    domain: &Domain<C, B>,
    node: &PartialPlan,
    achiever: ActionId,
    rest: &PList<GoalId>,
    context: &C,
) -> (PartialPlan, f64)
where
    C: PartialEq + Clone,
{
    let action = domain.get_action(achiever);

    // Open subgoals the action achieves as a side effect are satisfied for free.
    let mut subgoals = rest.filter(|g| !action.has_effect(*g), PList::empty());
    let mut heuristic = total_goal_cost(domain, &subgoals);
    let mut protected = node.protected().clone();

    for &precondition in action.preconditions() {
        if domain.is_goal_true_for(precondition, context) {
            let variable = domain.get_goal(precondition).variable();
            protected = protected.with(variable, precondition);
        } else {
            subgoals = subgoals.prepend(precondition);
            heuristic += domain.get_goal(precondition).cost();
        }
    }

    let child = PartialPlan::child(
        node.actions().prepend(achiever),
        subgoals,
        protected,
        node.cost() + action.cost(),
    );
    (child, heuristic)
}

fn total_goal_cost<C, B>(domain: &Domain<C, B>, goals: &PList<GoalId>) -> f64 {
    goals.iter().map(|g| domain.get_goal(*g).cost()).sum()
}

fn outcome_name(error: &PlanningError) -> &'static str {
    match error {
        PlanningError::Unreachable { .. } => "unreachable",
        PlanningError::BudgetExhausted { .. } => "budget_exhausted",
        PlanningError::Unsound(_) => "unsound",
        PlanningError::Frontier(_) => "internal",
    }
}
