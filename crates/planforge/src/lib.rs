//! PlanForge - A Goal-Oriented Action Planner in Rust
//!
//! Describe the world as variables, state what you want as goals, wire up
//! actions with `needs`/`achieves`, and ask the planner for a plan.
//!
//! # Example
//!
//! ```rust
//! use planforge::prelude::*;
//!
//! let mut domain: Domain<()> = Domain::new();
//! let has_axe = domain.add_variable("has_axe", |_: &()| true);
//! let has_wood = domain.add_variable("has_wood", |_: &()| false);
//! let axe = domain.goal(has_axe, true);
//! let wood = domain.goal(has_wood, true);
//! domain.add_action("ChopWood", ()).needs([axe]).achieves([wood]);
//!
//! let executive = Executive::new(&domain, [wood]);
//! let (_, plan) = executive.next_plan(&()).unwrap();
//! assert_eq!(plan.display(&domain).to_string(), "[ChopWood]");
//! ```

// Domain model
pub use planforge_core::{
    Action, ActionBuilder, ActionId, Domain, DomainError, Goal, GoalId, PList, Value, Variable,
    VariableId, VariableInfo,
};

// Configuration
pub use planforge_config::{ConfigError, PlannerConfig, PlannerConfigOverride};

// Planning
pub use planforge_planner::{
    verify_plan, Executive, Plan, PlanDisplay, Planner, PlanningError, PlanningStatistics,
    VerificationError,
};

#[cfg(feature = "console")]
pub mod console;

pub mod prelude {
    pub use super::{Domain, Executive, GoalId, Plan, Planner, PlannerConfig, PlanningError};
    pub use super::{Value, Variable};
}
