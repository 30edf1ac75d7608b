//! PlanForge Planner Engine
//!
//! This crate provides the search side of PlanForge:
//! - The priority frontier of partial plans
//! - Immutable partial-plan nodes with protected goals
//! - The backward best-first planner and its statistics
//! - The plan artifact and forward plan verification
//! - The executive that picks which top-level goal to plan for

pub mod error;
pub mod executive;
pub mod frontier;
pub mod node;
pub mod plan;
pub mod planner;
pub mod statistics;

pub use error::{FrontierError, PlanningError, Result};
pub use executive::Executive;
pub use frontier::Frontier;
pub use node::{PartialPlan, ProtectedGoals};
pub use plan::{verify_plan, Plan, PlanDisplay, VerificationError};
pub use planner::Planner;
pub use statistics::PlanningStatistics;
