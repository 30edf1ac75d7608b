//! PlanForge Core - Domain model for backward-chaining planning
//!
//! This crate provides the fundamental abstractions for PlanForge:
//! - Identity issuing for domain objects
//! - Variables, Goals and Actions wired into an achiever graph
//! - The persistent list used by partial plans
//! - Domain validation errors

pub mod domain;
pub mod error;
pub mod list;
pub mod uid;
pub mod value;

pub use domain::{
    Action, ActionBuilder, ActionId, Domain, Goal, GoalId, Variable, VariableId, VariableInfo,
};
pub use error::DomainError;
pub use list::PList;
pub use uid::{Uid, UidSource};
pub use value::Value;
