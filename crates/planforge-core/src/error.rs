//! Error types for PlanForge domain configuration

use thiserror::Error;

/// Configuration mistakes found by [`Domain::validate`](crate::Domain::validate).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DomainError {
    /// An action cost is negative, infinite or NaN.
    #[error("Action '{action}' has invalid cost {cost}")]
    InvalidCost { action: String, cost: f64 },

    /// A goal's heuristic cost is negative, infinite or NaN.
    #[error("Goal '{goal}' has invalid heuristic cost {cost}")]
    InvalidGoalCost { goal: String, cost: f64 },

    /// An action achieves no goal, so the planner can never select it.
    #[error("Action '{action}' has no effects")]
    NoEffects { action: String },

    /// No variable with this name is registered.
    #[error("Unknown variable: {0}")]
    UnknownVariable(String),
}

/// Result type alias for domain operations
pub type Result<T> = std::result::Result<T, DomainError>;
