//! Error types for planning calls

use thiserror::Error;

use crate::plan::VerificationError;

/// Why a planning call produced no plan.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlanningError {
    /// The frontier emptied: no action chain reaches the goal.
    #[error("Goal is unreachable (frontier exhausted after {expansions} expansions)")]
    Unreachable { expansions: u64 },

    /// The expansion budget ran out with partial plans still pending.
    #[error("Search budget of {limit} expansions exhausted")]
    BudgetExhausted { limit: u64 },

    /// A found plan failed forward verification.
    #[error("Plan failed verification: {0}")]
    Unsound(#[from] VerificationError),

    /// Extraction from an empty frontier (should not occur in normal operation).
    #[error(transparent)]
    Frontier(#[from] FrontierError),
}

impl PlanningError {
    /// Returns true for the outcomes a caller treats as "no plan found".
    pub fn is_no_plan(&self) -> bool {
        matches!(
            self,
            PlanningError::Unreachable { .. } | PlanningError::BudgetExhausted { .. }
        )
    }
}

/// Frontier contract violations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FrontierError {
    #[error("Attempt to extract from an empty frontier")]
    Empty,
}

/// Result type alias for planning operations
pub type Result<T> = std::result::Result<T, PlanningError>;
