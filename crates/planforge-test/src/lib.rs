//! Shared test fixtures for PlanForge crates.
//!
//! This crate provides a simple world model and small planning domains.
//! It depends only on `planforge-core` so the planner can use it as a
//! dev-dependency without a cycle.
//!
//! - [`world`] - Name-keyed world state used as the execution context
//! - [`simulate`] - Forward execution of action sequences against a world
//! - [`scenarios`] - Ready-made domains (woodcutting, cost ties, chains)
//!
//! # Usage
//!
//! Add as a dev-dependency in your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! planforge-test = { workspace = true }
//! ```
//!
//! Then import the fixtures you need:
//!
//! ```ignore
//! use planforge_test::scenarios::wood;
//! use planforge_test::{simulate, WorldState};
//! ```

pub mod scenarios;
pub mod simulate;
pub mod world;

pub use simulate::{goal_holds, simulate, SimulationError};
pub use world::{bool_variable, int_variable, WorldState};
