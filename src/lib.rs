//! # Pack Calculator
//!
//! A service that works out which packs to ship for an order: the smallest
//! shippable quantity that covers the order, using the fewest packs.
//!
//! ## Architecture
//!
//! - **Domain Layer** ([`domain`]) - Pack entities and the solver
//! - **Application Layer** ([`application`]) - Guardrails and defaults around the solver
//! - **API Layer** ([`api`]) - REST handlers, DTOs, and middleware
//!
//! ## Quick Start
//!
//! ```bash
//! export PACK_SIZES="250,500,1000,2000,5000"  # Optional
//! cargo run
//!
//! curl -X POST localhost:8080/calculate -d '{"items": 12001}' \
//!   -H 'content-type: application/json'
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod state;

pub mod config;
pub mod server;

pub mod routes;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
pub mod prelude {
    pub use crate::application::services::{PackLimits, PackService};
    pub use crate::domain::entities::{PackSizes, ShipmentPlan};
    pub use crate::domain::solver::{DpSolver, ShipmentSolver, SolveError, solve};
    pub use crate::error::AppError;
    pub use crate::state::AppState;
}
