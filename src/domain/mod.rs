//! Domain layer containing the pack model and the solver.
//!
//! Nothing in this layer performs I/O, logs, or holds state between calls.
//!
//! # Architecture
//!
//! - [`entities`] - Pack size sets and shipment plans
//! - [`solver`] - Minimal-waste, fewest-packs optimizer and its error type
//!
//! # Request Flow
//!
//! 1. HTTP handler decodes and validates the request
//! 2. [`crate::application::services::PackService`] applies guardrails and defaults
//! 3. [`solver::ShipmentSolver`] computes the [`entities::ShipmentPlan`]

pub mod entities;
pub mod solver;
