//! Application layer services implementing business logic.
//!
//! Services sit between the HTTP handlers and the domain. They apply request
//! guardrails and defaults, then call into domain traits.
//!
//! # Available Services
//!
//! - [`services::pack_service::PackService`] - Shipment plan calculation

pub mod services;
