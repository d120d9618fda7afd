//! Business logic services for the application layer.

pub mod pack_service;

pub use pack_service::{PackLimits, PackService};
