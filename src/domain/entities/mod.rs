//! Core domain entities.
//!
//! - [`PackSizes`] - Validated, normalized pack size set
//! - [`ShipmentPlan`] - Pack counts chosen for an order
//!
//! Entities are plain data with no I/O and are created per request.

pub mod pack_sizes;
pub mod shipment_plan;

pub use pack_sizes::{InvalidPackSizes, PackSizes};
pub use shipment_plan::ShipmentPlan;
