//! Pack calculation service.

use std::time::Instant;

use serde_json::json;

use crate::config::Config;
use crate::domain::entities::ShipmentPlan;
use crate::domain::solver::{DpSolver, ShipmentSolver};
use crate::error::AppError;

/// Request guardrails that bound solver cost.
///
/// The solver's work grows with `items + largest_pack` and with the number of
/// sizes, so all three are capped before it runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PackLimits {
    pub max_items: i64,
    pub max_pack_size: i64,
    pub max_pack_size_count: usize,
}

impl Default for PackLimits {
    fn default() -> Self {
        Self {
            max_items: 1_000_000,
            max_pack_size: 1_000_000,
            max_pack_size_count: 64,
        }
    }
}

/// Service for calculating shipment plans.
///
/// Applies the configured default pack sizes when a request brings none,
/// enforces [`PackLimits`], and delegates the optimization to a
/// [`ShipmentSolver`].
pub struct PackService<S: ShipmentSolver> {
    solver: S,
    default_pack_sizes: Vec<i64>,
    limits: PackLimits,
}

impl PackService<DpSolver> {
    /// Creates a service backed by the dynamic-programming solver.
    pub fn from_config(config: &Config) -> Self {
        Self::new(DpSolver, config.default_pack_sizes.clone(), config.limits())
    }
}

impl<S: ShipmentSolver> PackService<S> {
    /// Creates a new pack service.
    pub fn new(solver: S, default_pack_sizes: Vec<i64>, limits: PackLimits) -> Self {
        Self {
            solver,
            default_pack_sizes,
            limits,
        }
    }

    pub fn default_pack_sizes(&self) -> &[i64] {
        &self.default_pack_sizes
    }

    pub fn limits(&self) -> PackLimits {
        self.limits
    }

    /// Calculates the shipment plan for an order.
    ///
    /// `pack_sizes` of `None` or an empty list selects the default sizes.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if:
    /// - `items` is not positive or exceeds `max_items`
    /// - more than `max_pack_size_count` sizes are given
    /// - a size exceeds `max_pack_size`
    /// - the solver rejects the input
    ///
    /// Returns [`AppError::Internal`] if the solver breaks its own invariants.
    pub fn calculate(
        &self,
        items: i64,
        pack_sizes: Option<Vec<i64>>,
    ) -> Result<ShipmentPlan, AppError> {
        let result = self.check_and_solve(items, pack_sizes);

        let outcome = match &result {
            Ok(plan) => {
                tracing::info!(
                    items_ordered = plan.items_ordered,
                    items_shipped = plan.items_shipped,
                    total_packs = plan.total_packs,
                    "Shipment calculated"
                );
                "ok"
            }
            Err(AppError::Validation { message, .. }) => {
                tracing::debug!(items, %message, "Calculation rejected");
                "rejected"
            }
            Err(AppError::Internal { message, .. }) => {
                tracing::error!(items, %message, "Calculation failed");
                "failed"
            }
        };
        metrics::counter!("pack_calculations_total", "outcome" => outcome).increment(1);

        result
    }

    fn check_and_solve(
        &self,
        items: i64,
        pack_sizes: Option<Vec<i64>>,
    ) -> Result<ShipmentPlan, AppError> {
        if items <= 0 {
            return Err(AppError::bad_request(
                "items must be > 0",
                json!({ "items": items }),
            ));
        }

        if items > self.limits.max_items {
            return Err(AppError::bad_request(
                format!("items must be <= {}", self.limits.max_items),
                json!({ "items": items, "max_items": self.limits.max_items }),
            ));
        }

        let sizes = match pack_sizes {
            Some(sizes) if !sizes.is_empty() => sizes,
            _ => self.default_pack_sizes.clone(),
        };

        if sizes.len() > self.limits.max_pack_size_count {
            return Err(AppError::bad_request(
                format!(
                    "at most {} pack sizes are allowed",
                    self.limits.max_pack_size_count
                ),
                json!({ "provided": sizes.len() }),
            ));
        }

        if let Some(&too_large) = sizes.iter().find(|&&s| s > self.limits.max_pack_size) {
            return Err(AppError::bad_request(
                format!("pack sizes must be <= {}", self.limits.max_pack_size),
                json!({ "pack_size": too_large }),
            ));
        }

        let started = Instant::now();
        let plan = self.solver.solve(items, &sizes)?;
        metrics::histogram!("pack_solve_duration_seconds")
            .record(started.elapsed().as_secs_f64());

        Ok(plan)
    }
}
