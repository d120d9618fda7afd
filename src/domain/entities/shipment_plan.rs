//! Shipment plan entity produced by the pack solver.

use serde::Serialize;
use std::collections::BTreeMap;

/// Packs chosen to fulfil an order.
///
/// `packs` maps pack size to count and only holds sizes with a count of at
/// least one. `items_shipped` and `total_packs` always agree with `packs`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShipmentPlan {
    pub items_ordered: u64,
    pub items_shipped: u64,
    pub packs: BTreeMap<u64, u64>,
    pub total_packs: u64,
}

impl ShipmentPlan {
    /// Builds a plan from per-size counts, deriving the shipped total and pack count.
    pub fn from_counts(items_ordered: u64, packs: BTreeMap<u64, u64>) -> Self {
        let items_shipped = packs.iter().map(|(size, count)| size * count).sum();
        let total_packs = packs.values().sum();

        Self {
            items_ordered,
            items_shipped,
            packs,
            total_packs,
        }
    }

    /// Items shipped beyond the order.
    pub fn surplus(&self) -> u64 {
        self.items_shipped.saturating_sub(self.items_ordered)
    }

    /// Number of packs of the given size in the plan.
    pub fn count_of(&self, size: u64) -> u64 {
        self.packs.get(&size).copied().unwrap_or(0)
    }
}
