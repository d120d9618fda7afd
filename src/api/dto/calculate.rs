//! DTOs for the pack calculation endpoint.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use validator::Validate;

use crate::domain::entities::ShipmentPlan;

/// Request to calculate packs for an order.
///
/// Unknown fields are rejected so that typos such as `packSizes` do not
/// silently fall back to the default sizes.
#[derive(Debug, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct CalculateRequest {
    /// Number of items ordered.
    #[validate(range(min = 1, message = "items must be > 0"))]
    pub items: i64,

    /// Pack sizes to use instead of the configured defaults.
    #[serde(default)]
    pub pack_sizes: Option<Vec<i64>>,
}

/// Calculated shipment.
///
/// `packs` maps pack size to count; JSON object keys are the sizes as strings.
#[derive(Debug, Serialize)]
pub struct CalculateResponse {
    pub items_ordered: u64,
    pub items_shipped: u64,
    pub packs: BTreeMap<u64, u64>,
    pub total_packs: u64,
}

impl From<ShipmentPlan> for CalculateResponse {
    fn from(plan: ShipmentPlan) -> Self {
        Self {
            items_ordered: plan.items_ordered,
            items_shipped: plan.items_shipped,
            packs: plan.packs,
            total_packs: plan.total_packs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_pack_sizes_optional() {
        let req: CalculateRequest = serde_json::from_value(json!({ "items": 10 })).unwrap();
        assert_eq!(req.items, 10);
        assert!(req.pack_sizes.is_none());
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_rejects_unknown_fields() {
        let result =
            serde_json::from_value::<CalculateRequest>(json!({ "items": 10, "packSizes": [1] }));
        assert!(result.is_err());
    }

    #[test]
    fn test_validates_items() {
        let req: CalculateRequest = serde_json::from_value(json!({ "items": 0 })).unwrap();
        let errors = req.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("items"));
    }
}
