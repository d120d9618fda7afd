//! Minimal-waste pack solver.
//!
//! Given an order quantity and the available pack sizes, finds the smallest
//! shippable total that covers the order and, for that total, the combination
//! with the fewest packs. Packs cannot be split and every size is available in
//! unlimited supply.
//!
//! # Algorithm
//!
//! Dynamic programming over attainable sums up to a search ceiling of
//! `items_ordered + largest_pack`. Any window of `largest_pack` consecutive
//! sums contains a multiple of the largest pack, so the optimum always lies
//! below the ceiling.
//!
//! Sizes are scanned in ascending order and a sum only records a new pack when
//! it strictly improves the count. When several decompositions share the
//! minimal pack count, the one reached first through the smaller sizes wins.
//!
//! Time is `O((items_ordered + largest_pack) × distinct_sizes)` and memory is
//! linear in the ceiling, which is why callers bound both inputs.

use std::collections::BTreeMap;

use crate::domain::entities::{InvalidPackSizes, PackSizes, ShipmentPlan};

/// Marks a sum that no combination of packs reaches.
const UNREACHABLE: usize = usize::MAX;

/// Marks a sum with no recorded last pack.
const NO_PACK: usize = 0;

/// Largest search ceiling the solver will allocate tables for.
///
/// Both tables hold one `usize` per sum, so this caps a single call at a few
/// GiB. Callers are expected to bound inputs well below it.
pub const MAX_SEARCH_CEILING: u64 = 200_000_000;

/// Errors returned by the solver. All of them are deterministic in the input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SolveError {
    #[error("items must be > 0, got {0}")]
    InvalidOrderQuantity(i64),

    #[error(transparent)]
    InvalidPackSizeSet(#[from] InvalidPackSizes),

    #[error(
        "search ceiling {items_ordered} + {largest_pack} exceeds the solver limit of {max}",
        max = MAX_SEARCH_CEILING
    )]
    SearchCeilingOverflow { items_ordered: u64, largest_pack: u64 },

    #[error("no solution found for {items_ordered} items with the given pack sizes")]
    NoSolution { items_ordered: u64 },

    #[error("failed to reconstruct solution at sum {sum}")]
    ReconstructionFailure { sum: usize },
}

impl SolveError {
    /// Stable identifier for API error details.
    pub fn code(&self) -> &'static str {
        match self {
            SolveError::InvalidOrderQuantity(_) => "invalid_order_quantity",
            SolveError::InvalidPackSizeSet(_) => "invalid_pack_size_set",
            SolveError::SearchCeilingOverflow { .. } => "search_ceiling_overflow",
            SolveError::NoSolution { .. } => "no_solution",
            SolveError::ReconstructionFailure { .. } => "reconstruction_failure",
        }
    }
}

/// Computes shipment plans for an order.
///
/// Implemented by [`DpSolver`]; services depend on the trait so tests can
/// substitute a mock.
#[cfg_attr(test, mockall::automock)]
pub trait ShipmentSolver {
    fn solve(&self, items_ordered: i64, pack_sizes: &[i64]) -> Result<ShipmentPlan, SolveError>;
}

/// Dynamic-programming solver. Stateless; every call owns its working tables.
#[derive(Debug, Clone, Copy, Default)]
pub struct DpSolver;

impl ShipmentSolver for DpSolver {
    fn solve(&self, items_ordered: i64, pack_sizes: &[i64]) -> Result<ShipmentPlan, SolveError> {
        solve(items_ordered, pack_sizes)
    }
}

/// Finds the minimal-waste, fewest-packs shipment for `items_ordered`.
///
/// # Errors
///
/// - [`SolveError::InvalidOrderQuantity`] if `items_ordered <= 0`
/// - [`SolveError::InvalidPackSizeSet`] if `pack_sizes` is empty or holds a value ≤ 0
/// - [`SolveError::SearchCeilingOverflow`] if the search ceiling cannot be indexed
/// - [`SolveError::NoSolution`] / [`SolveError::ReconstructionFailure`] are internal
///   guards and do not occur for valid input
///
/// # Examples
///
/// ```
/// use pack_calculator::domain::solver::solve;
///
/// let plan = solve(12_001, &[250, 500, 1000, 2000, 5000]).unwrap();
/// assert_eq!(plan.items_shipped, 12_250);
/// assert_eq!(plan.count_of(5000), 2);
/// assert_eq!(plan.count_of(2000), 1);
/// assert_eq!(plan.count_of(250), 1);
/// ```
pub fn solve(items_ordered: i64, pack_sizes: &[i64]) -> Result<ShipmentPlan, SolveError> {
    if items_ordered <= 0 {
        return Err(SolveError::InvalidOrderQuantity(items_ordered));
    }
    let order = items_ordered.unsigned_abs();

    let sizes = PackSizes::new(pack_sizes)?;
    let largest_pack = sizes.largest();

    let overflow = || SolveError::SearchCeilingOverflow {
        items_ordered: order,
        largest_pack,
    };

    let ceiling = order
        .checked_add(largest_pack)
        .filter(|&c| c <= MAX_SEARCH_CEILING)
        .and_then(|c| usize::try_from(c).ok())
        .ok_or_else(overflow)?;

    // Every size is ≤ the ceiling, so these conversions only fail with it.
    let sizes = sizes
        .iter()
        .map(|size| usize::try_from(size).map_err(|_| overflow()))
        .collect::<Result<Vec<_>, _>>()?;
    let first = usize::try_from(order).map_err(|_| overflow())?;

    let table = PackTable::fill(&sizes, ceiling);

    let shipped = (first..=ceiling)
        .find(|&sum| table.is_reachable(sum))
        .ok_or(SolveError::NoSolution {
            items_ordered: order,
        })?;

    let packs = table.reconstruct(shipped)?;
    let plan = ShipmentPlan::from_counts(order, packs);

    if plan.items_shipped != shipped as u64
        || plan.total_packs != table.min_packs[shipped] as u64
    {
        return Err(SolveError::ReconstructionFailure { sum: shipped });
    }

    Ok(plan)
}

/// Fewest packs per exact sum, with the last pack used to reach it.
struct PackTable {
    min_packs: Vec<usize>,
    last_pack: Vec<usize>,
}

impl PackTable {
    /// Fills the table for sums `0..=ceiling`. `sizes` must be ascending.
    fn fill(sizes: &[usize], ceiling: usize) -> Self {
        let mut min_packs = vec![UNREACHABLE; ceiling + 1];
        let mut last_pack = vec![NO_PACK; ceiling + 1];
        min_packs[0] = 0;

        for sum in 1..=ceiling {
            for &pack in sizes {
                if pack > sum {
                    break;
                }

                let before = min_packs[sum - pack];
                if before == UNREACHABLE {
                    continue;
                }

                if before + 1 < min_packs[sum] {
                    min_packs[sum] = before + 1;
                    last_pack[sum] = pack;
                }
            }
        }

        Self {
            min_packs,
            last_pack,
        }
    }

    fn is_reachable(&self, sum: usize) -> bool {
        self.min_packs[sum] != UNREACHABLE
    }

    /// Walks the recorded packs from `sum` back to zero.
    fn reconstruct(&self, sum: usize) -> Result<BTreeMap<u64, u64>, SolveError> {
        let mut counts = BTreeMap::new();
        let mut current = sum;

        while current > 0 {
            let pack = self.last_pack[current];
            if pack == NO_PACK || pack > current {
                return Err(SolveError::ReconstructionFailure { sum: current });
            }

            *counts.entry(pack as u64).or_insert(0) += 1;
            current -= pack;
        }

        Ok(counts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEFAULT_SIZES: [i64; 5] = [250, 500, 1000, 2000, 5000];

    fn assert_plan(items: i64, shipped: u64, expected: &[(u64, u64)]) {
        let plan = solve(items, &DEFAULT_SIZES).unwrap();

        assert_eq!(plan.items_ordered, items as u64);
        assert_eq!(plan.items_shipped, shipped, "shipped for {items}");
        assert_eq!(
            plan.packs,
            expected.iter().copied().collect::<BTreeMap<_, _>>(),
            "packs for {items}"
        );
    }

    #[test]
    fn test_single_item_ships_smallest_pack() {
        assert_plan(1, 250, &[(250, 1)]);
    }

    #[test]
    fn test_exact_smallest_pack() {
        assert_plan(250, 250, &[(250, 1)]);
    }

    #[test]
    fn test_one_over_smallest_pack_uses_single_larger_pack() {
        assert_plan(251, 500, &[(500, 1)]);
    }

    #[test]
    fn test_501_items() {
        assert_plan(501, 750, &[(250, 1), (500, 1)]);
    }

    #[test]
    fn test_just_below_largest_pack() {
        assert_plan(4999, 5000, &[(5000, 1)]);
    }

    #[test]
    fn test_12001_items() {
        assert_plan(12_001, 12_250, &[(250, 1), (2000, 1), (5000, 2)]);
    }

    #[test]
    fn test_total_packs_matches_counts() {
        let plan = solve(12_001, &DEFAULT_SIZES).unwrap();
        assert_eq!(plan.total_packs, 4);
        assert!(plan.packs.values().all(|&count| count > 0));
    }

    #[test]
    fn test_unsorted_and_duplicate_sizes() {
        let plan = solve(501, &[500, 250, 500, 250]).unwrap();
        assert_eq!(plan.items_shipped, 750);
        assert_eq!(plan.packs, BTreeMap::from([(250, 1), (500, 1)]));
    }

    #[test]
    fn test_single_size_rounds_up() {
        let plan = solve(20, &[7]).unwrap();
        assert_eq!(plan.items_shipped, 21);
        assert_eq!(plan.packs, BTreeMap::from([(7, 3)]));
    }

    #[test]
    fn test_non_multiple_sizes_prefer_less_waste_over_fewer_packs() {
        // 7 is unreachable, so 3 + 5 is the smallest covering total.
        let plan = solve(7, &[3, 5]).unwrap();
        assert_eq!(plan.items_shipped, 8);
        assert_eq!(plan.packs, BTreeMap::from([(3, 1), (5, 1)]));

        let plan = solve(4, &[3, 5]).unwrap();
        assert_eq!(plan.items_shipped, 5);
        assert_eq!(plan.packs, BTreeMap::from([(5, 1)]));
    }

    #[test]
    fn test_fewest_packs_at_equal_total() {
        // 1 + 1 + ... would reach 6 too, but two packs of 3 are fewer.
        let plan = solve(6, &[1, 3]).unwrap();
        assert_eq!(plan.packs, BTreeMap::from([(3, 2)]));
        assert_eq!(plan.total_packs, 2);
    }

    #[test]
    fn test_tie_break_follows_ascending_sizes() {
        // {1, 3} and {2, 2} both ship 4 in two packs.
        let plan = solve(4, &[1, 2, 3]).unwrap();
        assert_eq!(plan.items_shipped, 4);
        assert_eq!(plan.total_packs, 2);
        assert_eq!(plan.packs, BTreeMap::from([(1, 1), (3, 1)]));
    }

    #[test]
    fn test_deterministic() {
        let first = solve(9_876, &[23, 31, 250, 999]).unwrap();
        let second = solve(9_876, &[999, 31, 250, 23]).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_invalid_order_quantity() {
        assert_eq!(
            solve(0, &DEFAULT_SIZES),
            Err(SolveError::InvalidOrderQuantity(0))
        );
        assert_eq!(
            solve(-5, &DEFAULT_SIZES),
            Err(SolveError::InvalidOrderQuantity(-5))
        );
    }

    #[test]
    fn test_order_quantity_checked_before_sizes() {
        assert_eq!(solve(0, &[]), Err(SolveError::InvalidOrderQuantity(0)));
    }

    #[test]
    fn test_empty_pack_sizes() {
        assert_eq!(
            solve(10, &[]),
            Err(SolveError::InvalidPackSizeSet(InvalidPackSizes::Empty))
        );
    }

    #[test]
    fn test_non_positive_pack_size() {
        assert_eq!(
            solve(10, &[-1, 250]),
            Err(SolveError::InvalidPackSizeSet(
                InvalidPackSizes::NonPositive(-1)
            ))
        );
        assert_eq!(
            solve(10, &[250, 0]),
            Err(SolveError::InvalidPackSizeSet(InvalidPackSizes::NonPositive(
                0
            )))
        );
    }

    #[test]
    fn test_search_ceiling_overflow() {
        let err = solve(i64::MAX, &[i64::MAX]).unwrap_err();
        assert!(matches!(err, SolveError::SearchCeilingOverflow { .. }));
        assert_eq!(err.code(), "search_ceiling_overflow");

        let err = solve(MAX_SEARCH_CEILING as i64, &[1]).unwrap_err();
        assert_eq!(
            err,
            SolveError::SearchCeilingOverflow {
                items_ordered: MAX_SEARCH_CEILING,
                largest_pack: 1,
            }
        );

        let err = solve(1, &[MAX_SEARCH_CEILING as i64]).unwrap_err();
        assert!(matches!(err, SolveError::SearchCeilingOverflow { .. }));

        // Rejected before any table is allocated.
        assert!(solve(3_000_000_000, &[250]).is_err());
        assert!(solve(1, &[3_000_000_000]).is_err());
    }

    #[test]
    fn test_error_codes_are_distinct() {
        let codes = [
            SolveError::InvalidOrderQuantity(0).code(),
            SolveError::InvalidPackSizeSet(InvalidPackSizes::Empty).code(),
            SolveError::SearchCeilingOverflow {
                items_ordered: 1,
                largest_pack: 1,
            }
            .code(),
            SolveError::NoSolution { items_ordered: 1 }.code(),
            SolveError::ReconstructionFailure { sum: 1 }.code(),
        ];

        let unique: std::collections::HashSet<_> = codes.iter().collect();
        assert_eq!(unique.len(), codes.len());
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            SolveError::InvalidPackSizeSet(InvalidPackSizes::Empty).to_string(),
            "pack_sizes must not be empty"
        );
        assert_eq!(
            SolveError::InvalidOrderQuantity(0).to_string(),
            "items must be > 0, got 0"
        );
    }

    #[test]
    fn test_reconstruct_rejects_broken_chain() {
        let table = PackTable {
            min_packs: vec![0, UNREACHABLE, 1],
            last_pack: vec![NO_PACK, NO_PACK, NO_PACK],
        };

        assert_eq!(
            table.reconstruct(2),
            Err(SolveError::ReconstructionFailure { sum: 2 })
        );
    }

    #[test]
    fn test_dp_solver_delegates() {
        let plan = DpSolver.solve(251, &DEFAULT_SIZES).unwrap();
        assert_eq!(plan.packs, BTreeMap::from([(500, 1)]));
    }
}
