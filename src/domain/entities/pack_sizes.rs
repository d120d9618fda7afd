//! Normalized set of pack sizes available for composing a shipment.

use std::fmt;

/// Reasons a raw list of pack sizes cannot be used.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidPackSizes {
    #[error("pack_sizes must not be empty")]
    Empty,

    #[error("pack_sizes must all be > 0, got {0}")]
    NonPositive(i64),
}

/// Deduplicated, ascending pack sizes. Never empty, every size is > 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackSizes(Vec<u64>);

impl PackSizes {
    /// Validates and normalizes raw pack sizes.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidPackSizes::Empty`] for an empty input and
    /// [`InvalidPackSizes::NonPositive`] with the first value that is ≤ 0.
    pub fn new(raw: &[i64]) -> Result<Self, InvalidPackSizes> {
        if raw.is_empty() {
            return Err(InvalidPackSizes::Empty);
        }

        let mut sizes = raw
            .iter()
            .map(|&size| {
                u64::try_from(size)
                    .ok()
                    .filter(|&s| s > 0)
                    .ok_or(InvalidPackSizes::NonPositive(size))
            })
            .collect::<Result<Vec<_>, _>>()?;

        sizes.sort_unstable();
        sizes.dedup();

        Ok(Self(sizes))
    }

    pub fn as_slice(&self) -> &[u64] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = u64> + '_ {
        self.0.iter().copied()
    }

    /// Largest available pack size.
    pub fn largest(&self) -> u64 {
        // Non-empty by construction.
        self.0.last().copied().unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for PackSizes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for size in &self.0 {
            if !first {
                f.write_str(", ")?;
            }
            write!(f, "{size}")?;
            first = false;
        }
        Ok(())
    }
}
