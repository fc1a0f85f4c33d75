//! Row partitioning for block dispatch

use std::ops::Range;

use serde::Serialize;

use crate::error::{FlameError, FlameResult};

/// A contiguous range of rows along the leading axis
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowBlock {
    /// Position of the block in the partition
    pub index: usize,
    /// Half-open row range `[start, end)`
    pub rows: Range<usize>,
}

impl RowBlock {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Split `rows` into `workers` contiguous blocks in ascending order
///
/// The first `rows % workers` blocks hold `ceil(rows / workers)` rows and
/// the rest hold `floor(rows / workers)`. Blocks are empty only when
/// `workers > rows`; callers clamp with [`effective_workers`] first.
pub fn partition_rows(rows: usize, workers: usize) -> Vec<RowBlock> {
    if workers == 0 {
        return Vec::new();
    }

    let base = rows / workers;
    let remainder = rows % workers;

    let mut start = 0;
    (0..workers)
        .map(|index| {
            let len = base + usize::from(index < remainder);
            let block = RowBlock {
                index,
                rows: start..start + len,
            };
            start += len;
            block
        })
        .collect()
}

/// Worker count actually used for `rows` rows
///
/// Zero is rejected; counts above `rows` are clamped so no block is empty.
/// With zero rows the count is returned unchanged.
pub fn effective_workers(requested: usize, rows: usize) -> FlameResult<usize> {
    if requested == 0 {
        return Err(FlameError::InvalidWorkerCount(requested));
    }
    if rows == 0 {
        return Ok(requested);
    }
    Ok(requested.min(rows))
}
