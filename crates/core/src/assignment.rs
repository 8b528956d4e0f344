// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::CoreError;
use leadflow_domain::DistributionMethod;
use std::ops::Range;

/// Number of leads persisted per sub-batch.
pub const SUB_BATCH_SIZE: usize = 10;

/// Inputs at or below this size are persisted in a single pass.
pub const SUB_BATCH_THRESHOLD: usize = 20;

/// Plans round-robin assignment for a batch of leads.
///
/// A cursor starts at the head of the roster and advances modulo the
/// roster length, one step per lead, in input order. The returned
/// vector holds the assignee for each lead index.
///
/// Fairness: for a batch of size `B` over a roster of size `N`, every
/// assignee receives `floor(B/N)` or `ceil(B/N)` leads, with the first
/// `B mod N` roster members receiving the extra one.
///
/// # Arguments
///
/// * `lead_count` - Number of candidate leads, in input order
/// * `roster` - Eligible assignee ids, in roster-query order (never
///   re-sorted)
///
/// # Errors
///
/// Returns `CoreError::NoEligibleAssignees` if the roster is empty and
/// there is at least one lead to assign.
pub fn plan_round_robin(lead_count: usize, roster: &[i64]) -> Result<Vec<i64>, CoreError> {
    if lead_count == 0 {
        return Ok(Vec::new());
    }
    if roster.is_empty() {
        return Err(CoreError::NoEligibleAssignees);
    }

    let mut assignments: Vec<i64> = Vec::with_capacity(lead_count);
    let mut cursor: usize = 0;
    for _ in 0..lead_count {
        assignments.push(roster[cursor]);
        cursor = (cursor + 1) % roster.len();
    }
    Ok(assignments)
}

/// Plans batch assignment under the requested distribution policy.
///
/// Only round-robin has batch behavior. Capacity-based and manual are
/// rejected explicitly rather than silently falling through to
/// round-robin.
///
/// # Errors
///
/// * `CoreError::BatchPolicyNotImplemented` for capacity-based or
///   manual policies
/// * `CoreError::NoEligibleAssignees` if the roster is empty
pub fn plan_batch(
    method: DistributionMethod,
    lead_count: usize,
    roster: &[i64],
) -> Result<Vec<i64>, CoreError> {
    if !method.is_batch_implemented() {
        return Err(CoreError::BatchPolicyNotImplemented { method });
    }
    plan_round_robin(lead_count, roster)
}

/// Selects the assignee for the manual single-entry path.
///
/// Manual entries always go to the first roster member. This is a
/// distinct strategy from round-robin, kept separate on purpose.
///
/// # Errors
///
/// Returns `CoreError::NoEligibleAssignees` if the roster is empty.
pub fn select_manual_assignee(roster: &[i64]) -> Result<i64, CoreError> {
    roster.first().copied().ok_or(CoreError::NoEligibleAssignees)
}

/// Splits a batch into sequential sub-batch index ranges.
///
/// Inputs at or below [`SUB_BATCH_THRESHOLD`] are returned as a single
/// range; larger inputs are split into ranges of [`SUB_BATCH_SIZE`]
/// (the final range may be shorter). Sub-batch boundaries never reset
/// the round-robin cursor: the assignment plan is computed over the
/// whole input before chunking.
#[must_use]
pub fn sub_batches(lead_count: usize) -> Vec<Range<usize>> {
    if lead_count == 0 {
        return Vec::new();
    }
    if lead_count <= SUB_BATCH_THRESHOLD {
        return vec![0..lead_count];
    }

    let mut ranges: Vec<Range<usize>> = Vec::new();
    let mut start: usize = 0;
    while start < lead_count {
        let end: usize = usize::min(start + SUB_BATCH_SIZE, lead_count);
        ranges.push(start..end);
        start = end;
    }
    ranges
}
