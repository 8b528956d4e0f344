// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    CoreError, SUB_BATCH_SIZE, plan_batch, plan_round_robin, select_manual_assignee, sub_batches,
};
use leadflow_domain::DistributionMethod;
use std::collections::HashMap;

fn counts(assignments: &[i64]) -> HashMap<i64, usize> {
    let mut map: HashMap<i64, usize> = HashMap::new();
    for id in assignments {
        *map.entry(*id).or_default() += 1;
    }
    map
}

#[test]
fn test_round_robin_cycles_in_roster_order() {
    let roster: Vec<i64> = vec![10, 20, 30];
    let assignments: Vec<i64> = plan_round_robin(7, &roster).unwrap();

    assert_eq!(assignments, vec![10, 20, 30, 10, 20, 30, 10]);
}

#[test]
fn test_seven_leads_three_assignees_split_three_two_two() {
    let roster: Vec<i64> = vec![1, 2, 3];
    let assignments: Vec<i64> = plan_round_robin(7, &roster).unwrap();
    let by_assignee: HashMap<i64, usize> = counts(&assignments);

    // Extra lead goes to the first roster member.
    assert_eq!(by_assignee[&1], 3);
    assert_eq!(by_assignee[&2], 2);
    assert_eq!(by_assignee[&3], 2);
}

#[test]
fn test_round_robin_fairness_floor_ceil() {
    // For any B and N, every assignee gets floor(B/N) or ceil(B/N),
    // and the first B mod N roster members get the extra lead.
    for batch in 1..40_usize {
        for roster_len in 1..7_usize {
            #[allow(clippy::cast_possible_wrap)]
            let roster: Vec<i64> = (1..=roster_len as i64).collect();
            let assignments: Vec<i64> = plan_round_robin(batch, &roster).unwrap();
            let by_assignee: HashMap<i64, usize> = counts(&assignments);

            let floor: usize = batch / roster_len;
            let extras: usize = batch % roster_len;
            for (index, id) in roster.iter().enumerate() {
                let expected: usize = if index < extras { floor + 1 } else { floor };
                assert_eq!(by_assignee.get(id).copied().unwrap_or(0), expected);
            }
        }
    }
}

#[test]
fn test_round_robin_is_deterministic() {
    let roster: Vec<i64> = vec![4, 5, 6, 7];
    let first: Vec<i64> = plan_round_robin(11, &roster).unwrap();
    let second: Vec<i64> = plan_round_robin(11, &roster).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_empty_roster_fails_with_no_eligible_assignees() {
    let result: Result<Vec<i64>, CoreError> = plan_round_robin(5, &[]);
    assert_eq!(result, Err(CoreError::NoEligibleAssignees));
}

#[test]
fn test_empty_batch_needs_no_roster() {
    let assignments: Vec<i64> = plan_round_robin(0, &[]).unwrap();
    assert!(assignments.is_empty());
}

#[test]
fn test_batch_policy_capacity_based_is_rejected() {
    let result: Result<Vec<i64>, CoreError> =
        plan_batch(DistributionMethod::CapacityBased, 3, &[1, 2]);

    assert_eq!(
        result,
        Err(CoreError::BatchPolicyNotImplemented {
            method: DistributionMethod::CapacityBased,
        })
    );
}

#[test]
fn test_batch_policy_manual_is_rejected() {
    let result: Result<Vec<i64>, CoreError> = plan_batch(DistributionMethod::Manual, 3, &[1, 2]);

    assert_eq!(
        result,
        Err(CoreError::BatchPolicyNotImplemented {
            method: DistributionMethod::Manual,
        })
    );
}

#[test]
fn test_batch_policy_round_robin_plans() {
    let assignments: Vec<i64> = plan_batch(DistributionMethod::RoundRobin, 4, &[1, 2]).unwrap();
    assert_eq!(assignments, vec![1, 2, 1, 2]);
}

#[test]
fn test_manual_path_picks_first_in_roster() {
    assert_eq!(select_manual_assignee(&[9, 8, 7]).unwrap(), 9);
    assert_eq!(
        select_manual_assignee(&[]),
        Err(CoreError::NoEligibleAssignees)
    );
}

#[test]
fn test_small_batches_are_a_single_pass() {
    assert_eq!(sub_batches(0), Vec::<std::ops::Range<usize>>::new());
    assert_eq!(sub_batches(1), vec![0..1]);
    assert_eq!(sub_batches(20), vec![0..20]);
}

#[test]
fn test_large_batches_chunk_without_resetting_the_cursor() {
    let ranges: Vec<std::ops::Range<usize>> = sub_batches(25);
    assert_eq!(ranges, vec![0..10, 10..20, 20..25]);

    // The plan is computed over the whole input, so the cursor carries
    // across sub-batch boundaries: 25 leads over 3 assignees is 9/8/8.
    let roster: Vec<i64> = vec![1, 2, 3];
    let assignments: Vec<i64> = plan_round_robin(25, &roster).unwrap();
    let by_assignee: HashMap<i64, usize> = counts(&assignments);
    assert_eq!(by_assignee[&1], 9);
    assert_eq!(by_assignee[&2], 8);
    assert_eq!(by_assignee[&3], 8);

    // Each chunk continues where the previous one left off.
    assert_eq!(assignments[SUB_BATCH_SIZE - 1], 1);
    assert_eq!(assignments[SUB_BATCH_SIZE], 2);
}
