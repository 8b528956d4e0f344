// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests for batch distribution and manual assignment.

use leadflow_domain::{DistributionMethod, Lead, Team, User, UserRole};
use leadflow_persistence::Persistence;

use super::helpers::{fresh_db, sample_lead, seed_actor, seed_team, seed_telemarketer, test_cause};
use crate::csv_import::MaterializedBatch;
use crate::distribution::{DistributionReport, assign_manual_lead, distribute_batch};
use crate::error::ApiError;
use crate::handlers;
use crate::request_response::{ImportLeadsRequest, ImportLeadsResponse, PreviewCsvRequest};

fn batch_of(n: usize, created_by: i64) -> MaterializedBatch {
    MaterializedBatch {
        leads: (0..n).map(|i| sample_lead(i, created_by)).collect(),
        skipped: 0,
    }
}

#[test]
fn test_round_robin_spreads_seven_leads_over_three_members() {
    let mut db: Persistence = fresh_db();
    let (_, admin) = seed_actor(&mut db, "admin@example.com", UserRole::Admin);
    let (_, team_id) = seed_team(&mut db, "alpha");
    let a: i64 = seed_telemarketer(&mut db, "a@example.com", team_id);
    let b: i64 = seed_telemarketer(&mut db, "b@example.com", team_id);
    let c: i64 = seed_telemarketer(&mut db, "c@example.com", team_id);

    let batch: MaterializedBatch = batch_of(7, admin.user_id);
    let report: DistributionReport = distribute_batch(
        &mut db,
        team_id,
        DistributionMethod::RoundRobin,
        &batch,
        &admin,
        test_cause(),
    )
    .unwrap();

    assert_eq!(report.assigned, 7);
    assert_eq!(report.failed, 0);

    let user_a: User = db.get_user(a).unwrap();
    let user_b: User = db.get_user(b).unwrap();
    let user_c: User = db.get_user(c).unwrap();
    assert_eq!(user_a.lead_count, 3);
    assert_eq!(user_b.lead_count, 2);
    assert_eq!(user_c.lead_count, 2);
    assert_eq!(user_a.leads_in_progress, 3);
    assert_eq!(user_a.assigned_leads.len(), 3);

    let team: Team = db.get_team(team_id).unwrap();
    assert_eq!(team.total_leads, 7);
}

#[test]
fn test_round_robin_cursor_is_global_across_sub_batches() {
    let mut db: Persistence = fresh_db();
    let (_, admin) = seed_actor(&mut db, "admin@example.com", UserRole::Admin);
    let (_, team_id) = seed_team(&mut db, "alpha");
    let a: i64 = seed_telemarketer(&mut db, "a@example.com", team_id);
    let b: i64 = seed_telemarketer(&mut db, "b@example.com", team_id);
    let c: i64 = seed_telemarketer(&mut db, "c@example.com", team_id);

    // 25 leads crosses the sub-batch threshold; a per-chunk cursor
    // would give the first member one extra lead per chunk.
    let batch: MaterializedBatch = batch_of(25, admin.user_id);
    let report: DistributionReport = distribute_batch(
        &mut db,
        team_id,
        DistributionMethod::RoundRobin,
        &batch,
        &admin,
        test_cause(),
    )
    .unwrap();

    assert_eq!(report.assigned, 25);
    assert_eq!(db.get_user(a).unwrap().lead_count, 9);
    assert_eq!(db.get_user(b).unwrap().lead_count, 8);
    assert_eq!(db.get_user(c).unwrap().lead_count, 8);
}

#[test]
fn test_empty_roster_fails_with_zero_writes() {
    let mut db: Persistence = fresh_db();
    let (_, admin) = seed_actor(&mut db, "admin@example.com", UserRole::Admin);
    let (_, team_id) = seed_team(&mut db, "alpha");

    let batch: MaterializedBatch = batch_of(4, admin.user_id);
    let result: Result<DistributionReport, ApiError> = distribute_batch(
        &mut db,
        team_id,
        DistributionMethod::RoundRobin,
        &batch,
        &admin,
        test_cause(),
    );

    assert_eq!(result.unwrap_err(), ApiError::NoEligibleAssignees);
    assert!(db.list_leads().unwrap().is_empty());
    assert_eq!(db.get_team(team_id).unwrap().total_leads, 0);
}

#[test]
fn test_capacity_based_batch_is_rejected_before_any_write() {
    let mut db: Persistence = fresh_db();
    let (_, admin) = seed_actor(&mut db, "admin@example.com", UserRole::Admin);
    let (_, team_id) = seed_team(&mut db, "alpha");
    seed_telemarketer(&mut db, "a@example.com", team_id);

    let batch: MaterializedBatch = batch_of(3, admin.user_id);
    let result: Result<DistributionReport, ApiError> = distribute_batch(
        &mut db,
        team_id,
        DistributionMethod::CapacityBased,
        &batch,
        &admin,
        test_cause(),
    );

    assert_eq!(
        result.unwrap_err(),
        ApiError::DistributionNotImplemented {
            method: String::from("capacity-based"),
        }
    );
    assert!(db.list_leads().unwrap().is_empty());
}

#[test]
fn test_manual_assignment_goes_to_first_roster_member() {
    let mut db: Persistence = fresh_db();
    let (_, admin) = seed_actor(&mut db, "admin@example.com", UserRole::Admin);
    let (_, team_id) = seed_team(&mut db, "alpha");
    let first: i64 = seed_telemarketer(&mut db, "a@example.com", team_id);
    seed_telemarketer(&mut db, "b@example.com", team_id);

    let lead: Lead = sample_lead(0, admin.user_id);
    let lead_id: i64 =
        assign_manual_lead(&mut db, team_id, &lead, &admin, test_cause()).unwrap();

    let persisted: Lead = db.get_lead(lead_id).unwrap();
    assert_eq!(persisted.assigned_to, Some(first));
    assert_eq!(persisted.team_id, Some(team_id));
    assert_eq!(db.get_user(first).unwrap().lead_count, 1);
}

#[test]
fn test_csv_import_end_to_end_drops_incomplete_rows() {
    let mut db: Persistence = fresh_db();
    let (_, admin) = seed_actor(&mut db, "admin@example.com", UserRole::Admin);
    let (_, team_id) = seed_team(&mut db, "alpha");
    seed_telemarketer(&mut db, "a@example.com", team_id);
    seed_telemarketer(&mut db, "b@example.com", team_id);

    let csv: &str = "Full Name,Email Address,Phone Number\n\
                     Ada,ada@example.com,555-0001\n\
                     ,missing@example.com,555-0002\n\
                     Grace,grace@example.com,555-0003\n";

    let preview = handlers::preview_csv(
        &PreviewCsvRequest {
            csv_content: String::from(csv),
            preview_rows: None,
        },
        &admin,
    )
    .unwrap();

    let request: ImportLeadsRequest = ImportLeadsRequest {
        csv_content: String::from(csv),
        mapping: preview.inferred_mapping,
        team_id,
        method: String::from("round-robin"),
    };
    let response: ImportLeadsResponse =
        handlers::import_leads(&mut db, &request, &admin, test_cause()).unwrap();

    assert_eq!(response.assigned, 2);
    assert_eq!(response.skipped, 1);
    assert_eq!(response.failed, 0);
    assert_eq!(db.list_leads().unwrap().len(), 2);
}

#[test]
fn test_distribution_records_audit_event() {
    let mut db: Persistence = fresh_db();
    let (_, admin) = seed_actor(&mut db, "admin@example.com", UserRole::Admin);
    let (_, team_id) = seed_team(&mut db, "alpha");
    seed_telemarketer(&mut db, "a@example.com", team_id);

    let batch: MaterializedBatch = batch_of(2, admin.user_id);
    distribute_batch(
        &mut db,
        team_id,
        DistributionMethod::RoundRobin,
        &batch,
        &admin,
        test_cause(),
    )
    .unwrap();

    let events = db
        .audit_events_for_subject(&format!("team:{team_id}"))
        .unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].action, "LeadsDistributed");
}
