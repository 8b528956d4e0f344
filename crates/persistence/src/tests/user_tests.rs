// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use leadflow_domain::{LeadStatus, User, UserRole};

use super::helpers::{TEST_HASH, fresh_db, seed_team, seed_user};
use crate::{Persistence, PersistenceError};

#[test]
fn test_create_and_get_user() {
    let mut db: Persistence = fresh_db();
    let user_id: i64 = seed_user(&mut db, "alice@example.com", UserRole::Telemarketer);

    let user: User = db.get_user(user_id).unwrap();
    assert_eq!(user.user_id, Some(user_id));
    assert_eq!(user.email, "alice@example.com");
    assert_eq!(user.role, UserRole::Telemarketer);
    assert_eq!(user.lead_count, 0);
    assert_eq!(user.daily_quota, User::DEFAULT_DAILY_QUOTA);
    assert!(user.assigned_leads.is_empty());
    assert!(!user.created_at.is_empty());
}

#[test]
fn test_get_missing_user_is_not_found() {
    let mut db: Persistence = fresh_db();
    let result = db.get_user(999);
    assert!(matches!(result, Err(PersistenceError::NotFound(_))));
}

#[test]
fn test_duplicate_email_is_rejected() {
    let mut db: Persistence = fresh_db();
    seed_user(&mut db, "dup@example.com", UserRole::Counselor);

    let user: User = User::new(
        String::from("dup@example.com"),
        String::from("Other"),
        UserRole::Student,
        None,
    );
    assert!(db.create_user(&user, TEST_HASH).is_err());
}

#[test]
fn test_get_user_by_email_returns_credentials() {
    let mut db: Persistence = fresh_db();
    let user_id: i64 = seed_user(&mut db, "bob@example.com", UserRole::Admin);

    let creds = db.get_user_by_email("bob@example.com").unwrap().unwrap();
    assert_eq!(creds.user.user_id, Some(user_id));
    assert_eq!(creds.password_hash, TEST_HASH);

    assert!(db.get_user_by_email("nobody@example.com").unwrap().is_none());
}

#[test]
fn test_list_users_by_role() {
    let mut db: Persistence = fresh_db();
    seed_user(&mut db, "t1@example.com", UserRole::Telemarketer);
    seed_user(&mut db, "m1@example.com", UserRole::SalesManager);
    seed_user(&mut db, "t2@example.com", UserRole::Telemarketer);

    let telemarketers: Vec<User> = db.list_users_by_role(UserRole::Telemarketer).unwrap();
    assert_eq!(telemarketers.len(), 2);
    assert!(
        telemarketers
            .iter()
            .all(|u| u.role == UserRole::Telemarketer)
    );
}

#[test]
fn test_team_members_ordered_by_id() {
    let mut db: Persistence = fresh_db();
    let manager_id: i64 = seed_user(&mut db, "mgr@example.com", UserRole::SalesManager);
    let team_id: i64 = seed_team(&mut db, "Alpha", manager_id);

    let t1: i64 = seed_user(&mut db, "a@example.com", UserRole::Telemarketer);
    let t2: i64 = seed_user(&mut db, "b@example.com", UserRole::Telemarketer);
    let t3: i64 = seed_user(&mut db, "c@example.com", UserRole::Telemarketer);
    // Join out of order; the roster must still come back sorted by id.
    db.set_user_team(t3, Some(team_id)).unwrap();
    db.set_user_team(t1, Some(team_id)).unwrap();
    db.set_user_team(t2, Some(team_id)).unwrap();

    let members: Vec<User> = db.team_members(team_id).unwrap();
    let ids: Vec<i64> = members.iter().filter_map(|u| u.user_id).collect();
    assert_eq!(ids, vec![t1, t2, t3]);
}

#[test]
fn test_unassigned_telemarketers_excludes_team_members() {
    let mut db: Persistence = fresh_db();
    let manager_id: i64 = seed_user(&mut db, "mgr@example.com", UserRole::SalesManager);
    let team_id: i64 = seed_team(&mut db, "Alpha", manager_id);

    let on_team: i64 = seed_user(&mut db, "on@example.com", UserRole::Telemarketer);
    let free: i64 = seed_user(&mut db, "free@example.com", UserRole::Telemarketer);
    db.set_user_team(on_team, Some(team_id)).unwrap();

    let unassigned: Vec<User> = db.unassigned_telemarketers().unwrap();
    let ids: Vec<i64> = unassigned.iter().filter_map(|u| u.user_id).collect();
    assert_eq!(ids, vec![free]);
}

#[test]
fn test_record_lead_assignment_updates_counters_and_list() {
    let mut db: Persistence = fresh_db();
    let user_id: i64 = seed_user(&mut db, "t@example.com", UserRole::Telemarketer);
    let creator: i64 = seed_user(&mut db, "admin@example.com", UserRole::Admin);
    let lead_id: i64 = super::helpers::seed_lead(&mut db, "p@example.com", creator);

    db.record_lead_assignment(user_id, lead_id).unwrap();

    let user: User = db.get_user(user_id).unwrap();
    assert_eq!(user.lead_count, 1);
    assert_eq!(user.leads_in_progress, 1);
    assert_eq!(user.assigned_leads, vec![lead_id]);
}

#[test]
fn test_remove_lead_assignment_reverses_open_lead() {
    let mut db: Persistence = fresh_db();
    let user_id: i64 = seed_user(&mut db, "t@example.com", UserRole::Telemarketer);
    let creator: i64 = seed_user(&mut db, "admin@example.com", UserRole::Admin);
    let lead_id: i64 = super::helpers::seed_lead(&mut db, "p@example.com", creator);

    db.record_lead_assignment(user_id, lead_id).unwrap();
    db.remove_lead_assignment(user_id, lead_id, true).unwrap();

    let user: User = db.get_user(user_id).unwrap();
    assert_eq!(user.lead_count, 0);
    assert_eq!(user.leads_in_progress, 0);
    assert!(user.assigned_leads.is_empty());
}

#[test]
fn test_status_counters_follow_transitions() {
    let mut db: Persistence = fresh_db();
    let user_id: i64 = seed_user(&mut db, "t@example.com", UserRole::Telemarketer);
    let creator: i64 = seed_user(&mut db, "admin@example.com", UserRole::Admin);
    let lead_id: i64 = super::helpers::seed_lead(&mut db, "p@example.com", creator);
    db.record_lead_assignment(user_id, lead_id).unwrap();

    // new -> qualified closes the lead and bumps the qualified counter.
    db.apply_status_counters(user_id, LeadStatus::New, LeadStatus::Qualified)
        .unwrap();
    let user: User = db.get_user(user_id).unwrap();
    assert_eq!(user.leads_in_progress, 0);
    assert_eq!(user.leads_qualified, 1);

    // qualified -> not_interested swaps terminal counters.
    db.apply_status_counters(user_id, LeadStatus::Qualified, LeadStatus::NotInterested)
        .unwrap();
    let user: User = db.get_user(user_id).unwrap();
    assert_eq!(user.leads_in_progress, 0);
    assert_eq!(user.leads_qualified, 0);
    assert_eq!(user.leads_not_interested, 1);

    // not_interested -> in_progress reopens the lead.
    db.apply_status_counters(user_id, LeadStatus::NotInterested, LeadStatus::InProgress)
        .unwrap();
    let user: User = db.get_user(user_id).unwrap();
    assert_eq!(user.leads_in_progress, 1);
    assert_eq!(user.leads_not_interested, 0);
}

#[test]
fn test_status_counters_noop_between_open_statuses() {
    let mut db: Persistence = fresh_db();
    let user_id: i64 = seed_user(&mut db, "t@example.com", UserRole::Telemarketer);

    db.apply_status_counters(user_id, LeadStatus::New, LeadStatus::FollowUp1)
        .unwrap();

    let user: User = db.get_user(user_id).unwrap();
    assert_eq!(user.leads_in_progress, 0);
    assert_eq!(user.leads_qualified, 0);
}
