// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::helpers::{lead, manager, team, telemarketer};
use crate::{
    LeadStatistics, ManagerSummary, TeamSummary, lead_statistics, manager_summary,
    member_conversion_rate, team_summary, top_performer,
};
use leadflow_domain::{Lead, LeadStatus, Team, User};

#[test]
fn test_team_summary_counts_and_rate() {
    let the_team: Team = team(1, 5);
    let members: Vec<User> = vec![telemarketer(1, 0, 0), telemarketer(2, 0, 0)];
    let leads: Vec<Lead> = vec![
        lead(1, LeadStatus::New),
        lead(2, LeadStatus::Qualified),
        lead(3, LeadStatus::Qualified),
        lead(4, LeadStatus::NotInterested),
        lead(5, LeadStatus::InProgress),
        lead(6, LeadStatus::Completed),
    ];

    let summary: TeamSummary = team_summary(&the_team, &members, &leads);

    assert_eq!(summary.member_count, 2);
    assert_eq!(summary.lead_count, 6);
    assert_eq!(summary.converted_leads, 2);
    // 2 / 6 * 100 = 33.333..., rounded to one decimal
    assert!((summary.conversion_rate - 33.3).abs() < f64::EPSILON);
}

#[test]
fn test_team_summary_zero_leads_is_zero_rate() {
    let the_team: Team = team(1, 5);
    let summary: TeamSummary = team_summary(&the_team, &[], &[]);

    assert_eq!(summary.lead_count, 0);
    assert!((summary.conversion_rate - 0.0).abs() < f64::EPSILON);
}

#[test]
fn test_team_summary_is_idempotent() {
    let the_team: Team = team(1, 5);
    let members: Vec<User> = vec![telemarketer(1, 10, 3)];
    let leads: Vec<Lead> = vec![lead(1, LeadStatus::Qualified), lead(2, LeadStatus::New)];

    let first: TeamSummary = team_summary(&the_team, &members, &leads);
    let second: TeamSummary = team_summary(&the_team, &members, &leads);

    assert_eq!(first, second);
}

#[test]
fn test_manager_summary_counts_owned_teams() {
    let the_manager: User = manager(5);
    let teams: Vec<Team> = vec![team(1, 5), team(2, 5), team(3, 9)];

    let summary: ManagerSummary = manager_summary(&the_manager, &teams);
    assert_eq!(summary.team_count, 2);

    // Idempotence
    assert_eq!(manager_summary(&the_manager, &teams), summary);
}

#[test]
fn test_member_conversion_rate_handles_zero_count() {
    let member: User = telemarketer(1, 0, 0);
    assert!((member_conversion_rate(&member) - 0.0).abs() < f64::EPSILON);
}

#[test]
fn test_member_conversion_rate_one_decimal() {
    // 1 / 3 * 100 = 33.333... -> 33.3
    let member: User = telemarketer(1, 3, 1);
    assert!((member_conversion_rate(&member) - 33.3).abs() < f64::EPSILON);
}

#[test]
fn test_top_performer_highest_rate_wins() {
    let members: Vec<User> = vec![
        telemarketer(1, 10, 2), // 20.0
        telemarketer(2, 10, 7), // 70.0
        telemarketer(3, 10, 5), // 50.0
    ];

    let best: &User = top_performer(&members).unwrap();
    assert_eq!(best.user_id, Some(2));
}

#[test]
fn test_top_performer_ties_break_by_first_occurrence() {
    let members: Vec<User> = vec![
        telemarketer(1, 10, 5), // 50.0
        telemarketer(2, 10, 5), // 50.0
        telemarketer(3, 10, 2), // 20.0
    ];

    let best: &User = top_performer(&members).unwrap();
    assert_eq!(best.user_id, Some(1));
}

#[test]
fn test_top_performer_empty_roster_is_none() {
    assert!(top_performer(&[]).is_none());
}

#[test]
fn test_lead_statistics_buckets_every_status() {
    let leads: Vec<Lead> = vec![
        lead(1, LeadStatus::New),
        lead(2, LeadStatus::New),
        lead(3, LeadStatus::InProgress),
        lead(4, LeadStatus::FollowUp1),
        lead(5, LeadStatus::FollowUp2),
        lead(6, LeadStatus::FollowUp3),
        lead(7, LeadStatus::Qualified),
        lead(8, LeadStatus::NotInterested),
        lead(9, LeadStatus::Completed),
    ];

    let stats: LeadStatistics = lead_statistics(&leads);

    assert_eq!(stats.new, 2);
    assert_eq!(stats.in_progress, 1);
    assert_eq!(stats.follow_up_1, 1);
    assert_eq!(stats.follow_up_2, 1);
    assert_eq!(stats.follow_up_3, 1);
    assert_eq!(stats.qualified, 1);
    assert_eq!(stats.not_interested, 1);
    assert_eq!(stats.completed, 1);
    assert_eq!(stats.total, 9);
}

#[test]
fn test_lead_statistics_empty_is_all_zero() {
    assert_eq!(lead_statistics(&[]), LeadStatistics::default());
}
