// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use leadflow_domain::{Lead, LeadStatus, Team, User, UserRole};

/// Builds a persisted telemarketer with the given counters.
pub fn telemarketer(user_id: i64, lead_count: i64, leads_qualified: i64) -> User {
    User::with_id(
        user_id,
        format!("tm{user_id}@example.com"),
        format!("Telemarketer {user_id}"),
        UserRole::Telemarketer,
        Some(1),
        lead_count,
        0,
        leads_qualified,
        0,
        Vec::new(),
        User::DEFAULT_DAILY_QUOTA,
        String::from("2026-01-05T09:00:00Z"),
        String::from("2026-01-05T09:00:00Z"),
    )
}

/// Builds a persisted sales manager.
pub fn manager(user_id: i64) -> User {
    User::with_id(
        user_id,
        format!("mgr{user_id}@example.com"),
        format!("Manager {user_id}"),
        UserRole::SalesManager,
        None,
        0,
        0,
        0,
        0,
        Vec::new(),
        User::DEFAULT_DAILY_QUOTA,
        String::from("2026-01-05T09:00:00Z"),
        String::from("2026-01-05T09:00:00Z"),
    )
}

/// Builds a persisted team owned by the given manager.
pub fn team(team_id: i64, manager_id: i64) -> Team {
    Team::with_id(
        team_id,
        format!("Team {team_id}"),
        manager_id,
        format!("Manager {manager_id}"),
        0,
        String::from("North"),
        String::from("Undergraduate"),
        leadflow_domain::TeamStatus::Active,
        0,
        0,
        String::from("2026-01-05T09:00:00Z"),
        String::from("2026-01-05T09:00:00Z"),
    )
}

/// Builds a persisted lead with the given status.
pub fn lead(lead_id: i64, status: LeadStatus) -> Lead {
    Lead::with_id(
        lead_id,
        format!("Prospect {lead_id}"),
        format!("p{lead_id}@example.com"),
        String::from("555-0100"),
        status,
        Some(1),
        None,
        None,
        None,
        None,
        Vec::new(),
        1,
        String::from("2026-01-05T09:00:00Z"),
        String::from("2026-01-05T09:00:00Z"),
    )
}
