// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Shared fixtures for the API tests.

use leadflow_audit::Cause;
use leadflow_domain::{Lead, Team, User, UserRole};
use leadflow_persistence::Persistence;

use crate::auth::AuthenticatedUser;

/// A fixed bcrypt-shaped hash for accounts that never log in.
pub const TEST_HASH: &str = "$2b$04$abcdefghijklmnopqrstuv";

pub fn fresh_db() -> Persistence {
    Persistence::new_in_memory().expect("in-memory database should initialize")
}

pub fn test_cause() -> Cause {
    Cause::new(String::from("test-req-1"), String::from("test request"))
}

/// Seeds a user with the given role and returns (id, authenticated actor).
pub fn seed_actor(
    persistence: &mut Persistence,
    email: &str,
    role: UserRole,
) -> (i64, AuthenticatedUser) {
    let user: User = User::new(
        String::from(email),
        format!("User {email}"),
        role,
        None,
    );
    let user_id: i64 = persistence
        .create_user(&user, TEST_HASH)
        .expect("seed user should insert");
    (user_id, AuthenticatedUser::new(user_id, role))
}

/// Seeds a sales manager and a team they own, returning (manager_id, team_id).
pub fn seed_team(persistence: &mut Persistence, name: &str) -> (i64, i64) {
    let (manager_id, _) = seed_actor(
        persistence,
        &format!("manager.{name}@example.com"),
        UserRole::SalesManager,
    );
    let team: Team = Team::new(
        String::from(name),
        manager_id,
        format!("Manager {name}"),
        String::from("south"),
        String::from("engineering"),
    );
    let team_id: i64 = persistence
        .create_team(&team)
        .expect("seed team should insert");
    (manager_id, team_id)
}

/// Seeds a telemarketer on the given team.
pub fn seed_telemarketer(persistence: &mut Persistence, email: &str, team_id: i64) -> i64 {
    let user: User = User::new(
        String::from(email),
        format!("Caller {email}"),
        UserRole::Telemarketer,
        Some(team_id),
    );
    persistence
        .create_user(&user, TEST_HASH)
        .expect("seed telemarketer should insert")
}

/// Seeds a telemarketer that is not yet on any team.
pub fn seed_free_telemarketer(persistence: &mut Persistence, email: &str) -> i64 {
    let user: User = User::new(
        String::from(email),
        format!("Caller {email}"),
        UserRole::Telemarketer,
        None,
    );
    persistence
        .create_user(&user, TEST_HASH)
        .expect("seed telemarketer should insert")
}

/// Builds an unpersisted lead created by the given user.
pub fn sample_lead(n: usize, created_by: i64) -> Lead {
    Lead::new(
        format!("Prospect {n}"),
        format!("prospect{n}@example.com"),
        format!("+1555000{n:04}"),
        None,
        created_by,
    )
}
