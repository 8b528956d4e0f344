// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Shared fixtures for persistence tests.

use leadflow_domain::{Lead, Team, User, UserRole};

use crate::Persistence;

pub const TEST_HASH: &str = "$2b$12$test-hash-not-a-real-one";

pub fn fresh_db() -> Persistence {
    Persistence::new_in_memory().unwrap()
}

pub fn seed_user(db: &mut Persistence, email: &str, role: UserRole) -> i64 {
    let user: User = User::new(
        String::from(email),
        String::from("Test User"),
        role,
        None,
    );
    db.create_user(&user, TEST_HASH).unwrap()
}

pub fn seed_team(db: &mut Persistence, name: &str, manager_id: i64) -> i64 {
    let team: Team = Team::new(
        String::from(name),
        manager_id,
        String::from("Test Manager"),
        String::from("EMEA"),
        String::from("MBA"),
    );
    db.create_team(&team).unwrap()
}

pub fn seed_lead(db: &mut Persistence, email: &str, created_by: i64) -> i64 {
    let lead: Lead = Lead::new(
        String::from("Test Prospect"),
        String::from(email),
        String::from("+1-555-0100"),
        None,
        created_by,
    );
    db.create_lead(&lead).unwrap()
}
