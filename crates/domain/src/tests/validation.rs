// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    DomainError, Lead, Team, User, UserRole, validate_lead_fields, validate_team_fields,
    validate_user_fields,
};

fn valid_lead() -> Lead {
    Lead::new(
        String::from("Jane Prospect"),
        String::from("jane@example.com"),
        String::from("555-0100"),
        Some(1),
        1,
    )
}

#[test]
fn test_valid_lead_passes() {
    assert!(validate_lead_fields(&valid_lead()).is_ok());
}

#[test]
fn test_lead_empty_name_rejected() {
    let mut lead: Lead = valid_lead();
    lead.name = String::from("   ");

    assert!(matches!(
        validate_lead_fields(&lead),
        Err(DomainError::InvalidName(_))
    ));
}

#[test]
fn test_lead_empty_email_rejected() {
    let mut lead: Lead = valid_lead();
    lead.email = String::new();

    assert!(matches!(
        validate_lead_fields(&lead),
        Err(DomainError::InvalidEmail(_))
    ));
}

#[test]
fn test_lead_malformed_email_rejected() {
    let mut lead: Lead = valid_lead();
    lead.email = String::from("not-an-address");

    assert!(matches!(
        validate_lead_fields(&lead),
        Err(DomainError::InvalidEmail(_))
    ));
}

#[test]
fn test_lead_empty_phone_rejected() {
    let mut lead: Lead = valid_lead();
    lead.phone = String::from(" ");

    assert!(matches!(
        validate_lead_fields(&lead),
        Err(DomainError::InvalidPhone(_))
    ));
}

#[test]
fn test_valid_user_passes() {
    let user: User = User::new(
        String::from("tm@example.com"),
        String::from("Test Telemarketer"),
        UserRole::Telemarketer,
        Some(1),
    );
    assert!(validate_user_fields(&user).is_ok());
}

#[test]
fn test_non_telemarketer_with_team_rejected() {
    let user: User = User::new(
        String::from("mgr@example.com"),
        String::from("Morgan Manager"),
        UserRole::SalesManager,
        Some(1),
    );

    assert_eq!(
        validate_user_fields(&user),
        Err(DomainError::RoleNotTeamEligible {
            role: String::from("sales_manager"),
        })
    );
}

#[test]
fn test_counselor_without_team_passes() {
    let user: User = User::new(
        String::from("c@example.com"),
        String::from("Casey Counselor"),
        UserRole::Counselor,
        None,
    );
    assert!(validate_user_fields(&user).is_ok());
}

#[test]
fn test_non_positive_quota_rejected() {
    let mut user: User = User::new(
        String::from("tm@example.com"),
        String::from("Test Telemarketer"),
        UserRole::Telemarketer,
        None,
    );
    user.daily_quota = 0;

    assert_eq!(
        validate_user_fields(&user),
        Err(DomainError::InvalidDailyQuota { quota: 0 })
    );
}

#[test]
fn test_empty_team_name_rejected() {
    let team: Team = Team::new(
        String::new(),
        5,
        String::from("Morgan Manager"),
        String::from("North"),
        String::from("Undergraduate"),
    );

    assert!(matches!(
        validate_team_fields(&team),
        Err(DomainError::InvalidTeamName(_))
    ));
}
