// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::lead::Lead;
use crate::team::Team;
use crate::user::User;

/// Validates a lead's mandatory contact fields.
///
/// This is the same rule CSV materialization applies: `name`, `email`,
/// and `phone` must all be non-empty after trimming.
///
/// # Arguments
///
/// * `lead` - The lead to validate
///
/// # Returns
///
/// * `Ok(())` if the lead's fields are valid
/// * `Err(DomainError)` if any mandatory field is missing
///
/// # Errors
///
/// Returns an error if name, email, or phone is empty, or if the email
/// has no `@`.
pub fn validate_lead_fields(lead: &Lead) -> Result<(), DomainError> {
    // Rule: name must not be empty
    if lead.name.trim().is_empty() {
        return Err(DomainError::InvalidName(String::from(
            "Lead name cannot be empty",
        )));
    }

    // Rule: email must not be empty and must look like an address
    let email: &str = lead.email.trim();
    if email.is_empty() {
        return Err(DomainError::InvalidEmail(String::from(
            "Lead email cannot be empty",
        )));
    }
    if !email.contains('@') {
        return Err(DomainError::InvalidEmail(format!(
            "'{email}' is not a valid email address"
        )));
    }

    // Rule: phone must not be empty
    if lead.phone.trim().is_empty() {
        return Err(DomainError::InvalidPhone(String::from(
            "Lead phone cannot be empty",
        )));
    }

    Ok(())
}

/// Validates a user's basic field constraints.
///
/// Checks required fields and the team membership invariant. Does NOT
/// check email uniqueness (that requires store context).
///
/// # Errors
///
/// Returns an error if the name or email is invalid, the daily quota is
/// not positive, or a non-telemarketer carries a team assignment.
pub fn validate_user_fields(user: &User) -> Result<(), DomainError> {
    if user.name.trim().is_empty() {
        return Err(DomainError::InvalidName(String::from(
            "User name cannot be empty",
        )));
    }

    let email: &str = user.email.trim();
    if email.is_empty() || !email.contains('@') {
        return Err(DomainError::InvalidEmail(format!(
            "'{email}' is not a valid email address"
        )));
    }

    if user.daily_quota <= 0 {
        return Err(DomainError::InvalidDailyQuota {
            quota: user.daily_quota,
        });
    }

    user.validate_team_membership()
}

/// Validates a team's basic field constraints.
///
/// # Errors
///
/// Returns an error if the team name is empty.
pub fn validate_team_fields(team: &Team) -> Result<(), DomainError> {
    if team.name.trim().is_empty() {
        return Err(DomainError::InvalidTeamName(String::from(
            "Team name cannot be empty",
        )));
    }
    Ok(())
}
