// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::DomainError;

#[test]
fn test_error_messages_name_the_offending_value() {
    let err: DomainError = DomainError::InvalidRole(String::from("superuser"));
    assert_eq!(err.to_string(), "Invalid role: superuser");

    let err: DomainError = DomainError::InvalidLeadStatus(String::from("done"));
    assert_eq!(err.to_string(), "Invalid lead status: done");

    let err: DomainError = DomainError::InvalidDailyQuota { quota: -3 };
    assert_eq!(
        err.to_string(),
        "Invalid daily quota: -3. Must be greater than 0"
    );

    let err: DomainError = DomainError::RoleNotTeamEligible {
        role: String::from("student"),
    };
    assert_eq!(err.to_string(), "Users with role 'student' cannot belong to a team");
}

#[test]
fn test_error_implements_std_error() {
    fn assert_error<E: std::error::Error>(_err: &E) {}
    assert_error(&DomainError::InvalidName(String::from("empty")));
}
