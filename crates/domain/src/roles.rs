// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The closed set of user roles.
///
/// Roles are configuration, not data: adding a role requires a code
/// change, never a data migration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    /// Full administrative access to users, teams, and leads.
    Admin,
    /// Owns one or more teams and distributes leads to them.
    SalesManager,
    /// Works assigned leads toward a daily quota.
    Telemarketer,
    /// Manages student applications and document review.
    Counselor,
    /// Tracks their own application progress.
    Student,
}

impl FromStr for UserRole {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Self::Admin),
            "sales_manager" => Ok(Self::SalesManager),
            "telemarketer" => Ok(Self::Telemarketer),
            "counselor" => Ok(Self::Counselor),
            "student" => Ok(Self::Student),
            _ => Err(DomainError::InvalidRole(s.to_string())),
        }
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl UserRole {
    /// Converts this role to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::SalesManager => "sales_manager",
            Self::Telemarketer => "telemarketer",
            Self::Counselor => "counselor",
            Self::Student => "student",
        }
    }

    /// Returns whether users with this role may belong to a team.
    ///
    /// Only telemarketers carry a team assignment.
    #[must_use]
    pub const fn is_team_eligible(&self) -> bool {
        matches!(self, Self::Telemarketer)
    }
}
