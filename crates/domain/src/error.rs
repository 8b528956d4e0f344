// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// User or lead name is empty or invalid.
    InvalidName(String),
    /// Email address is empty or malformed.
    InvalidEmail(String),
    /// Phone number is empty or invalid.
    InvalidPhone(String),
    /// Role string is not one of the five recognized roles.
    InvalidRole(String),
    /// Lead status string is not in the fixed status enumeration.
    InvalidLeadStatus(String),
    /// Team status string is not `active` or `inactive`.
    InvalidTeamStatus(String),
    /// Distribution method string is not recognized.
    InvalidDistributionMethod(String),
    /// Permission string is not in the fixed permission enumeration.
    InvalidPermission(String),
    /// Team name is empty or invalid.
    InvalidTeamName(String),
    /// Daily quota must be positive.
    InvalidDailyQuota {
        /// The invalid quota value.
        quota: i64,
    },
    /// Only telemarketers may belong to a team.
    RoleNotTeamEligible {
        /// The offending role.
        role: String,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidName(msg) => write!(f, "Invalid name: {msg}"),
            Self::InvalidEmail(msg) => write!(f, "Invalid email: {msg}"),
            Self::InvalidPhone(msg) => write!(f, "Invalid phone: {msg}"),
            Self::InvalidRole(msg) => write!(f, "Invalid role: {msg}"),
            Self::InvalidLeadStatus(msg) => write!(f, "Invalid lead status: {msg}"),
            Self::InvalidTeamStatus(msg) => write!(f, "Invalid team status: {msg}"),
            Self::InvalidDistributionMethod(msg) => {
                write!(f, "Invalid distribution method: {msg}")
            }
            Self::InvalidPermission(msg) => write!(f, "Invalid permission: {msg}"),
            Self::InvalidTeamName(msg) => write!(f, "Invalid team name: {msg}"),
            Self::InvalidDailyQuota { quota } => {
                write!(f, "Invalid daily quota: {quota}. Must be greater than 0")
            }
            Self::RoleNotTeamEligible { role } => {
                write!(f, "Users with role '{role}' cannot belong to a team")
            }
        }
    }
}

impl std::error::Error for DomainError {}
