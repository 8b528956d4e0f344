// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use leadflow::CoreError;
use leadflow_domain::DomainError;
use leadflow_persistence::PersistenceError;

use crate::password_policy::PasswordPolicyError;

/// Authentication and authorization errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Authentication failed.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// Authorization failed.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The permission required for this action.
        required_permission: String,
    },
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::Unauthorized {
                action,
                required_permission,
            } => {
                write!(
                    f,
                    "Unauthorized: '{action}' requires the '{required_permission}' permission"
                )
            }
        }
    }
}

impl std::error::Error for AuthError {}

/// API-level errors.
///
/// These are distinct from domain/core errors and represent the API contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Authentication failed.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// Authorization failed - the actor does not have permission.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The permission required for this action.
        required_permission: String,
    },
    /// A domain rule was violated.
    DomainRuleViolation {
        /// The rule that was violated.
        rule: String,
        /// A human-readable description of the violation.
        message: String,
    },
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// The uploaded CSV could not be parsed.
    InvalidCsvFormat {
        /// Why the CSV was rejected.
        reason: String,
    },
    /// The column mapping does not cover every mandatory lead field.
    MappingIncomplete {
        /// The mandatory fields with no mapped column.
        missing: Vec<String>,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// The selected distribution policy has no batch implementation.
    DistributionNotImplemented {
        /// The policy that was requested.
        method: String,
    },
    /// No eligible assignees were available for distribution.
    NoEligibleAssignees,
    /// Password policy violation.
    PasswordPolicyViolation {
        /// A human-readable description of the policy violation.
        message: String,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::Unauthorized {
                action,
                required_permission,
            } => {
                write!(
                    f,
                    "Unauthorized: '{action}' requires the '{required_permission}' permission"
                )
            }
            Self::DomainRuleViolation { rule, message } => {
                write!(f, "Domain rule violation ({rule}): {message}")
            }
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::InvalidCsvFormat { reason } => {
                write!(f, "Invalid CSV format: {reason}")
            }
            Self::MappingIncomplete { missing } => {
                write!(f, "Column mapping incomplete: missing {}", missing.join(", "))
            }
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::DistributionNotImplemented { method } => {
                write!(f, "Distribution method '{method}' is not implemented for batches")
            }
            Self::NoEligibleAssignees => {
                write!(f, "No eligible assignees available for distribution")
            }
            Self::PasswordPolicyViolation { message } => {
                write!(f, "Password policy violation: {message}")
            }
            Self::Internal { message } => {
                write!(f, "Internal error: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::AuthenticationFailed { reason } => Self::AuthenticationFailed { reason },
            AuthError::Unauthorized {
                action,
                required_permission,
            } => Self::Unauthorized {
                action,
                required_permission,
            },
        }
    }
}

impl From<PasswordPolicyError> for ApiError {
    fn from(err: PasswordPolicyError) -> Self {
        Self::PasswordPolicyViolation {
            message: err.to_string(),
        }
    }
}

impl From<PersistenceError> for ApiError {
    fn from(err: PersistenceError) -> Self {
        match err {
            PersistenceError::NotFound(message) => Self::ResourceNotFound {
                resource_type: String::from("Record"),
                message,
            },
            _ => Self::Internal {
                message: err.to_string(),
            },
        }
    }
}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked directly.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    match err {
        DomainError::InvalidName(msg) => ApiError::InvalidInput {
            field: String::from("name"),
            message: msg,
        },
        DomainError::InvalidEmail(msg) => ApiError::InvalidInput {
            field: String::from("email"),
            message: msg,
        },
        DomainError::InvalidPhone(msg) => ApiError::InvalidInput {
            field: String::from("phone"),
            message: msg,
        },
        DomainError::InvalidRole(msg) => ApiError::InvalidInput {
            field: String::from("role"),
            message: format!("Invalid role '{msg}'"),
        },
        DomainError::InvalidLeadStatus(msg) => ApiError::InvalidInput {
            field: String::from("status"),
            message: format!("Invalid lead status '{msg}'"),
        },
        DomainError::InvalidTeamStatus(msg) => ApiError::InvalidInput {
            field: String::from("status"),
            message: format!("Invalid team status '{msg}'"),
        },
        DomainError::InvalidDistributionMethod(msg) => ApiError::InvalidInput {
            field: String::from("distribution_method"),
            message: format!("Invalid distribution method '{msg}'"),
        },
        DomainError::InvalidPermission(msg) => ApiError::InvalidInput {
            field: String::from("permission"),
            message: format!("Invalid permission '{msg}'"),
        },
        DomainError::InvalidTeamName(msg) => ApiError::InvalidInput {
            field: String::from("team_name"),
            message: msg,
        },
        DomainError::InvalidDailyQuota { quota } => ApiError::InvalidInput {
            field: String::from("daily_quota"),
            message: format!("Invalid daily quota: {quota}. Must be greater than 0"),
        },
        DomainError::RoleNotTeamEligible { role } => ApiError::DomainRuleViolation {
            rule: String::from("team_membership"),
            message: format!("Users with role '{role}' cannot belong to a team"),
        },
    }
}

/// Translates a core error into an API error.
///
/// This translation is explicit and ensures core errors are not leaked directly.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
        CoreError::NoEligibleAssignees => ApiError::NoEligibleAssignees,
        CoreError::BatchPolicyNotImplemented { method } => ApiError::DistributionNotImplemented {
            method: method.as_str().to_string(),
        },
    }
}
