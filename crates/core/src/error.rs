// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use leadflow_domain::{DistributionMethod, DomainError};

/// Errors that can occur while planning lead assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A domain rule was violated.
    DomainViolation(DomainError),
    /// The target team has no telemarketers; nothing can be assigned.
    NoEligibleAssignees,
    /// The selected distribution policy has no batch behavior.
    BatchPolicyNotImplemented {
        /// The policy that was requested.
        method: DistributionMethod,
    },
}

impl std::fmt::Display for CoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DomainViolation(err) => write!(f, "Domain violation: {err}"),
            Self::NoEligibleAssignees => {
                write!(f, "No eligible assignees: the team roster is empty")
            }
            Self::BatchPolicyNotImplemented { method } => {
                write!(
                    f,
                    "Distribution method '{method}' is not implemented for batch assignment"
                )
            }
        }
    }
}

impl std::error::Error for CoreError {}

impl From<DomainError> for CoreError {
    fn from(err: DomainError) -> Self {
        Self::DomainViolation(err)
    }
}
