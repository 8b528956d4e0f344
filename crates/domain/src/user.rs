// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::roles::UserRole;
use serde::{Deserialize, Serialize};

/// A person with a role and, for telemarketers, denormalized lead counters.
///
/// Counters must equal the count of leads actually referencing this user
/// as assignee, but only eventually: the workflow maintains them with
/// best-effort sequential writes, not transactions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Canonical internal identifier.
    /// Optional to support creation before persistence.
    pub user_id: Option<i64>,
    /// The user's email address (unique, also the login name).
    pub email: String,
    /// The user's display name.
    pub name: String,
    /// The user's role.
    pub role: UserRole,
    /// The team this user belongs to.
    /// Set only when `role` is `Telemarketer`; at most one team at a time.
    pub team_id: Option<i64>,
    /// Denormalized count of leads ever assigned to this user.
    pub lead_count: i64,
    /// Denormalized count of this user's open (non-terminal) leads.
    pub leads_in_progress: i64,
    /// Denormalized count of this user's qualified leads.
    pub leads_qualified: i64,
    /// Denormalized count of this user's not-interested leads.
    pub leads_not_interested: i64,
    /// Denormalized list of lead identifiers assigned to this user.
    pub assigned_leads: Vec<i64>,
    /// Daily call quota for telemarketers.
    pub daily_quota: i64,
    /// Creation timestamp (ISO 8601), assigned by the persistence layer.
    pub created_at: String,
    /// Last-update timestamp (ISO 8601), assigned by the persistence layer.
    pub updated_at: String,
}

impl User {
    /// Default daily call quota for a new telemarketer.
    pub const DEFAULT_DAILY_QUOTA: i64 = 30;

    /// Creates a new `User` without a persisted `user_id`.
    ///
    /// Counters start at zero and the daily quota at
    /// [`Self::DEFAULT_DAILY_QUOTA`]. Timestamps are assigned by the
    /// persistence layer on first save.
    ///
    /// # Arguments
    ///
    /// * `email` - The user's email address
    /// * `name` - The user's display name
    /// * `role` - The user's role
    /// * `team_id` - The team assignment (telemarketers only)
    #[must_use]
    pub const fn new(email: String, name: String, role: UserRole, team_id: Option<i64>) -> Self {
        Self {
            user_id: None,
            email,
            name,
            role,
            team_id,
            lead_count: 0,
            leads_in_progress: 0,
            leads_qualified: 0,
            leads_not_interested: 0,
            assigned_leads: Vec::new(),
            daily_quota: Self::DEFAULT_DAILY_QUOTA,
            created_at: String::new(),
            updated_at: String::new(),
        }
    }

    /// Creates a `User` with an existing `user_id` (from persistence).
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub const fn with_id(
        user_id: i64,
        email: String,
        name: String,
        role: UserRole,
        team_id: Option<i64>,
        lead_count: i64,
        leads_in_progress: i64,
        leads_qualified: i64,
        leads_not_interested: i64,
        assigned_leads: Vec<i64>,
        daily_quota: i64,
        created_at: String,
        updated_at: String,
    ) -> Self {
        Self {
            user_id: Some(user_id),
            email,
            name,
            role,
            team_id,
            lead_count,
            leads_in_progress,
            leads_qualified,
            leads_not_interested,
            assigned_leads,
            daily_quota,
            created_at,
            updated_at,
        }
    }

    /// Validates the team membership invariant.
    ///
    /// A user may carry a `team_id` only when their role is team
    /// eligible (telemarketer).
    ///
    /// # Errors
    ///
    /// Returns `DomainError::RoleNotTeamEligible` if a non-telemarketer
    /// carries a team assignment.
    pub fn validate_team_membership(&self) -> Result<(), DomainError> {
        if self.team_id.is_some() && !self.role.is_team_eligible() {
            return Err(DomainError::RoleNotTeamEligible {
                role: self.role.as_str().to_string(),
            });
        }
        Ok(())
    }
}
