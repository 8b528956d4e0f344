// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Whether a team is currently operating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TeamStatus {
    /// The team is live and may receive leads.
    #[default]
    Active,
    /// The team is retired; existing records are kept.
    Inactive,
}

impl FromStr for TeamStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(Self::Active),
            "inactive" => Ok(Self::Inactive),
            _ => Err(DomainError::InvalidTeamStatus(s.to_string())),
        }
    }
}

impl std::fmt::Display for TeamStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TeamStatus {
    /// Converts this status to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
        }
    }
}

/// A named grouping of telemarketers under one sales manager.
///
/// `member_count`, `total_leads`, and `converted_leads` are denormalized
/// counters maintained by the workflow, not authoritative aggregates.
/// The invariant is eventual: `member_count` equals the number of users
/// whose `team_id` is this team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    /// Canonical internal identifier.
    /// Optional to support creation before persistence.
    pub team_id: Option<i64>,
    /// The team's display name.
    pub name: String,
    /// The sales manager who owns this team.
    pub manager_id: i64,
    /// Denormalized copy of the manager's name for display.
    pub manager_name: String,
    /// Denormalized count of users whose `team_id` is this team.
    pub member_count: i64,
    /// Geographic region tag.
    pub region: String,
    /// Program tag (e.g. the course vertical this team sells).
    pub program: String,
    /// Whether the team is active.
    pub status: TeamStatus,
    /// Denormalized count of leads ever assigned to this team.
    pub total_leads: i64,
    /// Denormalized count of this team's qualified leads.
    pub converted_leads: i64,
    /// Creation timestamp (ISO 8601), assigned by the persistence layer.
    pub created_at: String,
    /// Last-update timestamp (ISO 8601), assigned by the persistence layer.
    pub updated_at: String,
}

impl Team {
    /// Creates a new `Team` without a persisted `team_id`.
    ///
    /// Counters start at zero; timestamps are assigned by the
    /// persistence layer on first save.
    ///
    /// # Arguments
    ///
    /// * `name` - The team's display name
    /// * `manager_id` - The owning sales manager
    /// * `manager_name` - The manager's name, denormalized for display
    /// * `region` - Geographic region tag
    /// * `program` - Program tag
    #[must_use]
    pub const fn new(
        name: String,
        manager_id: i64,
        manager_name: String,
        region: String,
        program: String,
    ) -> Self {
        Self {
            team_id: None,
            name,
            manager_id,
            manager_name,
            member_count: 0,
            region,
            program,
            status: TeamStatus::Active,
            total_leads: 0,
            converted_leads: 0,
            created_at: String::new(),
            updated_at: String::new(),
        }
    }

    /// Creates a `Team` with an existing `team_id` (from persistence).
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub const fn with_id(
        team_id: i64,
        name: String,
        manager_id: i64,
        manager_name: String,
        member_count: i64,
        region: String,
        program: String,
        status: TeamStatus,
        total_leads: i64,
        converted_leads: i64,
        created_at: String,
        updated_at: String,
    ) -> Self {
        Self {
            team_id: Some(team_id),
            name,
            manager_id,
            manager_name,
            member_count,
            region,
            program,
            status,
            total_leads,
            converted_leads,
            created_at,
            updated_at,
        }
    }
}
