// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The status pipeline a lead moves through.
///
/// Transitions are not constrained by a state machine: any authorized
/// actor may set any status. This is inherited product behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LeadStatus {
    /// Freshly imported or created, not yet worked.
    #[default]
    New,
    /// A telemarketer has started working the lead.
    InProgress,
    /// First follow-up call scheduled.
    FollowUp1,
    /// Second follow-up call scheduled.
    FollowUp2,
    /// Third follow-up call scheduled.
    FollowUp3,
    /// Converted: the prospect is moving to admissions.
    Qualified,
    /// The prospect declined.
    NotInterested,
    /// The lead has been fully processed.
    Completed,
}

impl FromStr for LeadStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "new" => Ok(Self::New),
            "in_progress" => Ok(Self::InProgress),
            "follow_up_1" => Ok(Self::FollowUp1),
            "follow_up_2" => Ok(Self::FollowUp2),
            "follow_up_3" => Ok(Self::FollowUp3),
            "qualified" => Ok(Self::Qualified),
            "not_interested" => Ok(Self::NotInterested),
            "completed" => Ok(Self::Completed),
            _ => Err(DomainError::InvalidLeadStatus(s.to_string())),
        }
    }
}

impl std::fmt::Display for LeadStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl LeadStatus {
    /// Every status in pipeline order.
    pub const ALL: [Self; 8] = [
        Self::New,
        Self::InProgress,
        Self::FollowUp1,
        Self::FollowUp2,
        Self::FollowUp3,
        Self::Qualified,
        Self::NotInterested,
        Self::Completed,
    ];

    /// Converts this status to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::New => "new",
            Self::InProgress => "in_progress",
            Self::FollowUp1 => "follow_up_1",
            Self::FollowUp2 => "follow_up_2",
            Self::FollowUp3 => "follow_up_3",
            Self::Qualified => "qualified",
            Self::NotInterested => "not_interested",
            Self::Completed => "completed",
        }
    }

    /// Returns whether this status counts toward a user's in-progress counter.
    ///
    /// Everything before a terminal outcome is considered in progress.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        !matches!(self, Self::Qualified | Self::NotInterested | Self::Completed)
    }
}

/// A sales prospect record.
///
/// `lead_id` is the canonical internal identifier, assigned by the
/// persistence layer on first save.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lead {
    /// Canonical internal identifier.
    /// Optional to support creation before persistence.
    pub lead_id: Option<i64>,
    /// The prospect's name.
    pub name: String,
    /// The prospect's email address.
    pub email: String,
    /// The prospect's phone number.
    pub phone: String,
    /// Where the lead currently sits in the pipeline.
    pub status: LeadStatus,
    /// The team this lead belongs to, if any.
    pub team_id: Option<i64>,
    /// The telemarketer this lead is assigned to, if any.
    ///
    /// Once assigned, this must reference a telemarketer member of
    /// `team_id`. Eventual consistency only.
    pub assigned_to: Option<i64>,
    /// Acquisition source or channel (optional).
    pub source: Option<String>,
    /// Country of interest (optional).
    pub interested_country: Option<String>,
    /// Course or program of interest (optional).
    pub course: Option<String>,
    /// Free-text notes, append-only.
    pub notes: Vec<String>,
    /// The user who created or imported this lead.
    pub created_by: i64,
    /// Creation timestamp (ISO 8601), assigned by the persistence layer.
    pub created_at: String,
    /// Last-update timestamp (ISO 8601), assigned by the persistence layer.
    pub updated_at: String,
}

impl Lead {
    /// Creates a new `Lead` without a persisted `lead_id`.
    ///
    /// Status starts at `New`; timestamps are assigned by the
    /// persistence layer on first save.
    ///
    /// # Arguments
    ///
    /// * `name` - The prospect's name
    /// * `email` - The prospect's email address
    /// * `phone` - The prospect's phone number
    /// * `team_id` - The team this lead belongs to, if any
    /// * `created_by` - The user creating or importing the lead
    #[must_use]
    pub const fn new(
        name: String,
        email: String,
        phone: String,
        team_id: Option<i64>,
        created_by: i64,
    ) -> Self {
        Self {
            lead_id: None,
            name,
            email,
            phone,
            status: LeadStatus::New,
            team_id,
            assigned_to: None,
            source: None,
            interested_country: None,
            course: None,
            notes: Vec::new(),
            created_by,
            created_at: String::new(),
            updated_at: String::new(),
        }
    }

    /// Creates a `Lead` with an existing `lead_id` (from persistence).
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub const fn with_id(
        lead_id: i64,
        name: String,
        email: String,
        phone: String,
        status: LeadStatus,
        team_id: Option<i64>,
        assigned_to: Option<i64>,
        source: Option<String>,
        interested_country: Option<String>,
        course: Option<String>,
        notes: Vec<String>,
        created_by: i64,
        created_at: String,
        updated_at: String,
    ) -> Self {
        Self {
            lead_id: Some(lead_id),
            name,
            email,
            phone,
            status,
            team_id,
            assigned_to,
            source,
            interested_country,
            course,
            notes,
            created_by,
            created_at,
            updated_at,
        }
    }

    /// Returns whether this lead has been assigned to a telemarketer.
    #[must_use]
    pub const fn is_assigned(&self) -> bool {
        self.assigned_to.is_some()
    }
}
