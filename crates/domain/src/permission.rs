// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The closed set of action permissions.
///
/// Like roles, permissions are configuration: adding one requires a
/// code change. The string forms use the `verb:object` convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Permission {
    /// Create, update, and deactivate user accounts.
    #[serde(rename = "manage:users")]
    ManageUsers,
    /// View cross-team analytics dashboards.
    #[serde(rename = "view:analytics")]
    ViewAnalytics,
    /// Create, update, and delete teams.
    #[serde(rename = "manage:teams")]
    ManageTeams,
    /// Import leads from CSV.
    #[serde(rename = "upload:leads")]
    UploadLeads,
    /// Add and remove telemarketers on a team.
    #[serde(rename = "manage:team_members")]
    ManageTeamMembers,
    /// Distribute or reassign leads.
    #[serde(rename = "assign:leads")]
    AssignLeads,
    /// View team roll-up statistics.
    #[serde(rename = "view:team_performance")]
    ViewTeamPerformance,
    /// View leads assigned to oneself.
    #[serde(rename = "view:assigned_leads")]
    ViewAssignedLeads,
    /// Move a lead through the status pipeline.
    #[serde(rename = "update:lead_status")]
    UpdateLeadStatus,
    /// Track progress against the daily call quota.
    #[serde(rename = "track:daily_quota")]
    TrackDailyQuota,
    /// Manage student application records.
    #[serde(rename = "manage:student_applications")]
    ManageStudentApplications,
    /// Update an application's status.
    #[serde(rename = "update:application_status")]
    UpdateApplicationStatus,
    /// Review uploaded application documents.
    #[serde(rename = "review:documents")]
    ReviewDocuments,
    /// View one's own application status.
    #[serde(rename = "view:application_status")]
    ViewApplicationStatus,
    /// Upload application documents.
    #[serde(rename = "upload:documents")]
    UploadDocuments,
    /// Track one's own application progress.
    #[serde(rename = "track:progress")]
    TrackProgress,
}

impl FromStr for Permission {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "manage:users" => Ok(Self::ManageUsers),
            "view:analytics" => Ok(Self::ViewAnalytics),
            "manage:teams" => Ok(Self::ManageTeams),
            "upload:leads" => Ok(Self::UploadLeads),
            "manage:team_members" => Ok(Self::ManageTeamMembers),
            "assign:leads" => Ok(Self::AssignLeads),
            "view:team_performance" => Ok(Self::ViewTeamPerformance),
            "view:assigned_leads" => Ok(Self::ViewAssignedLeads),
            "update:lead_status" => Ok(Self::UpdateLeadStatus),
            "track:daily_quota" => Ok(Self::TrackDailyQuota),
            "manage:student_applications" => Ok(Self::ManageStudentApplications),
            "update:application_status" => Ok(Self::UpdateApplicationStatus),
            "review:documents" => Ok(Self::ReviewDocuments),
            "view:application_status" => Ok(Self::ViewApplicationStatus),
            "upload:documents" => Ok(Self::UploadDocuments),
            "track:progress" => Ok(Self::TrackProgress),
            _ => Err(DomainError::InvalidPermission(s.to_string())),
        }
    }
}

impl std::fmt::Display for Permission {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Permission {
    /// Converts this permission to its `verb:object` string form.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ManageUsers => "manage:users",
            Self::ViewAnalytics => "view:analytics",
            Self::ManageTeams => "manage:teams",
            Self::UploadLeads => "upload:leads",
            Self::ManageTeamMembers => "manage:team_members",
            Self::AssignLeads => "assign:leads",
            Self::ViewTeamPerformance => "view:team_performance",
            Self::ViewAssignedLeads => "view:assigned_leads",
            Self::UpdateLeadStatus => "update:lead_status",
            Self::TrackDailyQuota => "track:daily_quota",
            Self::ManageStudentApplications => "manage:student_applications",
            Self::UpdateApplicationStatus => "update:application_status",
            Self::ReviewDocuments => "review:documents",
            Self::ViewApplicationStatus => "view:application_status",
            Self::UploadDocuments => "upload:documents",
            Self::TrackProgress => "track:progress",
        }
    }
}
