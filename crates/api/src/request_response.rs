// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.

use leadflow_domain::{Lead, LeadStatus, Team, User};

use crate::csv_import::LeadField;
use crate::distribution::DistributionReport;
use crate::teams::{ManagerOverview, TeamPerformance};

/// API request to log in and create a session.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct LoginRequest {
    /// The account email.
    pub email: String,
    /// The account password.
    pub password: String,
}

/// API response for successful login.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct LoginResponse {
    /// The session token (opaque).
    pub session_token: String,
    /// The user's canonical identifier.
    pub user_id: i64,
    /// The user's email.
    pub email: String,
    /// The user's display name.
    pub name: String,
    /// The user's role.
    pub role: String,
}

/// API request to create a user account.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CreateUserRequest {
    /// The account email (unique).
    pub email: String,
    /// The display name.
    pub name: String,
    /// The role name (e.g. `telemarketer`).
    pub role: String,
    /// The team assignment, telemarketers only.
    pub team_id: Option<i64>,
    /// The account password.
    pub password: String,
    /// The password confirmation.
    pub password_confirmation: String,
}

/// API response for a successful user creation.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CreateUserResponse {
    /// The user's canonical identifier.
    pub user_id: i64,
    /// The account email.
    pub email: String,
    /// The display name.
    pub name: String,
    /// The role name.
    pub role: String,
}

/// API request to preview an uploaded CSV before import.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PreviewCsvRequest {
    /// The raw CSV content.
    pub csv_content: String,
    /// How many data rows to include in the preview.
    pub preview_rows: Option<usize>,
}

/// API response for CSV preview.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PreviewCsvResponse {
    /// The header row as uploaded.
    pub headers: Vec<String>,
    /// The first data rows, for operator inspection.
    pub rows: Vec<Vec<String>>,
    /// The inferred column mapping, one entry per header.
    pub inferred_mapping: Vec<LeadField>,
}

/// API request to import a CSV batch and distribute it to a team.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ImportLeadsRequest {
    /// The raw CSV content (same as previewed).
    pub csv_content: String,
    /// The confirmed column mapping, one entry per header.
    pub mapping: Vec<LeadField>,
    /// The team receiving the batch.
    pub team_id: i64,
    /// The distribution policy name (e.g. `round-robin`).
    pub method: String,
}

/// API response for a completed import and distribution.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ImportLeadsResponse {
    /// The policy that was applied.
    pub method: String,
    /// Leads persisted and assigned.
    pub assigned: usize,
    /// Leads whose insert failed.
    pub failed: usize,
    /// Rows dropped before planning.
    pub skipped: usize,
}

impl ImportLeadsResponse {
    /// Builds the response from a distribution report.
    #[must_use]
    pub fn from_report(report: &DistributionReport) -> Self {
        Self {
            method: report.method.to_string(),
            assigned: report.assigned,
            failed: report.failed,
            skipped: report.skipped,
        }
    }
}

/// API request to create a single lead manually.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CreateLeadRequest {
    /// The prospect's name.
    pub name: String,
    /// The prospect's email address.
    pub email: String,
    /// The prospect's phone number.
    pub phone: String,
    /// The team to assign the lead to, if any.
    pub team_id: Option<i64>,
    /// Acquisition source or channel.
    pub source: Option<String>,
    /// Country of interest.
    pub interested_country: Option<String>,
    /// Course or program of interest.
    pub course: Option<String>,
    /// An initial note.
    pub note: Option<String>,
}

/// API response for a successful lead creation.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CreateLeadResponse {
    /// The lead's canonical identifier.
    pub lead_id: i64,
    /// The telemarketer the lead was assigned to, if any.
    pub assigned_to: Option<i64>,
}

/// API request to move a lead through the pipeline.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct UpdateLeadStatusRequest {
    /// The new status name (e.g. `qualified`).
    pub status: String,
}

/// API request to append a note to a lead.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AddLeadNoteRequest {
    /// The note text.
    pub note: String,
}

/// API request to reassign a lead to another telemarketer.
#[derive(Debug, Copy, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ReassignLeadRequest {
    /// The telemarketer receiving the lead.
    pub assigned_to: i64,
}

/// Lead information for listing.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct LeadInfo {
    /// The lead's canonical identifier.
    pub lead_id: i64,
    /// The prospect's name.
    pub name: String,
    /// The prospect's email address.
    pub email: String,
    /// The prospect's phone number.
    pub phone: String,
    /// Where the lead sits in the pipeline.
    pub status: LeadStatus,
    /// The team this lead belongs to, if any.
    pub team_id: Option<i64>,
    /// The telemarketer this lead is assigned to, if any.
    pub assigned_to: Option<i64>,
    /// Acquisition source or channel.
    pub source: Option<String>,
    /// Country of interest.
    pub interested_country: Option<String>,
    /// Course or program of interest.
    pub course: Option<String>,
    /// Free-text notes, oldest first.
    pub notes: Vec<String>,
    /// Creation timestamp (ISO 8601).
    pub created_at: String,
    /// Last-update timestamp (ISO 8601).
    pub updated_at: String,
}

impl LeadInfo {
    /// Builds the DTO from a persisted lead.
    ///
    /// Leads without an identifier cannot be listed; the caller only
    /// passes persisted records.
    #[must_use]
    pub fn from_lead(lead: Lead) -> Option<Self> {
        let lead_id: i64 = lead.lead_id?;
        Some(Self {
            lead_id,
            name: lead.name,
            email: lead.email,
            phone: lead.phone,
            status: lead.status,
            team_id: lead.team_id,
            assigned_to: lead.assigned_to,
            source: lead.source,
            interested_country: lead.interested_country,
            course: lead.course,
            notes: lead.notes,
            created_at: lead.created_at,
            updated_at: lead.updated_at,
        })
    }
}

/// API response for listing leads.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ListLeadsResponse {
    /// The leads matching the query.
    pub leads: Vec<LeadInfo>,
}

/// API response for the per-status lead counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct LeadStatisticsResponse {
    /// Leads with status `new`.
    pub new: usize,
    /// Leads with status `in_progress`.
    pub in_progress: usize,
    /// Leads with status `follow_up_1`.
    pub follow_up_1: usize,
    /// Leads with status `follow_up_2`.
    pub follow_up_2: usize,
    /// Leads with status `follow_up_3`.
    pub follow_up_3: usize,
    /// Leads with status `qualified`.
    pub qualified: usize,
    /// Leads with status `not_interested`.
    pub not_interested: usize,
    /// Leads with status `completed`.
    pub completed: usize,
    /// Total lead count.
    pub total: usize,
}

/// API request to create a team.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CreateTeamRequest {
    /// The team's display name.
    pub name: String,
    /// The owning sales manager.
    pub manager_id: i64,
    /// Geographic region tag.
    pub region: String,
    /// Program tag.
    pub program: String,
    /// Telemarketers to enroll immediately.
    pub initial_members: Vec<i64>,
}

/// API response for a successful team creation.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CreateTeamResponse {
    /// The team's canonical identifier.
    pub team_id: i64,
    /// The team's display name.
    pub name: String,
}

/// API request to update a team's editable fields.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct UpdateTeamRequest {
    /// The team's display name.
    pub name: String,
    /// The owning sales manager.
    pub manager_id: i64,
    /// Geographic region tag.
    pub region: String,
    /// Program tag.
    pub program: String,
    /// The status name (`active` or `inactive`).
    pub status: String,
}

/// API request to add or remove a team member.
#[derive(Debug, Copy, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TeamMemberRequest {
    /// The telemarketer joining or leaving.
    pub user_id: i64,
}

/// Team information for listing.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TeamInfo {
    /// The team's canonical identifier.
    pub team_id: i64,
    /// The team's display name.
    pub name: String,
    /// The owning sales manager.
    pub manager_id: i64,
    /// The manager's name, denormalized for display.
    pub manager_name: String,
    /// Denormalized member count.
    pub member_count: i64,
    /// Geographic region tag.
    pub region: String,
    /// Program tag.
    pub program: String,
    /// The status name.
    pub status: String,
    /// Denormalized count of leads ever assigned to this team.
    pub total_leads: i64,
    /// Denormalized count of this team's qualified leads.
    pub converted_leads: i64,
}

impl TeamInfo {
    /// Builds the DTO from a persisted team.
    #[must_use]
    pub fn from_team(team: Team) -> Option<Self> {
        let team_id: i64 = team.team_id?;
        Some(Self {
            team_id,
            name: team.name,
            manager_id: team.manager_id,
            manager_name: team.manager_name,
            member_count: team.member_count,
            region: team.region,
            program: team.program,
            status: team.status.to_string(),
            total_leads: team.total_leads,
            converted_leads: team.converted_leads,
        })
    }
}

/// API response for listing teams.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ListTeamsResponse {
    /// The teams.
    pub teams: Vec<TeamInfo>,
}

/// User information for listing.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct UserInfo {
    /// The user's canonical identifier.
    pub user_id: i64,
    /// The account email.
    pub email: String,
    /// The display name.
    pub name: String,
    /// The role name.
    pub role: String,
    /// The team assignment, if any.
    pub team_id: Option<i64>,
    /// Denormalized count of leads ever assigned to this user.
    pub lead_count: i64,
    /// Denormalized count of open leads.
    pub leads_in_progress: i64,
    /// Denormalized count of qualified leads.
    pub leads_qualified: i64,
    /// Denormalized count of not-interested leads.
    pub leads_not_interested: i64,
    /// Daily call quota.
    pub daily_quota: i64,
}

impl UserInfo {
    /// Builds the DTO from a persisted user.
    #[must_use]
    pub fn from_user(user: User) -> Option<Self> {
        let user_id: i64 = user.user_id?;
        Some(Self {
            user_id,
            email: user.email,
            name: user.name,
            role: user.role.to_string(),
            team_id: user.team_id,
            lead_count: user.lead_count,
            leads_in_progress: user.leads_in_progress,
            leads_qualified: user.leads_qualified,
            leads_not_interested: user.leads_not_interested,
            daily_quota: user.daily_quota,
        })
    }
}

/// API response for listing users.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ListUsersResponse {
    /// The users.
    pub users: Vec<UserInfo>,
}

/// API response for a team performance roll-up.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TeamPerformanceResponse {
    /// The team being summarized.
    pub team: TeamInfo,
    /// Number of users currently on the team.
    pub member_count: usize,
    /// Number of leads belonging to the team.
    pub lead_count: usize,
    /// Number of the team's qualified leads.
    pub converted_leads: usize,
    /// Conversion percentage, one decimal.
    pub conversion_rate: f64,
    /// The member with the highest conversion rate, if any.
    pub top_performer: Option<UserInfo>,
}

impl TeamPerformanceResponse {
    /// Builds the response from a computed roll-up.
    #[must_use]
    pub fn from_performance(performance: TeamPerformance) -> Option<Self> {
        let team: TeamInfo = TeamInfo::from_team(performance.team)?;
        Some(Self {
            team,
            member_count: performance.summary.member_count,
            lead_count: performance.summary.lead_count,
            converted_leads: performance.summary.converted_leads,
            conversion_rate: performance.summary.conversion_rate,
            top_performer: performance.top_performer.and_then(UserInfo::from_user),
        })
    }
}

/// API response for a manager's overview across their teams.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ManagerOverviewResponse {
    /// Number of teams owned by the manager.
    pub team_count: usize,
    /// Per-team performance breakdown.
    pub teams: Vec<TeamPerformanceResponse>,
}

impl ManagerOverviewResponse {
    /// Builds the response from a computed overview.
    #[must_use]
    pub fn from_overview(overview: ManagerOverview) -> Self {
        Self {
            team_count: overview.summary.team_count,
            teams: overview
                .teams
                .into_iter()
                .filter_map(TeamPerformanceResponse::from_performance)
                .collect(),
        }
    }
}
