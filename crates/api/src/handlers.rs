// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handler functions for state-changing and read-only operations.
//!
//! Every handler gates on authorization first, then translates its DTO
//! into engine calls and maps the result back. Handlers never touch
//! Diesel directly.

use std::str::FromStr;

use leadflow::{LeadStatistics, lead_statistics};
use leadflow_audit::{AuditAction, AuditEvent, Cause};
use leadflow_domain::{
    DistributionMethod, Lead, LeadStatus, Team, TeamStatus, User, UserRole, validate_user_fields,
};
use leadflow_persistence::Persistence;
use tracing::{info, warn};

use crate::auth::{AuthenticatedUser, AuthenticationService, AuthorizationService};
use crate::csv_import::{self, CsvPreview, MaterializedBatch};
use crate::distribution::{self, DistributionReport};
use crate::error::{ApiError, translate_domain_error};
use crate::leads;
use crate::password_policy::PasswordPolicy;
use crate::request_response::{
    AddLeadNoteRequest, CreateLeadRequest, CreateLeadResponse, CreateTeamRequest,
    CreateTeamResponse, CreateUserRequest, CreateUserResponse, ImportLeadsRequest,
    ImportLeadsResponse, LeadInfo, LeadStatisticsResponse, ListLeadsResponse, ListTeamsResponse,
    ListUsersResponse, LoginRequest, LoginResponse, ManagerOverviewResponse, PreviewCsvRequest,
    PreviewCsvResponse, ReassignLeadRequest, TeamInfo, TeamMemberRequest,
    TeamPerformanceResponse, UpdateLeadStatusRequest, UpdateTeamRequest, UserInfo,
};
use crate::teams::{self, ManagerOverview, TeamPerformance};

/// Default row count for CSV previews.
const DEFAULT_PREVIEW_ROWS: usize = 5;

/// Default limit for the recent leads listing.
const DEFAULT_RECENT_LEADS: i64 = 10;

/// Authenticates a user and opens a session.
///
/// # Errors
///
/// Returns `AuthenticationFailed` for unknown accounts and wrong
/// passwords alike.
pub fn login(
    persistence: &mut Persistence,
    request: &LoginRequest,
) -> Result<LoginResponse, ApiError> {
    let (session_token, authenticated, user) =
        AuthenticationService::login(persistence, &request.email, &request.password)?;

    Ok(LoginResponse {
        session_token,
        user_id: authenticated.user_id,
        email: user.email,
        name: user.name,
        role: user.role.to_string(),
    })
}

/// Closes a session.
///
/// # Errors
///
/// Returns an error if the session token is unknown.
pub fn logout(persistence: &mut Persistence, session_token: &str) -> Result<(), ApiError> {
    AuthenticationService::logout(persistence, session_token)?;
    Ok(())
}

/// Creates a user account.
///
/// The password is checked against policy and stored as a bcrypt hash.
///
/// # Errors
///
/// Returns an error if the actor lacks `manage:users`, validation or
/// the password policy fails, or the email is already taken.
pub fn create_user(
    persistence: &mut Persistence,
    request: &CreateUserRequest,
    actor: &AuthenticatedUser,
    cause: Cause,
) -> Result<CreateUserResponse, ApiError> {
    AuthorizationService::authorize_manage_users(actor)?;

    let role: UserRole = UserRole::from_str(&request.role).map_err(translate_domain_error)?;
    let user: User = User::new(
        request.email.clone(),
        request.name.clone(),
        role,
        request.team_id,
    );
    validate_user_fields(&user).map_err(translate_domain_error)?;
    user.validate_team_membership().map_err(translate_domain_error)?;

    let policy: PasswordPolicy = PasswordPolicy::default();
    policy.validate(
        &request.password,
        &request.password_confirmation,
        &request.email,
        &request.name,
    )?;

    let password_hash: String =
        bcrypt::hash(&request.password, bcrypt::DEFAULT_COST).map_err(|e| ApiError::Internal {
            message: format!("Password hashing failed: {e}"),
        })?;

    let user_id: i64 = persistence.create_user(&user, &password_hash)?;
    info!("Created user {} ({}, {})", user_id, user.email, role);

    let event: AuditEvent = AuditEvent::new(
        actor.to_audit_actor(),
        cause,
        AuditAction::UserCreated,
        AuditEvent::user_subject(user_id),
        Some(format!("{{\"role\":\"{role}\"}}")),
    );
    if let Err(e) = persistence.record_audit_event(&event) {
        warn!("Failed to record audit event for user {}: {}", user_id, e);
    }

    Ok(CreateUserResponse {
        user_id,
        email: user.email,
        name: user.name,
        role: role.to_string(),
    })
}

/// Lists every user account.
///
/// # Errors
///
/// Returns an error if the actor lacks `manage:users`.
pub fn list_users(
    persistence: &mut Persistence,
    actor: &AuthenticatedUser,
) -> Result<ListUsersResponse, ApiError> {
    AuthorizationService::authorize_manage_users(actor)?;

    let users: Vec<User> = persistence.list_users()?;
    Ok(ListUsersResponse {
        users: users.into_iter().filter_map(UserInfo::from_user).collect(),
    })
}

/// Parses and previews an uploaded CSV with an inferred column mapping.
///
/// # Errors
///
/// Returns an error if the actor lacks `upload:leads` or the CSV cannot
/// be parsed.
pub fn preview_csv(
    request: &PreviewCsvRequest,
    actor: &AuthenticatedUser,
) -> Result<PreviewCsvResponse, ApiError> {
    AuthorizationService::authorize_upload_leads(actor)?;

    let preview: CsvPreview = csv_import::parse_preview(
        &request.csv_content,
        request.preview_rows.unwrap_or(DEFAULT_PREVIEW_ROWS),
    )?;

    Ok(PreviewCsvResponse {
        headers: preview.headers,
        rows: preview.rows,
        inferred_mapping: preview.inferred_mapping,
    })
}

/// Imports a CSV batch and distributes it across a team.
///
/// The mapping must cover every mandatory lead field; rows that fail to
/// parse or lack a mandatory value are dropped and counted.
///
/// # Errors
///
/// Returns an error if the actor lacks `upload:leads`, the mapping is
/// incomplete, the roster is empty, or the policy has no batch
/// implementation.
pub fn import_leads(
    persistence: &mut Persistence,
    request: &ImportLeadsRequest,
    actor: &AuthenticatedUser,
    cause: Cause,
) -> Result<ImportLeadsResponse, ApiError> {
    AuthorizationService::authorize_upload_leads(actor)?;

    let method: DistributionMethod =
        DistributionMethod::from_str(&request.method).map_err(translate_domain_error)?;

    let batch: MaterializedBatch = csv_import::materialize(
        &request.csv_content,
        &request.mapping,
        Some(request.team_id),
        actor.user_id,
    )?;

    let report: DistributionReport = distribution::distribute_batch(
        persistence,
        request.team_id,
        method,
        &batch,
        actor,
        cause,
    )?;

    Ok(ImportLeadsResponse::from_report(&report))
}

/// Creates a single lead and assigns it manually when a team is given.
///
/// # Errors
///
/// Returns an error if the actor lacks `assign:leads`, validation
/// fails, or the target team has no members.
pub fn create_lead(
    persistence: &mut Persistence,
    request: &CreateLeadRequest,
    actor: &AuthenticatedUser,
    cause: Cause,
) -> Result<CreateLeadResponse, ApiError> {
    AuthorizationService::authorize_assign_leads(actor)?;

    let mut lead: Lead = Lead::new(
        request.name.clone(),
        request.email.clone(),
        request.phone.clone(),
        request.team_id,
        actor.user_id,
    );
    lead.source = request.source.clone();
    lead.interested_country = request.interested_country.clone();
    lead.course = request.course.clone();
    if let Some(note) = &request.note {
        if !note.trim().is_empty() {
            lead.notes.push(note.clone());
        }
    }

    if let Some(team_id) = request.team_id {
        let lead_id: i64 =
            distribution::assign_manual_lead(persistence, team_id, &lead, actor, cause)?;
        let persisted: Lead = persistence.get_lead(lead_id)?;
        return Ok(CreateLeadResponse {
            lead_id,
            assigned_to: persisted.assigned_to,
        });
    }

    let lead_id: i64 = leads::create_lead(persistence, &lead, actor, cause)?;
    Ok(CreateLeadResponse {
        lead_id,
        assigned_to: None,
    })
}

/// Moves a lead to a new pipeline status.
///
/// # Errors
///
/// Returns an error if the actor lacks `update:lead_status`, the status
/// name is unknown, or the lead does not exist.
pub fn update_lead_status(
    persistence: &mut Persistence,
    lead_id: i64,
    request: &UpdateLeadStatusRequest,
    actor: &AuthenticatedUser,
    cause: Cause,
) -> Result<(), ApiError> {
    AuthorizationService::authorize_update_lead_status(actor)?;

    let status: LeadStatus = LeadStatus::from_str(&request.status).map_err(translate_domain_error)?;
    leads::update_lead_status(persistence, lead_id, status, actor, cause)
}

/// Appends a note to a lead.
///
/// # Errors
///
/// Returns an error if the actor lacks `update:lead_status` or the lead
/// does not exist.
pub fn add_lead_note(
    persistence: &mut Persistence,
    lead_id: i64,
    request: &AddLeadNoteRequest,
    actor: &AuthenticatedUser,
    cause: Cause,
) -> Result<(), ApiError> {
    AuthorizationService::authorize_update_lead_status(actor)?;
    leads::add_note(persistence, lead_id, &request.note, actor, cause)
}

/// Reassigns a lead to another telemarketer.
///
/// # Errors
///
/// Returns an error if the actor lacks `assign:leads` or the lead or
/// assignee does not exist.
pub fn reassign_lead(
    persistence: &mut Persistence,
    lead_id: i64,
    request: &ReassignLeadRequest,
    actor: &AuthenticatedUser,
    cause: Cause,
) -> Result<(), ApiError> {
    AuthorizationService::authorize_assign_leads(actor)?;
    leads::reassign_lead(persistence, lead_id, request.assigned_to, actor, cause)
}

/// Fetches one lead.
///
/// # Errors
///
/// Returns `ResourceNotFound` if the lead does not exist.
pub fn get_lead(persistence: &mut Persistence, lead_id: i64) -> Result<LeadInfo, ApiError> {
    let lead: Lead = persistence.get_lead(lead_id)?;
    LeadInfo::from_lead(lead).ok_or_else(|| ApiError::Internal {
        message: format!("Persisted lead {lead_id} has no identifier"),
    })
}

/// Lists the leads assigned to a telemarketer.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_assigned_leads(
    persistence: &mut Persistence,
    user_id: i64,
) -> Result<ListLeadsResponse, ApiError> {
    let leads: Vec<Lead> = persistence.leads_by_assignee(user_id)?;
    Ok(ListLeadsResponse {
        leads: leads.into_iter().filter_map(LeadInfo::from_lead).collect(),
    })
}

/// Lists the most recently created leads, newest first.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn recent_leads(
    persistence: &mut Persistence,
    limit: Option<i64>,
) -> Result<ListLeadsResponse, ApiError> {
    let leads: Vec<Lead> = persistence.recent_leads(limit.unwrap_or(DEFAULT_RECENT_LEADS))?;
    Ok(ListLeadsResponse {
        leads: leads.into_iter().filter_map(LeadInfo::from_lead).collect(),
    })
}

/// Computes per-status counts across every lead.
///
/// # Errors
///
/// Returns an error if the actor lacks `view:team_performance`.
pub fn lead_statistics_report(
    persistence: &mut Persistence,
    actor: &AuthenticatedUser,
) -> Result<LeadStatisticsResponse, ApiError> {
    AuthorizationService::authorize_view_team_performance(actor)?;

    let all_leads: Vec<Lead> = persistence.list_leads()?;
    let stats: LeadStatistics = lead_statistics(&all_leads);
    Ok(LeadStatisticsResponse {
        new: stats.new,
        in_progress: stats.in_progress,
        follow_up_1: stats.follow_up_1,
        follow_up_2: stats.follow_up_2,
        follow_up_3: stats.follow_up_3,
        qualified: stats.qualified,
        not_interested: stats.not_interested,
        completed: stats.completed,
        total: stats.total,
    })
}

/// Creates a team with optional initial members.
///
/// # Errors
///
/// Returns an error if the actor lacks `manage:teams` or the manager
/// is not a sales manager.
pub fn create_team(
    persistence: &mut Persistence,
    request: &CreateTeamRequest,
    actor: &AuthenticatedUser,
    cause: Cause,
) -> Result<CreateTeamResponse, ApiError> {
    AuthorizationService::authorize_manage_teams(actor)?;

    let manager: User = persistence.get_user(request.manager_id)?;
    let team: Team = Team::new(
        request.name.clone(),
        request.manager_id,
        manager.name,
        request.region.clone(),
        request.program.clone(),
    );

    let team_id: i64 =
        teams::create_team(persistence, &team, &request.initial_members, actor, cause)?;

    Ok(CreateTeamResponse {
        team_id,
        name: team.name,
    })
}

/// Updates a team's editable fields.
///
/// # Errors
///
/// Returns an error if the actor lacks `manage:teams` or the team does
/// not exist.
pub fn update_team(
    persistence: &mut Persistence,
    team_id: i64,
    request: &UpdateTeamRequest,
    actor: &AuthenticatedUser,
    cause: Cause,
) -> Result<(), ApiError> {
    AuthorizationService::authorize_manage_teams(actor)?;

    let status: TeamStatus = TeamStatus::from_str(&request.status).map_err(translate_domain_error)?;
    let manager: User = persistence.get_user(request.manager_id)?;

    let existing: Team = persistence.get_team(team_id)?;
    let mut team: Team = existing;
    team.name = request.name.clone();
    team.manager_id = request.manager_id;
    team.manager_name = manager.name;
    team.region = request.region.clone();
    team.program = request.program.clone();
    team.status = status;

    teams::update_team(persistence, &team, actor, cause)
}

/// Deletes a team, releasing its members and detaching its leads.
///
/// # Errors
///
/// Returns an error if the actor lacks `manage:teams` or the team does
/// not exist.
pub fn delete_team(
    persistence: &mut Persistence,
    team_id: i64,
    actor: &AuthenticatedUser,
    cause: Cause,
) -> Result<(), ApiError> {
    AuthorizationService::authorize_manage_teams(actor)?;
    teams::delete_team(persistence, team_id, actor, cause)
}

/// Lists every team.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_teams(persistence: &mut Persistence) -> Result<ListTeamsResponse, ApiError> {
    let all_teams: Vec<Team> = persistence.list_teams()?;
    Ok(ListTeamsResponse {
        teams: all_teams.into_iter().filter_map(TeamInfo::from_team).collect(),
    })
}

/// Adds a telemarketer to a team.
///
/// # Errors
///
/// Returns an error if the actor lacks `manage:team_members` or the
/// user is not a telemarketer.
pub fn add_team_member(
    persistence: &mut Persistence,
    team_id: i64,
    request: &TeamMemberRequest,
    actor: &AuthenticatedUser,
    cause: Cause,
) -> Result<(), ApiError> {
    AuthorizationService::authorize_manage_team_members(actor)?;
    teams::add_member(persistence, team_id, request.user_id, actor, cause)
}

/// Removes a telemarketer from a team.
///
/// # Errors
///
/// Returns an error if the actor lacks `manage:team_members` or the
/// user is not on the team.
pub fn remove_team_member(
    persistence: &mut Persistence,
    team_id: i64,
    request: &TeamMemberRequest,
    actor: &AuthenticatedUser,
    cause: Cause,
) -> Result<(), ApiError> {
    AuthorizationService::authorize_manage_team_members(actor)?;
    teams::remove_member(persistence, team_id, request.user_id, actor, cause)
}

/// Computes the performance roll-up for one team.
///
/// # Errors
///
/// Returns an error if the actor lacks `view:team_performance` or the
/// team does not exist.
pub fn team_performance(
    persistence: &mut Persistence,
    team_id: i64,
    actor: &AuthenticatedUser,
) -> Result<TeamPerformanceResponse, ApiError> {
    AuthorizationService::authorize_view_team_performance(actor)?;

    let performance: TeamPerformance = teams::team_performance(persistence, team_id)?;
    TeamPerformanceResponse::from_performance(performance).ok_or_else(|| ApiError::Internal {
        message: format!("Persisted team {team_id} has no identifier"),
    })
}

/// Computes the roll-up across every team a manager owns.
///
/// # Errors
///
/// Returns an error if the actor lacks `view:team_performance` or the
/// manager does not exist.
pub fn manager_overview(
    persistence: &mut Persistence,
    manager_id: i64,
    actor: &AuthenticatedUser,
) -> Result<ManagerOverviewResponse, ApiError> {
    AuthorizationService::authorize_view_team_performance(actor)?;

    let overview: ManagerOverview = teams::manager_overview(persistence, manager_id)?;
    Ok(ManagerOverviewResponse::from_overview(overview))
}
