// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Team management and roll-up reporting.
//!
//! Teams group telemarketers under one sales manager. Membership moves
//! keep the denormalized `member_count` in step; roll-up summaries are
//! recomputed from the actual member and lead collections instead.

use leadflow::{ManagerSummary, TeamSummary, manager_summary, team_summary, top_performer};
use leadflow_audit::{AuditAction, AuditEvent, Cause};
use leadflow_domain::{Lead, Team, User, UserRole, validate_team_fields};
use leadflow_persistence::Persistence;
use tracing::{info, warn};

use crate::auth::AuthenticatedUser;
use crate::error::{ApiError, translate_domain_error};

/// A team roll-up with its top performer, for the manager dashboard.
#[derive(Debug, Clone, PartialEq)]
pub struct TeamPerformance {
    /// The team being summarized.
    pub team: Team,
    /// Figures recomputed from the team's members and leads.
    pub summary: TeamSummary,
    /// The member with the highest conversion rate, if any.
    pub top_performer: Option<User>,
}

/// A manager roll-up with the per-team performance breakdown.
#[derive(Debug, Clone, PartialEq)]
pub struct ManagerOverview {
    /// Figures for the manager across their teams.
    pub summary: ManagerSummary,
    /// Per-team breakdown for every team the manager owns.
    pub teams: Vec<TeamPerformance>,
}

/// Creates a team and enrolls the initial members.
///
/// The manager must hold the sales manager role. Initial members that
/// are not telemarketers are skipped with a warning rather than failing
/// the whole creation.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `team` - The candidate team
/// * `initial_members` - Telemarketers to enroll immediately
/// * `actor` - The authenticated user creating the team
/// * `cause` - The reason for creating the team
///
/// # Errors
///
/// Returns an error if validation fails, the manager is missing or not
/// a sales manager, or the insert fails.
pub fn create_team(
    persistence: &mut Persistence,
    team: &Team,
    initial_members: &[i64],
    actor: &AuthenticatedUser,
    cause: Cause,
) -> Result<i64, ApiError> {
    validate_team_fields(team).map_err(translate_domain_error)?;

    let manager: User = persistence.get_user(team.manager_id)?;
    if manager.role != UserRole::SalesManager {
        return Err(ApiError::DomainRuleViolation {
            rule: String::from("team_manager_role"),
            message: format!(
                "User {} has role '{}' and cannot manage a team",
                team.manager_id, manager.role
            ),
        });
    }

    let team_id: i64 = persistence.create_team(team)?;
    info!("Created team {} ({})", team_id, team.name);

    for member_id in initial_members {
        if let Err(e) = enroll_member(persistence, team_id, *member_id) {
            warn!(
                "Skipping initial member {} for team {}: {}",
                member_id, team_id, e
            );
        }
    }

    record_team_event(persistence, actor, cause, AuditAction::TeamCreated, team_id, None);
    Ok(team_id)
}

/// Updates a team's editable fields.
///
/// Counters and membership are not editable through this path.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `team` - The team with updated fields; `team_id` must be set
/// * `actor` - The authenticated user performing the update
/// * `cause` - The reason for the update
///
/// # Errors
///
/// Returns an error if validation fails or the team does not exist.
pub fn update_team(
    persistence: &mut Persistence,
    team: &Team,
    actor: &AuthenticatedUser,
    cause: Cause,
) -> Result<(), ApiError> {
    validate_team_fields(team).map_err(translate_domain_error)?;
    let team_id: i64 = team.team_id.ok_or_else(|| ApiError::InvalidInput {
        field: String::from("team_id"),
        message: String::from("Team identifier is required for updates"),
    })?;

    persistence.update_team(
        team_id,
        &team.name,
        team.manager_id,
        &team.manager_name,
        &team.region,
        &team.program,
        team.status,
    )?;
    info!("Updated team {}", team_id);

    record_team_event(persistence, actor, cause, AuditAction::TeamUpdated, team_id, None);
    Ok(())
}

/// Deletes a team.
///
/// Members are released (their `team_id` cleared) and the team's leads
/// are detached from it before the row is removed, so no dangling
/// references remain. The leads keep their assignees.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `team_id` - The team to delete
/// * `actor` - The authenticated user performing the deletion
/// * `cause` - The reason for the deletion
///
/// # Errors
///
/// Returns `ResourceNotFound` if the team does not exist.
pub fn delete_team(
    persistence: &mut Persistence,
    team_id: i64,
    actor: &AuthenticatedUser,
    cause: Cause,
) -> Result<(), ApiError> {
    // Fail before any writes if the team is missing.
    let _team: Team = persistence.get_team(team_id)?;

    let members: Vec<User> = persistence.team_members(team_id)?;
    for member in &members {
        if let Some(member_id) = member.user_id {
            persistence.set_user_team(member_id, None)?;
        }
    }
    let detached: usize = persistence.clear_team_from_leads(team_id)?;

    persistence.delete_team(team_id)?;
    info!(
        "Deleted team {}: released {} members, detached {} leads",
        team_id,
        members.len(),
        detached
    );

    let details: String = serde_json::json!({
        "released_members": members.len(),
        "detached_leads": detached,
    })
    .to_string();
    record_team_event(
        persistence,
        actor,
        cause,
        AuditAction::TeamDeleted,
        team_id,
        Some(details),
    );
    Ok(())
}

/// Adds a telemarketer to a team.
///
/// A telemarketer belongs to at most one team; joining a new team
/// leaves the old one, with both member counts adjusted.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `team_id` - The team to join
/// * `user_id` - The telemarketer joining
/// * `actor` - The authenticated user performing the change
/// * `cause` - The reason for the change
///
/// # Errors
///
/// Returns an error if the team or user does not exist, or the user is
/// not a telemarketer.
pub fn add_member(
    persistence: &mut Persistence,
    team_id: i64,
    user_id: i64,
    actor: &AuthenticatedUser,
    cause: Cause,
) -> Result<(), ApiError> {
    let _team: Team = persistence.get_team(team_id)?;
    enroll_member(persistence, team_id, user_id)?;
    info!("Added user {} to team {}", user_id, team_id);

    record_team_event(
        persistence,
        actor,
        cause,
        AuditAction::TeamMemberAdded,
        team_id,
        Some(serde_json::json!({ "user_id": user_id }).to_string()),
    );
    Ok(())
}

/// Removes a telemarketer from a team.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `team_id` - The team to leave
/// * `user_id` - The telemarketer leaving
/// * `actor` - The authenticated user performing the change
/// * `cause` - The reason for the change
///
/// # Errors
///
/// Returns an error if the user does not exist or is not on the team.
pub fn remove_member(
    persistence: &mut Persistence,
    team_id: i64,
    user_id: i64,
    actor: &AuthenticatedUser,
    cause: Cause,
) -> Result<(), ApiError> {
    let user: User = persistence.get_user(user_id)?;
    if user.team_id != Some(team_id) {
        return Err(ApiError::DomainRuleViolation {
            rule: String::from("team_membership"),
            message: format!("User {user_id} is not a member of team {team_id}"),
        });
    }

    persistence.set_user_team(user_id, None)?;
    if let Err(e) = persistence.adjust_member_count(team_id, -1) {
        warn!(
            "Member count update failed for team {} after removing user {}: {}",
            team_id, user_id, e
        );
    }
    info!("Removed user {} from team {}", user_id, team_id);

    record_team_event(
        persistence,
        actor,
        cause,
        AuditAction::TeamMemberRemoved,
        team_id,
        Some(serde_json::json!({ "user_id": user_id }).to_string()),
    );
    Ok(())
}

/// Computes the performance roll-up for one team.
///
/// Figures are recomputed from the team's current members and leads,
/// not the denormalized counters, so drifted counters do not show up
/// here.
///
/// # Errors
///
/// Returns `ResourceNotFound` if the team does not exist.
pub fn team_performance(
    persistence: &mut Persistence,
    team_id: i64,
) -> Result<TeamPerformance, ApiError> {
    let team: Team = persistence.get_team(team_id)?;
    let members: Vec<User> = persistence.team_members(team_id)?;
    let leads: Vec<Lead> = persistence.leads_by_team(team_id)?;

    let summary: TeamSummary = team_summary(&team, &members, &leads);
    let top: Option<User> = top_performer(&members).cloned();

    Ok(TeamPerformance {
        team,
        summary,
        top_performer: top,
    })
}

/// Computes the roll-up across every team a manager owns.
///
/// # Errors
///
/// Returns `ResourceNotFound` if the manager does not exist.
pub fn manager_overview(
    persistence: &mut Persistence,
    manager_id: i64,
) -> Result<ManagerOverview, ApiError> {
    let manager: User = persistence.get_user(manager_id)?;
    let teams: Vec<Team> = persistence.teams_by_manager(manager_id)?;

    let summary: ManagerSummary = manager_summary(&manager, &teams);
    let mut breakdown: Vec<TeamPerformance> = Vec::with_capacity(teams.len());
    for team in &teams {
        if let Some(team_id) = team.team_id {
            breakdown.push(team_performance(persistence, team_id)?);
        }
    }

    Ok(ManagerOverview {
        summary,
        teams: breakdown,
    })
}

/// Moves a telemarketer onto a team, leaving any previous team.
fn enroll_member(
    persistence: &mut Persistence,
    team_id: i64,
    user_id: i64,
) -> Result<(), ApiError> {
    let user: User = persistence.get_user(user_id)?;
    if user.role != UserRole::Telemarketer {
        return Err(ApiError::DomainRuleViolation {
            rule: String::from("team_membership"),
            message: format!(
                "User {} has role '{}' and cannot belong to a team",
                user_id, user.role
            ),
        });
    }
    if user.team_id == Some(team_id) {
        return Ok(());
    }

    if let Some(previous_team) = user.team_id {
        if let Err(e) = persistence.adjust_member_count(previous_team, -1) {
            warn!(
                "Member count update failed for team {} after moving user {}: {}",
                previous_team, user_id, e
            );
        }
    }

    persistence.set_user_team(user_id, Some(team_id))?;
    if let Err(e) = persistence.adjust_member_count(team_id, 1) {
        warn!(
            "Member count update failed for team {} after adding user {}: {}",
            team_id, user_id, e
        );
    }
    Ok(())
}

/// Records a team-scoped audit event, logging on failure.
fn record_team_event(
    persistence: &mut Persistence,
    actor: &AuthenticatedUser,
    cause: Cause,
    action: AuditAction,
    team_id: i64,
    details: Option<String>,
) {
    let event: AuditEvent = AuditEvent::new(
        actor.to_audit_actor(),
        cause,
        action,
        AuditEvent::team_subject(team_id),
        details,
    );
    if let Err(e) = persistence.record_audit_event(&event) {
        warn!("Failed to record audit event for team {}: {}", team_id, e);
    }
}
