// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Lead lifecycle operations.
//!
//! Creation, status transitions, notes, and reassignment. Counter
//! maintenance is best effort: the lead write is authoritative and a
//! failed counter update is logged, not rolled back.

use leadflow_audit::{AuditAction, AuditEvent, Cause};
use leadflow_domain::{Lead, LeadStatus, User, validate_lead_fields};
use leadflow_persistence::Persistence;
use tracing::{info, warn};

use crate::auth::AuthenticatedUser;
use crate::error::{ApiError, translate_domain_error};

/// Creates an unassigned lead.
///
/// The lead is validated, persisted with status `new`, and audited.
/// Assignment happens separately through the distribution engine.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `lead` - The candidate lead
/// * `actor` - The authenticated user creating the lead
/// * `cause` - The reason for creating the lead
///
/// # Errors
///
/// Returns an error if validation or the insert fails.
pub fn create_lead(
    persistence: &mut Persistence,
    lead: &Lead,
    actor: &AuthenticatedUser,
    cause: Cause,
) -> Result<i64, ApiError> {
    validate_lead_fields(lead).map_err(translate_domain_error)?;

    let lead_id: i64 = persistence.create_lead(lead)?;
    info!("Created lead {} ({})", lead_id, lead.name);

    record_lead_event(persistence, actor, cause, AuditAction::LeadCreated, lead_id, None);
    Ok(lead_id)
}

/// Moves a lead to a new pipeline status.
///
/// Any status may follow any other. The assignee's open/converted/lost
/// counters and the team's converted counter are adjusted from the
/// observed transition.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `lead_id` - The lead to update
/// * `new_status` - The status to move the lead to
/// * `actor` - The authenticated user performing the update
/// * `cause` - The reason for the update
///
/// # Errors
///
/// Returns `ResourceNotFound` if the lead does not exist.
pub fn update_lead_status(
    persistence: &mut Persistence,
    lead_id: i64,
    new_status: LeadStatus,
    actor: &AuthenticatedUser,
    cause: Cause,
) -> Result<(), ApiError> {
    let lead: Lead = persistence.get_lead(lead_id)?;
    let old_status: LeadStatus = lead.status;

    persistence.update_lead_status(lead_id, new_status)?;
    info!(
        "Lead {} status changed: {} -> {}",
        lead_id, old_status, new_status
    );

    if let Some(assignee) = lead.assigned_to {
        if let Err(e) = persistence.apply_status_counters(assignee, old_status, new_status) {
            warn!(
                "Counter update failed for user {} on lead {} status change: {}",
                assignee, lead_id, e
            );
        }
    }

    if let Some(team_id) = lead.team_id {
        let delta: i64 = i64::from(new_status == LeadStatus::Qualified)
            - i64::from(old_status == LeadStatus::Qualified);
        if delta != 0 {
            if let Err(e) = persistence.adjust_converted_leads(team_id, delta) {
                warn!(
                    "Team counter update failed for team {} on lead {} status change: {}",
                    team_id, lead_id, e
                );
            }
        }
    }

    let details: String = serde_json::json!({
        "old_status": old_status.as_str(),
        "new_status": new_status.as_str(),
    })
    .to_string();
    record_lead_event(
        persistence,
        actor,
        cause,
        AuditAction::LeadStatusChanged,
        lead_id,
        Some(details),
    );
    Ok(())
}

/// Appends a free-text note to a lead.
///
/// Notes are append-only; existing notes are never edited or removed.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `lead_id` - The lead to annotate
/// * `note` - The note text
/// * `actor` - The authenticated user adding the note
/// * `cause` - The reason for the note
///
/// # Errors
///
/// Returns `ResourceNotFound` if the lead does not exist, or
/// `InvalidInput` if the note is empty.
pub fn add_note(
    persistence: &mut Persistence,
    lead_id: i64,
    note: &str,
    actor: &AuthenticatedUser,
    cause: Cause,
) -> Result<(), ApiError> {
    if note.trim().is_empty() {
        return Err(ApiError::InvalidInput {
            field: String::from("note"),
            message: String::from("Note must not be empty"),
        });
    }

    persistence.append_lead_note(lead_id, note)?;
    info!("Added note to lead {}", lead_id);

    record_lead_event(persistence, actor, cause, AuditAction::LeadNoteAdded, lead_id, None);
    Ok(())
}

/// Reassigns a lead to another telemarketer.
///
/// The previous assignee's counters are decremented and the new
/// assignee's incremented, both best effort. The lead keeps its team
/// unless the new assignee sits on a different one, in which case the
/// lead follows its assignee.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `lead_id` - The lead to reassign
/// * `new_assignee` - The telemarketer receiving the lead
/// * `actor` - The authenticated user performing the reassignment
/// * `cause` - The reason for the reassignment
///
/// # Errors
///
/// Returns `ResourceNotFound` if the lead or the new assignee does not
/// exist.
pub fn reassign_lead(
    persistence: &mut Persistence,
    lead_id: i64,
    new_assignee: i64,
    actor: &AuthenticatedUser,
    cause: Cause,
) -> Result<(), ApiError> {
    let lead: Lead = persistence.get_lead(lead_id)?;
    let assignee: User = persistence.get_user(new_assignee)?;
    let target_team: Option<i64> = assignee.team_id.or(lead.team_id);

    if let Some(previous) = lead.assigned_to {
        if let Err(e) = persistence.remove_lead_assignment(previous, lead_id, lead.status.is_open())
        {
            warn!(
                "Counter update failed for previous assignee {} of lead {}: {}",
                previous, lead_id, e
            );
        }
    }

    persistence.set_lead_assignee(lead_id, Some(new_assignee), target_team)?;
    if let Err(e) = persistence.record_lead_assignment(new_assignee, lead_id) {
        warn!(
            "Counter update failed for new assignee {} of lead {}: {}",
            new_assignee, lead_id, e
        );
    }
    info!(
        "Reassigned lead {} from {:?} to {}",
        lead_id, lead.assigned_to, new_assignee
    );

    let details: String = serde_json::json!({
        "previous": lead.assigned_to,
        "new": new_assignee,
    })
    .to_string();
    record_lead_event(
        persistence,
        actor,
        cause,
        AuditAction::LeadReassigned,
        lead_id,
        Some(details),
    );
    Ok(())
}

/// Records a lead-scoped audit event, logging on failure.
fn record_lead_event(
    persistence: &mut Persistence,
    actor: &AuthenticatedUser,
    cause: Cause,
    action: AuditAction,
    lead_id: i64,
    details: Option<String>,
) {
    let event: AuditEvent = AuditEvent::new(
        actor.to_audit_actor(),
        cause,
        action,
        AuditEvent::lead_subject(lead_id),
        details,
    );
    if let Err(e) = persistence.record_audit_event(&event) {
        warn!("Failed to record audit event for lead {}: {}", lead_id, e);
    }
}
