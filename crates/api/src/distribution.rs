// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The lead distribution engine.
//!
//! Orchestrates pure assignment planning from the core crate with the
//! per-lead persistence writes. The roster is snapshotted once at batch
//! start; per-lead write failures are caught and reported as aggregate
//! counts rather than aborting the batch.

use leadflow::{plan_batch, select_manual_assignee, sub_batches};
use leadflow_audit::{AuditAction, AuditEvent, Cause};
use leadflow_domain::{DistributionMethod, Lead, User};
use leadflow_persistence::Persistence;
use tracing::{info, warn};

use crate::auth::AuthenticatedUser;
use crate::csv_import::MaterializedBatch;
use crate::error::{ApiError, translate_core_error};

/// Aggregate outcome of a batch distribution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistributionReport {
    /// The policy that was applied.
    pub method: DistributionMethod,
    /// Leads persisted and assigned.
    pub assigned: usize,
    /// Leads whose insert failed.
    pub failed: usize,
    /// Rows dropped before planning (empty mandatory fields).
    pub skipped: usize,
}

/// Snapshots the distribution roster for a team.
///
/// The roster is the team's members in stable identifier order, read
/// once at batch start. Members joining or leaving mid-batch do not
/// affect a running distribution.
fn roster_snapshot(persistence: &mut Persistence, team_id: i64) -> Result<Vec<i64>, ApiError> {
    let members: Vec<User> = persistence.team_members(team_id)?;
    Ok(members.iter().filter_map(|m| m.user_id).collect())
}

/// Persists one assigned lead with best-effort counter maintenance.
///
/// The three writes are independent statements, not a transaction. An
/// insert failure is reported to the caller; a counter failure after a
/// successful insert leaves the lead persisted with drifted counters,
/// which the periodic aggregation views tolerate.
fn persist_assigned_lead(
    persistence: &mut Persistence,
    lead: &Lead,
    assignee: i64,
    team_id: i64,
) -> Result<i64, ApiError> {
    let mut lead: Lead = lead.clone();
    lead.assigned_to = Some(assignee);
    lead.team_id = Some(team_id);

    let lead_id: i64 = persistence.create_lead(&lead)?;

    if let Err(e) = persistence.record_lead_assignment(assignee, lead_id) {
        warn!(
            "Counter update failed for user {} after persisting lead {}: {}",
            assignee, lead_id, e
        );
    }
    if let Err(e) = persistence.adjust_total_leads(team_id, 1) {
        warn!(
            "Team counter update failed for team {} after persisting lead {}: {}",
            team_id, lead_id, e
        );
    }

    Ok(lead_id)
}

/// Distributes a materialized batch of leads across a team.
///
/// Planning happens over the whole input before any write, so an empty
/// roster or an unimplemented policy fails with zero writes. Writes are
/// then paced in sub-batches; the round-robin cursor is global across
/// them.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `team_id` - The team receiving the batch
/// * `method` - The distribution policy to apply
/// * `batch` - The materialized candidate leads
/// * `actor` - The authenticated user performing the distribution
/// * `cause` - The reason for this distribution
///
/// # Errors
///
/// Returns an error if the roster is empty, the policy has no batch
/// implementation, or the roster query fails. Per-lead write failures
/// do not error; they surface in the report's `failed` count.
pub fn distribute_batch(
    persistence: &mut Persistence,
    team_id: i64,
    method: DistributionMethod,
    batch: &MaterializedBatch,
    actor: &AuthenticatedUser,
    cause: Cause,
) -> Result<DistributionReport, ApiError> {
    let roster: Vec<i64> = roster_snapshot(persistence, team_id)?;
    let plan: Vec<i64> =
        plan_batch(method, batch.leads.len(), &roster).map_err(translate_core_error)?;

    let mut assigned: usize = 0;
    let mut failed: usize = 0;

    for range in sub_batches(batch.leads.len()) {
        for idx in range {
            let assignee: i64 = plan[idx];
            match persist_assigned_lead(persistence, &batch.leads[idx], assignee, team_id) {
                Ok(_) => assigned += 1,
                Err(e) => {
                    warn!("Failed to persist lead at row {}: {}", idx, e);
                    failed += 1;
                }
            }
        }
    }

    info!(
        "Distributed batch to team {}: {} assigned, {} failed, {} skipped",
        team_id, assigned, failed, batch.skipped
    );

    let details: String = serde_json::json!({
        "method": method.as_str(),
        "assigned": assigned,
        "failed": failed,
        "skipped": batch.skipped,
    })
    .to_string();
    let event: AuditEvent = AuditEvent::new(
        actor.to_audit_actor(),
        cause,
        AuditAction::LeadsDistributed,
        AuditEvent::team_subject(team_id),
        Some(details),
    );
    if let Err(e) = persistence.record_audit_event(&event) {
        warn!("Failed to record distribution audit event: {}", e);
    }

    Ok(DistributionReport {
        method,
        assigned,
        failed,
        skipped: batch.skipped,
    })
}

/// Assigns a single manually entered lead.
///
/// Manual entries always go to the first roster member. This is a
/// deliberately distinct strategy from round-robin, not a batch of one.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `team_id` - The team receiving the lead
/// * `lead` - The candidate lead
/// * `actor` - The authenticated user performing the assignment
/// * `cause` - The reason for this assignment
///
/// # Errors
///
/// Returns an error if the roster is empty or the lead insert fails.
pub fn assign_manual_lead(
    persistence: &mut Persistence,
    team_id: i64,
    lead: &Lead,
    actor: &AuthenticatedUser,
    cause: Cause,
) -> Result<i64, ApiError> {
    let roster: Vec<i64> = roster_snapshot(persistence, team_id)?;
    let assignee: i64 = select_manual_assignee(&roster).map_err(translate_core_error)?;

    let lead_id: i64 = persist_assigned_lead(persistence, lead, assignee, team_id)?;
    info!(
        "Manually assigned lead {} to user {} on team {}",
        lead_id, assignee, team_id
    );

    let event: AuditEvent = AuditEvent::new(
        actor.to_audit_actor(),
        cause,
        AuditAction::LeadAssigned,
        AuditEvent::lead_subject(lead_id),
        Some(serde_json::json!({ "assigned_to": assignee }).to_string()),
    );
    if let Err(e) = persistence.record_audit_event(&event) {
        warn!("Failed to record assignment audit event: {}", e);
    }

    Ok(lead_id)
}
