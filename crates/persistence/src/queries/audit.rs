// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Audit trail queries.

use diesel::prelude::*;

use crate::data_models::{AuditEventData, AuditEventRow};
use crate::diesel_schema::audit_events;
use crate::error::PersistenceError;

/// Lists the most recently recorded audit events, newest first.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn recent_events(
    conn: &mut SqliteConnection,
    limit: i64,
) -> Result<Vec<AuditEventData>, PersistenceError> {
    let rows: Vec<AuditEventRow> = audit_events::table
        .order(audit_events::event_id.desc())
        .limit(limit)
        .select(AuditEventRow::as_select())
        .load(conn)?;
    Ok(rows.into_iter().map(AuditEventRow::into_event).collect())
}

/// Lists the audit events recorded against a subject, oldest first.
///
/// Subjects are strings of the form `lead:42`, `team:7`, or `user:3`.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn events_for_subject(
    conn: &mut SqliteConnection,
    subject: &str,
) -> Result<Vec<AuditEventData>, PersistenceError> {
    let rows: Vec<AuditEventRow> = audit_events::table
        .filter(audit_events::subject.eq(subject))
        .order(audit_events::event_id.asc())
        .select(AuditEventRow::as_select())
        .load(conn)?;
    Ok(rows.into_iter().map(AuditEventRow::into_event).collect())
}
