// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Audit trail write operations.

use diesel::prelude::*;
use leadflow_audit::AuditEvent;
use tracing::debug;

use crate::backend::sqlite::get_last_insert_rowid;
use crate::diesel_schema::audit_events;
use crate::error::PersistenceError;

/// Records an audit event.
///
/// Events are append-only; nothing updates or deletes them.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn record_event(
    conn: &mut SqliteConnection,
    event: &AuditEvent,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(audit_events::table)
        .values((
            audit_events::actor_user_id.eq(event.actor.user_id),
            audit_events::actor_role.eq(event.actor.role.as_str()),
            audit_events::cause_id.eq(&event.cause.id),
            audit_events::cause_description.eq(&event.cause.description),
            audit_events::action.eq(event.action.as_str()),
            audit_events::subject.eq(&event.subject),
            audit_events::details_json.eq(&event.details),
        ))
        .execute(conn)?;

    let event_id: i64 = get_last_insert_rowid(conn)?;
    debug!("Recorded audit event {} ({})", event_id, event.action);
    Ok(event_id)
}
