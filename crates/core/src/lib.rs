// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod aggregation;
mod assignment;
mod error;
mod rbac;

#[cfg(test)]
mod tests;

// Re-export public types and functions
pub use aggregation::{
    LeadStatistics, ManagerSummary, TeamSummary, lead_statistics, manager_summary,
    member_conversion_rate, team_summary, top_performer,
};
pub use assignment::{
    SUB_BATCH_SIZE, SUB_BATCH_THRESHOLD, plan_batch, plan_round_robin, select_manual_assignee,
    sub_batches,
};
pub use error::CoreError;
pub use rbac::{has_permission, has_role, permissions_for_role, user_permissions};
