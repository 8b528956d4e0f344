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

mod distribution;
mod error;
mod lead;
mod permission;
mod roles;
mod team;
mod user;
mod validation;

#[cfg(test)]
mod tests;

pub use distribution::DistributionMethod;
pub use error::DomainError;
pub use lead::{Lead, LeadStatus};
pub use permission::Permission;
pub use roles::UserRole;
pub use team::{Team, TeamStatus};
pub use user::User;
pub use validation::{validate_lead_fields, validate_team_fields, validate_user_fields};
