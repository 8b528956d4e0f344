// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API boundary layer for the LeadFlow CRM.
//!
//! Sits between the HTTP server and the pure core: authenticates
//! sessions, enforces role permissions, translates DTOs into engine
//! calls, and records the audit trail for every mutation.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

pub mod auth;
pub mod csv_import;
pub mod distribution;
pub mod error;
pub mod handlers;
pub mod leads;
pub mod password_policy;
pub mod request_response;
pub mod teams;

#[cfg(test)]
mod tests;

pub use auth::{AuthenticatedUser, AuthenticationService, AuthorizationService};
pub use error::{ApiError, AuthError, translate_core_error, translate_domain_error};
pub use password_policy::{PasswordPolicy, PasswordPolicyError};
