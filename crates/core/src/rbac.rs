// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use leadflow_domain::{Permission, User, UserRole};

/// The permissions granted to administrators.
const ADMIN_PERMISSIONS: &[Permission] = &[
    Permission::ManageUsers,
    Permission::ViewAnalytics,
    Permission::ManageTeams,
    Permission::UploadLeads,
    Permission::ManageTeamMembers,
    Permission::AssignLeads,
    Permission::ViewTeamPerformance,
    Permission::ManageStudentApplications,
    Permission::UpdateApplicationStatus,
    Permission::ReviewDocuments,
];

/// The permissions granted to sales managers.
const SALES_MANAGER_PERMISSIONS: &[Permission] = &[
    Permission::UploadLeads,
    Permission::ManageTeamMembers,
    Permission::AssignLeads,
    Permission::ViewTeamPerformance,
    Permission::ViewAssignedLeads,
];

/// The permissions granted to telemarketers.
const TELEMARKETER_PERMISSIONS: &[Permission] = &[
    Permission::ViewAssignedLeads,
    Permission::UpdateLeadStatus,
    Permission::TrackDailyQuota,
];

/// The permissions granted to counselors.
const COUNSELOR_PERMISSIONS: &[Permission] = &[
    Permission::ManageStudentApplications,
    Permission::UpdateApplicationStatus,
    Permission::ReviewDocuments,
];

/// The permissions granted to students.
const STUDENT_PERMISSIONS: &[Permission] = &[
    Permission::ViewApplicationStatus,
    Permission::UploadDocuments,
    Permission::TrackProgress,
];

/// Returns the fixed permission set for a role.
///
/// The table is static configuration: changing it is a code change,
/// checked exhaustively at compile time.
#[must_use]
pub const fn permissions_for_role(role: UserRole) -> &'static [Permission] {
    match role {
        UserRole::Admin => ADMIN_PERMISSIONS,
        UserRole::SalesManager => SALES_MANAGER_PERMISSIONS,
        UserRole::Telemarketer => TELEMARKETER_PERMISSIONS,
        UserRole::Counselor => COUNSELOR_PERMISSIONS,
        UserRole::Student => STUDENT_PERMISSIONS,
    }
}

/// Checks whether a user holds a specific permission.
///
/// Returns `false` when no user is present (unauthenticated access).
#[must_use]
pub fn has_permission(user: Option<&User>, permission: Permission) -> bool {
    user.is_some_and(|user| permissions_for_role(user.role).contains(&permission))
}

/// Checks whether a user holds a specific role.
///
/// Returns `false` when no user is present.
#[must_use]
pub fn has_role(user: Option<&User>, role: UserRole) -> bool {
    user.is_some_and(|user| user.role == role)
}

/// Returns all permissions for a user, empty when absent.
#[must_use]
pub fn user_permissions(user: Option<&User>) -> &'static [Permission] {
    user.map_or(&[], |user| permissions_for_role(user.role))
}
