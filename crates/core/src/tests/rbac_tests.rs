// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::helpers::{manager, telemarketer};
use crate::{has_permission, has_role, permissions_for_role, user_permissions};
use leadflow_domain::{Permission, User, UserRole};

#[test]
fn test_telemarketer_cannot_manage_team_members() {
    let user: User = telemarketer(1, 0, 0);
    assert!(!has_permission(
        Some(&user),
        Permission::ManageTeamMembers
    ));
}

#[test]
fn test_sales_manager_can_manage_team_members() {
    let user: User = manager(5);
    assert!(has_permission(Some(&user), Permission::ManageTeamMembers));
}

#[test]
fn test_absent_user_has_nothing() {
    assert!(!has_permission(None, Permission::ViewAssignedLeads));
    assert!(!has_role(None, UserRole::Admin));
    assert!(user_permissions(None).is_empty());
}

#[test]
fn test_has_role_is_exact() {
    let user: User = manager(5);
    assert!(has_role(Some(&user), UserRole::SalesManager));
    assert!(!has_role(Some(&user), UserRole::Admin));
}

#[test]
fn test_role_permission_table_sizes() {
    assert_eq!(permissions_for_role(UserRole::Admin).len(), 10);
    assert_eq!(permissions_for_role(UserRole::SalesManager).len(), 5);
    assert_eq!(permissions_for_role(UserRole::Telemarketer).len(), 3);
    assert_eq!(permissions_for_role(UserRole::Counselor).len(), 3);
    assert_eq!(permissions_for_role(UserRole::Student).len(), 3);
}

#[test]
fn test_admin_does_not_hold_student_permissions() {
    let perms: &[Permission] = permissions_for_role(UserRole::Admin);
    assert!(!perms.contains(&Permission::ViewApplicationStatus));
    assert!(!perms.contains(&Permission::UploadDocuments));
    assert!(!perms.contains(&Permission::TrackProgress));
}

#[test]
fn test_telemarketer_permission_set() {
    let user: User = telemarketer(1, 0, 0);
    assert!(has_permission(Some(&user), Permission::ViewAssignedLeads));
    assert!(has_permission(Some(&user), Permission::UpdateLeadStatus));
    assert!(has_permission(Some(&user), Permission::TrackDailyQuota));
    assert!(!has_permission(Some(&user), Permission::UploadLeads));
    assert!(!has_permission(Some(&user), Permission::AssignLeads));
}
