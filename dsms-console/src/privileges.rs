//! Privilege Definitions
//!
//! UI-level privilege flags and their mapping to backend privilege
//! codes. A flag is held when the user's resolved codes intersect the
//! mapped set. The table is static and loaded once; authorization is
//! enforced authoritatively server-side - flags only gate navigation
//! and affordances.

/// UI-level privilege flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrivilegeFlag {
    CanViewItems,
    CanManageItems,
    CanManageCategories,
    CanManageLabels,
    CanViewMachinery,
    CanManageMachinery,
    CanViewRequests,
    CanCreateRequests,
    CanApproveRequests,
    CanFulfillRequests,
    CanViewStock,
    CanAdjustStock,
    CanManageUsers,
    CanManageRoles,
    CanViewActivityLogs,
    CanManageActivityLogs,
}

impl PrivilegeFlag {
    pub fn as_str(&self) -> &'static str {
        match self {
            PrivilegeFlag::CanViewItems => "can_view_items",
            PrivilegeFlag::CanManageItems => "can_manage_items",
            PrivilegeFlag::CanManageCategories => "can_manage_categories",
            PrivilegeFlag::CanManageLabels => "can_manage_labels",
            PrivilegeFlag::CanViewMachinery => "can_view_machinery",
            PrivilegeFlag::CanManageMachinery => "can_manage_machinery",
            PrivilegeFlag::CanViewRequests => "can_view_requests",
            PrivilegeFlag::CanCreateRequests => "can_create_requests",
            PrivilegeFlag::CanApproveRequests => "can_approve_requests",
            PrivilegeFlag::CanFulfillRequests => "can_fulfill_requests",
            PrivilegeFlag::CanViewStock => "can_view_stock",
            PrivilegeFlag::CanAdjustStock => "can_adjust_stock",
            PrivilegeFlag::CanManageUsers => "can_manage_users",
            PrivilegeFlag::CanManageRoles => "can_manage_roles",
            PrivilegeFlag::CanViewActivityLogs => "can_view_activity_logs",
            PrivilegeFlag::CanManageActivityLogs => "can_manage_activity_logs",
        }
    }
}

/// Flag -> backend privilege codes. Holding ANY mapped code grants the flag.
pub const PRIVILEGE_TABLE: &[(PrivilegeFlag, &[&str])] = &[
    (
        PrivilegeFlag::CanViewItems,
        &["ITEM_VIEW", "ITEM_CREATE", "ITEM_MODIFY", "ITEM_DELETE"],
    ),
    (
        PrivilegeFlag::CanManageItems,
        &[
            "ITEM_CREATE",
            "ITEM_MODIFY",
            "ITEM_DELETE",
            "ITEM_CATEGORY_MANAGE",
        ],
    ),
    (PrivilegeFlag::CanManageCategories, &["ITEM_CATEGORY_MANAGE"]),
    (PrivilegeFlag::CanManageLabels, &["LABEL_MANAGE"]),
    (
        PrivilegeFlag::CanViewMachinery,
        &[
            "MACHINERY_VIEW",
            "MACHINERY_CREATE",
            "MACHINERY_MODIFY",
            "MACHINERY_DELETE",
        ],
    ),
    (
        PrivilegeFlag::CanManageMachinery,
        &[
            "MACHINERY_CREATE",
            "MACHINERY_MODIFY",
            "MACHINERY_DELETE",
            "MACHINERY_TYPE_MANAGE",
        ],
    ),
    (
        PrivilegeFlag::CanViewRequests,
        &[
            "REQUEST_VIEW",
            "REQUEST_CREATE",
            "REQUEST_APPROVE",
            "REQUEST_FULFILL",
        ],
    ),
    (PrivilegeFlag::CanCreateRequests, &["REQUEST_CREATE"]),
    (PrivilegeFlag::CanApproveRequests, &["REQUEST_APPROVE"]),
    (PrivilegeFlag::CanFulfillRequests, &["REQUEST_FULFILL"]),
    (
        PrivilegeFlag::CanViewStock,
        &["STOCK_VIEW", "STOCK_ADJUST"],
    ),
    (PrivilegeFlag::CanAdjustStock, &["STOCK_ADJUST"]),
    (PrivilegeFlag::CanManageUsers, &["USER_MANAGE"]),
    (PrivilegeFlag::CanManageRoles, &["ROLE_MANAGE"]),
    (
        PrivilegeFlag::CanViewActivityLogs,
        &["ACTIVITY_LOG_VIEW", "ACTIVITY_LOG_MANAGE"],
    ),
    (
        PrivilegeFlag::CanManageActivityLogs,
        &["ACTIVITY_LOG_MANAGE"],
    ),
];

/// Every backend code the console knows about, for role editing
pub fn all_backend_codes() -> Vec<&'static str> {
    let mut codes: Vec<&'static str> = PRIVILEGE_TABLE
        .iter()
        .flat_map(|(_, mapped)| mapped.iter().copied())
        .collect();
    codes.sort_unstable();
    codes.dedup();
    codes
}

/// Validate a privilege code string before offering it in a role editor
pub fn is_valid_code(code: &str) -> bool {
    PRIVILEGE_TABLE
        .iter()
        .any(|(_, mapped)| mapped.contains(&code))
}

/// True iff `codes` intersects the backend codes mapped to `flag`
pub fn has_privilege(codes: &[String], flag: PrivilegeFlag) -> bool {
    let Some((_, mapped)) = PRIVILEGE_TABLE.iter().find(|(f, _)| *f == flag) else {
        return false;
    };
    codes.iter().any(|code| mapped.contains(&code.as_str()))
}

/// True iff any flag of `flags` is held
pub fn has_any_privilege(codes: &[String], flags: &[PrivilegeFlag]) -> bool {
    flags.iter().any(|flag| has_privilege(codes, *flag))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codes(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_view_only_user() {
        let held = codes(&["ITEM_VIEW"]);
        assert!(has_privilege(&held, PrivilegeFlag::CanViewItems));
        assert!(!has_privilege(&held, PrivilegeFlag::CanManageItems));
    }

    #[test]
    fn test_any_mapped_code_grants_flag() {
        for code in ["ITEM_CREATE", "ITEM_MODIFY", "ITEM_DELETE", "ITEM_CATEGORY_MANAGE"] {
            let held = codes(&[code]);
            assert!(
                has_privilege(&held, PrivilegeFlag::CanManageItems),
                "{} should grant can_manage_items",
                code
            );
        }
    }

    #[test]
    fn test_manage_implies_view() {
        let held = codes(&["MACHINERY_MODIFY"]);
        assert!(has_privilege(&held, PrivilegeFlag::CanViewMachinery));
    }

    #[test]
    fn test_unknown_codes_grant_nothing() {
        let held = codes(&["SOMETHING_ELSE", "item_view"]);
        assert!(!has_privilege(&held, PrivilegeFlag::CanViewItems));
    }

    #[test]
    fn test_has_any() {
        let held = codes(&["REQUEST_APPROVE"]);
        assert!(has_any_privilege(
            &held,
            &[
                PrivilegeFlag::CanApproveRequests,
                PrivilegeFlag::CanFulfillRequests
            ]
        ));
        assert!(!has_any_privilege(
            &held,
            &[PrivilegeFlag::CanManageUsers, PrivilegeFlag::CanManageRoles]
        ));
    }
}
