//! Role vocabulary and the registry that makes it a closed set.
//!
//! Roles are opaque strings at this layer; which roles grant which capability
//! is decided by [`crate::policy::CapabilityPolicy`], not here. The registry
//! only knows the vocabulary: rank, display label, and owning feature module.

use std::borrow::Cow;
use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Role identifier used for RBAC.
///
/// Roles are intentionally opaque strings; an unrecognized role is still a
/// valid `Role` value, it simply grants nothing and ranks lowest.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Role(Cow<'static, str>);

impl Role {
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    pub const fn from_static(name: &'static str) -> Self {
        Self(Cow::Borrowed(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Closed vocabulary (latest scheme)
// ─────────────────────────────────────────────────────────────────────────────

/// Portal administrator, full access everywhere.
pub const ADMIN: Role = Role::from_static("ROLE_ADMIN");
/// Baseline authenticated portal user.
pub const USER: Role = Role::from_static("ROLE_USER");
/// Training module access.
pub const TRAINING: Role = Role::from_static("ROLE_TRAINING");
/// Drill-testing (QA) module access.
pub const DRILL_TESTING: Role = Role::from_static("ROLE_DRILL_TESTING");
/// General daily-report access.
pub const DAILY_REPORT: Role = Role::from_static("ROLE_DAILY_REPORT");

pub const DAILY_REPORT_EMPLOYEE: Role = Role::from_static("ROLE_DAILY_REPORT_EMPLOYEE");
pub const DAILY_REPORT_SUPERVISOR: Role = Role::from_static("ROLE_DAILY_REPORT_SUPERVISOR");
pub const DAILY_REPORT_DIRECTOR: Role = Role::from_static("ROLE_DAILY_REPORT_DIRECTOR");
pub const DAILY_REPORT_MANAGER: Role = Role::from_static("ROLE_DAILY_REPORT_MANAGER");
pub const DAILY_REPORT_TEAM_LEAD: Role = Role::from_static("ROLE_DAILY_REPORT_TEAM_LEAD");
/// Access limited to the principal's own reports.
pub const INDIVIDUAL_REPORT_ACCESS: Role = Role::from_static("ROLE_INDIVIDUAL_REPORT_ACCESS");

/// Legacy alias: "controller" collapsed into the supervisor role.
pub const CONTROLLER: Role = DAILY_REPORT_SUPERVISOR;
/// Legacy alias: "CFO" collapsed into the director role.
pub const CFO: Role = DAILY_REPORT_DIRECTOR;

// ─────────────────────────────────────────────────────────────────────────────
// Registry
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
struct RoleInfo {
    role: Role,
    display_name: &'static str,
    description: &'static str,
    /// Ordinal rank; higher means more privilege. Unknown roles rank 0.
    level: u8,
    module: Option<&'static str>,
}

/// Roles of one feature module, for grouped display in admin screens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModuleRoles {
    pub module_name: String,
    pub module_display_name: String,
    pub roles: Vec<Role>,
}

/// The closed, versioned role vocabulary.
///
/// Every operation is total over the string domain: unknown roles never
/// panic, they fall back to rank 0 and a derived display label. A typo'd
/// role must never crash a screen, only grant nothing.
#[derive(Debug, Clone)]
pub struct RoleRegistry {
    by_name: HashMap<String, RoleInfo>,
    modules: Vec<(&'static str, &'static str)>,
}

impl RoleRegistry {
    /// Registry for the current role scheme.
    pub fn standard() -> Self {
        let infos = [
            RoleInfo {
                role: ADMIN,
                display_name: "Administrator",
                description: "Full portal administrator with all permissions",
                level: 5,
                module: None,
            },
            RoleInfo {
                role: USER,
                display_name: "User",
                description: "Baseline authenticated portal user",
                level: 1,
                module: None,
            },
            RoleInfo {
                role: TRAINING,
                display_name: "Training",
                description: "Access to the training module",
                level: 1,
                module: Some("training"),
            },
            RoleInfo {
                role: DRILL_TESTING,
                display_name: "Drill Testing",
                description: "Access to the drill-testing module",
                level: 1,
                module: Some("drill-testing"),
            },
            RoleInfo {
                role: DAILY_REPORT,
                display_name: "Daily Report User",
                description: "General daily-report access",
                level: 1,
                module: Some("daily-report"),
            },
            RoleInfo {
                role: DAILY_REPORT_EMPLOYEE,
                display_name: "Employee",
                description: "Creates and submits own daily reports",
                level: 1,
                module: Some("daily-report"),
            },
            RoleInfo {
                role: DAILY_REPORT_TEAM_LEAD,
                display_name: "Team Lead",
                description: "Reviews reports for their team",
                level: 2,
                module: Some("daily-report"),
            },
            RoleInfo {
                role: DAILY_REPORT_MANAGER,
                display_name: "Manager",
                description: "Reviews and approves reports",
                level: 3,
                module: Some("daily-report"),
            },
            RoleInfo {
                role: DAILY_REPORT_DIRECTOR,
                display_name: "Director",
                description: "View and confirm across the module (CFO alias)",
                level: 3,
                module: Some("daily-report"),
            },
            RoleInfo {
                role: DAILY_REPORT_SUPERVISOR,
                display_name: "Supervisor",
                description: "Full daily-report access (controller alias)",
                level: 4,
                module: Some("daily-report"),
            },
            RoleInfo {
                role: INDIVIDUAL_REPORT_ACCESS,
                display_name: "Individual Report Access",
                description: "Limited to the principal's own reports",
                level: 1,
                module: Some("daily-report"),
            },
        ];

        let by_name = infos
            .into_iter()
            .map(|info| (info.role.as_str().to_string(), info))
            .collect();

        Self {
            by_name,
            modules: vec![
                ("daily-report", "Daily Report"),
                ("training", "Training"),
                ("drill-testing", "Drill Testing"),
            ],
        }
    }

    pub fn is_known(&self, role: &Role) -> bool {
        self.by_name.contains_key(role.as_str())
    }

    /// Ordinal rank of a role; `0` for unknown roles (lowest privilege).
    pub fn level_of(&self, role: &Role) -> u8 {
        self.by_name.get(role.as_str()).map_or(0, |info| info.level)
    }

    pub fn has_higher_or_equal_rank(&self, a: &Role, b: &Role) -> bool {
        self.level_of(a) >= self.level_of(b)
    }

    /// Human label for a role.
    ///
    /// Unknown roles derive a fallback: strip the `ROLE_` prefix and replace
    /// underscores with spaces, so future roles render tolerably in admin
    /// screens instead of failing.
    pub fn display_name(&self, role: &Role) -> String {
        match self.by_name.get(role.as_str()) {
            Some(info) => info.display_name.to_string(),
            None => role
                .as_str()
                .strip_prefix("ROLE_")
                .unwrap_or(role.as_str())
                .replace('_', " "),
        }
    }

    pub fn description(&self, role: &Role) -> Option<&'static str> {
        self.by_name.get(role.as_str()).map(|info| info.description)
    }

    /// Module a role belongs to, if it is module-scoped.
    pub fn module_of(&self, role: &Role) -> Option<&'static str> {
        self.by_name.get(role.as_str()).and_then(|info| info.module)
    }

    /// Roles grouped by owning module, for administration screens.
    pub fn module_roles(&self) -> Vec<ModuleRoles> {
        self.modules
            .iter()
            .map(|(name, display)| {
                let mut roles: Vec<Role> = self
                    .by_name
                    .values()
                    .filter(|info| info.module == Some(*name))
                    .map(|info| info.role.clone())
                    .collect();
                roles.sort_by_key(|r| {
                    let info = &self.by_name[r.as_str()];
                    (core::cmp::Reverse(info.level), info.role.as_str().to_string())
                });
                ModuleRoles {
                    module_name: (*name).to_string(),
                    module_display_name: (*display).to_string(),
                    roles,
                }
            })
            .collect()
    }

    /// All known roles, unordered.
    pub fn roles(&self) -> impl Iterator<Item = &Role> {
        self.by_name.values().map(|info| &info.role)
    }
}

impl Default for RoleRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_role_levels_follow_the_hierarchy() {
        let registry = RoleRegistry::standard();
        assert_eq!(registry.level_of(&ADMIN), 5);
        assert_eq!(registry.level_of(&DAILY_REPORT_SUPERVISOR), 4);
        assert_eq!(registry.level_of(&DAILY_REPORT_DIRECTOR), 3);
        assert_eq!(registry.level_of(&DAILY_REPORT_MANAGER), 3);
        assert_eq!(registry.level_of(&DAILY_REPORT_TEAM_LEAD), 2);
        assert_eq!(registry.level_of(&DAILY_REPORT_EMPLOYEE), 1);
    }

    #[test]
    fn unknown_role_ranks_lowest() {
        let registry = RoleRegistry::standard();
        let unknown = Role::new("ROLE_DOES_NOT_EXIST");
        assert_eq!(registry.level_of(&unknown), 0);
        assert!(!registry.is_known(&unknown));
        assert!(registry.has_higher_or_equal_rank(&DAILY_REPORT_EMPLOYEE, &unknown));
    }

    #[test]
    fn rank_comparison_is_numeric_over_levels() {
        let registry = RoleRegistry::standard();
        assert!(registry.has_higher_or_equal_rank(&ADMIN, &DAILY_REPORT_SUPERVISOR));
        assert!(!registry.has_higher_or_equal_rank(&DAILY_REPORT_TEAM_LEAD, &ADMIN));
        // director and manager share a level
        assert!(registry.has_higher_or_equal_rank(&DAILY_REPORT_DIRECTOR, &DAILY_REPORT_MANAGER));
        assert!(registry.has_higher_or_equal_rank(&DAILY_REPORT_MANAGER, &DAILY_REPORT_DIRECTOR));
    }

    #[test]
    fn display_name_for_known_roles() {
        let registry = RoleRegistry::standard();
        assert_eq!(registry.display_name(&DAILY_REPORT_TEAM_LEAD), "Team Lead");
        assert_eq!(registry.display_name(&ADMIN), "Administrator");
    }

    #[test]
    fn display_name_falls_back_for_unknown_roles() {
        let registry = RoleRegistry::standard();
        let unknown = Role::new("ROLE_UNKNOWN_FUTURE_ROLE");
        assert_eq!(registry.display_name(&unknown), "UNKNOWN FUTURE ROLE");
        // no prefix to strip: replace separators only
        let odd = Role::new("SOMETHING_ELSE");
        assert_eq!(registry.display_name(&odd), "SOMETHING ELSE");
    }

    #[test]
    fn legacy_aliases_collapse_onto_current_roles() {
        assert_eq!(CONTROLLER, DAILY_REPORT_SUPERVISOR);
        assert_eq!(CFO, DAILY_REPORT_DIRECTOR);
    }

    #[test]
    fn module_grouping_covers_daily_report_roles() {
        let registry = RoleRegistry::standard();
        let groups = registry.module_roles();
        let daily = groups
            .iter()
            .find(|g| g.module_name == "daily-report")
            .unwrap();
        assert_eq!(daily.module_display_name, "Daily Report");
        assert!(daily.roles.contains(&DAILY_REPORT_SUPERVISOR));
        assert!(daily.roles.contains(&INDIVIDUAL_REPORT_ACCESS));
        // portal-wide roles are not module-scoped
        assert!(!daily.roles.contains(&ADMIN));
    }
}
