//! Capability policy: which roles grant which capability.
//!
//! Capability lists are **data**. Each capability owns its full role list;
//! none is inferred from another, so editing one list can never silently
//! change a different capability. The permission model has been re-cut
//! several times already (broad hierarchy → flat individual-report role →
//! supervisor/director split); keeping the lists as plain data makes the
//! next re-partitioning a configuration edit, not a code change.

use thiserror::Error;

use crate::roles::{self, Role, RoleRegistry};

/// Role lists for every capability of one feature module.
#[derive(Debug, Clone)]
pub struct CapabilityPolicy {
    /// May enter the module at all.
    pub module_access: Vec<Role>,
    /// May create and submit their own reports.
    pub create: Vec<Role>,
    /// May edit their own reports (before approval).
    pub edit_own: Vec<Role>,
    /// May download their own reports.
    pub download_own: Vec<Role>,
    /// May review submitted reports.
    pub review: Vec<Role>,
    /// May approve reports.
    pub approve: Vec<Role>,
    /// May return reports for correction.
    pub reject: Vec<Role>,
    /// May see everyone's reports, not just their own.
    pub view_all: Vec<Role>,
    /// May see the module dashboard/analytics.
    pub dashboard: Vec<Role>,
    /// May delete reports.
    pub delete: Vec<Role>,
    /// Full access: may act on any report regardless of owner or state.
    pub full_access: Vec<Role>,
    /// Owner-class: rights over one's own resources only.
    pub owner_class: Vec<Role>,
    /// View tier (used by `is_view_only`, net of full-access roles).
    pub view_only_tier: Vec<Role>,
    /// Legacy "controller" composite (report generation/download).
    pub controller: Vec<Role>,
    /// Legacy "CFO" composite (view and confirm).
    pub cfo: Vec<Role>,
}

impl CapabilityPolicy {
    /// Policy for the daily-report module under the current role scheme.
    pub fn daily_report() -> Self {
        let everyone = vec![
            roles::DAILY_REPORT_EMPLOYEE,
            roles::DAILY_REPORT_SUPERVISOR,
            roles::DAILY_REPORT_DIRECTOR,
            roles::DAILY_REPORT_MANAGER,
            roles::DAILY_REPORT_TEAM_LEAD,
            roles::ADMIN,
            roles::DAILY_REPORT,
            roles::INDIVIDUAL_REPORT_ACCESS,
        ];
        let reviewers = vec![
            roles::DAILY_REPORT_SUPERVISOR,
            roles::DAILY_REPORT_DIRECTOR,
            roles::DAILY_REPORT_MANAGER,
            roles::DAILY_REPORT_TEAM_LEAD,
            roles::ADMIN,
        ];

        Self {
            module_access: everyone.clone(),
            create: everyone.clone(),
            edit_own: everyone.clone(),
            download_own: everyone,
            review: reviewers.clone(),
            approve: reviewers.clone(),
            reject: reviewers.clone(),
            view_all: reviewers.clone(),
            dashboard: reviewers,
            delete: vec![roles::DAILY_REPORT_SUPERVISOR, roles::ADMIN],
            full_access: vec![roles::DAILY_REPORT_SUPERVISOR, roles::ADMIN],
            owner_class: vec![
                roles::DAILY_REPORT_EMPLOYEE,
                roles::DAILY_REPORT,
                roles::INDIVIDUAL_REPORT_ACCESS,
            ],
            view_only_tier: vec![
                roles::DAILY_REPORT_DIRECTOR,
                roles::DAILY_REPORT_MANAGER,
                roles::DAILY_REPORT_TEAM_LEAD,
            ],
            controller: vec![roles::CONTROLLER, roles::ADMIN],
            cfo: vec![roles::CFO, roles::ADMIN],
        }
    }

    /// Check every listed role against the registry's closed vocabulary.
    ///
    /// Run once at startup: a typo'd role string in a capability list would
    /// otherwise silently deny everyone (fail-closed), which is safe but
    /// miserable to debug.
    pub fn validate(&self, registry: &RoleRegistry) -> Result<(), PolicyError> {
        for (capability, list) in self.capability_lists() {
            for role in list {
                if !registry.is_known(role) {
                    return Err(PolicyError::UnknownRole {
                        capability,
                        role: role.as_str().to_string(),
                    });
                }
            }
        }
        Ok(())
    }

    fn capability_lists(&self) -> [(&'static str, &[Role]); 15] {
        [
            ("module_access", &self.module_access),
            ("create", &self.create),
            ("edit_own", &self.edit_own),
            ("download_own", &self.download_own),
            ("review", &self.review),
            ("approve", &self.approve),
            ("reject", &self.reject),
            ("view_all", &self.view_all),
            ("dashboard", &self.dashboard),
            ("delete", &self.delete),
            ("full_access", &self.full_access),
            ("owner_class", &self.owner_class),
            ("view_only_tier", &self.view_only_tier),
            ("controller", &self.controller),
            ("cfo", &self.cfo),
        ]
    }
}

/// Static-configuration error: a capability list names a role outside the
/// registry's vocabulary.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PolicyError {
    #[error("capability '{capability}' references unknown role '{role}'")]
    UnknownRole {
        capability: &'static str,
        role: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn daily_report_policy_validates_against_the_standard_registry() {
        let registry = RoleRegistry::standard();
        CapabilityPolicy::daily_report().validate(&registry).unwrap();
    }

    #[test]
    fn validation_rejects_a_typo_in_a_capability_list() {
        let registry = RoleRegistry::standard();
        let mut policy = CapabilityPolicy::daily_report();
        policy.approve.push(Role::new("ROLE_DAILY_REPORT_SUPERVIZOR"));

        let err = policy.validate(&registry).unwrap_err();
        assert_eq!(
            err,
            PolicyError::UnknownRole {
                capability: "approve",
                role: "ROLE_DAILY_REPORT_SUPERVIZOR".to_string(),
            }
        );
    }

    #[test]
    fn delete_list_is_independent_data_not_derived_from_full_access() {
        let mut policy = CapabilityPolicy::daily_report();
        policy.delete.clear();
        // clearing delete must leave full_access untouched
        assert!(!policy.full_access.is_empty());
    }
}
