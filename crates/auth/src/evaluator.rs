//! Permission evaluator: principal snapshot + capability policy → decisions.
//!
//! - No IO
//! - No panics
//! - No business logic (pure policy checks)
//!
//! Every evaluation reads the principal snapshot captured at construction,
//! exactly once per call chain; a session change mid-evaluation cannot be
//! observed. Absent or malformed input (no principal, empty role set,
//! disabled account) degrades to "no access", never to an error.

use opsdash_core::UserId;

use crate::policy::CapabilityPolicy;
use crate::principal::Principal;
use crate::roles::{self, Role};
use crate::session::Session;

/// Coarse role classification for a principal within the module, used for
/// display and screen-mode selection (not for access decisions).
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RoleLevel {
    Admin,
    Supervisor,
    Director,
    Manager,
    TeamLead,
    Employee,
}

/// Answers capability questions for one principal snapshot.
///
/// The named methods here are the only sanctioned way screens query access;
/// screens must not re-derive role logic locally.
#[derive(Debug, Clone, Copy)]
pub struct PermissionEvaluator<'a> {
    policy: &'a CapabilityPolicy,
    principal: Option<&'a Principal>,
}

impl<'a> PermissionEvaluator<'a> {
    pub fn new(policy: &'a CapabilityPolicy, principal: Option<&'a Principal>) -> Self {
        Self { policy, principal }
    }

    /// Evaluator over the session's current snapshot.
    ///
    /// A disabled principal is dropped here, so every capability method
    /// sees "no principal" for disabled accounts.
    pub fn for_session(policy: &'a CapabilityPolicy, session: &'a Session) -> Self {
        let principal = session.principal().filter(|p| p.enabled);
        Self { policy, principal }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Core primitive
    // ─────────────────────────────────────────────────────────────────────

    /// True iff the principal's role set intersects `required`.
    ///
    /// Returns `false` when there is no principal, when its role set is
    /// empty, or when `required` is empty. The empty-requirement rule is
    /// deliberate: a forgotten capability list must read as "nobody
    /// qualifies", never as open access.
    pub fn has_any_role(&self, required: &[Role]) -> bool {
        if required.is_empty() {
            return false;
        }
        match self.principal {
            Some(p) => p.has_any_role(required),
            None => false,
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Derived capabilities (each backed by its own policy list)
    // ─────────────────────────────────────────────────────────────────────

    pub fn can_access_module(&self) -> bool {
        self.has_any_role(&self.policy.module_access)
    }

    pub fn can_create_report(&self) -> bool {
        self.has_any_role(&self.policy.create)
    }

    pub fn can_edit_own_report(&self) -> bool {
        self.has_any_role(&self.policy.edit_own)
    }

    pub fn can_download_own_report(&self) -> bool {
        self.has_any_role(&self.policy.download_own)
    }

    pub fn can_review_reports(&self) -> bool {
        self.has_any_role(&self.policy.review)
    }

    pub fn can_approve_reports(&self) -> bool {
        self.has_any_role(&self.policy.approve)
    }

    pub fn can_reject_reports(&self) -> bool {
        self.has_any_role(&self.policy.reject)
    }

    pub fn can_view_all_reports(&self) -> bool {
        self.has_any_role(&self.policy.view_all)
    }

    pub fn can_view_dashboard(&self) -> bool {
        self.has_any_role(&self.policy.dashboard)
    }

    pub fn can_delete_report(&self) -> bool {
        self.has_any_role(&self.policy.delete)
    }

    /// Full access: may act on any report regardless of owner or state.
    pub fn has_full_access(&self) -> bool {
        self.has_any_role(&self.policy.full_access)
    }

    /// Limited to the principal's own reports.
    pub fn has_individual_report_access(&self) -> bool {
        self.has_any_role(&[roles::INDIVIDUAL_REPORT_ACCESS])
    }

    /// Legacy composite: controller (generate and download reports).
    pub fn is_controller(&self) -> bool {
        self.has_any_role(&self.policy.controller)
    }

    /// Legacy composite: CFO (view and confirm reports).
    pub fn is_cfo(&self) -> bool {
        self.has_any_role(&self.policy.cfo)
    }

    /// View tier without any full-access role.
    pub fn is_view_only(&self) -> bool {
        self.has_any_role(&self.policy.view_only_tier) && !self.has_full_access()
    }

    // ─────────────────────────────────────────────────────────────────────
    // State-aware decision
    // ─────────────────────────────────────────────────────────────────────

    /// May the principal edit the report owned by `owner_id`?
    ///
    /// Evaluation order is load-bearing: finalization always takes
    /// precedence over ownership.
    ///
    /// 1. Finalized (approved) reports require a full-access role, whoever
    ///    owns them; an edit demotes them back to needing re-approval.
    /// 2. No principal → no.
    /// 3. Full access → yes.
    /// 4. Otherwise: owner-class role *and* the principal owns the report.
    pub fn can_edit_report(&self, owner_id: UserId, is_finalized: bool) -> bool {
        if is_finalized {
            return self.has_full_access();
        }

        let Some(principal) = self.principal else {
            return false;
        };

        if self.has_full_access() {
            return true;
        }

        self.has_any_role(&self.policy.owner_class) && principal.id == owner_id
    }

    // ─────────────────────────────────────────────────────────────────────
    // Classification
    // ─────────────────────────────────────────────────────────────────────

    /// Coarse role level of the principal within the module, highest first.
    pub fn role_level(&self) -> Option<RoleLevel> {
        let principal = self.principal?;

        if principal.has_role(&roles::ADMIN) {
            Some(RoleLevel::Admin)
        } else if principal.has_role(&roles::DAILY_REPORT_SUPERVISOR) {
            Some(RoleLevel::Supervisor)
        } else if principal.has_role(&roles::DAILY_REPORT_DIRECTOR) {
            Some(RoleLevel::Director)
        } else if principal.has_role(&roles::DAILY_REPORT_MANAGER) {
            Some(RoleLevel::Manager)
        } else if principal.has_role(&roles::DAILY_REPORT_TEAM_LEAD) {
            Some(RoleLevel::TeamLead)
        } else if principal.has_any_role(&[
            roles::DAILY_REPORT_EMPLOYEE,
            roles::DAILY_REPORT,
            roles::INDIVIDUAL_REPORT_ACCESS,
        ]) {
            Some(RoleLevel::Employee)
        } else {
            None
        }
    }
}
