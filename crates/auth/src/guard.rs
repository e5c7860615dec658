//! Route guard: gates entry into protected route subtrees at navigation time.
//!
//! The guard owns no navigation side effects; it returns a [`GuardDecision`]
//! and the routing layer performs the redirect. Each navigation attempt is
//! evaluated from scratch; auth state or roles may have changed since the
//! last attempt, so decisions are never cached.

use thiserror::Error;
use tracing::debug;

use crate::evaluator::PermissionEvaluator;
use crate::policy::CapabilityPolicy;
use crate::roles::{Role, RoleRegistry};
use crate::session::Session;

/// Outcome of a navigation check, consumed by the routing layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    /// Deny; send the user to the login route, carrying the originally
    /// requested path so it can be resumed after login.
    RedirectToLogin { return_url: String },
    /// Authenticated but lacking a required role.
    RedirectToUnauthorized,
}

impl GuardDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, GuardDecision::Allow)
    }
}

/// Static authorization metadata for one protected route subtree.
///
/// An empty `required_roles` list means "any authenticated user". A
/// non-empty list has OR semantics: one matching role suffices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteRule {
    pub path: String,
    pub required_roles: Vec<Role>,
}

impl RouteRule {
    pub fn authenticated(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            required_roles: Vec::new(),
        }
    }

    pub fn with_roles(path: impl Into<String>, required_roles: Vec<Role>) -> Self {
        Self {
            path: path.into(),
            required_roles,
        }
    }
}

/// Typed, validated route-authorization table.
///
/// Route metadata used to be duck-typed configuration; here it is validated
/// once at startup against the registry's closed vocabulary, so a typo in a
/// role string is a configuration error instead of a silent deny-everyone.
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    rules: Vec<RouteRule>,
}

impl RouteTable {
    pub fn new(rules: Vec<RouteRule>) -> Self {
        Self { rules }
    }

    pub fn validate(&self, registry: &RoleRegistry) -> Result<(), RouteConfigError> {
        for rule in &self.rules {
            if rule.path.is_empty() || !rule.path.starts_with('/') {
                return Err(RouteConfigError::InvalidPath {
                    path: rule.path.clone(),
                });
            }
            if self.rules.iter().filter(|r| r.path == rule.path).count() > 1 {
                return Err(RouteConfigError::DuplicatePath {
                    path: rule.path.clone(),
                });
            }
            for role in &rule.required_roles {
                if !registry.is_known(role) {
                    return Err(RouteConfigError::UnknownRole {
                        path: rule.path.clone(),
                        role: role.as_str().to_string(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Longest-prefix rule match on `/` boundaries, mirroring how route
    /// subtrees nest (`/dashboard` covers `/dashboard/daily-report`).
    pub fn rule_for(&self, path: &str) -> Option<&RouteRule> {
        self.rules
            .iter()
            .filter(|rule| {
                path == rule.path
                    || (path.starts_with(&rule.path)
                        && path.as_bytes().get(rule.path.len()) == Some(&b'/'))
            })
            .max_by_key(|rule| rule.path.len())
    }

    pub fn rules(&self) -> &[RouteRule] {
        &self.rules
    }
}

/// Route configuration error, surfaced at startup.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RouteConfigError {
    #[error("route '{path}' references unknown role '{role}'")]
    UnknownRole { path: String, role: String },

    #[error("route path '{path}' is declared more than once")]
    DuplicatePath { path: String },

    #[error("route path '{path}' is invalid (must start with '/')")]
    InvalidPath { path: String },
}

/// Per-navigation guard over one session snapshot.
///
/// Authentication is always checked before role authorization, so an
/// unauthenticated request to a role-gated route redirects to login, not to
/// the unauthorized page.
#[derive(Debug, Clone, Copy)]
pub struct RouteGuard<'a> {
    session: &'a Session,
    evaluator: PermissionEvaluator<'a>,
}

impl<'a> RouteGuard<'a> {
    pub fn new(session: &'a Session, policy: &'a CapabilityPolicy) -> Self {
        Self {
            session,
            evaluator: PermissionEvaluator::for_session(policy, session),
        }
    }

    /// Gate a navigation to `requested_path` under `rule`.
    pub fn can_activate(&self, rule: &RouteRule, requested_path: &str) -> GuardDecision {
        if !self.session.is_authenticated() {
            debug!(path = requested_path, "navigation denied: unauthenticated");
            return GuardDecision::RedirectToLogin {
                return_url: requested_path.to_string(),
            };
        }

        // Empty list: any authenticated user passes. The evaluator's
        // "empty requirement denies" rule applies to capability lists, not
        // to route rules, so the empty case is resolved before it is asked.
        if rule.required_roles.is_empty() {
            return GuardDecision::Allow;
        }

        if !self.evaluator.has_any_role(&rule.required_roles) {
            debug!(path = requested_path, "navigation denied: missing role");
            return GuardDecision::RedirectToUnauthorized;
        }

        GuardDecision::Allow
    }

    /// Module-specific variant: same shape, but the authorization step
    /// delegates to the composed module-access capability instead of a raw
    /// role list.
    pub fn can_activate_module(&self, requested_path: &str) -> GuardDecision {
        if !self.session.is_authenticated() {
            debug!(path = requested_path, "navigation denied: unauthenticated");
            return GuardDecision::RedirectToLogin {
                return_url: requested_path.to_string(),
            };
        }

        if !self.evaluator.can_access_module() {
            debug!(path = requested_path, "navigation denied: no module access");
            return GuardDecision::RedirectToUnauthorized;
        }

        GuardDecision::Allow
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::principal::Principal;
    use crate::roles;
    use opsdash_core::UserId;

    fn principal(id: i64, role_list: Vec<Role>) -> Principal {
        Principal {
            id: UserId::new(id),
            username: format!("user{id}"),
            full_name: None,
            email: format!("user{id}@example.test"),
            roles: role_list,
            enabled: true,
        }
    }

    fn table() -> RouteTable {
        RouteTable::new(vec![
            RouteRule::authenticated("/dashboard"),
            RouteRule::with_roles("/dashboard/admin", vec![roles::ADMIN]),
            RouteRule::with_roles(
                "/dashboard/drill-testing",
                vec![roles::DRILL_TESTING, roles::ADMIN],
            ),
        ])
    }

    #[test]
    fn table_validates_against_the_registry() {
        table().validate(&RoleRegistry::standard()).unwrap();
    }

    #[test]
    fn validation_rejects_unknown_roles_in_route_rules() {
        let registry = RoleRegistry::standard();
        let table = RouteTable::new(vec![RouteRule::with_roles(
            "/dashboard/admin",
            vec![Role::new("ROLE_AMDIN")],
        )]);
        let err = table.validate(&registry).unwrap_err();
        assert_eq!(
            err,
            RouteConfigError::UnknownRole {
                path: "/dashboard/admin".to_string(),
                role: "ROLE_AMDIN".to_string(),
            }
        );
    }

    #[test]
    fn validation_rejects_duplicate_and_malformed_paths() {
        let registry = RoleRegistry::standard();

        let dup = RouteTable::new(vec![
            RouteRule::authenticated("/dashboard"),
            RouteRule::authenticated("/dashboard"),
        ]);
        assert!(matches!(
            dup.validate(&registry),
            Err(RouteConfigError::DuplicatePath { .. })
        ));

        let bad = RouteTable::new(vec![RouteRule::authenticated("dashboard")]);
        assert!(matches!(
            bad.validate(&registry),
            Err(RouteConfigError::InvalidPath { .. })
        ));
    }

    #[test]
    fn rule_lookup_prefers_the_longest_matching_prefix() {
        let table = table();
        assert_eq!(
            table.rule_for("/dashboard/admin/users").unwrap().path,
            "/dashboard/admin"
        );
        assert_eq!(table.rule_for("/dashboard/home").unwrap().path, "/dashboard");
        // prefix must end on a path-segment boundary
        assert_eq!(
            table.rule_for("/dashboard/administrivia").unwrap().path,
            "/dashboard"
        );
        assert!(table.rule_for("/login").is_none());
    }

    #[test]
    fn matching_role_allows_activation() {
        let policy = CapabilityPolicy::daily_report();
        let session = Session::authenticated(principal(7, vec![roles::ADMIN]));
        let guard = RouteGuard::new(&session, &policy);

        let rule = RouteRule::with_roles("/dashboard/admin", vec![roles::ADMIN]);
        let decision = guard.can_activate(&rule, "/dashboard/admin");
        assert_eq!(decision, GuardDecision::Allow);
        assert!(decision.is_allowed());
    }

    #[test]
    fn missing_role_redirects_to_unauthorized() {
        let policy = CapabilityPolicy::daily_report();
        let session =
            Session::authenticated(principal(7, vec![roles::INDIVIDUAL_REPORT_ACCESS]));
        let guard = RouteGuard::new(&session, &policy);

        let rule = RouteRule::with_roles("/dashboard/admin", vec![roles::ADMIN]);
        let decision = guard.can_activate(&rule, "/dashboard/admin");
        assert_eq!(decision, GuardDecision::RedirectToUnauthorized);
        assert!(!decision.is_allowed());
    }

    #[test]
    fn unauthenticated_redirects_to_login_with_return_url() {
        let policy = CapabilityPolicy::daily_report();
        let session = Session::anonymous();
        let guard = RouteGuard::new(&session, &policy);

        let rule = RouteRule::authenticated("/dashboard");
        let decision = guard.can_activate(&rule, "/dashboard/home");
        assert_eq!(
            decision,
            GuardDecision::RedirectToLogin {
                return_url: "/dashboard/home".to_string()
            }
        );
        assert!(!decision.is_allowed());
    }

    #[test]
    fn auth_check_precedes_role_check() {
        // even a route nobody's roles could satisfy must send an
        // unauthenticated user to login, not to the unauthorized page
        let policy = CapabilityPolicy::daily_report();
        let session = Session::anonymous();
        let guard = RouteGuard::new(&session, &policy);

        let rule = RouteRule::with_roles("/dashboard/admin", vec![Role::new("ROLE_NOBODY")]);
        assert!(matches!(
            guard.can_activate(&rule, "/dashboard/admin"),
            GuardDecision::RedirectToLogin { .. }
        ));
    }

    #[test]
    fn empty_role_list_admits_any_authenticated_user() {
        let policy = CapabilityPolicy::daily_report();
        let session = Session::authenticated(principal(1, vec![]));
        let guard = RouteGuard::new(&session, &policy);

        let rule = RouteRule::authenticated("/dashboard");
        assert_eq!(guard.can_activate(&rule, "/dashboard"), GuardDecision::Allow);
    }

    #[test]
    fn module_guard_delegates_to_the_module_access_capability() {
        let policy = CapabilityPolicy::daily_report();

        let employee = Session::authenticated(principal(3, vec![roles::DAILY_REPORT_EMPLOYEE]));
        let guard = RouteGuard::new(&employee, &policy);
        assert_eq!(
            guard.can_activate_module("/dashboard/daily-report"),
            GuardDecision::Allow
        );

        let outsider = Session::authenticated(principal(4, vec![roles::TRAINING]));
        let guard = RouteGuard::new(&outsider, &policy);
        assert_eq!(
            guard.can_activate_module("/dashboard/daily-report"),
            GuardDecision::RedirectToUnauthorized
        );

        let anonymous = Session::anonymous();
        let guard = RouteGuard::new(&anonymous, &policy);
        assert!(matches!(
            guard.can_activate_module("/dashboard/daily-report"),
            GuardDecision::RedirectToLogin { .. }
        ));
    }

    #[test]
    fn decisions_are_recomputed_per_navigation() {
        let policy = CapabilityPolicy::daily_report();
        let mut session = Session::anonymous();
        let rule = RouteRule::authenticated("/dashboard");

        let decision = RouteGuard::new(&session, &policy).can_activate(&rule, "/dashboard");
        assert!(matches!(decision, GuardDecision::RedirectToLogin { .. }));

        session.set_principal(principal(1, vec![roles::USER]));
        let decision = RouteGuard::new(&session, &policy).can_activate(&rule, "/dashboard");
        assert_eq!(decision, GuardDecision::Allow);

        session.clear();
        let decision = RouteGuard::new(&session, &policy).can_activate(&rule, "/dashboard");
        assert!(matches!(decision, GuardDecision::RedirectToLogin { .. }));
    }
}
