//! `opsdash-auth` — pure RBAC boundary for the operations portal.
//!
//! This crate is intentionally decoupled from HTTP, token handling, and
//! storage. It answers exactly two kinds of questions:
//!
//! - "may this navigation proceed?" (route guard → navigation decision)
//! - "may this principal perform this action?" (capability query → bool)
//!
//! Expected denial conditions (no session, missing role, unknown role,
//! finalized resource) are *values*, never errors: the only `Err`s this
//! crate produces come from validating static configuration at startup.

pub mod evaluator;
pub mod guard;
pub mod policy;
pub mod principal;
pub mod roles;
pub mod session;

pub use evaluator::{PermissionEvaluator, RoleLevel};
pub use guard::{GuardDecision, RouteConfigError, RouteGuard, RouteRule, RouteTable};
pub use policy::{CapabilityPolicy, PolicyError};
pub use principal::Principal;
pub use roles::{ModuleRoles, Role, RoleRegistry};
pub use session::Session;
