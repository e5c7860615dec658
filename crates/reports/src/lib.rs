//! `opsdash-reports` — the reviewable daily-report lifecycle.
//!
//! Only as much of the report domain as access control needs to reason
//! about: who owns a report, where it sits in the review workflow, and the
//! structured feedback attached by reviewers. Field-level report content is
//! a backend concern.

pub mod report;

pub use report::{ReportStatus, ReviewFeedback, ReviewableReport};
