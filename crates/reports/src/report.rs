//! Review workflow state machine for a daily report.
//!
//! Replaces the old modal-dialog review side-channel with an explicit state
//! machine; review feedback is structured data on the report itself.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use opsdash_core::{DomainError, DomainResult, ReportId, UserId};

/// Report lifecycle status.
///
/// `ReturnedForCorrection` is not terminal: the owner fixes the report and
/// resubmits. `UnderReview` is an optional claiming step; a reviewer may
/// decide straight from `Submitted`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportStatus {
    Draft,
    Submitted,
    UnderReview,
    Approved,
    ReturnedForCorrection,
}

impl core::fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let s = match self {
            ReportStatus::Draft => "draft",
            ReportStatus::Submitted => "submitted",
            ReportStatus::UnderReview => "under_review",
            ReportStatus::Approved => "approved",
            ReportStatus::ReturnedForCorrection => "returned_for_correction",
        };
        f.write_str(s)
    }
}

/// One review decision, attached to the report as data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewFeedback {
    pub reviewer: UserId,
    pub comments: String,
    pub decided_at: DateTime<Utc>,
}

/// A daily report as the review workflow and the RBAC layer see it.
///
/// # Invariants
/// - The owner is immutable after creation.
/// - Status changes only through the transition methods below.
/// - `is_finalized()` is true exactly in `Approved`; a finalized report is
///   locked to non-privileged edits (enforced by the permission layer via
///   `owner_id()` + `is_finalized()`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewableReport {
    id: ReportId,
    owner: UserId,
    report_date: NaiveDate,
    status: ReportStatus,
    current_reviewer: Option<UserId>,
    feedback: Vec<ReviewFeedback>,
}

impl ReviewableReport {
    pub fn new(id: ReportId, owner: UserId, report_date: NaiveDate) -> Self {
        Self {
            id,
            owner,
            report_date,
            status: ReportStatus::Draft,
            current_reviewer: None,
            feedback: Vec::new(),
        }
    }

    pub fn id(&self) -> ReportId {
        self.id
    }

    /// Owning user id, the evaluator's ownership input.
    pub fn owner_id(&self) -> UserId {
        self.owner
    }

    pub fn report_date(&self) -> NaiveDate {
        self.report_date
    }

    pub fn status(&self) -> ReportStatus {
        self.status
    }

    /// Reviewer who claimed the report, while it is under review.
    pub fn current_reviewer(&self) -> Option<UserId> {
        self.current_reviewer
    }

    pub fn feedback(&self) -> &[ReviewFeedback] {
        &self.feedback
    }

    /// Finalized reports are locked to non-privileged edits.
    pub fn is_finalized(&self) -> bool {
        self.status == ReportStatus::Approved
    }

    pub fn is_awaiting_review(&self) -> bool {
        matches!(
            self.status,
            ReportStatus::Submitted | ReportStatus::UnderReview
        )
    }

    // ─────────────────────────────────────────────────────────────────────
    // Transitions
    // ─────────────────────────────────────────────────────────────────────

    /// Submit for review. Legal from `Draft` and `ReturnedForCorrection`.
    pub fn submit(&mut self) -> DomainResult<()> {
        match self.status {
            ReportStatus::Draft | ReportStatus::ReturnedForCorrection => {
                self.status = ReportStatus::Submitted;
                Ok(())
            }
            other => Err(self.bad_transition("submit", other)),
        }
    }

    /// A reviewer claims the report. Legal from `Submitted`.
    pub fn begin_review(&mut self, reviewer: UserId) -> DomainResult<()> {
        match self.status {
            ReportStatus::Submitted => {
                self.status = ReportStatus::UnderReview;
                self.current_reviewer = Some(reviewer);
                Ok(())
            }
            other => Err(self.bad_transition("begin_review", other)),
        }
    }

    /// Approve the report, finalizing it.
    pub fn approve(&mut self, feedback: ReviewFeedback) -> DomainResult<()> {
        if !self.is_awaiting_review() {
            return Err(self.bad_transition("approve", self.status));
        }
        self.status = ReportStatus::Approved;
        self.current_reviewer = None;
        self.feedback.push(feedback);
        Ok(())
    }

    /// Send the report back to its owner for correction.
    pub fn return_for_correction(&mut self, feedback: ReviewFeedback) -> DomainResult<()> {
        if !self.is_awaiting_review() {
            return Err(self.bad_transition("return_for_correction", self.status));
        }
        self.status = ReportStatus::ReturnedForCorrection;
        self.current_reviewer = None;
        self.feedback.push(feedback);
        Ok(())
    }

    /// Record that the report's content was edited.
    ///
    /// Editing an approved report demotes it to `Submitted`: re-approval is
    /// required. In every other state an edit leaves the status alone.
    /// Whether the editor *may* edit at all is the permission layer's call,
    /// made before this.
    pub fn mark_edited(&mut self) {
        if self.status == ReportStatus::Approved {
            self.status = ReportStatus::Submitted;
        }
    }

    fn bad_transition(&self, operation: &str, from: ReportStatus) -> DomainError {
        DomainError::invalid_transition(format!(
            "report {}: cannot {operation} from status '{from}'",
            self.id
        ))
    }
}
