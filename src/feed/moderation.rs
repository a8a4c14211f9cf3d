//! Report-count moderation rule.
//!
//! Any viewer may report any post; reports are anonymous counters, not
//! attributable records. A post at the threshold is removed by the *next*
//! report rather than incremented past it.

use crate::client::Post;

/// Number of reports after which the next report removes the post.
pub const REPORT_THRESHOLD: i64 = 2;

/// What a report action should do to the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportOutcome {
    /// Atomic +1 on the post's report count.
    Increment,
    /// Hard delete; the count never goes past the threshold.
    Delete,
}

/// Decide the outcome of reporting a post with the given current count.
pub fn report_outcome(report_count: i64) -> ReportOutcome {
    if report_count >= REPORT_THRESHOLD {
        ReportOutcome::Delete
    } else {
        ReportOutcome::Increment
    }
}

/// Convenience wrapper for deciding from a snapshot post.
pub fn report_outcome_for(post: &Post) -> ReportOutcome {
    report_outcome(post.report_count)
}
