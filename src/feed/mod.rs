//! Feed rules: composer validation, author labels, the report threshold, and
//! the daily purge sweep. Pure decision logic — the UI layer spawns the
//! actual service calls.

mod compose;
mod moderation;
mod purge;

pub use compose::{
    author_label, build_draft, validate_content, ComposeError, LabelMode, MAX_CONTENT_LEN,
    MIN_CONTENT_LEN,
};
pub use moderation::{report_outcome, report_outcome_for, ReportOutcome, REPORT_THRESHOLD};
pub use purge::stale_post_ids;
