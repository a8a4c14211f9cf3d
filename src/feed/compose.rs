//! Composer validation and author-label computation.
//!
//! Pure rules, no I/O. The composer submits through [`validate_content`]
//! first; an accepted draft is built once with the label frozen at post time.

use crate::client::{Identity, NewPost};
use chrono::Utc;
use thiserror::Error;

/// Inclusive lower bound on post length, in characters.
pub const MIN_CONTENT_LEN: usize = 15;
/// Inclusive upper bound on post length, in characters.
pub const MAX_CONTENT_LEN: usize = 200;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ComposeError {
    /// Whitespace-only input. Silently ignored by the UI: no warning, no
    /// network call, composer left unchanged.
    #[error("post is empty")]
    Empty,

    /// Out-of-range input. Surfaced to the user as a warning; the composer
    /// keeps its text.
    #[error("Post must be between {MIN_CONTENT_LEN} and {MAX_CONTENT_LEN} characters.")]
    Length,
}

/// How the author label on a new post is computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LabelMode {
    /// The identity's display name verbatim.
    #[default]
    FullName,
    /// First character of each whitespace-separated name segment,
    /// upper-cased, concatenated: "Jane Doe" → "JD".
    Initials,
}

impl LabelMode {
    pub fn toggled(self) -> Self {
        match self {
            Self::FullName => Self::Initials,
            Self::Initials => Self::FullName,
        }
    }

    /// Short name for status display.
    pub fn name(self) -> &'static str {
        match self {
            Self::FullName => "full name",
            Self::Initials => "initials",
        }
    }
}

/// Validate composer text against the service's client-side rules.
///
/// Empty-after-trim is distinguished from out-of-range because the two are
/// handled differently: empty is a silent no-op, out-of-range warns.
/// Length is measured in characters on the untrimmed text, matching what
/// gets stored.
pub fn validate_content(text: &str) -> Result<(), ComposeError> {
    if text.trim().is_empty() {
        return Err(ComposeError::Empty);
    }
    let len = text.chars().count();
    if !(MIN_CONTENT_LEN..=MAX_CONTENT_LEN).contains(&len) {
        return Err(ComposeError::Length);
    }
    Ok(())
}

/// Compute the author label for a new post.
///
/// Evaluated exactly once at submission time; existing posts are never
/// relabeled when the mode toggles.
pub fn author_label(display_name: &str, mode: LabelMode) -> String {
    match mode {
        LabelMode::FullName => display_name.to_string(),
        LabelMode::Initials => display_name
            .split_whitespace()
            .filter_map(|segment| segment.chars().next())
            .flat_map(|c| c.to_uppercase())
            .collect(),
    }
}

/// Build the draft for validated composer text.
///
/// `createdAt` is stamped by the client at submission time and
/// `reportCount` starts at zero.
pub fn build_draft(text: &str, identity: &Identity, mode: LabelMode) -> NewPost {
    NewPost {
        content: text.to_string(),
        user_id: identity.uid.clone(),
        user_name: author_label(&identity.display_name, mode),
        created_at: Utc::now(),
        report_count: 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn empty_and_whitespace_rejected_silently() {
        assert_eq!(validate_content(""), Err(ComposeError::Empty));
        assert_eq!(validate_content("   \t "), Err(ComposeError::Empty));
    }

    #[test]
    fn length_bounds_are_inclusive() {
        assert_eq!(validate_content(&"a".repeat(14)), Err(ComposeError::Length));
        assert_eq!(validate_content(&"a".repeat(15)), Ok(()));
        assert_eq!(validate_content(&"a".repeat(200)), Ok(()));
        assert_eq!(
            validate_content(&"a".repeat(201)),
            Err(ComposeError::Length)
        );
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        // 15 CJK chars is 45 bytes but still a valid post
        assert_eq!(validate_content(&"好".repeat(15)), Ok(()));
    }

    #[test]
    fn warning_text_names_the_enforced_bounds() {
        assert_eq!(
            ComposeError::Length.to_string(),
            "Post must be between 15 and 200 characters."
        );
    }

    #[test]
    fn initials_from_full_name() {
        assert_eq!(author_label("Jane Doe", LabelMode::Initials), "JD");
    }

    #[test]
    fn initials_upper_cases() {
        assert_eq!(author_label("jane van doe", LabelMode::Initials), "JVD");
    }

    #[test]
    fn initials_single_segment() {
        assert_eq!(author_label("Prince", LabelMode::Initials), "P");
    }

    #[test]
    fn initials_collapse_extra_whitespace() {
        assert_eq!(author_label("  Jane   Doe ", LabelMode::Initials), "JD");
    }

    #[test]
    fn full_name_is_verbatim() {
        assert_eq!(author_label("Jane Doe", LabelMode::FullName), "Jane Doe");
    }

    #[test]
    fn draft_starts_unreported() {
        let identity = Identity {
            uid: "u1".into(),
            display_name: "Jane Doe".into(),
        };
        let draft = build_draft("This is a valid tweet body", &identity, LabelMode::FullName);
        assert_eq!(draft.report_count, 0);
        assert_eq!(draft.user_id, "u1");
        assert_eq!(draft.user_name, "Jane Doe");
    }

    #[test]
    fn label_mode_toggles_both_ways() {
        assert_eq!(LabelMode::FullName.toggled(), LabelMode::Initials);
        assert_eq!(LabelMode::Initials.toggled(), LabelMode::FullName);
    }

    proptest! {
        #[test]
        fn accepted_length_range_is_exact(len in 0usize..400) {
            let text = "x".repeat(len);
            let ok = validate_content(&text).is_ok();
            prop_assert_eq!(ok, (MIN_CONTENT_LEN..=MAX_CONTENT_LEN).contains(&len));
        }

        #[test]
        fn initials_never_longer_than_segment_count(name in "[a-zA-Z ]{0,64}") {
            let initials = author_label(&name, LabelMode::Initials);
            prop_assert!(initials.chars().count() <= name.split_whitespace().count());
        }
    }
}
