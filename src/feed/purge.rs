//! Daily purge sweep.
//!
//! Posts created "yesterday" in the service's fixed timezone are deleted the
//! next time a snapshot arrives. The sweep is driven by snapshot delivery,
//! not a timer: it runs when the feed loads or whenever any post changes, so
//! a quiet collection is purged on the next load rather than on a schedule.

use crate::client::Post;
use chrono::{DateTime, Duration, FixedOffset, NaiveDate, Utc};

/// The service's purge timezone: South African Standard Time, a fixed UTC+2
/// offset with no daylight saving.
const SAST_OFFSET_SECS: i32 = 2 * 3600;

fn sast() -> FixedOffset {
    // 2 * 3600 is a valid offset, east_opt cannot fail here
    FixedOffset::east_opt(SAST_OFFSET_SECS).expect("valid fixed offset")
}

/// Calendar date of a timestamp in the purge timezone.
fn sast_date(at: DateTime<Utc>) -> NaiveDate {
    at.with_timezone(&sast()).date_naive()
}

/// Ids of posts whose creation date in SAST equals yesterday relative to
/// `now`. Posts from today are kept; posts from two-plus days ago are also
/// left untouched, matching the service's observed behavior — only the
/// exact-yesterday cohort is swept.
pub fn stale_post_ids(posts: &[Post], now: DateTime<Utc>) -> Vec<String> {
    let yesterday = sast_date(now) - Duration::days(1);
    posts
        .iter()
        .filter(|p| sast_date(p.created_at) == yesterday)
        .map(|p| p.id.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn post(id: &str, created_at: DateTime<Utc>) -> Post {
        Post {
            id: id.into(),
            content: "some valid content".into(),
            user_id: "u1".into(),
            user_name: "JD".into(),
            created_at,
            report_count: 0,
        }
    }

    // Noon UTC on June 10th; SAST date is also June 10th.
    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 10, 12, 0, 0).unwrap()
    }

    #[test]
    fn yesterday_is_swept() {
        let posts = vec![post("p1", Utc.with_ymd_and_hms(2024, 6, 9, 10, 0, 0).unwrap())];
        assert_eq!(stale_post_ids(&posts, now()), vec!["p1".to_string()]);
    }

    #[test]
    fn today_is_kept() {
        let posts = vec![post("p1", Utc.with_ymd_and_hms(2024, 6, 10, 8, 0, 0).unwrap())];
        assert!(stale_post_ids(&posts, now()).is_empty());
    }

    #[test]
    fn two_days_ago_is_left_untouched() {
        let posts = vec![post("p1", Utc.with_ymd_and_hms(2024, 6, 8, 10, 0, 0).unwrap())];
        assert!(stale_post_ids(&posts, now()).is_empty());
    }

    #[test]
    fn boundary_uses_sast_not_utc() {
        // 22:30 UTC on June 9th is 00:30 June 10th in SAST — today, kept.
        let late = post("p1", Utc.with_ymd_and_hms(2024, 6, 9, 22, 30, 0).unwrap());
        // 21:30 UTC on June 9th is 23:30 June 9th in SAST — yesterday, swept.
        let earlier = post("p2", Utc.with_ymd_and_hms(2024, 6, 9, 21, 30, 0).unwrap());

        let stale = stale_post_ids(&[late, earlier], now());
        assert_eq!(stale, vec!["p2".to_string()]);
    }

    #[test]
    fn mixed_snapshot_sweeps_only_yesterday() {
        let posts = vec![
            post("today", Utc.with_ymd_and_hms(2024, 6, 10, 9, 0, 0).unwrap()),
            post("yesterday", Utc.with_ymd_and_hms(2024, 6, 9, 9, 0, 0).unwrap()),
            post("ancient", Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap()),
        ];
        assert_eq!(stale_post_ids(&posts, now()), vec!["yesterday".to_string()]);
    }
}
