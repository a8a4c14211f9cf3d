use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("service returned {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("malformed service payload: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("no such post: {0}")]
    NotFound(String),

    #[error("invalid server URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

// ============================================================================
// Wire Types
// ============================================================================

/// A post as stored in the service's `tweets` collection.
///
/// The service assigns `id`; everything else is written by the client at
/// creation time. `user_name` is the display label frozen at post time — it
/// is never recomputed, so toggling the label mode afterwards does not
/// relabel existing posts. Field names on the wire are camelCase to match
/// the collection schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: String,
    pub content: String,
    pub user_id: String,
    pub user_name: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub report_count: i64,
}

/// A post draft submitted to the service. The service responds with the
/// assigned document id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPost {
    pub content: String,
    pub user_id: String,
    pub user_name: String,
    pub created_at: DateTime<Utc>,
    pub report_count: i64,
}

/// The authenticated identity as reported by the external provider.
///
/// Lifecycle is entirely owned by the provider; this client only observes
/// current-identity-or-none.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    pub uid: String,
    pub display_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    #[test]
    fn post_serializes_camel_case() {
        let post = Post {
            id: "p1".into(),
            content: "hello".into(),
            user_id: "u1".into(),
            user_name: "Jane Doe".into(),
            created_at: Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap(),
            report_count: 0,
        };
        let json = serde_json::to_value(&post).unwrap();
        assert_eq!(json["userId"], "u1");
        assert_eq!(json["userName"], "Jane Doe");
        assert_eq!(json["reportCount"], 0);
        assert!(json.get("createdAt").is_some());
    }

    #[test]
    fn post_report_count_defaults_to_zero() {
        // Older documents may predate the reportCount field
        let json = r#"{
            "id": "p1",
            "content": "hello",
            "userId": "u1",
            "userName": "JD",
            "createdAt": "2024-06-01T12:00:00Z"
        }"#;
        let post: Post = serde_json::from_str(json).unwrap();
        assert_eq!(post.report_count, 0);
    }

    #[test]
    fn identity_round_trips() {
        let id = Identity {
            uid: "u1".into(),
            display_name: "Jane Doe".into(),
        };
        let json = serde_json::to_string(&id).unwrap();
        assert!(json.contains("displayName"));
        let back: Identity = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
