//! ShortLink entity: the mapping from a short code to its destination URL.

use chrono::{DateTime, Utc};

/// A stored short link with its access counter.
///
/// `code` and `created_at` never change after creation. `url` and `updated_at`
/// change together on update. `access_count` only grows, one step per
/// successful redirect, and does not touch `updated_at`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortLink {
    pub id: i64,
    pub url: String,
    pub code: String,
    pub access_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ShortLink {
    /// Creates a new ShortLink instance.
    pub fn new(
        id: i64,
        url: String,
        code: String,
        access_count: i64,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            url,
            code,
            access_count,
            created_at,
            updated_at,
        }
    }

    /// Returns true if the destination was changed after creation.
    pub fn was_updated(&self) -> bool {
        self.updated_at > self.created_at
    }
}

/// Input data for inserting a new short link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewShortLink {
    pub url: String,
    pub code: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_short_link_creation() {
        let now = Utc::now();
        let link = ShortLink::new(
            1,
            "https://example.com".to_string(),
            "abc123".to_string(),
            0,
            now,
            now,
        );

        assert_eq!(link.id, 1);
        assert_eq!(link.code, "abc123");
        assert_eq!(link.url, "https://example.com");
        assert_eq!(link.access_count, 0);
        assert!(!link.was_updated());
    }

    #[test]
    fn test_short_link_was_updated() {
        let created = Utc::now();
        let link = ShortLink::new(
            2,
            "https://example.com/new".to_string(),
            "Zx9q2B".to_string(),
            7,
            created,
            created + Duration::seconds(5),
        );

        assert!(link.was_updated());
    }
}
