//! DTOs for the short link endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entities::ShortLink;
use crate::utils::url_validator::validate_destination;

/// Body of `POST /shorten` and `PUT /shorten/{code}`.
///
/// `url` is optional at the serde level so a missing field is reported as a
/// validation error instead of a deserialization failure.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct ShortLinkRequest {
    #[validate(
        required(message = "URL is required"),
        custom(function = validate_destination)
    )]
    pub url: Option<String>,
}

/// JSON projection of a short link.
///
/// ```json
/// {
///   "id": 1,
///   "url": "https://example.com",
///   "short_code": "aB3xYz",
///   "access_count": 0,
///   "created_at": "2025-01-01T12:00:00Z",
///   "updated_at": "2025-01-01T12:00:00Z"
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ShortLinkResponse {
    pub id: i64,
    pub url: String,
    pub short_code: String,
    pub access_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ShortLink> for ShortLinkResponse {
    fn from(link: ShortLink) -> Self {
        Self {
            id: link.id,
            url: link.url,
            short_code: link.code,
            access_count: link.access_count,
            created_at: link.created_at,
            updated_at: link.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::utils::url_validator::URL_INVALID_SCHEME;
    use serde_json::json;

    #[test]
    fn test_missing_url_is_required_error() {
        let request: ShortLinkRequest = serde_json::from_value(json!({})).unwrap();
        let err: AppError = request.validate().unwrap_err().into();

        assert_eq!(err.to_string(), "URL is required");
    }

    #[test]
    fn test_invalid_scheme_error() {
        let request: ShortLinkRequest = serde_json::from_value(json!({ "url": "ftp://x" })).unwrap();
        let err: AppError = request.validate().unwrap_err().into();

        assert_eq!(err.to_error_info().details["errors"], json!([URL_INVALID_SCHEME]));
    }

    #[test]
    fn test_empty_url_is_required_error() {
        let request: ShortLinkRequest = serde_json::from_value(json!({ "url": "" })).unwrap();
        let err: AppError = request.validate().unwrap_err().into();

        assert_eq!(err.to_string(), "URL is required");
    }

    #[test]
    fn test_valid_request() {
        let request: ShortLinkRequest =
            serde_json::from_value(json!({ "url": "https://example.com/a?b=c" })).unwrap();
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_response_field_names() {
        let now = Utc::now();
        let link = ShortLink::new(
            3,
            "https://example.com".to_string(),
            "aB3xYz".to_string(),
            5,
            now,
            now,
        );

        let value = serde_json::to_value(ShortLinkResponse::from(link)).unwrap();

        assert_eq!(value["id"], 3);
        assert_eq!(value["url"], "https://example.com");
        assert_eq!(value["short_code"], "aB3xYz");
        assert_eq!(value["access_count"], 5);
        assert!(value["created_at"].is_string());
        assert!(value["updated_at"].is_string());
    }
}
