//! Destination URL validation.
//!
//! A destination is accepted when it starts with `http://` or `https://` and
//! can be sent back verbatim in a `Location` header. The value is stored
//! exactly as given.

use std::borrow::Cow;

use axum::http::HeaderValue;
use validator::ValidationError;

/// Schemes accepted for destination URLs.
pub const ALLOWED_PREFIXES: &[&str] = &["http://", "https://"];

pub const URL_REQUIRED: &str = "URL is required";
pub const URL_INVALID_SCHEME: &str = "URL must start with http:// or https://";
pub const URL_INVALID_CHARS: &str = "URL contains characters not allowed in a redirect";

/// Returns true if the URL uses an accepted scheme.
pub fn has_allowed_scheme(url: &str) -> bool {
    ALLOWED_PREFIXES.iter().any(|prefix| url.starts_with(prefix))
}

/// Checks a destination URL, returning the message to report on failure.
///
/// Both the request DTO and `LinkService` go through here, so every entry
/// point rejects the same inputs with the same message.
pub fn check_destination(url: &str) -> Result<(), &'static str> {
    if url.is_empty() {
        return Err(URL_REQUIRED);
    }
    if !has_allowed_scheme(url) {
        return Err(URL_INVALID_SCHEME);
    }
    // Control characters would make the redirect response unbuildable.
    if HeaderValue::from_str(url).is_err() {
        return Err(URL_INVALID_CHARS);
    }
    Ok(())
}

/// `validator` hook for DTO fields carrying a destination URL.
pub fn validate_destination(url: &str) -> Result<(), ValidationError> {
    check_destination(url).map_err(|message| {
        let code = match message {
            URL_REQUIRED => "url_required",
            URL_INVALID_SCHEME => "url_scheme",
            _ => "url_chars",
        };
        let mut err = ValidationError::new(code);
        err.message = Some(Cow::Borrowed(message));
        err
    })
}
