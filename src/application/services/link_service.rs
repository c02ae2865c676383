//! Short link lifecycle and redirect counting.

use std::sync::Arc;

use serde_json::json;
use tracing::{debug, warn};

use crate::domain::entities::{NewShortLink, ShortLink};
use crate::domain::repositories::ShortLinkRepository;
use crate::error::AppError;
use crate::utils::code_generator::{CodeGenerator, is_reserved};
use crate::utils::url_validator::{URL_REQUIRED, check_destination};

/// Default number of attempts to find and claim a free code.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 10;

/// Service for creating, reading, updating and resolving short links.
///
/// Holds no mutable state of its own. Uniqueness and counting are delegated to
/// the repository, so any number of requests may run concurrently.
pub struct LinkService<R: ShortLinkRepository + ?Sized> {
    repository: Arc<R>,
    generator: CodeGenerator,
    max_attempts: u32,
}

impl<R: ShortLinkRepository + ?Sized> LinkService<R> {
    /// Creates a service with the default code length and attempt budget.
    pub fn new(repository: Arc<R>) -> Self {
        Self::with_settings(repository, CodeGenerator::default(), DEFAULT_MAX_ATTEMPTS)
    }

    pub fn with_settings(repository: Arc<R>, generator: CodeGenerator, max_attempts: u32) -> Self {
        Self {
            repository,
            generator,
            max_attempts: max_attempts.max(1),
        }
    }

    pub fn code_length(&self) -> usize {
        self.generator.length()
    }

    /// Creates a short link for `url` with a freshly allocated code.
    ///
    /// # Concurrency
    ///
    /// The free-code check and the insert are separate store calls, so two
    /// creators can pick the same candidate. The store's uniqueness constraint
    /// rejects the loser with [`AppError::Conflict`], and the whole
    /// resolve-and-insert step is retried with a new code.
    ///
    /// # Errors
    ///
    /// - [`AppError::Validation`] if the URL is missing or not http(s)
    /// - [`AppError::CodeSpaceExhausted`] if no code could be claimed within
    ///   the attempt budget
    pub async fn create(&self, url: Option<String>) -> Result<ShortLink, AppError> {
        let url = validate_url(url)?;

        for attempt in 1..=self.max_attempts {
            let code = self.resolve_unique_code().await?;

            let new_link = NewShortLink {
                url: url.clone(),
                code,
            };

            match self.repository.insert(new_link).await {
                Ok(link) => {
                    metrics::counter!("shortlinks_created_total").increment(1);
                    tracing::info!(code = %link.code, id = link.id, "Short link created");
                    return Ok(link);
                }
                Err(AppError::Conflict { details, .. }) => {
                    metrics::counter!("shortlinks_code_collisions_total").increment(1);
                    warn!(
                        attempt,
                        max_attempts = self.max_attempts,
                        %details,
                        "Short code taken by a concurrent insert, retrying"
                    );
                }
                Err(e) => return Err(e),
            }
        }

        Err(AppError::CodeSpaceExhausted {
            attempts: self.max_attempts,
        })
    }

    /// Finds a code that is neither reserved nor stored.
    ///
    /// The answer is only true at the moment of the check; callers must still
    /// handle a conflict on insert.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::CodeSpaceExhausted`] after `max_attempts` taken
    /// candidates.
    pub async fn resolve_unique_code(&self) -> Result<String, AppError> {
        for attempt in 1..=self.max_attempts {
            let code = self.generator.generate();

            if is_reserved(&code) {
                continue;
            }

            if !self.repository.exists(&code).await? {
                return Ok(code);
            }

            metrics::counter!("shortlinks_code_collisions_total").increment(1);
            debug!(attempt, code = %code, "Generated code already in use");
        }

        Err(AppError::CodeSpaceExhausted {
            attempts: self.max_attempts,
        })
    }

    /// Retrieves a link by its short code.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link has this code.
    pub async fn get(&self, code: &str) -> Result<ShortLink, AppError> {
        self.repository
            .find_by_code(code)
            .await?
            .ok_or_else(|| not_found(code))
    }

    /// Same projection as [`Self::get`]; the counter is part of every record.
    pub async fn stats(&self, code: &str) -> Result<ShortLink, AppError> {
        self.get(code).await
    }

    /// Points an existing code at a new destination.
    ///
    /// Only `url` and `updated_at` change.
    ///
    /// # Errors
    ///
    /// - [`AppError::Validation`] if the URL is missing or not http(s)
    /// - [`AppError::NotFound`] if no link has this code
    pub async fn update(&self, code: &str, url: Option<String>) -> Result<ShortLink, AppError> {
        let url = validate_url(url)?;

        let link = self
            .repository
            .update_url(code, &url)
            .await?
            .ok_or_else(|| not_found(code))?;

        tracing::info!(code = %code, "Short link updated");
        Ok(link)
    }

    /// Deletes a link.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link has this code.
    pub async fn delete(&self, code: &str) -> Result<(), AppError> {
        if !self.repository.delete(code).await? {
            return Err(not_found(code));
        }

        tracing::info!(code = %code, "Short link deleted");
        Ok(())
    }

    /// Counts one access and returns the destination URL.
    ///
    /// The increment is a single store operation, so concurrent redirects of
    /// the same code are never lost.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link has this code.
    pub async fn resolve_redirect(&self, code: &str) -> Result<String, AppError> {
        let url = self
            .repository
            .increment_access_count(code)
            .await?
            .ok_or_else(|| not_found(code))?;

        metrics::counter!("shortlinks_redirects_total").increment(1);
        debug!(code = %code, "Redirect counted");
        Ok(url)
    }

    /// Links with the highest access counts.
    pub async fn most_accessed(&self, limit: i64) -> Result<Vec<ShortLink>, AppError> {
        self.repository.list_most_accessed(limit.clamp(1, 1000)).await
    }

    /// Total number of stored links.
    pub async fn count(&self) -> Result<i64, AppError> {
        self.repository.count().await
    }

    /// Redirects served across all links.
    pub async fn total_accesses(&self) -> Result<i64, AppError> {
        self.repository.total_access_count().await
    }

    /// Checks that the store answers.
    pub async fn ping(&self) -> Result<(), AppError> {
        self.repository.ping().await
    }
}

/// Checks presence and shape of a destination URL.
fn validate_url(url: Option<String>) -> Result<String, AppError> {
    let url = url.ok_or_else(|| AppError::invalid(vec![URL_REQUIRED.to_string()]))?;
    check_destination(&url).map_err(|message| AppError::invalid(vec![message.to_string()]))?;
    Ok(url)
}

fn not_found(code: &str) -> AppError {
    AppError::not_found("Short link not found", json!({ "code": code }))
}
