//! Monetization backend boundary.
//!
//! The catalog fetch is the only suspension point of a turn. It runs under a
//! per-attempt deadline and is retried at most once so a slow backend never
//! holds the turn open.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use tracing::{debug, warn};

use premium_hello_core::{Locale, SkillError};

use crate::catalog::ProductCatalog;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// The backend could not be reached or answered with an error.
    #[error("catalog service unavailable: {0}")]
    Unavailable(String),

    #[error("catalog fetch timed out after {0:?}")]
    Timeout(Duration),

    /// The backend document could not be parsed.
    #[error("malformed catalog: {0}")]
    Malformed(String),

    /// The backend reported two products for the same known reference name.
    #[error("duplicate product for reference name '{0}'")]
    DuplicateReference(String),
}

impl CatalogError {
    pub fn is_transient(&self) -> bool {
        matches!(self, CatalogError::Unavailable(_) | CatalogError::Timeout(_))
    }
}

impl From<CatalogError> for SkillError {
    fn from(value: CatalogError) -> Self {
        match value {
            CatalogError::Timeout(d) => SkillError::Timeout(d),
            other => SkillError::service(other.to_string()),
        }
    }
}

/// Source of per-user product snapshots (`listProducts(locale)`).
#[async_trait]
pub trait CatalogService: Send + Sync {
    async fn list_products(&self, locale: &Locale) -> Result<ProductCatalog, CatalogError>;
}

#[async_trait]
impl<T> CatalogService for Arc<T>
where
    T: CatalogService + ?Sized,
{
    async fn list_products(&self, locale: &Locale) -> Result<ProductCatalog, CatalogError> {
        (**self).list_products(locale).await
    }
}

/// In-memory catalog service for tests/dev.
///
/// Snapshots are keyed by the exact locale tag; unknown locales get the
/// default snapshot.
#[derive(Debug, Default)]
pub struct InMemoryCatalogService {
    by_locale: Mutex<HashMap<String, ProductCatalog>>,
    default: Mutex<ProductCatalog>,
    calls: AtomicUsize,
}

impl InMemoryCatalogService {
    pub fn new(default: ProductCatalog) -> Self {
        Self {
            default: Mutex::new(default),
            ..Self::default()
        }
    }

    pub fn set_default(&self, catalog: ProductCatalog) {
        if let Ok(mut slot) = self.default.lock() {
            *slot = catalog;
        }
    }

    pub fn set_for_locale(&self, locale: &Locale, catalog: ProductCatalog) {
        if let Ok(mut map) = self.by_locale.lock() {
            map.insert(locale.as_str().to_string(), catalog);
        }
    }

    /// Number of `list_products` calls served so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CatalogService for InMemoryCatalogService {
    async fn list_products(&self, locale: &Locale) -> Result<ProductCatalog, CatalogError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let by_locale = self
            .by_locale
            .lock()
            .map_err(|_| CatalogError::Unavailable("catalog lock poisoned".to_string()))?;
        if let Some(catalog) = by_locale.get(locale.as_str()) {
            return Ok(catalog.clone());
        }
        drop(by_locale);

        self.default
            .lock()
            .map(|catalog| catalog.clone())
            .map_err(|_| CatalogError::Unavailable("catalog lock poisoned".to_string()))
    }
}

/// Deadline and retry budget for one catalog fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchPolicy {
    timeout: Duration,
    max_retries: u32,
}

impl FetchPolicy {
    /// Upper bound on retries regardless of configuration.
    pub const MAX_RETRIES: u32 = 1;
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(2000);

    pub fn new(timeout: Duration, max_retries: u32) -> Self {
        Self {
            timeout,
            max_retries: max_retries.min(Self::MAX_RETRIES),
        }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }
}

impl Default for FetchPolicy {
    fn default() -> Self {
        Self::new(Self::DEFAULT_TIMEOUT, Self::MAX_RETRIES)
    }
}

/// Fetch a catalog snapshot under `policy`.
///
/// Only transient failures (unavailable, timeout) are retried.
pub async fn fetch_catalog<S>(
    service: &S,
    locale: &Locale,
    policy: FetchPolicy,
) -> Result<ProductCatalog, CatalogError>
where
    S: CatalogService + ?Sized,
{
    let attempts = policy.max_retries + 1;
    let mut last_error = CatalogError::Unavailable("no attempt made".to_string());

    for attempt in 1..=attempts {
        let outcome = tokio::time::timeout(policy.timeout, service.list_products(locale)).await;
        let error = match outcome {
            Ok(Ok(catalog)) => {
                debug!(%locale, attempt, products = catalog.len(), "catalog fetched");
                return Ok(catalog);
            }
            Ok(Err(e)) => e,
            Err(_) => CatalogError::Timeout(policy.timeout),
        };

        warn!(%locale, attempt, error = %error, "catalog fetch failed");
        if !error.is_transient() {
            return Err(error);
        }
        last_error = error;
    }

    Err(last_error)
}
