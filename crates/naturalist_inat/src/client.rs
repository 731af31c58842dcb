//! iNaturalist HTTP client.

use crate::CatalogConfig;
use crate::params::{observation_params, taxa_params};
use async_trait::async_trait;
use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter as GovernorRateLimiter};
use naturalist_error::{CatalogError, CatalogErrorKind, ConfigError, ConfigErrorKind, NaturalistResult};
use naturalist_interface::{Catalog, ObservationQuery, ObservationRecord, TaxonMatch};
use reqwest::Client;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, instrument};

type DirectRateLimiter = GovernorRateLimiter<NotKeyed, InMemoryState, DefaultClock>;

/// Longest error body kept in a status error.
const MAX_ERROR_BODY: usize = 512;

/// One page of an iNaturalist list endpoint.
///
/// A missing or null `results` array is treated like an empty one.
#[derive(Debug, Deserialize)]
struct ResultsPage<T> {
    total_results: Option<u64>,
    results: Option<Vec<T>>,
}

impl<T> ResultsPage<T> {
    fn returned(&self) -> usize {
        self.results.as_ref().map_or(0, Vec::len)
    }

    fn first(self) -> Option<T> {
        self.results.unwrap_or_default().into_iter().next()
    }
}

/// Client for the public iNaturalist API.
///
/// Cheap to clone; clones share the connection pool and the rate limiter.
#[derive(Clone)]
pub struct INaturalistClient {
    client: Client,
    base_url: String,
    locale: Option<String>,
    limiter: Option<Arc<DirectRateLimiter>>,
}

impl std::fmt::Debug for INaturalistClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("INaturalistClient")
            .field("base_url", &self.base_url)
            .field("locale", &self.locale)
            .field("throttled", &self.limiter.is_some())
            .finish()
    }
}

impl INaturalistClient {
    /// Creates a new client from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// cannot be initialized.
    #[instrument(skip_all, fields(base_url = %config.base_url()))]
    pub fn new(config: &CatalogConfig) -> NaturalistResult<Self> {
        config.validate()?;

        let client = Client::builder()
            .user_agent(config.user_agent().as_str())
            .timeout(Duration::from_secs(*config.timeout_secs()))
            .build()
            .map_err(|e| {
                ConfigError::new(ConfigErrorKind::Load(format!(
                    "Failed to build HTTP client: {}",
                    e
                )))
            })?;

        let limiter = NonZeroU32::new(*config.requests_per_minute())
            .map(|n| Arc::new(GovernorRateLimiter::direct(Quota::per_minute(n))));

        debug!(
            throttled = limiter.is_some(),
            requests_per_minute = config.requests_per_minute(),
            "Created iNaturalist client"
        );

        Ok(Self {
            client,
            base_url: config.base_url().trim_end_matches('/').to_string(),
            locale: config.locale().clone(),
            limiter,
        })
    }

    /// Creates a client with default settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn with_defaults() -> NaturalistResult<Self> {
        Self::new(&CatalogConfig::default())
    }

    #[instrument(skip(self, params), fields(param_count = params.len()))]
    async fn get_page<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&'static str, String)],
    ) -> NaturalistResult<ResultsPage<T>> {
        if let Some(limiter) = &self.limiter {
            limiter.until_ready().await;
        }

        let url = format!("{}/{}", self.base_url, path);
        debug!(url = %url, "Sending iNaturalist API request");

        let response = self
            .client
            .get(&url)
            .query(params)
            .send()
            .await
            .map_err(|e| {
                CatalogError::new(CatalogErrorKind::Transport(format!("Request failed: {}", e)))
            })?;

        let status = response.status();
        let body = response.bytes().await.map_err(|e| {
            CatalogError::new(CatalogErrorKind::Transport(format!(
                "Failed to read response body: {}",
                e
            )))
        })?;

        if !status.is_success() {
            let text = String::from_utf8_lossy(&body);
            let truncated: String = text.chars().take(MAX_ERROR_BODY).collect();
            return Err(CatalogError::new(CatalogErrorKind::Status {
                status: status.as_u16(),
                body: truncated,
            })
            .into());
        }

        let page: ResultsPage<T> = serde_json::from_slice(&body)
            .map_err(|e| CatalogError::new(CatalogErrorKind::Decode(e.to_string())))?;
        debug!(
            total_results = page.total_results.unwrap_or(0),
            returned = page.returned(),
            "Received iNaturalist page"
        );
        Ok(page)
    }
}

#[async_trait]
impl Catalog for INaturalistClient {
    #[instrument(skip(self))]
    async fn resolve_taxon(&self, label: &str) -> NaturalistResult<Option<TaxonMatch>> {
        let params = taxa_params(label, self.locale.as_deref());
        let page: ResultsPage<TaxonMatch> = self.get_page("taxa", &params).await?;
        Ok(page.first())
    }

    #[instrument(
        skip(self, query),
        fields(
            taxon_id = ?query.taxon_id(),
            narrowed = query.taxon_name().is_some(),
            excluded_observations = query.not_id().len(),
            excluded_taxa = query.without_taxon_id().len()
        )
    )]
    async fn search_observations(
        &self,
        query: &ObservationQuery,
    ) -> NaturalistResult<Option<ObservationRecord>> {
        let params = observation_params(query, self.locale.as_deref());
        let page: ResultsPage<ObservationRecord> =
            self.get_page("observations", &params).await?;
        Ok(page.first())
    }

    fn catalog_name(&self) -> &'static str {
        "inaturalist"
    }
}
