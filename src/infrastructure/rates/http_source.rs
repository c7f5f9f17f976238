//! # HTTP Exchange Rate Source
//!
//! Fetches spot rates from a JSON rates API.
//!
//! The source issues `GET {base_url}/latest?base=XXX` and expects
//!
//! ```text
//! {"base": "USD", "rates": {"EUR": 0.91, "GBP": 0.78}}
//! ```
//!
//! Transient failures (timeouts, connection errors, HTTP 429 and 5xx) are
//! retried up to `max_retries` times with linear backoff.
//!
//! # Examples
//!
//! ```ignore
//! use remit_rank::infrastructure::rates::http_source::HttpExchangeRateSource;
//!
//! let source = HttpExchangeRateSource::new("https://rates.example.com", 5000)?
//!     .with_retries(2, 200);
//! let table = source.latest(&"USD".parse()?).await?;
//! ```

use crate::domain::value_objects::currency::CurrencyCode;
use crate::infrastructure::rates::error::{RateResult, RateSourceError};
use crate::infrastructure::rates::traits::{ExchangeRateSource, RateTable};
use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::time::Duration;

/// Wire shape of the `latest` endpoint.
#[derive(Debug, Deserialize)]
struct LatestRatesResponse {
    base: String,
    rates: BTreeMap<String, Decimal>,
}

/// HTTP-backed [`ExchangeRateSource`].
#[derive(Debug, Clone)]
pub struct HttpExchangeRateSource {
    /// Inner reqwest client.
    client: Client,
    /// API root without trailing slash.
    base_url: String,
    /// Request timeout in milliseconds.
    timeout_ms: u64,
    /// Retries after the first attempt.
    max_retries: u32,
    /// Delay unit between attempts.
    retry_backoff: Duration,
}

impl HttpExchangeRateSource {
    /// Creates a source with the specified request timeout and no retries.
    ///
    /// # Errors
    ///
    /// Returns `RateSourceError::Internal` if the client cannot be created.
    pub fn new(base_url: impl Into<String>, timeout_ms: u64) -> RateResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_millis(timeout_ms))
            .build()
            .map_err(|e| RateSourceError::internal(format!("Failed to create HTTP client: {e}")))?;

        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self {
            client,
            base_url,
            timeout_ms,
            max_retries: 0,
            retry_backoff: Duration::ZERO,
        })
    }

    /// Sets the retry policy.
    ///
    /// Attempt `n` (1-based) of a retry waits `n × backoff_ms`.
    #[must_use]
    pub fn with_retries(mut self, max_retries: u32, backoff_ms: u64) -> Self {
        self.max_retries = max_retries;
        self.retry_backoff = Duration::from_millis(backoff_ms);
        self
    }

    /// Returns the configured timeout in milliseconds.
    #[inline]
    #[must_use]
    pub fn timeout_ms(&self) -> u64 {
        self.timeout_ms
    }

    /// Returns the configured retry count.
    #[inline]
    #[must_use]
    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }

    /// Returns the API root.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn fetch_once(&self, base: &CurrencyCode) -> RateResult<RateTable> {
        let url = format!("{}/latest", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[("base", base.as_str())])
            .send()
            .await
            .map_err(|e| self.map_reqwest_error(e))?;

        let body: LatestRatesResponse = self.handle_response(response).await?;
        into_table(body, base)
    }

    /// Handles the HTTP response, checking status and deserializing JSON.
    async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        response: Response,
    ) -> RateResult<T> {
        let status = response.status();

        if status.is_success() {
            response
                .json::<T>()
                .await
                .map_err(|e| RateSourceError::protocol(format!("Failed to parse response: {e}")))
        } else {
            let error_body = response.text().await.unwrap_or_default();
            Err(map_status_error(status, &error_body))
        }
    }

    /// Maps a reqwest error to a RateSourceError.
    fn map_reqwest_error(&self, error: reqwest::Error) -> RateSourceError {
        if error.is_timeout() {
            RateSourceError::timeout_with_duration("Request timed out", self.timeout_ms)
        } else if error.is_connect() {
            RateSourceError::connection(format!("Connection failed: {error}"))
        } else {
            RateSourceError::connection(format!("HTTP request failed: {error}"))
        }
    }
}

/// Maps an HTTP status code to a RateSourceError.
fn map_status_error(status: StatusCode, body: &str) -> RateSourceError {
    match status {
        StatusCode::TOO_MANY_REQUESTS => RateSourceError::rate_limited("Rate limit exceeded"),
        _ => RateSourceError::http_status(status.as_u16(), body),
    }
}

fn into_table(body: LatestRatesResponse, requested: &CurrencyCode) -> RateResult<RateTable> {
    let base = CurrencyCode::new(&body.base)
        .map_err(|e| RateSourceError::protocol(format!("bad base currency: {e}")))?;
    if base != *requested {
        return Err(RateSourceError::protocol(format!(
            "asked for base {requested}, got {base}"
        )));
    }

    let mut rates = BTreeMap::new();
    for (code, rate) in body.rates {
        match CurrencyCode::new(&code) {
            Ok(code) => {
                rates.insert(code, rate);
            }
            Err(_) => tracing::debug!(code = %code, "skipping malformed currency code"),
        }
    }
    Ok(RateTable::new(base, rates))
}

#[async_trait]
impl ExchangeRateSource for HttpExchangeRateSource {
    async fn latest(&self, base: &CurrencyCode) -> RateResult<RateTable> {
        let mut attempt: u32 = 0;
        loop {
            match self.fetch_once(base).await {
                Ok(table) => {
                    tracing::debug!(base = %base, rates = table.len(), attempt, "fetched rates");
                    return Ok(table);
                }
                Err(e) if e.is_retryable() && attempt < self.max_retries => {
                    attempt += 1;
                    let delay = self.retry_backoff.saturating_mul(attempt);
                    tracing::warn!(
                        error = %e,
                        base = %base,
                        attempt,
                        delay_ms = delay.as_millis() as u64,
                        "rate fetch failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(e) => return Err(e),
            }
        }
    }

    fn name(&self) -> &'static str {
        "http"
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn new_source() {
        let source = HttpExchangeRateSource::new("http://localhost:1/", 5000).unwrap();
        assert_eq!(source.timeout_ms(), 5000);
        assert_eq!(source.max_retries(), 0);
        assert_eq!(source.base_url(), "http://localhost:1");
    }

    #[test]
    fn with_retries() {
        let source = HttpExchangeRateSource::new("http://localhost:1", 100)
            .unwrap()
            .with_retries(3, 50);
        assert_eq!(source.max_retries(), 3);
    }

    #[test]
    fn status_mapping() {
        assert!(map_status_error(StatusCode::TOO_MANY_REQUESTS, "").is_retryable());
        assert!(map_status_error(StatusCode::SERVICE_UNAVAILABLE, "").is_retryable());
        assert!(!map_status_error(StatusCode::NOT_FOUND, "").is_retryable());
        assert!(!map_status_error(StatusCode::BAD_REQUEST, "").is_retryable());
    }

    #[test]
    fn into_table_skips_bad_codes() {
        let body = LatestRatesResponse {
            base: "usd".to_string(),
            rates: BTreeMap::from([
                ("EUR".to_string(), Decimal::new(91, 2)),
                ("EURO".to_string(), Decimal::ONE),
            ]),
        };
        let usd = CurrencyCode::new("USD").unwrap();
        let table = into_table(body, &usd).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.base, usd);
    }

    #[test]
    fn into_table_rejects_wrong_base() {
        let body = LatestRatesResponse {
            base: "GBP".to_string(),
            rates: BTreeMap::new(),
        };
        let err = into_table(body, &CurrencyCode::new("USD").unwrap()).unwrap_err();
        assert!(matches!(err, RateSourceError::Protocol { .. }));
    }
}
