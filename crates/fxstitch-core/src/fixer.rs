use std::collections::{BTreeMap, BTreeSet};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use serde::Deserialize;

use crate::config::Config;
use crate::domain::{CurrencyCode, IsoDate, RateSnapshot, SymbolDirectory, TimeseriesResult};
use crate::error::RateError;
use crate::http_client::{HttpAuth, HttpClient, HttpRequest, ReqwestHttpClient, DEFAULT_TIMEOUT_MS};
use crate::source::{LatestRequest, RateSource, TimeseriesRequest};

pub const FIXER_BASE_URL: &str = "https://api.apilayer.com/fixer";

/// Header carrying the Fixer credential.
const API_KEY_HEADER: &str = "apikey";

/// Authenticated read-only client for the Fixer pricing API.
///
/// Three endpoints: symbol directory, latest snapshot, and a single bounded
/// (≤365-day) timeseries window. Anything wider belongs to
/// [`TimeseriesAssembler`](crate::assembler::TimeseriesAssembler).
#[derive(Clone)]
pub struct FixerClient {
    http_client: Arc<dyn HttpClient>,
    api_key: String,
    base_url: String,
    timeout_ms: u64,
}

impl FixerClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            http_client: Arc::new(ReqwestHttpClient::new()),
            api_key: api_key.into(),
            base_url: String::from(FIXER_BASE_URL),
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self {
            http_client: Arc::new(ReqwestHttpClient::new()),
            api_key: config.api_key.clone(),
            base_url: config.base_url.clone(),
            timeout_ms: config.timeout_ms,
        }
    }

    /// Swap the transport, keeping everything else. Used to inject canned
    /// responses in tests.
    pub fn with_http_client(http_client: Arc<dyn HttpClient>, api_key: impl Into<String>) -> Self {
        Self {
            http_client,
            ..Self::new(api_key)
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    fn endpoint(&self, path: &str, query: &[(&str, String)]) -> String {
        let mut url = format!("{}/{path}", self.base_url);
        for (index, (name, value)) in query.iter().enumerate() {
            let sep = if index == 0 { '?' } else { '&' };
            url.push(sep);
            url.push_str(name);
            url.push('=');
            url.push_str(&urlencoding::encode(value));
        }
        url
    }

    async fn execute(&self, url: String) -> Result<String, RateError> {
        let request = HttpRequest::get(url)
            .with_auth(&HttpAuth::api_key(API_KEY_HEADER, &self.api_key))
            .with_timeout_ms(self.timeout_ms);

        let response = self
            .http_client
            .execute(request)
            .await
            .map_err(|error| RateError::transport(error.message()))?;

        if !response.is_success() {
            return Err(RateError::Upstream {
                status: response.status,
            });
        }

        Ok(response.body)
    }
}

impl RateSource for FixerClient {
    fn symbols<'a>(
        &'a self,
    ) -> Pin<Box<dyn Future<Output = Result<SymbolDirectory, RateError>> + Send + 'a>> {
        Box::pin(async move {
            let body = self.execute(self.endpoint("symbols", &[])).await?;
            let payload: SymbolsPayload =
                serde_json::from_str(&body).map_err(|e| RateError::decode(e.to_string()))?;
            normalize_symbols(payload)
        })
    }

    fn latest<'a>(
        &'a self,
        req: LatestRequest,
    ) -> Pin<Box<dyn Future<Output = Result<RateSnapshot, RateError>> + Send + 'a>> {
        Box::pin(async move {
            let url = self.endpoint(
                "latest",
                &[
                    ("symbols", join_symbols(&req.symbols)),
                    ("base", req.base.as_str().to_owned()),
                ],
            );
            let body = self.execute(url).await?;
            let payload: LatestPayload =
                serde_json::from_str(&body).map_err(|e| RateError::decode(e.to_string()))?;
            normalize_latest(payload)
        })
    }

    fn timeseries<'a>(
        &'a self,
        req: TimeseriesRequest,
    ) -> Pin<Box<dyn Future<Output = Result<TimeseriesResult, RateError>> + Send + 'a>> {
        Box::pin(async move {
            let url = self.endpoint(
                "timeseries",
                &[
                    ("symbols", join_symbols(&req.symbols)),
                    ("base", req.base.as_str().to_owned()),
                    ("start_date", req.window.start.format_iso()),
                    ("end_date", req.window.end.format_iso()),
                ],
            );
            let body = self.execute(url).await?;
            let payload: TimeseriesPayload =
                serde_json::from_str(&body).map_err(|e| RateError::decode(e.to_string()))?;
            normalize_timeseries(payload)
        })
    }
}

fn join_symbols(symbols: &BTreeSet<CurrencyCode>) -> String {
    symbols
        .iter()
        .map(CurrencyCode::as_str)
        .collect::<Vec<_>>()
        .join(",")
}

#[derive(Debug, Deserialize)]
struct SymbolsPayload {
    symbols: BTreeMap<String, String>,
}

#[derive(Debug, Deserialize)]
struct LatestPayload {
    base: String,
    timestamp: i64,
    rates: BTreeMap<String, f64>,
}

#[derive(Debug, Deserialize)]
struct TimeseriesPayload {
    start_date: String,
    end_date: String,
    rates: BTreeMap<String, BTreeMap<String, f64>>,
}

fn normalize_symbols(payload: SymbolsPayload) -> Result<SymbolDirectory, RateError> {
    let symbols = payload
        .symbols
        .into_iter()
        .map(|(code, name)| Ok((parse_code(&code)?, name)))
        .collect::<Result<BTreeMap<_, _>, RateError>>()?;
    Ok(SymbolDirectory { symbols })
}

fn normalize_latest(payload: LatestPayload) -> Result<RateSnapshot, RateError> {
    Ok(RateSnapshot {
        base: parse_code(&payload.base)?,
        timestamp: payload.timestamp,
        rates: normalize_rate_map(payload.rates)?,
    })
}

fn normalize_timeseries(payload: TimeseriesPayload) -> Result<TimeseriesResult, RateError> {
    let rates = payload
        .rates
        .into_iter()
        .map(|(date, rates)| Ok((parse_date(&date)?, normalize_rate_map(rates)?)))
        .collect::<Result<BTreeMap<_, _>, RateError>>()?;

    Ok(TimeseriesResult {
        start_date: parse_date(&payload.start_date)?,
        end_date: parse_date(&payload.end_date)?,
        rates,
    })
}

fn normalize_rate_map(
    rates: BTreeMap<String, f64>,
) -> Result<BTreeMap<CurrencyCode, f64>, RateError> {
    rates
        .into_iter()
        .map(|(code, rate)| Ok((parse_code(&code)?, rate)))
        .collect()
}

// Upstream payload mistakes are decode errors, not caller mistakes.
fn parse_code(value: &str) -> Result<CurrencyCode, RateError> {
    CurrencyCode::parse(value).map_err(|e| RateError::decode(e.to_string()))
}

fn parse_date(value: &str) -> Result<IsoDate, RateError> {
    IsoDate::parse(value).map_err(|e| RateError::decode(e.to_string()))
}
