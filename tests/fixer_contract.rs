//! Contract tests for the Fixer client over a canned transport.
//!
//! The transport records every outgoing request and replies from memory, so
//! URL shape, credential header injection, payload normalization, and error
//! mapping are all verified offline.

use std::collections::BTreeSet;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use fxstitch_core::{
    CurrencyCode, DateRange, FixerClient, HttpClient, HttpError, HttpRequest, HttpResponse,
    IsoDate, LatestRequest, Period, PeriodSpec, RateError, RateSource, TimeseriesAssembler,
    TimeseriesRequest,
};

/// Transport that records requests and replies with a fixed outcome.
struct CannedHttp {
    requests: Mutex<Vec<HttpRequest>>,
    reply: Result<HttpResponse, HttpError>,
}

impl CannedHttp {
    fn replying(reply: Result<HttpResponse, HttpError>) -> Arc<Self> {
        Arc::new(Self {
            requests: Mutex::new(Vec::new()),
            reply,
        })
    }

    fn ok_json(body: &str) -> Arc<Self> {
        Self::replying(Ok(HttpResponse::ok_json(body)))
    }

    fn recorded(&self) -> Vec<HttpRequest> {
        self.requests.lock().expect("canned lock").clone()
    }
}

impl HttpClient for CannedHttp {
    fn execute<'a>(
        &'a self,
        request: HttpRequest,
    ) -> Pin<Box<dyn Future<Output = Result<HttpResponse, HttpError>> + Send + 'a>> {
        self.requests.lock().expect("canned lock").push(request);
        let reply = self.reply.clone();
        Box::pin(async move { reply })
    }
}

/// Transport that fabricates a complete daily timeseries body from the
/// `start_date`/`end_date` query parameters of each request.
struct EchoTimeseriesHttp;

impl HttpClient for EchoTimeseriesHttp {
    fn execute<'a>(
        &'a self,
        request: HttpRequest,
    ) -> Pin<Box<dyn Future<Output = Result<HttpResponse, HttpError>> + Send + 'a>> {
        let start = query_param(&request.url, "start_date").expect("start_date present");
        let end = query_param(&request.url, "end_date").expect("end_date present");

        let mut entries = Vec::new();
        let mut day = IsoDate::parse(&start).expect("valid start");
        let last = IsoDate::parse(&end).expect("valid end");
        while day <= last {
            entries.push(format!(r#""{day}": {{"EUR": 1.17}}"#));
            day = IsoDate::from_date(day.into_inner().next_day().expect("in range"));
        }

        let body = format!(
            r#"{{"start_date": "{start}", "end_date": "{end}", "rates": {{{}}}}}"#,
            entries.join(",")
        );
        Box::pin(async move { Ok(HttpResponse::ok_json(body)) })
    }
}

fn query_param(url: &str, name: &str) -> Option<String> {
    let (_, query) = url.split_once('?')?;
    query.split('&').find_map(|pair| {
        let (key, value) = pair.split_once('=')?;
        (key == name).then(|| value.to_owned())
    })
}

fn code(s: &str) -> CurrencyCode {
    CurrencyCode::parse(s).expect("valid code")
}

fn targets() -> BTreeSet<CurrencyCode> {
    BTreeSet::from([code("EUR"), code("USD")])
}

fn client(http: Arc<dyn HttpClient>) -> FixerClient {
    FixerClient::with_http_client(http, "test-key").with_base_url("https://fixer.test")
}

#[tokio::test]
async fn symbols_call_carries_the_api_key_header() {
    let http = CannedHttp::ok_json(r#"{"success": true, "symbols": {"EUR": "Euro"}}"#);
    let directory = client(http.clone())
        .symbols()
        .await
        .expect("must parse");

    assert_eq!(directory.len(), 1);
    assert_eq!(
        directory.symbols.get(&code("EUR")).map(String::as_str),
        Some("Euro")
    );

    let requests = http.recorded();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].url, "https://fixer.test/symbols");
    assert_eq!(
        requests[0].headers.get("apikey").map(String::as_str),
        Some("test-key")
    );
}

#[tokio::test]
async fn latest_call_normalizes_the_snapshot_payload() {
    let http = CannedHttp::ok_json(
        r#"{"success": true, "base": "GBP", "timestamp": 1650000000,
            "rates": {"EUR": 1.17, "USD": 1.30}}"#,
    );
    let request = LatestRequest::new(code("GBP"), targets()).expect("valid request");
    let snapshot = client(http.clone()).latest(request).await.expect("must parse");

    assert_eq!(snapshot.base, code("GBP"));
    assert_eq!(snapshot.timestamp, 1_650_000_000);
    assert_eq!(snapshot.rates.get(&code("USD")), Some(&1.30));

    let url = &http.recorded()[0].url;
    assert_eq!(url, "https://fixer.test/latest?symbols=EUR%2CUSD&base=GBP");
}

#[tokio::test]
async fn timeseries_call_sends_window_bounds_and_normalizes_dates() {
    let http = CannedHttp::ok_json(
        r#"{"start_date": "2021-03-01", "end_date": "2021-03-02",
            "rates": {"2021-03-01": {"EUR": 1.16}, "2021-03-02": {"EUR": 1.17}}}"#,
    );
    let window = DateRange::new(
        IsoDate::parse("2021-03-01").expect("valid"),
        IsoDate::parse("2021-03-02").expect("valid"),
    )
    .expect("valid range");
    let request = TimeseriesRequest::new(window, code("GBP"), targets()).expect("valid request");

    let series = client(http.clone())
        .timeseries(request)
        .await
        .expect("must parse");

    assert_eq!(series.rates.len(), 2);
    let first = series
        .rates
        .get(&IsoDate::parse("2021-03-01").expect("valid"))
        .expect("present");
    assert_eq!(first.get(&code("EUR")), Some(&1.16));

    let url = &http.recorded()[0].url;
    assert_eq!(
        url,
        "https://fixer.test/timeseries?symbols=EUR%2CUSD&base=GBP\
         &start_date=2021-03-01&end_date=2021-03-02"
    );
}

#[tokio::test]
async fn non_success_status_surfaces_as_upstream_error() {
    let http = CannedHttp::replying(Ok(HttpResponse::status_only(429)));
    let err = client(http).symbols().await.expect_err("must fail");
    assert_eq!(err, RateError::Upstream { status: 429 });
}

#[tokio::test]
async fn malformed_payload_surfaces_as_decode_error() {
    let http = CannedHttp::ok_json(r#"{"symbols": "not-a-map"}"#);
    let err = client(http).symbols().await.expect_err("must fail");
    assert!(matches!(err, RateError::Decode { .. }));
}

#[tokio::test]
async fn transport_failure_surfaces_as_transport_error() {
    let http = CannedHttp::replying(Err(HttpError::timeout("request timeout: deadline elapsed")));
    let err = client(http).symbols().await.expect_err("must fail");
    assert!(matches!(err, RateError::Transport { .. }));
}

#[tokio::test]
async fn assembler_stitches_through_the_real_client() {
    let fixer = client(Arc::new(EchoTimeseriesHttp));
    let assembler = TimeseriesAssembler::new(Arc::new(fixer))
        .with_today(IsoDate::parse("2022-03-01").expect("valid"));

    let series = assembler
        .get_timeseries(
            &PeriodSpec::Relative(Period::TwoYears),
            code("GBP"),
            BTreeSet::from([code("EUR")]),
        )
        .await
        .expect("must assemble");

    assert_eq!(series.start_date, IsoDate::parse("2020-03-01").expect("valid"));
    assert_eq!(series.end_date, IsoDate::parse("2022-03-01").expect("valid"));
    // Two one-year windows sharing one boundary date.
    assert_eq!(series.rates.len(), 731);
}
