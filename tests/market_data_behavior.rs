//! Behavior-driven tests for the aggregates client.
//!
//! These tests pin the unified fetch contract: every outcome is a tagged
//! result with one error shape across both endpoints.

use tickdeck_core::{parse_iso_date, HttpAuth, MarketDataClient, MarketDataError, Ticker};
use tickdeck_tests::{Arc, StubHttpClient};

const PREV_BODY: &str = r#"{
    "ticker": "AAPL",
    "queryCount": 1,
    "results": [
        {"t": 1704067200000, "o": 187.0, "h": 189.5, "l": 186.2, "c": 188.1, "v": 52000000.0}
    ]
}"#;

fn client(http: Arc<StubHttpClient>) -> MarketDataClient {
    MarketDataClient::new(http, HttpAuth::BearerToken(String::from("key-123")))
        .with_base_url("https://aggs.test")
}

#[tokio::test]
async fn when_the_upstream_returns_bars_they_are_normalized_into_domain_types() {
    // Given: An upstream serving a previous-close document
    let http = Arc::new(StubHttpClient::with_body(PREV_BODY));
    let ticker = Ticker::parse("aapl").expect("valid ticker");

    // When: The previous close is fetched
    let window = client(http.clone())
        .previous_close(&ticker)
        .await
        .expect("fetch should succeed");

    // Then: Short wire fields become validated domain bars
    assert_eq!(window.ticker.as_str(), "AAPL");
    assert_eq!(window.bars.len(), 1);
    let bar = &window.bars[0];
    assert_eq!(bar.open, 187.0);
    assert_eq!(bar.close, 188.1);
    assert_eq!(bar.volume, Some(52_000_000));
    assert_eq!(bar.ts.format_rfc3339(), "2024-01-01T00:00:00Z");

    // And: The request carried the bearer token to the expected URL
    let requests = http.recorded_requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].url, "https://aggs.test/v2/aggs/ticker/AAPL/prev");
    assert_eq!(
        requests[0].headers.get("authorization").map(String::as_str),
        Some("Bearer key-123")
    );
}

#[tokio::test]
async fn range_requests_share_the_same_contract_and_url_scheme() {
    let http = Arc::new(StubHttpClient::with_body(r#"{"results": []}"#));
    let ticker = Ticker::parse("MSFT").expect("valid ticker");
    let from = parse_iso_date("2024-01-02").expect("valid date");
    let to = parse_iso_date("2024-01-31").expect("valid date");

    let window = client(http.clone())
        .range(&ticker, from, to)
        .await
        .expect("fetch should succeed");
    assert!(window.bars.is_empty());

    let requests = http.recorded_requests();
    assert_eq!(
        requests[0].url,
        "https://aggs.test/v2/aggs/ticker/MSFT/range/1/day/2024-01-02/2024-01-31"
    );
}

#[tokio::test]
async fn when_the_upstream_rejects_the_call_the_error_carries_status_and_body() {
    // Given: An upstream returning 403 with an explanatory body
    let http = Arc::new(StubHttpClient::with_status(403, "unknown api key"));
    let ticker = Ticker::parse("AAPL").expect("valid ticker");

    // When: The previous close is fetched
    let err = client(http)
        .previous_close(&ticker)
        .await
        .expect_err("must fail");

    // Then: The failure is a tagged result, not a null or a panic
    match err {
        MarketDataError::Status { status, body } => {
            assert_eq!(status, 403);
            assert_eq!(body, "unknown api key");
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn when_the_transport_fails_the_error_is_tagged_the_same_way() {
    let http = Arc::new(StubHttpClient::failing("connection refused"));
    let ticker = Ticker::parse("AAPL").expect("valid ticker");

    let err = client(http)
        .previous_close(&ticker)
        .await
        .expect_err("must fail");
    assert!(matches!(err, MarketDataError::Transport(_)));
}

#[tokio::test]
async fn when_the_body_is_not_json_the_error_is_a_decode_failure() {
    let http = Arc::new(StubHttpClient::with_body("<html>rate limited</html>"));
    let ticker = Ticker::parse("AAPL").expect("valid ticker");

    let err = client(http)
        .previous_close(&ticker)
        .await
        .expect_err("must fail");
    assert!(matches!(err, MarketDataError::Decode(_)));
}

#[tokio::test]
async fn a_document_without_results_is_an_empty_window_not_an_error() {
    let http = Arc::new(StubHttpClient::with_body(
        r#"{"ticker": "AAPL", "status": "OK", "resultsCount": 0}"#,
    ));
    let ticker = Ticker::parse("AAPL").expect("valid ticker");

    let window = client(http)
        .previous_close(&ticker)
        .await
        .expect("fetch should succeed");
    assert!(window.bars.is_empty());
}
