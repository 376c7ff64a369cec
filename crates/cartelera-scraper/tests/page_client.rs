//! Integration tests for `PageClient` and the crawl loop.
//!
//! Uses `wiremock` to stand up a local HTTP server per test so no real
//! network traffic is made.

use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use cartelera_scraper::{crawl_urls, CrawlOptions, PageClient, ScraperError, SelectorConfig};

fn test_client() -> PageClient {
    PageClient::new(5, "cartelera-test/0.1").expect("failed to build test PageClient")
}

fn no_delay_options() -> CrawlOptions {
    CrawlOptions {
        delay_min_ms: 0,
        delay_max_ms: 0,
        fallback_image_cap: 20,
    }
}

const LISTING_PAGE: &str = r#"
    <html><body>
        <div class="pelicula"><h2>Matrix</h2><a href="/ver/matrix">Ver</a></div>
        <div class="pelicula"><h2>Dune</h2><a href="/ver/dune">Ver</a></div>
    </body></html>
"#;

#[tokio::test]
async fn fetch_page_returns_body_on_success() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/estrenos"))
        .respond_with(ResponseTemplate::new(200).set_body_string(LISTING_PAGE))
        .mount(&server)
        .await;

    let body = test_client()
        .fetch_page(&format!("{}/estrenos", server.uri()))
        .await
        .expect("fetch should succeed");
    assert!(body.contains("Matrix"));
}

#[tokio::test]
async fn fetch_page_sends_configured_user_agent() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .and(header("user-agent", "cartelera-test/0.1"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html></html>"))
        .expect(1)
        .mount(&server)
        .await;

    let result = test_client().fetch_page(&server.uri()).await;
    assert!(result.is_ok(), "expected Ok, got: {result:?}");
}

#[tokio::test]
async fn fetch_page_maps_404_to_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let result = test_client().fetch_page(&server.uri()).await;
    assert!(matches!(result, Err(ScraperError::NotFound { .. })));
}

#[tokio::test]
async fn fetch_page_maps_other_statuses_to_unexpected_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let result = test_client().fetch_page(&server.uri()).await;
    assert!(
        matches!(result, Err(ScraperError::UnexpectedStatus { status: 503, .. })),
        "expected UnexpectedStatus(503), got: {result:?}"
    );
}

#[tokio::test]
async fn crawl_extracts_listings_from_fetched_pages() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/estrenos"))
        .respond_with(ResponseTemplate::new(200).set_body_string(LISTING_PAGE))
        .mount(&server)
        .await;

    let urls = vec![format!("{}/estrenos", server.uri())];
    let listings = crawl_urls(
        &test_client(),
        &urls,
        &SelectorConfig::default(),
        &no_delay_options(),
    )
    .await;

    assert_eq!(listings.len(), 2);
    assert_eq!(listings[0].titulo, "Matrix");
    assert_eq!(listings[1].titulo, "Dune");
    assert_eq!(listings[0].url_origen, urls[0]);
}

#[tokio::test]
async fn crawl_skips_failing_urls_and_continues() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/caida"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/estrenos"))
        .respond_with(ResponseTemplate::new(200).set_body_string(LISTING_PAGE))
        .mount(&server)
        .await;

    let urls = vec![
        format!("{}/caida", server.uri()),
        format!("{}/estrenos", server.uri()),
    ];
    let listings = crawl_urls(
        &test_client(),
        &urls,
        &SelectorConfig::default(),
        &no_delay_options(),
    )
    .await;

    assert_eq!(
        listings.len(),
        2,
        "the failing URL must contribute zero records without aborting the run"
    );
}

#[tokio::test]
async fn crawl_of_empty_page_yields_no_records() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string("<html><body>vacío</body></html>"),
        )
        .mount(&server)
        .await;

    let urls = vec![server.uri()];
    let listings = crawl_urls(
        &test_client(),
        &urls,
        &SelectorConfig::default(),
        &no_delay_options(),
    )
    .await;
    assert!(listings.is_empty());
}
