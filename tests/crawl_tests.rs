//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and drive the full
//! crawl cycle end-to-end through the real HTTP fetcher.

use site_crawler::config::{Config, CrawlerConfig, HttpConfig, OutputConfig};
use site_crawler::output::{export_results, CrawlStatistics};
use site_crawler::{CrawlResult, Crawler};
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration with short timeouts
fn create_test_config(workers: usize, max_pages: usize) -> Config {
    Config {
        crawler: CrawlerConfig {
            workers,
            max_pages,
            same_domain: true,
        },
        http: HttpConfig {
            user_agent: "TestBot/1.0".to_string(),
            connect_timeout_secs: 2,
            timeout_secs: 5,
            max_redirects: 5,
        },
        output: OutputConfig::default(),
    }
}

/// Mounts an HTML page with the given title and anchors
async fn mount_page(server: &MockServer, page_path: &str, title: &str, links: &[&str]) {
    let anchors: String = links
        .iter()
        .map(|link| format!("<a href=\"{}\">link</a>\n", link))
        .collect();

    Mock::given(method("GET"))
        .and(path(page_path))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(format!(
                    "<html><head><title>{}</title></head><body>{}</body></html>",
                    title, anchors
                ))
                .insert_header("content-type", "text/html"),
        )
        .mount(server)
        .await;
}

async fn run_crawl(config: &Config, start_url: &str) -> Vec<CrawlResult> {
    let crawler = Crawler::new(config, start_url).expect("Failed to create crawler");
    tokio::time::timeout(Duration::from_secs(30), crawler.run())
        .await
        .expect("Crawl did not terminate")
        .expect("Crawl failed")
}

fn find<'a>(results: &'a [CrawlResult], url: &str) -> &'a CrawlResult {
    results
        .iter()
        .find(|r| r.url == url)
        .unwrap_or_else(|| panic!("No result for {}", url))
}

#[tokio::test]
async fn test_full_crawl_single_domain() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    let absolute = format!("{}/page2", base_url);
    mount_page(&mock_server, "/", "Home", &["/page1", &absolute]).await;
    mount_page(&mock_server, "/page1", "Page 1", &["/"]).await;
    mount_page(&mock_server, "/page2", "Page 2", &[]).await;

    let config = create_test_config(4, 100);
    let results = run_crawl(&config, &format!("{}/", base_url)).await;

    assert_eq!(results.len(), 3, "Expected 3 pages, got {:?}", results);

    let home = find(&results, &base_url);
    assert_eq!(home.status, 200);
    assert_eq!(home.title, "Home");
    assert_eq!(home.link_count, 2);

    let page1 = find(&results, &format!("{}/page1", base_url));
    assert_eq!(page1.title, "Page 1");
    assert_eq!(page1.referrer_url, base_url);

    assert_eq!(find(&results, &absolute).title, "Page 2");
}

#[tokio::test]
async fn test_http_error_status_recorded() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(&mock_server, "/", "Home", &["/missing"]).await;
    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_string("not found"))
        .mount(&mock_server)
        .await;

    let results = run_crawl(&create_test_config(2, 100), &base_url).await;

    let missing = find(&results, &format!("{}/missing", base_url));
    assert_eq!(missing.status, 404);
    assert!(missing.error.is_empty());
    assert!(missing.title.is_empty());

    let stats = CrawlStatistics::from_results(&results);
    assert_eq!(stats.http_errors, 1);
    assert_eq!(stats.successful, 1);
}

#[tokio::test]
async fn test_redirect_followed() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(&mock_server, "/", "Home", &["/old"]).await;
    Mock::given(method("GET"))
        .and(path("/old"))
        .respond_with(ResponseTemplate::new(301).insert_header("location", "/new"))
        .mount(&mock_server)
        .await;
    mount_page(&mock_server, "/new", "New Home", &[]).await;

    let results = run_crawl(&create_test_config(2, 100), &base_url).await;

    // The result is keyed by the URL that was queued, not the redirect target
    let old = find(&results, &format!("{}/old", base_url));
    assert_eq!(old.status, 200);
    assert_eq!(old.title, "New Home");
    assert_eq!(results.len(), 2);
}

#[tokio::test]
async fn test_off_domain_and_skipped_links_not_fetched() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();
    let port = url::Url::parse(&base_url)
        .expect("Failed to parse base URL")
        .port()
        .expect("Mock server URI has a port");

    // Same server, different host name: out of scope
    let off_domain = format!("http://localhost:{}/elsewhere", port);
    mount_page(
        &mock_server,
        "/",
        "Home",
        &[&off_domain, "mailto:someone@example.com", "javascript:void(0)"],
    )
    .await;

    Mock::given(method("GET"))
        .and(path("/elsewhere"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let results = run_crawl(&create_test_config(2, 100), &base_url).await;

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].link_count, 3);
}

#[tokio::test]
async fn test_duplicate_links_fetched_once() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(&mock_server, "/", "Home", &["/b", "/b/", "/b#section", "/c"]).await;
    mount_page(&mock_server, "/c", "C", &["/b", "/"]).await;

    Mock::given(method("GET"))
        .and(path("/b"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("<html><head><title>B</title></head></html>"),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let results = run_crawl(&create_test_config(4, 100), &base_url).await;

    assert_eq!(results.len(), 3);
    assert_eq!(find(&results, &base_url).link_count, 4);
}

#[tokio::test]
async fn test_connection_failure_recorded() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    // Same host, closed port: in scope but unreachable
    mount_page(&mock_server, "/", "Home", &["http://127.0.0.1:9/down", "/up"]).await;
    mount_page(&mock_server, "/up", "Up", &[]).await;

    let results = run_crawl(&create_test_config(2, 100), &base_url).await;

    assert_eq!(results.len(), 3);
    let down = find(&results, "http://127.0.0.1:9/down");
    assert_eq!(down.status, 0);
    assert!(!down.error.is_empty());
    assert_eq!(find(&results, &format!("{}/up", base_url)).status, 200);
}

#[tokio::test]
async fn test_page_budget_limits_crawl() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    let links: Vec<String> = (0..30).map(|i| format!("/p{}", i)).collect();
    let links: Vec<&str> = links.iter().map(String::as_str).collect();
    mount_page(&mock_server, "/", "Home", &links).await;
    for link in &links {
        mount_page(&mock_server, link, "Leaf", &[]).await;
    }

    let workers = 3;
    let max_pages = 5;
    let results = run_crawl(&create_test_config(workers, max_pages), &base_url).await;

    assert!(results.len() >= max_pages);
    assert!(results.len() <= max_pages + workers - 1);
}

#[tokio::test]
async fn test_crawl_then_export_csv() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(&mock_server, "/", "Home, Sweet \"Home\"", &["/a"]).await;
    mount_page(&mock_server, "/a", "A", &[]).await;

    let mut config = create_test_config(2, 100);
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    config.output.directory = dir.path().to_string_lossy().to_string();

    let results = run_crawl(&config, &base_url).await;
    let csv_path = export_results(&config.output, &results).expect("Export failed");

    assert!(csv_path.starts_with(dir.path()));
    let content = std::fs::read_to_string(&csv_path).expect("Failed to read CSV");
    let lines: Vec<&str> = content.lines().collect();

    assert_eq!(lines[0], "URL,Title,Status Code,Link Count,Error");
    assert_eq!(lines.len(), 3);
    assert!(content.contains(&format!("{},\"Home, Sweet \"\"Home\"\"\",200,1,", base_url)));
}
