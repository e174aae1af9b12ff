//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and run complete
//! crawls into a temporary JSON Lines file.

use paragraph_crawl::config::Config;
use paragraph_crawl::crawler::{run_crawl, FetchError, HttpFetcher, PageFetcher};
use paragraph_crawl::output::PageRecord;
use paragraph_crawl::CrawlError;
use std::path::Path;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration that allows only the mock server's host
fn create_test_config(seeds: Vec<String>, output_path: &Path) -> Config {
    let mut config = Config::default();
    config.crawler.allowed_domains = vec!["127.0.0.1".to_string()];
    config.crawler.seeds = seeds;
    config.crawler.request_timeout_secs = 5;
    config.crawler.connect_timeout_secs = 2;
    config.output.path = output_path.to_string_lossy().into_owned();
    config
}

/// Mounts an HTML page at `page_path`
async fn mount_page(server: &MockServer, page_path: &str, body: &str) {
    Mock::given(method("GET"))
        .and(path(page_path))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body)
                .insert_header("content-type", "text/html; charset=utf-8"),
        )
        .mount(server)
        .await;
}

/// Reads the output file and parses every line independently
fn read_records(output: &Path) -> Vec<PageRecord> {
    std::fs::read_to_string(output)
        .expect("Failed to read output")
        .lines()
        .map(|line| serde_json::from_str(line).expect("Line is not a valid record"))
        .collect()
}

#[tokio::test]
async fn test_single_page_exact_output() {
    let mock_server = MockServer::start().await;
    mount_page(
        &mock_server,
        "/a",
        "<html><head><title>A</title></head><body><p>Hello world</p></body></html>",
    )
    .await;

    let dir = TempDir::new().unwrap();
    let output = dir.path().join("results.jl");
    let url = format!("{}/a", mock_server.uri());
    let config = create_test_config(vec![url.clone()], &output);

    let report = run_crawl(&config).await.expect("Crawl failed");
    assert_eq!(report.written, 1);

    let content = std::fs::read_to_string(&output).unwrap();
    assert_eq!(
        content,
        format!("{{\"url\":\"{}\",\"text\":\"Hello world\\n\"}}\n", url)
    );
}

#[tokio::test]
async fn test_full_crawl_multiple_pages() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/wiki/Robotics",
        r#"<html><body>
            <p>Robotics is the interdisciplinary study of robots.</p>
            <p>A <a href="/wiki/Robot">robot</a> is a machine.</p>
            <a href="/wiki/Other">not followed</a>
        </body></html>"#,
    )
    .await;
    mount_page(
        &mock_server,
        "/wiki/Robot",
        "<html><body><p>Robots can be guided by an external control device.</p></body></html>",
    )
    .await;
    mount_page(&mock_server, "/wiki/Blank", "<html><body><div>No paragraphs</div></body></html>").await;

    let dir = TempDir::new().unwrap();
    let output = dir.path().join("results.jl");
    let seeds = vec![
        format!("{}/wiki/Robotics", base_url),
        format!("{}/wiki/Robot", base_url),
        format!("{}/wiki/Blank", base_url),
    ];
    let config = create_test_config(seeds.clone(), &output);

    let report = run_crawl(&config).await.expect("Crawl failed");
    assert_eq!(report.written, 3);
    assert_eq!(report.failures(), 0);

    let records = read_records(&output);
    assert_eq!(records.len(), 3);

    let find = |url: &str| {
        records
            .iter()
            .find(|r| r.url == url)
            .unwrap_or_else(|| panic!("No record for {}", url))
    };

    assert_eq!(
        find(&seeds[0]).text,
        "Robotics is the interdisciplinary study of robots.\nA robot is a machine.\n"
    );
    assert_eq!(
        find(&seeds[1]).text,
        "Robots can be guided by an external control device.\n"
    );
    assert_eq!(find(&seeds[2]).text, "");

    // Links are never followed
    let requests = mock_server.received_requests().await.unwrap();
    assert!(requests.iter().all(|r| r.url.path() != "/wiki/Other"));
}

#[tokio::test]
async fn test_http_error_writes_no_record() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(&mock_server, "/ok", "<p>fine</p>").await;
    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_string("<p>Not found</p>"))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/broken"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/empty"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&mock_server)
        .await;

    let dir = TempDir::new().unwrap();
    let output = dir.path().join("results.jl");
    let config = create_test_config(
        vec![
            format!("{}/missing", base_url),
            format!("{}/ok", base_url),
            format!("{}/broken", base_url),
            format!("{}/empty", base_url),
        ],
        &output,
    );

    let report = run_crawl(&config).await.expect("Crawl failed");
    assert_eq!(report.written, 1);
    assert_eq!(report.fetch_failed, 3);

    let records = read_records(&output);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].url, format!("{}/ok", base_url));
}

#[tokio::test]
async fn test_foreign_domain_is_refused() {
    let mock_server = MockServer::start().await;
    let port = mock_server.address().port();

    mount_page(&mock_server, "/inside", "<p>inside</p>").await;
    mount_page(&mock_server, "/outside", "<p>outside</p>").await;

    let dir = TempDir::new().unwrap();
    let output = dir.path().join("results.jl");
    let config = create_test_config(
        vec![
            format!("http://localhost:{}/outside", port),
            format!("http://127.0.0.1:{}/inside", port),
        ],
        &output,
    );

    let report = run_crawl(&config).await.expect("Crawl failed");
    assert_eq!(report.written, 1);
    assert_eq!(report.fetch_failed, 1);

    let records = read_records(&output);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].text, "inside\n");

    // The refused URL never reached the network
    let requests = mock_server.received_requests().await.unwrap();
    assert!(requests.iter().all(|r| r.url.path() != "/outside"));
}

#[tokio::test]
async fn test_redirect_outside_allowed_domain_is_refused() {
    let mock_server = MockServer::start().await;
    let port = mock_server.address().port();

    Mock::given(method("GET"))
        .and(path("/jump"))
        .respond_with(
            ResponseTemplate::new(302)
                .insert_header("location", format!("http://localhost:{}/landing", port).as_str()),
        )
        .mount(&mock_server)
        .await;
    mount_page(&mock_server, "/landing", "<p>landed</p>").await;

    let mut config = Config::default();
    config.crawler.allowed_domains = vec!["127.0.0.1".to_string()];
    let fetcher = HttpFetcher::new(&config.crawler, &config.user_agent).unwrap();

    let result = fetcher
        .fetch_text(&format!("http://127.0.0.1:{}/jump", port))
        .await;
    assert!(matches!(result, Err(FetchError::Redirect { .. })));
}

#[tokio::test]
async fn test_redirect_inside_allowed_domain_is_followed() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/old"))
        .respond_with(
            ResponseTemplate::new(301).insert_header("location", format!("{}/new", base_url).as_str()),
        )
        .mount(&mock_server)
        .await;
    mount_page(&mock_server, "/new", "<p>moved here</p>").await;

    let mut config = Config::default();
    config.crawler.allowed_domains = vec!["127.0.0.1".to_string()];
    let fetcher = HttpFetcher::new(&config.crawler, &config.user_agent).unwrap();

    let text = fetcher
        .fetch_text(&format!("{}/old", base_url))
        .await
        .expect("Redirect should be followed");
    assert_eq!(text, "moved here\n");
}

#[tokio::test]
async fn test_empty_seed_list_creates_empty_output() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("results.jl");
    let config = create_test_config(vec![], &output);

    let report = run_crawl(&config).await.expect("Crawl failed");

    assert_eq!(report.total(), 0);
    assert!(output.exists());
    assert_eq!(std::fs::read_to_string(&output).unwrap(), "");
}

#[tokio::test]
async fn test_rerun_truncates_previous_output() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();
    for page in ["/1", "/2", "/3"] {
        mount_page(&mock_server, page, "<p>page</p>").await;
    }

    let dir = TempDir::new().unwrap();
    let output = dir.path().join("results.jl");

    let first = create_test_config(
        ["/1", "/2", "/3"]
            .iter()
            .map(|p| format!("{}{}", base_url, p))
            .collect(),
        &output,
    );
    run_crawl(&first).await.expect("First crawl failed");
    assert_eq!(read_records(&output).len(), 3);

    let second = create_test_config(vec![format!("{}/1", base_url)], &output);
    run_crawl(&second).await.expect("Second crawl failed");
    assert_eq!(read_records(&output).len(), 1);
}

#[tokio::test]
async fn test_many_concurrent_pages_produce_valid_lines() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    let body = format!("<html><body>{}</body></html>", "<p>Lorem ipsum dolor sit amet.</p>".repeat(200));
    for i in 0..20 {
        mount_page(&mock_server, &format!("/page/{}", i), &body).await;
    }

    let dir = TempDir::new().unwrap();
    let output = dir.path().join("results.jl");
    let seeds: Vec<String> = (0..20).map(|i| format!("{}/page/{}", base_url, i)).collect();
    let config = create_test_config(seeds.clone(), &output);

    let report = run_crawl(&config).await.expect("Crawl failed");
    assert_eq!(report.written, 20);

    let records = read_records(&output);
    assert_eq!(records.len(), 20);

    let mut urls: Vec<String> = records.into_iter().map(|r| r.url).collect();
    urls.sort();
    let mut expected = seeds;
    expected.sort();
    assert_eq!(urls, expected);
}

#[tokio::test]
async fn test_missing_output_directory_is_fatal() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("no_such_dir").join("results.jl");
    let config = create_test_config(vec!["http://127.0.0.1:1/never".to_string()], &output);

    let result = run_crawl(&config).await;

    assert!(matches!(result, Err(CrawlError::Output(_))));
    assert!(!output.exists());
}
