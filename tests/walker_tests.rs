//! Integration tests for the recursive title walker

mod common;

use apa_crawler::config::Config;
use apa_crawler::crawler::{walk_titles, Throttle, TitleWalker};
use apa_crawler::{ApaError, ConfigError};
use apa_crawler::output::load_titles;
use common::{html_page, test_fetcher, Event, RecordingReporter};
use std::sync::Arc;
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn walker_for(server: &MockServer, reporter: Arc<RecordingReporter>) -> TitleWalker {
    let base_url = Url::parse(&format!("{}/site", server.uri())).expect("Failed to parse base URL");
    TitleWalker::with_parts(base_url, test_fetcher(), Throttle::none(), reporter)
}

/// Three pages with a cycle back to the root and one off-site link
async fn mount_site(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/site"))
        .respond_with(html_page(
            r#"<p>Besluit 20230101 APA 000001</p>
               <a href="/site/a">A</a>
               <a href="/site/b">B</a>
               <a href="/other">Elders</a>"#,
        ))
        .expect(1)
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/site/a"))
        .respond_with(html_page(
            r#"<li>20230102 APA 000002</li>
               <a href="/site">Terug</a>
               <a href="/site/b">B</a>"#,
        ))
        .expect(1)
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/site/b"))
        .respond_with(html_page(
            r#"<li>20230101 APA 000001</li><li>20221231 APA 000003</li>"#,
        ))
        .expect(1)
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/other"))
        .respond_with(html_page("<p>20200101 APA 999999</p>"))
        .expect(0)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_walk_collects_sorted_titles() {
    let server = MockServer::start().await;
    mount_site(&server).await;

    let reporter = Arc::new(RecordingReporter::default());
    let mut walker = walker_for(&server, reporter.clone());
    let titles = walker.crawl().await;

    assert_eq!(
        titles,
        vec![
            "20221231 APA 000003".to_string(),
            "20230101 APA 000001".to_string(),
            "20230102 APA 000002".to_string(),
        ]
    );
    assert_eq!(walker.pages_fetched(), 3);

    // Depth-first pre-order, each page once despite the cycle
    assert_eq!(
        reporter.fetched(),
        vec![
            format!("{}/site", server.uri()),
            format!("{}/site/a", server.uri()),
            format!("{}/site/b", server.uri()),
        ]
    );

    // Only first sightings are announced
    assert_eq!(
        reporter.count(|event| matches!(event, Event::TitleFound(_))),
        3
    );
}

#[tokio::test]
async fn test_walk_is_repeatable() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/site"))
        .respond_with(html_page(
            r#"<p>20230101 APA 000001</p><a href="/site/a">A</a>"#,
        ))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/site/a"))
        .respond_with(html_page(r#"<p>20230102 APA 000002</p><a href="/site">Terug</a>"#))
        .mount(&server)
        .await;

    let first = walker_for(&server, Arc::new(RecordingReporter::default()))
        .crawl()
        .await;
    let second = walker_for(&server, Arc::new(RecordingReporter::default()))
        .crawl()
        .await;

    assert_eq!(first.len(), 2);
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_max_pages_stops_walk() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/site"))
        .respond_with(html_page(
            r#"<p>20230101 APA 000001</p>
               <a href="/site/a">A</a>
               <a href="/site/b">B</a>"#,
        ))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/site/a"))
        .respond_with(html_page("<p>20230102 APA 000002</p>"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/site/b"))
        .respond_with(html_page("<p>20221231 APA 000003</p>"))
        .expect(0)
        .mount(&server)
        .await;

    let reporter = Arc::new(RecordingReporter::default());
    let mut walker = walker_for(&server, reporter.clone()).with_max_pages(Some(2));
    let titles = walker.crawl().await;

    assert_eq!(
        titles,
        vec![
            "20230101 APA 000001".to_string(),
            "20230102 APA 000002".to_string(),
        ]
    );
    assert_eq!(walker.pages_fetched(), 2);
    assert!(reporter.events().contains(&Event::LimitReached));
}

#[tokio::test]
async fn test_max_depth_limits_links_followed() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/site"))
        .respond_with(html_page(
            r#"<p>20230101 APA 000001</p><a href="/site/a">A</a>"#,
        ))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/site/a"))
        .respond_with(html_page(
            r#"<p>20230102 APA 000002</p><a href="/site/a/deep">Dieper</a>"#,
        ))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/site/a/deep"))
        .respond_with(html_page("<p>20221231 APA 000003</p>"))
        .expect(0)
        .mount(&server)
        .await;

    let reporter = Arc::new(RecordingReporter::default());
    let mut walker = walker_for(&server, reporter.clone()).with_max_depth(Some(1));
    let titles = walker.crawl().await;

    assert_eq!(titles.len(), 2);
    assert_eq!(walker.pages_fetched(), 2);
    assert!(!reporter.events().contains(&Event::LimitReached));
}

#[tokio::test]
async fn test_root_failure_yields_no_titles() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/site"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let reporter = Arc::new(RecordingReporter::default());
    let mut walker = walker_for(&server, reporter.clone());

    assert!(walker.crawl().await.is_empty());
    assert_eq!(walker.pages_fetched(), 1);
    assert!(reporter
        .events()
        .contains(&Event::FetchFailed(format!("{}/site", server.uri()))));
}

#[tokio::test]
async fn test_failed_child_skips_only_its_subtree() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/site"))
        .respond_with(html_page(
            r#"<a href="/site/kapot">Kapot</a><a href="/site/goed">Goed</a>"#,
        ))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/site/kapot"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/site/goed"))
        .respond_with(html_page("<p>20230102 APA 000002</p>"))
        .mount(&server)
        .await;

    let mut walker = walker_for(&server, Arc::new(RecordingReporter::default()));

    assert_eq!(walker.crawl().await, vec!["20230102 APA 000002".to_string()]);
    assert_eq!(walker.pages_fetched(), 3);
}

#[tokio::test]
async fn test_save_results_writes_titles() {
    let server = MockServer::start().await;
    mount_site(&server).await;

    let reporter = Arc::new(RecordingReporter::default());
    let mut walker = walker_for(&server, reporter.clone());
    walker.crawl().await;

    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let report_path = dir.path().join("apa_titles.json");
    walker
        .save_results(&report_path)
        .expect("Failed to save titles");

    let report = load_titles(&report_path).expect("Failed to load titles");
    assert_eq!(report.titles, walker.titles());
    assert!(reporter.events().contains(&Event::Saved(report_path)));
}

#[tokio::test]
async fn test_zero_page_cap_rejected_before_walking() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(html_page("<p>20230101 APA 000001</p>"))
        .expect(0)
        .mount(&server)
        .await;

    let mut config = Config::default();
    config.crawler.base_url = format!("{}/site", server.uri());
    config.walker.max_pages = Some(0);

    let result = walk_titles(&config, Arc::new(RecordingReporter::default())).await;

    assert!(matches!(
        result,
        Err(ApaError::Config(ConfigError::Validation(_)))
    ));
}
