//! Integration tests for the crawler
//!
//! These tests use wiremock to create a mock dictionary site and run the
//! full discover → paginate → extract cycle end-to-end.

use spread_harvest::config::{CacheSettings, CrawlConfig};
use spread_harvest::crawler::{Coordinator, SITE_LABEL};
use spread_harvest::dataset::{MediaSource, Provider};
use spread_harvest::output::{read_dataset, write_dataset};
use spread_harvest::HarvestError;
use std::collections::HashSet;
use std::time::Duration;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration pointing at the mock server
fn create_test_config(server: &MockServer, cache: Option<CacheSettings>) -> CrawlConfig {
    CrawlConfig {
        base_url: url::Url::parse(&server.uri()).expect("Failed to parse base URL"),
        language: "en.us".to_string(),
        concurrency: 4,
        cache,
    }
}

fn category_index(categories: &[(&str, &str)]) -> String {
    let items: String = categories
        .iter()
        .map(|(label, href)| format!(r#"<li><a href="{}">{}</a></li>"#, href, label))
        .collect();
    format!(
        r#"<html><body><ul class="category-list">{}</ul></body></html>"#,
        items
    )
}

fn listing(entries: &[&str], next: Option<&str>) -> String {
    let mut body = String::from("<html><body>");
    for entry in entries {
        body.push_str(&format!(
            r#"<div class="search-result-title"><a href="{}">entry</a></div>"#,
            entry
        ));
    }
    if let Some(next) = next {
        body.push_str(&format!(
            r#"<ul class="pagination"><li><a rel="next" href="{}">»</a></li></ul>"#,
            next
        ));
    }
    body.push_str("</body></html>");
    body
}

fn entry_page(canonical: &str, title: &str, kind: &str, body: &str, videos: &[&str]) -> String {
    let videos: String = videos
        .iter()
        .map(|src| format!(r#"<video src="{}"></video>"#, src))
        .collect();
    format!(
        r#"<html><head>
            <link rel="canonical" href="{canonical}" />
            <meta name="description" content="{body}" />
        </head><body>
            <div class="search-result open">
                <div class="search-result-content"><h2>{title}</h2><small>{kind}</small></div>
                {videos}
            </div>
        </body></html>"#
    )
}

async fn mount_html(server: &MockServer, route: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body)
                .insert_header("content-type", "text/html"),
        )
        .mount(server)
        .await;
}

async fn mount_index(server: &MockServer, categories: &[(&str, &str)]) {
    mount_html(server, "/en.us/search/by-category/", category_index(categories)).await;
}

fn tag_set(tags: &[String]) -> HashSet<&str> {
    tags.iter().map(String::as_str).collect()
}

#[tokio::test]
async fn test_full_crawl_single_entry() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_index(&server, &[("Animals", "/cat/animals")]).await;
    mount_html(&server, "/cat/animals", listing(&["/sign/42/cat"], None)).await;
    mount_html(
        &server,
        "/sign/42/cat",
        entry_page("/sign/42", "Cat", "Noun", "A cat sign", &["/v/42.mp4"]),
    )
    .await;

    let coordinator =
        Coordinator::new(create_test_config(&server, None)).expect("Failed to create coordinator");
    let outcome = coordinator.run().await.expect("Crawl failed");
    let dataset = outcome.dataset;

    assert_eq!(dataset.len(), 1);
    let record = dataset.get("42").expect("entry 42 missing");
    assert_eq!(record.id, "42");
    assert_eq!(record.title, "Cat");
    assert_eq!(record.link, format!("{}/sign/42", base));
    assert_eq!(record.body, "A cat sign");
    assert_eq!(
        tag_set(&record.tags),
        HashSet::from(["spread-the-sign", "noun", "animals"])
    );
    assert_eq!(record.tags.len(), 3);
    assert_eq!(
        record.media,
        vec![MediaSource::fetch(format!("{}/v/42.mp4", base))]
    );
    assert_eq!(
        record.nav,
        vec![
            (SITE_LABEL.to_string(), format!("{}/en.us/", base)),
            ("Animals".to_string(), format!("{}/cat/animals", base)),
            ("Cat".to_string(), format!("{}/sign/42", base)),
        ]
    );
    assert_eq!(record.provider, Provider::spread_the_sign());

    let stats = outcome.statistics;
    assert_eq!(stats.categories, 1);
    assert_eq!(stats.entry_urls, 1);
    assert_eq!(stats.records, 1);
    assert_eq!(stats.extraction_tasks.failed, 0);
}

#[tokio::test]
async fn test_entry_in_two_categories_unions_tags() {
    let server = MockServer::start().await;

    mount_index(&server, &[("Animals", "/cat/animals"), ("Pets", "/cat/pets")]).await;
    mount_html(&server, "/cat/animals", listing(&["/sign/42/cat"], None)).await;
    mount_html(&server, "/cat/pets", listing(&["/sign/42/cat"], None)).await;
    mount_html(
        &server,
        "/sign/42/cat",
        entry_page("/sign/42", "Cat", "Noun", "A cat sign", &["/v/42.mp4"]),
    )
    .await;

    let outcome = Coordinator::new(create_test_config(&server, None))
        .unwrap()
        .run()
        .await
        .unwrap();

    let record = outcome.dataset.get("42").unwrap();
    assert_eq!(
        tag_set(&record.tags),
        HashSet::from(["spread-the-sign", "noun", "animals", "pets"])
    );
    assert_eq!(record.tags.len(), 4);
    assert_eq!(outcome.statistics.entry_urls, 2);
}

#[tokio::test]
async fn test_pagination_settles_before_extraction() {
    let server = MockServer::start().await;

    mount_index(&server, &[("Food", "/cat/food")]).await;
    // Page-specific mocks are mounted before the catch-all first page
    Mock::given(method("GET"))
        .and(path("/cat/food"))
        .and(query_param("page", "2"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(listing(&["/sign/2/bread", "/sign/1/apple"], None))
                .set_delay(Duration::from_millis(100)),
        )
        .mount(&server)
        .await;
    mount_html(
        &server,
        "/cat/food",
        listing(&["/sign/1/apple"], Some("/cat/food?page=2")),
    )
    .await;
    mount_html(
        &server,
        "/sign/1/apple",
        entry_page("/sign/1", "Apple", "Noun", "Fruit", &["/v/1.mp4"]),
    )
    .await;
    mount_html(
        &server,
        "/sign/2/bread",
        entry_page("/sign/2", "Bread", "Noun", "Baked", &["/v/2.mp4"]),
    )
    .await;

    let outcome = Coordinator::new(create_test_config(&server, None))
        .unwrap()
        .run()
        .await
        .unwrap();

    assert_eq!(outcome.statistics.entry_urls, 2);
    assert!(outcome.dataset.contains("1"));
    assert!(outcome.dataset.contains("2"));
    assert_eq!(outcome.statistics.listing_tasks.completed, 2);
    assert_eq!(outcome.statistics.extraction_tasks.completed, 2);
}

#[tokio::test]
async fn test_entries_without_video_are_dropped() {
    let server = MockServer::start().await;

    mount_index(&server, &[("Animals", "/cat/animals")]).await;
    mount_html(
        &server,
        "/cat/animals",
        listing(&["/sign/42/cat", "/sign/43/dog"], None),
    )
    .await;
    mount_html(
        &server,
        "/sign/42/cat",
        entry_page("/sign/42", "Cat", "Noun", "A cat sign", &["/v/42.mp4"]),
    )
    .await;
    mount_html(
        &server,
        "/sign/43/dog",
        entry_page("/sign/43", "Dog", "Noun", "A dog sign", &[]),
    )
    .await;

    let outcome = Coordinator::new(create_test_config(&server, None))
        .unwrap()
        .run()
        .await
        .unwrap();

    assert!(outcome.dataset.contains("42"));
    assert!(!outcome.dataset.contains("43"));
    assert_eq!(outcome.statistics.entries_without_media, 1);
}

#[tokio::test]
async fn test_failed_entry_does_not_stop_siblings() {
    let server = MockServer::start().await;

    mount_index(&server, &[("Animals", "/cat/animals")]).await;
    mount_html(
        &server,
        "/cat/animals",
        listing(&["/sign/42/cat", "/sign/44/bird"], None),
    )
    .await;
    mount_html(
        &server,
        "/sign/42/cat",
        entry_page("/sign/42", "Cat", "Noun", "A cat sign", &["/v/42.mp4"]),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/sign/44/bird"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let outcome = Coordinator::new(create_test_config(&server, None))
        .unwrap()
        .run()
        .await
        .unwrap();

    assert_eq!(outcome.dataset.len(), 1);
    assert!(outcome.dataset.contains("42"));
    assert_eq!(outcome.statistics.extraction_tasks.failed, 1);
    assert_eq!(outcome.statistics.extraction_tasks.completed, 1);
}

#[tokio::test]
async fn test_unavailable_category_index_aborts() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let result = Coordinator::new(create_test_config(&server, None))
        .unwrap()
        .run()
        .await;

    assert!(matches!(result, Err(HarvestError::Discovery { .. })));
}

#[tokio::test]
async fn test_second_run_is_served_from_cache() {
    let server = MockServer::start().await;

    mount_index(&server, &[("Animals", "/cat/animals")]).await;
    mount_html(&server, "/cat/animals", listing(&["/sign/42/cat"], None)).await;
    mount_html(
        &server,
        "/sign/42/cat",
        entry_page("/sign/42", "Cat", "Noun", "A cat sign", &["/v/42.mp4"]),
    )
    .await;

    let cache_dir = tempfile::tempdir().expect("Failed to create cache dir");
    let settings = CacheSettings {
        folder: cache_dir.path().join("pages"),
        ttl: Duration::from_secs(3600),
    };

    let first = Coordinator::new(create_test_config(&server, Some(settings.clone())))
        .unwrap()
        .run()
        .await
        .unwrap();
    let requests_after_first = server.received_requests().await.unwrap().len();
    assert_eq!(requests_after_first, 3);

    let second = Coordinator::new(create_test_config(&server, Some(settings)))
        .unwrap()
        .run()
        .await
        .unwrap();

    assert_eq!(server.received_requests().await.unwrap().len(), requests_after_first);
    assert_eq!(second.statistics.fetches.cache_hits, 3);
    assert_eq!(second.statistics.fetches.network_fetches, 0);
    assert_eq!(first.dataset, second.dataset);
}

#[tokio::test]
async fn test_dataset_round_trips_through_output_file() {
    let server = MockServer::start().await;

    mount_index(&server, &[("Animals", "/cat/animals")]).await;
    mount_html(&server, "/cat/animals", listing(&["/sign/42/cat"], None)).await;
    mount_html(
        &server,
        "/sign/42/cat",
        entry_page("/sign/42", "Cat", "Noun", "A cat sign", &["/v/42.mp4"]),
    )
    .await;

    let outcome = Coordinator::new(create_test_config(&server, None))
        .unwrap()
        .run()
        .await
        .unwrap();

    let out_dir = tempfile::tempdir().unwrap();
    let data_path = out_dir.path().join("spread-the-sign.json");
    write_dataset(&outcome.dataset, &data_path).unwrap();

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&data_path).unwrap()).unwrap();
    assert_eq!(json["42"]["title"], "Cat");
    assert_eq!(json["42"]["media"][0]["method"], "fetch");
    assert_eq!(read_dataset(&data_path).unwrap(), outcome.dataset);
}

#[tokio::test]
async fn test_redirected_entry_extracts_the_same_from_cache() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_index(&server, &[("Animals", "/cat/animals")]).await;
    mount_html(&server, "/cat/animals", listing(&["/sign/42/cat"], None)).await;
    Mock::given(method("GET"))
        .and(path("/sign/42/cat"))
        .respond_with(ResponseTemplate::new(301).insert_header("location", "/sign/42/cat/"))
        .mount(&server)
        .await;
    mount_html(
        &server,
        "/sign/42/cat/",
        entry_page("/sign/42", "Cat", "Noun", "A cat sign", &["v.mp4"]),
    )
    .await;

    let cache_dir = tempfile::tempdir().unwrap();
    let settings = CacheSettings {
        folder: cache_dir.path().to_path_buf(),
        ttl: Duration::from_secs(3600),
    };

    let fresh = Coordinator::new(create_test_config(&server, Some(settings.clone())))
        .unwrap()
        .run()
        .await
        .unwrap();
    let cached = Coordinator::new(create_test_config(&server, Some(settings)))
        .unwrap()
        .run()
        .await
        .unwrap();

    assert_eq!(cached.statistics.fetches.network_fetches, 0);
    assert_eq!(
        fresh.dataset.get("42").unwrap().media,
        vec![MediaSource::fetch(format!("{}/sign/42/v.mp4", base))]
    );
    assert_eq!(fresh.dataset, cached.dataset);
}
