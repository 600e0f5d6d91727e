//! Integration tests for the crawler
//!
//! These tests use wiremock to serve a miniature catalog and drive full runs
//! over real HTTP. Fetch counts are asserted with `expect`, which wiremock
//! verifies when the mock server drops.

use book_trawler::config::Config;
use book_trawler::crawler::{run, CrawlRequest, FetchStage, FilterSpec};
use book_trawler::output::{load_titles, write_records};
use book_trawler::record::Field;
use book_trawler::sort::{sort_records, SortSpec};
use book_trawler::TrawlError;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TRAVEL_P1: &str = "/catalogue/category/books/travel_2/index.html";
const TRAVEL_P2: &str = "/catalogue/category/books/travel_2/page-2.html";
const MYSTERY_P1: &str = "/catalogue/category/books/mystery_3/index.html";
const ALL_P1: &str = "/catalogue/category/books_1/index.html";

/// Creates a test configuration pointing at the mock server
fn create_test_config(server: &MockServer) -> Config {
    let mut config = Config::default();
    config.catalog.base_url = format!("{}/", server.uri());
    config.catalog.request_timeout_secs = 5;
    config.user_agent.crawler_name = "TestBot".to_string();
    config.user_agent.crawler_version = "1.0.0".to_string();
    config
}

fn request(quota: usize, filters: FilterSpec, categories: &[&str]) -> CrawlRequest {
    CrawlRequest {
        quota,
        filters,
        categories: categories.iter().map(|c| c.to_string()).collect(),
    }
}

fn index_page() -> String {
    r#"<html><body><div class="side_categories"><ul class="nav nav-list">
        <li><a href="catalogue/category/books_1/index.html">Books</a>
        <ul>
            <li><a href="catalogue/category/books/travel_2/index.html">
                Travel
            </a></li>
            <li><a href="catalogue/category/books/mystery_3/index.html">
                Mystery
            </a></li>
        </ul></li>
    </ul></div></body></html>"#
        .to_string()
}

/// A listing page; entries are `(slug, price, rating word)`
fn listing_page(entries: &[(&str, &str, &str)], next: Option<&str>) -> String {
    let mut html = String::from("<html><body><section><ol class=\"row\">");
    for (slug, price, rating) in entries {
        html.push_str(&format!(
            r#"<li class="col-xs-6 col-sm-4 col-md-3 col-lg-3">
                <article class="product_pod">
                    <div class="image_container"><a href="../../../{slug}/index.html"><img src="x.jpg"></a></div>
                    <p class="star-rating {rating}"></p>
                    <h3><a href="../../../{slug}/index.html" title="{slug}">{slug}</a></h3>
                    <div class="product_price"><p class="price_color">£{price}</p></div>
                </article>
            </li>"#
        ));
    }
    html.push_str("</ol>");
    if let Some(next) = next {
        html.push_str(&format!(
            r#"<ul class="pager"><li class="current">Page</li><li class="next"><a href="{next}">next</a></li></ul>"#
        ));
    }
    html.push_str("</section></body></html>");
    html
}

fn detail_page(title: &str, category: Option<&str>, price: &str, stock: u32) -> String {
    let crumb = category
        .map(|c| {
            format!(
                r#"<li><a href="../category/books/{}_9/index.html">{}</a></li>"#,
                c.to_lowercase(),
                c
            )
        })
        .unwrap_or_default();
    format!(
        r#"<html><body>
        <ul class="breadcrumb">
            <li><a href="../../index.html">Home</a></li>
            <li><a href="../category/books_1/index.html">Books</a></li>
            {crumb}
        </ul>
        <article class="product_page">
            <h1>{title}</h1>
            <p class="price_color">£{price}</p>
            <p class="instock availability">In stock ({stock} available)</p>
            <p class="star-rating Four"></p>
            <div id="product_description"><h2>Product Description</h2></div>
            <p>About {title}.</p>
        </article></body></html>"#
    )
}

fn detail_path(slug: &str) -> String {
    format!("/catalogue/{}/index.html", slug)
}

async fn mount_page(server: &MockServer, route: &str, body: String, times: Option<u64>) {
    let mock = Mock::given(method("GET")).and(path(route)).respond_with(
        ResponseTemplate::new(200)
            .set_body_string(body)
            .insert_header("content-type", "text/html"),
    );
    let mock = match times {
        Some(times) => mock.expect(times),
        None => mock,
    };
    mock.mount(server).await;
}

/// Mounts the index, Travel (2 pages: t1 t2 | t3), Mystery (1 page: m1 m2)
/// and the five detail pages. `details` overrides the expected hit count of
/// each detail page, in the order t1 t2 t3 m1 m2.
async fn mount_catalog(server: &MockServer, details: [Option<u64>; 5]) {
    mount_page(server, "/", index_page(), None).await;
    mount_page(
        server,
        TRAVEL_P1,
        listing_page(&[("t1", "12.00", "One"), ("t2", "45.50", "Three")], Some("page-2.html")),
        None,
    )
    .await;
    mount_page(server, TRAVEL_P2, listing_page(&[("t3", "19.99", "Five")], None), None).await;
    mount_page(
        server,
        MYSTERY_P1,
        listing_page(&[("m1", "8.25", "Two"), ("m2", "30.00", "Four")], None),
        None,
    )
    .await;

    let books = [
        ("t1", "Travel One", Some("Travel"), "12.00", 4),
        ("t2", "Travel Two", Some("Travel"), "45.50", 0),
        ("t3", "Travel Three", None, "19.99", 11),
        ("m1", "Mystery One", Some("Mystery"), "8.25", 2),
        ("m2", "Mystery Two", Some("Mystery"), "30.00", 7),
    ];
    for ((slug, title, category, price, stock), times) in books.into_iter().zip(details) {
        mount_page(server, &detail_path(slug), detail_page(title, category, price, stock), times).await;
    }
}

#[tokio::test]
async fn test_single_category_end_to_end() {
    let mock_server = MockServer::start().await;
    mount_catalog(&mock_server, [Some(1), Some(1), Some(1), Some(0), Some(0)]).await;

    let config = create_test_config(&mock_server);
    let outcome = run(&config, &request(3, FilterSpec::default(), &["Travel"]))
        .await
        .expect("Crawl failed");

    assert_eq!(outcome.accepted_links.len(), 3);
    assert_eq!(outcome.records.len(), outcome.accepted_links.len());
    assert!(outcome.accepted_links[0].as_str().ends_with("/catalogue/t1/index.html"));

    for record in &outcome.records {
        let category = record.category();
        assert!(
            category == &Field::Value("Travel".to_string()) || category.is_missing(),
            "unexpected category {:?}",
            category
        );
    }
    assert!(outcome.records[2].category().is_missing());
    assert_eq!(outcome.records[0].price(), &Field::Value(12.0));
    assert_eq!(outcome.stats.listing_pages, 2);
}

#[tokio::test]
async fn test_quota_carries_across_categories() {
    let mock_server = MockServer::start().await;
    mount_catalog(&mock_server, [Some(1), Some(1), Some(1), Some(1), Some(0)]).await;

    let config = create_test_config(&mock_server);
    let outcome = run(&config, &request(4, FilterSpec::default(), &["Travel", "Mystery"]))
        .await
        .expect("Crawl failed");

    let titles: Vec<String> = outcome.records.iter().map(|r| r.title_key()).collect();
    assert_eq!(titles, vec!["Travel One", "Travel Two", "Travel Three", "Mystery One"]);
    assert_eq!(outcome.stats.category_index_fetches, 2);
}

#[tokio::test]
async fn test_quota_met_skips_remaining_categories() {
    let mock_server = MockServer::start().await;
    mount_page(&mock_server, "/", index_page(), Some(2)).await;
    mount_page(
        &mock_server,
        TRAVEL_P1,
        listing_page(&[("t1", "12.00", "One"), ("t2", "45.50", "Three")], Some("page-2.html")),
        Some(1),
    )
    .await;
    mount_page(&mock_server, TRAVEL_P2, String::new(), Some(0)).await;
    mount_page(&mock_server, MYSTERY_P1, String::new(), Some(0)).await;
    mount_page(&mock_server, &detail_path("t1"), detail_page("Travel One", Some("Travel"), "12.00", 4), Some(1)).await;

    let config = create_test_config(&mock_server);
    let outcome = run(&config, &request(1, FilterSpec::default(), &["Travel", "Mystery"]))
        .await
        .expect("Crawl failed");

    assert_eq!(outcome.accepted_links.len(), 1);
    assert_eq!(outcome.records[0].title_key(), "Travel One");
}

#[tokio::test]
async fn test_price_filter_never_fetches_rejected_details() {
    let mock_server = MockServer::start().await;
    // t2 (45.50) and m2 (30.00) are rejected from the listing alone
    mount_catalog(&mock_server, [Some(1), Some(0), Some(1), Some(1), Some(0)]).await;

    let config = create_test_config(&mock_server);
    let filters = FilterSpec::parse([["price", "<", "20"]]).unwrap();
    let outcome = run(&config, &request(10, filters, &["Travel", "Mystery"]))
        .await
        .expect("Crawl failed");

    assert_eq!(outcome.records.len(), 3);
    for record in &outcome.records {
        assert!(*record.price().value().unwrap() < 20.0);
    }
    assert_eq!(outcome.stats.filter_fetches, 0);
}

#[tokio::test]
async fn test_in_stock_filter_fetches_each_detail_once() {
    let mock_server = MockServer::start().await;
    // m1: one filter fetch + one hydration fetch; m2 never reached
    mount_catalog(&mock_server, [Some(0), Some(0), Some(0), Some(2), Some(0)]).await;

    let config = create_test_config(&mock_server);
    let filters = FilterSpec::parse([
        ["in_stock", ">", "0"],
        ["rating", "<", "5"],
        ["in_stock", "<", "50"],
    ])
    .unwrap();
    let outcome = run(&config, &request(1, filters, &["Mystery"]))
        .await
        .expect("Crawl failed");

    assert_eq!(outcome.records.len(), 1);
    assert_eq!(outcome.records[0].in_stock(), &Field::Value(2));
    assert_eq!(outcome.stats.filter_fetches, 1);
}

#[tokio::test]
async fn test_in_stock_filter_rejects_empty_shelves() {
    let mock_server = MockServer::start().await;
    // t2 has zero stock: fetched for the filter, never hydrated
    mount_catalog(&mock_server, [Some(2), Some(1), Some(2), Some(0), Some(0)]).await;

    let config = create_test_config(&mock_server);
    let filters = FilterSpec::parse([["in_stock", ">", "0"]]).unwrap();
    let outcome = run(&config, &request(5, filters, &["Travel"]))
        .await
        .expect("Crawl failed");

    let titles: Vec<String> = outcome.records.iter().map(|r| r.title_key()).collect();
    assert_eq!(titles, vec!["Travel One", "Travel Three"]);
    assert_eq!(outcome.stats.filter_fetches, 3);
}

#[tokio::test]
async fn test_unresolved_category_is_reported() {
    let mock_server = MockServer::start().await;
    mount_catalog(&mock_server, [Some(0), Some(0), Some(0), Some(1), Some(1)]).await;

    let config = create_test_config(&mock_server);
    let outcome = run(&config, &request(10, FilterSpec::default(), &["Cooking", "Mystery"]))
        .await
        .expect("Crawl failed");

    assert_eq!(outcome.unresolved_categories, vec!["Cooking".to_string()]);
    assert_eq!(outcome.records.len(), 2);
}

#[tokio::test]
async fn test_default_listing_without_categories() {
    let mock_server = MockServer::start().await;
    mount_page(&mock_server, "/", index_page(), Some(0)).await;
    mount_page(
        &mock_server,
        ALL_P1,
        listing_page(&[("m1", "8.25", "Two")], None),
        Some(1),
    )
    .await;
    mount_page(&mock_server, &detail_path("m1"), detail_page("Mystery One", Some("Mystery"), "8.25", 2), Some(1)).await;

    let config = create_test_config(&mock_server);
    let outcome = run(&config, &request(10, FilterSpec::default(), &[]))
        .await
        .expect("Crawl failed");

    assert_eq!(outcome.records.len(), 1);
    assert_eq!(outcome.stats.category_index_fetches, 0);
}

#[tokio::test]
async fn test_listing_failure_names_stage_and_url() {
    let mock_server = MockServer::start().await;
    mount_page(&mock_server, "/", index_page(), None).await;
    Mock::given(method("GET"))
        .and(path(TRAVEL_P1))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;

    let config = create_test_config(&mock_server);
    let result = run(&config, &request(3, FilterSpec::default(), &["Travel"])).await;

    match result {
        Err(err @ TrawlError::Fetch {
            stage: FetchStage::ListingPage,
            ..
        }) => {
            let message = err.to_string();
            assert!(message.starts_with("listing page fetch failed"), "{}", message);
            assert!(message.contains("503"), "{}", message);
            assert!(message.contains(TRAVEL_P1), "{}", message);
        }
        other => panic!("expected a listing page failure, got {:?}", other.map(|o| o.accepted_links)),
    }
}

#[tokio::test]
async fn test_user_agent_header_is_sent() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(ALL_P1))
        .and(header(
            "user-agent",
            "TestBot/1.0.0 (+https://example.com/book-trawler; trawler@example.com)",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_string(listing_page(&[], None)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = create_test_config(&mock_server);
    let outcome = run(&config, &request(5, FilterSpec::default(), &[]))
        .await
        .expect("Crawl failed");

    assert!(outcome.accepted_links.is_empty());
    assert!(outcome.records.is_empty());
}

#[tokio::test]
async fn test_sorted_views_and_persistence() {
    let mock_server = MockServer::start().await;
    mount_catalog(&mock_server, [None, None, None, None, None]).await;

    let config = create_test_config(&mock_server);
    let outcome = run(&config, &request(5, FilterSpec::default(), &["Travel", "Mystery"]))
        .await
        .expect("Crawl failed");

    let spec = SortSpec::parse([["price", "ascending"], ["price", "descending"]]).unwrap();
    let views = sort_records(&outcome.records, &spec);
    assert_eq!(views[0].label, "Sorted by price - ascending");
    assert_eq!(views[0].records[0].title_key(), "Mystery One");
    assert_eq!(views[1].records[0].title_key(), "Travel Two");

    let file = tempfile::NamedTempFile::new().unwrap();
    write_records(file.path(), &outcome.records).unwrap();
    let titles = load_titles(file.path()).unwrap();
    assert_eq!(
        titles,
        vec!["Travel One", "Travel Two", "Travel Three", "Mystery One", "Mystery Two"]
    );
}
