mod common;

use mediafamille_core::types::MediaType;
use mediafamille_metadata::MetadataError;
use mediafamille_metadata::google_books::GoogleBooksClient;
use mediafamille_metadata::provider::BookProvider;
use serde_json::{Value, json};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::{last_request, query};

fn volumes() -> Value {
    json!({
        "kind": "books#volumes",
        "totalItems": 45,
        "items": [
            {
                "id": "zyTCAlFPjgYC",
                "volumeInfo": {
                    "title": "Le Petit Prince",
                    "authors": ["Antoine de Saint-Exupéry"],
                    "imageLinks": { "thumbnail": "http://books.google.com/t.jpg" }
                }
            },
            { "volumeInfo": { "title": "sans identifiant" } }
        ]
    })
}

async fn mount(server: &MockServer, route: &str, status: u16, body: Value, calls: u64) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(status).set_body_json(body))
        .expect(calls)
        .mount(server)
        .await;
}

#[tokio::test]
async fn search_pages_by_start_index() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/volumes"))
        .and(query_param("q", "petit prince"))
        .and(query_param("startIndex", "20"))
        .and(query_param("maxResults", "20"))
        .and(query_param("printType", "books"))
        .and(query_param("langRestrict", "fr"))
        .respond_with(ResponseTemplate::new(200).set_body_json(volumes()))
        .expect(1)
        .mount(&server)
        .await;
    let client = GoogleBooksClient::new(None).with_base_url(server.uri());

    let page = client.search_books("petit prince", 20).await.unwrap();

    assert_eq!(page.page, 2);
    assert_eq!(page.total_results, 45);
    assert_eq!(page.total_pages, 3);
    assert_eq!(page.results.len(), 1);
    assert_eq!(page.results[0].media_type, MediaType::Book);
    assert_eq!(page.results[0].poster_url, "https://books.google.com/t.jpg");

    let req = last_request(&server).await;
    assert_eq!(query(&req, "key"), None);
}

#[tokio::test]
async fn api_key_is_sent_when_configured() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/volumes"))
        .and(query_param("key", "books-key"))
        .and(query_param("startIndex", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(volumes()))
        .expect(1)
        .mount(&server)
        .await;
    let client = GoogleBooksClient::new(Some("books-key".into())).with_base_url(server.uri());

    client.search_books("prince", -5).await.unwrap();
}

#[tokio::test]
async fn huge_start_index_saturates() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/volumes"))
        .and(query_param("startIndex", u32::MAX.to_string()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "totalItems": 45 })))
        .expect(1)
        .mount(&server)
        .await;
    let client = GoogleBooksClient::new(None).with_base_url(server.uri());

    let page = client.search_books("prince", i64::MAX).await.unwrap();
    assert_eq!(page.page, u32::MAX / 20 + 1);
    assert!(page.results.is_empty());
}

#[tokio::test]
async fn empty_search_has_no_items() {
    let server = MockServer::start().await;
    mount(&server, "/volumes", 200, json!({ "totalItems": 0 }), 1).await;
    let client = GoogleBooksClient::new(None).with_base_url(server.uri());

    let page = client.search_books("zzzzzz", 0).await.unwrap();
    assert_eq!(page.page, 1);
    assert_eq!(page.total_pages, 0);
    assert!(page.results.is_empty());
}

#[tokio::test]
async fn book_details() {
    let server = MockServer::start().await;
    mount(
        &server,
        "/volumes/zyTCAlFPjgYC",
        200,
        json!({
            "id": "zyTCAlFPjgYC",
            "volumeInfo": {
                "title": "Le Petit Prince",
                "publisher": "Gallimard",
                "pageCount": 96,
                "description": "<b>Un classique</b>",
                "imageLinks": {
                    "thumbnail": "http://books.google.com/t.jpg",
                    "large": "http://books.google.com/l.jpg"
                }
            }
        }),
        1,
    )
    .await;
    let client = GoogleBooksClient::new(None).with_base_url(server.uri());

    let book = client.get_book_details("zyTCAlFPjgYC").await.unwrap();
    assert_eq!(book.external_id.as_deref(), Some("zyTCAlFPjgYC"));
    assert_eq!(book.publisher.as_deref(), Some("Gallimard"));
    assert_eq!(book.page_count, Some(96));
    assert_eq!(book.synopsis_fr.as_deref(), Some("Un classique"));
    assert_eq!(book.poster_url, "https://books.google.com/l.jpg");
}

#[tokio::test]
async fn invalid_volume_id_is_rejected_before_any_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(0)
        .mount(&server)
        .await;
    let client = GoogleBooksClient::new(None).with_base_url(server.uri());

    let err = client.get_book_details("../../secret").await.unwrap_err();
    assert!(matches!(err, MetadataError::Validation(_)), "{err:?}");
}

#[tokio::test]
async fn upstream_error_carries_status() {
    let server = MockServer::start().await;
    mount(&server, "/volumes/abc", 503, json!({ "error": { "code": 503 } }), 1).await;
    let client = GoogleBooksClient::new(None).with_base_url(server.uri());

    let err = client.get_book_details("abc").await.unwrap_err();
    assert!(
        matches!(err, MetadataError::Upstream { provider: "google_books", status: 503 }),
        "{err:?}"
    );
}
