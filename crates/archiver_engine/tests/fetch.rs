use std::time::Duration;

use archiver_engine::{FailureKind, FetchSettings, ListingTarget, PageSource, ReqwestPageSource};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

const LISTING_PATH: &str = "/users/alice/completed_solutions";

fn target(server: &MockServer) -> ListingTarget {
    ListingTarget {
        base_url: server.uri(),
        username: "alice".to_string(),
        session_id: "secret-session".to_string(),
    }
}

fn source(server: &MockServer, settings: FetchSettings) -> ReqwestPageSource {
    ReqwestPageSource::new(&target(server), settings).expect("client builds")
}

async fn only_request(server: &MockServer) -> Request {
    let mut requests = server.received_requests().await.expect("recording enabled");
    assert_eq!(requests.len(), 1);
    requests.remove(0)
}

#[tokio::test]
async fn first_page_is_a_plain_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(LISTING_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw("<html>first</html>", "text/html; charset=utf-8"),
        )
        .mount(&server)
        .await;

    let page = source(&server, FetchSettings::default())
        .fetch_page(0)
        .await
        .expect("fetch ok");
    assert_eq!(page.page, 0);
    assert_eq!(page.html, "<html>first</html>");
    assert_eq!(page.encoding_label, "UTF-8");

    let request = only_request(&server).await;
    assert!(request.url.query_pairs().all(|(key, _)| key != "page"));
    assert!(request.headers.get("x-requested-with").is_none());
    assert_eq!(
        request.headers.get("cookie").and_then(|v| v.to_str().ok()),
        Some("_session_id=secret-session")
    );
    assert!(request
        .headers
        .get("user-agent")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ua| ua.starts_with("Mozilla/5.0")));
}

#[tokio::test]
async fn later_pages_are_script_requests_with_page_number() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(LISTING_PATH))
        .and(query_param("page", "3"))
        .and(header("x-requested-with", "XMLHttpRequest"))
        .and(header("cookie", "_session_id=secret-session"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("<div>third</div>", "text/html"))
        .mount(&server)
        .await;

    let page = source(&server, FetchSettings::default())
        .fetch_page(3)
        .await
        .expect("fetch ok");
    assert_eq!(page.page, 3);
    assert_eq!(page.html, "<div>third</div>");
}

#[tokio::test]
async fn non_ok_status_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(LISTING_PATH))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = source(&server, FetchSettings::default())
        .fetch_page(0)
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::HttpStatus(500));
}

#[tokio::test]
async fn success_other_than_ok_is_still_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(LISTING_PATH))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let err = source(&server, FetchSettings::default())
        .fetch_page(1)
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::HttpStatus(204));
}

#[tokio::test]
async fn slow_response_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(LISTING_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(250))
                .set_body_string("slow"),
        )
        .mount(&server)
        .await;

    let settings = FetchSettings {
        request_timeout: Duration::from_millis(50),
        ..FetchSettings::default()
    };
    let err = source(&server, settings).fetch_page(0).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Timeout);
}

#[tokio::test]
async fn oversized_body_is_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(LISTING_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Content-Type", "text/html")
                .set_body_string("01234567890"),
        )
        .mount(&server)
        .await;

    let settings = FetchSettings {
        max_bytes: 10,
        ..FetchSettings::default()
    };
    let err = source(&server, settings).fetch_page(0).await.unwrap_err();
    assert_eq!(
        err.kind,
        FailureKind::TooLarge {
            max_bytes: 10,
            actual: Some(11)
        }
    );
}

#[test]
fn listing_url_escapes_username() {
    let target = ListingTarget {
        base_url: "https://www.codewars.com".to_string(),
        username: "jane doe".to_string(),
        session_id: String::new(),
    };
    assert_eq!(
        target.listing_url().unwrap().as_str(),
        "https://www.codewars.com/users/jane%20doe/completed_solutions"
    );
}

#[test]
fn invalid_base_url_is_reported() {
    let target = ListingTarget {
        base_url: "not a url".to_string(),
        username: "alice".to_string(),
        session_id: String::new(),
    };
    assert_eq!(target.listing_url().unwrap_err().kind, FailureKind::InvalidUrl);
}
