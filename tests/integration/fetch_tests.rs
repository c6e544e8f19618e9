//! Retry behavior of the fetcher against a mock server

use ankur_scrape::config::FetchConfig;
use ankur_scrape::crawler::{build_http_client, fetch_url, FetchResult};
use wiremock::matchers::{method, path};
use std::time::Duration;
use wiremock::{Mock, MockServer, ResponseTemplate};

fn fast_fetch_config() -> FetchConfig {
    FetchConfig {
        backoff_factor: 0.01,
        timeout_secs: 5,
        ..FetchConfig::default()
    }
}

#[tokio::test]
async fn test_retry_then_success() {
    let mock_server = MockServer::start().await;

    // First three requests fail with 503, the fourth succeeds
    Mock::given(method("GET"))
        .and(path("/flaky"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(3)
        .expect(3)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/flaky"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>ok</html>"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = fast_fetch_config();
    let client = build_http_client(&config).expect("Failed to build client");
    let url = format!("{}/flaky", mock_server.uri());

    let result = fetch_url(&client, &config, &url).await;

    assert_eq!(result.attempts(), 4);
    match result {
        FetchResult::Success {
            status_code, body, ..
        } => {
            assert_eq!(status_code, 200);
            assert_eq!(body, "<html>ok</html>");
        }
        other => panic!("Expected success, got {:?}", other),
    }
}

#[tokio::test]
async fn test_not_found_fails_without_retry() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = fast_fetch_config();
    let client = build_http_client(&config).expect("Failed to build client");
    let url = format!("{}/missing", mock_server.uri());

    let result = fetch_url(&client, &config, &url).await;

    match result {
        FetchResult::HttpError {
            status_code,
            attempts,
        } => {
            assert_eq!(status_code, 404);
            assert_eq!(attempts, 1);
        }
        other => panic!("Expected HttpError, got {:?}", other),
    }
}

#[tokio::test]
async fn test_retries_are_bounded() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/down"))
        .respond_with(ResponseTemplate::new(502))
        .expect(3)
        .mount(&mock_server)
        .await;

    let config = FetchConfig {
        max_retries: 2,
        ..fast_fetch_config()
    };
    let client = build_http_client(&config).expect("Failed to build client");
    let url = format!("{}/down", mock_server.uri());

    let result = fetch_url(&client, &config, &url).await;

    assert!(!result.is_success());
    assert_eq!(result.attempts(), 3);
    assert!(result.into_body().is_none());
}

#[tokio::test]
async fn test_connection_failure_is_not_fatal() {
    // Bind and drop a listener so the port refuses connections
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("Failed to bind");
        listener.local_addr().expect("No local address").port()
    };
    let uri = format!("http://127.0.0.1:{}", port);

    let config = FetchConfig {
        max_retries: 1,
        ..fast_fetch_config()
    };
    let client = build_http_client(&config).expect("Failed to build client");

    let result = fetch_url(&client, &config, &format!("{}/gone", uri)).await;

    assert!(matches!(result, FetchResult::NetworkError { .. }));
    assert_eq!(result.attempts(), 2);
}

#[tokio::test]
async fn test_timeout_is_retried() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("<html>late</html>")
                .set_delay(Duration::from_secs(3)),
        )
        .expect(2)
        .mount(&mock_server)
        .await;

    let config = FetchConfig {
        timeout_secs: 1,
        max_retries: 1,
        ..fast_fetch_config()
    };
    let client = build_http_client(&config).expect("Failed to build client");
    let url = format!("{}/slow", mock_server.uri());

    let result = fetch_url(&client, &config, &url).await;

    match result {
        FetchResult::NetworkError { error, attempts } => {
            assert_eq!(error, "Request timeout");
            assert_eq!(attempts, 2);
        }
        other => panic!("Expected NetworkError, got {:?}", other),
    }
}

#[tokio::test]
async fn test_unfollowed_redirect_keeps_body() {
    let mock_server = MockServer::start().await;

    // A 300 without a Location header is returned as-is by the client
    Mock::given(method("GET"))
        .and(path("/choices"))
        .respond_with(ResponseTemplate::new(300).set_body_string("<html>pick one</html>"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = fast_fetch_config();
    let client = build_http_client(&config).expect("Failed to build client");
    let url = format!("{}/choices", mock_server.uri());

    let result = fetch_url(&client, &config, &url).await;

    match result {
        FetchResult::Success {
            status_code,
            body,
            attempts,
            ..
        } => {
            assert_eq!(status_code, 300);
            assert_eq!(body, "<html>pick one</html>");
            assert_eq!(attempts, 1);
        }
        other => panic!("Expected success, got {:?}", other),
    }
}
