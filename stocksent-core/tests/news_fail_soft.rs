//! News provider against a local one-shot HTTP server.
//!
//! Every failure mode must come back as an empty headline list.

use std::io::{BufRead, BufReader, Write};
use std::net::TcpListener;
use std::thread;

use stocksent_core::config::{HttpConfig, NewsConfig};
use stocksent_core::data::{DataError, NewsApiProvider, NewsProvider};

/// Serve exactly one response, returning the endpoint URL and a handle
/// yielding the request line that was received.
fn serve_once(status_line: &'static str, body: &'static str) -> (String, thread::JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    let handle = thread::spawn(move || {
        let (stream, _) = listener.accept().unwrap();
        let mut reader = BufReader::new(stream);
        let mut request_line = String::new();
        reader.read_line(&mut request_line).unwrap();
        loop {
            let mut line = String::new();
            if reader.read_line(&mut line).unwrap() == 0 || line == "\r\n" {
                break;
            }
        }
        let mut stream = reader.into_inner();
        write!(
            stream,
            "{status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        )
        .unwrap();
        stream.flush().unwrap();
        request_line
    });
    (format!("http://{addr}/v2/everything"), handle)
}

fn provider(endpoint: String) -> NewsApiProvider {
    let http = HttpConfig {
        timeout_secs: 5,
        ..HttpConfig::default()
    };
    let news = NewsConfig {
        api_key: Some("test-key".into()),
        endpoint,
        ..NewsConfig::default()
    };
    NewsApiProvider::new(&http, &news).unwrap()
}

#[test]
fn ok_response_yields_titles_and_sends_expected_query() {
    let (url, handle) = serve_once(
        "HTTP/1.1 200 OK",
        r#"{"status":"ok","totalResults":2,"articles":[{"title":"Apple beats estimates"},{"title":"iPhone sales climb"}]}"#,
    );
    let titles = provider(url).fetch_headlines("Apple");
    assert_eq!(titles, vec!["Apple beats estimates", "iPhone sales climb"]);

    let request_line = handle.join().unwrap();
    assert!(request_line.starts_with("GET /v2/everything?"));
    assert!(request_line.contains("q=Apple"));
    assert!(request_line.contains("sortBy=publishedAt"));
    assert!(request_line.contains("language=en"));
    assert!(request_line.contains("apiKey=test-key"));
}

#[test]
fn error_status_degrades_to_empty() {
    let (url, handle) = serve_once(
        "HTTP/1.1 401 Unauthorized",
        r#"{"status":"error","code":"apiKeyInvalid","message":"Your API key is invalid or incorrect."}"#,
    );
    let p = provider(url);
    assert!(p.fetch_headlines("Apple").is_empty());
    handle.join().unwrap();
}

#[test]
fn error_status_is_rejected_by_try_fetch() {
    let (url, handle) = serve_once(
        "HTTP/1.1 429 Too Many Requests",
        r#"{"status":"error","code":"rateLimited","message":"Too many requests."}"#,
    );
    match provider(url).try_fetch("Apple") {
        Err(DataError::Rejected(msg)) => assert!(msg.starts_with("rateLimited")),
        other => panic!("expected Rejected, got {other:?}"),
    }
    handle.join().unwrap();
}

#[test]
fn garbage_body_degrades_to_empty() {
    let (url, handle) = serve_once("HTTP/1.1 200 OK", "<html>maintenance</html>");
    let p = provider(url);
    assert!(p.fetch_headlines("Apple").is_empty());
    handle.join().unwrap();
}

#[test]
fn unreachable_host_degrades_to_empty() {
    // Bind then drop to get a port with nothing listening.
    let port = TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port();
    let p = provider(format!("http://127.0.0.1:{port}/v2/everything"));
    assert!(matches!(
        p.try_fetch("Apple"),
        Err(DataError::NetworkUnreachable(_))
    ));
    assert!(p.fetch_headlines("Apple").is_empty());
}
