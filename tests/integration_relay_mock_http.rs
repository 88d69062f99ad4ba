use std::collections::VecDeque;
use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use translate_relay::TranslatorRuntime;
use translate_relay::core::error::TranslateError;
use translate_relay::core::types::{
    FileTranslationRequest, ProviderConfig, TextTranslationRequest,
};
use translate_relay::providers::resolver::GatewayConfig;

#[derive(Debug, Clone)]
struct MockResponse {
    status_code: u16,
    body: String,
}

impl MockResponse {
    fn json(body: &str) -> Self {
        Self {
            status_code: 200,
            body: body.to_string(),
        }
    }

    fn with_status(status_code: u16, body: &str) -> Self {
        Self {
            status_code,
            body: body.to_string(),
        }
    }
}

struct MockServer {
    addr: std::net::SocketAddr,
    captured_requests: Arc<Mutex<Vec<String>>>,
    handle: Option<thread::JoinHandle<()>>,
}

impl MockServer {
    fn start(responses: Vec<MockResponse>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind test listener");
        listener
            .set_nonblocking(false)
            .expect("configure blocking listener");
        let addr = listener.local_addr().expect("listener addr");

        let queue = Arc::new(Mutex::new(VecDeque::from(responses)));
        let captured_requests = Arc::new(Mutex::new(Vec::new()));

        let queue_clone = Arc::clone(&queue);
        let captured_clone = Arc::clone(&captured_requests);

        let handle = thread::spawn(move || {
            loop {
                let next_response = {
                    let mut queue = queue_clone.lock().expect("queue lock");
                    queue.pop_front()
                };

                let Some(response) = next_response else {
                    break;
                };

                let (mut stream, _) = listener.accept().expect("accept connection");
                stream
                    .set_read_timeout(Some(Duration::from_secs(3)))
                    .expect("set stream timeout");

                let request = read_http_request_with_body(&mut stream);
                captured_clone.lock().expect("capture lock").push(request);

                let response_text = build_http_response(&response);
                stream
                    .write_all(response_text.as_bytes())
                    .expect("write response");
                stream.flush().expect("flush response");
            }
        });

        Self {
            addr,
            captured_requests,
            handle: Some(handle),
        }
    }

    fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    fn captured_requests(&self) -> Vec<String> {
        self.captured_requests
            .lock()
            .expect("capture lock")
            .clone()
    }

    fn captured_request_paths(&self) -> Vec<String> {
        self.captured_requests()
            .iter()
            .map(|raw_request| {
                let request_line = raw_request.lines().next().unwrap_or_default();
                request_line
                    .split_whitespace()
                    .nth(1)
                    .unwrap_or_default()
                    .to_string()
            })
            .collect()
    }

    fn shutdown(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.join().expect("join mock server");
        }
    }
}

impl Drop for MockServer {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn runtime() -> TranslatorRuntime {
    TranslatorRuntime::builder()
        .with_gateway(GatewayConfig::default())
        .build()
        .expect("runtime should build")
}

fn custom_provider(server: &MockServer, model_id: &str) -> ProviderConfig {
    ProviderConfig {
        api_key: Some("sk-test".to_string()),
        base_url: Some(server.url()),
        model_id: model_id.to_string(),
    }
}

#[tokio::test]
async fn test_translate_text_end_to_end() {
    let mut server = MockServer::start(vec![MockResponse::json(
        r#"{"choices":[{"message":{"role":"assistant","content":"Hola"}}]}"#,
    )]);

    let translated = runtime()
        .translate_text(&TextTranslationRequest {
            text: "Hello".to_string(),
            source_lang: "en".to_string(),
            target_lang: "es".to_string(),
            provider: custom_provider(&server, "gpt-4o-mini"),
        })
        .await
        .expect("translation should succeed");

    assert_eq!(translated, "Hola");

    server.shutdown();
    assert_eq!(server.captured_request_paths(), vec!["/chat/completions"]);

    let raw_request = &server.captured_requests()[0];
    assert!(raw_request.contains("authorization: Bearer sk-test")
        || raw_request.contains("Authorization: Bearer sk-test"));
    assert!(raw_request.contains(r#""model":"gpt-4o-mini""#));
    assert!(raw_request.contains("from English to Spanish"));
    assert!(raw_request.contains(r#""temperature":0.3"#));
    assert!(raw_request.contains(r#""max_tokens":2000"#));
}

#[tokio::test]
async fn test_translate_upstream_failure_is_provider_error() {
    let mut server = MockServer::start(vec![MockResponse::with_status(
        500,
        r#"{"error":{"message":"upstream exploded"}}"#,
    )]);

    let error = runtime()
        .translate_text(&TextTranslationRequest {
            text: "Hello".to_string(),
            source_lang: "en".to_string(),
            target_lang: "es".to_string(),
            provider: custom_provider(&server, "gpt-4o-mini"),
        })
        .await
        .expect_err("upstream failure should surface");

    assert!(matches!(error, TranslateError::Provider(_)));
    assert!(!error.is_validation());
    server.shutdown();
}

#[tokio::test]
async fn test_availability_check_against_listing() {
    let mut server = MockServer::start(vec![MockResponse::json(
        r#"{"object":"list","data":[{"id":"gpt-4o"},{"id":"gpt-4o-mini"}]}"#,
    )]);

    let outcome = runtime()
        .check_availability(&custom_provider(&server, "gpt-4o-mini"))
        .await;

    assert_eq!(outcome.http_status, 200);
    assert!(outcome.report.available);
    assert_eq!(outcome.report.model_exists, Some(true));

    server.shutdown();
    assert_eq!(server.captured_request_paths(), vec!["/models"]);
}

#[tokio::test]
async fn test_availability_check_surfaces_upstream_401() {
    let mut server = MockServer::start(vec![MockResponse::with_status(
        401,
        r#"{"error":{"message":"Incorrect API key provided","type":"invalid_request_error"}}"#,
    )]);

    let outcome = runtime()
        .check_availability(&custom_provider(&server, "gpt-4o-mini"))
        .await;

    assert_eq!(outcome.http_status, 401);
    assert!(!outcome.report.available);
    assert_eq!(
        outcome.report.error.as_deref(),
        Some("Incorrect API key provided")
    );
    server.shutdown();
}

#[tokio::test]
async fn test_translate_text_file_end_to_end() {
    let mut server = MockServer::start(vec![MockResponse::json(
        r#"{"choices":[{"message":{"content":"# Hola\n\nContenido."}}]}"#,
    )]);

    let translated = runtime()
        .translate_file(&FileTranslationRequest {
            bytes: b"# Hello\n\nSome content.".to_vec(),
            media_type: "text/markdown".to_string(),
            file_name: "readme.md".to_string(),
            source_lang: "en".to_string(),
            target_lang: "es".to_string(),
            provider: custom_provider(&server, "gpt-4o-mini"),
        })
        .await
        .expect("file translation should succeed");

    assert_eq!(translated, "# Hola\n\nContenido.");

    server.shutdown();
    let raw_request = &server.captured_requests()[0];
    assert!(raw_request.contains("Preserve all markdown formatting"));
    assert!(raw_request.contains("# Hello"));
}

#[tokio::test]
async fn test_translate_image_file_sends_inline_data_url() {
    let mut server = MockServer::start(vec![MockResponse::json(
        r#"{"choices":[{"message":{"content":"ORIGINAL TEXT:\nhi\n\nTRANSLATED TEXT:\nhola"}}]}"#,
    )]);

    let translated = runtime()
        .translate_file(&FileTranslationRequest {
            bytes: vec![0x89, 0x50, 0x4E, 0x47],
            media_type: "image/png".to_string(),
            file_name: "scan.png".to_string(),
            source_lang: "en".to_string(),
            target_lang: "es".to_string(),
            provider: custom_provider(&server, "gpt-4o"),
        })
        .await
        .expect("image translation should succeed");

    assert!(translated.contains("ORIGINAL TEXT:"));
    assert!(translated.contains("TRANSLATED TEXT:"));

    server.shutdown();
    let raw_request = &server.captured_requests()[0];
    assert!(raw_request.contains("data:image/png;base64,"));
    assert!(raw_request.contains(r#""type":"image_url""#));
    // Custom arm keeps the requested model.
    assert!(raw_request.contains(r#""model":"gpt-4o""#));
}

fn read_http_request_with_body(stream: &mut std::net::TcpStream) -> String {
    let mut request = Vec::new();
    let mut chunk = [0_u8; 4096];

    let header_end = loop {
        match stream.read(&mut chunk) {
            Ok(0) => break None,
            Ok(bytes_read) => {
                request.extend_from_slice(&chunk[..bytes_read]);
                if let Some(position) = request
                    .windows(4)
                    .position(|window| window == b"\r\n\r\n")
                {
                    break Some(position + 4);
                }
            }
            Err(error)
                if error.kind() == std::io::ErrorKind::WouldBlock
                    || error.kind() == std::io::ErrorKind::TimedOut =>
            {
                break None;
            }
            Err(error) => panic!("failed reading request: {error}"),
        }
    };

    if let Some(header_end) = header_end {
        let headers = String::from_utf8_lossy(&request[..header_end]).to_string();
        let content_length = headers
            .lines()
            .find_map(|line| {
                let (name, value) = line.split_once(':')?;
                if name.trim().eq_ignore_ascii_case("content-length") {
                    value.trim().parse::<usize>().ok()
                } else {
                    None
                }
            })
            .unwrap_or(0);

        while request.len() < header_end + content_length {
            match stream.read(&mut chunk) {
                Ok(0) => break,
                Ok(bytes_read) => request.extend_from_slice(&chunk[..bytes_read]),
                Err(error)
                    if error.kind() == std::io::ErrorKind::WouldBlock
                        || error.kind() == std::io::ErrorKind::TimedOut =>
                {
                    break;
                }
                Err(error) => panic!("failed reading request body: {error}"),
            }
        }
    }

    String::from_utf8_lossy(&request).to_string()
}

fn build_http_response(response: &MockResponse) -> String {
    format!(
        "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        response.status_code,
        status_reason(response.status_code),
        response.body.len(),
        response.body,
    )
}

fn status_reason(status_code: u16) -> &'static str {
    match status_code {
        200 => "OK",
        401 => "Unauthorized",
        500 => "Internal Server Error",
        _ => "Unknown",
    }
}
