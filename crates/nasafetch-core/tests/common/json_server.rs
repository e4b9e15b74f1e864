//! Minimal HTTP/1.1 server for integration tests.
//!
//! Answers every request with one fixed status and body, and records the
//! request target and headers so tests can inspect what went on the wire.

use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::{Arc, Mutex};
use std::thread;

/// What the server saw for one request.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    /// Path plus query, e.g. `/api/v3/events?limit=5`.
    pub target: String,
    pub headers: Vec<(String, String)>,
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Decoded query pairs of the target.
    pub fn query(&self) -> Vec<(String, String)> {
        let url = url::Url::parse(&format!("http://localhost{}", self.target)).expect("target");
        url.query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect()
    }
}

pub type Recorded = Arc<Mutex<Vec<RecordedRequest>>>;

/// Starts a server in a background thread that answers with `status` and `body`.
/// Returns the base URL (e.g. "http://127.0.0.1:12345/") and the request log.
/// The server runs until the process exits.
pub fn start(status: u16, body: &str) -> (String, Recorded) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let body = Arc::new(body.as_bytes().to_vec());
    let recorded: Recorded = Arc::new(Mutex::new(Vec::new()));
    let log = Arc::clone(&recorded);
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let body = Arc::clone(&body);
            let log = Arc::clone(&log);
            thread::spawn(move || handle(stream, status, &body, &log));
        }
    });
    (format!("http://127.0.0.1:{}/", port), recorded)
}

fn handle(mut stream: std::net::TcpStream, status: u16, body: &[u8], log: &Recorded) {
    let _ = stream.set_read_timeout(Some(std::time::Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(std::time::Duration::from_secs(2)));
    let mut buf = [0u8; 8192];
    let n = match stream.read(&mut buf) {
        Ok(0) => return,
        Ok(n) => n,
        Err(_) => return,
    };
    let request = match std::str::from_utf8(&buf[..n]) {
        Ok(s) => s,
        Err(_) => return,
    };
    log.lock().unwrap().push(parse_request(request));

    let response = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        status,
        reason(status),
        body.len()
    );
    let _ = stream.write_all(response.as_bytes());
    let _ = stream.write_all(body);
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        401 => "Unauthorized",
        404 => "Not Found",
        500 => "Internal Server Error",
        _ => "Status",
    }
}

fn parse_request(request: &str) -> RecordedRequest {
    let mut lines = request.lines();
    let mut parts = lines.next().unwrap_or("").split_whitespace();
    let method = parts.next().unwrap_or("").to_string();
    let target = parts.next().unwrap_or("").to_string();
    let mut headers = Vec::new();
    for line in lines {
        let line = line.trim();
        if line.is_empty() {
            break;
        }
        if let Some((name, value)) = line.split_once(':') {
            headers.push((name.trim().to_string(), value.trim().to_string()));
        }
    }
    RecordedRequest {
        method,
        target,
        headers,
    }
}
