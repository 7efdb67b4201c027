//! Minimal HTTP/1.1 server standing in for the document endpoint in integration tests.
//!
//! Answers `GET ...?NrSolicitacao=<id>` with `document <id>`. It also accepts
//! absolute-form request targets, so it can be configured as the forward proxy.
//! Special identifiers:
//! - `drop...`: connection closed without a response
//! - `missing...`: 404 with body `not found`
//! - `hang...`: response delayed by `HANG_FOR`

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

pub const QUERY_KEY: &str = "NrSolicitacao=";
pub const HANG_FOR: Duration = Duration::from_secs(5);

pub struct DocumentServer {
    /// e.g. "http://127.0.0.1:12345"
    pub base: String,
    hits: Arc<AtomicUsize>,
    targets: Arc<Mutex<Vec<String>>>,
}

impl DocumentServer {
    /// Endpoint root for direct (unproxied) requests.
    pub fn endpoint(&self) -> String {
        format!("{}/Resumo/ResumoVisualizar?{}", self.base, QUERY_KEY)
    }

    /// Number of requests received so far.
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    /// Raw request targets, in arrival order.
    pub fn targets(&self) -> Vec<String> {
        self.targets.lock().unwrap().clone()
    }
}

/// Starts a server in a background thread. It runs until the process exits.
pub fn start() -> DocumentServer {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let hits = Arc::new(AtomicUsize::new(0));
    let targets = Arc::new(Mutex::new(Vec::new()));
    let (h, t) = (Arc::clone(&hits), Arc::clone(&targets));
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let (h, t) = (Arc::clone(&h), Arc::clone(&t));
            thread::spawn(move || handle(stream, &h, &t));
        }
    });
    DocumentServer {
        base: format!("http://127.0.0.1:{}", port),
        hits,
        targets,
    }
}

fn handle(mut stream: TcpStream, hits: &AtomicUsize, targets: &Mutex<Vec<String>>) {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(Duration::from_secs(2)));
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
    let Some((method, target)) = parse_request_line(request) else {
        return;
    };
    hits.fetch_add(1, Ordering::SeqCst);
    targets.lock().unwrap().push(target.to_string());

    if !method.eq_ignore_ascii_case("GET") {
        let _ = stream.write_all(b"HTTP/1.1 405 Method Not Allowed\r\nContent-Length: 0\r\nConnection: close\r\n\r\n");
        return;
    }

    let id = target
        .rsplit_once(QUERY_KEY)
        .map(|(_, id)| id)
        .unwrap_or("");
    if id.starts_with("drop") {
        return;
    }
    if id.starts_with("hang") {
        thread::sleep(HANG_FOR);
    }
    let (status, body) = if id.starts_with("missing") {
        ("404 Not Found", "not found".to_string())
    } else {
        ("200 OK", format!("document {}", id))
    };
    let response = format!(
        "HTTP/1.1 {}\r\nContent-Type: text/html\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        body.len(),
        body
    );
    let _ = stream.write_all(response.as_bytes());
}

/// Returns (method, request target) from the request line.
fn parse_request_line(request: &str) -> Option<(&str, &str)> {
    let line = request.lines().next()?;
    let mut parts = line.split_whitespace();
    let method = parts.next()?;
    let target = parts.next()?;
    Some((method, target))
}
