//! Minimal HTTP/1.1 server for pipeline integration tests.
//!
//! Serves fixed text bodies keyed by request path; unknown paths get a 404.
//! Can delay responses to simulate slow pages, and tracks how many requests
//! were in flight at once so tests can assert on the worker pool size.

use std::collections::HashMap;
use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

#[derive(Debug, Clone, Copy, Default)]
pub struct MatchServerOptions {
    /// Sleep this long before writing each response (simulates slow pages).
    pub response_delay: Option<Duration>,
}

/// Request bookkeeping shared with the test.
#[derive(Debug, Default)]
pub struct ServerStats {
    active: AtomicUsize,
    peak: AtomicUsize,
    hits: AtomicUsize,
}

impl ServerStats {
    /// Highest number of requests that were in flight at the same time.
    pub fn peak_in_flight(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }

    /// Total requests served, 404s included.
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    fn enter(&self) {
        let now = self.active.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);
        self.hits.fetch_add(1, Ordering::SeqCst);
    }

    fn leave(&self) {
        self.active.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Starts a server in a background thread serving `pages` (path -> body).
/// Returns the base URL without a trailing slash (e.g. "http://127.0.0.1:12345").
/// The server runs until the process exits.
pub fn start(pages: &[(&str, &str)]) -> String {
    let (url, _stats) = start_with_options(pages, MatchServerOptions::default());
    url
}

/// Like `start` but with options and a stats handle for concurrency asserts.
pub fn start_with_options(
    pages: &[(&str, &str)],
    opts: MatchServerOptions,
) -> (String, Arc<ServerStats>) {
    let pages: Arc<HashMap<String, String>> = Arc::new(
        pages
            .iter()
            .map(|(path, body)| (path.to_string(), body.to_string()))
            .collect(),
    );
    let stats = Arc::new(ServerStats::default());
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();

    let server_stats = Arc::clone(&stats);
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let pages = Arc::clone(&pages);
            let stats = Arc::clone(&server_stats);
            thread::spawn(move || handle(stream, &pages, &stats, opts));
        }
    });

    (format!("http://127.0.0.1:{}", port), stats)
}

fn handle(
    mut stream: TcpStream,
    pages: &HashMap<String, String>,
    stats: &ServerStats,
    opts: MatchServerOptions,
) {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(5)));
    let _ = stream.set_write_timeout(Some(Duration::from_secs(5)));
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

    stats.enter();
    if let Some(delay) = opts.response_delay {
        thread::sleep(delay);
    }
    let response = match request_path(request).and_then(|path| pages.get(&path)) {
        Some(body) => format!(
            "HTTP/1.1 200 OK\r\nContent-Length: {}\r\n\r\n{}",
            body.len(),
            body
        ),
        None => "HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\n\r\n".to_string(),
    };
    let _ = stream.write_all(response.as_bytes());
    stats.leave();
}

/// Returns the path of a GET request ("GET /x HTTP/1.1" -> "/x").
fn request_path(request: &str) -> Option<String> {
    let first = request.lines().next()?;
    let mut parts = first.split_whitespace();
    let method = parts.next()?;
    if !method.eq_ignore_ascii_case("GET") {
        return None;
    }
    parts.next().map(|path| path.to_string())
}
