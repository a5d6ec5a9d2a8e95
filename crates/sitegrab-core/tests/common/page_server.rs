//! Minimal HTTP/1.1 server for integration tests.
//!
//! Serves GET requests from a script of `(status, body)` responses, one per
//! request; the last entry repeats. Records every request's path and
//! User-Agent so tests can count attempts.

#![allow(dead_code)]

use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::{Arc, Mutex};
use std::thread;

#[derive(Debug, Clone)]
pub struct Hit {
    pub path: String,
    pub user_agent: Option<String>,
}

#[derive(Clone)]
pub struct PageServer {
    pub base_url: String,
    hits: Arc<Mutex<Vec<Hit>>>,
}

impl PageServer {
    pub fn hits(&self) -> Vec<Hit> {
        self.hits.lock().unwrap().clone()
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path.trim_start_matches('/'))
    }
}

/// Starts a server answering every request with `200` and `body`.
pub fn serve_ok(body: &str) -> PageServer {
    serve_script(vec![(200, body.to_string())])
}

/// Starts a server that answers request N with `script[N]` (last entry repeats).
pub fn serve_script(script: Vec<(u16, String)>) -> PageServer {
    assert!(!script.is_empty());
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let hits = Arc::new(Mutex::new(Vec::new()));
    let script = Arc::new(script);
    let hits_srv = Arc::clone(&hits);
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            handle(stream, &script, &hits_srv);
        }
    });
    PageServer {
        base_url: format!("http://127.0.0.1:{}/", port),
        hits,
    }
}

fn handle(mut stream: std::net::TcpStream, script: &[(u16, String)], hits: &Mutex<Vec<Hit>>) {
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
    let hit = parse_request(request);
    let index = {
        let mut hits = hits.lock().unwrap();
        hits.push(hit);
        hits.len() - 1
    };
    let (status, body) = &script[index.min(script.len() - 1)];
    let response = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: text/html; charset=utf-8\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        reason(*status),
        body.len(),
        body
    );
    let _ = stream.write_all(response.as_bytes());
    let _ = stream.flush();
}

fn parse_request(request: &str) -> Hit {
    let mut lines = request.lines();
    let path = lines
        .next()
        .and_then(|l| l.split_whitespace().nth(1))
        .unwrap_or("/")
        .to_string();
    let user_agent = lines
        .filter_map(|l| l.split_once(':'))
        .find(|(k, _)| k.trim().eq_ignore_ascii_case("user-agent"))
        .map(|(_, v)| v.trim().to_string());
    Hit { path, user_agent }
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        404 => "Not Found",
        500 => "Internal Server Error",
        503 => "Service Unavailable",
        _ => "Status",
    }
}
