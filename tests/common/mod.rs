//! Common test utilities

#![allow(dead_code)]

use assert_cmd::Command;
use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::thread;

/// A request as seen by the stub service
#[derive(Debug, Clone)]
pub struct StubRequest {
    pub authorization: Option<String>,
    pub body: serde_json::Value,
}

impl StubRequest {
    pub fn prompt(&self) -> &str {
        self.body["prompt"].as_str().unwrap_or_default()
    }

    pub fn is_key_check(&self) -> bool {
        self.body["max_tokens"] == 1 && self.prompt() == "test"
    }
}

type Responder = Box<dyn Fn(&StubRequest) -> (u16, String) + Send + 'static>;

/// Minimal HTTP server standing in for the completions endpoint
pub struct StubServer {
    pub base_url: String,
    requests: Arc<Mutex<Vec<StubRequest>>>,
}

impl StubServer {
    /// Start a server answering every request through `responder`
    pub fn start<F>(responder: F) -> Self
    where
        F: Fn(&StubRequest) -> (u16, String) + Send + 'static,
    {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let requests = Arc::new(Mutex::new(Vec::new()));
        let recorded = Arc::clone(&requests);
        let responder: Responder = Box::new(responder);

        thread::spawn(move || {
            for stream in listener.incoming() {
                let Ok(mut stream) = stream else { continue };
                let Some(request) = read_request(&mut stream) else {
                    continue;
                };
                let (status, body) = responder(&request);
                recorded.lock().unwrap().push(request);

                let response = format!(
                    "HTTP/1.1 {} Stub\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status,
                    body.len(),
                    body
                );
                let _ = stream.write_all(response.as_bytes());
                let _ = stream.flush();
            }
        });

        StubServer {
            base_url: format!("http://{}/v1", addr),
            requests,
        }
    }

    /// Accept any key and answer every call with `text`
    pub fn replying(text: &str) -> Self {
        let body = completion_body(text);
        Self::start(move |_| (200, body.clone()))
    }

    pub fn requests(&self) -> Vec<StubRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Requests other than key checks
    pub fn generation_requests(&self) -> Vec<StubRequest> {
        self.requests().into_iter().filter(|r| !r.is_key_check()).collect()
    }
}

/// A successful completions response body
pub fn completion_body(text: &str) -> String {
    serde_json::json!({ "choices": [{ "text": text, "index": 0 }] }).to_string()
}

/// An error body in the service's format
pub fn error_body(message: &str) -> String {
    serde_json::json!({ "error": { "message": message, "type": "test" } }).to_string()
}

fn read_request(stream: &mut TcpStream) -> Option<StubRequest> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];

    let header_end = loop {
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos;
        }
        let n = stream.read(&mut chunk).ok()?;
        if n == 0 {
            return None;
        }
        buf.extend_from_slice(&chunk[..n]);
    };

    let head = String::from_utf8_lossy(&buf[..header_end]).to_string();
    let header = |name: &str| {
        head.lines().find_map(|line| {
            let (key, value) = line.split_once(':')?;
            if key.trim().eq_ignore_ascii_case(name) {
                Some(value.trim().to_string())
            } else {
                None
            }
        })
    };

    let length: usize = header("content-length")
        .and_then(|v| v.parse().ok())
        .unwrap_or(0);
    let body_start = header_end + 4;
    while buf.len() < body_start + length {
        let n = stream.read(&mut chunk).ok()?;
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
    }

    let body = serde_json::from_slice(&buf[body_start..]).unwrap_or(serde_json::Value::Null);
    Some(StubRequest {
        authorization: header("authorization"),
        body,
    })
}

/// The binary, isolated from the user's environment and pointed at `base_url`
pub fn cmdgen(dir: &Path, base_url: &str) -> Command {
    let mut cmd = Command::cargo_bin("cmdgen").unwrap();
    cmd.current_dir(dir)
        .env("HOME", dir)
        .env("XDG_CONFIG_HOME", dir)
        .env("CMDGEN_API_BASE", base_url)
        .env("OPENAI_API_KEY", "sk-test")
        .env("SHELL", "/bin/zsh")
        .env_remove("CMDGEN_CONFIG");
    cmd
}
