// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Peter Carlton

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashMap;
use std::io::{BufRead, BufReader, Write};
use std::net::TcpListener;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use tfclass::annot::client::AnnotationSource;
use tfclass::errors::LookupError;

/// In-memory stand-in for UniProtKB: function texts per id, everything else is a 404.
pub struct FakeUniprot {
    texts: HashMap<String, Result<String, LookupError>>,
    pub calls: RefCell<Vec<String>>,
}

impl FakeUniprot {
    pub fn new() -> Self {
        FakeUniprot {
            texts: HashMap::new(),
            calls: RefCell::new(Vec::new()),
        }
    }

    pub fn with_text(mut self, id: &str, text: &str) -> Self {
        self.texts.insert(String::from(id), Ok(text.to_lowercase()));
        self
    }

    pub fn with_error(mut self, id: &str, err: LookupError) -> Self {
        self.texts.insert(String::from(id), Err(err));
        self
    }
}

impl AnnotationSource for FakeUniprot {
    fn fetch_function_text(&self, id: &str) -> Result<String, LookupError> {
        self.calls.borrow_mut().push(String::from(id));
        self.texts
            .get(id)
            .cloned()
            .unwrap_or(Err(LookupError::Status(404)))
    }
}

/// Serves exactly one HTTP response on a loopback port. Returns the base URL to query and a
/// handle yielding the request line the server received.
pub fn serve_once(status: &str, body: &str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind loopback");
    let addr = listener.local_addr().expect("local address");
    let response = format!(
        "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        body.len(),
        body
    );
    let handle = thread::spawn(move || {
        let (mut stream, _) = listener.accept().expect("accept");
        let mut reader = BufReader::new(stream.try_clone().expect("clone stream"));
        let mut request_line = String::new();
        reader.read_line(&mut request_line).expect("request line");
        // Skip headers up to the blank line
        loop {
            let mut line = String::new();
            let n = reader.read_line(&mut line).expect("header line");
            if n == 0 || line == "\r\n" || line == "\n" {
                break;
            }
        }
        stream.write_all(response.as_bytes()).expect("write response");
        stream.flush().expect("flush");
        String::from(request_line.trim_end())
    });
    (format!("http://{}/uniprotkb", addr), handle)
}

/// Accepts one connection and keeps it open for `hold` without ever answering.
pub fn serve_silence(hold: Duration) -> (String, JoinHandle<()>) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind loopback");
    let addr = listener.local_addr().expect("local address");
    let handle = thread::spawn(move || {
        let (_stream, _) = listener.accept().expect("accept");
        thread::sleep(hold);
    });
    (format!("http://{}/uniprotkb", addr), handle)
}
