//! Shared helpers for black-box CLI tests.

use std::env;
use std::io::{BufRead, BufReader, Write};
use std::net::TcpListener;
use std::path::PathBuf;
use std::process::{Command, Output};
use std::thread::{self, JoinHandle};

fn manifest_dir() -> PathBuf {
    PathBuf::from(env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".into()))
}

pub fn fixture_catalog() -> PathBuf {
    manifest_dir().join("tests/fixtures/catalog.json")
}

/// Run `mfind` against the fixture catalog with an isolated environment.
pub fn run_mfind(args: &[&str]) -> Output {
    let config_home = tempfile::tempdir().expect("tempdir");
    Command::new(env!("CARGO_BIN_EXE_mfind"))
        .arg("--catalog")
        .arg(fixture_catalog())
        .args(args)
        .env_remove("MFIND_BACKEND_URL")
        .env_remove("MFIND_CATALOG")
        .env("XDG_CONFIG_HOME", config_home.path())
        .env("MFIND_LOG", "warn")
        .output()
        .expect("run mfind")
}

pub fn stdout_of(output: &Output) -> String {
    assert!(
        output.status.success(),
        "mfind failed: {}\nstderr:\n{}",
        output.status,
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).to_string()
}

pub fn json_of(output: &Output) -> serde_json::Value {
    serde_json::from_str(&stdout_of(output)).expect("parse mfind JSON output")
}

/// Base URL of a port nothing listens on.
pub fn dead_backend() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);
    format!("http://{addr}")
}

/// Serve one HTTP response with `body`, returning the base URL and a handle
/// that yields the request line the client sent.
pub fn serve_once(status: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let base = format!("http://{}", listener.local_addr().expect("addr"));
    let handle = thread::spawn(move || {
        let (mut stream, _) = listener.accept().expect("accept");
        let mut reader = BufReader::new(stream.try_clone().expect("clone stream"));
        let mut request_line = String::new();
        reader.read_line(&mut request_line).expect("read request line");
        loop {
            let mut header = String::new();
            if reader.read_line(&mut header).expect("read header") == 0 || header == "\r\n" {
                break;
            }
        }
        write!(
            stream,
            "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        )
        .expect("write response");
        request_line.trim_end().to_string()
    });
    (base, handle)
}
