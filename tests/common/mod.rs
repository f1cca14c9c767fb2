//! Shared fixtures for integration tests.

#![allow(dead_code)]

// std
use std::{
	io::{BufRead, BufReader, Read, Write},
	net::{Shutdown, TcpListener, TcpStream},
	thread,
	time::Duration,
};
// self
use tpauth::{
	client::{AsyncAuthClient, SyncAuthClient},
	http::{ReqwestBlockingHttpClient, ReqwestHttpClient},
	provider::ProviderDescriptor,
};

/// Username accepted by the mock providers.
pub const TEST_USERNAME: &str = "username";
/// Password accepted by the mock providers.
pub const TEST_PASSWORD: &str = "password";
/// Session token issued by the mock providers.
pub const TEST_TOKEN: &str = "valid_token";
/// Address nothing listens on, so connecting fails before any reply exists.
pub const UNREACHABLE_BASE_URL: &str = "http://127.0.0.1:1";

/// Success payload returned by mock providers, including a field the client must ignore.
pub fn profile_body() -> String {
	serde_json::json!({
		"data": {
			"auth": true,
			"id": 123,
			"token": TEST_TOKEN,
			"name": "John Doe",
			"alias": "johnd",
			"email": "john.doe@example.com",
			"phone": "1234567890",
			"roles": [1, 2, 3],
			"permissions": [4, 5, 6]
		}
	})
	.to_string()
}

/// Builds a descriptor rooted at `base_url` with the default endpoint layout.
pub fn test_descriptor(base_url: &str) -> ProviderDescriptor {
	ProviderDescriptor::from_base_url(base_url).expect("Failed to build test provider descriptor.")
}

/// Constructs an [`AsyncAuthClient`] backed by reqwest for the provided descriptor.
pub fn build_reqwest_async_client(
	descriptor: ProviderDescriptor,
) -> AsyncAuthClient<ReqwestHttpClient> {
	AsyncAuthClient::with_http_client(descriptor, ReqwestHttpClient::default())
}

/// Constructs a [`SyncAuthClient`] backed by blocking reqwest for the provided descriptor.
///
/// Must be called outside of an async runtime, as required by `reqwest::blocking`.
pub fn build_reqwest_sync_client(
	descriptor: ProviderDescriptor,
) -> SyncAuthClient<ReqwestBlockingHttpClient> {
	let http_client =
		ReqwestBlockingHttpClient::new().expect("Failed to build blocking reqwest client.");

	SyncAuthClient::with_http_client(descriptor, http_client)
}

/// Starts a raw HTTP server whose replies carry `status_line` but stop partway through the body.
///
/// Every reply announces a 100-byte body, sends five bytes, and closes the connection. Returns the
/// server's base address.
pub fn spawn_truncated_body_server(status_line: &'static str) -> String {
	let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind raw test server.");
	let addr = listener.local_addr().expect("Raw test server should have a local address.");

	thread::spawn(move || {
		for stream in listener.incoming().flatten() {
			thread::spawn(move || reply_with_truncated_body(stream, status_line));
		}
	});

	format!("http://{addr}")
}

fn reply_with_truncated_body(mut stream: TcpStream, status_line: &str) {
	let _ = stream.set_read_timeout(Some(Duration::from_secs(2)));

	if drain_request(&stream).is_err() {
		return;
	}

	let reply =
		format!("{status_line}\r\nContent-Length: 100\r\nConnection: close\r\n\r\nshort");

	let _ = stream.write_all(reply.as_bytes());
	let _ = stream.flush();
	let _ = stream.shutdown(Shutdown::Write);
	// Wait for the client to hang up so the socket closes without a reset.
	let _ = stream.read_to_end(&mut Vec::new());
}

fn drain_request(stream: &TcpStream) -> std::io::Result<()> {
	let mut reader = BufReader::new(stream);
	let mut content_length = 0;

	loop {
		let mut line = String::new();

		if reader.read_line(&mut line)? == 0 || line == "\r\n" {
			break;
		}
		if let Some((name, value)) = line.split_once(':') {
			if name.eq_ignore_ascii_case("content-length") {
				content_length = value.trim().parse().unwrap_or(0);
			}
		}
	}

	reader.read_exact(&mut vec![0; content_length])
}
