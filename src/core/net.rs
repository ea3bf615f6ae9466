// src/core/net.rs
//
// Blocking HTTP with a small retry loop for transient failures.

use std::thread::sleep;
use std::time::Duration;

use reqwest::StatusCode;
use reqwest::blocking::{Client, RequestBuilder, Response};

use crate::config::consts::{REQUEST_TIMEOUT_SECS, RETRIES, RETRY_PAUSE_MS, USER_AGENT};
use crate::sheet::SheetError;

pub fn client() -> Result<Client, SheetError> {
    Client::builder()
        .user_agent(USER_AGENT)
        .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
        .build()
        .map_err(SheetError::Http)
}

fn is_transient(status: StatusCode) -> bool {
    status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error()
}

/// Which failures a request may be resent after.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Retry {
    /// Reads and full overwrites: connect errors, timeouts, 429 and 5xx.
    Idempotent,
    /// Appends and deletes: only failures where the server cannot have acted,
    /// i.e. connect errors and 429.
    Once,
}

impl Retry {
    fn on_status(self, status: StatusCode) -> bool {
        match self {
            Retry::Idempotent => is_transient(status),
            Retry::Once => status == StatusCode::TOO_MANY_REQUESTS,
        }
    }

    fn on_error(self, e: &reqwest::Error) -> bool {
        match self {
            Retry::Idempotent => e.is_connect() || e.is_timeout(),
            Retry::Once => e.is_connect() && !e.is_timeout(),
        }
    }
}

/// Send the request built by `make`, resending per `retry`.
/// Non-success statuses become `SheetError::Api` with the body text.
pub fn send<F>(what: &str, retry: Retry, make: F) -> Result<Response, SheetError>
where
    F: Fn() -> RequestBuilder,
{
    let mut attempt = 1;
    loop {
        let outcome = make().send();
        let again = match &outcome {
            Ok(resp) => retry.on_status(resp.status()),
            Err(e) => retry.on_error(e),
        };
        if again && attempt < RETRIES {
            log::warn!("{what}: transient failure on attempt {attempt}, retrying");
            sleep(Duration::from_millis(RETRY_PAUSE_MS.saturating_mul(u64::from(attempt))));
            attempt += 1;
            continue;
        }

        let resp = outcome.map_err(SheetError::Http)?;
        let status = resp.status();
        if status.is_success() {
            log::debug!("{what}: {status}");
            return Ok(resp);
        }
        let body = resp.text().unwrap_or_default();
        log::error!("{what}: {status} {body}");
        return Err(SheetError::Api { status: status.as_u16(), message: api_message(&body) });
    }
}

/// Pull `error.message` out of a Google API error body, else the raw text.
pub fn api_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            let err = v.get("error")?;
            err.get("message")
                .and_then(|m| m.as_str())
                .or_else(|| err.as_str())
                .map(|s| s.to_string())
        })
        .unwrap_or_else(|| body.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;

    /// Local server that counts requests and answers each one after `delay`.
    fn slow_server(delay: Duration) -> (String, Arc<AtomicUsize>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let url = format!("http://{}/", listener.local_addr().unwrap());
        let hits = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&hits);
        thread::spawn(move || {
            for stream in listener.incoming() {
                let Ok(mut stream) = stream else { continue };
                seen.fetch_add(1, Ordering::SeqCst);
                thread::spawn(move || {
                    let mut buf = [0u8; 4096];
                    let _ = stream.read(&mut buf);
                    thread::sleep(delay);
                    let _ = stream.write_all(b"HTTP/1.1 200 OK\r\ncontent-length: 2\r\nconnection: close\r\n\r\n{}");
                });
            }
        });
        (url, hits)
    }

    fn impatient_client() -> Client {
        Client::builder().timeout(Duration::from_millis(150)).build().unwrap()
    }

    #[test]
    fn timed_out_post_is_sent_once() {
        let (url, hits) = slow_server(Duration::from_millis(400));
        let http = impatient_client();
        let res = send("batchUpdate deleteDimension", Retry::Once, || {
            http.post(&url).body("{}")
        });
        assert!(res.is_err());
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn timed_out_read_is_retried() {
        let (url, hits) = slow_server(Duration::from_millis(400));
        let http = impatient_client();
        let res = send("values.get", Retry::Idempotent, || http.get(&url));
        assert!(res.is_err());
        assert_eq!(hits.load(Ordering::SeqCst), RETRIES as usize);
    }

    #[test]
    fn retry_policies_by_status() {
        assert!(Retry::Idempotent.on_status(StatusCode::BAD_GATEWAY));
        assert!(Retry::Once.on_status(StatusCode::TOO_MANY_REQUESTS));
        assert!(!Retry::Once.on_status(StatusCode::INTERNAL_SERVER_ERROR));
        assert!(!Retry::Once.on_status(StatusCode::GATEWAY_TIMEOUT));
    }

    #[test]
    fn transient_statuses() {
        assert!(is_transient(StatusCode::TOO_MANY_REQUESTS));
        assert!(is_transient(StatusCode::SERVICE_UNAVAILABLE));
        assert!(!is_transient(StatusCode::NOT_FOUND));
        assert!(!is_transient(StatusCode::FORBIDDEN));
    }

    #[test]
    fn api_message_variants() {
        let sheets = r#"{"error":{"code":404,"message":"Requested entity was not found.","status":"NOT_FOUND"}}"#;
        assert_eq!(api_message(sheets), "Requested entity was not found.");
        let oauth = r#"{"error":"invalid_grant","error_description":"Invalid JWT"}"#;
        assert_eq!(api_message(oauth), "invalid_grant");
        assert_eq!(api_message(" plain text \n"), "plain text");
    }
}
