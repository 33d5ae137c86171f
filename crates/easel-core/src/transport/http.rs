//! HTTP transport for native platforms.
//!
//! Each submitted command runs on a short-lived worker thread that opens a
//! TCP connection, writes a single `POST`, reads the reply, and reports back
//! over a channel drained by `poll`. The request cycle uses
//! `Connection: close`, so one connection carries exactly one command.

use super::{Transport, TransportError, TransportEvent};
use std::io::{Read, Write};
use std::net::{TcpStream, ToSocketAddrs};
use std::sync::mpsc::{Receiver, Sender, channel};
use std::thread::{self, JoinHandle};
use std::time::Duration;
use url::Url;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);
const WRITE_TIMEOUT: Duration = Duration::from_secs(5);
const READ_TIMEOUT: Duration = Duration::from_secs(30);

/// Parsed endpoint pieces needed to frame a request.
#[derive(Debug, Clone)]
struct Endpoint {
    host: String,
    port: u16,
    /// `Host` header value (host, plus port when non-default).
    authority: String,
    /// Path and query, as sent on the request line.
    target: String,
}

impl Endpoint {
    fn parse(endpoint: &str) -> Result<Self, TransportError> {
        let url =
            Url::parse(endpoint).map_err(|e| TransportError::InvalidEndpoint(e.to_string()))?;
        // TLS is a deployment concern (terminate it in a local proxy); the
        // client itself only speaks plain HTTP.
        if url.scheme() != "http" {
            return Err(TransportError::UnsupportedScheme(url.scheme().to_string()));
        }
        let host = url
            .host_str()
            .ok_or_else(|| TransportError::InvalidEndpoint("missing host".into()))?
            .to_string();
        let port = url.port_or_known_default().unwrap_or(80);
        let authority = match url.port() {
            Some(p) => format!("{host}:{p}"),
            None => host.clone(),
        };
        let mut target = url.path().to_string();
        if let Some(q) = url.query() {
            target.push('?');
            target.push_str(q);
        }
        Ok(Self {
            host,
            port,
            authority,
            target,
        })
    }
}

/// Worker-thread HTTP/1.1 client.
pub struct HttpTransport {
    endpoint: Endpoint,
    event_tx: Sender<TransportEvent>,
    event_rx: Receiver<TransportEvent>,
    _worker: Option<JoinHandle<()>>,
}

impl HttpTransport {
    pub fn new(endpoint: &str) -> Result<Self, TransportError> {
        let endpoint = Endpoint::parse(endpoint)?;
        let (event_tx, event_rx) = channel();
        Ok(Self {
            endpoint,
            event_tx,
            event_rx,
            _worker: None,
        })
    }
}

impl Transport for HttpTransport {
    fn submit(&mut self, body: String) -> Result<(), TransportError> {
        let endpoint = self.endpoint.clone();
        let event_tx = self.event_tx.clone();
        let handle = thread::spawn(move || {
            log::debug!("POST http://{}{}", endpoint.authority, endpoint.target);
            let event = match request(&endpoint, &body) {
                Ok((status, body)) => TransportEvent::Completed { status, body },
                Err(message) => {
                    log::warn!("request failed: {message}");
                    TransportEvent::Failed { message }
                }
            };
            let _ = event_tx.send(event);
        });
        self._worker = Some(handle);
        Ok(())
    }

    fn poll(&mut self) -> Vec<TransportEvent> {
        let mut events = Vec::new();
        while let Ok(event) = self.event_rx.try_recv() {
            events.push(event);
        }
        events
    }
}

/// Run one blocking request cycle on the worker thread.
fn request(endpoint: &Endpoint, body: &str) -> Result<(u16, String), String> {
    let addr = (endpoint.host.as_str(), endpoint.port)
        .to_socket_addrs()
        .map_err(|e| format!("cannot resolve {}: {e}", endpoint.host))?
        .next()
        .ok_or_else(|| format!("no address for {}", endpoint.host))?;

    let mut stream = TcpStream::connect_timeout(&addr, CONNECT_TIMEOUT)
        .map_err(|e| format!("connect to {addr} failed: {e}"))?;
    let _ = stream.set_write_timeout(Some(WRITE_TIMEOUT));
    let _ = stream.set_read_timeout(Some(READ_TIMEOUT));

    let head = format!(
        "POST {} HTTP/1.1\r\nHost: {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        endpoint.target,
        endpoint.authority,
        body.len(),
    );
    stream
        .write_all(head.as_bytes())
        .and_then(|_| stream.write_all(body.as_bytes()))
        .map_err(|e| format!("send failed: {e}"))?;

    let mut raw = Vec::new();
    stream
        .read_to_end(&mut raw)
        .map_err(|e| format!("receive failed: {e}"))?;

    parse_response(&raw)
}

/// Parse a raw HTTP/1.1 response into status and body text.
fn parse_response(raw: &[u8]) -> Result<(u16, String), String> {
    let boundary = find_header_end(raw).ok_or("malformed response: no header terminator")?;
    let head = String::from_utf8_lossy(&raw[..boundary]);
    let mut lines = head.split("\r\n");

    let status_line = lines.next().unwrap_or_default();
    let status = status_line
        .split_whitespace()
        .nth(1)
        .and_then(|s| s.parse::<u16>().ok())
        .ok_or_else(|| format!("malformed status line: {status_line:?}"))?;

    let mut content_length: Option<usize> = None;
    let mut chunked = false;
    for line in lines {
        let Some((name, value)) = line.split_once(':') else {
            continue;
        };
        let value = value.trim();
        if name.eq_ignore_ascii_case("content-length") {
            content_length = value.parse().ok();
        } else if name.eq_ignore_ascii_case("transfer-encoding")
            && value.eq_ignore_ascii_case("chunked")
        {
            chunked = true;
        }
    }

    let payload = &raw[boundary + 4..];
    let body = if chunked {
        decode_chunked(payload)?
    } else if let Some(len) = content_length {
        if payload.len() < len {
            return Err(format!(
                "truncated body: got {} of {len} bytes",
                payload.len()
            ));
        }
        payload[..len].to_vec()
    } else {
        // Connection: close delimits the body.
        payload.to_vec()
    };

    Ok((status, String::from_utf8_lossy(&body).into_owned()))
}

fn find_header_end(raw: &[u8]) -> Option<usize> {
    raw.windows(4).position(|w| w == b"\r\n\r\n")
}

/// Decode a `Transfer-Encoding: chunked` body.
fn decode_chunked(mut payload: &[u8]) -> Result<Vec<u8>, String> {
    let mut body = Vec::new();
    loop {
        let line_end = payload
            .windows(2)
            .position(|w| w == b"\r\n")
            .ok_or("malformed chunk header")?;
        let size_str = String::from_utf8_lossy(&payload[..line_end]);
        let size = usize::from_str_radix(size_str.trim().trim_end_matches(';'), 16)
            .map_err(|_| format!("malformed chunk size: {size_str:?}"))?;
        payload = &payload[line_end + 2..];
        if size == 0 {
            return Ok(body);
        }
        if payload.len() < size {
            return Err("truncated chunk".into());
        }
        body.extend_from_slice(&payload[..size]);
        payload = &payload[size..];
        // Skip the CRLF trailing each chunk.
        payload = payload.strip_prefix(b"\r\n").unwrap_or(payload);
    }
}
