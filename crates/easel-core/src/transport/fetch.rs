//! Fetch-based transport for WASM.
//!
//! Requests run as browser `fetch` calls driven by `spawn_local`; outcomes
//! are collected into a shared buffer and must be polled, mirroring the
//! native worker-thread transport.

use super::{Transport, TransportError, TransportEvent};
use std::cell::RefCell;
use std::rc::Rc;
use url::Url;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;

pub struct FetchTransport {
    endpoint: String,
    events: Rc<RefCell<Vec<TransportEvent>>>,
}

impl FetchTransport {
    pub fn new(endpoint: &str) -> Result<Self, TransportError> {
        let url =
            Url::parse(endpoint).map_err(|e| TransportError::InvalidEndpoint(e.to_string()))?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(TransportError::UnsupportedScheme(url.scheme().to_string()));
        }
        Ok(Self {
            endpoint: endpoint.to_string(),
            events: Rc::new(RefCell::new(Vec::new())),
        })
    }
}

impl Transport for FetchTransport {
    fn submit(&mut self, body: String) -> Result<(), TransportError> {
        let endpoint = self.endpoint.clone();
        let events = Rc::clone(&self.events);
        wasm_bindgen_futures::spawn_local(async move {
            let event = match do_fetch(&endpoint, &body).await {
                Ok((status, body)) => TransportEvent::Completed { status, body },
                Err(message) => {
                    log::warn!("fetch failed: {message}");
                    TransportEvent::Failed { message }
                }
            };
            events.borrow_mut().push(event);
        });
        Ok(())
    }

    fn poll(&mut self) -> Vec<TransportEvent> {
        std::mem::take(&mut *self.events.borrow_mut())
    }
}

async fn do_fetch(url: &str, body: &str) -> Result<(u16, String), String> {
    let opts = web_sys::RequestInit::new();
    opts.set_method("POST");
    opts.set_mode(web_sys::RequestMode::Cors);
    opts.set_body(&JsValue::from_str(body));

    let request = web_sys::Request::new_with_str_and_init(url, &opts).map_err(js_err)?;
    request
        .headers()
        .set("Content-Type", "application/json")
        .map_err(js_err)?;

    let window = web_sys::window().ok_or_else(|| "no window".to_string())?;
    let response = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(js_err)?;
    let response: web_sys::Response = response
        .dyn_into()
        .map_err(|_| "fetch returned a non-Response value".to_string())?;

    let text = JsFuture::from(response.text().map_err(js_err)?)
        .await
        .map_err(js_err)?;
    Ok((response.status(), text.as_string().unwrap_or_default()))
}

fn js_err(value: JsValue) -> String {
    value
        .as_string()
        .unwrap_or_else(|| format!("{value:?}"))
}
