use std::sync::mpsc;
use std::thread;

use anyhow::Context;
use log::debug;
use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;

use shogi_client::{HttpMethod, HttpReply, OutgoingRequest, RemoteRequest, RemoteResponse};


pub struct HttpTransport {
    client: Client,
    base_url: String,
}

impl HttpTransport {
    pub fn new(base_url: &str) -> anyhow::Result<Self> {
        let client = Client::builder().build().context("Creating HTTP client")?;
        Ok(HttpTransport {
            client,
            base_url: base_url.trim_end_matches('/').to_owned(),
        })
    }

    // `Err` means the transport failed; any HTTP status is `Ok`.
    pub fn perform(&self, request: &RemoteRequest) -> Result<HttpReply, String> {
        self.try_perform(request).map_err(|err| format!("{:#}", err))
    }

    fn try_perform(&self, request: &RemoteRequest) -> anyhow::Result<HttpReply> {
        let url = format!("{}{}", self.base_url, request.path());
        let builder = match request.method() {
            HttpMethod::Get => self.client.get(&url),
            HttpMethod::Post => self.client.post(&url),
        };
        let builder = match request.body() {
            Some(body) => builder.header(CONTENT_TYPE, "application/json").body(body),
            None => builder,
        };
        let response = builder
            .send()
            .with_context(|| format!("{} {}", request.method().as_str(), url))?;
        let status = response.status().as_u16();
        let text = response.text().context("Reading response body")?;
        Ok(HttpReply::from_text(status, &text))
    }
}

// Performs requests one by one in the order the client issued them. Stops when either side of
// the pipe is gone.
pub fn spawn_transport_thread<E: Send + 'static>(
    transport: HttpTransport, requests_rx: mpsc::Receiver<OutgoingRequest>,
    responses_tx: mpsc::Sender<E>, wrap: fn(RemoteResponse) -> E,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        for OutgoingRequest { id, request } in requests_rx {
            debug!("Performing {} {}", id, request.path());
            let outcome = transport.perform(&request);
            if responses_tx.send(wrap(RemoteResponse { id, outcome })).is_err() {
                break;
            }
        }
    })
}
