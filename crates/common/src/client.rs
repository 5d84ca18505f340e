//! Players API Client
//!
//! Issues list/get/create/delete requests against the players collection.
//! The HTTP layer sits behind [`Transport`] so the same client runs against
//! `reqwest` in production and a scripted transport under test.

use async_trait::async_trait;
use chrono::{SecondsFormat, Utc};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;
use url::Url;

use crate::error::{Error, Result};
use crate::types::{Player, PlayerDraft, PlayerEnvelope, PlayerId, PlayersEnvelope};

/// HTTP methods used by the players API
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Delete,
}

/// Outgoing request handed to a [`Transport`]
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    /// JSON body, sent with `Content-Type: application/json`
    pub body: Option<serde_json::Value>,
}

/// Raw response from a [`Transport`]
#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Transport used by [`RosterClient`]
///
/// Implementations fail only on transport errors; non-2xx responses are
/// returned as values so callers decide what a bad status means.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse>;
}

/// Production transport backed by `reqwest`
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Create a transport. `None` keeps reqwest's default (no timeout).
    pub fn new(timeout: Option<Duration>) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
        })
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
        let mut builder = match request.method {
            Method::Get => self.client.get(&request.url),
            Method::Post => self.client.post(&request.url),
            Method::Delete => self.client.delete(&request.url),
        };
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?.to_vec();
        Ok(HttpResponse { status, body })
    }
}

/// Location of the players collection: `{base}/{cohort}/players`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiEndpoint {
    base: Url,
    cohort: String,
}

impl ApiEndpoint {
    pub fn new(base_url: &str, cohort: &str) -> Result<Self> {
        let base = Url::parse(base_url)?;
        if !matches!(base.scheme(), "http" | "https") {
            return Err(Error::InvalidConfig(format!(
                "API URL must be http or https, got {}",
                base.scheme()
            )));
        }
        let cohort = cohort.trim().trim_matches('/');
        if cohort.is_empty() {
            return Err(Error::InvalidConfig("cohort must not be empty".to_string()));
        }
        Ok(Self {
            base,
            cohort: cohort.to_string(),
        })
    }

    pub fn collection_url(&self) -> String {
        format!(
            "{}/{}/players",
            self.base.as_str().trim_end_matches('/'),
            self.cohort
        )
    }

    pub fn item_url(&self, id: &PlayerId) -> String {
        format!("{}/{}", self.collection_url(), urlencoding::encode(id.as_str()))
    }
}

/// Current instant in the same form as JavaScript's `toISOString`
pub fn iso_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Client for the players API
#[derive(Clone)]
pub struct RosterClient {
    transport: Arc<dyn Transport>,
    endpoint: ApiEndpoint,
}

impl RosterClient {
    pub fn new(transport: Arc<dyn Transport>, endpoint: ApiEndpoint) -> Self {
        Self { transport, endpoint }
    }

    /// List all players
    ///
    /// The status code is not inspected: an error page simply fails to decode.
    pub async fn fetch_all(&self) -> Result<Vec<Player>> {
        let response = self
            .transport
            .send(HttpRequest {
                method: Method::Get,
                url: self.endpoint.collection_url(),
                body: None,
            })
            .await?;
        let envelope: PlayersEnvelope = serde_json::from_slice(&response.body)?;
        debug!("Fetched {} players", envelope.data.players.len());
        Ok(envelope.data.players)
    }

    /// Get a single player by ID
    pub async fn fetch_one(&self, id: &PlayerId) -> Result<Player> {
        let response = self
            .transport
            .send(HttpRequest {
                method: Method::Get,
                url: self.endpoint.item_url(id),
                body: None,
            })
            .await?;
        if !response.is_success() {
            return Err(Error::HttpStatus {
                status: response.status,
            });
        }
        let envelope: PlayerEnvelope = serde_json::from_slice(&response.body)?;
        Ok(envelope.data.player)
    }

    /// Create a player, stamping `createdAt` and `updatedAt` with now
    ///
    /// Any 2xx response with a JSON body counts as created. The echoed
    /// player is returned when the body carries one in a recognised shape.
    pub async fn create(&self, mut draft: PlayerDraft) -> Result<Option<Player>> {
        draft.stamp(&iso_timestamp());

        let response = self
            .transport
            .send(HttpRequest {
                method: Method::Post,
                url: self.endpoint.collection_url(),
                body: Some(serde_json::to_value(&draft)?),
            })
            .await?;
        if !response.is_success() {
            return Err(Error::HttpStatus {
                status: response.status,
            });
        }
        decode_created(&response.body)
    }

    /// Delete a player
    ///
    /// Only transport failures are reported; the response status is logged
    /// and otherwise ignored.
    pub async fn remove(&self, id: &PlayerId) -> Result<()> {
        let response = self
            .transport
            .send(HttpRequest {
                method: Method::Delete,
                url: self.endpoint.item_url(id),
                body: None,
            })
            .await?;
        debug!("DELETE player {} returned {}", id, response.status);
        Ok(())
    }
}

/// Pull the created player out of whatever envelope the API used
fn decode_created(body: &[u8]) -> Result<Option<Player>> {
    let value: serde_json::Value = serde_json::from_slice(body)?;
    let created = [
        value.pointer("/data/newPlayer"),
        value.pointer("/data/player"),
        value.get("data"),
        Some(&value),
    ]
    .into_iter()
    .flatten()
    .find_map(|candidate| serde_json::from_value::<Player>(candidate.clone()).ok());

    if created.is_none() {
        debug!("Create response carried no recognisable player: {}", value);
    }
    Ok(created)
}

/// Scripted transport for tests
#[cfg(any(test, feature = "testing"))]
pub mod testing {
    use super::*;
    use parking_lot::Mutex;
    use std::collections::VecDeque;

    /// Replays queued responses in order and records every request
    #[derive(Default)]
    pub struct ScriptedTransport {
        responses: Mutex<VecDeque<Result<HttpResponse>>>,
        requests: Mutex<Vec<HttpRequest>>,
    }

    impl ScriptedTransport {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn push_json(&self, status: u16, body: serde_json::Value) -> &Self {
            self.responses.lock().push_back(Ok(HttpResponse {
                status,
                body: body.to_string().into_bytes(),
            }));
            self
        }

        pub fn push_raw(&self, status: u16, body: &str) -> &Self {
            self.responses.lock().push_back(Ok(HttpResponse {
                status,
                body: body.as_bytes().to_vec(),
            }));
            self
        }

        pub fn push_failure(&self, message: &str) -> &Self {
            self.responses
                .lock()
                .push_back(Err(Error::Network(message.to_string())));
            self
        }

        /// Queue a `{ data: { players } }` listing
        pub fn push_players(&self, players: serde_json::Value) -> &Self {
            self.push_json(200, serde_json::json!({ "data": { "players": players } }))
        }

        pub fn requests(&self) -> Vec<HttpRequest> {
            self.requests.lock().clone()
        }

        pub fn count(&self, method: Method) -> usize {
            self.requests
                .lock()
                .iter()
                .filter(|r| r.method == method)
                .count()
        }

        pub fn remaining(&self) -> usize {
            self.responses.lock().len()
        }
    }

    #[async_trait]
    impl Transport for ScriptedTransport {
        async fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
            self.requests.lock().push(request.clone());
            self.responses.lock().pop_front().unwrap_or_else(|| {
                Err(Error::Network(format!(
                    "no scripted response for {:?} {}",
                    request.method, request.url
                )))
            })
        }
    }
}
