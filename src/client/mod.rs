//! Clash Royale API client
//!
//! Builds resource URLs from tags, serves repeated requests from the
//! `ResponseCache`, and maps HTTP statuses onto `ApiError`. Successful bodies
//! come back as a `Payload`, which the typed wrappers in `crate::data` borrow
//! from.

mod config;
mod endpoint;
mod error;
mod transport;

pub use config::{ClientConfig, DEFAULT_TIMEOUT};
pub use endpoint::{parse_base_url, Endpoint, API_BASE_URL};
pub use error::ApiError;
pub use transport::{HttpResponse, HttpTransport, Transport};

use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, warn};
use url::Url;

use crate::cache::ResponseCache;
use crate::data::{FromJson, JsonView};

/// A fetched response body
///
/// Cheap to clone: every payload for the same cached response shares one
/// immutable JSON document. Wrappers borrow from it with `wrap`.
#[derive(Debug, Clone, PartialEq)]
pub struct Payload {
    body: Arc<Value>,
}

impl Payload {
    pub fn new(body: Arc<Value>) -> Self {
        Self { body }
    }

    /// The raw JSON document
    pub fn body(&self) -> &Value {
        &self.body
    }

    /// A typed, memoizing view over the whole document
    pub fn view(&self) -> JsonView<'_> {
        JsonView::new(&self.body)
    }

    /// Wraps the document in a typed accessor
    ///
    /// ```no_run
    /// # use royale_api::client::{ClientConfig, RoyaleClient};
    /// # use royale_api::data::Player;
    /// let client = RoyaleClient::new(ClientConfig::new("token"))?;
    /// let payload = client.player("#2VVYYRVYP")?;
    /// let player: Player = payload.wrap();
    /// println!("{} has {} trophies", player.name(), player.trophies());
    /// # Ok::<(), royale_api::client::ApiError>(())
    /// ```
    pub fn wrap<'a, W: FromJson<'a>>(&'a self) -> W {
        W::from_json(&self.body)
    }

    /// Whether two payloads share the same stored document
    pub fn ptr_eq(&self, other: &Payload) -> bool {
        Arc::ptr_eq(&self.body, &other.body)
    }
}

/// Client for the Clash Royale API
///
/// Owns one transport handle and one response cache for its whole lifetime.
/// Every fetch blocks until a response arrives or the configured timeout
/// elapses.
#[derive(Debug)]
pub struct RoyaleClient<T = HttpTransport> {
    config: ClientConfig,
    base_url: Url,
    transport: T,
    cache: ResponseCache,
}

impl RoyaleClient<HttpTransport> {
    /// Creates a client that talks to the API over HTTPS
    pub fn new(config: ClientConfig) -> Result<Self, ApiError> {
        let transport = HttpTransport::new(&config)?;
        Self::with_transport(config, transport)
    }
}

impl<T: Transport> RoyaleClient<T> {
    /// Creates a client on top of a custom transport
    pub fn with_transport(config: ClientConfig, transport: T) -> Result<Self, ApiError> {
        let base_url = parse_base_url(&config.base_url)?;
        let cache = ResponseCache::new(config.cache_ttl);

        Ok(Self {
            config,
            base_url,
            transport,
            cache,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn cache(&self) -> &ResponseCache {
        &self.cache
    }

    /// The URL a fetch of `endpoint` would request
    pub fn url_for(&self, endpoint: Endpoint<'_>) -> Result<Url, ApiError> {
        endpoint.url(&self.base_url)
    }

    /// Fetches one resource, consulting the cache first
    ///
    /// On a hit the cached document is returned without any network traffic.
    /// On a miss a GET is issued; only a 200 response is parsed and cached.
    /// Every other status becomes an `ApiError` and leaves the cache untouched.
    pub fn fetch(&self, endpoint: Endpoint<'_>) -> Result<Payload, ApiError> {
        let url = self.url_for(endpoint)?;
        let key = url.as_str();

        if let Some(body) = self.cache.get(key) {
            return Ok(Payload::new(body));
        }
        debug!(url = key, "cache miss");

        let response = self.transport.get(key)?;
        if response.status != 200 {
            warn!(url = key, status = response.status, "request failed");
            return Err(ApiError::from_status(response.status, &response.body));
        }

        let body: Value = serde_json::from_str(&response.body)?;
        let body = Arc::new(body);
        self.cache.set(key, Arc::clone(&body));

        Ok(Payload::new(body))
    }

    /// Drops any cached response for `endpoint`
    pub fn invalidate(&self, endpoint: Endpoint<'_>) -> Result<bool, ApiError> {
        let url = self.url_for(endpoint)?;
        Ok(self.cache.remove(url.as_str()))
    }

    /// Drops every cached response
    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    /// Player profile; wrap as `data::Player`
    pub fn player(&self, tag: &str) -> Result<Payload, ApiError> {
        self.fetch(Endpoint::Player(tag))
    }

    /// Recent battles; wrap as `data::BattleLog`
    pub fn battle_log(&self, tag: &str) -> Result<Payload, ApiError> {
        self.fetch(Endpoint::BattleLog(tag))
    }

    /// Upcoming chest cycle; wrap as `data::UpcomingChests`
    pub fn upcoming_chests(&self, tag: &str) -> Result<Payload, ApiError> {
        self.fetch(Endpoint::UpcomingChests(tag))
    }

    /// Clan profile and member list; wrap as `data::Clan`
    pub fn clan(&self, tag: &str) -> Result<Payload, ApiError> {
        self.fetch(Endpoint::Clan(tag))
    }

    /// Finished river races; wrap as `data::RiverRaceLog`
    pub fn river_race_log(&self, tag: &str) -> Result<Payload, ApiError> {
        self.fetch(Endpoint::RiverRaceLog(tag))
    }
}
