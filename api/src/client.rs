use std::fmt;
use std::time::Duration;

use reqwest::header::{ACCEPT, CONTENT_TYPE, ORIGIN};
use reqwest::{Client, StatusCode};

use crate::Player;
use crate::wire::{self, PlayerWire};

pub type ApiResult<T> = Result<T, ApiError>;

pub const DEFAULT_API_URL: &str = "http://localhost:5001";
/// Origin the backend's CORS allowlist expects — the dashboard's own address.
pub const DEFAULT_ORIGIN: &str = "http://localhost:8501";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Player statistics client backed by the StatFut HTTP API.
#[derive(Debug, Clone)]
pub struct StatFutApi {
    client: Client,
    base_url: String,
    origin: String,
    timeout: Duration,
}

impl Default for StatFutApi {
    fn default() -> Self {
        Self::with_base_url(api_url_from_env())
    }
}

#[derive(Debug)]
pub enum ApiError {
    Network(reqwest::Error, String),
    Api(reqwest::Error, String),
    Parsing(reqwest::Error, String),
    NotFound(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Network(e, url) => write!(f, "Network error for {url}: {e}"),
            ApiError::Api(e, url) => write!(f, "API error for {url}: {e}"),
            ApiError::Parsing(e, url) => write!(f, "Parse error for {url}: {e}"),
            ApiError::NotFound(msg) => write!(f, "Not found: {msg}"),
        }
    }
}

impl StatFutApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Point the client at an explicit base URL (tests, alternate deployments).
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::builder()
                .user_agent("statfut/0.1 (terminal stats dashboard)")
                .build()
                .unwrap_or_default(),
            base_url: base_url.into(),
            origin: origin_from_env(),
            timeout: REQUEST_TIMEOUT,
        }
    }

    /// Fetch the full player roster.
    pub async fn fetch_players(&self) -> ApiResult<Vec<Player>> {
        let url = format!("{}/jogadores", self.base_url);
        let raw: Vec<PlayerWire> = self.get(&url).await?;
        Ok(raw.into_iter().map(wire::map_player).collect())
    }

    /// Fetch one player by identifier. A missing id maps to `NotFound`.
    pub async fn fetch_player(&self, id: u32) -> ApiResult<Player> {
        let url = format!("{}/jogadores/{id}", self.base_url);
        let raw: PlayerWire = self.get(&url).await?;
        Ok(wire::map_player(raw))
    }

    async fn get<T: serde::de::DeserializeOwned>(&self, url: &str) -> ApiResult<T> {
        let response = self
            .client
            .get(url)
            .header(ACCEPT, "application/json")
            .header(CONTENT_TYPE, "application/json")
            .header(ORIGIN, self.origin.as_str())
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| ApiError::Network(e, url.to_owned()))?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound(url.to_owned()));
        }

        match response.error_for_status() {
            Ok(res) => res
                .json::<T>()
                .await
                .map_err(|e| ApiError::Parsing(e, url.to_owned())),
            Err(e) => Err(ApiError::Api(e, url.to_owned())),
        }
    }
}

fn api_url_from_env() -> String {
    std::env::var("API_URL")
        .ok()
        .filter(|u| !u.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_API_URL.to_owned())
}

fn origin_from_env() -> String {
    std::env::var("STATFUT_ORIGIN")
        .ok()
        .filter(|o| !o.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_ORIGIN.to_owned())
}
