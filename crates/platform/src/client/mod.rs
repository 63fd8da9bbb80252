mod community;
mod judge;
mod universe;
mod users;

pub use community::CommunityClient;
pub use judge::JudgeClient;
pub use universe::UniverseClient;
pub use users::UsersClient;

use reqwest::{Method, StatusCode};
use serde::{Serialize, de::DeserializeOwned};
use url::Url;

use crate::error::{PlatformError, Result};

pub const DEFAULT_API_URL: &str = "https://api.eolymp.com";

#[derive(Debug, Clone)]
pub struct PlatformConfig {
    pub api_url: String,
    pub token: Option<String>,
}

impl PlatformConfig {
    pub fn new(api_url: impl Into<String>, token: Option<String>) -> Self {
        Self {
            api_url: api_url.into(),
            token,
        }
    }
}

impl Default for PlatformConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL, None)
    }
}

/// Authenticated JSON transport shared by all service clients. Cheap to clone.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: reqwest::Client,
    token: Option<String>,
}

impl HttpClient {
    pub fn new(config: &PlatformConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("eolymp-migrate/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            token: config.token.clone(),
        })
    }

    pub async fn get<T: DeserializeOwned>(&self, url: Url, query: &[(String, String)]) -> Result<T> {
        let request = self.request(Method::GET, url.clone()).query(query);
        Self::decode(url, request.send().await?).await
    }

    pub async fn send<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        method: Method,
        url: Url,
        body: &B,
    ) -> Result<T> {
        let request = self.request(method, url.clone()).json(body);
        Self::decode(url, request.send().await?).await
    }

    /// Like [`HttpClient::send`] but discards the response body.
    pub async fn execute<B: Serialize + ?Sized>(&self, method: Method, url: Url, body: &B) -> Result<()> {
        let request = self.request(method, url.clone()).json(body);
        let response = request.send().await?;
        Self::check(url, response).await.map(|_| ())
    }

    fn request(&self, method: Method, url: Url) -> reqwest::RequestBuilder {
        tracing::debug!("{} {}", method, url);
        let request = self.client.request(method, url);
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn check(url: Url, response: reqwest::Response) -> Result<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        if status == StatusCode::NOT_FOUND {
            return Err(PlatformError::NotFound(url.to_string()));
        }

        let message = response.text().await.unwrap_or_default();
        Err(PlatformError::Api {
            status: status.as_u16(),
            message,
        })
    }

    async fn decode<T: DeserializeOwned>(url: Url, response: reqwest::Response) -> Result<T> {
        let response = Self::check(url, response).await?;
        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

/// Joins `path` onto `base`, keeping any path prefix the base already has.
pub(crate) fn endpoint(base: &str, path: &str) -> Result<Url> {
    Ok(Url::parse(&format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    ))?)
}
