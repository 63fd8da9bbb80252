use async_trait::async_trait;
use serde::Deserialize;

use super::{HttpClient, endpoint};
use crate::Result;
use crate::models::Space;
use crate::service::UniverseService;

#[derive(Debug, Deserialize)]
struct LookupSpaceOutput {
    space: Space,
}

/// Resolves space keys against the platform-wide API.
pub struct UniverseClient {
    http: HttpClient,
    api_url: String,
}

impl UniverseClient {
    pub fn new(http: HttpClient, api_url: impl Into<String>) -> Self {
        Self {
            http,
            api_url: api_url.into(),
        }
    }
}

#[async_trait]
impl UniverseService for UniverseClient {
    async fn lookup_space(&self, key: &str) -> Result<Space> {
        let url = endpoint(&self.api_url, &format!("spaces/__lookup/{}", key))?;
        let output: LookupSpaceOutput = self.http.get(url, &[]).await?;
        Ok(output.space)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{PlatformConfig, PlatformError};
    use httpmock::prelude::*;
    use serde_json::json;

    fn client(server: &MockServer) -> UniverseClient {
        let config = PlatformConfig::new(server.base_url(), Some("secret".to_string()));
        UniverseClient::new(HttpClient::new(&config).unwrap(), server.base_url())
    }

    #[tokio::test]
    async fn test_lookup_space() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/spaces/__lookup/olymp")
                    .header("authorization", "Bearer secret");
                then.status(200).json_body(json!({
                    "space": {
                        "id": "s1",
                        "key": "olymp",
                        "name": "Olympiad",
                        "url": "https://api.eolymp.com/spaces/s1"
                    }
                }));
            })
            .await;

        let space = client(&server).lookup_space("olymp").await.unwrap();

        mock.assert_async().await;
        assert_eq!(space.name, "Olympiad");
        assert_eq!(space.url, "https://api.eolymp.com/spaces/s1");
    }

    #[tokio::test]
    async fn test_lookup_missing_space() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/spaces/__lookup/nope");
                then.status(404);
            })
            .await;

        let err = client(&server).lookup_space("nope").await.unwrap_err();
        assert!(matches!(err, PlatformError::NotFound(_)));
    }
}
