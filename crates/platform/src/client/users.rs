use async_trait::async_trait;

use super::{HttpClient, endpoint};
use crate::Result;
use crate::filter::Filters;
use crate::models::{Page, User};
use crate::service::UserService;

/// Searches platform-wide accounts.
pub struct UsersClient {
    http: HttpClient,
    api_url: String,
}

impl UsersClient {
    pub fn new(http: HttpClient, api_url: impl Into<String>) -> Self {
        Self {
            http,
            api_url: api_url.into(),
        }
    }
}

#[async_trait]
impl UserService for UsersClient {
    async fn list_users(&self, filters: &Filters) -> Result<Vec<User>> {
        let url = endpoint(&self.api_url, "users")?;
        let page: Page<User> = self.http.get(url, &filters.to_query()).await?;
        Ok(page.items)
    }
}
