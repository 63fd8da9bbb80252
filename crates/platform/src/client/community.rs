use async_trait::async_trait;
use reqwest::Method;
use serde::Deserialize;

use super::{HttpClient, endpoint};
use crate::Result;
use crate::models::{Attribute, Member, Page};
use crate::requests::{CreateMemberInput, ListInput, UpdateMemberInput};
use crate::service::MemberService;

#[derive(Debug, Deserialize)]
struct DescribeMemberOutput {
    member: Member,
}

#[derive(Debug, Deserialize)]
struct CreateMemberOutput {
    member_id: String,
}

/// Member directory of a single space.
pub struct CommunityClient {
    http: HttpClient,
    space_url: String,
}

impl CommunityClient {
    pub fn new(http: HttpClient, space_url: impl Into<String>) -> Self {
        Self {
            http,
            space_url: space_url.into(),
        }
    }
}

#[async_trait]
impl MemberService for CommunityClient {
    async fn describe_member(&self, member_id: &str) -> Result<Member> {
        let url = endpoint(&self.space_url, &format!("members/{}", member_id))?;
        let output: DescribeMemberOutput = self.http.get(url, &[]).await?;
        Ok(output.member)
    }

    async fn list_members(&self, input: &ListInput) -> Result<Page<Member>> {
        let url = endpoint(&self.space_url, "members")?;
        self.http.get(url, &input.to_query()).await
    }

    async fn create_member(&self, member: &Member) -> Result<String> {
        let url = endpoint(&self.space_url, "members")?;
        let output: CreateMemberOutput = self
            .http
            .send(Method::POST, url, &CreateMemberInput { member })
            .await?;
        Ok(output.member_id)
    }

    async fn update_member(&self, member_id: &str, input: &UpdateMemberInput) -> Result<()> {
        let url = endpoint(&self.space_url, &format!("members/{}", member_id))?;
        self.http.execute(Method::PUT, url, input).await
    }

    async fn list_attributes(&self, input: &ListInput) -> Result<Page<Attribute>> {
        let url = endpoint(&self.space_url, "attributes")?;
        self.http.get(url, &input.to_query()).await
    }
}
