use async_trait::async_trait;
use reqwest::Method;
use serde::Deserialize;

use super::{HttpClient, endpoint};
use crate::Result;
use crate::models::{Contest, Page, Participant, Problem, Score, ScoreMode, Submission};
use crate::requests::{AssignParticipantInput, ImportScoreInput, ListInput, UpdateParticipantInput};
use crate::service::JudgeService;

#[derive(Debug, Deserialize)]
struct DescribeContestOutput {
    contest: Contest,
}

#[derive(Debug, Deserialize)]
struct DescribeScoreOutput {
    score: Score,
}

#[derive(Debug, Deserialize)]
struct AssignParticipantOutput {
    participant_id: String,
}

/// Contest-side operations of a single space.
pub struct JudgeClient {
    http: HttpClient,
    space_url: String,
}

impl JudgeClient {
    pub fn new(http: HttpClient, space_url: impl Into<String>) -> Self {
        Self {
            http,
            space_url: space_url.into(),
        }
    }
}

#[async_trait]
impl JudgeService for JudgeClient {
    async fn describe_contest(&self, contest_id: &str) -> Result<Contest> {
        let url = endpoint(&self.space_url, &format!("contests/{}", contest_id))?;
        let output: DescribeContestOutput = self.http.get(url, &[]).await?;
        Ok(output.contest)
    }

    async fn list_problems(&self, contest_id: &str) -> Result<Vec<Problem>> {
        let url = endpoint(&self.space_url, &format!("contests/{}/problems", contest_id))?;
        let page: Page<Problem> = self.http.get(url, &[]).await?;
        Ok(page.items)
    }

    async fn list_participants(
        &self,
        contest_id: &str,
        input: &ListInput,
    ) -> Result<Page<Participant>> {
        let url = endpoint(
            &self.space_url,
            &format!("contests/{}/participants", contest_id),
        )?;
        self.http.get(url, &input.to_query()).await
    }

    async fn describe_score(
        &self,
        contest_id: &str,
        participant_id: &str,
        mode: ScoreMode,
    ) -> Result<Score> {
        let url = endpoint(
            &self.space_url,
            &format!("contests/{}/participants/{}/score", contest_id, participant_id),
        )?;
        let query = [("mode".to_string(), mode.as_str().to_string())];
        let output: DescribeScoreOutput = self.http.get(url, &query).await?;
        Ok(output.score)
    }

    async fn assign_participant(
        &self,
        contest_id: &str,
        participant: &Participant,
    ) -> Result<String> {
        let url = endpoint(
            &self.space_url,
            &format!("contests/{}/participants", contest_id),
        )?;
        let output: AssignParticipantOutput = self
            .http
            .send(Method::POST, url, &AssignParticipantInput { participant })
            .await?;
        Ok(output.participant_id)
    }

    async fn update_participant(
        &self,
        contest_id: &str,
        participant_id: &str,
        input: &UpdateParticipantInput,
    ) -> Result<()> {
        let url = endpoint(
            &self.space_url,
            &format!("contests/{}/participants/{}", contest_id, participant_id),
        )?;
        self.http.execute(Method::PUT, url, input).await
    }

    async fn import_score(
        &self,
        contest_id: &str,
        participant_id: &str,
        scores: &[Score],
    ) -> Result<()> {
        let url = endpoint(
            &self.space_url,
            &format!("contests/{}/participants/{}/scores", contest_id, participant_id),
        )?;
        self.http
            .execute(Method::POST, url, &ImportScoreInput { scores })
            .await
    }

    async fn list_submissions(
        &self,
        contest_id: &str,
        input: &ListInput,
    ) -> Result<Page<Submission>> {
        let url = endpoint(
            &self.space_url,
            &format!("contests/{}/submissions", contest_id),
        )?;
        self.http.get(url, &input.to_query()).await
    }

    async fn retest_submission(&self, contest_id: &str, submission_id: &str) -> Result<()> {
        let url = endpoint(
            &self.space_url,
            &format!("contests/{}/submissions/{}/retest", contest_id, submission_id),
        )?;
        self.http
            .execute(Method::POST, url, &serde_json::json!({}))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ScoreProblem;
    use crate::{Filters, PlatformConfig, PlatformError};
    use httpmock::prelude::*;
    use serde_json::json;

    fn client(server: &MockServer) -> JudgeClient {
        let config = PlatformConfig::new(server.base_url(), None);
        JudgeClient::new(
            HttpClient::new(&config).unwrap(),
            server.url("/spaces/s1"),
        )
    }

    #[tokio::test]
    async fn test_list_participants_sends_window_and_filters() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/spaces/s1/contests/c1/participants")
                    .query_param("offset", "100")
                    .query_param("size", "100")
                    .query_param("filters[name][eq]", "alice");
                then.status(200).json_body(json!({
                    "items": [{ "id": "p1", "name": "alice", "ghost": true }],
                    "total": 101
                }));
            })
            .await;

        let input = ListInput::new(100, 100).with_filters(Filters::new().name_equals("alice"));
        let page = client(&server)
            .list_participants("c1", &input)
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(page.total, 101);
        assert_eq!(page.items.len(), 1);
        assert!(page.items[0].ghost);
    }

    #[tokio::test]
    async fn test_import_score_posts_snapshots() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/spaces/s1/contests/c1/participants/p1/scores")
                    .json_body(json!({
                        "scores": [{
                            "valid_after": 120,
                            "score": 100.0,
                            "penalty": 2,
                            "breakdown": [{
                                "problem_id": "q1",
                                "score": 100.0,
                                "percentage": 1.0,
                                "penalty": 2,
                                "attempts": 1,
                                "solved_in": 120,
                                "solved": true
                            }]
                        }]
                    }));
                then.status(200).json_body(json!({}));
            })
            .await;

        let scores = vec![Score {
            valid_after: 120,
            score: 100.0,
            penalty: 2,
            breakdown: vec![ScoreProblem {
                problem_id: "q1".to_string(),
                score: 100.0,
                percentage: 1.0,
                penalty: 2,
                attempts: 1,
                solved_in: Some(120),
                solved: true,
            }],
        }];

        client(&server)
            .import_score("c1", "p1", &scores)
            .await
            .unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_api_error_carries_status_and_body() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/spaces/s1/contests/c1/submissions/s9/retest");
                then.status(429).body("slow down");
            })
            .await;

        let err = client(&server)
            .retest_submission("c1", "s9")
            .await
            .unwrap_err();

        match err {
            PlatformError::Api { status, message } => {
                assert_eq!(status, 429);
                assert_eq!(message, "slow down");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
