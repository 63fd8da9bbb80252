//! Service seams of the platform. Workflows depend on these traits rather than
//! on the HTTP clients so they can run against any backend.

use async_trait::async_trait;

use crate::Result;
use crate::filter::Filters;
use crate::models::{
    Attribute, Contest, Member, Page, Participant, Problem, Score, ScoreMode, Space, Submission,
    User,
};
use crate::requests::{ListInput, UpdateMemberInput, UpdateParticipantInput};

#[async_trait]
pub trait UniverseService: Send + Sync {
    async fn lookup_space(&self, key: &str) -> Result<Space>;
}

#[async_trait]
pub trait JudgeService: Send + Sync {
    async fn describe_contest(&self, contest_id: &str) -> Result<Contest>;

    async fn list_problems(&self, contest_id: &str) -> Result<Vec<Problem>>;

    async fn list_participants(
        &self,
        contest_id: &str,
        input: &ListInput,
    ) -> Result<Page<Participant>>;

    async fn describe_score(
        &self,
        contest_id: &str,
        participant_id: &str,
        mode: ScoreMode,
    ) -> Result<Score>;

    /// Adds a participant to the contest and returns its id.
    async fn assign_participant(&self, contest_id: &str, participant: &Participant)
    -> Result<String>;

    async fn update_participant(
        &self,
        contest_id: &str,
        participant_id: &str,
        input: &UpdateParticipantInput,
    ) -> Result<()>;

    /// Replaces the participant's score history with `scores`, in order.
    async fn import_score(
        &self,
        contest_id: &str,
        participant_id: &str,
        scores: &[Score],
    ) -> Result<()>;

    async fn list_submissions(&self, contest_id: &str, input: &ListInput)
    -> Result<Page<Submission>>;

    async fn retest_submission(&self, contest_id: &str, submission_id: &str) -> Result<()>;
}

#[async_trait]
pub trait MemberService: Send + Sync {
    async fn describe_member(&self, member_id: &str) -> Result<Member>;

    async fn list_members(&self, input: &ListInput) -> Result<Page<Member>>;

    /// Creates a member and returns its id.
    async fn create_member(&self, member: &Member) -> Result<String>;

    async fn update_member(&self, member_id: &str, input: &UpdateMemberInput) -> Result<()>;

    async fn list_attributes(&self, input: &ListInput) -> Result<Page<Attribute>>;
}

#[async_trait]
pub trait UserService: Send + Sync {
    async fn list_users(&self, filters: &Filters) -> Result<Vec<User>>;
}
