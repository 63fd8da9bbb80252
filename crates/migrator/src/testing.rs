//! In-memory platform used by workflow tests.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use platform::{
    Attribute, Comparator, Contest, Expression, Filters, JudgeService, ListInput, Member,
    MemberService, Page, Participant, PlatformError, Predicate, Problem, Score, ScoreMode,
    ScoreProblem, Space, Submission, SubmissionStatus, UniverseService, UpdateMemberInput,
    UpdateParticipantInput, User, UserService, Verdict,
};

type PlatformResult<T> = platform::Result<T>;

/// A completed, accepted submission worth 100 points.
pub fn submission(id: &str, problem_id: &str, participant_id: &str) -> Submission {
    Submission {
        id: id.to_string(),
        problem_id: problem_id.to_string(),
        participant_id: participant_id.to_string(),
        status: SubmissionStatus::Complete,
        verdict: Some(Verdict::Accepted),
        score: 100.0,
        submitted_at: Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap(),
        lang: "cpp:17-gnu10".to_string(),
        source_url: None,
    }
}

#[derive(Default)]
struct ContestState {
    contest: Option<Contest>,
    problems: Vec<Problem>,
    participants: Vec<Participant>,
    scores: HashMap<String, Vec<ScoreProblem>>,
    submissions: Vec<Submission>,
}

#[derive(Default)]
struct State {
    next_id: u64,
    spaces: Vec<Space>,
    contests: HashMap<String, ContestState>,
    members: Vec<Member>,
    attributes: Vec<Attribute>,
    users: Vec<User>,
    imported_scores: Vec<(String, String, Vec<Score>)>,
    participant_updates: Vec<(String, UpdateParticipantInput)>,
    member_updates: Vec<(String, UpdateMemberInput)>,
    retested: Vec<String>,
    failing_retests: HashSet<String>,
    fail_imports: bool,
}

impl State {
    fn next_id(&mut self) -> String {
        self.next_id += 1;
        format!("{}", 1000 + self.next_id)
    }

    fn contest(&self, contest_id: &str) -> PlatformResult<&ContestState> {
        self.contests
            .get(contest_id)
            .filter(|c| c.contest.is_some())
            .ok_or_else(|| PlatformError::NotFound(format!("contests/{}", contest_id)))
    }

    fn contest_mut(&mut self, contest_id: &str) -> PlatformResult<&mut ContestState> {
        self.contests
            .get_mut(contest_id)
            .filter(|c| c.contest.is_some())
            .ok_or_else(|| PlatformError::NotFound(format!("contests/{}", contest_id)))
    }
}

#[derive(Default)]
pub struct FakePlatform {
    state: Mutex<State>,
}

impl FakePlatform {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_space(&self, space: Space) {
        self.state.lock().unwrap().spaces.push(space);
    }

    pub fn add_contest(&self, contest_id: &str, problems: Vec<Problem>) {
        let mut state = self.state.lock().unwrap();
        let entry = state.contests.entry(contest_id.to_string()).or_default();
        entry.contest = Some(Contest {
            id: contest_id.to_string(),
            name: format!("Contest {}", contest_id),
        });
        entry.problems = problems;
    }

    pub fn add_participant(&self, contest_id: &str, mut participant: Participant) -> String {
        let mut state = self.state.lock().unwrap();
        let id = state.next_id();
        participant.id = id.clone();
        state
            .contests
            .entry(contest_id.to_string())
            .or_default()
            .participants
            .push(participant);
        id
    }

    pub fn set_score(&self, contest_id: &str, participant_id: &str, breakdown: Vec<ScoreProblem>) {
        self.state
            .lock()
            .unwrap()
            .contests
            .entry(contest_id.to_string())
            .or_default()
            .scores
            .insert(participant_id.to_string(), breakdown);
    }

    pub fn add_submission(&self, contest_id: &str, submission: Submission) {
        self.state
            .lock()
            .unwrap()
            .contests
            .entry(contest_id.to_string())
            .or_default()
            .submissions
            .push(submission);
    }

    pub fn add_member(&self, mut member: Member) -> String {
        let mut state = self.state.lock().unwrap();
        let id = state.next_id();
        member.id = id.clone();
        state.members.push(member);
        id
    }

    pub fn add_attribute(&self, attribute: Attribute) {
        self.state.lock().unwrap().attributes.push(attribute);
    }

    pub fn add_user(&self, user: User) {
        self.state.lock().unwrap().users.push(user);
    }

    pub fn fail_imports(&self) {
        self.state.lock().unwrap().fail_imports = true;
    }

    pub fn fail_retest(&self, submission_id: &str) {
        self.state
            .lock()
            .unwrap()
            .failing_retests
            .insert(submission_id.to_string());
    }

    pub fn participants(&self, contest_id: &str) -> Vec<Participant> {
        self.state
            .lock()
            .unwrap()
            .contests
            .get(contest_id)
            .map(|c| c.participants.clone())
            .unwrap_or_default()
    }

    pub fn members(&self) -> Vec<Member> {
        self.state.lock().unwrap().members.clone()
    }

    pub fn imported_scores(&self) -> Vec<(String, String, Vec<Score>)> {
        self.state.lock().unwrap().imported_scores.clone()
    }

    pub fn participant_updates(&self) -> Vec<(String, UpdateParticipantInput)> {
        self.state.lock().unwrap().participant_updates.clone()
    }

    pub fn member_updates(&self) -> Vec<(String, UpdateMemberInput)> {
        self.state.lock().unwrap().member_updates.clone()
    }

    pub fn retested(&self) -> Vec<String> {
        self.state.lock().unwrap().retested.clone()
    }
}

fn compare<T: PartialEq>(expression: &Expression<T>, value: &T) -> bool {
    match expression.comparator {
        Comparator::Equal => expression.value == *value,
        Comparator::NotEqual => expression.value != *value,
    }
}

fn participant_matches(participant: &Participant, filters: &Filters) -> bool {
    filters.predicates().iter().all(|predicate| match predicate {
        Predicate::Name(e) => compare(e, &participant.name),
        Predicate::MemberId(e) => compare(e, &participant.member_id.clone().unwrap_or_default()),
        _ => true,
    })
}

fn submission_matches(submission: &Submission, filters: &Filters) -> bool {
    filters.predicates().iter().all(|predicate| match predicate {
        Predicate::ProblemId(e) => compare(e, &submission.problem_id),
        Predicate::ParticipantId(e) => compare(e, &submission.participant_id),
        Predicate::Status(e) => compare(e, &submission.status),
        _ => true,
    })
}

fn page<T: Clone>(items: Vec<T>, input: &ListInput) -> Page<T> {
    let total = items.len() as u32;
    let items = items
        .into_iter()
        .skip(input.offset as usize)
        .take(input.size as usize)
        .collect();
    Page::new(items, total)
}

fn rejected(message: &str) -> PlatformError {
    PlatformError::Api {
        status: 500,
        message: message.to_string(),
    }
}

#[async_trait]
impl UniverseService for FakePlatform {
    async fn lookup_space(&self, key: &str) -> PlatformResult<Space> {
        self.state
            .lock()
            .unwrap()
            .spaces
            .iter()
            .find(|s| s.key == key)
            .cloned()
            .ok_or_else(|| PlatformError::NotFound(format!("spaces/__lookup/{}", key)))
    }
}

#[async_trait]
impl JudgeService for FakePlatform {
    async fn describe_contest(&self, contest_id: &str) -> PlatformResult<Contest> {
        let state = self.state.lock().unwrap();
        let contest = state.contest(contest_id)?;
        Ok(contest.contest.clone().unwrap())
    }

    async fn list_problems(&self, contest_id: &str) -> PlatformResult<Vec<Problem>> {
        Ok(self.state.lock().unwrap().contest(contest_id)?.problems.clone())
    }

    async fn list_participants(
        &self,
        contest_id: &str,
        input: &ListInput,
    ) -> PlatformResult<Page<Participant>> {
        let state = self.state.lock().unwrap();
        let matching = state
            .contest(contest_id)?
            .participants
            .iter()
            .filter(|p| participant_matches(p, &input.filters))
            .cloned()
            .collect();
        Ok(page(matching, input))
    }

    async fn describe_score(
        &self,
        contest_id: &str,
        participant_id: &str,
        _mode: ScoreMode,
    ) -> PlatformResult<Score> {
        let state = self.state.lock().unwrap();
        let breakdown = state
            .contest(contest_id)?
            .scores
            .get(participant_id)
            .cloned()
            .unwrap_or_default();
        Ok(Score {
            score: breakdown.iter().map(|p| p.score).sum(),
            breakdown,
            ..Default::default()
        })
    }

    async fn assign_participant(
        &self,
        contest_id: &str,
        participant: &Participant,
    ) -> PlatformResult<String> {
        let mut state = self.state.lock().unwrap();
        let id = state.next_id();
        let mut stored = participant.clone();
        stored.id = id.clone();
        state.contest_mut(contest_id)?.participants.push(stored);
        Ok(id)
    }

    async fn update_participant(
        &self,
        contest_id: &str,
        participant_id: &str,
        input: &UpdateParticipantInput,
    ) -> PlatformResult<()> {
        let mut state = self.state.lock().unwrap();
        if !state
            .contest(contest_id)?
            .participants
            .iter()
            .any(|p| p.id == participant_id)
        {
            return Err(PlatformError::NotFound(format!("participants/{}", participant_id)));
        }
        state
            .participant_updates
            .push((participant_id.to_string(), input.clone()));
        Ok(())
    }

    async fn import_score(
        &self,
        contest_id: &str,
        participant_id: &str,
        scores: &[Score],
    ) -> PlatformResult<()> {
        let mut state = self.state.lock().unwrap();
        if state.fail_imports {
            return Err(rejected("score import rejected"));
        }
        state.contest(contest_id)?;
        state.imported_scores.push((
            contest_id.to_string(),
            participant_id.to_string(),
            scores.to_vec(),
        ));
        Ok(())
    }

    async fn list_submissions(
        &self,
        contest_id: &str,
        input: &ListInput,
    ) -> PlatformResult<Page<Submission>> {
        let state = self.state.lock().unwrap();
        let matching = state
            .contest(contest_id)?
            .submissions
            .iter()
            .filter(|s| submission_matches(s, &input.filters))
            .cloned()
            .collect();
        Ok(page(matching, input))
    }

    async fn retest_submission(&self, _contest_id: &str, submission_id: &str) -> PlatformResult<()> {
        let mut state = self.state.lock().unwrap();
        if state.failing_retests.contains(submission_id) {
            return Err(rejected("retest rejected"));
        }
        state.retested.push(submission_id.to_string());
        Ok(())
    }
}

#[async_trait]
impl MemberService for FakePlatform {
    async fn describe_member(&self, member_id: &str) -> PlatformResult<Member> {
        self.state
            .lock()
            .unwrap()
            .members
            .iter()
            .find(|m| m.id == member_id)
            .cloned()
            .ok_or_else(|| PlatformError::NotFound(format!("members/{}", member_id)))
    }

    async fn list_members(&self, input: &ListInput) -> PlatformResult<Page<Member>> {
        Ok(page(self.state.lock().unwrap().members.clone(), input))
    }

    async fn create_member(&self, member: &Member) -> PlatformResult<String> {
        let mut state = self.state.lock().unwrap();
        let id = state.next_id();
        let mut stored = member.clone();
        stored.id = id.clone();
        state.members.push(stored);
        Ok(id)
    }

    async fn update_member(&self, member_id: &str, input: &UpdateMemberInput) -> PlatformResult<()> {
        let mut state = self.state.lock().unwrap();
        if !state.members.iter().any(|m| m.id == member_id) {
            return Err(PlatformError::NotFound(format!("members/{}", member_id)));
        }
        state
            .member_updates
            .push((member_id.to_string(), input.clone()));
        Ok(())
    }

    async fn list_attributes(&self, input: &ListInput) -> PlatformResult<Page<Attribute>> {
        Ok(page(self.state.lock().unwrap().attributes.clone(), input))
    }
}

#[async_trait]
impl UserService for FakePlatform {
    async fn list_users(&self, filters: &Filters) -> PlatformResult<Vec<User>> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .users
            .iter()
            .filter(|user| {
                filters.predicates().iter().all(|predicate| match predicate {
                    Predicate::Username(e) => compare(e, &user.username),
                    _ => true,
                })
            })
            .cloned()
            .collect())
    }
}
