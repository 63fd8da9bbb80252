//! The tools of the suite. Each workflow runs strictly sequentially: every
//! remote call is awaited before the next one is built.

mod contest_results;
mod export;
mod ghost_score;
mod ghosts;
mod members;
mod rejudge;

pub use contest_results::ContestResultsImport;
pub use export::{SubmissionExport, runtime_extension, verdict_label};
pub use ghost_score::GhostScoreImport;
pub use ghosts::GhostMigration;
pub use members::MemberImport;
pub use rejudge::Rejudge;

use platform::{
    Attribute, Contest, Filters, JudgeService, ListInput, Member, MemberService, Participant,
    Space, UniverseService,
};
use tracing::info;

use crate::pagination::{MEMBER_PAGE_SIZE, PARTICIPANT_PAGE_SIZE, fetch_all};
use crate::problem_index::ProblemIndex;
use crate::{MigrateError, Result};

#[async_trait::async_trait]
pub trait Workflow: Send + Sync {
    async fn run(&self) -> Result<RunSummary>;

    fn name(&self) -> &'static str;
}

/// Outcome counters of one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub created: usize,
    pub updated: usize,
    pub skipped: usize,
    pub failed: usize,
    pub processed: usize,
}

impl RunSummary {
    pub fn log(&self, name: &str) {
        info!(
            "{} finished: {} processed, {} created, {} updated, {} skipped, {} failed",
            name, self.processed, self.created, self.updated, self.skipped, self.failed
        );
    }
}

pub async fn load_space(universe: &dyn UniverseService, key: &str) -> Result<Space> {
    let space = universe.lookup_space(key).await.map_err(|e| {
        MigrateError::setup(
            format!("An error occurred while loading space with key \"{}\"", key),
            e,
        )
    })?;
    info!("Found space \"{}\"", space.name);
    Ok(space)
}

/// Describes the contest and indexes its problems. Any failure is a setup error.
pub async fn load_contest(
    judge: &dyn JudgeService,
    contest_id: &str,
) -> Result<(Contest, ProblemIndex)> {
    let setup_error = |e: platform::PlatformError| {
        MigrateError::setup(
            format!(
                "An error occurred while loading contest with ID \"{}\"",
                contest_id
            ),
            e,
        )
    };

    let contest = judge
        .describe_contest(contest_id)
        .await
        .map_err(setup_error)?;
    info!("Found contest \"{}\"", contest.name);

    let problems = judge.list_problems(contest_id).await.map_err(setup_error)?;
    Ok((contest, ProblemIndex::build(&problems)))
}

pub async fn load_participants(
    judge: &dyn JudgeService,
    contest_id: &str,
    filters: &Filters,
) -> Result<Vec<Participant>> {
    fetch_all(PARTICIPANT_PAGE_SIZE, move |offset, size| async move {
        let input = ListInput::new(offset, size).with_filters(filters.clone());
        judge
            .list_participants(contest_id, &input)
            .await
            .map_err(MigrateError::from)
    })
    .await
}

pub async fn load_members(members: &dyn MemberService) -> Result<Vec<Member>> {
    let listing = fetch_all(MEMBER_PAGE_SIZE, move |offset, size| async move {
        members
            .list_members(&ListInput::new(offset, size))
            .await
            .map_err(MigrateError::from)
    })
    .await?;

    for member in &listing {
        info!("Reading existing member \"{}\" with ID {}", member.name, member.id);
    }
    Ok(listing)
}

pub async fn load_attributes(members: &dyn MemberService) -> Result<Vec<Attribute>> {
    fetch_all(MEMBER_PAGE_SIZE, move |offset, size| async move {
        members
            .list_attributes(&ListInput::new(offset, size))
            .await
            .map_err(MigrateError::from)
    })
    .await
}
