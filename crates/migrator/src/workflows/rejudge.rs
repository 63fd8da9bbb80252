use std::time::Duration;

use futures::TryStreamExt;
use platform::{Filters, JudgeService, ListInput};
use tracing::{error, info};

use super::{RunSummary, Workflow, load_contest};
use crate::pagination::{SUBMISSION_PAGE_SIZE, paginate};
use crate::rate_limit::RateLimiter;
use crate::{MigrateError, Result};

pub const DEFAULT_RETEST_INTERVAL: Duration = Duration::from_millis(1000);

/// Triggers a retest of every submission in a contest matching the filters.
pub struct Rejudge<'a> {
    judge: &'a dyn JudgeService,
    contest_id: String,
    filters: Filters,
    interval: Duration,
}

impl<'a> Rejudge<'a> {
    pub fn new(judge: &'a dyn JudgeService, contest_id: impl Into<String>, filters: Filters) -> Self {
        Self {
            judge,
            contest_id: contest_id.into(),
            filters,
            interval: DEFAULT_RETEST_INTERVAL,
        }
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }
}

#[async_trait::async_trait]
impl Workflow for Rejudge<'_> {
    async fn run(&self) -> Result<RunSummary> {
        load_contest(self.judge, &self.contest_id).await?;

        let judge = self.judge;
        let contest_id = self.contest_id.as_str();
        let filters = &self.filters;
        let submissions = paginate(SUBMISSION_PAGE_SIZE, move |offset, size| async move {
            let input = ListInput::new(offset, size).with_filters(filters.clone());
            judge
                .list_submissions(contest_id, &input)
                .await
                .map_err(MigrateError::from)
        });
        let mut submissions = std::pin::pin!(submissions);

        let mut limiter = RateLimiter::new(self.interval);
        let mut summary = RunSummary::default();

        while let Some(submission) = submissions.try_next().await? {
            limiter.wait().await;
            match self.judge.retest_submission(contest_id, &submission.id).await {
                Ok(()) => {
                    info!("Retest triggered for submission {}", submission.id);
                    summary.processed += 1;
                }
                Err(e) => {
                    error!("Unable to retest submission {}: {}", submission.id, e);
                    summary.failed += 1;
                }
            }
        }

        info!("Triggered retest of {} submission(s)", summary.processed);
        Ok(summary)
    }

    fn name(&self) -> &'static str {
        "Rejudge"
    }
}
