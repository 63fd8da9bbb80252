use std::collections::HashMap;
use std::path::{Path, PathBuf};

use futures::TryStreamExt;
use platform::{Filters, JudgeService, ListInput, Submission, SubmissionStatus, Verdict};
use tracing::{info, warn};

use super::{RunSummary, Workflow, load_contest, load_participants};
use crate::pagination::{SUBMISSION_PAGE_SIZE, paginate};
use crate::{MigrateError, Result};

const EXPORT_HEADER: [&str; 6] = ["id", "participant", "problem", "submit_time", "status", "score"];
const SUBMIT_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Short label for a submission outcome as it appears in the export.
pub fn verdict_label(status: SubmissionStatus, verdict: Option<Verdict>) -> &'static str {
    match status {
        SubmissionStatus::Pending => "PENDING",
        SubmissionStatus::Testing => "TESTING",
        SubmissionStatus::Timeout => "TIMEOUT",
        SubmissionStatus::Error => "CE",
        SubmissionStatus::Failure => "FAILURE",
        SubmissionStatus::Complete => match verdict {
            Some(Verdict::Accepted) => "AC",
            Some(Verdict::WrongAnswer) => "WA",
            Some(Verdict::TimeLimitExceeded | Verdict::CpuExhausted) => "TL",
            Some(Verdict::MemoryOverflow) => "MO",
            Some(Verdict::RuntimeError) => "RE",
            Some(Verdict::Other) | None => "UNKNOWN",
        },
    }
}

/// File extension for a runtime such as `python:3.10` or `cpp:17-gnu10`.
pub fn runtime_extension(runtime: &str) -> &str {
    let lang = runtime.split(':').next().unwrap_or(runtime);
    match lang {
        "python" => "py",
        "pascal" => "pas",
        "csharp" => "cs",
        "haskell" => "hs",
        "javascript" => "js",
        "kotlin" => "kt",
        "mysql" => "sql",
        "plain" => "txt",
        "ruby" => "rb",
        "rust" => "rs",
        other => other,
    }
}

/// Folder name for a participant's sources. Separators are replaced and
/// leading dots stripped so the result stays a single path component; the
/// participant id is used when nothing is left.
fn source_folder(participant: &str, participant_id: &str) -> String {
    let clean = |value: &str| -> String {
        value
            .chars()
            .map(|c| match c {
                '/' | '\\' | ':' | '\0' => '_',
                c => c,
            })
            .collect::<String>()
            .trim_start_matches('.')
            .trim()
            .to_string()
    };

    let folder = clean(participant);
    if !folder.is_empty() {
        return folder;
    }
    let folder = clean(participant_id);
    if folder.is_empty() {
        "_".to_string()
    } else {
        folder
    }
}

/// Writes the contest's submissions to a CSV table, optionally downloading
/// each submission's source next to it.
pub struct SubmissionExport<'a> {
    judge: &'a dyn JudgeService,
    contest_id: String,
    filters: Filters,
    output: PathBuf,
    source_dir: Option<PathBuf>,
    http: reqwest::Client,
}

impl<'a> SubmissionExport<'a> {
    pub fn new(
        judge: &'a dyn JudgeService,
        contest_id: impl Into<String>,
        filters: Filters,
        output: impl Into<PathBuf>,
    ) -> Self {
        Self {
            judge,
            contest_id: contest_id.into(),
            filters,
            output: output.into(),
            source_dir: None,
            http: reqwest::Client::new(),
        }
    }

    pub fn with_sources(mut self, dir: impl Into<PathBuf>) -> Self {
        self.source_dir = Some(dir.into());
        self
    }

    async fn download_source(&self, url: &str, dest: &Path) -> Result<()> {
        if let Some(parent) = dest.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let response = self.http.get(url).send().await?.error_for_status()?;
        let body = response.bytes().await?;
        tokio::fs::write(dest, &body).await?;
        Ok(())
    }

    async fn save_source(&self, dir: &Path, submission: &Submission, participant: &str, letter: &str) {
        let Some(url) = submission.source_url.as_deref() else {
            warn!("Submission {} has no source attached", submission.id);
            return;
        };

        let dest = dir.join(source_folder(participant, &submission.participant_id)).join(format!(
            "{}_{}.{}",
            letter,
            submission.id,
            runtime_extension(&submission.lang)
        ));
        info!("  Downloading source {} to {}", url, dest.display());

        if let Err(e) = self.download_source(url, &dest).await {
            warn!("Error downloading the file: {}", e);
        }
    }
}

#[async_trait::async_trait]
impl Workflow for SubmissionExport<'_> {
    async fn run(&self) -> Result<RunSummary> {
        let (_, problems) = load_contest(self.judge, &self.contest_id).await?;

        let names: HashMap<String, String> =
            load_participants(self.judge, &self.contest_id, &Filters::new())
                .await?
                .into_iter()
                .map(|p| (p.id, p.name))
                .collect();

        let mut writer = csv::Writer::from_path(&self.output)?;
        writer.write_record(EXPORT_HEADER)?;

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

        let mut summary = RunSummary::default();

        while let Some(submission) = submissions.try_next().await? {
            info!(
                "  Exporting submission #{}: problem {}, participant {}, status {}, score: {}",
                submission.id,
                submission.problem_id,
                submission.participant_id,
                submission.status,
                submission.score
            );

            let letter = problems
                .letter_of(&submission.problem_id)
                .unwrap_or_else(|| "?".to_string());
            let participant = names
                .get(&submission.participant_id)
                .filter(|name| !name.is_empty())
                .unwrap_or(&submission.participant_id);

            let submitted_at = submission.submitted_at.format(SUBMIT_TIME_FORMAT).to_string();
            let score = submission.score.to_string();
            writer.write_record([
                submission.id.as_str(),
                participant.as_str(),
                letter.as_str(),
                submitted_at.as_str(),
                verdict_label(submission.status, submission.verdict),
                score.as_str(),
            ])?;

            if let Some(dir) = &self.source_dir {
                self.save_source(dir, &submission, participant, &letter).await;
            }

            summary.processed += 1;
        }

        writer.flush()?;
        info!(
            "{} submissions has been exported to {}",
            summary.processed,
            self.output.display()
        );
        Ok(summary)
    }

    fn name(&self) -> &'static str {
        "Submission export"
    }
}
