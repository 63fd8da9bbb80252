use std::path::PathBuf;

use platform::{
    Filters, JudgeService, Medal, Participant, ParticipantField, Score, UpdateParticipantInput,
};
use tracing::{info, warn};

use super::{RunSummary, Workflow, load_contest, load_participants};
use crate::Result;
use crate::reconcile::{Decision, OverwritePolicy, Reconciler};
use crate::rows::{CsvTable, MissingPercentage, problem_breakdown, validate_results_header};

/// Imports final standings of an external contest: one row per participant,
/// matched by name, imported as a single snapshot at the contest start.
pub struct ContestResultsImport<'a> {
    judge: &'a dyn JudgeService,
    contest_id: String,
    file: PathBuf,
    policy: OverwritePolicy,
}

impl<'a> ContestResultsImport<'a> {
    pub fn new(
        judge: &'a dyn JudgeService,
        contest_id: impl Into<String>,
        file: impl Into<PathBuf>,
        policy: OverwritePolicy,
    ) -> Self {
        Self {
            judge,
            contest_id: contest_id.into(),
            file: file.into(),
            policy,
        }
    }
}

#[async_trait::async_trait]
impl Workflow for ContestResultsImport<'_> {
    async fn run(&self) -> Result<RunSummary> {
        let (_, problems) = load_contest(self.judge, &self.contest_id).await?;

        let table = CsvTable::open(&self.file)?;
        validate_results_header(&table.header)?;

        let existing = load_participants(self.judge, &self.contest_id, &Filters::new()).await?;
        let mut reconciler = Reconciler::new(existing, self.policy);
        let mut summary = RunSummary::default();

        for (line, row) in table.rows.iter().enumerate() {
            let Some(name) = row.get("name") else {
                continue;
            };
            summary.processed += 1;

            let breakdown = match problem_breakdown(row, &problems, MissingPercentage::FromScore) {
                Ok(breakdown) => breakdown,
                Err(e) => {
                    warn!("Skipping row {} ({}): {}", line + 2, name, e);
                    summary.skipped += 1;
                    continue;
                }
            };

            let participant_id = match reconciler.reconcile(name, Participant::ghost(name)) {
                Decision::Create(mut participant) => {
                    info!("Participant {} does not exist, adding...", name);
                    participant.id = self
                        .judge
                        .assign_participant(&self.contest_id, &participant)
                        .await?;
                    let id = participant.id.clone();
                    reconciler.record_created(participant);
                    summary.created += 1;
                    id
                }
                Decision::Update { id, .. } => {
                    summary.updated += 1;
                    id
                }
                Decision::SkipAmbiguous { matches } => {
                    warn!("Multiple ({}) participants named {}, skipping...", matches, name);
                    summary.skipped += 1;
                    continue;
                }
                Decision::SkipIneligible { id } => {
                    warn!("Participant {} (#{}) is not a ghost, skipping...", name, id);
                    summary.skipped += 1;
                    continue;
                }
            };

            let score = Score {
                valid_after: 0,
                score: breakdown.iter().map(|b| b.score).sum(),
                penalty: breakdown.iter().map(|b| b.penalty).sum(),
                breakdown,
            };
            info!("Import total score {} for {}...", score.score, participant_id);

            self.judge
                .import_score(&self.contest_id, &participant_id, std::slice::from_ref(&score))
                .await?;

            // Medal is written only once the score is in place.
            if let Some(medal) = row.get("medal").map(Medal::parse) {
                info!("Assign medal {:?} to {}...", medal, participant_id);
                let input = UpdateParticipantInput {
                    patch: vec![ParticipantField::Medal, ParticipantField::Name],
                    participant: Participant {
                        medal: Some(medal),
                        ..Participant::ghost(name)
                    },
                };
                self.judge
                    .update_participant(&self.contest_id, &participant_id, &input)
                    .await?;
            }
        }

        Ok(summary)
    }

    fn name(&self) -> &'static str {
        "Contest results import"
    }
}
