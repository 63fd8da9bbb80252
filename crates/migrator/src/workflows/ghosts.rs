use platform::{Filters, JudgeService, Member, MemberService, Participant, ScoreMode};
use tracing::{info, warn};

use super::{RunSummary, Workflow, load_contest, load_participants};
use crate::Result;
use crate::reconcile::{Decision, OverwritePolicy, Reconciler};
use crate::timeline::reconstruct;

/// Replays every participant's solved problems from a contest in one space
/// into a contest (usually with the same problem set) in another space, as
/// ghost participants.
pub struct GhostMigration<'a> {
    source: &'a dyn JudgeService,
    target: &'a dyn JudgeService,
    target_members: &'a dyn MemberService,
    source_contest_id: String,
    target_contest_id: String,
    policy: OverwritePolicy,
}

impl<'a> GhostMigration<'a> {
    pub fn new(
        source: &'a dyn JudgeService,
        target: &'a dyn JudgeService,
        target_members: &'a dyn MemberService,
        source_contest_id: impl Into<String>,
        target_contest_id: impl Into<String>,
        policy: OverwritePolicy,
    ) -> Self {
        Self {
            source,
            target,
            target_members,
            source_contest_id: source_contest_id.into(),
            target_contest_id: target_contest_id.into(),
            policy,
        }
    }

    /// Returns the target participant to carry the score, creating a ghost
    /// member and participant when the name is new.
    async fn resolve_target(
        &self,
        reconciler: &mut Reconciler<Participant>,
        name: &str,
        summary: &mut RunSummary,
    ) -> Result<Option<String>> {
        match reconciler.reconcile(name, Participant::ghost(name)) {
            Decision::Create(mut participant) => {
                let member_id = self.target_members.create_member(&Member::ghost(name)).await?;
                participant.member_id = Some(member_id);
                participant.id = self
                    .target
                    .assign_participant(&self.target_contest_id, &participant)
                    .await?;
                info!("Participant \"{}\" created as #{}", name, participant.id);

                let id = participant.id.clone();
                reconciler.record_created(participant);
                summary.created += 1;
                Ok(Some(id))
            }
            // The ghost record itself stays as is; only its score history is replaced.
            Decision::Update { id, .. } => {
                info!("Participant \"{}\" already exists as #{}", name, id);
                summary.updated += 1;
                Ok(Some(id))
            }
            Decision::SkipAmbiguous { matches } => {
                warn!("Multiple ({}) participants named \"{}\", skipping...", matches, name);
                summary.skipped += 1;
                Ok(None)
            }
            Decision::SkipIneligible { id } => {
                warn!("Participant \"{}\" (#{}) is not a ghost, skipping...", name, id);
                summary.skipped += 1;
                Ok(None)
            }
        }
    }
}

#[async_trait::async_trait]
impl Workflow for GhostMigration<'_> {
    async fn run(&self) -> Result<RunSummary> {
        let (_, source_problems) = load_contest(self.source, &self.source_contest_id).await?;
        let (_, target_problems) = load_contest(self.target, &self.target_contest_id).await?;

        let participants =
            load_participants(self.source, &self.source_contest_id, &Filters::new()).await?;
        info!("Found {} participant(s) to migrate", participants.len());

        let existing =
            load_participants(self.target, &self.target_contest_id, &Filters::new()).await?;
        let mut reconciler = Reconciler::new(existing, self.policy);

        let mut summary = RunSummary::default();

        for participant in &participants {
            summary.processed += 1;

            let score = self
                .source
                .describe_score(&self.source_contest_id, &participant.id, ScoreMode::Latest)
                .await?;

            let timeline = reconstruct(&score.breakdown, &source_problems, &target_problems);
            if timeline.is_empty() {
                info!("Participant \"{}\" has no solved problems, skipping...", participant.name);
                summary.skipped += 1;
                continue;
            }

            let Some(participant_id) = self
                .resolve_target(&mut reconciler, &participant.name, &mut summary)
                .await?
            else {
                continue;
            };

            self.target
                .import_score(&self.target_contest_id, &participant_id, &timeline.snapshots)
                .await?;

            info!(
                "\"{}\" was added with {} score record(s)",
                participant.name,
                timeline.snapshots.len()
            );
        }

        Ok(summary)
    }

    fn name(&self) -> &'static str {
        "Ghost migration"
    }
}
