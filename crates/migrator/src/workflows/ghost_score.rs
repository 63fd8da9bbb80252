use std::path::PathBuf;

use platform::{Filters, JudgeService, ListInput, MemberService, Participant};
use tracing::{info, warn};

use super::{RunSummary, Workflow, load_contest};
use crate::rows::{CsvTable, snapshot_row, validate_ghost_score_header};
use crate::{MigrateError, Result};

/// Imports a prepared score history (one CSV row per snapshot) for a single
/// member of a contest.
pub struct GhostScoreImport<'a> {
    judge: &'a dyn JudgeService,
    members: &'a dyn MemberService,
    member_id: String,
    contest_id: String,
    file: PathBuf,
}

impl<'a> GhostScoreImport<'a> {
    pub fn new(
        judge: &'a dyn JudgeService,
        members: &'a dyn MemberService,
        member_id: impl Into<String>,
        contest_id: impl Into<String>,
        file: impl Into<PathBuf>,
    ) -> Self {
        Self {
            judge,
            members,
            member_id: member_id.into(),
            contest_id: contest_id.into(),
            file: file.into(),
        }
    }

    async fn find_or_add_participant(&self, member_name: &str, summary: &mut RunSummary) -> Result<String> {
        let input = ListInput::new(0, 1).with_filters(Filters::new().member_id_equals(&self.member_id));
        let page = self.judge.list_participants(&self.contest_id, &input).await?;

        if let Some(participant) = page.items.into_iter().next() {
            info!("Found participant \"{}\"", participant.name);
            return Ok(participant.id);
        }

        info!("Member is not participating in the contest, adding...");
        let participant = Participant::for_member(&self.member_id, member_name);
        let participant_id = self
            .judge
            .assign_participant(&self.contest_id, &participant)
            .await?;
        info!("Participant #{} created", participant_id);
        summary.created += 1;
        Ok(participant_id)
    }
}

#[async_trait::async_trait]
impl Workflow for GhostScoreImport<'_> {
    async fn run(&self) -> Result<RunSummary> {
        let (_, problems) = load_contest(self.judge, &self.contest_id).await?;

        let member = self.members.describe_member(&self.member_id).await.map_err(|e| {
            MigrateError::setup(
                format!(
                    "An error occurred while loading member with ID \"{}\"",
                    self.member_id
                ),
                e,
            )
        })?;
        info!("Found member \"{}\"", member.name);

        let table = CsvTable::open(&self.file)?;
        validate_ghost_score_header(&table.header)?;

        let mut summary = RunSummary::default();
        let participant_id = self
            .find_or_add_participant(&member.name, &mut summary)
            .await
            .map_err(|e| MigrateError::setup("Unable to resolve participant", e))?;

        let mut scores = Vec::with_capacity(table.rows.len());
        for (line, row) in table.rows.iter().enumerate() {
            match snapshot_row(row, &problems) {
                Ok(Some(score)) => scores.push(score),
                Ok(None) => summary.skipped += 1,
                Err(e) => {
                    warn!("Skipping row {}: {}", line + 2, e);
                    summary.skipped += 1;
                }
            }
        }

        self.judge
            .import_score(&self.contest_id, &participant_id, &scores)
            .await?;

        summary.processed = scores.len();
        info!("{} score records are imported", scores.len());
        Ok(summary)
    }

    fn name(&self) -> &'static str {
        "Ghost score import"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakePlatform;
    use platform::{Member, Problem};
    use std::io::Write;

    fn score_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    fn platform() -> (FakePlatform, String) {
        let platform = FakePlatform::new();
        platform.add_contest("c1", vec![Problem::new("a", Some(1)), Problem::new("b", Some(2))]);
        let member_id = platform.add_member(Member::ghost("ghost"));
        (platform, member_id)
    }

    #[tokio::test]
    async fn test_imports_rows_as_snapshots_in_file_order() {
        let (platform, member_id) = platform();
        let file = score_file(
            "time_offset,total_score,total_penalty,p1_score,p1_percentage,p2_score\n\
             600,1,10,1,1,\n\
             1800,2,40,1,1,1\n",
        );

        let import = GhostScoreImport::new(&platform, &platform, &member_id, "c1", file.path());
        let summary = import.run().await.unwrap();

        assert_eq!(summary.processed, 2);
        assert_eq!(summary.created, 1);

        let imports = platform.imported_scores();
        assert_eq!(imports.len(), 1);
        let (_, participant_id, scores) = &imports[0];
        assert_eq!(scores[0].valid_after, 600);
        assert_eq!(scores[1].valid_after, 1800);
        assert_eq!(scores[1].breakdown.len(), 2);

        let participants = platform.participants("c1");
        assert_eq!(&participants[0].id, participant_id);
        assert_eq!(participants[0].member_id.as_deref(), Some(member_id.as_str()));
    }

    #[tokio::test]
    async fn test_existing_participant_is_reused() {
        let (platform, member_id) = platform();
        let existing = platform.add_participant("c1", Participant::for_member(&member_id, "ghost"));
        let file = score_file("time_offset,total_score\n60,1\n");

        let summary = GhostScoreImport::new(&platform, &platform, &member_id, "c1", file.path())
            .run()
            .await
            .unwrap();

        assert_eq!(summary.created, 0);
        assert_eq!(platform.imported_scores()[0].1, existing);
    }

    #[tokio::test]
    async fn test_unknown_member_is_a_setup_error() {
        let (platform, _) = platform();
        let file = score_file("time_offset,total_score\n60,1\n");

        let err = GhostScoreImport::new(&platform, &platform, "nobody", "c1", file.path())
            .run()
            .await
            .unwrap_err();
        assert!(err.is_setup());
        assert!(platform.imported_scores().is_empty());
    }

    #[tokio::test]
    async fn test_header_without_total_score_is_rejected() {
        let (platform, member_id) = platform();
        let file = score_file("time_offset,score\n60,1\n");

        let err = GhostScoreImport::new(&platform, &platform, &member_id, "c1", file.path())
            .run()
            .await
            .unwrap_err();
        assert!(matches!(err, MigrateError::InvalidHeader(_)));
    }
}
