use std::path::PathBuf;

use platform::{Filters, Identity, Member, MemberService, Space, UpdateMemberInput, UserService};
use tracing::{info, warn};

use super::{RunSummary, Workflow, load_attributes, load_members};
use crate::attributes::AttributeSchema;
use crate::reconcile::{Decision, OverwritePolicy, Reconciler};
use crate::rows::{CsvTable, IdentitySource, MemberRow, validate_member_header};
use crate::{MigrateError, Result};

/// Creates or updates space members from a CSV roster, matched by name.
pub struct MemberImport<'a> {
    members: &'a dyn MemberService,
    users: &'a dyn UserService,
    space: Space,
    file: PathBuf,
    policy: OverwritePolicy,
}

impl<'a> MemberImport<'a> {
    pub fn new(
        members: &'a dyn MemberService,
        users: &'a dyn UserService,
        space: Space,
        file: impl Into<PathBuf>,
        policy: OverwritePolicy,
    ) -> Self {
        Self {
            members,
            users,
            space,
            file: file.into(),
            policy,
        }
    }

    /// Builds the member's identity. `None` means no identity can be derived
    /// and the row must be skipped.
    async fn identity(&self, name: &str, source: &IdentitySource) -> Result<Option<Identity>> {
        match source {
            IdentitySource::Password(password) => Ok(Some(Identity::with_password(
                &self.space.url,
                name,
                password,
            ))),
            IdentitySource::UserId(user_id) => Ok(Some(Identity::with_user_id(user_id))),
            IdentitySource::Username(username) => {
                let users = self
                    .users
                    .list_users(&Filters::new().username_equals(username))
                    .await?;

                match users.into_iter().next() {
                    Some(user) => {
                        info!("Username \"{}\" resolved to ID {}", username, user.id);
                        Ok(Some(Identity::with_user_id(user.id)))
                    }
                    None => {
                        warn!("User with username \"{}\" does not exist", username);
                        Ok(None)
                    }
                }
            }
        }
    }
}

#[async_trait::async_trait]
impl Workflow for MemberImport<'_> {
    async fn run(&self) -> Result<RunSummary> {
        let table = CsvTable::open(&self.file)?;
        validate_member_header(&table.header)?;

        let existing = load_members(self.members).await?;
        let mut reconciler = Reconciler::new(existing, self.policy);
        let schema = AttributeSchema::new(load_attributes(self.members).await?);

        let mut summary = RunSummary::default();

        for (line, row) in table.rows.iter().enumerate() {
            let parsed = match MemberRow::parse(row, &schema) {
                Ok(Some(parsed)) => parsed,
                Ok(None) => continue,
                Err(e @ MigrateError::InvalidAttributeValue { .. }) => return Err(e),
                Err(e) => {
                    warn!("Skipping row {}: {}", line + 2, e);
                    summary.skipped += 1;
                    continue;
                }
            };
            summary.processed += 1;

            let Some(source) = &parsed.identity else {
                warn!("Unable to create identity for member \"{}\", skipping...", parsed.name);
                summary.skipped += 1;
                continue;
            };
            let Some(identity) = self.identity(&parsed.name, source).await? else {
                summary.skipped += 1;
                continue;
            };

            let candidate = Member {
                name: parsed.name.clone(),
                identities: vec![identity],
                inactive: parsed.inactive,
                unofficial: parsed.unofficial,
                rating: parsed.rating,
                groups: parsed.groups,
                attributes: parsed.attributes,
                ..Default::default()
            };

            match reconciler.reconcile(&parsed.name, candidate) {
                Decision::Create(mut member) => {
                    member.id = self.members.create_member(&member).await?;
                    info!("Member {} has been added", member.id);
                    reconciler.record_created(member);
                    summary.created += 1;
                }
                Decision::Update { id, patch, payload } => {
                    let input = UpdateMemberInput {
                        patch,
                        member: payload,
                    };
                    self.members.update_member(&id, &input).await?;
                    info!("Member {} has been updated", id);
                    summary.updated += 1;
                }
                Decision::SkipAmbiguous { matches } => {
                    warn!("Multiple ({}) members named \"{}\", skipping...", matches, parsed.name);
                    summary.skipped += 1;
                }
                Decision::SkipIneligible { id } => {
                    warn!("Member \"{}\" (#{}) may not be overwritten, skipping...", parsed.name, id);
                    summary.skipped += 1;
                }
            }
        }

        Ok(summary)
    }

    fn name(&self) -> &'static str {
        "Member import"
    }
}
