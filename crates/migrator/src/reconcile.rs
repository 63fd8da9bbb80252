//! Create/update/skip decisions for rows matched to existing entities by a
//! natural key (participant or member name).
//!
//! The existing-entity cache is loaded once before any write and is the only
//! source of truth for the run. Entities created during the run are recorded
//! into it so that a repeated key updates instead of creating a duplicate.

use std::collections::HashMap;
use std::fmt::Debug;

use platform::{Member, MemberField, Participant, ParticipantField};

/// Which existing entities an import may overwrite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OverwritePolicy {
    /// Only placeholder entities not linked to a real account.
    GhostOnly,
    /// Any single match.
    Any,
}

impl OverwritePolicy {
    pub fn permits<T: Reconcilable>(&self, existing: &T) -> bool {
        match self {
            Self::GhostOnly => existing.is_ghost(),
            Self::Any => true,
        }
    }
}

pub trait Reconcilable: Clone {
    type Field: Debug + Clone + PartialEq;

    fn natural_key(&self) -> &str;

    fn entity_id(&self) -> &str;

    fn is_ghost(&self) -> bool;

    /// Fields that carry a value and therefore belong in an update patch.
    fn present_fields(&self) -> Vec<Self::Field>;
}

impl Reconcilable for Participant {
    type Field = ParticipantField;

    fn natural_key(&self) -> &str {
        &self.name
    }

    fn entity_id(&self) -> &str {
        &self.id
    }

    fn is_ghost(&self) -> bool {
        self.ghost
    }

    fn present_fields(&self) -> Vec<ParticipantField> {
        Participant::present_fields(self)
    }
}

impl Reconcilable for Member {
    type Field = MemberField;

    fn natural_key(&self) -> &str {
        &self.name
    }

    fn entity_id(&self) -> &str {
        &self.id
    }

    fn is_ghost(&self) -> bool {
        Member::is_ghost(self)
    }

    fn present_fields(&self) -> Vec<MemberField> {
        Member::present_fields(self)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Decision<T: Reconcilable> {
    Create(T),
    Update {
        id: String,
        patch: Vec<T::Field>,
        payload: T,
    },
    SkipAmbiguous {
        matches: usize,
    },
    SkipIneligible {
        id: String,
    },
}

/// Decides what to do with `candidate` given the entities already known under
/// `natural_key`. Matching is exact and case-sensitive.
pub fn reconcile<T: Reconcilable>(
    natural_key: &str,
    existing_by_key: &HashMap<String, Vec<T>>,
    candidate: T,
    policy: OverwritePolicy,
) -> Decision<T> {
    match existing_by_key.get(natural_key).map(Vec::as_slice) {
        None | Some([]) => Decision::Create(candidate),
        Some([existing]) if policy.permits(existing) => Decision::Update {
            id: existing.entity_id().to_string(),
            patch: candidate.present_fields(),
            payload: candidate,
        },
        Some([existing]) => Decision::SkipIneligible {
            id: existing.entity_id().to_string(),
        },
        Some(matches) => Decision::SkipAmbiguous {
            matches: matches.len(),
        },
    }
}

pub struct Reconciler<T> {
    existing: HashMap<String, Vec<T>>,
    policy: OverwritePolicy,
}

impl<T: Reconcilable> Reconciler<T> {
    pub fn new(existing: impl IntoIterator<Item = T>, policy: OverwritePolicy) -> Self {
        let mut by_key: HashMap<String, Vec<T>> = HashMap::new();
        for entity in existing {
            by_key
                .entry(entity.natural_key().to_string())
                .or_default()
                .push(entity);
        }

        Self {
            existing: by_key,
            policy,
        }
    }

    pub fn reconcile(&self, natural_key: &str, candidate: T) -> Decision<T> {
        reconcile(natural_key, &self.existing, candidate, self.policy)
    }

    /// Adds an entity created during this run to the cache.
    pub fn record_created(&mut self, entity: T) {
        self.existing
            .entry(entity.natural_key().to_string())
            .or_default()
            .push(entity);
    }

    pub fn len(&self) -> usize {
        self.existing.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
