//! Problem identity across contests. Problem ids are private to a contest; the
//! ordinal index is the only thing two contests with the same problem set share.

use std::collections::{BTreeMap, HashMap};

use platform::Problem;
use tracing::info;

use crate::{MigrateError, Result};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProblemIndex {
    by_id: HashMap<String, u32>,
    by_index: BTreeMap<u32, String>,
}

impl ProblemIndex {
    /// Builds both lookup directions from a contest's problem listing. Problems
    /// without an index get their 1-based position in the listing.
    pub fn build(problems: &[Problem]) -> Self {
        let mut mapping = Self::default();

        for (position, problem) in problems.iter().enumerate() {
            let index = problem.index.unwrap_or(position as u32 + 1);
            info!(
                "  - Found problem #{} with index \"{}\"",
                problem.id,
                index_letter(index)
            );
            mapping.by_id.insert(problem.id.clone(), index);
            mapping.by_index.insert(index, problem.id.clone());
        }

        mapping
    }

    pub fn index_of(&self, problem_id: &str) -> Option<u32> {
        self.by_id.get(problem_id).copied()
    }

    pub fn id_at(&self, index: u32) -> Option<&str> {
        self.by_index.get(&index).map(String::as_str)
    }

    pub fn letter_of(&self, problem_id: &str) -> Option<String> {
        self.index_of(problem_id).map(index_letter)
    }

    /// Indices in ascending order with the problem id at each.
    pub fn iter(&self) -> impl Iterator<Item = (u32, &str)> {
        self.by_index
            .iter()
            .map(|(index, id)| (*index, id.as_str()))
    }

    pub fn len(&self) -> usize {
        self.by_index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_index.is_empty()
    }
}

/// Maps a problem id of the source contest to the id of the problem at the
/// same index in the target contest.
pub fn cross_reference(
    source: &ProblemIndex,
    target: &ProblemIndex,
    source_problem_id: &str,
) -> Result<String> {
    source
        .index_of(source_problem_id)
        .and_then(|index| target.id_at(index))
        .map(str::to_string)
        .ok_or_else(|| MigrateError::UnmappedProblem {
            problem_id: source_problem_id.to_string(),
        })
}

/// Display letter for a 1-based index: 1 is "A", 26 is "Z", 27 is "AA".
pub fn index_letter(index: u32) -> String {
    if index == 0 {
        return "?".to_string();
    }

    let mut n = index;
    let mut letters = Vec::new();
    while n > 0 {
        let rem = ((n - 1) % 26) as u8;
        letters.push((b'A' + rem) as char);
        n = (n - 1) / 26;
    }
    letters.iter().rev().collect()
}
