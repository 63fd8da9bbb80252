//! Rebuilds a participant's score history from a final breakdown.
//!
//! Only fully solved problems produce milestones. Each emitted snapshot is a
//! complete cumulative state (every problem solved up to its offset), so the
//! target contest can treat the latest one as authoritative.

use platform::{Score, ScoreProblem};
use tracing::warn;

use crate::problem_index::{ProblemIndex, cross_reference};

/// Snapshots in replay order plus the source problem ids that could not be
/// mapped into the target contest.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Timeline {
    pub snapshots: Vec<Score>,
    pub unmapped: Vec<String>,
}

impl Timeline {
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
}

struct Milestone<'a> {
    solved_in: u64,
    source: &'a ScoreProblem,
    target_problem_id: String,
}

pub fn reconstruct(breakdown: &[ScoreProblem], source: &ProblemIndex, target: &ProblemIndex) -> Timeline {
    let mut unmapped = Vec::new();

    let mut milestones: Vec<Milestone<'_>> = breakdown
        .iter()
        .filter(|entry| entry.is_fully_solved())
        .filter_map(|entry| {
            let solved_in = entry.solved_in?;
            match cross_reference(source, target, &entry.problem_id) {
                Ok(target_problem_id) => Some(Milestone {
                    solved_in,
                    source: entry,
                    target_problem_id,
                }),
                Err(e) => {
                    warn!("Dropping breakdown entry: {}", e);
                    unmapped.push(entry.problem_id.clone());
                    None
                }
            }
        })
        .collect();

    milestones.sort_by(|a, b| {
        a.solved_in
            .cmp(&b.solved_in)
            .then_with(|| a.source.problem_id.cmp(&b.source.problem_id))
    });

    let mut snapshots: Vec<Score> = Vec::with_capacity(milestones.len());
    let mut solved: Vec<ScoreProblem> = Vec::with_capacity(milestones.len());
    let mut total_score = 0.0;
    let mut total_penalty = 0;

    for milestone in milestones {
        let entry = milestone.source;
        total_score += entry.score;
        total_penalty += entry.penalty;
        solved.push(ScoreProblem {
            problem_id: milestone.target_problem_id,
            score: entry.score,
            percentage: entry.percentage,
            penalty: entry.penalty,
            attempts: entry.attempts,
            solved_in: Some(milestone.solved_in),
            solved: true,
        });

        let snapshot = Score {
            valid_after: milestone.solved_in,
            score: total_score,
            penalty: total_penalty,
            breakdown: solved.clone(),
        };

        // Problems solved at the same second share one snapshot.
        match snapshots.last_mut() {
            Some(last) if last.valid_after == milestone.solved_in => *last = snapshot,
            _ => snapshots.push(snapshot),
        }
    }

    Timeline {
        snapshots,
        unmapped,
    }
}
