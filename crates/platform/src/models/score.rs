use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ScoreMode {
    Latest,
}

impl ScoreMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Latest => "LATEST",
        }
    }
}

/// Per-problem entry of a score breakdown.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ScoreProblem {
    pub problem_id: String,
    #[serde(default)]
    pub score: f64,
    #[serde(default)]
    pub percentage: f64,
    #[serde(default)]
    pub penalty: u64,
    #[serde(default)]
    pub attempts: u32,
    /// Seconds since contest start when the problem was solved.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub solved_in: Option<u64>,
    #[serde(default)]
    pub solved: bool,
}

impl ScoreProblem {
    /// Full credit only; partial and out-of-range percentages do not count.
    pub fn is_fully_solved(&self) -> bool {
        self.percentage == 1.0
    }
}

/// Cumulative score of a participant, valid from `valid_after` seconds into
/// the contest. The breakdown is complete, not a delta against earlier records.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Score {
    #[serde(default)]
    pub valid_after: u64,
    #[serde(default)]
    pub score: f64,
    #[serde(default)]
    pub penalty: u64,
    #[serde(default)]
    pub breakdown: Vec<ScoreProblem>,
}
