use platform::{Score, ScoreProblem};

use super::Row;
use crate::problem_index::ProblemIndex;
use crate::{MigrateError, Result};

/// How to fill a breakdown entry's percentage when `p<index>_percentage` is absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingPercentage {
    /// Leave it at zero.
    Unset,
    /// Treat the score as points out of 100.
    FromScore,
}

pub fn validate_ghost_score_header(header: &[String]) -> Result<()> {
    if !header.iter().any(|c| c == "time_offset") {
        return Err(MigrateError::InvalidHeader(
            "CSV file must contain column \"time_offset\" with the number of seconds since the \
             beginning of the contest when the score was set"
                .to_string(),
        ));
    }
    if !header.iter().any(|c| c == "total_score") {
        return Err(MigrateError::InvalidHeader(
            "CSV file must contain column \"total_score\" with the total number of points \
             scored by the participant"
                .to_string(),
        ));
    }
    Ok(())
}

pub fn validate_results_header(header: &[String]) -> Result<()> {
    if !header.iter().any(|c| c == "name") {
        return Err(MigrateError::InvalidHeader(
            "CSV file must contain column \"name\"".to_string(),
        ));
    }
    Ok(())
}

/// Builds breakdown entries from `p<index>_*` columns, one per contest problem
/// whose `p<index>_score` cell is filled, in index order.
pub fn problem_breakdown(
    row: &Row,
    problems: &ProblemIndex,
    missing_percentage: MissingPercentage,
) -> Result<Vec<ScoreProblem>> {
    let mut breakdown = Vec::new();

    for (index, problem_id) in problems.iter() {
        let prefix = format!("p{}", index);
        let Some(score) = row.parse_number(&format!("{prefix}_score"))? else {
            continue;
        };

        let percentage = match row.parse_number(&format!("{prefix}_percentage"))? {
            Some(percentage) => percentage,
            None => match missing_percentage {
                MissingPercentage::Unset => 0.0,
                MissingPercentage::FromScore => (score / 100.0).clamp(0.0, 1.0),
            },
        };

        breakdown.push(ScoreProblem {
            problem_id: problem_id.to_string(),
            score,
            percentage,
            penalty: row.parse(&format!("{prefix}_penalty"))?.unwrap_or(0),
            attempts: row.parse(&format!("{prefix}_attempts"))?.unwrap_or(0),
            solved_in: row.parse(&format!("{prefix}_solved_in"))?,
            solved: percentage >= 1.0,
        });
    }

    Ok(breakdown)
}

/// One snapshot per row of a score history file. Rows without a total score
/// yield `None`.
pub fn snapshot_row(row: &Row, problems: &ProblemIndex) -> Result<Option<Score>> {
    let Some(score) = row.parse_number("total_score")? else {
        return Ok(None);
    };

    Ok(Some(Score {
        valid_after: row.parse("time_offset")?.unwrap_or(0),
        score,
        penalty: row.parse("total_penalty")?.unwrap_or(0),
        breakdown: problem_breakdown(row, problems, MissingPercentage::Unset)?,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rows::CsvTable;
    use platform::Problem;

    fn problems() -> ProblemIndex {
        ProblemIndex::build(&[Problem::new("a", Some(1)), Problem::new("b", Some(2))])
    }

    #[test]
    fn test_breakdown_reads_problem_columns() {
        let table = CsvTable::from_reader(
            "name,p1_score,p1_penalty,p1_attempts,p1_solved_in,p1_percentage,p2_score\n\
             alice,1,20,2,1200,1,\n"
                .as_bytes(),
        )
        .unwrap();

        let breakdown = problem_breakdown(&table.rows[0], &problems(), MissingPercentage::Unset).unwrap();
        assert_eq!(breakdown.len(), 1);
        let entry = &breakdown[0];
        assert_eq!(entry.problem_id, "a");
        assert_eq!(entry.score, 1.0);
        assert_eq!(entry.penalty, 20);
        assert_eq!(entry.attempts, 2);
        assert_eq!(entry.solved_in, Some(1200));
        assert!(entry.solved);
    }

    #[test]
    fn test_percentage_from_score() {
        let table = CsvTable::from_reader("name,p1_score,p2_score\nbob,100,35\n".as_bytes()).unwrap();
        let breakdown =
            problem_breakdown(&table.rows[0], &problems(), MissingPercentage::FromScore).unwrap();

        assert_eq!(breakdown[0].percentage, 1.0);
        assert!(breakdown[0].solved);
        assert_eq!(breakdown[1].percentage, 0.35);
        assert!(!breakdown[1].solved);
    }

    #[test]
    fn test_snapshot_rows() {
        let table = CsvTable::from_reader(
            "time_offset,total_score,total_penalty,p2_score\n60,1,5,1\n120,,,\n".as_bytes(),
        )
        .unwrap();

        let first = snapshot_row(&table.rows[0], &problems()).unwrap().unwrap();
        assert_eq!(first.valid_after, 60);
        assert_eq!(first.score, 1.0);
        assert_eq!(first.penalty, 5);
        assert_eq!(first.breakdown[0].problem_id, "b");

        assert!(snapshot_row(&table.rows[1], &problems()).unwrap().is_none());
    }

    #[test]
    fn test_non_finite_scores_are_rejected() {
        let table = CsvTable::from_reader(
            "time_offset,total_score,p1_score,p1_percentage\n60,inf,1,1\n60,1,1,NaN\n".as_bytes(),
        )
        .unwrap();

        assert!(matches!(
            snapshot_row(&table.rows[0], &problems()),
            Err(MigrateError::InvalidValue { ref column, .. }) if column == "total_score"
        ));
        assert!(matches!(
            snapshot_row(&table.rows[1], &problems()),
            Err(MigrateError::InvalidValue { ref column, .. }) if column == "p1_percentage"
        ));
    }

    #[test]
    fn test_header_validation() {
        let header = vec!["time_offset".to_string()];
        assert!(matches!(
            validate_ghost_score_header(&header),
            Err(MigrateError::InvalidHeader(_))
        ));
        assert!(validate_results_header(&["name".to_string()]).is_ok());
        assert!(validate_results_header(&["title".to_string()]).is_err());
    }
}
