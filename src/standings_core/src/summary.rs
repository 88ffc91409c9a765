use bigdecimal::{BigDecimal, RoundingMode, ToPrimitive};
use serde::{Serialize, Serializer};
use statrs::distribution::{ContinuousCDF, Normal};
use std::sync::Arc;

use crate::constants::PERCENT_SCALE;
use crate::errors::{SimulationError, SimulationResult};
use crate::standings::Standings;
use crate::team::Roster;

/// Histogram of final ranks over many trials.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Summary {
    roster: Arc<Roster>,
    /// counts[team][rank - 1]
    counts: Vec<Vec<u64>>,
    trials: u64,
}

impl Summary {
    pub fn new(roster: Arc<Roster>) -> Self {
        let n = roster.len();
        Summary {
            roster,
            counts: vec![vec![0; n]; n],
            trials: 0,
        }
    }

    pub fn trials(&self) -> u64 {
        self.trials
    }

    /// Times `team` finished at `rank` (1-based).
    pub fn count(&self, team: &str, rank: usize) -> Option<u64> {
        let idx = self.roster.index_of(team)?;
        self.counts[idx].get(rank.checked_sub(1)?).copied()
    }

    /// Record the final ranking of one finished trial.
    pub fn record(&mut self, standings: &Standings) {
        for (pos, idx) in standings.ranked_indices().into_iter().enumerate() {
            self.counts[idx][pos] += 1;
        }
        self.trials += 1;
    }

    /// Add another summary's counts into this one.
    pub fn merge(&mut self, other: &Summary) {
        debug_assert_eq!(self.roster.names(), other.roster.names());
        for (mine, theirs) in self.counts.iter_mut().zip(&other.counts) {
            for (a, b) in mine.iter_mut().zip(theirs) {
                *a += b;
            }
        }
        self.trials += other.trials;
    }

    /// Convert counts to percentages, best prospects first.
    pub fn table(&self) -> ProbabilityTable {
        let mut rows: Vec<ProbabilityRow> = self
            .counts
            .iter()
            .enumerate()
            .map(|(idx, counts)| ProbabilityRow {
                team: self.roster.name(idx).to_string(),
                percentages: counts.iter().map(|&c| percentage(c, self.trials)).collect(),
                counts: counts.clone(),
            })
            .collect();

        // Lexicographic on counts, rank 1 first; stable for identical histograms.
        rows.sort_by(|a, b| b.counts.cmp(&a.counts));

        ProbabilityTable {
            trials: self.trials,
            rows,
        }
    }
}

/// `100 * count / trials`, rounded half away from zero to two places.
pub fn percentage(count: u64, trials: u64) -> BigDecimal {
    if trials == 0 {
        return BigDecimal::from(0).with_scale(PERCENT_SCALE);
    }
    let share = BigDecimal::from(count) * BigDecimal::from(100u32) / BigDecimal::from(trials);
    share.with_scale_round(PERCENT_SCALE, RoundingMode::HalfUp)
}

/// Render a percentage with exactly two decimals (`0.00`, `12.50`, `100.00`).
///
/// `BigDecimal`'s own `Display` drops the trailing zeros of a zero value.
pub fn format_percentage(value: &BigDecimal) -> String {
    let (hundredths, _) = value
        .with_scale_round(PERCENT_SCALE, RoundingMode::HalfUp)
        .as_bigint_and_exponent();
    match hundredths.to_u64() {
        Some(h) => format!("{}.{:02}", h / 100, h % 100),
        None => value.to_string(),
    }
}

fn serialize_percentages<S: Serializer>(
    values: &[BigDecimal],
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_seq(values.iter().map(format_percentage))
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ProbabilityRow {
    pub team: String,
    /// Raw finishes per rank, rank 1 first.
    pub counts: Vec<u64>,
    /// Percentage per rank, rank 1 first.
    #[serde(serialize_with = "serialize_percentages")]
    pub percentages: Vec<BigDecimal>,
}

impl ProbabilityRow {
    /// Percentages as two-decimal strings.
    pub fn formatted(&self) -> Vec<String> {
        self.percentages.iter().map(format_percentage).collect()
    }
}

/// Simulated chance of every team finishing at every rank.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ProbabilityTable {
    pub trials: u64,
    pub rows: Vec<ProbabilityRow>,
}

impl ProbabilityTable {
    pub fn row(&self, team: &str) -> Option<&ProbabilityRow> {
        self.rows.iter().find(|row| row.team == team)
    }

    pub fn percentage(&self, team: &str, rank: usize) -> Option<&BigDecimal> {
        self.row(team)?.percentages.get(rank.checked_sub(1)?)
    }

    /// Half-width, in percentage points, of the normal-approximation
    /// confidence interval around one cell.
    pub fn margin_of_error(
        &self,
        team: &str,
        rank: usize,
        confidence: f64,
    ) -> SimulationResult<Option<f64>> {
        if !(confidence > 0.0 && confidence < 1.0) || self.trials == 0 {
            return Err(SimulationError::InvalidProbability(confidence.to_string()));
        }
        let normal = Normal::new(0.0, 1.0)
            .map_err(|_| SimulationError::InvalidProbability(confidence.to_string()))?;
        let z = normal.inverse_cdf(1.0 - (1.0 - confidence) / 2.0);

        let count = match self.row(team).and_then(|row| row.counts.get(rank.checked_sub(1)?)) {
            Some(&count) => count,
            None => return Ok(None),
        };
        let n = self.trials as f64;
        let p = count as f64 / n;
        Ok(Some(100.0 * z * (p * (1.0 - p) / n).sqrt()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::point_system::{Outcome, PointSystem};
    use crate::schedule::{Fixture, GameResult};

    fn roster(teams: &[&str]) -> Arc<Roster> {
        Arc::new(Roster::new(teams.iter().copied()).unwrap())
    }

    #[test]
    fn test_percentage_rounding() {
        let text = |count, trials| format_percentage(&percentage(count, trials));
        assert_eq!(text(1, 3), "33.33");
        assert_eq!(text(2, 3), "66.67");
        assert_eq!(text(1, 8), "12.50");
        assert_eq!(text(7, 7), "100.00");
        assert_eq!(text(0, 9), "0.00");
        assert_eq!(text(0, 0), "0.00");
        assert_eq!(percentage(0, 9), BigDecimal::from(0));
    }

    #[test]
    fn test_zero_cells_keep_two_decimals() {
        let teams = roster(&["A", "B"]);
        let mut standings = Standings::new(teams.clone(), PointSystem::Simple);
        standings
            .apply(&GameResult::new(Fixture::new("A", "B"), Outcome::HomeWin))
            .unwrap();
        let mut summary = Summary::new(teams);
        summary.record(&standings);

        let table = summary.table();
        assert_eq!(table.row("A").unwrap().formatted(), vec!["100.00", "0.00"]);
        assert_eq!(table.row("B").unwrap().formatted(), vec!["0.00", "100.00"]);
    }

    #[test]
    fn test_percentage_half_rounds_away_from_zero() {
        // 0.005 exactly.
        assert_eq!(format_percentage(&percentage(1, 20_000)), "0.01");
        // 0.625 exactly; banker's rounding would give 0.62.
        assert_eq!(format_percentage(&percentage(1, 160)), "0.63");
        // 0.125 exactly.
        assert_eq!(format_percentage(&percentage(1, 800)), "0.13");
    }

    #[test]
    fn test_record_and_count() {
        let teams = roster(&["A", "B"]);
        let mut standings = Standings::new(teams.clone(), PointSystem::Simple);
        standings
            .apply(&GameResult::new(Fixture::new("B", "A"), Outcome::HomeWin))
            .unwrap();

        let mut summary = Summary::new(teams);
        summary.record(&standings);
        summary.record(&standings);

        assert_eq!(summary.trials(), 2);
        assert_eq!(summary.count("B", 1), Some(2));
        assert_eq!(summary.count("A", 2), Some(2));
        assert_eq!(summary.count("A", 1), Some(0));
        assert_eq!(summary.count("A", 3), None);
        assert_eq!(summary.count("A", 0), None);
    }

    #[test]
    fn test_merge_adds_counts() {
        let teams = roster(&["A", "B"]);
        let standings = Standings::new(teams.clone(), PointSystem::Simple);

        let mut left = Summary::new(teams.clone());
        left.record(&standings);
        let mut right = Summary::new(teams);
        right.record(&standings);
        right.record(&standings);

        left.merge(&right);
        assert_eq!(left.trials(), 3);
        assert_eq!(left.count("A", 1), Some(3));
        assert_eq!(left.count("B", 2), Some(3));
    }

    #[test]
    fn test_table_orders_by_histogram() {
        let teams = roster(&["A", "B", "C"]);
        let mut summary = Summary::new(teams.clone());

        let mut c_first = Standings::new(teams.clone(), PointSystem::Simple);
        c_first
            .apply(&GameResult::new(Fixture::new("C", "A"), Outcome::HomeWin))
            .unwrap();
        let mut b_first = Standings::new(teams, PointSystem::Simple);
        b_first
            .apply(&GameResult::new(Fixture::new("B", "A"), Outcome::HomeWin))
            .unwrap();

        summary.record(&c_first);
        summary.record(&c_first);
        summary.record(&b_first);

        let table = summary.table();
        let order: Vec<&str> = table.rows.iter().map(|r| r.team.as_str()).collect();
        assert_eq!(order, vec!["C", "B", "A"]);
        let cell =
            |team: &str, rank: usize| format_percentage(table.percentage(team, rank).unwrap());
        assert_eq!(cell("C", 1), "66.67");
        assert_eq!(cell("B", 1), "33.33");
        assert_eq!(cell("A", 2), "100.00");
        assert_eq!(cell("A", 1), "0.00");
    }

    #[test]
    fn test_margin_of_error() {
        let table = ProbabilityTable {
            trials: 10_000,
            rows: vec![ProbabilityRow {
                team: "A".to_string(),
                counts: vec![5_000, 5_000],
                percentages: vec![percentage(5_000, 10_000), percentage(5_000, 10_000)],
            }],
        };

        let margin = table.margin_of_error("A", 1, 0.95).unwrap().unwrap();
        assert!((margin - 0.98).abs() < 0.01, "margin {margin}");
        assert_eq!(table.margin_of_error("Z", 1, 0.95).unwrap(), None);
        assert!(table.margin_of_error("A", 1, 1.5).is_err());
    }
}
