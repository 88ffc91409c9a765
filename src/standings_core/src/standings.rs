use serde::Serialize;
use std::sync::Arc;

use crate::errors::InputError;
use crate::point_system::{Outcome, PointSystem, Record, TiebreakKey};
use crate::schedule::GameResult;
use crate::team::Roster;

/// Running points and record of one team.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TeamLine {
    pub points: u32,
    pub record: Record,
}

/// Final position of one team.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TeamRanking {
    pub team: String,
    pub rank: usize,
}

/// One row of the standings table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct StandingsRow {
    pub rank: usize,
    pub team: String,
    pub record: Record,
    pub points: u32,
}

/// Points table for a set of decided games.
///
/// Cloning copies the per-team lines; the roster is shared read-only.
/// Rankings are always derived from the current lines, never stored.
#[derive(Clone, Debug)]
pub struct Standings {
    roster: Arc<Roster>,
    system: PointSystem,
    lines: Vec<TeamLine>,
}

impl Standings {
    pub fn new(roster: Arc<Roster>, system: PointSystem) -> Self {
        let lines = vec![TeamLine::default(); roster.len()];
        Standings {
            roster,
            system,
            lines,
        }
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn system(&self) -> PointSystem {
        self.system
    }

    pub fn line(&self, team: &str) -> Option<&TeamLine> {
        self.roster.index_of(team).map(|idx| &self.lines[idx])
    }

    pub fn points(&self, team: &str) -> Option<u32> {
        self.line(team).map(|line| line.points)
    }

    pub fn record(&self, team: &str) -> Option<&Record> {
        self.line(team).map(|line| &line.record)
    }

    /// Apply one result. Nothing changes when it is rejected.
    pub fn apply(&mut self, result: &GameResult) -> Result<(), InputError> {
        let fixture = result.fixture();
        let home = self.team_index(&fixture.home)?;
        let away = self.team_index(&fixture.away)?;
        self.apply_indexed(home, away, result.outcome())
    }

    /// Apply results, logging and skipping the ones that do not fit.
    /// Returns how many were skipped.
    pub fn apply_all<'a, I>(&mut self, results: I) -> usize
    where
        I: IntoIterator<Item = &'a GameResult>,
    {
        let mut skipped = 0;
        for result in results {
            if let Err(err) = self.apply(result) {
                tracing::warn!(game = %result, error = %err, "skipping result");
                skipped += 1;
            }
        }
        skipped
    }

    /// Apply an outcome between two roster positions.
    pub(crate) fn apply_indexed(
        &mut self,
        home: usize,
        away: usize,
        outcome: Outcome,
    ) -> Result<(), InputError> {
        let system = self.system;
        let (home_award, away_award) = system
            .awards(outcome)
            .ok_or(InputError::OutcomeNotAllowed { outcome, system })?;

        let home_line = &mut self.lines[home];
        home_line.points += home_award.points;
        home_line.record.add(home_award.category);

        let away_line = &mut self.lines[away];
        away_line.points += away_award.points;
        away_line.record.add(away_award.category);

        Ok(())
    }

    fn team_index(&self, team: &str) -> Result<usize, InputError> {
        self.roster
            .index_of(team)
            .ok_or_else(|| InputError::UnknownTeam {
                team: team.to_string(),
            })
    }

    fn key(&self, idx: usize) -> TiebreakKey {
        let line = &self.lines[idx];
        self.system.tiebreak_key(line.points, &line.record)
    }

    /// Roster positions from first place to last.
    ///
    /// Sorted descending on the tie-break key; the sort is stable so equal
    /// keys keep roster order.
    pub fn ranked_indices(&self) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.lines.len()).collect();
        order.sort_by(|&a, &b| self.key(b).cmp(&self.key(a)));
        order
    }

    /// Every team with its rank, 1 through N, best first.
    pub fn rank(&self) -> Vec<TeamRanking> {
        self.ranked_indices()
            .into_iter()
            .enumerate()
            .map(|(pos, idx)| TeamRanking {
                team: self.roster.name(idx).to_string(),
                rank: pos + 1,
            })
            .collect()
    }

    /// Standings table in ranked order.
    pub fn table(&self) -> Vec<StandingsRow> {
        self.ranked_indices()
            .into_iter()
            .enumerate()
            .map(|(pos, idx)| StandingsRow {
                rank: pos + 1,
                team: self.roster.name(idx).to_string(),
                record: self.lines[idx].record,
                points: self.lines[idx].points,
            })
            .collect()
    }
}
