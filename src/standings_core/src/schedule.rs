use serde::Serialize;
use std::fmt;

use crate::errors::{InputError, SimulationError, SimulationResult};
use crate::point_system::{Outcome, PointSystem};
use crate::team::Roster;

/// A scheduled game. Identity is the exact (home, away) pair, so
/// `(A, B)` and `(B, A)` are different fixtures.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct Fixture {
    pub home: String,
    pub away: String,
}

impl Fixture {
    pub fn new(home: impl Into<String>, away: impl Into<String>) -> Self {
        Fixture {
            home: home.into(),
            away: away.into(),
        }
    }

    /// Check both sides against the roster.
    pub fn validate(&self, roster: &Roster) -> Result<(), InputError> {
        for team in [&self.home, &self.away] {
            if !roster.contains(team) {
                return Err(InputError::UnknownTeam { team: team.clone() });
            }
        }
        Ok(())
    }
}

impl fmt::Display for Fixture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.home, self.away)
    }
}

/// A fixture with its final outcome. Immutable once built.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct GameResult {
    fixture: Fixture,
    outcome: Outcome,
}

impl GameResult {
    pub fn new(fixture: Fixture, outcome: Outcome) -> Self {
        GameResult { fixture, outcome }
    }

    pub fn fixture(&self) -> &Fixture {
        &self.fixture
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }
}

impl fmt::Display for GameResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.fixture, self.outcome)
    }
}

/// Entry of a caller-supplied fixture list, possibly already played.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeclaredGame {
    pub fixture: Fixture,
    pub outcome: Option<Outcome>,
}

impl DeclaredGame {
    pub fn unplayed(fixture: Fixture) -> Self {
        DeclaredGame {
            fixture,
            outcome: None,
        }
    }

    pub fn played(fixture: Fixture, outcome: Outcome) -> Self {
        DeclaredGame {
            fixture,
            outcome: Some(outcome),
        }
    }
}

/// Where the full set of fixtures comes from.
#[derive(Clone, Debug)]
pub enum ScheduleSource {
    /// Generate a round robin with this many rounds.
    Rounds(u32),
    /// Use a literal fixture list as given.
    Declared(Vec<DeclaredGame>),
}

impl ScheduleSource {
    /// Pick the source from optional parts; exactly one must be present.
    pub fn from_parts(
        rounds: Option<u32>,
        fixtures: Option<Vec<DeclaredGame>>,
    ) -> SimulationResult<Self> {
        match (rounds, fixtures) {
            (Some(_), Some(_)) => Err(SimulationError::ConflictingConfiguration(
                "a round count cannot be combined with a fixture list".to_string(),
            )),
            (Some(rounds), None) => Ok(ScheduleSource::Rounds(rounds)),
            (None, Some(fixtures)) => Ok(ScheduleSource::Declared(fixtures)),
            (None, None) => Err(SimulationError::MissingSchedule),
        }
    }
}

/// Generate every fixture of a round robin.
///
/// Pairs are taken in combination order of the roster; in even rounds
/// (0-based) the earlier team is at home, in odd rounds the later one.
pub fn generate_fixtures(teams: &[String], rounds: u32) -> Vec<Fixture> {
    let n = teams.len();
    let pairs = n * n.saturating_sub(1) / 2;
    let mut fixtures = Vec::with_capacity(pairs * rounds as usize);

    for i in 0..n {
        for j in (i + 1)..n {
            for round in 0..rounds {
                let (home, away) = if round % 2 == 0 {
                    (&teams[i], &teams[j])
                } else {
                    (&teams[j], &teams[i])
                };
                fixtures.push(Fixture::new(home.as_str(), away.as_str()));
            }
        }
    }

    fixtures
}

/// Remove the first open fixture equal to `fixture`.
fn take_fixture(open: &mut Vec<Fixture>, fixture: &Fixture) -> bool {
    match open.iter().position(|f| f == fixture) {
        Some(pos) => {
            open.remove(pos);
            true
        }
        None => false,
    }
}

/// Fixtures still to be played once `results` are accounted for.
///
/// Every result removes at most one fixture, matched on the exact
/// (home, away) pair.
pub fn remaining_fixtures(mut fixtures: Vec<Fixture>, results: &[GameResult]) -> Vec<Fixture> {
    for result in results {
        take_fixture(&mut fixtures, result.fixture());
    }
    fixtures
}

/// Known results and the fixtures left to simulate.
#[derive(Clone, Debug, Default)]
pub struct Schedule {
    pub known: Vec<GameResult>,
    pub remaining: Vec<Fixture>,
}

impl Schedule {
    /// Combine a schedule source with separately reported results.
    ///
    /// Items naming teams outside the roster, or carrying an outcome the
    /// point system does not allow, are logged and dropped.
    pub fn assemble(
        roster: &Roster,
        system: PointSystem,
        source: ScheduleSource,
        results: Vec<GameResult>,
    ) -> SimulationResult<Self> {
        let results: Vec<GameResult> = results
            .into_iter()
            .filter(|r| keep_valid(roster, system, r.fixture(), Some(r.outcome()), "result"))
            .collect();

        match source {
            ScheduleSource::Rounds(0) => Err(SimulationError::InvalidRounds(0)),
            ScheduleSource::Rounds(rounds) => {
                let mut open = generate_fixtures(roster.names(), rounds);
                for result in &results {
                    if !take_fixture(&mut open, result.fixture()) {
                        tracing::warn!(game = %result, "result does not match any open fixture");
                    }
                }
                Ok(Schedule {
                    known: results,
                    remaining: open,
                })
            }
            ScheduleSource::Declared(games) => {
                let mut open = Vec::new();
                let mut declared = Vec::new();
                for game in games {
                    if !keep_valid(roster, system, &game.fixture, game.outcome, "fixture") {
                        continue;
                    }
                    match game.outcome {
                        Some(outcome) => declared.push(GameResult::new(game.fixture, outcome)),
                        None => open.push(game.fixture),
                    }
                }

                let mut known = declared.clone();
                for result in results {
                    if take_fixture(&mut open, result.fixture()) {
                        known.push(result);
                    } else if let Some(pos) =
                        declared.iter().position(|d| d.fixture() == result.fixture())
                    {
                        let listed = declared.remove(pos);
                        tracing::warn!(
                            game = %result,
                            listed = %listed,
                            "fixture already has a result in the fixture list, skipping"
                        );
                    } else {
                        tracing::warn!(game = %result, "result does not match any open fixture");
                        known.push(result);
                    }
                }

                Ok(Schedule {
                    known,
                    remaining: open,
                })
            }
        }
    }
}

fn keep_valid(
    roster: &Roster,
    system: PointSystem,
    fixture: &Fixture,
    outcome: Option<Outcome>,
    kind: &str,
) -> bool {
    let checked = fixture.validate(roster).and_then(|()| match outcome {
        Some(outcome) if !system.allows(outcome) => {
            Err(InputError::OutcomeNotAllowed { outcome, system })
        }
        _ => Ok(()),
    });
    match checked {
        Ok(()) => true,
        Err(err) => {
            tracing::warn!(%fixture, kind, error = %err, "skipping input");
            false
        }
    }
}
