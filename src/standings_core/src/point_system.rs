use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::constants::{
    OVERTIME_LOSS_POINTS, OVERTIME_WIN_POINTS, SIMPLE_SELECTOR, THREE_POINT_OVERTIME_SELECTOR,
    TIE_POINTS, WIN_POINTS,
};
use crate::errors::{InputError, SimulationError};

/// Result of a single game, seen from the home side.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum Outcome {
    HomeWin,
    AwayWin,
    Tie,
    HomeOvertimeWin,
    AwayOvertimeWin,
}

impl Outcome {
    /// Code used in result lines (`1`, `2`, `X`, `1OT`, `2OT`).
    pub fn code(self) -> &'static str {
        match self {
            Outcome::HomeWin => "1",
            Outcome::AwayWin => "2",
            Outcome::Tie => "X",
            Outcome::HomeOvertimeWin => "1OT",
            Outcome::AwayOvertimeWin => "2OT",
        }
    }
}

impl FromStr for Outcome {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "1" => Ok(Outcome::HomeWin),
            "2" => Ok(Outcome::AwayWin),
            "X" => Ok(Outcome::Tie),
            "1OT" => Ok(Outcome::HomeOvertimeWin),
            "2OT" => Ok(Outcome::AwayOvertimeWin),
            other => Err(InputError::UnknownOutcomeCode(other.to_string())),
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Record column a team's game is counted in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RecordCategory {
    Win,
    Tie,
    OvertimeWin,
    OvertimeLoss,
    Loss,
}

/// Points and record column awarded to one side of a game.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Award {
    pub points: u32,
    pub category: RecordCategory,
}

impl Award {
    const fn new(points: u32, category: RecordCategory) -> Self {
        Award { points, category }
    }
}

/// Per-team categorical result counts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Record {
    pub games: u32,
    pub wins: u32,
    pub ties: u32,
    pub overtime_wins: u32,
    pub overtime_losses: u32,
    pub losses: u32,
}

impl Record {
    pub fn add(&mut self, category: RecordCategory) {
        self.games += 1;
        match category {
            RecordCategory::Win => self.wins += 1,
            RecordCategory::Tie => self.ties += 1,
            RecordCategory::OvertimeWin => self.overtime_wins += 1,
            RecordCategory::OvertimeLoss => self.overtime_losses += 1,
            RecordCategory::Loss => self.losses += 1,
        }
    }
}

/// Ordered statistics compared when ranking; larger sorts first.
pub type TiebreakKey = (u32, u32, u32, u32);

/// Scoring scheme used for a whole run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum PointSystem {
    /// 3 for a win, 1 each for a tie.
    Simple,
    /// 3 for a regulation win, 2/1 split for a game decided in overtime.
    ThreePointOvertime,
}

impl PointSystem {
    pub fn selector(self) -> &'static str {
        match self {
            PointSystem::Simple => SIMPLE_SELECTOR,
            PointSystem::ThreePointOvertime => THREE_POINT_OVERTIME_SELECTOR,
        }
    }

    pub fn allows(self, outcome: Outcome) -> bool {
        self.awards(outcome).is_some()
    }

    /// Home and away awards for `outcome`, or `None` when the outcome
    /// cannot occur under this system.
    pub fn awards(self, outcome: Outcome) -> Option<(Award, Award)> {
        use RecordCategory::*;

        let win = Award::new(WIN_POINTS, Win);
        let loss = Award::new(0, Loss);
        match (self, outcome) {
            (_, Outcome::HomeWin) => Some((win, loss)),
            (_, Outcome::AwayWin) => Some((loss, win)),
            (PointSystem::Simple, Outcome::Tie) => {
                let tie = Award::new(TIE_POINTS, Tie);
                Some((tie, tie))
            }
            (PointSystem::ThreePointOvertime, Outcome::HomeOvertimeWin) => Some((
                Award::new(OVERTIME_WIN_POINTS, OvertimeWin),
                Award::new(OVERTIME_LOSS_POINTS, OvertimeLoss),
            )),
            (PointSystem::ThreePointOvertime, Outcome::AwayOvertimeWin) => Some((
                Award::new(OVERTIME_LOSS_POINTS, OvertimeLoss),
                Award::new(OVERTIME_WIN_POINTS, OvertimeWin),
            )),
            _ => None,
        }
    }

    pub fn tiebreak_key(self, points: u32, record: &Record) -> TiebreakKey {
        match self {
            PointSystem::Simple => (points, record.wins, record.ties, 0),
            PointSystem::ThreePointOvertime => {
                (points, record.wins, record.overtime_wins, record.overtime_losses)
            }
        }
    }

    /// Outcome a tie-class draw resolves to; `home_side` picks the overtime winner.
    pub fn tie_outcome(self, home_side: bool) -> Outcome {
        match (self, home_side) {
            (PointSystem::Simple, _) => Outcome::Tie,
            (PointSystem::ThreePointOvertime, true) => Outcome::HomeOvertimeWin,
            (PointSystem::ThreePointOvertime, false) => Outcome::AwayOvertimeWin,
        }
    }
}

impl FromStr for PointSystem {
    type Err = SimulationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            SIMPLE_SELECTOR => Ok(PointSystem::Simple),
            THREE_POINT_OVERTIME_SELECTOR => Ok(PointSystem::ThreePointOvertime),
            other => Err(SimulationError::UnsupportedPointSystem(other.to_string())),
        }
    }
}

impl fmt::Display for PointSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.selector())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_codes() {
        for outcome in [
            Outcome::HomeWin,
            Outcome::AwayWin,
            Outcome::Tie,
            Outcome::HomeOvertimeWin,
            Outcome::AwayOvertimeWin,
        ] {
            assert_eq!(outcome.code().parse::<Outcome>(), Ok(outcome));
        }
        assert_eq!(
            "3".parse::<Outcome>(),
            Err(InputError::UnknownOutcomeCode("3".to_string()))
        );
    }

    #[test]
    fn test_simple_awards() {
        let (home, away) = PointSystem::Simple.awards(Outcome::Tie).unwrap();
        assert_eq!(home, Award::new(1, RecordCategory::Tie));
        assert_eq!(away, Award::new(1, RecordCategory::Tie));

        let (home, away) = PointSystem::Simple.awards(Outcome::AwayWin).unwrap();
        assert_eq!(home.points, 0);
        assert_eq!(away.points, 3);

        assert!(!PointSystem::Simple.allows(Outcome::HomeOvertimeWin));
        assert!(!PointSystem::Simple.allows(Outcome::AwayOvertimeWin));
    }

    #[test]
    fn test_overtime_awards() {
        let (home, away) = PointSystem::ThreePointOvertime
            .awards(Outcome::HomeOvertimeWin)
            .unwrap();
        assert_eq!(home, Award::new(2, RecordCategory::OvertimeWin));
        assert_eq!(away, Award::new(1, RecordCategory::OvertimeLoss));

        assert!(!PointSystem::ThreePointOvertime.allows(Outcome::Tie));
    }

    #[test]
    fn test_tiebreak_keys() {
        let record = Record {
            games: 5,
            wins: 2,
            ties: 1,
            overtime_wins: 1,
            overtime_losses: 1,
            losses: 0,
        };
        assert_eq!(PointSystem::Simple.tiebreak_key(7, &record), (7, 2, 1, 0));
        assert_eq!(
            PointSystem::ThreePointOvertime.tiebreak_key(9, &record),
            (9, 2, 1, 1)
        );
    }

    #[test]
    fn test_selector_parsing() {
        assert_eq!("f".parse::<PointSystem>().unwrap(), PointSystem::Simple);
        assert_eq!(
            "3ph".parse::<PointSystem>().unwrap(),
            PointSystem::ThreePointOvertime
        );
        assert!(matches!(
            "hockey".parse::<PointSystem>(),
            Err(SimulationError::UnsupportedPointSystem(s)) if s == "hockey"
        ));
    }
}
