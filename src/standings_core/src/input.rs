use std::io::BufRead;

use crate::errors::{InputError, SimulationResult};
use crate::point_system::Outcome;
use crate::schedule::{DeclaredGame, Fixture, GameResult};

/// Parse one game line: `home,away` for an unplayed fixture or
/// `home,away,code` for a played one.
pub fn parse_line(line: &str) -> Result<DeclaredGame, InputError> {
    let parts: Vec<&str> = line.split(',').map(str::trim).collect();
    match parts.as_slice() {
        [home, away] if !home.is_empty() && !away.is_empty() => {
            Ok(DeclaredGame::unplayed(Fixture::new(*home, *away)))
        }
        [home, away, code, ..] if !home.is_empty() && !away.is_empty() => {
            let outcome: Outcome = code.parse()?;
            Ok(DeclaredGame::played(Fixture::new(*home, *away), outcome))
        }
        _ => Err(InputError::MalformedLine(line.to_string())),
    }
}

/// Read every game from a line-oriented source.
///
/// Blank lines and lines starting with `#` are ignored; lines that do not
/// parse are logged and skipped.
pub fn read_games<R: BufRead>(reader: R) -> SimulationResult<Vec<DeclaredGame>> {
    let mut games = Vec::new();
    for (number, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        match parse_line(line) {
            Ok(game) => games.push(game),
            Err(err) => tracing::warn!(line = number + 1, error = %err, "skipping line"),
        }
    }
    Ok(games)
}

/// Read only the played games from a line-oriented source.
pub fn read_results<R: BufRead>(reader: R) -> SimulationResult<Vec<GameResult>> {
    Ok(read_games(reader)?
        .into_iter()
        .filter_map(|game| Some(GameResult::new(game.fixture, game.outcome?)))
        .collect())
}
