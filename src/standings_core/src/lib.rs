//! Standings Core - Monte Carlo simulation of round-robin standings.
//!
//! Given a roster, the results played so far and a tie probability, this
//! library plays out the remaining fixtures many times and reports how
//! often each team finishes at each rank. Python bindings are available
//! behind the `python` feature.

pub mod config;
pub mod constants;
pub mod errors;
pub mod input;
pub mod point_system;
#[cfg(feature = "python")]
pub mod python;
pub mod sampler;
pub mod schedule;
pub mod simulation;
pub mod standings;
pub mod summary;
pub mod team;

pub use config::SimulationConfig;
pub use errors::{InputError, SimulationError, SimulationResult};
pub use input::{parse_line, read_games, read_results};
pub use point_system::{Outcome, PointSystem, Record};
pub use sampler::{OutcomeSampler, TieProbability};
pub use schedule::{
    generate_fixtures, remaining_fixtures, DeclaredGame, Fixture, GameResult, Schedule,
    ScheduleSource,
};
pub use simulation::{Simulation, SimulationParams};
pub use standings::{Standings, StandingsRow, TeamRanking};
pub use summary::{format_percentage, percentage, ProbabilityRow, ProbabilityTable, Summary};
pub use team::Roster;

#[cfg(feature = "python")]
use pyo3::prelude::*;

/// Python module definition
#[cfg(feature = "python")]
#[pymodule]
fn standings_core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<python::PySimulation>()?;

    m.add("SIMPLE", constants::SIMPLE_SELECTOR)?;
    m.add("THREE_POINT_OVERTIME", constants::THREE_POINT_OVERTIME_SELECTOR)?;

    Ok(())
}
