use pyo3::exceptions::{PyIOError, PyValueError};
use pyo3::prelude::*;

use crate::errors::SimulationError;
use crate::input::{read_games, read_results};
use crate::schedule::ScheduleSource;
use crate::simulation::{Simulation, SimulationParams};
use crate::summary::ProbabilityTable;

impl From<SimulationError> for PyErr {
    fn from(err: SimulationError) -> PyErr {
        match err {
            SimulationError::Io(e) => PyIOError::new_err(e.to_string()),
            other => PyValueError::new_err(other.to_string()),
        }
    }
}

type StandingsTuple = (usize, String, u32, u32, u32, u32, u32, u32, u32);

fn table_rows(table: ProbabilityTable) -> Vec<(String, Vec<String>)> {
    table
        .rows
        .into_iter()
        .map(|row| {
            let cells = row.formatted();
            (row.team, cells)
        })
        .collect()
}

/// Standings simulation.
///
/// Fixtures and results are given as lines in the `home,away[,code]`
/// format; percentages come back as strings with two decimals.
#[pyclass(name = "Simulation")]
pub struct PySimulation {
    inner: Simulation,
}

#[pymethods]
impl PySimulation {
    #[new]
    #[pyo3(signature = (teams, point_system, tie_probability, trials, rounds = None, fixtures = None, results = None))]
    fn new(
        teams: Vec<String>,
        point_system: &str,
        tie_probability: &str,
        trials: i64,
        rounds: Option<u32>,
        fixtures: Option<Vec<String>>,
        results: Option<Vec<String>>,
    ) -> PyResult<Self> {
        let params = SimulationParams::parse(teams, point_system, tie_probability, trials)?;

        let fixtures = match fixtures {
            Some(lines) => Some(read_games(lines.join("\n").as_bytes())?),
            None => None,
        };
        let source = ScheduleSource::from_parts(rounds, fixtures)?;

        let results = match results {
            Some(lines) => read_results(lines.join("\n").as_bytes())?,
            None => Vec::new(),
        };

        Ok(PySimulation {
            inner: Simulation::new(params, source, results)?,
        })
    }

    /// Current standings: (rank, team, games, wins, ties, ot_wins, ot_losses, losses, points).
    fn baseline(&self) -> Vec<StandingsTuple> {
        self.inner
            .baseline()
            .table()
            .into_iter()
            .map(|row| {
                let r = row.record;
                (
                    row.rank,
                    row.team,
                    r.games,
                    r.wins,
                    r.ties,
                    r.overtime_wins,
                    r.overtime_losses,
                    r.losses,
                    row.points,
                )
            })
            .collect()
    }

    /// Fixtures left to simulate as (home, away).
    fn remaining(&self) -> Vec<(String, String)> {
        self.inner
            .remaining()
            .iter()
            .map(|f| (f.home.clone(), f.away.clone()))
            .collect()
    }

    #[pyo3(signature = (seed = None))]
    fn run(&self, py: Python<'_>, seed: Option<u64>) -> Vec<(String, Vec<String>)> {
        let table = py.allow_threads(|| self.inner.run(seed));
        table_rows(table)
    }

    #[pyo3(signature = (workers, seed = None))]
    fn run_parallel(
        &self,
        py: Python<'_>,
        workers: usize,
        seed: Option<u64>,
    ) -> Vec<(String, Vec<String>)> {
        let table = py.allow_threads(|| self.inner.run_parallel(seed, workers));
        table_rows(table)
    }

    fn __repr__(&self) -> String {
        format!(
            "Simulation({} teams, {} remaining, {} trials)",
            self.inner.roster().len(),
            self.inner.remaining().len(),
            self.inner.trials()
        )
    }
}
