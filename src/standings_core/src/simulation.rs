use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use std::sync::Arc;

use crate::config::SimulationConfig;
use crate::errors::{SimulationError, SimulationResult};
use crate::point_system::PointSystem;
use crate::sampler::{OutcomeSampler, TieProbability};
use crate::schedule::{DeclaredGame, Fixture, GameResult, Schedule, ScheduleSource};
use crate::standings::Standings;
use crate::summary::{ProbabilityTable, Summary};
use crate::team::Roster;

/// Validated run parameters.
#[derive(Clone, Debug)]
pub struct SimulationParams {
    pub roster: Roster,
    pub system: PointSystem,
    pub tie_probability: TieProbability,
    pub trials: u64,
}

impl SimulationParams {
    /// Parse and validate raw parameters.
    pub fn parse<I, S>(
        teams: I,
        point_system: &str,
        tie_probability: &str,
        trials: i64,
    ) -> SimulationResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let trials = u64::try_from(trials)
            .ok()
            .filter(|&t| t > 0)
            .ok_or(SimulationError::InvalidTrialCount(trials))?;
        Ok(SimulationParams {
            roster: Roster::new(teams)?,
            system: point_system.parse()?,
            tie_probability: tie_probability.parse()?,
            trials,
        })
    }
}

fn make_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(s) => ChaCha8Rng::seed_from_u64(s),
        None => ChaCha8Rng::from_entropy(),
    }
}

/// Monte Carlo simulation of the rest of a round-robin season.
///
/// Holds the baseline standings (all known results applied) and the
/// fixtures still to play. Each trial clones the baseline, samples every
/// remaining fixture and records the final ranking.
#[derive(Clone, Debug)]
pub struct Simulation {
    roster: Arc<Roster>,
    sampler: OutcomeSampler,
    trials: u64,
    baseline: Standings,
    remaining: Vec<Fixture>,
    /// Roster positions of the remaining fixtures.
    slots: Vec<(usize, usize)>,
}

impl Simulation {
    /// Validate the setup and build the baseline standings.
    ///
    /// Bad results or fixtures are logged and skipped; configuration
    /// problems are returned before any trial runs.
    pub fn new(
        params: SimulationParams,
        source: ScheduleSource,
        results: Vec<GameResult>,
    ) -> SimulationResult<Self> {
        if params.trials == 0 {
            return Err(SimulationError::InvalidTrialCount(0));
        }

        let roster = Arc::new(params.roster);
        let schedule = Schedule::assemble(&roster, params.system, source, results)?;

        let mut baseline = Standings::new(roster.clone(), params.system);
        let skipped = baseline.apply_all(&schedule.known);

        let slots = schedule
            .remaining
            .iter()
            .filter_map(|f| Some((roster.index_of(&f.home)?, roster.index_of(&f.away)?)))
            .collect();

        tracing::info!(
            teams = roster.len(),
            system = %params.system,
            tie_probability = %params.tie_probability,
            known = schedule.known.len() - skipped,
            skipped,
            remaining = schedule.remaining.len(),
            trials = params.trials,
            "simulation prepared"
        );

        Ok(Simulation {
            roster,
            sampler: OutcomeSampler::new(params.system, params.tie_probability),
            trials: params.trials,
            baseline,
            remaining: schedule.remaining,
            slots,
        })
    }

    /// Build from a loaded config plus an optional fixture list.
    pub fn from_config(
        config: &SimulationConfig,
        fixtures: Option<Vec<DeclaredGame>>,
        results: Vec<GameResult>,
    ) -> SimulationResult<Self> {
        let params = config.validate()?;
        let source = config.schedule_source(fixtures)?;
        Simulation::new(params, source, results)
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn system(&self) -> PointSystem {
        self.sampler.system()
    }

    pub fn trials(&self) -> u64 {
        self.trials
    }

    /// Standings after the known results only.
    pub fn baseline(&self) -> &Standings {
        &self.baseline
    }

    /// Fixtures decided at random in every trial.
    pub fn remaining(&self) -> &[Fixture] {
        &self.remaining
    }

    /// Play out every remaining fixture once.
    pub fn run_trial<R: Rng + ?Sized>(&self, rng: &mut R) -> Standings {
        let mut standings = self.baseline.clone();
        for &(home, away) in &self.slots {
            let outcome = self.sampler.sample(rng);
            if let Err(err) = standings.apply_indexed(home, away, outcome) {
                tracing::warn!(error = %err, "sampled outcome rejected");
            }
        }
        standings
    }

    /// Run `trials` trials on one random source.
    pub fn run_trials<R: Rng + ?Sized>(&self, trials: u64, rng: &mut R) -> Summary {
        let mut summary = Summary::new(self.roster.clone());
        for _ in 0..trials {
            summary.record(&self.run_trial(rng));
        }
        summary
    }

    /// Run the configured number of trials on the current thread.
    pub fn run(&self, seed: Option<u64>) -> ProbabilityTable {
        let mut rng = make_rng(seed);
        let summary = self.run_trials(self.trials, &mut rng);
        tracing::info!(trials = summary.trials(), "simulation finished");
        summary.table()
    }

    /// Split the trials over `workers` rayon tasks.
    ///
    /// Each worker gets its own generator seeded from the master seed and
    /// fills its own summary; the partial summaries are summed at the end.
    /// Output is reproducible for a fixed seed and worker count.
    pub fn run_parallel(&self, seed: Option<u64>, workers: usize) -> ProbabilityTable {
        let workers = workers.max(1) as u64;
        let mut rng = make_rng(seed);

        let jobs: Vec<(u64, u64)> = (0..workers)
            .map(|w| {
                let share = self.trials / workers + u64::from(w < self.trials % workers);
                (rng.gen::<u64>(), share)
            })
            .collect();

        let summary = jobs
            .par_iter()
            .enumerate()
            .map(|(worker, &(worker_seed, share))| {
                tracing::debug!(worker, trials = share, "worker started");
                let mut worker_rng = ChaCha8Rng::seed_from_u64(worker_seed);
                self.run_trials(share, &mut worker_rng)
            })
            .reduce(
                || Summary::new(self.roster.clone()),
                |mut acc, part| {
                    acc.merge(&part);
                    acc
                },
            );

        tracing::info!(trials = summary.trials(), workers, "simulation finished");
        summary.table()
    }

    /// Run with the seed and worker count from `config`.
    pub fn run_with(&self, config: &SimulationConfig) -> ProbabilityTable {
        match config.effective_workers() {
            1 => self.run(config.seed),
            workers => self.run_parallel(config.seed, workers),
        }
    }
}
