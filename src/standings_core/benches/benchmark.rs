use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use standings_core::{
    generate_fixtures, GameResult, Outcome, ScheduleSource, Simulation, SimulationParams,
};

fn create_league(teams: usize, trials: i64) -> Simulation {
    let names: Vec<String> = (0..teams).map(|i| format!("Team{}", i)).collect();

    // First half of a double round robin already played.
    let fixtures = generate_fixtures(&names, 2);
    let results: Vec<GameResult> = fixtures
        .iter()
        .step_by(2)
        .enumerate()
        .map(|(i, f)| {
            let outcome = match i % 3 {
                0 => Outcome::HomeWin,
                1 => Outcome::AwayWin,
                _ => Outcome::HomeOvertimeWin,
            };
            GameResult::new(f.clone(), outcome)
        })
        .collect();

    let params = SimulationParams::parse(names, "3ph", "0.23", trials).unwrap();
    Simulation::new(params, ScheduleSource::Rounds(2), results).unwrap()
}

fn bench_ranking(c: &mut Criterion) {
    let sim = create_league(16, 1);

    c.bench_function("rank_16_teams", |b| {
        b.iter(|| black_box(sim.baseline()).ranked_indices())
    });
}

fn bench_single_trial(c: &mut Criterion) {
    let sim = create_league(16, 1);
    let mut rng = ChaCha8Rng::seed_from_u64(42);

    c.bench_function("trial_16_teams", |b| {
        b.iter(|| black_box(&sim).run_trial(&mut rng))
    });
}

fn bench_monte_carlo(c: &mut Criterion) {
    let sim = create_league(16, 1000);

    c.bench_function("simulation_1000_trials", |b| {
        b.iter(|| black_box(&sim).run(Some(42)))
    });

    c.bench_function("simulation_1000_trials_parallel", |b| {
        b.iter(|| black_box(&sim).run_parallel(Some(42), 4))
    });
}

criterion_group!(benches, bench_ranking, bench_single_trial, bench_monte_carlo);
criterion_main!(benches);
