use criterion::{black_box, criterion_group, criterion_main, Criterion};
use league_core::league::{standings_for_leagues, League, LeagueConfig};
use league_core::matrix::MatchupMatrix;
use league_core::results::{aggregate, GameResult, WeekResults};
use league_core::schedule::{generate_schedule, PairingOrder};
use league_core::standings::rank_standings;
use league_core::team::Roster;
use league_core::weeks::{distribute, WeekBucket};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

fn create_roster(size: usize) -> Roster {
    let names: Vec<String> = (0..size).map(|i| format!("Team{}", i)).collect();
    Roster::new(&names).expect("valid roster")
}

/// Fill every game of every week with a seeded random score.
fn play_season(buckets: &[WeekBucket], seed: u64) -> Vec<WeekResults> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    buckets
        .iter()
        .map(|bucket| WeekResults {
            week: bucket.week,
            games: bucket
                .games
                .iter()
                .map(|g| {
                    let home_score = rng.gen_range(0..30);
                    let away_score = rng.gen_range(0..30);
                    GameResult::played(g.home.clone(), home_score, g.away.clone(), away_score)
                })
                .collect(),
        })
        .collect()
}

fn bench_generate_schedule(c: &mut Criterion) {
    let roster = create_roster(64);
    let matrix = MatchupMatrix::uniform(&roster, 2);

    c.bench_function("generate_schedule_64_teams", |b| {
        b.iter(|| {
            generate_schedule(black_box(&roster), black_box(&matrix), PairingOrder::Consecutive)
        })
    });

    c.bench_function("generate_schedule_64_teams_interleaved", |b| {
        b.iter(|| {
            generate_schedule(black_box(&roster), black_box(&matrix), PairingOrder::Interleaved)
        })
    });
}

fn bench_distribute(c: &mut Criterion) {
    let roster = create_roster(64);
    let matrix = MatchupMatrix::uniform(&roster, 2);
    let schedule = generate_schedule(&roster, &matrix, PairingOrder::Consecutive);

    c.bench_function("distribute_4032_games_12_weeks", |b| {
        b.iter(|| distribute(black_box(&schedule), 12))
    });
}

fn bench_standings(c: &mut Criterion) {
    let roster = create_roster(64);
    let matrix = MatchupMatrix::uniform(&roster, 2);
    let schedule = generate_schedule(&roster, &matrix, PairingOrder::Consecutive);
    let buckets = distribute(&schedule, 12).expect("weeks");
    let results = play_season(&buckets, 42);

    c.bench_function("aggregate_64_teams", |b| {
        b.iter(|| aggregate(black_box(&roster), black_box(&results)))
    });

    let aggregation = aggregate(&roster, &results).expect("known teams");
    c.bench_function("rank_standings_64_teams", |b| {
        b.iter(|| rank_standings(black_box(&roster), black_box(&aggregation.totals)))
    });
}

fn bench_league_batch(c: &mut Criterion) {
    // Smaller leagues, many of them
    let batch: Vec<(League, Vec<WeekResults>)> = (0..32u64)
        .map(|seed| {
            let teams = (0..12).map(|i| format!("Team{}", i)).collect();
            let config = LeagueConfig::new(format!("League{}", seed), teams);
            let league = League::from_config(&config).expect("valid league");
            let results = play_season(&league.weeks().expect("weeks"), seed);
            (league, results)
        })
        .collect();

    c.bench_function("standings_32_leagues", |b| {
        b.iter(|| standings_for_leagues(black_box(&batch)))
    });
}

criterion_group!(
    benches,
    bench_generate_schedule,
    bench_distribute,
    bench_standings,
    bench_league_batch,
);
criterion_main!(benches);
