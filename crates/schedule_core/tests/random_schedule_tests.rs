use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use schedule_core::{count_all, rounds_for, TournamentGenerator};

#[test]
fn random_tournaments_respect_counter_bounds() {
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    for n in [4, 6, 12, 24] {
        let generator = TournamentGenerator::new(n);
        for _ in 0..25 {
            let tournament = generator.generate(&mut rng);
            let counts = count_all(&tournament, n, 1);

            // Total occurrences equal the number of directed games, so the
            // imbalance is even and at most twice the number of games.
            assert_eq!(counts.double_round_robin % 2, 0);
            assert!(counts.double_round_robin <= 2 * (n * (n - 1)) as u64);

            // At most two rematch hits per game per adjacent round pair.
            let max_rematches = 2 * (n / 2) * (rounds_for(n) - 1);
            assert!(counts.no_repeat <= max_rematches as u64);

            // Every team plays every round; the first round can never
            // exceed a threshold of 1.
            let max_streaks = n * (rounds_for(n) - 1);
            assert!(counts.max_streak <= max_streaks as u64);
        }
    }
}

#[test]
fn higher_threshold_never_increases_streak_violations() {
    let mut rng = ChaCha8Rng::seed_from_u64(9);
    let generator = TournamentGenerator::new(10);
    for _ in 0..50 {
        let tournament = generator.generate(&mut rng);
        let mut previous = u64::MAX;
        for threshold in 1..=6 {
            let counts = count_all(&tournament, 10, threshold);
            assert!(counts.max_streak <= previous);
            previous = counts.max_streak;
        }
    }
}
