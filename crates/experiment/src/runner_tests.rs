use super::*;
use crate::error::ExperimentError;
use crate::progress::NoProgress;
use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Default)]
struct CountingSink {
    last: AtomicU64,
    calls: AtomicU64,
}

impl ProgressSink for CountingSink {
    fn advance(&self, completed: u64) {
        self.last.store(completed, Ordering::SeqCst);
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

#[test]
fn test_histogram_totals_equal_repetitions() {
    for (teams, reps, streak) in [(2, 10, 1), (4, 100, 2), (10, 37, 3), (20, 5, 1)] {
        let config = ExperimentConfig::new(teams, reps, streak);
        let outcome = run_experiment(config, &NoProgress).unwrap();
        let h = &outcome.histograms;
        assert_eq!(h.max_streak_violations.total(), reps);
        assert_eq!(h.no_repeat_violations.total(), reps);
        assert_eq!(h.double_round_robin_violations.total(), reps);
    }
}

#[test]
fn test_zero_repetitions_gives_empty_histograms() {
    let runner = ExperimentRunner::new(ExperimentConfig::new(6, 0, 2)).unwrap();
    assert_eq!(runner.state(), RunnerState::Done);
    let outcome = runner.run(&NoProgress);
    assert_eq!(outcome.histograms, ViolationHistograms::default());
}

#[test]
fn test_same_seed_is_reproducible() {
    let config = ExperimentConfig::new(8, 200, 2).with_seed(17);
    let a = run_experiment(config, &NoProgress).unwrap();
    let b = run_experiment(config, &NoProgress).unwrap();
    assert_eq!(a, b);

    let c = run_experiment(config.with_seed(18), &NoProgress).unwrap();
    assert_ne!(a.histograms, c.histograms);
}

#[test]
fn test_progress_reports_each_repetition() {
    let sink = CountingSink::default();
    run_experiment(ExperimentConfig::new(4, 25, 1), &sink).unwrap();
    assert_eq!(sink.calls.load(Ordering::SeqCst), 25);
    assert_eq!(sink.last.load(Ordering::SeqCst), 25);
}

#[test]
fn test_state_transitions() {
    let mut runner = ExperimentRunner::new(ExperimentConfig::new(4, 2, 1)).unwrap();
    assert_eq!(runner.state(), RunnerState::Running { completed: 0 });
    assert_eq!(runner.step(), Some(1));
    assert_eq!(runner.state(), RunnerState::Running { completed: 1 });
    assert_eq!(runner.step(), Some(2));
    assert_eq!(runner.state(), RunnerState::Done);
    assert_eq!(runner.step(), None);
}

#[test]
fn test_invalid_config_rejected_before_running() {
    assert!(matches!(
        ExperimentRunner::new(ExperimentConfig::new(3, 10, 1)),
        Err(ExperimentError::InvalidTeamCount(3))
    ));
}

#[test]
fn test_two_teams_never_balanced_by_chance_alone() {
    // Two teams, two rounds: a double round-robin needs (0,1) then (1,0) or
    // the reverse; anything else is an imbalance of exactly 2.
    let outcome = run_experiment(ExperimentConfig::new(2, 500, 5), &NoProgress).unwrap();
    let drr = &outcome.histograms.double_round_robin_violations;
    assert_eq!(drr.get(0) + drr.get(2), 500);
    assert!(drr.get(0) > 0 && drr.get(2) > 0);
}
