//! Runs a batch of configurations on a bounded worker pool and reduces the
//! outcomes into one [`AggregateResult`].
//!
//! Workers share nothing: each one builds its own runner (and random
//! source) from an immutable [`ExperimentConfig`]. The only synchronization
//! is the final collect, which waits for every worker. A failing worker
//! fails the whole batch; there is no partial result.

use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use std::any::Any;
use std::collections::HashSet;
use std::panic::{self, AssertUnwindSafe};
use std::time::Instant;
use tracing::{error, info};

use crate::config::ExperimentConfig;
use crate::error::{ExperimentError, Result};
use crate::progress::ProgressFactory;
use crate::results::{AggregateResult, ResultWriter};
use crate::runner::{run_experiment, ExperimentOutcome};

pub struct ParallelDriver {
    pool: ThreadPool,
}

impl ParallelDriver {
    /// Build a pool with `threads` workers, or one per core if `None`
    pub fn new(threads: Option<usize>) -> Result<Self> {
        let mut builder = ThreadPoolBuilder::new().thread_name(|i| format!("experiment-{i}"));
        if let Some(threads) = threads {
            builder = builder.num_threads(threads);
        }
        Ok(Self {
            pool: builder.build()?,
        })
    }

    pub fn threads(&self) -> usize {
        self.pool.current_num_threads()
    }

    /// Run every configuration to completion and reduce the outcomes
    pub fn run(
        &self,
        configs: &[ExperimentConfig],
        progress: &dyn ProgressFactory,
    ) -> Result<AggregateResult> {
        self.run_with(configs, |config| {
            let sink = progress.sink_for(config);
            run_experiment(*config, sink.as_ref())
        })
    }

    /// Like [`run`](Self::run), but each worker also writes its outcome
    /// through `writer` as soon as it finishes. A failed write fails that
    /// configuration.
    pub fn run_saving(
        &self,
        configs: &[ExperimentConfig],
        progress: &dyn ProgressFactory,
        writer: &ResultWriter,
    ) -> Result<AggregateResult> {
        self.run_with(configs, |config| {
            let sink = progress.sink_for(config);
            let outcome = run_experiment(*config, sink.as_ref())?;
            writer.save_outcome(&outcome)?;
            Ok(outcome)
        })
    }

    /// Like [`run`](Self::run), but with a caller-supplied job per
    /// configuration.
    ///
    /// Every configuration is validated, and checked for a unique
    /// (threshold, team count) slot, before any job starts. A job that
    /// returns an error or panics becomes a [`ExperimentError::WorkerFailure`]
    /// naming its configuration, and the batch stops there.
    pub fn run_with<F>(&self, configs: &[ExperimentConfig], job: F) -> Result<AggregateResult>
    where
        F: Fn(&ExperimentConfig) -> Result<ExperimentOutcome> + Sync,
    {
        let mut slots = HashSet::new();
        for config in configs {
            config.validate()?;
            if !slots.insert((config.max_streak, config.team_count)) {
                return Err(ExperimentError::DuplicateConfiguration {
                    team_count: config.team_count,
                    max_streak: config.max_streak,
                });
            }
        }

        info!(
            configurations = configs.len(),
            threads = self.threads(),
            "dispatching experiments"
        );
        let started = Instant::now();

        let outcomes: Result<Vec<ExperimentOutcome>> = self.pool.install(|| {
            configs
                .par_iter()
                .map(|config| run_isolated(config, &job))
                .collect()
        });

        if let Err(e) = &outcomes {
            error!("batch aborted: {}", e);
        }
        let aggregate = AggregateResult::from_outcomes(outcomes?)?;

        info!(
            configurations = aggregate.len(),
            elapsed = ?started.elapsed(),
            "batch complete"
        );
        Ok(aggregate)
    }
}

fn run_isolated<F>(config: &ExperimentConfig, job: &F) -> Result<ExperimentOutcome>
where
    F: Fn(&ExperimentConfig) -> Result<ExperimentOutcome> + Sync,
{
    let failure = |message: String| ExperimentError::WorkerFailure {
        team_count: config.team_count,
        max_streak: config.max_streak,
        message,
    };

    match panic::catch_unwind(AssertUnwindSafe(|| job(config))) {
        Ok(Ok(outcome)) => Ok(outcome),
        Ok(Err(e)) => Err(failure(e.to_string())),
        Err(payload) => Err(failure(panic_message(payload.as_ref()))),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "worker panicked".to_string()
    }
}

#[cfg(test)]
#[path = "driver_tests.rs"]
mod driver_tests;
