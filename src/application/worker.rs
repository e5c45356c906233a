//! Job orchestration: the worker execution contract.
//!
//! One invocation walks Building -> Solving -> Classifying and, when the
//! classified status carries a usable solution, Publishing. A
//! `ModelError`, `EngineFault`, or `PublishError` aborts the job from the
//! corresponding phase; every other terminal status is a normal outcome
//! returned to the caller with nothing published.

use std::collections::HashMap;

use tracing::{info, Level};

use super::publisher;
use crate::domain::blend::BlendSpec;
use crate::domain::builder::build_model;
use crate::domain::context::WorkerContext;
use crate::domain::engine::{EngineFault, SolveEngine};
use crate::domain::value_objects::JobStatus;
use crate::domain::worker::{Worker, WorkerError};

/// Produces a fresh engine for every invocation, so no solver state
/// survives across jobs
pub type EngineFactory = Box<dyn Fn() -> Box<dyn SolveEngine> + Send + Sync>;

/// Worker that solves the alloy blend program for one job at a time
pub struct BlendWorker {
    engine_factory: EngineFactory,
}

impl BlendWorker {
    /// Worker backed by the default engine for the enabled solver features
    #[cfg(any(feature = "highs", feature = "cbc"))]
    pub fn new() -> Self {
        Self::with_engine_factory(Box::new(crate::solver::default_engine))
    }

    /// Worker with an explicit engine source (used by tests and callers
    /// that pick a backend themselves)
    pub fn with_engine_factory(engine_factory: EngineFactory) -> Self {
        Self { engine_factory }
    }
}

#[cfg(any(feature = "highs", feature = "cbc"))]
impl Default for BlendWorker {
    fn default() -> Self {
        Self::new()
    }
}

impl Worker for BlendWorker {
    fn process(
        &self,
        ctx: &mut dyn WorkerContext,
        job_id: &str,
        parameters: &HashMap<String, String>,
    ) -> Result<JobStatus, WorkerError> {
        info!(job_id, "building blend model");
        let spec = BlendSpec::from_parameters(parameters)?;
        let model = build_model(&spec)?;

        // Scoped engine acquisition: construct, configure, solve, read
        // results, drop. The engine never outlives the invocation.
        let mut engine = (self.engine_factory)();

        let requested = ctx.worker_cores_limit();
        let effective = engine.configure(requested);
        ctx.set_effective_worker_cores_limit(effective);
        if effective != requested {
            info!(requested, effective, "engine clamped the core budget");
        }

        info!(job_id, engine = engine.name(), "solving");
        let outcome = engine.solve(&model)?;
        let status = JobStatus::from(outcome.status);

        if status.has_solution() {
            if outcome.variable_values.len() != model.num_variables() {
                return Err(EngineFault::Solution(format!(
                    "{} returned {} values for {} variables",
                    engine.name(),
                    outcome.variable_values.len(),
                    model.num_variables()
                ))
                .into());
            }
            ctx.log_engine(
                Level::INFO,
                &format!("{} status: {}", engine.name(), outcome.status),
            );
            if let Some(cost) = outcome.objective_value {
                ctx.log_engine(Level::INFO, &format!("Cost: {}", cost));
            }
            publisher::publish(ctx, &model, &outcome)?;
        }

        info!(job_id, %status, "job finished");
        Ok(status)
    }

    fn stop(&self) -> Result<JobStatus, WorkerError> {
        // Best effort only: an already-dispatched solve runs to its own
        // terminal state. See the cancellation note in DESIGN.md.
        Ok(JobStatus::Unknown)
    }
}
