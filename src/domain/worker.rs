// Worker contract consumed by the dispatch framework

use std::collections::HashMap;

use super::blend::ModelError;
use super::context::{PublishError, WorkerContext};
use super::engine::EngineFault;
use super::value_objects::JobStatus;

/// Failure of a job invocation.
///
/// Every variant aborts the job and carries its original cause; a job that
/// merely has no solution terminates with a plain [`JobStatus`] instead.
#[derive(Debug, thiserror::Error)]
pub enum WorkerError {
    #[error("model construction failed")]
    Model(#[from] ModelError),

    #[error("solve engine fault")]
    Engine(#[from] EngineFault),

    #[error("result publication failed")]
    Publish(#[from] PublishError),
}

/// A stateless-per-invocation job worker.
///
/// The dispatch framework invokes `process` at most once at a time per job
/// id; distinct jobs may run concurrently on separate worker values.
pub trait Worker {
    /// Run one job: build the model from the parameters, solve it under
    /// the context's core budget, classify the outcome, and publish
    /// results when a usable solution exists.
    fn process(
        &self,
        ctx: &mut dyn WorkerContext,
        job_id: &str,
        parameters: &HashMap<String, String>,
    ) -> Result<JobStatus, WorkerError>;

    /// Request a stop. Best effort: an in-flight solve is not interrupted;
    /// implementations report `JobStatus::Unknown`.
    fn stop(&self) -> Result<JobStatus, WorkerError>;
}
