// Port to the surrounding job-processing framework.
//
// The framework that dispatches jobs supplies the worker with a log sink,
// a scratch directory, a declared core limit, and registries for produced
// metrics and artifacts. The worker only ever talks to it through this
// trait.

use std::path::Path;

use indexmap::IndexMap;
use thiserror::Error;
use tracing::Level;

/// Failure while materializing or registering produced results
#[derive(Debug, Error)]
pub enum PublishError {
    #[error("error saving artifact {name}")]
    Write {
        name: String,
        #[source]
        source: csv::Error,
    },

    #[error("error flushing artifact {name}")]
    Io {
        name: String,
        #[source]
        source: std::io::Error,
    },

    #[error("error registering artifact {name}: {reason}")]
    Register { name: String, reason: String },
}

/// Execution context handed to the worker by the dispatch framework.
///
/// Mutating operations record observable side effects of the invocation:
/// the effective core budget, solve details, and output attachments.
pub trait WorkerContext {
    /// Core ceiling declared by the execution environment
    fn worker_cores_limit(&self) -> usize;

    /// Record the core budget the engine actually applied
    fn set_effective_worker_cores_limit(&mut self, cores: usize);

    /// Scratch directory where artifacts are materialized before
    /// registration
    fn temp_dir(&self) -> &Path;

    /// Route an engine-related message to the framework's log
    fn log_engine(&mut self, level: Level, message: &str);

    /// Attach a batch of diagnostic metrics to the job, atomically
    fn add_solve_details(&mut self, details: IndexMap<String, String>);

    /// Register a materialized file as a named output attachment
    fn set_output_attachment(&mut self, name: &str, file: &Path) -> Result<(), PublishError>;
}
