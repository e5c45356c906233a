// Domain service interface for solve engines
// Defines the contract any engine adapter must follow

use super::models::{Model, SolveOutcome};

/// Operational failure of the solving capability itself.
///
/// Distinct from mathematical infeasibility: a fault means the engine
/// could not run the solve at all, and the job aborts.
#[derive(Debug, thiserror::Error)]
pub enum EngineFault {
    #[error("engine backend failure: {0}")]
    Backend(String),

    #[error("engine produced an inconsistent solution: {0}")]
    Solution(String),
}

pub type Result<T> = std::result::Result<T, EngineFault>;

/// Abstract solving capability.
///
/// An engine is constructed fresh for every job invocation, configured,
/// used for exactly one solve, and dropped on every exit path. `solve`
/// blocks until the engine reaches a terminal state; no implicit timeout
/// is imposed.
pub trait SolveEngine {
    /// Name of the engine backend
    fn name(&self) -> &str;

    /// Apply a concurrency budget (a worker-core ceiling) and return the
    /// effective value the engine actually applied. The two may differ
    /// when the backend clamps to a hardware or build limit; the caller
    /// surfaces the effective value, it is never an error.
    fn configure(&mut self, requested_cores: usize) -> usize;

    /// Solve the model and report the terminal outcome. Non-solution
    /// terminal states (infeasible, unbounded, unknown) are outcomes, not
    /// errors; only operational failures surface as [`EngineFault`].
    fn solve(&self, model: &Model) -> Result<SolveOutcome>;
}
