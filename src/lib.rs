// Domain layer: business types and service traits
pub mod domain;

// Application layer: job orchestration and result publication
pub mod application;

// Infrastructure layer: concrete context for local runs
pub mod infrastructure;

// Engine adapters: concrete implementations of SolveEngine
#[cfg(any(feature = "cbc", feature = "highs"))]
pub mod solver;

// Re-export commonly used types
pub use domain::{
    build_model, BlendSpec, Constraint, ConstraintSense, EngineFault, EngineStatus, JobStatus,
    Model, ModelError, ModelStatistics, PublishError, SolveEngine, SolveOutcome, Variable,
    VariableGroup, VariableType, Worker, WorkerContext, WorkerError,
};

pub use application::{BlendWorker, EngineFactory};
pub use infrastructure::LocalWorkerContext;

#[cfg(feature = "cbc")]
pub use solver::CoinCbcEngine;
#[cfg(any(feature = "cbc", feature = "highs"))]
pub use solver::default_engine;
#[cfg(feature = "highs")]
pub use solver::HighsEngine;
