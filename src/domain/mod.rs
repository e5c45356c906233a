pub mod blend;
pub mod builder;
pub mod context;
pub mod engine;
pub mod models;
pub mod value_objects;
pub mod worker;

pub use blend::{BlendSpec, ModelError};
pub use builder::build_model;
pub use context::{PublishError, WorkerContext};
pub use engine::{EngineFault, SolveEngine};
pub use models::{Constraint, Model, ModelStatistics, SolveOutcome, Variable, VariableGroup};
pub use value_objects::{ConstraintSense, EngineStatus, JobStatus, VariableType};
pub use worker::{Worker, WorkerError};
