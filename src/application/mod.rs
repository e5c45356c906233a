pub mod publisher;
pub mod worker;

pub use publisher::publish;
pub use worker::{BlendWorker, EngineFactory};
