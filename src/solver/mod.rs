// Engine adapters: concrete implementations of SolveEngine

#[cfg(feature = "cbc")]
mod coin_cbc_solver;
mod factory;
#[cfg(feature = "highs")]
mod highs_solver;

#[cfg(feature = "cbc")]
pub use coin_cbc_solver::CoinCbcEngine;
pub use factory::default_engine;
#[cfg(feature = "highs")]
pub use highs_solver::HighsEngine;
