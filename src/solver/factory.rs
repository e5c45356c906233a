use cfg_if::cfg_if;

use crate::domain::engine::SolveEngine;

/// Engine for the preferred enabled backend: HiGHS when available,
/// otherwise CBC. Each call returns a fresh engine; nothing is shared
/// between invocations.
pub fn default_engine() -> Box<dyn SolveEngine> {
    cfg_if! {
        if #[cfg(feature = "highs")] {
            Box::new(super::HighsEngine::new())
        } else {
            Box::new(super::CoinCbcEngine::new())
        }
    }
}
