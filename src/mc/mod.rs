// src/mc/mod.rs
//! Monte Carlo pricing estimators and the parallel driver that backs them.

pub mod driver;
pub mod european;
pub mod lsm;
pub mod progress;

use crate::error::{validation::*, EngineResult};
use crate::market::MarketData;
use crate::option::OptionContract;
use progress::BoxedProgress;

/// Prices `contract` under `market` using `n` Monte Carlo paths split
/// across `w` worker threads, reproducible given `seed` (§4.5, §4.6, §4.7).
///
/// Dispatches on the contract's family: European goes to [`european::price`],
/// American and Bermudan both go to [`lsm::price`] (§4.6's exercise-step set
/// E is the only difference between the two).
pub fn price(
    contract: &OptionContract,
    market: &MarketData,
    n: usize,
    w: usize,
    seed: u64,
    progress: Option<&BoxedProgress>,
) -> EngineResult<f64> {
    validate_count("n", n)?;
    validate_count("w", w)?;

    match contract {
        OptionContract::European { k, t, side } => {
            european::price(*k, *t, *side, market, n, w, seed, progress)
        }
        OptionContract::American { .. } | OptionContract::Bermudan { .. } => {
            lsm::price(contract, market, n, w, seed, progress)
        }
    }
}
