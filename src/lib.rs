//! # jump-lsm-pricer: Monte Carlo pricing for jump-diffusion equity options
//!
//! Prices single-asset European, American, and Bermudan vanilla options
//! under a Merton-style jump-diffusion model (geometric Brownian motion
//! plus a compound Poisson process with log-normal jump sizes) by Monte
//! Carlo simulation.
//!
//! - European options are priced as the discounted mean of simulated
//!   terminal payoffs ([`mc::european`]).
//! - American and Bermudan options are priced by Longstaff-Schwartz
//!   backward induction with polynomial continuation-value regression
//!   ([`mc::lsm`]).
//!
//! Both estimators distribute independent sample paths across a scoped
//! worker-thread pool ([`mc::driver`]) and share an immutable [`MarketData`]
//! bundle (volatility, drift, jump parameters, and a [`RateCurve`]) across
//! every worker with no locking.
//!
//! ## Quick start
//!
//! ```no_run
//! use std::sync::Arc;
//! use jump_lsm_pricer::{MarketData, OptionContract, RateCurve, Side};
//!
//! # fn main() -> Result<(), jump_lsm_pricer::PricingError> {
//! let curve = Arc::new(RateCurve::new(vec![(1.0, 0.05)])?);
//! let market = MarketData::new(
//!     0.2,   // sigma: diffusion volatility
//!     0.0,   // mu: unused when risk_neutral
//!     0.3,   // lambda: jump intensity
//!     0.0,   // gamma: mean jump-size factor
//!     0.15,  // sigma_j: jump-size log-volatility
//!     100.0, // s0
//!     true,  // risk_neutral
//!     curve,
//! )?;
//! let contract = OptionContract::european(100.0, 1.0, Side::Call)?;
//!
//! let price = jump_lsm_pricer::price(&contract, &market, 100_000, 4, 42)?;
//! assert!(price.is_finite() && price >= 0.0);
//! # Ok(())
//! # }
//! ```

pub mod analytics;
pub mod curve;
pub mod error;
pub mod market;
pub mod math_utils;
pub mod mc;
pub mod option;
pub mod path;
pub mod rng;

pub use curve::RateCurve;
pub use error::{EngineResult, PricingError};
pub use market::MarketData;
pub use mc::progress::BoxedProgress;
pub use option::{OptionContract, Side};

/// Prices `contract` under `market` using `n` Monte Carlo paths split
/// across `w` worker threads, reproducible given `seed` (§6, §4.7).
///
/// `n` and `w` must be positive or this returns
/// [`PricingError::InvalidArgument`]. See [`mc::price`] for the dispatch
/// between the European and Longstaff-Schwartz estimators.
pub fn price(
    contract: &OptionContract,
    market: &MarketData,
    n: usize,
    w: usize,
    seed: u64,
) -> EngineResult<f64> {
    mc::price(contract, market, n, w, seed, None)
}

/// As [`price`], but reports progress through `progress` as pricing
/// advances (§6: "a monotonically non-decreasing fraction in `[0,1]`,
/// advisory only").
pub fn price_with_progress(
    contract: &OptionContract,
    market: &MarketData,
    n: usize,
    w: usize,
    seed: u64,
    progress: BoxedProgress,
) -> EngineResult<f64> {
    mc::price(contract, market, n, w, seed, Some(&progress))
}
