// src/mc/european.rs
//! European estimator: the discounted mean of terminal payoffs, computed by
//! an embarrassingly parallel sum over worker chunks (§4.5).

use crate::error::EngineResult;
use crate::market::MarketData;
use crate::mc::driver;
use crate::mc::progress::{self, BoxedProgress};
use crate::option::Side;
use crate::path::generate_path;
use crate::rng::seed_worker_rng;

/// Fixed step count for the European estimator (§4.5, §9: preserved even
/// though only the terminal price is consumed, since jump-diffusion paths
/// with non-trivial λ benefit from finer discretisation of the jump
/// component — step count is not exposed as a tunable here, matching the
/// source's hard-coded value).
pub const STEPS: usize = 100;

/// Prices a European option of strike `k`, maturity `market`-relative `t`,
/// and `side`, using `n` simulated paths split across `w` workers.
///
/// `n` and `w` must already be validated as `> 0` by the caller (the
/// dispatch point in `mc::price_option`).
pub fn price(
    k: f64,
    t: f64,
    side: Side,
    market: &MarketData,
    n: usize,
    w: usize,
    seed: u64,
    progress: Option<&BoxedProgress>,
) -> EngineResult<f64> {
    let dt = t / STEPS as f64;

    let partial_sums = driver::run_chunked(n, w, |worker_index, _start, count| {
        let mut rng = seed_worker_rng(seed, worker_index as u64);
        let mut buffer = vec![0.0; STEPS + 1];
        let mut sum = 0.0;
        for _ in 0..count {
            generate_path(market, dt, &mut buffer, &mut rng);
            let s_t = *buffer.last().expect("buffer is non-empty");
            sum += side.immediate_payoff(s_t, k);
        }
        Ok(sum)
    })?;

    progress::report(progress, n, n);

    let total: f64 = partial_sums.iter().sum();
    let mean_payoff = total / n as f64;
    Ok(mean_payoff * market.curve().discount(t))
}
