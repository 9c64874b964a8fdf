// src/path.rs
//! Euler–Maruyama path generator for the Merton jump-diffusion model.
//!
//! # Model
//!
//! Log-price increments follow
//! ```text
//! d(ln S) = theta(t) dt + sigma dW + sum_{j=1..N_dt} Y_j
//! ```
//! with `N_dt ~ Poisson(lambda * dt)`, each jump `Y_j ~ N(mu_j, sigma_j^2)`,
//! and the effective drift
//! ```text
//! theta(t) = (r(t) if risk_neutral else mu) - lambda*kappa - sigma^2/2
//! ```
//! so that the discounted asset is a martingale under the risk-neutral
//! measure (§4.4). `S` is updated multiplicatively: `S *= exp(d ln S)`.
//!
//! Edge cases fall out of the formula with no special-casing: `lambda = 0`
//! draws no jumps (plain GBM); `sigma_j = 0` with `lambda > 0` makes every
//! jump deterministically `mu_j`; `sigma = lambda = 0` makes the whole path
//! deterministic.

use rand::Rng;

use crate::market::MarketData;
use crate::rng::{poisson_knuth, standard_normal};

/// Fills `buffer` with one sample trajectory `[S0, S_dt, S_2dt, ..., S_Mdt]`
/// under `market`'s jump-diffusion dynamics, stepping by `dt`.
///
/// `buffer.len()` must equal the number of steps plus one; `buffer[0]` is
/// always `market.s0`. The same `buffer` and `rng` may be reused across
/// calls — this is the "worker-local path buffer" of §3/§5.
pub fn generate_path<R: Rng + ?Sized>(market: &MarketData, dt: f64, buffer: &mut [f64], rng: &mut R) {
    debug_assert!(!buffer.is_empty());
    let sqrt_dt = dt.sqrt();
    let mu_j = market.mu_j();

    buffer[0] = market.s0;
    let mut s = market.s0;
    let mut t = 0.0;
    for slot in buffer.iter_mut().skip(1) {
        let theta = market.effective_drift(t);

        let z = standard_normal(rng);
        let diffusion = market.sigma * sqrt_dt * z;

        let jump_count = poisson_knuth(market.lambda * dt, rng);
        let mut jump_sum = 0.0;
        for _ in 0..jump_count {
            jump_sum += mu_j + market.sigma_j * standard_normal(rng);
        }

        let d_ln_s = theta * dt + diffusion + jump_sum;
        s *= d_ln_s.exp();
        *slot = s;
        t += dt;
    }
}
