// src/analytics/bs_analytic.rs
//! Closed-form pricing oracles used only by this crate's tests.
//!
//! `bs_call_price`/`bs_put_price` are the standard Black-Scholes formulas,
//! the zero-jump oracle against which the European estimator is checked
//! (§8). `merton_call_price`/`merton_put_price` extend that oracle to the
//! jump-diffusion case: the classic Poisson-weighted sum of Black-Scholes
//! terms, one per possible jump count, each evaluated at a jump-count-
//! adjusted rate and volatility.

use crate::math_utils::norm_cdf;

/// Black-Scholes European call price: `S*Phi(d1) - K*e^(-rT)*Phi(d2)`.
pub fn bs_call_price(s: f64, k: f64, r: f64, sigma: f64, t: f64) -> f64 {
    let (d1, d2) = bs_d1_d2(s, k, r, sigma, t);
    s * norm_cdf(d1) - k * (-r * t).exp() * norm_cdf(d2)
}

/// Black-Scholes European put price, via put-call parity on `bs_call_price`.
pub fn bs_put_price(s: f64, k: f64, r: f64, sigma: f64, t: f64) -> f64 {
    let (d1, d2) = bs_d1_d2(s, k, r, sigma, t);
    k * (-r * t).exp() * norm_cdf(-d2) - s * norm_cdf(-d1)
}

fn bs_d1_d2(s: f64, k: f64, r: f64, sigma: f64, t: f64) -> (f64, f64) {
    let d1 = ((s / k).ln() + (r + 0.5 * sigma * sigma) * t) / (sigma * t.sqrt());
    (d1, d1 - sigma * t.sqrt())
}

/// Merton (1976) jump-diffusion call price: a Poisson(`lambda*t`)-weighted
/// sum of Black-Scholes call prices, each evaluated with a jump-count-`n`
/// adjusted rate `r - lambda*gamma + n*ln(1+gamma)/t` and volatility
/// `sqrt(sigma^2 + n*sigma_j^2/t)` (the standard closed-form result for
/// log-normal jump sizes). `lambda == 0` degenerates to `bs_call_price`.
#[allow(clippy::too_many_arguments)]
pub fn merton_call_price(
    s: f64,
    k: f64,
    r: f64,
    sigma: f64,
    t: f64,
    lambda: f64,
    gamma: f64,
    sigma_j: f64,
) -> f64 {
    merton_price(s, k, r, sigma, t, lambda, gamma, sigma_j, bs_call_price)
}

/// As [`merton_call_price`], for the put side.
#[allow(clippy::too_many_arguments)]
pub fn merton_put_price(
    s: f64,
    k: f64,
    r: f64,
    sigma: f64,
    t: f64,
    lambda: f64,
    gamma: f64,
    sigma_j: f64,
) -> f64 {
    merton_price(s, k, r, sigma, t, lambda, gamma, sigma_j, bs_put_price)
}

#[allow(clippy::too_many_arguments)]
fn merton_price(
    s: f64,
    k: f64,
    r: f64,
    sigma: f64,
    t: f64,
    lambda: f64,
    gamma: f64,
    sigma_j: f64,
    bs: impl Fn(f64, f64, f64, f64, f64) -> f64,
) -> f64 {
    let lambda_t = lambda * t;
    if lambda_t <= 0.0 {
        return bs(s, k, r, sigma, t);
    }

    let mut total = 0.0;
    let mut poisson_weight = (-lambda_t).exp();
    let mut n: u32 = 0;
    loop {
        let sigma_n = (sigma * sigma + n as f64 * sigma_j * sigma_j / t).sqrt().max(1e-12);
        let r_n = r - lambda * gamma + n as f64 * (1.0 + gamma).ln() / t;
        total += poisson_weight * bs(s, k, r_n, sigma_n, t);

        n += 1;
        poisson_weight *= lambda_t / n as f64;
        if n > 500 || (poisson_weight < 1e-14 && n as f64 > lambda_t) {
            break;
        }
    }
    total
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn call_price_matches_known_value() {
        // S=K=100, r=0.05, sigma=0.2, T=1 -> classic textbook Black-Scholes call.
        let price = bs_call_price(100.0, 100.0, 0.05, 0.2, 1.0);
        assert_relative_eq!(price, 10.4506, epsilon = 1e-3);
    }

    #[test]
    fn put_price_matches_known_value() {
        let price = bs_put_price(100.0, 100.0, 0.05, 0.2, 1.0);
        assert_relative_eq!(price, 5.5735, epsilon = 1e-3);
    }

    #[test]
    fn put_call_parity_holds_exactly() {
        let (s, k, r, sigma, t) = (100.0, 100.0, 0.05, 0.2, 1.0);
        let call = bs_call_price(s, k, r, sigma, t);
        let put = bs_put_price(s, k, r, sigma, t);
        let parity = s - k * (-r * t).exp();
        assert_relative_eq!(call - put, parity, epsilon = 1e-9);
    }

    #[test]
    fn merton_degenerates_to_black_scholes_without_jumps() {
        let (s, k, r, sigma, t) = (100.0, 100.0, 0.05, 0.2, 1.0);
        let merton = merton_call_price(s, k, r, sigma, t, 0.0, 0.0, 0.0);
        let bs = bs_call_price(s, k, r, sigma, t);
        assert_relative_eq!(merton, bs, epsilon = 1e-9);
    }

    #[test]
    fn merton_price_is_finite_and_positive_with_jumps() {
        let price = merton_call_price(100.0, 100.0, 0.05, 0.2, 1.0, 0.3, 0.05, 0.15);
        assert!(price.is_finite());
        assert!(price > 0.0);
    }
}
