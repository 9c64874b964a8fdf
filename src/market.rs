// src/market.rs
//! Market data bundle shared read-only across all pricing workers.

use std::sync::Arc;

use crate::curve::RateCurve;
use crate::error::validation::*;
use crate::error::EngineResult;

/// Model parameters for the Merton jump-diffusion process, plus a reference
/// to the zero-rate curve used for discounting and (optionally) drift.
///
/// Constructed once per pricing run and shared immutably by every worker
/// (§3, §4.2) — no locking is needed since nothing ever mutates it again.
#[derive(Debug, Clone)]
pub struct MarketData {
    /// Diffusion volatility σ ≥ 0.
    pub sigma: f64,
    /// Real-world drift μ (used only when `risk_neutral` is false).
    pub mu: f64,
    /// Jump intensity λ ≥ 0 (jumps per year).
    pub lambda: f64,
    /// Mean jump-size factor γ ≥ 0, with E[e^Y - 1] = γ.
    pub gamma: f64,
    /// Jump-size log-volatility σ_J ≥ 0.
    pub sigma_j: f64,
    /// Initial spot price S₀ > 0.
    pub s0: f64,
    /// Selects the effective drift: risk-free rate minus jump compensator
    /// when `true`, real-world `mu` minus jump compensator when `false`.
    pub risk_neutral: bool,
    curve: Arc<RateCurve>,
}

impl MarketData {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        sigma: f64,
        mu: f64,
        lambda: f64,
        gamma: f64,
        sigma_j: f64,
        s0: f64,
        risk_neutral: bool,
        curve: Arc<RateCurve>,
    ) -> EngineResult<Self> {
        validate_non_negative("sigma", sigma)?;
        validate_finite("mu", mu)?;
        validate_non_negative("lambda", lambda)?;
        validate_non_negative("gamma", gamma)?;
        validate_non_negative("sigma_j", sigma_j)?;
        validate_positive("s0", s0)?;

        Ok(MarketData {
            sigma,
            mu,
            lambda,
            gamma,
            sigma_j,
            s0,
            risk_neutral,
            curve,
        })
    }

    pub fn curve(&self) -> &RateCurve {
        &self.curve
    }

    /// Mean log-jump size μ_J such that E[e^Y - 1] = γ for Y ~ N(μ_J, σ_J²).
    pub fn mu_j(&self) -> f64 {
        (1.0 + self.gamma).ln() - 0.5 * self.sigma_j * self.sigma_j
    }

    /// Jump compensator λκ, where κ = γ (since E[e^Y - 1] = γ).
    pub fn jump_compensator(&self) -> f64 {
        self.lambda * self.gamma
    }

    /// The effective drift at calendar time `t`, per §4.4:
    /// `θ = (r(t) if risk_neutral else μ) - λκ - ½σ²`.
    pub fn effective_drift(&self, t: f64) -> f64 {
        let base = if self.risk_neutral {
            self.curve.rate(t)
        } else {
            self.mu
        };
        base - self.jump_compensator() - 0.5 * self.sigma * self.sigma
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flat_curve(r: f64) -> Arc<RateCurve> {
        Arc::new(RateCurve::new(vec![(1.0, r)]).unwrap())
    }

    #[test]
    fn rejects_negative_sigma() {
        assert!(MarketData::new(-0.1, 0.0, 0.0, 0.0, 0.0, 100.0, true, flat_curve(0.05)).is_err());
    }

    #[test]
    fn rejects_non_positive_spot() {
        assert!(MarketData::new(0.2, 0.0, 0.0, 0.0, 0.0, 0.0, true, flat_curve(0.05)).is_err());
    }

    #[test]
    fn allows_unconstrained_mu() {
        assert!(MarketData::new(0.2, -5.0, 0.0, 0.0, 0.0, 100.0, false, flat_curve(0.05)).is_ok());
    }

    #[test]
    fn risk_neutral_drift_uses_curve_rate() {
        let md = MarketData::new(0.2, 0.1, 0.0, 0.0, 0.0, 100.0, true, flat_curve(0.05)).unwrap();
        let expected = 0.05 - 0.0 - 0.5 * 0.2 * 0.2;
        assert!((md.effective_drift(1.0) - expected).abs() < 1e-12);
    }

    #[test]
    fn real_world_drift_uses_mu() {
        let md = MarketData::new(0.2, 0.1, 0.0, 0.0, 0.0, 100.0, false, flat_curve(0.05)).unwrap();
        let expected = 0.1 - 0.0 - 0.5 * 0.2 * 0.2;
        assert!((md.effective_drift(1.0) - expected).abs() < 1e-12);
    }

    #[test]
    fn jump_compensator_matches_lambda_gamma() {
        let md = MarketData::new(0.2, 0.1, 0.3, 0.05, 0.1, 100.0, true, flat_curve(0.05)).unwrap();
        assert!((md.jump_compensator() - 0.015).abs() < 1e-12);
    }
}
