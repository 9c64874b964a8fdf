// src/curve.rs
//! Piecewise-linear zero-rate term structure with flat extrapolation.

use crate::error::validation::*;
use crate::error::EngineResult;

/// An immutable, ordered zero-rate curve.
///
/// Constructed once from a validated maturity→rate mapping and shared
/// read-only for the lifetime of a pricing run (§3, §4.1). Maturities are
/// strictly positive years; rates are non-negative.
#[derive(Debug, Clone)]
pub struct RateCurve {
    // Sorted ascending by maturity; invariant maintained at construction.
    points: Vec<(f64, f64)>,
}

impl RateCurve {
    /// Builds a curve from a maturity→rate mapping.
    ///
    /// Fails if the mapping is empty, any maturity is `<= 0`, or any rate
    /// is `< 0`.
    pub fn new<I>(points: I) -> EngineResult<Self>
    where
        I: IntoIterator<Item = (f64, f64)>,
    {
        let mut points: Vec<(f64, f64)> = points.into_iter().collect();
        validate_non_empty("rate_curve.points", &points)?;
        for &(maturity, rate) in &points {
            validate_positive("rate_curve.maturity", maturity)?;
            validate_non_negative("rate_curve.rate", rate)?;
        }
        points.sort_by(|a, b| a.0.partial_cmp(&b.0).expect("maturities are finite"));
        Ok(RateCurve { points })
    }

    /// Flat-extrapolated, piecewise-linear zero rate at maturity `tau`.
    pub fn rate(&self, tau: f64) -> f64 {
        let first = self.points.first().expect("non-empty by construction");
        let last = self.points.last().expect("non-empty by construction");

        if tau <= first.0 {
            return first.1;
        }
        if tau >= last.0 {
            return last.1;
        }

        // self.points has at least two entries here, since tau is
        // strictly between the first and last maturities.
        let idx = self
            .points
            .partition_point(|&(maturity, _)| maturity <= tau);
        let (t_lo, r_lo) = self.points[idx - 1];
        let (t_hi, r_hi) = self.points[idx];
        let weight = (tau - t_lo) / (t_hi - t_lo);
        r_lo + weight * (r_hi - r_lo)
    }

    /// Discount factor `exp(-rate(tau) * tau)`.
    pub fn discount(&self, tau: f64) -> f64 {
        (-self.rate(tau) * tau).exp()
    }

    /// Read-only view over the curve's (maturity, rate) points, in
    /// ascending maturity order.
    pub fn rates_view(&self) -> &[(f64, f64)] {
        &self.points
    }
}
