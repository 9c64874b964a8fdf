// src/mc/lsm.rs
//! Longstaff–Schwartz (LSM) estimator for American and Bermudan options.
//!
//! Generates `n` price paths over `STEPS` time steps, then walks backward
//! from maturity regressing discounted future cash flows on a quadratic
//! basis of the current price to decide, path by path, whether to exercise
//! at each step (§4.6). The dense N×(M+1) cash-flow matrix described in §3
//! is realized here as the O(N) single-vector optimization §9 explicitly
//! sanctions: only column `t+1` of that matrix is ever read while
//! processing column `t`, so a length-N vector updated in place carries the
//! same information.

use ndarray::parallel::prelude::*;
use ndarray::{Array1, Array2, Axis};
use nalgebra::{Matrix3, Vector3};
use rayon::ThreadPoolBuilder;

use crate::error::{EngineResult, PricingError};
use crate::market::MarketData;
use crate::mc::progress::{self, BoxedProgress};
use crate::option::OptionContract;
use crate::path::generate_path;
use crate::rng::seed_worker_rng;

/// Fixed step count for the LSM estimator (§4.6).
pub const STEPS: usize = 50;

/// Prices an American or Bermudan `contract` by Longstaff–Schwartz backward
/// induction, using `n` simulated paths split across `w` workers.
///
/// `n` and `w` must already be validated as `> 0` by the caller (the
/// dispatch point in [`crate::mc::price`]).
pub fn price(
    contract: &OptionContract,
    market: &MarketData,
    n: usize,
    w: usize,
    seed: u64,
    progress: Option<&BoxedProgress>,
) -> EngineResult<f64> {
    let t = contract.t();
    let dt = t / STEPS as f64;
    let exercise = exercise_steps(contract, dt);

    let mut paths = Array2::<f64>::zeros((n, STEPS + 1));
    generate_path_matrix(market, dt, n, w, seed, &mut paths)?;
    progress::report(progress, 1, 2);

    let mut cash_flow = Array1::<f64>::zeros(n);
    for i in 0..n {
        cash_flow[i] = contract.immediate_payoff(paths[[i, STEPS]]);
    }

    let mut itm_mask = vec![false; n];
    for t_step in (1..STEPS).rev() {
        let r_t = market.curve().rate(t_step as f64 * dt);
        let d_t = (-r_t * dt).exp();

        let mut any_itm = false;
        for i in 0..n {
            let is_itm = exercise[t_step] && contract.immediate_payoff(paths[[i, t_step]]) > 0.0;
            itm_mask[i] = is_itm;
            any_itm |= is_itm;
        }

        if !any_itm {
            cash_flow.mapv_inplace(|c| c * d_t);
            continue;
        }

        let coeffs = regress_continuation(&paths, &cash_flow, &itm_mask, t_step, d_t);

        for i in 0..n {
            if !itm_mask[i] {
                cash_flow[i] *= d_t;
                continue;
            }
            let s = paths[[i, t_step]];
            let immediate = contract.immediate_payoff(s);
            // A degenerate fit (`coeffs == None`) means every in-the-money
            // path simply continues holding this step, per §4.6's stated
            // fallback, rather than being valued against an estimate.
            match coeffs {
                Some((b0, b1, b2)) => {
                    let continuation = b0 + b1 * s + b2 * s * s;
                    if immediate >= continuation {
                        cash_flow[i] = immediate;
                    } else {
                        cash_flow[i] *= d_t;
                    }
                }
                None => cash_flow[i] *= d_t,
            }
        }
    }

    let r0 = market.curve().rate(0.0);
    // §4.6 step 4: a single Δt discount from step 1, not a true per-path
    // discount from each path's actual exercise step — faithfully
    // replicated per DESIGN.md's Open Question decision.
    let d0 = (-r0 * dt).exp();
    progress::report(progress, 2, 2);

    let mean_cf = cash_flow.iter().sum::<f64>() / n as f64;
    Ok(mean_cf * d0)
}

/// Returns, for each step index `1..=STEPS`, whether that step belongs to
/// the exercise-step set E (§4.6): every step for American, or the nearest
/// integer step to each Bermudan exercise date (duplicates and dates that
/// round outside `1..=STEPS` simply drop out of the set).
fn exercise_steps(contract: &OptionContract, dt: f64) -> Vec<bool> {
    let mut set = vec![false; STEPS + 1];
    match contract {
        OptionContract::American { .. } => {
            for t in set.iter_mut().skip(1) {
                *t = true;
            }
        }
        OptionContract::Bermudan {
            exercise_times, ..
        } => {
            for &t_k in exercise_times {
                let step = (t_k / dt).round();
                if step >= 1.0 && step <= STEPS as f64 {
                    set[step as usize] = true;
                }
            }
        }
        OptionContract::European { .. } => {
            debug_assert!(false, "lsm::price must not be called for European contracts");
        }
    }
    set
}

/// Fills `paths` (`n` rows, `STEPS + 1` columns) with independent price
/// trajectories, splitting rows across a scoped `w`-thread pool (§5, §9).
/// Each worker owns one contiguous row chunk and one private RNG seeded
/// from its chunk index, exactly as the European estimator seeds one RNG
/// per worker chunk.
fn generate_path_matrix(
    market: &MarketData,
    dt: f64,
    n: usize,
    w: usize,
    seed: u64,
    paths: &mut Array2<f64>,
) -> EngineResult<()> {
    let chunk_len = (n + w - 1) / w;
    let pool = ThreadPoolBuilder::new()
        .num_threads(w)
        .build()
        .map_err(|e| PricingError::WorkerFailure {
            reason: format!("failed to build worker pool of size {}: {}", w, e),
        })?;

    pool.install(|| {
        paths
            .axis_chunks_iter_mut(Axis(0), chunk_len.max(1))
            .into_par_iter()
            .enumerate()
            .for_each(|(worker_index, mut chunk)| {
                let mut rng = seed_worker_rng(seed, worker_index as u64);
                for mut row in chunk.axis_iter_mut(Axis(0)) {
                    let row_slice = row
                        .as_slice_mut()
                        .expect("path matrix rows are contiguous in a standard-layout Array2");
                    generate_path(market, dt, row_slice, &mut rng);
                }
            });
    });

    Ok(())
}

/// Regresses `Y_i = cash_flow[i] * d_t` on the basis `{1, S, S^2}` over the
/// in-the-money subset marked in `itm_mask`, solving the 3x3 normal
/// equations via `nalgebra`. Returns `None` (logged at debug level) when
/// fewer than 3 points are in the money or the design is singular — both
/// are the "recoverable, fall back to zero continuation" cases of §4.6/§7.
fn regress_continuation(
    paths: &Array2<f64>,
    cash_flow: &Array1<f64>,
    itm_mask: &[bool],
    t_step: usize,
    d_t: f64,
) -> Option<(f64, f64, f64)> {
    let (mut m01, mut m02, mut m11, mut m12, mut m22) = (0.0, 0.0, 0.0, 0.0, 0.0);
    let (mut b0, mut b1, mut b2) = (0.0, 0.0, 0.0);
    let mut count = 0usize;

    for (i, &is_itm) in itm_mask.iter().enumerate() {
        if !is_itm {
            continue;
        }
        let s = paths[[i, t_step]];
        let s2 = s * s;
        let y = cash_flow[i] * d_t;

        m01 += s;
        m02 += s2;
        m11 += s2;
        m12 += s2 * s;
        m22 += s2 * s2;
        b0 += y;
        b1 += y * s;
        b2 += y * s2;
        count += 1;
    }

    if count < 3 {
        log::debug!(
            "lsm: step {} has only {} in-the-money path(s), holding instead of regressing",
            t_step,
            count
        );
        return None;
    }

    let m00 = count as f64;
    let design = Matrix3::new(m00, m01, m02, m01, m11, m12, m02, m12, m22);
    let rhs = Vector3::new(b0, b1, b2);

    match design.lu().solve(&rhs) {
        Some(beta) => Some((beta[0], beta[1], beta[2])),
        None => {
            log::debug!(
                "lsm: regression at step {} is singular over {} points, holding",
                t_step,
                count
            );
            None
        }
    }
}
