// src/option.rs
//! Option contracts: European, American, and Bermudan vanilla call/put.

use crate::error::validation::*;
use crate::error::EngineResult;

/// Which side of the payoff the holder owns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Call,
    Put,
}

impl Side {
    /// Immediate exercise value `max(S-K,0)` (Call) or `max(K-S,0)` (Put).
    pub fn immediate_payoff(self, s: f64, k: f64) -> f64 {
        match self {
            Side::Call => (s - k).max(0.0),
            Side::Put => (k - s).max(0.0),
        }
    }
}

/// A single-asset vanilla option contract.
///
/// Every variant shares strike `k`, maturity `t`, and `side`; Bermudan
/// additionally carries an ordered, non-empty set of interior exercise
/// times strictly within `(0, t)` (§4.3).
#[derive(Debug, Clone)]
pub enum OptionContract {
    European { k: f64, t: f64, side: Side },
    American { k: f64, t: f64, side: Side },
    Bermudan {
        k: f64,
        t: f64,
        side: Side,
        exercise_times: Vec<f64>,
    },
}

impl OptionContract {
    pub fn european(k: f64, t: f64, side: Side) -> EngineResult<Self> {
        validate_positive("k", k)?;
        validate_positive("t", t)?;
        Ok(OptionContract::European { k, t, side })
    }

    pub fn american(k: f64, t: f64, side: Side) -> EngineResult<Self> {
        validate_positive("k", k)?;
        validate_positive("t", t)?;
        Ok(OptionContract::American { k, t, side })
    }

    /// `exercise_times` need not be pre-sorted or de-duplicated; it is
    /// normalized (sorted, deduplicated) after every entry is validated to
    /// lie strictly in `(0, t)`.
    pub fn bermudan(k: f64, t: f64, side: Side, exercise_times: Vec<f64>) -> EngineResult<Self> {
        validate_positive("k", k)?;
        validate_positive("t", t)?;
        validate_non_empty("exercise_times", &exercise_times)?;
        for &time in &exercise_times {
            validate_strictly_between("exercise_times[i]", time, 0.0, t)?;
        }

        let mut times = exercise_times;
        times.sort_by(|a, b| a.partial_cmp(b).expect("exercise times are finite"));
        times.dedup();

        Ok(OptionContract::Bermudan {
            k,
            t,
            side,
            exercise_times: times,
        })
    }

    pub fn k(&self) -> f64 {
        match self {
            OptionContract::European { k, .. }
            | OptionContract::American { k, .. }
            | OptionContract::Bermudan { k, .. } => *k,
        }
    }

    pub fn t(&self) -> f64 {
        match self {
            OptionContract::European { t, .. }
            | OptionContract::American { t, .. }
            | OptionContract::Bermudan { t, .. } => *t,
        }
    }

    pub fn side(&self) -> Side {
        match self {
            OptionContract::European { side, .. }
            | OptionContract::American { side, .. }
            | OptionContract::Bermudan { side, .. } => *side,
        }
    }

    pub fn exercise_times(&self) -> Option<&[f64]> {
        match self {
            OptionContract::Bermudan { exercise_times, .. } => Some(exercise_times),
            _ => None,
        }
    }

    pub fn immediate_payoff(&self, s: f64) -> f64 {
        self.side().immediate_payoff(s, self.k())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_positive_strike_or_maturity() {
        assert!(OptionContract::european(0.0, 1.0, Side::Call).is_err());
        assert!(OptionContract::european(100.0, 0.0, Side::Call).is_err());
        assert!(OptionContract::american(-1.0, 1.0, Side::Put).is_err());
    }

    #[test]
    fn bermudan_requires_non_empty_exercise_times() {
        assert!(OptionContract::bermudan(100.0, 1.0, Side::Call, vec![]).is_err());
    }

    #[test]
    fn bermudan_rejects_boundary_exercise_times() {
        assert!(OptionContract::bermudan(100.0, 1.0, Side::Call, vec![0.0]).is_err());
        assert!(OptionContract::bermudan(100.0, 1.0, Side::Call, vec![1.0]).is_err());
    }

    #[test]
    fn bermudan_sorts_and_dedups_exercise_times() {
        let contract =
            OptionContract::bermudan(100.0, 1.0, Side::Call, vec![0.75, 0.5, 0.5, 0.25]).unwrap();
        assert_eq!(
            contract.exercise_times().unwrap(),
            &[0.25, 0.5, 0.75][..]
        );
    }

    #[test]
    fn immediate_payoff_matches_call_and_put_formulas() {
        assert_eq!(Side::Call.immediate_payoff(110.0, 100.0), 10.0);
        assert_eq!(Side::Call.immediate_payoff(90.0, 100.0), 0.0);
        assert_eq!(Side::Put.immediate_payoff(90.0, 100.0), 10.0);
        assert_eq!(Side::Put.immediate_payoff(110.0, 100.0), 0.0);
    }
}
