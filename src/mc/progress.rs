// src/mc/progress.rs
//! Optional progress reporting, decoupled from any particular UI layer.

/// A progress sink: called with a monotonically non-decreasing fraction in
/// `[0, 1]` as an estimator makes headway. Advisory only — nothing about
/// correctness depends on whether, or how often, it is called (§6).
pub trait ProgressSink: Fn(f64) + Send + Sync {}
impl<T: Fn(f64) + Send + Sync> ProgressSink for T {}

/// A boxed progress sink, convenient to thread through estimator calls that
/// may or may not want one.
pub type BoxedProgress = Box<dyn ProgressSink>;

/// Reports `done / total` through `sink`, if present. `total == 0` reports
/// nothing (there is no meaningful fraction).
pub fn report(sink: Option<&BoxedProgress>, done: usize, total: usize) {
    if total == 0 {
        return;
    }
    if let Some(sink) = sink {
        sink(done as f64 / total as f64);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::sync::Arc;

    #[test]
    fn report_invokes_sink_with_expected_fraction() {
        let last_bits = Arc::new(AtomicU64::new(0));
        let captured = last_bits.clone();
        let sink: BoxedProgress = Box::new(move |frac: f64| {
            captured.store(frac.to_bits(), Ordering::SeqCst);
        });
        report(Some(&sink), 1, 4);
        let observed = f64::from_bits(last_bits.load(Ordering::SeqCst));
        assert!((observed - 0.25).abs() < 1e-12);
    }

    #[test]
    fn report_with_no_sink_does_nothing() {
        report(None, 1, 4);
    }

    #[test]
    fn report_with_zero_total_does_not_invoke_sink() {
        let called = Arc::new(AtomicU64::new(0));
        let flag = called.clone();
        let sink: BoxedProgress = Box::new(move |_| {
            flag.store(1, Ordering::SeqCst);
        });
        report(Some(&sink), 0, 0);
        assert_eq!(called.load(Ordering::SeqCst), 0);
    }
}
