//! Translation metrics and observability.
//!
//! Counters are per page pipeline (shared through an `Arc` between the
//! loader, the controller and the renderer) so that independent pages and
//! tests never see each other's numbers.

use serde::Serialize;
use std::sync::atomic::{AtomicUsize, Ordering};

#[derive(Debug, Default)]
pub struct TranslationMetrics {
    /// Translation files requested (page-specific and common)
    dictionary_fetches: AtomicUsize,

    /// Translation files that failed and were replaced by an empty dictionary
    fetch_failures: AtomicUsize,

    /// Fields rendered from dataset text because no translation was found
    fallback_lookups: AtomicUsize,

    /// Full page-content render passes
    render_passes: AtomicUsize,
}

impl TranslationMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_fetch(&self) {
        self.dictionary_fetches.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_fetch_failure(&self) {
        self.fetch_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_fallback(&self) {
        self.fallback_lookups.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_render_pass(&self) {
        self.render_passes.fetch_add(1, Ordering::Relaxed);
    }

    pub fn dictionary_fetches(&self) -> usize {
        self.dictionary_fetches.load(Ordering::Relaxed)
    }

    pub fn fetch_failures(&self) -> usize {
        self.fetch_failures.load(Ordering::Relaxed)
    }

    pub fn fallback_lookups(&self) -> usize {
        self.fallback_lookups.load(Ordering::Relaxed)
    }

    pub fn render_passes(&self) -> usize {
        self.render_passes.load(Ordering::Relaxed)
    }

    /// Snapshot of all counters.
    pub fn report(&self) -> MetricsReport {
        let fetches = self.dictionary_fetches();
        let failures = self.fetch_failures();
        let fetch_success_rate = if fetches > 0 {
            ((fetches - failures.min(fetches)) as f64 / fetches as f64) * 100.0
        } else {
            0.0
        };

        MetricsReport {
            dictionary_fetches: fetches,
            fetch_failures: failures,
            fetch_success_rate,
            fallback_lookups: self.fallback_lookups(),
            render_passes: self.render_passes(),
        }
    }
}

/// Point-in-time metrics, serialisable for logs.
#[derive(Debug, Clone, Serialize)]
pub struct MetricsReport {
    pub dictionary_fetches: usize,
    pub fetch_failures: usize,
    pub fetch_success_rate: f64,
    pub fallback_lookups: usize,
    pub render_passes: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_metrics_are_zero() {
        let metrics = TranslationMetrics::new();
        let report = metrics.report();
        assert_eq!(report.dictionary_fetches, 0);
        assert_eq!(report.render_passes, 0);
        assert_eq!(report.fetch_success_rate, 0.0);
    }

    #[test]
    fn test_success_rate() {
        let metrics = TranslationMetrics::new();
        for _ in 0..4 {
            metrics.record_fetch();
        }
        metrics.record_fetch_failure();

        let report = metrics.report();
        assert_eq!(report.fetch_failures, 1);
        assert!((report.fetch_success_rate - 75.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_counters_are_independent_per_instance() {
        let a = TranslationMetrics::new();
        let b = TranslationMetrics::new();
        a.record_render_pass();
        a.record_fallback();
        assert_eq!(a.render_passes(), 1);
        assert_eq!(b.render_passes(), 0);
        assert_eq!(a.fallback_lookups(), 1);
    }

    #[test]
    fn test_report_serializes() {
        let metrics = TranslationMetrics::new();
        metrics.record_render_pass();
        let json = serde_json::to_value(metrics.report()).expect("serialize");
        assert_eq!(json["render_passes"], 1);
    }
}
