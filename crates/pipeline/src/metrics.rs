use serde::Serialize;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::time::{Duration, Instant};

#[derive(Default)]
pub struct Metrics {
    // Counters
    documents_analyzed: AtomicUsize,
    attention_verdicts: AtomicUsize,
    failed_analyses: AtomicUsize,
    recognizer_degradations: AtomicUsize,

    // Timing (in microseconds)
    total_analysis_time_us: AtomicU64,

    // Counts
    total_entities_extracted: AtomicUsize,
    total_clauses_segmented: AtomicUsize,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_analysis(
        &self,
        duration: Duration,
        clauses: usize,
        entities: usize,
        attention: bool,
    ) {
        self.documents_analyzed.fetch_add(1, Ordering::Relaxed);
        if attention {
            self.attention_verdicts.fetch_add(1, Ordering::Relaxed);
        }
        self.total_analysis_time_us
            .fetch_add(duration.as_micros() as u64, Ordering::Relaxed);
        self.total_clauses_segmented.fetch_add(clauses, Ordering::Relaxed);
        self.total_entities_extracted.fetch_add(entities, Ordering::Relaxed);
    }

    pub fn record_failure(&self) {
        self.failed_analyses.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_degradation(&self) {
        self.recognizer_degradations.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        let analyzed = self.documents_analyzed.load(Ordering::Relaxed);
        let total_us = self.total_analysis_time_us.load(Ordering::Relaxed) as f64;

        MetricsSnapshot {
            documents_analyzed: analyzed,
            attention_verdicts: self.attention_verdicts.load(Ordering::Relaxed),
            failed_analyses: self.failed_analyses.load(Ordering::Relaxed),
            recognizer_degradations: self.recognizer_degradations.load(Ordering::Relaxed),
            avg_analysis_time_ms: if analyzed > 0 {
                total_us / analyzed as f64 / 1000.0
            } else {
                0.0
            },
            total_clauses_segmented: self.total_clauses_segmented.load(Ordering::Relaxed),
            total_entities_extracted: self.total_entities_extracted.load(Ordering::Relaxed),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricsSnapshot {
    pub documents_analyzed: usize,
    pub attention_verdicts: usize,
    pub failed_analyses: usize,
    pub recognizer_degradations: usize,
    pub avg_analysis_time_ms: f64,
    pub total_clauses_segmented: usize,
    pub total_entities_extracted: usize,
}

pub struct TimedOperation {
    start: Instant,
}

impl TimedOperation {
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_snapshot() {
        let snapshot = Metrics::new().snapshot();
        assert_eq!(snapshot.documents_analyzed, 0);
        assert_eq!(snapshot.avg_analysis_time_ms, 0.0);
    }

    #[test]
    fn test_counters_accumulate() {
        let metrics = Metrics::new();
        metrics.record_analysis(Duration::from_millis(4), 3, 10, true);
        metrics.record_analysis(Duration::from_millis(2), 1, 2, false);
        metrics.record_failure();
        metrics.record_degradation();

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.documents_analyzed, 2);
        assert_eq!(snapshot.attention_verdicts, 1);
        assert_eq!(snapshot.failed_analyses, 1);
        assert_eq!(snapshot.recognizer_degradations, 1);
        assert_eq!(snapshot.total_clauses_segmented, 4);
        assert_eq!(snapshot.total_entities_extracted, 12);
        assert!((snapshot.avg_analysis_time_ms - 3.0).abs() < 1e-9);
    }
}
