//! Request metrics and statistics tracking for the prediction service.

use crate::types::category::AddictionCategory;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};
use tracing::info;

/// Number of unit-width score buckets covering 0-10
const SCORE_BUCKETS: usize = 10;

/// Metrics collector for served predictions
pub struct ServiceMetrics {
    /// Total successful predictions
    pub predictions_served: AtomicU64,
    /// Requests that failed (bad input, scoring error, no model)
    pub failures: AtomicU64,
    /// Predictions by category
    by_category: RwLock<HashMap<AddictionCategory, u64>>,
    /// Request latencies (in microseconds)
    latencies: RwLock<Vec<u64>>,
    /// Score distribution buckets
    score_buckets: RwLock<[u64; SCORE_BUCKETS]>,
    start_time: Instant,
}

impl ServiceMetrics {
    pub fn new() -> Self {
        Self {
            predictions_served: AtomicU64::new(0),
            failures: AtomicU64::new(0),
            by_category: RwLock::new(HashMap::new()),
            latencies: RwLock::new(Vec::with_capacity(1000)),
            score_buckets: RwLock::new([0; SCORE_BUCKETS]),
            start_time: Instant::now(),
        }
    }

    /// Record a successful prediction
    pub fn record_prediction(&self, latency: Duration, score: f64, category: AddictionCategory) {
        self.predictions_served.fetch_add(1, Ordering::Relaxed);

        if let Ok(mut times) = self.latencies.write() {
            times.push(latency.as_micros() as u64);
            // Keep only last 10000
            if times.len() > 10000 {
                times.drain(0..5000);
            }
        }

        if let Ok(mut by_category) = self.by_category.write() {
            *by_category.entry(category).or_insert(0) += 1;
        }

        if let Ok(mut buckets) = self.score_buckets.write() {
            buckets[score_bucket(score)] += 1;
        }
    }

    /// Record a failed request
    pub fn record_failure(&self) {
        self.failures.fetch_add(1, Ordering::Relaxed);
    }

    /// Get latency statistics
    pub fn get_latency_stats(&self) -> LatencyStats {
        let times = match self.latencies.read() {
            Ok(times) => times.clone(),
            Err(_) => return LatencyStats::default(),
        };
        if times.is_empty() {
            return LatencyStats::default();
        }

        let mut sorted = times;
        sorted.sort_unstable();

        let sum: u64 = sorted.iter().sum();
        let count = sorted.len();
        let at = |q: f64| sorted[((count as f64 * q) as usize).min(count - 1)];

        LatencyStats {
            count: count as u64,
            mean_us: sum / count as u64,
            p50_us: at(0.5),
            p95_us: at(0.95),
            p99_us: at(0.99),
            max_us: sorted[count - 1],
        }
    }

    /// Get current throughput (predictions per second)
    pub fn get_throughput(&self) -> f64 {
        let elapsed = self.start_time.elapsed().as_secs_f64();
        if elapsed > 0.0 {
            self.predictions_served.load(Ordering::Relaxed) as f64 / elapsed
        } else {
            0.0
        }
    }

    pub fn get_score_distribution(&self) -> [u64; SCORE_BUCKETS] {
        self.score_buckets
            .read()
            .map(|b| *b)
            .unwrap_or([0; SCORE_BUCKETS])
    }

    pub fn get_category_counts(&self) -> HashMap<AddictionCategory, u64> {
        self.by_category
            .read()
            .map(|c| c.clone())
            .unwrap_or_default()
    }

    /// Point-in-time view for the metrics endpoint
    pub fn snapshot(&self) -> MetricsSnapshot {
        let counts = self.get_category_counts();
        MetricsSnapshot {
            predictions_served: self.predictions_served.load(Ordering::Relaxed),
            failures: self.failures.load(Ordering::Relaxed),
            uptime_secs: self.start_time.elapsed().as_secs(),
            throughput_per_sec: self.get_throughput(),
            categories: AddictionCategory::ALL
                .iter()
                .map(|c| (c.to_string(), counts.get(c).copied().unwrap_or(0)))
                .collect(),
            latency: self.get_latency_stats(),
            score_distribution: self.get_score_distribution().to_vec(),
        }
    }

    /// Print summary statistics
    pub fn print_summary(&self) {
        let served = self.predictions_served.load(Ordering::Relaxed);
        let failures = self.failures.load(Ordering::Relaxed);
        let latency = self.get_latency_stats();
        let counts = self.get_category_counts();
        let score_dist = self.get_score_distribution();

        info!("╔══════════════════════════════════════════════════════════════╗");
        info!("║            ADDICTION SCORE SERVICE - METRICS SUMMARY         ║");
        info!("╠══════════════════════════════════════════════════════════════╣");
        info!(
            "║ Predictions Served: {:>8}  │  Throughput: {:>6.1} req/s     ║",
            served,
            self.get_throughput()
        );
        info!("║ Failed Requests:    {:>8}                                  ║", failures);
        info!(
            "║ Latency (μs): mean={:>5} p50={:>5} p95={:>5} p99={:>5}       ║",
            latency.mean_us, latency.p50_us, latency.p95_us, latency.p99_us
        );
        info!("╠══════════════════════════════════════════════════════════════╣");
        for category in AddictionCategory::ALL {
            let count = counts.get(&category).copied().unwrap_or(0);
            let pct = if served > 0 {
                (count as f64 / served as f64) * 100.0
            } else {
                0.0
            };
            info!("║   {:10}: {:>6} ({:>5.1}%)                                ║", category.as_str(), count, pct);
        }
        info!("╠══════════════════════════════════════════════════════════════╣");
        let total: u64 = score_dist.iter().sum();
        for (i, &count) in score_dist.iter().enumerate() {
            let pct = if total > 0 { (count as f64 / total as f64) * 100.0 } else { 0.0 };
            let bar: String = "█".repeat(((pct / 2.0) as usize).min(20));
            info!("║   {:>2}-{:<2}: {:>6} ({:>5.1}%) {}", i, i + 1, count, pct, bar);
        }
        info!("╚══════════════════════════════════════════════════════════════╝");
    }
}

impl Default for ServiceMetrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Histogram bucket for a score, clamped to the 0-10 scale
fn score_bucket(score: f64) -> usize {
    if score.is_nan() {
        return SCORE_BUCKETS - 1;
    }
    (score.floor().max(0.0) as usize).min(SCORE_BUCKETS - 1)
}

/// Latency statistics
#[derive(Debug, Default, Clone, Serialize)]
pub struct LatencyStats {
    pub count: u64,
    pub mean_us: u64,
    pub p50_us: u64,
    pub p95_us: u64,
    pub p99_us: u64,
    pub max_us: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct MetricsSnapshot {
    pub predictions_served: u64,
    pub failures: u64,
    pub uptime_secs: u64,
    pub throughput_per_sec: f64,
    pub categories: HashMap<String, u64>,
    pub latency: LatencyStats,
    pub score_distribution: Vec<u64>,
}

/// Prints a summary on a fixed interval
pub struct MetricsReporter {
    metrics: Arc<ServiceMetrics>,
    interval_secs: u64,
}

impl MetricsReporter {
    pub fn new(metrics: Arc<ServiceMetrics>, interval_secs: u64) -> Self {
        Self {
            metrics,
            interval_secs,
        }
    }

    /// Start the periodic reporting task
    pub async fn start(self) {
        let mut interval = tokio::time::interval(Duration::from_secs(self.interval_secs.max(1)));
        // First tick completes immediately
        interval.tick().await;
        loop {
            interval.tick().await;
            self.metrics.print_summary();
        }
    }
}
