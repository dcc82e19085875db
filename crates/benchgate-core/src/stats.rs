//! Descriptive statistics over duration samples.

/// Summary statistics of one group of durations.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DurationStats {
    pub total: f64,
    pub mean: f64,
    pub median: f64,
    pub min: f64,
    pub max: f64,
    pub std_dev: f64,
}

impl DurationStats {
    /// Compute stats, consuming the samples. Returns `None` for an empty group.
    ///
    /// Samples are sorted before summing so the result does not depend on
    /// the order the records arrived in.
    pub fn from_samples(mut samples: Vec<f64>) -> Option<Self> {
        if samples.is_empty() {
            return None;
        }
        samples.sort_by(f64::total_cmp);

        let n = samples.len();
        let total: f64 = samples.iter().sum();
        let mean = total / n as f64;

        Some(Self {
            total,
            mean,
            median: median_sorted(&samples),
            min: samples[0],
            max: samples[n - 1],
            std_dev: sample_std_dev(&samples, mean),
        })
    }
}

/// Median of an already-sorted, non-empty slice. Even lengths average the
/// two middle values.
fn median_sorted(sorted: &[f64]) -> f64 {
    let n = sorted.len();
    let mid = n / 2;
    if n.is_multiple_of(2) {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

/// Sample standard deviation (n - 1 denominator); 0 for a single sample.
fn sample_std_dev(samples: &[f64], mean: f64) -> f64 {
    let n = samples.len();
    if n < 2 {
        return 0.0;
    }
    let variance = samples.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1) as f64;
    variance.sqrt()
}
