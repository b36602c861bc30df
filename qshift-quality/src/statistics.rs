//! Accumulators for score statistics.
//!
//! Both report the population standard deviation (divide by `n`, not `n - 1`).

/// Mean and population standard deviation of a set of scores.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeanStdev {
    pub mean: f64,
    pub stdev: f64,
}

///
/// Streaming mean/variance over an unbounded number of values (Welford's
/// algorithm). Uses constant memory no matter how many pairs are scored.
///
#[derive(Debug, Clone, Default)]
pub struct RunningStatistics {
    count: u64,
    mean: f64,
    m2: f64,
}

impl RunningStatistics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, value: f64) {
        self.count += 1;
        let delta = value - self.mean;
        self.mean += delta / self.count as f64;
        self.m2 += delta * (value - self.mean);
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    /// `None` until at least one value has been pushed.
    pub fn mean_stdev(&self) -> Option<MeanStdev> {
        if self.count == 0 {
            return None;
        }

        Some(MeanStdev {
            mean: self.mean,
            stdev: (self.m2 / self.count as f64).sqrt(),
        })
    }
}

///
/// Holds the scores seen since the last flush. Flushing computes their mean and
/// standard deviation and empties the batch; nothing carries over between
/// batches.
///
#[derive(Debug, Clone, Default)]
pub struct BatchStatistics {
    values: Vec<f64>,
}

impl BatchStatistics {
    pub fn with_capacity(capacity: usize) -> Self {
        BatchStatistics {
            values: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, value: f64) {
        self.values.push(value);
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn flush(&mut self) -> Option<MeanStdev> {
        if self.values.is_empty() {
            return None;
        }

        let n = self.values.len() as f64;
        let mean = self.values.iter().sum::<f64>() / n;
        let variance = self
            .values
            .iter()
            .map(|value| (value - mean).powi(2))
            .sum::<f64>()
            / n;

        self.values.clear();

        Some(MeanStdev {
            mean,
            stdev: variance.sqrt(),
        })
    }
}
