use serde::{Deserialize, Serialize};

/// Weak percentile rank over a fixed population
///
/// `rank(x) = 100 * |{v : v <= x}| / len`. Tied values share one rank and the
/// largest value always sits at 100.
///
/// # Examples
/// ```
/// use tfidf_zones::utils::stats::PercentileRank;
///
/// let ranks = PercentileRank::new([1u64, 1, 2, 5]);
/// assert_eq!(ranks.rank(1), 50.0);
/// assert_eq!(ranks.rank(5), 100.0);
/// ```
#[derive(Debug, Clone)]
pub struct PercentileRank<T> {
    sorted: Vec<T>,
}

impl<T> PercentileRank<T>
where
    T: Ord + Copy,
{
    pub fn new<I>(values: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let mut sorted: Vec<T> = values.into_iter().collect();
        sorted.sort_unstable();
        Self { sorted }
    }

    /// Percentile rank in `[0, 100]`; 0.0 for an empty population
    pub fn rank(&self, value: T) -> f64 {
        if self.sorted.is_empty() {
            return 0.0;
        }
        let at_or_below = self.sorted.partition_point(|&v| v <= value);
        100.0 * at_or_below as f64 / self.sorted.len() as f64
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.sorted.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.sorted.is_empty()
    }
}

/// Summary of the document frequency distribution
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DfStats {
    pub mean: f64,
    pub median: f64,
    /// most frequent DF, smallest one on ties
    pub mode: u64,
}

impl DfStats {
    /// Mean and median are rounded to two decimals; all zeros when empty.
    pub fn from_values<I>(values: I) -> Self
    where
        I: IntoIterator<Item = u64>,
    {
        let mut sorted: Vec<u64> = values.into_iter().collect();
        if sorted.is_empty() {
            return Self::default();
        }
        sorted.sort_unstable();

        let len = sorted.len();
        let mean = sorted.iter().map(|&v| v as f64).sum::<f64>() / len as f64;
        let mid = len / 2;
        let median = if len % 2 == 0 {
            (sorted[mid - 1] as f64 + sorted[mid] as f64) / 2.0
        } else {
            sorted[mid] as f64
        };

        // sorted ascending, so the first longest run is the smallest mode
        let mut mode = sorted[0];
        let mut best_run = 0;
        let mut run_start = 0;
        for i in 1..=len {
            if i == len || sorted[i] != sorted[run_start] {
                if i - run_start > best_run {
                    best_run = i - run_start;
                    mode = sorted[run_start];
                }
                run_start = i;
            }
        }

        Self {
            mean: round_to(mean, 2),
            median: round_to(median, 2),
            mode,
        }
    }
}

/// Round half away from zero to `places` decimals
#[inline]
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}
