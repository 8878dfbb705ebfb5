//! Descriptive statistics for the t-test groups.
//!
//! # Algorithms
//!
//! - **Mean**: Kahan compensated summation, O(ε) error independent of n.
//! - **Variance**: Welford's online algorithm with Bessel's correction.
//!   Reference: Welford (1962), "Note on a Method for Calculating
//!   Corrected Sums of Squares and Products", *Technometrics* 4(3).
//!
//! Functions return `None` instead of NaN when the input cannot support
//! the estimate (too few values, or non-finite values).

/// Kahan compensated sum.
///
/// # Examples
/// ```
/// use u_hypotest::stats::kahan_sum;
/// let tenths = [0.1; 10];
/// assert!((kahan_sum(&tenths) - 1.0).abs() < 1e-15);
/// ```
pub fn kahan_sum(data: &[f64]) -> f64 {
    let mut sum = 0.0_f64;
    let mut carry = 0.0_f64;
    for &x in data {
        let y = x - carry;
        let t = sum + y;
        carry = (t - sum) - y;
        sum = t;
    }
    sum
}

/// Arithmetic mean.
///
/// # Returns
/// - `None` if `data` is empty or holds a NaN/Inf.
///
/// # Examples
/// ```
/// use u_hypotest::stats::mean;
/// assert_eq!(mean(&[30.0, 40.0]), Some(35.0));
/// assert_eq!(mean(&[]), None);
/// ```
pub fn mean(data: &[f64]) -> Option<f64> {
    if data.is_empty() || !data.iter().all(|x| x.is_finite()) {
        return None;
    }
    Some(kahan_sum(data) / data.len() as f64)
}

/// Unbiased sample variance (denominator `n − 1`).
///
/// # Returns
/// - `None` if `data.len() < 2` or holds a NaN/Inf.
///
/// # Examples
/// ```
/// use u_hypotest::stats::variance;
/// assert_eq!(variance(&[20.0, 50.0]), Some(450.0));
/// assert_eq!(variance(&[20.0]), None);
/// ```
pub fn variance(data: &[f64]) -> Option<f64> {
    if data.len() < 2 || !data.iter().all(|x| x.is_finite()) {
        return None;
    }
    let mut acc = WelfordAccumulator::new();
    data.iter().for_each(|&x| acc.update(x));
    acc.sample_variance()
}

/// Running mean and second central moment, one pass, O(1) space.
///
/// # Examples
/// ```
/// use u_hypotest::stats::WelfordAccumulator;
/// let mut acc = WelfordAccumulator::new();
/// for &x in &[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0] {
///     acc.update(x);
/// }
/// assert_eq!(acc.count(), 8);
/// assert!((acc.mean().unwrap() - 5.0).abs() < 1e-15);
/// assert!((acc.sample_variance().unwrap() - 32.0 / 7.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Default)]
pub struct WelfordAccumulator {
    count: u64,
    mean: f64,
    m2: f64,
}

impl WelfordAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update(&mut self, value: f64) {
        self.count += 1;
        let delta = value - self.mean;
        self.mean += delta / self.count as f64;
        // uses the updated mean
        self.m2 += delta * (value - self.mean);
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    /// `None` until the first sample arrives.
    pub fn mean(&self) -> Option<f64> {
        (self.count > 0).then_some(self.mean)
    }

    /// Sample variance, `None` with fewer than 2 samples.
    pub fn sample_variance(&self) -> Option<f64> {
        (self.count >= 2).then(|| self.m2 / (self.count - 1) as f64)
    }
}
