//! Sample Statistics

use calc_validator::{require_finite, ValidationError};
use serde::{Deserialize, Serialize};

/// Descriptive statistics of a sample
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SampleStatistics {
    /// Number of values
    pub n: usize,
    /// Mean value
    pub mean: f64,
    /// Sample standard deviation (n - 1 denominator)
    pub std_dev: f64,
    /// Relative standard deviation (%), undefined for a zero mean
    pub rsd: Option<f64>,
    /// Minimum value
    pub min: f64,
    /// Maximum value
    pub max: f64,
}

impl SampleStatistics {
    /// Compute statistics from a slice of values
    ///
    /// Needs at least two finite values.
    pub fn compute(values: &[f64]) -> Result<Self, ValidationError> {
        if values.len() < 2 {
            return Err(ValidationError::InsufficientSamples {
                required: 2,
                actual: values.len(),
            });
        }
        for &v in values {
            require_finite("value", v)?;
        }

        let n = values.len() as f64;

        // Mean
        let mean = values.iter().sum::<f64>() / n;

        // Min/Max
        let min = values.iter().cloned().fold(f64::MAX, f64::min);
        let max = values.iter().cloned().fold(f64::MIN, f64::max);

        let m2: f64 = values.iter().map(|&v| (v - mean) * (v - mean)).sum();
        let std_dev = (m2 / (n - 1.0)).sqrt();

        Ok(Self {
            n: values.len(),
            mean,
            std_dev,
            rsd: (mean != 0.0).then(|| 100.0 * std_dev / mean),
            min,
            max,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_computation() {
        let values = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let stats = SampleStatistics::compute(&values).unwrap();
        assert!((stats.mean - 3.0).abs() < 0.001);
        assert_eq!(stats.min, 1.0);
        assert_eq!(stats.max, 5.0);
    }

    #[test]
    fn test_std_dev_uses_sample_denominator() {
        let values = vec![2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let stats = SampleStatistics::compute(&values).unwrap();
        // Population SD is 2.0; sample SD is sqrt(32 / 7)
        assert!((stats.std_dev - (32.0f64 / 7.0).sqrt()).abs() < 1e-12);
        assert!((stats.rsd.unwrap() - 100.0 * stats.std_dev / 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_constant_values() {
        let stats = SampleStatistics::compute(&[100.0; 10]).unwrap();
        assert_eq!(stats.std_dev, 0.0);
        assert_eq!(stats.rsd, Some(0.0));
    }

    #[test]
    fn test_zero_mean_has_no_rsd() {
        let stats = SampleStatistics::compute(&[0.0; 10]).unwrap();
        assert_eq!(stats.mean, 0.0);
        assert_eq!(stats.std_dev, 0.0);
        assert_eq!(stats.rsd, None);
    }

    #[test]
    fn test_too_few_values() {
        assert!(SampleStatistics::compute(&[]).is_err());
        assert!(SampleStatistics::compute(&[1.0]).is_err());
    }

    #[test]
    fn test_non_finite_value() {
        assert!(SampleStatistics::compute(&[1.0, f64::NAN, 3.0]).is_err());
    }
}
