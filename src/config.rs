//! # Test Configuration
//!
//! Configuration structures for a single Johansen test run: the lag order of
//! the differenced-series regression, the deterministic-trend case, the test
//! statistic, and the significance level. A configuration is immutable once
//! built and is validated when constructed from raw values.

use crate::errors::{validate_parameter, CointResult, CointegrationError};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Deterministic-trend case, following the five Osterwald-Lenum (1992) cases.
///
/// The discriminant is the model number used in table keys (`TRACE_<n>`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DeterministicTrend {
    /// Case 0: no deterministic terms, cointegrating relations have zero mean
    None = 0,
    /// Case 1*: no trend in the data, constant in the cointegrating relations
    RestrictedConstant = 1,
    /// Case 1: linear trend in the data, none in the cointegrating relations
    UnrestrictedConstant = 2,
    /// Case 2*: linear trend in both data and cointegrating relations
    RestrictedTrend = 3,
    /// Case 2: quadratic trend in the data, linear in the cointegrating relations
    UnrestrictedTrend = 4,
}

impl DeterministicTrend {
    /// Model number as used in critical-value keys.
    pub fn model(self) -> u8 {
        self as u8
    }

    /// Whether the auxiliary regression carries a constant column.
    pub fn has_constant(self) -> bool {
        self != DeterministicTrend::None
    }

    /// Whether the auxiliary regression carries a linear time-trend column.
    pub fn has_trend(self) -> bool {
        matches!(
            self,
            DeterministicTrend::RestrictedTrend | DeterministicTrend::UnrestrictedTrend
        )
    }
}

impl TryFrom<u8> for DeterministicTrend {
    type Error = CointegrationError;

    fn try_from(model: u8) -> CointResult<Self> {
        validate_parameter(model as usize, 0, 4, "model")?;
        Ok(match model {
            0 => DeterministicTrend::None,
            1 => DeterministicTrend::RestrictedConstant,
            2 => DeterministicTrend::UnrestrictedConstant,
            3 => DeterministicTrend::RestrictedTrend,
            _ => DeterministicTrend::UnrestrictedTrend,
        })
    }
}

/// Likelihood-ratio statistic used for the rank test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum StatisticKind {
    /// Trace statistic: sums over all eigenvalues from index r
    Trace,
    /// Maximum-eigenvalue statistic: uses the r-th eigenvalue only
    MaxEigenvalue,
}

impl StatisticKind {
    /// Key prefix in the critical-value table.
    pub fn key_prefix(self) -> &'static str {
        match self {
            StatisticKind::Trace => "TRACE",
            StatisticKind::MaxEigenvalue => "MAX_EVAL",
        }
    }
}

/// `true` selects the trace statistic, `false` the maximum-eigenvalue statistic.
impl From<bool> for StatisticKind {
    fn from(trace: bool) -> Self {
        if trace {
            StatisticKind::Trace
        } else {
            StatisticKind::MaxEigenvalue
        }
    }
}

/// Significance level for the reject/fail-to-reject decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SignificanceLevel {
    /// 90% critical values
    Ninety,
    /// 95% critical values
    NinetyFive,
    /// 99% critical values
    NinetyNine,
}

impl SignificanceLevel {
    /// Column of the (90, 95, 99) triple holding this level's threshold.
    pub fn column(self) -> usize {
        match self {
            SignificanceLevel::Ninety => 0,
            SignificanceLevel::NinetyFive => 1,
            SignificanceLevel::NinetyNine => 2,
        }
    }
}

impl TryFrom<usize> for SignificanceLevel {
    type Error = CointegrationError;

    fn try_from(index: usize) -> CointResult<Self> {
        validate_parameter(index, 0, 2, "significance_level")?;
        Ok(match index {
            0 => SignificanceLevel::Ninety,
            1 => SignificanceLevel::NinetyFive,
            _ => SignificanceLevel::NinetyNine,
        })
    }
}

/// Configuration for a Johansen test run.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct JohansenConfig {
    /// Number of lagged differences in the auxiliary regression (k ≥ 1)
    pub lag_order: usize,
    /// Deterministic-trend case
    pub trend: DeterministicTrend,
    /// Test statistic
    pub statistic: StatisticKind,
    /// Significance level
    pub significance: SignificanceLevel,
}

impl Default for JohansenConfig {
    fn default() -> Self {
        Self {
            lag_order: 1,
            trend: DeterministicTrend::RestrictedConstant,
            statistic: StatisticKind::Trace,
            significance: SignificanceLevel::NinetyFive,
        }
    }
}

impl JohansenConfig {
    /// Trace test at 95% with the given lag order and trend case.
    pub fn new(lag_order: usize, trend: DeterministicTrend) -> CointResult<Self> {
        if lag_order == 0 {
            return Err(CointegrationError::InvalidParameter {
                parameter: "lag_order".to_string(),
                value: 0.0,
                constraint: "k >= 1".to_string(),
            });
        }
        Ok(Self {
            lag_order,
            trend,
            ..Self::default()
        })
    }

    /// Builds a configuration from the raw external interface values:
    /// lag order, model case 0..=4, trace flag, significance index 0..=2.
    pub fn from_raw(
        lag_order: usize,
        model: u8,
        trace: bool,
        significance_level: usize,
    ) -> CointResult<Self> {
        Ok(Self::new(lag_order, DeterministicTrend::try_from(model)?)?
            .with_statistic(StatisticKind::from(trace))
            .with_significance(SignificanceLevel::try_from(significance_level)?))
    }

    /// Replace the test statistic.
    pub fn with_statistic(mut self, statistic: StatisticKind) -> Self {
        self.statistic = statistic;
        self
    }

    /// Replace the significance level.
    pub fn with_significance(mut self, significance: SignificanceLevel) -> Self {
        self.significance = significance;
        self
    }

    /// Minimum number of observations: one for differencing, k for lags,
    /// and at least one effective row.
    pub fn min_observations(&self) -> usize {
        self.lag_order + 2
    }

    /// Effective sample size t = n_obs − k − 1.
    pub fn effective_sample(&self, n_obs: usize) -> usize {
        n_obs.saturating_sub(self.lag_order + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trend_columns_per_case() {
        assert!(!DeterministicTrend::None.has_constant());
        assert!(DeterministicTrend::RestrictedConstant.has_constant());
        assert!(!DeterministicTrend::UnrestrictedConstant.has_trend());
        assert!(DeterministicTrend::RestrictedTrend.has_trend());
        assert!(DeterministicTrend::UnrestrictedTrend.has_trend());
        assert_eq!(DeterministicTrend::RestrictedTrend.model(), 3);
    }

    #[test]
    fn test_from_raw_maps_external_interface() {
        let config = JohansenConfig::from_raw(2, 4, false, 2).unwrap();
        assert_eq!(config.lag_order, 2);
        assert_eq!(config.trend, DeterministicTrend::UnrestrictedTrend);
        assert_eq!(config.statistic, StatisticKind::MaxEigenvalue);
        assert_eq!(config.significance, SignificanceLevel::NinetyNine);
    }

    #[test]
    fn test_from_raw_rejects_out_of_range_values() {
        assert!(matches!(
            JohansenConfig::from_raw(1, 5, true, 1),
            Err(CointegrationError::InvalidParameter { .. })
        ));
        assert!(matches!(
            JohansenConfig::from_raw(1, 1, true, 3),
            Err(CointegrationError::InvalidParameter { .. })
        ));
        assert!(matches!(
            JohansenConfig::from_raw(0, 1, true, 1),
            Err(CointegrationError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn test_effective_sample() {
        let config = JohansenConfig::new(2, DeterministicTrend::None).unwrap();
        assert_eq!(config.min_observations(), 4);
        assert_eq!(config.effective_sample(100), 97);
        assert_eq!(config.effective_sample(2), 0);
    }
}
