//! Auxiliary regressions for the Johansen procedure.
//!
//! The differenced series and the once-lagged levels are both regressed on
//! the lagged differences (plus the deterministic columns the trend case
//! calls for). Their residuals U and V are what the reduced-rank regression
//! in [`estimation`](crate::estimation) works on.

use crate::config::JohansenConfig;
use crate::errors::CointResult;
use crate::linear_algebra::{
    append_column, first_differences, lagged_differences, pseudo_inverse, validate_series,
};
use nalgebra::{DMatrix, DVector};

/// Regressands and design matrix of the auxiliary regressions, row-aligned.
#[derive(Debug, Clone)]
pub struct AuxiliaryRegression {
    /// Lagged differences, then constant and trend columns as configured (t × p)
    pub design: DMatrix<f64>,
    /// First differences trimmed to the design rows (t × m)
    pub x_diff: DMatrix<f64>,
    /// Levels lagged once, trimmed to the design rows (t × m)
    pub x_lag: DMatrix<f64>,
}

/// Residuals of the differenced (U) and lagged-level (V) series.
#[derive(Debug, Clone)]
pub struct Residuals {
    /// Residuals of x_diff on the design (t × m)
    pub u: DMatrix<f64>,
    /// Residuals of x_lag on the design (t × m)
    pub v: DMatrix<f64>,
}

impl Residuals {
    /// Number of residual rows t.
    pub fn nobs(&self) -> usize {
        self.u.nrows()
    }

    /// Number of series m.
    pub fn dimension(&self) -> usize {
        self.u.ncols()
    }
}

impl AuxiliaryRegression {
    /// Builds the trimmed, aligned regression inputs from an (n_obs × m) series.
    pub fn build(x: &DMatrix<f64>, config: &JohansenConfig) -> CointResult<Self> {
        validate_series(x, config.min_observations())?;
        let m = x.ncols();

        let k = config.lag_order;
        let dx = first_differences(x);
        let t = dx.nrows() - k;

        let mut design = lagged_differences(&dx, k);
        let x_diff = dx.rows(k, t).clone_owned();
        let x_lag = x.rows(k, t).clone_owned();

        if config.trend.has_constant() {
            design = append_column(design, &DVector::from_element(t, 1.0));
        }
        if config.trend.has_trend() {
            design = append_column(design, &DVector::from_fn(t, |i, _| i as f64));
        }

        log::debug!(
            "auxiliary regression: t = {}, m = {}, design columns = {}",
            t,
            m,
            design.ncols()
        );

        Ok(Self {
            design,
            x_diff,
            x_lag,
        })
    }

    /// Effective sample size t.
    pub fn nobs(&self) -> usize {
        self.design.nrows()
    }

    /// Residualizes x_diff and x_lag on the design by least squares,
    /// projecting through the pseudo-inverse of the design matrix.
    pub fn residualize(&self) -> CointResult<Residuals> {
        let pinv = pseudo_inverse(&self.design)?;
        let u = &self.x_diff - &self.design * (&pinv * &self.x_diff);
        let v = &self.x_lag - &self.design * (&pinv * &self.x_lag);
        Ok(Residuals { u, v })
    }
}

/// Builds the auxiliary regression for `x` and returns its residuals.
pub fn residualize(x: &DMatrix<f64>, config: &JohansenConfig) -> CointResult<Residuals> {
    AuxiliaryRegression::build(x, config)?.residualize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DeterministicTrend;
    use crate::errors::CointegrationError;
    use assert_approx_eq::assert_approx_eq;

    fn sample_series(n: usize) -> DMatrix<f64> {
        DMatrix::from_fn(n, 2, |i, j| {
            let t = i as f64;
            if j == 0 {
                (0.7 * t).sin() + 0.05 * t
            } else {
                (1.3 * t).cos() - 0.02 * t * t / 10.0
            }
        })
    }

    #[test]
    fn test_shapes_follow_lag_order() {
        let x = sample_series(30);
        let config = JohansenConfig::new(3, DeterministicTrend::None).unwrap();
        let reg = AuxiliaryRegression::build(&x, &config).unwrap();
        // t = n_obs − k − 1
        assert_eq!(reg.nobs(), 26);
        assert_eq!(reg.design.shape(), (26, 6));
        assert_eq!(reg.x_diff.shape(), (26, 2));
        assert_eq!(reg.x_lag.shape(), (26, 2));
    }

    #[test]
    fn test_alignment_of_trimmed_series() {
        let x = sample_series(20);
        let config = JohansenConfig::new(2, DeterministicTrend::None).unwrap();
        let reg = AuxiliaryRegression::build(&x, &config).unwrap();
        // row 0 corresponds to time index k + 1 = 3 for the difference
        assert_approx_eq!(reg.x_diff[(0, 0)], x[(3, 0)] - x[(2, 0)]);
        assert_approx_eq!(reg.x_lag[(0, 1)], x[(2, 1)]);
        // first lag of the difference is x[2] − x[1]
        assert_approx_eq!(reg.design[(0, 0)], x[(2, 0)] - x[(1, 0)]);
    }

    #[test]
    fn test_deterministic_columns() {
        let x = sample_series(25);
        let config = JohansenConfig::new(1, DeterministicTrend::RestrictedTrend).unwrap();
        let reg = AuxiliaryRegression::build(&x, &config).unwrap();
        let p = reg.design.ncols();
        assert_eq!(p, 4);
        assert!(reg.design.column(p - 2).iter().all(|&c| c == 1.0));
        assert_eq!(reg.design[(0, p - 1)], 0.0);
        assert_eq!(reg.design[(5, p - 1)], 5.0);

        let config = JohansenConfig::new(1, DeterministicTrend::UnrestrictedConstant).unwrap();
        let reg = AuxiliaryRegression::build(&x, &config).unwrap();
        assert_eq!(reg.design.ncols(), 3);
    }

    #[test]
    fn test_residuals_are_orthogonal_to_design() {
        let x = sample_series(60);
        let config = JohansenConfig::new(2, DeterministicTrend::UnrestrictedTrend).unwrap();
        let reg = AuxiliaryRegression::build(&x, &config).unwrap();
        let res = reg.residualize().unwrap();
        let cross_u = reg.design.transpose() * &res.u;
        let cross_v = reg.design.transpose() * &res.v;
        assert!(cross_u.amax() < 1e-8, "XᵗU = {}", cross_u.amax());
        assert!(cross_v.amax() < 1e-8, "XᵗV = {}", cross_v.amax());
    }

    #[test]
    fn test_too_few_observations() {
        let x = sample_series(3);
        let config = JohansenConfig::new(2, DeterministicTrend::None).unwrap();
        match residualize(&x, &config) {
            Err(CointegrationError::InsufficientData { required, actual }) => {
                assert_eq!(required, 4);
                assert_eq!(actual, 3);
            }
            other => panic!("Expected InsufficientData, got {:?}", other),
        }
    }
}
