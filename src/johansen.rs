//! End-to-end Johansen cointegration test.
//!
//! [`JohansenProcedure`] wires the auxiliary regression, the maximum-likelihood
//! eigensystem and the sequential rank tests together. Any stage failure is
//! returned unchanged and no partial result is produced.

use crate::config::JohansenConfig;
use crate::critical_values::CriticalValueTable;
use crate::errors::{CointResult, CointegrationError};
use crate::estimation::{estimate, Eigensystem};
use crate::hypothesis::{HypothesisTester, RankTestOutcome};
use crate::linear_algebra::{series_matrix, validate_series};
use crate::regression::residualize;
use nalgebra::{DMatrix, DVector};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Complete outcome of a Johansen test run.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct JohansenResult {
    /// Candidate cointegrating vectors and their eigenvalues, in descending order
    pub eigensystem: Eigensystem,
    /// Test outcome for every r in 0..m
    pub outcomes: Vec<RankTestOutcome>,
    /// Every r for which "rank ≤ r" was rejected
    pub rejected_ranks: Vec<usize>,
}

impl JohansenResult {
    /// Eigenvectors as columns; column i is the i-th candidate relation.
    pub fn eigenvectors(&self) -> &DMatrix<f64> {
        &self.eigensystem.eigenvectors
    }

    /// Eigenvalues, non-increasing.
    pub fn eigenvalues(&self) -> &DVector<f64> {
        &self.eigensystem.eigenvalues
    }

    /// Number of leading rejections: the usual sequential rank estimate.
    pub fn estimated_rank(&self) -> usize {
        self.outcomes.iter().take_while(|o| o.rejected).count()
    }

    /// Whether any rank hypothesis r > 0 was rejected without all smaller
    /// ranks being rejected too.
    pub fn has_non_prefix_rejections(&self) -> bool {
        self.rejected_ranks.len() != self.estimated_rank()
    }
}

/// Johansen test over one series matrix and configuration.
#[derive(Debug, Clone)]
pub struct JohansenProcedure {
    x: DMatrix<f64>,
    config: JohansenConfig,
    tester: HypothesisTester,
}

impl JohansenProcedure {
    /// Validates the input and selects critical values.
    ///
    /// `x` is (n_obs × m), one row per time step. Fails with
    /// [`CointegrationError::Configuration`] when the table has no entry for
    /// the configured statistic and trend case.
    pub fn new(
        x: DMatrix<f64>,
        config: JohansenConfig,
        table: &CriticalValueTable,
    ) -> CointResult<Self> {
        validate_series(&x, config.min_observations())?;
        let (n_obs, m) = x.shape();

        let tester = HypothesisTester::new(table, &config, n_obs)?;
        let max_m = table.max_dimension(config.statistic, config.trend)?;
        if m > max_m {
            return Err(CointegrationError::InvalidParameter {
                parameter: "number of series".to_string(),
                value: m as f64,
                constraint: format!("at most {} series for the tabulated critical values", max_m),
            });
        }

        Ok(Self { x, config, tester })
    }

    /// Same as [`new`](Self::new), taking observation rows.
    pub fn from_rows(
        rows: &[Vec<f64>],
        config: JohansenConfig,
        table: &CriticalValueTable,
    ) -> CointResult<Self> {
        Self::new(series_matrix(rows)?, config, table)
    }

    /// The configuration this procedure runs with.
    pub fn config(&self) -> &JohansenConfig {
        &self.config
    }

    /// Cointegrating vectors and eigenvalues from reduced-rank regression.
    pub fn mle(&self) -> CointResult<Eigensystem> {
        let residuals = residualize(&self.x, &self.config)?;
        estimate(&residuals)
    }

    /// Whether the null "rank ≤ r" is rejected for the given eigenvalues.
    pub fn h_test(&self, eigenvalues: &[f64], r: usize) -> CointResult<bool> {
        self.tester.test(eigenvalues, r)
    }

    /// Runs the full procedure.
    pub fn run(&self) -> CointResult<JohansenResult> {
        let (n_obs, m) = self.x.shape();
        log::debug!(
            "johansen: n_obs = {}, m = {}, k = {}, model = {}, statistic = {:?}, level = {:?}",
            n_obs,
            m,
            self.config.lag_order,
            self.config.trend.model(),
            self.config.statistic,
            self.config.significance
        );

        let eigensystem = self.mle()?;
        let outcomes = self.tester.outcomes(eigensystem.eigenvalues.as_slice())?;
        let rejected_ranks = outcomes
            .iter()
            .filter(|o| o.rejected)
            .map(|o| o.rank)
            .collect();

        Ok(JohansenResult {
            eigensystem,
            outcomes,
            rejected_ranks,
        })
    }
}

/// Runs the Johansen test with the embedded Osterwald-Lenum critical values.
///
/// # Example
/// ```rust
/// use johansen_cointegration::{johansen, JohansenConfig};
/// use johansen_cointegration::generators::{cointegrated_pair, GeneratorConfig};
///
/// let x = cointegrated_pair(&GeneratorConfig { seed: Some(1), ..GeneratorConfig::default() }).unwrap();
/// let result = johansen(x, JohansenConfig::default()).unwrap();
/// assert!(result.rejected_ranks.contains(&0));
/// ```
pub fn johansen(x: DMatrix<f64>, config: JohansenConfig) -> CointResult<JohansenResult> {
    JohansenProcedure::new(x, config, CriticalValueTable::osterwald_lenum())?.run()
}
