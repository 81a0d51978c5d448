//! Integration tests for error handling and degenerate inputs
//!
//! Every failure must surface as one specific `CointegrationError` variant,
//! never as a panic or a silently empty result.
//!
//! `SingularRegressor` and `NonPositiveDefinite` cannot be reached through
//! `JohansenProcedure::run`: input validation rules out the non-finite design
//! matrices that break the SVD, and the eigenvectors handed to the Cholesky
//! step are already Svv-orthonormal. Both are covered by the unit tests of
//! `pseudo_inverse` and `normalize_eigenvectors` instead.

use johansen_cointegration::generators::{random_walks, GeneratorConfig};
use johansen_cointegration::{
    johansen, CointegrationError, CriticalValueTable, DeterministicTrend, JohansenConfig,
    JohansenProcedure, StatisticKind,
};
use nalgebra::DMatrix;

fn walks(m: usize, length: usize) -> DMatrix<f64> {
    random_walks(
        m,
        &GeneratorConfig {
            length,
            seed: Some(31),
            ..GeneratorConfig::default()
        },
    )
    .unwrap()
}

/// Test scenario: fewer than k + 2 observations
///
/// Must fail before the eigendecomposition stage.
#[test]
fn test_insufficient_observations() {
    for lag_order in 1..=3 {
        let config = JohansenConfig::new(lag_order, DeterministicTrend::None).unwrap();
        let x = walks(2, lag_order + 1);
        match johansen(x, config) {
            Err(CointegrationError::InsufficientData { required, actual }) => {
                assert_eq!(required, lag_order + 2);
                assert_eq!(actual, lag_order + 1);
            }
            other => panic!("Expected InsufficientData error, got {:?}", other.map(|_| ())),
        }
    }
}

/// Test scenario: invalid raw configuration values
#[test]
fn test_invalid_configuration_values() {
    for (k, model, level) in [(0usize, 1u8, 1usize), (1, 5, 1), (1, 2, 3)] {
        assert!(
            matches!(
                JohansenConfig::from_raw(k, model, true, level),
                Err(CointegrationError::InvalidParameter { .. })
            ),
            "k={} model={} level={} should be rejected",
            k,
            model,
            level
        );
    }
}

/// Test scenario: table without an entry for the requested case
#[test]
fn test_missing_critical_values() {
    let table = CriticalValueTable::from_entries([("TRACE_0", "2.86 3.84 6.51")]).unwrap();
    let config = JohansenConfig::new(1, DeterministicTrend::None)
        .unwrap()
        .with_statistic(StatisticKind::MaxEigenvalue);
    match JohansenProcedure::new(walks(1, 50), config, &table) {
        Err(CointegrationError::Configuration { key }) => assert_eq!(key, "MAX_EVAL_0"),
        other => panic!("Expected Configuration error, got {:?}", other.map(|_| ())),
    }
}

/// Test scenario: perfectly collinear series
#[test]
fn test_collinear_series_singular_covariance() {
    let base = walks(1, 120);
    let x = DMatrix::from_fn(120, 2, |i, j| base[(i, 0)] * if j == 0 { 1.0 } else { 3.0 });
    assert!(matches!(
        johansen(x, JohansenConfig::default()),
        Err(CointegrationError::SingularCovariance { .. })
    ));
}

/// Test scenario: a constant series has zero differences
#[test]
fn test_constant_series_singular_covariance() {
    let base = walks(1, 80);
    let x = DMatrix::from_fn(80, 2, |i, j| if j == 0 { base[(i, 0)] } else { 5.0 });
    match johansen(x, JohansenConfig::new(1, DeterministicTrend::None).unwrap()) {
        Err(CointegrationError::SingularCovariance { .. }) => {}
        other => panic!("Expected SingularCovariance, got {:?}", other.map(|_| ())),
    }
}

/// Test scenario: non-finite observations
#[test]
fn test_non_finite_observations() {
    let rows = vec![vec![1.0, 2.0], vec![f64::INFINITY, 2.5], vec![1.2, 2.1]];
    assert!(matches!(
        JohansenProcedure::from_rows(
            &rows,
            JohansenConfig::default(),
            CriticalValueTable::osterwald_lenum()
        ),
        Err(CointegrationError::NumericalError { .. })
    ));
}

/// Test scenario: ragged and empty input rows
#[test]
fn test_malformed_rows() {
    let table = CriticalValueTable::osterwald_lenum();
    let ragged = vec![vec![1.0, 2.0], vec![1.5]];
    assert!(JohansenProcedure::from_rows(&ragged, JohansenConfig::default(), table).is_err());

    let empty: Vec<Vec<f64>> = Vec::new();
    assert!(JohansenProcedure::from_rows(&empty, JohansenConfig::default(), table).is_err());
}

/// Test scenario: more series than the critical-value table covers
#[test]
fn test_dimension_beyond_tables() {
    let x = walks(12, 400);
    assert!(matches!(
        johansen(x, JohansenConfig::default()),
        Err(CointegrationError::InvalidParameter { .. })
    ));
}
