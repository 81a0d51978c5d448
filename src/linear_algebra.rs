//! Linear algebra operations for cointegration analysis
//!
//! This module provides the matrix routines the Johansen procedure chains
//! together: differencing and lag construction, SVD-based pseudo-inversion
//! for the auxiliary regressions, guarded inversion of residual moment
//! matrices, and Cholesky-based normalization and ordering of eigenvectors.

use crate::errors::{validate_all_finite, validate_data_length, CointResult, CointegrationError};
use nalgebra::{Cholesky, DMatrix, DVector, SVD};

/// Relative singular-value cutoff for the pseudo-inverse.
pub const PINV_RCOND: f64 = 1e-15;

/// Iteration cap for the SVD used by [`pseudo_inverse`].
pub const SVD_MAX_ITERATIONS: usize = 10_000;

/// Reciprocal condition number (σ_min / σ_max) of the scaled moment matrix
/// below which it is treated as singular.
pub const RCOND_TOLERANCE: f64 = 1e-13;

/// Coefficients smaller than this never decide an eigenvector's sign.
pub const SIGN_TOLERANCE: f64 = 1e-12;

/// Builds an (n_obs × m) matrix from observation rows, one row per time step.
///
/// Rejects empty or ragged input; content checks are left to [`validate_series`].
pub fn series_matrix(rows: &[Vec<f64>]) -> CointResult<DMatrix<f64>> {
    if rows.is_empty() {
        return Err(CointegrationError::NumericalError {
            reason: "Empty series matrix provided".to_string(),
            operation: Some("series_matrix".to_string()),
        });
    }

    let m = rows[0].len();
    if let Some(i) = rows.iter().position(|row| row.len() != m) {
        return Err(CointegrationError::NumericalError {
            reason: format!(
                "Ragged series matrix: observation {} has {} values, expected {}",
                i,
                rows[i].len(),
                m
            ),
            operation: Some("series_matrix".to_string()),
        });
    }

    Ok(DMatrix::from_fn(rows.len(), m, |i, j| rows[i][j]))
}

/// Checks an (n_obs × m) series matrix before any regression is built:
/// at least one series, at least `min_observations` rows, all values finite.
pub fn validate_series(x: &DMatrix<f64>, min_observations: usize) -> CointResult<()> {
    let (n_obs, m) = x.shape();
    if m == 0 {
        return Err(CointegrationError::NumericalError {
            reason: "Series matrix has no columns".to_string(),
            operation: Some("validate_series".to_string()),
        });
    }
    validate_data_length(n_obs, min_observations)?;

    validate_all_finite(x.as_slice(), "series matrix")
}

/// First differences along the time axis: row i is x[i + 1] − x[i].
pub fn first_differences(x: &DMatrix<f64>) -> DMatrix<f64> {
    let (n, m) = x.shape();
    DMatrix::from_fn(n.saturating_sub(1), m, |i, j| x[(i + 1, j)] - x[(i, j)])
}

/// Lagged-differences design matrix with `k` lags, trimmed to valid rows.
///
/// Row i holds `[dx[k+i-1], dx[k+i-2], …, dx[i]]`, the m columns of each lag
/// laid out side by side, so it lines up with `dx[k+i]`.
pub fn lagged_differences(dx: &DMatrix<f64>, k: usize) -> DMatrix<f64> {
    let (n, m) = dx.shape();
    let rows = n.saturating_sub(k);
    DMatrix::from_fn(rows, m * k, |i, c| {
        let lag = c / m + 1;
        dx[(k + i - lag, c % m)]
    })
}

/// Appends a column to the right of `a`.
pub fn append_column(a: DMatrix<f64>, column: &DVector<f64>) -> DMatrix<f64> {
    let n = a.ncols();
    let mut out = a.insert_column(n, 0.0);
    out.set_column(n, column);
    out
}

/// Moore–Penrose pseudo-inverse via SVD.
///
/// Singular values below `PINV_RCOND · σ_max` are treated as zero. Fails with
/// [`CointegrationError::SingularRegressor`] if the SVD does not converge or
/// the matrix contains non-finite values.
pub fn pseudo_inverse(a: &DMatrix<f64>) -> CointResult<DMatrix<f64>> {
    if a.iter().any(|v| !v.is_finite()) {
        return Err(CointegrationError::SingularRegressor {
            reason: "design matrix contains non-finite values".to_string(),
        });
    }

    let (rows, cols) = a.shape();
    if rows == 0 || cols == 0 {
        // pinv of an empty matrix is the empty transpose
        return Ok(DMatrix::zeros(cols, rows));
    }

    let svd = SVD::try_new(a.clone(), true, true, f64::EPSILON, SVD_MAX_ITERATIONS).ok_or(
        CointegrationError::SingularRegressor {
            reason: format!("SVD of {}x{} design matrix did not converge", rows, cols),
        },
    )?;

    let sigma_max = svd.singular_values.max();
    svd.pseudo_inverse(PINV_RCOND * sigma_max)
        .map_err(|e| CointegrationError::SingularRegressor {
            reason: e.to_string(),
        })
}

/// Cross-moment matrix aᵗ·b / t.
pub fn moment_matrix(a: &DMatrix<f64>, b: &DMatrix<f64>, t: usize) -> DMatrix<f64> {
    (a.transpose() * b) / t as f64
}

/// Inverts a residual moment matrix, failing with
/// [`CointegrationError::SingularCovariance`] when it is effectively singular.
///
/// Singularity is judged on the reciprocal condition number of the diagonally
/// scaled matrix D^{-1/2}·S·D^{-1/2}, so neither the units of the data nor
/// the number of series moves the threshold.
pub fn invert_covariance(s: &DMatrix<f64>, name: &str) -> CointResult<DMatrix<f64>> {
    let singular = || CointegrationError::SingularCovariance {
        matrix: name.to_string(),
    };

    if s.iter().any(|v| !v.is_finite()) {
        return Err(singular());
    }

    let n = s.nrows();
    let diag = s.diagonal();
    if diag.iter().any(|&d| d <= 0.0) {
        return Err(singular());
    }

    let scaled = DMatrix::from_fn(n, n, |i, j| s[(i, j)] / (diag[i] * diag[j]).sqrt());
    let svd = SVD::try_new(scaled, false, false, f64::EPSILON, SVD_MAX_ITERATIONS)
        .ok_or_else(singular)?;
    let sigma_max = svd.singular_values.max();
    let sigma_min = svd.singular_values.min();
    if sigma_min <= RCOND_TOLERANCE * sigma_max {
        log::debug!(
            "{} rejected as singular: rcond = {:.3e}",
            name,
            sigma_min / sigma_max
        );
        return Err(singular());
    }

    s.clone().try_inverse().ok_or_else(singular)
}

/// Rescales eigenvectors so that Eᵗ·Svv·E is the identity.
///
/// Computes the Cholesky factor L of Eᵗ·Svv·E and returns E·(Lᵗ)⁻¹.
pub fn normalize_eigenvectors(
    eigenvectors: &DMatrix<f64>,
    svv: &DMatrix<f64>,
) -> CointResult<DMatrix<f64>> {
    let gram = eigenvectors.transpose() * svv * eigenvectors;
    let gram = (&gram + gram.transpose()) * 0.5;

    let chol = Cholesky::new(gram).ok_or(CointegrationError::NonPositiveDefinite {
        reason: "Eᵗ·Svv·E is not positive definite".to_string(),
    })?;

    let lt_inv = chol.l().transpose().try_inverse().ok_or(
        CointegrationError::NonPositiveDefinite {
            reason: "Cholesky factor of Eᵗ·Svv·E is not invertible".to_string(),
        },
    )?;

    Ok(eigenvectors * lt_inv)
}

/// Reorders eigenvalues descending and permutes eigenvector columns jointly.
pub fn sort_eigenpairs_descending(
    eigenvalues: &DVector<f64>,
    eigenvectors: &DMatrix<f64>,
) -> (DVector<f64>, DMatrix<f64>) {
    let mut idx: Vec<usize> = (0..eigenvalues.len()).collect();
    idx.sort_by(|&a, &b| eigenvalues[b].total_cmp(&eigenvalues[a]));

    let sorted_values = DVector::from_iterator(idx.len(), idx.iter().map(|&i| eigenvalues[i]));
    let mut sorted_vectors = DMatrix::zeros(eigenvectors.nrows(), idx.len());
    for (new_col, &old_col) in idx.iter().enumerate() {
        sorted_vectors.set_column(new_col, &eigenvectors.column(old_col));
    }

    (sorted_values, sorted_vectors)
}

/// Flips each column so its first coefficient with |x| > `SIGN_TOLERANCE` is positive.
pub fn canonicalize_signs(vectors: &mut DMatrix<f64>) {
    for mut column in vectors.column_iter_mut() {
        let leading = column.iter().copied().find(|v| v.abs() > SIGN_TOLERANCE);
        if matches!(leading, Some(v) if v < 0.0) {
            column.neg_mut();
        }
    }
}
