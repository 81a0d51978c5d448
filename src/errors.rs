//! Error types and validation functions for cointegration testing.
//!
//! Every stage of the Johansen procedure reports failure through
//! [`CointegrationError`]. A run either succeeds completely or fails with the
//! one variant that names the violated numerical precondition; no partial
//! eigensystem or rejection set is ever returned.

use thiserror::Error;

/// Error types for the Johansen procedure and its building blocks.
#[derive(Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum CointegrationError {
    /// No critical-value entry exists for the requested statistic and model case.
    #[error("Configuration error: no critical values tabulated for {key}")]
    Configuration {
        /// Table key in `<STATKIND>_<MODEL>` form
        key: String,
    },

    /// The auxiliary regression design matrix could not be pseudo-inverted.
    #[error("Singular regressor: {reason}")]
    SingularRegressor {
        /// Why the pseudo-inverse failed
        reason: String,
    },

    /// A residual moment matrix (Svv or Suu) is not invertible.
    #[error("Singular covariance: {matrix} is not invertible")]
    SingularCovariance {
        /// Name of the offending moment matrix
        matrix: String,
    },

    /// Cholesky factorization of Eᵗ·Svv·E failed during eigenvector normalization.
    #[error("Non-positive-definite matrix: {reason}")]
    NonPositiveDefinite {
        /// Details of the failed factorization
        reason: String,
    },

    /// Not enough observations for the requested lag order.
    #[error("Insufficient data: need at least {required} observations, got {actual}")]
    InsufficientData {
        /// Minimum required observations
        required: usize,
        /// Observations actually supplied
        actual: usize,
    },

    /// A configuration value is outside its admissible range.
    #[error("Invalid parameter: {parameter} = {value}, expected {constraint}")]
    InvalidParameter {
        /// Parameter name
        parameter: String,
        /// Offending value
        value: f64,
        /// Admissible range or constraint description
        constraint: String,
    },

    /// Input data or an intermediate result is unusable (non-finite, misshapen).
    #[error("Numerical computation failed: {reason}")]
    NumericalError {
        /// Detailed reason for the failure
        reason: String,
        /// Operation that failed
        operation: Option<String>,
    },
}

/// Result type for cointegration operations.
pub type CointResult<T> = Result<T, CointegrationError>;

/// Validates that a sample has at least `min_required` observations.
///
/// # Example
/// ```rust
/// use johansen_cointegration::errors::validate_data_length;
///
/// assert!(validate_data_length(10, 3).is_ok());
/// assert!(validate_data_length(2, 3).is_err());
/// ```
pub fn validate_data_length(n_obs: usize, min_required: usize) -> CointResult<()> {
    if n_obs < min_required {
        Err(CointegrationError::InsufficientData {
            required: min_required,
            actual: n_obs,
        })
    } else {
        Ok(())
    }
}

/// Validates that an integer-valued parameter lies within `[min, max]`.
///
/// # Example
/// ```rust
/// use johansen_cointegration::errors::validate_parameter;
///
/// assert!(validate_parameter(2, 0, 4, "model").is_ok());
/// assert!(validate_parameter(5, 0, 4, "model").is_err());
/// ```
pub fn validate_parameter(value: usize, min: usize, max: usize, name: &str) -> CointResult<()> {
    if value < min || value > max {
        Err(CointegrationError::InvalidParameter {
            parameter: name.to_string(),
            value: value as f64,
            constraint: format!("[{}, {}]", min, max),
        })
    } else {
        Ok(())
    }
}

/// Validates that all values in a slice are finite.
///
/// Returns on the first NaN or infinite value, reporting its index.
///
/// # Example
/// ```rust
/// use johansen_cointegration::errors::validate_all_finite;
///
/// assert!(validate_all_finite(&[1.0, 2.0], "x").is_ok());
/// assert!(validate_all_finite(&[1.0, f64::NAN], "x").is_err());
/// ```
pub fn validate_all_finite(data: &[f64], name: &str) -> CointResult<()> {
    if let Some((i, &value)) = data.iter().enumerate().find(|(_, v)| !v.is_finite()) {
        let value_desc = if value.is_nan() {
            "NaN".to_string()
        } else if value.is_sign_positive() {
            "Infinity".to_string()
        } else {
            "-Infinity".to_string()
        };

        return Err(CointegrationError::NumericalError {
            reason: format!(
                "{} contains non-finite value at index {}: {}",
                name, i, value_desc
            ),
            operation: None,
        });
    }

    Ok(())
}
