use crate::vb_errors::{VbError, VbResult};
use serde::Serialize;

/// Prior hyperparameters and stopping rules of a fit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct VbOptions {
    /// Shape of the Gamma prior on the noise precision τ. Default: 1e-2
    pub a0: f64,
    /// Rate of the Gamma prior on the noise precision τ. Default: 1e-4
    pub b0: f64,
    /// Shape of the Gamma prior on the coefficient precision α. Default: 1e-2
    pub c0: f64,
    /// Rate of the Gamma prior on the coefficient precision α. Default: 1e-4
    pub d0: f64,
    /// Stop once the ELBO changes by no more than this. Default: 1e-8
    pub tol: f64,
    /// Maximum number of coordinate ascent iterations. Default: 1000
    pub max_iter: usize,
    /// One precision per coefficient (ARD) instead of a shared one. Default: false
    pub ard: bool,
}

impl Default for VbOptions {
    fn default() -> Self {
        VbOptions {
            a0: 1e-2,
            b0: 1e-4,
            c0: 1e-2,
            d0: 1e-4,
            tol: 1e-8,
            max_iter: 1000,
            ard: false,
        }
    }
}

impl VbOptions {
    pub fn validate(&self) -> VbResult<()> {
        let positive = [
            ("a0", self.a0),
            ("b0", self.b0),
            ("c0", self.c0),
            ("d0", self.d0),
            ("tol", self.tol),
        ];

        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(VbError::InvalidInput(format!(
                    "{} must be positive and finite, found {}",
                    name, value
                )));
            }
        }

        if self.max_iter == 0 {
            return Err(VbError::InvalidInput(
                "max_iter must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        assert!(VbOptions::default().validate().is_ok());
    }

    #[test]
    fn rejects_non_positive_values() {
        let bad = [
            VbOptions { a0: 0.0, ..VbOptions::default() },
            VbOptions { b0: -1.0, ..VbOptions::default() },
            VbOptions { c0: f64::NAN, ..VbOptions::default() },
            VbOptions { d0: f64::INFINITY, ..VbOptions::default() },
            VbOptions { tol: 0.0, ..VbOptions::default() },
            VbOptions { max_iter: 0, ..VbOptions::default() },
        ];
        for options in bad {
            assert!(matches!(options.validate(), Err(VbError::InvalidInput(_))));
        }
    }
}
