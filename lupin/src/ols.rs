use crate::vb_errors::{VbError, VbResult};
use matrix_util::traits::SpdOps;
use nalgebra::{DMatrix, DVector};

/// Ordinary least squares estimates
#[derive(Debug, Clone)]
pub struct OlsFit {
    /// `(XᵀX)⁻¹ Xᵀy`
    pub coef: DVector<f64>,
    /// `sqrt(RSS / (N - D))`, `NaN` if `N <= D`
    pub sigma: f64,
}

/// Reference least squares fit on the same design matrix.
///
/// Fails with [`VbError::SingularSystem`] (iteration 0) when `XᵀX` is
/// rank deficient, e.g. `D > N`.
pub fn ols(x: &DMatrix<f64>, y: &DVector<f64>) -> VbResult<OlsFit> {
    if x.nrows() != y.len() {
        return Err(VbError::InvalidInput(format!(
            "predictor matrix has {} rows but the response has {} entries",
            x.nrows(),
            y.len()
        )));
    }

    let (xx_inv, _) = x
        .tr_mul(x)
        .spd_inverse_logdet()
        .ok_or(VbError::SingularSystem { iteration: 0 })?;

    let coef = xx_inv * x.tr_mul(y);
    let rss = (y - x * &coef).norm_squared();

    let (nn, dd) = x.shape();
    let sigma = if nn > dd {
        (rss / (nn - dd) as f64).sqrt()
    } else {
        f64::NAN
    };

    Ok(OlsFit { coef, sigma })
}
