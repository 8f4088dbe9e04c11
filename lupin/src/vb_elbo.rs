//! Evidence lower bound of the mean-field posterior
//! `q(w, τ) q(α)`:
//!
//! ```text
//! L = -N/2 log(2π) - 1/2 (E[τ] ‖y - Xw‖² + Σ (XᵀX ⊙ V))
//!     + 1/2 log|V| + D/2
//!     - lnΓ(a0) + a0 log(b0) - b0 E[τ] + lnΓ(a_N) - a_N log(b_N) + a_N
//!     - lnΓ(c0) + c0 log(d0) + lnΓ(c_N) - Σ_g c_N log(d_N[g])
//! ```
//!
//! The last sum runs over precision groups: a single term without
//! ARD, one term per coefficient with ARD.

use matrix_param::dvector_gamma::GammaVector;
use matrix_param::traits::Inference;
use nalgebra::DMatrix;
use special::Gamma as SpecialGamma;

/// Everything the bound needs from one iteration
pub struct ElboTerms<'a> {
    /// number of observations N
    pub nobs: usize,
    /// `‖y - Xw‖²` at the current `w`
    pub rss: f64,
    /// `XᵀX`
    pub xx: &'a DMatrix<f64>,
    /// `V`
    pub v: &'a DMatrix<f64>,
    /// `log|V|`
    pub log_det_v: f64,
    /// `q(τ)`
    pub noise: &'a GammaVector,
    /// `q(α)`
    pub alpha: &'a GammaVector,
}

#[inline]
fn ln_gamma(x: f64) -> f64 {
    SpecialGamma::ln_gamma(x).0
}

/// `-lnΓ(a0) + a0 log(b0)`
#[inline]
fn prior_normalizer(param: &GammaVector) -> f64 {
    let (a0, b0) = (param.prior_shape(), param.prior_rate());
    -ln_gamma(a0) + a0 * b0.ln()
}

pub fn evidence_lower_bound(terms: &ElboTerms) -> f64 {
    let nn = terms.nobs as f64;
    let dd = terms.v.nrows() as f64;

    let e_tau = terms.noise.posterior_mean()[0];
    let a_n = terms.noise.shape()[0];
    let b_n = terms.noise.rate()[0];

    // Σ_ij XX[i,j] V[i,j]
    let trace_xxv = terms.xx.dot(terms.v);

    let llik = -0.5 * nn * std::f64::consts::TAU.ln() - 0.5 * (e_tau * terms.rss + trace_xxv);

    let coef_entropy = 0.5 * terms.log_det_v + 0.5 * dd;

    let noise_kl = prior_normalizer(terms.noise) - terms.noise.prior_rate() * e_tau
        + ln_gamma(a_n)
        - a_n * b_n.ln()
        + a_n;

    // every group shares the same posterior shape c_N
    let c_n = terms.alpha.shape()[0];
    let alpha_kl = prior_normalizer(terms.alpha) + ln_gamma(c_n)
        - terms
            .alpha
            .shape()
            .iter()
            .zip(terms.alpha.rate().iter())
            .map(|(c, d)| c * d.ln())
            .sum::<f64>();

    llik + coef_entropy + noise_kl + alpha_kl
}
