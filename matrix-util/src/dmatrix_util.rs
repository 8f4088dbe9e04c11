pub use nalgebra::{DMatrix, DVector};
pub use rand::rngs::StdRng;
pub use rand::{Rng, SeedableRng};
pub use rand_distr::StandardNormal;
pub use rayon::prelude::*;

use crate::traits::*;

/// Each column draws from its own generator seeded by `seed + j`,
/// so columns can be filled in parallel and still be reproducible.
fn sample_columns<F>(nrows: usize, ncols: usize, seed: u64, draw: F) -> DMatrix<f64>
where
    F: Fn(&mut StdRng) -> f64 + Sync,
{
    let columns: Vec<Vec<f64>> = (0..ncols)
        .into_par_iter()
        .map(|j| {
            let mut rng = StdRng::seed_from_u64(seed.wrapping_add(j as u64));
            (0..nrows).map(|_| draw(&mut rng)).collect()
        })
        .collect();

    DMatrix::from_iterator(nrows, ncols, columns.into_iter().flatten())
}

impl SampleOps for DMatrix<f64> {
    type Mat = Self;
    type Scalar = f64;

    fn rnorm(nrows: usize, ncols: usize, seed: u64) -> Self::Mat {
        sample_columns(nrows, ncols, seed, |rng| rng.sample(StandardNormal))
    }
}

impl MatOps for DMatrix<f64> {
    /// X[,j] = (X[,j] - mean) / sd, or just centred if sd == 0
    fn scale_columns_inplace(&mut self) {
        let nn = self.nrows() as f64;
        if nn < 1.0 {
            return;
        }
        for mut x_j in self.column_iter_mut() {
            let mu = x_j.sum() / nn;
            x_j.add_scalar_mut(-mu);
            let sig = (x_j.norm_squared() / nn).sqrt();
            if sig > 0.0 {
                x_j /= sig;
            }
        }
    }
}

impl SpdOps for DMatrix<f64> {
    type Mat = Self;
    type Scalar = f64;

    fn spd_inverse_logdet(&self) -> Option<(Self::Mat, Self::Scalar)> {
        if !self.is_square() || self.iter().any(|x| !x.is_finite()) {
            return None;
        }

        let chol = self.clone().cholesky()?;

        // nalgebra accepts a zero pivot and then divides by it
        let l_diag = chol.l_dirty().diagonal();
        if l_diag.iter().any(|&l| !(l.is_finite() && l > 0.0)) {
            return None;
        }

        let logdet = 2.0 * l_diag.iter().map(|l| l.ln()).sum::<f64>();
        let inv = chol.inverse();

        if inv.iter().all(|x| x.is_finite()) {
            Some((inv, logdet))
        } else {
            None
        }
    }

    fn add_diagonal(&self, diag: &[f64]) -> Self::Mat {
        let mut ret = self.clone();
        for (i, &d) in diag.iter().enumerate().take(ret.nrows().min(ret.ncols())) {
            ret[(i, i)] += d;
        }
        ret
    }
}
