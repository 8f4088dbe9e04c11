use nalgebra::DMatrix;

/// Prepend a column of ones: `[1, X]`, so `D = ncol(X) + 1` and the
/// intercept is the first coefficient.
pub fn add_intercept(x: &DMatrix<f64>) -> DMatrix<f64> {
    x.clone().insert_column(0, 1.0)
}
