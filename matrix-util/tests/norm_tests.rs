use approx::assert_abs_diff_eq;
use matrix_util::traits::{MatOps, SampleOps};
use nalgebra::DMatrix;

#[test]
fn scale_columns_test() {
    let mut xx = DMatrix::<f64>::rnorm(100, 10, 11) * 3.0;
    xx.add_scalar_mut(2.0);
    xx.scale_columns_inplace();

    for x_j in xx.column_iter() {
        let mu = x_j.mean();
        let var = x_j.map(|x| (x - mu) * (x - mu)).mean();
        assert_abs_diff_eq!(mu, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(var, 1.0, epsilon = 1e-12);
    }
}

#[test]
fn constant_column_is_only_centred() {
    let mut xx = DMatrix::from_row_slice(3, 2, &[1.0, 5.0, 2.0, 5.0, 3.0, 5.0]);
    xx.scale_columns_inplace();
    assert!(xx.column(1).iter().all(|&x| x == 0.0));
    assert_abs_diff_eq!(xx[(0, 0)], -xx[(2, 0)], epsilon = 1e-12);
}
