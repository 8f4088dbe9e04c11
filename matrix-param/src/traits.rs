/// Posterior summaries of a vector of parameters
pub trait Inference {
    type Mat;
    type Scalar;

    fn posterior_mean(&self) -> &Self::Mat;
    fn posterior_sd(&self) -> &Self::Mat;
    fn posterior_log_mean(&self) -> &Self::Mat;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A parameter vector with two types of statistics
/// with hyper parameters a0 and b0
pub trait TwoStatParam {
    type Mat;
    type Scalar;

    fn new(dim: usize, a0: Self::Scalar, b0: Self::Scalar) -> Self;

    /// `a += add_a`, `b += add_b`
    fn add_stat(&mut self, add_a: &Self::Mat, add_b: &Self::Mat);

    /// `a = a0 + update_a`, `b = b0 + update_b`
    fn update_stat(&mut self, update_a: &Self::Mat, update_b: &Self::Mat);

    /// `a = a0`, `b = b0`
    fn reset_stat(&mut self);

    fn calibrate(&mut self);
    fn map_calibrate_mean(&mut self);
    fn map_calibrate_sd(&mut self);
    fn map_calibrate_log_mean(&mut self);
}
