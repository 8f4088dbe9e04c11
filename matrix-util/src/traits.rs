/// Standardize columns
pub trait MatOps {
    fn scale_columns_inplace(&mut self);
}

/// Operations to sample random matrices with a fixed seed so that
/// the same seed always yields the same matrix
pub trait SampleOps {
    type Mat;
    type Scalar;

    /// Sample a matrix from a normal distribution `N(0,1)`
    fn rnorm(nrows: usize, ncols: usize, seed: u64) -> Self::Mat;
}

/// Symmetric positive-definite matrix routines
pub trait SpdOps {
    type Mat;
    type Scalar;

    /// Invert a symmetric positive-definite matrix through its
    /// Cholesky factor `L`, returning the inverse together with
    /// `log det(self) = 2 Σ log L[i,i]`.
    ///
    /// Returns `None` if the matrix is not numerically positive-definite.
    fn spd_inverse_logdet(&self) -> Option<(Self::Mat, Self::Scalar)>;

    /// Add `diag` to the diagonal, `self + diag(diag)`
    fn add_diagonal(&self, diag: &[Self::Scalar]) -> Self::Mat;
}

/// Read and write matrices from and to files
pub trait IoOps {
    type Scalar;
    type Mat;

    /// Read a dense matrix, one row per line
    ///
    /// * `file` - file name--either gzipped or not
    /// * `delim` - field separator
    /// * `skip` - index of a header line to skip (`None`: no header)
    fn read_file_delim(
        file: &str,
        delim: &str,
        skip: Option<usize>,
    ) -> anyhow::Result<Self::Mat>;

    fn from_tsv(tsv_file: &str, skip: Option<usize>) -> anyhow::Result<Self::Mat> {
        Self::read_file_delim(tsv_file, "\t", skip)
    }

    fn write_file_delim(&self, file: &str, delim: &str) -> anyhow::Result<()>;

    fn to_tsv(&self, tsv_file: &str) -> anyhow::Result<()> {
        self.write_file_delim(tsv_file, "\t")
    }

    fn to_csv(&self, csv_file: &str) -> anyhow::Result<()> {
        self.write_file_delim(csv_file, ",")
    }
}
