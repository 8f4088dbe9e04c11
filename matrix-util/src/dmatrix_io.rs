use crate::common_io::{read_lines_of_types, write_lines};
use crate::traits::*;
pub use nalgebra::{DMatrix, DVector};

use std::fmt::Display;
use std::str::FromStr;

impl<T> IoOps for DMatrix<T>
where
    T: nalgebra::Scalar + Send + Sync + FromStr + Display + Copy,
    <T as FromStr>::Err: Display,
{
    type Scalar = T;
    type Mat = Self;

    fn read_file_delim(
        file: &str,
        delim: &str,
        skip: Option<usize>,
    ) -> anyhow::Result<Self::Mat> {
        let data = read_lines_of_types::<T>(file, delim, skip)?.lines;

        if data.is_empty() {
            return Err(anyhow::anyhow!("No data in file {}", file));
        }

        let nrows = data.len();
        let ncols = data[0].len();

        if let Some((i, row)) = data.iter().enumerate().find(|(_, row)| row.len() != ncols) {
            return Err(anyhow::anyhow!(
                "{}: row {} has {} fields, expected {}",
                file,
                i + 1,
                row.len(),
                ncols
            ));
        }

        let data = data.into_iter().flatten().collect::<Vec<_>>();

        Ok(DMatrix::<T>::from_row_iterator(nrows, ncols, data))
    }

    fn write_file_delim(&self, file: &str, delim: &str) -> anyhow::Result<()> {
        // keep it sequential to preserve the order of rows
        let lines = self
            .row_iter()
            .map(|row| {
                row.iter()
                    .map(|x| format!("{}", *x))
                    .collect::<Vec<String>>()
                    .join(delim)
                    .into_boxed_str()
            })
            .collect::<Vec<_>>();

        write_lines(&lines, file)?;
        Ok(())
    }
}

impl<T> IoOps for DVector<T>
where
    T: nalgebra::Scalar + Send + Sync + FromStr + Display + Copy,
    <T as FromStr>::Err: Display,
{
    type Scalar = T;
    type Mat = Self;

    /// A column vector may be written one value per line or as a
    /// single row
    fn read_file_delim(
        file: &str,
        delim: &str,
        skip: Option<usize>,
    ) -> anyhow::Result<Self::Mat> {
        let mat = DMatrix::<T>::read_file_delim(file, delim, skip)?;
        match mat.shape() {
            (_, 1) | (1, _) => Ok(DVector::from_iterator(mat.len(), mat.iter().copied())),
            (nr, nc) => Err(anyhow::anyhow!(
                "{}: expected a single column, found {} x {}",
                file,
                nr,
                nc
            )),
        }
    }

    fn write_file_delim(&self, file: &str, _delim: &str) -> anyhow::Result<()> {
        let lines = self
            .iter()
            .map(|x| format!("{}", *x).into_boxed_str())
            .collect::<Vec<_>>();
        write_lines(&lines, file)
    }
}
