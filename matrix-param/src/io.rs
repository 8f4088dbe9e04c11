use crate::traits::*;
use matrix_util::traits::IoOps;

/// Write the posterior summaries next to each other
///
/// * `{header}.mean.tsv`
/// * `{header}.sd.tsv`
/// * `{header}.log_mean.tsv`
pub trait ParamIo: Inference
where
    <Self as Inference>::Mat: IoOps,
{
    fn to_tsv(&self, header: &str) -> anyhow::Result<()> {
        self.posterior_mean()
            .to_tsv(&(header.to_string() + ".mean.tsv"))?;

        self.posterior_sd()
            .to_tsv(&(header.to_string() + ".sd.tsv"))?;

        self.posterior_log_mean()
            .to_tsv(&(header.to_string() + ".log_mean.tsv"))?;

        Ok(())
    }
}
