use crate::error::Result;

/// Labels a set of rows in one call.
///
/// Each row is taken as the dense representation of one document, so
/// `data[i]` gets label `i` of the output.
pub trait Clustering {
    /// Cluster `data`, returning one cluster id per row.
    fn fit_predict(&self, data: &[Vec<f32>]) -> Result<Vec<usize>>;

    /// Cluster count fixed up front, or 0 when it is only known after a fit.
    fn n_clusters(&self) -> usize;
}
