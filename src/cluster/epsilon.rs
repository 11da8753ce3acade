//! Sampled estimate of a neighborhood radius.
//!
//! When no epsilon is supplied, a "typical" inter-document distance is taken
//! as the mean over `H × H` cross pairs: `H` documents drawn from the lower
//! half of the index range and `H` from the upper half. This costs `O(H²)`
//! comparisons regardless of corpus size, at the price of depending on the
//! random draw. Pass a seeded RNG for reproducible estimates.

use rand::Rng;
use tracing::info;

use super::metric::{check_dims, kernel_for};
use crate::config::{Method, Metric};
use crate::corpus::VectorAccessor;
use crate::error::{Error, Result};
use crate::progress::Progress;

/// Documents drawn from each half of the corpus by default.
pub const DEFAULT_SAMPLE_SIZE: usize = 50;

/// Outcome of an estimation: the epsilon plus the sample it was derived from.
#[derive(Debug, Clone, PartialEq)]
pub struct EpsilonSample {
    /// Mean of `distances`.
    pub epsilon: f32,
    /// Indices drawn from `[0, n/2)`.
    pub lower: Vec<usize>,
    /// Indices drawn from `[n/2, n)`.
    pub upper: Vec<usize>,
    /// Row-major `lower × upper` comparisons.
    pub distances: Vec<f32>,
}

/// Estimates epsilon from random cross-half document pairs.
#[derive(Debug, Clone)]
pub struct EpsilonEstimator {
    method: Method,
    metric: Metric,
    sample_size: usize,
}

impl EpsilonEstimator {
    /// Estimator for `method` vectors compared under `metric`.
    pub fn new(method: Method, metric: Metric) -> Self {
        Self {
            method,
            metric,
            sample_size: DEFAULT_SAMPLE_SIZE,
        }
    }

    /// Set the number of documents drawn from each half.
    pub fn with_sample_size(mut self, sample_size: usize) -> Self {
        self.sample_size = sample_size;
        self
    }

    /// Draw the sample and compute its mean.
    ///
    /// Fails with [`Error::EmptyCorpus`] for zero documents and with
    /// [`Error::InvalidConfiguration`] when there are fewer than two documents
    /// or the sample size is zero.
    pub fn estimate<V, R>(
        &self,
        vectors: &V,
        rng: &mut R,
        progress: &mut dyn Progress,
    ) -> Result<EpsilonSample>
    where
        V: VectorAccessor + ?Sized,
        R: Rng,
    {
        let n = vectors.n_docs();
        if n == 0 {
            return Err(Error::EmptyCorpus);
        }
        if n < 2 {
            return Err(Error::invalid(
                "n_docs",
                "epsilon estimation needs at least 2 documents",
            ));
        }
        if self.sample_size == 0 {
            return Err(Error::invalid("sample_size", "must be at least 1"));
        }

        let half = n / 2;
        let h = self.sample_size;
        let mut lower = Vec::with_capacity(h);
        let mut upper = Vec::with_capacity(h);
        for _ in 0..h {
            lower.push(rng.random_range(0..half));
            upper.push(rng.random_range(half..n));
        }

        info!(
            method = %self.method,
            n_docs = n,
            pairs = h * h,
            "estimating epsilon"
        );

        let kernel = kernel_for(self.method, self.metric);
        let total = h * h;
        let mut distances = Vec::with_capacity(total);
        for &a in &lower {
            let va = vectors.require(a, self.method)?;
            for &b in &upper {
                let vb = vectors.require(b, self.method)?;
                check_dims(va, vb)?;
                distances.push(kernel.apply(va, vb));
                progress.on_sample(distances.len(), total);
            }
        }
        progress.on_samples(&distances);

        let sum: f64 = distances.iter().map(|&d| f64::from(d)).sum();
        let epsilon = (sum / distances.len() as f64) as f32;

        info!(method = %self.method, epsilon, "estimated epsilon");

        Ok(EpsilonSample {
            epsilon,
            lower,
            upper,
            distances,
        })
    }
}
