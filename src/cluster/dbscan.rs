//! Density-based clustering of document vectors with single-hop expansion.
//!
//! # The Algorithm
//!
//! A variant of DBSCAN (Ester et al., 1996) driven by one forward scan over the
//! corpus:
//!
//! 1. For each document that no cluster has claimed yet, query its neighbors
//!    among the *unclaimed* documents.
//! 2. If more than `min_pts` neighbors are found, the document seeds a new
//!    cluster: it and every returned neighbor take the new id. The seed is then
//!    queried once more and any further unclaimed neighbors join as well.
//! 3. Otherwise the document is recorded as noise. It stays unclaimed, so a
//!    later seed may still pull it into a cluster.
//!
//! ## Differences from canonical DBSCAN
//!
//! - Expansion stops after the extra hop from the seed. Border points that are
//!   themselves dense do not grow the cluster further, so a chain of points
//!   splits into several clusters instead of one.
//! - Points already claimed by a cluster are invisible to later neighbor
//!   queries; clusters never merge.
//! - A core point needs strictly more than `min_pts` neighbors, not counting
//!   itself.
//!
//! ## Complexity
//!
//! - **Time**: O(n²) comparisons (one or two linear scans per visited point).
//! - **Space**: O(n) for labels.
//!
//! There is no spatial index; this targets small-to-medium corpora.

use rand::prelude::*;
use tracing::{debug, info, warn};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use super::assignment::{ClusterAssignment, Label};
use super::epsilon::{EpsilonEstimator, EpsilonSample, DEFAULT_SAMPLE_SIZE};
use super::metric::{check_dims, kernel_for, Kernel};
use super::traits::Clustering;
use crate::config::{Method, Metric};
use crate::corpus::VectorAccessor;
use crate::error::{Error, Result};
use crate::progress::{ConsoleProgress, Progress, Silent};

/// Label returned by [`Clustering::fit_predict`] for noise points.
pub const NOISE: usize = usize::MAX;

/// Density-based document clusterer.
#[derive(Debug, Clone)]
pub struct FlingDbscan {
    /// Neighborhood threshold; estimated when `None`.
    epsilon: Option<f32>,
    /// Neighborhood size a core point must strictly exceed.
    min_pts: usize,
    method: Method,
    metric: Metric,
    sample_size: usize,
    seed: Option<u64>,
    progress: bool,
}

impl FlingDbscan {
    /// Create a clusterer on dense vectors with Euclidean distance.
    ///
    /// Epsilon is estimated from the data unless set with
    /// [`with_epsilon`](Self::with_epsilon).
    pub fn new(min_pts: usize) -> Self {
        Self {
            epsilon: None,
            min_pts,
            method: Method::Dense,
            metric: Metric::Distance,
            sample_size: DEFAULT_SAMPLE_SIZE,
            seed: None,
            progress: false,
        }
    }

    /// Set epsilon (neighborhood threshold).
    pub fn with_epsilon(mut self, epsilon: f32) -> Self {
        self.epsilon = Some(epsilon);
        self
    }

    /// Set minimum points for core classification.
    pub fn with_min_pts(mut self, min_pts: usize) -> Self {
        self.min_pts = min_pts;
        self
    }

    /// Set the vector representation to cluster on.
    pub fn with_method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    /// Set the comparison metric.
    pub fn with_metric(mut self, metric: Metric) -> Self {
        self.metric = metric;
        self
    }

    /// Set the per-half sample size used for epsilon estimation.
    pub fn with_sample_size(mut self, sample_size: usize) -> Self {
        self.sample_size = sample_size;
        self
    }

    /// Seed the epsilon sampler.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Draw progress bars and the epsilon histogram on stdout.
    pub fn with_progress(mut self, progress: bool) -> Self {
        self.progress = progress;
        self
    }

    /// Configured epsilon, if any.
    pub fn epsilon(&self) -> Option<f32> {
        self.epsilon
    }

    /// Configured `min_pts`.
    pub fn min_pts(&self) -> usize {
        self.min_pts
    }

    /// Configured representation.
    pub fn method(&self) -> Method {
        self.method
    }

    /// Configured metric.
    pub fn metric(&self) -> Metric {
        self.metric
    }

    /// The kernel actually applied for this method/metric pair.
    pub fn kernel(&self) -> Kernel {
        kernel_for(self.method, self.metric)
    }

    /// Check parameters that do not depend on the data.
    pub fn validate(&self) -> Result<()> {
        if let Some(eps) = self.epsilon {
            check_epsilon(eps)?;
        }
        if self.sample_size == 0 {
            return Err(Error::invalid("sample_size", "must be at least 1"));
        }
        Ok(())
    }

    fn estimator(&self) -> EpsilonEstimator {
        EpsilonEstimator::new(self.method, self.metric).with_sample_size(self.sample_size)
    }

    fn rng(&self) -> Box<dyn RngCore> {
        match self.seed {
            Some(s) => Box::new(StdRng::seed_from_u64(s)),
            None => Box::new(rand::rng()),
        }
    }

    fn observer(&self) -> Box<dyn Progress> {
        if self.progress {
            Box::new(ConsoleProgress::stdout())
        } else {
            Box::new(Silent)
        }
    }

    /// Estimate epsilon using the configured seed and progress setting.
    pub fn estimate_epsilon<V>(&self, vectors: &V) -> Result<f32>
    where
        V: VectorAccessor + ?Sized,
    {
        let mut rng = self.rng();
        let mut observer = self.observer();
        self.estimate_epsilon_with(vectors, &mut rng, observer.as_mut())
            .map(|s| s.epsilon)
    }

    /// Estimate epsilon with an injected random source and observer.
    pub fn estimate_epsilon_with<V, R>(
        &self,
        vectors: &V,
        rng: &mut R,
        progress: &mut dyn Progress,
    ) -> Result<EpsilonSample>
    where
        V: VectorAccessor + ?Sized,
        R: Rng,
    {
        self.validate()?;
        self.estimator().estimate(vectors, rng, progress)
    }

    /// A neighbor query bound to `vectors` and `epsilon`.
    pub fn neighbor_query<'a, V>(&self, vectors: &'a V, epsilon: f32) -> NeighborQuery<'a, V>
    where
        V: VectorAccessor + ?Sized,
    {
        NeighborQuery {
            vectors,
            method: self.method,
            metric: self.metric,
            kernel: self.kernel(),
            epsilon,
            min_pts: self.min_pts,
        }
    }

    /// One clustering pass over `vectors` with a fixed `epsilon`.
    ///
    /// `assignment` must hold one entry per document and is mutated in place;
    /// documents already labeled on entry are skipped. On error the
    /// assignment is left partially updated and should be discarded.
    /// A negative or non-finite `epsilon` is rejected before any work.
    pub fn run_clustering<V>(
        &self,
        vectors: &V,
        epsilon: f32,
        assignment: &mut ClusterAssignment,
        progress: &mut dyn Progress,
    ) -> Result<ClusterPass>
    where
        V: VectorAccessor + ?Sized,
    {
        check_epsilon(epsilon)?;
        let n = vectors.n_docs();
        if n == 0 {
            return Err(Error::EmptyCorpus);
        }
        if assignment.len() != n {
            return Err(Error::invalid(
                "assignment",
                format!("holds {} labels for {n} documents", assignment.len()),
            ));
        }

        info!(
            method = %self.method,
            metric = %self.kernel().metric(),
            epsilon,
            min_pts = self.min_pts,
            n_docs = n,
            "initiating clustering"
        );

        let query = self.neighbor_query(vectors, epsilon);
        let mut noise: Vec<usize> = Vec::new();
        let mut cluster_count = 0usize;

        for k in 0..n {
            if assignment.is_unassigned(k) {
                match query.find_neighbors_of(k, assignment)? {
                    None => noise.push(k),
                    Some(mut neighbors) => {
                        let cluster = cluster_count;
                        cluster_count += 1;

                        assignment.assign(k, cluster);
                        for &nb in &neighbors {
                            if assignment.is_unassigned(nb) {
                                assignment.assign(nb, cluster);
                            }
                        }

                        // One extra hop from the seed, not a closure over the new members.
                        if let Some(inner) = query.find_neighbors_of(k, assignment)? {
                            for nb in inner {
                                assignment.assign(nb, cluster);
                                neighbors.push(nb);
                            }
                        }

                        let size = neighbors.len() + 1;
                        debug!(cluster, size, seed = k, "cluster formed");
                        progress.on_cluster(cluster, size);
                    }
                }
            }
            progress.on_document(k + 1, n);
        }

        // Noise recorded early may have been claimed by a later seed.
        noise.retain(|&i| assignment.is_unassigned(i));

        info!(
            clusters = cluster_count,
            noise = noise.len(),
            "clustering complete"
        );

        Ok(ClusterPass {
            cluster_count,
            noise,
        })
    }

    /// Estimate epsilon if needed, then cluster.
    ///
    /// Uses the configured seed for sampling (OS entropy when unseeded) and
    /// the configured progress setting.
    pub fn fit<V>(&self, vectors: &V) -> Result<DbscanFit>
    where
        V: VectorAccessor + ?Sized,
    {
        let mut rng = self.rng();
        let mut observer = self.observer();
        self.fit_with(vectors, &mut rng, observer.as_mut())
    }

    /// Like [`fit`](Self::fit), with an injected random source and observer.
    pub fn fit_with<V, R>(
        &self,
        vectors: &V,
        rng: &mut R,
        progress: &mut dyn Progress,
    ) -> Result<DbscanFit>
    where
        V: VectorAccessor + ?Sized,
        R: Rng,
    {
        self.validate()?;
        let n = vectors.n_docs();
        if n == 0 {
            return Err(Error::EmptyCorpus);
        }

        let kernel = self.kernel();
        if kernel.metric() != self.metric {
            warn!(
                method = %self.method,
                requested = %self.metric,
                applied = %kernel.metric(),
                "similarity unavailable for this representation; thresholding distances as similarities"
            );
        }

        let epsilon = match self.epsilon {
            Some(eps) => eps,
            None => self.estimator().estimate(vectors, rng, progress)?.epsilon,
        };

        let mut assignment = ClusterAssignment::new(n);
        let pass = self.run_clustering(vectors, epsilon, &mut assignment, progress)?;

        Ok(DbscanFit {
            assignment,
            noise: pass.noise,
            cluster_count: pass.cluster_count,
            epsilon,
            method: self.method,
            metric: self.metric,
            min_pts: self.min_pts,
        })
    }
}

fn check_epsilon(eps: f32) -> Result<()> {
    if !eps.is_finite() || eps < 0.0 {
        return Err(Error::invalid(
            "epsilon",
            format!("must be finite and >= 0, got {eps}"),
        ));
    }
    Ok(())
}

impl Default for FlingDbscan {
    fn default() -> Self {
        Self::new(5)
    }
}

/// Epsilon-range query over the still-unclaimed part of the corpus.
#[derive(Debug)]
pub struct NeighborQuery<'a, V: ?Sized> {
    vectors: &'a V,
    method: Method,
    metric: Metric,
    kernel: Kernel,
    epsilon: f32,
    min_pts: usize,
}

impl<V: VectorAccessor + ?Sized> NeighborQuery<'_, V> {
    /// Unclaimed documents within epsilon of `index`, if there are more than
    /// `min_pts` of them; `None` otherwise.
    pub fn find_neighbors_of(
        &self,
        index: usize,
        assignment: &ClusterAssignment,
    ) -> Result<Option<Vec<usize>>> {
        let point = self.vectors.require(index, self.method)?;
        let neighbors = self.scan(index, point, assignment)?;
        if neighbors.len() > self.min_pts {
            Ok(Some(neighbors))
        } else {
            Ok(None)
        }
    }

    #[inline]
    fn is_neighbor(&self, point: &[f32], other: usize) -> Result<bool> {
        let v = self.vectors.require(other, self.method)?;
        check_dims(point, v)?;
        Ok(self.metric.admits(self.kernel.apply(point, v), self.epsilon))
    }

    #[cfg(not(feature = "parallel"))]
    fn scan(&self, index: usize, point: &[f32], assignment: &ClusterAssignment) -> Result<Vec<usize>> {
        let mut out = Vec::new();
        for j in 0..self.vectors.n_docs() {
            if j == index || !assignment.is_unassigned(j) {
                continue;
            }
            if self.is_neighbor(point, j)? {
                out.push(j);
            }
        }
        Ok(out)
    }

    #[cfg(feature = "parallel")]
    fn scan(&self, index: usize, point: &[f32], assignment: &ClusterAssignment) -> Result<Vec<usize>> {
        let hits = (0..self.vectors.n_docs())
            .into_par_iter()
            .filter(|&j| j != index && assignment.is_unassigned(j))
            .map(|j| self.is_neighbor(point, j).map(|hit| hit.then_some(j)))
            .collect::<Result<Vec<Option<usize>>>>()?;
        Ok(hits.into_iter().flatten().collect())
    }
}

/// Counters produced by one clustering pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClusterPass {
    /// Clusters created; ids are `0..cluster_count`.
    pub cluster_count: usize,
    /// Documents never claimed by a cluster, in visit order.
    pub noise: Vec<usize>,
}

/// Result of [`FlingDbscan::fit`].
#[derive(Debug, Clone)]
pub struct DbscanFit {
    pub(crate) assignment: ClusterAssignment,
    pub(crate) noise: Vec<usize>,
    pub(crate) cluster_count: usize,
    pub(crate) epsilon: f32,
    pub(crate) method: Method,
    pub(crate) metric: Metric,
    pub(crate) min_pts: usize,
}

impl DbscanFit {
    /// Final labels.
    pub fn assignment(&self) -> &ClusterAssignment {
        &self.assignment
    }

    /// Label of document `index`.
    pub fn label(&self, index: usize) -> Label {
        self.assignment.get(index)
    }

    /// Noise documents, in visit order.
    pub fn noise(&self) -> &[usize] {
        &self.noise
    }

    /// Number of clusters formed.
    pub fn cluster_count(&self) -> usize {
        self.cluster_count
    }

    /// Epsilon used for the pass (configured or estimated).
    pub fn epsilon(&self) -> f32 {
        self.epsilon
    }

    /// Number of documents.
    pub fn n_docs(&self) -> usize {
        self.assignment.len()
    }
}

impl Clustering for FlingDbscan {
    /// Rows are read as dense vectors; noise points get [`NOISE`].
    fn fit_predict(&self, data: &[Vec<f32>]) -> Result<Vec<usize>> {
        let fit = self.fit(data)?;
        Ok(fit
            .assignment
            .labels()
            .iter()
            .map(|l| l.cluster().unwrap_or(NOISE))
            .collect())
    }

    /// Clusters are discovered dynamically, so this returns 0.
    fn n_clusters(&self) -> usize {
        0
    }
}

/// Row labels with unclaimed documents as `None` instead of [`NOISE`].
pub trait DbscanExt {
    /// Cluster dense rows; `None` marks a document no cluster claimed.
    fn fit_predict_with_noise(&self, data: &[Vec<f32>]) -> Result<Vec<Option<usize>>>;

    /// `true` for the [`NOISE`] sentinel of [`Clustering::fit_predict`].
    fn is_noise(label: usize) -> bool {
        label == NOISE
    }
}

impl DbscanExt for FlingDbscan {
    fn fit_predict_with_noise(&self, data: &[Vec<f32>]) -> Result<Vec<Option<usize>>> {
        let fit = self.fit(data)?;
        Ok(fit.assignment.labels().iter().map(|l| l.cluster()).collect())
    }
}
