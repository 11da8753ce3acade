//! Density-based clustering of document corpora.
//!
//! `fling` groups documents by local density in vector space without being
//! told how many clusters to expect. Each document carries one or more vector
//! representations (dense embedding, sparse TF-IDF style vector, contextual
//! embedding); the engine clusters on one of them and labels every document
//! `cluster_<k>` or leaves it as noise.
//!
//! The primary public API is under [`cluster`]:
//! - [`FlingDbscan`]: builder-configured clusterer
//! - [`EpsilonEstimator`]: sampled default for the neighborhood threshold
//! - [`DbscanFit`]: labels, noise list and reporting helpers
//!
//! Producing the vectors is out of scope; implement [`VectorAccessor`] or load
//! them into a [`Corpus`].

#![forbid(unsafe_code)]

pub mod cluster;
pub mod config;
pub mod corpus;
pub mod error;
pub mod progress;
pub mod report;

pub use cluster::{
    ClusterAssignment, ClusterPass, Clustering, DbscanExt, DbscanFit, EpsilonEstimator,
    EpsilonSample, FlingDbscan, Label, NeighborQuery, NOISE,
};
pub use config::{FlingConfig, Method, Metric};
pub use corpus::{Corpus, Document, Representation, VectorAccessor};
pub use error::{Error, Result};
pub use progress::{ConsoleProgress, Histogram, Progress, Silent};
pub use report::Summary;
