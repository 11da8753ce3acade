//! Density-based clustering of document vectors.
//!
//! ## Pieces
//!
//! - [`metric`]: how two vectors are compared. Euclidean distance everywhere,
//!   plus cosine similarity for contextual embeddings.
//! - [`EpsilonEstimator`]: a default neighborhood threshold from a random
//!   sample of cross-half document pairs.
//! - [`NeighborQuery`]: epsilon-range query restricted to documents that no
//!   cluster has claimed yet.
//! - [`FlingDbscan`]: the driver. One forward scan, seeding a cluster at every
//!   dense unclaimed document and expanding it by a single extra hop.
//!
//! ## Distance vs similarity
//!
//! Under a distance kernel a neighbor satisfies `d < ε`; under cosine
//! similarity it satisfies `s > ε`. So for contextual vectors with the
//! similarity metric, ε is a similarity floor (e.g. 0.8), not a radius.
//!
//! ## Usage
//!
//! ```rust
//! use fling::cluster::{Clustering, FlingDbscan, NOISE};
//!
//! let data = vec![
//!     vec![0.0, 0.0],
//!     vec![0.0, 1.0],
//!     vec![1.0, 0.0],
//!     vec![50.0, 50.0],
//! ];
//!
//! let labels = FlingDbscan::new(1).with_epsilon(2.0).fit_predict(&data).unwrap();
//! assert_eq!(labels, vec![0, 0, 0, NOISE]);
//! ```

mod assignment;
mod dbscan;
mod epsilon;
pub mod metric;
mod traits;

pub use assignment::{ClusterAssignment, Label};
pub use dbscan::{ClusterPass, DbscanExt, DbscanFit, FlingDbscan, NeighborQuery, NOISE};
pub use epsilon::{EpsilonEstimator, EpsilonSample, DEFAULT_SAMPLE_SIZE};
pub use metric::{distance, Kernel};
pub use traits::Clustering;
