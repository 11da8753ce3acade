//! Engine configuration.
//!
//! [`FlingDbscan`](crate::FlingDbscan) is normally configured through its
//! builder. [`FlingConfig`] is the loosely typed mirror used when parameters
//! arrive from a config file or a command line: names are strings and
//! `min_pts` is signed, so every field is checked when it is converted.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::cluster::{FlingDbscan, DEFAULT_SAMPLE_SIZE};
use crate::corpus::Representation;
use crate::error::{Error, Result};

/// Which vector representation to cluster on.
pub type Method = Representation;

impl FromStr for Representation {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dense" | "glove" => Ok(Representation::Dense),
            "sparse" | "tfidf" => Ok(Representation::Sparse),
            "contextual" | "transformer" => Ok(Representation::Contextual),
            other => Err(Error::invalid("method", format!("unknown method {other:?}"))),
        }
    }
}

/// How two vectors are compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    /// Smaller is closer; neighbors satisfy `d < epsilon`.
    #[default]
    Distance,
    /// Larger is closer; neighbors satisfy `s > epsilon`.
    Similarity,
}

impl Metric {
    /// Whether a comparison `value` falls inside an `epsilon` neighborhood.
    ///
    /// The direction follows the configured metric even when the applied
    /// kernel is a distance, see [`kernel_for`](crate::cluster::metric::kernel_for).
    #[inline]
    pub fn admits(self, value: f32, epsilon: f32) -> bool {
        match self {
            Metric::Distance => value < epsilon,
            Metric::Similarity => value > epsilon,
        }
    }

    /// Canonical lowercase name.
    pub fn as_str(self) -> &'static str {
        match self {
            Metric::Distance => "distance",
            Metric::Similarity => "similarity",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Metric {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "distance" | "euclidean" => Ok(Metric::Distance),
            "similarity" | "cosine" => Ok(Metric::Similarity),
            other => Err(Error::invalid("metric", format!("unknown metric {other:?}"))),
        }
    }
}

/// Untyped construction parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlingConfig {
    /// `dense`, `sparse` or `contextual` (aliases: `glove`, `tfidf`, `transformer`).
    pub method: String,
    /// `distance` or `similarity` (aliases: `euclidean`, `cosine`).
    pub metric: String,
    /// Neighborhood threshold; estimated from a sample when absent.
    pub epsilon: Option<f32>,
    /// Neighborhood size a core point must strictly exceed.
    pub min_pts: i64,
    /// Draw a progress bar and the epsilon histogram on stdout.
    pub progress: bool,
    /// Seed for epsilon sampling.
    pub seed: Option<u64>,
    /// Documents drawn from each half of the corpus during epsilon estimation.
    pub sample_size: usize,
}

impl Default for FlingConfig {
    fn default() -> Self {
        Self {
            method: Representation::Dense.as_str().to_owned(),
            metric: Metric::Distance.as_str().to_owned(),
            epsilon: None,
            min_pts: 5,
            progress: false,
            seed: None,
            sample_size: DEFAULT_SAMPLE_SIZE,
        }
    }
}

impl TryFrom<FlingConfig> for FlingDbscan {
    type Error = Error;

    fn try_from(config: FlingConfig) -> Result<Self> {
        let method: Method = config.method.parse()?;
        let metric: Metric = config.metric.parse()?;
        let min_pts = usize::try_from(config.min_pts)
            .map_err(|_| Error::invalid("min_pts", format!("must be >= 0, got {}", config.min_pts)))?;

        let mut engine = FlingDbscan::new(min_pts)
            .with_method(method)
            .with_metric(metric)
            .with_sample_size(config.sample_size)
            .with_progress(config.progress);
        if let Some(eps) = config.epsilon {
            engine = engine.with_epsilon(eps);
        }
        if let Some(seed) = config.seed {
            engine = engine.with_seed(seed);
        }
        engine.validate()?;
        Ok(engine)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn method_aliases() {
        assert_eq!("glove".parse::<Method>().unwrap(), Representation::Dense);
        assert_eq!("TFIDF".parse::<Method>().unwrap(), Representation::Sparse);
        assert_eq!(
            " transformer ".parse::<Method>().unwrap(),
            Representation::Contextual
        );
        assert!(matches!(
            "word2vec".parse::<Method>(),
            Err(Error::InvalidConfiguration { name: "method", .. })
        ));
    }

    #[test]
    fn metric_aliases() {
        assert_eq!("cosine".parse::<Metric>().unwrap(), Metric::Similarity);
        assert_eq!("euclidean".parse::<Metric>().unwrap(), Metric::Distance);
        assert!("manhattan".parse::<Metric>().is_err());
    }

    #[test]
    fn negative_min_pts_rejected() {
        let config = FlingConfig {
            min_pts: -1,
            ..Default::default()
        };
        let err = FlingDbscan::try_from(config).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidConfiguration { name: "min_pts", .. }
        ));
    }

    #[test]
    fn negative_epsilon_rejected() {
        let config = FlingConfig {
            epsilon: Some(-0.5),
            ..Default::default()
        };
        assert!(FlingDbscan::try_from(config).is_err());
    }

    #[test]
    fn zero_sample_size_rejected() {
        let config = FlingConfig {
            sample_size: 0,
            ..Default::default()
        };
        assert!(FlingDbscan::try_from(config).is_err());
    }

    #[test]
    fn valid_config_builds_engine() {
        let config = FlingConfig {
            method: "transformer".into(),
            metric: "cosine".into(),
            epsilon: Some(0.8),
            min_pts: 2,
            seed: Some(7),
            ..Default::default()
        };
        let engine = FlingDbscan::try_from(config).unwrap();
        assert_eq!(engine.method(), Representation::Contextual);
        assert_eq!(engine.metric(), Metric::Similarity);
        assert_eq!(engine.epsilon(), Some(0.8));
        assert_eq!(engine.min_pts(), 2);
    }
}
