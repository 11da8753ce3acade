//! Writing results back onto the corpus and summarizing a run.

use std::fmt;
use std::io::{self, Write};

use crate::cluster::DbscanFit;
use crate::config::{Method, Metric};
use crate::corpus::Corpus;
use crate::error::{Error, Result};

/// Headline numbers of a clustering run.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    /// Representation that was clustered.
    pub method: Method,
    /// Metric as configured, not the kernel it resolved to.
    pub metric: Metric,
    /// Neighbor count a core point had to exceed.
    pub min_pts: usize,
    /// Threshold used for the pass, configured or estimated.
    pub epsilon: f32,
    /// Clusters formed; ids run `0..cluster_count`.
    pub cluster_count: usize,
    /// Documents in the corpus.
    pub n_docs: usize,
    /// Documents carrying a cluster label.
    pub assigned: usize,
    /// Documents no cluster claimed.
    pub noise: usize,
}

impl Summary {
    /// Share of documents left as noise, in percent; 0 for an empty run.
    pub fn noise_percent(&self) -> f64 {
        if self.n_docs == 0 {
            return 0.0;
        }
        self.noise as f64 / self.n_docs as f64 * 100.0
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Cluster characteristics:")?;
        writeln!(f, " -- vectors: {}", self.method)?;
        writeln!(f, " -- metric: {}", self.metric)?;
        writeln!(f, " -- minPts: {}", self.min_pts)?;
        writeln!(f, " -- epsilon: {}", self.epsilon)?;
        writeln!(f, " -- {} clusters formed!", self.cluster_count)?;
        writeln!(f, " -- {} points assigned to clusters!", self.assigned)?;
        writeln!(f, " -- {} noise points!", self.noise)?;
        writeln!(f, " -- {:.2}% noise!", self.noise_percent())
    }
}

impl DbscanFit {
    /// Copy the labels onto `corpus` as the column `field`.
    ///
    /// Values are `cluster_<k>` or `no_cluster`. Fails if the corpus size does
    /// not match the fitted data.
    pub fn attach_labels(&self, corpus: &mut Corpus, field: &str) -> Result<()> {
        if corpus.len() != self.assignment.len() {
            return Err(Error::invalid(
                "corpus",
                format!(
                    "has {} documents, labels cover {}",
                    corpus.len(),
                    self.assignment.len()
                ),
            ));
        }
        corpus.set_field(field, self.assignment.to_strings());
        Ok(())
    }

    /// Headline numbers for this run.
    pub fn summary(&self) -> Summary {
        Summary {
            method: self.method,
            metric: self.metric,
            min_pts: self.min_pts,
            epsilon: self.epsilon,
            cluster_count: self.cluster_count,
            n_docs: self.assignment.len(),
            assigned: self.assignment.len() - self.noise.len(),
            noise: self.noise.len(),
        }
    }

    /// Write the summary to `out`.
    pub fn write_summary<W: Write>(&self, out: &mut W) -> io::Result<()> {
        write!(out, "{}", self.summary())
    }

    /// Write `index label` lines for the first `n` documents to `out`.
    pub fn write_assignments<W: Write>(&self, out: &mut W, n: usize) -> io::Result<()> {
        for (i, label) in self.assignment.labels().iter().take(n).enumerate() {
            writeln!(out, "{i} {label}")?;
        }
        Ok(())
    }

    /// Print the summary to stdout.
    pub fn print_summary(&self) {
        print!("{}", self.summary());
    }

    /// Print the labels of the first `n` documents to stdout.
    pub fn print_assignments(&self, n: usize) {
        let _ = self.write_assignments(&mut io::stdout().lock(), n);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cluster::FlingDbscan;

    fn fitted() -> (Corpus, DbscanFit) {
        let corpus = Corpus::from_dense(vec![
            vec![0.0, 0.0],
            vec![0.0, 1.0],
            vec![1.0, 0.0],
            vec![40.0, 40.0],
        ]);
        let fit = FlingDbscan::new(1).with_epsilon(2.0).fit(&corpus).unwrap();
        (corpus, fit)
    }

    #[test]
    fn attach_labels_adds_column() {
        let (mut corpus, fit) = fitted();
        fit.attach_labels(&mut corpus, "dbscan_dense").unwrap();
        assert_eq!(
            corpus.field("dbscan_dense").unwrap(),
            &["cluster_0", "cluster_0", "cluster_0", "no_cluster"]
        );
    }

    #[test]
    fn attach_labels_rejects_other_corpus() {
        let (_, fit) = fitted();
        let mut other = Corpus::from_dense(vec![vec![0.0]]);
        assert!(fit.attach_labels(&mut other, "x").is_err());
        assert!(other.field("x").is_none());
    }

    #[test]
    fn summary_counts() {
        let (_, fit) = fitted();
        let summary = fit.summary();
        assert_eq!(summary.cluster_count, 1);
        assert_eq!(summary.assigned, 3);
        assert_eq!(summary.noise, 1);
        assert!((summary.noise_percent() - 25.0).abs() < 1e-9);

        let text = summary.to_string();
        assert!(text.contains("vectors: dense"));
        assert!(text.contains("1 clusters formed!"));
        assert!(text.contains("25.00% noise!"));
    }

    #[test]
    fn summary_reports_configured_metric() {
        let (corpus, _) = fitted();
        let fit = FlingDbscan::new(1)
            .with_metric(Metric::Similarity)
            .with_epsilon(2.0)
            .fit(&corpus)
            .unwrap();
        let summary = fit.summary();
        assert_eq!(summary.metric, Metric::Similarity);
        assert_eq!(summary.cluster_count, 1);
        assert_eq!(summary.assigned, 4);
        assert_eq!(summary.noise, 0);
        assert!(summary.to_string().contains("metric: similarity"));
    }

    #[test]
    fn empty_summary_has_zero_noise_percent() {
        let summary = Summary {
            method: Method::Dense,
            metric: Metric::Distance,
            min_pts: 0,
            epsilon: 1.0,
            cluster_count: 0,
            n_docs: 0,
            assigned: 0,
            noise: 0,
        };
        assert_eq!(summary.noise_percent(), 0.0);
    }

    #[test]
    fn assignments_listing() {
        let (_, fit) = fitted();
        let mut out = Vec::new();
        fit.write_assignments(&mut out, 2).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "0 cluster_0\n1 cluster_0\n");

        let mut out = Vec::new();
        fit.write_summary(&mut out).unwrap();
        assert!(String::from_utf8(out).unwrap().starts_with("Cluster characteristics:"));
    }
}
