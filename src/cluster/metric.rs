//! Pairwise comparison of document vectors.
//!
//! Which kernel is used depends on the representation, not only on the
//! configured [`Metric`]: cosine similarity is only available for contextual
//! embeddings. Dense and sparse vectors are always compared with Euclidean
//! distance, whatever metric was asked for. [`kernel_for`] is the single place
//! that encodes this table.
//!
//! The neighbor test is a separate matter: [`Metric::admits`] keeps the
//! direction of the *configured* metric. A similarity threshold on dense
//! vectors therefore admits documents whose distance is above epsilon.

use crate::config::Metric;
use crate::corpus::Representation;
use crate::error::{Error, Result};

/// The concrete comparison function applied to a pair of vectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kernel {
    /// `||a - b||`.
    Euclidean,
    /// `a·b / (||a|| ||b||)`.
    Cosine,
}

impl Kernel {
    /// Apply the kernel. Lengths must already match.
    #[inline]
    pub fn apply(self, a: &[f32], b: &[f32]) -> f32 {
        match self {
            Kernel::Euclidean => euclidean(a, b),
            Kernel::Cosine => cosine_similarity(a, b),
        }
    }

    /// The metric this kernel actually realizes.
    pub fn metric(self) -> Metric {
        match self {
            Kernel::Euclidean => Metric::Distance,
            Kernel::Cosine => Metric::Similarity,
        }
    }
}

/// Representation × metric capability table.
pub fn kernel_for(representation: Representation, metric: Metric) -> Kernel {
    match (representation, metric) {
        (Representation::Contextual, Metric::Similarity) => Kernel::Cosine,
        (Representation::Contextual, Metric::Distance)
        | (Representation::Dense, _)
        | (Representation::Sparse, _) => Kernel::Euclidean,
    }
}

/// Compare two vectors under the given representation and metric.
///
/// Fails with [`Error::DimensionMismatch`] when the lengths differ.
pub fn distance(a: &[f32], b: &[f32], representation: Representation, metric: Metric) -> Result<f32> {
    check_dims(a, b)?;
    Ok(kernel_for(representation, metric).apply(a, b))
}

#[inline]
pub(crate) fn check_dims(a: &[f32], b: &[f32]) -> Result<()> {
    if a.len() != b.len() {
        return Err(Error::DimensionMismatch {
            expected: a.len(),
            found: b.len(),
        });
    }
    Ok(())
}

#[inline]
pub(crate) fn squared_euclidean(a: &[f32], b: &[f32]) -> f32 {
    debug_assert_eq!(a.len(), b.len());
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| {
            let d = x - y;
            d * d
        })
        .sum()
}

/// Euclidean norm of the component-wise difference.
#[inline]
pub fn euclidean(a: &[f32], b: &[f32]) -> f32 {
    squared_euclidean(a, b).sqrt()
}

/// Cosine similarity. Returns 0.0 if either vector has zero magnitude.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    debug_assert_eq!(a.len(), b.len());

    let mut dot = 0.0f32;
    let mut norm_a = 0.0f32;
    let mut norm_b = 0.0f32;
    for (x, y) in a.iter().zip(b.iter()) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    let denom = norm_a.sqrt() * norm_b.sqrt();
    if denom == 0.0 {
        0.0
    } else {
        dot / denom
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn euclidean_basic() {
        assert!((euclidean(&[0.0, 0.0], &[3.0, 4.0]) - 5.0).abs() < 1e-6);
        assert_eq!(euclidean(&[1.5, -2.0], &[1.5, -2.0]), 0.0);
    }

    #[test]
    fn cosine_identical_and_orthogonal() {
        let v = [1.0, 2.0, 3.0];
        assert!((cosine_similarity(&v, &v) - 1.0).abs() < 1e-6);
        assert!(cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]).abs() < 1e-6);
        assert!((cosine_similarity(&[1.0, 2.0], &[-1.0, -2.0]) + 1.0).abs() < 1e-6);
    }

    #[test]
    fn cosine_zero_vector() {
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 1.0]), 0.0);
    }

    #[test]
    fn capability_table() {
        use Metric::*;
        use Representation::*;

        assert_eq!(kernel_for(Dense, Distance), Kernel::Euclidean);
        assert_eq!(kernel_for(Dense, Similarity), Kernel::Euclidean);
        assert_eq!(kernel_for(Sparse, Similarity), Kernel::Euclidean);
        assert_eq!(kernel_for(Contextual, Distance), Kernel::Euclidean);
        assert_eq!(kernel_for(Contextual, Similarity), Kernel::Cosine);
    }

    #[test]
    fn similarity_on_dense_still_euclidean() {
        let d = distance(&[0.0, 0.0], &[3.0, 4.0], Representation::Dense, Metric::Similarity).unwrap();
        assert!((d - 5.0).abs() < 1e-6);

        let s = distance(&[1.0, 0.0], &[1.0, 0.0], Representation::Contextual, Metric::Similarity)
            .unwrap();
        assert!((s - 1.0).abs() < 1e-6);
    }

    #[test]
    fn dimension_mismatch() {
        let err = distance(&[1.0, 2.0], &[1.0], Representation::Dense, Metric::Distance).unwrap_err();
        assert!(matches!(
            err,
            Error::DimensionMismatch {
                expected: 2,
                found: 1
            }
        ));
    }

    #[test]
    fn threshold_direction() {
        assert!(Metric::Distance.admits(1.9, 2.0));
        assert!(!Metric::Distance.admits(2.0, 2.0));
        assert!(Metric::Similarity.admits(0.9, 0.8));
        assert!(!Metric::Similarity.admits(0.8, 0.8));
        // Applied kernel is Euclidean, direction still follows the metric.
        let d = distance(&[0.0], &[3.0], Representation::Dense, Metric::Similarity).unwrap();
        assert!(Metric::Similarity.admits(d, 2.0));
        assert!(!Metric::Distance.admits(d, 2.0));
    }
}
