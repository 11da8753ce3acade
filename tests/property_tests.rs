use std::collections::BTreeSet;

use fling::cluster::distance;
use fling::{Clustering, FlingDbscan, Label, Metric, Representation, NOISE};
use proptest::prelude::*;

fn points() -> impl Strategy<Value = Vec<Vec<f32>>> {
    prop::collection::vec(prop::collection::vec(-10.0f32..10.0, 2), 1..30)
}

proptest! {
    #[test]
    fn prop_every_point_clustered_or_noise(
        data in points(),
        eps in 0.1f32..6.0,
        min_pts in 0usize..4
    ) {
        let fit = FlingDbscan::new(min_pts).with_epsilon(eps).fit(&data).unwrap();
        let noise: BTreeSet<usize> = fit.noise().iter().copied().collect();

        prop_assert_eq!(noise.len(), fit.noise().len());
        for i in 0..data.len() {
            match fit.label(i) {
                Label::Cluster(k) => {
                    prop_assert!(k < fit.cluster_count());
                    prop_assert!(!noise.contains(&i));
                }
                Label::Unassigned => {
                    prop_assert!(noise.contains(&i));
                }
            }
        }
        prop_assert_eq!(noise.len() + fit.assignment().n_assigned(), data.len());
    }

    #[test]
    fn prop_cluster_ids_contiguous(
        data in points(),
        eps in 0.1f32..6.0,
        min_pts in 0usize..4
    ) {
        let labels = FlingDbscan::new(min_pts).with_epsilon(eps).fit_predict(&data).unwrap();
        let ids: BTreeSet<usize> = labels.iter().copied().filter(|&l| l != NOISE).collect();
        let expected: BTreeSet<usize> = (0..ids.len()).collect();
        prop_assert_eq!(ids, expected);
    }

    #[test]
    fn prop_explicit_epsilon_is_deterministic(
        data in points(),
        eps in 0.1f32..6.0,
        min_pts in 0usize..4
    ) {
        let engine = FlingDbscan::new(min_pts).with_epsilon(eps);
        let a = engine.fit(&data).unwrap();
        let b = engine.fit(&data).unwrap();
        prop_assert_eq!(a.assignment(), b.assignment());
        prop_assert_eq!(a.noise(), b.noise());
    }

    #[test]
    fn prop_metrics_symmetric(
        a in prop::collection::vec(-5.0f32..5.0, 4),
        b in prop::collection::vec(-5.0f32..5.0, 4)
    ) {
        for (repr, metric) in [
            (Representation::Dense, Metric::Distance),
            (Representation::Contextual, Metric::Similarity),
        ] {
            let ab = distance(&a, &b, repr, metric).unwrap();
            let ba = distance(&b, &a, repr, metric).unwrap();
            prop_assert!((ab - ba).abs() < 1e-5);
        }
    }

    #[test]
    fn prop_self_comparison(a in prop::collection::vec(0.5f32..5.0, 3)) {
        let d = distance(&a, &a, Representation::Sparse, Metric::Distance).unwrap();
        prop_assert_eq!(d, 0.0);
        let s = distance(&a, &a, Representation::Contextual, Metric::Similarity).unwrap();
        prop_assert!((s - 1.0).abs() < 1e-5);
    }
}
