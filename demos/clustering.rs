//! Cluster a toy corpus on two representations and print the reports.
//!
//! Run with `RUST_LOG=fling=debug` to see per-cluster log lines.

use fling::{Corpus, Document, FlingDbscan, Metric, Representation};
use tracing_subscriber::EnvFilter;

fn main() -> fling::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // Three topical groups; the contextual vectors point in three directions.
    let docs: Vec<Document> = [
        ([0.0, 0.0], [1.0, 0.0, 0.05]),
        ([0.1, 0.2], [0.97, 0.1, 0.0]),
        ([0.2, 0.1], [0.95, 0.0, 0.1]),
        ([-0.1, 0.1], [0.99, 0.05, 0.05]),
        ([5.0, 5.0], [0.0, 1.0, 0.0]),
        ([5.1, 4.9], [0.1, 0.98, 0.05]),
        ([4.9, 5.1], [0.05, 0.97, 0.1]),
        ([5.2, 5.2], [0.0, 0.99, 0.0]),
        ([10.0, 0.0], [0.0, 0.05, 1.0]),
        ([10.1, 0.1], [0.1, 0.0, 0.97]),
        ([9.9, -0.1], [0.0, 0.1, 0.99]),
        ([30.0, 30.0], [0.6, 0.6, 0.5]),
    ]
    .into_iter()
    .map(|(dense, contextual)| {
        Document::new()
            .with(Representation::Dense, dense.to_vec())
            .with(Representation::Contextual, contextual.to_vec())
    })
    .collect();
    let mut corpus = Corpus::new(docs);

    println!("=== dense, estimated epsilon ===");
    let dense = FlingDbscan::new(1)
        .with_sample_size(10)
        .with_seed(42)
        .with_progress(true)
        .fit(&corpus)?;
    println!();
    dense.print_summary();
    dense.attach_labels(&mut corpus, "dbscan_dense")?;

    println!("\n=== contextual, cosine similarity > 0.9 ===");
    let contextual = FlingDbscan::new(1)
        .with_method(Representation::Contextual)
        .with_metric(Metric::Similarity)
        .with_epsilon(0.9)
        .fit(&corpus)?;
    contextual.print_summary();
    contextual.print_assignments(corpus.len());
    contextual.attach_labels(&mut corpus, "dbscan_contextual")?;

    for name in corpus.field_names() {
        println!("column {name}: {:?}", corpus.field(name).unwrap_or_default());
    }
    Ok(())
}
