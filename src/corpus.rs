//! Document corpus and read access to per-document vectors.
//!
//! The engine never produces vectors itself. Anything that can hand out a
//! document's vector for a given [`Representation`] implements
//! [`VectorAccessor`]; [`Corpus`] is the owned, in-memory implementation and
//! also carries the label columns written back after clustering.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// One of the alternative numeric encodings of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Representation {
    /// Dense word-embedding average (e.g. GloVe).
    Dense,
    /// Sparse frequency-weighted vector (e.g. TF-IDF), stored densely.
    Sparse,
    /// Contextual embedding from a transformer model.
    Contextual,
}

impl Representation {
    /// All representations, in declaration order.
    pub const ALL: [Representation; 3] = [
        Representation::Dense,
        Representation::Sparse,
        Representation::Contextual,
    ];

    /// Canonical lowercase name.
    pub fn as_str(self) -> &'static str {
        match self {
            Representation::Dense => "dense",
            Representation::Sparse => "sparse",
            Representation::Contextual => "contextual",
        }
    }
}

impl fmt::Display for Representation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Read-only access to document vectors.
///
/// Implementors must be `Sync` so neighbor scans can fan out across threads.
pub trait VectorAccessor: Sync {
    /// Number of documents.
    fn n_docs(&self) -> usize;

    /// The vector of document `index` in `representation`, if present.
    fn vector(&self, index: usize, representation: Representation) -> Option<&[f32]>;

    /// Like [`vector`](Self::vector), failing with
    /// [`Error::MissingRepresentation`] when the vector is absent.
    fn require(&self, index: usize, representation: Representation) -> Result<&[f32]> {
        self.vector(index, representation)
            .ok_or(Error::MissingRepresentation {
                index,
                representation,
            })
    }
}

/// Plain row data is treated as the dense representation.
impl VectorAccessor for [Vec<f32>] {
    fn n_docs(&self) -> usize {
        self.len()
    }

    fn vector(&self, index: usize, representation: Representation) -> Option<&[f32]> {
        match representation {
            Representation::Dense => self.get(index).map(Vec::as_slice),
            _ => None,
        }
    }
}

impl VectorAccessor for Vec<Vec<f32>> {
    fn n_docs(&self) -> usize {
        self.len()
    }

    fn vector(&self, index: usize, representation: Representation) -> Option<&[f32]> {
        self.as_slice().vector(index, representation)
    }
}

/// A single document: zero or more named vector representations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    vectors: BTreeMap<Representation, Vec<f32>>,
}

impl Document {
    /// A document with no vectors.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach (or replace) a representation.
    pub fn with(mut self, representation: Representation, vector: Vec<f32>) -> Self {
        self.vectors.insert(representation, vector);
        self
    }

    /// Shorthand for a document that only carries a dense vector.
    pub fn dense(vector: Vec<f32>) -> Self {
        Self::new().with(Representation::Dense, vector)
    }

    /// The vector for `representation`, if present.
    pub fn get(&self, representation: Representation) -> Option<&[f32]> {
        self.vectors.get(&representation).map(Vec::as_slice)
    }

    /// Representations present on this document.
    pub fn representations(&self) -> impl Iterator<Item = Representation> + '_ {
        self.vectors.keys().copied()
    }
}

/// An ordered, fixed-size collection of documents plus attached label columns.
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    documents: Vec<Document>,
    fields: BTreeMap<String, Vec<String>>,
}

impl Corpus {
    /// Build a corpus from documents; indices follow iteration order.
    pub fn new(documents: Vec<Document>) -> Self {
        Self {
            documents,
            fields: BTreeMap::new(),
        }
    }

    /// Build a corpus where every row becomes a dense-only document.
    pub fn from_dense(rows: Vec<Vec<f32>>) -> Self {
        Self::new(rows.into_iter().map(Document::dense).collect())
    }

    /// Number of documents.
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// True when the corpus holds no documents.
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Documents in index order.
    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    /// A previously attached label column.
    pub fn field(&self, name: &str) -> Option<&[String]> {
        self.fields.get(name).map(Vec::as_slice)
    }

    /// Names of all attached label columns.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Attach (or overwrite) a per-document column.
    ///
    /// `values` must hold exactly one entry per document.
    pub(crate) fn set_field(&mut self, name: &str, values: Vec<String>) {
        debug_assert_eq!(values.len(), self.documents.len());
        self.fields.insert(name.to_owned(), values);
    }
}

impl VectorAccessor for Corpus {
    fn n_docs(&self) -> usize {
        self.documents.len()
    }

    fn vector(&self, index: usize, representation: Representation) -> Option<&[f32]> {
        self.documents.get(index)?.get(representation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_holds_only_requested_representations() {
        let doc = Document::new()
            .with(Representation::Sparse, vec![0.0, 2.0])
            .with(Representation::Contextual, vec![1.0]);

        assert_eq!(doc.get(Representation::Sparse), Some(&[0.0, 2.0][..]));
        assert!(doc.get(Representation::Dense).is_none());
        assert_eq!(
            doc.representations().collect::<Vec<_>>(),
            vec![Representation::Sparse, Representation::Contextual]
        );
    }

    #[test]
    fn raw_rows_only_expose_dense() {
        let rows: Vec<Vec<f32>> = vec![vec![1.0, 2.0], vec![3.0, 4.0]];
        assert_eq!(rows.n_docs(), 2);
        assert_eq!(rows.vector(1, Representation::Dense), Some(&[3.0, 4.0][..]));
        assert!(rows.vector(1, Representation::Sparse).is_none());
        assert!(rows.vector(2, Representation::Dense).is_none());
    }

    #[test]
    fn require_reports_missing_representation() {
        let corpus = Corpus::new(vec![Document::dense(vec![1.0])]);
        assert!(corpus.require(0, Representation::Dense).is_ok());
        assert!(matches!(
            corpus.require(0, Representation::Contextual),
            Err(Error::MissingRepresentation {
                index: 0,
                representation: Representation::Contextual
            })
        ));
    }

    #[test]
    fn corpus_fields_roundtrip() {
        let mut corpus = Corpus::from_dense(vec![vec![0.0], vec![1.0]]);
        assert!(corpus.field("label").is_none());

        corpus.set_field("label", vec!["cluster_0".into(), "no_cluster".into()]);
        assert_eq!(
            corpus.field("label").unwrap(),
            &["cluster_0".to_string(), "no_cluster".to_string()]
        );
        assert_eq!(corpus.field_names().collect::<Vec<_>>(), vec!["label"]);
    }

    #[test]
    fn representation_names() {
        let names: Vec<String> = Representation::ALL.iter().map(|r| r.to_string()).collect();
        assert_eq!(names, vec!["dense", "sparse", "contextual"]);
    }
}
