use std::fmt;

/// Per-document cluster label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Label {
    /// Not claimed by any cluster (yet).
    #[default]
    Unassigned,
    /// Member of cluster `k`.
    Cluster(usize),
}

impl Label {
    /// The cluster id, if any.
    pub fn cluster(self) -> Option<usize> {
        match self {
            Label::Unassigned => None,
            Label::Cluster(k) => Some(k),
        }
    }

    /// True for [`Label::Unassigned`].
    pub fn is_unassigned(self) -> bool {
        matches!(self, Label::Unassigned)
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::Unassigned => f.write_str("no_cluster"),
            Label::Cluster(k) => write!(f, "cluster_{k}"),
        }
    }
}

/// Document index → label, mutated only during a clustering pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClusterAssignment {
    labels: Vec<Label>,
}

impl ClusterAssignment {
    /// `n` documents, all unassigned.
    pub fn new(n: usize) -> Self {
        Self {
            labels: vec![Label::Unassigned; n],
        }
    }

    /// Number of documents.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// True when there are no documents.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Label of document `index`.
    #[inline]
    pub fn get(&self, index: usize) -> Label {
        self.labels[index]
    }

    #[inline]
    pub(crate) fn is_unassigned(&self, index: usize) -> bool {
        self.labels[index].is_unassigned()
    }

    #[inline]
    pub(crate) fn assign(&mut self, index: usize, cluster: usize) {
        self.labels[index] = Label::Cluster(cluster);
    }

    /// All labels in index order.
    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    /// Number of documents carrying a cluster label.
    pub fn n_assigned(&self) -> usize {
        self.labels.iter().filter(|l| !l.is_unassigned()).count()
    }

    /// Members of cluster `k`, ascending.
    pub fn members(&self, k: usize) -> Vec<usize> {
        self.labels
            .iter()
            .enumerate()
            .filter(|(_, l)| l.cluster() == Some(k))
            .map(|(i, _)| i)
            .collect()
    }

    /// String form of every label (`cluster_<k>` / `no_cluster`).
    pub fn to_strings(&self) -> Vec<String> {
        self.labels.iter().map(Label::to_string).collect()
    }
}
