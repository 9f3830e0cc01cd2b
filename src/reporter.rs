/**
This modules gives a few tools to prettyprint the description of a dataset.
*/
use crate::entity::EntityLayer;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::Display;

/// Number of entities of each layer. Layers without any entity are absent.
pub type EntityCounts = BTreeMap<EntityLayer, usize>;

/// The reporter holds the description of a dataset. It can be displayed as human-readable text or
/// serialized. It is built with the `describe_dataset` function.
///
/// # Example
///
/// ```rust
/// use hipe_commons::{DatasetReport, EntityLayer};
/// use std::collections::BTreeMap;
///
/// let report = DatasetReport {
///     path: String::from("HIPE-2022-ajmc-dev-en.tsv"),
///     n_documents: 2,
///     n_tokens: 120,
///     entity_counts: BTreeMap::from([(EntityLayer::CoarseLit, 5), (EntityLayer::Nested, 1)]),
/// };
/// let expected = "Path of the TSV file: HIPE-2022-ajmc-dev-en.tsv
/// Number of documents: 2
/// Number of tokens: 120
/// Number of entities: {\"coarse_lit\": 5, \"nested\": 1}\n";
///
/// assert_eq!(expected, report.to_string());
/// ```
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Default)]
pub struct DatasetReport {
    /// Path or URL of the dataset
    pub path: String,
    pub n_documents: usize,
    /// Number of token lines over all the documents
    pub n_tokens: usize,
    pub entity_counts: EntityCounts,
}

impl Display for DatasetReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Path of the TSV file: {}", self.path)?;
        writeln!(f, "Number of documents: {}", self.n_documents)?;
        writeln!(f, "Number of tokens: {}", self.n_tokens)?;
        write!(f, "Number of entities: {{")?;
        for (i, (layer, count)) in self.entity_counts.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "\"{}\": {}", layer, count)?;
        }
        writeln!(f, "}}")
    }
}
