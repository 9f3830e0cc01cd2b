/*!
Descriptive statistics over parsed datasets.
*/
use crate::config::HipeConfig;
use crate::corpus::parse_tsv;
use crate::document::HipeDocument;
use crate::error::HipeError;
use crate::reporter::{DatasetReport, EntityCounts};
use log::info;
use std::path::Path;

/// Sums, layer by layer, the number of entities of the documents. A layer without any entity in
/// the whole corpus is absent from the result.
pub fn count_entities(documents: &[HipeDocument]) -> EntityCounts {
    let mut counts = EntityCounts::new();
    for document in documents {
        for (layer, entities) in document.entities() {
            *counts.entry(*layer).or_insert(0) += entities.len();
        }
    }
    counts
}

/// Builds the report of already parsed documents.
pub fn report<S: Into<String>>(path: S, documents: &[HipeDocument]) -> DatasetReport {
    DatasetReport {
        path: path.into(),
        n_documents: documents.len(),
        n_tokens: documents.iter().map(HipeDocument::n_tokens).sum(),
        entity_counts: count_entities(documents),
    }
}

/// Parses a dataset and describes it: its path, its number of documents and tokens and its
/// number of entities in each layer.
pub fn describe_dataset<P: AsRef<Path>>(path: P) -> Result<String, HipeError> {
    let path = path.as_ref();
    let documents = parse_tsv(Some(path), None, &HipeConfig::default())?;
    let report = report(path.display().to_string(), &documents);
    info!("Described {}", report.path);
    Ok(report.to_string())
}
