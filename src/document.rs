/*!
A HIPE document: the lines of one section of a corpus file, its metadata and its entities.
*/
use crate::entity::{get_entities, Entity, EntityLayer};
use crate::error::MalformedCommentError;
use crate::line::{is_header, parse_tsv_line, TsvAnnotation, TsvLine};
use crate::mask::MaskPolicy;
use ahash::AHashMap;
use enum_iterator::all;
use log::debug;
use std::collections::BTreeMap;

/// Metadata field holding the identifier of a document.
pub const DOCUMENT_ID: &str = "document_id";

#[derive(Debug, Clone, PartialEq)]
/// A document holds its lines in corpus order. The metadata, the number of tokens and the
/// entities of every layer are computed once, when the document is built.
pub struct HipeDocument {
    path: String,
    lines: Vec<TsvLine>,
    metadata: AHashMap<String, String>,
    n_tokens: usize,
    entities: BTreeMap<EntityLayer, Vec<Entity>>,
}

impl HipeDocument {
    /// Builds a document from its parsed lines.
    ///
    /// * `path`: Path or URL of the corpus the document comes from.
    /// * `lines`: The lines of the document, in corpus order.
    pub fn new<S: Into<String>>(path: S, lines: Vec<TsvLine>) -> Self {
        let mut metadata = AHashMap::default();
        // a field seen twice keeps its last value
        for comment in lines.iter().filter_map(TsvLine::as_comment) {
            metadata.insert(comment.field.clone(), comment.value.clone());
        }
        let n_tokens = lines.iter().filter(|l| l.as_annotation().is_some()).count();
        let mut entities = BTreeMap::new();
        for layer in all::<EntityLayer>() {
            let annotations = lines.iter().filter_map(TsvLine::as_annotation);
            let layer_entities = get_entities(annotations, layer);
            if !layer_entities.is_empty() {
                entities.insert(layer, layer_entities);
            }
        }
        HipeDocument {
            path: path.into(),
            lines,
            metadata,
            n_tokens,
            entities,
        }
    }

    /// Parses one section of a corpus file. The line numbers are the indices of the lines in the
    /// section, counted before the column header and the empty lines are discarded.
    ///
    /// * `section`: The raw text of the document.
    /// * `path`: Path or URL of the corpus.
    /// * `policy`: Masking applied to the annotation lines.
    /// * `mask`: Value written in place of a hidden annotation.
    pub fn from_section<S: Into<String>>(
        section: &str,
        path: S,
        policy: MaskPolicy,
        mask: &str,
    ) -> Result<Self, MalformedCommentError> {
        let lines = section
            .split('\n')
            .enumerate()
            .filter(|(_, line)| !line.is_empty() && !is_header(line))
            .map(|(line_number, line)| parse_tsv_line(line, line_number, policy, mask))
            .collect::<Result<Vec<_>, _>>()?;
        let document = Self::new(path, lines);
        debug!(
            "Parsed document {} ({} tokens, {} entity layers)",
            document.id().unwrap_or("without id"),
            document.n_tokens,
            document.entities.len()
        );
        Ok(document)
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn lines(&self) -> &[TsvLine] {
        &self.lines
    }

    /// Iterates over the token lines of the document.
    pub fn annotations(&self) -> impl Iterator<Item = &TsvAnnotation> {
        self.lines.iter().filter_map(TsvLine::as_annotation)
    }

    pub fn metadata(&self) -> &AHashMap<String, String> {
        &self.metadata
    }

    /// The `document_id` of the document, if any. Prefixed fields such as `hipe2022:document_id`
    /// are accepted, see `first_comment_value`.
    pub fn id(&self) -> Option<&str> {
        self.first_comment_value(DOCUMENT_ID)
    }

    /// Value of the first comment whose field ends with `field`. Unlike `metadata`, a field
    /// repeated in the document yields its first value.
    pub fn first_comment_value(&self, field: &str) -> Option<&str> {
        self.lines
            .iter()
            .filter_map(TsvLine::as_comment)
            .find(|comment| comment.field.ends_with(field))
            .map(|comment| comment.value.as_str())
    }

    /// Number of token lines (the comments are not counted).
    pub fn n_tokens(&self) -> usize {
        self.n_tokens
    }

    /// Entities of every layer holding at least one entity.
    pub fn entities(&self) -> &BTreeMap<EntityLayer, Vec<Entity>> {
        &self.entities
    }

    /// Entities of a single layer. Empty when the layer holds no entity.
    pub fn entities_of(&self, layer: EntityLayer) -> &[Entity] {
        self.entities
            .get(&layer)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}
