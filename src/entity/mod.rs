/*!
This module groups the annotated tokens of a document into entities, one tagging layer at a time.
Each layer is read from its own column and segmented independently of the others.
*/
use crate::line::TsvAnnotation;
use crate::mask::MASK;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::mem::take;

mod layer;
mod tag;

// Re-exporting
pub use layer::{ColumnAccessor, EntityLayer, LayerParsingError};
pub use tag::{IobPrefix, IobTag};

/// An entity is a contiguous run of tokens tagged in one layer. It is never read from the corpus
/// directly: it is rebuilt from the tags of its tokens.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Entity {
    /// The tokens of the entity, each one followed by a space unless its `MISC` column holds the
    /// `NoSpaceAfter` flag. The space after the last token is kept.
    pub surface: String,
    pub layer: EntityLayer,
    /// The label of the first token, without its prefix (`pers` for `B-pers`).
    pub tag: String,
    /// Link of the first token to a knowledge base (e.g. a Wikidata QID).
    pub link: Option<String>,
    /// 1-based line numbers of the tokens of the entity.
    pub lines: Vec<usize>,
}

impl Display for Entity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "({}, {}, {:?}, {}, {:?})",
            self.layer,
            self.tag,
            self.surface,
            self.link.as_deref().unwrap_or(MASK),
            self.lines
        )
    }
}

impl Entity {
    /// Materializes a run of tokens into an entity. Only the first token is used to find the tag
    /// and the link; the following ones are not checked against it. Returns `None` on an empty
    /// run or when the first token carries no entity tag.
    ///
    /// * `chunk`: The tokens of the entity, in document order.
    /// * `layer`: The layer the run was read from.
    pub fn from_chunk(chunk: &[&TsvAnnotation], layer: EntityLayer) -> Option<Self> {
        let first = chunk.first()?;
        let tag = IobTag::parse(layer.tag_column()(first)).label()?;
        let link = layer
            .link_column()
            .and_then(|column| column(first))
            .filter(|link| *link != MASK)
            .map(String::from);
        let mut surface = String::new();
        for annotation in chunk {
            surface.push_str(&annotation.token);
            if !annotation.no_space_after() {
                surface.push(' ');
            }
        }
        Some(Entity {
            surface,
            layer,
            tag: String::from(tag),
            link,
            lines: chunk.iter().map(|a| a.line_number + 1).collect(),
        })
    }
}

/// This struct iterates over the tokens of a *single* document and returns the runs of tokens
/// forming the entities of one layer.
///
/// A `B-` tag always closes the current run and opens a new one, even right after another `B-`
/// tag. An `I-` tag extends the current run whatever its label; without an open run, the token
/// is skipped. Any other value (`O`, `_`, empty, absent) closes the current run. The last run is
/// returned when the tokens are exhausted.
pub(crate) struct LayerChunkIter<'a, I>
where
    I: Iterator<Item = &'a TsvAnnotation>,
{
    /// The content on which we are iterating
    content: I,
    tag_column: ColumnAccessor,
    /// Tokens of the open run. The run is open iff this is not empty.
    current: Vec<&'a TsvAnnotation>,
}

impl<'a, I> LayerChunkIter<'a, I>
where
    I: Iterator<Item = &'a TsvAnnotation>,
{
    pub(crate) fn new(content: I, layer: EntityLayer) -> Self {
        LayerChunkIter {
            content,
            tag_column: layer.tag_column(),
            current: Vec::new(),
        }
    }

    fn is_inside(&self) -> bool {
        !self.current.is_empty()
    }
}

impl<'a, I> Iterator for LayerChunkIter<'a, I>
where
    I: Iterator<Item = &'a TsvAnnotation>,
{
    type Item = Vec<&'a TsvAnnotation>;
    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let Some(annotation) = self.content.next() else {
                // no more tokens, flush the open run
                return self.is_inside().then(|| take(&mut self.current));
            };
            match IobTag::parse((self.tag_column)(annotation)) {
                IobTag::Begin(_) => {
                    let previous = take(&mut self.current);
                    self.current.push(annotation);
                    if !previous.is_empty() {
                        return Some(previous);
                    }
                }
                IobTag::Inside(_) => {
                    if self.is_inside() {
                        self.current.push(annotation);
                    }
                }
                IobTag::Outside => {
                    if self.is_inside() {
                        return Some(take(&mut self.current));
                    }
                }
            }
        }
    }
}

/// Retrieves the entities of one layer from the tokens of a document.
pub fn get_entities<'a, T>(annotations: T, layer: EntityLayer) -> Vec<Entity>
where
    T: IntoIterator<Item = &'a TsvAnnotation>,
{
    LayerChunkIter::new(annotations.into_iter(), layer)
        .filter_map(|chunk| Entity::from_chunk(&chunk, layer))
        .collect()
}
