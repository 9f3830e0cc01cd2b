use crate::line::TsvAnnotation;
use enum_iterator::Sequence;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::Display;
use std::str::FromStr;

/// Reads one column of an annotation line.
pub type ColumnAccessor = fn(&TsvAnnotation) -> Option<&str>;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Sequence, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
/// The six independent tagging layers of a HIPE corpus. A token can belong to an entity in
/// several layers at once. The order of the variants is the order of the columns.
pub enum EntityLayer {
    CoarseLit,
    CoarseMeto,
    FineLit,
    FineMeto,
    FineComp,
    Nested,
}

impl EntityLayer {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CoarseLit => "coarse_lit",
            Self::CoarseMeto => "coarse_meto",
            Self::FineLit => "fine_lit",
            Self::FineMeto => "fine_meto",
            Self::FineComp => "fine_comp",
            Self::Nested => "nested",
        }
    }

    /// Column holding the tags of this layer.
    pub fn tag_column(&self) -> ColumnAccessor {
        match self {
            Self::CoarseLit => ne_coarse_lit,
            Self::CoarseMeto => ne_coarse_meto,
            Self::FineLit => ne_fine_lit,
            Self::FineMeto => ne_fine_meto,
            Self::FineComp => ne_fine_comp,
            Self::Nested => ne_nested,
        }
    }

    /// Column holding the entity links of this layer. Components and nested entities are never
    /// linked.
    pub fn link_column(&self) -> Option<ColumnAccessor> {
        match self {
            Self::CoarseLit | Self::FineLit => Some(nel_lit as ColumnAccessor),
            Self::CoarseMeto | Self::FineMeto => Some(nel_meto as ColumnAccessor),
            Self::FineComp | Self::Nested => None,
        }
    }
}

fn ne_coarse_lit(a: &TsvAnnotation) -> Option<&str> {
    a.ne_coarse_lit.as_deref()
}
fn ne_coarse_meto(a: &TsvAnnotation) -> Option<&str> {
    a.ne_coarse_meto.as_deref()
}
fn ne_fine_lit(a: &TsvAnnotation) -> Option<&str> {
    a.ne_fine_lit.as_deref()
}
fn ne_fine_meto(a: &TsvAnnotation) -> Option<&str> {
    a.ne_fine_meto.as_deref()
}
fn ne_fine_comp(a: &TsvAnnotation) -> Option<&str> {
    a.ne_fine_comp.as_deref()
}
fn ne_nested(a: &TsvAnnotation) -> Option<&str> {
    a.ne_nested.as_deref()
}
fn nel_lit(a: &TsvAnnotation) -> Option<&str> {
    a.nel_lit.as_deref()
}
fn nel_meto(a: &TsvAnnotation) -> Option<&str> {
    a.nel_meto.as_deref()
}

impl Display for EntityLayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Could not parse the string into an `EntityLayer`
pub struct LayerParsingError(String);

impl Display for LayerParsingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Impossible to parse the string ({}) into an EntityLayer",
            self.0
        )
    }
}

impl Error for LayerParsingError {}

impl FromStr for EntityLayer {
    type Err = LayerParsingError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "coarse_lit" => Ok(Self::CoarseLit),
            "coarse_meto" => Ok(Self::CoarseMeto),
            "fine_lit" => Ok(Self::FineLit),
            "fine_meto" => Ok(Self::FineMeto),
            "fine_comp" => Ok(Self::FineComp),
            "nested" => Ok(Self::Nested),
            _ => Err(LayerParsingError(String::from(s))),
        }
    }
}
