/**
This module parses the value of a tag column (e.g. `B-pers`, `I-loc.adm.town`, `O`) into its
prefix and its label.
*/
use enum_iterator::Sequence;
use std::fmt::Display;

/// Character separating the prefix from the label.
pub(crate) const DELIMITER: char = '-';

#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, Sequence)]
/// Position of a token in an entity. Only the `IOB` prefixes are used in HIPE corpora.
pub enum IobPrefix {
    B,
    I,
    O,
}

impl IobPrefix {
    fn try_from_char(value: char) -> Option<Self> {
        match value {
            'B' => Some(Self::B),
            'I' => Some(Self::I),
            'O' => Some(Self::O),
            _ => None,
        }
    }
}

impl Display for IobPrefix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
/// A parsed tag value. Anything that is neither a `B-` nor an `I-` tag is outside of an entity,
/// which includes `O`, the `_` placeholder, an empty column and an absent column.
pub enum IobTag<'a> {
    Begin(&'a str),
    Inside(&'a str),
    Outside,
}

impl<'a> IobTag<'a> {
    /// Reads the tag of a column. Never fails.
    pub fn parse(value: Option<&'a str>) -> Self {
        let Some(value) = value else {
            return Self::Outside;
        };
        let mut chars = value.chars();
        let prefix = chars.next().and_then(IobPrefix::try_from_char);
        let has_delimiter = chars.next() == Some(DELIMITER);
        // Both the prefix and the delimiter are one byte long.
        match (prefix, has_delimiter) {
            (Some(IobPrefix::B), true) => Self::Begin(&value[2..]),
            (Some(IobPrefix::I), true) => Self::Inside(&value[2..]),
            _ => Self::Outside,
        }
    }

    pub fn prefix(&self) -> IobPrefix {
        match self {
            Self::Begin(_) => IobPrefix::B,
            Self::Inside(_) => IobPrefix::I,
            Self::Outside => IobPrefix::O,
        }
    }

    /// The label without its prefix (`pers` for `B-pers`).
    pub fn label(&self) -> Option<&'a str> {
        match self {
            Self::Begin(label) | Self::Inside(label) => Some(label),
            Self::Outside => None,
        }
    }
}
