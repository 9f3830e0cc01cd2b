/*!
This module parses the raw lines of a HIPE TSV document into typed records. A document line is
either a comment (`# field = value`) or a token annotated over ten tab separated columns.
*/
use crate::error::MalformedCommentError;
use crate::mask::MaskPolicy;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Labels of the ten columns, in the order they appear in an annotation line.
pub const COL_LABELS: [&str; 10] = [
    "TOKEN",
    "NE-COARSE-LIT",
    "NE-COARSE-METO",
    "NE-FINE-LIT",
    "NE-FINE-METO",
    "NE-FINE-COMP",
    "NE-NESTED",
    "NEL-LIT",
    "NEL-METO",
    "MISC",
];

/// Marker starting every comment line.
pub const COMMENT_MARKER: char = '#';

/// Value found in the `MISC` column of a token not followed by a whitespace.
pub const NO_SPACE_AFTER: &str = "NoSpaceAfter";

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
/// A `# field = value` directive, such as `# document_id = doc1`.
pub struct TsvComment {
    pub line_number: usize,
    pub field: String,
    pub value: String,
}

impl Display for TsvComment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} = {}", COMMENT_MARKER, self.field, self.value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
/// A single token and all of its annotations. Every column but the token itself is optional: a
/// short line leaves its trailing columns to `None`.
pub struct TsvAnnotation {
    pub line_number: usize,
    pub token: String,
    pub ne_coarse_lit: Option<String>,
    pub ne_coarse_meto: Option<String>,
    pub ne_fine_lit: Option<String>,
    pub ne_fine_meto: Option<String>,
    pub ne_fine_comp: Option<String>,
    pub ne_nested: Option<String>,
    pub nel_lit: Option<String>,
    pub nel_meto: Option<String>,
    pub misc: Option<String>,
}

impl TsvAnnotation {
    /// The nine optional columns, in file order.
    fn columns(&self) -> [Option<&str>; 9] {
        [
            self.ne_coarse_lit.as_deref(),
            self.ne_coarse_meto.as_deref(),
            self.ne_fine_lit.as_deref(),
            self.ne_fine_meto.as_deref(),
            self.ne_fine_comp.as_deref(),
            self.ne_nested.as_deref(),
            self.nel_lit.as_deref(),
            self.nel_meto.as_deref(),
            self.misc.as_deref(),
        ]
    }

    /// Is this token glued to the next one in the original text?
    pub fn no_space_after(&self) -> bool {
        self.misc
            .as_deref()
            .is_some_and(|misc| misc.contains(NO_SPACE_AFTER))
    }
}

/// Trailing absent columns are not rendered, so that a short line is written back as it was read.
/// An absent column followed by a present one is rendered as an empty field.
impl Display for TsvAnnotation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let columns = self.columns();
        let n_present = columns
            .iter()
            .rposition(|c| c.is_some())
            .map_or(0, |i| i + 1);
        let rendered = std::iter::once(self.token.as_str())
            .chain(columns[..n_present].iter().map(|c| c.unwrap_or("")))
            .join("\t");
        write!(f, "{}", rendered)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
/// A line of a document. The order of the lines inside a document is significant.
pub enum TsvLine {
    Comment(TsvComment),
    Annotation(TsvAnnotation),
}

impl TsvLine {
    pub fn line_number(&self) -> usize {
        match self {
            Self::Comment(c) => c.line_number,
            Self::Annotation(a) => a.line_number,
        }
    }

    pub fn as_annotation(&self) -> Option<&TsvAnnotation> {
        match self {
            Self::Annotation(a) => Some(a),
            Self::Comment(_) => None,
        }
    }

    pub fn as_comment(&self) -> Option<&TsvComment> {
        match self {
            Self::Comment(c) => Some(c),
            Self::Annotation(_) => None,
        }
    }
}

impl Display for TsvLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Comment(c) => c.fmt(f),
            Self::Annotation(a) => a.fmt(f),
        }
    }
}

impl From<TsvComment> for TsvLine {
    fn from(value: TsvComment) -> Self {
        Self::Comment(value)
    }
}

impl From<TsvAnnotation> for TsvLine {
    fn from(value: TsvAnnotation) -> Self {
        Self::Annotation(value)
    }
}

/// A comment starts with `#` and holds a `=` somewhere.
pub fn is_comment(line: &str) -> bool {
    line.starts_with(COMMENT_MARKER) && line.contains('=')
}

/// Is this line the column header (`TOKEN\tNE-COARSE-LIT\t...`)?
pub(crate) fn is_header(line: &str) -> bool {
    line.starts_with(COL_LABELS[0])
}

/// Parses a comment line into a `TsvComment`. The comment marker is removed, then the rest is
/// split on `=`; both sides are trimmed.
///
/// * `line`: The raw comment line.
/// * `line_number`: Index of the line in its document section.
pub fn parse_comment(line: &str, line_number: usize) -> Result<TsvComment, MalformedCommentError> {
    let body = line.strip_prefix(COMMENT_MARKER).unwrap_or(line);
    let mut parts = body.split('=');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(field), Some(value), None) => Ok(TsvComment {
            line_number,
            field: field.trim().to_string(),
            value: value.trim().to_string(),
        }),
        _ => Err(MalformedCommentError {
            line_number,
            line: line.to_string(),
        }),
    }
}

/// Parses a line into a `TsvAnnotation`. This function never fails: columns missing at the end of
/// the line are set to `None`.
pub fn parse_annotation(line: &str, line_number: usize) -> TsvAnnotation {
    let mut values = line.split('\t');
    let token = values.next().unwrap_or_default().to_string();
    let mut next = || values.next().map(String::from);
    TsvAnnotation {
        line_number,
        token,
        ne_coarse_lit: next(),
        ne_coarse_meto: next(),
        ne_fine_lit: next(),
        ne_fine_meto: next(),
        ne_fine_comp: next(),
        ne_nested: next(),
        nel_lit: next(),
        nel_meto: next(),
        misc: next(),
    }
}

/// Parses any line of a document, applying the masking policy to annotation lines.
pub fn parse_tsv_line(
    line: &str,
    line_number: usize,
    policy: MaskPolicy,
    mask: &str,
) -> Result<TsvLine, MalformedCommentError> {
    if is_comment(line) {
        return parse_comment(line, line_number).map(TsvLine::from);
    }
    let annotation = parse_annotation(line, line_number);
    Ok(TsvLine::from(policy.apply(annotation, mask)))
}

#[cfg(test)]
pub(crate) mod test {
    use super::*;
    use crate::mask::MASK;
    use rstest::rstest;

    pub(crate) const CICERO: &str = "Cicero\tB-pers\tO\tB-pers.author\tO\tO\tO\tQ1541\t_\tNoSpaceAfter";

    #[rstest]
    #[case("# document_id = doc1", true)]
    #[case("#document_id=doc1", true)]
    #[case("# a comment without separator", false)]
    #[case("Cicero\tB-pers", false)]
    #[case("a = b", false)]
    fn test_is_comment(#[case] line: &str, #[case] expected: bool) {
        assert_eq!(is_comment(line), expected)
    }

    #[test]
    fn test_parse_comment() {
        let actual = parse_comment("#  hipe2022:document_type =  commentary ", 4).unwrap();
        let expected = TsvComment {
            line_number: 4,
            field: String::from("hipe2022:document_type"),
            value: String::from("commentary"),
        };
        assert_eq!(actual, expected)
    }

    #[rstest]
    #[case("# a = b = c")]
    #[case("# url = http://x.org/?a=b")]
    fn test_parse_comment_ambiguous_split(#[case] line: &str) {
        let actual = parse_comment(line, 2);
        let expected = Err(MalformedCommentError {
            line_number: 2,
            line: String::from(line),
        });
        assert_eq!(actual, expected)
    }

    #[test]
    fn test_parse_full_annotation() {
        let actual = parse_annotation(CICERO, 1);
        assert_eq!(actual.line_number, 1);
        assert_eq!(actual.token, "Cicero");
        assert_eq!(actual.ne_coarse_lit.as_deref(), Some("B-pers"));
        assert_eq!(actual.ne_fine_lit.as_deref(), Some("B-pers.author"));
        assert_eq!(actual.nel_lit.as_deref(), Some("Q1541"));
        assert_eq!(actual.nel_meto.as_deref(), Some("_"));
        assert_eq!(actual.misc.as_deref(), Some("NoSpaceAfter"));
        assert!(actual.no_space_after());
    }

    #[test]
    fn test_parse_short_annotation() {
        let actual = parse_annotation("said\tO\tO", 7);
        assert_eq!(actual.token, "said");
        assert_eq!(actual.ne_coarse_lit.as_deref(), Some("O"));
        assert_eq!(actual.ne_coarse_meto.as_deref(), Some("O"));
        assert_eq!(actual.ne_fine_lit, None);
        assert_eq!(actual.misc, None);
        assert!(!actual.no_space_after());
    }

    #[rstest]
    #[case(CICERO)]
    #[case("said\tO\tO")]
    #[case("word")]
    fn test_annotation_display_keeps_line(#[case] line: &str) {
        assert_eq!(parse_annotation(line, 0).to_string(), line)
    }

    #[test]
    fn test_comment_display() {
        let comment = parse_comment("#document_id=doc1", 0).unwrap();
        assert_eq!(comment.to_string(), "# document_id = doc1")
    }

    #[test]
    fn test_parse_tsv_line() {
        let comment = parse_tsv_line("# language = en", 0, MaskPolicy::All, MASK).unwrap();
        assert!(matches!(comment, TsvLine::Comment(_)));
        let annotation = parse_tsv_line(CICERO, 1, MaskPolicy::All, MASK).unwrap();
        let annotation = annotation.as_annotation().unwrap();
        assert_eq!(annotation.ne_coarse_lit.as_deref(), Some("_"));
        assert_eq!(annotation.misc.as_deref(), Some("NoSpaceAfter"));
        assert!(parse_tsv_line("# a = b = c", 2, MaskPolicy::Unmasked, MASK).is_err());
    }
}
