/*!
Errors returned while reading, parsing and writing HIPE corpora.
*/
use std::error::Error;
use std::fmt::Display;

#[derive(Debug, Clone, PartialEq, Eq)]
/// A line starting with the comment marker and containing a `=` could not be split into exactly
/// one `field = value` pair.
pub struct MalformedCommentError {
    /// Index of the line inside its document section.
    pub line_number: usize,
    /// The raw line, as read from the corpus.
    pub line: String,
}

impl Display for MalformedCommentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Could not split the comment at line {} into a single `field = value` pair: {}",
            self.line_number, self.line
        )
    }
}

impl Error for MalformedCommentError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Neither a local path nor a URL was given to the parsing entrypoint.
pub struct InputResolutionError;

impl Display for InputResolutionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Either a file path or a file URL must be provided")
    }
}

impl Error for InputResolutionError {}

#[derive(Debug)]
/// Enum of errors wrapping the actual error structs.
pub enum HipeError {
    MalformedComment(MalformedCommentError),
    InputResolution(InputResolutionError),
    Io(std::io::Error),
    Http(reqwest::Error),
    GlobPattern(glob::PatternError),
    Glob(glob::GlobError),
}

impl Display for HipeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MalformedComment(e) => Display::fmt(e, f),
            Self::InputResolution(e) => Display::fmt(e, f),
            Self::Io(e) => write!(f, "I/O error: {}", e),
            Self::Http(e) => write!(f, "Could not fetch the remote corpus: {}", e),
            Self::GlobPattern(e) => write!(f, "Invalid dataset pattern: {}", e),
            Self::Glob(e) => write!(f, "Could not list dataset files: {}", e),
        }
    }
}

impl Error for HipeError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::MalformedComment(e) => Some(e),
            Self::InputResolution(e) => Some(e),
            Self::Io(e) => Some(e),
            Self::Http(e) => Some(e),
            Self::GlobPattern(e) => Some(e),
            Self::Glob(e) => Some(e),
        }
    }
}

impl From<MalformedCommentError> for HipeError {
    fn from(value: MalformedCommentError) -> Self {
        Self::MalformedComment(value)
    }
}

impl From<InputResolutionError> for HipeError {
    fn from(value: InputResolutionError) -> Self {
        Self::InputResolution(value)
    }
}

impl From<std::io::Error> for HipeError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<reqwest::Error> for HipeError {
    fn from(value: reqwest::Error) -> Self {
        Self::Http(value)
    }
}

impl From<glob::PatternError> for HipeError {
    fn from(value: glob::PatternError) -> Self {
        Self::GlobPattern(value)
    }
}

impl From<glob::GlobError> for HipeError {
    fn from(value: glob::GlobError) -> Self {
        Self::Glob(value)
    }
}
