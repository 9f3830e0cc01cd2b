/*!
Reading and writing whole corpus files. A corpus is a UTF-8 text file holding the column header
followed by the documents, separated by a blank line. It can be read from the local filesystem or
fetched from a URL.
*/
use crate::config::HipeConfig;
use crate::document::HipeDocument;
use crate::error::{HipeError, InputResolutionError, MalformedCommentError};
use crate::line::{is_header, COL_LABELS};
use crate::mask::MASK;
use ahash::AHashSet;
use either::Either;
use itertools::Itertools;
use log::{debug, info, warn};
use rayon::prelude::*;
use std::borrow::Cow;
use std::fs::{read_to_string, write};
use std::path::{Path, PathBuf};

/// Separator between two documents of a corpus.
pub const DOCUMENT_SEPARATOR: &str = "\n\n";

/// Metadata field holding the IIIF link of the scanned page of a document.
pub const IIIF_LINK: &str = "segment_iiif_link";

/// Where a corpus is read from.
pub type Input<'a> = Either<&'a Path, &'a str>;

/// Picks the corpus location. The local path wins when both a path and a URL are given.
pub fn resolve_input<'a>(
    path: Option<&'a Path>,
    url: Option<&'a str>,
) -> Result<Input<'a>, InputResolutionError> {
    match (path, url) {
        (Some(path), _) => Ok(Either::Left(path)),
        (None, Some(url)) => Ok(Either::Right(url)),
        (None, None) => Err(InputResolutionError),
    }
}

/// Reads the full content of the corpus in memory.
pub fn read_input(input: Input) -> Result<String, HipeError> {
    match input {
        Either::Left(path) => {
            debug!("Reading corpus from {}", path.display());
            Ok(read_to_string(path)?)
        }
        Either::Right(url) => {
            debug!("Fetching corpus from {}", url);
            let content = reqwest::blocking::get(url)?.error_for_status()?.text()?;
            Ok(content)
        }
    }
}

fn input_name(input: &Input) -> String {
    match input {
        Either::Left(path) => path.display().to_string(),
        Either::Right(url) => url.to_string(),
    }
}

/// Main entrypoint of the library. Reads a corpus, from a local file or from a URL, and parses
/// it into documents. The annotations are masked as specified by the `config`.
///
/// * `path`: Local path of the corpus. Takes precedence over `url`.
/// * `url`: URL of the corpus.
/// * `config`: Masking and parallelism options.
///
/// # Example
/// ```rust,no_run
/// use hipe_commons::{parse_tsv, HipeConfig};
/// use std::path::Path;
///
/// let path = Path::new("HIPE-2022-v2.1-ajmc-dev-en.tsv");
/// let documents = parse_tsv(Some(path), None, &HipeConfig::default()).unwrap();
/// println!("{} documents", documents.len());
/// ```
pub fn parse_tsv(
    path: Option<&Path>,
    url: Option<&str>,
    config: &HipeConfig,
) -> Result<Vec<HipeDocument>, HipeError> {
    let input = resolve_input(path, url)?;
    let content = read_input(input)?;
    let documents = parse_tsv_from_str(&content, &input_name(&input), config)?;
    info!(
        "Parsed {} documents from {}",
        documents.len(),
        input_name(&input)
    );
    Ok(documents)
}

/// Parses a corpus already held in memory. Sections holding no line besides the column header are
/// skipped. Windows line endings (`\r\n`) are read as `\n`.
///
/// * `content`: The whole corpus.
/// * `source`: Path or URL recorded in every document.
/// * `config`: Masking and parallelism options.
pub fn parse_tsv_from_str(
    content: &str,
    source: &str,
    config: &HipeConfig,
) -> Result<Vec<HipeDocument>, MalformedCommentError> {
    let policy = config.mask_policy();
    let content = normalize_line_endings(content);
    let sections = content
        .split(DOCUMENT_SEPARATOR)
        .filter(|section| has_lines(section));
    let parse =
        |section: &str| HipeDocument::from_section(section, source, policy, config.mask());
    if config.parallel() {
        let sections: Vec<&str> = sections.collect();
        sections.into_par_iter().map(parse).collect()
    } else {
        sections.map(parse).collect()
    }
}

fn normalize_line_endings(content: &str) -> Cow<'_, str> {
    if content.contains("\r\n") {
        Cow::Owned(content.replace("\r\n", "\n"))
    } else {
        Cow::Borrowed(content)
    }
}

fn has_lines(section: &str) -> bool {
    section
        .split('\n')
        .any(|line| !line.is_empty() && !is_header(line))
}

/// Renders the documents in the corpus format: the column header, then the lines of each
/// document, documents being separated by a blank line.
///
/// Only the lines are written back. Extra blank lines of the parsed corpus are lost, so a
/// document preceded by more than one blank line gets lower line numbers when the rendered text
/// is parsed again.
pub fn render_tsv(documents: &[HipeDocument]) -> String {
    let header = COL_LABELS.join("\t");
    let body = documents
        .iter()
        .map(|document| document.lines().iter().join("\n"))
        .join(DOCUMENT_SEPARATOR);
    format!("{}\n{}", header, body)
}

/// Writes the documents to `output_path`, see `render_tsv`.
pub fn write_tsv<P: AsRef<Path>>(
    documents: &[HipeDocument],
    output_path: P,
) -> Result<(), HipeError> {
    let output_path = output_path.as_ref();
    write(output_path, render_tsv(documents))?;
    info!(
        "Wrote {} documents to {}",
        documents.len(),
        output_path.display()
    );
    Ok(())
}

/// Finds the corpus files of a release folder holding one sub-folder per language. The files
/// whose name contains `orig` are left out. The paths are sorted.
pub fn find_datasets_files<P: AsRef<Path>>(base_dir: P) -> Result<Vec<PathBuf>, HipeError> {
    let base_dir = base_dir.as_ref().to_string_lossy();
    let pattern = format!("{}/*/*", glob::Pattern::escape(&base_dir));
    let mut files = Vec::new();
    for entry in glob::glob(&pattern)? {
        let path = entry?;
        let is_dataset = path.is_file()
            && path
                .file_name()
                .map(|name| name.to_string_lossy())
                .is_some_and(|name| name.contains(".tsv") && !name.contains("orig"));
        if is_dataset {
            files.push(path);
        }
    }
    files.sort();
    debug!("Found {} dataset files in {}", files.len(), base_dir);
    Ok(files)
}

/// Returns the ids of the documents whose IIIF link is the `_` placeholder. Only the first
/// `segment_iiif_link` of a document is looked at, and prefixed fields such as
/// `hipe2022:segment_iiif_link` are accepted.
pub fn find_missing_iiif_links<P: AsRef<Path>>(path: P) -> Result<AHashSet<String>, HipeError> {
    let documents = parse_tsv(Some(path.as_ref()), None, &HipeConfig::default())?;
    let missing = documents
        .iter()
        .filter(|document| document.first_comment_value(IIIF_LINK) == Some(MASK))
        .filter_map(|document| document.id().map(String::from))
        .collect();
    Ok(missing)
}

/// Checks that every expected document is present in the corpus. The missing ids are logged.
/// Prefixed id fields such as `hipe2022:document_id` are accepted.
pub fn is_tsv_complete<P, S>(path: P, expected_ids: &[S]) -> Result<bool, HipeError>
where
    P: AsRef<Path>,
    S: AsRef<str>,
{
    let path = path.as_ref();
    let documents = parse_tsv(Some(path), None, &HipeConfig::default())?;
    let found: AHashSet<&str> = documents.iter().filter_map(HipeDocument::id).collect();
    let missing: Vec<&str> = expected_ids
        .iter()
        .map(|id| id.as_ref())
        .filter(|id| !found.contains(id))
        .collect();
    if missing.is_empty() {
        return Ok(true);
    }
    warn!(
        "Following documents are missing from {}: {:?}",
        path.display(),
        missing
    );
    Ok(false)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::config::HipeConfigBuilder;
    use crate::entity::EntityLayer;
    use crate::line::TsvLine;
    use quickcheck::{self, TestResult};
    use std::fs::{create_dir_all, File};
    use tempfile::tempdir;

    const CORPUS: &str = "TOKEN\tNE-COARSE-LIT\tNE-COARSE-METO\tNE-FINE-LIT\tNE-FINE-METO\tNE-FINE-COMP\tNE-NESTED\tNEL-LIT\tNEL-METO\tMISC
# document_id = doc1
# segment_iiif_link = _
Cicero\tB-pers\tO\tB-pers.author\tO\tB-comp.name\tO\tQ1541\t_\tNoSpaceAfter
's\tI-pers\tO\tI-pers.author\tO\tO\tO\tQ1541\t_\t_
Ajax\tB-work\tO\tB-work.primlit\tO\tO\tB-pers\tQ184\t_\t_

# document_id = doc2
# segment_iiif_link = https://iiif.example.org/p1/full/full/0/default.jpg
Athens\tB-loc\tB-org\tB-loc.adm.town\tB-org.adm\tO\tO\tQ1524\tQ1524\t_
said\tO\tO\tO\tO\tO\tO\t_\t_\t_
";

    #[test]
    fn test_resolve_input() {
        let path = Path::new("corpus.tsv");
        assert_eq!(
            resolve_input(Some(path), Some("http://x.org")),
            Ok(Either::Left(path))
        );
        assert_eq!(
            resolve_input(None, Some("http://x.org")),
            Ok(Either::Right("http://x.org"))
        );
        assert_eq!(resolve_input(None, None), Err(InputResolutionError));
    }

    #[test]
    fn test_parse_tsv_without_input() {
        let actual = parse_tsv(None, None, &HipeConfig::default());
        assert!(matches!(actual, Err(HipeError::InputResolution(_))));
    }

    #[test]
    fn test_parse_tsv_from_str() {
        let documents = parse_tsv_from_str(CORPUS, "memory", &HipeConfig::default()).unwrap();
        assert_eq!(documents.len(), 2);
        let first = &documents[0];
        assert_eq!(first.id(), Some("doc1"));
        assert_eq!(first.n_tokens(), 3);
        let coarse = first.entities_of(EntityLayer::CoarseLit);
        assert_eq!(coarse.len(), 2);
        assert_eq!(coarse[0].surface, "Cicero's ");
        assert_eq!(coarse[0].lines, vec![4, 5]);
        assert_eq!(coarse[1].link.as_deref(), Some("Q184"));
        assert_eq!(first.entities_of(EntityLayer::Nested)[0].surface, "Ajax ");
        // the second section starts right after the blank line
        let second = &documents[1];
        assert_eq!(second.lines()[0].line_number(), 0);
        let meto = second.entities_of(EntityLayer::CoarseMeto);
        assert_eq!(meto[0].tag, "org");
        assert_eq!(meto[0].lines, vec![3]);
    }

    #[test]
    fn test_parallel_parsing_keeps_order() {
        let config = HipeConfigBuilder::new().parallel(true).build();
        let parallel = parse_tsv_from_str(CORPUS, "memory", &config).unwrap();
        let sequential = parse_tsv_from_str(CORPUS, "memory", &HipeConfig::default()).unwrap();
        assert_eq!(parallel, sequential);
    }

    #[test]
    fn test_empty_sections_are_skipped() {
        let corpus = "TOKEN\tNE-COARSE-LIT\n\n# document_id = a\nx\tO\n\n\n";
        let documents = parse_tsv_from_str(corpus, "memory", &HipeConfig::default()).unwrap();
        assert_eq!(documents.len(), 1);
        assert_eq!(documents[0].id(), Some("a"));
    }

    #[test]
    fn test_masked_parsing() {
        let config = HipeConfig::from((false, true));
        let documents = parse_tsv_from_str(CORPUS, "memory", &config).unwrap();
        let coarse = documents[0].entities_of(EntityLayer::CoarseLit);
        assert_eq!(coarse.len(), 2);
        assert_eq!(coarse[0].link, None);
        assert!(documents[0].entities_of(EntityLayer::Nested).is_empty());
    }

    #[test]
    fn test_render_roundtrip() {
        let documents = parse_tsv_from_str(CORPUS, "memory", &HipeConfig::default()).unwrap();
        let rendered = render_tsv(&documents);
        assert_eq!(rendered, CORPUS.trim_end());
        let reparsed = parse_tsv_from_str(&rendered, "memory", &HipeConfig::default()).unwrap();
        assert_eq!(reparsed, documents);
    }

    #[test]
    fn test_propertie_render_roundtrip() {
        fn propertie_render_roundtrip(tokens: Vec<(String, bool, u8)>) -> TestResult {
            let lines: Vec<String> = tokens
                .iter()
                .map(|(token, begin, n_columns)| {
                    let token: String = token
                        .chars()
                        .filter(|c| !c.is_control() && *c != '#')
                        .collect();
                    let token = format!("w{}", token);
                    let tag = if *begin { "B-loc" } else { "I-loc" };
                    let columns = [tag, "O", "O", "O", "O", "O", "Q1", "_", "_"];
                    let n_columns = usize::from(*n_columns) % (columns.len() + 1);
                    std::iter::once(token.as_str())
                        .chain(columns[..n_columns].iter().copied())
                        .join("\t")
                })
                .collect();
            let corpus = format!(
                "{}\n# document_id = d\n{}",
                COL_LABELS.join("\t"),
                lines.join("\n")
            );
            let documents = parse_tsv_from_str(&corpus, "memory", &HipeConfig::default()).unwrap();
            let reparsed =
                parse_tsv_from_str(&render_tsv(&documents), "memory", &HipeConfig::default())
                    .unwrap();
            let annotations = |docs: &[HipeDocument]| -> Vec<TsvLine> {
                docs.iter().flat_map(|d| d.lines().to_vec()).collect()
            };
            TestResult::from_bool(annotations(&documents) == annotations(&reparsed))
        }
        let mut qc = quickcheck::QuickCheck::new().tests(300);
        qc.quickcheck(propertie_render_roundtrip as fn(Vec<(String, bool, u8)>) -> TestResult)
    }

    #[test]
    fn test_write_and_read_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("corpus.tsv");
        let documents = parse_tsv_from_str(CORPUS, "memory", &HipeConfig::default()).unwrap();
        write_tsv(&documents, &path).unwrap();
        let reread = parse_tsv(Some(path.as_path()), None, &HipeConfig::default()).unwrap();
        assert_eq!(reread.len(), 2);
        assert_eq!(reread[0].path(), path.display().to_string());
        assert_eq!(reread[1].entities(), documents[1].entities());
    }

    #[test]
    fn test_find_missing_iiif_links() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("corpus.tsv");
        write(&path, CORPUS).unwrap();
        let missing = find_missing_iiif_links(&path).unwrap();
        assert_eq!(missing, AHashSet::from_iter([String::from("doc1")]));
    }

    #[test]
    fn test_is_tsv_complete() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("corpus.tsv");
        write(&path, CORPUS).unwrap();
        assert!(is_tsv_complete(&path, &["doc1", "doc2"]).unwrap());
        assert!(!is_tsv_complete(&path, &["doc1", "doc3"]).unwrap());
    }

    const PREFIXED_CORPUS: &str = "# hipe2022:document_id = d1
# hipe2022:segment_iiif_link = _
Le\tO
# hipe2022:segment_iiif_link = https://iiif.example.org/p1/full/full/0/default.jpg
journal\tO

# hipe2022:document_id = d2
# hipe2022:segment_iiif_link = https://iiif.example.org/p2/full/full/0/default.jpg
Genève\tB-loc
# hipe2022:segment_iiif_link = _
";

    #[test]
    fn test_release_checks_with_prefixed_fields() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("hipe2022.tsv");
        write(&path, PREFIXED_CORPUS).unwrap();
        let missing = find_missing_iiif_links(&path).unwrap();
        assert_eq!(missing, AHashSet::from_iter([String::from("d1")]));
        assert!(is_tsv_complete(&path, &["d1", "d2"]).unwrap());
        assert!(!is_tsv_complete(&path, &["d1", "d3"]).unwrap());
    }

    #[test]
    fn test_crlf_line_endings() {
        let corpus = "TOKEN\tNE-COARSE-LIT\r\n# document_id = a\r\nRome\tB-loc\r\n\r\n# document_id = b\r\nParis\tB-loc\r\n";
        let documents = parse_tsv_from_str(corpus, "memory", &HipeConfig::default()).unwrap();
        assert_eq!(documents.len(), 2);
        let ids: Vec<Option<&str>> = documents.iter().map(HipeDocument::id).collect();
        assert_eq!(ids, vec![Some("a"), Some("b")]);
        for document in &documents {
            assert_eq!(document.n_tokens(), 1);
            let entities = document.entities_of(EntityLayer::CoarseLit);
            assert_eq!(entities.len(), 1);
            assert_eq!(entities[0].tag, "loc");
        }
        assert_eq!(documents[0].entities_of(EntityLayer::CoarseLit)[0].surface, "Rome ");
    }

    #[test]
    fn test_render_drops_extra_blank_lines() {
        let corpus = "# document_id = a\nRome\tB-loc\n\n\n# document_id = b\nParis\tB-loc";
        let documents = parse_tsv_from_str(corpus, "memory", &HipeConfig::default()).unwrap();
        assert_eq!(documents[1].entities_of(EntityLayer::CoarseLit)[0].lines, vec![3]);
        let rendered = render_tsv(&documents);
        assert!(!rendered.contains("\n\n\n"));
        let reparsed = parse_tsv_from_str(&rendered, "memory", &HipeConfig::default()).unwrap();
        assert_eq!(reparsed.len(), 2);
        assert_eq!(reparsed[1].entities_of(EntityLayer::CoarseLit)[0].lines, vec![2]);
    }

    #[test]
    fn test_find_datasets_files() {
        let dir = tempdir().unwrap();
        for (lang, file) in [
            ("en", "HIPE-2022-ajmc-dev-en.tsv"),
            ("en", "HIPE-2022-ajmc-dev-en.orig.tsv"),
            ("de", "HIPE-2022-ajmc-train-de.tsv"),
            ("de", "README.md"),
        ] {
            let lang_dir = dir.path().join(lang);
            create_dir_all(&lang_dir).unwrap();
            File::create(lang_dir.join(file)).unwrap();
        }
        let actual = find_datasets_files(dir.path()).unwrap();
        let expected = vec![
            dir.path().join("de").join("HIPE-2022-ajmc-train-de.tsv"),
            dir.path().join("en").join("HIPE-2022-ajmc-dev-en.tsv"),
        ];
        assert_eq!(actual, expected);
    }
}
