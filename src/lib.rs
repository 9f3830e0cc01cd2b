/*!
This library holds the helpers shared by the tools of the HIPE named entity recognition and
linking evaluation campaigns. It reads the HIPE TSV format into documents, rebuilds their
entities, masks the ground truth for the blind test releases, writes the documents back and
describes datasets.

# FORMAT
A corpus file starts with a header naming the ten columns. Documents follow, separated by a blank
line. A document mixes two kinds of lines:
* Comments, such as `# document_id = doc1`. Each comment holds a single `field = value` pair and
    feeds the metadata of the document.
* Tokens, with ten tab separated columns: `TOKEN`, `NE-COARSE-LIT`, `NE-COARSE-METO`,
    `NE-FINE-LIT`, `NE-FINE-METO`, `NE-FINE-COMP`, `NE-NESTED`, `NEL-LIT`, `NEL-METO` and `MISC`.
    Missing columns at the end of a line are accepted.

# Terminology
* A layer is one of the six independent tagging columns (coarse literal, coarse metonymic, fine
    literal, fine metonymic, fine component and nested). A token can be part of an entity in
    several layers at once.
* A tag is the value of a layer column, using the IOB scheme: `B-pers` begins a person, `I-pers`
    continues it and `O` is outside of any entity.
* An entity is a run of tokens of one layer, opened by a `B-` tag and continued by `I-` tags. Its
    surface is rebuilt from the tokens, using the `NoSpaceAfter` flag of the `MISC` column.
* Masking hides the annotations of the ground truth when preparing the test release of a shared
    task.

# Example
```rust
use hipe_commons::{parse_tsv_from_str, EntityLayer, HipeConfig};

let corpus = "# document_id = doc1
Cicero\tB-pers\tO\tO\tO\tO\tO\tQ1541\t_\t_
said\tO\tO\tO\tO\tO\tO\t_\t_\t_";

let documents = parse_tsv_from_str(corpus, "memory", &HipeConfig::default()).unwrap();
let entity = &documents[0].entities_of(EntityLayer::CoarseLit)[0];

assert_eq!(entity.surface, "Cicero ");
assert_eq!(entity.tag, "pers");
assert_eq!(entity.link.as_deref(), Some("Q1541"));
assert_eq!(entity.lines, vec![2]);
```
*/

mod config;
mod corpus;
mod document;
mod entity;
mod error;
mod line;
mod mask;
mod reporter;
mod stats;

// The public api starts here
pub use config::{HipeConfig, HipeConfigBuilder};

pub use corpus::{
    find_datasets_files, find_missing_iiif_links, is_tsv_complete, parse_tsv, parse_tsv_from_str,
    read_input, render_tsv, resolve_input, write_tsv, Input, DOCUMENT_SEPARATOR, IIIF_LINK,
};

pub use document::{HipeDocument, DOCUMENT_ID};

pub use entity::{
    get_entities, ColumnAccessor, Entity, EntityLayer, IobPrefix, IobTag, LayerParsingError,
};

pub use error::{HipeError, InputResolutionError, MalformedCommentError};

pub use line::{
    is_comment, parse_annotation, parse_comment, parse_tsv_line, TsvAnnotation, TsvComment,
    TsvLine, COL_LABELS, COMMENT_MARKER, NO_SPACE_AFTER,
};

pub use mask::{mask_all, mask_nel, MaskPolicy, MASK};

pub use reporter::{DatasetReport, EntityCounts};

pub use stats::{count_entities, describe_dataset, report};
