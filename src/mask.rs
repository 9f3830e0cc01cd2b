/*!
Ground-truth masking. The blind test release of a shared task keeps the tokens and their `MISC`
column, and hides the annotations that the participants must predict.
*/
use crate::line::TsvAnnotation;
use log::warn;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Default value written in place of a hidden annotation.
pub const MASK: &str = "_";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
/// Which columns of an annotation line are hidden when parsing.
pub enum MaskPolicy {
    /// Nothing is hidden.
    #[default]
    Unmasked,
    /// Every tag and link column is hidden (`mask_nerc` and `mask_nel`).
    All,
    /// Only the nested tags and the entity links are hidden (`mask_nel` alone).
    NelOnly,
}

impl MaskPolicy {
    /// Masks the annotation according to the policy.
    pub fn apply(self, annotation: TsvAnnotation, mask: &str) -> TsvAnnotation {
        match self {
            Self::Unmasked => annotation,
            Self::All => mask_all(&annotation, mask),
            Self::NelOnly => mask_nel(&annotation, mask),
        }
    }
}

/// Builds the policy from the `(mask_nerc, mask_nel)` flags.
impl From<(bool, bool)> for MaskPolicy {
    fn from(value: (bool, bool)) -> Self {
        match value {
            (false, false) => Self::Unmasked,
            (true, true) => Self::All,
            (false, true) => Self::NelOnly,
            (true, false) => {
                warn!("Masking NERC without masking NEL is not a supported release format, the annotations are left untouched");
                Self::Unmasked
            }
        }
    }
}

impl Display for MaskPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Hides every annotation of a line. Only `token` and `misc` are kept.
pub fn mask_all(annotation: &TsvAnnotation, mask: &str) -> TsvAnnotation {
    let hidden = || Some(mask.to_string());
    TsvAnnotation {
        line_number: annotation.line_number,
        token: annotation.token.clone(),
        ne_coarse_lit: hidden(),
        ne_coarse_meto: hidden(),
        ne_fine_lit: hidden(),
        ne_fine_meto: hidden(),
        ne_fine_comp: hidden(),
        ne_nested: hidden(),
        nel_lit: hidden(),
        nel_meto: hidden(),
        misc: annotation.misc.clone(),
    }
}

/// Hides the entity links and the nested tags of a line. The other NERC columns, `token` and
/// `misc` are kept.
pub fn mask_nel(annotation: &TsvAnnotation, mask: &str) -> TsvAnnotation {
    let hidden = || Some(mask.to_string());
    TsvAnnotation {
        ne_nested: hidden(),
        nel_lit: hidden(),
        nel_meto: hidden(),
        ..annotation.clone()
    }
}
