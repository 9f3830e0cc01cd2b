/*
 * This modules contains the `HipeConfig` struct, which implements the default trait. This config
 * can be passed to the `parse_tsv` and `parse_tsv_from_str` functions to simplify their arguments.
*/
use crate::mask::{MaskPolicy, MASK};
use std::fmt::{Debug, Display};

#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
/// Config struct used to simplify the inputs of parameters to the parsing functions. It
/// implements the default trait.
pub struct HipeConfig {
    /// Hide the NERC annotations. Only meaningful together with `mask_nel`, as the blind release
    /// of the NERC tasks hides the links as well.
    pub(crate) mask_nerc: bool,
    /// Hide the entity links and the nested entities.
    pub(crate) mask_nel: bool,
    /// Value written in place of a hidden annotation.
    pub(crate) mask: String,
    /// Can we use multiple cores to parse the documents? The documents are returned in the order
    /// of the corpus either way.
    pub(crate) parallel: bool,
}

impl HipeConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// The masking policy resulting from the `mask_nerc` and `mask_nel` flags.
    pub fn mask_policy(&self) -> MaskPolicy {
        MaskPolicy::from((self.mask_nerc, self.mask_nel))
    }

    pub fn mask(&self) -> &str {
        &self.mask
    }

    pub fn parallel(&self) -> bool {
        self.parallel
    }
}

impl Default for HipeConfig {
    fn default() -> Self {
        Self {
            mask_nerc: false,
            mask_nel: false,
            mask: String::from(MASK),
            parallel: false,
        }
    }
}

impl From<(bool, bool)> for HipeConfig {
    fn from(value: (bool, bool)) -> Self {
        Self {
            mask_nerc: value.0,
            mask_nel: value.1,
            ..Self::default()
        }
    }
}

impl Display for HipeConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let string = format!("Mask NERC annotations: {}\n Mask NEL annotations: {}\n Mask value: {:?}\n Using parallel parsing: {}", self.mask_nerc, self.mask_nel, self.mask, self.parallel);
        write!(f, "{}", string)
    }
}

/// This builder can be used to build and customize a `HipeConfig` stucture.
#[derive(Clone, Debug, Default)]
pub struct HipeConfigBuilder {
    mask_nerc: bool,
    mask_nel: bool,
    mask: Option<String>,
    parallel: bool,
}

impl HipeConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn mask_nerc(mut self, mask_nerc: bool) -> Self {
        self.mask_nerc = mask_nerc;
        self
    }
    pub fn mask_nel(mut self, mask_nel: bool) -> Self {
        self.mask_nel = mask_nel;
        self
    }
    pub fn mask<S: Into<String>>(mut self, mask: S) -> Self {
        self.mask = Some(mask.into());
        self
    }
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
    pub fn build(self) -> HipeConfig {
        HipeConfig::from(self)
    }
}

impl From<HipeConfigBuilder> for HipeConfig {
    fn from(value: HipeConfigBuilder) -> Self {
        Self {
            mask_nerc: value.mask_nerc,
            mask_nel: value.mask_nel,
            mask: value.mask.unwrap_or_else(|| String::from(MASK)),
            parallel: value.parallel,
        }
    }
}
