//! Build tag and brand resolution.
//!
//! A build tag selects which product variant of the documentation is
//! produced. Two tags are canonical brand names; tags carrying the
//! private-build prefix map to the enterprise brand. Everything else is a
//! valid tag with no brand association, which disables brand placeholder
//! substitution for that build.

use std::fmt;

/// Prefix marking private-label builds of the enterprise brand.
const PRIVATE_BUILD_PREFIX: &str = "bsg-";

/// Product brand selected by a build tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Brand {
    /// The community edition.
    FreeNas,
    /// The enterprise edition.
    TrueNas,
}

impl Brand {
    /// Brand name with the registered-trademark markup used in body text.
    #[must_use]
    pub fn markup(self) -> &'static str {
        match self {
            Self::FreeNas => "FreeNAS\\ :sup:`\u{ae}`",
            Self::TrueNas => "TrueNAS\\ :sup:`\u{ae}`",
        }
    }

    /// Brand name without markup, for headings and titles.
    #[must_use]
    pub fn plain(self) -> &'static str {
        match self {
            Self::FreeNas => "FreeNAS",
            Self::TrueNas => "TrueNAS",
        }
    }

    /// Lowercase brand name, for URLs and paths.
    #[must_use]
    pub fn lower(self) -> &'static str {
        match self {
            Self::FreeNas => "freenas",
            Self::TrueNas => "truenas",
        }
    }
}

/// Build tag identifying the variant being built.
///
/// Immutable for the whole run; read by the conditional filter (as a block
/// label) and the substitution engine (for brand resolution).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BuildTag(String);

impl BuildTag {
    /// Create a build tag.
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    /// The tag text, as matched against conditional block labels.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Brand selected by this tag.
    ///
    /// Returns `None` for unrecognized tags, which intentionally disables
    /// brand placeholder substitution rather than failing the build.
    #[must_use]
    pub fn brand(&self) -> Option<Brand> {
        match self.0.as_str() {
            "freenas" => Some(Brand::FreeNas),
            "truenas" => Some(Brand::TrueNas),
            tag if tag.starts_with(PRIVATE_BUILD_PREFIX) => Some(Brand::TrueNas),
            _ => None,
        }
    }
}

impl fmt::Display for BuildTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
