//! Architecture canonicalization.
//!
//! Registries and local engines describe the same platform with
//! different field names. Each source converts itself into an
//! [`ArchSpec`] so that both render the same `arch[/variant]` string.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tag_meta_utils::{constants::DEFAULT_ARCH, platform::Platform, string};

use crate::lenient::lenient;

/// A canonical architecture with an optional variant.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ArchSpec {
    architecture: String,
    variant: Option<String>,
}

impl ArchSpec {
    /// Normalizes raw architecture and variant values.
    ///
    /// A missing or empty architecture becomes `amd64`. An
    /// empty variant is dropped.
    #[must_use]
    pub fn new(architecture: Option<&str>, variant: Option<&str>) -> Self {
        Self {
            architecture: architecture
                .filter(|arch| !arch.is_empty())
                .map_or_else(|| string!(DEFAULT_ARCH), ToOwned::to_owned),
            variant: variant
                .filter(|variant| !variant.is_empty())
                .map(ToOwned::to_owned),
        }
    }

    #[must_use]
    pub fn architecture(&self) -> &str {
        &self.architecture
    }

    #[must_use]
    pub fn variant(&self) -> Option<&str> {
        self.variant.as_deref()
    }
}

impl std::fmt::Display for ArchSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.variant {
            Some(variant) => write!(f, "{}/{variant}", self.architecture),
            None => write!(f, "{}", self.architecture),
        }
    }
}

impl From<Platform> for ArchSpec {
    fn from(value: Platform) -> Self {
        Self::new(Some(value.arch()), value.variant())
    }
}

/// Anything that knows which architecture an image was built for.
pub trait ArchitectureLocator {
    fn arch_spec(&self) -> ArchSpec;
}

impl<T: ArchitectureLocator + ?Sized> ArchitectureLocator for &T {
    fn arch_spec(&self) -> ArchSpec {
        (**self).arch_spec()
    }
}

/// Parse the architecture of an image in registry style,
/// `arch` or `arch/variant`.
#[must_use]
pub fn parse_arch<L: ArchitectureLocator + ?Sized>(image: &L) -> String {
    image.arch_spec().to_string()
}

/// One per-architecture image of a registry tag.
///
/// Fields that are not needed for matching are kept
/// untouched in `extra`. Known fields with an unexpected
/// type are treated as missing.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct ArchRecord {
    #[serde(
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub architecture: Option<String>,

    #[serde(
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub variant: Option<String>,

    #[serde(
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub digest: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ArchRecord {
    /// A record with only architecture information set.
    #[must_use]
    pub fn new(architecture: &str, variant: Option<&str>) -> Self {
        Self {
            architecture: Some(string!(architecture)),
            variant: variant.map(ToOwned::to_owned),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_digest(mut self, digest: &str) -> Self {
        self.digest = Some(string!(digest));
        self
    }
}

impl ArchitectureLocator for ArchRecord {
    fn arch_spec(&self) -> ArchSpec {
        ArchSpec::new(self.architecture.as_deref(), self.variant.as_deref())
    }
}

/// An image already pulled by the local container engine,
/// as returned by `docker image inspect`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct LocalImage {
    #[serde(default)]
    pub id: Option<String>,

    #[serde(default)]
    pub repo_tags: Option<Vec<String>>,

    #[serde(default)]
    pub repo_digests: Option<Vec<String>>,

    #[serde(default)]
    pub architecture: Option<String>,

    #[serde(default)]
    pub variant: Option<String>,

    #[serde(default)]
    pub os: Option<String>,
}

impl ArchitectureLocator for LocalImage {
    fn arch_spec(&self) -> ArchSpec {
        ArchSpec::new(self.architecture.as_deref(), self.variant.as_deref())
    }
}
