use std::collections::BTreeSet;

use log::{debug, trace, warn};
use miette::{Result, WrapErr};
use serde::Deserialize;
use tag_meta_process::drivers::DigestResolver;
use tag_meta_utils::platform::Platform;

use crate::{
    arch::{parse_arch, ArchRecord},
    error::TagMetadataError,
    lenient::{lenient, lenient_seq},
    tag_name,
};

/// One tag as returned by a registry tag listing.
///
/// Every field is optional; missing or malformed values fall
/// back to an empty name, no images, and no digest.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TagResponse {
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,

    #[serde(default, deserialize_with = "lenient_seq")]
    pub images: Option<Vec<ArchRecord>>,

    #[serde(default, deserialize_with = "lenient")]
    pub digest: Option<String>,
}

/// Metadata of a single registry tag across all
/// of the architectures it was pushed for.
#[derive(Debug, Clone)]
pub struct TagMetadata {
    name: String,
    images: Vec<ArchRecord>,
    multi_arch: bool,
    arch_set: BTreeSet<String>,
    digest: Option<String>,
    version: String,
    matched: BTreeSet<String>,
}

impl TagMetadata {
    /// Builds the metadata of a tag from its registry response.
    ///
    /// When a multi-arch tag comes without a digest, `resolver` is
    /// called once to fetch it. This is a blocking network call.
    ///
    /// # Errors
    /// Will error if the digest of a multi-arch tag could not be resolved.
    pub fn new<R>(response: TagResponse, resolver: &R) -> Result<Self>
    where
        R: DigestResolver + ?Sized,
    {
        let TagResponse {
            name,
            images,
            digest,
        } = response;
        let name = name.unwrap_or_default();
        let images = images.unwrap_or_default();
        trace!("TagMetadata::new({name}, {} images)", images.len());

        let multi_arch = images.len() > 1;
        let arch_set: BTreeSet<String> = images.iter().map(parse_arch).collect();

        let digest = match digest.filter(|digest| !digest.is_empty()) {
            Some(digest) => Some(digest),
            None if multi_arch => {
                warn!("Missing digest for multi-arch tag {name}, fetching it from the registry");
                let digest = resolver
                    .resolve(&name)
                    .wrap_err_with(|| format!("Failed to resolve the digest of tag {name}"))?;
                if digest.is_empty() {
                    return Err(TagMetadataError::MissingDigest {
                        tag: name,
                        arch_count: arch_set.len(),
                    }
                    .into());
                }
                Some(digest)
            }
            None => images
                .first()
                .and_then(|image| image.digest.clone())
                .filter(|digest| !digest.is_empty()),
        };

        let version = tag_name::parse_version(&name);
        debug!("Tag {name} has version {version:?} and arches {arch_set:?}");

        Ok(Self {
            name,
            images,
            multi_arch,
            arch_set,
            digest,
            version,
            matched: BTreeSet::new(),
        })
    }

    /// Decodes a single registry tag object and builds its metadata.
    ///
    /// Fields with an unexpected type are treated as missing.
    ///
    /// # Errors
    /// Will error if the JSON is not valid or the digest
    /// could not be resolved.
    pub fn from_json<R>(json: &str, resolver: &R) -> Result<Self>
    where
        R: DigestResolver + ?Sized,
    {
        let response: TagResponse =
            serde_json::from_str(json).map_err(TagMetadataError::from)?;
        Self::new(response, resolver)
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn version(&self) -> &str {
        &self.version
    }

    /// A tag is considered latest when its name carries no version.
    #[must_use]
    pub fn is_latest(&self) -> bool {
        self.version.is_empty()
    }

    #[must_use]
    pub const fn is_multi_arch(&self) -> bool {
        self.multi_arch
    }

    #[must_use]
    pub const fn arch_set(&self) -> &BTreeSet<String> {
        &self.arch_set
    }

    #[must_use]
    pub fn digest(&self) -> Option<&str> {
        self.digest.as_deref()
    }

    #[must_use]
    pub fn images(&self) -> &[ArchRecord] {
        &self.images
    }

    /// The architectures returned by [`Self::image_for_arch`] so far.
    #[must_use]
    pub const fn matched_arches(&self) -> &BTreeSet<String> {
        &self.matched
    }

    /// Finds the image built for `arch` without recording the match.
    #[must_use]
    pub fn find_image_for_arch(&self, arch: &str) -> Option<&ArchRecord> {
        self.images.iter().find(|image| parse_arch(*image) == arch)
    }

    /// Finds the image built for `arch` and marks that
    /// architecture as matched.
    ///
    /// The image stays available, so asking again for the same
    /// architecture returns the same image.
    pub fn image_for_arch(&mut self, arch: &str) -> Option<&ArchRecord> {
        trace!("TagMetadata::image_for_arch({arch})");

        let index = self
            .images
            .iter()
            .position(|image| parse_arch(image) == arch)?;
        self.matched.insert(arch.to_string());
        self.images.get(index)
    }

    /// Same as [`Self::image_for_arch`] using the registry form of `platform`.
    pub fn image_for_platform(&mut self, platform: Platform) -> Option<&ArchRecord> {
        self.image_for_arch(&platform.registry_arch())
    }

    /// Every image whose architecture has not been matched yet,
    /// in registry order.
    #[must_use]
    pub fn images_left(&self) -> Vec<&ArchRecord> {
        self.images
            .iter()
            .filter(|image| !self.matched.contains(&parse_arch(*image)))
            .collect()
    }

    /// Takes over the version of another tag, e.g. an arch specific
    /// tag taking the version of its multi-arch counterpart.
    pub fn set_version_specific(&mut self, other: &Self) {
        trace!(
            "TagMetadata::set_version_specific({} <- {})",
            self.name,
            other.name
        );
        self.version.clone_from(&other.version);
    }
}

impl std::fmt::Display for TagMetadata {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} ({}) [{}] {:?}",
            self.name,
            self.version,
            self.digest.as_deref().unwrap_or("none"),
            self.arch_set,
        )
    }
}
