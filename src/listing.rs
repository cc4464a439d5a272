use log::trace;
use miette::Result;
use serde::{Deserialize, Deserializer};
use tag_meta_process::drivers::DigestResolver;

use crate::{
    error::TagMetadataError,
    lenient::{lenient, lenient_seq},
    tag_metadata::{TagMetadata, TagResponse},
};

/// One page of a registry tag listing, e.g.
/// `GET /v2/repositories/<namespace>/<repo>/tags`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TagListing {
    #[serde(default, deserialize_with = "lenient")]
    pub count: Option<u64>,

    #[serde(default, deserialize_with = "lenient")]
    pub next: Option<String>,

    #[serde(default, deserialize_with = "lenient")]
    pub previous: Option<String>,

    #[serde(default, deserialize_with = "lenient_results")]
    pub results: Vec<TagResponse>,
}

fn lenient_results<'de, D>(deserializer: D) -> Result<Vec<TagResponse>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_seq(deserializer)?.unwrap_or_default())
}

impl TagListing {
    /// Decodes a listing page.
    ///
    /// Results that are not tag objects are skipped.
    ///
    /// # Errors
    /// Will error if the JSON is not valid.
    pub fn from_json(json: &str) -> Result<Self> {
        trace!("TagListing::from_json()");
        Ok(serde_json::from_str(json).map_err(TagMetadataError::from)?)
    }

    /// Whether the registry has another page after this one.
    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.next.is_some()
    }

    /// Builds the metadata of every tag on the page, in listing order.
    ///
    /// # Errors
    /// Will error on the first tag whose digest could not be resolved.
    pub fn into_tags<R>(self, resolver: &R) -> Result<Vec<TagMetadata>>
    where
        R: DigestResolver + ?Sized,
    {
        trace!("TagListing::into_tags({} results)", self.results.len());
        self.results
            .into_iter()
            .map(|response| TagMetadata::new(response, resolver))
            .collect()
    }
}

#[cfg(test)]
mod test {
    use std::cell::RefCell;

    use miette::bail;
    use pretty_assertions::assert_eq;

    use super::*;

    const PAGE: &str = r#"{
        "count": 3,
        "next": "https://hub.docker.com/v2/repositories/nwodtuhs/exegol/tags?page=2",
        "previous": null,
        "results": [
            {
                "name": "full",
                "digest": "sha256:full",
                "images": [
                    { "architecture": "amd64", "os": "linux", "digest": "sha256:a1" },
                    { "architecture": "arm64", "variant": "v8", "os": "linux", "digest": "sha256:a2" }
                ]
            },
            {
                "name": "ad-debian-1.2.3",
                "images": [
                    { "architecture": "amd64", "os": "linux", "digest": "sha256:b1" },
                    { "architecture": "arm64", "variant": "v8", "os": "linux", "digest": "sha256:b2" }
                ]
            },
            {
                "name": "arm64",
                "images": [
                    { "architecture": "arm64", "variant": "v8", "os": "linux", "digest": "sha256:c1" }
                ]
            }
        ]
    }"#;

    #[test]
    fn decode_page() {
        let listing = TagListing::from_json(PAGE).unwrap();

        assert_eq!(listing.count, Some(3));
        assert!(listing.has_next());
        assert_eq!(listing.previous, None);
        assert_eq!(listing.results.len(), 3);
    }

    #[test]
    fn tags_in_order_resolving_missing_digests() {
        let resolved = RefCell::new(Vec::new());
        let resolver = |tag: &str| -> Result<String> {
            resolved.borrow_mut().push(tag.to_string());
            Ok(format!("sha256:resolved-{tag}"))
        };

        let tags = TagListing::from_json(PAGE)
            .unwrap()
            .into_tags(&resolver)
            .unwrap();

        let names: Vec<&str> = tags.iter().map(TagMetadata::name).collect();
        assert_eq!(names, vec!["full", "ad-debian-1.2.3", "arm64"]);
        assert_eq!(*resolved.borrow(), vec!["ad-debian-1.2.3".to_string()]);
        assert_eq!(tags[0].digest(), Some("sha256:full"));
        assert_eq!(tags[1].digest(), Some("sha256:resolved-ad-debian-1.2.3"));
        assert_eq!(tags[2].digest(), Some("sha256:c1"));
    }

    #[test]
    fn resolver_failure_stops_listing() {
        let resolver = |_: &str| -> Result<String> { bail!("rate limited") };

        let result = TagListing::from_json(PAGE).unwrap().into_tags(&resolver);

        assert!(result.is_err());
    }

    #[test]
    fn empty_page() {
        let listing = TagListing::from_json("{}").unwrap();

        let resolver = |_: &str| -> Result<String> { bail!("unused") };

        assert!(!listing.has_next());
        assert!(listing.into_tags(&resolver).unwrap().is_empty());
    }

    #[test]
    fn invalid_page() {
        assert!(TagListing::from_json(r#"{ "results": [ "#).is_err());
    }

    #[test]
    fn malformed_results_do_not_reject_page() {
        let page = r#"{
            "count": "three",
            "results": [
                42,
                { "name": 7, "images": [{ "architecture": "amd64", "digest": "sha256:x1" }] },
                { "name": "light", "images": [{ "architecture": "arm64", "variant": 8 }] }
            ]
        }"#;
        let resolver = |_: &str| -> Result<String> { bail!("unused") };

        let listing = TagListing::from_json(page).unwrap();
        assert_eq!(listing.count, None);

        let tags = listing.into_tags(&resolver).unwrap();
        let names: Vec<&str> = tags.iter().map(TagMetadata::name).collect();
        assert_eq!(names, vec!["", "light"]);
        assert_eq!(tags[0].digest(), Some("sha256:x1"));
        assert!(tags[1].arch_set().contains("arm64"));
    }

    #[test]
    fn results_not_a_list() {
        let listing = TagListing::from_json(r#"{ "results": 42 }"#).unwrap();
        assert!(listing.results.is_empty());
    }
}
