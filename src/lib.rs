//! Turns the tag listing of an image registry into architecture
//! aware metadata, so the right image can be picked for a platform.
//!
//! ```
//! use tag_meta::{ArchRecord, TagMetadata, TagResponse};
//!
//! let response = TagResponse {
//!     name: Some("ad-debian-1.2.3".into()),
//!     images: Some(vec![
//!         ArchRecord::new("amd64", None),
//!         ArchRecord::new("arm64", Some("v8")),
//!     ]),
//!     digest: Some("sha256:0123".into()),
//! };
//! let resolver = |_: &str| -> miette::Result<String> { unreachable!() };
//!
//! let mut tag = TagMetadata::new(response, &resolver).unwrap();
//! assert_eq!(tag.version(), "debian-1.2.3");
//! assert!(tag.image_for_arch("arm64/v8").is_some());
//! assert_eq!(tag.images_left().len(), 1);
//! ```

pub mod arch;
pub mod error;
mod lenient;
pub mod listing;
pub mod tag_metadata;
pub mod tag_name;

pub use arch::{parse_arch, ArchRecord, ArchSpec, ArchitectureLocator, LocalImage};
pub use error::TagMetadataError;
pub use listing::TagListing;
pub use tag_meta_process::drivers::{DigestResolver, OciClientDriver};
pub use tag_metadata::{TagMetadata, TagResponse};
