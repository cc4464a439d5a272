use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Diagnostic, Debug)]
pub enum TagMetadataError {
    #[error("Tag {tag} lists {arch_count} architectures but has no manifest digest")]
    #[diagnostic(help("The digest resolver returned an empty digest"))]
    MissingDigest { tag: String, arch_count: usize },

    #[error("Failed to deserialize registry tag data")]
    #[diagnostic()]
    Deserialize(#[from] serde_json::Error),
}
