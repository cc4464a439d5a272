use miette::Result;

/// Resolves the manifest digest of a tag when a
/// registry listing does not provide one.
///
/// Implementations may block on network I/O. Any retry
/// or timeout policy belongs to the implementation.
pub trait DigestResolver {
    /// Fetches the manifest (list) digest for `tag`.
    ///
    /// # Errors
    /// Will error if the digest cannot be retrieved.
    fn resolve(&self, tag: &str) -> Result<String>;
}

impl<F> DigestResolver for F
where
    F: Fn(&str) -> Result<String>,
{
    fn resolve(&self, tag: &str) -> Result<String> {
        self(tag)
    }
}
