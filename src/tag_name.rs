use tag_meta_utils::constants::TAG_SEPARATOR;

/// Extracts the version suffix from a tag name.
///
/// Everything after the first `-` is the version, so
/// `ad-debian-1.2.3` yields `debian-1.2.3`. Names without a
/// separator, including bare versions like `1.27.0`, have no version.
#[must_use]
pub fn parse_version(tag_name: &str) -> String {
    tag_name
        .split_once(TAG_SEPARATOR)
        .map(|(_, version)| version.to_string())
        .unwrap_or_default()
}
