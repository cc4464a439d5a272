// Registry defaults
pub const DEFAULT_ARCH: &str = "amd64";
pub const DEFAULT_REGISTRY: &str = "docker.io";

// Tag naming
pub const TAG_SEPARATOR: char = '-';

// Tag meta vars
pub const TAG_META_LOG: &str = "TAG_META_LOG";
pub const TAG_META_PASSWORD: &str = "TAG_META_PASSWORD";
pub const TAG_META_USERNAME: &str = "TAG_META_USERNAME";
