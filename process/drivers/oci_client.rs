use bon::Builder;
use log::{debug, trace};
use miette::{IntoDiagnostic, Result, WrapErr};
use oci_distribution::{client::ClientConfig, secrets::RegistryAuth, Client, Reference};
use tag_meta_utils::{constants::DEFAULT_REGISTRY, credentials::Credentials, string};

use crate::{drivers::DigestResolver, ASYNC_RUNTIME};

/// Resolves manifest digests by asking the registry
/// directly with `oci-distribution`.
#[derive(Debug, Clone, Builder)]
pub struct OciClientDriver {
    /// The registry's domain name.
    #[builder(into, default = string!(DEFAULT_REGISTRY))]
    registry: String,

    /// The repository the tags belong to, e.g. `nwodtuhs/exegol`.
    #[builder(into)]
    repository: String,

    #[builder(default = 3)]
    retry_count: u8,

    /// Delay between retries in seconds.
    #[builder(default = 1)]
    retry_delay: u64,
}

impl OciClientDriver {
    #[must_use]
    pub fn registry(&self) -> &str {
        &self.registry
    }

    #[must_use]
    pub fn repository(&self) -> &str {
        &self.repository
    }

    /// The fully qualified reference of a tag in this repository.
    #[must_use]
    pub fn reference(&self, tag: &str) -> Reference {
        Reference::with_tag(
            self.registry.clone(),
            self.repository.clone(),
            tag.to_string(),
        )
    }

    fn auth(&self) -> RegistryAuth {
        match Credentials::get(&self.registry) {
            Some(Credentials {
                username, password, ..
            }) => RegistryAuth::Basic(username, password),
            None => RegistryAuth::Anonymous,
        }
    }
}

impl DigestResolver for OciClientDriver {
    fn resolve(&self, tag: &str) -> Result<String> {
        trace!("OciClientDriver::resolve({tag})");

        let reference = self.reference(tag);
        let auth = self.auth();
        let client = Client::new(ClientConfig::default());

        let digest = tag_meta_utils::retry(self.retry_count, self.retry_delay, || {
            debug!("Fetching manifest digest for {reference}");
            ASYNC_RUNTIME
                .block_on(client.fetch_manifest_digest(&reference, &auth))
                .into_diagnostic()
        })
        .wrap_err_with(|| format!("Failed to fetch manifest digest for {reference}"))?;

        debug!("Resolved {reference} to {digest}");
        Ok(digest)
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn builder_defaults() {
        let driver = OciClientDriver::builder()
            .repository("nwodtuhs/exegol")
            .build();

        assert_eq!(driver.registry(), "docker.io");
        assert_eq!(driver.repository(), "nwodtuhs/exegol");
        assert_eq!(driver.retry_count, 3);
        assert_eq!(driver.retry_delay, 1);
    }

    #[test]
    fn reference_for_tag() {
        let driver = OciClientDriver::builder()
            .registry("ghcr.io")
            .repository("theporgs/exegol")
            .retry_count(1)
            .build();

        let reference = driver.reference("ad-debian-1.2.3");

        assert_eq!(reference.registry(), "ghcr.io");
        assert_eq!(reference.repository(), "theporgs/exegol");
        assert_eq!(reference.tag(), Some("ad-debian-1.2.3"));
    }
}
