use std::env;

use bon::Builder;
use docker_credential::DockerCredential;
use log::trace;

use crate::constants::{TAG_META_PASSWORD, TAG_META_USERNAME};

/// The credentials for reading from an image registry.
#[derive(Debug, Clone, PartialEq, Eq, Builder)]
pub struct Credentials {
    #[builder(into)]
    pub registry: String,

    #[builder(into)]
    pub username: String,

    #[builder(into)]
    pub password: String,
}

impl Credentials {
    /// Looks up credentials for a registry.
    ///
    /// The `TAG_META_USERNAME`/`TAG_META_PASSWORD` env vars take
    /// precedence over the docker and podman credential stores.
    /// Returns `None` when the registry should be accessed anonymously.
    #[must_use]
    pub fn get(registry: &str) -> Option<Self> {
        trace!("Credentials::get({registry})");

        let env_creds = (
            env::var(TAG_META_USERNAME).ok().filter(|u| !u.is_empty()),
            env::var(TAG_META_PASSWORD).ok().filter(|p| !p.is_empty()),
        );

        let (username, password) = match env_creds {
            (Some(username), Some(password)) => (username, password),
            _ => {
                let stored = docker_credential::get_credential(registry)
                    .or_else(|_| docker_credential::get_podman_credential(registry))
                    .ok()?;
                match stored {
                    DockerCredential::UsernamePassword(username, password)
                        if !username.is_empty() && !password.is_empty() =>
                    {
                        (username, password)
                    }
                    _ => return None,
                }
            }
        };
        trace!("Username: {username:?}");

        Some(
            Self::builder()
                .registry(registry)
                .username(username)
                .password(password)
                .build(),
        )
    }
}
