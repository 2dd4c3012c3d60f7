//! Published rapper releases, used for the upgrade hint.

use std::time::Duration;

use rapper_core::{Error, Result, Version};
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

const CRATE_URL: &str = "https://crates.io/api/v1/crates/rapper";

/// Where released versions are looked up.
pub trait ReleaseIndex {
    /// The newest published version. Pre-releases count only when asked for.
    async fn latest(&self, include_prerelease: bool) -> Result<Version>;
}

/// The crates.io registry.
#[derive(Debug, Clone)]
pub struct CratesIo {
    client: Client,
}

impl CratesIo {
    pub fn new() -> Result<Self> {
        // crates.io rejects requests without a user agent.
        let client = Client::builder()
            .user_agent(concat!("rapper/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(3))
            .build()
            .map_err(|e| Error::network("release index", CRATE_URL, e))?;
        Ok(Self { client })
    }
}

#[derive(Debug, Deserialize)]
struct CrateResponse {
    #[serde(rename = "crate")]
    krate: CrateVersions,
}

#[derive(Debug, Deserialize)]
struct CrateVersions {
    max_version: String,
    max_stable_version: Option<String>,
}

impl CrateVersions {
    fn latest(&self, include_prerelease: bool) -> Result<Version> {
        let raw = match (&self.max_stable_version, include_prerelease) {
            (Some(stable), false) => stable,
            _ => &self.max_version,
        };
        raw.parse()
            .map_err(|e: String| Error::network("release index", CRATE_URL, e))
    }
}

impl ReleaseIndex for CratesIo {
    async fn latest(&self, include_prerelease: bool) -> Result<Version> {
        debug!(url = CRATE_URL, "Looking up the latest release.");
        let response = self
            .client
            .get(CRATE_URL)
            .send()
            .await
            .map_err(|e| Error::network("release index", CRATE_URL, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::network(
                "release index",
                CRATE_URL,
                format!("server answered {}", status),
            ));
        }

        let body: CrateResponse = response
            .json()
            .await
            .map_err(|e| Error::network("release index", CRATE_URL, e))?;
        body.krate.latest(include_prerelease)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn versions(json: &str) -> CrateVersions {
        serde_json::from_str::<CrateResponse>(json).unwrap().krate
    }

    #[test]
    fn test_stable_release_unless_prereleases_are_wanted() {
        let krate = versions(
            r#"{"crate": {"name": "rapper", "max_version": "0.7.0-beta.1", "max_stable_version": "0.6.2"}}"#,
        );
        assert_eq!(krate.latest(false).unwrap(), Version::new(0, 6, 2));
        assert_eq!(krate.latest(true).unwrap().to_string(), "0.7.0-beta.1");
    }

    #[test]
    fn test_only_prereleases_published() {
        let krate = versions(r#"{"crate": {"max_version": "0.1.0-alpha", "max_stable_version": null}}"#);
        assert_eq!(krate.latest(false).unwrap().to_string(), "0.1.0-alpha");
    }

    #[test]
    fn test_unparseable_release_is_a_network_error() {
        let krate = versions(r#"{"crate": {"max_version": "latest"}}"#);
        let err = krate.latest(false).unwrap_err();
        assert!(matches!(err, Error::Network { what: "release index", .. }));
    }
}
