//! Upgrade check - tell the operator about a newer rapper release.

use rapper_core::Version;
use tracing::{debug, warn};

use crate::{release::ReleaseIndex, reports::UpgradeHint};

/// Look for a release newer than `running`.
///
/// Best effort: a failed lookup is logged and treated as "no hint", never as
/// a reason to stop. Pre-release builds are compared against pre-releases
/// too; stable builds only against stable releases.
pub async fn upgrade_hint<R: ReleaseIndex>(index: &R, running: &Version) -> Option<UpgradeHint> {
    let latest = match index.latest(running.is_prerelease()).await {
        Ok(latest) => latest,
        Err(e) => {
            warn!(error = %e, "Could not check for a newer rapper release.");
            return None;
        }
    };

    if running < &latest {
        Some(UpgradeHint {
            running: running.clone(),
            latest,
        })
    } else {
        debug!(%running, %latest, "rapper is up to date.");
        None
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use rapper_core::{Error, Result};

    use super::*;
    use crate::ops::testing::v;

    struct Fixed {
        stable: &'static str,
        prerelease: &'static str,
        asked_for_prerelease: Cell<Option<bool>>,
    }

    impl Fixed {
        fn new(stable: &'static str, prerelease: &'static str) -> Self {
            Self {
                stable,
                prerelease,
                asked_for_prerelease: Cell::new(None),
            }
        }
    }

    impl ReleaseIndex for Fixed {
        async fn latest(&self, include_prerelease: bool) -> Result<Version> {
            self.asked_for_prerelease.set(Some(include_prerelease));
            Ok(v(if include_prerelease { self.prerelease } else { self.stable }))
        }
    }

    struct Offline;

    impl ReleaseIndex for Offline {
        async fn latest(&self, _include_prerelease: bool) -> Result<Version> {
            Err(Error::network("release index", "memory://index", "connection refused"))
        }
    }

    #[tokio::test]
    async fn test_newer_release_gives_a_hint() {
        let index = Fixed::new("0.7.0", "0.8.0-beta.1");
        let hint = upgrade_hint(&index, &v("0.6.0")).await.unwrap();

        assert_eq!(hint.running, v("0.6.0"));
        assert_eq!(hint.latest, v("0.7.0"));
        assert_eq!(index.asked_for_prerelease.get(), Some(false));
    }

    #[tokio::test]
    async fn test_up_to_date_gives_no_hint() {
        let index = Fixed::new("0.6.0", "0.7.0-beta.1");
        assert!(upgrade_hint(&index, &v("0.6.0")).await.is_none());
        assert!(upgrade_hint(&index, &v("0.6.1")).await.is_none());
    }

    #[tokio::test]
    async fn test_prerelease_builds_compare_against_prereleases() {
        let index = Fixed::new("0.6.0", "0.7.0-beta.2");
        let hint = upgrade_hint(&index, &v("0.7.0-beta.1")).await.unwrap();

        assert_eq!(hint.latest.to_string(), "0.7.0-beta.2");
        assert_eq!(index.asked_for_prerelease.get(), Some(true));
    }

    #[tokio::test]
    async fn test_failed_lookup_is_not_an_error() {
        assert!(upgrade_hint(&Offline, &v("0.6.0")).await.is_none());
    }
}
