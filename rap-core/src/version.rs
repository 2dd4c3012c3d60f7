use std::{cmp::Ordering, fmt, str::FromStr};

use serde::{Deserialize, Serialize, Serializer};

/// A semantic version as embedded in generated files.
///
/// Ordering follows semver precedence: build metadata is carried and printed
/// but never decides which of two versions is newer.
#[derive(Debug, Clone, Deserialize)]
#[serde(try_from = "String")]
pub struct Version(semver::Version);

impl TryFrom<String> for Version {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl Serialize for Version {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl Version {
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self(semver::Version::new(major, minor, patch))
    }

    /// The version of the running tool.
    pub fn current() -> Self {
        crate::TOOL_VERSION
            .parse()
            .unwrap_or_else(|_| Self::new(0, 0, 0))
    }

    /// Whether this is a pre-release (e.g. `2.0.0-beta.1`).
    pub fn is_prerelease(&self) -> bool {
        !self.0.pre.is_empty()
    }

    fn precedence(&self) -> (u64, u64, u64, &semver::Prerelease) {
        (self.0.major, self.0.minor, self.0.patch, &self.0.pre)
    }
}

impl Default for Version {
    fn default() -> Self {
        Self::new(0, 0, 0)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Version {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let bare = s.strip_prefix('v').unwrap_or(s);
        semver::Version::parse(bare)
            .map(Self)
            .map_err(|e| format!("invalid version '{}': {}", s, e))
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Version {}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        self.precedence().cmp(&other.precedence())
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(s: &str) -> Version {
        s.parse().unwrap()
    }

    #[test]
    fn test_display() {
        assert_eq!(Version::new(1, 2, 3).to_string(), "1.2.3");
        assert_eq!(Version::default().to_string(), "0.0.0");
        assert_eq!(v("2.0.0-beta.1").to_string(), "2.0.0-beta.1");
        assert_eq!(v("2.0.0+build.7").to_string(), "2.0.0+build.7");
    }

    #[test]
    fn test_from_str() {
        assert_eq!(v("1.2.3"), Version::new(1, 2, 3));
        assert_eq!(v("v0.1.0"), Version::new(0, 1, 0));
        assert!(v("1.0.0-beta.2").is_prerelease());
        assert!(!v("1.0.0").is_prerelease());
    }

    #[test]
    fn test_build_metadata_is_not_a_prerelease() {
        let version = v("1.0.0-beta+exp.sha.5114f85");
        assert!(version.is_prerelease());
        assert_eq!(version, v("1.0.0-beta"));
        assert!(!v("2.0.0+build.7").is_prerelease());
    }

    #[test]
    fn test_from_str_invalid() {
        assert!("1.2".parse::<Version>().is_err());
        assert!("1.2.3.4".parse::<Version>().is_err());
        assert!("a.b.c".parse::<Version>().is_err());
        assert!("1.2.3-".parse::<Version>().is_err());
        assert!("".parse::<Version>().is_err());
    }

    #[test]
    fn test_ordering() {
        assert!(v("1.9.0") < v("2.0.0"));
        assert!(v("2.0.0") < v("2.1.0"));
        assert!(v("1.10.0") > v("1.9.9"));
        assert!(v("2.0.0-beta.1") < v("2.0.0"));
        assert!(v("2.0.0-beta.2") < v("2.0.0-beta.10"));
        assert!(v("2.0.0-alpha") < v("2.0.0-beta"));
        assert!(v("2.0.0-beta") < v("2.0.0-beta.1"));
    }

    #[test]
    fn test_build_metadata_is_ignored_for_ordering() {
        assert!(v("1.9.0") < v("2.0.0+build.7"));
        assert_eq!(v("2.0.0+build.7"), v("2.0.0"));
        assert_eq!(v("2.0.0+a").cmp(&v("2.0.0+b")), Ordering::Equal);
    }

    #[test]
    fn test_current_matches_package() {
        assert_eq!(Version::current().to_string(), crate::TOOL_VERSION);
    }

    #[test]
    fn test_serialize() {
        #[derive(Serialize)]
        struct Config {
            version: Version,
        }
        let config = Config {
            version: Version::new(1, 2, 3),
        };
        let toml = toml::to_string(&config).unwrap();
        assert_eq!(toml.trim(), r#"version = "1.2.3""#);
    }

    #[test]
    fn test_deserialize() {
        #[derive(Deserialize)]
        struct Config {
            version: Version,
        }
        let config: Config = toml::from_str(r#"version = "1.2.3+ci.4""#).unwrap();
        assert_eq!(config.version, Version::new(1, 2, 3));
        assert!(toml::from_str::<Config>(r#"version = "1.2""#).is_err());
    }
}
