//! Interface normalization: canonical URLs, model names, deduplication.

use indexmap::IndexMap;
use rapper_core::{Error, Result};
use rapper_ir::{Interface, InterfaceKey, RawInterface};
use rapper_manifest::UrlMapper;
use tracing::{debug, warn};

/// Normalizer output.
#[derive(Debug, Clone, Default)]
pub struct Normalized {
    /// Interfaces with pairwise-unique keys and model names.
    pub interfaces: Vec<Interface>,
    /// Interfaces replaced by a later one mapping to the same model name.
    pub dropped: Vec<DroppedInterface>,
}

/// An interface lost to a model name collision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DroppedInterface {
    pub id: u64,
    pub key: InterfaceKey,
    pub model_name: String,
    /// Id of the interface that now owns the model name.
    pub kept: u64,
}

impl std::fmt::Display for DroppedInterface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "interface {} ({}) was dropped: its model name '{}' is also produced by interface {}",
            self.id, self.key, self.model_name, self.kept
        )
    }
}

/// Canonicalize and deduplicate raw catalog interfaces.
///
/// Entries sharing `(method, url)` collapse to one: the later entry replaces
/// the earlier one but keeps its position. A second pass does the same for
/// model names, which the URL mapper can make collide. The result has
/// pairwise-unique keys and model names; model name collisions are reported
/// in [`Normalized::dropped`].
pub fn normalize(raw: Vec<RawInterface>, mapper: &UrlMapper) -> Result<Normalized> {
    let mut by_key: IndexMap<InterfaceKey, Interface> = IndexMap::with_capacity(raw.len());

    for itf in raw {
        let url = canonical_url(&itf.url).map_err(|reason| {
            Error::validation(format!(
                "interface {} ({} {}): {}",
                itf.id, itf.method, itf.url, reason
            ))
        })?;
        let model_name = format!("{}{}", itf.method, mapper.map(&url));
        let interface = Interface::from_raw(itf, url, model_name);

        if let Some(previous) = by_key.insert(interface.key(), interface) {
            debug!(id = previous.id, key = %previous.key(), "Dropped duplicate interface.");
        }
    }

    let mut by_model: IndexMap<String, Interface> = IndexMap::with_capacity(by_key.len());
    let mut dropped = Vec::new();
    for interface in by_key.into_values() {
        let kept = interface.id;
        if let Some(previous) = by_model.insert(interface.model_name.clone(), interface) {
            warn!(
                id = previous.id,
                kept,
                model = %previous.model_name,
                "Dropped interface whose mapped model name collides."
            );
            dropped.push(DroppedInterface {
                id: previous.id,
                key: previous.key(),
                model_name: previous.model_name,
                kept,
            });
        }
    }

    Ok(Normalized {
        interfaces: by_model.into_values().collect(),
        dropped,
    })
}

/// Reduce an interface URL to its path form, always starting with `/`.
///
/// Absolute `http(s)` URLs keep only path and query.
fn canonical_url(raw: &str) -> std::result::Result<String, String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err("empty URL".to_string());
    }
    if trimmed.chars().any(char::is_whitespace) {
        return Err(format!("URL '{}' contains whitespace", trimmed));
    }

    if trimmed.contains("://") {
        let parsed = url::Url::parse(trimmed).map_err(|e| format!("malformed URL '{}': {}", trimmed, e))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(format!("unsupported scheme in '{}'", trimmed));
        }
        let mut path = parsed.path().to_string();
        if let Some(query) = parsed.query() {
            path.push('?');
            path.push_str(query);
        }
        return Ok(path);
    }

    if trimmed.starts_with('/') {
        Ok(trimmed.to_string())
    } else {
        Ok(format!("/{}", trimmed))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rapper_ir::Method;
    use rapper_manifest::UrlRule;

    use super::*;

    fn raw(id: u64, method: &str, url: &str) -> RawInterface {
        RawInterface {
            id,
            repository_id: 1,
            module_id: 1,
            name: format!("itf{}", id),
            description: String::new(),
            url: url.to_string(),
            method: Method::new(method),
            request: Default::default(),
            response: Default::default(),
        }
    }

    #[test]
    fn test_duplicate_key_keeps_last() {
        let out = normalize(
            vec![raw(1, "GET", "/a"), raw(2, "GET", "/a")],
            &UrlMapper::default(),
        )
        .unwrap()
        .interfaces;

        assert_eq!(out.len(), 1);
        assert_eq!(out[0].id, 2);
        assert_eq!(out[0].model_name, "GET/a");
    }

    #[test]
    fn test_method_distinguishes_keys() {
        let out = normalize(
            vec![raw(1, "get", "/a"), raw(2, "POST", "/a")],
            &UrlMapper::default(),
        )
        .unwrap()
        .interfaces;
        let names: Vec<_> = out.iter().map(|i| i.model_name.as_str()).collect();
        assert_eq!(names, ["GET/a", "POST/a"]);
    }

    #[test]
    fn test_mapper_collisions_are_collapsed() {
        let mapper = UrlMapper::new(vec![UrlRule::StripPrefix("/api".into())]);
        let normalized = normalize(
            vec![raw(1, "GET", "/api/users"), raw(2, "GET", "/users"), raw(3, "GET", "/x")],
            &mapper,
        )
        .unwrap();

        let out = &normalized.interfaces;
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].id, 2);
        assert_eq!(out[0].model_name, "GET/users");
        // the canonical URL is not rewritten by the mapper
        assert_eq!(out[0].url, "/users");

        assert_eq!(
            normalized.dropped,
            vec![DroppedInterface {
                id: 1,
                key: InterfaceKey::from("GET/api/users"),
                model_name: "GET/users".into(),
                kept: 2,
            }]
        );
        assert_eq!(
            normalized.dropped[0].to_string(),
            "interface 1 (GET/api/users) was dropped: its model name 'GET/users' is also produced by interface 2"
        );
    }

    #[test]
    fn test_output_is_unique() {
        let input = vec![
            raw(1, "GET", "/a"),
            raw(2, "GET", "a"),
            raw(3, "GET", "http://example.com/a"),
            raw(4, "POST", "/b"),
            raw(5, "POST", "/b"),
            raw(6, "GET", "/c"),
        ];
        let out = normalize(input, &UrlMapper::default()).unwrap().interfaces;

        let keys: HashSet<_> = out.iter().map(|i| i.key()).collect();
        let names: HashSet<_> = out.iter().map(|i| i.model_name.clone()).collect();
        assert_eq!(keys.len(), out.len());
        assert_eq!(names.len(), out.len());
        assert_eq!(out.len(), 3);
    }

    #[test]
    fn test_canonical_url() {
        assert_eq!(canonical_url("users").unwrap(), "/users");
        assert_eq!(canonical_url(" /users ").unwrap(), "/users");
        assert_eq!(
            canonical_url("https://api.example.com/v1/users?x=1").unwrap(),
            "/v1/users?x=1"
        );
        assert!(canonical_url("").is_err());
        assert!(canonical_url("/a b").is_err());
        assert!(canonical_url("ftp://host/a").is_err());
        assert!(canonical_url("http://").is_err());
    }

    #[test]
    fn test_malformed_url_is_validation_error() {
        let err = normalize(vec![raw(9, "GET", "")], &UrlMapper::default()).unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
        assert!(err.to_string().contains("interface 9"));
    }
}
