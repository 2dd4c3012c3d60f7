//! URL mapping rules used to derive model names.

use serde::Deserialize;

/// One rewrite step applied to a raw interface URL.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UrlRule {
    /// Drop a leading prefix, e.g. `/api`.
    StripPrefix(String),
    /// Prepend a prefix.
    Prefix(String),
    /// Replace every occurrence of `from` with `to`.
    Replace { from: String, to: String },
}

impl UrlRule {
    pub fn apply(&self, url: &str) -> String {
        match self {
            UrlRule::StripPrefix(prefix) => url.strip_prefix(prefix.as_str()).unwrap_or(url).to_string(),
            UrlRule::Prefix(prefix) => format!("{}{}", prefix, url),
            UrlRule::Replace { from, to } if !from.is_empty() => url.replace(from.as_str(), to),
            UrlRule::Replace { .. } => url.to_string(),
        }
    }
}

/// Ordered list of rules; the identity mapping when empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UrlMapper {
    rules: Vec<UrlRule>,
}

impl UrlMapper {
    pub fn new(rules: Vec<UrlRule>) -> Self {
        Self { rules }
    }

    /// Apply every rule in order.
    pub fn map(&self, url: &str) -> String {
        self.rules
            .iter()
            .fold(url.to_string(), |acc, rule| rule.apply(&acc))
    }

    pub fn is_identity(&self) -> bool {
        self.rules.is_empty()
    }
}
