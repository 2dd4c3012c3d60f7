//! Integration style selection.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Which extension generator runs on top of the base generator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Style {
    /// Plain typed fetch functions, no extension.
    #[default]
    #[serde(alias = "none")]
    Normal,
    /// Redux state-binding hooks, action types and selectors.
    #[serde(alias = "extended")]
    Redux,
}

impl Style {
    /// Returns the style identifier as a static string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Style::Normal => "normal",
            Style::Redux => "redux",
        }
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Style {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "normal" | "none" => Ok(Style::Normal),
            "redux" | "extended" => Ok(Style::Redux),
            _ => Err(format!(
                "unknown style '{}', expected 'normal' or 'redux'",
                s
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str() {
        assert_eq!(Style::from_str("normal").unwrap(), Style::Normal);
        assert_eq!(Style::from_str("none").unwrap(), Style::Normal);
        assert_eq!(Style::from_str("Redux").unwrap(), Style::Redux);
        assert_eq!(Style::from_str("extended").unwrap(), Style::Redux);
        assert!(Style::from_str("mobx").is_err());
    }

    #[test]
    fn test_deserialize_with_aliases() {
        let redux: Style = serde_json::from_str(r#""redux""#).unwrap();
        assert_eq!(redux, Style::Redux);

        let none: Style = serde_json::from_str(r#""none""#).unwrap();
        assert_eq!(none, Style::Normal);
    }
}
