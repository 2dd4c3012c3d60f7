//! Manifest parsing from files and strings.

use std::{path::Path, str::FromStr};

use super::Manifest;
use crate::{Error, Result, error::SourceContext};

impl FromStr for Manifest {
    type Err = Box<Error>;

    fn from_str(s: &str) -> Result<Self> {
        parse_manifest(s, "rapper.toml")
    }
}

impl Manifest {
    /// Parse a rapper.toml file from the given path.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Box::new(Error::Io {
                path: path.to_path_buf(),
                source: e,
            })
        })?;
        parse_manifest(&content, &path.display().to_string())
    }

    /// Parse a rapper.toml from a string with a custom filename for error reporting.
    pub fn from_str_with_filename(content: &str, filename: &str) -> Result<Self> {
        parse_manifest(content, filename)
    }
}

/// Parse a manifest from content with the given filename for error reporting.
pub fn parse_manifest(content: &str, filename: &str) -> Result<Manifest> {
    let source_ctx = SourceContext::new(content, filename);
    let mut manifest: Manifest =
        toml::from_str(content).map_err(|e| source_ctx.parse_error(e))?;
    validate_manifest(&mut manifest, &source_ctx)?;
    Ok(manifest)
}

/// Validate the manifest after parsing, normalizing addresses in place.
fn validate_manifest(manifest: &mut Manifest, ctx: &SourceContext) -> Result<()> {
    let config = &mut manifest.rapper;

    config.api_url = validate_address(ctx, "api_url", &config.api_url)?;
    config.rap_url = validate_address(ctx, "rap_url", &config.rap_url)?;

    if config.stale_reference_threshold == 0 {
        return Err(ctx.validation_error_at_key(
            "stale_reference_threshold",
            "stale_reference_threshold must be at least 1",
        ));
    }

    if config.output.as_os_str().is_empty() {
        return Err(ctx.validation_error_at_key("output", "output directory must not be empty"));
    }

    if manifest.format.indent == 0 || manifest.format.indent > 8 {
        return Err(ctx.validation_error_at_key("indent", "indent must be between 1 and 8"));
    }

    Ok(())
}

fn validate_address(ctx: &SourceContext, key: &str, value: &str) -> Result<String> {
    let trimmed = value.trim().trim_end_matches('/');
    let url = url::Url::parse(trimmed).map_err(|e| ctx.invalid_url_error(key, value, e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ctx.invalid_url_error(
            key,
            value,
            format!("unsupported scheme '{}'", url.scheme()),
        ));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::{FormatOptions, Style};

    #[test]
    fn test_minimal_manifest_defaults() {
        let manifest = Manifest::from_str(
            r#"
            [rapper]
            style = "normal"
            api_url = "http://rap2api.taobao.org/repository/get?id=284428"
            "#,
        )
        .unwrap();

        assert_eq!(manifest.rapper.style, Style::Normal);
        assert_eq!(manifest.rapper.rap_url, "http://rap2.taobao.org");
        assert_eq!(manifest.rapper.output, PathBuf::from("./src/rapper"));
        assert_eq!(manifest.rapper.res_selector, "type ResSelector<T> = T");
        assert_eq!(manifest.rapper.scan_dirs, vec![PathBuf::from("./src")]);
        assert_eq!(manifest.rapper.stale_reference_threshold, 5);
        assert_eq!(manifest.format, FormatOptions::default());
        assert_eq!(manifest.project_id(), Some(284428));
        assert!(manifest.url_mapper().is_identity());
    }

    #[test]
    fn test_trailing_slashes_are_stripped() {
        let manifest = Manifest::from_str(
            r#"
            [rapper]
            style = "redux"
            api_url = "http://rap2api.taobao.org/app/mock/1/"
            rap_url = "https://rap.example.com/"
            "#,
        )
        .unwrap();

        assert_eq!(manifest.rapper.api_url, "http://rap2api.taobao.org/app/mock/1");
        assert_eq!(manifest.rapper.rap_url, "https://rap.example.com");
        assert_eq!(manifest.project_id(), None);
    }

    #[test]
    fn test_missing_style_is_rejected() {
        let err = Manifest::from_str(
            r#"
            [rapper]
            api_url = "http://rap2api.taobao.org/repository/get?id=1"
            "#,
        )
        .unwrap_err();
        assert!(matches!(*err, Error::Parse { .. }));
    }

    #[test]
    fn test_unknown_style_is_rejected() {
        let err = Manifest::from_str(
            r#"
            [rapper]
            style = "mobx"
            api_url = "http://rap2api.taobao.org/repository/get?id=1"
            "#,
        )
        .unwrap_err();
        assert!(matches!(*err, Error::Parse { .. }));
    }

    #[test]
    fn test_malformed_address_is_rejected() {
        let err = Manifest::from_str(
            r#"
            [rapper]
            style = "normal"
            api_url = "rap2api.taobao.org"
            "#,
        )
        .unwrap_err();
        match *err {
            Error::InvalidUrl { key, span, .. } => {
                assert_eq!(key, "api_url");
                assert!(span.is_some());
            }
            other => panic!("unexpected error: {other}"),
        }

        let err = Manifest::from_str(
            r#"
            [rapper]
            style = "normal"
            api_url = "ftp://rap2api.taobao.org/x"
            "#,
        )
        .unwrap_err();
        assert!(matches!(*err, Error::InvalidUrl { .. }));
    }

    #[test]
    fn test_zero_threshold_is_rejected() {
        let err = Manifest::from_str(
            r#"
            [rapper]
            style = "normal"
            api_url = "http://rap2api.taobao.org/repository/get?id=1"
            stale_reference_threshold = 0
            "#,
        )
        .unwrap_err();
        assert!(matches!(*err, Error::Validation { .. }));
    }

    #[test]
    fn test_full_manifest() {
        let manifest = Manifest::from_str(
            r#"
            [rapper]
            style = "extended"
            api_url = "http://rap2api.taobao.org/repository/get?id=7"
            output = "src/api"
            scan_dirs = ["src/pages", "src/components"]
            stale_reference_threshold = 10

            [[url_mapper]]
            strip_prefix = "/api"

            [format]
            indent = 4
            single_quote = false
            semi = true
            "#,
        )
        .unwrap();

        assert_eq!(manifest.rapper.style, Style::Redux);
        assert_eq!(manifest.rapper.scan_dirs.len(), 2);
        assert_eq!(manifest.url_mapper().map("/api/users"), "/users");
        assert_eq!(
            manifest.format,
            FormatOptions {
                indent: 4,
                single_quote: false,
                semi: true
            }
        );
    }

    #[test]
    fn test_unknown_keys_are_rejected() {
        let err = Manifest::from_str(
            r#"
            [rapper]
            style = "normal"
            api_url = "http://rap2api.taobao.org/repository/get?id=1"
            typo = true
            "#,
        )
        .unwrap_err();
        assert!(matches!(*err, Error::Parse { .. }));
    }
}
