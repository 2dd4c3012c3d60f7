//! Type conversion contract and the parallel conversion batch.

use indexmap::IndexMap;
use rapper_core::{Error, Result};
use rapper_ir::{Interface, SchemaSource};
use rayon::prelude::*;
use tracing::debug;

/// Request and response type text for one interface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Model {
    pub request: String,
    pub response: String,
}

/// Converted models keyed by model name, in interface order.
pub type ModelTable = IndexMap<String, Model>;

/// A schema that cannot be turned into type text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ConversionError {
    pub message: String,
}

impl ConversionError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Turns a schema source into type text in the target language.
///
/// Implementations must be pure: the same source always yields the same text.
pub trait TypeConverter: Send + Sync {
    fn convert(&self, source: &SchemaSource) -> std::result::Result<String, ConversionError>;
}

/// Convert every interface concurrently.
///
/// Any single failure fails the whole batch; the returned error names the
/// offending interface's editor address in the catalog at `rap_url`.
pub fn convert_all(
    interfaces: &[Interface],
    converter: &dyn TypeConverter,
    rap_url: &str,
) -> Result<ModelTable> {
    let models = interfaces
        .par_iter()
        .map(|itf| convert_one(itf, converter, rap_url).map(|model| (itf.model_name.clone(), model)))
        .collect::<Result<Vec<_>>>()?;

    debug!(count = models.len(), "Converted interface schemas.");
    Ok(models.into_iter().collect())
}

fn convert_one(itf: &Interface, converter: &dyn TypeConverter, rap_url: &str) -> Result<Model> {
    let fail = |part: &str, e: ConversionError| Error::Conversion {
        reference: itf.editor_reference(rap_url),
        interface_id: itf.id,
        model_name: itf.model_name.clone(),
        message: format!("{} schema: {}", part, e),
    };

    let request = converter.convert(&itf.request).map_err(|e| fail("request", e))?;
    let response = converter.convert(&itf.response).map_err(|e| fail("response", e))?;
    Ok(Model { request, response })
}

#[cfg(test)]
mod tests {
    use rapper_ir::{Method, RawInterface};
    use serde_json::json;

    use super::*;

    /// Renders `type` verbatim, rejecting anything without one.
    struct Verbatim;

    impl TypeConverter for Verbatim {
        fn convert(&self, source: &SchemaSource) -> std::result::Result<String, ConversionError> {
            source
                .value()
                .get("type")
                .and_then(|t| t.as_str())
                .map(str::to_string)
                .ok_or_else(|| ConversionError::new("missing type"))
        }
    }

    fn itf(id: u64, url: &str, response: serde_json::Value) -> Interface {
        let raw = RawInterface {
            id,
            repository_id: 10,
            module_id: 20,
            name: String::new(),
            description: String::new(),
            url: url.to_string(),
            method: Method::new("GET"),
            request: SchemaSource::Schema(json!({ "type": "object" })),
            response: SchemaSource::Schema(response),
        };
        Interface::from_raw(raw, url.to_string(), format!("GET{}", url))
    }

    #[test]
    fn test_models_keep_interface_order() {
        let interfaces: Vec<_> = (0..32)
            .map(|i| itf(i, &format!("/r{}", i), json!({ "type": "string" })))
            .collect();

        let models = convert_all(&interfaces, &Verbatim, "http://rap").unwrap();
        let names: Vec<_> = models.keys().cloned().collect();
        let expected: Vec<_> = interfaces.iter().map(|i| i.model_name.clone()).collect();
        assert_eq!(names, expected);
        assert_eq!(models["GET/r3"].response, "string");
    }

    #[test]
    fn test_one_failure_fails_batch() {
        let interfaces = vec![
            itf(1, "/ok", json!({ "type": "string" })),
            itf(2, "/bad", json!({})),
        ];

        let err = convert_all(&interfaces, &Verbatim, "http://rap").unwrap_err();
        match err {
            Error::Conversion {
                reference,
                interface_id,
                model_name,
                message,
            } => {
                assert_eq!(reference, "http://rap/repository/editor?id=10&mod=20&itf=2");
                assert_eq!(interface_id, 2);
                assert_eq!(model_name, "GET/bad");
                assert_eq!(message, "response schema: missing type");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
