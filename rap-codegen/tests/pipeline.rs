use std::{
    str::FromStr,
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
};

use indexmap::IndexMap;
use rapper_codegen::{
    ConversionError, FileKind, Fragment, GenerationInput, Generator, GeneratorKind,
    LanguageCodegen, TypeConverter,
    pipeline::{CompilationContext, Pipeline, Plugin},
};
use rapper_core::{Error, Header, MarkerStatus, Version, verify};
use rapper_ir::{Interface, Method, RawInterface, SchemaSource};
use rapper_manifest::{FormatOptions, Manifest, Style};
use serde_json::json;

struct TypeName;

impl TypeConverter for TypeName {
    fn convert(&self, source: &SchemaSource) -> Result<String, ConversionError> {
        source
            .value()
            .get("type")
            .and_then(|v| v.as_str())
            .map(str::to_string)
            .ok_or_else(|| ConversionError::new("no type"))
    }
}

struct Listing;

impl Generator for Listing {
    fn name(&self) -> &'static str {
        "listing"
    }

    fn kind(&self) -> GeneratorKind {
        GeneratorKind::Base
    }

    fn generate(&self, input: &GenerationInput<'_>) -> rapper_core::Result<Vec<(FileKind, Fragment)>> {
        let body = input
            .models
            .iter()
            .map(|(name, model)| format!("{} {}", name, model.response))
            .collect::<Vec<_>>()
            .join("\n");
        Ok(vec![(FileKind::Request, Fragment::new().body(body))])
    }
}

struct Extra;

impl Generator for Extra {
    fn name(&self) -> &'static str {
        "extra"
    }

    fn kind(&self) -> GeneratorKind {
        GeneratorKind::Extension
    }

    fn generate(&self, _input: &GenerationInput<'_>) -> rapper_core::Result<Vec<(FileKind, Fragment)>> {
        Ok(vec![(FileKind::Style("redux".into()), Fragment::new().body("extra"))])
    }
}

struct Plain;

impl LanguageCodegen for Plain {
    fn language(&self) -> &'static str {
        "plain"
    }

    fn file_extension(&self) -> &'static str {
        "txt"
    }

    fn converter(&self) -> &dyn TypeConverter {
        &TypeName
    }

    fn generators(&self, style: Style) -> Vec<Box<dyn Generator>> {
        let mut generators: Vec<Box<dyn Generator>> = vec![Box::new(Listing)];
        if style == Style::Redux {
            generators.push(Box::new(Extra));
        }
        generators
    }

    fn format(&self, text: &str, _options: &FormatOptions) -> String {
        text.to_string()
    }
}

#[derive(Default)]
struct Counter(Arc<AtomicUsize>);

impl Plugin for Counter {
    fn name(&self) -> &'static str {
        "counter"
    }

    fn on_after_phase(&self, _phase: &str, _ctx: &CompilationContext) -> rapper_core::Result<()> {
        self.0.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

fn manifest(style: &str) -> Manifest {
    Manifest::from_str(&format!(
        "[rapper]\nstyle = \"{}\"\napi_url = \"http://rap2api.taobao.org/repository/get?id=3\"\n",
        style
    ))
    .unwrap()
}

fn interface(id: u64, url: &str, response: serde_json::Value) -> Interface {
    let raw = RawInterface {
        id,
        repository_id: 3,
        module_id: 1,
        name: String::new(),
        description: String::new(),
        url: url.into(),
        method: Method::new("GET"),
        request: SchemaSource::Schema(json!({ "type": "object" })),
        response: SchemaSource::Schema(response),
    };
    Interface::from_raw(raw, url.into(), format!("GET{}", url))
}

fn context(style: &str, interfaces: Vec<Interface>) -> CompilationContext {
    CompilationContext::new(
        manifest(style),
        Header::new("http://rap2.taobao.org", Some(3), Version::new(1, 0, 0)),
        "out",
        interfaces,
        IndexMap::new(),
    )
}

#[test]
fn test_pipeline_emits_marked_files() {
    let counter = Counter::default();
    let after = counter.0.clone();
    let ctx = context(
        "redux",
        vec![interface(1, "/a", json!({ "type": "string" }))],
    );

    let ctx = Pipeline::new(&Plain).plugin(counter).run(ctx).unwrap();

    // convert, generate, merge, emit
    assert_eq!(after.load(Ordering::SeqCst), 4);
    let paths: Vec<_> = ctx.files().iter().map(|f| f.path().to_path_buf()).collect();
    assert_eq!(
        paths,
        [
            std::path::PathBuf::from("out/request.txt"),
            std::path::PathBuf::from("out/redux.txt")
        ]
    );
    for file in ctx.files() {
        assert_eq!(verify(file.content()), MarkerStatus::Intact);
        assert_eq!(Header::project_id_in(file.body()), Some(3));
    }
    assert!(ctx.files()[0].body().ends_with("GET/a string\n"));
}

#[test]
fn test_normal_style_skips_extension() {
    let ctx = Pipeline::new(&Plain)
        .run(context("normal", vec![interface(1, "/a", json!({ "type": "string" }))]))
        .unwrap();
    assert_eq!(ctx.files().len(), 1);
}

#[test]
fn test_conversion_failure_emits_nothing() {
    let counter = Counter::default();
    let after = counter.0.clone();
    let ctx = context(
        "normal",
        vec![
            interface(1, "/a", json!({ "type": "string" })),
            interface(2, "/b", json!({})),
        ],
    );

    let err = Pipeline::new(&Plain).plugin(counter).run(ctx).unwrap_err();
    assert!(matches!(err, Error::Conversion { interface_id: 2, .. }));
    assert_eq!(after.load(Ordering::SeqCst), 0);
}

#[test]
fn test_empty_catalog_warns() {
    let ctx = Pipeline::new(&Plain).run(context("normal", vec![])).unwrap();
    assert!(ctx.has_warnings());
}

#[test]
fn test_runs_are_idempotent() {
    let run = || {
        Pipeline::new(&Plain)
            .run(context(
                "redux",
                vec![
                    interface(1, "/a", json!({ "type": "string" })),
                    interface(2, "/b", json!({ "type": "number" })),
                ],
            ))
            .unwrap()
            .take_files()
    };
    assert_eq!(run(), run());
}
