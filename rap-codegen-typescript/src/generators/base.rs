//! The base generator: model types, the fetch table and templates.

use rapper_codegen::{
    CodeBuilder, FileKind, Fragment, GenerationInput, Generator, GeneratorKind, Model,
};
use rapper_core::{Error, Result};
use rapper_ir::Interface;
use serde_json::{Map, Value};
use tracing::debug;

use super::{COMMON_LIB, help_lines, model_doc};
use crate::ast::{Export, Import, KeyedTable, string_literal};

/// Always runs; produces `index`, `request` and `template`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BaseGenerator;

impl Generator for BaseGenerator {
    fn name(&self) -> &'static str {
        "base"
    }

    fn kind(&self) -> GeneratorKind {
        GeneratorKind::Base
    }

    fn generate(&self, input: &GenerationInput<'_>) -> Result<Vec<(FileKind, Fragment)>> {
        debug!(
            interfaces = input.interfaces.len(),
            templates = input.templates.len(),
            "Generating base files."
        );
        Ok(vec![
            (FileKind::Index, index()),
            (FileKind::Request, request(input)?),
            (FileKind::Template, template(input)?),
        ])
    }
}

fn index() -> Fragment {
    let imports = [
        Import::new("./request").names(["createFetch", "IModels"]).build(),
        Import::new(COMMON_LIB).namespace("commonLib").build(),
    ];

    let body = CodeBuilder::typescript()
        .line("const { defaultFetch } = commonLib;")
        .line("let fetch = createFetch({}, { fetchType: commonLib.FetchType.BASE });")
        .build();

    let exports = CodeBuilder::typescript()
        .block(
            "export const overrideFetch = (fetchConfig: commonLib.RequesterOption) => {",
            "};",
            |b| b.line("fetch = createFetch(fetchConfig, { fetchType: commonLib.FetchType.AUTO });"),
        )
        .build()
        + &Export::new().names(["fetch", "createFetch", "defaultFetch"]).build()
        + &Export::type_alias("Models", "IModels").build();

    Fragment::new()
        .imports(imports.concat())
        .body(body)
        .exports(exports)
        .defines(["defaultFetch", "fetch", "overrideFetch", "Models"])
}

fn request(input: &GenerationInput<'_>) -> Result<Fragment> {
    let rap_url = &input.extras.rap_url;

    let mut models = KeyedTable::members("export interface IModels {");
    let mut response_types = KeyedTable::members("export interface IResponseTypes {");
    let mut fetchers = KeyedTable::object("return {");

    for itf in input.interfaces {
        let model = model_for(input, itf)?;
        let name = &itf.model_name;
        let key = string_literal(name);

        models = models.documented(name, model_doc(itf, rap_url), model_type(model));
        response_types = response_types.entry(name, format!("ResSelector<IModels[{key}]['Res']>"));

        let mut doc = help_lines(itf, rap_url);
        doc.push("@param req request parameters".to_string());
        doc.push("@param extra request options".to_string());
        fetchers = fetchers.documented(name, doc, fetcher(itf));
    }

    let mut builder = CodeBuilder::typescript();
    builder.emit(&models).push_blank();
    builder.push_line(&statement(&input.extras.res_selector)).push_blank();
    builder.emit(&response_types).push_blank();

    let body = builder
        .line("export function createFetch(")
        .indent()
        .line("fetchConfig: commonLib.RequesterOption,")
        .line("extraConfig?: { fetchType?: commonLib.FetchType },")
        .dedent()
        .block(") {", "}", |b| {
            let mut b = b
                .block("if (!extraConfig?.fetchType) {", "}", |b| {
                    b.line(
                        "console.warn('Rapper Warning: createFetch is deprecated, \
                         use overrideFetch to customize fetch instead');",
                    )
                })
                .line("const rapperFetch = commonLib.getRapperRequest(fetchConfig);")
                .blank();
            b.emit(&fetchers);
            b
        })
        .build();

    Ok(Fragment::new()
        .imports(Import::new(COMMON_LIB).namespace("commonLib").build())
        .body(body)
        .defines(["IModels", "ResSelector", "IResponseTypes", "createFetch"]))
}

fn template(input: &GenerationInput<'_>) -> Result<Fragment> {
    let entries: Vec<Value> = input
        .interfaces
        .iter()
        .map(|itf| {
            let key = itf.key();
            let payload = input.templates.get(&key).cloned().unwrap_or(Value::Null);
            let mut entry = Map::new();
            entry.insert(key.as_str().to_string(), payload);
            Value::Object(entry)
        })
        .collect();

    let json = serde_json::to_string_pretty(&Value::Array(entries))
        .map_err(|e| Error::generation(format!("template payloads: {}", e)))?;

    Ok(Fragment::new()
        .body(format!("const rst = {};", json))
        .exports(Export::default_export("rst").build())
        .defines(["rst"]))
}

fn model_for<'a>(input: &GenerationInput<'a>, itf: &Interface) -> Result<&'a Model> {
    input.models.get(&itf.model_name).ok_or_else(|| {
        Error::generation(format!(
            "no converted types for model '{}' (interface {})",
            itf.model_name, itf.id
        ))
    })
}

fn model_type(model: &Model) -> String {
    CodeBuilder::typescript()
        .block("{", "}", |b| {
            let mut b = b;
            b.push_text(&format!("Req: {};", model.request));
            b.push_text(&format!("Res: {};", model.response));
            b
        })
        .build()
}

fn fetcher(itf: &Interface) -> String {
    let key = string_literal(&itf.model_name);
    CodeBuilder::typescript()
        .block(
            &format!(
                "(req?: IModels[{key}]['Req'], extra?: commonLib.IExtra) => {{"
            ),
            "}",
            |b| {
                b.block("return rapperFetch({", &format!("}}) as Promise<IResponseTypes[{key}]>;"), |b| {
                    b.line(&format!("url: {},", string_literal(&itf.url)))
                        .line(&format!("method: {},", string_literal(itf.method.as_str())))
                        .line("params: req,")
                        .line("extra,")
                })
            },
        )
        .build()
}

/// Terminate a user-supplied declaration.
fn statement(text: &str) -> String {
    let text = text.trim();
    if text.ends_with(';') {
        text.to_string()
    } else {
        format!("{};", text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::fixtures::Inputs;

    fn fragments() -> Vec<(FileKind, Fragment)> {
        let inputs = Inputs::new();
        BaseGenerator.generate(&inputs.input()).unwrap()
    }

    #[test]
    fn test_contributes_three_files() {
        let kinds: Vec<_> = fragments().into_iter().map(|(kind, _)| kind).collect();
        assert_eq!(kinds, [FileKind::Index, FileKind::Request, FileKind::Template]);
    }

    #[test]
    fn test_index_fragment() {
        let index = index();
        assert_eq!(
            index.imports,
            "import { createFetch, IModels } from './request';\n\
             import * as commonLib from 'rap/runtime/commonLib';\n"
        );
        insta::assert_snapshot!(index.exports, @r"
        export const overrideFetch = (fetchConfig: commonLib.RequesterOption) => {
          fetch = createFetch(fetchConfig, { fetchType: commonLib.FetchType.AUTO });
        };
        export { fetch, createFetch, defaultFetch };
        export type Models = IModels;
        ");
    }

    #[test]
    fn test_request_tables_follow_interface_order() {
        let (_, request) = fragments().remove(1);
        let body = &request.body;

        let models = body.find("export interface IModels {").unwrap();
        let get = body.find("'GET/users': {").unwrap();
        let post = body.find("'POST/users': {").unwrap();
        let selector = body.find("type ResSelector<T> = T;").unwrap();
        let responses = body.find("export interface IResponseTypes {").unwrap();
        let fetch = body.find("export function createFetch(").unwrap();
        assert!(models < get && get < post && post < selector && selector < responses && responses < fetch);

        assert!(body.contains("Req: {\n      id: number;\n    };"));
        assert!(body.contains("'GET/users': ResSelector<IModels['GET/users']['Res']>;"));
        assert!(body.contains("* @model POST/users"));
        assert!(body.contains("url: '/users',"));
        assert!(body.contains("method: 'POST',"));
        assert!(body.contains("}) as Promise<IResponseTypes['POST/users']>;"));
    }

    #[test]
    fn test_fetcher_shape() {
        let itf = crate::generators::fixtures::interface(1, "GET", "/a", "a");
        insta::assert_snapshot!(fetcher(&itf), @r"
        (req?: IModels['GET/a']['Req'], extra?: commonLib.IExtra) => {
          return rapperFetch({
            url: '/a',
            method: 'GET',
            params: req,
            extra,
          }) as Promise<IResponseTypes['GET/a']>;
        }
        ");
    }

    #[test]
    fn test_template_entries_keyed_by_interface() {
        let (_, template) = fragments().remove(2);
        assert!(template.body.starts_with("const rst = [\n"));
        assert!(template.body.contains("\"GET/users\": {\n      \"id\": 1\n    }"));
        assert!(template.body.ends_with("];"));
        assert_eq!(template.exports, "export default rst;\n");
    }

    #[test]
    fn test_missing_model_is_a_generation_error() {
        let mut inputs = Inputs::new();
        inputs.models.shift_remove("POST/users");
        let err = BaseGenerator.generate(&inputs.input()).unwrap_err();
        assert!(matches!(err, Error::Generation(_)));
    }

    #[test]
    fn test_statement_terminates_once() {
        assert_eq!(statement("type A = B"), "type A = B;");
        assert_eq!(statement(" type A = B; "), "type A = B;");
    }
}
