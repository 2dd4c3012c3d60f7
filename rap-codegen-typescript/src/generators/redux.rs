//! The Redux extension: action types, store hooks and selectors.

use rapper_codegen::{CodeBuilder, FileKind, Fragment, GenerationInput, Generator, GeneratorKind};
use rapper_core::Result;
use rapper_ir::Interface;
use tracing::debug;

use super::{REDUX_LIB, help_lines};
use crate::ast::{Export, Import, KeyedTable, string_literal};

/// Names `redux.ts` exports and `index.ts` re-exports.
const HOOKS: [&str; 7] = [
    "RequestTypes",
    "useRapper",
    "useResponse",
    "useAllResponse",
    "clearResponseCache",
    "rapperBaseSelector",
    "rapperDataSelector",
];

/// Runs for style `redux`; adds `redux.ts` and extends `index.ts`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReduxGenerator;

impl Generator for ReduxGenerator {
    fn name(&self) -> &'static str {
        "redux"
    }

    fn kind(&self) -> GeneratorKind {
        GeneratorKind::Extension
    }

    fn generate(&self, input: &GenerationInput<'_>) -> Result<Vec<(FileKind, Fragment)>> {
        debug!(interfaces = input.interfaces.len(), "Generating redux bindings.");
        Ok(vec![
            (FileKind::Index, index()),
            (FileKind::Style("redux".to_string()), redux(input)),
        ])
    }
}

fn index() -> Fragment {
    let imports = [
        Import::new("./request").named("IResponseTypes").build(),
        Import::new(REDUX_LIB).namespace("reduxLib").build(),
        Import::new("./redux").names(HOOKS).build(),
    ];

    let exports = Export::new()
        .names(["rapperReducers", "rapperEnhancer"])
        .names(HOOKS)
        .build()
        + &Export::type_alias("ResponseTypes", "IResponseTypes").build();

    Fragment::new()
        .imports(imports.concat())
        .body("const { rapperReducers, rapperEnhancer } = reduxLib;\n")
        .exports(exports)
        .defines(["rapperReducers", "rapperEnhancer", "ResponseTypes"])
}

fn redux(input: &GenerationInput<'_>) -> Fragment {
    let rap_url = &input.extras.rap_url;
    let imports = [
        Import::new("react-redux").named("useSelector").build(),
        Import::new(REDUX_LIB).namespace("reduxLib").build(),
        Import::new("./request")
            .names(["IModels", "IResponseTypes", "createFetch"])
            .build(),
        Import::new("./index").named("fetch").build(),
    ];

    let tables: [(&str, bool, fn(&str) -> String); 7] = [
        ("export const RequestTypes = {", false, request_types),
        ("export const useResponse = {", true, use_response),
        ("export const useRapper = {", true, use_rapper),
        ("export const useAllResponse = {", true, use_all_response),
        ("export const clearResponseCache = {", true, clear_response_cache),
        ("export const rapperBaseSelector = {", false, base_selector),
        ("export const rapperDataSelector = {", false, data_selector),
    ];

    let mut store = KeyedTable::members("interface IRapperStore {");
    for itf in input.interfaces {
        store = store.entry(&itf.model_name, store_entry(&itf.model_name));
    }

    let mut builder = CodeBuilder::typescript();
    builder.emit(&store);
    builder
        .push_line("export type TRapperStoreKey = keyof IRapperStore;")
        .push_blank();

    for (i, (header, documented, value)) in tables.into_iter().enumerate() {
        if i > 0 {
            builder.push_blank();
        }
        builder.emit(&table(input.interfaces, rap_url, header, documented, value));
    }

    Fragment::new()
        .imports(imports.concat())
        .body(builder.build())
        .defines(
            ["IRapperStore", "TRapperStoreKey"]
                .into_iter()
                .chain(HOOKS),
        )
}

fn table(
    interfaces: &[Interface],
    rap_url: &str,
    header: &str,
    documented: bool,
    value: fn(&str) -> String,
) -> KeyedTable {
    interfaces.iter().fold(KeyedTable::object(header), |table, itf| {
        let text = value(&itf.model_name);
        if documented {
            table.documented(&itf.model_name, help_lines(itf, rap_url), text)
        } else {
            table.entry(&itf.model_name, text)
        }
    })
}

fn store_entry(model: &str) -> String {
    let key = string_literal(model);
    CodeBuilder::typescript()
        .block("Array<reduxLib.IInterfaceInfo & {", "}>", |b| {
            b.line(&format!("request: IModels[{key}]['Req'];"))
                .line(&format!("response: IResponseTypes[{key}];"))
        })
        .build()
}

fn request_types(model: &str) -> String {
    CodeBuilder::typescript()
        .block("[", "]", |b| {
            ["REQUEST", "SUCCESS", "FAILURE"].into_iter().fold(b, |b, stage| {
                b.line(&format!("{},", string_literal(&format!("{}_{}", model, stage))))
            })
        })
        .build()
}

fn filter_param(key: &str) -> String {
    format!(
        "filter?: {{ request?: IModels[{key}]['Req'] }} | {{ (storeData: IRapperStore[{key}][0]): boolean }},"
    )
}

fn use_response(model: &str) -> String {
    let key = string_literal(model);
    CodeBuilder::typescript()
        .line("function useData(")
        .indent()
        .line(&filter_param(&key))
        .dedent()
        .block(") {", "}", |b| {
            b.line(&format!("type Req = IModels[{key}]['Req'];"))
                .line(&format!("type Item = IRapperStore[{key}][0];"))
                .line(&format!("type Res = IResponseTypes[{key}];"))
                .line(&format!(
                    "return reduxLib.useResponseData<TRapperStoreKey, Req, Res, Item>({key}, filter);"
                ))
        })
        .build()
}

fn use_rapper(model: &str) -> String {
    let key = string_literal(model);
    CodeBuilder::typescript()
        .line("function useData(")
        .indent()
        .line(&format!("requestParams?: IModels[{key}]['Req'],"))
        .line("extra?: reduxLib.IUseRapperExtra & { fetch?: ReturnType<typeof createFetch> },")
        .dedent()
        .block(") {", "}", |b| {
            b.line(&format!("type Req = IModels[{key}]['Req'];"))
                .line(&format!("type Res = IResponseTypes[{key}];"))
                .line("const rapperFetch = extra && extra.fetch ? extra.fetch : fetch;")
                .line(&format!("type IFetcher = typeof rapperFetch[{key}];"))
                .block(
                    "return reduxLib.useRapperCommon<TRapperStoreKey, Req, Res, IFetcher>({",
                    "});",
                    |b| {
                        b.line(&format!("modelName: {key},"))
                            .line(&format!("fetcher: rapperFetch[{key}],"))
                            .line("requestParams,")
                            .line("extra,")
                    },
                )
        })
        .build()
}

fn use_all_response(model: &str) -> String {
    let key = string_literal(model);
    CodeBuilder::typescript()
        .block("function useData() {", "}", |b| {
            b.block("return useSelector((state: reduxLib.IState) => {", "});", |b| {
                b.line(&format!(
                    "const selectedState = (state['$$rapperResponseData'] && state['$$rapperResponseData'][{key}]) || [];"
                ))
                .block("type TReturnItem = reduxLib.IInterfaceInfo & {", "};", |b| {
                    b.line(&format!("request?: IModels[{key}]['Req'];"))
                        .line(&format!("response?: IResponseTypes[{key}];"))
                })
                .line("return selectedState as Array<TReturnItem>;")
            })
        })
        .build()
}

fn clear_response_cache(model: &str) -> String {
    let key = string_literal(model);
    CodeBuilder::typescript()
        .block("(): void => {", "}", |b| {
            b.block("reduxLib.dispatchAction({", "});", |b| {
                b.line("type: '$$RAPPER_CLEAR_STORE',")
                    .line(&format!("payload: {{ {key}: undefined }},"))
            })
        })
        .build()
}

fn base_selector(model: &str) -> String {
    let key = string_literal(model);
    CodeBuilder::typescript()
        .line("(")
        .indent()
        .line("state: reduxLib.IState,")
        .line(&filter_param(&key))
        .dedent()
        .block(") => {", "}", |b| {
            b.line(&format!("type Req = IModels[{key}]['Req'];"))
                .line(&format!("type Res = IResponseTypes[{key}];"))
                .line(&format!("type Item = IRapperStore[{key}][0];"))
                .line(&format!(
                    "return reduxLib.getResponseData<TRapperStoreKey, Req, Res, Item>(state, {key}, filter);"
                ))
        })
        .build()
}

fn data_selector(model: &str) -> String {
    let key = string_literal(model);
    CodeBuilder::typescript()
        .block("(state: reduxLib.IState) => {", "}", |b| {
            b.line(&format!("type Res = IResponseTypes[{key}];")).line(&format!(
                "return reduxLib.getRapperDataSelector<TRapperStoreKey, Res>(state, {key});"
            ))
        })
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::fixtures::Inputs;

    #[test]
    fn test_extends_index_and_adds_redux_file() {
        let inputs = Inputs::new();
        let fragments = ReduxGenerator.generate(&inputs.input()).unwrap();
        let kinds: Vec<_> = fragments.iter().map(|(kind, _)| kind.clone()).collect();
        assert_eq!(kinds, [FileKind::Index, FileKind::Style("redux".into())]);

        let (_, index) = &fragments[0];
        assert!(index.imports.contains("import * as reduxLib from 'rap/runtime/reduxLib';"));
        assert!(index.exports.contains("export type ResponseTypes = IResponseTypes;"));
        assert!(!index.symbols.contains(&"fetch".to_string()));
    }

    #[test]
    fn test_redux_file_tables() {
        let inputs = Inputs::new();
        let body = redux(&inputs.input()).body;

        let order: Vec<usize> = [
            "interface IRapperStore {",
            "export type TRapperStoreKey = keyof IRapperStore;",
            "export const RequestTypes = {",
            "export const useResponse = {",
            "export const useRapper = {",
            "export const useAllResponse = {",
            "export const clearResponseCache = {",
            "export const rapperBaseSelector = {",
            "export const rapperDataSelector = {",
        ]
        .iter()
        .map(|needle| body.find(needle).unwrap())
        .collect();
        assert!(order.windows(2).all(|w| w[0] < w[1]));

        assert!(body.contains("'POST/users_FAILURE',"));
        assert!(body.contains("payload: { 'GET/users': undefined },"));
        assert!(body.contains("return reduxLib.getRapperDataSelector<TRapperStoreKey, Res>(state, 'POST/users');"));
    }

    #[test]
    fn test_request_types_entry() {
        insta::assert_snapshot!(request_types("GET/a"), @r"
        [
          'GET/a_REQUEST',
          'GET/a_SUCCESS',
          'GET/a_FAILURE',
        ]
        ");
    }

    #[test]
    fn test_use_rapper_entry() {
        insta::assert_snapshot!(use_rapper("GET/a"), @r"
        function useData(
          requestParams?: IModels['GET/a']['Req'],
          extra?: reduxLib.IUseRapperExtra & { fetch?: ReturnType<typeof createFetch> },
        ) {
          type Req = IModels['GET/a']['Req'];
          type Res = IResponseTypes['GET/a'];
          const rapperFetch = extra && extra.fetch ? extra.fetch : fetch;
          type IFetcher = typeof rapperFetch['GET/a'];
          return reduxLib.useRapperCommon<TRapperStoreKey, Req, Res, IFetcher>({
            modelName: 'GET/a',
            fetcher: rapperFetch['GET/a'],
            requestParams,
            extra,
          });
        }
        ");
    }
}
