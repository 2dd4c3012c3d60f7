//! Merging generator fragments into per-file text.

use std::collections::HashMap;

use indexmap::IndexMap;
use rapper_core::{Error, Result};

use crate::generator::{FileKind, Fragment, GeneratorKind};

/// Everything one generator contributed.
#[derive(Debug, Clone)]
pub struct GeneratorOutput {
    pub generator: &'static str,
    pub kind: GeneratorKind,
    pub fragments: Vec<(FileKind, Fragment)>,
}

/// Unformatted text for one output file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergedFile {
    pub kind: FileKind,
    pub text: String,
}

/// Combine fragments per file: all imports, then all bodies, then all exports.
///
/// Base output always precedes Extension output, whatever order the outputs
/// arrive in; within one kind registration order is kept. Files appear in the
/// order they were first contributed to. A fragment defining a symbol that an
/// earlier fragment of the same file already defines is rejected.
pub fn merge(mut outputs: Vec<GeneratorOutput>) -> Result<Vec<MergedFile>> {
    outputs.sort_by_key(|o| o.kind);

    let mut files: IndexMap<FileKind, Vec<(&'static str, Fragment)>> = IndexMap::new();
    for output in outputs {
        for (kind, fragment) in output.fragments {
            files.entry(kind).or_default().push((output.generator, fragment));
        }
    }

    files
        .into_iter()
        .map(|(kind, fragments)| {
            check_symbols(&kind, &fragments)?;
            let text = join_sections(&fragments);
            Ok(MergedFile { kind, text })
        })
        .collect()
}

fn check_symbols(kind: &FileKind, fragments: &[(&'static str, Fragment)]) -> Result<()> {
    let mut owners: HashMap<&str, &str> = HashMap::new();
    for (generator, fragment) in fragments {
        for symbol in &fragment.symbols {
            if let Some(owner) = owners.insert(symbol.as_str(), *generator) {
                return Err(Error::generation(format!(
                    "generator '{}' redefines '{}' in {} (already defined by '{}')",
                    generator, symbol, kind, owner
                )));
            }
        }
    }
    Ok(())
}

fn join_sections(fragments: &[(&'static str, Fragment)]) -> String {
    let parts = [
        section(fragments.iter().map(|(_, f)| f.imports.as_str()), "\n"),
        section(fragments.iter().map(|(_, f)| f.body.as_str()), "\n\n"),
        section(fragments.iter().map(|(_, f)| f.exports.as_str()), "\n"),
    ];

    let mut text = parts
        .into_iter()
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n");
    text.push('\n');
    text
}

fn section<'a>(texts: impl Iterator<Item = &'a str>, separator: &str) -> String {
    texts
        .map(|t| t.trim_matches('\n'))
        .filter(|t| !t.trim().is_empty())
        .collect::<Vec<_>>()
        .join(separator)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn output(name: &'static str, kind: GeneratorKind, fragments: Vec<(FileKind, Fragment)>) -> GeneratorOutput {
        GeneratorOutput {
            generator: name,
            kind,
            fragments,
        }
    }

    #[test]
    fn test_base_sections_precede_extension() {
        let base = output(
            "base",
            GeneratorKind::Base,
            vec![(
                FileKind::Index,
                Fragment::new().imports("import A").body("const a = 1").exports("export { a }"),
            )],
        );
        let ext = output(
            "redux",
            GeneratorKind::Extension,
            vec![(
                FileKind::Index,
                Fragment::new().imports("import B").exports("export { b }"),
            )],
        );

        // registration order must not matter
        let merged = merge(vec![ext, base]).unwrap();
        assert_eq!(merged.len(), 1);
        assert_eq!(
            merged[0].text,
            "import A\nimport B\n\nconst a = 1\n\nexport { a }\nexport { b }\n"
        );
        let text = &merged[0].text;
        assert!(text.find("import A").unwrap() < text.find("import B").unwrap());
    }

    #[test]
    fn test_files_keep_first_contribution_order() {
        let base = output(
            "base",
            GeneratorKind::Base,
            vec![
                (FileKind::Request, Fragment::new().body("r")),
                (FileKind::Index, Fragment::new().body("i")),
            ],
        );
        let ext = output(
            "redux",
            GeneratorKind::Extension,
            vec![(FileKind::Style("redux".into()), Fragment::new().body("x"))],
        );

        let merged = merge(vec![base, ext]).unwrap();
        let kinds: Vec<_> = merged.iter().map(|m| m.kind.stem().to_string()).collect();
        assert_eq!(kinds, ["request", "index", "redux"]);
        assert_eq!(merged[2].text, "x\n");
    }

    #[test]
    fn test_redefined_symbol_is_rejected() {
        let base = output(
            "base",
            GeneratorKind::Base,
            vec![(FileKind::Index, Fragment::new().body("const fetch = 1").defines(["fetch"]))],
        );
        let ext = output(
            "redux",
            GeneratorKind::Extension,
            vec![(FileKind::Index, Fragment::new().body("const fetch = 2").defines(["fetch"]))],
        );

        let err = merge(vec![base, ext]).unwrap_err();
        assert!(matches!(err, Error::Generation(_)));
        assert!(err.to_string().contains("'redux' redefines 'fetch' in index"));
    }

    #[test]
    fn test_same_symbol_in_different_files_is_allowed() {
        let base = output(
            "base",
            GeneratorKind::Base,
            vec![(FileKind::Index, Fragment::new().body("a").defines(["x"]))],
        );
        let ext = output(
            "redux",
            GeneratorKind::Extension,
            vec![(FileKind::Style("redux".into()), Fragment::new().body("b").defines(["x"]))],
        );
        assert!(merge(vec![base, ext]).is_ok());
    }
}
