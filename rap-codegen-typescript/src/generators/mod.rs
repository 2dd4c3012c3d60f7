//! Base and Redux generators.

mod base;
mod redux;

pub use base::BaseGenerator;
use rapper_codegen::drift::fingerprint;
use rapper_ir::Interface;
pub use redux::ReduxGenerator;

/// Runtime helpers shipped with the `rap` npm package.
pub(crate) const COMMON_LIB: &str = "rap/runtime/commonLib";
pub(crate) const REDUX_LIB: &str = "rap/runtime/reduxLib";

/// Doc comment lines identifying an interface.
pub(crate) fn help_lines(itf: &Interface, rap_url: &str) -> Vec<String> {
    let mut lines = vec![format!("Interface: {}", doc_safe(&itf.name))];
    lines.extend(
        itf.description
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(doc_safe),
    );
    lines.push(format!("Rap: {}", itf.editor_reference(rap_url)));
    lines
}

/// [`help_lines`] plus the model tags read back by drift detection.
pub(crate) fn model_doc(itf: &Interface, rap_url: &str) -> Vec<String> {
    let mut lines = help_lines(itf, rap_url);
    lines.extend(fingerprint::tags(itf));
    lines
}

fn doc_safe(text: &str) -> String {
    text.replace("*/", "* /")
}


#[cfg(test)]
mod tests {
    use super::{fixtures::interface, *};

    #[test]
    fn test_help_lines() {
        let mut itf = interface(9, "GET", "/a", "list */ things");
        itf.description = "first\n\n  second ".to_string();
        assert_eq!(
            help_lines(&itf, "http://rap"),
            vec![
                "Interface: list * / things".to_string(),
                "first".to_string(),
                "second".to_string(),
                "Rap: http://rap/repository/editor?id=3&mod=7&itf=9".to_string(),
            ]
        );
    }

    #[test]
    fn test_model_doc_carries_tags() {
        let itf = interface(1, "GET", "/a", "a");
        let doc = model_doc(&itf, "http://rap");
        assert_eq!(doc.len(), 5);
        assert_eq!(doc[2], "@model GET/a");
        assert_eq!(doc[3], "@key GET/a");
        assert!(doc[4].starts_with("@fingerprint "));
    }
}
