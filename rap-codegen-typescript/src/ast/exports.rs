//! TypeScript export builder.

use rapper_codegen::{CodeBuilder, CodeFragment, Renderable};

/// Builder for TypeScript export statements.
#[derive(Debug, Clone, Default)]
pub enum Export {
    /// `export { a, b };`
    Named(Vec<String>),
    /// `export type Alias = Target;`
    TypeAlias { name: String, target: String },
    /// `export default value;`
    Default(String),
    #[default]
    Nothing,
}

impl Export {
    pub fn new() -> Self {
        Export::Nothing
    }

    /// Export a named item, switching to a named export list.
    pub fn named(self, name: impl Into<String>) -> Self {
        let mut names = match self {
            Export::Named(names) => names,
            _ => Vec::new(),
        };
        names.push(name.into());
        Export::Named(names)
    }

    pub fn names<S: Into<String>>(self, names: impl IntoIterator<Item = S>) -> Self {
        names.into_iter().fold(self, |export, name| export.named(name))
    }

    pub fn type_alias(name: impl Into<String>, target: impl Into<String>) -> Self {
        Export::TypeAlias {
            name: name.into(),
            target: target.into(),
        }
    }

    pub fn default_export(value: impl Into<String>) -> Self {
        Export::Default(value.into())
    }

    fn statement(&self) -> Option<String> {
        match self {
            Export::Named(names) if !names.is_empty() => {
                Some(format!("export {{ {} }};", names.join(", ")))
            }
            Export::TypeAlias { name, target } => {
                Some(format!("export type {} = {};", name, target))
            }
            Export::Default(value) => Some(format!("export default {};", value)),
            Export::Named(_) | Export::Nothing => None,
        }
    }

    /// Build the export as a string.
    pub fn build(&self) -> String {
        match self.statement() {
            Some(line) => CodeBuilder::typescript().line(&line).build(),
            None => String::new(),
        }
    }
}

impl Renderable for Export {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        self.statement().map(CodeFragment::Line).into_iter().collect()
    }
}
