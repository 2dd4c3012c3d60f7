//! Indentation configuration for generated code.

use rapper_manifest::FormatOptions;

/// Indentation style for generated code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Indent {
    /// Spaces with the specified width.
    Spaces(u8),
    /// Tab character.
    Tab,
}

impl Indent {
    /// 2-space indentation, the TypeScript default.
    pub const TYPESCRIPT: Self = Self::Spaces(2);

    /// Indentation requested by `[format]`.
    pub fn from_options(options: &FormatOptions) -> Self {
        Self::Spaces(options.indent)
    }

    /// Width of one level in columns.
    pub fn width(&self) -> usize {
        match self {
            Self::Spaces(n) => *n as usize,
            Self::Tab => 1,
        }
    }

    /// The string for one indent level.
    pub fn unit(&self) -> String {
        match self {
            Self::Spaces(n) => " ".repeat(*n as usize),
            Self::Tab => "\t".to_string(),
        }
    }

    /// The string for `level` indent levels.
    pub fn repeat(&self, level: usize) -> String {
        self.unit().repeat(level)
    }
}

impl Default for Indent {
    fn default() -> Self {
        Self::TYPESCRIPT
    }
}
