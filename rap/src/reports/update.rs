//! Upgrade hint shown before a sync.

use rapper_core::Version;

use super::output::{Output, Report};

/// A newer rapper release is available.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpgradeHint {
    pub running: Version,
    pub latest: Version,
}

impl Report for UpgradeHint {
    fn render(&self, out: &mut dyn Output) {
        out.warning("a newer rapper release is available");
        out.key_value("  Current version", &self.running.to_string());
        out.key_value("  Latest version", &self.latest.to_string());
        out.newline();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::output::BufferOutput;

    #[test]
    fn test_render() {
        let hint = UpgradeHint {
            running: Version::new(0, 6, 0),
            latest: Version::new(0, 7, 1),
        };
        let mut out = BufferOutput::default();
        hint.render(&mut out);

        assert_eq!(
            out.lines,
            [
                "warning: a newer rapper release is available",
                "  Current version: 0.6.0",
                "  Latest version: 0.7.1",
                "",
            ]
        );
    }
}
