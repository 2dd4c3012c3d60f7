//! Deterministic formatting pass for generated TypeScript.
//!
//! Generated text arrives in one canonical form: single-quoted strings,
//! semicolon-terminated statements, two-space indentation. This pass
//! re-indents by bracket depth and applies the `[format]` overrides. It
//! understands strings, template literals and comments well enough to
//! leave them alone, which is all generated code needs.

use rapper_codegen::Indent;
use rapper_manifest::FormatOptions;

/// Format `text` according to `options`.
///
/// - indentation is recomputed from bracket nesting, one level per line
///   no matter how many brackets that line opens
/// - string literals switch to the preferred quote unless that would need
///   extra escapes
/// - statement-ending semicolons are dropped when `semi` is off
/// - trailing whitespace is removed and runs of blank lines collapse to one
pub fn format(text: &str, options: &FormatOptions) -> String {
    let indent = Indent::from_options(options);
    let quote = if options.single_quote { '\'' } else { '"' };
    let mut scanner = Scanner::default();
    let mut out = String::with_capacity(text.len());
    let mut pending_blank = false;

    for raw in text.lines() {
        let Some(line) = scanner.line(raw, quote, options.semi) else {
            pending_blank = !out.is_empty();
            continue;
        };
        if pending_blank {
            out.push('\n');
            pending_blank = false;
        }
        out.push_str(&indent.repeat(line.level));
        out.push_str(&line.text);
        out.push('\n');
    }

    out
}

struct Line {
    level: usize,
    text: String,
}

#[derive(Default)]
struct Scanner {
    level: usize,
    /// One entry per unclosed bracket: whether it raised the level.
    open: Vec<bool>,
    in_block_comment: bool,
    in_template: bool,
}

impl Scanner {
    /// Process one input line. Returns `None` for a blank line.
    fn line(&mut self, raw: &str, quote: char, semi: bool) -> Option<Line> {
        // Template literal content is kept byte for byte.
        let verbatim = self.in_template;
        let trimmed = if verbatim { raw.trim_end() } else { raw.trim() };
        if trimmed.is_empty() && !verbatim {
            return None;
        }

        let continues_comment = self.in_block_comment;
        let mut level = self.level;
        if !verbatim && !continues_comment {
            let closers = trimmed
                .chars()
                .take_while(|c| matches!(c, '}' | ']' | ')'))
                .count();
            let lowered = self.open.iter().rev().take(closers).filter(|r| **r).count();
            level = level.saturating_sub(lowered);
        }

        let (mut text, code_end) = self.scan(trimmed, quote);
        if !semi {
            strip_semicolon(&mut text, code_end);
        }

        if continues_comment && text.starts_with('*') {
            text.insert(0, ' ');
        }
        if verbatim {
            level = 0;
        }
        Some(Line { level, text })
    }

    /// Rewrite string literals and track nesting. Returns the text and the
    /// byte offset just past its last code character.
    fn scan(&mut self, line: &str, quote: char) -> (String, Option<usize>) {
        let chars: Vec<char> = line.chars().collect();
        let mut text = String::with_capacity(line.len());
        let mut code_end = None;
        // Depth of the bracket that raised the level on this line.
        let mut raised_at: Option<usize> = None;
        let mut i = 0;

        while i < chars.len() {
            let c = chars[i];
            let next = chars.get(i + 1).copied();

            if self.in_block_comment {
                text.push(c);
                if c == '*' && next == Some('/') {
                    text.push('/');
                    self.in_block_comment = false;
                    i += 2;
                } else {
                    i += 1;
                }
                continue;
            }

            if self.in_template {
                text.push(c);
                match (c, next) {
                    ('\\', Some(escaped)) => {
                        text.push(escaped);
                        i += 2;
                        continue;
                    }
                    ('`', _) => {
                        self.in_template = false;
                        code_end = Some(text.len());
                    }
                    _ => {}
                }
                i += 1;
                continue;
            }

            match c {
                '/' if next == Some('*') => {
                    self.in_block_comment = true;
                    text.push_str("/*");
                    i += 2;
                }
                '/' if next == Some('/') => {
                    text.extend(&chars[i..]);
                    break;
                }
                '\'' | '"' => {
                    let (end, terminated) = literal_end(&chars, i);
                    if terminated {
                        text.push_str(&requote(&chars[i..end], quote));
                    } else {
                        text.extend(&chars[i..end]);
                    }
                    code_end = Some(text.len());
                    i = end;
                }
                '`' => {
                    self.in_template = true;
                    text.push(c);
                    i += 1;
                }
                '{' | '[' | '(' => {
                    let raise = raised_at.is_none();
                    if raise {
                        raised_at = Some(self.open.len());
                        self.level += 1;
                    }
                    self.open.push(raise);
                    text.push(c);
                    code_end = Some(text.len());
                    i += 1;
                }
                '}' | ']' | ')' => {
                    if self.open.pop() == Some(true) {
                        self.level = self.level.saturating_sub(1);
                    }
                    if raised_at == Some(self.open.len()) {
                        raised_at = None;
                    }
                    text.push(c);
                    code_end = Some(text.len());
                    i += 1;
                }
                c => {
                    text.push(c);
                    if !c.is_whitespace() {
                        code_end = Some(text.len());
                    }
                    i += 1;
                }
            }
        }

        (text, code_end)
    }
}

/// Index just past the literal starting at `start`, and whether it closed.
fn literal_end(chars: &[char], start: usize) -> (usize, bool) {
    let quote = chars[start];
    let mut i = start + 1;
    while i < chars.len() {
        match chars[i] {
            '\\' => i += 2,
            c if c == quote => return (i + 1, true),
            _ => i += 1,
        }
    }
    (chars.len(), false)
}

/// Re-quote a complete string literal with `preferred`, unless its content
/// contains that quote unescaped.
fn requote(literal: &[char], preferred: char) -> String {
    let original = literal[0];
    if original == preferred {
        return literal.iter().collect();
    }

    let inner = &literal[1..literal.len() - 1];
    let mut body = String::with_capacity(inner.len());
    let mut i = 0;
    while i < inner.len() {
        match inner[i] {
            '\\' if i + 1 < inner.len() => {
                if inner[i + 1] != original {
                    body.push('\\');
                }
                body.push(inner[i + 1]);
                i += 2;
            }
            c if c == preferred => return literal.iter().collect(),
            c => {
                body.push(c);
                i += 1;
            }
        }
    }
    format!("{preferred}{body}{preferred}")
}

fn strip_semicolon(text: &mut String, code_end: Option<usize>) {
    if let Some(end) = code_end {
        if text[..end].ends_with(';') {
            text.remove(end - 1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(indent: u8, single_quote: bool, semi: bool) -> FormatOptions {
        FormatOptions {
            indent,
            single_quote,
            semi,
        }
    }

    #[test]
    fn test_reindents_by_depth() {
        let text = "export const a = {\n'x': [\n1,\n2\n],\n};\n";
        assert_eq!(
            format(text, &FormatOptions::default()),
            "export const a = {\n  'x': [\n    1,\n    2\n  ],\n}\n"
        );
        assert_eq!(
            format(text, &options(4, true, true)),
            "export const a = {\n    'x': [\n        1,\n        2\n    ],\n};\n"
        );
    }

    #[test]
    fn test_one_level_per_line() {
        let text = "return rapperFetch({\nurl: '/a',\n}) as Promise<R>;\n";
        assert_eq!(
            format(text, &FormatOptions::default()),
            "return rapperFetch({\n  url: '/a',\n}) as Promise<R>\n"
        );

        let text = "a(b).then(() => {\nc();\n});\n";
        assert_eq!(
            format(text, &FormatOptions::default()),
            "a(b).then(() => {\n  c()\n})\n"
        );
    }

    #[test]
    fn test_requotes_strings() {
        let double = options(2, false, true);
        assert_eq!(format("const a = 'x';\n", &double), "const a = \"x\";\n");
        assert_eq!(format("const a = 'say \"hi\"';\n", &double), "const a = 'say \"hi\"';\n");

        let single = FormatOptions::default();
        assert_eq!(format("const a = \"it's\"\n", &single), "const a = \"it's\"\n");
        assert_eq!(format("const a = \"a\\\"b\"\n", &single), "const a = 'a\"b'\n");
    }

    #[test]
    fn test_comments_are_opaque() {
        let text = "// don't { count\n/** {\n* ( doc\n*/\nconst a = 1;\n";
        assert_eq!(
            format(text, &FormatOptions::default()),
            "// don't { count\n/** {\n * ( doc\n */\nconst a = 1\n"
        );
    }

    #[test]
    fn test_doc_comment_inside_block() {
        let text = "interface A {\n/**\n* id\n*/\nid: number;\n}\n";
        assert_eq!(
            format(text, &FormatOptions::default()),
            "interface A {\n  /**\n   * id\n   */\n  id: number\n}\n"
        );
    }

    #[test]
    fn test_blank_lines_collapse() {
        let text = "\n\na   \n\n\n\nb\n\n";
        assert_eq!(format(text, &FormatOptions::default()), "a\n\nb\n");
    }

    #[test]
    fn test_brackets_in_strings_do_not_nest() {
        let text = "const a = {\nb: '{[(',\n};\nconst c = 1;\n";
        assert_eq!(
            format(text, &FormatOptions::default()),
            "const a = {\n  b: '{[(',\n}\nconst c = 1\n"
        );
    }

    #[test]
    fn test_format_is_idempotent() {
        let text = "export interface IModels {\n'GET/a': {\nReq: {};\nRes: {\nid: number;\n};\n};\n}\n";
        let once = format(text, &FormatOptions::default());
        assert_eq!(format(&once, &FormatOptions::default()), once);
    }
}
