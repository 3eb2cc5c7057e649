//! Line-level lexical helpers for indentation-delimited (Python) source.
//!
//! No grammar here: just enough tokenizing to find headers, decorators,
//! bracket depth, and string literals that span lines.

use regex::Regex;
use std::sync::LazyLock;

static FUNC_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:async\s+)?def\s+(\w+)").expect("valid function pattern"));
static CLASS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^class\s+(\w+)").expect("valid class pattern"));

// ---------------------------------------------------------------------------
// Headers and decorators
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderKind {
    Function,
    Class,
}

/// Match a `def`/`async def`/`class` header on an indentation-stripped line.
pub fn match_header(stripped: &str) -> Option<(HeaderKind, &str)> {
    if let Some(caps) = FUNC_RE.captures(stripped) {
        return caps.get(1).map(|m| (HeaderKind::Function, m.as_str()));
    }
    CLASS_RE.captures(stripped).and_then(|caps| caps.get(1)).map(|m| (HeaderKind::Class, m.as_str()))
}

pub fn is_decorator(stripped: &str) -> bool {
    stripped.starts_with('@')
}

/// Blank or `#`-only line.
pub fn is_trivia(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.is_empty() || trimmed.starts_with('#')
}

// ---------------------------------------------------------------------------
// Indentation and line endings
// ---------------------------------------------------------------------------

/// Leading whitespace of a line (spaces and tabs as written).
pub fn leading_whitespace(line: &str) -> &str {
    let content = line.trim_start_matches([' ', '\t']);
    &line[..line.len() - content.len()]
}

pub fn indent_width(line: &str) -> usize {
    leading_whitespace(line).len()
}

/// The terminator a line carries, defaulting to `\n` for the last line of a file.
pub fn line_ending(line: &str) -> &'static str {
    if line.ends_with("\r\n") {
        "\r\n"
    } else {
        "\n"
    }
}

/// Split source into lines that keep their terminators, so joining them
/// reproduces the input byte for byte.
pub fn split_lines(source: &str) -> Vec<String> {
    source.split_inclusive('\n').map(str::to_string).collect()
}

// ---------------------------------------------------------------------------
// Lexing state carried across lines
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Quote {
    ch: u8,
    triple: bool,
}

/// Bracket depths and open string literal, carried from one line to the next.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LexState {
    paren: i32,
    bracket: i32,
    brace: i32,
    quote: Option<Quote>,
}

impl LexState {
    /// All three bracket kinds are balanced (or over-closed).
    pub fn brackets_closed(&self) -> bool {
        self.paren <= 0 && self.bracket <= 0 && self.brace <= 0
    }

    /// The next line continues a construct started earlier.
    pub fn in_continuation(&self) -> bool {
        self.quote.is_some() || !self.brackets_closed()
    }

    /// Forget over-closed brackets so a stray `)` cannot mask later openings.
    pub fn settle(&mut self) {
        self.paren = self.paren.max(0);
        self.bracket = self.bracket.max(0);
        self.brace = self.brace.max(0);
    }

    /// Feed one line. Returns the byte offset of the first `:` seen outside
    /// strings and comments while every bracket depth is ≤ 0.
    pub fn feed(&mut self, line: &str) -> Option<usize> {
        let bytes = line.as_bytes();
        let mut introducer = None;
        let mut i = 0;
        while i < bytes.len() {
            let b = bytes[i];
            if let Some(quote) = self.quote {
                if b == b'\\' {
                    i += 2;
                    continue;
                }
                if b == quote.ch {
                    if !quote.triple {
                        self.quote = None;
                    } else if bytes[i..].starts_with(&[quote.ch; 3]) {
                        self.quote = None;
                        i += 3;
                        continue;
                    }
                }
                i += 1;
                continue;
            }
            match b {
                b'#' => break,
                b'\'' | b'"' => {
                    let triple = bytes[i..].starts_with(&[b; 3]);
                    self.quote = Some(Quote { ch: b, triple });
                    i += if triple { 3 } else { 1 };
                    continue;
                }
                b'(' => self.paren += 1,
                b')' => self.paren -= 1,
                b'[' => self.bracket += 1,
                b']' => self.bracket -= 1,
                b'{' => self.brace += 1,
                b'}' => self.brace -= 1,
                b':' if introducer.is_none() && self.brackets_closed() => introducer = Some(i),
                _ => {}
            }
            i += 1;
        }
        // Only triple-quoted strings survive a line break.
        if matches!(self.quote, Some(Quote { triple: false, .. })) {
            self.quote = None;
        }
        introducer
    }
}

/// True when anything but a comment follows the introducer at byte `offset`.
pub fn body_after_introducer(line: &str, offset: usize) -> bool {
    let rest = line.get(offset + 1..).unwrap_or_default().trim();
    !rest.is_empty() && !rest.starts_with('#')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_function_class_and_async_headers() {
        assert_eq!(match_header("def foo(x):"), Some((HeaderKind::Function, "foo")));
        assert_eq!(match_header("async def fetch():"), Some((HeaderKind::Function, "fetch")));
        assert_eq!(match_header("class Foo(Base):"), Some((HeaderKind::Class, "Foo")));
        assert_eq!(match_header("default = 1"), None);
        assert_eq!(match_header("classify(x)"), None);
    }

    #[test]
    fn introducer_inside_brackets_is_ignored() {
        let mut state = LexState::default();
        assert_eq!(state.feed("def f(a: int,\n"), None);
        assert!(state.in_continuation());
        assert_eq!(state.feed("      b: dict[str, int]) -> None:\n"), Some(32));
        assert!(!state.in_continuation());
    }

    #[test]
    fn strings_and_comments_do_not_count() {
        let mut state = LexState::default();
        assert_eq!(state.feed("def f(a=\")\", b='(') -> \"x:y\":  # (\n"), Some(28));
        assert!(!state.in_continuation());
    }

    #[test]
    fn triple_quoted_string_spans_lines() {
        let mut state = LexState::default();
        state.feed("    \"\"\"Start of docs\n");
        assert!(state.in_continuation());
        state.feed("text at column zero (\n");
        assert!(state.in_continuation());
        state.feed("    \"\"\"\n");
        assert!(!state.in_continuation());
    }

    #[test]
    fn inline_body_detection() {
        assert!(body_after_introducer("def f(): pass\n", 7));
        assert!(!body_after_introducer("def f():  # comment\n", 7));
        assert!(!body_after_introducer("class A(B):\n", 10));
        assert!(!body_after_introducer("x:", 1));
    }

    #[test]
    fn split_lines_round_trips() {
        let src = "a\r\nb\n\nc";
        let lines = split_lines(src);
        assert_eq!(lines, vec!["a\r\n", "b\n", "\n", "c"]);
        assert_eq!(lines.concat(), src);
        assert_eq!(line_ending(&lines[0]), "\r\n");
    }

    #[test]
    fn leading_whitespace_keeps_tabs() {
        assert_eq!(leading_whitespace("\t  x"), "\t  ");
        assert_eq!(indent_width("    def f():"), 4);
        assert_eq!(indent_width("\n"), 0);
    }
}
