//! Response parsing: turn the model's `name: text` lines into documentation
//! entries keyed by symbol path.

use docgen_core::{DocMap, DocumentationEntry, SymbolTable};
use tracing::debug;

/// One documentation line, split into its target and its text.
#[derive(Debug, Clone, PartialEq, Eq)]
enum DocLine<'a> {
    /// `Name: text` or `Outer/Name: text`
    Symbol { name: &'a str, text: &'a str },
    /// `Name/param arg: text` or `Name/return: text`
    Field { owner: &'a str, field: &'a str, text: &'a str },
}

fn parse_line(line: &str) -> Option<DocLine<'_>> {
    let (name, text) = line.split_once(':')?;
    let name = name.trim().trim_matches(|c: char| matches!(c, '\'' | '"' | '`' | '*')).trim();
    let text = text.trim();
    if name.is_empty() {
        return None;
    }
    if let Some((owner, field)) = name.rsplit_once('/') {
        let field = field.trim();
        if is_field(field) {
            return Some(DocLine::Field { owner: owner.trim(), field, text });
        }
    }
    Some(DocLine::Symbol { name, text })
}

/// `return` or `param <arg>`; a symbol that merely starts with `param` is not a field.
fn is_field(segment: &str) -> bool {
    segment == "return"
        || segment.strip_prefix("param").is_some_and(|arg| arg.starts_with(char::is_whitespace))
}

/// Path in `table` naming `name`: the first one ending in `/name`, preferring
/// one not yet documented.
fn resolve<'t>(table: &'t SymbolTable, docs: &DocMap, name: &str) -> Option<&'t str> {
    let suffix = format!("/{name}");
    let mut matches = table.paths().filter(|path| path.ends_with(&suffix));
    let first = matches.next()?;
    if !docs.contains_key(first) {
        return Some(first);
    }
    matches.find(|path| !docs.contains_key(*path)).or(Some(first))
}

/// Parse response text against the symbols that were requested.
///
/// Field lines are appended to their owner's text as `:param arg: text` or
/// `:return: text`; a field line whose owner has no entry yet is dropped.
pub fn parse_response(text: &str, table: &SymbolTable) -> DocMap {
    let mut docs = DocMap::new();
    for line in text.lines().map(str::trim).filter(|l| !l.is_empty()) {
        match parse_line(line) {
            Some(DocLine::Symbol { name, text }) => {
                let Some(path) = resolve(table, &docs, name) else {
                    debug!(name, "No symbol matches documentation line");
                    continue;
                };
                if let Some(entry) = table.get(path) {
                    docs.insert(path.to_string(), DocumentationEntry::new(entry.position, text));
                }
            }
            Some(DocLine::Field { owner, field, text }) => {
                let suffix = format!("/{owner}");
                let target = docs.iter_mut().find(|(path, _)| path.ends_with(&suffix));
                match target {
                    Some((_, entry)) => {
                        entry.text.push_str(&format!("\n:{field}: {text}"));
                    }
                    None => debug!(owner, field, "Field line before its symbol, dropped"),
                }
            }
            None => {}
        }
    }
    docs
}

/// Every requested symbol received documentation.
pub fn is_complete(docs: &DocMap, table: &SymbolTable) -> bool {
    table.paths().all(|path| docs.contains_key(path))
}
