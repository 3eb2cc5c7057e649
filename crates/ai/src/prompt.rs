//! Prompt construction: the fixed instruction plus the source of every
//! outermost symbol that needs documentation.

use docgen_core::SymbolTable;
use serde_json::{json, Value};

/// Instruction sent ahead of the code. It fixes the line protocol that
/// [`crate::response::parse_response`] reads back.
pub const SYS_INSTRUCTION: &str = "You are a programming assistant. I will give you pieces of code; \
analyze them and write short documentation. The code contains only classes, functions, or methods. \
Use ASCII characters only. For a class, briefly explain what the class does. For a function or \
method, explain what it does; then, for each argument, add a line describing it; finally, if it \
returns something, add a line describing the return value, and if it returns nothing leave the \
return description empty. Write one entry per line in exactly these forms: \
'ClassName: description' for a class; 'ClassName/method_name: description' for a method \
(or 'function_name: description' for a plain function); \
'ClassName/method_name/param argument_name: description' for an argument; \
'ClassName/method_name/return: description' for the return value. \
Do not leave blank lines. Do not repeat the code. Follow these instructions strictly. \
Write the documentation in English only.";

/// Bodies of the outermost symbols in table order. A symbol nested in the
/// previously selected one is already covered by its body.
pub fn outer_bodies(table: &SymbolTable) -> Vec<String> {
    let mut bodies = Vec::new();
    let mut previous: Option<&str> = None;
    for (path, entry) in table.iter() {
        let nested = previous.is_some_and(|prev| {
            path.strip_prefix(prev).is_some_and(|rest| rest.starts_with('/'))
        });
        if !nested {
            bodies.push(entry.body_text());
            previous = Some(path);
        }
    }
    bodies
}

/// `generateContent` request body: the instruction, then one part per body.
pub fn request_body(table: &SymbolTable) -> Value {
    let parts: Vec<Value> = outer_bodies(table).into_iter().map(|text| json!({ "text": text })).collect();
    json!({
        "contents": [
            { "role": "user", "parts": [{ "text": SYS_INSTRUCTION }] },
            { "role": "user", "parts": parts },
        ]
    })
}
