//! JSON Writer - Ordered Documents With Inline Rows
//!
//! Documents are pretty-printed with 4-space indentation. Any node wrapped
//! in [`Json::Inline`] is rendered on a single line instead, so short rows
//! such as ingredient lists stay readable inside an otherwise indented file.

use serde::Serialize;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::Path;

const INDENT: &str = "    ";

/// An ordered JSON tree. Object keys keep insertion order.
#[derive(Debug, Clone, PartialEq)]
pub enum Json {
    Null,
    Bool(bool),
    Int(i64),
    /// Any other JSON number, kept as parsed.
    Number(serde_json::Number),
    Str(String),
    Array(Vec<Json>),
    Object(Vec<(String, Json)>),
    /// Render the wrapped node on one line.
    Inline(Box<Json>),
}

impl Json {
    pub fn object<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Json)>,
    {
        Json::Object(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    pub fn array<T, I>(items: I) -> Self
    where
        T: Into<Json>,
        I: IntoIterator<Item = T>,
    {
        Json::Array(items.into_iter().map(Into::into).collect())
    }

    /// Mark this node for single-line rendering.
    pub fn inline(self) -> Self {
        match self {
            Json::Inline(_) => self,
            other => Json::Inline(Box::new(other)),
        }
    }

    /// Convert any serializable value, keeping struct field order.
    pub fn from_serialize<T: Serialize>(value: &T) -> Result<Self, serde_json::Error> {
        serde_json::to_value(value).map(Json::from)
    }

    /// Render as indented JSON, honouring inline markers.
    pub fn render(&self) -> String {
        let mut out = String::new();
        render_node(self, 0, false, &mut out);
        out
    }
}

fn render_node(node: &Json, depth: usize, inline: bool, out: &mut String) {
    match node {
        Json::Null => out.push_str("null"),
        Json::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        Json::Int(n) => out.push_str(&n.to_string()),
        Json::Number(n) => out.push_str(&n.to_string()),
        Json::Str(s) => push_string(s, out),
        Json::Inline(inner) => render_node(inner, depth, true, out),
        Json::Array(items) => {
            render_container(out, '[', ']', items.len(), depth, inline, |i, d, o| {
                render_node(&items[i], d, inline, o)
            });
        }
        Json::Object(entries) => {
            render_container(out, '{', '}', entries.len(), depth, inline, |i, d, o| {
                let (key, value) = &entries[i];
                push_string(key, o);
                o.push_str(": ");
                render_node(value, d, inline, o);
            });
        }
    }
}

fn render_container<F>(
    out: &mut String,
    open: char,
    close: char,
    len: usize,
    depth: usize,
    inline: bool,
    mut item: F,
) where
    F: FnMut(usize, usize, &mut String),
{
    out.push(open);
    if len == 0 {
        out.push(close);
        return;
    }

    if inline {
        for i in 0..len {
            if i > 0 {
                out.push_str(", ");
            }
            item(i, depth, out);
        }
    } else {
        for i in 0..len {
            if i > 0 {
                out.push(',');
            }
            out.push('\n');
            push_indent(depth + 1, out);
            item(i, depth + 1, out);
        }
        out.push('\n');
        push_indent(depth, out);
    }
    out.push(close);
}

fn push_indent(depth: usize, out: &mut String) {
    for _ in 0..depth {
        out.push_str(INDENT);
    }
}

fn push_string(s: &str, out: &mut String) {
    // serde_json's Display for a string value is its escaped literal
    out.push_str(&serde_json::Value::String(s.to_owned()).to_string());
}

/// Append the rendered document to `path`, creating the file if needed.
///
/// The parent directory must already exist.
pub fn write_json(path: &Path, doc: &Json) -> io::Result<()> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    file.write_all(doc.render().as_bytes())
}

impl From<serde_json::Value> for Json {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;
        match value {
            Value::Null => Json::Null,
            Value::Bool(b) => Json::Bool(b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => Json::Int(i),
                None => Json::Number(n),
            },
            Value::String(s) => Json::Str(s),
            Value::Array(items) => Json::Array(items.into_iter().map(Json::from).collect()),
            Value::Object(map) => Json::Object(map.into_iter().map(|(k, v)| (k, Json::from(v))).collect()),
        }
    }
}

impl From<&str> for Json {
    fn from(s: &str) -> Self {
        Json::Str(s.to_owned())
    }
}

impl From<String> for Json {
    fn from(s: String) -> Self {
        Json::Str(s)
    }
}

impl From<i64> for Json {
    fn from(n: i64) -> Self {
        Json::Int(n)
    }
}

impl From<u32> for Json {
    fn from(n: u32) -> Self {
        Json::Int(n.into())
    }
}

impl From<bool> for Json {
    fn from(b: bool) -> Self {
        Json::Bool(b)
    }
}

impl From<Vec<Json>> for Json {
    fn from(items: Vec<Json>) -> Self {
        Json::Array(items)
    }
}
