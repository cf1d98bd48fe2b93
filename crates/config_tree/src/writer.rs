//! Serializes a [`ConfigTree`] back to text.
//!
//! Within every section, leaf values are written before subsections, which is
//! the only order the format can express. Comment lines are re-indented to the
//! depth of the entry they belong to.

use crate::section::Section;
use crate::tree::ConfigTree;
use crate::value::Value;

#[cfg(test)]
#[path = "writer_tests.rs"]
mod tests;

pub(crate) fn write(tree: &ConfigTree) -> Vec<String> {
    let mut out = Vec::new();
    for line in tree.initial_comment() {
        out.push(comment_line("", line));
    }
    write_section(tree.root(), 0, tree.indent(), &mut out);
    for line in tree.final_comment() {
        out.push(comment_line("", line));
    }
    out
}

fn write_section(section: &Section, depth: usize, indent: &str, out: &mut Vec<String>) {
    let pad = indent.repeat(depth);

    for (key, value) in section.scalars() {
        write_comments(section, key, &pad, out);
        out.push(format!(
            "{pad}{} = {}{}",
            quote_key(key),
            quote_value(value),
            inline_comment(section.inline_comment(key), indent)
        ));
    }

    for (name, subsection) in section.subsections() {
        write_comments(section, name, &pad, out);
        out.push(format!(
            "{pad}{open}{}{close}{}",
            quote_key(name),
            inline_comment(section.inline_comment(name), indent),
            open = "[".repeat(depth + 1),
            close = "]".repeat(depth + 1),
        ));
        write_section(subsection, depth + 1, indent, out);
    }
}

fn write_comments(section: &Section, key: &str, pad: &str, out: &mut Vec<String>) {
    for line in section.comments(key) {
        out.push(comment_line(pad, line));
    }
}

fn comment_line(pad: &str, line: &str) -> String {
    let line = line.trim();
    if line.is_empty() {
        String::new()
    } else if line.starts_with('#') {
        format!("{pad}{line}")
    } else {
        format!("{pad}# {line}")
    }
}

fn inline_comment(comment: Option<&str>, indent: &str) -> String {
    match comment {
        None => String::new(),
        Some(c) if c.starts_with('#') => format!("{indent}{c}"),
        Some(c) => format!("{indent}# {c}"),
    }
}

fn quote_key(key: &str) -> String {
    let needs_quotes = key.contains(['=', '#', '[', ']'])
        || key.starts_with(['"', '\''])
        || key.trim() != key;
    if needs_quotes {
        quote(key)
    } else {
        key.to_string()
    }
}

fn quote_value(value: &Value) -> String {
    match value {
        Value::Scalar(s) => quote_item(s),
        Value::List(items) => match items.as_slice() {
            [] => ",".to_string(),
            [only] => format!("{},", quote_item(only)),
            items => items
                .iter()
                .map(|item| quote_item(item))
                .collect::<Vec<_>>()
                .join(", "),
        },
    }
}

fn quote_item(item: &str) -> String {
    let needs_quotes = item.is_empty()
        || item.contains([',', '#'])
        || item.starts_with(['"', '\''])
        || item.trim() != item;
    if needs_quotes {
        quote(item)
    } else {
        item.to_string()
    }
}

/// Text holding both quote characters falls back to triple quotes.
fn quote(text: &str) -> String {
    match (text.contains('"'), text.contains('\'')) {
        (false, _) => format!("\"{text}\""),
        (true, false) => format!("'{text}'"),
        (true, true) if !text.contains("\"\"\"") && !text.ends_with('"') => {
            format!("\"\"\"{text}\"\"\"")
        }
        (true, true) => format!("'''{text}'''"),
    }
}
