//! Line-oriented reader for the sectioned configuration format.
//!
//! The grammar is the one used by `weewx.conf`:
//!
//! ```text
//! # comment lines attach to the next entry
//! key = value            # inline comment
//! list = a, b, c
//! [Section]
//!     key = "quoted, value"
//!     [[Subsection]]
//!         key = value
//! ```
//!
//! Comment lines before the first entry become the document's initial
//! comment; comment lines after the last entry become its final comment.

use tracing::trace;

use crate::errors::{TreeError, TreeResult};
use crate::section::Section;
use crate::tree::{ConfigTree, DEFAULT_INDENT};
use crate::value::Value;

#[cfg(test)]
#[path = "parser_tests.rs"]
mod tests;

pub(crate) fn parse(text: &str) -> TreeResult<ConfigTree> {
    let mut root = Section::new();
    // Names of the sections enclosing the current line, outermost first.
    let mut stack: Vec<String> = Vec::new();
    let mut pending_comments: Vec<String> = Vec::new();
    let mut initial_comment: Option<Vec<String>> = None;
    let mut indent: Option<String> = None;

    for (index, raw_line) in text.lines().enumerate() {
        let line_no = index + 1;
        let line = raw_line.trim_end_matches('\r');
        let trimmed = line.trim();

        if trimmed.is_empty() || trimmed.starts_with('#') {
            pending_comments.push(trimmed.to_string());
            continue;
        }

        if initial_comment.is_none() {
            initial_comment = Some(std::mem::take(&mut pending_comments));
        }

        let leading = &line[..line.len() - line.trim_start().len()];

        if trimmed.starts_with('[') {
            let (depth, name, inline) = parse_marker(trimmed, line_no)?;
            if depth > stack.len() + 1 {
                return Err(TreeError::Nesting {
                    name,
                    line: line_no,
                });
            }
            if depth == 2 && indent.is_none() && !leading.is_empty() {
                indent = Some(leading.to_string());
            }
            stack.truncate(depth - 1);
            let parent = current_section(&mut root, &stack);
            if parent.contains(&name) {
                return Err(TreeError::Duplicate {
                    kind: "section",
                    name,
                    line: line_no,
                });
            }
            parent.insert_section(&name, Section::new());
            parent.set_comments(&name, std::mem::take(&mut pending_comments));
            parent.set_inline_comment(&name, inline);
            trace!(section = %name, depth, line = line_no, "parsed section marker");
            stack.push(name);
            continue;
        }

        let (key, value, inline) = parse_assignment(trimmed, line_no)?;
        if stack.len() == 1 && indent.is_none() && !leading.is_empty() {
            indent = Some(leading.to_string());
        }
        let section = current_section(&mut root, &stack);
        if section.contains(&key) {
            return Err(TreeError::Duplicate {
                kind: "option",
                name: key,
                line: line_no,
            });
        }
        section.set(&key, value);
        section.set_comments(&key, std::mem::take(&mut pending_comments));
        section.set_inline_comment(&key, inline);
    }

    let (initial_comment, final_comment) = match initial_comment {
        Some(initial) => (initial, pending_comments),
        None => (pending_comments, Vec::new()),
    };

    Ok(ConfigTree::from_parts(
        root,
        initial_comment,
        final_comment,
        indent.unwrap_or_else(|| DEFAULT_INDENT.to_string()),
    ))
}

fn current_section<'a>(root: &'a mut Section, stack: &[String]) -> &'a mut Section {
    let mut section = root;
    for name in stack {
        section = section.ensure_section(name);
    }
    section
}

/// Parses `[[name]]  # comment` into its depth, name and inline comment.
fn parse_marker(line: &str, line_no: usize) -> TreeResult<(usize, String, Option<String>)> {
    let depth = line.chars().take_while(|c| *c == '[').count();
    let rest = &line[depth..];
    let closing = "]".repeat(depth);
    let end = rest.find(&closing).ok_or_else(|| TreeError::Parse {
        line: line_no,
        reason: format!("section marker is missing '{closing}'"),
    })?;

    let name = unquote(rest[..end].trim());
    if name.is_empty() {
        return Err(TreeError::Parse {
            line: line_no,
            reason: "section name is empty".to_string(),
        });
    }

    let tail = rest[end + depth..].trim();
    let inline = match tail {
        "" => None,
        t if t.starts_with('#') => Some(t.to_string()),
        t => {
            return Err(TreeError::Parse {
                line: line_no,
                reason: format!("unexpected text after section marker: '{t}'"),
            })
        }
    };
    Ok((depth, name, inline))
}

/// Parses `key = value  # comment`.
fn parse_assignment(line: &str, line_no: usize) -> TreeResult<(String, Value, Option<String>)> {
    let eq = line.find('=').ok_or_else(|| TreeError::Parse {
        line: line_no,
        reason: "expected 'key = value'".to_string(),
    })?;
    let key = unquote(line[..eq].trim());
    if key.is_empty() {
        return Err(TreeError::Parse {
            line: line_no,
            reason: "option name is empty".to_string(),
        });
    }
    let (value, inline) = parse_value(line[eq + 1..].trim(), line_no)?;
    Ok((key, value, inline))
}

/// Splits a value into list items, honoring quotes, and peels off any
/// trailing inline comment.
fn parse_value(text: &str, line_no: usize) -> TreeResult<(Value, Option<String>)> {
    // A lone comma is the empty list.
    if let Some(after) = text.strip_prefix(',') {
        let after = after.trim_start();
        if after.is_empty() || after.starts_with('#') {
            let inline = (!after.is_empty()).then(|| after.to_string());
            return Ok((Value::List(Vec::new()), inline));
        }
    }

    let mut items: Vec<String> = Vec::new();
    let mut saw_comma = false;
    let mut inline = None;
    let mut rest = text;

    loop {
        rest = rest.trim_start();
        if rest.is_empty() {
            break;
        }
        if rest.starts_with('#') {
            inline = Some(rest.to_string());
            break;
        }

        let triple = ["\"\"\"", "'''"]
            .into_iter()
            .find(|triple| rest.starts_with(*triple));
        let (item, after) = match (triple, rest.chars().next()) {
            (Some(triple), _) => {
                let body = &rest[3..];
                let close = body.find(triple).ok_or_else(|| TreeError::Parse {
                    line: line_no,
                    reason: "multi-line values are not supported".to_string(),
                })?;
                (body[..close].to_string(), &body[close + 3..])
            }
            (None, Some(quote @ ('"' | '\''))) => {
                let body = &rest[1..];
                let close = body.find(quote).ok_or_else(|| TreeError::Parse {
                    line: line_no,
                    reason: "unterminated quoted value".to_string(),
                })?;
                (body[..close].to_string(), &body[close + 1..])
            }
            _ => {
                let end = rest.find(|c: char| c == ',' || c == '#').unwrap_or(rest.len());
                (rest[..end].trim().to_string(), &rest[end..])
            }
        };
        items.push(item);

        let after = after.trim_start();
        if let Some(next) = after.strip_prefix(',') {
            saw_comma = true;
            rest = next;
        } else if after.is_empty() || after.starts_with('#') {
            rest = after;
        } else {
            return Err(TreeError::Parse {
                line: line_no,
                reason: format!("unexpected text after quoted value: '{after}'"),
            });
        }
    }

    let value = if saw_comma {
        Value::List(items)
    } else {
        Value::Scalar(items.pop().unwrap_or_default())
    };
    Ok((value, inline))
}

fn unquote(text: &str) -> String {
    for triple in ["\"\"\"", "'''"] {
        if text.len() >= 6 && text.starts_with(triple) && text.ends_with(triple) {
            return text[3..text.len() - 3].to_string();
        }
    }
    let bytes = text.as_bytes();
    if bytes.len() >= 2 {
        let (first, last) = (bytes[0], bytes[bytes.len() - 1]);
        if (first == b'"' || first == b'\'') && first == last {
            return text[1..text.len() - 1].to_string();
        }
    }
    text.to_string()
}
