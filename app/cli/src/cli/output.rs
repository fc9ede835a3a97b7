//! CLI output formatting utilities.

use std::fmt::Write;

use colored::Colorize;
use serde_json::Value;

/// Prints JSON with syntax highlighting.
///
/// Keys are cyan, strings green, numbers yellow, booleans and null magenta.
pub fn print_highlighted_json(value: &Value) {
    let mut out = String::new();
    write_value(&mut out, value, 0);
    println!("{out}");
}

fn write_value(out: &mut String, value: &Value, depth: usize) {
    match value {
        Value::Null => out.push_str(&"null".magenta().to_string()),
        Value::Bool(b) => out.push_str(&b.to_string().magenta().to_string()),
        Value::Number(n) => out.push_str(&n.to_string().yellow().to_string()),
        Value::String(s) => out.push_str(&quoted(s).green().to_string()),
        Value::Array(items) => {
            write_container(out, '[', ']', items.iter().map(|item| (None, item)), depth);
        }
        Value::Object(map) => {
            write_container(out, '{', '}', map.iter().map(|(k, v)| (Some(k), v)), depth);
        }
    }
}

fn write_container<'a>(
    out: &mut String,
    open: char,
    close: char,
    entries: impl ExactSizeIterator<Item = (Option<&'a String>, &'a Value)>,
    depth: usize,
) {
    if entries.len() == 0 {
        let _ = write!(out, "{}", format!("{open}{close}").white().bold());
        return;
    }

    let _ = write!(out, "{}", open.to_string().white().bold());
    let indent = "  ".repeat(depth + 1);
    let count = entries.len();

    for (i, (key, value)) in entries.enumerate() {
        out.push('\n');
        out.push_str(&indent);
        if let Some(key) = key {
            let _ = write!(out, "{}: ", quoted(key).cyan());
        }
        write_value(out, value, depth + 1);
        if i + 1 < count {
            out.push(',');
        }
    }

    out.push('\n');
    out.push_str(&"  ".repeat(depth));
    let _ = write!(out, "{}", close.to_string().white().bold());
}

fn quoted(s: &str) -> String { Value::String(s.to_string()).to_string() }

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn render(value: &Value) -> String {
        colored::control::set_override(false);
        let mut out = String::new();
        write_value(&mut out, value, 0);
        out
    }

    #[test]
    fn test_render_matches_pretty_json_without_colors() {
        let value = json!({"LastWorkspaceVisitedByLevel": {"0": 3, "1": 150}});
        assert_eq!(render(&value), serde_json::to_string_pretty(&value).unwrap());
    }

    #[test]
    fn test_render_empty_containers() {
        assert_eq!(render(&json!({})), "{}");
        assert_eq!(render(&json!([])), "[]");
    }

    #[test]
    fn test_render_escapes_strings() {
        assert_eq!(render(&json!("a\"b")), r#""a\"b""#);
    }

    #[test]
    fn test_render_scalars() {
        assert_eq!(render(&json!([true, null, 1.5])), "[\n  true,\n  null,\n  1.5\n]");
    }
}
