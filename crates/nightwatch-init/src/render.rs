//! Renders a [`ConfigModel`] as `nightwatch.conf.js`.
//!
//! Output is a CommonJS module (`module.exports = {...}`). Top-level keys
//! come out in a fixed order; nested settings objects come out with their
//! keys sorted, so identical models always produce identical text.

use crate::catalog::CatalogId;
use crate::config_model::ConfigModel;
use serde_json::Value;

const HEADER: &str = "\
// Refer to the online docs for more details:
// https://nightwatchjs.org/guide/configuration/nightwatch-configuration-file.html
//
// Generated by create-nightwatch. Environments are selected with `--env <name>`.

";

const INDENT: &str = "  ";

const RESERVED_WORDS: &[&str] = &[
    "break", "case", "catch", "class", "const", "continue", "debugger", "default", "delete", "do",
    "else", "export", "extends", "finally", "for", "function", "if", "import", "in",
    "instanceof", "new", "return", "super", "switch", "this", "throw", "try", "typeof", "var",
    "void", "while", "with", "null", "true", "false",
];

/// Render the config file text
#[must_use]
pub fn render(model: &ConfigModel) -> String {
    let mut out = String::from(HEADER);
    out.push_str("module.exports = {\n");

    let mut fields: Vec<(&str, Value)> = vec![
        ("src_folders", strings(&model.src_folders)),
        ("page_objects_path", strings(&model.page_objects_path)),
        ("custom_commands_path", strings(&model.custom_commands_path)),
        ("custom_assertions_path", strings(&model.custom_assertions_path)),
        ("plugins", strings(&model.plugins)),
        ("globals_path", Value::from("")),
    ];
    if let Some(runner) = &model.test_runner {
        fields.push((
            "test_runner",
            serde_json::json!({ "type": runner.runner.id(), "options": runner.options }),
        ));
    }
    fields.push(("webdriver", serde_json::json!({})));
    fields.push(("test_workers", serde_json::json!({ "enabled": true })));

    for (key, value) in &fields {
        write_entry(&mut out, key, value, 1);
    }

    out.push_str(INDENT);
    out.push_str("test_settings: {\n");
    for env in &model.environments {
        write_entry(&mut out, &env.name, &env.settings, 2);
    }
    out.push_str(INDENT);
    out.push_str("},\n");

    out.push_str("};\n");
    out
}

fn strings(items: &[String]) -> Value {
    Value::from(items.to_vec())
}

/// Whether a key can be written without quotes
fn is_bare_key(key: &str) -> bool {
    let Some(first) = key.chars().next() else {
        return false;
    };
    !first.is_ascii_digit()
        && key.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
        && !RESERVED_WORDS.contains(&key)
}

fn quote(text: &str) -> String {
    let escaped = text.replace('\\', "\\\\").replace('\'', "\\'").replace('\n', "\\n");
    format!("'{escaped}'")
}

fn write_key(out: &mut String, key: &str) {
    if is_bare_key(key) {
        out.push_str(key);
    } else {
        out.push_str(&quote(key));
    }
}

fn write_entry(out: &mut String, key: &str, value: &Value, depth: usize) {
    out.push_str(&INDENT.repeat(depth));
    write_key(out, key);
    out.push_str(": ");
    write_value(out, value, depth);
    out.push_str(",\n");
}

fn write_value(out: &mut String, value: &Value, depth: usize) {
    match value {
        Value::Null => out.push_str("null"),
        Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        Value::Number(n) => out.push_str(&n.to_string()),
        Value::String(s) => out.push_str(&quote(s)),
        Value::Array(items) if items.is_empty() => out.push_str("[]"),
        Value::Array(items) if items.iter().all(|v| !v.is_object() && !v.is_array()) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                write_value(out, item, depth);
            }
            out.push(']');
        }
        Value::Array(items) => {
            out.push_str("[\n");
            for item in items {
                out.push_str(&INDENT.repeat(depth + 1));
                write_value(out, item, depth + 1);
                out.push_str(",\n");
            }
            out.push_str(&INDENT.repeat(depth));
            out.push(']');
        }
        Value::Object(map) if map.is_empty() => out.push_str("{}"),
        Value::Object(map) => {
            out.push_str("{\n");
            for (key, item) in map {
                write_entry(out, key, item, depth + 1);
            }
            out.push_str(&INDENT.repeat(depth));
            out.push('}');
        }
    }
}
