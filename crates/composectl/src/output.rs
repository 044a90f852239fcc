//! Rendering command results as JSON, YAML, or tables

use anyhow::{Context, Result};
use comfy_table::Table;
use jpx_core::Runtime;
use regex::Regex;
use serde::Serialize;
use serde_json::Value;
use std::sync::OnceLock;

use crate::cli;

static JMESPATH_RUNTIME: OnceLock<Runtime> = OnceLock::new();

/// JMESPath runtime with the extended function set
fn jmespath_runtime() -> &'static Runtime {
    JMESPATH_RUNTIME.get_or_init(|| Runtime::builder().with_all_extensions().build())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Json,
    Yaml,
    Table,
}

impl OutputFormat {
    /// Resolve the CLI flag; `auto` becomes `auto_format`
    pub fn resolve(format: cli::OutputFormat, auto_format: OutputFormat) -> Self {
        match format {
            cli::OutputFormat::Auto => auto_format,
            cli::OutputFormat::Json => OutputFormat::Json,
            cli::OutputFormat::Yaml => OutputFormat::Yaml,
            cli::OutputFormat::Table => OutputFormat::Table,
        }
    }
}

static BACKTICK_RE: OnceLock<Option<Regex>> = OnceLock::new();

/// Quote bare backtick literals so `` `redis` `` reads as `` `"redis"` ``
///
/// Literals that are already valid JSON (numbers, booleans, quoted strings)
/// are left alone.
fn normalize_backtick_literals(query: &str) -> String {
    let re = BACKTICK_RE.get_or_init(|| Regex::new(r"`([^`\\]*(?:\\.[^`\\]*)*)`").ok());
    let Some(re) = re else {
        return query.to_string();
    };

    re.replace_all(query, |caps: &regex::Captures| {
        let content = &caps[1];
        let trimmed = content.trim();
        if serde_json::from_str::<Value>(trimmed).is_ok() {
            format!("`{}`", content)
        } else {
            let escaped = trimmed.replace('\\', "\\\\").replace('"', "\\\"");
            format!("`\"{}\"`", escaped)
        }
    })
    .into_owned()
}

/// Apply an optional JMESPath query to `data`
pub fn apply_query(data: Value, query: Option<&str>) -> Result<Value> {
    let Some(query) = query else {
        return Ok(data);
    };
    let normalized = normalize_backtick_literals(query);
    let expr = jmespath_runtime()
        .compile(&normalized)
        .with_context(|| format!("Invalid JMESPath expression: {}", query))?;
    let result = expr.search(&data).context("JMESPath query failed")?;
    Ok(result)
}

pub fn print_output<T: Serialize>(data: T, format: OutputFormat, query: Option<&str>) -> Result<()> {
    let value = apply_query(serde_json::to_value(data)?, query)?;
    println!("{}", render(&value, format)?);
    Ok(())
}

pub fn render(value: &Value, format: OutputFormat) -> Result<String> {
    Ok(match format {
        OutputFormat::Json => serde_json::to_string_pretty(value)?,
        OutputFormat::Yaml => serde_yaml::to_string(value)?,
        OutputFormat::Table => render_table(value),
    })
}

fn render_table(value: &Value) -> String {
    match value {
        Value::Array(arr) if arr.is_empty() => "No results".to_string(),
        Value::Array(arr) => {
            let mut table = Table::new();

            if arr.iter().all(Value::is_object) {
                let headers = union_keys(arr);
                table.set_header(&headers);

                for item in arr {
                    if let Value::Object(obj) = item {
                        let row: Vec<String> = headers
                            .iter()
                            .map(|h| format_value(obj.get(h).unwrap_or(&Value::Null)))
                            .collect();
                        table.add_row(row);
                    }
                }
            } else {
                table.set_header(vec!["Value"]);
                for item in arr {
                    table.add_row(vec![format_value(item)]);
                }
            }

            table.to_string()
        }
        Value::Object(obj) => {
            let mut table = Table::new();
            table.set_header(vec!["Key", "Value"]);
            for (key, val) in obj {
                table.add_row(vec![key.clone(), format_value(val)]);
            }
            table.to_string()
        }
        _ => format_value(value),
    }
}

/// Keys across all rows in first-seen order; rows may omit empty fields
fn union_keys(rows: &[Value]) -> Vec<String> {
    let mut headers: Vec<String> = Vec::new();
    for key in rows.iter().filter_map(Value::as_object).flat_map(|obj| obj.keys()) {
        if !headers.contains(key) {
            headers.push(key.clone());
        }
    }
    headers
}

fn format_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        Value::Array(arr) if arr.iter().all(Value::is_string) => arr
            .iter()
            .filter_map(Value::as_str)
            .collect::<Vec<_>>()
            .join("\n"),
        Value::Array(arr) => format!("[{} items]", arr.len()),
        Value::Object(obj) => format!("{{{} fields}}", obj.len()),
    }
}
