use std::fmt::Display;

use serde::Serialize;
use serde_json::Value;

use crate::cli::OutputFormat;
use crate::ui;

pub mod table;

use table::{Table, TableOptions};

/// Render a serializable response to a string in the requested format.
pub fn render<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Table => render_table(&serde_json::to_value(value)?, table_options()),
        OutputFormat::Raw => Ok(serde_json::to_string(value)?),
    }
}

/// Print a serializable response in the requested format.
pub fn output<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<()> {
    let rendered = render(value, format)?;
    println!("{rendered}");
    Ok(())
}

/// Print `view` for `--format table` and `value` as JSON otherwise.
///
/// Used where a hand-laid-out screen reads better than a key/value table.
pub fn output_view<T: Serialize, V: Display>(
    value: &T,
    view: &V,
    format: OutputFormat,
) -> anyhow::Result<()> {
    if format == OutputFormat::Table {
        print!("{view}");
        return Ok(());
    }
    output(value, format)
}

fn table_options() -> TableOptions {
    let prefs = ui::prefs();
    TableOptions {
        max_width: prefs.term_width,
        color: prefs.table_color,
    }
}

fn render_table(value: &Value, options: TableOptions) -> anyhow::Result<String> {
    let table = match value {
        Value::Array(items) => {
            if items.is_empty() {
                return Ok(String::from("(no rows)"));
            }
            array_table(items)
        }
        Value::Object(map) => {
            let mut table = Table::new(["key", "value"]);
            let mut entries = map.iter().collect::<Vec<_>>();
            entries.sort_by(|a, b| a.0.cmp(b.0));
            for (key, value) in entries {
                table.push_row(vec![key.clone(), value_to_cell(value)]);
            }
            table
        }
        scalar => {
            let mut table = Table::new(["value"]);
            table.push_row(vec![value_to_cell(scalar)]);
            table
        }
    };
    Ok(table.render(options))
}

/// Object rows become one column per key, in first-seen order.
fn array_table(items: &[Value]) -> Table {
    if !items.iter().all(Value::is_object) {
        let mut table = Table::new(["value"]);
        for item in items {
            table.push_row(vec![value_to_cell(item)]);
        }
        return table;
    }

    let mut headers = Vec::<&str>::new();
    for map in items.iter().filter_map(Value::as_object) {
        for key in map.keys() {
            if !headers.contains(&key.as_str()) {
                headers.push(key);
            }
        }
    }

    let mut table = Table::new(headers.iter().copied());
    for map in items.iter().filter_map(Value::as_object) {
        table.push_row(
            headers
                .iter()
                .map(|header| map.get(*header).map_or_else(|| String::from("-"), value_to_cell))
                .collect(),
        );
    }
    table
}

fn value_to_cell(value: &Value) -> String {
    match value {
        Value::Null => String::from("-"),
        Value::Bool(v) => v.to_string(),
        Value::Number(v) => v.to_string(),
        Value::String(v) => v.clone(),
        Value::Array(items) if items.iter().all(Value::is_string) => items
            .iter()
            .filter_map(Value::as_str)
            .collect::<Vec<_>>()
            .join(", "),
        other => serde_json::to_string(other).unwrap_or_else(|_| String::from("<invalid-json>")),
    }
}
