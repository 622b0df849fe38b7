use serde::Serialize;
use serde_json::Value;

use crate::cli::OutputFormat;

pub mod table;

/// Render a serializable response to a string in the requested format.
pub fn render<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Table => render_table(value),
        OutputFormat::Raw => Ok(serde_json::to_string(value)?),
    }
}

/// Print a serializable response in the requested format.
pub fn output<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<()> {
    let rendered = render(value, format)?;
    println!("{rendered}");
    Ok(())
}

fn term_width() -> Option<usize> {
    std::env::var("COLUMNS")
        .ok()
        .and_then(|value| value.parse::<usize>().ok())
        .filter(|width| *width >= 40)
}

fn render_table<T: Serialize>(value: &T) -> anyhow::Result<String> {
    let max_width = term_width();
    let value = serde_json::to_value(value)?;
    match value {
        Value::Array(items) => Ok(render_array_table(&items, max_width)),
        Value::Object(map) => {
            let mut rows = Vec::with_capacity(map.len());
            for (key, value) in map {
                rows.push(vec![key, value_to_cell(&value)]);
            }
            Ok(table::render(&["field", "value"], &rows, max_width))
        }
        scalar => Ok(table::render(
            &["value"],
            &[vec![value_to_cell(&scalar)]],
            max_width,
        )),
    }
}

fn render_array_table(items: &[Value], max_width: Option<usize>) -> String {
    if items.is_empty() {
        return String::from("(no rows)");
    }

    if !items.iter().all(Value::is_object) {
        let rows = items
            .iter()
            .map(|item| vec![value_to_cell(item)])
            .collect::<Vec<_>>();
        return table::render(&["value"], &rows, max_width);
    }

    let mut headers = Vec::<String>::new();
    for item in items {
        if let Some(map) = item.as_object() {
            for key in map.keys() {
                if !headers.contains(key) {
                    headers.push(key.clone());
                }
            }
        }
    }

    let header_refs = headers.iter().map(String::as_str).collect::<Vec<_>>();
    let rows = items
        .iter()
        .filter_map(Value::as_object)
        .map(|map| {
            headers
                .iter()
                .map(|header| map.get(header).map_or_else(|| "-".to_string(), value_to_cell))
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>();

    table::render(&header_refs, &rows, max_width)
}

fn value_to_cell(value: &Value) -> String {
    match value {
        Value::Null => String::from("null"),
        Value::Bool(v) => v.to_string(),
        Value::Number(v) => v.to_string(),
        Value::String(v) => v.clone(),
        other => serde_json::to_string(other).unwrap_or_else(|_| String::from("<invalid-json>")),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde::Serialize;

    use super::render;
    use crate::cli::OutputFormat;

    #[derive(Serialize)]
    struct Row {
        id: String,
        featured: bool,
    }

    #[test]
    fn json_renders_pretty() {
        let rendered = render(
            &Row {
                id: "iss-1".into(),
                featured: true,
            },
            OutputFormat::Json,
        )
        .unwrap();
        assert!(rendered.contains("\n"));
        assert!(rendered.contains("\"iss-1\""));
    }

    #[test]
    fn raw_renders_compact() {
        let rendered = render(
            &Row {
                id: "iss-1".into(),
                featured: false,
            },
            OutputFormat::Raw,
        )
        .unwrap();
        assert_eq!(rendered, r#"{"id":"iss-1","featured":false}"#);
    }

    #[test]
    fn table_renders_array_of_objects() {
        let rows = vec![
            Row {
                id: "iss-1".into(),
                featured: true,
            },
            Row {
                id: "iss-2".into(),
                featured: false,
            },
        ];
        let rendered = render(&rows, OutputFormat::Table).unwrap();
        assert!(rendered.lines().next().unwrap().contains("id"));
        assert!(rendered.contains("iss-2"));
    }

    #[test]
    fn table_renders_empty_array_placeholder() {
        let rows: Vec<Row> = Vec::new();
        let rendered = render(&rows, OutputFormat::Table).unwrap();
        assert_eq!(rendered, "(no rows)");
    }
}
