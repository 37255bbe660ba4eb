use std::collections::HashMap;

use serde_json::{Map, Value};

use crate::error::{ClientError, Result};
use crate::table::table::Table;

const PATH_SEPARATOR: char = '.';

/// Flatten a list of JSON records into a table.
///
/// A single object is treated as a one-record list. Nested objects become
/// dotted column paths; arrays and scalars are stored as leaf cells.
pub fn json_to_table(payload: &Value) -> Result<Table> {
    let records: &[Value] = match payload {
        Value::Array(items) => items,
        Value::Object(_) => std::slice::from_ref(payload),
        other => {
            return Err(ClientError::Decode(format!(
                "expected a list of records, got {}",
                kind(other)
            )))
        }
    };

    let mut columns: Vec<String> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut flat_records = Vec::with_capacity(records.len());

    for (i, record) in records.iter().enumerate() {
        let object = record.as_object().ok_or_else(|| {
            ClientError::Decode(format!("record {} is {}, not an object", i, kind(record)))
        })?;

        let mut cells = Vec::new();
        flatten_object(object, None, &mut cells);
        for (path, _) in &cells {
            if !index.contains_key(path) {
                index.insert(path.clone(), columns.len());
                columns.push(path.clone());
            }
        }
        flat_records.push(cells);
    }

    let rows = flat_records
        .into_iter()
        .map(|cells| {
            let mut row = vec![Value::Null; columns.len()];
            for (path, value) in cells {
                row[index[&path]] = value;
            }
            row
        })
        .collect();

    Ok(Table::from_parts(columns, rows))
}

fn flatten_object(object: &Map<String, Value>, prefix: Option<&str>, out: &mut Vec<(String, Value)>) {
    for (key, value) in object {
        let path = match prefix {
            Some(p) => format!("{}{}{}", p, PATH_SEPARATOR, key),
            None => key.clone(),
        };
        match value {
            // empty objects contribute no column
            Value::Object(nested) => flatten_object(nested, Some(&path), out),
            leaf => out.push((path, leaf.clone())),
        }
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
