use std::fs;
use std::path::Path;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::core::{DocumentError, LineItem, money};

const REQUIRED_KEYS: [&str; 4] = ["item_key", "description", "quantity", "unit_price"];

/// Why a single line of an imported record was dropped.
#[derive(Debug, Error)]
enum LineRejection {
    #[error("line is not an object")]
    NotAnObject,

    #[error("line is missing required key `{0}`")]
    MissingKey(&'static str),

    #[error("field `{field}` is not numeric: {value}")]
    NotNumeric { field: &'static str, value: Value },

    #[error("line amount out of range")]
    OutOfRange,
}

/// Read the customer name and the lines of a previously exported record.
///
/// Individual malformed lines are skipped with a warning. Only an unreadable
/// file or unparseable top-level content is an error.
pub fn parse_quote_record(
    path: impl AsRef<Path>,
) -> Result<(String, Vec<LineItem>), DocumentError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)?;
    let parsed = parse_quote_str(&text)?;
    tracing::debug!(
        path = %path.display(),
        lines = parsed.1.len(),
        "imported quote record"
    );
    Ok(parsed)
}

/// Same as [`parse_quote_record`], over in-memory JSON text.
pub fn parse_quote_str(text: &str) -> Result<(String, Vec<LineItem>), DocumentError> {
    let data: Value = serde_json::from_str(text)
        .map_err(|e| DocumentError::Json(format!("failed to parse record: {e}")))?;
    let Value::Object(data) = data else {
        return Err(DocumentError::Json(
            "record must be a JSON object at the top level".into(),
        ));
    };

    let customer_name = customer_name(&data);

    let entries: &[Value] = match data.get("lines") {
        None | Some(Value::Null) => &[],
        Some(Value::Array(entries)) => entries.as_slice(),
        Some(other) => {
            tracing::warn!(lines = %other, "ignoring `lines`: not an array");
            &[]
        }
    };

    let mut lines = Vec::with_capacity(entries.len());
    for (index, entry) in entries.iter().enumerate() {
        match parse_line(entry) {
            Ok(line) => lines.push(line),
            Err(reason) => tracing::warn!(index, %reason, "skipping malformed line"),
        }
    }

    Ok((customer_name, lines))
}

fn customer_name(data: &Map<String, Value>) -> String {
    match data.get("customer") {
        Some(Value::Object(customer)) => match customer.get("name") {
            Some(Value::String(name)) => name.clone(),
            Some(name @ (Value::Number(_) | Value::Bool(_))) => name.to_string(),
            _ => String::new(),
        },
        _ => String::new(),
    }
}

fn parse_line(entry: &Value) -> Result<LineItem, LineRejection> {
    let Value::Object(obj) = entry else {
        return Err(LineRejection::NotAnObject);
    };
    if let Some(missing) = REQUIRED_KEYS.into_iter().find(|k| !obj.contains_key(*k)) {
        return Err(LineRejection::MissingKey(missing));
    }

    let line = LineItem {
        item_key: text_field(obj, "item_key"),
        description: text_field(obj, "description"),
        quantity: number_field(obj, "quantity")?,
        unit_price: number_field(obj, "unit_price")?,
        discount_pct: number_field(obj, "discount_pct")?,
        unit: text_field(obj, "unit"),
        tax_pct: number_field(obj, "tax_pct")?,
    };
    if money::checked_line_tax(&line).is_none() {
        return Err(LineRejection::OutOfRange);
    }
    Ok(line)
}

/// Absent and null fields read as "".
fn text_field(obj: &Map<String, Value>, field: &str) -> String {
    match obj.get(field) {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// Absent, null and blank fields read as zero; numbers and numeric strings
/// are accepted; anything else rejects the line.
fn number_field(obj: &Map<String, Value>, field: &'static str) -> Result<Decimal, LineRejection> {
    let value = match obj.get(field) {
        None | Some(Value::Null) => return Ok(Decimal::ZERO),
        Some(value) => value,
    };
    let parsed = match value {
        Value::Number(n) => parse_decimal(&n.to_string()),
        Value::String(s) if s.trim().is_empty() => Some(Decimal::ZERO),
        Value::String(s) => parse_decimal(s.trim()),
        Value::Bool(b) => Some(if *b { Decimal::ONE } else { Decimal::ZERO }),
        Value::Array(_) | Value::Object(_) | Value::Null => None,
    };
    parsed.ok_or_else(|| LineRejection::NotNumeric {
        field,
        value: value.clone(),
    })
}

fn parse_decimal(text: &str) -> Option<Decimal> {
    Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .ok()
}
