//! Definition and value validation.
//!
//! `validate_definition` runs at schema-authoring time and rejects malformed
//! column definitions. `validate_value` runs on every item write and returns
//! the normalized value to persist.

use crate::error::{FieldError, Result};
use crate::types::{BoardCatalog, ColumnType, SelectOption};
use chrono::{DateTime, NaiveDate};
use regex::Regex;
use serde_json::Value;
use std::collections::HashSet;

/// Validate a column definition at authoring time.
///
/// `boards` is a snapshot of known board ids, consulted for `BoardLink`
/// columns.
pub fn validate_definition(name: &str, ty: &ColumnType, boards: &dyn BoardCatalog) -> Result<()> {
    match ty {
        ColumnType::Text {
            min_length,
            max_length,
            pattern,
        } => {
            if let (Some(lo), Some(hi)) = (min_length, max_length) {
                if lo > hi {
                    return Err(FieldError::invalid_schema(
                        name,
                        format!("min_length {lo} exceeds max_length {hi}"),
                    ));
                }
            }
            if let Some(pattern) = pattern {
                Regex::new(pattern).map_err(|e| {
                    FieldError::invalid_schema(name, format!("pattern does not compile: {e}"))
                })?;
            }
            Ok(())
        }
        ColumnType::Number { min, max } => {
            if let (Some(lo), Some(hi)) = (min, max) {
                if lo > hi {
                    return Err(FieldError::invalid_schema(
                        name,
                        format!("min {lo} exceeds max {hi}"),
                    ));
                }
            }
            Ok(())
        }
        ColumnType::Date | ColumnType::File | ColumnType::Image => Ok(()),
        ColumnType::SingleSelect { options }
        | ColumnType::MultiSelect { options }
        | ColumnType::Status { options } => validate_options(name, options),
        ColumnType::BoardLink {
            linked_board_id, ..
        } => {
            if linked_board_id.is_empty() {
                return Err(FieldError::invalid_schema(name, "linked board id is empty"));
            }
            if !boards.contains(linked_board_id) {
                return Err(FieldError::invalid_schema(
                    name,
                    format!("linked board not found: {linked_board_id}"),
                ));
            }
            Ok(())
        }
    }
}

fn validate_options(name: &str, options: &[SelectOption]) -> Result<()> {
    if options.is_empty() {
        return Err(FieldError::invalid_schema(name, "options must not be empty"));
    }
    let mut seen = HashSet::new();
    for option in options {
        if option.value.is_empty() {
            return Err(FieldError::invalid_schema(name, "option value is empty"));
        }
        if !seen.insert(option.value.as_str()) {
            return Err(FieldError::invalid_schema(
                name,
                format!("duplicate option value: {}", option.value),
            ));
        }
    }
    Ok(())
}

/// Validate a value against its column's type and rules.
///
/// Returns the normalized value to persist: numeric strings coerce to JSON
/// numbers, bare dates normalize to `YYYY-MM-DD`. Scalar/list shape is never
/// coerced; a list where a scalar is expected is a mismatch.
pub fn validate_value(name: &str, ty: &ColumnType, value: &Value) -> Result<Value> {
    match ty {
        ColumnType::Text {
            min_length,
            max_length,
            pattern,
        } => {
            let text = as_str(name, value)?;
            let length = text.chars().count();
            if let Some(lo) = min_length {
                if length < *lo {
                    return Err(FieldError::invalid_value(
                        name,
                        format!("length {length} is below minLength {lo}"),
                    ));
                }
            }
            if let Some(hi) = max_length {
                if length > *hi {
                    return Err(FieldError::invalid_value(
                        name,
                        format!("value exceeds maxLength {hi}"),
                    ));
                }
            }
            if let Some(pattern) = pattern {
                let re = Regex::new(pattern).map_err(|e| {
                    FieldError::invalid_schema(name, format!("pattern does not compile: {e}"))
                })?;
                if !re.is_match(text) {
                    return Err(FieldError::invalid_value(
                        name,
                        format!("value does not match pattern {pattern}"),
                    ));
                }
            }
            Ok(Value::String(text.to_owned()))
        }
        ColumnType::Number { min, max } => {
            let number = as_number(name, value)?;
            if let Some(lo) = min {
                if number < *lo {
                    return Err(FieldError::invalid_value(
                        name,
                        format!("{number} is below min {lo}"),
                    ));
                }
            }
            if let Some(hi) = max {
                if number > *hi {
                    return Err(FieldError::invalid_value(
                        name,
                        format!("{number} is above max {hi}"),
                    ));
                }
            }
            Ok(serde_json::Number::from_f64(number)
                .map(Value::Number)
                .unwrap_or_else(|| value.clone()))
        }
        ColumnType::Date => {
            let text = as_str(name, value)?;
            if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
                return Ok(Value::String(date.format("%Y-%m-%d").to_string()));
            }
            if DateTime::parse_from_rfc3339(text).is_ok() {
                return Ok(Value::String(text.to_owned()));
            }
            Err(FieldError::invalid_value(
                name,
                format!("not an ISO date: {text}"),
            ))
        }
        ColumnType::SingleSelect { options } | ColumnType::Status { options } => {
            let text = as_str(name, value)?;
            require_option(name, options, text)?;
            Ok(Value::String(text.to_owned()))
        }
        ColumnType::MultiSelect { options } => {
            let entries = as_str_list(name, value)?;
            for entry in &entries {
                require_option(name, options, entry)?;
            }
            Ok(Value::Array(
                entries.into_iter().map(Value::String).collect(),
            ))
        }
        ColumnType::File | ColumnType::Image => {
            let reference = as_str(name, value)?;
            if reference.is_empty() {
                return Err(FieldError::invalid_value(name, "reference is empty"));
            }
            Ok(Value::String(reference.to_owned()))
        }
        ColumnType::BoardLink { multiple, .. } => {
            if *multiple {
                let ids = as_str_list(name, value)?;
                if ids.iter().any(|id| id.is_empty()) {
                    return Err(FieldError::invalid_value(name, "linked item id is empty"));
                }
                Ok(Value::Array(ids.into_iter().map(Value::String).collect()))
            } else {
                let id = as_str(name, value)?;
                if id.is_empty() {
                    return Err(FieldError::invalid_value(name, "linked item id is empty"));
                }
                Ok(Value::String(id.to_owned()))
            }
        }
    }
}

fn as_str<'a>(name: &str, value: &'a Value) -> Result<&'a str> {
    value.as_str().ok_or_else(|| {
        FieldError::invalid_value(name, format!("expected a string, got {}", type_name(value)))
    })
}

fn as_str_list(name: &str, value: &Value) -> Result<Vec<String>> {
    let entries = value.as_array().ok_or_else(|| {
        FieldError::invalid_value(name, format!("expected a list, got {}", type_name(value)))
    })?;
    entries
        .iter()
        .map(|entry| as_str(name, entry).map(str::to_owned))
        .collect()
}

fn as_number(name: &str, value: &Value) -> Result<f64> {
    if let Some(number) = value.as_f64() {
        return Ok(number);
    }
    // Coerce numeric strings, the one conversion forms commonly need
    if let Some(text) = value.as_str() {
        if let Ok(number) = text.trim().parse::<f64>() {
            if number.is_finite() {
                return Ok(number);
            }
        }
    }
    Err(FieldError::invalid_value(
        name,
        format!("expected a number, got {}", type_name(value)),
    ))
}

fn require_option(name: &str, options: &[SelectOption], value: &str) -> Result<()> {
    if options.iter().any(|option| option.value == value) {
        return Ok(());
    }
    Err(FieldError::invalid_value(
        name,
        format!("not an allowed option: {value}"),
    ))
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}
