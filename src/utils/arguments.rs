//! JSON to ABI value parsing
//!
//! Method arguments arrive as JSON and are converted against the parameter
//! types declared in the contract interface:
//!
//! | ABI type            | Accepted JSON                                  |
//! |---------------------|------------------------------------------------|
//! | `uint*` / `int*`    | number, or decimal/hex string (`"1000"`, `"0x10"`) |
//! | `bool`              | `true` / `false`, or `"true"` / `"false"`      |
//! | `address`           | `"0x…"` string                                 |
//! | `bytes*`            | `"0x…"` hex string                             |
//! | `string`            | string                                         |
//! | `T[]` / `T[k]`      | JSON array of `T`                              |
//! | `(T1,T2,…)`         | JSON array with one entry per component        |

use alloy_dyn_abi::{DynSolType, DynSolValue, Specifier};
use alloy_json_abi::{Function, JsonAbi};
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

/// Errors that can occur during argument parsing
#[derive(Debug, Error)]
pub enum ArgumentParseError {
    #[error("Unknown method: {0}")]
    UnknownMethod(String),

    #[error("Method {method} takes {expected} argument(s) but {actual} were given")]
    ArityMismatch {
        method: String,
        expected: String,
        actual: usize,
    },

    #[error("Unsupported parameter type: {0}")]
    UnsupportedType(String),

    #[error("Type/value mismatch: expected {expected} but got {actual}")]
    TypeMismatch { expected: String, actual: String },

    #[error("Failed to convert value: {0}")]
    ConversionError(String),

    #[error("JSON parsing error: {0}")]
    JsonError(String),
}

impl From<serde_json::Error> for ArgumentParseError {
    fn from(err: serde_json::Error) -> Self {
        ArgumentParseError::JsonError(err.to_string())
    }
}

impl From<ArgumentParseError> for crate::SessionError {
    fn from(err: ArgumentParseError) -> Self {
        crate::SessionError::InvalidArguments(err.to_string())
    }
}

/// Find the function named `method` that accepts `arg_count` arguments.
pub fn resolve_function<'a>(
    interface: &'a JsonAbi,
    method: &str,
    arg_count: usize,
) -> Result<&'a Function, ArgumentParseError> {
    let overloads = interface
        .function(method)
        .ok_or_else(|| ArgumentParseError::UnknownMethod(method.to_string()))?;

    overloads
        .iter()
        .find(|f| f.inputs.len() == arg_count)
        .ok_or_else(|| ArgumentParseError::ArityMismatch {
            method: method.to_string(),
            expected: overloads
                .iter()
                .map(|f| f.inputs.len().to_string())
                .collect::<Vec<_>>()
                .join(" or "),
            actual: arg_count,
        })
}

/// Split a JSON argument string into one value per argument.
///
/// An array yields its elements, any other value is a single argument and
/// blank input means no arguments.
pub fn parse_json_args(json_str: &str) -> Result<Vec<Value>, ArgumentParseError> {
    if json_str.trim().is_empty() {
        return Ok(Vec::new());
    }
    Ok(match serde_json::from_str(json_str)? {
        Value::Array(values) => values,
        other => vec![other],
    })
}

/// Argument parser converting JSON values to the parameter types of one function
pub struct ArgumentParser<'a> {
    function: &'a Function,
}

impl<'a> ArgumentParser<'a> {
    pub fn new(function: &'a Function) -> Self {
        Self { function }
    }

    /// Convert one JSON value per declared input
    pub fn parse_values(
        &self,
        values: &[Value],
    ) -> Result<Vec<DynSolValue>, ArgumentParseError> {
        if values.len() != self.function.inputs.len() {
            return Err(ArgumentParseError::ArityMismatch {
                method: self.function.name.clone(),
                expected: self.function.inputs.len().to_string(),
                actual: values.len(),
            });
        }

        self.function
            .inputs
            .iter()
            .zip(values)
            .map(|(param, value)| {
                let ty = param.resolve().map_err(|e| {
                    ArgumentParseError::UnsupportedType(format!("{}: {}", param.ty, e))
                })?;
                debug!(param = %param.name, ty = %param.ty, "Converting argument");
                convert_value(&ty, value)
            })
            .collect()
    }
}

fn convert_value(ty: &DynSolType, value: &Value) -> Result<DynSolValue, ArgumentParseError> {
    match (ty, value) {
        (DynSolType::Array(inner), Value::Array(items)) => Ok(DynSolValue::Array(
            items
                .iter()
                .map(|item| convert_value(inner, item))
                .collect::<Result<_, _>>()?,
        )),
        (DynSolType::FixedArray(inner, len), Value::Array(items)) => {
            if items.len() != *len {
                return Err(ArgumentParseError::TypeMismatch {
                    expected: ty.sol_type_name().into_owned(),
                    actual: format!("array of length {}", items.len()),
                });
            }
            Ok(DynSolValue::FixedArray(
                items
                    .iter()
                    .map(|item| convert_value(inner, item))
                    .collect::<Result<_, _>>()?,
            ))
        }
        (DynSolType::Tuple(types), Value::Array(items)) => {
            if items.len() != types.len() {
                return Err(ArgumentParseError::TypeMismatch {
                    expected: ty.sol_type_name().into_owned(),
                    actual: format!("array of length {}", items.len()),
                });
            }
            Ok(DynSolValue::Tuple(
                types
                    .iter()
                    .zip(items)
                    .map(|(ty, item)| convert_value(ty, item))
                    .collect::<Result<_, _>>()?,
            ))
        }
        (_, Value::String(s)) => coerce(ty, s),
        (_, Value::Number(n)) => coerce(ty, &n.to_string()),
        (_, Value::Bool(b)) => coerce(ty, if *b { "true" } else { "false" }),
        (_, other) => Err(ArgumentParseError::TypeMismatch {
            expected: ty.sol_type_name().into_owned(),
            actual: json_kind(other).to_string(),
        }),
    }
}

fn coerce(ty: &DynSolType, text: &str) -> Result<DynSolValue, ArgumentParseError> {
    ty.coerce_str(text).map_err(|e| {
        ArgumentParseError::ConversionError(format!(
            "{:?} is not a valid {}: {}",
            text,
            ty.sol_type_name(),
            e
        ))
    })
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
