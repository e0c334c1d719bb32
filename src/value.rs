//! Copyright © 2025-2026 Wenze Wei. All Rights Reserved.
//!
//! This file is part of Zi.
//! The Zi project belongs to the Dunimd Team.
//!
//! Licensed under the Apache License, Version 2.0 (the "License");
//! You may not use this file except in compliance with the License.
//! You may obtain a copy of the License at
//!
//!     http://www.apache.org/licenses/LICENSE-2.0
//!
//! Unless required by applicable law or agreed to in writing, software
//! distributed under the License is distributed on an "AS IS" BASIS,
//! WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//! See the License for the specific language governing permissions and
//! limitations under the License.

//! # Zi Field Value Module
//!
//! Dynamically-typed values stored in row fields. The set of kinds is closed:
//! directives match on [`ZiFieldValue`] exhaustively and pass through every
//! kind they do not understand.
//!
//! ## JSON Bridge
//!
//! Values convert to and from `serde_json::Value` so that rows can be fed from
//! the same JSON documents the rest of Zi works with:
//!
//! | JSON            | ZiFieldValue              |
//! |-----------------|---------------------------|
//! | string          | `Text`                    |
//! | integer number  | `Integer` (if it fits i64)|
//! | other number    | `Float`                   |
//! | bool            | `Boolean`                 |
//! | null            | `Null`                    |
//! | array           | `List`                    |
//! | object          | `Record`                  |
//!
//! `Bytes` serialize as a standard base64 string. There is no tag on the way
//! back, so a JSON string always decodes to `Text`.

use std::fmt;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde_json::{Number, Value};

use crate::record::ZiRow;

/// Discriminant of a [`ZiFieldValue`], used in logs and diagnostics.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ZiValueKind {
    Text,
    Bytes,
    Integer,
    Float,
    Boolean,
    Null,
    List,
    Record,
}

impl ZiValueKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ZiValueKind::Text => "text",
            ZiValueKind::Bytes => "bytes",
            ZiValueKind::Integer => "integer",
            ZiValueKind::Float => "float",
            ZiValueKind::Boolean => "boolean",
            ZiValueKind::Null => "null",
            ZiValueKind::List => "list",
            ZiValueKind::Record => "record",
        }
    }
}

impl fmt::Display for ZiValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Value held by a single row field.
#[derive(Clone, Debug, PartialEq)]
pub enum ZiFieldValue {
    Text(String),
    Bytes(Vec<u8>),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Null,
    List(Vec<ZiFieldValue>),
    Record(ZiRow),
}

impl ZiFieldValue {
    pub fn kind(&self) -> ZiValueKind {
        match self {
            ZiFieldValue::Text(_) => ZiValueKind::Text,
            ZiFieldValue::Bytes(_) => ZiValueKind::Bytes,
            ZiFieldValue::Integer(_) => ZiValueKind::Integer,
            ZiFieldValue::Float(_) => ZiValueKind::Float,
            ZiFieldValue::Boolean(_) => ZiValueKind::Boolean,
            ZiFieldValue::Null => ZiValueKind::Null,
            ZiFieldValue::List(_) => ZiValueKind::List,
            ZiFieldValue::Record(_) => ZiValueKind::Record,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            ZiFieldValue::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            ZiFieldValue::Bytes(bytes) => Some(bytes),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            ZiFieldValue::Integer(n) => Some(*n),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, ZiFieldValue::Null)
    }

    /// Builds a value from JSON. Objects become nested records with their key
    /// order preserved.
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::Null => ZiFieldValue::Null,
            Value::Bool(b) => ZiFieldValue::Boolean(*b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => ZiFieldValue::Integer(i),
                None => n
                    .as_f64()
                    .map(ZiFieldValue::Float)
                    .unwrap_or(ZiFieldValue::Null),
            },
            Value::String(s) => ZiFieldValue::Text(s.clone()),
            Value::Array(items) => {
                ZiFieldValue::List(items.iter().map(ZiFieldValue::from_json).collect())
            }
            Value::Object(map) => ZiFieldValue::Record(ZiRow::from_map(map)),
        }
    }

    /// Renders the value as JSON. Non-finite floats become `null`.
    pub fn to_json(&self) -> Value {
        match self {
            ZiFieldValue::Text(s) => Value::String(s.clone()),
            ZiFieldValue::Bytes(bytes) => Value::String(BASE64.encode(bytes)),
            ZiFieldValue::Integer(i) => Value::Number((*i).into()),
            ZiFieldValue::Float(f) => Number::from_f64(*f)
                .map(Value::Number)
                .unwrap_or(Value::Null),
            ZiFieldValue::Boolean(b) => Value::Bool(*b),
            ZiFieldValue::Null => Value::Null,
            ZiFieldValue::List(items) => {
                Value::Array(items.iter().map(ZiFieldValue::to_json).collect())
            }
            ZiFieldValue::Record(row) => row.to_json(),
        }
    }
}

impl From<&str> for ZiFieldValue {
    fn from(value: &str) -> Self {
        ZiFieldValue::Text(value.to_string())
    }
}

impl From<String> for ZiFieldValue {
    fn from(value: String) -> Self {
        ZiFieldValue::Text(value)
    }
}

impl From<Vec<u8>> for ZiFieldValue {
    fn from(value: Vec<u8>) -> Self {
        ZiFieldValue::Bytes(value)
    }
}

impl From<&[u8]> for ZiFieldValue {
    fn from(value: &[u8]) -> Self {
        ZiFieldValue::Bytes(value.to_vec())
    }
}

impl From<i64> for ZiFieldValue {
    fn from(value: i64) -> Self {
        ZiFieldValue::Integer(value)
    }
}

impl From<i32> for ZiFieldValue {
    fn from(value: i32) -> Self {
        ZiFieldValue::Integer(i64::from(value))
    }
}

impl From<f64> for ZiFieldValue {
    fn from(value: f64) -> Self {
        ZiFieldValue::Float(value)
    }
}

impl From<bool> for ZiFieldValue {
    fn from(value: bool) -> Self {
        ZiFieldValue::Boolean(value)
    }
}

impl From<ZiRow> for ZiFieldValue {
    fn from(value: ZiRow) -> Self {
        ZiFieldValue::Record(value)
    }
}

impl From<&Value> for ZiFieldValue {
    fn from(value: &Value) -> Self {
        ZiFieldValue::from_json(value)
    }
}
