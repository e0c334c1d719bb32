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

//! # Zi Row Module
//!
//! ZiRow is the unit of tabular data that flows through directives: an
//! ordered mapping from field name to [`ZiFieldValue`].
//!
//! ## Design Principles
//!
//! - **Ordered**: fields keep insertion order, and directives write derived
//!   values back at the original position
//! - **Unique names**: adding a field whose name already exists replaces the
//!   value in place instead of appending a duplicate
//! - **Lookup never fails**: a missing field is `None`, not an error
//!
//! ## Usage Example
//!
//! ```rust
//! use zi_directives::record::ZiRow;
//! use zi_directives::value::ZiFieldValue;
//!
//! let mut row = ZiRow::new().with_field("id", 7).with_field("body", "root");
//!
//! let idx = row.find("body").unwrap();
//! row.set_value(idx, ZiFieldValue::from("toor"));
//!
//! assert_eq!(row.names(), vec!["id", "body"]);
//! assert_eq!(row.get("body").and_then(ZiFieldValue::as_text), Some("toor"));
//! ```

use serde_json::{Map, Value};

use crate::errors::{Result, ZiError};
use crate::value::ZiFieldValue;

/// Ordered field-name to value mapping.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ZiRow {
    fields: Vec<(String, ZiFieldValue)>,
}

impl ZiRow {
    pub fn new() -> Self {
        ZiRow { fields: Vec::new() }
    }

    /// Builder-style [`ZiRow::add`].
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<ZiFieldValue>) -> Self {
        self.add(name, value);
        self
    }

    /// Appends a field, or replaces the value in place when the name exists.
    pub fn add(&mut self, name: impl Into<String>, value: impl Into<ZiFieldValue>) {
        let name = name.into();
        let value = value.into();
        match self.find(&name) {
            Some(idx) => self.fields[idx].1 = value,
            None => self.fields.push((name, value)),
        }
    }

    /// Position of the named field.
    pub fn find(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|(field, _)| field == name)
    }

    pub fn get(&self, name: &str) -> Option<&ZiFieldValue> {
        self.find(name).map(|idx| &self.fields[idx].1)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut ZiFieldValue> {
        match self.find(name) {
            Some(idx) => Some(&mut self.fields[idx].1),
            None => None,
        }
    }

    pub fn value_at(&self, idx: usize) -> Option<&ZiFieldValue> {
        self.fields.get(idx).map(|(_, value)| value)
    }

    pub fn name_at(&self, idx: usize) -> Option<&str> {
        self.fields.get(idx).map(|(name, _)| name.as_str())
    }

    /// Overwrites the value at `idx`, keeping the field name and position.
    /// Returns the previous value, or `None` when `idx` is out of range.
    pub fn set_value(&mut self, idx: usize, value: ZiFieldValue) -> Option<ZiFieldValue> {
        self.fields
            .get_mut(idx)
            .map(|(_, slot)| std::mem::replace(slot, value))
    }

    pub fn remove(&mut self, name: &str) -> Option<ZiFieldValue> {
        self.find(name).map(|idx| self.fields.remove(idx).1)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn names(&self) -> Vec<&str> {
        self.fields.iter().map(|(name, _)| name.as_str()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ZiFieldValue)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Builds a row from a JSON object map in key order.
    pub fn from_map(map: &Map<String, Value>) -> Self {
        let mut row = ZiRow::new();
        for (name, value) in map {
            row.add(name.clone(), ZiFieldValue::from_json(value));
        }
        row
    }

    /// Builds a row from a JSON object; any other JSON shape is rejected.
    pub fn from_json(value: &Value) -> Result<Self> {
        value
            .as_object()
            .map(ZiRow::from_map)
            .ok_or_else(|| ZiError::validation("row JSON must be an object"))
    }

    pub fn to_json(&self) -> Value {
        let mut map = Map::new();
        for (name, value) in &self.fields {
            map.insert(name.clone(), value.to_json());
        }
        Value::Object(map)
    }
}

impl<N, V> FromIterator<(N, V)> for ZiRow
where
    N: Into<String>,
    V: Into<ZiFieldValue>,
{
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        let mut row = ZiRow::new();
        for (name, value) in iter {
            row.add(name, value);
        }
        row
    }
}

/// Convenience alias for working on batches of rows.
pub type ZiRowBatch = Vec<ZiRow>;

/// Decodes a JSON array of objects into a batch.
pub fn batch_from_json(value: &Value) -> Result<ZiRowBatch> {
    value
        .as_array()
        .ok_or_else(|| ZiError::validation("batch JSON must be an array"))?
        .iter()
        .map(ZiRow::from_json)
        .collect()
}

pub fn batch_to_json(batch: &[ZiRow]) -> Value {
    Value::Array(batch.iter().map(ZiRow::to_json).collect())
}
