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

//! # Zi Directive Arguments Module
//!
//! Resolved argument bundles handed to a directive at configuration time, and
//! the usage definitions directives publish so a host can check invocations
//! before configuring anything.
//!
//! Turning an invocation string into tokens is the host's job. This module
//! starts from already-typed tokens, or from a JSON object resolved against a
//! [`ZiUsageDefinition`].
//!
//! ```rust
//! use zi_directives::arguments::{ZiArguments, ZiTokenType, ZiUsageDefinition};
//! use serde_json::json;
//!
//! let usage = ZiUsageDefinition::builder("text-reverse")
//!     .define("column", ZiTokenType::ColumnName)
//!     .build();
//! assert_eq!(usage.usage(), "text-reverse :column;");
//!
//! let args = ZiArguments::from_json(&usage, &json!({"column": "body"})).unwrap();
//! assert_eq!(args.column_name("column").unwrap(), "body");
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::{Result, ZiError};

/// Semantic kind of a directive argument.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZiTokenType {
    ColumnName,
    Text,
    Number,
    Boolean,
}

impl ZiTokenType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ZiTokenType::ColumnName => "column name",
            ZiTokenType::Text => "text",
            ZiTokenType::Number => "number",
            ZiTokenType::Boolean => "boolean",
        }
    }
}

impl fmt::Display for ZiTokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A typed argument value.
#[derive(Clone, Debug, PartialEq)]
pub enum ZiToken {
    ColumnName(String),
    Text(String),
    Number(f64),
    Boolean(bool),
}

impl ZiToken {
    pub fn token_type(&self) -> ZiTokenType {
        match self {
            ZiToken::ColumnName(_) => ZiTokenType::ColumnName,
            ZiToken::Text(_) => ZiTokenType::Text,
            ZiToken::Number(_) => ZiTokenType::Number,
            ZiToken::Boolean(_) => ZiTokenType::Boolean,
        }
    }

    fn from_json(expected: ZiTokenType, value: &Value) -> Option<Self> {
        match (expected, value) {
            (ZiTokenType::ColumnName, Value::String(s)) => Some(ZiToken::ColumnName(s.clone())),
            (ZiTokenType::Text, Value::String(s)) => Some(ZiToken::Text(s.clone())),
            (ZiTokenType::Number, Value::Number(n)) => n.as_f64().map(ZiToken::Number),
            (ZiTokenType::Boolean, Value::Bool(b)) => Some(ZiToken::Boolean(*b)),
            _ => None,
        }
    }
}

/// One entry of a directive's argument signature.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZiArgumentSpec {
    pub name: String,
    pub token_type: ZiTokenType,
    pub optional: bool,
}

/// Registration metadata: directive name, description and ordered argument
/// signature.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZiUsageDefinition {
    pub directive: String,
    pub description: String,
    pub arguments: Vec<ZiArgumentSpec>,
}

impl ZiUsageDefinition {
    pub fn builder(directive: impl Into<String>) -> ZiUsageDefinitionBuilder {
        ZiUsageDefinitionBuilder {
            definition: ZiUsageDefinition {
                directive: directive.into(),
                description: String::new(),
                arguments: Vec::new(),
            },
        }
    }

    pub fn argument(&self, name: &str) -> Option<&ZiArgumentSpec> {
        self.arguments.iter().find(|spec| spec.name == name)
    }

    /// Human-readable usage line, e.g. `text-length :column;`.
    pub fn usage(&self) -> String {
        let mut out = self.directive.clone();
        for spec in &self.arguments {
            let rendered = match spec.token_type {
                ZiTokenType::ColumnName => format!(":{}", spec.name),
                _ => format!("<{}>", spec.name),
            };
            out.push(' ');
            if spec.optional {
                out.push('[');
                out.push_str(&rendered);
                out.push(']');
            } else {
                out.push_str(&rendered);
            }
        }
        out.push(';');
        out
    }
}

pub struct ZiUsageDefinitionBuilder {
    definition: ZiUsageDefinition,
}

impl ZiUsageDefinitionBuilder {
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.definition.description = description.into();
        self
    }

    pub fn define(self, name: impl Into<String>, token_type: ZiTokenType) -> Self {
        self.push(name.into(), token_type, false)
    }

    pub fn define_optional(self, name: impl Into<String>, token_type: ZiTokenType) -> Self {
        self.push(name.into(), token_type, true)
    }

    fn push(mut self, name: String, token_type: ZiTokenType, optional: bool) -> Self {
        self.definition.arguments.push(ZiArgumentSpec {
            name,
            token_type,
            optional,
        });
        self
    }

    pub fn build(self) -> ZiUsageDefinition {
        self.definition
    }
}

/// Resolved, typed arguments for one directive invocation.
#[derive(Clone, Debug, PartialEq)]
pub struct ZiArguments {
    directive: String,
    values: Vec<(String, ZiToken)>,
}

impl ZiArguments {
    pub fn new(directive: impl Into<String>) -> Self {
        ZiArguments {
            directive: directive.into(),
            values: Vec::new(),
        }
    }

    pub fn with(mut self, name: impl Into<String>, token: ZiToken) -> Self {
        self.insert(name, token);
        self
    }

    /// Shorthand for the common single-column bundle.
    pub fn with_column(self, name: impl Into<String>, column: impl Into<String>) -> Self {
        self.with(name, ZiToken::ColumnName(column.into()))
    }

    pub fn insert(&mut self, name: impl Into<String>, token: ZiToken) {
        let name = name.into();
        match self.values.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, slot)) => *slot = token,
            None => self.values.push((name, token)),
        }
    }

    pub fn directive(&self) -> &str {
        &self.directive
    }

    pub fn value(&self, name: &str) -> Option<&ZiToken> {
        self.values
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, token)| token)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.value(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Typed accessor for a required column-name argument.
    pub fn column_name(&self, name: &str) -> Result<&str> {
        match self.value(name) {
            None => Err(ZiError::configuration(
                &self.directive,
                format!("missing required argument '{}'", name),
            )),
            Some(ZiToken::ColumnName(column)) if column.trim().is_empty() => {
                Err(ZiError::configuration(
                    &self.directive,
                    format!("argument '{}' must not be empty", name),
                ))
            }
            Some(ZiToken::ColumnName(column)) => Ok(column),
            Some(other) => Err(ZiError::configuration(
                &self.directive,
                format!(
                    "argument '{}' must be a {}, found {}",
                    name,
                    ZiTokenType::ColumnName,
                    other.token_type()
                ),
            )),
        }
    }

    /// Checks these arguments against a usage definition: every required
    /// argument present, every argument known, every kind as declared.
    pub fn validate(&self, usage: &ZiUsageDefinition) -> Result<()> {
        for (name, token) in &self.values {
            let spec = usage.argument(name).ok_or_else(|| {
                ZiError::configuration(&usage.directive, format!("unknown argument '{}'", name))
            })?;
            if spec.token_type != token.token_type() {
                return Err(ZiError::configuration(
                    &usage.directive,
                    format!(
                        "argument '{}' must be a {}, found {}",
                        name,
                        spec.token_type,
                        token.token_type()
                    ),
                ));
            }
        }
        for spec in usage.arguments.iter().filter(|spec| !spec.optional) {
            if !self.contains(&spec.name) {
                return Err(ZiError::configuration(
                    &usage.directive,
                    format!("missing required argument '{}'", spec.name),
                ));
            }
        }
        Ok(())
    }

    /// Resolves a JSON object of arguments against a usage definition.
    /// `null` is accepted as an empty bundle.
    pub fn from_json(usage: &ZiUsageDefinition, config: &Value) -> Result<Self> {
        let mut args = ZiArguments::new(usage.directive.clone());
        let obj = match config {
            Value::Null => None,
            Value::Object(obj) => Some(obj),
            _ => {
                return Err(ZiError::configuration(
                    &usage.directive,
                    "arguments must be a JSON object",
                ))
            }
        };
        for (name, value) in obj.into_iter().flatten() {
            let spec = usage.argument(name).ok_or_else(|| {
                ZiError::configuration(&usage.directive, format!("unknown argument '{}'", name))
            })?;
            let token = ZiToken::from_json(spec.token_type, value).ok_or_else(|| {
                ZiError::configuration(
                    &usage.directive,
                    format!("argument '{}' must be a {}", name, spec.token_type),
                )
            })?;
            args.insert(name.clone(), token);
        }
        args.validate(usage)?;
        Ok(args)
    }
}
