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

//! # Zi Directive Module
//!
//! This module defines the contract every directive fulfils so that a host
//! pipeline can compose directives into an ordered sequence of steps.
//!
//! ## Lifecycle
//!
//! ```text
//! Unconfigured --configure--> Configured --teardown--> TornDown
//!      |                                                  ^
//!      +--------------------teardown----------------------+
//! ```
//!
//! - `configure` runs once, before any row flows, and resolves an immutable
//!   [`ZiDirectiveConfig`]. Missing or malformed arguments fail with
//!   [`ZiError::Configuration`].
//! - `apply` may run any number of times while configured. It takes `&self`,
//!   so one configured directive can process disjoint batches concurrently.
//! - `teardown` is idempotent and legal from any state.
//!
//! Driving a directive out of order yields [`ZiError::InvalidState`].
//!
//! ## Column Directives
//!
//! Most directives rewrite a single named column. [`ZiColumnDirective`] owns
//! the lifecycle, the field lookup and the value-kind dispatch; a concrete
//! directive only supplies a [`ZiTextTransform`]:
//!
//! - field absent: row unchanged
//! - `Text`: derived value written back at the same position
//! - `Bytes`: decoded as UTF-8 (invalid sequences become U+FFFD), then derived
//! - any other kind: row unchanged

use std::fmt;

use log::{debug, info, trace};

use crate::arguments::{ZiArguments, ZiTokenType, ZiUsageDefinition};
use crate::errors::{Result, ZiError};
use crate::record::{ZiRow, ZiRowBatch};
use crate::value::ZiFieldValue;

/// Name of the single argument taken by column directives.
pub const COLUMN_ARGUMENT: &str = "column";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ZiDirectiveState {
    Unconfigured,
    Configured,
    TornDown,
}

impl ZiDirectiveState {
    pub fn as_str(&self) -> &'static str {
        match self {
            ZiDirectiveState::Unconfigured => "unconfigured",
            ZiDirectiveState::Configured => "configured",
            ZiDirectiveState::TornDown => "torn down",
        }
    }
}

impl fmt::Display for ZiDirectiveState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Configuration resolved once per pipeline build.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ZiDirectiveConfig {
    directive: String,
    column: String,
}

impl ZiDirectiveConfig {
    /// Validates `args` against `usage` and extracts the target column.
    pub fn resolve(usage: &ZiUsageDefinition, args: &ZiArguments) -> Result<Self> {
        args.validate(usage)?;
        let column = args.column_name(COLUMN_ARGUMENT).map_err(|err| match err {
            ZiError::Configuration { message, .. } => {
                ZiError::configuration(&usage.directive, message)
            }
            other => other,
        })?;
        Ok(ZiDirectiveConfig {
            directive: usage.directive.clone(),
            column: column.to_string(),
        })
    }

    pub fn directive(&self) -> &str {
        &self.directive
    }

    pub fn column(&self) -> &str {
        &self.column
    }
}

/// Contract that every directive must fulfil.
pub trait ZiDirective: fmt::Debug + Send + Sync {
    /// Stable registration name, e.g. `text-length`.
    fn name(&self) -> &'static str;

    /// Registration metadata used by hosts to check invocations.
    fn define(&self) -> ZiUsageDefinition;

    fn state(&self) -> ZiDirectiveState;

    /// Resolved configuration, present only while configured.
    fn config(&self) -> Option<&ZiDirectiveConfig>;

    fn configure(&mut self, args: &ZiArguments) -> Result<()>;

    /// Transforms a batch. The returned batch may differ in length, though
    /// column directives always return one row per input row.
    fn apply(&self, batch: ZiRowBatch) -> Result<ZiRowBatch>;

    fn teardown(&mut self);
}

/// Per-value derivation plugged into [`ZiColumnDirective`].
pub trait ZiTextTransform: fmt::Debug + Send + Sync {
    fn name(&self) -> &'static str;

    fn description(&self) -> &'static str;

    fn derive(&self, text: &str) -> ZiFieldValue;

    fn derive_bytes(&self, bytes: &[u8]) -> ZiFieldValue {
        self.derive(&String::from_utf8_lossy(bytes))
    }
}

/// Directive rewriting one configured column with a [`ZiTextTransform`].
#[derive(Debug)]
pub struct ZiColumnDirective<T> {
    transform: T,
    state: ZiDirectiveState,
    config: Option<ZiDirectiveConfig>,
}

impl<T: ZiTextTransform> ZiColumnDirective<T> {
    pub fn new(transform: T) -> Self {
        ZiColumnDirective {
            transform,
            state: ZiDirectiveState::Unconfigured,
            config: None,
        }
    }

    pub fn transform(&self) -> &T {
        &self.transform
    }

    fn apply_row(&self, row: &mut ZiRow, column: &str) {
        let Some(idx) = row.find(column) else {
            return;
        };
        let derived = match row.value_at(idx) {
            Some(ZiFieldValue::Text(text)) => self.transform.derive(text),
            Some(ZiFieldValue::Bytes(bytes)) => self.transform.derive_bytes(bytes),
            Some(
                skipped @ (ZiFieldValue::Integer(_)
                | ZiFieldValue::Float(_)
                | ZiFieldValue::Boolean(_)
                | ZiFieldValue::Null
                | ZiFieldValue::List(_)
                | ZiFieldValue::Record(_)),
            ) => {
                trace!(
                    "directive '{}' left {} column '{}' unchanged",
                    self.transform.name(),
                    skipped.kind(),
                    column
                );
                return;
            }
            None => return,
        };
        row.set_value(idx, derived);
    }
}

impl<T: ZiTextTransform> ZiDirective for ZiColumnDirective<T> {
    fn name(&self) -> &'static str {
        self.transform.name()
    }

    fn define(&self) -> ZiUsageDefinition {
        ZiUsageDefinition::builder(self.transform.name())
            .description(self.transform.description())
            .define(COLUMN_ARGUMENT, ZiTokenType::ColumnName)
            .build()
    }

    fn state(&self) -> ZiDirectiveState {
        self.state
    }

    fn config(&self) -> Option<&ZiDirectiveConfig> {
        self.config.as_ref()
    }

    fn configure(&mut self, args: &ZiArguments) -> Result<()> {
        if self.state != ZiDirectiveState::Unconfigured {
            return Err(ZiError::invalid_state(
                self.name(),
                self.state.as_str(),
                "configure",
            ));
        }
        let config = ZiDirectiveConfig::resolve(&self.define(), args)?;
        info!(
            "directive '{}' configured for column '{}'",
            self.name(),
            config.column()
        );
        self.config = Some(config);
        self.state = ZiDirectiveState::Configured;
        Ok(())
    }

    fn apply(&self, mut batch: ZiRowBatch) -> Result<ZiRowBatch> {
        let config = match (&self.state, &self.config) {
            (ZiDirectiveState::Configured, Some(config)) => config,
            _ => {
                return Err(ZiError::invalid_state(
                    self.name(),
                    self.state.as_str(),
                    "apply",
                ))
            }
        };
        for row in &mut batch {
            self.apply_row(row, config.column());
        }
        Ok(batch)
    }

    fn teardown(&mut self) {
        if self.state == ZiDirectiveState::TornDown {
            return;
        }
        info!("directive '{}' torn down", self.name());
        self.config = None;
        self.state = ZiDirectiveState::TornDown;
    }
}

/// Runs a directive over a batch, attributing foreign failures to it.
///
/// Errors that already name a directive pass through untouched; anything
/// else is reported as an execution failure of `directive`.
pub fn execute_directive(directive: &dyn ZiDirective, batch: ZiRowBatch) -> Result<ZiRowBatch> {
    let rows_in = batch.len();
    let out = directive.apply(batch).map_err(|err| match err {
        owned @ (ZiError::Configuration { .. }
        | ZiError::InvalidState { .. }
        | ZiError::Execution { .. }) => owned,
        other => ZiError::execution(directive.name(), other.to_string()),
    })?;
    debug!(
        "directive '{}' processed {} rows into {}",
        directive.name(),
        rows_in,
        out.len()
    );
    Ok(out)
}
