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

use serde_json::json;
use zi_directives::{
    Result, ZiArguments, ZiColumnDirective, ZiDirective, ZiDirectiveConfig, ZiDirectiveRegistry,
    ZiDirectiveState, ZiError, ZiFieldValue, ZiRow, ZiRowBatch, ZiTextTransform, ZiTokenType,
    ZiUsageDefinition, COLUMN_ARGUMENT,
};

#[derive(Debug)]
struct Upper;

impl ZiTextTransform for Upper {
    fn name(&self) -> &'static str {
        "text-upper"
    }

    fn description(&self) -> &'static str {
        "Uppercases the text represented by the column."
    }

    fn derive(&self, text: &str) -> ZiFieldValue {
        ZiFieldValue::Text(text.to_uppercase())
    }
}

fn upper_factory() -> Box<dyn ZiDirective + Send + Sync> {
    Box::new(ZiColumnDirective::new(Upper))
}

/// Drops rows whose column is missing; shows a directive changing batch size.
#[derive(Debug)]
struct DropMissing {
    state: ZiDirectiveState,
    config: Option<ZiDirectiveConfig>,
}

impl ZiDirective for DropMissing {
    fn name(&self) -> &'static str {
        "drop-missing"
    }

    fn define(&self) -> ZiUsageDefinition {
        ZiUsageDefinition::builder("drop-missing")
            .description("Drops rows without the column.")
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
        self.config = Some(ZiDirectiveConfig::resolve(&self.define(), args)?);
        self.state = ZiDirectiveState::Configured;
        Ok(())
    }

    fn apply(&self, batch: ZiRowBatch) -> Result<ZiRowBatch> {
        let config = self
            .config
            .as_ref()
            .ok_or_else(|| ZiError::invalid_state(self.name(), self.state.as_str(), "apply"))?;
        Ok(batch
            .into_iter()
            .filter(|row| row.find(config.column()).is_some())
            .collect())
    }

    fn teardown(&mut self) {
        self.config = None;
        self.state = ZiDirectiveState::TornDown;
    }
}

fn drop_missing_factory() -> Box<dyn ZiDirective + Send + Sync> {
    Box::new(DropMissing {
        state: ZiDirectiveState::Unconfigured,
        config: None,
    })
}

#[test]
fn custom_column_directive_registered() {
    let mut registry = ZiDirectiveRegistry::with_builtins();
    registry.register("text-upper", upper_factory).unwrap();
    assert_eq!(registry.names(), vec!["text-length", "text-reverse", "text-upper"]);

    let args = ZiArguments::new("text-upper").with_column("column", "v");
    let op = registry.configure("text-upper", &args).unwrap();
    let out = op.apply(vec![ZiRow::new().with_field("v", "mars")]).unwrap();
    assert_eq!(out[0].to_json(), json!({"v": "MARS"}));
}

#[test]
fn directive_may_shrink_batch() {
    let mut registry = ZiDirectiveRegistry::new();
    registry.register("drop-missing", drop_missing_factory).unwrap();
    let args = ZiArguments::new("drop-missing").with_column("column", "v");
    let op = registry.configure("drop-missing", &args).unwrap();
    let out = op
        .apply(vec![
            ZiRow::new().with_field("v", 1),
            ZiRow::new().with_field("w", 2),
        ])
        .unwrap();
    assert_eq!(out.len(), 1);
}

#[test]
fn empty_name_rejected() {
    let mut registry = ZiDirectiveRegistry::new();
    assert!(registry.register(" ", upper_factory).is_err());
}

#[test]
fn definitions_serialize_for_hosts() {
    let registry = ZiDirectiveRegistry::with_builtins();
    let defs = serde_json::to_value(registry.definitions()).unwrap();
    assert_eq!(defs[0]["directive"], json!("text-length"));
    assert_eq!(defs[0]["description"], json!("Computes the length of the string."));
    assert_eq!(
        defs[1]["arguments"],
        json!([{"name": "column", "token_type": "column_name", "optional": false}])
    );
}

#[test]
fn configuration_error_from_registry() {
    let registry = ZiDirectiveRegistry::with_builtins();
    let err = registry
        .configure("text-reverse", &ZiArguments::new("text-reverse"))
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "directive 'text-reverse' configuration error: missing required argument 'column'"
    );
}
